//! A self-contained SVG chord renderer.
//!
//! Groups are drawn as annulus arcs with their participant label on a text path; ribbons are
//! colored after their target group. The export surface additionally honors the `frame` options
//! (outer margin and background fill) written by [`crate::export_options`].

use crate::color::darker;
use crate::layout::{ChordEnd, ChordLayout, GroupArc, chord_layout};
use crate::renderer::{ChordDiagram, ChordRenderer, RenderRequest, Surface};
use crate::{Error, Result};
use chordsnip_core::settings::ChartOptions;
use std::f64::consts::PI;
use std::fmt::Write as _;

/// Renders into in-memory SVG strings, one per surface.
#[derive(Debug, Clone, Default)]
pub struct SvgChordRenderer {
    preview: Option<String>,
    export: Option<String>,
}

impl SvgChordRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, surface: Surface) -> &mut Option<String> {
        match surface {
            Surface::Preview => &mut self.preview,
            Surface::Export => &mut self.export,
        }
    }
}

impl ChordRenderer for SvgChordRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        let svg = render_chord_svg(request)?;
        match self.slot(request.surface) {
            Some(existing) if !request.clear => existing.push_str(&svg),
            slot => *slot = Some(svg),
        }
        Ok(())
    }

    fn markup(&self, surface: Surface) -> Option<String> {
        match surface {
            Surface::Preview => self.preview.clone(),
            Surface::Export => self.export.clone(),
        }
    }
}

pub fn render_chord_svg(request: &RenderRequest<'_>) -> Result<String> {
    let options: ChartOptions = request.options.deserialize()?;
    let width = options.width;
    if !(width.is_finite() && width > 0.0) {
        return Err(Error::Renderer {
            surface: request.surface,
            message: format!("chart width must be positive, got {width}"),
        });
    }

    let margin = request
        .options
        .get_f64("frame.margin")
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(0.0);
    let background = request.options.get_str("frame.fill");

    let node = &options.chord.node;
    let link = &options.chord.link.color;
    let outer = width / 2.0;
    let inner = (outer - node.width).max(0.0);
    let total = width + 2.0 * margin;
    let center = outer + margin;

    let diagram = request.diagram;
    let layout = chord_layout(&diagram.matrix, node.node_padding, node.sort_groups);
    let id_prefix = format!("chordsnip-{}", request.surface);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{w}" viewBox="0 0 {w} {w}">"#,
        w = fmt(total)
    );
    if let Some(fill) = background {
        let _ = write!(
            &mut out,
            r#"<rect width="100%" height="100%" fill="{fill}"/>"#,
            fill = escape_xml(fill)
        );
    }
    let _ = write!(
        &mut out,
        r#"<g transform="translate({c},{c})">"#,
        c = fmt(center)
    );

    let group_style = |color: &str| {
        format!(
            "fill: {color}; stroke: {stroke}; opacity: {opacity}; stroke-width: {sw};",
            stroke = darker(color),
            opacity = fmt((link.fill_opacity * 1.1).min(1.0)),
            sw = fmt(link.stroke_width),
        )
    };
    let label = &node.label;
    let label_style = format!(
        "font-size: {size}px; font-family: {family}; font-weight: {weight}; font-style: {style}; fill: {fill};",
        size = fmt(label.font_size),
        family = label.font_name,
        weight = if label.bold { "bold" } else { "normal" },
        style = if label.italic { "italic" } else { "normal" },
        fill = label.color,
    );

    out.push_str(r#"<g class="groups">"#);
    for group in &layout.groups {
        let name = participant(diagram, group.index);
        let color = diagram.color_at(group.index).unwrap_or("#000000");
        let id = format!("{id_prefix}-group{}", group.index);
        let _ = write!(
            &mut out,
            r#"<g><path id="{id}" d="{d}" style="{style}"/>"#,
            id = id,
            d = group_path(group, inner, outer),
            style = escape_xml(&group_style(color)),
        );
        let _ = write!(
            &mut out,
            r##"<text dy="{dy}" text-anchor="middle" x="{x}" style="{style}"><textPath xlink:href="#{id}" startOffset="{offset}%">{text}</textPath></text>"##,
            dy = fmt((outer - inner) / 2.0 + 4.0),
            x = fmt(node.label_padding),
            style = escape_xml(&label_style),
            id = id,
            offset = fmt(label_offset(group, inner, outer)),
            text = escape_xml(name),
        );
        let _ = write!(
            &mut out,
            r#"<title>{text}</title></g>"#,
            text = escape_xml(&format!("{name}: {}", fmt(group.value)))
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="ribbons">"#);
    write_ribbons(&mut out, diagram, &layout, inner, link.fill_opacity, link.stroke_width);
    out.push_str("</g>");

    out.push_str("</g></svg>");
    Ok(out)
}

fn write_ribbons(
    out: &mut String,
    diagram: &ChordDiagram,
    layout: &ChordLayout,
    radius: f64,
    opacity: f64,
    stroke_width: f64,
) {
    for ribbon in &layout.ribbons {
        let color = diagram.color_at(ribbon.target.index).unwrap_or("#000000");
        let style = format!(
            "fill: {color}; stroke: {stroke}; opacity: {opacity}; stroke-width: {sw};",
            stroke = darker(color),
            opacity = fmt(opacity),
            sw = fmt(stroke_width),
        );
        let title = format!(
            "{} > {} ({})",
            participant(diagram, ribbon.source.index),
            participant(diagram, ribbon.target.index),
            fmt(ribbon.source.value)
        );
        let _ = write!(
            out,
            r#"<path d="{d}" style="{style}"><title>{title}</title></path>"#,
            d = ribbon_path(&ribbon.source, &ribbon.target, radius),
            style = escape_xml(&style),
            title = escape_xml(&title),
        );
    }
}

fn participant(diagram: &ChordDiagram, index: usize) -> &str {
    diagram
        .participants
        .get(index)
        .map(String::as_str)
        .unwrap_or_default()
}

fn polar_xy(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Appends a clockwise (`sweep = 1`) or counter-clockwise arc from `a0` to `a1`. Arcs wider than
/// half a turn are split in two so a full circle still draws.
fn arc_to(d: &mut String, r: f64, a0: f64, a1: f64, sweep: u8) {
    let span = (a1 - a0).abs();
    if span > PI {
        let mid = (a0 + a1) / 2.0;
        arc_to(d, r, a0, mid, sweep);
        arc_to(d, r, mid, a1, sweep);
        return;
    }
    let (x, y) = polar_xy(r, a1);
    let _ = write!(
        d,
        "A{r},{r},0,0,{sweep},{x},{y}",
        r = fmt(r),
        x = fmt(x),
        y = fmt(y)
    );
}

fn group_path(group: &GroupArc, inner: f64, outer: f64) -> String {
    let (a0, a1) = (group.start_angle, group.end_angle);
    let mut d = String::new();
    let (x0, y0) = polar_xy(outer, a0);
    let _ = write!(&mut d, "M{},{}", fmt(x0), fmt(y0));
    arc_to(&mut d, outer, a0, a1, 1);
    let (x1, y1) = polar_xy(inner, a1);
    let _ = write!(&mut d, "L{},{}", fmt(x1), fmt(y1));
    arc_to(&mut d, inner, a1, a0, 0);
    d.push('Z');
    d
}

fn ribbon_path(source: &ChordEnd, target: &ChordEnd, r: f64) -> String {
    let mut d = String::new();
    let (sx, sy) = polar_xy(r, source.start_angle);
    let _ = write!(&mut d, "M{},{}", fmt(sx), fmt(sy));
    arc_to(&mut d, r, source.start_angle, source.end_angle, 1);
    if source.start_angle != target.start_angle || source.end_angle != target.end_angle {
        let (tx, ty) = polar_xy(r, target.start_angle);
        let _ = write!(&mut d, "Q0,0,{},{}", fmt(tx), fmt(ty));
        arc_to(&mut d, r, target.start_angle, target.end_angle, 1);
    }
    let _ = write!(&mut d, "Q0,0,{},{}", fmt(sx), fmt(sy));
    d.push('Z');
    d
}

/// Start offset (percent of the group outline) that centers a label on the outer arc.
fn label_offset(group: &GroupArc, inner: f64, outer: f64) -> f64 {
    let span = group.end_angle - group.start_angle;
    let length = span * (outer + inner) + 2.0 * (outer - inner);
    if length <= 0.0 {
        return 0.0;
    }
    25.0 - 50.0 * outer / length + 50.0 * inner / length
}

/// Up to three decimals, trailing zeros trimmed; non-finite values print as `0`.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordsnip_core::ChordConfig;
    use serde_json::json;

    fn options() -> ChordConfig {
        ChordConfig::from_value(json!({
            "width": 200,
            "chord": {
                "link": {
                    "colorMode": "google20",
                    "color": { "fill": "#3F51B5", "fillEnd": "#FF5722", "fillOpacity": 0.5, "strokeWidth": 1 }
                },
                "node": {
                    "label": { "fontName": "Roboto", "fontSize": 10, "color": "#212121", "bold": true, "italic": false },
                    "labelPadding": 3,
                    "nodePadding": 0.05,
                    "width": 20,
                    "sortGroups": "none"
                }
            }
        }))
    }

    fn diagram() -> ChordDiagram {
        ChordDiagram {
            participants: vec!["A".into(), "B & C".into()],
            matrix: vec![vec![0.0, 10.0], vec![5.0, 0.0]],
            group_values: vec![10.0, 5.0],
            colors: vec!["#3366cc".into(), "#dc3912".into()],
        }
    }

    fn request<'a>(
        options: &'a ChordConfig,
        diagram: &'a ChordDiagram,
        surface: Surface,
    ) -> RenderRequest<'a> {
        RenderRequest {
            options,
            headings: &[],
            diagram,
            surface,
            clear: true,
        }
    }

    #[test]
    fn fmt_trims_trailing_zeros() {
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(0.1 + 0.2), "0.3");
        assert_eq!(fmt(-0.0004), "0");
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(12.3456), "12.346");
    }

    #[test]
    fn renders_groups_labels_and_ribbons() {
        let options = options();
        let diagram = diagram();
        let svg = render_chord_svg(&request(&options, &diagram, Surface::Preview)).unwrap();

        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="200" height="200""#));
        assert!(svg.contains(r#"<g transform="translate(100,100)">"#));
        assert_eq!(svg.matches(r#"<path id="chordsnip-preview-group"#).count(), 2);
        assert!(svg.contains(r##"xlink:href="#chordsnip-preview-group1""##));
        assert!(svg.contains(">B &amp; C</textPath>"));
        assert!(svg.contains("<title>A &gt; B &amp; C (10)</title>"));
        assert!(svg.contains("font-weight: bold"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn export_frame_adds_margin_and_background() {
        let mut options = options();
        options.set_f64("frame.margin", 30.0);
        options.set_value("frame.fill", json!("#FFFFFF"));
        let diagram = diagram();
        let svg = render_chord_svg(&request(&options, &diagram, Surface::Export)).unwrap();
        assert!(svg.contains(r#"width="260" height="260""#));
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#FFFFFF"/>"##));
        assert!(svg.contains(r#"<g transform="translate(130,130)">"#));
    }

    #[test]
    fn empty_diagram_renders_an_empty_chart() {
        let options = options();
        let diagram = ChordDiagram::default();
        let svg = render_chord_svg(&request(&options, &diagram, Surface::Preview)).unwrap();
        assert!(svg.contains(r#"<g class="groups"></g><g class="ribbons"></g>"#));
    }

    #[test]
    fn zero_width_is_a_render_error() {
        let mut options = options();
        options.set_f64("width", 0.0);
        let diagram = diagram();
        let err = render_chord_svg(&request(&options, &diagram, Surface::Export)).unwrap_err();
        assert!(matches!(
            err,
            Error::Renderer {
                surface: Surface::Export,
                ..
            }
        ));
    }

    #[test]
    fn missing_options_are_invalid() {
        let options = ChordConfig::from_value(json!({ "width": 100 }));
        let diagram = diagram();
        let err = render_chord_svg(&request(&options, &diagram, Surface::Preview)).unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));
    }

    #[test]
    fn renderer_keeps_one_markup_per_surface() {
        let options = options();
        let diagram = diagram();
        let mut renderer = SvgChordRenderer::new();
        assert_eq!(renderer.markup(Surface::Export), None);
        renderer
            .render(&request(&options, &diagram, Surface::Export))
            .unwrap();
        renderer
            .render(&request(&options, &diagram, Surface::Export))
            .unwrap();
        let markup = renderer.markup(Surface::Export).unwrap();
        assert_eq!(markup.matches("<svg ").count(), 1);
        assert_eq!(renderer.markup(Surface::Preview), None);
    }
}
