//! Portable SVG markup from the export surface.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

pub const EXPORT_NAME_PREFIX: &str = "chordSnipExport-";

/// The outermost `<svg ...>...</svg>` element in `markup`, if there is one.
pub fn extract_svg_markup(markup: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?s)<svg\b.*</svg>").expect("valid regex"));
    re.find(markup).map(|m| m.as_str())
}

/// Rewrites `url(<document>#id)` references to `url(#id)` so paint servers resolve once the
/// markup is embedded somewhere else.
pub fn rewrite_url_references(svg: &str) -> Cow<'_, str> {
    if !svg.contains("url(") {
        return Cow::Borrowed(svg);
    }

    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"url\((['"]?)[^#)'"]+#"#).expect("valid regex"));
    re.replace_all(svg, "url(${1}#")
}

/// The export payload for whatever the export surface holds. Empty when nothing usable was drawn.
pub fn export_payload(markup: Option<&str>) -> String {
    let Some(svg) = markup.and_then(extract_svg_markup) else {
        return String::new();
    };
    rewrite_url_references(svg).into_owned()
}

/// A file name for an exported chart, stamped with the current time.
pub fn export_name() -> String {
    export_name_at(chrono::Utc::now().timestamp_millis())
}

pub fn export_name_at(unix_millis: i64) -> String {
    format!("{EXPORT_NAME_PREFIX}{unix_millis}")
}
