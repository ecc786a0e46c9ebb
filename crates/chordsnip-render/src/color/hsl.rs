// Color space helpers for ramp interpolation.
//
// Follows the d3-color / d3-interpolate conventions: achromatic colors carry an undefined (NaN)
// hue, hue interpolation takes the shorter arc, and interpolated colors are emitted as
// `rgb(r, g, b)` with channels rounded and clamped.

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Hsl {
    /// Degrees; NaN when the color is achromatic.
    pub h: f64,
    /// 0..=1; NaN for pure black and white.
    pub s: f64,
    pub l: f64,
}

pub(crate) fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut channels = inner.split(',').map(|c| c.trim().parse::<f64>().ok());
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(Rgb { r, g, b })
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb {
        r: r as f64,
        g: g as f64,
        b: b as f64,
    })
}

pub(crate) fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r / 255.0;
    let g = rgb.g / 255.0;
    let b = rgb.b / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d == 0.0 {
        let s = if l > 0.0 && l < 1.0 { 0.0 } else { f64::NAN };
        return Hsl { h: f64::NAN, s, l };
    }

    let s = if l < 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };
    let h = if r == max {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if g == max {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Hsl { h: h * 60.0, s, l }
}

pub(crate) fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h % 360.0 + if hsl.h < 0.0 { 360.0 } else { 0.0 };
    let s = if h.is_nan() || hsl.s.is_nan() {
        0.0
    } else {
        hsl.s
    };
    let l = hsl.l;
    let m2 = l + (if l < 0.5 { l } else { 1.0 - l }) * s;
    let m1 = 2.0 * l - m2;

    fn channel(h: f64, m1: f64, m2: f64) -> f64 {
        let v = if h < 60.0 {
            m1 + (m2 - m1) * h / 60.0
        } else if h < 180.0 {
            m2
        } else if h < 240.0 {
            m1 + (m2 - m1) * (240.0 - h) / 60.0
        } else {
            m1
        };
        v * 255.0
    }

    Rgb {
        r: channel(if h >= 240.0 { h - 240.0 } else { h + 120.0 }, m1, m2),
        g: channel(h, m1, m2),
        b: channel(if h < 120.0 { h + 240.0 } else { h - 120.0 }, m1, m2),
    }
}

fn lerp_defined(a: f64, b: f64, t: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => f64::NAN,
        (true, false) => b,
        (false, true) => a,
        (false, false) => a + (b - a) * t,
    }
}

fn lerp_hue(a: f64, b: f64, t: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return lerp_defined(a, b, t);
    }
    let mut d = b - a;
    if !(-180.0..=180.0).contains(&d) {
        d -= 360.0 * (d / 360.0).round();
    }
    a + d * t
}

pub(crate) fn interpolate_hsl(a: Hsl, b: Hsl, t: f64) -> Hsl {
    Hsl {
        h: lerp_hue(a.h, b.h, t),
        s: lerp_defined(a.s, b.s, t),
        l: lerp_defined(a.l, b.l, t),
    }
}

/// Same hue, lightness scaled by `0.7^k`.
pub(crate) fn darker(hsl: Hsl, k: f64) -> Hsl {
    Hsl {
        l: hsl.l * 0.7_f64.powf(k),
        ..hsl
    }
}

pub(crate) fn fmt_rgb(rgb: Rgb) -> String {
    let channel = |v: f64| {
        if v.is_nan() {
            0
        } else {
            v.round().clamp(0.0, 255.0) as u8
        }
    };
    format!(
        "rgb({}, {}, {})",
        channel(rgb.r),
        channel(rgb.g),
        channel(rgb.b)
    )
}
