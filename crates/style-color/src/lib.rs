//! CSS color-string parsing and interpolation primitives.
//!
//! Parses the color formats emitted by style documents (hex `#rgb`,
//! `#rgba`, `#rrggbb`, `#rrggbbaa`, functional `rgb()`, `rgba()`,
//! `hsl()`, `hsla()`, and the CSS basic named colors) into a normalized
//! RGBA quadruple, and provides the linear interpolation routines used by
//! interpolated property curves.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid color string: {0:?}")]
pub struct ParseColorError(pub String);

/// A color as normalized RGBA components, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f64; 4]);

impl Color {
    pub const TRANSPARENT: Color = Color([0.0, 0.0, 0.0, 0.0]);

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color([r, g, b, a])
    }

    /// Componentwise linear interpolation in RGBA space.
    pub fn lerp(&self, to: &Color, t: f64) -> Color {
        Color([
            lerp(self.0[0], to.0[0], t),
            lerp(self.0[1], to.0[1], t),
            lerp(self.0[2], to.0[2], t),
            lerp(self.0[3], to.0[3], t),
        ])
    }
}

/// Linear interpolation between two numbers at factor `t` in `[0, 1]`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap())
}

fn func_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(rgba?|hsla?)\s*\(([^)]*)\)$").unwrap())
}

/// The CSS basic color keywords, plus `transparent` and `orange`.
fn named(name: &str) -> Option<Color> {
    let rgb = |r: u8, g: u8, b: u8| {
        Some(Color([r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, 1.0]))
    };
    match name {
        "transparent" => Some(Color::TRANSPARENT),
        "black" => rgb(0, 0, 0),
        "silver" => rgb(192, 192, 192),
        "gray" | "grey" => rgb(128, 128, 128),
        "white" => rgb(255, 255, 255),
        "maroon" => rgb(128, 0, 0),
        "red" => rgb(255, 0, 0),
        "purple" => rgb(128, 0, 128),
        "fuchsia" | "magenta" => rgb(255, 0, 255),
        "green" => rgb(0, 128, 0),
        "lime" => rgb(0, 255, 0),
        "olive" => rgb(128, 128, 0),
        "yellow" => rgb(255, 255, 0),
        "navy" => rgb(0, 0, 128),
        "blue" => rgb(0, 0, 255),
        "teal" => rgb(0, 128, 128),
        "aqua" | "cyan" => rgb(0, 255, 255),
        "orange" => rgb(255, 165, 0),
        _ => None,
    }
}

/// Parses a CSS color string into a normalized RGBA color.
pub fn parse(input: &str) -> Result<Color, ParseColorError> {
    let s = input.trim().to_ascii_lowercase();
    if let Some(c) = named(&s) {
        return Ok(c);
    }
    if let Some(caps) = hex_regex().captures(&s) {
        return parse_hex(&caps[1]).ok_or_else(|| ParseColorError(input.to_string()));
    }
    if let Some(caps) = func_regex().captures(&s) {
        let name = caps[1].to_string();
        let args = caps[2].to_string();
        return parse_functional(&name, &args).ok_or_else(|| ParseColorError(input.to_string()));
    }
    Err(ParseColorError(input.to_string()))
}

fn parse_hex(digits: &str) -> Option<Color> {
    let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as f64);
    let b = digits.as_bytes();
    let (r, g, bl, a) = match b.len() {
        // Short forms repeat each nibble: "f80" == "ff8800".
        3 | 4 => {
            let r = nibble(b[0])? * 17.0;
            let g = nibble(b[1])? * 17.0;
            let bl = nibble(b[2])? * 17.0;
            let a = if b.len() == 4 { nibble(b[3])? * 17.0 } else { 255.0 };
            (r, g, bl, a)
        }
        6 | 8 => {
            let byte = |hi: u8, lo: u8| Some(nibble(hi)? * 16.0 + nibble(lo)?);
            let r = byte(b[0], b[1])?;
            let g = byte(b[2], b[3])?;
            let bl = byte(b[4], b[5])?;
            let a = if b.len() == 8 { byte(b[6], b[7])? } else { 255.0 };
            (r, g, bl, a)
        }
        _ => return None,
    };
    Some(Color([r / 255.0, g / 255.0, bl / 255.0, a / 255.0]))
}

fn parse_functional(name: &str, args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let with_alpha = name.ends_with('a');
    if parts.len() != if with_alpha { 4 } else { 3 } {
        return None;
    }
    let alpha = if with_alpha {
        parts[3].parse::<f64>().ok()?.clamp(0.0, 1.0)
    } else {
        1.0
    };
    if name.starts_with("rgb") {
        let channel = |p: &str| -> Option<f64> {
            if let Some(pct) = p.strip_suffix('%') {
                Some((pct.trim().parse::<f64>().ok()? / 100.0).clamp(0.0, 1.0))
            } else {
                Some((p.parse::<f64>().ok()? / 255.0).clamp(0.0, 1.0))
            }
        };
        Some(Color([channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha]))
    } else {
        let h = parts[0].parse::<f64>().ok()?.rem_euclid(360.0);
        let s = (parts[1].strip_suffix('%')?.trim().parse::<f64>().ok()? / 100.0).clamp(0.0, 1.0);
        let l = (parts[2].strip_suffix('%')?.trim().parse::<f64>().ok()? / 100.0).clamp(0.0, 1.0);
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Some(Color([r, g, b, alpha]))
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |mut t: f64| -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    let hk = h / 360.0;
    (hue(hk + 1.0 / 3.0), hue(hk), hue(hk - 1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colors() {
        assert_eq!(parse("red").unwrap(), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse("  BLUE ").unwrap(), Color([0.0, 0.0, 1.0, 1.0]));
        assert_eq!(parse("transparent").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn parses_hex() {
        assert_eq!(parse("#ff0000").unwrap(), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse("#f00").unwrap(), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse("#00000000").unwrap(), Color([0.0, 0.0, 0.0, 0.0]));
        let c = parse("#80ff00ff").unwrap();
        assert!((c.0[0] - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(c.0[3], 1.0);
    }

    #[test]
    fn parses_functional() {
        assert_eq!(parse("rgb(255, 0, 0)").unwrap(), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse("rgba(0,0,255,0.5)").unwrap(), Color([0.0, 0.0, 1.0, 0.5]));
        assert_eq!(parse("rgb(100%, 0%, 0%)").unwrap(), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse("hsl(0, 100%, 50%)").unwrap(), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse("hsl(120, 100%, 50%)").unwrap(), Color([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(parse("hsla(240, 100%, 50%, 0.25)").unwrap(), Color([0.0, 0.0, 1.0, 0.25]));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("").is_err());
        assert!(parse("#12345").is_err());
        assert!(parse("rgb(1,2)").is_err());
        assert!(parse("notacolor").is_err());
        assert!(parse("hsl(0, 1, 0.5)").is_err());
    }

    #[test]
    fn lerps_numbers_and_colors() {
        assert_eq!(lerp(0.0, 100.0, 0.25), 25.0);
        assert_eq!(lerp(10.0, -10.0, 0.5), 0.0);
        let a = Color([0.0, 0.0, 0.0, 0.0]);
        let b = Color([1.0, 0.5, 0.0, 1.0]);
        assert_eq!(a.lerp(&b, 0.5), Color([0.5, 0.25, 0.0, 0.5]));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
