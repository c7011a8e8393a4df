use serde::{Deserialize, Serialize};

/// Straight-alpha 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `k` (clamped to `0..=1`).
    pub fn with_alpha_mul(self, k: f64) -> Self {
        let a = (f64::from(self.a) * k.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Same color with alpha replaced by `alpha` in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    /// Alpha as a `0..=1` float.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbbaa` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Parse a CSS-style color, falling back to white with a warning.
    pub fn parse_or_white(s: &str) -> Self {
        match parse_css_color(s) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(color = s, error = %e, "unparseable color, using white");
                Self::WHITE
            }
        }
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css_color(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`, `hsla()`
/// and the names `white`, `black`, `transparent`.
pub fn parse_css_color(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "white" => return Ok(Rgba8::WHITE),
        "black" => return Ok(Rgba8::BLACK),
        "transparent" => return Ok(Rgba8::TRANSPARENT),
        _ => {}
    }

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some((name, args)) = split_function(&lower) {
        let args = split_args(args);
        return match name {
            "rgb" | "rgba" => parse_rgb_args(&args),
            "hsl" | "hsla" => parse_hsl_args(&args),
            _ => Err(format!("unknown color function \"{name}\"")),
        };
    }
    Err(format!("unrecognized color \"{s}\""))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }
    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        3 => Ok(Rgba8::rgb(
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
        )),
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

fn split_args(s: &str) -> Vec<&str> {
    s.split([',', ' ', '/'])
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("invalid number \"{s}\""))
        .and_then(|v| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(format!("non-finite number \"{s}\""))
            }
        })
}

/// Percent arguments map to `0..=1`; bare numbers are divided by `scale`.
fn parse_unit(s: &str, scale: f64) -> Result<f64, String> {
    match s.strip_suffix('%') {
        Some(p) => Ok(parse_number(p)? / 100.0),
        None => Ok(parse_number(s)? / scale),
    }
}

fn parse_alpha(args: &[&str]) -> Result<f64, String> {
    match args.get(3) {
        Some(a) => parse_unit(a, 1.0),
        None => Ok(1.0),
    }
}

fn parse_rgb_args(args: &[&str]) -> Result<Rgba8, String> {
    if !(3..=4).contains(&args.len()) {
        return Err("rgb() takes 3 or 4 arguments".to_owned());
    }
    let r = parse_unit(args[0], 255.0)?;
    let g = parse_unit(args[1], 255.0)?;
    let b = parse_unit(args[2], 255.0)?;
    let a = parse_alpha(args)?;
    Ok(Rgba8::rgba(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(a),
    ))
}

fn parse_hsl_args(args: &[&str]) -> Result<Rgba8, String> {
    if !(3..=4).contains(&args.len()) {
        return Err("hsl() takes 3 or 4 arguments".to_owned());
    }
    let h = parse_number(args[0].trim_end_matches("deg"))?;
    let s = parse_unit(args[1], 100.0)?;
    let l = parse_unit(args[2], 100.0)?;
    let a = parse_alpha(args)?;
    Ok(hsla_to_rgba(h, s, l, a))
}

/// HSL (hue in degrees, saturation/lightness in `0..=1`) to straight RGBA.
pub fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba8 {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = unit_to_u8(l);
        return Rgba8::rgba(v, v, v, unit_to_u8(a));
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba8::rgba(
        unit_to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        unit_to_u8(hue_to_rgb(p, q, h)),
        unit_to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        unit_to_u8(a),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
