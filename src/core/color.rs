use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 3 or 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// Opaque sRGB color as picked in the candle editor (`#rrggbb` or `#rgb`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(input.to_string()))?;
        // from_str_radix alone would accept a leading '+'
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(input.to_string()));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::BadDigit(input.to_string()))
        };
        match digits.len() {
            3 => {
                // #abc expands to #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(ColorError::BadLength(input.to_string())),
        }
    }

    /// Resolve an optional scent color, falling back to opaque black.
    pub fn from_optional(input: Option<&str>) -> Self {
        match input {
            None => Self::BLACK,
            Some(s) if s.trim().is_empty() => Self::BLACK,
            Some(s) => Self::parse_hex(s).unwrap_or_else(|e| {
                log::warn!("[color] {e}; using black");
                Self::BLACK
            }),
        }
    }

    /// CSS `rgba()` string with the given alpha clamped to [0, 1].
    pub fn css_rgba(&self, alpha: f32) -> String {
        let a = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, a)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
