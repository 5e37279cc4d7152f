use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color '{0}' is not a #rgb or #rrggbb hex value")]
    InvalidFormat(String),
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError::InvalidFormat(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb {
                    r: short(0)?,
                    g: short(1)?,
                    b: short(2)?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Text styling applied to every rendered fragment.
///
/// The host supplies a fresh descriptor for each render; nothing here caches
/// one across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDescriptor {
    pub foreground: Rgb,
    pub font_weight: String,
    pub font_size_pt: u32,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            foreground: Rgb::new(0, 0, 0),
            font_weight: "regular".to_string(),
            font_size_pt: 11,
        }
    }
}
