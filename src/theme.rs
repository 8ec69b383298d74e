use crate::error::{LeagueError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([0-9A-Fa-f]{6})$").unwrap());

/// 24-bit color, written out as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = LeagueError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || LeagueError::InvalidColor {
            value: value.to_string(),
        };
        let caps = HEX_COLOR_RE.captures(value.trim()).ok_or_else(invalid)?;
        let hex = &caps[1];
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: Rgb,
    pub text_color: Rgb,
    pub outline_color: Rgb,
    pub five_season_color: Rgb,
    /// Fill of each tier band, top flight first. Cycled when the pyramid is deeper.
    pub tier_colors: Vec<Rgb>,
}

impl Theme {
    pub fn greyscale() -> Self {
        Self {
            font_family: "Arial".to_string(),
            background: Rgb::WHITE,
            text_color: Rgb::BLACK,
            outline_color: Rgb::new(0xB3, 0xB3, 0xB3),
            five_season_color: Rgb::WHITE,
            tier_colors: vec![
                Rgb::new(0xC4, 0xC4, 0xC4),
                Rgb::new(0xB3, 0xB3, 0xB3),
                Rgb::new(0x99, 0x99, 0x99),
                Rgb::new(0x66, 0x66, 0x66),
            ],
        }
    }

    pub fn tier_color(&self, tier: usize) -> Rgb {
        if self.tier_colors.is_empty() {
            return self.outline_color;
        }
        self.tier_colors[tier % self.tier_colors.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::greyscale()
    }
}
