use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Color spaces an ACB book can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "CMYK")]
    Cmyk,
    #[serde(rename = "Lab")]
    Lab,
}

impl ColorSpace {
    /// All supported color spaces, in wire id order.
    pub const ALL: [ColorSpace; 3] = [ColorSpace::Rgb, ColorSpace::Cmyk, ColorSpace::Lab];

    /// Creates a color space from its wire id.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0 => Some(ColorSpace::Rgb),
            2 => Some(ColorSpace::Cmyk),
            7 => Some(ColorSpace::Lab),
            _ => None,
        }
    }

    /// Returns the wire id.
    pub fn id(self) -> u16 {
        match self {
            ColorSpace::Rgb => 0,
            ColorSpace::Cmyk => 2,
            ColorSpace::Lab => 7,
        }
    }

    /// Number of component bytes per color record.
    pub fn component_count(self) -> usize {
        match self {
            ColorSpace::Cmyk => 4,
            ColorSpace::Rgb | ColorSpace::Lab => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Cmyk => "CMYK",
            ColorSpace::Lab => "Lab",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSpace::ALL
            .into_iter()
            .find(|space| space.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownColorSpace(s.to_string()))
    }
}

/// A named color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    /// Producer-specific code, six ASCII characters on the wire.
    pub code: String,
    /// Normalized components; see [`crate::convert`] for the units.
    pub components: Vec<i16>,
}

impl Color {
    pub fn new(name: impl Into<String>, code: impl Into<String>, components: Vec<i16>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            components,
        }
    }
}

/// A complete color book.
///
/// The on-disk color count is not stored: it is always `colors.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBook {
    pub id: u16,
    pub title: String,
    pub color_name_prefix: String,
    pub color_name_suffix: String,
    pub description: String,
    pub page_size: u16,
    pub page_mid_point: u16,
    pub color_space: ColorSpace,
    pub colors: Vec<Color>,
    /// Independent of the color space.
    pub is_spot: bool,
}

impl ColorBook {
    /// Create an empty book in the given color space.
    pub fn new(id: u16, color_space: ColorSpace) -> Self {
        Self {
            id,
            title: String::new(),
            color_name_prefix: String::new(),
            color_name_suffix: String::new(),
            description: String::new(),
            page_size: 0,
            page_mid_point: 0,
            color_space,
            colors: Vec::new(),
            is_spot: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_roundtrip() {
        for space in ColorSpace::ALL {
            assert_eq!(ColorSpace::from_id(space.id()), Some(space));
        }
        assert_eq!(ColorSpace::from_id(1), None);
        assert_eq!(ColorSpace::from_id(8), None);
    }

    #[test]
    fn component_counts() {
        assert_eq!(ColorSpace::Rgb.component_count(), 3);
        assert_eq!(ColorSpace::Cmyk.component_count(), 4);
        assert_eq!(ColorSpace::Lab.component_count(), 3);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("rgb".parse::<ColorSpace>().unwrap(), ColorSpace::Rgb);
        assert_eq!("CMYK".parse::<ColorSpace>().unwrap(), ColorSpace::Cmyk);
        assert_eq!(" lab ".parse::<ColorSpace>().unwrap(), ColorSpace::Lab);
        assert!(matches!(
            "HSB".parse::<ColorSpace>(),
            Err(ValidationError::UnknownColorSpace(name)) if name == "HSB"
        ));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let mut book = ColorBook::new(3, ColorSpace::Lab);
        book.color_name_prefix = "PANTONE ".to_string();
        book.colors.push(Color::new("White", "W00001", vec![100, 0, 0]));

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["colorSpace"], "Lab");
        assert_eq!(json["colorNamePrefix"], "PANTONE ");
        assert_eq!(json["pageMidPoint"], 0);
        assert_eq!(json["isSpot"], false);

        let back: ColorBook = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }
}
