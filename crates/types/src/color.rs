use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Parses `#RGB`, `#RRGGBB` or one of a handful of CSS color names.
    pub fn parse(s: &str) -> Result<Color, String> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "gray" | "grey" => Ok(Color::gray(128)),
            "lightgray" | "lightgrey" => Ok(Color::gray(211)),
            "darkgray" | "darkgrey" => Ok(Color::gray(169)),
            "red" => Ok(Color { r: 255, g: 0, b: 0 }),
            "green" => Ok(Color { r: 0, g: 128, b: 0 }),
            "blue" => Ok(Color { r: 0, g: 0, b: 255 }),
            "navy" => Ok(Color { r: 0, g: 0, b: 128 }),
            other => Err(format!("Unknown color: {}", other)),
        }
    }

    fn parse_hex(hex: &str) -> Result<Color, String> {
        let component = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };
        match hex.len() {
            3 => Ok(Color {
                r: component(&hex[0..1].repeat(2), "red")?,
                g: component(&hex[1..2].repeat(2), "green")?,
                b: component(&hex[2..3].repeat(2), "blue")?,
            }),
            6 => Ok(Color {
                r: component(&hex[0..2], "red")?,
                g: component(&hex[2..4], "green")?,
                b: component(&hex[4..6], "blue")?,
            }),
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }

    /// Components scaled to the `0.0..=1.0` range used by PDF color operators.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(de::Error::custom)
    }
}
