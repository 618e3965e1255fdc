use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// An RGB color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// The named `gray` color (`#808080`).
    pub const GRAY: Rgb = Rgb::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(Error::invalid(format!(
                    "color channel {name} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        fn channel(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Accepts `#rgb`, `#rrggbb` and the names `white`, `black`, `gray`/`grey`.
impl std::str::FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        match text.as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            "gray" | "grey" => return Ok(Self::GRAY),
            _ => {}
        }

        let unrecognized = || Error::invalid(format!("unrecognized color {s:?}"));
        let hex = text.strip_prefix('#').ok_or_else(unrecognized)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(unrecognized());
        }
        let channels: Vec<u8> = match hex.len() {
            3 => hex
                .chars()
                .map(|c| u8::from_str_radix(&format!("{c}{c}"), 16))
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| unrecognized())?,
            6 => (0..6)
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| unrecognized())?,
            _ => return Err(unrecognized()),
        };
        let unit = |v: u8| f64::from(v) / 255.0;
        Ok(Self::new(unit(channels[0]), unit(channels[1]), unit(channels[2])))
    }
}

impl From<(f64, f64, f64)> for Rgb {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rounds_channels() {
        assert_eq!(Rgb::new(0.8, 0.93, 1.0).to_hex(), "#ccedff");
        assert_eq!(Rgb::GRAY.to_hex(), "#808080");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!("#ccedff".parse::<Rgb>().unwrap().to_hex(), "#ccedff");
        assert_eq!("#FFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(" Grey ".parse::<Rgb>().unwrap(), Rgb::GRAY);
        for bad in ["chartreuse", "#00000080", "#12345", "#gggggg", "ccedff"] {
            let err = bad.parse::<Rgb>().unwrap_err();
            assert!(err.to_string().contains("unrecognized color"), "{bad}: {err}");
        }
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let err = Rgb::new(1.2, 0.0, 0.0).validate().unwrap_err();
        assert!(err.to_string().contains("channel r"));
        assert!(Rgb::new(f64::NAN, 0.0, 0.0).validate().is_err());
        assert!(Rgb::WHITE.validate().is_ok());
    }
}
