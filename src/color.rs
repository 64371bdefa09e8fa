//! Komplete Kontrol MK2 color table.
//!
//! Every hue owns four consecutive codes, one per intensity, starting at a
//! base that is a multiple of four. `OFF` is code zero for all intensities.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::Error;

/// Color family.
#[derive(ValueEnum, Default, PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Hue {
    #[default]
    Off,
    Red,
    Orange,
    LightOrange,
    WarmYellow,
    Yellow,
    LightGreen,
    Green,
    Mint,
    Turquoise,
    Cyan,
    Blue,
    Plum,
    Violet,
    Purple,
    Magenta,
    Fuchsia,
    White,
}

impl Hue {
    /// First code of this hue in the device color table.
    pub fn base(self) -> u8 {
        match self {
            Self::Off => 0x00,
            Self::Red => 0x04,
            Self::Orange => 0x08,
            Self::LightOrange => 0x0c,
            Self::WarmYellow => 0x10,
            Self::Yellow => 0x14,
            Self::LightGreen => 0x18,
            Self::Green => 0x1c,
            Self::Mint => 0x20,
            Self::Turquoise => 0x24,
            Self::Cyan => 0x28,
            Self::Blue => 0x2c,
            Self::Plum => 0x30,
            Self::Violet => 0x34,
            Self::Purple => 0x38,
            Self::Magenta => 0x3c,
            Self::Fuchsia => 0x40,
            Self::White => 0x44,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Red => "RED",
            Self::Orange => "ORANGE",
            Self::LightOrange => "L ORANGE",
            Self::WarmYellow => "W YELLOW",
            Self::Yellow => "YELLOW",
            Self::LightGreen => "L GREEN",
            Self::Green => "GREEN",
            Self::Mint => "MINT",
            Self::Turquoise => "TURQUOISE",
            Self::Cyan => "CYAN",
            Self::Blue => "BLUE",
            Self::Plum => "PLUM",
            Self::Violet => "VIOLET",
            Self::Purple => "PURPLE",
            Self::Magenta => "MAGENTA",
            Self::Fuchsia => "FUCHSIA",
            Self::White => "WHITE",
        }
    }
}

impl FromStr for Hue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|hue| hue.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidColorSpec(s.into()))
    }
}

impl Display for Hue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Brightness variant within a hue.
#[derive(ValueEnum, Default, PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Intensity {
    #[default]
    Low,
    Medium,
    High,
    Saturated,
}

impl Intensity {
    /// Offset from the hue's base code.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Saturated => 3,
        }
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|intensity| format!("{:?}", intensity).eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidColorSpec(s.into()))
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Color of a key in one of its two states.
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
pub struct Color {
    pub hue: Hue,
    pub intensity: Intensity,
}

impl Color {
    pub fn new(hue: Hue, intensity: Intensity) -> Self {
        Self { hue, intensity }
    }

    /// Device color code.
    pub fn code(self) -> u8 {
        compute_code(self.hue, self.intensity)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (0x{:02X})", self.hue, self.intensity, self.code())
    }
}

/// Convert hue and intensity to the device color code.
///
/// The intensity is ignored for [`Hue::Off`].
pub fn compute_code(hue: Hue, intensity: Intensity) -> u8 {
    match hue {
        Hue::Off => 0,
        hue => hue.base() + intensity.ordinal(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn off_ignores_intensity() {
        for intensity in Intensity::value_variants() {
            assert_eq!(compute_code(Hue::Off, *intensity), 0);
        }
    }

    #[test]
    fn codes_are_base_plus_ordinal() {
        let mut codes = HashSet::new();

        for hue in Hue::value_variants().iter().filter(|hue| **hue != Hue::Off) {
            assert_eq!(hue.base() % 4, 0);

            for intensity in Intensity::value_variants() {
                let code = compute_code(*hue, *intensity);
                assert_eq!(code, hue.base() + intensity.ordinal());
                assert!((0x04..=0x47).contains(&code));
                assert!(codes.insert(code), "duplicate code 0x{:02x}", code);
            }
        }

        assert_eq!(codes.len(), 68);
    }

    #[test]
    fn blue_codes() {
        assert_eq!(Color::new(Hue::Blue, Intensity::Low).code(), 0x2c);
        assert_eq!(Color::new(Hue::Blue, Intensity::High).code(), 0x2e);
        assert_eq!(Color::new(Hue::White, Intensity::Saturated).code(), 0x47);
    }

    #[test]
    fn parse_display_names() {
        assert_eq!("L ORANGE".parse::<Hue>().unwrap(), Hue::LightOrange);
        assert_eq!("w yellow".parse::<Hue>().unwrap(), Hue::WarmYellow);
        assert_eq!("Saturated".parse::<Intensity>().unwrap(), Intensity::Saturated);

        for hue in Hue::value_variants() {
            assert_eq!(hue.to_string().parse::<Hue>().unwrap(), *hue);
        }
    }

    #[test]
    fn reject_unknown_names() {
        assert!(matches!("PINK".parse::<Hue>(), Err(Error::InvalidColorSpec(name)) if name == "PINK"));
        assert!(matches!("".parse::<Hue>(), Err(Error::InvalidColorSpec(_))));
        assert!(matches!("Blinding".parse::<Intensity>(), Err(Error::InvalidColorSpec(_))));
    }

    #[test]
    fn color_display() {
        let color = Color::new(Hue::Blue, Intensity::High);
        assert_eq!(color.to_string(), "BLUE High (0x2E)");
    }
}
