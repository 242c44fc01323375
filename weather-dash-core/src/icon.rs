//! Provider icon codes and their display glyphs.

use std::fmt;

const DEFAULT_GLYPH: &str = "☀️";

/// Day/night suffix of a provider icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daypart {
    Day,
    Night,
}

/// A parsed icon code such as `"09n"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCode {
    condition: String,
    daypart: Option<Daypart>,
}

impl IconCode {
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        let (condition, daypart) = match code.char_indices().last() {
            Some((idx, 'd')) => (&code[..idx], Some(Daypart::Day)),
            Some((idx, 'n')) => (&code[..idx], Some(Daypart::Night)),
            _ => (code, None),
        };

        Self {
            condition: condition.to_string(),
            daypart,
        }
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn daypart(&self) -> Option<Daypart> {
        self.daypart
    }

    /// Glyph for the condition prefix. The daypart does not change it.
    pub fn glyph(&self) -> &'static str {
        match self.condition.as_str() {
            "01" => "☀️",
            "02" => "⛅",
            "03" | "04" => "☁️",
            "09" | "10" => "🌧️",
            "11" => "⛈️",
            "13" => "❄️",
            "50" => "🌫️",
            _ => DEFAULT_GLYPH,
        }
    }
}

impl fmt::Display for IconCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.condition)?;
        match self.daypart {
            Some(Daypart::Day) => f.write_str("d"),
            Some(Daypart::Night) => f.write_str("n"),
            None => Ok(()),
        }
    }
}

/// Shorthand for `IconCode::parse(code).glyph()`.
pub fn icon_glyph(code: &str) -> &'static str {
    IconCode::parse(code).glyph()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_known_condition() {
        let table = [
            ("01d", "☀️"),
            ("02d", "⛅"),
            ("03d", "☁️"),
            ("04n", "☁️"),
            ("09d", "🌧️"),
            ("10n", "🌧️"),
            ("11d", "⛈️"),
            ("13n", "❄️"),
            ("50d", "🌫️"),
        ];

        for (code, glyph) in table {
            assert_eq!(icon_glyph(code), glyph, "code {code}");
        }
    }

    #[test]
    fn suffix_does_not_change_glyph() {
        assert_eq!(icon_glyph("09n"), "🌧️");
        assert_eq!(icon_glyph("09d"), "🌧️");
    }

    #[test]
    fn unknown_codes_fall_back_to_sun() {
        assert_eq!(icon_glyph("77d"), "☀️");
        assert_eq!(icon_glyph(""), "☀️");
        assert_eq!(icon_glyph("garbage"), "☀️");
    }

    #[test]
    fn parses_daypart() {
        let day = IconCode::parse("01d");
        assert_eq!(day.condition(), "01");
        assert_eq!(day.daypart(), Some(Daypart::Day));

        let night = IconCode::parse("13n");
        assert_eq!(night.daypart(), Some(Daypart::Night));

        let bare = IconCode::parse("50");
        assert_eq!(bare.condition(), "50");
        assert_eq!(bare.daypart(), None);
        assert_eq!(bare.glyph(), "🌫️");
    }

    #[test]
    fn display_restores_code() {
        assert_eq!(IconCode::parse("10n").to_string(), "10n");
    }
}
