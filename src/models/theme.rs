//! Theme preference model

use std::fmt;

/// Light/dark display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parse a persisted value; only the two literal values are accepted
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Interpret the host colour-scheme signal. Anything but "dark" is light.
    pub fn from_system_hint(hint: Option<&str>) -> Self {
        match hint.map(|h| h.trim().to_lowercase()) {
            Some(h) if h == "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_only_literals() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("Dark"), None);
        assert_eq!(ThemeMode::parse(""), None);
    }

    #[test]
    fn test_system_hint() {
        assert_eq!(ThemeMode::from_system_hint(Some("DARK")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_system_hint(Some("no-preference")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_system_hint(None), ThemeMode::Light);
    }
}
