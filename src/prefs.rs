//! Persisted display preferences.
//!
//! A single light/dark flag stored under a fixed name
//! (`$XDG_CONFIG_HOME/cellar/theme`, default `~/.config/cellar/theme`),
//! read once at startup and rewritten on toggle. The flag lives for the
//! process lifetime; there is no teardown.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    fn parse(text: &str) -> Option<ThemeMode> {
        match text.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Prefs {
    path: PathBuf,
    pub theme: ThemeMode,
}

impl Prefs {
    /// Loads preferences from the default location.
    pub fn load_default() -> Self {
        Self::load_from(config_dir().join("cellar").join("theme"))
    }

    /// Loads preferences from an explicit path. A missing or unreadable
    /// flag falls back to dark.
    pub fn load_from(path: PathBuf) -> Self {
        let theme = fs::read_to_string(&path)
            .ok()
            .and_then(|text| ThemeMode::parse(&text))
            .unwrap_or_default();
        Self { path, theme }
    }

    /// Flips the theme and persists it. Write failures are logged and
    /// otherwise ignored — the in-memory flag still applies.
    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        if let Err(e) = self.write(self.theme) {
            warn!("could not persist theme preference: {}", e);
        }
    }

    fn write(&self, theme: ThemeMode) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, theme.as_str())
    }
}

fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.is_empty()
    {
        return PathBuf::from(home).join(".config");
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flag_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs::load_from(dir.path().join("theme"));
        assert_eq!(prefs.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("theme");

        let mut prefs = Prefs::load_from(path.clone());
        prefs.toggle_theme();
        assert_eq!(prefs.theme, ThemeMode::Light);

        let reloaded = Prefs::load_from(path.clone());
        assert_eq!(reloaded.theme, ThemeMode::Light);

        let mut prefs = reloaded;
        prefs.toggle_theme();
        assert_eq!(Prefs::load_from(path).theme, ThemeMode::Dark);
    }

    #[test]
    fn test_corrupt_flag_falls_back_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "sepia").unwrap();
        assert_eq!(Prefs::load_from(path).theme, ThemeMode::Dark);
    }
}
