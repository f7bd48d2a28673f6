//! Configuration file support
//!
//! Loads parser settings from ~/.mccolors.toml (or
//! %USERPROFILE%\.mccolors.toml on Windows), or from an explicit path.
//!
//! Every key is optional. Example:
//! ```toml
//! highlight_in_backticks = true
//! stop_at_template_expressions = false
//!
//! [legacy]
//! enabled = true
//! colors = true
//! formatting = true
//!
//! [legacy_hex]
//! enabled = true
//!
//! [mini_message]
//! enabled = true
//! colors = true
//! formatting = true
//! gradients = true
//!
//! [custom_variables]
//! primary = "#ff8800"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Settings consumed by the scanner and resolver
///
/// Read-only for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSettings {
    /// Recognize `&` codes at all
    pub legacy_enabled: bool,
    /// Recognize `&0`-`&f`
    pub legacy_colors: bool,
    /// Recognize `&k`-`&o` and `&r`
    pub legacy_formatting: bool,
    /// Recognize `&#RRGGBB`
    pub legacy_hex_enabled: bool,
    /// Recognize `<tags>` at all
    pub mini_message_enabled: bool,
    /// Recognize `<#RRGGBB>`, named colors and generic closes
    pub mini_message_colors: bool,
    /// Recognize format keywords and their closes
    pub mini_message_formatting: bool,
    /// Recognize `<gradient:...>` and `</gradient>`
    pub mini_message_gradients: bool,
    /// Extra `<name>` tags mapped to a color or format
    pub custom_variables: HashMap<String, String>,
    /// Highlight codes that sit between backticks
    pub highlight_in_backticks: bool,
    /// End a legacy code's range at `${`
    pub stop_at_template_expressions: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            legacy_enabled: true,
            legacy_colors: true,
            legacy_formatting: true,
            legacy_hex_enabled: true,
            mini_message_enabled: true,
            mini_message_colors: true,
            mini_message_formatting: true,
            mini_message_gradients: true,
            custom_variables: HashMap::new(),
            highlight_in_backticks: true,
            stop_at_template_expressions: false,
        }
    }
}

/// On-disk layout of the settings file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    highlight_in_backticks: Option<bool>,
    stop_at_template_expressions: Option<bool>,
    legacy: LegacySection,
    legacy_hex: LegacyHexSection,
    mini_message: MiniMessageSection,
    custom_variables: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LegacySection {
    enabled: Option<bool>,
    colors: Option<bool>,
    formatting: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LegacyHexSection {
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MiniMessageSection {
    enabled: Option<bool>,
    colors: Option<bool>,
    formatting: Option<bool>,
    gradients: Option<bool>,
}

impl ParserSettings {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".mccolors.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".mccolors.toml"))
        }
    }

    /// Load settings from the default location
    ///
    /// A missing file yields the defaults; a file that exists but does
    /// not parse is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse settings from TOML text, starting from the defaults
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut settings = Self::default();
        settings.apply(file);
        Ok(settings)
    }

    /// Apply settings from a parsed config file
    fn apply(&mut self, file: ConfigFile) {
        let set = |target: &mut bool, value: Option<bool>| {
            if let Some(value) = value {
                *target = value;
            }
        };

        set(&mut self.highlight_in_backticks, file.highlight_in_backticks);
        set(&mut self.stop_at_template_expressions, file.stop_at_template_expressions);

        set(&mut self.legacy_enabled, file.legacy.enabled);
        set(&mut self.legacy_colors, file.legacy.colors);
        set(&mut self.legacy_formatting, file.legacy.formatting);
        set(&mut self.legacy_hex_enabled, file.legacy_hex.enabled);

        set(&mut self.mini_message_enabled, file.mini_message.enabled);
        set(&mut self.mini_message_colors, file.mini_message.colors);
        set(&mut self.mini_message_formatting, file.mini_message.formatting);
        set(&mut self.mini_message_gradients, file.mini_message.gradients);

        self.custom_variables.extend(file.custom_variables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(ParserSettings::parse("").unwrap(), ParserSettings::default());
    }

    #[test]
    fn test_parse_config() {
        let contents = r##"
highlight_in_backticks = false
stop_at_template_expressions = true

[legacy]
formatting = false

[legacy_hex]
enabled = false

[mini_message]
gradients = false

[custom_variables]
primary = "#ff8800"
        "##;

        let settings = ParserSettings::parse(contents).unwrap();
        assert!(!settings.highlight_in_backticks);
        assert!(settings.stop_at_template_expressions);
        assert!(settings.legacy_enabled);
        assert!(settings.legacy_colors);
        assert!(!settings.legacy_formatting);
        assert!(!settings.legacy_hex_enabled);
        assert!(settings.mini_message_enabled);
        assert!(!settings.mini_message_gradients);
        assert_eq!(
            settings.custom_variables.get("primary"),
            Some(&"#ff8800".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(
            ParserSettings::parse("legacy = [1, 2"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ParserSettings::parse("[legacy]\ncolour = true"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[mini_message]\nenabled = false").unwrap();

        let settings = ParserSettings::load_from(file.path()).unwrap();
        assert!(!settings.mini_message_enabled);
        assert!(settings.legacy_enabled);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParserSettings::load_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
