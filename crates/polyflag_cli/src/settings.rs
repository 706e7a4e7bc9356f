use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

const SETTINGS_FILE_NAME: &str = "polyflag";
const SETTINGS_FILE_EXTENSION: &str = "yaml";
const SETTINGS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_SETTINGS_STR: &str = include_str!("default.yaml");

/// Format for printing a constructed polytope.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    /// Element counts per rank.
    #[default]
    Summary,
    /// Full polytope as JSON.
    Json,
}

/// User settings, layered from the built-in defaults and an optional user
/// settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub domain_cap: usize,
    pub check_incidences: bool,
    pub output: OutputFormat,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            domain_cap: polyflag::DEFAULT_DOMAIN_CAP,
            check_incidences: true,
            output: OutputFormat::Summary,
        }
    }
}

impl Settings {
    /// Loads settings from `path` if given, or else from the settings file in
    /// the user's config directory if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = default_config();

        match path {
            Some(path) => {
                log::debug!("loading settings from {}", path.display());
                config = config.add_source(config::File::from(path.to_owned()).required(true));
            }
            None => match user_settings_path() {
                Some(path) => {
                    log::debug!("loading settings from {}", path.display());
                    config = config.add_source(config::File::from(path).required(false));
                }
                None => log::warn!("no config directory; using default settings"),
            },
        }

        config
            .build()
            .and_then(|c| c.try_deserialize())
            .context("error loading settings")
    }
}

/// Returns a config builder containing the built-in defaults.
fn default_config() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder().add_source(config::File::from_str(
        DEFAULT_SETTINGS_STR,
        SETTINGS_FILE_FORMAT,
    ))
}

fn user_settings_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "polyflag")?;
    Some(
        project_dirs
            .config_dir()
            .join(format!("{SETTINGS_FILE_NAME}.{SETTINGS_FILE_EXTENSION}")),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_settings_file() {
        let parsed: Settings = serde_norway::from_str(DEFAULT_SETTINGS_STR).unwrap();
        assert_eq!(parsed, Settings::default());

        let built: Settings = default_config().build().unwrap().try_deserialize().unwrap();
        assert_eq!(built, Settings::default());
    }

    #[test]
    fn test_user_settings_override_defaults() {
        let user = "domain_cap: 20\noutput: json\n";
        let settings: Settings = default_config()
            .add_source(config::File::from_str(user, SETTINGS_FILE_FORMAT))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(
            settings,
            Settings {
                domain_cap: 20,
                check_incidences: true,
                output: OutputFormat::Json,
            },
        );
    }

    #[test]
    fn test_bad_settings() {
        let user = "domain_cap: lots\n";
        let result = default_config()
            .add_source(config::File::from_str(user, SETTINGS_FILE_FORMAT))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = Path::new("this/settings/file/does/not/exist.yaml");
        assert!(Settings::load(Some(path)).is_err());
    }
}
