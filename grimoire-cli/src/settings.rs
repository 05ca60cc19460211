//! Settings resolution: CLI flag, environment, `settings.toml`, defaults.
//!
//! ```toml
//! [database]
//! path = "/srv/grimoire/grimoire.db"
//!
//! [import]
//! infer_images = true
//! ```

use std::path::{Path, PathBuf};

use crate::CliError;

/// Environment variable holding the database path.
pub(crate) const DB_ENV_VAR: &str = "GRIMOIRE_DB";

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingSource {
    /// A command-line flag.
    Flag,
    /// An environment variable.
    EnvVar(&'static str),
    /// The settings file.
    ConfigFile,
    /// Built-in default.
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Values read from `settings.toml`. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileSettings {
    pub db_path: Option<PathBuf>,
    pub infer_images: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub db_path: PathBuf,
    pub db_source: SettingSource,
    pub infer_images: bool,
    pub infer_images_source: SettingSource,
}

/// Path to `settings.toml` (e.g. `~/.config/grimoire/settings.toml` on Linux).
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("grimoire").join("settings.toml"))
}

/// Default database location when nothing else is configured.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("grimoire").join("grimoire.db"))
        .unwrap_or_else(|| PathBuf::from("grimoire.db"))
}

/// Parse settings text. Keys of the wrong type are an error; unknown keys are ignored.
pub(crate) fn parse_settings(content: &str) -> Result<FileSettings, CliError> {
    let value: toml::Value = content
        .parse()
        .map_err(|e: toml::de::Error| CliError::config(e.message().to_string()))?;

    let db_path = match value.get("database").and_then(|d| d.get("path")) {
        None => None,
        Some(toml::Value::String(s)) if s.trim().is_empty() => None,
        Some(toml::Value::String(s)) => Some(PathBuf::from(s)),
        Some(other) => {
            return Err(CliError::config(format!(
                "database.path must be a string, found {}",
                other.type_str()
            )));
        }
    };

    let infer_images = match value.get("import").and_then(|i| i.get("infer_images")) {
        None => None,
        Some(toml::Value::Boolean(b)) => Some(*b),
        Some(other) => {
            return Err(CliError::config(format!(
                "import.infer_images must be a boolean, found {}",
                other.type_str()
            )));
        }
    };

    Ok(FileSettings {
        db_path,
        infer_images,
    })
}

/// Read a settings file. A missing file yields empty settings.
pub(crate) fn load_settings_file(path: &Path) -> Result<FileSettings, CliError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_settings(&content)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileSettings::default()),
        Err(e) => Err(CliError::config(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Combine every source, highest priority first.
pub(crate) fn resolve_with(
    db_flag: Option<PathBuf>,
    db_env: Option<String>,
    infer_images_flag: bool,
    file: &FileSettings,
) -> Settings {
    let (db_path, db_source) = if let Some(path) = db_flag {
        (path, SettingSource::Flag)
    } else if let Some(path) = db_env.filter(|v| !v.trim().is_empty()) {
        (PathBuf::from(path), SettingSource::EnvVar(DB_ENV_VAR))
    } else if let Some(path) = &file.db_path {
        (path.clone(), SettingSource::ConfigFile)
    } else {
        (default_db_path(), SettingSource::Default)
    };

    let (infer_images, infer_images_source) = if infer_images_flag {
        (true, SettingSource::Flag)
    } else if let Some(value) = file.infer_images {
        (value, SettingSource::ConfigFile)
    } else {
        (false, SettingSource::Default)
    };

    Settings {
        db_path,
        db_source,
        infer_images,
        infer_images_source,
    }
}

/// Resolve settings from the real environment and settings file.
pub(crate) fn resolve(db_flag: Option<PathBuf>, infer_images_flag: bool) -> Result<Settings, CliError> {
    let file = match settings_path() {
        Some(path) => load_settings_file(&path)?,
        None => FileSettings::default(),
    };
    Ok(resolve_with(
        db_flag,
        std::env::var(DB_ENV_VAR).ok(),
        infer_images_flag,
        &file,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sections() {
        let file = parse_settings(
            "[database]\npath = \"/tmp/g.db\"\n\n[import]\ninfer_images = true\n",
        )
        .unwrap();
        assert_eq!(file.db_path, Some(PathBuf::from("/tmp/g.db")));
        assert_eq!(file.infer_images, Some(true));
    }

    #[test]
    fn empty_and_unknown_keys() {
        assert_eq!(parse_settings("").unwrap(), FileSettings::default());
        let file = parse_settings("[other]\nx = 1\n[database]\npath = \"  \"\n").unwrap();
        assert_eq!(file, FileSettings::default());
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(parse_settings("[database]\npath = 3\n").is_err());
        assert!(parse_settings("[import]\ninfer_images = \"yes\"\n").is_err());
        assert!(parse_settings("not toml =").is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_settings_file(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(file, FileSettings::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[import]\ninfer_images = false\n").unwrap();
        let file = load_settings_file(&path).unwrap();
        assert_eq!(file.infer_images, Some(false));
        assert_eq!(file.db_path, None);
    }

    #[test]
    fn priority_order() {
        let file = FileSettings {
            db_path: Some(PathBuf::from("file.db")),
            infer_images: Some(true),
        };

        let s = resolve_with(
            Some(PathBuf::from("flag.db")),
            Some("env.db".into()),
            false,
            &file,
        );
        assert_eq!(s.db_path, PathBuf::from("flag.db"));
        assert_eq!(s.db_source, SettingSource::Flag);
        assert!(s.infer_images);
        assert_eq!(s.infer_images_source, SettingSource::ConfigFile);

        let s = resolve_with(None, Some("env.db".into()), false, &file);
        assert_eq!(s.db_path, PathBuf::from("env.db"));
        assert_eq!(s.db_source, SettingSource::EnvVar(DB_ENV_VAR));

        let s = resolve_with(None, Some(String::new()), true, &file);
        assert_eq!(s.db_path, PathBuf::from("file.db"));
        assert_eq!(s.db_source, SettingSource::ConfigFile);
        assert_eq!(s.infer_images_source, SettingSource::Flag);

        let s = resolve_with(None, None, false, &FileSettings::default());
        assert_eq!(s.db_path, default_db_path());
        assert_eq!(s.db_source, SettingSource::Default);
        assert!(!s.infer_images);
    }
}
