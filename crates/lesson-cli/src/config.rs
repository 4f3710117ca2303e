use std::fs;
use std::path::{Path, PathBuf};

use lesson_api::TutorOptions;
use lesson_core::{ProgressPolicy, ProgressionPolicy, TutorError};
use serde::{Deserialize, Serialize};

use crate::{map_config_invalid, map_config_read};

pub(crate) const CONFIG_ENV: &str = "LESSON_CONFIG";
pub(crate) const DEFAULT_PROFILE_PATH: &str = ".lesson/profile.json";
pub(crate) const DEFAULT_SESSION_PATH: &str = ".lesson/session.json";
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TutorConfig {
    pub(crate) progress: ProgressPolicy,
    pub(crate) progression: ProgressionPolicy,
    pub(crate) storage: StorageConfig,
    pub(crate) log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StorageConfig {
    pub(crate) profile_path: String,
    pub(crate) session_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile_path: DEFAULT_PROFILE_PATH.to_string(),
            session_path: DEFAULT_SESSION_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub(crate) filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TutorConfig {
    /// `--config` wins over `$LESSON_CONFIG`; with neither, defaults apply.
    /// A named file that does not exist is an error.
    pub(crate) fn load(explicit: Option<&str>) -> Result<Self, TutorError> {
        let path = explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn load_file(path: &Path) -> Result<Self, TutorError> {
        if !path.exists() {
            return Err(TutorError::new(
                "CONFIG_NOT_FOUND",
                format!("Config file does not exist: {}", path.display()),
            ));
        }
        let raw = fs::read_to_string(path).map_err(map_config_read)?;
        Self::parse(&raw)
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, TutorError> {
        toml::from_str(raw).map_err(map_config_invalid)
    }

    pub(crate) fn tutor_options(&self) -> TutorOptions {
        TutorOptions {
            progress: self.progress,
            progression: self.progression,
        }
    }

    pub(crate) fn profile_path(&self, explicit: Option<&str>) -> PathBuf {
        PathBuf::from(explicit.unwrap_or(self.storage.profile_path.as_str()))
    }

    pub(crate) fn session_path(&self, explicit: Option<&str>) -> PathBuf {
        PathBuf::from(explicit.unwrap_or(self.storage.session_path.as_str()))
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::tests::{temp_path, write_file};

    #[test]
    fn empty_config_matches_built_in_policy() {
        let config = TutorConfig::parse("").expect("empty config should parse");
        assert_eq!(config, TutorConfig::default());
        assert_eq!(config.progress.points_per_completion, 20);
        assert_eq!(config.progression.anonymous_unlocked, 2);
        assert_eq!(config.storage.profile_path, ".lesson/profile.json");
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn sections_override_only_what_they_name() {
        let config = TutorConfig::parse(
            r#"
[progress]
points_per_completion = 50

[storage]
session_path = "/tmp/lesson-session.json"
"#,
        )
        .expect("config should parse");
        assert_eq!(config.progress.points_per_completion, 50);
        assert_eq!(config.progression.anonymous_unlocked, 2);
        assert_eq!(config.storage.profile_path, DEFAULT_PROFILE_PATH);
        assert_eq!(
            config.session_path(None),
            PathBuf::from("/tmp/lesson-session.json")
        );
        assert_eq!(
            config.session_path(Some("other.json")),
            PathBuf::from("other.json")
        );
        assert_eq!(config.tutor_options().progress.points_per_completion, 50);
    }

    #[test]
    fn unknown_section_and_bad_types_are_rejected() {
        let error = TutorConfig::parse("[telemetry]\nenabled = true\n")
            .expect_err("unknown section should fail");
        assert_eq!(error.code, "CONFIG_INVALID");

        let error = TutorConfig::parse("[progression]\nanonymous_unlocked = \"two\"\n")
            .expect_err("string count should fail");
        assert_eq!(error.code, "CONFIG_INVALID");
    }

    #[test]
    fn explicit_file_is_loaded_and_missing_file_is_reported() {
        let path = temp_path("config.toml");
        write_file(&path, "[log]\nfilter = \"debug\"\n");
        let config = TutorConfig::load(Some(path.to_string_lossy().as_ref()))
            .expect("config file should load");
        assert_eq!(config.log.filter, "debug");

        let missing = temp_path("missing-config.toml");
        let error = TutorConfig::load(Some(missing.to_string_lossy().as_ref()))
            .expect_err("missing config should fail");
        assert_eq!(error.code, "CONFIG_NOT_FOUND");
    }
}
