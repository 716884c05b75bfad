//! lcli configuration.
//!
//! Loaded from `--config PATH`, else `./.lcli.yaml`, else `~/.lcli.yaml`.
//! Values from `.env` and `LCLI_*` environment variables override the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::live::transport::LINEAR_API_URL;
use crate::error::{Error, Result};
use crate::status::StatusTable;

/// Config file name looked up in the working directory and the home directory.
pub const CONFIG_FILE_NAME: &str = ".lcli.yaml";

/// Environment variable prefix.
const ENV_PREFIX: &str = "LCLI_";

/// lcli configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings.
    #[serde(default)]
    pub linear: LinearConfig,
    /// Workflow status name to state ID.
    #[serde(default)]
    pub statuses: BTreeMap<String, String>,
}

/// Connection settings under the `linear:` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    /// Personal API key, sent verbatim in the `Authorization` header.
    pub api_key: String,
    /// GraphQL endpoint.
    pub api_url: String,
    /// Default team for listing and creating issues.
    pub team_id: String,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self { api_key: String::new(), api_url: LINEAR_API_URL.to_string(), team_id: String::new() }
    }
}

impl Config {
    /// Load config from the file system and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an explicit `path` is missing, or any
    /// config file found cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        let cwd = std::env::current_dir().ok();
        Self::load_from(path, cwd.as_deref(), dirs::home_dir().as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    /// [`Config::load`] with the search directories and environment supplied.
    fn load_from(
        explicit: Option<&Path>,
        cwd: Option<&Path>,
        home: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match explicit {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!("config file {} not found", path.display())));
            }
            Some(path) => Self::read(path)?,
            None => match Self::default_path(cwd, home) {
                Some(path) => Self::read(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(env);
        config.statuses = std::mem::take(&mut config.statuses)
            .into_iter()
            .map(|(name, id)| (name.trim().to_lowercase(), id))
            .collect();
        Ok(config)
    }

    /// The first existing default config file: `./.lcli.yaml`, then `~/.lcli.yaml`.
    fn default_path(cwd: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
        [cwd, home]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|p| p.is_file())
    }

    fn read(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents)
            .map_err(|e| Error::Config(format!("invalid config at {}: {e}", path.display())))
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let linear = &mut self.linear;
        for (key, field) in [
            ("LINEAR_API_KEY", &mut linear.api_key),
            ("LINEAR_API_URL", &mut linear.api_url),
            ("LINEAR_TEAM_ID", &mut linear.team_id),
        ] {
            if let Some(value) = env(&format!("{ENV_PREFIX}{key}")).filter(|v| !v.is_empty()) {
                *field = value;
            }
        }
    }

    /// The API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no key is configured.
    pub fn api_key(&self) -> Result<&str> {
        if self.linear.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "no Linear API key configured\n  \
                 hint: set {ENV_PREFIX}LINEAR_API_KEY or linear.api_key in {CONFIG_FILE_NAME}"
            )));
        }
        Ok(&self.linear.api_key)
    }

    /// The GraphQL endpoint, falling back to Linear's public API.
    #[must_use]
    pub fn api_url(&self) -> &str {
        if self.linear.api_url.is_empty() {
            LINEAR_API_URL
        } else {
            &self.linear.api_url
        }
    }

    /// The default team ID, if one is configured.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        Some(self.linear.team_id.as_str()).filter(|id| !id.is_empty())
    }

    /// The configured status table.
    #[must_use]
    pub fn status_table(&self) -> StatusTable {
        StatusTable::new(&self.statuses)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lcli_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_no_file_exists() {
        let dir = temp_dir("defaults");
        let config =
            Config::load_from(None, Some(dir.as_path()), Some(dir.as_path()), no_env).unwrap();

        assert_eq!(config.api_url(), LINEAR_API_URL);
        assert_eq!(config.team_id(), None);
        assert!(matches!(config.api_key(), Err(Error::Config(_))));
        assert!(config.status_table().is_empty());
    }

    #[test]
    fn working_directory_file_wins_over_home() {
        let cwd = temp_dir("cwd");
        let home = temp_dir("home");
        fs::write(cwd.join(CONFIG_FILE_NAME), "linear:\n  api_key: from-cwd\n").unwrap();
        fs::write(home.join(CONFIG_FILE_NAME), "linear:\n  api_key: from-home\n").unwrap();

        let config =
            Config::load_from(None, Some(cwd.as_path()), Some(home.as_path()), no_env).unwrap();
        assert_eq!(config.api_key().unwrap(), "from-cwd");

        fs::remove_file(cwd.join(CONFIG_FILE_NAME)).unwrap();
        let config =
            Config::load_from(None, Some(cwd.as_path()), Some(home.as_path()), no_env).unwrap();
        assert_eq!(config.api_key().unwrap(), "from-home");
    }

    #[test]
    fn parses_full_file_and_lowercases_statuses() {
        let dir = temp_dir("full");
        let path = dir.join("custom.yaml");
        fs::write(
            &path,
            "linear:\n  api_key: key-1\n  api_url: http://localhost:9/graphql\n  team_id: team-1\n\
             statuses:\n  Todo: state-todo\n  In Progress: state-wip\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.as_path()), None, None, no_env).unwrap();

        assert_eq!(config.api_key().unwrap(), "key-1");
        assert_eq!(config.api_url(), "http://localhost:9/graphql");
        assert_eq!(config.team_id(), Some("team-1"));
        assert_eq!(config.status_table().resolve("in progress").unwrap(), "state-wip");
        assert_eq!(config.status_table().resolve("TODO").unwrap(), "state-todo");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = temp_dir("env");
        let path = dir.join("custom.yaml");
        fs::write(&path, "linear:\n  api_key: from-file\n  team_id: team-file\n").unwrap();
        let env: HashMap<&str, &str> =
            HashMap::from([("LCLI_LINEAR_API_KEY", "from-env"), ("LCLI_LINEAR_TEAM_ID", "")]);

        let config = Config::load_from(Some(path.as_path()), None, None, |key| {
            env.get(key).map(ToString::to_string)
        })
        .unwrap();

        assert_eq!(config.api_key().unwrap(), "from-env");
        // Empty variables do not clear file values.
        assert_eq!(config.team_id(), Some("team-file"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load_from(Some(Path::new("/nonexistent/lcli.yaml")), None, None, no_env)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn invalid_yaml_is_reported_with_path() {
        let dir = temp_dir("invalid");
        let path = dir.join("bad.yaml");
        fs::write(&path, "linear: [unclosed\n").unwrap();

        let err = Config::load_from(Some(path.as_path()), None, None, no_env).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("bad.yaml")));
    }
}
