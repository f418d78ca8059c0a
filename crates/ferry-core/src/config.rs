//! Configuration types and parsing for ferry.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from ferry.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory containing migration SQL files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Ordered migration filenames. List order is application order — this
    /// list is the only dependency mechanism.
    pub migrations: Vec<String>,

    /// Per-migration wall-clock timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Override for the psql client binary (default: resolve from PATH)
    #[serde(default = "default_psql_path")]
    pub psql_path: String,
}

impl Config {
    /// Load and validate a config from a YAML file
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                CoreError::IoWithPath {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParse {
                message: e.to_string(),
            })?;
        config.validate()?;
        log::debug!(
            "Loaded config '{}' with {} migrations from {}",
            config.name,
            config.migrations.len(),
            path.display()
        );
        Ok(config)
    }

    /// Semantic validation beyond what serde enforces
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations list is empty: nothing to apply".to_string(),
            });
        }
        if self.migrations.iter().any(|m| m.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "migrations list contains an empty filename".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }
}

/// Database connection configuration
///
/// The authentication secret is never part of this struct: only the *name*
/// of the environment variable that holds it. See [`DatabaseConfig::resolve_password`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Project URL (https://<project-id>.supabase.co); used to derive the
    /// database host when `host` is not set explicitly
    #[serde(default)]
    pub project_url: Option<String>,

    /// Explicit database host; takes precedence over `project_url`
    #[serde(default)]
    pub host: Option<String>,

    /// Database port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database user
    #[serde(default = "default_user")]
    pub user: String,

    /// Database name
    #[serde(default = "default_dbname")]
    pub dbname: String,

    /// Name of the environment variable holding the database password
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            project_url: None,
            host: None,
            port: default_port(),
            user: default_user(),
            dbname: default_dbname(),
            password_env: default_password_env(),
        }
    }
}

impl DatabaseConfig {
    /// Resolve the database host: explicit `host` wins, otherwise derive
    /// `db.<project-id>.supabase.co` from `project_url`.
    pub fn resolved_host(&self) -> CoreResult<String> {
        if let Some(host) = &self.host {
            if !host.trim().is_empty() {
                return Ok(host.clone());
            }
        }
        match &self.project_url {
            Some(url) => {
                let id = project_id_from_url(url)?;
                Ok(format!("db.{id}.supabase.co"))
            }
            None => Err(CoreError::ConfigInvalid {
                message: "database requires either `host` or `project_url`".to_string(),
            }),
        }
    }

    /// Read the database password from the configured environment variable.
    ///
    /// Fails fast when the variable is absent or empty — callers check this
    /// before any migration is attempted, and the value never appears on a
    /// command line or in the config file.
    pub fn resolve_password(&self) -> CoreResult<String> {
        match std::env::var(&self.password_env) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(CoreError::MissingPassword {
                var: self.password_env.clone(),
            }),
        }
    }
}

/// Extract the project id from a URL of the form
/// `https://<project-id>.supabase.co`.
fn project_id_from_url(url: &str) -> CoreResult<String> {
    let unresolved = || CoreError::ProjectIdUnresolved {
        url: url.to_string(),
    };

    let rest = url.strip_prefix("https://").ok_or_else(unresolved)?;
    let (id, domain) = rest.split_once('.').ok_or_else(unresolved)?;
    let domain = domain.trim_end_matches('/');
    if id.is_empty() || domain != "supabase.co" {
        return Err(unresolved());
    }
    Ok(id.to_string())
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_psql_path() -> String {
    "psql".to_string()
}

fn default_password_env() -> String {
    "FERRY_DB_PASSWORD".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_dbname() -> String {
    "postgres".to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
