//! Configuration management for promptline.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - Config file (`$HOME/.config/promptline/config.yaml` or an explicit path)
//! - Environment variables
//! - Command-line flags
//!
//! The segment layout lives in the same file but is loaded by the prompt crate.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default path-truncation depth.
pub const DEFAULT_PWD_DEPTH: i64 = 20;

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Home directory used for `~` substitution and default file locations
    pub home: Option<PathBuf>,

    /// Config file that was actually loaded, if any
    pub config_file: Option<PathBuf>,

    /// Log filter override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored log output
    pub no_color: bool,

    /// Render the reduced layout
    pub minimal: bool,

    /// Show `user@host` instead of `user`
    pub show_host: bool,

    /// Path-truncation depth; `None` means [`DEFAULT_PWD_DEPTH`]
    pub pwd_depth: Option<i64>,

    /// Active cloud profile compared against the cluster context
    pub active_profile: String,

    /// Explicit cluster config path; `None` means `$HOME/.kube/config`
    pub kubeconfig: Option<PathBuf>,

    /// Context names that always count as matching the active profile
    pub profile_exempt: Vec<String>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    logging: Option<LoggingConfig>,
    pwd: Option<PwdConfig>,
    context: Option<ContextConfig>,
    minimal: Option<bool>,
    host: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PwdConfig {
    #[serde(rename = "maxDepth")]
    max_depth: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContextConfig {
    kubeconfig: Option<PathBuf>,
    #[serde(rename = "profileExempt", default)]
    profile_exempt: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `HOME`: Home directory
    /// - `PROMPTLINE_CONFIG`: Path to config file
    /// - `PROMPTLINE_MINIMAL`: Truthy value selects the minimal layout
    /// - `PROMPTLINE_HOST`: Truthy value shows the host name
    /// - `PROMPTLINE_PWD_DEPTH`: Path-truncation depth
    /// - `PROMPTLINE_LOG`: Log filter
    /// - `AWS_PROFILE`: Active profile for the cluster context
    /// - `NO_COLOR`: Disable colored log output
    ///
    /// # Example
    /// ```no_run
    /// use promptline_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Home: {:?}", config.home);
    /// ```
    pub fn load(explicit_config: Option<PathBuf>) -> AppResult<Self> {
        Self::load_with(|key| std::env::var(key).ok(), explicit_config)
    }

    /// Load configuration using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F, explicit_config: Option<PathBuf>) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            home: lookup("HOME")
                .filter(|h| !h.is_empty())
                .map(PathBuf::from),
            ..Self::default()
        };

        let explicit = explicit_config.or_else(|| {
            lookup("PROMPTLINE_CONFIG")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
        });

        match explicit {
            // An explicitly requested file must exist
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
            }
            None => {
                if let Some(path) = config.default_config_path() {
                    if path.exists() {
                        config = config.merge_yaml(&path)?;
                    }
                }
            }
        }

        // Environment variables override YAML config
        if let Some(level) = lookup("PROMPTLINE_LOG").filter(|l| !l.is_empty()) {
            config.log_level = Some(level);
        }

        if lookup("PROMPTLINE_MINIMAL").is_some_and(|v| is_truthy(&v)) {
            config.minimal = true;
        }

        if lookup("PROMPTLINE_HOST").is_some_and(|v| is_truthy(&v)) {
            config.show_host = true;
        }

        if let Some(depth) = lookup("PROMPTLINE_PWD_DEPTH") {
            match depth.trim().parse::<i64>() {
                Ok(depth) => config.pwd_depth = Some(depth),
                Err(_) => tracing::debug!("Ignoring non-integer PROMPTLINE_PWD_DEPTH {:?}", depth),
            }
        }

        config.active_profile = lookup("AWS_PROFILE").unwrap_or_default();

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(pwd) = config_file.pwd {
            if let Some(depth) = pwd.max_depth {
                result.pwd_depth = Some(depth);
            }
        }

        if let Some(context) = config_file.context {
            if let Some(kubeconfig) = context.kubeconfig {
                result.kubeconfig = Some(kubeconfig);
            }
            result.profile_exempt = context.profile_exempt;
        }

        if let Some(minimal) = config_file.minimal {
            result.minimal = minimal;
        }

        if let Some(host) = config_file.host {
            result.show_host = host;
        }

        tracing::debug!("Merged config file {:?}", path);

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags only ever switch features on; they never switch off something
    /// enabled by the environment or the config file.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
        minimal: bool,
        host: bool,
        max_depth: Option<i64>,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        if minimal {
            self.minimal = true;
        }

        if host {
            self.show_host = true;
        }

        if let Some(depth) = max_depth {
            self.pwd_depth = Some(depth);
        }

        self
    }

    /// Default config file location under the home directory.
    pub fn default_config_path(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(".config/promptline/config.yaml"))
    }

    /// Cluster config file to read, if one can be determined.
    pub fn kubeconfig_path(&self) -> Option<PathBuf> {
        self.kubeconfig
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join(".kube/config")))
    }

    /// Effective path-truncation depth.
    pub fn effective_pwd_depth(&self) -> i64 {
        self.pwd_depth.unwrap_or(DEFAULT_PWD_DEPTH)
    }
}

/// Interpret an environment flag value.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
