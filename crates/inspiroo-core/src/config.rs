// Configuration loading and parsing (inspiroo.toml, credentials.toml, and
// environment overrides for the API key).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

const APP_FILE: &str = "inspiroo.toml";
const CREDENTIALS_FILE: &str = "credentials.toml";

/// Files copied out of `defaults/` when missing from `config/`.
const SEEDED_FILES: &[&str] = &[APP_FILE];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },

    #[error("could not determine a data directory for the database")]
    NoDataDir,
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub credentials: CredentialsConfig,
}

/// Raw deserialization target for inspiroo.toml.
#[derive(Debug, Clone, Deserialize)]
struct AppFile {
    llm: LlmConfig,
    storage: StorageConfig,
    ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f32,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Empty means "use the platform data directory".
    #[serde(default)]
    pub db_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub online_users_start: u32,
    pub online_tick_secs: u64,
    pub inspiration_tick_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// The configured API key, if any non-blank one exists.
    pub fn api_key(&self) -> Option<&str> {
        self.credentials
            .gemini_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    /// Database location: `storage.db_path`, or `inspiroo.db` in the platform
    /// data directory when that is empty.
    pub fn resolved_db_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.storage.db_path.trim().is_empty() {
            return Ok(PathBuf::from(&self.storage.db_path));
        }
        let dirs = directories::ProjectDirs::from("", "", "inspiroo").ok_or(ConfigError::NoDataDir)?;
        Ok(dirs.data_dir().join("inspiroo.db"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/inspiroo.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not read the environment or copy defaults; see `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- inspiroo.toml (required) ---
    let app_path = config_dir.join(APP_FILE);
    let app_text = read_file(&app_path)?;
    let app_file: AppFile = toml::from_str(&app_text).map_err(|e| ConfigError::ParseError {
        path: app_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join(CREDENTIALS_FILE);
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        llm: app_file.llm,
        storage: app_file.storage,
        ui: app_file.ui,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Let the environment override the file-based API key. `lookup` abstracts
/// `std::env::var` so the precedence can be tested without touching the
/// process environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|v| !v.trim().is_empty());
    if let Some(key) = from_env {
        config.credentials.gemini_api_key = Some(key);
    }
}

/// Seed `config/` from `defaults/` on first run. Only `inspiroo.toml` is
/// seeded; `credentials.toml` stays something the user writes from the
/// shipped `.example`. Existing files are never touched.
///
/// Returns the paths that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(seed_error(format!(
            "neither defaults/ nor config/ directory found in {}; \
             start inspiroo from the project root",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut seeded = Vec::new();
    for name in SEEDED_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if target.exists() {
            debug!(path = %target.display(), "config already present");
            continue;
        }
        if !source.is_file() {
            warn!(path = %source.display(), "default config missing; nothing to seed");
            continue;
        }
        std::fs::copy(&source, &target)
            .map_err(|e| seed_error(format!("cannot seed {}: {e}", target.display())))?;
        info!(path = %target.display(), "seeded config from defaults");
        seeded.push(target);
    }
    Ok(seeded)
}

fn seed_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying defaults first and applying environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "llm.model".into(),
            message: "must not be empty".into(),
        });
    }

    let base = config.llm.api_base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "llm.api_base_url".into(),
            message: format!("must be an http(s) URL, got {base:?}"),
        });
    }

    let temp = config.llm.temperature;
    if !(0.0..=2.0).contains(&temp) {
        return Err(ConfigError::ValidationError {
            field: "llm.temperature".into(),
            message: format!("must be between 0.0 and 2.0 inclusive, got {temp}"),
        });
    }

    let intervals: &[(&str, u64)] = &[
        ("ui.online_tick_secs", config.ui.online_tick_secs),
        ("ui.inspiration_tick_secs", config.ui.inspiration_tick_secs),
    ];
    for (name, val) in intervals {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const APP_TOML: &str = r#"
[llm]
model = "gemini-2.5-flash"
temperature = 0.7
api_base_url = "https://generativelanguage.googleapis.com/v1beta"

[storage]
db_path = "inspiroo.db"

[ui]
online_users_start = 1420
online_tick_secs = 3
inspiration_tick_secs = 3
"#;

    /// Fresh temp dir with `config/inspiroo.toml` written from `app_toml`.
    fn setup(name: &str, app_toml: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/inspiroo.toml"), app_toml).unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config() {
        let tmp = setup("inspiroo_config_valid", APP_TOML);
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.storage.db_path, "inspiroo.db");
        assert_eq!(config.ui.online_users_start, 1420);
        assert!(config.api_key().is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn repository_defaults_are_loadable() {
        let cwd = std::env::current_dir().unwrap();
        let root = [cwd.clone(), cwd.join("../.."), cwd.join("..")]
            .into_iter()
            .find(|p| p.join("defaults/inspiroo.toml").exists())
            .expect("defaults/ should be reachable from the test cwd");

        let tmp = setup(
            "inspiroo_config_repo_defaults",
            &fs::read_to_string(root.join("defaults/inspiroo.toml")).unwrap(),
        );
        let config = load_config_from(&tmp).expect("defaults should validate");
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.storage.db_path.is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_with_api_key() {
        let tmp = setup("inspiroo_config_with_creds", APP_TOML);
        fs::write(
            tmp.join("config/credentials.toml"),
            "gemini_api_key = \"AIza-test-key\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load with credentials.toml");
        assert_eq!(config.api_key(), Some("AIza-test-key"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let tmp = setup("inspiroo_config_blank_key", APP_TOML);
        fs::write(tmp.join("config/credentials.toml"), "gemini_api_key = \"  \"\n").unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert!(config.api_key().is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_overrides_file_key_in_priority_order() {
        let tmp = setup("inspiroo_config_env", APP_TOML);
        fs::write(tmp.join("config/credentials.toml"), "gemini_api_key = \"file\"\n").unwrap();
        let mut config = load_config_from(&tmp).unwrap();

        apply_env_overrides(&mut config, |name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "API_KEY" => Some("from-api-key".into()),
            _ => None,
        });
        assert_eq!(config.api_key(), Some("from-api-key"));

        apply_env_overrides(&mut config, |name| match name {
            "GEMINI_API_KEY" => Some("from-gemini".into()),
            "API_KEY" => Some("from-api-key".into()),
            _ => None,
        });
        assert_eq!(config.api_key(), Some("from-gemini"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_without_key_keeps_file_key() {
        let tmp = setup("inspiroo_config_env_none", APP_TOML);
        fs::write(tmp.join("config/credentials.toml"), "gemini_api_key = \"file\"\n").unwrap();
        let mut config = load_config_from(&tmp).unwrap();
        apply_env_overrides(&mut config, |_| None);
        assert_eq!(config.api_key(), Some("file"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_temperature_out_of_range() {
        let tmp = setup(
            "inspiroo_config_temp",
            &APP_TOML.replace("temperature = 0.7", "temperature = 2.5"),
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "llm.temperature");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_model() {
        let tmp = setup(
            "inspiroo_config_model",
            &APP_TOML.replace("model = \"gemini-2.5-flash\"", "model = \"\""),
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "llm.model");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let tmp = setup(
            "inspiroo_config_base_url",
            &APP_TOML.replace(
                "https://generativelanguage.googleapis.com/v1beta",
                "generativelanguage.googleapis.com",
            ),
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "llm.api_base_url");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_tick() {
        let tmp = setup(
            "inspiroo_config_tick",
            &APP_TOML.replace("online_tick_secs = 3", "online_tick_secs = 0"),
        );
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "ui.online_tick_secs");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_app_toml() {
        let tmp = std::env::temp_dir().join("inspiroo_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("inspiroo.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = setup("inspiroo_config_invalid", "this is not valid [[[ toml");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("inspiroo.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn explicit_db_path_is_used_verbatim() {
        let tmp = setup("inspiroo_config_db_path", APP_TOML);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.resolved_db_path().unwrap(), PathBuf::from("inspiroo.db"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("inspiroo_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("inspiroo.toml"), APP_TOML).unwrap();
        fs::write(
            defaults_dir.join("credentials.toml.example"),
            "gemini_api_key = \"AIza...\"\n",
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/inspiroo.toml").exists());
        assert!(!tmp.join("config/credentials.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_only_seeds_app_config() {
        let tmp = std::env::temp_dir().join("inspiroo_config_ensure_only_app");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/inspiroo.toml"), APP_TOML).unwrap();
        fs::write(tmp.join("defaults/credentials.toml"), "gemini_api_key = \"x\"\n").unwrap();
        fs::write(tmp.join("defaults/notes.txt"), "scratch\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied, vec![tmp.join("config").join("inspiroo.toml")]);
        assert!(!tmp.join("config/credentials.toml").exists());
        assert!(!tmp.join("config/notes.txt").exists());

        let config = load_config_from(&tmp).unwrap();
        assert!(config.credentials.gemini_api_key.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("inspiroo_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/inspiroo.toml"), APP_TOML).unwrap();
        fs::write(tmp.join("config/inspiroo.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(tmp.join("config/inspiroo.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("inspiroo_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
