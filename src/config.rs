use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_EXTERNAL_LABEL: &str = "external";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-bot.toml.
/// All fields are optional — the bot works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Label names applied by the trust labeler
    #[serde(default)]
    pub labels: LabelConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,

    /// REST API root, e.g. for GitHub Enterprise. Defaults to api.github.com.
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelConfig {
    /// Label added to pull requests whose author lacks write access.
    pub external: Option<String>,
}

impl Config {
    /// Load configuration from .pr-bot.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-bot.toml");
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Config::default()
        };

        config.github.token = pick_token(config.github.token, std::env::var("GITHUB_TOKEN").ok());

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        pick_token(self.github.token.clone(), std::env::var("GITHUB_TOKEN").ok())
    }

    pub fn api_base(&self) -> &str {
        self.github
            .api_base
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .filter(|base| !base.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn external_label(&self) -> &str {
        self.labels
            .external
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_EXTERNAL_LABEL)
    }
}

/// First non-blank token, configured value before the environment.
fn pick_token(configured: Option<String>, env: Option<String>) -> Option<String> {
    configured
        .into_iter()
        .chain(env)
        .find(|token| !token.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.api_base(), "https://api.github.com");
        assert_eq!(config.external_label(), "external");
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[github]
api_base = "https://ghe.example.com/api/v3/"

[labels]
external = "untrusted"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_base(), "https://ghe.example.com/api/v3");
        assert_eq!(config.external_label(), "untrusted");
    }

    #[test]
    fn test_blank_label_falls_back_to_default() {
        let config: Config = toml::from_str("[labels]\nexternal = \"  \"\n").unwrap();
        assert_eq!(config.external_label(), "external");
    }

    #[test]
    fn test_token_from_config_file_wins() {
        let config: Config = toml::from_str("[github]\ntoken = \"from-file\"\n").unwrap();
        assert_eq!(config.github_token().as_deref(), Some("from-file"));
    }

    #[test]
    fn test_blank_tokens_are_ignored() {
        assert_eq!(pick_token(None, Some(String::new())), None);
        assert_eq!(pick_token(Some(" ".to_string()), Some("\t".to_string())), None);
        assert_eq!(
            pick_token(Some(String::new()), Some("from-env".to_string())).as_deref(),
            Some("from-env")
        );
        assert_eq!(
            pick_token(Some("from-file".to_string()), Some("from-env".to_string())).as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[labels]\nexternal = \"outside\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.external_label(), "outside");
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github\ntoken = ").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
