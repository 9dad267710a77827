use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

const fn default_min_net_score() -> f64 {
    0.5
}

const fn default_http_timeout_secs() -> u64 {
    30
}

fn default_github_api_base() -> Url {
    Url::parse("https://api.github.com").expect("hardcoded GitHub API URL should parse")
}

fn default_npm_registry_base() -> Url {
    Url::parse("https://registry.npmjs.org").expect("hardcoded npm registry URL should parse")
}

/// Runtime configuration for scoring and gating.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Net score below which a package is rejected at the ingestion gate.
    #[serde(default = "default_min_net_score")]
    pub min_net_score: f64,

    /// Timeout for individual HTTP requests, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Base URL of the GitHub REST API.
    #[serde(default = "default_github_api_base")]
    pub github_api_base: Url,

    /// Base URL of the npm registry.
    #[serde(default = "default_npm_registry_base")]
    pub npm_registry_base: Url,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(search_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading pkg-rank configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                search_dir.join("pkgrank.toml"),
                search_dir.join("pkgrank.yml"),
                search_dir.join("pkgrank.yaml"),
                search_dir.join("pkgrank.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading pkg-rank configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Timeout applied to individual HTTP requests.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Detect non-sensical settings that would make every verdict the same
    fn validate(&self, warnings: &mut Vec<String>) {
        if !(0.0..=1.0).contains(&self.min_net_score) {
            warnings.push(format!(
                "min_net_score {} is outside [0, 1], so the gate will give every package the same verdict",
                self.min_net_score
            ));
        }

        if self.http_timeout_secs == 0 {
            warnings.push("http_timeout_secs is 0, so every fetch will time out immediately".to_string());
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_net_score: default_min_net_score(),
            http_timeout_secs: default_http_timeout_secs(),
            github_api_base: default_github_api_base(),
            npm_registry_base: default_npm_registry_base(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults_when_no_file_exists() {
        let (_guard, dir) = temp_dir();

        let (config, warnings) = Config::load(&dir, None).unwrap();

        assert!((config.min_net_score - 0.5).abs() < 1e-9);
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.github_api_base.as_str(), "https://api.github.com/");
        assert_eq!(config.npm_registry_base.as_str(), "https://registry.npmjs.org/");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_toml_candidate() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.toml"), "min_net_score = 0.75\n").unwrap();

        let (config, warnings) = Config::load(&dir, None).unwrap();

        assert!((config.min_net_score - 0.75).abs() < 1e-9);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_yaml_candidate() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.yml"), "min_net_score: 0.25\nhttp_timeout_secs: 5\n").unwrap();

        let (config, _) = Config::load(&dir, None).unwrap();

        assert!((config.min_net_score - 0.25).abs() < 1e-9);
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_toml_candidate_wins_over_yaml() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.toml"), "min_net_score = 0.9\n").unwrap();
        fs::write(dir.join("pkgrank.yml"), "min_net_score: 0.1\n").unwrap();

        let (config, _) = Config::load(&dir, None).unwrap();

        assert!((config.min_net_score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_path_overrides_candidates() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.toml"), "min_net_score = 0.9\n").unwrap();
        let explicit = dir.join("special.json");
        fs::write(&explicit, r#"{"min_net_score": 0.35, "npm_registry_base": "http://localhost:4873"}"#).unwrap();

        let (config, _) = Config::load(&dir, Some(&explicit)).unwrap();

        assert!((config.min_net_score - 0.35).abs() < 1e-9);
        assert_eq!(config.npm_registry_base.as_str(), "http://localhost:4873/");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.toml"), "bogus_knob = 1\n").unwrap();

        assert!(Config::load(&dir, None).is_err());
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let (_guard, dir) = temp_dir();
        let path = dir.join("pkgrank.ini");
        fs::write(&path, "min_net_score = 0.5\n").unwrap();

        assert!(Config::load(&dir, Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let (_guard, dir) = temp_dir();
        let path = dir.join("nope.toml");

        assert!(Config::load(&dir, Some(&path)).is_err());
    }

    #[test]
    fn test_out_of_range_threshold_warns() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.toml"), "min_net_score = 1.5\n").unwrap();

        let (config, warnings) = Config::load(&dir, None).unwrap();

        assert!((config.min_net_score - 1.5).abs() < 1e-9);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_zero_timeout_warns() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join("pkgrank.toml"), "http_timeout_secs = 0\n").unwrap();

        let (_, warnings) = Config::load(&dir, None).unwrap();

        assert_eq!(warnings.len(), 1);
    }
}
