use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Product URL placeholder meaning "no product page configured".
pub const SKIP_PRODUCT: &str = "N/A";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read run configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("failed to read credentials file {path}: {source}")]
    CredentialsRead {
        path: String,
        source: std::io::Error,
    },
    #[error("credentials file {path} is not valid JSON: {source}")]
    CredentialsFormat {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sites: HashMap<String, SiteConfig>,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub base_url: String,
    pub logon_url: String,
    pub cart_url: String,
    /// Product label -> product page URL ("N/A" marks a product with no page).
    #[serde(default)]
    pub products: HashMap<String, String>,
}

impl Config {
    /// Built-in site table, used when no run configuration file is given.
    pub fn defaults() -> Self {
        let mut sites = HashMap::new();

        sites.insert(
            "costco".to_string(),
            SiteConfig {
                name: "Costco".to_string(),
                base_url: "https://www.costco.ca".to_string(),
                logon_url: "https://www.costco.ca/LogonForm".to_string(),
                cart_url: "https://www.costco.ca/CheckoutCartView".to_string(),
                products: HashMap::from([
                    (
                        "ps5_ratchet_bundle".to_string(),
                        "https://www.costco.ca/playstation-5-console-bundle---ratchet-%2526-clank.product.100780734.html".to_string(),
                    ),
                    (
                        "ps5_bundle".to_string(),
                        "https://www.costco.ca/playstation-5-console-bundle.product.100696941.html".to_string(),
                    ),
                ]),
            },
        );

        sites.insert(
            "walmart".to_string(),
            SiteConfig {
                name: "Walmart".to_string(),
                base_url: "https://www.walmart.ca".to_string(),
                logon_url: "https://www.walmart.ca/sign-in".to_string(),
                cart_url: "https://www.walmart.ca/cart".to_string(),
                products: HashMap::from([("ps5".to_string(), SKIP_PRODUCT.to_string())]),
            },
        );

        sites.insert(
            "bestbuy".to_string(),
            SiteConfig {
                name: "Best Buy".to_string(),
                base_url: "https://www.bestbuy.ca".to_string(),
                logon_url: "https://www.bestbuy.ca/account/en-ca/signin".to_string(),
                cart_url: "https://www.bestbuy.ca/en-ca/basket".to_string(),
                products: HashMap::from([("ps5".to_string(), SKIP_PRODUCT.to_string())]),
            },
        );

        Config {
            sites,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
        }
    }

    /// Loads the run configuration. The file format is a map of site key to
    /// product label -> product URL, and it names exactly the sites to run:
    /// sites absent from the file are left out, unknown site keys are
    /// skipped. Without a file the full built-in site table runs.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::defaults();

        if let Some(path) = path {
            let file = config::Config::builder()
                .add_source(config::File::from(path))
                .build()?;
            let selected: HashMap<String, HashMap<String, String>> = file.try_deserialize()?;

            let mut sites = HashMap::new();
            for (site_key, products) in selected {
                match config.sites.remove(&site_key) {
                    Some(mut site) => {
                        info!("Configured {} product(s) for {}", products.len(), site_key);
                        site.products = products;
                        sites.insert(site_key, site);
                    }
                    None => warn!("Ignoring unknown site '{}' in run configuration", site_key),
                }
            }
            config.sites = sites;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub logon_id: String,
    #[serde(default)]
    pub logon_password: String,
}

impl Credentials {
    /// A missing file yields empty credentials; the logon form is still
    /// submitted with empty values, matching the captured request.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No credentials file at {}, using empty credentials", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialsRead {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::CredentialsFormat {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("checkout-bot-test-{}", name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_cover_all_three_sites() {
        let config = Config::defaults();
        for key in ["costco", "walmart", "bestbuy"] {
            assert!(config.sites.contains_key(key), "missing site {}", key);
        }
        assert_eq!(config.sites["costco"].products.len(), 2);
    }

    #[test]
    fn run_config_file_replaces_products_and_skips_unknown_sites() {
        let path = temp_file(
            "run-config.json",
            r#"{
                "costco": { "ps5_disc": "https://www.costco.ca/ps5-disc.product.1.html" },
                "target": { "ps5": "N/A" }
            }"#,
        );

        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.sites["costco"].products.len(), 1);
        assert_eq!(
            config.sites["costco"].products["ps5_disc"],
            "https://www.costco.ca/ps5-disc.product.1.html"
        );
        assert!(!config.sites.contains_key("target"));
    }

    #[test]
    fn run_config_file_names_exactly_the_sites_to_run() {
        let path = temp_file(
            "run-config-costco-only.json",
            r#"{ "costco": { "ps5": "N/A" } }"#,
        );

        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        // sites absent from the file are not run with their defaults
        assert_eq!(config.sites.len(), 1);
        assert!(config.sites.contains_key("costco"));
        // the built-in endpoints still back the selected site
        assert_eq!(
            config.sites["costco"].logon_url,
            "https://www.costco.ca/LogonForm"
        );
    }

    #[test]
    fn missing_credentials_file_is_empty() {
        let credentials =
            Credentials::load(Path::new("/nonexistent/credentials.json")).unwrap();
        assert_eq!(credentials.logon_id, "");
        assert_eq!(credentials.logon_password, "");
    }

    #[test]
    fn credentials_file_parses() {
        let path = temp_file(
            "credentials.json",
            r#"{ "logon_id": "someone@example.com", "logon_password": "hunter2" }"#,
        );

        let credentials = Credentials::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(credentials.logon_id, "someone@example.com");
        assert_eq!(credentials.logon_password, "hunter2");
    }

    #[test]
    fn malformed_credentials_file_is_an_error() {
        let path = temp_file("credentials-bad.json", "not json");
        let result = Credentials::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::CredentialsFormat { .. })));
    }
}
