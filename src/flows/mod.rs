use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use url::Url;

use crate::config::{Config, Credentials, SiteConfig};
use crate::models::{ProductCheck, Site};

mod bestbuy;
mod costco;
mod walmart;

pub use bestbuy::BestBuyFlow;
pub use costco::CostcoFlow;
pub use walmart::WalmartFlow;

#[async_trait]
pub trait StoreFlow: Send + Sync {
    /// Submits the site's logon form. A transport failure here is fatal to
    /// the run; the response status is logged but not validated.
    async fn login(&self, client: &Client, credentials: &Credentials) -> Result<StatusCode>;

    /// Fetches one product page and reports whether it can be added to the cart.
    async fn check_product(&self, client: &Client, product_url: &str) -> Result<ProductCheck>;

    /// Fetches the cart page once and returns its exact status code.
    async fn visit_cart(&self, client: &Client) -> Result<StatusCode>;

    fn site_config(&self) -> &SiteConfig;
    fn site_key(&self) -> Site;
}

pub fn flow_for(site: Site, config: Arc<Config>) -> Box<dyn StoreFlow> {
    match site {
        Site::Costco => Box::new(CostcoFlow::new(config)),
        Site::Walmart => Box::new(WalmartFlow::new(config)),
        Site::BestBuy => Box::new(BestBuyFlow::new(config)),
    }
}

/// Run-config product entries may be site-relative paths.
pub(crate) fn resolve_product_url(base_url: &str, product_url: &str) -> Result<String> {
    let base =
        Url::parse(base_url).with_context(|| format!("invalid base URL {}", base_url))?;
    let resolved = base
        .join(product_url)
        .with_context(|| format!("invalid product URL {}", product_url))?;
    Ok(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absolute_product_urls_pass_through() {
        let url = resolve_product_url(
            "https://www.costco.ca",
            "https://www.costco.ca/playstation-5-console-bundle.product.100696941.html",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://www.costco.ca/playstation-5-console-bundle.product.100696941.html"
        );
    }

    #[test]
    fn relative_product_urls_join_the_base() {
        let url = resolve_product_url(
            "https://www.costco.ca",
            "/playstation-5-console-bundle.product.100696941.html",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://www.costco.ca/playstation-5-console-bundle.product.100696941.html"
        );
    }

    #[test]
    fn bad_base_url_is_an_error() {
        assert!(resolve_product_url("not a url", "/x").is_err());
    }
}
