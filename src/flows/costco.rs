use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, Credentials, SiteConfig};
use crate::flows::{resolve_product_url, StoreFlow};
use crate::models::{LoginForm, ProductCheck, Site};
use crate::parsers::{parse_availability, parse_product_price, parse_product_title};
use crate::utils::http::fetch_once;

const ADD_TO_CART_SELECTOR: &str = "#add-to-cart-btn";

pub struct CostcoFlow {
    config: Arc<Config>,
}

impl CostcoFlow {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreFlow for CostcoFlow {
    async fn login(&self, client: &Client, credentials: &Credentials) -> Result<StatusCode> {
        let site_config = self.site_config();
        info!("Submitting Costco logon form to {}", site_config.logon_url);

        // The exact field set captured from a real browser login still fails
        // against the live site, so some session prerequisite is missing.
        let form = LoginForm::with_credentials(credentials);
        let response = client
            .post(&site_config.logon_url)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("logon POST to {} failed", site_config.logon_url))?;

        let status = response.status();
        info!("Logon response received: {}", status.as_u16());
        Ok(status)
    }

    async fn check_product(&self, client: &Client, product_url: &str) -> Result<ProductCheck> {
        let url = resolve_product_url(&self.site_config().base_url, product_url)?;
        let response = fetch_once(client, &url).await?;
        let html = response.text().await?;

        Ok(ProductCheck {
            availability: parse_availability(&html, ADD_TO_CART_SELECTOR),
            title: parse_product_title(&html),
            price_display: parse_product_price(&html),
            url,
        })
    }

    async fn visit_cart(&self, client: &Client) -> Result<StatusCode> {
        let response = fetch_once(client, &self.site_config().cart_url).await?;
        Ok(response.status())
    }

    fn site_config(&self) -> &SiteConfig {
        &self.config.sites["costco"]
    }

    fn site_key(&self) -> Site {
        Site::Costco
    }
}
