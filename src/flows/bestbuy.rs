use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, Credentials, SiteConfig};
use crate::flows::{resolve_product_url, StoreFlow};
use crate::models::{ProductCheck, Site};
use crate::parsers::{parse_availability, parse_product_price, parse_product_title};
use crate::utils::http::fetch_once;

const ADD_TO_CART_SELECTOR: &str = ".addToCartButton";

pub struct BestBuyFlow {
    config: Arc<Config>,
}

impl BestBuyFlow {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreFlow for BestBuyFlow {
    async fn login(&self, client: &Client, credentials: &Credentials) -> Result<StatusCode> {
        let site_config = self.site_config();
        info!("Submitting Best Buy sign-in form to {}", site_config.logon_url);

        let form = [
            ("email", credentials.logon_id.as_str()),
            ("password", credentials.logon_password.as_str()),
        ];
        let response = client
            .post(&site_config.logon_url)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("sign-in POST to {} failed", site_config.logon_url))?;

        let status = response.status();
        info!("Sign-in response received: {}", status.as_u16());
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
        &self.config.sites["bestbuy"]
    }

    fn site_key(&self) -> Site {
        Site::BestBuy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base: &str) -> Arc<Config> {
        let mut config = Config::defaults();
        let site = config.sites.get_mut("bestbuy").unwrap();
        site.base_url = base.to_string();
        site.logon_url = format!("{}/account/en-ca/signin", base);
        site.cart_url = format!("{}/en-ca/basket", base);
        Arc::new(config)
    }

    #[tokio::test]
    async fn sold_out_page_reports_out_of_stock() {
        let html = r#"
            <html><body>
                <h1>PlayStation 5 Console</h1>
                <p>Sold out online</p>
            </body></html>
        "#;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ps5/15689336"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .expect(1)
            .mount(&server)
            .await;

        let flow = BestBuyFlow::new(test_config(&server.uri()));
        let check = flow
            .check_product(&Client::new(), "/ps5/15689336")
            .await
            .unwrap();

        assert_eq!(check.availability, Availability::OutOfStock);
        assert_eq!(check.price_display, None);
    }
}
