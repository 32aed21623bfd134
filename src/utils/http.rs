use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::info;

/// Per-site client with its own cookie store, so the logon session cookie
/// carries over to the later product and cart requests.
pub fn create_client(user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .cookie_store(true)
        .timeout(Duration::from_secs(25))
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// Single-shot GET. The run is deliberately fail-fast: nothing is retried.
pub async fn fetch_once(client: &Client, url: &str) -> Result<Response> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?;

    info!("GET {} -> {}", url, response.status().as_u16());
    Ok(response)
}
