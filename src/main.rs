use anyhow::Result;
use chrono::Local;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

mod config;
mod flows;
mod models;
mod parsers;
mod utils;

use crate::config::{Config, Credentials, SKIP_PRODUCT};
use crate::flows::{flow_for, StoreFlow};
use crate::models::Site;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("checkout_bot=info".parse()?),
        )
        .init();

    info!("Starting Checkout Bot");

    let (config_path, credentials_path) = parse_args(std::env::args().skip(1));

    let config = Arc::new(Config::load(config_path.as_deref())?);
    let credentials = Arc::new(Credentials::load(&credentials_path)?);

    info!(
        "--- Starting run at {} ---",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    // One task per configured site; each owns its own session
    let site_futures = config
        .sites
        .keys()
        .filter_map(|key| Site::from_key(key))
        .map(|site| {
            let config = config.clone();
            let credentials = credentials.clone();
            async move { run_site(site, config, credentials).await }
        });

    let results = join_all(site_futures).await;

    let mut failed = 0;
    for result in results {
        if let Err(e) = result {
            error!("Site run failed: {:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} site run(s) failed", failed);
    }

    info!("Run completed");
    Ok(())
}

/// `--config <path>` selects the run configuration, `--credentials <path>`
/// the credentials file (default credentials.json next to the binary).
fn parse_args(mut args: impl Iterator<Item = String>) -> (Option<PathBuf>, PathBuf) {
    let mut config_path = None;
    let mut credentials_path = PathBuf::from("credentials.json");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => warn!("Ignoring --config with no path"),
            },
            "--credentials" => match args.next() {
                Some(path) => credentials_path = PathBuf::from(path),
                None => warn!("Ignoring --credentials with no path"),
            },
            other => warn!("Ignoring unknown argument: {}", other),
        }
    }

    (config_path, credentials_path)
}

async fn run_site(site: Site, config: Arc<Config>, credentials: Arc<Credentials>) -> Result<()> {
    let flow = flow_for(site, config.clone());
    let site_config = flow.site_config();

    info!("Processing site: {}", site_config.name.to_uppercase());

    let client = utils::http::create_client(&config.user_agent)?;

    // A transport failure on the logon POST is fatal for the run. The status
    // of a completed POST is only logged; login success is not verified.
    let status = flow.login(&client, &credentials).await?;
    info!("{} logon returned {}", site_config.name, status.as_u16());

    for (label, product_url) in &site_config.products {
        if product_url == SKIP_PRODUCT {
            info!(
                "Skipping product '{}' on {} (no product page)",
                label, site_config.name
            );
            continue;
        }

        match flow.check_product(&client, product_url).await {
            Ok(check) => info!(
                "{}: '{}' ({}) is {} at {}",
                site_config.name,
                label,
                check.title,
                check.availability,
                check.price_display.as_deref().unwrap_or("unknown price"),
            ),
            Err(e) => error!(
                "Product check failed for '{}' on {}: {}",
                label, site_config.name, e
            ),
        }
    }

    match flow.visit_cart(&client).await {
        Ok(status) => info!("response received {}", status.as_u16()),
        Err(e) => error!("Cart visit failed for {}: {}", site_config.name, e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn flags_take_their_paths() {
        let (config_path, credentials_path) =
            parse_args(args(&["--config", "run.json", "--credentials", "creds.json"]));
        assert_eq!(config_path, Some(PathBuf::from("run.json")));
        assert_eq!(credentials_path, PathBuf::from("creds.json"));
    }

    #[test]
    fn flag_with_no_path_falls_back_to_defaults() {
        let (config_path, credentials_path) = parse_args(args(&["--config"]));
        assert_eq!(config_path, None);
        assert_eq!(credentials_path, PathBuf::from("credentials.json"));

        let (config_path, credentials_path) = parse_args(args(&["--credentials"]));
        assert_eq!(config_path, None);
        assert_eq!(credentials_path, PathBuf::from("credentials.json"));
    }
}
