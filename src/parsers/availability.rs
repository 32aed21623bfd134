use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::models::Availability;
use crate::parsers::clean_text;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("Invalid title selector"));

/// The add-to-cart control only renders when the product is purchasable, so
/// its presence is the stock signal.
pub fn parse_availability(html: &str, add_to_cart_selector: &str) -> Availability {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(add_to_cart_selector) {
        Ok(selector) => selector,
        Err(_) => return Availability::Unknown,
    };

    if document.select(&selector).next().is_some() {
        Availability::InStock
    } else {
        Availability::OutOfStock
    }
}

/// First h1 on the page, cleaned up. Empty when the page has none.
pub fn parse_product_title(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|elem| clean_text(&elem.text().collect::<String>()))
        .unwrap_or_default()
}
