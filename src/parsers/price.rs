use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::parsers::clean_text;

static PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)").expect("Invalid price regex")
});

static PRICE_ELEMENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span[automation-id='productPriceOutput'], .price .value, .price")
        .expect("Invalid price element selector")
});

/// Displayed dollar price from a product page. Looks at the known price
/// elements first, then falls back to the first dollar amount anywhere on
/// the page.
pub fn parse_product_price(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for elem in document.select(&PRICE_ELEMENT_SELECTOR) {
        let text = clean_text(&elem.text().collect::<String>());
        if let Some(price) = extract_price_display(&text) {
            return Some(price);
        }
    }

    let body_text = document.root_element().text().collect::<String>();
    extract_price_display(&body_text)
}

/// Normalize the first dollar amount in a chunk of text to `$1,234.56` form.
pub fn extract_price_display(text: &str) -> Option<String> {
    PRICE_REGEX
        .captures(text)
        .map(|captures| format!("${}", &captures[1]))
}
