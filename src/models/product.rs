use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    InStock,
    OutOfStock,
    Unknown,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::InStock => write!(f, "in stock"),
            Availability::OutOfStock => write!(f, "out of stock"),
            Availability::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of a single product-page check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCheck {
    pub url: String,
    pub title: String,
    pub price_display: Option<String>,
    pub availability: Availability,
}
