pub mod availability;
pub mod price;

pub use availability::*;
pub use price::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_collapses_whitespace_and_decodes_entities() {
        assert_eq!(
            clean_text("  PlayStation&reg;5   Console\n Bundle  "),
            "PlayStation®5 Console Bundle"
        );
    }
}
