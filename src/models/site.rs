#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Costco,
    Walmart,
    BestBuy,
}

impl Site {
    pub fn key(&self) -> &'static str {
        match self {
            Site::Costco => "costco",
            Site::Walmart => "walmart",
            Site::BestBuy => "bestbuy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "costco" => Some(Site::Costco),
            "walmart" => Some(Site::Walmart),
            "bestbuy" => Some(Site::BestBuy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_round_trips() {
        for site in [Site::Costco, Site::Walmart, Site::BestBuy] {
            assert_eq!(Site::from_key(site.key()), Some(site));
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(Site::from_key("target"), None);
    }
}
