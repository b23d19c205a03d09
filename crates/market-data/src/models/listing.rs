//! Exchange listing models.

/// Listing tier of a Taiwanese security.
///
/// The ISIN listing publishes one page per tier; each tier trades on a
/// different market and therefore carries a different Yahoo suffix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ListingTier {
    /// Listed on the Taiwan Stock Exchange (上市).
    Listed,
    /// Traded over the counter on TPEx (上櫃).
    Otc,
}

impl ListingTier {
    /// Every tier, in population order.
    pub const ALL: [ListingTier; 2] = [ListingTier::Listed, ListingTier::Otc];

    /// Parse the tier marker printed in the listing's market column.
    ///
    /// Returns `None` for any other market (emerging board, warrants, ...).
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim() {
            "上市" => Some(ListingTier::Listed),
            "上櫃" => Some(ListingTier::Otc),
            _ => None,
        }
    }

    /// The marker used by the listing page for this tier.
    pub fn marker(&self) -> &'static str {
        match self {
            ListingTier::Listed => "上市",
            ListingTier::Otc => "上櫃",
        }
    }

    /// Query mode of the ISIN listing page that publishes this tier.
    pub fn str_mode(&self) -> u8 {
        match self {
            ListingTier::Listed => 2,
            ListingTier::Otc => 4,
        }
    }

    /// Yahoo suffix appended to the numeric code.
    pub fn suffix(&self) -> &'static str {
        match self {
            ListingTier::Listed => ".TW",
            ListingTier::Otc => ".TWO",
        }
    }
}

/// One security parsed from an exchange listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListedSecurity {
    /// Numeric security code (e.g. "2330", "00878").
    pub code: String,
    /// Display name used by broker exports (e.g. "台積電").
    pub name: String,
    pub tier: ListingTier,
}

impl ListedSecurity {
    /// Exchange-qualified ticker, e.g. "2330.TW" or "3483.TWO".
    pub fn symbol(&self) -> String {
        format!("{}{}", self.code, self.tier.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_marker() {
        assert_eq!(ListingTier::from_marker("上市"), Some(ListingTier::Listed));
        assert_eq!(ListingTier::from_marker(" 上櫃 "), Some(ListingTier::Otc));
        assert_eq!(ListingTier::from_marker("興櫃"), None);
        assert_eq!(ListingTier::from_marker(""), None);
    }

    #[test]
    fn test_tier_suffix_and_mode() {
        assert_eq!(ListingTier::Listed.suffix(), ".TW");
        assert_eq!(ListingTier::Otc.suffix(), ".TWO");
        assert_eq!(ListingTier::Listed.str_mode(), 2);
        assert_eq!(ListingTier::Otc.str_mode(), 4);
    }

    #[test]
    fn test_listed_security_symbol() {
        let security = ListedSecurity {
            code: "00878".to_string(),
            name: "國泰永續高股息".to_string(),
            tier: ListingTier::Listed,
        };
        assert_eq!(security.symbol(), "00878.TW");

        let security = ListedSecurity {
            code: "3483".to_string(),
            name: "力致".to_string(),
            tier: ListingTier::Otc,
        };
        assert_eq!(security.symbol(), "3483.TWO");
    }
}
