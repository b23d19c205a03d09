/// Provenance tag attached to every imported activity
pub const IMPORT_COMMENT: &str = "Imported from importer script";

/// Symbol used for cash interest, which has no tradable security
pub const INTEREST_SYMBOL: &str = "Interest";

/// Currency of the Taiwanese brokerage exports
pub const TWD_CURRENCY: &str = "TWD";

/// Currency of the US brokerage exports
pub const USD_CURRENCY: &str = "USD";
