/// Activity types
///
/// The canonical activity categories accepted by the portfolio service's
/// import endpoint. Broker action codes are mapped onto these.

/// Purchase of a security. Decreases cash and increases quantity.
pub const ACTIVITY_TYPE_BUY: &str = "BUY";

/// Disposal of a security. Increases cash and decreases quantity.
pub const ACTIVITY_TYPE_SELL: &str = "SELL";

/// Cash dividend paid into the account. Increases cash.
pub const ACTIVITY_TYPE_DIVIDEND: &str = "DIVIDEND";

/// Interest earned on cash. Increases cash.
pub const ACTIVITY_TYPE_INTEREST: &str = "INTEREST";

/// Income activity types
pub const INCOME_ACTIVITY_TYPES: [&str; 2] = [ACTIVITY_TYPE_DIVIDEND, ACTIVITY_TYPE_INTEREST];

/// Checks if an activity type is an income event (no lot size of its own).
pub fn is_income_activity(activity_type: &str) -> bool {
    INCOME_ACTIVITY_TYPES.contains(&activity_type)
}
