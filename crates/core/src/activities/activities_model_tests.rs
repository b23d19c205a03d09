//! Tests for activity domain models.

#[cfg(test)]
mod tests {
    use crate::activities::activities_model::*;
    use crate::errors::ValidationError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    // ============================================================================
    // Decimal parsing
    // ============================================================================

    #[test]
    fn test_parse_decimal_strips_thousands_separators() {
        assert_eq!(parse_decimal_string("1,234", "quantity").unwrap(), dec!(1234));
        assert_eq!(parse_decimal_string("1,000", "quantity").unwrap(), dec!(1000));
        assert_eq!(
            parse_decimal_string(" 12,345,678.90 ", "amount").unwrap(),
            dec!(12345678.90)
        );
    }

    #[test]
    fn test_parse_decimal_signed_values() {
        assert_eq!(parse_decimal_string("-5", "quantity").unwrap(), dec!(-5));
        assert_eq!(parse_decimal_string("-1,500.25", "amount").unwrap(), dec!(-1500.25));
    }

    #[test]
    fn test_parse_decimal_scientific_notation() {
        assert_eq!(parse_decimal_string("1.5e2", "price").unwrap(), dec!(150));
    }

    #[test]
    fn test_parse_decimal_empty_is_missing_field() {
        let err = parse_decimal_string("  ", "Fee").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "Fee"));
    }

    #[test]
    fn test_parse_decimal_garbage_is_invalid_input() {
        let err = parse_decimal_string("12abc", "Price").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInput(_)));
    }

    // ============================================================================
    // Enum serialization
    // ============================================================================

    #[test]
    fn test_activity_type_serialization() {
        assert_eq!(serde_json::to_string(&ActivityType::Buy).unwrap(), r#""BUY""#);
        assert_eq!(
            serde_json::to_string(&ActivityType::Interest).unwrap(),
            r#""INTEREST""#
        );
        let dividend: ActivityType = serde_json::from_str(r#""DIVIDEND""#).unwrap();
        assert_eq!(dividend, ActivityType::Dividend);
    }

    #[test]
    fn test_activity_type_is_income() {
        assert!(ActivityType::Dividend.is_income());
        assert!(ActivityType::Interest.is_income());
        assert!(!ActivityType::Buy.is_income());
        assert!(!ActivityType::Sell.is_income());
    }

    #[test]
    fn test_data_source_serialization() {
        assert_eq!(serde_json::to_string(&DataSource::Yahoo).unwrap(), r#""YAHOO""#);
        assert_eq!(serde_json::to_string(&DataSource::Manual).unwrap(), r#""MANUAL""#);
        assert_eq!(
            serde_json::to_string(&DataSource::Coingecko).unwrap(),
            r#""COINGECKO""#
        );
        assert_eq!(DataSource::default(), DataSource::Yahoo);
    }

    // ============================================================================
    // ActivityRecord
    // ============================================================================

    fn create_test_record() -> ActivityRecord {
        ActivityRecord {
            account_id: "account-1".to_string(),
            currency: "USD".to_string(),
            data_source: DataSource::Yahoo,
            date: ActivityRecord::midnight(NaiveDate::from_ymd_opt(2021, 9, 15).unwrap()),
            fee: dec!(19),
            quantity: dec!(5),
            symbol: "MSFT".to_string(),
            activity_type: ActivityType::Buy,
            unit_price: dec!(298.58),
            comment: "Imported from importer script".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_to_import_shape() {
        let envelope = ImportEnvelope::single(create_test_record());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "activities": [{
                    "accountId": "account-1",
                    "currency": "USD",
                    "dataSource": "YAHOO",
                    "date": "2021-09-15T00:00:00",
                    "fee": 19.0,
                    "quantity": 5.0,
                    "symbol": "MSFT",
                    "type": "BUY",
                    "unitPrice": 298.58,
                    "comment": "Imported from importer script"
                }]
            })
        );
    }

    #[test]
    fn test_record_deserializes_rfc3339_date() {
        let value = json!({
            "accountId": "account-1",
            "currency": "USD",
            "dataSource": "YAHOO",
            "date": "2021-09-15T00:00:00.000Z",
            "fee": 19,
            "quantity": 5,
            "symbol": "MSFT",
            "type": "BUY",
            "unitPrice": 298.58,
            "comment": "Imported from importer script"
        });

        let record: ActivityRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.trade_date(), NaiveDate::from_ymd_opt(2021, 9, 15).unwrap());
        assert_eq!(record.quantity, dec!(5));
    }

    #[test]
    fn test_validate_accepts_well_formed_record() {
        assert!(create_test_record().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut record = create_test_record();
        record.quantity = dec!(0);
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_price_and_fee() {
        let mut record = create_test_record();
        record.unit_price = dec!(-1);
        assert!(record.validate().is_err());

        let mut record = create_test_record();
        record.fee = dec!(-0.5);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_account_and_symbol() {
        let mut record = create_test_record();
        record.account_id = " ".to_string();
        assert!(matches!(
            record.validate(),
            Err(ValidationError::MissingField(ref f)) if f == "accountId"
        ));

        let mut record = create_test_record();
        record.symbol = String::new();
        assert!(matches!(
            record.validate(),
            Err(ValidationError::MissingField(ref f)) if f == "symbol"
        ));
    }

    #[test]
    fn test_envelope_wraps_exactly_one_record() {
        let envelope: ImportEnvelope = create_test_record().into();
        assert_eq!(envelope.activities.len(), 1);
        assert_eq!(envelope.record().unwrap().symbol, "MSFT");
        assert!(envelope.to_pretty_json().unwrap().contains("\"unitPrice\": 298.58"));
    }
}
