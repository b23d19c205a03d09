//! Tests for the import normalizer.

#[cfg(test)]
mod tests {
    use crate::activities::{ActivityType, DataSource, ImportTable};
    use crate::brokers::{AccountRouting, BrokerFormat};
    use crate::errors::Error;
    use crate::normalization::ImportNormalizer;
    use async_trait::async_trait;
    use folioport_market_data::{
        ListedSecurity, ListingProvider, ListingSymbolResolver, ListingTier, MarketDataError,
    };
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // ============================================================================
    // Mock ListingProvider
    // ============================================================================

    #[derive(Default)]
    struct MockListingProvider {
        fetches: AtomicUsize,
    }

    impl MockListingProvider {
        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ListingProvider for MockListingProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn fetch_listing(
            &self,
            tier: ListingTier,
        ) -> Result<Vec<ListedSecurity>, MarketDataError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let listing = [
                ("2330", "台積電", ListingTier::Listed),
                ("1234", "X", ListingTier::Listed),
                ("8454", "富邦媒", ListingTier::Otc),
            ];
            Ok(listing
                .iter()
                .filter(|(_, _, t)| *t == tier)
                .map(|(code, name, tier)| ListedSecurity {
                    code: code.to_string(),
                    name: name.to_string(),
                    tier: *tier,
                })
                .collect())
        }
    }

    fn create_normalizer() -> (ImportNormalizer, Arc<MockListingProvider>) {
        let provider = Arc::new(MockListingProvider::default());
        let resolver = Arc::new(ListingSymbolResolver::new(provider.clone()));
        let routing = AccountRouting::new("tw", "tw2", "us");
        (ImportNormalizer::new(resolver, routing), provider)
    }

    const CATHAY_CSV: &str = "國泰證券 交易明細\n\
股名,日期,買賣別,成交股數,成交價,手續費,交易稅,淨收付\n\
X,2021/09/15,現買,\"1,000\",298.58,19,0,\"-298,599\"\n\
台積電,2021/09/20,現賣,500,600,427,900,298673\n";

    const FIRSTRADE_CSV: &str = "Symbol,Quantity,Price,Action,Description,TradeDate,SettledDate,Interest,Amount,Commission,Fee,CUSIP,RecordType\n\
VT,3,100,BUY,VANGUARD TOTAL WORLD,2022-01-03,2022-01-05,0,-300,0,0,922042742,Trade\n\
,0,,Other,WIRE TRANSFER,2022-01-04,2022-01-04,0,1000,0,0,,Financial\n\
,0,,Interest,INTEREST ON CREDIT BALANCE,2021-09-15,2021-09-15,5.0,5.0,0,0,,Financial\n\
MSFT,-2,310.25,SELL,MICROSOFT CORP,2022-01-06,2022-01-10,0,620.48,0,0.02,594918104,Trade\n";

    // ============================================================================
    // Broker dispatch
    // ============================================================================

    #[tokio::test]
    async fn test_invalid_broker_is_rejected_before_rows() {
        let (normalizer, provider) = create_normalizer();
        let table = ImportTable::from_rows(&["股名"], &[&["X"]]);

        let err = normalizer.normalize_named("schwab", &table).await.unwrap_err();

        assert!(matches!(err, Error::InvalidBroker(ref b) if b == "schwab"));
        assert_eq!(provider.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_adapter_dispatch() {
        let (normalizer, _) = create_normalizer();
        for broker in BrokerFormat::ALL {
            assert_eq!(normalizer.adapter(broker).format(), broker);
        }
    }

    // ============================================================================
    // End-to-end from CSV bytes
    // ============================================================================

    #[tokio::test]
    async fn test_normalize_cathay_csv() {
        let (normalizer, provider) = create_normalizer();

        let records = normalizer
            .normalize_csv(BrokerFormat::Cathay, CATHAY_CSV.as_bytes())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.symbol, "1234.TW");
        assert_eq!(first.activity_type, ActivityType::Buy);
        assert_eq!(first.quantity, dec!(1000));
        assert_eq!(first.unit_price, dec!(298.58));
        assert_eq!(first.fee, dec!(19));
        assert_eq!(first.currency, "TWD");
        assert_eq!(first.account_id, "tw2");

        let second = &records[1];
        assert_eq!(second.symbol, "2330.TW");
        assert_eq!(second.activity_type, ActivityType::Sell);
        assert_eq!(second.fee, dec!(1327));
        assert_eq!(second.account_id, "tw");

        // Both tiers fetched once for the whole batch
        assert_eq!(provider.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_listing_is_fetched_once_per_normalizer() {
        let (normalizer, provider) = create_normalizer();

        normalizer
            .normalize_csv(BrokerFormat::Cathay, CATHAY_CSV.as_bytes())
            .await
            .unwrap();
        normalizer
            .normalize_csv(BrokerFormat::Cathay, CATHAY_CSV.as_bytes())
            .await
            .unwrap();

        assert_eq!(provider.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_normalize_firstrade_csv() {
        let (normalizer, provider) = create_normalizer();

        let records = normalizer
            .normalize_csv(BrokerFormat::Firstrade, FIRSTRADE_CSV.as_bytes())
            .await
            .unwrap();

        let types: Vec<_> = records.iter().map(|r| r.activity_type).collect();
        assert_eq!(
            types,
            vec![ActivityType::Buy, ActivityType::Interest, ActivityType::Sell]
        );

        let interest = &records[1];
        assert_eq!(interest.symbol, "Interest");
        assert_eq!(interest.data_source, DataSource::Manual);
        assert_eq!(interest.quantity, dec!(1));
        assert_eq!(interest.unit_price, dec!(5.0));

        let sell = &records[2];
        assert_eq!(sell.symbol, "MSFT");
        assert_eq!(sell.quantity, dec!(2));
        assert_eq!(sell.fee, dec!(0.02));
        assert!(records.iter().all(|r| r.account_id == "us"));

        // Firstrade rows carry tickers; no listing lookup needed
        assert_eq!(provider.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_action_yields_no_records() {
        let (normalizer, _) = create_normalizer();
        let csv = FIRSTRADE_CSV.replace(",Other,", ",Journal,");

        let result = normalizer
            .normalize_csv(BrokerFormat::Firstrade, csv.as_bytes())
            .await;

        assert!(matches!(result, Err(Error::UnknownAction(ref code)) if code == "Journal"));
    }

    #[tokio::test]
    async fn test_wrong_broker_for_file_is_malformed() {
        let (normalizer, _) = create_normalizer();

        let result = normalizer
            .normalize_csv(BrokerFormat::Firstrade, CATHAY_CSV.as_bytes())
            .await;

        assert!(matches!(result, Err(Error::MalformedRow { .. })));
    }
}
