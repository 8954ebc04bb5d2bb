// Property-based tests for the value types
use lotus_config_core::{BatchFeeConfig, Duration, TokenAmount};
use proptest::prelude::*;

// Amounts up to 10M FIL keep every product below u128::MAX
fn amount_strategy() -> impl Strategy<Value = u128> {
    0u128..=10_000_000u128 * 1_000_000_000_000_000_000
}

fn sectors_strategy() -> impl Strategy<Value = u64> {
    0u64..=10_000u64
}

// i64::MIN has no positive counterpart
fn nanos_strategy() -> impl Strategy<Value = i64> {
    -i64::MAX..=i64::MAX
}

proptest! {
    #[test]
    fn test_fee_for_sectors_is_affine(
        base in amount_strategy(),
        per_sector in amount_strategy(),
        sectors in sectors_strategy(),
    ) {
        let fee = BatchFeeConfig::new(
            TokenAmount::from_atto(base),
            TokenAmount::from_atto(per_sector),
        );
        prop_assert_eq!(
            fee.fee_for_sectors(sectors),
            TokenAmount::from_atto(base + per_sector * sectors as u128)
        );
    }

    #[test]
    fn test_fee_is_monotonic_in_sectors(
        base in amount_strategy(),
        per_sector in amount_strategy(),
        sectors in sectors_strategy(),
    ) {
        let fee = BatchFeeConfig::new(
            TokenAmount::from_atto(base),
            TokenAmount::from_atto(per_sector),
        );
        prop_assert!(fee.fee_for_sectors(sectors) <= fee.fee_for_sectors(sectors + 1));
    }

    #[test]
    fn test_duration_text_round_trip(nanos in nanos_strategy()) {
        let span = Duration::from_nanos(nanos);
        let text = span.to_string();
        prop_assert!(!text.contains('.'));
        prop_assert_eq!(Duration::parse(&text).unwrap(), span);
    }

    #[test]
    fn test_token_amount_text_round_trip(atto in amount_strategy()) {
        let amount = TokenAmount::from_atto(atto);
        prop_assert_eq!(amount.to_string().parse::<TokenAmount>().unwrap(), amount);
    }
}
