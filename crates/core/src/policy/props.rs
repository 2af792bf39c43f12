//! Property-based tests for money policy derivation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::MoneyPolicy;
use super::types::{VatPolicy, Withholding};

/// Strategy to generate 2dp amounts (0.00 to 10,000,000.00).
fn money_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy over every policy code.
fn any_policy() -> impl Strategy<Value = VatPolicy> {
    prop::sample::select(vec![
        VatPolicy::Exempt,
        VatPolicy::Standard,
        VatPolicy::WhtTwo,
        VatPolicy::WhtFive,
    ])
}

/// Strategy over both withholding treatments.
fn any_withholding() -> impl Strategy<Value = Withholding> {
    prop::sample::select(vec![Withholding::Deducted, Withholding::Waived])
}

/// True if the value is exactly representable with 2 decimal places.
fn has_money_scale(value: Decimal) -> bool {
    value == MoneyPolicy::round(value)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Identical inputs always derive identical amounts.
    #[test]
    fn prop_compute_is_deterministic(
        net in money_amount(),
        policy in any_policy(),
        other in money_amount(),
        withholding in any_withholding(),
    ) {
        let first = MoneyPolicy::compute(net, policy, other, withholding);
        let second = MoneyPolicy::compute(net, policy, other, withholding);
        prop_assert_eq!(first, second);
    }

    /// Gross is always payable plus other charges, under every code.
    #[test]
    fn prop_gross_is_payable_plus_other_charges(
        net in money_amount(),
        policy in any_policy(),
        other in money_amount(),
        withholding in any_withholding(),
    ) {
        let amounts = MoneyPolicy::compute(net, policy, other, withholding);
        prop_assert_eq!(amounts.gross_amount, amounts.amount_payable + other);
    }

    /// Every derived value is rounded to money scale.
    #[test]
    fn prop_all_outputs_have_money_scale(
        net in money_amount(),
        policy in any_policy(),
        other in money_amount(),
        withholding in any_withholding(),
    ) {
        let amounts = MoneyPolicy::compute(net, policy, other, withholding);
        prop_assert!(has_money_scale(amounts.vat));
        prop_assert!(has_money_scale(amounts.wht));
        prop_assert!(has_money_scale(amounts.amount_payable));
        prop_assert!(has_money_scale(amounts.gross_amount));
    }

    /// Derived amounts never go negative for non-negative inputs.
    #[test]
    fn prop_no_negative_outputs(
        net in money_amount(),
        policy in any_policy(),
        other in money_amount(),
        withholding in any_withholding(),
    ) {
        let amounts = MoneyPolicy::compute(net, policy, other, withholding);
        prop_assert!(amounts.vat >= Decimal::ZERO);
        prop_assert!(amounts.wht >= Decimal::ZERO);
        prop_assert!(amounts.amount_payable >= net);
        prop_assert!(amounts.gross_amount >= amounts.amount_payable);
    }

    /// The exempt code is a pass-through.
    #[test]
    fn prop_exempt_passes_net_through(net in money_amount(), other in money_amount()) {
        let amounts = MoneyPolicy::compute(net, VatPolicy::Exempt, other, Withholding::Deducted);
        prop_assert_eq!(amounts.vat, Decimal::ZERO);
        prop_assert_eq!(amounts.wht, Decimal::ZERO);
        prop_assert_eq!(amounts.amount_payable, net);
    }

    /// An advance share never exceeds the gross it is carved from.
    #[test]
    fn prop_advance_share_bounded_by_gross(
        gross in money_amount(),
        pct in 0u32..=100u32,
    ) {
        let share = MoneyPolicy::advance_share(gross, Decimal::from(pct));
        prop_assert!(share >= Decimal::ZERO);
        prop_assert!(share <= gross);
    }
}
