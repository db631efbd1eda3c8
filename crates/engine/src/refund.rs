//! Refund decision calculation.
//!
//! A refund is expressed both as a whole percentage of the original price
//! and as an absolute amount. The two are kept consistent by deriving one
//! from the other on every edit, driven by which field was edited last —
//! never by validating them independently after the fact.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crosscart_core::RefundId;

/// Percentage chips always offered in the approval dialog.
pub const PRESET_PERCENTAGES: [u32; 5] = [10, 20, 30, 50, 100];

/// Fixed reason taxonomy with suggested refund percentages.
///
/// Reasons outside the taxonomy carry no suggestion.
pub const REASON_SUGGESTIONS: &[(&str, u32)] = &[
    ("Giao nhầm sản phẩm (sai loại hàng).", 100),
    ("Hàng hư hỏng trong quá trình vận chuyển.", 80),
    ("Sản phẩm bị lỗi kỹ thuật.", 70),
    ("Sai mẫu mã, màu sắc, kích cỡ.", 60),
    ("Không đúng mô tả.", 50),
    ("Thiếu phụ kiện đi kèm.", 30),
];

/// Suggested percentage for a taxonomy reason, if any.
#[must_use]
pub fn suggested_percentage(reason: &str) -> Option<u32> {
    let reason = reason.trim();
    REASON_SUGGESTIONS
        .iter()
        .find(|(label, _)| *label == reason)
        .map(|(_, percentage)| *percentage)
}

/// Preset chips for a reason: the fixed set plus the reason's suggestion,
/// deduplicated, ascending.
#[must_use]
pub fn preset_chips(reason: &str) -> Vec<u32> {
    let mut chips = PRESET_PERCENTAGES.to_vec();
    if let Some(suggested) = suggested_percentage(reason) {
        chips.push(suggested);
    }
    chips.sort_unstable();
    chips.dedup();
    chips
}

/// Which field the staff member edited last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundEdit {
    /// Raw percentage input; out-of-range values clamp to `[0, 100]`.
    Percentage(i64),
    /// Raw amount input; out-of-range values clamp to `[0, total_price]`.
    Amount(Decimal),
}

/// Working state of one refund approval/rejection dialog.
///
/// Invariant: `amount == round(total_price * percentage / 100)` after
/// every edit, with round-half-up on whole percentage points and whole
/// currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundDecision {
    pub refund_id: RefundId,
    total_price: Decimal,
    percentage: u32,
    amount: Decimal,
    reason: String,
}

impl RefundDecision {
    /// Start a decision at 0%, no reason selected.
    #[must_use]
    pub fn new(refund_id: RefundId, total_price: Decimal) -> Self {
        Self {
            refund_id,
            total_price: total_price.max(Decimal::ZERO),
            percentage: 0,
            amount: Decimal::ZERO,
            reason: String::new(),
        }
    }

    /// The original price the refund is measured against.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Current whole percentage, always in `[0, 100]`.
    #[must_use]
    pub const fn percentage(&self) -> u32 {
        self.percentage
    }

    /// Current amount, always in `[0, total_price]`.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Selected reason text.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Select a reason; a taxonomy reason also applies its suggested
    /// percentage.
    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
        if let Some(suggested) = suggested_percentage(&self.reason) {
            self.apply(RefundEdit::Percentage(i64::from(suggested)));
        }
    }

    /// Recompute the counterpart of the last-edited field.
    pub fn apply(&mut self, edit: RefundEdit) {
        match edit {
            RefundEdit::Percentage(raw) => {
                let percentage = u32::try_from(raw.clamp(0, 100)).unwrap_or(0);
                self.percentage = percentage;
                self.amount = clamp_amount(
                    round_whole(self.total_price * Decimal::from(percentage) / Decimal::from(100)),
                    self.total_price,
                );
            }
            RefundEdit::Amount(raw) => {
                let amount = clamp_amount(round_whole(raw), self.total_price);
                self.amount = amount;
                self.percentage = if self.total_price.is_zero() {
                    0
                } else {
                    round_whole(amount * Decimal::from(100) / self.total_price)
                        .to_u32()
                        .unwrap_or(0)
                        .min(100)
                };
            }
        }
    }

    /// Apply a raw percentage text input; unparseable text counts as zero.
    pub fn set_percentage_input(&mut self, text: &str) {
        let raw = text.trim().parse::<i64>().unwrap_or(0);
        self.apply(RefundEdit::Percentage(raw));
    }

    /// Apply a raw amount text input; unparseable text counts as zero.
    pub fn set_amount_input(&mut self, text: &str) {
        let raw = text.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
        self.apply(RefundEdit::Amount(raw));
    }

    /// The 0–1 fraction submitted to the backend as `refundRate`.
    #[must_use]
    pub fn refund_rate(&self) -> f64 {
        f64::from(self.percentage) / 100.0
    }

    /// Whether the rejection path may proceed.
    #[must_use]
    pub fn can_reject(&self) -> bool {
        !self.reason.trim().is_empty()
    }
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn clamp_amount(value: Decimal, total_price: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, total_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(total: i64) -> RefundDecision {
        RefundDecision::new(RefundId::new(1), Decimal::from(total))
    }

    #[test]
    fn test_percentage_edit_derives_amount() {
        let mut d = decision(1_000_000);
        d.apply(RefundEdit::Percentage(30));
        assert_eq!(d.amount(), Decimal::from(300_000));
    }

    #[test]
    fn test_amount_edit_derives_percentage() {
        let mut d = decision(1_000_000);
        d.apply(RefundEdit::Percentage(30));
        d.apply(RefundEdit::Amount(Decimal::from(250_000)));
        assert_eq!(d.percentage(), 25);
    }

    #[test]
    fn test_round_trip_is_stable_within_one_point() {
        for total in [1_000_000_i64, 333_333, 77, 999] {
            for percentage in 0..=100_i64 {
                let mut d = decision(total);
                d.apply(RefundEdit::Percentage(percentage));
                let amount = d.amount();
                d.apply(RefundEdit::Amount(amount));
                let diff = i64::from(d.percentage()) - percentage;
                assert!(
                    diff.abs() <= 1,
                    "total {total}, set {percentage}%, round-tripped to {}%",
                    d.percentage()
                );
                assert_eq!(d.amount(), amount, "amount must be stable once derived");
            }
        }
    }

    #[test]
    fn test_inputs_clamp_including_negative_and_garbage() {
        let mut d = decision(500);
        d.apply(RefundEdit::Percentage(250));
        assert_eq!(d.percentage(), 100);
        assert_eq!(d.amount(), Decimal::from(500));

        d.apply(RefundEdit::Percentage(-40));
        assert_eq!(d.percentage(), 0);
        assert_eq!(d.amount(), Decimal::ZERO);

        d.apply(RefundEdit::Amount(Decimal::from(9_999)));
        assert_eq!(d.amount(), Decimal::from(500));
        assert_eq!(d.percentage(), 100);

        d.set_amount_input("-120");
        assert_eq!(d.amount(), Decimal::ZERO);

        d.set_percentage_input("not a number");
        assert_eq!(d.percentage(), 0);
        d.set_amount_input("NaN");
        assert_eq!(d.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_total_price_never_divides() {
        let mut d = decision(0);
        d.apply(RefundEdit::Amount(Decimal::from(100)));
        assert_eq!(d.percentage(), 0);
        assert_eq!(d.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_wrong_item_reason_suggests_full_refund() {
        assert_eq!(
            suggested_percentage("Giao nhầm sản phẩm (sai loại hàng)."),
            Some(100)
        );
        assert_eq!(
            preset_chips("Giao nhầm sản phẩm (sai loại hàng)."),
            vec![10, 20, 30, 50, 100]
        );
    }

    #[test]
    fn test_unlisted_reason_has_no_suggestion() {
        assert_eq!(suggested_percentage("khách đổi ý"), None);
        assert_eq!(preset_chips("khách đổi ý"), vec![10, 20, 30, 50, 100]);
    }

    #[test]
    fn test_suggested_value_merges_into_chips_sorted() {
        assert_eq!(
            preset_chips("Hàng hư hỏng trong quá trình vận chuyển."),
            vec![10, 20, 30, 50, 80, 100]
        );
        assert_eq!(
            preset_chips("Sản phẩm bị lỗi kỹ thuật."),
            vec![10, 20, 30, 50, 70, 100]
        );
    }

    #[test]
    fn test_set_reason_applies_suggestion() {
        let mut d = decision(1_000_000);
        d.set_reason("Không đúng mô tả.");
        assert_eq!(d.percentage(), 50);
        assert_eq!(d.amount(), Decimal::from(500_000));

        // unlisted reason leaves the current rate alone
        d.set_reason("khách đổi ý");
        assert_eq!(d.percentage(), 50);
    }

    #[test]
    fn test_rejection_requires_nonblank_reason() {
        let mut d = decision(1_000_000);
        assert!(!d.can_reject());
        d.set_reason("   ");
        assert!(!d.can_reject());
        d.set_reason("Không đúng mô tả.");
        assert!(d.can_reject());
    }

    #[test]
    fn test_refund_rate_is_fraction() {
        let mut d = decision(1_000_000);
        d.apply(RefundEdit::Percentage(30));
        assert!((d.refund_rate() - 0.3).abs() < f64::EPSILON);
    }
}
