//! Integration tests for refund approval and rejection.
//!
//! These tests require:
//! - A running CrossCart backend with a seeded refund case
//! - `CROSSCART_API_BASE_URL` / `CROSSCART_API_TOKEN` in the environment
//! - `CROSSCART_TEST_REFUND_ID` pointing at an undecided refund
//!
//! Run with: cargo test -p crosscart-integration-tests -- --ignored

use crosscart_core::RefundId;
use crosscart_engine::{RefundDecision, RefundEdit};
use crosscart_integration_tests::{engine_from_env, init_tracing};
use rust_decimal::Decimal;

fn test_refund_id() -> RefundId {
    let raw = std::env::var("CROSSCART_TEST_REFUND_ID").unwrap_or_else(|_| "1".to_string());
    RefundId::new(raw.parse().expect("CROSSCART_TEST_REFUND_ID must be an integer"))
}

#[tokio::test]
#[ignore = "Requires running backend and seeded refund case"]
async fn test_approve_refund_at_suggested_rate() {
    init_tracing();
    let mut engine = engine_from_env();

    let mut decision = RefundDecision::new(test_refund_id(), Decimal::from(1_000_000));
    decision.set_reason("Không đúng mô tả.");
    assert_eq!(decision.percentage(), 50);

    let notification = engine
        .approve_refund(&decision)
        .await
        .expect("approval accepted");
    assert_eq!(notification.message, "Refund approved.");
}

#[tokio::test]
#[ignore = "Requires running backend and seeded refund case"]
async fn test_reject_refund_with_taxonomy_reason() {
    init_tracing();
    let mut engine = engine_from_env();

    let mut decision = RefundDecision::new(test_refund_id(), Decimal::from(500_000));

    // blank reason is blocked locally, nothing reaches the backend
    let err = engine
        .reject_refund(&decision)
        .await
        .expect_err("blank reason must not submit");
    assert!(err.to_notification().is_none());

    decision.set_reason("Không đúng mô tả.");
    let notification = engine
        .reject_refund(&decision)
        .await
        .expect("rejection accepted");
    assert_eq!(notification.message, "Refund rejected.");
}

#[tokio::test]
#[ignore = "Requires running backend and seeded refund case"]
async fn test_manual_amount_edit_overrides_suggestion() {
    init_tracing();
    let mut engine = engine_from_env();

    let mut decision = RefundDecision::new(test_refund_id(), Decimal::from(1_000_000));
    decision.set_reason("Giao nhầm sản phẩm (sai loại hàng).");
    decision.apply(RefundEdit::Amount(Decimal::from(250_000)));
    assert_eq!(decision.percentage(), 25);

    let notification = engine
        .approve_refund(&decision)
        .await
        .expect("approval accepted");
    assert_eq!(notification.message, "Refund approved.");
}
