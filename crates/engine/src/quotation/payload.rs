//! Quotation submission payloads and the offline preview types.
//!
//! The two protocols are a tagged union rather than one generic schema:
//! ONLINE posts a flat fee list and a pre-computed total-before-exchange
//! (the backend does not recompute the tax breakdown), while OFFLINE posts
//! full address blocks and per-item tax-relevant fields and leaves every
//! computation to the backend's side-effect-free `calculate` endpoint.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crosscart_core::{CurrencyCode, HsCodeId, Money, PackageTypeId, RequestItemId, SubRequestId};

/// Fixed validity window stamped on every quotation submission.
///
/// Computed at submit time, never at draft initialization, so a long-idle
/// form cannot carry a stale expiry.
pub const QUOTATION_VALIDITY_HOURS: i64 = 72;

/// Per-item fields of an online quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineItemQuotation {
    pub request_item_id: RequestItemId,
    pub base_price: Decimal,
    pub service_fee: Decimal,
}

/// Per-item fields of an offline quotation; the backend computes taxes
/// from the HS code and region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineItemQuotation {
    pub request_item_id: RequestItemId,
    pub base_price: Decimal,
    pub service_fee: Decimal,
    pub currency: CurrencyCode,
    pub hs_code_id: HsCodeId,
    pub region: String,
    pub note: String,
}

/// A validated address block for the offline protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationAddress {
    pub recipient_name: String,
    pub street: String,
    pub city: String,
    /// Required only when `country_code` is `"US"`.
    pub state: Option<String>,
    pub country_code: String,
    pub phone: Option<String>,
}

/// Validated fields of an online quotation, before submit-time stamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineQuotationBody {
    pub sub_request_id: SubRequestId,
    pub note: String,
    pub shipping_estimate: Decimal,
    pub total_price_before_exchange: Decimal,
    /// Free-text fee lines, split on commas, blanks discarded.
    pub fees: Vec<String>,
    pub items: Vec<OnlineItemQuotation>,
}

/// Validated fields of an offline quotation, before submit-time stamping.
///
/// Also the request body of the preview `calculate` call, which carries no
/// expiry or idempotency key because it mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineQuotationBody {
    pub sub_request_id: SubRequestId,
    pub note: String,
    pub package_type: PackageTypeId,
    pub total_weight_estimate: Decimal,
    pub shipper: QuotationAddress,
    pub recipient: QuotationAddress,
    pub items: Vec<OfflineItemQuotation>,
}

/// A stamped online submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineQuotation {
    #[serde(flatten)]
    pub body: OnlineQuotationBody,
    pub expires_at: DateTime<Utc>,
    pub idempotency_key: Uuid,
}

/// A stamped offline submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineQuotation {
    #[serde(flatten)]
    pub body: OfflineQuotationBody,
    pub expires_at: DateTime<Utc>,
    pub idempotency_key: Uuid,
}

/// Either submission shape, tagged for callers that handle both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuotationPayload {
    Online(OnlineQuotation),
    Offline(OfflineQuotation),
}

impl OnlineQuotation {
    /// Stamp a validated body with the expiry window and a fresh
    /// idempotency key.
    #[must_use]
    pub fn stamp(body: OnlineQuotationBody, now: DateTime<Utc>) -> Self {
        Self {
            body,
            expires_at: now + Duration::hours(QUOTATION_VALIDITY_HOURS),
            idempotency_key: Uuid::new_v4(),
        }
    }
}

impl OfflineQuotation {
    /// Stamp a validated body with the expiry window and a fresh
    /// idempotency key.
    #[must_use]
    pub fn stamp(body: OfflineQuotationBody, now: DateTime<Utc>) -> Self {
        Self {
            body,
            expires_at: now + Duration::hours(QUOTATION_VALIDITY_HOURS),
            idempotency_key: Uuid::new_v4(),
        }
    }
}

// =============================================================================
// Preview (calculate) response
// =============================================================================

/// Backend-computed breakdown shown in the read-only preview dialog.
///
/// The client performs no arithmetic on these figures; it only selects
/// which tab is active.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPreview {
    pub summary: PreviewSummary,
    pub shipment: PreviewShipment,
    pub items: Vec<PreviewItem>,
}

/// Totals across the whole sub-request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSummary {
    pub total_base_price: Decimal,
    pub total_tax: Decimal,
    pub total_service_fee: Decimal,
    pub exchange_rate: Decimal,
    /// Settlement-currency total after exchange.
    pub grand_total: Money,
}

/// Shipping figures for the selected package type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewShipment {
    pub carrier: String,
    pub estimated_days: u32,
    pub billed_weight: Decimal,
    pub shipping_fee: Decimal,
}

/// Per-item tax breakdown.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub request_item_id: RequestItemId,
    pub product_name: String,
    pub base_price: Decimal,
    pub import_tax: Decimal,
    pub vat: Decimal,
    pub service_fee: Decimal,
    /// Settlement-currency line total after exchange.
    pub line_total: Money,
}

/// Tabs of the preview dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewTab {
    #[default]
    Summary,
    Shipment,
    Items,
}

impl PreviewTab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Summary, Self::Shipment, Self::Items];

    /// Tab label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Shipment => "Shipment",
            Self::Items => "Items",
        }
    }
}
