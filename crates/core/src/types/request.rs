//! Purchase request entity model.
//!
//! A [`PurchaseRequest`] is a customer's top-level ask. Its line items live
//! either in the ungrouped pool (`request_items`) or inside a
//! [`SubRequest`], a seller/platform-scoped grouping that is the unit of
//! quotation and payment. An item is owned by exactly one of the two at any
//! time; moving it reassigns ownership, never copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::id::{AddressId, CustomerId, RequestId, RequestItemId, SubRequestId};
use super::platform::EcommercePlatform;
use super::status::{RequestStatus, RequestType, SubRequestStatus};

/// A customer's top-level purchase request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub id: RequestId,
    pub status: RequestStatus,
    pub request_type: RequestType,
    /// Items not yet grouped into a sub-request.
    pub request_items: Vec<RequestItem>,
    pub sub_requests: Vec<SubRequest>,
    pub customer: Customer,
    pub shipping_address: Address,
    /// Backend-computed counter: items that already have a quotation.
    pub items_has_quotation: u32,
    /// Backend-computed counter: total line items on the request.
    pub total_items: u32,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRequest {
    /// Find a sub-request by id.
    #[must_use]
    pub fn sub_request(&self, id: SubRequestId) -> Option<&SubRequest> {
        self.sub_requests.iter().find(|s| s.id == id)
    }

    /// Find a sub-request by id, mutably.
    pub fn sub_request_mut(&mut self, id: SubRequestId) -> Option<&mut SubRequest> {
        self.sub_requests.iter_mut().find(|s| s.id == id)
    }
}

/// A single line item on a purchase request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub id: RequestItemId,
    pub product_name: String,
    /// Present for ONLINE (link-sourced) items, absent for OFFLINE ones.
    pub product_url: Option<Url>,
    pub quantity: u32,
    pub images: Vec<String>,
    /// Variant descriptors, e.g. color or size, in display order.
    pub variant: Vec<String>,
    pub note: Option<String>,
}

/// A seller/platform-scoped grouping of items: the unit of quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRequest {
    pub id: SubRequestId,
    pub seller: String,
    pub ecommerce_platform: EcommercePlatform,
    /// Ordered free-text contact lines (phone, chat handle, shop address).
    pub contact_info: Vec<String>,
    pub status: SubRequestStatus,
    /// Owned items; non-empty after grouping.
    pub request_items: Vec<RequestItem>,
}

impl SubRequest {
    /// Ids of the items currently owned by this sub-request, in order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<RequestItemId> {
        self.request_items.iter().map(|item| item.id).collect()
    }
}

/// The customer who filed the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A delivery address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub recipient_name: String,
    pub street: String,
    pub city: String,
    /// State/province; required by carriers only for some countries.
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    pub phone: Option<String>,
}
