//! Grouping of request items into seller/platform sub-requests.
//!
//! Items move between a purchase request's ungrouped pool and its
//! sub-requests by ownership reassignment, never by copy. Every mutation
//! that changes a sub-request's item set immediately re-derives that
//! sub-request's draft through [`DraftStore::sync_items`], so drafts are
//! never silently stale.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crosscart_core::{
    EcommercePlatform, PurchaseRequest, RequestItem, RequestItemId, RequestStatus, RequestType,
    SubRequest, SubRequestId, SubRequestStatus,
};

use crate::draft::DraftStore;

/// Errors from grouping operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupingError {
    /// The parent request's status does not allow grouping.
    #[error("grouping is not allowed while the request is {}", .0.label())]
    NotAllowed(RequestStatus),

    /// Ad-hoc group creation is reserved for online requests.
    #[error("offline sub-requests are pre-grouped at intake")]
    OfflineAdHoc,

    /// Seller name is empty after trimming.
    #[error("seller name must not be empty")]
    EmptySeller,

    /// "Other" platform chosen without a name.
    #[error("platform name must not be empty")]
    EmptyPlatform,

    /// No sub-request with this id on the request.
    #[error("unknown sub-request: {0}")]
    UnknownSubRequest(SubRequestId),

    /// The item is not where the operation expects it.
    #[error("unknown request item: {0}")]
    UnknownItem(RequestItemId),
}

/// Outcome of [`GroupingSession::create_group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new sub-request was created from the selection.
    Created(SubRequestId),
    /// The selection was empty; the call only exited selection mode.
    ModeToggled,
}

/// Outcome of [`remove_item_from_sub_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The item returned to the pool; the sub-request still has items.
    Removed,
    /// The last item was removed, so the sub-request dissolved and its
    /// draft was reset. Callers surface this, it is never silent.
    Dissolved,
}

/// Selection-mode state for grouping items into a new sub-request.
///
/// While the mode is active, item clicks mark membership instead of
/// opening the item detail view.
#[derive(Debug, Default)]
pub struct GroupingSession {
    selecting: bool,
    selected: BTreeSet<RequestItemId>,
}

impl GroupingSession {
    /// Create a session with selection mode off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether selection mode is active.
    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Currently selected item ids, in ascending order.
    #[must_use]
    pub fn selected(&self) -> Vec<RequestItemId> {
        self.selected.iter().copied().collect()
    }

    /// Enter or exit selection mode. Exiting clears the selection.
    pub fn toggle_grouping_mode(&mut self) {
        self.selecting = !self.selecting;
        if !self.selecting {
            self.selected.clear();
        }
    }

    /// Mark or unmark an item while selection mode is active.
    ///
    /// Outside the mode this is a no-op, since clicks open detail instead.
    pub fn toggle_selected(&mut self, item_id: RequestItemId) {
        if !self.selecting {
            return;
        }
        if !self.selected.remove(&item_id) {
            self.selected.insert(item_id);
        }
    }

    /// Create a sub-request from the current selection.
    ///
    /// With an empty selection this is a pure mode-toggle. Otherwise the
    /// selected items move from the ungrouped pool into a new `PENDING`
    /// sub-request under `new_id` (assigned by the backend), the selection
    /// clears, and selection mode exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the request status forbids grouping, the request
    /// is offline (ad-hoc creation is online-only), or the seller/platform
    /// inputs are invalid. The selection is kept on error so the staff
    /// member can correct the form and retry.
    pub fn create_group(
        &mut self,
        request: &mut PurchaseRequest,
        new_id: SubRequestId,
        seller: &str,
        platform: EcommercePlatform,
    ) -> Result<CreateOutcome, GroupingError> {
        if self.selected.is_empty() {
            self.toggle_grouping_mode();
            return Ok(CreateOutcome::ModeToggled);
        }

        ensure_grouping_allowed(request)?;
        if request.request_type == RequestType::Offline {
            return Err(GroupingError::OfflineAdHoc);
        }
        let seller = validate_seller(seller)?;
        validate_platform(&platform)?;

        // verify the whole selection before moving anything, so a stale
        // selection cannot half-drain the pool
        if let Some(missing) = self
            .selected
            .iter()
            .find(|id| !request.request_items.iter().any(|item| item.id == **id))
        {
            return Err(GroupingError::UnknownItem(*missing));
        }
        let mut items = Vec::new();
        for item_id in &self.selected {
            items.push(take_pool_item(request, *item_id)?);
        }
        debug!(sub_request_id = %new_id, items = items.len(), "created sub-request");

        request.sub_requests.push(SubRequest {
            id: new_id,
            seller,
            ecommerce_platform: platform,
            contact_info: Vec::new(),
            status: SubRequestStatus::Pending,
            request_items: items,
        });

        self.selected.clear();
        self.selecting = false;
        Ok(CreateOutcome::Created(new_id))
    }
}

/// Update a sub-request's seller and platform.
///
/// # Errors
///
/// Returns an error if the request status forbids editing, the seller is
/// empty after trimming, or the sub-request is unknown.
pub fn edit_sub_request(
    request: &mut PurchaseRequest,
    sub_request_id: SubRequestId,
    seller: &str,
    platform: EcommercePlatform,
) -> Result<(), GroupingError> {
    ensure_grouping_allowed(request)?;
    let seller = validate_seller(seller)?;
    validate_platform(&platform)?;
    let sub_request = request
        .sub_request_mut(sub_request_id)
        .ok_or(GroupingError::UnknownSubRequest(sub_request_id))?;
    sub_request.seller = seller;
    sub_request.ecommerce_platform = platform;
    Ok(())
}

/// Move an item from the ungrouped pool into a sub-request.
///
/// # Errors
///
/// Returns an error if the request status forbids grouping, the
/// sub-request is unknown, or the item is not in the pool.
pub fn add_item_to_sub_request(
    request: &mut PurchaseRequest,
    drafts: &mut DraftStore,
    sub_request_id: SubRequestId,
    item_id: RequestItemId,
) -> Result<(), GroupingError> {
    ensure_grouping_allowed(request)?;
    if request.sub_request(sub_request_id).is_none() {
        return Err(GroupingError::UnknownSubRequest(sub_request_id));
    }
    let item = take_pool_item(request, item_id)?;
    let sub_request = request
        .sub_request_mut(sub_request_id)
        .ok_or(GroupingError::UnknownSubRequest(sub_request_id))?;
    sub_request.request_items.push(item);
    let items = sub_request.request_items.clone();
    drafts.sync_items(sub_request_id, &items);
    Ok(())
}

/// Move an item from a sub-request back into the ungrouped pool.
///
/// Removing the last item dissolves the sub-request: the item returns to
/// the pool, the sub-request is deleted, and its draft is reset. The
/// returned [`RemoveOutcome`] tells the caller which of the two happened.
///
/// # Errors
///
/// Returns an error if the request status forbids grouping, the
/// sub-request is unknown, or the item is not in it.
pub fn remove_item_from_sub_request(
    request: &mut PurchaseRequest,
    drafts: &mut DraftStore,
    sub_request_id: SubRequestId,
    item_id: RequestItemId,
) -> Result<RemoveOutcome, GroupingError> {
    ensure_grouping_allowed(request)?;
    let sub_request = request
        .sub_request_mut(sub_request_id)
        .ok_or(GroupingError::UnknownSubRequest(sub_request_id))?;
    let position = sub_request
        .request_items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(GroupingError::UnknownItem(item_id))?;
    let item = sub_request.request_items.remove(position);
    let remaining = sub_request.request_items.clone();
    request.request_items.push(item);

    if remaining.is_empty() {
        request.sub_requests.retain(|s| s.id != sub_request_id);
        drafts.reset(sub_request_id);
        debug!(sub_request_id = %sub_request_id, "sub-request dissolved");
        return Ok(RemoveOutcome::Dissolved);
    }
    drafts.sync_items(sub_request_id, &remaining);
    Ok(RemoveOutcome::Removed)
}

/// Resolve the platform picker's fixed choice plus free-text "Other" escape.
///
/// # Errors
///
/// Returns [`GroupingError::EmptyPlatform`] when "Other" is chosen with a
/// blank name.
pub fn resolve_platform(choice: &str, other: &str) -> Result<EcommercePlatform, GroupingError> {
    if choice == "Other" {
        let other = other.trim();
        if other.is_empty() {
            return Err(GroupingError::EmptyPlatform);
        }
        return Ok(EcommercePlatform::Other(other.to_string()));
    }
    Ok(EcommercePlatform::from(choice.to_string()))
}

fn ensure_grouping_allowed(request: &PurchaseRequest) -> Result<(), GroupingError> {
    if request.status.allows_grouping() {
        Ok(())
    } else {
        Err(GroupingError::NotAllowed(request.status))
    }
}

fn validate_seller(seller: &str) -> Result<String, GroupingError> {
    let seller = seller.trim();
    if seller.is_empty() {
        return Err(GroupingError::EmptySeller);
    }
    Ok(seller.to_string())
}

fn validate_platform(platform: &EcommercePlatform) -> Result<(), GroupingError> {
    if let EcommercePlatform::Other(name) = platform {
        if name.trim().is_empty() {
            return Err(GroupingError::EmptyPlatform);
        }
    }
    Ok(())
}

fn take_pool_item(
    request: &mut PurchaseRequest,
    item_id: RequestItemId,
) -> Result<RequestItem, GroupingError> {
    let position = request
        .request_items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(GroupingError::UnknownItem(item_id))?;
    Ok(request.request_items.remove(position))
}
