//! The workflow engine facade.
//!
//! Owns the draft store, the per-sub-request in-flight guards, and the
//! backend client, and orchestrates the submit flow: read draft →
//! validate → stamp → send → reset on success. Failures leave all form
//! state untouched so the staff member can retry without re-entering
//! data.

use std::collections::HashSet;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crosscart_core::{
    EcommercePlatform, PurchaseRequest, RefundId, RequestItemId, RequestStatus, RequestType,
    SubRequestId,
};

use crate::draft::{DraftStore, InitPolicy};
use crate::gateway::{CrossCartClient, GatewayError};
use crate::grouping::{self, GroupingError, RemoveOutcome};
use crate::notify::Notification;
use crate::quotation::package::PackageOption;
use crate::quotation::payload::{OfflineQuotation, OnlineQuotation, QuotationPreview};
use crate::quotation::validate::{ValidationErrors, validate_offline, validate_online};
use crate::quotation::{FormPhase, form_phase};
use crate::refund::RefundDecision;
use crate::status::can_expand_quotation;

/// Fallback text for failure notifications when the backend sent no
/// message of its own.
const GENERIC_FAILURE: &str = "The request could not be completed. Please try again.";

/// Errors from engine-orchestrated operations.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Field-scoped validation failures; never sent to the backend.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The backend call failed; form state is preserved for retry.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A grouping precondition failed.
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    /// Another request for the same key is already outstanding.
    #[error("a request is already in flight")]
    InFlight,

    /// No draft exists for this sub-request.
    #[error("no draft for sub-request {0}")]
    NoDraft(SubRequestId),

    /// The sub-request is not on the given purchase request.
    #[error("unknown sub-request: {0}")]
    UnknownSubRequest(SubRequestId),

    /// The parent request reached a terminal state.
    #[error("request is closed ({})", .0.label())]
    RequestClosed(RequestStatus),
}

impl SubmitError {
    /// The user-facing failure notification for this error, if the error
    /// class warrants one.
    ///
    /// Validation failures return `None`: they are surfaced field-by-field
    /// on the form, not as a toast.
    #[must_use]
    pub fn to_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(err) => Some(Notification::error(
                err.backend_message().unwrap_or(GENERIC_FAILURE),
            )),
            _ => None,
        }
    }
}

/// Session-scoped quotation and refund workflow engine.
pub struct WorkflowEngine {
    drafts: DraftStore,
    client: CrossCartClient,
    submitting: HashSet<SubRequestId>,
    previewing: HashSet<SubRequestId>,
    refunding: HashSet<RefundId>,
}

impl WorkflowEngine {
    /// Create an engine around a backend client.
    #[must_use]
    pub fn new(client: CrossCartClient) -> Self {
        Self {
            drafts: DraftStore::new(),
            client,
            submitting: HashSet::new(),
            previewing: HashSet::new(),
            refunding: HashSet::new(),
        }
    }

    /// Read access to the draft store.
    #[must_use]
    pub const fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    /// Write access to the draft store, for per-keystroke field edits.
    pub const fn drafts_mut(&mut self) -> &mut DraftStore {
        &mut self.drafts
    }

    /// Mount the quotation form for a sub-request, lazily creating its
    /// draft from the sub-request's current items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is terminal or the sub-request is
    /// unknown.
    pub fn expand(
        &mut self,
        request: &PurchaseRequest,
        sub_request_id: SubRequestId,
    ) -> Result<(), SubmitError> {
        if !can_expand_quotation(request) {
            return Err(SubmitError::RequestClosed(request.status));
        }
        let sub_request = request
            .sub_request(sub_request_id)
            .ok_or(SubmitError::UnknownSubRequest(sub_request_id))?;
        let policy = match request.request_type {
            RequestType::Online => InitPolicy::Online,
            RequestType::Offline => InitPolicy::Offline,
        };
        self.drafts
            .initialize(sub_request_id, &sub_request.request_items, policy);
        self.drafts.set_expanded(sub_request_id, true);
        Ok(())
    }

    /// Unmount the quotation form; the draft stays for later.
    pub fn collapse(&mut self, sub_request_id: SubRequestId) {
        self.drafts.set_expanded(sub_request_id, false);
    }

    /// Current form phase of a sub-request.
    #[must_use]
    pub fn form_phase(&self, sub_request_id: SubRequestId) -> FormPhase {
        form_phase(
            self.drafts.get(sub_request_id),
            self.submitting.contains(&sub_request_id),
        )
    }

    /// Whether a preview call for this sub-request is outstanding.
    #[must_use]
    pub fn preview_in_flight(&self, sub_request_id: SubRequestId) -> bool {
        self.previewing.contains(&sub_request_id)
    }

    /// Validate and submit an online quotation for a sub-request.
    ///
    /// On success the draft resets and the success notification is
    /// returned; on failure the draft is untouched.
    ///
    /// # Errors
    ///
    /// Returns validation failures before any network traffic, or the
    /// gateway error afterwards.
    pub async fn submit_online(
        &mut self,
        sub_request_id: SubRequestId,
    ) -> Result<Notification, SubmitError> {
        if self.submitting.contains(&sub_request_id) {
            return Err(SubmitError::InFlight);
        }
        let draft = self
            .drafts
            .get(sub_request_id)
            .ok_or(SubmitError::NoDraft(sub_request_id))?;
        let body = validate_online(sub_request_id, draft)?;

        // Expiry and idempotency key are stamped here, at submit time,
        // never when the draft was initialized.
        let payload = OnlineQuotation::stamp(body, Utc::now());
        self.submitting.insert(sub_request_id);
        let result = self.client.submit_online(&payload).await;
        self.submitting.remove(&sub_request_id);

        result?;
        self.drafts.reset(sub_request_id);
        debug!(%sub_request_id, "online quotation submitted");
        Ok(Notification::success("Quotation submitted."))
    }

    /// Validate and submit an offline quotation for a sub-request.
    ///
    /// # Errors
    ///
    /// Returns validation failures before any network traffic, or the
    /// gateway error afterwards.
    pub async fn submit_offline(
        &mut self,
        sub_request_id: SubRequestId,
        package_options: &[PackageOption],
    ) -> Result<Notification, SubmitError> {
        if self.submitting.contains(&sub_request_id) {
            return Err(SubmitError::InFlight);
        }
        let draft = self
            .drafts
            .get(sub_request_id)
            .ok_or(SubmitError::NoDraft(sub_request_id))?;
        let body = validate_offline(sub_request_id, draft, package_options)?;

        let payload = OfflineQuotation::stamp(body, Utc::now());
        self.submitting.insert(sub_request_id);
        let result = self.client.submit_offline(&payload).await;
        self.submitting.remove(&sub_request_id);

        result?;
        self.drafts.reset(sub_request_id);
        debug!(%sub_request_id, "offline quotation submitted");
        Ok(Notification::success("Quotation submitted."))
    }

    /// Fetch the backend-computed preview for an offline draft.
    ///
    /// Independent of the submit guard: the preview button and the submit
    /// button disable separately.
    ///
    /// # Errors
    ///
    /// Returns validation failures before any network traffic, or the
    /// gateway error afterwards.
    pub async fn preview_offline(
        &mut self,
        sub_request_id: SubRequestId,
        package_options: &[PackageOption],
    ) -> Result<QuotationPreview, SubmitError> {
        if self.previewing.contains(&sub_request_id) {
            return Err(SubmitError::InFlight);
        }
        let draft = self
            .drafts
            .get(sub_request_id)
            .ok_or(SubmitError::NoDraft(sub_request_id))?;
        let body = validate_offline(sub_request_id, draft, package_options)?;

        self.previewing.insert(sub_request_id);
        let result = self.client.calculate_quotation(&body).await;
        self.previewing.remove(&sub_request_id);

        Ok(result?)
    }

    /// Approve a refund at the decision's current rate.
    ///
    /// # Errors
    ///
    /// Returns the gateway error on backend failure.
    pub async fn approve_refund(
        &mut self,
        decision: &RefundDecision,
    ) -> Result<Notification, SubmitError> {
        if self.refunding.contains(&decision.refund_id) {
            return Err(SubmitError::InFlight);
        }
        self.refunding.insert(decision.refund_id);
        let result = self
            .client
            .approve_refund(decision.refund_id, decision.refund_rate())
            .await;
        self.refunding.remove(&decision.refund_id);

        result?;
        Ok(Notification::success("Refund approved."))
    }

    /// Reject a refund with the decision's reason.
    ///
    /// # Errors
    ///
    /// Returns a field-scoped validation failure for a blank reason before
    /// any network traffic, or the gateway error afterwards.
    pub async fn reject_refund(
        &mut self,
        decision: &RefundDecision,
    ) -> Result<Notification, SubmitError> {
        if !decision.can_reject() {
            return Err(ValidationErrors::single("reason", "required").into());
        }
        if self.refunding.contains(&decision.refund_id) {
            return Err(SubmitError::InFlight);
        }
        self.refunding.insert(decision.refund_id);
        let result = self
            .client
            .reject_refund(decision.refund_id, decision.reason().trim())
            .await;
        self.refunding.remove(&decision.refund_id);

        result?;
        Ok(Notification::success("Refund rejected."))
    }

    /// Edit a sub-request's seller/platform locally and persist it.
    ///
    /// # Errors
    ///
    /// Returns grouping failures before any network traffic, or the
    /// gateway error afterwards.
    pub async fn edit_sub_request(
        &mut self,
        request: &mut PurchaseRequest,
        sub_request_id: SubRequestId,
        seller: &str,
        platform: EcommercePlatform,
    ) -> Result<(), SubmitError> {
        grouping::edit_sub_request(request, sub_request_id, seller, platform.clone())?;
        self.client
            .update_sub_request(sub_request_id, seller.trim(), &platform)
            .await?;
        Ok(())
    }

    /// Move an item into a sub-request locally and persist it.
    ///
    /// # Errors
    ///
    /// Returns grouping failures before any network traffic, or the
    /// gateway error afterwards.
    pub async fn add_item_to_sub_request(
        &mut self,
        request: &mut PurchaseRequest,
        sub_request_id: SubRequestId,
        item_id: RequestItemId,
    ) -> Result<(), SubmitError> {
        grouping::add_item_to_sub_request(request, &mut self.drafts, sub_request_id, item_id)?;
        self.client.add_item(sub_request_id, item_id).await?;
        Ok(())
    }

    /// Move an item out of a sub-request locally and persist it.
    ///
    /// The returned [`RemoveOutcome`] reports whether the sub-request
    /// dissolved; callers must surface a dissolution, never swallow it.
    ///
    /// # Errors
    ///
    /// Returns grouping failures before any network traffic, or the
    /// gateway error afterwards.
    pub async fn remove_item_from_sub_request(
        &mut self,
        request: &mut PurchaseRequest,
        sub_request_id: SubRequestId,
        item_id: RequestItemId,
    ) -> Result<RemoveOutcome, SubmitError> {
        let outcome = grouping::remove_item_from_sub_request(
            request,
            &mut self.drafts,
            sub_request_id,
            item_id,
        )?;
        self.client.remove_item(sub_request_id, item_id).await?;
        Ok(outcome)
    }
}
