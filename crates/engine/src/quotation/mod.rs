//! Per-sub-request quotation form logic.
//!
//! A quotation form moves through three phases: `Collapsed` (no form
//! mounted, a draft may or may not exist) → `Expanded` (form mounted,
//! draft initialized) → `Submitting` (validation passed, request in
//! flight) → back to `Collapsed` on success (draft reset) or `Expanded`
//! with the error surfaced on failure.
//!
//! Validation and payload assembly live in the submodules; the engine
//! facade drives the phase transitions.

pub mod package;
pub mod payload;
pub mod validate;

use crate::draft::QuotationDraft;

pub use package::{PackageOption, selectable_for_input, selectable_options};
pub use payload::{
    OfflineItemQuotation, OfflineQuotation, OfflineQuotationBody, OnlineItemQuotation,
    OnlineQuotation, OnlineQuotationBody, PreviewTab, QUOTATION_VALIDITY_HOURS, QuotationAddress,
    QuotationPayload, QuotationPreview,
};
pub use validate::{FieldError, ValidationErrors, validate_offline, validate_online};

/// Lifecycle phase of one sub-request's quotation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Collapsed,
    Expanded,
    Submitting,
}

/// Derive the form phase from draft state and the in-flight flag.
#[must_use]
pub fn form_phase(draft: Option<&QuotationDraft>, submitting: bool) -> FormPhase {
    match draft {
        Some(_) if submitting => FormPhase::Submitting,
        Some(draft) if draft.expanded => FormPhase::Expanded,
        _ => FormPhase::Collapsed,
    }
}
