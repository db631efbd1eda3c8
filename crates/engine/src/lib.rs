//! CrossCart Engine - Quotation and refund workflow engine.
//!
//! The core state and form logic behind CrossCart's staff tooling:
//! grouping a purchase request's items into seller/platform sub-requests,
//! drafting and submitting quotations over two structurally different
//! protocols (online and offline), computing refund decisions, and
//! projecting lifecycle status for display. It is a library of form/state
//! logic consumed by view components; it owns no page layout and no
//! navigation.
//!
//! # Modules
//!
//! - [`draft`] - Session-scoped quotation drafts keyed by sub-request
//! - [`grouping`] - Item grouping and sub-request metadata edits
//! - [`quotation`] - Form phases, validation, payload assembly
//! - [`refund`] - Refund percentage/amount calculation
//! - [`status`] - Pure status projection for display
//! - [`gateway`] - REST client for the CrossCart backend
//! - [`engine`] - The [`WorkflowEngine`] facade tying the above together
//! - [`config`] - Environment-driven configuration
//! - [`notify`] - User-facing notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod draft;
pub mod engine;
pub mod gateway;
pub mod grouping;
pub mod notify;
pub mod quotation;
pub mod refund;
pub mod status;

pub use config::{ConfigError, EngineConfig};
pub use draft::{AddressDraft, AddressField, DraftStore, InitPolicy, ItemDraft, ItemEdit, QuotationDraft};
pub use engine::{SubmitError, WorkflowEngine};
pub use gateway::{CrossCartClient, GatewayError};
pub use grouping::{CreateOutcome, GroupingError, GroupingSession, RemoveOutcome};
pub use notify::{Notification, NotificationLevel};
pub use quotation::{
    FormPhase, PackageOption, QuotationPayload, QuotationPreview, ValidationErrors,
};
pub use refund::{RefundDecision, RefundEdit};
pub use status::{StatusView, project_request_status, project_sub_request_status};
