//! Lifecycle status enums for purchase requests and sub-requests.

use serde::{Deserialize, Serialize};

/// Purchase request type.
///
/// Distinguishes link-sourced (online marketplace) purchases from manually
/// described (offline/contact-based) purchases. The two types use
/// structurally different quotation payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    #[default]
    Online,
    Offline,
}

/// Purchase request lifecycle status.
///
/// `Sent → Checking → Quoted → Paid`, with `Rejected` reachable from
/// `Checking` and `Quoted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Sent,
    Checking,
    Quoted,
    Paid,
    Rejected,
}

impl RequestStatus {
    /// Whether this status is terminal.
    ///
    /// Terminal requests disable grouping, editing, and quotation-form
    /// expansion uniformly.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Rejected)
    }

    /// Whether staff may still group items and edit sub-requests.
    ///
    /// Grouping starts once staff review begins (`Checking`), never on a
    /// freshly `Sent` request, and never on a terminal one.
    #[must_use]
    pub const fn allows_grouping(self) -> bool {
        matches!(self, Self::Checking | Self::Quoted)
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Checking => "Under review",
            Self::Quoted => "Quoted",
            Self::Paid => "Paid",
            Self::Rejected => "Rejected",
        }
    }

    /// Get a CSS class for styling the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Sent => "badge-secondary",
            Self::Checking => "badge-info",
            Self::Quoted => "badge-warning",
            Self::Paid => "badge-success",
            Self::Rejected => "badge-error",
        }
    }
}

/// Sub-request lifecycle status.
///
/// `Pending → Quoted → Paid`, or `Pending → Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubRequestStatus {
    #[default]
    Pending,
    Quoted,
    Paid,
    Rejected,
}

impl SubRequestStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Awaiting quotation",
            Self::Quoted => "Quoted",
            Self::Paid => "Paid",
            Self::Rejected => "Rejected",
        }
    }

    /// Get a CSS class for styling the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Pending => "badge-info",
            Self::Quoted => "badge-warning",
            Self::Paid => "badge-success",
            Self::Rejected => "badge-error",
        }
    }
}
