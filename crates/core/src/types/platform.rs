//! E-commerce platform identification for sub-requests.

use serde::{Deserialize, Serialize};

/// The platform a sub-request's seller operates on.
///
/// Fixed enumerated list plus a free-text `Other` escape. Serialized as a
/// plain string on the wire; unknown strings deserialize into `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EcommercePlatform {
    Shopee,
    Lazada,
    Tiki,
    Taobao,
    Amazon,
    Other(String),
}

impl EcommercePlatform {
    /// The fixed platform choices offered in pickers, in display order.
    pub const CHOICES: [Self; 5] = [
        Self::Shopee,
        Self::Lazada,
        Self::Tiki,
        Self::Taobao,
        Self::Amazon,
    ];

    /// The wire/display name of the platform.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Shopee => "Shopee",
            Self::Lazada => "Lazada",
            Self::Tiki => "Tiki",
            Self::Taobao => "Taobao",
            Self::Amazon => "Amazon",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for EcommercePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<String> for EcommercePlatform {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Shopee" => Self::Shopee,
            "Lazada" => Self::Lazada,
            "Tiki" => Self::Tiki,
            "Taobao" => Self::Taobao,
            "Amazon" => Self::Amazon,
            _ => Self::Other(s),
        }
    }
}

impl From<EcommercePlatform> for String {
    fn from(platform: EcommercePlatform) -> Self {
        platform.name().to_string()
    }
}
