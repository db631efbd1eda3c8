//! Pure status projection for display.
//!
//! Derives a label, a badge class, and (for quoted requests) the
//! quotation completion ratio from lifecycle state. The ratio is a
//! pass-through of backend-computed counters, never recomputed locally.

use crosscart_core::{PurchaseRequest, RequestStatus, SubRequestStatus};

/// Display projection of a request or sub-request status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub label: &'static str,
    pub badge_class: &'static str,
    /// Quotation completion in `[0, 1]`; present only while `QUOTED`.
    pub ratio: Option<f64>,
}

/// Project a purchase request's status for display.
#[must_use]
pub fn project_request_status(request: &PurchaseRequest) -> StatusView {
    let ratio = match request.status {
        RequestStatus::Quoted if request.total_items > 0 => {
            Some(f64::from(request.items_has_quotation) / f64::from(request.total_items))
        }
        _ => None,
    };
    StatusView {
        label: request.status.label(),
        badge_class: request.status.badge_class(),
        ratio,
    }
}

/// Project a sub-request's status for display.
#[must_use]
pub fn project_sub_request_status(status: SubRequestStatus) -> StatusView {
    StatusView {
        label: status.label(),
        badge_class: status.badge_class(),
        ratio: None,
    }
}

/// Whether the quotation form may still be expanded for this request.
///
/// Terminal request states disable grouping, editing, and expansion
/// uniformly.
#[must_use]
pub const fn can_expand_quotation(request: &PurchaseRequest) -> bool {
    !request.status.is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crosscart_core::{
        Address, AddressId, Customer, CustomerId, RequestId, RequestType,
    };

    fn request(status: RequestStatus) -> PurchaseRequest {
        PurchaseRequest {
            id: RequestId::new(1),
            status,
            request_type: RequestType::Online,
            request_items: Vec::new(),
            sub_requests: Vec::new(),
            customer: Customer {
                id: CustomerId::new(1),
                full_name: "Linh Tran".to_string(),
                email: "linh@example.com".to_string(),
                phone: None,
            },
            shipping_address: Address {
                id: AddressId::new(1),
                recipient_name: "Linh Tran".to_string(),
                street: "12 Hang Bac".to_string(),
                city: "Hanoi".to_string(),
                state: None,
                country_code: "VN".to_string(),
                phone: None,
            },
            items_has_quotation: 3,
            total_items: 5,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ratio_present_only_while_quoted() {
        let view = project_request_status(&request(RequestStatus::Quoted));
        assert_eq!(view.ratio, Some(0.6));
        assert_eq!(view.badge_class, "badge-warning");

        for status in [
            RequestStatus::Sent,
            RequestStatus::Checking,
            RequestStatus::Paid,
            RequestStatus::Rejected,
        ] {
            assert_eq!(project_request_status(&request(status)).ratio, None);
        }
    }

    #[test]
    fn test_zero_total_items_has_no_ratio() {
        let mut req = request(RequestStatus::Quoted);
        req.total_items = 0;
        req.items_has_quotation = 0;
        assert_eq!(project_request_status(&req).ratio, None);
    }

    #[test]
    fn test_terminal_states_disable_expansion() {
        assert!(can_expand_quotation(&request(RequestStatus::Checking)));
        assert!(!can_expand_quotation(&request(RequestStatus::Paid)));
        assert!(!can_expand_quotation(&request(RequestStatus::Rejected)));
    }

    #[test]
    fn test_sub_request_projection() {
        let view = project_sub_request_status(SubRequestStatus::Paid);
        assert_eq!(view.label, "Paid");
        assert_eq!(view.badge_class, "badge-success");
        assert_eq!(view.ratio, None);
    }
}
