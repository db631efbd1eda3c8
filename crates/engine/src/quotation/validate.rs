//! Declarative validation of quotation drafts.
//!
//! Rules run on submit (and on blur upstream), never per keystroke.
//! Failures are field-scoped, block submission, and never reach the
//! network. Field names in errors use the wire spelling so callers can
//! attach messages to their inputs directly.

use rust_decimal::Decimal;
use thiserror::Error;

use crosscart_core::SubRequestId;

use crate::draft::{AddressDraft, QuotationDraft};
use crate::quotation::package::{PackageOption, parse_weight, selectable_options};
use crate::quotation::payload::{
    OfflineItemQuotation, OfflineQuotationBody, OnlineItemQuotation, OnlineQuotationBody,
    QuotationAddress,
};

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire-spelled field path, e.g. `items[0].basePrice`.
    pub field: String,
    pub message: String,
}

/// The set of validation failures for one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// A single-field failure raised outside the form validators.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// The individual field failures, in rule-evaluation order.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether a specific field failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Validate an online draft and assemble the unstamped body.
///
/// # Errors
///
/// Returns every failed field at once so the whole form can be annotated
/// in a single pass.
pub fn validate_online(
    sub_request_id: SubRequestId,
    draft: &QuotationDraft,
) -> Result<OnlineQuotationBody, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let note = required_text(&mut errors, "note", &draft.note);
    let shipping_estimate =
        required_decimal(&mut errors, "shippingEstimate", &draft.shipping_estimate);
    let total_price_before_exchange = required_decimal(
        &mut errors,
        "totalPriceBeforeExchange",
        &draft.total_price_before_exchange,
    );

    let mut items = Vec::with_capacity(draft.items.len());
    for (index, item) in draft.items.iter().enumerate() {
        let base_price = decimal_or_zero(
            &mut errors,
            &format!("items[{index}].basePrice"),
            &item.base_price,
        );
        let service_fee = decimal_or_zero(
            &mut errors,
            &format!("items[{index}].serviceFee"),
            &item.service_fee,
        );
        if let (Some(base_price), Some(service_fee)) = (base_price, service_fee) {
            items.push(OnlineItemQuotation {
                request_item_id: item.request_item_id,
                base_price,
                service_fee,
            });
        }
    }

    let body = match (note, shipping_estimate, total_price_before_exchange) {
        (Some(note), Some(shipping_estimate), Some(total_price_before_exchange)) => {
            OnlineQuotationBody {
                sub_request_id,
                note,
                shipping_estimate,
                total_price_before_exchange,
                fees: split_fees(&draft.fees_text),
                items,
            }
        }
        _ => {
            return Err(errors);
        }
    };
    errors.into_result(body)
}

/// Validate an offline draft and assemble the unstamped body.
///
/// The selected package type must still be in the selectable set for the
/// current weight estimate; the picker prunes the list, but a stale
/// selection from before a weight edit is caught here.
///
/// # Errors
///
/// Returns every failed field at once so the whole form can be annotated
/// in a single pass.
pub fn validate_offline(
    sub_request_id: SubRequestId,
    draft: &QuotationDraft,
    options: &[PackageOption],
) -> Result<OfflineQuotationBody, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let note = required_text(&mut errors, "note", &draft.note);
    let total_weight_estimate = required_decimal(
        &mut errors,
        "totalWeightEstimate",
        &draft.total_weight_estimate,
    );

    let package_type = match draft.package_type {
        Some(id) => {
            let weight = parse_weight(&draft.total_weight_estimate);
            if selectable_options(options, weight)
                .iter()
                .any(|option| option.id == id)
            {
                Some(id)
            } else {
                errors.push(
                    "packageType",
                    "selected package type does not cover the weight estimate",
                );
                None
            }
        }
        None => {
            errors.push("packageType", "package type is required");
            None
        }
    };

    let shipper = validate_address(&mut errors, "shipper", &draft.shipper);
    let recipient = validate_address(&mut errors, "recipient", &draft.recipient);

    let mut items = Vec::with_capacity(draft.items.len());
    for (index, item) in draft.items.iter().enumerate() {
        let base_price = required_decimal(
            &mut errors,
            &format!("items[{index}].basePrice"),
            &item.base_price,
        );
        let service_fee = required_decimal(
            &mut errors,
            &format!("items[{index}].serviceFee"),
            &item.service_fee,
        );
        let hs_code_id = item.hs_code_id.map_or_else(
            || {
                errors.push(format!("items[{index}].hsCodeId"), "HS code is required");
                None
            },
            Some,
        );
        let region = required_text(&mut errors, &format!("items[{index}].region"), &item.region);
        let item_note = required_text(&mut errors, &format!("items[{index}].note"), &item.note);

        if let (Some(base_price), Some(service_fee), Some(hs_code_id), Some(region), Some(note)) =
            (base_price, service_fee, hs_code_id, region, item_note)
        {
            items.push(OfflineItemQuotation {
                request_item_id: item.request_item_id,
                base_price,
                service_fee,
                currency: item.currency,
                hs_code_id,
                region,
                note,
            });
        }
    }

    let body = match (note, total_weight_estimate, package_type, shipper, recipient) {
        (
            Some(note),
            Some(total_weight_estimate),
            Some(package_type),
            Some(shipper),
            Some(recipient),
        ) => OfflineQuotationBody {
            sub_request_id,
            note,
            package_type,
            total_weight_estimate,
            shipper,
            recipient,
            items,
        },
        _ => {
            return Err(errors);
        }
    };
    errors.into_result(body)
}

/// Split the free-text fee input on commas, discarding blank entries.
#[must_use]
pub fn split_fees(fees_text: &str) -> Vec<String> {
    fees_text
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "required");
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required_decimal(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "required");
        return None;
    }
    match trimmed.parse::<Decimal>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

fn decimal_or_zero(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    match trimmed.parse::<Decimal>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

fn validate_address(
    errors: &mut ValidationErrors,
    prefix: &str,
    address: &AddressDraft,
) -> Option<QuotationAddress> {
    let recipient_name = required_text(
        errors,
        &format!("{prefix}.recipientName"),
        &address.recipient_name,
    );
    let street = required_text(errors, &format!("{prefix}.street"), &address.street);
    let city = required_text(errors, &format!("{prefix}.city"), &address.city);
    let country_code = required_text(
        errors,
        &format!("{prefix}.countryCode"),
        &address.country_code,
    );

    // State/province is a carrier requirement for US addresses only.
    let state = if address.country_code.trim() == "US" {
        required_text(errors, &format!("{prefix}.state"), &address.state)
    } else {
        let trimmed = address.state.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };
    let state_ok = address.country_code.trim() != "US" || state.is_some();

    let phone = {
        let trimmed = address.phone.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    match (recipient_name, street, city, country_code) {
        (Some(recipient_name), Some(street), Some(city), Some(country_code)) if state_ok => {
            Some(QuotationAddress {
                recipient_name,
                street,
                city,
                state,
                country_code,
                phone,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{AddressField, DraftStore, InitPolicy, ItemEdit};
    use crosscart_core::{CurrencyCode, HsCodeId, PackageTypeId, RequestItem, RequestItemId};

    fn item(id: i64) -> RequestItem {
        RequestItem {
            id: RequestItemId::new(id),
            product_name: format!("item-{id}"),
            product_url: None,
            quantity: 1,
            images: Vec::new(),
            variant: Vec::new(),
            note: None,
        }
    }

    fn sub_id() -> SubRequestId {
        SubRequestId::new(7)
    }

    fn online_draft() -> QuotationDraft {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1), item(2)], InitPolicy::Online);
        store.set_note(sub_id(), "two parcels".to_string());
        store.set_shipping_estimate(sub_id(), "50000".to_string());
        store.set_total_price_before_exchange(sub_id(), "1200000".to_string());
        store.set_fees_text(sub_id(), "packing, , insurance,".to_string());
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::BasePrice("1000000".to_string()),
        );
        store.get(sub_id()).expect("draft").clone()
    }

    fn offline_options() -> Vec<PackageOption> {
        vec![
            PackageOption {
                id: PackageTypeId::new(1),
                label: "Small".to_string(),
                max_weight_kg: Decimal::from(5),
            },
            PackageOption {
                id: PackageTypeId::new(2),
                label: "Medium".to_string(),
                max_weight_kg: Decimal::from(20),
            },
            PackageOption {
                id: PackageTypeId::new(3),
                label: "Large".to_string(),
                max_weight_kg: Decimal::from(30),
            },
        ]
    }

    fn filled_address(store: &mut DraftStore, shipper: bool) {
        let set = |store: &mut DraftStore, field, value: &str| {
            if shipper {
                store.set_shipper_field(sub_id(), field, value.to_string());
            } else {
                store.set_recipient_field(sub_id(), field, value.to_string());
            }
        };
        set(store, AddressField::RecipientName, "Linh Tran");
        set(store, AddressField::Street, "12 Hang Bac");
        set(store, AddressField::City, "Hanoi");
        set(store, AddressField::CountryCode, "VN");
    }

    fn offline_draft() -> DraftStore {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1)], InitPolicy::Offline);
        store.set_note(sub_id(), "fragile".to_string());
        store.set_total_weight_estimate(sub_id(), "25".to_string());
        store.set_package_type(sub_id(), Some(PackageTypeId::new(3)));
        filled_address(&mut store, true);
        filled_address(&mut store, false);
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::BasePrice("90".to_string()),
        );
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::Currency(CurrencyCode::USD),
        );
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::HsCode(Some(HsCodeId::new(8504))),
        );
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::Region("CN".to_string()),
        );
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::Note("adapter".to_string()),
        );
        store
    }

    #[test]
    fn test_online_blank_item_fields_default_to_zero() {
        let body = validate_online(sub_id(), &online_draft()).expect("valid");
        assert_eq!(body.items[1].base_price, Decimal::ZERO);
        assert_eq!(body.items[1].service_fee, Decimal::ZERO);
        assert_eq!(body.items[0].base_price, Decimal::from(1_000_000));
    }

    #[test]
    fn test_online_fees_split_discards_blanks() {
        let body = validate_online(sub_id(), &online_draft()).expect("valid");
        assert_eq!(body.fees, vec!["packing".to_string(), "insurance".to_string()]);
    }

    #[test]
    fn test_online_note_required_after_trim() {
        let mut draft = online_draft();
        draft.note = "   ".to_string();
        let errors = validate_online(sub_id(), &draft).expect_err("invalid");
        assert!(errors.contains("note"));
    }

    #[test]
    fn test_online_numeric_fields_rejected_on_garbage() {
        let mut draft = online_draft();
        draft.shipping_estimate = "soon".to_string();
        draft.items[0].base_price = "1,2".to_string();
        let errors = validate_online(sub_id(), &draft).expect_err("invalid");
        assert!(errors.contains("shippingEstimate"));
        assert!(errors.contains("items[0].basePrice"));
    }

    #[test]
    fn test_offline_valid_draft_assembles_body() {
        let store = offline_draft();
        let draft = store.get(sub_id()).expect("draft");
        let body = validate_offline(sub_id(), draft, &offline_options()).expect("valid");
        assert_eq!(body.package_type, PackageTypeId::new(3));
        assert_eq!(body.items[0].hs_code_id, HsCodeId::new(8504));
        assert_eq!(body.items[0].service_fee, Decimal::from(5));
    }

    #[test]
    fn test_offline_package_type_must_cover_weight() {
        let mut store = offline_draft();
        // medium box no longer covers a 25kg estimate
        store.set_package_type(sub_id(), Some(PackageTypeId::new(2)));
        let draft = store.get(sub_id()).expect("draft");
        let errors = validate_offline(sub_id(), draft, &offline_options()).expect_err("invalid");
        assert!(errors.contains("packageType"));
    }

    #[test]
    fn test_offline_item_fields_each_independently_required() {
        let mut store = offline_draft();
        store.set_item_field(sub_id(), RequestItemId::new(1), ItemEdit::HsCode(None));
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::Region(String::new()),
        );
        let draft = store.get(sub_id()).expect("draft");
        let errors = validate_offline(sub_id(), draft, &offline_options()).expect_err("invalid");
        assert!(errors.contains("items[0].hsCodeId"));
        assert!(errors.contains("items[0].region"));
    }

    #[test]
    fn test_offline_state_required_only_for_us_addresses() {
        let mut store = offline_draft();
        store.set_recipient_field(sub_id(), AddressField::CountryCode, "US".to_string());
        let draft = store.get(sub_id()).expect("draft").clone();
        let errors = validate_offline(sub_id(), &draft, &offline_options()).expect_err("invalid");
        assert!(errors.contains("recipient.state"));
        assert!(!errors.contains("shipper.state"));

        store.set_recipient_field(sub_id(), AddressField::State, "CA".to_string());
        let draft = store.get(sub_id()).expect("draft");
        validate_offline(sub_id(), draft, &offline_options()).expect("valid with state");
    }
}
