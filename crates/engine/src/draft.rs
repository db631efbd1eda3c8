//! In-memory quotation drafts, keyed by sub-request.
//!
//! The [`DraftStore`] is the single source of truth for in-progress
//! quotation edits. It is session-scoped and lives independently of
//! whatever view is currently mounted, so a collapsed and re-expanded
//! detail panel picks up exactly where the staff member left off, and
//! drafts for different sub-requests coexist without interference.
//!
//! All operations are synchronous, total (an absent key makes a setter a
//! no-op, never a panic), and idempotent under repeated identical input.
//! The store performs no validation and no I/O.

use std::collections::HashMap;

use crosscart_core::{CurrencyCode, HsCodeId, PackageTypeId, RequestItem, RequestItemId, SubRequestId};

/// Default service fee for offline drafts, in percent.
///
/// Offline intake is fee-percent-forward: staff negotiate the fee before
/// prices are known, so new offline item rows start from the house rate
/// rather than zero.
const OFFLINE_SERVICE_FEE_PLACEHOLDER: &str = "5";

/// Which initial-default policy a draft was created under.
///
/// Online drafts are price-forward (service fee starts at zero); offline
/// drafts are fee-percent-forward. The backend's required-field sets differ
/// between the two protocols, so the policies are kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPolicy {
    Online,
    Offline,
}

impl InitPolicy {
    const fn default_service_fee(self) -> &'static str {
        match self {
            Self::Online => "0",
            Self::Offline => OFFLINE_SERVICE_FEE_PLACEHOLDER,
        }
    }
}

/// Per-item quotation inputs.
///
/// Numeric fields hold raw text exactly as typed; parsing and validation
/// happen at submit time, not per keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub request_item_id: RequestItemId,
    pub base_price: String,
    pub service_fee: String,
    pub currency: CurrencyCode,
    pub hs_code_id: Option<HsCodeId>,
    pub region: String,
    pub note: String,
}

impl ItemDraft {
    fn new(request_item_id: RequestItemId, policy: InitPolicy) -> Self {
        Self {
            request_item_id,
            base_price: String::new(),
            service_fee: policy.default_service_fee().to_string(),
            currency: CurrencyCode::VND,
            hs_code_id: None,
            region: String::new(),
            note: String::new(),
        }
    }
}

/// Address inputs for the offline shipper/recipient blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    pub recipient_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country_code: String,
    pub phone: String,
}

/// Fields of an [`AddressDraft`] addressable by a single setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    RecipientName,
    Street,
    City,
    State,
    CountryCode,
    Phone,
}

impl AddressDraft {
    fn set(&mut self, field: AddressField, value: String) {
        match field {
            AddressField::RecipientName => self.recipient_name = value,
            AddressField::Street => self.street = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::CountryCode => self.country_code = value,
            AddressField::Phone => self.phone = value,
        }
    }
}

/// An edit to a single per-item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEdit {
    BasePrice(String),
    ServiceFee(String),
    Currency(CurrencyCode),
    HsCode(Option<HsCodeId>),
    Region(String),
    Note(String),
}

/// Client-only working state for one sub-request's quotation.
///
/// Holds every form input for both protocols; which subset is required is
/// decided by validation at submit time. `expanded` is UI-only but part of
/// the same record because it gates whether the form is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationDraft {
    policy: InitPolicy,
    pub items: Vec<ItemDraft>,
    pub note: String,
    pub shipping_estimate: String,
    pub total_price_before_exchange: String,
    pub fees_text: String,
    pub package_type: Option<PackageTypeId>,
    pub total_weight_estimate: String,
    pub shipper: AddressDraft,
    pub recipient: AddressDraft,
    pub expanded: bool,
}

impl QuotationDraft {
    fn new(items: &[RequestItem], policy: InitPolicy) -> Self {
        Self {
            policy,
            items: items
                .iter()
                .map(|item| ItemDraft::new(item.id, policy))
                .collect(),
            note: String::new(),
            shipping_estimate: String::new(),
            total_price_before_exchange: String::new(),
            fees_text: String::new(),
            package_type: None,
            total_weight_estimate: String::new(),
            shipper: AddressDraft::default(),
            recipient: AddressDraft::default(),
            expanded: false,
        }
    }

    /// The policy this draft was initialized under.
    #[must_use]
    pub const fn policy(&self) -> InitPolicy {
        self.policy
    }

    /// Ids of the items currently in the draft, in order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<RequestItemId> {
        self.items.iter().map(|i| i.request_item_id).collect()
    }

    fn item_mut(&mut self, item_id: RequestItemId) -> Option<&mut ItemDraft> {
        self.items
            .iter_mut()
            .find(|i| i.request_item_id == item_id)
    }

    /// Re-derive the item list from the sub-request's current items.
    ///
    /// Retained items keep their edits; new items get fresh defaults;
    /// removed items are dropped. The resulting order follows `items`.
    fn sync_items(&mut self, items: &[RequestItem]) {
        let policy = self.policy;
        let mut previous: HashMap<RequestItemId, ItemDraft> = self
            .items
            .drain(..)
            .map(|draft| (draft.request_item_id, draft))
            .collect();
        self.items = items
            .iter()
            .map(|item| {
                previous
                    .remove(&item.id)
                    .unwrap_or_else(|| ItemDraft::new(item.id, policy))
            })
            .collect();
    }
}

/// Session-scoped store of quotation drafts, keyed by sub-request id.
#[derive(Debug, Default)]
pub struct DraftStore {
    drafts: HashMap<SubRequestId, QuotationDraft>,
}

impl DraftStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the draft for a sub-request, if one exists.
    #[must_use]
    pub fn get(&self, sub_request_id: SubRequestId) -> Option<&QuotationDraft> {
        self.drafts.get(&sub_request_id)
    }

    /// Create a draft from the sub-request's current items.
    ///
    /// No-op if a draft already exists, so re-rendering a panel never
    /// discards in-progress edits.
    pub fn initialize(
        &mut self,
        sub_request_id: SubRequestId,
        items: &[RequestItem],
        policy: InitPolicy,
    ) {
        self.drafts
            .entry(sub_request_id)
            .or_insert_with(|| QuotationDraft::new(items, policy));
    }

    /// Re-derive a draft's item list after the sub-request's item set changed.
    ///
    /// No-op if no draft exists yet; the next [`DraftStore::initialize`]
    /// will see the current items anyway.
    pub fn sync_items(&mut self, sub_request_id: SubRequestId, items: &[RequestItem]) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.sync_items(items);
        }
    }

    /// Set the group-level note.
    pub fn set_note(&mut self, sub_request_id: SubRequestId, note: String) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.note = note;
        }
    }

    /// Set the shipping estimate input.
    pub fn set_shipping_estimate(&mut self, sub_request_id: SubRequestId, value: String) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.shipping_estimate = value;
        }
    }

    /// Set the pre-computed total-before-exchange input (online protocol).
    pub fn set_total_price_before_exchange(
        &mut self,
        sub_request_id: SubRequestId,
        value: String,
    ) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.total_price_before_exchange = value;
        }
    }

    /// Set the free-text fee list input (online protocol).
    pub fn set_fees_text(&mut self, sub_request_id: SubRequestId, value: String) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.fees_text = value;
        }
    }

    /// Set the selected package type (offline protocol).
    pub fn set_package_type(
        &mut self,
        sub_request_id: SubRequestId,
        package_type: Option<PackageTypeId>,
    ) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.package_type = package_type;
        }
    }

    /// Set the total weight estimate input (offline protocol).
    pub fn set_total_weight_estimate(&mut self, sub_request_id: SubRequestId, value: String) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.total_weight_estimate = value;
        }
    }

    /// Set one field of the shipper address block (offline protocol).
    pub fn set_shipper_field(
        &mut self,
        sub_request_id: SubRequestId,
        field: AddressField,
        value: String,
    ) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.shipper.set(field, value);
        }
    }

    /// Set one field of the recipient address block (offline protocol).
    pub fn set_recipient_field(
        &mut self,
        sub_request_id: SubRequestId,
        field: AddressField,
        value: String,
    ) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.recipient.set(field, value);
        }
    }

    /// Set one per-item field.
    ///
    /// No-op if the draft or the item is unknown.
    pub fn set_item_field(
        &mut self,
        sub_request_id: SubRequestId,
        item_id: RequestItemId,
        edit: ItemEdit,
    ) {
        let Some(draft) = self.drafts.get_mut(&sub_request_id) else {
            return;
        };
        let Some(item) = draft.item_mut(item_id) else {
            return;
        };
        match edit {
            ItemEdit::BasePrice(value) => item.base_price = value,
            ItemEdit::ServiceFee(value) => item.service_fee = value,
            ItemEdit::Currency(currency) => item.currency = currency,
            ItemEdit::HsCode(hs_code_id) => item.hs_code_id = hs_code_id,
            ItemEdit::Region(value) => item.region = value,
            ItemEdit::Note(value) => item.note = value,
        }
    }

    /// Flip whether the quotation form is mounted.
    pub fn toggle_expanded(&mut self, sub_request_id: SubRequestId) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.expanded = !draft.expanded;
        }
    }

    /// Mount or unmount the quotation form explicitly.
    pub fn set_expanded(&mut self, sub_request_id: SubRequestId, expanded: bool) {
        if let Some(draft) = self.drafts.get_mut(&sub_request_id) {
            draft.expanded = expanded;
        }
    }

    /// Clear a draft back to absent, forcing re-initialization on next view.
    pub fn reset(&mut self, sub_request_id: SubRequestId) {
        self.drafts.remove(&sub_request_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosscart_core::RequestItem;

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

    #[test]
    fn test_initialize_is_noop_when_draft_exists() {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1)], InitPolicy::Online);
        store.set_note(sub_id(), "keep me".to_string());

        store.initialize(sub_id(), &[item(1), item(2)], InitPolicy::Online);

        let draft = store.get(sub_id()).expect("draft exists");
        assert_eq!(draft.note, "keep me");
        assert_eq!(draft.item_ids(), vec![RequestItemId::new(1)]);
    }

    #[test]
    fn test_initialize_defaults_differ_by_policy() {
        let mut store = DraftStore::new();
        store.initialize(SubRequestId::new(1), &[item(1)], InitPolicy::Online);
        store.initialize(SubRequestId::new(2), &[item(1)], InitPolicy::Offline);

        let online = store.get(SubRequestId::new(1)).expect("online draft");
        let offline = store.get(SubRequestId::new(2)).expect("offline draft");
        assert_eq!(online.items[0].service_fee, "0");
        assert_eq!(offline.items[0].service_fee, "5");
        assert_eq!(online.items[0].currency, CurrencyCode::VND);
        assert_eq!(offline.items[0].currency, CurrencyCode::VND);
    }

    #[test]
    fn test_sync_items_keeps_edits_for_retained_ids() {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1), item(2)], InitPolicy::Online);
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::BasePrice("120000".to_string()),
        );

        // item 2 leaves the group, item 3 joins
        store.sync_items(sub_id(), &[item(1), item(3)]);

        let draft = store.get(sub_id()).expect("draft exists");
        assert_eq!(
            draft.item_ids(),
            vec![RequestItemId::new(1), RequestItemId::new(3)]
        );
        assert_eq!(draft.items[0].base_price, "120000");
        assert_eq!(draft.items[1].base_price, "");
    }

    #[test]
    fn test_setters_are_total_on_absent_draft() {
        let mut store = DraftStore::new();
        store.set_note(sub_id(), "ignored".to_string());
        store.set_item_field(
            sub_id(),
            RequestItemId::new(1),
            ItemEdit::Note("ignored".to_string()),
        );
        store.toggle_expanded(sub_id());
        store.reset(sub_id());
        assert!(store.get(sub_id()).is_none());
    }

    #[test]
    fn test_set_item_field_unknown_item_is_noop() {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1)], InitPolicy::Online);
        store.set_item_field(
            sub_id(),
            RequestItemId::new(99),
            ItemEdit::BasePrice("1".to_string()),
        );
        let draft = store.get(sub_id()).expect("draft exists");
        assert_eq!(draft.items[0].base_price, "");
    }

    #[test]
    fn test_reset_clears_back_to_absent() {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1)], InitPolicy::Online);
        store.reset(sub_id());
        assert!(store.get(sub_id()).is_none());

        // next view re-initializes from the current item set
        store.initialize(sub_id(), &[item(2)], InitPolicy::Online);
        let draft = store.get(sub_id()).expect("draft exists");
        assert_eq!(draft.item_ids(), vec![RequestItemId::new(2)]);
    }

    #[test]
    fn test_toggle_expanded_flips_state() {
        let mut store = DraftStore::new();
        store.initialize(sub_id(), &[item(1)], InitPolicy::Online);
        assert!(!store.get(sub_id()).expect("draft").expanded);
        store.toggle_expanded(sub_id());
        assert!(store.get(sub_id()).expect("draft").expanded);
        store.toggle_expanded(sub_id());
        assert!(!store.get(sub_id()).expect("draft").expanded);
    }
}
