//! Query ports: everything the rules need from the platform beyond the
//! order's own fields.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, PaymentMethodId, RecordId, TemplateId, WorkOrderId};

use crate::error::LookupError;

/// Saved searches that decide whether an order may change lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedSearch {
    /// Released orders that can still be pulled back to hold.
    OrdersOkToHold,
    /// Open orders that can be cancelled and closed.
    OrdersOkToCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    SavedSearch(SavedSearch),
    PaymentMethod,
    CustomerPreferences,
    WorkOrder,
}

impl core::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LookupKind::SavedSearch(SavedSearch::OrdersOkToHold) => f.write_str("orders-ok-to-hold search"),
            LookupKind::SavedSearch(SavedSearch::OrdersOkToCancel) => {
                f.write_str("orders-ok-to-cancel search")
            }
            LookupKind::PaymentMethod => f.write_str("payment method"),
            LookupKind::CustomerPreferences => f.write_str("customer preferences"),
            LookupKind::WorkOrder => f.write_str("work order"),
        }
    }
}

/// Work order linked from an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderSummary {
    pub transaction_number: String,
    /// Platform status code; `A` means not yet released to production.
    pub status_code: String,
}

impl WorkOrderSummary {
    pub fn is_released(&self) -> bool {
        self.status_code.trim() != "A"
    }
}

/// Read-only access to platform searches.
///
/// Implementations perform blocking calls; the rules call each method at
/// most once per evaluation and never retry.
pub trait SearchPort {
    /// Whether `search` returns at least one row for `order`.
    fn has_eligible_row(&self, search: SavedSearch, order: RecordId) -> Result<bool, LookupError>;

    /// Whether the payment method is a card-type method.
    fn is_card_payment_method(&self, method: PaymentMethodId) -> Result<bool, LookupError>;

    /// Sales-order label template configured on the customer, if any.
    fn customer_label_template(&self, customer: CustomerId) -> Result<Option<TemplateId>, LookupError>;

    fn work_order(&self, id: WorkOrderId) -> Result<Option<WorkOrderSummary>, LookupError>;
}

/// Fixed answers for tests and offline evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemorySearchPort {
    pub ok_to_hold: BTreeSet<RecordId>,
    pub ok_to_cancel: BTreeSet<RecordId>,
    pub card_payment_methods: BTreeSet<PaymentMethodId>,
    pub label_templates: BTreeMap<CustomerId, TemplateId>,
    pub work_orders: BTreeMap<WorkOrderId, WorkOrderSummary>,
}

impl InMemorySearchPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eligible(mut self, search: SavedSearch, order: RecordId) -> Self {
        match search {
            SavedSearch::OrdersOkToHold => self.ok_to_hold.insert(order),
            SavedSearch::OrdersOkToCancel => self.ok_to_cancel.insert(order),
        };
        self
    }

    pub fn with_card_method(mut self, method: PaymentMethodId) -> Self {
        self.card_payment_methods.insert(method);
        self
    }

    pub fn with_label_template(mut self, customer: CustomerId, template: TemplateId) -> Self {
        self.label_templates.insert(customer, template);
        self
    }

    pub fn with_work_order(mut self, id: WorkOrderId, summary: WorkOrderSummary) -> Self {
        self.work_orders.insert(id, summary);
        self
    }
}

impl SearchPort for InMemorySearchPort {
    fn has_eligible_row(&self, search: SavedSearch, order: RecordId) -> Result<bool, LookupError> {
        let rows = match search {
            SavedSearch::OrdersOkToHold => &self.ok_to_hold,
            SavedSearch::OrdersOkToCancel => &self.ok_to_cancel,
        };
        Ok(rows.contains(&order))
    }

    fn is_card_payment_method(&self, method: PaymentMethodId) -> Result<bool, LookupError> {
        Ok(self.card_payment_methods.contains(&method))
    }

    fn customer_label_template(&self, customer: CustomerId) -> Result<Option<TemplateId>, LookupError> {
        Ok(self.label_templates.get(&customer).copied())
    }

    fn work_order(&self, id: WorkOrderId) -> Result<Option<WorkOrderSummary>, LookupError> {
        Ok(self.work_orders.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_port_answers_from_its_sets() {
        let order = RecordId::new(9);
        let port = InMemorySearchPort::new()
            .with_eligible(SavedSearch::OrdersOkToHold, order)
            .with_card_method(PaymentMethodId::new(4));

        assert!(port.has_eligible_row(SavedSearch::OrdersOkToHold, order).unwrap());
        assert!(!port.has_eligible_row(SavedSearch::OrdersOkToCancel, order).unwrap());
        assert!(port.is_card_payment_method(PaymentMethodId::new(4)).unwrap());
        assert!(!port.is_card_payment_method(PaymentMethodId::new(5)).unwrap());
        assert_eq!(port.customer_label_template(CustomerId::new(1)).unwrap(), None);
    }

    #[test]
    fn fixture_loads_from_json() {
        let port: InMemorySearchPort = serde_json::from_str(
            r#"{
                "ok_to_cancel": [12],
                "label_templates": { "3055": 88 },
                "work_orders": { "501": { "transaction_number": "WO-501", "status_code": "A" } }
            }"#,
        )
        .unwrap();
        assert!(port.has_eligible_row(SavedSearch::OrdersOkToCancel, RecordId::new(12)).unwrap());
        assert_eq!(
            port.customer_label_template(CustomerId::new(3055)).unwrap(),
            Some(TemplateId::new(88))
        );
        let wo = port.work_order(WorkOrderId::new(501)).unwrap().unwrap();
        assert!(!wo.is_released());
    }

    #[test]
    fn lookup_kind_names_the_search() {
        let err = LookupError::unavailable(
            LookupKind::SavedSearch(SavedSearch::OrdersOkToHold),
            "timeout",
        );
        assert_eq!(err.to_string(), "orders-ok-to-hold search lookup unavailable: timeout");
    }
}
