//! Read-only view of a sales order as loaded for one page render.

use serde::{Deserialize, Serialize};

use orderdesk_auth::Role;
use orderdesk_core::{
    CustomerId, DomainError, DomainResult, Entity, FormId, LocationId, PaymentMethodId, RecordId,
    ShipMethodId, TermsId, ValueObject, WorkOrderId,
};

/// How the record page is being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    #[default]
    View,
    Edit,
    Create,
    Other,
}

impl PageMode {
    /// Lifecycle actions only make sense on a saved record.
    pub fn is_view_or_edit(self) -> bool {
        matches!(self, PageMode::View | PageMode::Edit)
    }
}

/// Order status as the platform labels it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    PendingApproval,
    PendingFulfillment,
    PartiallyFulfilled,
    PendingBillingPartiallyFulfilled,
    PendingBilling,
    Billed,
    Closed,
    Other(String),
}

impl OrderStatus {
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::PendingApproval => "Pending Approval",
            OrderStatus::PendingFulfillment => "Pending Fulfillment",
            OrderStatus::PartiallyFulfilled => "Partially Fulfilled",
            OrderStatus::PendingBillingPartiallyFulfilled => "Pending Billing/Partially Fulfilled",
            OrderStatus::PendingBilling => "Pending Billing",
            OrderStatus::Billed => "Billed",
            OrderStatus::Closed => "Closed",
            OrderStatus::Other(label) => label,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, OrderStatus::Closed)
    }

    /// Statuses from which warehouse release is allowed.
    pub fn is_releasable(&self) -> bool {
        matches!(
            self,
            OrderStatus::PendingFulfillment
                | OrderStatus::PendingBillingPartiallyFulfilled
                | OrderStatus::PartiallyFulfilled
        )
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        let known = match value.trim() {
            "Pending Approval" => Some(OrderStatus::PendingApproval),
            "Pending Fulfillment" => Some(OrderStatus::PendingFulfillment),
            "Partially Fulfilled" => Some(OrderStatus::PartiallyFulfilled),
            "Pending Billing/Partially Fulfilled" => {
                Some(OrderStatus::PendingBillingPartiallyFulfilled)
            }
            "Pending Billing" => Some(OrderStatus::PendingBilling),
            "Billed" => Some(OrderStatus::Billed),
            "Closed" => Some(OrderStatus::Closed),
            _ => None,
        };
        known.unwrap_or(OrderStatus::Other(value))
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Warehouse release state: hold=1, scheduled=2, released=3, rollback complete=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum ReleaseStatus {
    Hold,
    Scheduled,
    Released,
    RollbackComplete,
    Other(u32),
}

impl ReleaseStatus {
    pub fn code(self) -> u32 {
        match self {
            ReleaseStatus::Hold => 1,
            ReleaseStatus::Scheduled => 2,
            ReleaseStatus::Released => 3,
            ReleaseStatus::RollbackComplete => 7,
            ReleaseStatus::Other(code) => code,
        }
    }
}

impl From<u32> for ReleaseStatus {
    fn from(code: u32) -> Self {
        match code {
            1 => ReleaseStatus::Hold,
            2 => ReleaseStatus::Scheduled,
            3 => ReleaseStatus::Released,
            7 => ReleaseStatus::RollbackComplete,
            other => ReleaseStatus::Other(other),
        }
    }
}

impl From<ReleaseStatus> for u32 {
    fn from(value: ReleaseStatus) -> Self {
        value.code()
    }
}

/// Order validation outcome. Only `Passed` (3) allows release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum ValidationStatus {
    #[default]
    NotValidated,
    Passed,
    Other(u32),
}

impl From<Option<u32>> for ValidationStatus {
    fn from(code: Option<u32>) -> Self {
        match code {
            None => ValidationStatus::NotValidated,
            Some(3) => ValidationStatus::Passed,
            Some(other) => ValidationStatus::Other(other),
        }
    }
}

impl From<ValidationStatus> for Option<u32> {
    fn from(value: ValidationStatus) -> Self {
        match value {
            ValidationStatus::NotValidated => None,
            ValidationStatus::Passed => Some(3),
            ValidationStatus::Other(code) => Some(code),
        }
    }
}

/// Inventory allocation against the order lines: pending=1, partial=2, full=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum AllocationStatus {
    #[default]
    Unset,
    Pending,
    Partial,
    Full,
    Other(u32),
}

impl From<Option<u32>> for AllocationStatus {
    fn from(code: Option<u32>) -> Self {
        match code {
            None => AllocationStatus::Unset,
            Some(1) => AllocationStatus::Pending,
            Some(2) => AllocationStatus::Partial,
            Some(3) => AllocationStatus::Full,
            Some(other) => AllocationStatus::Other(other),
        }
    }
}

impl From<AllocationStatus> for Option<u32> {
    fn from(value: AllocationStatus) -> Self {
        match value {
            AllocationStatus::Unset => None,
            AllocationStatus::Pending => Some(1),
            AllocationStatus::Partial => Some(2),
            AllocationStatus::Full => Some(3),
            AllocationStatus::Other(code) => Some(code),
        }
    }
}

/// Warehouse process handling the order: task picking=1, bulk=2, DSDC=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum FulfillmentPath {
    #[default]
    Unset,
    TaskPicking,
    BulkFulfillment,
    Dsdc,
    Other(u32),
}

impl FulfillmentPath {
    /// Paths fulfilled by a warehouse process instead of the native fulfill control.
    pub fn is_warehouse_managed(self) -> bool {
        matches!(
            self,
            FulfillmentPath::TaskPicking | FulfillmentPath::BulkFulfillment | FulfillmentPath::Dsdc
        )
    }
}

impl From<Option<u32>> for FulfillmentPath {
    fn from(code: Option<u32>) -> Self {
        match code {
            None => FulfillmentPath::Unset,
            Some(1) => FulfillmentPath::TaskPicking,
            Some(2) => FulfillmentPath::BulkFulfillment,
            Some(3) => FulfillmentPath::Dsdc,
            Some(other) => FulfillmentPath::Other(other),
        }
    }
}

impl From<FulfillmentPath> for Option<u32> {
    fn from(value: FulfillmentPath) -> Self {
        match value {
            FulfillmentPath::Unset => None,
            FulfillmentPath::TaskPicking => Some(1),
            FulfillmentPath::BulkFulfillment => Some(2),
            FulfillmentPath::Dsdc => Some(3),
            FulfillmentPath::Other(code) => Some(code),
        }
    }
}

/// Result of the last card authorisation on the order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardResult {
    Accept,
    Other(String),
}

impl CardResult {
    /// A blank result means no authorisation was attempted.
    pub fn is_accepted_or_blank(&self) -> bool {
        match self {
            CardResult::Accept => true,
            CardResult::Other(text) => text.is_empty(),
        }
    }
}

impl From<String> for CardResult {
    fn from(value: String) -> Self {
        if value == "ACCEPT" {
            CardResult::Accept
        } else {
            CardResult::Other(value)
        }
    }
}

impl From<CardResult> for String {
    fn from(value: CardResult) -> Self {
        match value {
            CardResult::Accept => "ACCEPT".to_string(),
            CardResult::Other(text) => text,
        }
    }
}

/// One item line of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity_committed: i64,
    pub quantity_ordered: i64,
    /// Work order created for this line, if any.
    #[serde(default)]
    pub work_order: Option<WorkOrderId>,
}

impl OrderLine {
    pub fn new(quantity_committed: i64, quantity_ordered: i64) -> Self {
        Self {
            quantity_committed,
            quantity_ordered,
            work_order: None,
        }
    }

    pub fn is_overcommitted(&self) -> bool {
        self.quantity_committed > self.quantity_ordered
    }
}

impl ValueObject for OrderLine {}

fn default_record_type() -> String {
    "salesorder".to_string()
}

/// Field values of one sales order plus the viewing user's role.
///
/// Built by the caller once per page render and never mutated during
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: RecordId,
    pub transaction_number: String,
    #[serde(default = "default_record_type")]
    pub record_type: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub user_role: Role,

    pub customer: CustomerId,
    /// Display name of the customer.
    #[serde(default)]
    pub customer_name: String,
    /// Customer entity id (short code) as printed on shipping documents.
    #[serde(default)]
    pub customer_entity_id: String,

    pub release_status: ReleaseStatus,
    #[serde(default)]
    pub validation_status: ValidationStatus,
    #[serde(default)]
    pub allocation_status: AllocationStatus,
    /// Fill/release rule copied from the customer; empty or 1 means "ship complete".
    #[serde(default)]
    pub fill_rule: Option<u32>,
    #[serde(default)]
    pub fulfillment_path: FulfillmentPath,

    #[serde(default)]
    pub payment_method: Option<PaymentMethodId>,
    #[serde(default)]
    pub payment_approved: bool,
    #[serde(default)]
    pub card_result: Option<CardResult>,
    #[serde(default)]
    pub terms: Option<TermsId>,
    #[serde(default)]
    pub ship_method: Option<ShipMethodId>,

    #[serde(default)]
    pub hold_reason: String,
    #[serde(default)]
    pub hold_note: String,
    #[serde(default)]
    pub edi940_sent: bool,
    #[serde(default)]
    pub close_reason: String,
    #[serde(default)]
    pub ship_country: String,

    #[serde(default)]
    pub form: Option<FormId>,
    #[serde(default)]
    pub location: Option<LocationId>,
    #[serde(default)]
    pub order_source: Option<u32>,
    /// Customer purchase order number.
    #[serde(default)]
    pub po_number: String,

    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

impl OrderSnapshot {
    /// A pending-approval order on hold with no lines and every optional field empty.
    pub fn new(id: RecordId, transaction_number: impl Into<String>, customer: CustomerId) -> Self {
        Self {
            id,
            transaction_number: transaction_number.into(),
            record_type: default_record_type(),
            status: OrderStatus::PendingApproval,
            user_role: Role::Other,
            customer,
            customer_name: String::new(),
            customer_entity_id: String::new(),
            release_status: ReleaseStatus::Hold,
            validation_status: ValidationStatus::NotValidated,
            allocation_status: AllocationStatus::Unset,
            fill_rule: None,
            fulfillment_path: FulfillmentPath::Unset,
            payment_method: None,
            payment_approved: false,
            card_result: None,
            terms: None,
            ship_method: None,
            hold_reason: String::new(),
            hold_note: String::new(),
            edi940_sent: false,
            close_reason: String::new(),
            ship_country: String::new(),
            form: None,
            location: None,
            order_source: None,
            po_number: String::new(),
            lines: Vec::new(),
        }
    }

    pub fn has_overcommitted_line(&self) -> bool {
        self.lines.iter().any(OrderLine::is_overcommitted)
    }

    pub fn has_hold_flags(&self) -> bool {
        !self.hold_reason.is_empty() || !self.hold_note.is_empty()
    }

    pub fn is_scheduled_to_close(&self) -> bool {
        !self.close_reason.is_empty() && !self.status.is_closed()
    }

    /// Reject field values no rule can interpret.
    pub fn validate(&self) -> DomainResult<()> {
        if self.transaction_number.trim().is_empty() {
            return Err(DomainError::validation("transaction_number must not be empty"));
        }
        if self.record_type.trim().is_empty() {
            return Err(DomainError::validation("record_type must not be empty"));
        }
        for (idx, line) in self.lines.iter().enumerate() {
            if line.quantity_ordered < 0 || line.quantity_committed < 0 {
                return Err(DomainError::validation(format!(
                    "line {} has a negative quantity",
                    idx + 1
                )));
            }
        }
        Ok(())
    }
}

impl Entity for OrderSnapshot {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ValueObject for OrderSnapshot {}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> OrderSnapshot {
        OrderSnapshot::new(RecordId::new(101), "SO-101", CustomerId::new(42))
    }

    #[test]
    fn overcommitted_when_any_line_commits_more_than_ordered() {
        let mut order = order();
        order.lines = vec![OrderLine::new(5, 5), OrderLine::new(3, 4)];
        assert!(!order.has_overcommitted_line());

        order.lines.push(OrderLine::new(10, 5));
        assert!(order.has_overcommitted_line());
    }

    #[test]
    fn status_parses_platform_labels() {
        let status: OrderStatus = "Pending Billing/Partially Fulfilled".to_string().into();
        assert_eq!(status, OrderStatus::PendingBillingPartiallyFulfilled);
        assert!(status.is_releasable());

        let unknown: OrderStatus = "Cancelled".to_string().into();
        assert_eq!(unknown, OrderStatus::Other("Cancelled".to_string()));
        assert!(!unknown.is_releasable());
    }

    #[test]
    fn coded_fields_keep_unknown_codes() {
        assert_eq!(ReleaseStatus::from(9), ReleaseStatus::Other(9));
        assert_eq!(ReleaseStatus::from(7), ReleaseStatus::RollbackComplete);
        assert_eq!(ValidationStatus::from(Some(3)), ValidationStatus::Passed);
        assert_eq!(ValidationStatus::from(None), ValidationStatus::NotValidated);
        assert_eq!(AllocationStatus::from(Some(2)), AllocationStatus::Partial);
        assert_eq!(FulfillmentPath::from(Some(3)), FulfillmentPath::Dsdc);
    }

    #[test]
    fn card_result_blank_counts_as_not_attempted() {
        assert!(CardResult::from("ACCEPT".to_string()).is_accepted_or_blank());
        assert!(CardResult::from(String::new()).is_accepted_or_blank());
        assert!(!CardResult::from(" ".to_string()).is_accepted_or_blank());
        assert!(!CardResult::from("REJECT".to_string()).is_accepted_or_blank());
        assert_eq!(
            CardResult::from("accept".to_string()),
            CardResult::Other("accept".to_string())
        );
    }

    #[test]
    fn deserializes_minimal_json_with_defaults() {
        let json = r#"{
            "id": 7,
            "transaction_number": "SO-7",
            "status": "Pending Fulfillment",
            "customer": 3055,
            "release_status": 1
        }"#;
        let snapshot: OrderSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, OrderStatus::PendingFulfillment);
        assert_eq!(snapshot.release_status, ReleaseStatus::Hold);
        assert_eq!(snapshot.record_type, "salesorder");
        assert_eq!(snapshot.user_role, Role::Other);
        assert_eq!(snapshot.validation_status, ValidationStatus::NotValidated);
        assert!(snapshot.lines.is_empty());
    }

    #[test]
    fn validate_rejects_negative_quantities() {
        let mut order = order();
        order.lines = vec![OrderLine::new(1, 1), OrderLine::new(-1, 2)];
        match order.validate() {
            Err(DomainError::Validation(msg)) if msg.contains("line 2") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn scheduled_to_close_requires_reason_and_open_order() {
        let mut order = order();
        assert!(!order.is_scheduled_to_close());

        order.close_reason = "Customer cancelled".to_string();
        assert!(order.is_scheduled_to_close());

        order.close_reason = " ".to_string();
        assert!(order.is_scheduled_to_close());

        order.status = OrderStatus::Closed;
        assert!(!order.is_scheduled_to_close());
    }
}
