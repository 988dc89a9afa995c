//! What the page should do with each control.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use orderdesk_core::{RecordId, ValueObject};

/// Controls the order page knows about.
///
/// `Fulfill` and `CancelOrder` are the platform's own controls; the rest are
/// custom controls linking to workflow endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Release,
    Hold,
    Close,
    Reopen,
    Fulfill,
    CancelOrder,
    PrintBarcodes,
    IntlDocs,
    ProFormaInvoice,
    ViewEdi850,
    PrintLabels,
    ItemData,
    LtlRates,
}

impl ActionId {
    pub const ALL: [ActionId; 13] = [
        ActionId::Release,
        ActionId::Hold,
        ActionId::Close,
        ActionId::Reopen,
        ActionId::Fulfill,
        ActionId::CancelOrder,
        ActionId::PrintBarcodes,
        ActionId::IntlDocs,
        ActionId::ProFormaInvoice,
        ActionId::ViewEdi850,
        ActionId::PrintLabels,
        ActionId::ItemData,
        ActionId::LtlRates,
    ];

    /// Id of the control on the record form.
    pub fn control_id(self) -> &'static str {
        match self {
            ActionId::Release => "custpage_release_SO",
            ActionId::Hold => "custpage_hold_so",
            // Close and Re-Open share a slot; they are never shown together.
            ActionId::Close | ActionId::Reopen => "custpage_cancel_SO",
            ActionId::Fulfill => "process",
            ActionId::CancelOrder => "cancelorder",
            ActionId::PrintBarcodes => "custpage_print_barcodes",
            ActionId::IntlDocs => "custpage_intldocs",
            ActionId::ProFormaInvoice => "custpage_print_pfi",
            ActionId::ViewEdi850 => "custpage_view_edipo",
            ActionId::PrintLabels => "custpage_print_solbl",
            ActionId::ItemData => "custpage_upd_so_price",
            ActionId::LtlRates => "custpage_getltlrates",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionId::Release => "Release",
            ActionId::Hold => "Hold SO",
            ActionId::Close => "Close",
            ActionId::Reopen => "Re-Open SO",
            ActionId::Fulfill => "Fulfill",
            ActionId::CancelOrder => "Cancel Order",
            ActionId::PrintBarcodes => "Print Barcodes",
            ActionId::IntlDocs => "Intl Docs",
            ActionId::ProFormaInvoice => "PFI",
            ActionId::ViewEdi850 => "EDI",
            ActionId::PrintLabels => "Print SO Lbls",
            ActionId::ItemData => "Item Data",
            ActionId::LtlRates => "LTL Rates",
        }
    }
}

impl core::fmt::Display for ActionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.control_id())
    }
}

/// How following the link should behave in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    Popup {
        window_title: String,
        width: u32,
        height: u32,
    },
    SameWindow,
    NewTab,
}

impl Navigation {
    pub fn popup(window_title: impl Into<String>, width: u32, height: u32) -> Self {
        Navigation::Popup {
            window_title: window_title.into(),
            width,
            height,
        }
    }
}

/// Destination of a custom control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    pub url: String,
    pub navigation: Navigation,
}

/// Why a visible control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    ValidationNotPassed,
    StatusNotReleasable,
    InsufficientAllocation,
    ReleaseStatusNotEligible,
    PaymentNotApproved,
    CreditCardTerms,
    CardNotAccepted,
    OvercommittedLines,
    RoutingGuideShipMethod,
    HoldFlagsPresent,
    NotEligibleToHold,
    Edi940Sent,
    NotEligibleToClose,
}

impl BlockReason {
    pub fn message(self) -> &'static str {
        match self {
            BlockReason::ValidationNotPassed => "order validation has not passed",
            BlockReason::StatusNotReleasable => "order status does not allow release",
            BlockReason::InsufficientAllocation => "inventory allocation does not satisfy the fill rule",
            BlockReason::ReleaseStatusNotEligible => "release status does not allow release",
            BlockReason::PaymentNotApproved => "payment has not been approved",
            BlockReason::CreditCardTerms => "credit card terms orders cannot be released",
            BlockReason::CardNotAccepted => "credit card authorisation was not accepted",
            BlockReason::OvercommittedLines => "a line commits more than was ordered",
            BlockReason::RoutingGuideShipMethod => "ship method is a routing guide placeholder",
            BlockReason::HoldFlagsPresent => "a hold reason or hold note is set",
            BlockReason::NotEligibleToHold => "order is not eligible to move back to hold",
            BlockReason::Edi940Sent => "warehouse shipping order (EDI 940) already sent",
            BlockReason::NotEligibleToClose => "order is not eligible to close",
        }
    }
}

impl core::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome for one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDecision {
    pub action: ActionId,
    pub visible: bool,
    pub enabled: bool,
    pub label: String,
    pub target: Option<ActionTarget>,
    pub reason: Option<BlockReason>,
}

impl ActionDecision {
    /// Not offered on this page.
    pub fn hidden(action: ActionId) -> Self {
        Self {
            action,
            visible: false,
            enabled: false,
            label: action.label().to_string(),
            target: None,
            reason: None,
        }
    }

    /// Shown but greyed out, when `reason` is set; otherwise shown and usable.
    pub fn shown(action: ActionId, target: ActionTarget, reason: Option<BlockReason>) -> Self {
        Self {
            action,
            visible: true,
            enabled: reason.is_none(),
            label: action.label().to_string(),
            target: Some(target),
            reason,
        }
    }

    pub fn enabled(action: ActionId, target: ActionTarget) -> Self {
        Self::shown(action, target, None)
    }

    /// A platform control the page either keeps or removes.
    pub fn native(action: ActionId, visible: bool) -> Self {
        Self {
            action,
            visible,
            enabled: visible,
            label: action.label().to_string(),
            target: None,
            reason: None,
        }
    }

    /// Fallback after the decision itself could not be computed.
    pub fn unavailable(action: ActionId) -> Self {
        Self::hidden(action)
    }
}

impl ValueObject for ActionDecision {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Warning,
}

/// Page-level advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    pub message: String,
    pub level: BannerLevel,
}

impl Banner {
    pub fn scheduled_to_close() -> Self {
        Self {
            title: "Scheduled to Close".to_string(),
            message: "This Sales Order is currently scheduled to be closed. A process should run \
                      every 15 minutes. If this order is scheduled and has not been closed after \
                      15 minutes have passed, please contact IT."
                .to_string(),
            level: BannerLevel::Warning,
        }
    }
}

/// Everything the renderer needs for one order page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPlan {
    pub order: RecordId,
    pub decisions: BTreeMap<ActionId, ActionDecision>,
    pub banners: Vec<Banner>,
}

impl ButtonPlan {
    pub fn new(order: RecordId) -> Self {
        Self {
            order,
            decisions: BTreeMap::new(),
            banners: Vec::new(),
        }
    }

    pub fn record(&mut self, decision: ActionDecision) {
        self.decisions.insert(decision.action, decision);
    }

    pub fn get(&self, action: ActionId) -> Option<&ActionDecision> {
        self.decisions.get(&action)
    }

    pub fn is_visible(&self, action: ActionId) -> bool {
        self.get(action).is_some_and(|d| d.visible)
    }

    pub fn is_enabled(&self, action: ActionId) -> bool {
        self.get(action).is_some_and(|d| d.visible && d.enabled)
    }

    pub fn visible_actions(&self) -> impl Iterator<Item = &ActionDecision> {
        self.decisions.values().filter(|d| d.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ActionTarget {
        ActionTarget {
            url: "https://example.test/x".to_string(),
            navigation: Navigation::SameWindow,
        }
    }

    #[test]
    fn blocked_decision_is_visible_but_disabled() {
        let d = ActionDecision::shown(ActionId::Release, target(), Some(BlockReason::CreditCardTerms));
        assert!(d.visible);
        assert!(!d.enabled);
        assert_eq!(d.reason, Some(BlockReason::CreditCardTerms));
    }

    #[test]
    fn unavailable_is_hidden_and_disabled() {
        let d = ActionDecision::unavailable(ActionId::Hold);
        assert!(!d.visible);
        assert!(!d.enabled);
        assert!(d.target.is_none());
    }

    #[test]
    fn close_and_reopen_share_a_control_slot() {
        assert_eq!(ActionId::Close.control_id(), ActionId::Reopen.control_id());
        assert_ne!(ActionId::Close.label(), ActionId::Reopen.label());
    }

    #[test]
    fn plan_serializes_actions_as_snake_case_keys() {
        let mut plan = ButtonPlan::new(RecordId::new(5));
        plan.record(ActionDecision::enabled(ActionId::LtlRates, target()));
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json["decisions"]["ltl_rates"]["enabled"].as_bool().unwrap());
        assert_eq!(json["decisions"]["ltl_rates"]["target"]["navigation"]["kind"], "same_window");
    }
}
