//! Release preconditions as an ordered rule table.
//!
//! Each rule is a predicate over [`ReleaseFacts`] paired with the reason
//! surfaced when it fails. Rules are checked in table order and evaluation
//! stops at the first failure, so the order of [`RELEASE_RULES`] is the
//! order in which problems are reported to the user.

use crate::config::EligibilityConfig;
use crate::decision::BlockReason;
use crate::snapshot::{AllocationStatus, OrderSnapshot, ReleaseStatus, ValidationStatus};

/// Everything a release rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseFacts<'a> {
    pub order: &'a OrderSnapshot,
    pub config: &'a EligibilityConfig,
    /// The order's payment method is a card-type method. False when the
    /// order has no payment method.
    pub card_payment: bool,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub reason: BlockReason,
    pub holds: fn(&ReleaseFacts<'_>) -> bool,
}

impl core::fmt::Debug for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("reason", &self.reason)
            .finish()
    }
}

pub const RELEASE_RULES: [Rule; 10] = [
    Rule {
        name: "validation_passed",
        reason: BlockReason::ValidationNotPassed,
        holds: validation_passed,
    },
    Rule {
        name: "status_releasable",
        reason: BlockReason::StatusNotReleasable,
        holds: status_releasable,
    },
    Rule {
        name: "allocation_sufficient",
        reason: BlockReason::InsufficientAllocation,
        holds: allocation_sufficient,
    },
    Rule {
        name: "release_status_eligible",
        reason: BlockReason::ReleaseStatusNotEligible,
        holds: release_status_eligible,
    },
    Rule {
        name: "payment_acceptable",
        reason: BlockReason::PaymentNotApproved,
        holds: payment_acceptable,
    },
    Rule {
        name: "terms_not_credit_card",
        reason: BlockReason::CreditCardTerms,
        holds: terms_not_credit_card,
    },
    Rule {
        name: "card_accepted",
        reason: BlockReason::CardNotAccepted,
        holds: card_accepted,
    },
    Rule {
        name: "no_overcommitted_lines",
        reason: BlockReason::OvercommittedLines,
        holds: no_overcommitted_lines,
    },
    Rule {
        name: "ship_method_not_routing_guide",
        reason: BlockReason::RoutingGuideShipMethod,
        holds: ship_method_not_routing_guide,
    },
    Rule {
        name: "no_hold_flags",
        reason: BlockReason::HoldFlagsPresent,
        holds: no_hold_flags,
    },
];

/// Reason of the first rule that does not hold, if any.
pub fn first_failure(rules: &[Rule], facts: &ReleaseFacts<'_>) -> Option<BlockReason> {
    rules.iter().find(|rule| !(rule.holds)(facts)).map(|rule| {
        tracing::debug!(order_id = %facts.order.id, rule = rule.name, "release rule failed");
        rule.reason
    })
}

/// Validation status with per-customer overrides applied.
pub fn effective_validation(order: &OrderSnapshot, config: &EligibilityConfig) -> ValidationStatus {
    if config.forces_validation_pass(order.customer) {
        ValidationStatus::Passed
    } else {
        order.validation_status
    }
}

fn validation_passed(facts: &ReleaseFacts<'_>) -> bool {
    effective_validation(facts.order, facts.config) == ValidationStatus::Passed
}

fn status_releasable(facts: &ReleaseFacts<'_>) -> bool {
    facts.order.status.is_releasable()
}

fn allocation_sufficient(facts: &ReleaseFacts<'_>) -> bool {
    let allocation = facts.order.allocation_status;
    match facts.order.fill_rule {
        None | Some(1) => allocation == AllocationStatus::Full,
        Some(_) => matches!(allocation, AllocationStatus::Full | AllocationStatus::Partial),
    }
}

fn release_status_eligible(facts: &ReleaseFacts<'_>) -> bool {
    matches!(
        facts.order.release_status,
        ReleaseStatus::Hold | ReleaseStatus::RollbackComplete | ReleaseStatus::Scheduled
    )
}

fn payment_acceptable(facts: &ReleaseFacts<'_>) -> bool {
    facts.order.payment_approved || facts.order.payment_method.is_none()
}

fn terms_not_credit_card(facts: &ReleaseFacts<'_>) -> bool {
    facts.order.terms != Some(facts.config.credit_card_terms)
}

fn card_accepted(facts: &ReleaseFacts<'_>) -> bool {
    if facts.order.payment_method.is_none() || !facts.card_payment {
        return true;
    }
    facts
        .order
        .card_result
        .as_ref()
        .is_none_or(|result| result.is_accepted_or_blank())
}

fn no_overcommitted_lines(facts: &ReleaseFacts<'_>) -> bool {
    !facts.order.has_overcommitted_line()
}

fn ship_method_not_routing_guide(facts: &ReleaseFacts<'_>) -> bool {
    facts
        .order
        .ship_method
        .is_none_or(|method| !facts.config.is_routing_guide(method))
}

fn no_hold_flags(facts: &ReleaseFacts<'_>) -> bool {
    !facts.order.has_hold_flags()
}
