//! End-to-end decisions for representative order pages.

use orderdesk_auth::Role;
use orderdesk_core::{CustomerId, RecordId, ShipMethodId, TermsId};
use orderdesk_sales::{
    evaluate, ActionId, AllocationStatus, BlockReason, EligibilityConfig, InMemorySearchPort,
    OrderActionEligibility, OrderLine, OrderSnapshot, OrderStatus, PageMode, ReleaseStatus,
    SavedSearch, ValidationStatus,
};
use proptest::prelude::*;

const ORDER: RecordId = RecordId::new(52_118);

/// Pending fulfillment, validated, fully allocated, on hold, no payment
/// method, net terms, ordinary ship method, no hold flags.
fn scenario_one() -> OrderSnapshot {
    let mut order = OrderSnapshot::new(ORDER, "SO-52118", CustomerId::new(881));
    order.status = OrderStatus::PendingFulfillment;
    order.validation_status = ValidationStatus::Passed;
    order.allocation_status = AllocationStatus::Full;
    order.fill_rule = Some(1);
    order.release_status = ReleaseStatus::Hold;
    order.payment_method = None;
    order.terms = Some(TermsId::new(30));
    order.ship_method = Some(ShipMethodId::new(999));
    order.lines = vec![OrderLine::new(5, 5), OrderLine::new(0, 12)];
    order
}

fn release(order: &OrderSnapshot, port: &InMemorySearchPort) -> orderdesk_sales::ActionDecision {
    let config = EligibilityConfig::default();
    OrderActionEligibility::new(&config, port)
        .can_release(order, PageMode::View)
        .unwrap()
}

#[test]
fn scenario_1_releasable_order_is_enabled() {
    let decision = release(&scenario_one(), &InMemorySearchPort::new());
    assert!(decision.visible);
    assert!(decision.enabled);
    assert_eq!(decision.reason, None);
}

#[test]
fn scenario_2_credit_card_terms_disable_release() {
    let mut order = scenario_one();
    order.terms = Some(TermsId::new(50));
    let decision = release(&order, &InMemorySearchPort::new());
    assert!(decision.visible);
    assert!(!decision.enabled);
    assert_eq!(decision.reason, Some(BlockReason::CreditCardTerms));
}

#[test]
fn scenario_3_overcommitted_line_disables_release() {
    let mut order = scenario_one();
    order.lines.push(OrderLine::new(10, 5));
    let decision = release(&order, &InMemorySearchPort::new());
    assert!(decision.visible);
    assert!(!decision.enabled);
    assert_eq!(decision.reason, Some(BlockReason::OvercommittedLines));
}

#[test]
fn scenario_4_facilities_lead_sees_no_lifecycle_controls() {
    let mut order = scenario_one();
    order.user_role = Role::FacilitiesLead;
    let port = InMemorySearchPort::new()
        .with_eligible(SavedSearch::OrdersOkToHold, ORDER)
        .with_eligible(SavedSearch::OrdersOkToCancel, ORDER);
    let plan = evaluate(&EligibilityConfig::default(), &port, &order, PageMode::View);

    assert!(!plan.is_visible(ActionId::Release));
    assert!(!plan.is_visible(ActionId::Hold));
    assert!(!plan.is_visible(ActionId::Close));
}

#[test]
fn scenario_5_sent_940_disables_hold_despite_eligible_row() {
    let mut order = scenario_one();
    order.release_status = ReleaseStatus::Released;
    order.edi940_sent = true;
    let port = InMemorySearchPort::new().with_eligible(SavedSearch::OrdersOkToHold, ORDER);
    let config = EligibilityConfig::default();

    let hold = OrderActionEligibility::new(&config, &port)
        .can_hold(&order, PageMode::View)
        .unwrap();
    assert!(hold.visible);
    assert!(!hold.enabled);
    assert_eq!(hold.reason, Some(BlockReason::Edi940Sent));
}

#[test]
fn override_customer_releases_whatever_validation_says() {
    let mut order = scenario_one();
    order.customer = CustomerId::new(3055);
    for stored in [
        ValidationStatus::NotValidated,
        ValidationStatus::Other(1),
        ValidationStatus::Other(2),
    ] {
        order.validation_status = stored;
        assert!(release(&order, &InMemorySearchPort::new()).enabled);
    }
}

#[test]
fn closed_order_offers_reopen_instead_of_close() {
    let mut order = scenario_one();
    order.status = OrderStatus::Closed;
    let port = InMemorySearchPort::new().with_eligible(SavedSearch::OrdersOkToCancel, ORDER);
    let plan = evaluate(&EligibilityConfig::default(), &port, &order, PageMode::View);

    assert!(!plan.is_visible(ActionId::Close));
    assert!(!plan.is_visible(ActionId::Release));
    assert!(plan.is_enabled(ActionId::Reopen));
    assert!(!plan.is_visible(ActionId::LtlRates));
}

fn release_status() -> impl Strategy<Value = ReleaseStatus> {
    prop_oneof![
        Just(ReleaseStatus::Hold),
        Just(ReleaseStatus::Scheduled),
        Just(ReleaseStatus::Released),
        Just(ReleaseStatus::RollbackComplete),
        (4u32..7).prop_map(ReleaseStatus::Other),
    ]
}

fn validation_status() -> impl Strategy<Value = ValidationStatus> {
    prop_oneof![
        Just(ValidationStatus::NotValidated),
        Just(ValidationStatus::Passed),
        (0u32..3).prop_map(ValidationStatus::Other),
    ]
}

fn order_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::PendingApproval),
        Just(OrderStatus::PendingFulfillment),
        Just(OrderStatus::PartiallyFulfilled),
        Just(OrderStatus::PendingBillingPartiallyFulfilled),
        Just(OrderStatus::PendingBilling),
        Just(OrderStatus::Billed),
        Just(OrderStatus::Closed),
        Just(OrderStatus::Other("Cancelled".to_string())),
    ]
}

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::FacilitiesLead),
        Just(Role::FacilitiesStaff),
        Just(Role::FacilitiesOrderManagement),
        Just(Role::Other),
    ]
}

prop_compose! {
    fn any_order()(
        release_status in release_status(),
        validation_status in validation_status(),
        role in role(),
        customer in prop_oneof![1 => Just(3055u64), 9 => 1u64..5000],
        terms in prop::option::of(prop_oneof![Just(50u64), 1u64..100]),
        fill_rule in prop::option::of(1u32..4),
        allocation in prop_oneof![
            Just(AllocationStatus::Pending),
            Just(AllocationStatus::Partial),
            Just(AllocationStatus::Full),
        ],
        lines in prop::collection::vec((0i64..20, 0i64..20), 0..6),
        edi940_sent in any::<bool>(),
        status in order_status(),
    ) -> OrderSnapshot {
        let mut order = scenario_one();
        order.customer = CustomerId::new(customer);
        order.release_status = release_status;
        order.validation_status = validation_status;
        order.user_role = role;
        order.terms = terms.map(TermsId::new);
        order.fill_rule = fill_rule;
        order.allocation_status = allocation;
        order.lines = lines
            .into_iter()
            .map(|(committed, ordered)| OrderLine::new(committed, ordered))
            .collect();
        order.edi940_sent = edi940_sent;
        order.status = status;
        order
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    })]

    /// Property: without a validation pass (or override) release is never enabled.
    #[test]
    fn unvalidated_orders_never_release(order in any_order()) {
        prop_assume!(order.validation_status != ValidationStatus::Passed);
        prop_assume!(order.customer != CustomerId::new(3055));
        prop_assert!(!release(&order, &InMemorySearchPort::new()).enabled);
    }

    /// Property: any overcommitted line blocks release.
    #[test]
    fn overcommitted_orders_never_release(order in any_order()) {
        prop_assume!(order.has_overcommitted_line());
        prop_assert!(!release(&order, &InMemorySearchPort::new()).enabled);
    }

    /// Property: hold is enabled exactly when released-or-rolled-back, the
    /// search has a row and no 940 went out (within the role/status scope).
    #[test]
    fn hold_enablement_matches_its_conditions(order in any_order(), has_row in any::<bool>()) {
        let port = if has_row {
            InMemorySearchPort::new().with_eligible(SavedSearch::OrdersOkToHold, ORDER)
        } else {
            InMemorySearchPort::new()
        };
        let config = EligibilityConfig::default();
        let hold = OrderActionEligibility::new(&config, &port)
            .can_hold(&order, PageMode::View)
            .unwrap();

        let in_scope = !order.user_role.is_lifecycle_restricted() && !order.status.is_closed();
        let status_ok = matches!(
            order.release_status,
            ReleaseStatus::Released | ReleaseStatus::RollbackComplete
        );
        prop_assert_eq!(hold.enabled, in_scope && status_ok && has_row && !order.edi940_sent);
    }

    /// Property: evaluation is a pure function of its inputs.
    #[test]
    fn evaluation_is_idempotent(order in any_order(), edit in any::<bool>()) {
        let mode = if edit { PageMode::Edit } else { PageMode::View };
        let port = InMemorySearchPort::new().with_eligible(SavedSearch::OrdersOkToCancel, ORDER);
        let config = EligibilityConfig::default();
        let first = evaluate(&config, &port, &order, mode);
        let second = evaluate(&config, &port, &order, mode);
        prop_assert_eq!(first, second);
    }

    /// Property: a failed precondition disables release but never hides it.
    #[test]
    fn release_visibility_ignores_preconditions(order in any_order()) {
        let decision = release(&order, &InMemorySearchPort::new());
        let expected_visible = !order.user_role.is_lifecycle_restricted()
            && !order.status.is_closed()
            && order.release_status != ReleaseStatus::Released;
        prop_assert_eq!(decision.visible, expected_visible);
        prop_assert_eq!(decision.enabled, decision.visible && decision.reason.is_none());
    }
}
