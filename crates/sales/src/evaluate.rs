//! One page render: every control decided in isolation.

use uuid::Uuid;

use crate::config::EligibilityConfig;
use crate::decision::{ActionDecision, ActionId, ButtonPlan};
use crate::eligibility::OrderActionEligibility;
use crate::error::EvalError;
use crate::ports::SearchPort;
use crate::snapshot::{OrderSnapshot, PageMode};

/// Decide every control for `order` as rendered in `mode`.
///
/// A failure while deciding one control is logged and that control falls
/// back to hidden; the other controls are still decided.
pub fn evaluate(
    config: &EligibilityConfig,
    port: &dyn SearchPort,
    order: &OrderSnapshot,
    mode: PageMode,
) -> ButtonPlan {
    let evaluation_id = Uuid::now_v7();
    let span = tracing::info_span!(
        "evaluate_order_actions",
        %evaluation_id,
        order_id = %order.id,
        role = %order.user_role,
        mode = ?mode,
    );
    let _enter = span.enter();

    let engine = OrderActionEligibility::new(config, port);
    let mut plan = ButtonPlan::new(order.id);

    for action in ActionId::ALL {
        let decision = isolate(action, || decide(&engine, action, order, mode));
        plan.record(decision);
    }
    plan.banners.extend(engine.close_banner(order, mode));

    tracing::debug!(
        visible = plan.visible_actions().count(),
        banners = plan.banners.len(),
        "order actions evaluated"
    );
    plan
}

fn decide(
    engine: &OrderActionEligibility<'_>,
    action: ActionId,
    order: &OrderSnapshot,
    mode: PageMode,
) -> Result<ActionDecision, EvalError> {
    match action {
        ActionId::Release => engine.can_release(order, mode),
        ActionId::Hold => engine.can_hold(order, mode),
        ActionId::Close => engine.can_close(order, mode),
        ActionId::Reopen => engine.can_reopen(order, mode),
        ActionId::Fulfill => Ok(ActionDecision::native(
            action,
            engine.show_fulfill_control(order, mode),
        )),
        ActionId::CancelOrder => Ok(ActionDecision::native(action, engine.show_native_cancel(order))),
        ActionId::PrintBarcodes => engine.print_barcodes(order, mode),
        ActionId::IntlDocs => engine.intl_docs(order, mode),
        ActionId::ProFormaInvoice => engine.pro_forma_invoice(order, mode),
        ActionId::ViewEdi850 => engine.view_edi_850(order, mode),
        ActionId::PrintLabels => engine.print_labels(order, mode),
        ActionId::ItemData => engine.item_data(order),
        ActionId::LtlRates => engine.ltl_rates(order, mode),
    }
}

fn isolate(
    action: ActionId,
    decide: impl FnOnce() -> Result<ActionDecision, EvalError>,
) -> ActionDecision {
    match decide() {
        Ok(decision) => decision,
        Err(error) => {
            tracing::error!(action = %action, error = %error, "action evaluation failed; control withheld");
            ActionDecision::unavailable(action)
        }
    }
}
