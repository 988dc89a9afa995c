//! Per-action decisions for one order snapshot.

use std::collections::BTreeSet;

use orderdesk_auth::Role;

use crate::config::{EligibilityConfig, IntlDocsPolicy};
use crate::decision::{ActionDecision, ActionId, Banner, BlockReason};
use crate::error::EvalError;
use crate::links::{CloseRequest, LinkBuilder};
use crate::ports::{SavedSearch, SearchPort};
use crate::rules::{RELEASE_RULES, ReleaseFacts, first_failure};
use crate::snapshot::{FulfillmentPath, OrderSnapshot, OrderStatus, PageMode, ReleaseStatus};

/// Decides visibility, enablement and link target of each order control.
///
/// Holds no state between calls: every method is a function of the
/// snapshot, the page mode, the configuration and the port's answers.
pub struct OrderActionEligibility<'a> {
    config: &'a EligibilityConfig,
    port: &'a dyn SearchPort,
    links: LinkBuilder<'a>,
}

impl<'a> OrderActionEligibility<'a> {
    pub fn new(config: &'a EligibilityConfig, port: &'a dyn SearchPort) -> Self {
        Self {
            config,
            port,
            links: LinkBuilder::new(config),
        }
    }

    /// Release, hold and close are offered to non-restricted roles on open
    /// orders opened for view or edit.
    pub fn in_lifecycle_scope(&self, order: &OrderSnapshot, mode: PageMode) -> bool {
        mode.is_view_or_edit() && !order.user_role.is_lifecycle_restricted() && !order.status.is_closed()
    }

    pub fn can_release(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if !self.in_lifecycle_scope(order, mode) || order.release_status == ReleaseStatus::Released {
            return Ok(ActionDecision::hidden(ActionId::Release));
        }

        let card_payment = match order.payment_method {
            Some(method) => self.port.is_card_payment_method(method)?,
            None => false,
        };
        let facts = ReleaseFacts {
            order,
            config: self.config,
            card_payment,
        };
        let reason = first_failure(&RELEASE_RULES, &facts);

        let target = self.links.release(&order.record_type, &order.id.to_string())?;
        Ok(ActionDecision::shown(ActionId::Release, target, reason))
    }

    pub fn can_hold(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        let releasable_back = matches!(
            order.release_status,
            ReleaseStatus::Released | ReleaseStatus::RollbackComplete
        );
        if !self.in_lifecycle_scope(order, mode) || !releasable_back {
            return Ok(ActionDecision::hidden(ActionId::Hold));
        }

        let eligible = self.port.has_eligible_row(SavedSearch::OrdersOkToHold, order.id)?;
        let reason = if !eligible {
            Some(BlockReason::NotEligibleToHold)
        } else if order.edi940_sent {
            Some(BlockReason::Edi940Sent)
        } else {
            None
        };

        let target = self.links.hold(
            &order.record_type,
            &order.id.to_string(),
            &order.transaction_number,
            order.fulfillment_path == FulfillmentPath::TaskPicking,
        )?;
        Ok(ActionDecision::shown(ActionId::Hold, target, reason))
    }

    pub fn can_close(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if !self.in_lifecycle_scope(order, mode) {
            return Ok(ActionDecision::hidden(ActionId::Close));
        }

        let eligible = self.port.has_eligible_row(SavedSearch::OrdersOkToCancel, order.id)?;
        let pending_work_orders = self.pending_work_orders(order)?;

        let target = self.links.close(&CloseRequest {
            record_type: &order.record_type,
            record_id: &order.id.to_string(),
            transaction_number: &order.transaction_number,
            customer_name: &order.customer_name,
            task_picking: order.fulfillment_path == FulfillmentPath::TaskPicking,
            pending_work_orders: &pending_work_orders,
        })?;
        let reason = (!eligible).then_some(BlockReason::NotEligibleToClose);
        Ok(ActionDecision::shown(ActionId::Close, target, reason))
    }

    /// Transaction numbers of linked work orders still waiting for release,
    /// each work order looked up once.
    fn pending_work_orders(&self, order: &OrderSnapshot) -> Result<String, EvalError> {
        let mut seen = BTreeSet::new();
        let mut pending = Vec::new();
        for id in order.lines.iter().filter_map(|line| line.work_order) {
            if !seen.insert(id) {
                continue;
            }
            match self.port.work_order(id)? {
                Some(wo) if !wo.is_released() => pending.push(wo.transaction_number),
                Some(_) => {}
                None => tracing::warn!(order_id = %order.id, work_order = %id, "linked work order not found"),
            }
        }
        Ok(pending.join(", "))
    }

    /// Advisory shown while a close request is queued.
    pub fn close_banner(&self, order: &OrderSnapshot, mode: PageMode) -> Option<Banner> {
        (self.in_lifecycle_scope(order, mode) && order.is_scheduled_to_close())
            .then(Banner::scheduled_to_close)
    }

    pub fn can_reopen(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        let shown = mode.is_view_or_edit()
            && !order.user_role.is_lifecycle_restricted()
            && order.status.is_closed();
        if !shown {
            return Ok(ActionDecision::hidden(ActionId::Reopen));
        }

        let target = self.links.reopen(
            &order.record_type,
            &order.id.to_string(),
            &order.transaction_number,
            &order.customer.to_string(),
            &order.customer_entity_id,
        )?;
        Ok(ActionDecision::enabled(ActionId::Reopen, target))
    }

    /// Whether the platform's own fulfill control stays on the page.
    pub fn show_fulfill_control(&self, order: &OrderSnapshot, mode: PageMode) -> bool {
        if order.user_role.is_admin() {
            return true;
        }
        if order.fulfillment_path.is_warehouse_managed() {
            return false;
        }
        if mode == PageMode::View && self.is_restricted_sample_or_location(order) {
            return false;
        }
        true
    }

    fn is_restricted_sample_or_location(&self, order: &OrderSnapshot) -> bool {
        order.form == Some(self.config.sample_order_form)
            || order
                .location
                .is_some_and(|location| self.config.is_restricted_location(location))
    }

    /// Cancelling goes through the close workflow; only admins keep the
    /// platform's direct cancel control.
    pub fn show_native_cancel(&self, order: &OrderSnapshot) -> bool {
        order.user_role.is_admin()
    }

    pub fn show_print_barcodes(&self, order: &OrderSnapshot, mode: PageMode) -> bool {
        mode == PageMode::View
            && order.fulfillment_path == FulfillmentPath::Dsdc
            && order.user_role.is_facilities_or_admin()
    }

    pub fn print_barcodes(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if !self.show_print_barcodes(order, mode) {
            return Ok(ActionDecision::hidden(ActionId::PrintBarcodes));
        }
        let target = self.links.print_barcodes(&order.record_type, &order.id.to_string())?;
        Ok(ActionDecision::enabled(ActionId::PrintBarcodes, target))
    }

    pub fn show_intl_docs(&self, order: &OrderSnapshot, mode: PageMode) -> bool {
        if !mode.is_view_or_edit() {
            return false;
        }
        match self.config.intl_docs {
            IntlDocsPolicy::Always => true,
            IntlDocsPolicy::NonDomesticOnly => !order
                .ship_country
                .trim()
                .eq_ignore_ascii_case(&self.config.domestic_country),
        }
    }

    pub fn intl_docs(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if !self.show_intl_docs(order, mode) {
            return Ok(ActionDecision::hidden(ActionId::IntlDocs));
        }
        let target = self.links.intl_docs(&order.id.to_string())?;
        Ok(ActionDecision::enabled(ActionId::IntlDocs, target))
    }

    /// Reservation-form orders only hold inventory; document and pricing
    /// controls do not apply to them.
    fn offers_documents(&self, order: &OrderSnapshot) -> bool {
        order.form != Some(self.config.reservation_form)
    }

    pub fn pro_forma_invoice(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if mode != PageMode::View || !self.offers_documents(order) {
            return Ok(ActionDecision::hidden(ActionId::ProFormaInvoice));
        }
        let target = self.links.pro_forma_invoice(
            &order.record_type,
            &order.id.to_string(),
            &self.config.pro_forma_template.to_string(),
        )?;
        Ok(ActionDecision::enabled(ActionId::ProFormaInvoice, target))
    }

    pub fn view_edi_850(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        let from_edi = order.order_source == Some(self.config.edi_order_source);
        if mode != PageMode::View || !self.offers_documents(order) || !from_edi {
            return Ok(ActionDecision::hidden(ActionId::ViewEdi850));
        }
        let target = self.links.edi_850(&order.po_number)?;
        Ok(ActionDecision::enabled(ActionId::ViewEdi850, target))
    }

    pub fn print_labels(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if mode != PageMode::View || !self.offers_documents(order) {
            return Ok(ActionDecision::hidden(ActionId::PrintLabels));
        }
        let Some(template) = self.port.customer_label_template(order.customer)? else {
            return Ok(ActionDecision::hidden(ActionId::PrintLabels));
        };
        let target = self.links.print_labels(&order.id.to_string(), &template.to_string())?;
        Ok(ActionDecision::enabled(ActionId::PrintLabels, target))
    }

    /// Refresh of line pricing and customer item details.
    pub fn item_data(&self, order: &OrderSnapshot) -> Result<ActionDecision, EvalError> {
        let status_allows = matches!(
            order.status,
            OrderStatus::PendingApproval | OrderStatus::PendingFulfillment
        ) || (order.user_role == Role::Admin && !order.status.is_closed());
        if !self.offers_documents(order) || !status_allows {
            return Ok(ActionDecision::hidden(ActionId::ItemData));
        }
        let target = self.links.update_prices(&order.id.to_string())?;
        Ok(ActionDecision::enabled(ActionId::ItemData, target))
    }

    pub fn ltl_rates(&self, order: &OrderSnapshot, mode: PageMode) -> Result<ActionDecision, EvalError> {
        if !self.offers_documents(order) || order.status.is_closed() {
            return Ok(ActionDecision::hidden(ActionId::LtlRates));
        }
        let target = self.links.ltl_rates(&order.id.to_string(), mode == PageMode::Edit)?;
        Ok(ActionDecision::enabled(ActionId::LtlRates, target))
    }
}
