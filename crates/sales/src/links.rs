//! Deep links to the workflow endpoints behind each custom control.

use url::Url;

use crate::config::{EligibilityConfig, SuiteletRoute};
use crate::decision::{ActionTarget, Navigation};
use crate::error::EvalError;

const POPUP_WIDTH: u32 = 1200;
const POPUP_HEIGHT: u32 = 500;

/// Builds absolute, query-encoded URLs under the configured account host.
#[derive(Debug, Clone, Copy)]
pub struct LinkBuilder<'a> {
    config: &'a EligibilityConfig,
}

impl<'a> LinkBuilder<'a> {
    pub fn new(config: &'a EligibilityConfig) -> Self {
        Self { config }
    }

    /// URL of a workflow page with `params` appended after the script and
    /// deployment ids.
    pub fn suitelet(&self, route: &SuiteletRoute, params: &[(&str, &str)]) -> Result<Url, EvalError> {
        let mut url = Url::parse(&self.config.host_url)?.join(&self.config.suitelet_path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("script", &route.script_id);
            query.append_pair("deploy", &route.deployment_id);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn target(&self, route: &SuiteletRoute, params: &[(&str, &str)], navigation: Navigation) -> Result<ActionTarget, EvalError> {
        let url = self.suitelet(route, params)?;
        Ok(ActionTarget {
            url: url.into(),
            navigation,
        })
    }

    fn popup(title: &str) -> Navigation {
        Navigation::popup(title, POPUP_WIDTH, POPUP_HEIGHT)
    }

    pub fn release(&self, record_type: &str, record_id: &str) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.release,
            &[("rectype", record_type), ("recid", record_id)],
            Navigation::SameWindow,
        )
    }

    pub fn hold(
        &self,
        record_type: &str,
        record_id: &str,
        transaction_number: &str,
        task_picking: bool,
    ) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.hold,
            &[
                ("rectype", record_type),
                ("recid", record_id),
                ("transid", transaction_number),
                ("isTaskPicking", flag(task_picking)),
            ],
            Navigation::SameWindow,
        )
    }

    pub fn close(&self, request: &CloseRequest<'_>) -> Result<ActionTarget, EvalError> {
        let customer_name = strip_apostrophes(request.customer_name);
        self.target(
            &self.config.routes.close,
            &[
                ("rectype", request.record_type),
                ("recid", request.record_id),
                ("isTaskPicking", flag(request.task_picking)),
                ("soNum", request.transaction_number),
                ("custName", customer_name.as_str()),
                ("woNums", request.pending_work_orders),
            ],
            Navigation::SameWindow,
        )
    }

    pub fn reopen(
        &self,
        record_type: &str,
        record_id: &str,
        transaction_number: &str,
        customer_id: &str,
        customer_entity_id: &str,
    ) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.reopen,
            &[
                ("rectype", record_type),
                ("recid", record_id),
                ("soNum", transaction_number),
                ("custId", customer_id),
                ("custName", customer_entity_id),
            ],
            Navigation::SameWindow,
        )
    }

    pub fn print_barcodes(&self, record_type: &str, record_id: &str) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.print_barcodes,
            &[("rectype", record_type), ("recid", record_id)],
            Self::popup("Print Barcodes"),
        )
    }

    pub fn intl_docs(&self, record_id: &str) -> Result<ActionTarget, EvalError> {
        self.target(&self.config.routes.intl_docs, &[("rid", record_id)], Navigation::NewTab)
    }

    pub fn pro_forma_invoice(&self, record_type: &str, record_id: &str, template: &str) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.pro_forma_invoice,
            &[("rectype", record_type), ("recid", record_id), ("templateid", template)],
            Self::popup("Print Pro Forma Invoice"),
        )
    }

    pub fn print_labels(&self, record_id: &str, template: &str) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.print_labels,
            &[("rid", record_id), ("templateid", template)],
            Self::popup("Print SO Lbls"),
        )
    }

    pub fn update_prices(&self, record_id: &str) -> Result<ActionTarget, EvalError> {
        self.target(
            &self.config.routes.update_prices,
            &[("m", "so"), ("rid", record_id)],
            Navigation::SameWindow,
        )
    }

    /// `editing` selects the rate page's edit mode (`m=E`) over view (`m=V`).
    pub fn ltl_rates(&self, record_id: &str, editing: bool) -> Result<ActionTarget, EvalError> {
        let mode = if editing { "E" } else { "V" };
        self.target(
            &self.config.routes.ltl_rates,
            &[("t", "SalesOrder"), ("rid", record_id), ("m", mode)],
            Self::popup("Get LTL Rates"),
        )
    }

    /// Customer's EDI 850 purchase order in the external EDI viewer.
    pub fn edi_850(&self, po_number: &str) -> Result<ActionTarget, EvalError> {
        let mut url = Url::parse(&self.config.edi_lookup_url)?;
        url.query_pairs_mut().append_pair("po", po_number);
        Ok(ActionTarget {
            url: url.into(),
            navigation: Navigation::popup("View EDI 850", POPUP_WIDTH, 700),
        })
    }
}

/// Parameters of the close workflow link.
#[derive(Debug, Clone, Copy)]
pub struct CloseRequest<'r> {
    pub record_type: &'r str,
    pub record_id: &'r str,
    pub transaction_number: &'r str,
    pub customer_name: &'r str,
    pub task_picking: bool,
    /// Comma-separated numbers of linked work orders not yet released.
    pub pending_work_orders: &'r str,
}

fn flag(value: bool) -> &'static str {
    if value { "t" } else { "f" }
}

/// The close page embeds the name in a script string literal.
fn strip_apostrophes(name: &str) -> String {
    name.replace('\'', "")
}
