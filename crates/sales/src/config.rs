//! Account-specific constants behind the order-page rules.
//!
//! The defaults carry the production account's ids. A JSON file can replace
//! any subset of them and a few environment variables override the rest.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderdesk_auth::RoleDirectory;
use orderdesk_core::{CustomerId, FormId, LocationId, ShipMethodId, TemplateId, TermsId};

pub const ENV_HOST_URL: &str = "ORDERDESK_HOST_URL";
pub const ENV_EDI_LOOKUP_URL: &str = "ORDERDESK_EDI_LOOKUP_URL";
pub const ENV_INTL_DOCS: &str = "ORDERDESK_INTL_DOCS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// When the international documents control is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntlDocsPolicy {
    /// Offer it on every order. Production has always run this way, even
    /// though a destination-country check was once intended.
    #[default]
    Always,
    /// Only offer it when the order ships outside the domestic country.
    NonDomesticOnly,
}

impl std::str::FromStr for IntlDocsPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(IntlDocsPolicy::Always),
            "non_domestic_only" => Ok(IntlDocsPolicy::NonDomesticOnly),
            other => Err(ConfigError::Invalid {
                field: "intl_docs",
                reason: format!("expected 'always' or 'non_domestic_only', got '{other}'"),
            }),
        }
    }
}

/// A deployed server-side workflow page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteletRoute {
    pub script_id: String,
    pub deployment_id: String,
}

impl SuiteletRoute {
    pub fn new(script_id: impl Into<String>, deployment_id: impl Into<String>) -> Self {
        Self {
            script_id: script_id.into(),
            deployment_id: deployment_id.into(),
        }
    }
}

/// Workflow endpoints linked from the order page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteletRoutes {
    pub release: SuiteletRoute,
    pub hold: SuiteletRoute,
    pub close: SuiteletRoute,
    pub reopen: SuiteletRoute,
    pub print_labels: SuiteletRoute,
    pub print_barcodes: SuiteletRoute,
    pub ltl_rates: SuiteletRoute,
    pub intl_docs: SuiteletRoute,
    pub pro_forma_invoice: SuiteletRoute,
    pub update_prices: SuiteletRoute,
}

impl Default for SuiteletRoutes {
    fn default() -> Self {
        Self {
            release: SuiteletRoute::new(
                "customscript_adv_suitelet_updsoreleasest",
                "customdeploy_adv_suitelet_updsoreleasest",
            ),
            hold: SuiteletRoute::new(
                "customscript_adv_suitelet_setsostathold",
                "customdeploy_adv_suitelet_setsostathold",
            ),
            close: SuiteletRoute::new(
                "customscript_adv_suitelet_cancelso",
                "customdeploy_adv_suitelet_cancelso",
            ),
            reopen: SuiteletRoute::new("customscript_adv_sl_reopenso", "customdeploy_adv_sl_reopenso"),
            print_labels: SuiteletRoute::new(
                "customscript_adv_suitelet_solabels_scr",
                "customdeploy_adv_suitelet_solabels_dep",
            ),
            print_barcodes: SuiteletRoute::new(
                "customscript_adv_so_print_barcode_sl",
                "customdeploy_adv_so_print_barcode_sl",
            ),
            ltl_rates: SuiteletRoute::new(
                "customscript_adv_suitelet_gettirates",
                "customdeploy_adv_suitelet_dep_gettirates",
            ),
            intl_docs: SuiteletRoute::new(
                "customscript_adv_sl_prntintldocsso",
                "customdeploy_adv_sl_prntintldocsso",
            ),
            pro_forma_invoice: SuiteletRoute::new(
                "customscript_rsm_slt_if_print_di_docs",
                "customdeploy_rsm_slt_if_print_di_docs",
            ),
            update_prices: SuiteletRoute::new(
                "customscript_adv_suitelet_updatesoprice",
                "customdeploy_adv_suitelet_updprice_depl",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Account root; workflow links are absolute URLs under it.
    pub host_url: String,
    /// Path the platform serves workflow pages from.
    pub suitelet_path: String,
    pub roles: RoleDirectory,
    /// Customers whose orders are never validated and count as passed.
    pub validation_override_customers: Vec<CustomerId>,
    pub credit_card_terms: TermsId,
    /// Placeholder ship methods that must be replaced before release.
    pub routing_guide_ship_methods: Vec<ShipMethodId>,
    pub sample_order_form: FormId,
    /// Inventory reservation form; documents and pricing controls do not apply.
    pub reservation_form: FormId,
    /// Locations where sample orders are fulfilled by the warehouse process.
    pub restricted_fulfill_locations: Vec<LocationId>,
    pub pro_forma_template: TemplateId,
    /// Order source code of orders received over EDI.
    pub edi_order_source: u32,
    pub edi_lookup_url: String,
    pub intl_docs: IntlDocsPolicy,
    pub domestic_country: String,
    pub routes: SuiteletRoutes,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            host_url: "https://5050497.app.netsuite.com".to_string(),
            suitelet_path: "/app/site/hosting/scriptlet.nl".to_string(),
            roles: RoleDirectory::default(),
            validation_override_customers: vec![CustomerId::new(3055)],
            credit_card_terms: TermsId::new(50),
            routing_guide_ship_methods: vec![ShipMethodId::new(12583), ShipMethodId::new(12821)],
            sample_order_form: FormId::new(211),
            reservation_form: FormId::new(169),
            restricted_fulfill_locations: [1, 6, 9, 240, 230, 229, 228]
                .into_iter()
                .map(LocationId::new)
                .collect(),
            pro_forma_template: TemplateId::new(119),
            edi_order_source: 1,
            edi_lookup_url: "http://newton.advantus.com/EDIPOLookup/".to_string(),
            intl_docs: IntlDocsPolicy::Always,
            domestic_country: "US".to_string(),
            routes: SuiteletRoutes::default(),
        }
    }
}

impl EligibilityConfig {
    /// Defaults, then the optional JSON file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base: Self = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str(&raw)?
            }
            None => Self::default(),
        };
        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(ENV_HOST_URL) {
            tracing::debug!(host = %host, "host url overridden from environment");
            self.host_url = host;
        }
        if let Some(edi) = lookup(ENV_EDI_LOOKUP_URL) {
            self.edi_lookup_url = edi;
        }
        if let Some(policy) = lookup(ENV_INTL_DOCS) {
            self.intl_docs = policy.parse()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("host_url", &self.host_url), ("edi_lookup_url", &self.edi_lookup_url)] {
            url::Url::parse(value).map_err(|e| ConfigError::Invalid {
                field,
                reason: e.to_string(),
            })?;
        }
        if !self.suitelet_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "suitelet_path",
                reason: "must be an absolute path".to_string(),
            });
        }
        Ok(())
    }

    pub fn forces_validation_pass(&self, customer: CustomerId) -> bool {
        self.validation_override_customers.contains(&customer)
    }

    pub fn is_routing_guide(&self, ship_method: ShipMethodId) -> bool {
        self.routing_guide_ship_methods.contains(&ship_method)
    }

    pub fn is_restricted_location(&self, location: LocationId) -> bool {
        self.restricted_fulfill_locations.contains(&location)
    }
}
