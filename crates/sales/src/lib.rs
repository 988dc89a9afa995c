//! Sales order action eligibility.
//!
//! Given a snapshot of an order, decides which page controls (release, hold,
//! close, reopen, document and pricing links, the platform's own fulfill and
//! cancel controls) are shown, whether they are enabled and where they link.
//! Pure decision logic: platform searches sit behind [`SearchPort`].

pub mod config;
pub mod decision;
pub mod eligibility;
pub mod error;
pub mod evaluate;
pub mod links;
pub mod ports;
pub mod rules;
pub mod snapshot;

pub use config::{ConfigError, EligibilityConfig, IntlDocsPolicy, SuiteletRoute, SuiteletRoutes};
pub use decision::{
    ActionDecision, ActionId, ActionTarget, Banner, BannerLevel, BlockReason, ButtonPlan, Navigation,
};
pub use eligibility::OrderActionEligibility;
pub use error::{EvalError, LookupError};
pub use evaluate::evaluate;
pub use ports::{InMemorySearchPort, LookupKind, SavedSearch, SearchPort, WorkOrderSummary};
pub use snapshot::{
    AllocationStatus, CardResult, FulfillmentPath, OrderLine, OrderSnapshot, OrderStatus, PageMode,
    ReleaseStatus, ValidationStatus,
};
