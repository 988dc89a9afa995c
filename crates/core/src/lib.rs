//! `orderdesk-core`: domain foundation building blocks.
//!
//! Identifiers, the domain error model and marker traits shared by the
//! order-desk crates. No infrastructure concerns live here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    CustomerId, FormId, LocationId, PaymentMethodId, RecordId, ShipMethodId, TemplateId, TermsId,
    WorkOrderId,
};
pub use value_object::ValueObject;
