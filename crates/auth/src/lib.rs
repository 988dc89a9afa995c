//! `orderdesk-auth`: who is looking at the order.
//!
//! Maps platform role ids to the handful of roles the order-desk rules care
//! about. Decoupled from any session or transport.

pub mod roles;

pub use roles::{Role, RoleDirectory, RoleId};
