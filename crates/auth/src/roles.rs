use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric role id as assigned by the hosting platform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub u32);

impl core::fmt::Display for RoleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Roles that change which order actions are offered.
///
/// Every other platform role collapses into [`Role::Other`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    FacilitiesLead,
    FacilitiesStaff,
    FacilitiesOrderManagement,
    #[default]
    Other,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Warehouse-floor roles that never drive the order lifecycle
    /// (release, hold, close, reopen).
    pub fn is_lifecycle_restricted(self) -> bool {
        matches!(self, Role::FacilitiesLead | Role::FacilitiesOrderManagement)
    }

    /// Roles allowed to print DSDC carton barcodes.
    pub fn is_facilities_or_admin(self) -> bool {
        matches!(
            self,
            Role::Admin | Role::FacilitiesLead | Role::FacilitiesStaff | Role::FacilitiesOrderManagement
        )
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::FacilitiesLead => "facilities_lead",
            Role::FacilitiesStaff => "facilities_staff",
            Role::FacilitiesOrderManagement => "facilities_order_management",
            Role::Other => "other",
        };
        f.write_str(name)
    }
}

/// Lookup table from platform role ids to [`Role`].
///
/// The default table carries the production account's ids; deployments to
/// another account override it through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleDirectory(BTreeMap<RoleId, Role>);

impl RoleDirectory {
    pub fn new(entries: impl IntoIterator<Item = (RoleId, Role)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn resolve(&self, id: RoleId) -> Role {
        match self.0.get(&id) {
            Some(role) => *role,
            None => {
                tracing::debug!(role_id = %id, "role id not mapped; treating as other");
                Role::Other
            }
        }
    }
}

impl Default for RoleDirectory {
    fn default() -> Self {
        Self::new([
            (RoleId(3), Role::Admin),
            (RoleId(1057), Role::FacilitiesLead),
            (RoleId(1033), Role::FacilitiesStaff),
            (RoleId(1050), Role::FacilitiesOrderManagement),
        ])
    }
}
