//! Strongly-typed identifiers used across the domain.
//!
//! The hosting platform addresses every record by a positive integer
//! "internal id". Each record kind gets its own newtype so a customer id can
//! never be passed where a ship method is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! internal_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(u64);

        impl $t {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

internal_id!(
    /// Internal id of a transaction record (sales order).
    RecordId,
    "RecordId"
);
internal_id!(CustomerId, "CustomerId");
internal_id!(PaymentMethodId, "PaymentMethodId");
internal_id!(ShipMethodId, "ShipMethodId");
internal_id!(
    /// Payment terms (e.g. Net 30, Credit Card).
    TermsId,
    "TermsId"
);
internal_id!(
    /// Custom entry form the record was created with.
    FormId,
    "FormId"
);
internal_id!(LocationId, "LocationId");
internal_id!(
    /// Printable document template.
    TemplateId,
    "TemplateId"
);
internal_id!(WorkOrderId, "WorkOrderId");
