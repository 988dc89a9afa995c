//! Value object trait: equality by value, not identity.

/// Marker trait for immutable values compared by their attributes.
///
/// Order snapshots, line items and action decisions are all value objects:
/// rule evaluation reads them and never mutates them, so evaluating the same
/// value twice must produce the same result.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Quantity {
///     committed: i64,
///     ordered: i64,
/// }
///
/// impl ValueObject for Quantity {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
