//! Entity trait: records that keep their identity across snapshots.

/// Anything addressed by a platform internal id.
///
/// Two snapshots of the same order taken at different times are different
/// values but the same entity.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
