//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Principals and stored documents are entities: two values with the same id
/// refer to the same thing even when their other attributes differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
