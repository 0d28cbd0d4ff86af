//! The set of roles held by a principal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use estatecms_core::ValueObject;

use crate::authorize::AuthzError;
use crate::roles::Role;

/// Roles assigned to a principal.
///
/// Semantically a set: duplicates collapse and element order never matters.
/// May be empty (anonymous or roleless principal).
///
/// Unknown role names are **ignored** by the lenient constructors
/// ([`RoleSet::from_names`] and deserialization) with a warning, so a stale
/// role stored on a user degrades to "fewer privileges" instead of a failed
/// request. Use [`RoleSet::try_from_names`] to reject them instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<Role>")]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build a set from stored role names, dropping names outside [`Role`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let role = Role::parse(name);
                if role.is_none() {
                    tracing::warn!(role = name, "ignoring unknown role");
                }
                role
            })
            .collect()
    }

    /// Build a set from stored role names, failing on the first unknown name.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, AuthzError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect()
    }

    /// Insert a role; returns `false` if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn remove(&mut self, role: Role) -> bool {
        self.0.remove(&role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Whether the two sets share at least one role.
    pub fn intersects(&self, other: &RoleSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Roles present in both sets.
    pub fn intersection(&self, other: &RoleSet) -> RoleSet {
        self.0.intersection(&other.0).copied().collect()
    }

    /// The most privileged role held, per [`Role::HIERARCHY`].
    pub fn highest(&self) -> Option<Role> {
        self.iter().min_by_key(|r| r.rank())
    }
}

impl ValueObject for RoleSet {}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("]")
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = Role;
    type IntoIter = core::iter::Copied<std::collections::btree_set::Iter<'a, Role>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<&RoleSet> for RoleSet {
    fn from(roles: &RoleSet) -> Self {
        roles.clone()
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(names: Vec<String>) -> Self {
        RoleSet::from_names(names)
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(roles: RoleSet) -> Self {
        roles.0.into_iter().collect()
    }
}
