use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::authorize::AuthzError;
use crate::role_set::RoleSet;

/// Role identifier used for RBAC.
///
/// Roles are a closed enumeration. Privilege is defined by position in
/// [`Role::HIERARCHY`], not by declaration order: a role satisfies any
/// "at least T" check for every tier T ranked at or below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[serde(alias = "super_admin", alias = "superadmin")]
    SuperAdmin,
    Admin,
    Editor,
}

impl Role {
    /// Every role, highest privilege first.
    ///
    /// Adding a tier is a one-line change here plus the new variant.
    pub const HIERARCHY: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Editor];

    /// Position in [`Role::HIERARCHY`]; `0` is the most privileged.
    pub fn rank(self) -> usize {
        Role::HIERARCHY
            .iter()
            .position(|r| *r == self)
            .unwrap_or(Role::HIERARCHY.len())
    }

    /// Whether holding `self` satisfies a minimum tier of `tier`.
    pub fn satisfies(self, tier: Role) -> bool {
        self.rank() <= tier.rank()
    }

    /// The set of roles that satisfy a minimum tier of `tier`.
    ///
    /// ```
    /// use estatecms_auth::{Role, RoleSet};
    ///
    /// let admins = Role::at_least(Role::Admin);
    /// assert_eq!(admins, RoleSet::from([Role::SuperAdmin, Role::Admin]));
    /// ```
    pub fn at_least(tier: Role) -> RoleSet {
        Role::HIERARCHY
            .iter()
            .copied()
            .filter(|r| r.satisfies(tier))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }

    /// Human-readable label, as shown in [`Role::options`].
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Editor => "Editor",
        }
    }

    /// Select options for the users `roles` field, highest privilege first.
    pub fn options() -> Vec<RoleOption> {
        Role::HIERARCHY.iter().copied().map(RoleOption::from).collect()
    }

    /// Parse a role name (case-insensitive, `-` or `_` separated).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "super-admin" | "superadmin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            _ => None,
        }
    }
}

/// One `{ label, value }` entry of the admin UI roles select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub label: &'static str,
    pub value: Role,
}

impl From<Role> for RoleOption {
    fn from(role: Role) -> Self {
        Self {
            label: role.display_name(),
            value: role,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_lists_every_role_once() {
        for role in Role::HIERARCHY {
            assert!(role.rank() < Role::HIERARCHY.len());
        }
        assert_eq!(Role::SuperAdmin.rank(), 0);
        assert_eq!(Role::Admin.rank(), 1);
        assert_eq!(Role::Editor.rank(), 2);
    }

    #[test]
    fn super_admin_satisfies_admin_tier() {
        assert!(Role::SuperAdmin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(!Role::Editor.satisfies(Role::Admin));
        assert!(!Role::Admin.satisfies(Role::SuperAdmin));
    }

    #[test]
    fn at_least_editor_is_everyone() {
        assert_eq!(Role::at_least(Role::Editor).len(), Role::HIERARCHY.len());
        assert_eq!(Role::at_least(Role::SuperAdmin), RoleSet::from(Role::SuperAdmin));
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(Role::parse("super-admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn from_str_reports_unknown_role() {
        let err = "owner".parse::<Role>().unwrap_err();
        assert_eq!(err, AuthzError::UnknownRole("owner".to_string()));
    }

    #[test]
    fn options_follow_hierarchy_with_labels() {
        let options = Role::options();
        let values: Vec<Role> = options.iter().map(|o| o.value).collect();
        assert_eq!(values, Role::HIERARCHY.to_vec());
        assert_eq!(options[0].label, "Super Admin");

        assert_eq!(
            serde_json::to_value(options[0]).unwrap(),
            serde_json::json!({ "label": "Super Admin", "value": "super-admin" })
        );
    }

    #[test]
    fn serde_uses_kebab_case_names() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"super-admin\"");
        let role: Role = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
    }
}
