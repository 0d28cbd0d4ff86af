use serde::{Deserialize, Serialize};

use estatecms_core::{Entity, UserId};

use crate::authorize::{RoleRequirement, authorize};
use crate::role_set::RoleSet;

/// An authenticated actor (a CMS user) together with the roles it holds.
///
/// Anonymous requests carry no principal at all; callers pass
/// `Option<&Principal>` and `None` means unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    #[serde(default)]
    pub roles: RoleSet,
}

impl Principal {
    pub fn new(id: UserId, roles: impl Into<RoleSet>) -> Self {
        Self {
            id,
            roles: roles.into(),
        }
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

impl Entity for Principal {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// [`authorize`] for an optional principal: presence is authentication.
pub fn authorize_principal(
    principal: Option<&Principal>,
    required: impl Into<RoleRequirement>,
) -> bool {
    authorize(principal.is_some(), principal.map(Principal::roles), required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    #[test]
    fn anonymous_is_unauthenticated() {
        assert!(!authorize_principal(None, RoleRequirement::Authenticated));
        assert!(!authorize_principal(None, Role::Editor));
    }

    #[test]
    fn roleless_principal_passes_authentication_only() {
        let user = Principal::new(UserId::new(), RoleSet::new());
        assert!(authorize_principal(Some(&user), RoleRequirement::Authenticated));
        assert!(!authorize_principal(Some(&user), Role::Editor));
    }

    #[test]
    fn deserializes_stored_user_with_unknown_roles() {
        let id = UserId::new();
        let json = format!(r#"{{"id":"{id}","roles":["super-admin","owner"]}}"#);
        let user: Principal = serde_json::from_str(&json).unwrap();

        assert_eq!(Entity::id(&user), &id);
        assert_eq!(user.roles, RoleSet::from(Role::SuperAdmin));
    }

    #[test]
    fn missing_roles_field_is_empty_set() {
        let json = format!(r#"{{"id":"{}"}}"#, UserId::new());
        let user: Principal = serde_json::from_str(&json).unwrap();
        assert!(user.roles.is_empty());
    }
}
