//! Role predicates.
//!
//! All predicates take the actor's roles as `Option<&RoleSet>`: `None` models
//! a principal with no role data at all and behaves exactly like an empty set.
//! The required side accepts a single [`Role`] or any collection of roles and
//! is normalized to a [`RoleSet`] before the one intersection test.

use crate::role_set::RoleSet;
use crate::roles::Role;

/// Whether the actor holds at least one of the required roles.
///
/// An empty requirement can never be satisfied.
///
/// ```
/// use estatecms_auth::{Role, RoleSet, has_any_role};
///
/// let roles = RoleSet::from([Role::Admin, Role::Editor]);
/// assert!(has_any_role(Some(&roles), Role::Admin));
/// assert!(has_any_role(Some(&roles), [Role::SuperAdmin, Role::Editor]));
/// assert!(!has_any_role(Some(&RoleSet::from(Role::Editor)), Role::Admin));
/// ```
pub fn has_any_role(actor_roles: Option<&RoleSet>, required: impl Into<RoleSet>) -> bool {
    let Some(actor_roles) = actor_roles else {
        return false;
    };
    actor_roles.intersects(&required.into())
}

pub fn is_super_admin(actor_roles: Option<&RoleSet>) -> bool {
    has_any_role(actor_roles, Role::SuperAdmin)
}

pub fn is_admin(actor_roles: Option<&RoleSet>) -> bool {
    has_any_role(actor_roles, Role::Admin)
}

/// Whether the actor holds `tier` or any role ranked above it.
pub fn is_at_least(actor_roles: Option<&RoleSet>, tier: Role) -> bool {
    has_any_role(actor_roles, Role::at_least(tier))
}

/// `SuperAdmin` or `Admin`.
pub fn is_at_least_admin(actor_roles: Option<&RoleSet>) -> bool {
    is_at_least(actor_roles, Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roles(r: &[Role]) -> RoleSet {
        RoleSet::from(r)
    }

    #[test]
    fn absent_or_empty_actor_never_matches() {
        for actor in [None, Some(&RoleSet::new())] {
            assert!(!is_super_admin(actor));
            assert!(!is_admin(actor));
            assert!(!is_at_least_admin(actor));
            assert!(!has_any_role(actor, Role::Editor));
            assert!(!has_any_role(actor, Role::HIERARCHY));
        }
    }

    #[test]
    fn empty_requirement_is_never_satisfied() {
        let everyone = roles(&Role::HIERARCHY);
        assert!(!has_any_role(Some(&everyone), RoleSet::new()));
        assert!(!has_any_role(Some(&everyone), Vec::<Role>::new()));
    }

    #[test]
    fn admin_only_is_at_least_admin_but_not_super_admin() {
        let admin = roles(&[Role::Admin]);
        assert!(is_at_least_admin(Some(&admin)));
        assert!(is_admin(Some(&admin)));
        assert!(!is_super_admin(Some(&admin)));
    }

    #[test]
    fn super_admin_without_admin_is_at_least_admin() {
        let super_admin = roles(&[Role::SuperAdmin]);
        assert!(is_at_least_admin(Some(&super_admin)));
        assert!(!is_admin(Some(&super_admin)));
    }

    #[test]
    fn editor_is_not_at_least_admin() {
        let editor = roles(&[Role::Editor]);
        assert!(!is_at_least_admin(Some(&editor)));
        assert!(is_at_least(Some(&editor), Role::Editor));
    }

    fn role_vec() -> impl Strategy<Value = Vec<Role>> {
        proptest::collection::vec(proptest::sample::select(Role::HIERARCHY.to_vec()), 0..6)
    }

    fn role_vec_and_shuffle() -> impl Strategy<Value = (Vec<Role>, Vec<Role>)> {
        role_vec().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn empty_requirement_denies_everyone(actor in role_vec()) {
            let actor = RoleSet::from(actor);
            prop_assert!(!has_any_role(Some(&actor), RoleSet::new()));
        }

        #[test]
        fn super_admin_always_at_least_admin(mut actor in role_vec()) {
            actor.push(Role::SuperAdmin);
            prop_assert!(is_at_least_admin(Some(&RoleSet::from(actor))));
        }

        #[test]
        fn order_does_not_matter(
            (actor, actor_shuffled) in role_vec_and_shuffle(),
            (required, required_shuffled) in role_vec_and_shuffle(),
        ) {
            let a = RoleSet::from(actor);
            let b = RoleSet::from(actor_shuffled);
            prop_assert_eq!(
                has_any_role(Some(&a), required),
                has_any_role(Some(&b), required_shuffled)
            );
        }

        #[test]
        fn single_role_equals_singleton_set(
            actor in role_vec(),
            role in proptest::sample::select(Role::HIERARCHY.to_vec()),
        ) {
            let actor = RoleSet::from(actor);
            prop_assert_eq!(
                has_any_role(Some(&actor), role),
                has_any_role(Some(&actor), RoleSet::from([role]))
            );
        }

        #[test]
        fn at_least_matches_rank_comparison(
            actor in role_vec(),
            tier in proptest::sample::select(Role::HIERARCHY.to_vec()),
        ) {
            let expected = actor.iter().any(|r| r.rank() <= tier.rank());
            prop_assert_eq!(is_at_least(Some(&RoleSet::from(actor)), tier), expected);
        }
    }
}
