//! Access policies of the content collections.
//!
//! | collection       | admin UI      | read                       | create / update / delete |
//! |------------------|---------------|----------------------------|--------------------------|
//! | `users`          | authenticated | admin or super-admin       | admin or super-admin     |
//! | `listings`       | authenticated | authenticated or published | authenticated            |
//! | `property-types` | authenticated | anyone                     | authenticated            |
//!
//! The `roles` field on users is readable and writable by super-admins only,
//! and the users collection is hidden from everyone else in the admin UI.

use serde::{Deserialize, Serialize};

use estatecms_auth::{
    Role, RoleRequirement, RoleSet, authorize_principal, has_any_role, is_super_admin,
};

use crate::context::RequestContext;
use crate::result::{AccessError, AccessResult, ReadFilter};

/// Roles allowed to manage user accounts.
const USER_MANAGERS: [Role; 2] = [Role::Admin, Role::SuperAdmin];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Users,
    Listings,
    PropertyTypes,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Users,
        Collection::Listings,
        Collection::PropertyTypes,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Listings => "listings",
            Collection::PropertyTypes => "property-types",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Collection::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Access to the collection's admin UI.
    Admin,
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Admin => "admin",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields carrying their own access rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `users.roles`
    UserRoles,
}

impl Field {
    pub fn collection(&self) -> Collection {
        match self {
            Field::UserRoles => Collection::Users,
        }
    }
}

/// Collection-level access hook.
pub fn access(collection: Collection, operation: Operation, ctx: &RequestContext) -> AccessResult {
    let result = match (collection, operation) {
        (Collection::Users, Operation::Admin) => guard(ctx, RoleRequirement::Authenticated),
        (Collection::Users, _) => guard(ctx, USER_MANAGERS),
        (Collection::Listings, Operation::Read) => authenticated_or_published(ctx),
        (Collection::PropertyTypes, Operation::Read) => AccessResult::Allowed,
        (Collection::Listings | Collection::PropertyTypes, _) => {
            guard(ctx, RoleRequirement::Authenticated)
        }
    };

    tracing::debug!(
        collection = collection.slug(),
        %operation,
        authenticated = ctx.is_authenticated(),
        ?result,
        "collection access"
    );
    result
}

/// Like [`access`], but a denial becomes an error and a scoped read yields its filter.
pub fn enforce(
    collection: Collection,
    operation: Operation,
    ctx: &RequestContext,
) -> Result<Option<ReadFilter>, AccessError> {
    match access(collection, operation, ctx) {
        AccessResult::Allowed => Ok(None),
        AccessResult::Where(filter) => Ok(Some(filter)),
        AccessResult::Denied => Err(AccessError::Forbidden {
            collection,
            operation,
        }),
    }
}

/// Field-level access hook.
///
/// Only create, read and update are gated per field; other operations are
/// governed by the collection rule alone and report `true` here.
pub fn field_access(field: Field, operation: Operation, ctx: &RequestContext) -> bool {
    match (field, operation) {
        (Field::UserRoles, Operation::Create | Operation::Read | Operation::Update) => {
            has_any_role(ctx.roles(), Role::SuperAdmin)
        }
        (Field::UserRoles, Operation::Admin | Operation::Delete) => true,
    }
}

/// Whether the collection is hidden from this user's admin navigation.
pub fn is_hidden_in_admin(collection: Collection, ctx: &RequestContext) -> bool {
    match collection {
        Collection::Users => !is_super_admin(ctx.roles()),
        Collection::Listings | Collection::PropertyTypes => false,
    }
}

/// Roles assigned to a newly created user when none are given.
pub fn default_user_roles() -> RoleSet {
    RoleSet::from(Role::Admin)
}

fn guard(ctx: &RequestContext, required: impl Into<RoleRequirement>) -> AccessResult {
    authorize_principal(ctx.user(), required).into()
}

/// Signed-in users see everything; the public sees published documents only.
fn authenticated_or_published(ctx: &RequestContext) -> AccessResult {
    if ctx.is_authenticated() {
        AccessResult::Allowed
    } else {
        AccessResult::Where(ReadFilter::PublishedOnly)
    }
}
