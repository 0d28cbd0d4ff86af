//! `estatecms-auth` — pure role-based authorization core.
//!
//! This crate is intentionally decoupled from HTTP, the CMS hook signatures
//! and storage. Every decision function is total: degenerate input (no user,
//! no roles, empty requirement) yields a deny, never an error.

pub mod authorize;
pub mod evaluator;
pub mod principal;
pub mod role_set;
pub mod roles;

pub use authorize::{
    AccessDecision, AccessRequest, AuthorizationExplanation, AuthzError, DenialKind,
    DenialReason, RoleRequirement, authorize, explain_authorization,
};
pub use evaluator::{has_any_role, is_admin, is_at_least, is_at_least_admin, is_super_admin};
pub use principal::{Principal, authorize_principal};
pub use role_set::RoleSet;
pub use roles::{Role, RoleOption};
