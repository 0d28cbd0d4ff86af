use serde::Serialize;
use thiserror::Error;

use estatecms_core::DomainError;

use crate::evaluator::has_any_role;
use crate::role_set::RoleSet;
use crate::roles::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden: requires one of {required}")]
    Forbidden { required: RoleSet },

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::unauthorized(value.to_string())
    }
}

/// What a guarded operation demands of the caller.
///
/// `Authenticated` (no role constraint) and `AnyOf` with an empty set are
/// different requirements: the first admits any signed-in principal, the
/// second admits nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    Authenticated,
    AnyOf(RoleSet),
}

impl RoleRequirement {
    pub fn any_of(roles: impl Into<RoleSet>) -> Self {
        Self::AnyOf(roles.into())
    }

    /// `tier` or anything ranked above it.
    pub fn at_least(tier: Role) -> Self {
        Self::AnyOf(Role::at_least(tier))
    }

    pub fn required_roles(&self) -> Option<&RoleSet> {
        match self {
            RoleRequirement::Authenticated => None,
            RoleRequirement::AnyOf(roles) => Some(roles),
        }
    }
}

impl From<Role> for RoleRequirement {
    fn from(role: Role) -> Self {
        Self::AnyOf(role.into())
    }
}

impl<const N: usize> From<[Role; N]> for RoleRequirement {
    fn from(roles: [Role; N]) -> Self {
        Self::AnyOf(roles.into())
    }
}

impl From<&[Role]> for RoleRequirement {
    fn from(roles: &[Role]) -> Self {
        Self::AnyOf(roles.into())
    }
}

impl From<Vec<Role>> for RoleRequirement {
    fn from(roles: Vec<Role>) -> Self {
        Self::AnyOf(roles.into())
    }
}

impl From<RoleSet> for RoleRequirement {
    fn from(roles: RoleSet) -> Self {
        Self::AnyOf(roles)
    }
}

impl<T: Into<RoleSet>> From<Option<T>> for RoleRequirement {
    fn from(roles: Option<T>) -> Self {
        match roles {
            Some(roles) => Self::AnyOf(roles.into()),
            None => Self::Authenticated,
        }
    }
}

/// Composed guard used for every create/read/update/delete gate.
///
/// - requirement omitted (`Authenticated`): any authenticated principal passes
/// - otherwise: authenticated **and** holding one of the required roles
///
/// Never fails; malformed or missing role data simply denies.
pub fn authorize(
    is_authenticated: bool,
    actor_roles: Option<&RoleSet>,
    required: impl Into<RoleRequirement>,
) -> bool {
    match required.into() {
        RoleRequirement::Authenticated => is_authenticated,
        RoleRequirement::AnyOf(roles) => is_authenticated && has_any_role(actor_roles, roles),
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

impl From<bool> for AccessDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }
}

/// A single authorization check, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub is_authenticated: bool,
    pub actor_roles: RoleSet,
    pub required: RoleRequirement,
}

impl AccessRequest {
    pub fn new(
        is_authenticated: bool,
        actor_roles: Option<&RoleSet>,
        required: impl Into<RoleRequirement>,
    ) -> Self {
        Self {
            is_authenticated,
            actor_roles: actor_roles.cloned().unwrap_or_default(),
            required: required.into(),
        }
    }

    pub fn evaluate(&self) -> AccessDecision {
        let decision = AccessDecision::from(authorize(
            self.is_authenticated,
            Some(&self.actor_roles),
            self.required.clone(),
        ));
        tracing::trace!(
            authenticated = self.is_authenticated,
            roles = %self.actor_roles,
            ?decision,
            "access evaluated"
        );
        decision
    }

    /// Evaluate and map a deny to the error an adapter should surface.
    pub fn check(&self) -> Result<(), AuthzError> {
        match self.evaluate() {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny if !self.is_authenticated => Err(AuthzError::Unauthenticated),
            AccessDecision::Deny => Err(AuthzError::Forbidden {
                required: self.required.required_roles().cloned().unwrap_or_default(),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Produced on demand for debugging or audit by the caller; the decision
/// functions above never build one.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub decision: AccessDecision,

    /// Roles the operation demanded; `None` when any authenticated principal passes.
    pub required_roles: Option<RoleSet>,

    pub actor_roles: RoleSet,

    /// Required roles the actor actually holds.
    pub matched_roles: RoleSet,

    /// Human-readable reason for the decision.
    pub reason: String,

    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    MissingRole,
    EmptyRequirement,
}

/// Explain why `request` is (or would be) allowed or denied.
///
/// The `decision` field always equals [`AccessRequest::evaluate`].
pub fn explain_authorization(request: &AccessRequest) -> AuthorizationExplanation {
    let required_roles = request.required.required_roles().cloned();
    let matched_roles = required_roles
        .as_ref()
        .map(|required| request.actor_roles.intersection(required))
        .unwrap_or_default();

    let explanation = |decision: AccessDecision,
                       reason: String,
                       denial_reason: Option<DenialReason>| AuthorizationExplanation {
        decision,
        required_roles: required_roles.clone(),
        actor_roles: request.actor_roles.clone(),
        matched_roles: matched_roles.clone(),
        reason,
        denial_reason,
    };

    if !request.is_authenticated {
        return explanation(
            AccessDecision::Deny,
            "Principal is not authenticated".to_string(),
            Some(DenialReason {
                kind: DenialKind::Unauthenticated,
                message: "Anonymous requests never pass a guarded operation".to_string(),
                suggestions: vec!["Sign in before performing this operation".to_string()],
            }),
        );
    }

    match &required_roles {
        None => explanation(
            AccessDecision::Allow,
            "Operation requires authentication only".to_string(),
            None,
        ),
        Some(required) if required.is_empty() => explanation(
            AccessDecision::Deny,
            "Operation requires a role from an empty set".to_string(),
            Some(DenialReason {
                kind: DenialKind::EmptyRequirement,
                message: "An empty role requirement cannot be satisfied".to_string(),
                suggestions: vec![
                    "Omit the requirement to admit any authenticated principal".to_string(),
                ],
            }),
        ),
        Some(required) if !matched_roles.is_empty() => explanation(
            AccessDecision::Allow,
            format!("Principal holds {matched_roles}, satisfying one of {required}"),
            None,
        ),
        Some(required) => {
            let mut suggestions = vec![format!("Assign one of the roles {required}")];
            if let Some(highest) = request.actor_roles.highest() {
                suggestions.push(format!(
                    "Highest role held is '{highest}', which is not in the required set"
                ));
            }

            explanation(
                AccessDecision::Deny,
                format!(
                    "Principal holds {} but the operation requires one of {required}",
                    request.actor_roles
                ),
                Some(DenialReason {
                    kind: DenialKind::MissingRole,
                    message: format!("Missing any of the required roles {required}"),
                    suggestions,
                }),
            )
        }
    }
}
