use estatecms_auth::{Principal, RoleSet};

/// Per-request input handed to access hooks by the framework adapter.
///
/// Immutable once built; one per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    user: Option<Principal>,
    disable_revalidate: bool,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: Principal) -> Self {
        Self {
            user: Some(user),
            disable_revalidate: false,
        }
    }

    /// Suppress revalidation notices for this request (bulk imports, seeding).
    pub fn without_revalidation(mut self) -> Self {
        self.disable_revalidate = true;
        self
    }

    pub fn user(&self) -> Option<&Principal> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn roles(&self) -> Option<&RoleSet> {
        self.user.as_ref().map(Principal::roles)
    }

    pub fn revalidation_disabled(&self) -> bool {
        self.disable_revalidate
    }
}
