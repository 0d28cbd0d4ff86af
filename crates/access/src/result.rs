//! What an access hook hands back to the content framework.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use estatecms_auth::AccessDecision;
use estatecms_core::DocumentStatus;

use crate::collections::{Collection, Operation};

/// Query predicate that narrows a read to a subset of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFilter {
    /// Only documents whose `_status` is `published`.
    PublishedOnly,
}

impl ReadFilter {
    /// Where-clause in the shape the CMS query layer expects.
    pub fn to_where(&self) -> Value {
        match self {
            ReadFilter::PublishedOnly => json!({
                "_status": { "equals": DocumentStatus::Published.as_str() }
            }),
        }
    }

    pub fn matches(&self, status: DocumentStatus) -> bool {
        match self {
            ReadFilter::PublishedOnly => status.is_published(),
        }
    }
}

/// Outcome of a collection access hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResult {
    Allowed,
    Denied,
    /// Allowed, scoped to documents matching the filter.
    Where(ReadFilter),
}

impl AccessResult {
    /// Whether a document in state `status` is reachable under this result.
    pub fn permits(&self, status: DocumentStatus) -> bool {
        match self {
            AccessResult::Allowed => true,
            AccessResult::Denied => false,
            AccessResult::Where(filter) => filter.matches(status),
        }
    }

    /// `true`, `false`, or a where-clause object.
    pub fn to_json(&self) -> Value {
        match self {
            AccessResult::Allowed => Value::Bool(true),
            AccessResult::Denied => Value::Bool(false),
            AccessResult::Where(filter) => filter.to_where(),
        }
    }
}

impl From<bool> for AccessResult {
    fn from(allowed: bool) -> Self {
        if allowed {
            AccessResult::Allowed
        } else {
            AccessResult::Denied
        }
    }
}

impl From<AccessDecision> for AccessResult {
    fn from(decision: AccessDecision) -> Self {
        decision.is_allowed().into()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("forbidden: {operation} on '{collection}'")]
    Forbidden {
        collection: Collection,
        operation: Operation,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_filter_renders_where_clause() {
        let clause = AccessResult::Where(ReadFilter::PublishedOnly).to_json();
        assert_eq!(clause, json!({ "_status": { "equals": "published" } }));
    }

    #[test]
    fn plain_results_render_as_booleans() {
        assert_eq!(AccessResult::Allowed.to_json(), Value::Bool(true));
        assert_eq!(AccessResult::Denied.to_json(), Value::Bool(false));
    }

    #[test]
    fn permits_respects_filter() {
        let scoped = AccessResult::Where(ReadFilter::PublishedOnly);
        assert!(scoped.permits(DocumentStatus::Published));
        assert!(!scoped.permits(DocumentStatus::Draft));
        assert!(AccessResult::Allowed.permits(DocumentStatus::Draft));
        assert!(!AccessResult::Denied.permits(DocumentStatus::Published));
    }

    #[test]
    fn decision_converts() {
        assert_eq!(AccessResult::from(AccessDecision::Allow), AccessResult::Allowed);
        assert_eq!(AccessResult::from(AccessDecision::Deny), AccessResult::Denied);
    }
}
