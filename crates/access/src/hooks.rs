//! Listing write hooks run before the document is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estatecms_core::DocumentStatus;

use crate::collections::Operation;

/// The part of a listing write the hooks look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingChange {
    pub operation: Operation,
    #[serde(rename = "_status", default)]
    pub status: DocumentStatus,
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Stamp `published_at` on creates and updates that do not carry one yet.
///
/// An existing timestamp is never overwritten, so re-saving a listing keeps
/// its original publication date.
pub fn populate_published_at(mut change: ListingChange, now: DateTime<Utc>) -> ListingChange {
    if matches!(change.operation, Operation::Create | Operation::Update)
        && change.published_at.is_none()
    {
        change.published_at = Some(now);
    }
    change
}
