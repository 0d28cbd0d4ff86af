//! Cache revalidation notices for listings.
//!
//! Hooks only decide *what* should be revalidated and hand each notice to a
//! [`RevalidationSink`]; purging the web framework's cache is the sink's job.
//! A failing sink is logged and never fails the write that triggered it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use estatecms_core::{DocumentId, DocumentStatus, Entity, Slug};

use crate::context::RequestContext;

/// Cache tag covering the listings sitemap.
pub const LISTINGS_SITEMAP_TAG: &str = "listings-sitemap";

/// The listing state the revalidation hooks need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub id: DocumentId,
    pub slug: Slug,
    #[serde(rename = "_status", default)]
    pub status: DocumentStatus,
}

impl ListingSnapshot {
    pub fn new(id: DocumentId, slug: Slug, status: DocumentStatus) -> Self {
        Self { id, slug, status }
    }

    /// Public path of the listing page.
    pub fn path(&self) -> String {
        format!("/listings/{}", self.slug)
    }
}

impl Entity for ListingSnapshot {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One page path plus the cache tag to invalidate alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationNotice {
    /// Listing whose page is stale.
    pub document: DocumentId,
    pub path: String,
    pub tag: String,
}

impl RevalidationNotice {
    fn for_listing(listing: &ListingSnapshot) -> Self {
        Self {
            document: listing.id,
            path: listing.path(),
            tag: LISTINGS_SITEMAP_TAG.to_string(),
        }
    }
}

/// Receiver of revalidation notices (the web framework's cache, a queue, ...).
pub trait RevalidationSink: Send + Sync {
    type Error: core::fmt::Display;

    fn revalidate(&self, notice: &RevalidationNotice) -> Result<(), Self::Error>;
}

impl<S> RevalidationSink for Arc<S>
where
    S: RevalidationSink + ?Sized,
{
    type Error = S::Error;

    fn revalidate(&self, notice: &RevalidationNotice) -> Result<(), Self::Error> {
        (**self).revalidate(notice)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordingSinkError {
    #[error("recording sink lock poisoned")]
    Poisoned,
}

/// In-memory sink that keeps every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<RevalidationNotice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Result<Vec<RevalidationNotice>, RecordingSinkError> {
        let notices = self.notices.lock().map_err(|_| RecordingSinkError::Poisoned)?;
        Ok(notices.clone())
    }
}

impl RevalidationSink for RecordingSink {
    type Error = RecordingSinkError;

    fn revalidate(&self, notice: &RevalidationNotice) -> Result<(), Self::Error> {
        let mut notices = self.notices.lock().map_err(|_| RecordingSinkError::Poisoned)?;
        notices.push(notice.clone());
        Ok(())
    }
}

/// After a listing is created or updated.
///
/// - published now: revalidate its current path
/// - was published and no longer is: revalidate the old path
///
/// Returns the notices that were emitted.
pub fn after_change<S: RevalidationSink + ?Sized>(
    doc: &ListingSnapshot,
    previous: &ListingSnapshot,
    ctx: &RequestContext,
    sink: &S,
) -> Vec<RevalidationNotice> {
    if ctx.revalidation_disabled() {
        return Vec::new();
    }

    let mut notices = Vec::new();

    if doc.status.is_published() {
        tracing::info!(document = %doc.id, path = %doc.path(), "revalidating listing");
        notices.push(RevalidationNotice::for_listing(doc));
    }

    if previous.status.is_published() && !doc.status.is_published() {
        tracing::info!(
            document = %previous.id,
            path = %previous.path(),
            "revalidating old listing path"
        );
        notices.push(RevalidationNotice::for_listing(previous));
    }

    emit(sink, &notices);
    notices
}

/// After a listing is deleted; always revalidates its path.
pub fn after_delete<S: RevalidationSink + ?Sized>(
    doc: &ListingSnapshot,
    ctx: &RequestContext,
    sink: &S,
) -> Vec<RevalidationNotice> {
    if ctx.revalidation_disabled() {
        return Vec::new();
    }

    let notices = vec![RevalidationNotice::for_listing(doc)];
    emit(sink, &notices);
    notices
}

fn emit<S: RevalidationSink + ?Sized>(sink: &S, notices: &[RevalidationNotice]) {
    for notice in notices {
        if let Err(err) = sink.revalidate(notice) {
            tracing::warn!(path = %notice.path, error = %err, "revalidation failed");
        }
    }
}
