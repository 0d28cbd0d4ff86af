//! `estatecms-access` — the CMS-facing adapters over the authorization core.
//!
//! The content framework calls these once per request. They translate the
//! request into `estatecms-auth` checks and return the framework's access
//! result; nothing here decides policy beyond picking the requirement.

pub mod collections;
pub mod context;
pub mod hooks;
pub mod result;
pub mod revalidate;

pub use collections::{
    Collection, Field, Operation, access, default_user_roles, enforce, field_access,
    is_hidden_in_admin,
};
pub use context::RequestContext;
pub use hooks::{ListingChange, populate_published_at};
pub use result::{AccessError, AccessResult, ReadFilter};
pub use revalidate::{
    LISTINGS_SITEMAP_TAG, ListingSnapshot, RecordingSink, RecordingSinkError, RevalidationNotice,
    RevalidationSink, after_change, after_delete,
};
