#![forbid(unsafe_code)]
//! Content model SSOT for the Patchline Drywall site.
//!
//! Everything the site renders comes from the static tables defined here:
//! service-area locations (states and their cities), the service catalog,
//! and blog posts. Lead submissions are transient wire payloads and are
//! never persisted.

mod lead;
mod location;
mod post;
mod service;
mod slug;
mod store;

pub use lead::{ContactSubmission, QuoteSubmission};
pub use location::{City, LocationTable, State};
pub use post::Post;
pub use service::Service;
pub use slug::{Slug, ValidationError, SLUG_MAX_LEN};
pub use store::ContentStore;
