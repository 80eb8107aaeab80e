//! Row models and insert DTOs for the content tables.

pub mod category;
pub mod contact_submission;
pub mod post;
pub mod service;
pub mod tag;
pub mod user;

use validator::ValidationError;

/// `validator` adapter for [`folio_core::slug::validate_slug`].
pub(crate) fn slug_rule(slug: &str) -> Result<(), ValidationError> {
    folio_core::slug::validate_slug(slug).map_err(|_| ValidationError::new("slug"))
}
