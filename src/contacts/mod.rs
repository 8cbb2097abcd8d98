mod filter;
mod form;
mod validate;

pub use filter::filter_contacts;
pub use form::DraftForm;
pub use validate::{Field, FieldErrors, validate_draft};
