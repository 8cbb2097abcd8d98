use thiserror::Error;

use crate::api::ApiError;
use crate::contacts::FieldErrors;

#[derive(Error, Debug)]
pub enum ContactsError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid contact: {0}")]
    Validation(FieldErrors),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ContactDraft;
    use crate::contacts::validate_draft;

    #[test]
    fn validation_error_display() {
        let errors = validate_draft(&ContactDraft::new("A", "bad", "123"));
        let e = ContactsError::Validation(errors);
        assert_eq!(format!("{}", e), "invalid contact: email: Email is invalid");
    }
}
