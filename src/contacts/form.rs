use crate::api::ContactDraft;

use super::validate::{Field, FieldErrors, validate_draft};

/// Add-contact form state. Lives only while the form is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub draft: ContactDraft,
    pub errors: FieldErrors,
    pub focus: Field,
    pub submitting: bool,
    /// Server-side failure of the last submit, shown above the buttons.
    pub submit_error: Option<String>,
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.draft.name,
            Field::Email => &self.draft.email,
            Field::Phone => &self.draft.phone,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.draft.name,
            Field::Email => &mut self.draft.email,
            Field::Phone => &mut self.draft.phone,
        }
    }

    /// Replace a field's value. Editing a field clears only that field's error.
    #[cfg(test)]
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
        self.errors.clear_field(field);
    }

    pub fn push_char(&mut self, c: char) {
        let field = self.focus;
        self.value_mut(field).push(c);
        self.errors.clear_field(field);
    }

    pub fn pop_char(&mut self) {
        let field = self.focus;
        if self.value_mut(field).pop().is_some() {
            self.errors.clear_field(field);
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Run validation; on failure the errors are kept on the form and the
    /// focus moves to the first offending field.
    pub fn validate(&mut self) -> Result<ContactDraft, FieldErrors> {
        let errors = validate_draft(&self.draft);
        if errors.is_empty() {
            self.errors = FieldErrors::default();
            Ok(self.draft.clone())
        } else {
            if let Some((field, _)) = errors.iter().next() {
                self.focus = field;
            }
            self.errors = errors.clone();
            Err(errors)
        }
    }
}
