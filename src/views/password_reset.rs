//! Password-reset form.
//!
//! Holds the two draft fields locally; nothing is sent until the user
//! confirms, and confirming hands back the whole password at once.

pub const MISMATCH_MESSAGE: &str = "Passwords do not match";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetForm {
    password: String,
    confirmation: String,
}

impl PasswordResetForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn set_confirmation(&mut self, value: impl Into<String>) {
        self.confirmation = value.into();
    }

    /// Confirm is enabled only for two equal, non-empty entries
    pub fn can_confirm(&self) -> bool {
        !self.password.is_empty() && self.password == self.confirmation
    }

    /// Shown once both fields have content and differ
    pub fn mismatch_message(&self) -> Option<&'static str> {
        let both_filled = !self.password.is_empty() && !self.confirmation.is_empty();
        (both_filled && self.password != self.confirmation).then_some(MISMATCH_MESSAGE)
    }

    /// Consume the form, yielding the password to submit
    pub fn confirm(self) -> Option<String> {
        if self.can_confirm() {
            Some(self.password)
        } else {
            None
        }
    }

    /// Drop both drafts
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
