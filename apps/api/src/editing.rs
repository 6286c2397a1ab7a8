//! View/Edit state machine shared by every editable screen.
//!
//! ```text
//! Viewing --begin--> Editing { draft }
//! Editing --cancel--> Viewing            (draft discarded)
//! Editing --save(valid)--> Viewing       (commit runs once)
//! Editing --save(invalid)--> Editing     (nothing committed)
//! ```
//!
//! Mutators report through `Outcome` instead of blocking dialogs; the caller
//! decides how to present a validation failure or a pending confirmation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A single failed required-field check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        FieldError::new(field, format!("{field} is required"))
    }
}

/// Required-field checks for a draft. An empty vec means the draft may commit.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// Pushes a `required` error when `value` is blank.
pub fn require_text(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::required(field));
    }
}

/// A yes/no gate in front of a destructive action.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Confirmation {
    pub action: String,
    pub prompt: String,
}

impl Confirmation {
    pub fn new(action: &str, prompt: impl Into<String>) -> Self {
        Confirmation {
            action: action.to_string(),
            prompt: prompt.into(),
        }
    }
}

/// Result of a user-initiated mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Invalid(Vec<FieldError>),
    ConfirmationRequired(Confirmation),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Invalid(errors) => Outcome::Invalid(errors),
            Outcome::ConfirmationRequired(c) => Outcome::ConfirmationRequired(c),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

/// Runs `action` only when the caller has already confirmed.
pub fn confirm_then<T>(
    confirmed: bool,
    confirmation: impl FnOnce() -> Confirmation,
    action: impl FnOnce() -> T,
) -> Outcome<T> {
    if confirmed {
        Outcome::Done(action())
    } else {
        Outcome::ConfirmationRequired(confirmation())
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Done(value) => (StatusCode::OK, Json(value)).into_response(),
            Outcome::Invalid(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Please fill all required fields",
                        "fields": fields
                    }
                })),
            )
                .into_response(),
            Outcome::ConfirmationRequired(confirmation) => (
                StatusCode::PRECONDITION_REQUIRED,
                Json(json!({ "confirmation": confirmation })),
            )
                .into_response(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Edit session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum EditState<D> {
    Viewing,
    Editing { draft: D },
}

#[derive(Debug, Clone)]
pub struct EditSession<D> {
    state: EditState<D>,
}

impl<D> Default for EditSession<D> {
    fn default() -> Self {
        EditSession {
            state: EditState::Viewing,
        }
    }
}

impl<D: Clone + Validate> EditSession<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Enters Editing with a copy of the current values. Re-entering while
    /// already editing keeps the existing draft and returns false.
    pub fn begin(&mut self, current: D) -> bool {
        if self.is_editing() {
            return false;
        }
        self.state = EditState::Editing { draft: current };
        true
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            EditState::Editing { draft } => Some(draft),
            EditState::Viewing => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            EditState::Editing { draft } => Some(draft),
            EditState::Viewing => None,
        }
    }

    /// Discards the draft. Returns it when there was one.
    pub fn cancel(&mut self) -> Option<D> {
        match std::mem::replace(&mut self.state, EditState::Viewing) {
            EditState::Editing { draft } => Some(draft),
            EditState::Viewing => None,
        }
    }

    /// Validates the draft and, when clean, hands it to `commit` and returns
    /// to Viewing. Returns `None` when the session is not editing.
    pub fn save<T>(&mut self, commit: impl FnOnce(D) -> T) -> Option<Outcome<T>> {
        let errors = self.draft()?.validate();
        if !errors.is_empty() {
            return Some(Outcome::Invalid(errors));
        }
        let draft = self.cancel()?;
        Some(Outcome::Done(commit(draft)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        text: String,
    }

    impl Validate for Note {
        fn validate(&self) -> Vec<FieldError> {
            let mut errors = Vec::new();
            require_text(&mut errors, "text", &self.text);
            errors
        }
    }

    fn note(text: &str) -> Note {
        Note {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_starts_viewing() {
        let session: EditSession<Note> = EditSession::new();
        assert!(!session.is_editing());
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_begin_snapshots_current_values() {
        let mut session = EditSession::new();
        assert!(session.begin(note("original")));
        assert!(session.is_editing());
        assert_eq!(session.draft(), Some(&note("original")));
    }

    #[test]
    fn test_begin_twice_keeps_draft() {
        let mut session = EditSession::new();
        session.begin(note("original"));
        session.draft_mut().unwrap().text = "changed".to_string();
        assert!(!session.begin(note("original")));
        assert_eq!(session.draft(), Some(&note("changed")));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut session = EditSession::new();
        session.begin(note("original"));
        session.draft_mut().unwrap().text = "changed".to_string();
        assert_eq!(session.cancel(), Some(note("changed")));
        assert_eq!(session.state, EditState::Viewing);
    }

    #[test]
    fn test_save_commits_once_and_returns_to_viewing() {
        let mut session = EditSession::new();
        session.begin(note("original"));
        let mut committed = Vec::new();
        let outcome = session.save(|draft| committed.push(draft.text));
        assert_eq!(outcome, Some(Outcome::Done(())));
        assert_eq!(committed, vec!["original".to_string()]);
        assert!(!session.is_editing());
    }

    #[test]
    fn test_invalid_save_stays_editing_without_commit() {
        let mut session = EditSession::new();
        session.begin(note("   "));
        let mut called = false;
        let outcome = session.save(|_| called = true);
        assert_eq!(
            outcome,
            Some(Outcome::Invalid(vec![FieldError::required("text")]))
        );
        assert!(!called);
        assert!(session.is_editing());
    }

    #[test]
    fn test_save_while_viewing_is_none() {
        let mut session: EditSession<Note> = EditSession::new();
        assert!(session.save(|_| ()).is_none());
    }

    #[test]
    fn test_confirm_then_requires_confirmation() {
        let mut ran = false;
        let outcome = confirm_then(false, || Confirmation::new("delete", "Sure?"), || ran = true);
        assert!(matches!(outcome, Outcome::ConfirmationRequired(_)));
        assert!(!ran);

        let outcome = confirm_then(true, || Confirmation::new("delete", "Sure?"), || 7);
        assert_eq!(outcome, Outcome::Done(7));
    }
}
