//! Privacy policy and terms of use: one free-text document each, edited
//! through its own session and written to the local store on save.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::editing::{require_text, EditSession, FieldError, Outcome, Validate};
use crate::errors::AppError;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    PrivacyPolicy,
    TermsOfUse,
}

impl PolicyKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            PolicyKind::PrivacyPolicy => "privacyPolicy",
            PolicyKind::TermsOfUse => "termsOfUse",
        }
    }

    /// Last-saved time, RFC 3339, stored beside the document text.
    pub fn updated_at_key(&self) -> String {
        format!("{}UpdatedAt", self.storage_key())
    }

    pub fn title(&self) -> &'static str {
        match self {
            PolicyKind::PrivacyPolicy => "Privacy Policy",
            PolicyKind::TermsOfUse => "Terms of Use",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDraft {
    pub content: String,
}

impl Validate for PolicyDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "content", &self.content);
        errors
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolicyView {
    pub kind: PolicyKind,
    pub title: String,
    /// HTML for the privacy policy, plain text for the terms of use.
    pub content: String,
    pub editing: bool,
    pub draft: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub persisted: bool,
}

struct PolicyDocument {
    kind: PolicyKind,
    content: String,
    updated_at: Option<DateTime<Utc>>,
    session: EditSession<PolicyDraft>,
    persisted: bool,
}

impl PolicyDocument {
    fn load(kind: PolicyKind, storage: &dyn KeyValueStore) -> Self {
        let content = match storage.get(kind.storage_key()) {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                warn!("Could not read {}: {e}", kind.title());
                String::new()
            }
        };
        let updated_at = match storage.get(&kind.updated_at_key()) {
            Ok(Some(raw)) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(at) => Some(at.with_timezone(&Utc)),
                Err(e) => {
                    warn!("Ignoring unreadable {} timestamp {raw:?}: {e}", kind.title());
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read {} timestamp: {e}", kind.title());
                None
            }
        };
        PolicyDocument {
            kind,
            content,
            updated_at,
            session: EditSession::new(),
            persisted: true,
        }
    }

    fn view(&self) -> PolicyView {
        PolicyView {
            kind: self.kind,
            title: self.kind.title().to_string(),
            content: self.content.clone(),
            editing: self.session.is_editing(),
            draft: self.session.draft().map(|d| d.content.clone()),
            updated_at: self.updated_at,
            persisted: self.persisted,
        }
    }
}

pub struct PolicyDocuments {
    privacy_policy: PolicyDocument,
    terms_of_use: PolicyDocument,
    storage: Arc<dyn KeyValueStore>,
}

impl PolicyDocuments {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        PolicyDocuments {
            privacy_policy: PolicyDocument::load(PolicyKind::PrivacyPolicy, storage.as_ref()),
            terms_of_use: PolicyDocument::load(PolicyKind::TermsOfUse, storage.as_ref()),
            storage,
        }
    }

    fn doc(&self, kind: PolicyKind) -> &PolicyDocument {
        match kind {
            PolicyKind::PrivacyPolicy => &self.privacy_policy,
            PolicyKind::TermsOfUse => &self.terms_of_use,
        }
    }

    fn doc_mut(&mut self, kind: PolicyKind) -> &mut PolicyDocument {
        match kind {
            PolicyKind::PrivacyPolicy => &mut self.privacy_policy,
            PolicyKind::TermsOfUse => &mut self.terms_of_use,
        }
    }

    pub fn view(&self, kind: PolicyKind) -> PolicyView {
        self.doc(kind).view()
    }

    pub fn begin_edit(&mut self, kind: PolicyKind) -> PolicyView {
        let doc = self.doc_mut(kind);
        let current = PolicyDraft {
            content: doc.content.clone(),
        };
        doc.session.begin(current);
        doc.view()
    }

    pub fn update_draft(
        &mut self,
        kind: PolicyKind,
        content: String,
    ) -> Result<PolicyView, AppError> {
        let doc = self.doc_mut(kind);
        let draft = doc
            .session
            .draft_mut()
            .ok_or_else(|| AppError::Conflict(format!("{} is not being edited", kind.title())))?;
        draft.content = content;
        Ok(doc.view())
    }

    pub fn cancel_edit(&mut self, kind: PolicyKind) -> PolicyView {
        let doc = self.doc_mut(kind);
        doc.session.cancel();
        doc.view()
    }

    /// Commits a non-blank draft, then writes it to the local store. A failed
    /// write keeps the new text in memory and reports `persisted: false`.
    pub fn save_edit(&mut self, kind: PolicyKind) -> Result<Outcome<PolicyView>, AppError> {
        let storage = self.storage.clone();
        let doc = self.doc_mut(kind);
        let outcome = doc
            .session
            .save(|draft| draft.content)
            .ok_or_else(|| AppError::Conflict(format!("{} is not being edited", kind.title())))?;

        let content = match outcome {
            Outcome::Done(content) => content,
            Outcome::Invalid(errors) => return Ok(Outcome::Invalid(errors)),
            Outcome::ConfirmationRequired(c) => return Ok(Outcome::ConfirmationRequired(c)),
        };

        let updated_at = Utc::now();
        let written = storage.set(kind.storage_key(), &content).and_then(|()| {
            storage.set(&kind.updated_at_key(), &updated_at.to_rfc3339())
        });
        doc.persisted = match written {
            Ok(()) => true,
            Err(e) => {
                warn!("{} kept in memory only: {e}", kind.title());
                false
            }
        };
        doc.content = content;
        doc.updated_at = Some(updated_at);
        info!("{} saved ({} bytes)", kind.title(), doc.content.len());
        Ok(Outcome::Done(doc.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BrokenStore, MemoryStore};

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::default())
    }

    fn edit_and_save(
        docs: &mut PolicyDocuments,
        kind: PolicyKind,
        text: &str,
    ) -> Outcome<PolicyView> {
        docs.begin_edit(kind);
        docs.update_draft(kind, text.to_string()).unwrap();
        docs.save_edit(kind).unwrap()
    }

    #[test]
    fn test_starts_empty_and_viewing() {
        let docs = PolicyDocuments::load(memory());
        let view = docs.view(PolicyKind::PrivacyPolicy);
        assert_eq!(view.content, "");
        assert!(!view.editing);
        assert_eq!(view.title, "Privacy Policy");
    }

    #[test]
    fn test_save_persists_and_reloads() {
        let storage = memory();
        let mut docs = PolicyDocuments::load(storage.clone());
        let outcome = edit_and_save(&mut docs, PolicyKind::PrivacyPolicy, "<h1>Data</h1>");
        assert!(outcome.is_done());
        assert!(docs.view(PolicyKind::PrivacyPolicy).updated_at.is_some());

        let reloaded = PolicyDocuments::load(storage);
        assert_eq!(reloaded.view(PolicyKind::PrivacyPolicy).content, "<h1>Data</h1>");
        assert_eq!(reloaded.view(PolicyKind::TermsOfUse).content, "");
    }

    #[test]
    fn test_updated_at_survives_reload() {
        let storage = memory();
        let mut docs = PolicyDocuments::load(storage.clone());
        edit_and_save(&mut docs, PolicyKind::TermsOfUse, "Be kind.");
        let saved_at = docs.view(PolicyKind::TermsOfUse).updated_at;
        assert!(storage.get("termsOfUseUpdatedAt").unwrap().is_some());

        let reloaded = PolicyDocuments::load(storage);
        assert_eq!(reloaded.view(PolicyKind::TermsOfUse).updated_at, saved_at);
        assert_eq!(reloaded.view(PolicyKind::PrivacyPolicy).updated_at, None);
    }

    #[test]
    fn test_unreadable_timestamp_loads_as_unknown() {
        let storage = memory();
        storage.set("privacyPolicy", "<p>text</p>").unwrap();
        storage.set("privacyPolicyUpdatedAt", "yesterday").unwrap();
        let docs = PolicyDocuments::load(storage);
        let view = docs.view(PolicyKind::PrivacyPolicy);
        assert_eq!(view.content, "<p>text</p>");
        assert_eq!(view.updated_at, None);
    }

    #[test]
    fn test_terms_are_persisted_under_their_own_key() {
        let storage = memory();
        let mut docs = PolicyDocuments::load(storage.clone());
        edit_and_save(&mut docs, PolicyKind::TermsOfUse, "Be respectful.");
        assert_eq!(storage.get("termsOfUse").unwrap().as_deref(), Some("Be respectful."));
        assert!(storage.get("privacyPolicy").unwrap().is_none());
    }

    #[test]
    fn test_cancel_restores_saved_text() {
        let mut docs = PolicyDocuments::load(memory());
        edit_and_save(&mut docs, PolicyKind::TermsOfUse, "v1");
        docs.begin_edit(PolicyKind::TermsOfUse);
        docs.update_draft(PolicyKind::TermsOfUse, "v2".to_string()).unwrap();
        let view = docs.cancel_edit(PolicyKind::TermsOfUse);
        assert_eq!(view.content, "v1");
        assert_eq!(view.draft, None);
    }

    #[test]
    fn test_blank_draft_is_rejected() {
        let mut docs = PolicyDocuments::load(memory());
        let outcome = edit_and_save(&mut docs, PolicyKind::PrivacyPolicy, "   ");
        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert!(docs.view(PolicyKind::PrivacyPolicy).editing);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut docs = PolicyDocuments::load(memory());
        docs.begin_edit(PolicyKind::PrivacyPolicy);
        assert!(!docs.view(PolicyKind::TermsOfUse).editing);
        assert!(docs.update_draft(PolicyKind::TermsOfUse, "x".to_string()).is_err());
    }

    #[test]
    fn test_storage_failure_keeps_text_in_memory() {
        let mut docs = PolicyDocuments::load(Arc::new(BrokenStore));
        match edit_and_save(&mut docs, PolicyKind::PrivacyPolicy, "<p>v1</p>") {
            Outcome::Done(view) => {
                assert_eq!(view.content, "<p>v1</p>");
                assert!(!view.persisted);
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn test_save_without_edit_conflicts() {
        let mut docs = PolicyDocuments::load(memory());
        assert!(matches!(
            docs.save_edit(PolicyKind::TermsOfUse),
            Err(AppError::Conflict(_))
        ));
    }
}
