//! The academy screen's blogs, audiobooks and e-books.
//!
//! Mutations are scoped to the active tab. After every successful mutation
//! the whole library is written to the local store under `mediaData`; a
//! failed write is logged and the change stays in memory for the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::content::models::{ContentItem, ContentKind, MediaLibrary};
use crate::editing::{confirm_then, Confirmation, EditSession, FieldError, Outcome, Validate};
use crate::errors::AppError;
use crate::storage::KeyValueStore;

pub const MEDIA_KEY: &str = "mediaData";

/// The item being edited and its position in the active tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub index: usize,
    pub item: ContentItem,
}

impl Validate for ItemDraft {
    fn validate(&self) -> Vec<FieldError> {
        self.item.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionCounts {
    pub blogs: usize,
    pub audiobooks: usize,
    pub ebooks: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionView {
    pub active: ContentKind,
    pub items: Vec<ContentItem>,
    pub counts: CollectionCounts,
    pub editing_index: Option<usize>,
    pub draft: Option<ContentItem>,
    /// False when the last write to the local store failed.
    pub persisted: bool,
}

pub struct ContentCollections {
    library: MediaLibrary,
    active: ContentKind,
    session: EditSession<ItemDraft>,
    storage: Arc<dyn KeyValueStore>,
    persisted: bool,
}

impl ContentCollections {
    /// Reads the library back from the local store. Unreadable or malformed
    /// data starts an empty library.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let library = match storage.get(MEDIA_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<MediaLibrary>(&raw) {
                Ok(library) => library,
                Err(e) => {
                    error!("Discarding malformed '{MEDIA_KEY}' data: {e}");
                    MediaLibrary::default()
                }
            },
            Ok(None) => MediaLibrary::default(),
            Err(e) => {
                warn!("Could not read '{MEDIA_KEY}', starting empty: {e}");
                MediaLibrary::default()
            }
        };
        info!(
            "Academy library loaded: {} blogs, {} audiobooks, {} ebooks",
            library.blogs.len(),
            library.audiobooks.len(),
            library.ebooks.len()
        );
        ContentCollections {
            library,
            active: ContentKind::default(),
            session: EditSession::new(),
            storage,
            persisted: true,
        }
    }

    pub fn view(&self) -> CollectionView {
        let draft = self.session.draft();
        CollectionView {
            active: self.active,
            items: self.library.items(self.active),
            counts: CollectionCounts {
                blogs: self.library.blogs.len(),
                audiobooks: self.library.audiobooks.len(),
                ebooks: self.library.ebooks.len(),
            },
            editing_index: draft.map(|d| d.index),
            draft: draft.map(|d| d.item.clone()),
            persisted: self.persisted,
        }
    }

    /// Switches tabs, dropping any draft from the previous tab.
    pub fn select_tab(&mut self, kind: ContentKind) -> CollectionView {
        if kind != self.active && self.session.cancel().is_some() {
            info!("Discarded {} draft on tab switch", self.active.as_str());
        }
        self.active = kind;
        self.view()
    }

    fn check_active(&self, item: &ContentItem) -> Result<(), AppError> {
        if item.kind() != self.active {
            return Err(AppError::Validation(format!(
                "Cannot store a {} item while the {} tab is active",
                item.kind().as_str(),
                self.active.as_str()
            )));
        }
        Ok(())
    }

    fn not_found(&self, index: usize) -> AppError {
        AppError::NotFound(format!("Item {index} not found in {}", self.active.as_str()))
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.library)
            .map_err(|e| e.to_string())
            .and_then(|json| self.storage.set(MEDIA_KEY, &json).map_err(|e| e.to_string()));
        self.persisted = match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Academy changes kept in memory only: {e}");
                false
            }
        };
    }

    pub fn add(&mut self, item: ContentItem) -> Result<Outcome<CollectionView>, AppError> {
        self.check_active(&item)?;
        let errors = item.validate();
        if !errors.is_empty() {
            return Ok(Outcome::Invalid(errors));
        }
        self.library.push(item);
        self.persist();
        info!("Added item to {}", self.active.as_str());
        Ok(Outcome::Done(self.view()))
    }

    pub fn begin_edit(&mut self, index: usize) -> Result<CollectionView, AppError> {
        let item = self
            .library
            .get(self.active, index)
            .ok_or_else(|| self.not_found(index))?;
        if self.session.draft().is_some_and(|d| d.index != index) {
            self.session.cancel();
        }
        self.session.begin(ItemDraft { index, item });
        Ok(self.view())
    }

    pub fn cancel_edit(&mut self) -> CollectionView {
        self.session.cancel();
        self.view()
    }

    /// Replaces the item at `index`, committing through the edit session
    /// when one is open for that index.
    pub fn update(
        &mut self,
        index: usize,
        item: ContentItem,
    ) -> Result<Outcome<CollectionView>, AppError> {
        self.check_active(&item)?;
        if index >= self.library.len(self.active) {
            return Err(self.not_found(index));
        }

        match self.session.draft_mut() {
            Some(draft) if draft.index == index => draft.item = item,
            _ => {
                self.session.cancel();
                self.session.begin(ItemDraft { index, item });
            }
        }

        let library = &mut self.library;
        let outcome = self
            .session
            .save(|draft| library.replace(draft.index, draft.item))
            .unwrap_or(Outcome::Done(false));

        match outcome {
            Outcome::Done(_) => {
                self.persist();
                info!("Updated {} item {index}", self.active.as_str());
                Ok(Outcome::Done(self.view()))
            }
            Outcome::Invalid(errors) => Ok(Outcome::Invalid(errors)),
            Outcome::ConfirmationRequired(c) => Ok(Outcome::ConfirmationRequired(c)),
        }
    }

    pub fn delete(
        &mut self,
        index: usize,
        confirmed: bool,
    ) -> Result<Outcome<CollectionView>, AppError> {
        if index >= self.library.len(self.active) {
            return Err(self.not_found(index));
        }
        if self.session.is_editing() {
            return Err(AppError::Conflict(
                "Finish or cancel the current edit before deleting".to_string(),
            ));
        }

        let kind = self.active;
        let library = &mut self.library;
        let outcome = confirm_then(
            confirmed,
            || Confirmation::new("delete", "Are you sure you want to delete this item?"),
            || library.remove(kind, index),
        );
        if outcome.is_done() {
            self.persist();
            info!("Deleted {} item {index}", kind.as_str());
        }
        Ok(outcome.map(|_| self.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{BlogPost, MediaFile};
    use crate::storage::{BrokenStore, FileStore, MemoryStore};

    fn blog(author: &str) -> ContentItem {
        ContentItem::Blog(BlogPost {
            image: "https://img.example/cover.png".to_string(),
            description: "<p>Day one</p>".to_string(),
            author: author.to_string(),
        })
    }

    fn audiobook(title: &str) -> ContentItem {
        ContentItem::Audiobook(MediaFile {
            title: title.to_string(),
            image: "data:image/png;base64,AA==".to_string(),
            file_data: "data:audio/mpeg;base64,AAAA".to_string(),
            file_name: "track.mp3".to_string(),
            file_type: "audio/mpeg".to_string(),
        })
    }

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::default())
    }

    #[test]
    fn test_starts_on_blogs_tab_empty() {
        let view = ContentCollections::load(memory()).view();
        assert_eq!(view.active, ContentKind::Blogs);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_add_then_reload_round_trips() {
        let storage = memory();
        let mut academy = ContentCollections::load(storage.clone());
        academy.select_tab(ContentKind::Audiobooks);
        let outcome = academy.add(audiobook("Calm Mind")).unwrap();
        assert!(outcome.is_done());

        let mut reloaded = ContentCollections::load(storage);
        let view = reloaded.select_tab(ContentKind::Audiobooks);
        assert_eq!(view.items, vec![audiobook("Calm Mind")]);
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(dir.path(), 1 << 20).unwrap());
        let mut academy = ContentCollections::load(storage);
        academy.add(blog("Sara")).unwrap();

        let reopened: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(dir.path(), 1 << 20).unwrap());
        assert_eq!(
            ContentCollections::load(reopened).view().items,
            vec![blog("Sara")]
        );
    }

    #[test]
    fn test_add_rejects_item_for_other_tab() {
        let mut academy = ContentCollections::load(memory());
        let err = academy.add(audiobook("Wrong tab")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_add_with_missing_fields_commits_nothing() {
        let storage = memory();
        let mut academy = ContentCollections::load(storage.clone());
        let outcome = academy.add(blog("  ")).unwrap();
        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert!(academy.view().items.is_empty());
        assert!(storage.get(MEDIA_KEY).unwrap().is_none());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut academy = ContentCollections::load(memory());
        academy.add(blog("A")).unwrap();
        academy.add(blog("B")).unwrap();
        academy.begin_edit(0).unwrap();
        let outcome = academy.update(0, blog("A2")).unwrap();
        match outcome {
            Outcome::Done(view) => {
                assert_eq!(view.items, vec![blog("A2"), blog("B")]);
                assert_eq!(view.editing_index, None);
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_update_keeps_draft_open() {
        let mut academy = ContentCollections::load(memory());
        academy.add(blog("A")).unwrap();
        academy.begin_edit(0).unwrap();
        let outcome = academy.update(0, blog("")).unwrap();
        assert!(matches!(outcome, Outcome::Invalid(_)));
        let view = academy.view();
        assert_eq!(view.editing_index, Some(0));
        assert_eq!(view.items, vec![blog("A")]);
    }

    #[test]
    fn test_update_out_of_range_is_not_found() {
        let mut academy = ContentCollections::load(memory());
        assert!(matches!(academy.update(3, blog("x")), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_tab_switch_discards_draft() {
        let mut academy = ContentCollections::load(memory());
        academy.add(blog("A")).unwrap();
        academy.begin_edit(0).unwrap();
        let view = academy.select_tab(ContentKind::Ebooks);
        assert_eq!(view.draft, None);
        let view = academy.select_tab(ContentKind::Blogs);
        assert_eq!(view.editing_index, None);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut academy = ContentCollections::load(memory());
        academy.add(blog("A")).unwrap();
        let outcome = academy.delete(0, false).unwrap();
        assert!(matches!(outcome, Outcome::ConfirmationRequired(_)));
        assert_eq!(academy.view().items.len(), 1);

        let outcome = academy.delete(0, true).unwrap();
        match outcome {
            Outcome::Done(view) => assert!(view.items.is_empty()),
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_while_editing_conflicts() {
        let mut academy = ContentCollections::load(memory());
        academy.add(blog("A")).unwrap();
        academy.begin_edit(0).unwrap();
        assert!(matches!(academy.delete(0, true), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_delete_only_touches_active_tab() {
        let mut academy = ContentCollections::load(memory());
        academy.add(blog("A")).unwrap();
        academy.select_tab(ContentKind::Audiobooks);
        academy.add(audiobook("Calm")).unwrap();
        academy.delete(0, true).unwrap();
        assert_eq!(academy.library.blogs.len(), 1);
        assert!(academy.library.audiobooks.is_empty());
    }

    #[test]
    fn test_storage_failure_degrades_to_memory() {
        let mut academy = ContentCollections::load(Arc::new(BrokenStore));
        let outcome = academy.add(blog("A")).unwrap();
        match outcome {
            Outcome::Done(view) => {
                assert!(!view.persisted);
                assert_eq!(view.items.len(), 1);
            }
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        let storage = memory();
        storage.set(MEDIA_KEY, "{not json").unwrap();
        let academy = ContentCollections::load(storage);
        assert_eq!(academy.library, MediaLibrary::default());
    }
}
