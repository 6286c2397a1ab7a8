use serde::{Deserialize, Deserializer, Serialize};

use crate::editing::{require_text, FieldError, Validate};

/// Tab selector for the academy screen; one sub-collection per tab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    #[default]
    Blogs,
    Audiobooks,
    Ebooks,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Blogs => "blogs",
            ContentKind::Audiobooks => "audiobooks",
            ContentKind::Ebooks => "ebooks",
        }
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    pub image: String,
    /// Rich-text HTML from the editor widget.
    pub description: String,
    pub author: String,
}

/// An audiobook or e-book with its uploaded file embedded as a data URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaFile {
    pub title: String,
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Blog(BlogPost),
    Audiobook(MediaFile),
    Ebook(MediaFile),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Blog(_) => ContentKind::Blogs,
            ContentItem::Audiobook(_) => ContentKind::Audiobooks,
            ContentItem::Ebook(_) => ContentKind::Ebooks,
        }
    }
}

impl Validate for BlogPost {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "image", &self.image);
        require_text(&mut errors, "description", &self.description);
        require_text(&mut errors, "author", &self.author);
        errors
    }
}

impl Validate for MediaFile {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "image", &self.image);
        if self.file_data.is_empty() {
            errors.push(FieldError::new("fileData", "Please upload a file"));
        }
        errors
    }
}

impl Validate for ContentItem {
    fn validate(&self) -> Vec<FieldError> {
        match self {
            ContentItem::Blog(post) => post.validate(),
            ContentItem::Audiobook(file) | ContentItem::Ebook(file) => file.validate(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted library
// ────────────────────────────────────────────────────────────────────────────

/// All three sub-collections, stored as one JSON object. Missing or `null`
/// collections load as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MediaLibrary {
    #[serde(deserialize_with = "null_as_default")]
    pub blogs: Vec<BlogPost>,
    #[serde(deserialize_with = "null_as_default")]
    pub audiobooks: Vec<MediaFile>,
    #[serde(deserialize_with = "null_as_default")]
    pub ebooks: Vec<MediaFile>,
}

impl MediaLibrary {
    pub fn len(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Blogs => self.blogs.len(),
            ContentKind::Audiobooks => self.audiobooks.len(),
            ContentKind::Ebooks => self.ebooks.len(),
        }
    }

    pub fn items(&self, kind: ContentKind) -> Vec<ContentItem> {
        match kind {
            ContentKind::Blogs => self.blogs.iter().cloned().map(ContentItem::Blog).collect(),
            ContentKind::Audiobooks => self
                .audiobooks
                .iter()
                .cloned()
                .map(ContentItem::Audiobook)
                .collect(),
            ContentKind::Ebooks => self.ebooks.iter().cloned().map(ContentItem::Ebook).collect(),
        }
    }

    pub fn get(&self, kind: ContentKind, index: usize) -> Option<ContentItem> {
        match kind {
            ContentKind::Blogs => self.blogs.get(index).cloned().map(ContentItem::Blog),
            ContentKind::Audiobooks => self
                .audiobooks
                .get(index)
                .cloned()
                .map(ContentItem::Audiobook),
            ContentKind::Ebooks => self.ebooks.get(index).cloned().map(ContentItem::Ebook),
        }
    }

    pub fn push(&mut self, item: ContentItem) {
        match item {
            ContentItem::Blog(post) => self.blogs.push(post),
            ContentItem::Audiobook(file) => self.audiobooks.push(file),
            ContentItem::Ebook(file) => self.ebooks.push(file),
        }
    }

    /// Replaces the item at `index` in the item's own sub-collection.
    /// Returns false when the index is out of range.
    pub fn replace(&mut self, index: usize, item: ContentItem) -> bool {
        let slot_ok = index < self.len(item.kind());
        if !slot_ok {
            return false;
        }
        match item {
            ContentItem::Blog(post) => self.blogs[index] = post,
            ContentItem::Audiobook(file) => self.audiobooks[index] = file,
            ContentItem::Ebook(file) => self.ebooks[index] = file,
        }
        true
    }

    pub fn remove(&mut self, kind: ContentKind, index: usize) -> Option<ContentItem> {
        if index >= self.len(kind) {
            return None;
        }
        Some(match kind {
            ContentKind::Blogs => ContentItem::Blog(self.blogs.remove(index)),
            ContentKind::Audiobooks => ContentItem::Audiobook(self.audiobooks.remove(index)),
            ContentKind::Ebooks => ContentItem::Ebook(self.ebooks.remove(index)),
        })
    }
}
