// Documents and the caller-owned corpus they are compared against.
//
// The engine only ever borrows a corpus; appending, removing and clearing
// are the calling layer's business.

use serde::{Deserialize, Serialize};

use crate::text::tokenize::word_count;

/// A previously submitted (or newly submitted) document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: String,
    text: String,
    word_count: usize,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name: name.into(),
            word_count: word_count(&text),
            text,
        }
    }

    /// Display key. Not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// An ordered, in-memory collection of prior documents.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly submitted document.
    pub fn add(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Remove every document with the given name. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.documents.len();
        self.documents.retain(|d| d.name != name);
        before - self.documents.len()
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}
