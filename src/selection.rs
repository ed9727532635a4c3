//! The ordered list of documents selected for merging.
//!
//! Order is meaningful: it is the order pages appear in the merged output.
//! Every mutation keeps the relative order of the elements it does not touch.

use std::ops::Deref;
use std::sync::Arc;

use crate::document::SourceDocument;
use crate::error::{AssembleError, Result};

/// Ordered, mutable collection of source documents.
#[derive(Debug, Clone, Default)]
pub struct SelectionList {
    documents: Vec<SourceDocument>,
}

/// A read-only copy of a [`SelectionList`] taken at a point in time.
///
/// Later changes to the list never show up in a snapshot.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    documents: Arc<[SourceDocument]>,
}

impl SelectionList {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents to the end, in the order supplied.
    pub fn add<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        let before = self.documents.len();
        self.documents.extend(documents);
        log::debug!(
            "Selection grew from {} to {} document(s)",
            before,
            self.documents.len()
        );
    }

    /// Swap the document at `index` with the one before it.
    ///
    /// Moving the first document up is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::IndexOutOfRange`] if `index` is not a valid position.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index > 0 {
            self.documents.swap(index - 1, index);
        }
        Ok(())
    }

    /// Swap the document at `index` with the one after it.
    ///
    /// Moving the last document down is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::IndexOutOfRange`] if `index` is not a valid position.
    pub fn move_down(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index + 1 < self.documents.len() {
            self.documents.swap(index, index + 1);
        }
        Ok(())
    }

    /// Remove the document at `index`, shifting later documents left.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::IndexOutOfRange`] if `index` is not a valid position.
    pub fn remove(&mut self, index: usize) -> Result<SourceDocument> {
        self.check_index(index)?;
        Ok(self.documents.remove(index))
    }

    /// Remove every document.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Take a read-only snapshot of the current order.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            documents: self.documents.iter().cloned().collect(),
        }
    }

    /// Number of selected documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The document at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SourceDocument> {
        self.documents.get(index)
    }

    /// Iterate over the documents in order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceDocument> {
        self.documents.iter()
    }

    /// Document names in order.
    pub fn names(&self) -> Vec<&str> {
        self.documents.iter().map(SourceDocument::name).collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.documents.len() {
            return Err(AssembleError::IndexOutOfRange {
                index,
                len: self.documents.len(),
            });
        }
        Ok(())
    }
}

impl SelectionSnapshot {
    /// Document names in order.
    pub fn names(&self) -> Vec<&str> {
        self.documents.iter().map(SourceDocument::name).collect()
    }
}

impl Deref for SelectionSnapshot {
    type Target = [SourceDocument];

    fn deref(&self) -> &Self::Target {
        &self.documents
    }
}
