//! Page-level assembly.
//!
//! [`OutputDocument`] owns the document being built. Source documents are
//! imported whole (their objects renumbered past everything already in the
//! output) and then individual pages are attached to the output page tree in
//! whatever order the caller asks for. Objects that end up unreachable, such
//! as the source catalogs and any pages that were never attached, are pruned
//! when the document is finished.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::collections::BTreeMap;

use crate::config::CompressionLevel;
use crate::error::JobFailure;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

type JobResult<T> = std::result::Result<T, JobFailure>;

/// Pages of a source document after it has been imported into an output.
#[derive(Debug, Clone)]
pub struct ImportedPages {
    /// 1-based page number to object id in the output document.
    pages: BTreeMap<u32, ObjectId>,
}

impl ImportedPages {
    /// Number of pages the source document had.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Object id of a 1-based page number.
    pub fn page_id(&self, page: u32) -> Option<ObjectId> {
        self.pages.get(&page).copied()
    }

    /// All page object ids in original page order.
    pub fn page_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.pages.values().copied()
    }
}

/// A document under construction.
///
/// Pages are appended one at a time; [`OutputDocument::finish`] consumes the
/// builder, so a document is serialized exactly once.
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    page_count: usize,
}

impl OutputDocument {
    /// Create an empty document with a catalog and an empty page tree.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");

        let pages_id = document.new_object_id();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0_i64,
        };
        document.objects.insert(pages_id, pages.into());

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_count: 0,
        }
    }

    /// Bring every object of `source` into this document.
    ///
    /// Nothing is attached to the page tree yet; use the returned
    /// [`ImportedPages`] to pick which pages to append.
    pub fn import(&mut self, mut source: Document) -> JobResult<ImportedPages> {
        // Avoid object id collisions by renumbering the incoming document.
        source.renumber_objects_with(self.document.max_id + 1);
        self.document.max_id = self.document.max_id.max(source.max_id);

        let pages = source.get_pages();
        if pages.is_empty() {
            return Err(JobFailure::from("document has no pages"));
        }

        // Pages are re-parented into our tree, so anything they inherited
        // from their old ancestors has to live on the page itself.
        for &page_id in pages.values() {
            flatten_inherited_attributes(&mut source, page_id)?;
        }

        self.document.objects.extend(source.objects);

        Ok(ImportedPages { pages })
    }

    /// Attach an imported page at the end of the page tree.
    pub fn append_page(&mut self, page_id: ObjectId) -> JobResult<()> {
        let page = self.document.get_dictionary_mut(page_id)?;
        page.set("Parent", self.pages_id);

        self.page_count += 1;

        let pages = self.document.get_dictionary_mut(self.pages_id)?;
        pages
            .get_mut(b"Kids")?
            .as_array_mut()?
            .push(Object::Reference(page_id));
        pages.set("Count", self.page_count as i64);

        Ok(())
    }

    /// Pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Finalize and serialize the document.
    ///
    /// # Errors
    ///
    /// Fails if no page was appended or if serialization fails.
    pub fn finish(mut self, compression: CompressionLevel) -> JobResult<Vec<u8>> {
        if self.page_count == 0 {
            return Err(JobFailure::from("output document has no pages"));
        }

        let pruned = self.document.prune_objects();
        log::debug!("Pruned {} unreachable object(s)", pruned.len());

        self.document.renumber_objects();

        if compression == CompressionLevel::Standard {
            self.document.compress();
        }

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|err| JobFailure::Structure(format!("failed to serialize output: {err}")))?;

        Ok(buffer)
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy inheritable attributes from the page's ancestors onto the page.
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> JobResult<()> {
    let mut inherited: Vec<(&'static [u8], Object)> = Vec::new();

    {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&'static [u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();

        let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
        let mut depth = 0;

        while let Some(node_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }

            let node = doc.get_dictionary(node_id)?;
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });

            parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
            depth += 1;
        }
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Basic facts about a parsed document, used for verbose output.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    /// PDF version from the header.
    pub version: String,
    /// Number of pages.
    pub page_count: usize,
    /// Number of indirect objects.
    pub object_count: usize,
    /// Width and height of the first page in points, if it declares a MediaBox.
    pub first_page_size: Option<(f32, f32)>,
}

/// Summarize a parsed document.
pub fn summarize(doc: &Document) -> DocumentSummary {
    let pages = doc.get_pages();

    let first_page_size = pages.values().next().and_then(|&page_id| {
        let page = doc.get_dictionary(page_id).ok()?;
        let mediabox = page.get(b"MediaBox").and_then(|o| o.as_array()).ok()?;
        if mediabox.len() < 4 {
            return None;
        }
        let width = mediabox[2].as_float().ok()? - mediabox[0].as_float().ok()?;
        let height = mediabox[3].as_float().ok()? - mediabox[1].as_float().ok()?;
        Some((width, height))
    });

    DocumentSummary {
        version: doc.version.clone(),
        page_count: pages.len(),
        object_count: doc.objects.len(),
        first_page_size,
    }
}
