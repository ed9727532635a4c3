//! Page range expressions.
//!
//! A range expression is a comma-separated list of page numbers (`3`) and
//! inclusive spans (`2-5`), 1-based, as typed by the user. Parsing is done
//! against a known page count: values past the end of the document are
//! dropped rather than rejected, so `8-12` on a 10 page document selects
//! pages 8, 9 and 10.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{AssembleError, Result};

/// A validated, deduplicated, ascending set of 1-based page numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRange {
    pages: Vec<u32>,
}

impl PageRange {
    /// Parse a page range expression against a document with `total_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::InvalidRange`] if the expression is blank, or if
    /// any token is not a positive integer or an ascending `start-end` span.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfassemble::range::PageRange;
    ///
    /// let range = PageRange::parse("5,1-3", 10).unwrap();
    /// assert_eq!(range.pages(), &[1, 2, 3, 5]);
    ///
    /// let clipped = PageRange::parse("8-12", 10).unwrap();
    /// assert_eq!(clipped.pages(), &[8, 9, 10]);
    /// ```
    pub fn parse(expression: &str, total_pages: u32) -> Result<Self> {
        if expression.trim().is_empty() {
            return Err(AssembleError::invalid_range(
                expression,
                "page range cannot be empty",
            ));
        }

        let mut selected = BTreeSet::new();

        for token in expression.split(',') {
            let token = token.trim();

            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(expression, start)?;
                    let end = parse_page_number(expression, end)?;

                    if start > end {
                        return Err(AssembleError::invalid_range(
                            expression,
                            format!("span {start}-{end} starts after it ends"),
                        ));
                    }

                    // Values past the document end are clipped.
                    let last = end.min(total_pages);
                    selected.extend(start..=last);
                }
                None => {
                    let page = parse_page_number(expression, token)?;
                    if page <= total_pages {
                        selected.insert(page);
                    }
                }
            }
        }

        Ok(Self {
            pages: selected.into_iter().collect(),
        })
    }

    /// The selected page numbers, ascending.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page survived clipping.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if a 1-based page number is selected.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Iterate over the selected page numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    /// 0-based page indices, ascending.
    pub fn to_indices(&self) -> Vec<usize> {
        self.pages.iter().map(|&page| page as usize - 1).collect()
    }
}

impl fmt::Display for PageRange {
    /// Renders the compact canonical form, e.g. `1-3,5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for &page in &self.pages {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == page => *end = page,
                _ => runs.push((page, page)),
            }
        }

        let parts: Vec<String> = runs
            .into_iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{start}-{end}")
                }
            })
            .collect();

        write!(f, "{}", parts.join(","))
    }
}

/// Parse one side of a token. Only ASCII digits are accepted, so signs,
/// decimals and stray characters are all rejected.
fn parse_page_number(expression: &str, text: &str) -> Result<u32> {
    let text = text.trim();

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AssembleError::invalid_range(
            expression,
            format!("'{text}' is not a page number"),
        ));
    }

    let page: u32 = text.parse().map_err(|_| {
        AssembleError::invalid_range(expression, format!("page number {text} is too large"))
    })?;

    if page == 0 {
        return Err(AssembleError::invalid_range(
            expression,
            "page numbers start at 1",
        ));
    }

    Ok(page)
}
