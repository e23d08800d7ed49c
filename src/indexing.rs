//! Translation between the engine's byte offsets and grapheme-cluster
//! indexes, plus cluster-safe slicing helpers.
//!
//! The engine reports match extents as byte offsets into UTF-8 text. Those
//! offsets always fall on `char` boundaries, but a `char` boundary is not
//! necessarily a grapheme cluster boundary: combining marks, flag emoji and
//! skin-tone modifiers span several scalars which must never be split when
//! the caller slices or rewrites the original string. Everything in this
//! crate therefore exposes ranges in grapheme units and converts through
//! this module.

use crate::api::Range;

use core::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Represents a failure to express an engine-reported offset as a grapheme
/// index: the offset falls strictly inside a cluster.
///
/// This is a defensive error. It does not indicate bad user input; it means
/// a match boundary cannot be represented without splitting a user-perceived
/// character (for example, a pattern matching `"e"` inside the decomposed
/// sequence `"e\u{301}"`). The boundary is refused rather than silently
/// clamped to the nearest cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationError {
    /// The offending byte offset.
    pub offset: usize,
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "byte offset {} does not fall on a grapheme cluster boundary",
            self.offset
        )
    }
}

impl std::error::Error for TranslationError {}

/// Translates byte ranges of a string into grapheme-cluster ranges.
///
/// Construction makes a single forward pass over the text, accumulating the
/// byte length of each cluster; each boundary is then resolved by binary
/// search, so translating the ranges of an entire scan visits the text once.
#[derive(Debug, Clone)]
pub struct IndexTranslator<'t> {
    text: &'t str,
    /// Byte offset of the start of each grapheme cluster, ascending.
    starts: Vec<usize>,
}

impl<'t> IndexTranslator<'t> {
    pub fn new(text: &'t str) -> Self {
        let starts = text.grapheme_indices(true).map(|(offset, _)| offset).collect();
        Self { text, starts }
    }

    /// The number of grapheme clusters in the text.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Translate a half-open byte range into a half-open grapheme range.
    ///
    /// Both endpoints must coincide with cluster boundaries; an end offset
    /// equal to the byte length of the text translates to the grapheme
    /// length of the text.
    pub fn translate(&self, range: core::ops::Range<usize>) -> Result<Range, TranslationError> {
        debug_assert!(range.start <= range.end, "range start exceeds end");
        Ok(self.index_of(range.start)?..self.index_of(range.end)?)
    }

    /// \return the grapheme index whose cluster starts at `offset`.
    fn index_of(&self, offset: usize) -> Result<usize, TranslationError> {
        if offset == self.text.len() {
            return Ok(self.starts.len());
        }
        match self.starts.binary_search(&offset) {
            Ok(index) => Ok(index),
            Err(_) => Err(TranslationError { offset }),
        }
    }
}

/// The number of extended grapheme clusters in `text`.
#[inline]
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Slice `text` by a grapheme range.
///
/// Panics if the range is out of bounds, like slice indexing.
pub fn slice(text: &str, range: Range) -> &str {
    &text[byte_range(text, range)]
}

/// Replace a grapheme range of `text` with `replacement`, in place.
///
/// Panics if the range is out of bounds, matching the contract of
/// `String::replace_range`.
pub fn replace_range(text: &mut String, range: Range, replacement: &str) {
    let bytes = byte_range(text, range);
    text.replace_range(bytes, replacement);
}

/// Resolve a grapheme range to the corresponding byte range with one forward
/// pass. Panics if the range is out of bounds.
fn byte_range(text: &str, range: Range) -> core::ops::Range<usize> {
    assert!(
        range.start <= range.end,
        "grapheme range starts at {} but ends at {}",
        range.start,
        range.end
    );
    let mut start = None;
    let mut end = None;
    let mut index = 0;
    for (offset, _) in text.grapheme_indices(true) {
        if index == range.start {
            start = Some(offset);
        }
        if index == range.end {
            end = Some(offset);
            break;
        }
        index += 1;
    }
    // A boundary equal to the cluster count is the end of the text.
    if start.is_none() && range.start == index {
        start = Some(text.len());
    }
    if end.is_none() && range.end == index {
        end = Some(text.len());
    }
    match (start, end) {
        (Some(start), Some(end)) => start..end,
        _ => panic!(
            "grapheme range {}..{} out of bounds for string of {} clusters",
            range.start,
            range.end,
            index
        ),
    }
}
