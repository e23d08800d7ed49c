use crate::cursor::SubstitutionCursor;
use crate::exec;
use crate::indexing::{self, TranslationError};

use core::{fmt, str::FromStr};

/// Options used to control how a pattern is compiled and matched.
/// The default options are case-sensitive, not-multiline, and unanchored.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// If set, ignore letter case when matching.
    /// Equivalent to the 'i' flag in JavaScript.
    pub case_insensitive: bool,

    /// If set, ^ and $ match at line separators, not just the input boundaries.
    /// Equivalent to the 'm' flag in JavaScript.
    pub multiline: bool,

    /// If set, . matches at line separators as well as any other character.
    /// Equivalent to the 's' flag in JavaScript.
    pub dot_matches_line_separators: bool,

    /// If set, matches are limited to those at the start of the search range:
    /// [`Matcher::find`] only reports a match beginning at the first grapheme,
    /// and [`Matcher::find_all`] reports the contiguous run of matches from
    /// there, stopping at the first gap.
    pub anchored: bool,
}

impl Options {
    /// Construct an Options from an iterator of flag characters.
    /// 'i' means case-insensitive, 'm' means multiline, 's' means that '.'
    /// also matches line separators, and 'A' means anchored.
    /// Other characters are not recognized and are ignored.
    #[inline]
    pub fn new<T: Iterator<Item = char>>(chars: T) -> Self {
        let mut result = Self::default();
        for c in chars {
            match c {
                'i' => {
                    result.case_insensitive = true;
                }
                'm' => {
                    result.multiline = true;
                }
                's' => {
                    result.dot_matches_line_separators = true;
                }
                'A' => {
                    result.anchored = true;
                }
                _ => {
                    // Silently skip unsupported flags.
                }
            }
        }
        result
    }

    /// Express these options as the underlying engine's flag set.
    /// `anchored` has no engine equivalent and is enforced by the scanner.
    fn to_flags(self) -> regress::Flags {
        regress::Flags {
            icase: self.case_insensitive,
            multiline: self.multiline,
            dot_all: self.dot_matches_line_separators,
            ..regress::Flags::default()
        }
    }
}

impl From<&str> for Options {
    /// Construct an Options from a string of flag characters.
    ///
    /// See also: [`Options::new`].
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s.chars())
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.case_insensitive {
            f.write_str("i")?;
        }
        if self.multiline {
            f.write_str("m")?;
        }
        if self.dot_matches_line_separators {
            f.write_str("s")?;
        }
        if self.anchored {
            f.write_str("A")?;
        }
        Ok(())
    }
}

/// Represents an error encountered during pattern compilation.
/// The text contains a human-readable error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub text: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::error::Error for PatternError {}

impl From<regress::Error> for PatternError {
    fn from(err: regress::Error) -> Self {
        Self { text: err.text }
    }
}

/// Range is used to express the extent of a match, in extended grapheme
/// clusters of the original string. Both endpoints always fall on cluster
/// boundaries, so a Range may be passed to [`crate::slice`] or
/// [`crate::replace_range`] without splitting a user-perceived character.
pub type Range = core::ops::Range<usize>;

/// A capture group which participated in a match: the matched text and its
/// grapheme range in the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The text matched by the group. May be empty if the group matched the
    /// empty string.
    pub text: String,

    /// The grapheme range of the group in the original string.
    pub range: Range,
}

/// A MatchRecord represents a portion of a string which was found to match a
/// Matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The text of the total match. Note this may be empty, if the pattern
    /// matched an empty string.
    pub full_match: String,

    /// The grapheme range of the total match.
    pub range: Range,

    /// The list of capture groups. This has length equal to the number of
    /// capturing groups in the pattern. For each group, if the value is None,
    /// that group did not participate in the match (for example, it was in a
    /// not-taken branch of an alternation). If the value is Some, the group
    /// did participate; its text may still be empty.
    pub groups: Vec<Option<Group>>,
}

impl MatchRecord {
    /// Access a group by index, using the convention of Python's group()
    /// function. Index 0 is the total match, index 1 is the first capture
    /// group. Returns None for out-of-range indexes and for groups which did
    /// not participate in the match.
    #[inline]
    pub fn group(&self, idx: usize) -> Option<(&str, Range)> {
        if idx == 0 {
            Some((self.full_match.as_str(), self.range.clone()))
        } else {
            self.groups
                .get(idx - 1)?
                .as_ref()
                .map(|g| (g.text.as_str(), g.range.clone()))
        }
    }

    /// Returns the range over the starting and ending grapheme indexes of the
    /// match in the haystack.
    ///
    /// This is a convenience function to work around
    /// the fact that Range does not support Copy.
    #[inline]
    pub fn range(&self) -> Range {
        self.range.clone()
    }

    /// Returns the starting grapheme index of the match in the haystack.
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Returns the ending grapheme index of the match in the haystack.
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end
    }
}

/// A Matcher is the compiled version of a pattern.
///
/// A Matcher is immutable after compilation: it may be cached, cloned
/// cheaply, and shared across threads. Note that compilation is rather
/// expensive; prefer to cache a Matcher which is intended to be used more
/// than once.
#[derive(Debug, Clone)]
pub struct Matcher {
    re: regress::Regex,
    options: Options,
}

impl Matcher {
    /// Construct a matcher by compiling `pattern` using the default options.
    /// A PatternError is returned if the syntax is invalid (for example,
    /// unbalanced groups); compiling never fails merely because no text
    /// would match.
    #[inline]
    pub fn new(pattern: &str) -> Result<Matcher, PatternError> {
        Self::with_options(pattern, Options::default())
    }

    /// Construct a matcher by compiling `pattern` with `options`.
    /// A PatternError is returned if the syntax is invalid.
    #[inline]
    pub fn with_options<O>(pattern: &str, options: O) -> Result<Matcher, PatternError>
    where
        O: Into<Options>,
    {
        let options = options.into();
        let re = regress::Regex::with_flags(pattern, options.to_flags())?;
        Ok(Matcher { re, options })
    }

    /// The options this matcher was compiled with.
    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    /// \return whether `text` contains a match for this matcher.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        match self.re.find(text) {
            Some(m) => !self.options.anchored || m.start() == 0,
            None => false,
        }
    }

    /// Searches `text` to find the first match.
    ///
    /// Returns `Ok(None)` when there is no match. The error case is
    /// defensive: it indicates the engine reported a match boundary inside a
    /// grapheme cluster, which cannot be expressed as a cluster-safe range.
    #[inline]
    pub fn find(&self, text: &str) -> Result<Option<MatchRecord>, TranslationError> {
        exec::find_first(&self.re, self.options.anchored, text)
    }

    /// Searches `text`, returning every non-overlapping match in
    /// left-to-right order.
    ///
    /// Returns an empty vector, not an error, when there are no matches;
    /// callers distinguish "no matches" from a bad pattern by the compile
    /// step, never by a sentinel in the match list.
    #[inline]
    pub fn find_all(&self, text: &str) -> Result<Vec<MatchRecord>, TranslationError> {
        exec::find_all(&self.re, self.options.anchored, text)
    }

    /// Replaces every match in `text` with `replacement`, returning the
    /// rewritten string.
    ///
    /// Substitutions are applied in match order; ranges of later matches are
    /// shifted by the cumulative length drift of earlier replacements.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String, TranslationError> {
        let records = self.find_all(text)?;
        let replacement_len = indexing::grapheme_len(replacement);
        let mut result = text.to_string();
        let mut cursor = SubstitutionCursor::new();
        for record in &records {
            let window = cursor.window(record.range());
            indexing::replace_range(&mut result, window, replacement);
            cursor.advance(record.range.len(), replacement_len);
        }
        Ok(result)
    }
}

impl FromStr for Matcher {
    type Err = PatternError;

    /// Attempts to compile a string into a matcher with default options.
    #[inline]
    fn from_str(s: &str) -> Result<Self, PatternError> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{Matcher, Options};

    #[test]
    fn options_from_flag_chars() {
        let options = Options::from("is");
        assert!(options.case_insensitive);
        assert!(!options.multiline);
        assert!(options.dot_matches_line_separators);
        assert!(!options.anchored);
        assert_eq!(options.to_string(), "is");

        // Unknown flags are skipped.
        assert_eq!(Options::from("zAq"), Options::from("A"));
        assert_eq!(Options::default().to_string(), "");
    }

    #[test]
    fn matcher_is_match() {
        let re = Matcher::new(r"\d+").unwrap();
        assert!(re.is_match("abc123"));
        assert!(!re.is_match("abc"));

        let anchored = Matcher::with_options(r"\d+", "A").unwrap();
        assert!(anchored.is_match("123abc"));
        assert!(!anchored.is_match("abc123"));
    }
}
