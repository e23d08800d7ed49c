//! Runs a compiled matcher against input text and builds match records with
//! grapheme-safe ranges.

use crate::api::{Group, MatchRecord};
use crate::indexing::{IndexTranslator, TranslationError};

/// Search `text` for the first match.
///
/// When `anchored` is set, only a match beginning at the start of the text
/// is reported.
pub(crate) fn find_first(
    re: &regress::Regex,
    anchored: bool,
    text: &str,
) -> Result<Option<MatchRecord>, TranslationError> {
    let m = match re.find(text) {
        Some(m) if !anchored || m.start() == 0 => m,
        _ => return Ok(None),
    };
    let translator = IndexTranslator::new(text);
    Ok(Some(record(&m, text, &translator)?))
}

/// Search `text`, returning every non-overlapping match in left-to-right
/// order.
///
/// When `anchored` is set, only the contiguous run of matches beginning at
/// the start of the text is reported: each match must begin exactly where
/// the previous one ended.
pub(crate) fn find_all(
    re: &regress::Regex,
    anchored: bool,
    text: &str,
) -> Result<Vec<MatchRecord>, TranslationError> {
    let translator = IndexTranslator::new(text);
    let mut records = Vec::new();
    let mut anchor = 0;
    for m in re.find_iter(text) {
        if anchored {
            if m.start() != anchor {
                break;
            }
            anchor = m.end();
        }
        records.push(record(&m, text, &translator)?);
    }
    Ok(records)
}

/// Build a MatchRecord from a raw engine match, translating every range into
/// grapheme units. Groups which did not participate stay None; participating
/// groups keep their text even when empty.
fn record(
    m: &regress::Match,
    text: &str,
    translator: &IndexTranslator,
) -> Result<MatchRecord, TranslationError> {
    let range = translator.translate(m.range())?;
    let mut groups = Vec::with_capacity(m.captures.len());
    for capture in &m.captures {
        groups.push(match capture {
            Some(r) => Some(Group {
                text: text[r.clone()].to_string(),
                range: translator.translate(r.clone())?,
            }),
            None => None,
        });
    }
    Ok(MatchRecord {
        full_match: text[m.range()].to_string(),
        range,
        groups,
    })
}
