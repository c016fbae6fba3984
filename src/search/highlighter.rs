//! Mapping matched spans back onto the original text.
//!
//! Spans found by the matcher index normalized characters. Display spans are
//! byte offsets into the raw string, always on character boundaries, so they
//! can be used to slice the raw text directly.

use super::ranker::RankedResult;
use crate::matching::{normalize, MatchSpan, NormalizedText};
use crate::models::Searchable;
use std::collections::BTreeMap;
use std::ops::Range;

/// Re-anchor normalized spans onto `raw`, merging overlapping or adjacent ranges.
///
/// Spans that fall outside the normalized text are dropped.
pub fn to_display_spans(raw: &str, spans: &[MatchSpan]) -> Vec<(usize, usize)> {
    display_spans(&normalize(raw), spans)
}

/// Same as [`to_display_spans`] for text that is already normalized.
pub fn display_spans(text: &NormalizedText, spans: &[MatchSpan]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<Range<usize>> = spans
        .iter()
        .filter_map(|s| text.raw_range(s.start, s.end))
        .collect();
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }

    merged.into_iter().map(|r| (r.start, r.end)).collect()
}

/// Display spans for each field of a result.
///
/// `raw_fields` pairs a field name with the raw text that was searched, in
/// the order the item exposed them; a repeated name is the next value of a
/// multi-valued field. Fields the result has no outcome for are skipped.
pub fn highlight<'a, I>(
    result: &RankedResult,
    raw_fields: I,
) -> BTreeMap<String, Vec<(usize, usize)>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    raw_fields
        .into_iter()
        .filter_map(|(name, raw)| {
            let next = seen.entry(name).or_insert(0);
            let value_index = *next;
            *next += 1;

            let field = result.field(name)?;
            (field.value_index == value_index)
                .then(|| (name.to_string(), to_display_spans(raw, field.spans())))
        })
        .collect()
}

/// Display spans for each field, taking the raw text from the item itself.
///
/// For multi-valued fields the value that produced the best match is used.
pub fn highlight_item<T: Searchable + ?Sized>(
    result: &RankedResult,
    item: &T,
) -> BTreeMap<String, Vec<(usize, usize)>> {
    let mut values_by_field: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, raw) in item.field_values() {
        values_by_field.entry(name).or_default().push(raw);
    }

    result
        .fields()
        .iter()
        .filter_map(|(name, field)| {
            let raw = values_by_field.get(name.as_str())?.get(field.value_index)?;
            Some((name.clone(), to_display_spans(raw, field.spans())))
        })
        .collect()
}

/// Markers placed around highlighted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub open: String,
    pub close: String,
    /// Escape `& < > "` in the raw text (for HTML output)
    pub escape_html: bool,
}

impl HighlightStyle {
    /// `<mark>` tags with HTML escaping.
    pub fn html() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
            escape_html: true,
        }
    }

    /// Custom markers without escaping.
    pub fn plain(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            escape_html: false,
        }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::html()
    }
}

/// Render `raw` with display spans wrapped in the style's markers.
///
/// Spans must be sorted; spans that overlap a previous one or do not fall on
/// character boundaries are ignored.
pub fn render(raw: &str, spans: &[(usize, usize)], style: &HighlightStyle) -> String {
    let markers = style.open.len() + style.close.len();
    let mut out = String::with_capacity(raw.len() + spans.len() * markers);
    let mut cursor = 0;

    for &(start, end) in spans {
        if start < cursor || start >= end {
            continue;
        }
        let (Some(before), Some(marked)) = (raw.get(cursor..start), raw.get(start..end)) else {
            continue;
        };
        push_text(&mut out, before, style.escape_html);
        out.push_str(&style.open);
        push_text(&mut out, marked, style.escape_html);
        out.push_str(&style.close);
        cursor = end;
    }

    push_text(&mut out, raw.get(cursor..).unwrap_or_default(), style.escape_html);
    out
}

fn push_text(out: &mut String, text: &str, escape_html: bool) {
    if !escape_html {
        out.push_str(text);
        return;
    }
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
