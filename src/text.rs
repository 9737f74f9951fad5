//! Plain-text helpers used by search: html stripping and snippet extraction.

use std::sync::LazyLock;

use maud::{html, Markup};
use regex::Regex;

/// Characters of context kept before the first match.
pub const SNIPPET_LEAD: usize = 20;
/// Characters of context kept after the first match.
pub const SNIPPET_TAIL: usize = 50;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag pattern"));

/// Text content of an html fragment: tags and comments dropped, entities decoded.
pub fn strip_html(html: &str) -> String {
    let text = TAG_PATTERN.replace_all(html, "");
    html_escape::decode_html_entities(&text).into_owned()
}

/// Lower-cases `text` one character at a time.
///
/// Search compares folded query and folded text everywhere, so a post the
/// filter accepts always yields a snippet.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Folded text plus, for every folded byte, the index of the source char
/// it came from.
struct Folded {
    text: String,
    source_char: Vec<usize>,
}

impl Folded {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut source_char = Vec::with_capacity(text.len());
        for (i, c) in text.chars().enumerate() {
            for lower in c.to_lowercase() {
                folded.push(lower);
                source_char.extend(std::iter::repeat(i).take(lower.len_utf8()));
            }
        }
        Self {
            text: folded,
            source_char,
        }
    }

    /// Source char ranges of every non-overlapping occurrence of `needle`.
    fn find_all(&self, needle: &str) -> Vec<(usize, usize)> {
        let mut hits: Vec<(usize, usize)> = vec![];
        for (at, m) in self.text.match_indices(needle) {
            let start = self.source_char[at];
            let end = self.source_char[at + m.len() - 1] + 1;
            if hits.last().map_or(true, |&(_, prev_end)| start >= prev_end) {
                hits.push((start, end));
            }
        }
        hits
    }
}

enum Segment<'a> {
    Plain(&'a str),
    Hit(&'a str),
}

/// Excerpt of `text` around the first case-insensitive occurrence of `keyword`.
///
/// The window spans [`SNIPPET_LEAD`] characters before the match up to
/// [`SNIPPET_TAIL`] characters after it, clamped to the text. `...` marks each
/// truncated side, and every occurrence inside the window is wrapped in
/// `span.search-highlight`. The keyword is matched literally, with the same
/// folding as [`fold_case`].
///
/// Returns `None` when the keyword is empty or does not occur.
pub fn smart_snippet(text: &str, keyword: &str) -> Option<Markup> {
    let needle = fold_case(keyword);
    if needle.is_empty() {
        return None;
    }
    let hits = Folded::new(text).find_all(&needle);
    let &(match_start, _) = hits.first()?;

    // byte offset of every char, plus the end of the text
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(at, _)| at)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = offsets.len() - 1;
    let start = match_start.saturating_sub(SNIPPET_LEAD);
    let end = (match_start + keyword.chars().count() + SNIPPET_TAIL).min(total);

    let mut segments = vec![];
    let mut last = start;
    for &(hit_start, hit_end) in hits.iter().filter(|&&(s, e)| s >= start && e <= end) {
        if hit_start > last {
            segments.push(Segment::Plain(&text[offsets[last]..offsets[hit_start]]));
        }
        segments.push(Segment::Hit(&text[offsets[hit_start]..offsets[hit_end]]));
        last = hit_end;
    }
    if last < end {
        segments.push(Segment::Plain(&text[offsets[last]..offsets[end]]));
    }

    Some(html! {
        @if start > 0 { "..." }
        @for segment in &segments {
            @match segment {
                Segment::Plain(s) => { (s) }
                Segment::Hit(s) => { span.search-highlight { (s) } }
            }
        }
        @if end < total { "..." }
    })
}
