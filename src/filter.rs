use crate::{store::IndexedPost, text::fold_case};

/// Tag name meaning "no tag filter".
pub const ALL_TAGS: &str = "All";

/// Trimmed, case-folded search query. Empty means "no search".
pub fn normalize_query(query: &str) -> String {
    fold_case(query.trim())
}

fn matches_query(entry: &IndexedPost, query: &str) -> bool {
    let post = &entry.post;
    fold_case(&post.title).contains(query)
        || fold_case(&post.date).contains(query)
        || fold_case(&post.desc).contains(query)
        || fold_case(&entry.plain_text).contains(query)
}

/// Posts carrying `tag` (any post for [`ALL_TAGS`]) that contain `query` in
/// their title, date, description or plain-text content, in store order.
pub fn filter_posts<'a>(entries: &'a [IndexedPost], tag: &str, query: &str) -> Vec<&'a IndexedPost> {
    let query = normalize_query(query);

    entries
        .iter()
        .filter(|e| tag == ALL_TAGS || e.post.has_tag(tag))
        .filter(|e| query.is_empty() || matches_query(e, &query))
        .collect()
}
