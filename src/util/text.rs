/// Returns the first `max_chars` characters of `s`.
///
/// Counts Unicode scalar values, not bytes or display columns, so the cut
/// never lands inside a multi-byte character. Strings that already fit are
/// returned whole.
///
/// # Examples
///
/// ```
/// use medium_posts::util::truncate_chars;
///
/// assert_eq!(truncate_chars("Hello World", 5), "Hello");
/// assert_eq!(truncate_chars("Short", 10), "Short");
/// assert_eq!(truncate_chars("日本語テスト", 3), "日本語");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_end, _)) => &s[..byte_end],
        None => s,
    }
}

/// Drops the query string from a link: everything from the first `?` on.
///
/// Medium appends tracking parameters (`?source=rss----...`) to feed links.
/// Fragments and other URL parts are left alone.
pub fn strip_query(link: &str) -> &str {
    link.split_once('?').map_or(link, |(base, _)| base)
}
