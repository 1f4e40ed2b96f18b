use std::collections::HashSet;

/// Clean question-bank markup before it reaches `dangerous_inner_html`.
///
/// Only inline formatting survives; entity-encoded text is decoded and
/// re-escaped on the way through.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = ["em", "strong", "b", "i", "u", "sub", "sup", "code", "br", "span"]
        .into_iter()
        .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}
