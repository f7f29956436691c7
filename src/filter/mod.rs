use crate::listing::ListingRecord;

/// Drop posts whose title contains any blacklisted substring. Patterns are
/// stored lowercase, so only the title gets case-folded here. Order of the
/// kept posts follows the input order.
pub fn filter_blacklist(posts: &[ListingRecord], blacklist: &[String]) -> Vec<ListingRecord> {
    posts
        .iter()
        .filter(|post| {
            let title = post.title.to_lowercase();
            !blacklist.iter().any(|pattern| title.contains(pattern))
        })
        .cloned()
        .collect()
}

/// Keep only posts whose id is not in the history snapshot. Invoked on the
/// blacklist-filtered set, never the raw fetch, so blacklisted posts can't
/// resurface as "new". Order-preserving.
pub fn filter_new(posts: &[ListingRecord], history: &[String]) -> Vec<ListingRecord> {
    posts
        .iter()
        .filter(|post| !history.contains(&post.id))
        .cloned()
        .collect()
}
