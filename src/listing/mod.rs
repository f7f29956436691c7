use std::io::{Error, ErrorKind};

/// A single classifieds post, normalized from the scraped page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// Opaque token taken from the post URL. The site hands out numeric ids
    /// that can exceed safe integer ranges, so this is never parsed as a number.
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Derive the post identifier from its URL. Post links end in
/// `/<id>.<ext>`, e.g. `http://raleigh.craigslist.org/tag/4510309330.html`.
/// The same link always yields the same id, which makes it the dedup key.
pub fn extract_id(link: &str) -> Result<String, Error> {
    let (_, last_segment) = link.rsplit_once('/').ok_or_else(|| invalid_id(link))?;
    let (id, _ext) = last_segment.split_once('.').ok_or_else(|| invalid_id(link))?;
    if id.is_empty() {
        return Err(invalid_id(link));
    }
    Ok(id.to_string())
}

fn invalid_id(link: &str) -> Error {
    Error::new(
        ErrorKind::InvalidData,
        format!("post link has no parseable identifier: {link}"),
    )
}
