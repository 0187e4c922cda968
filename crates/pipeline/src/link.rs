//! Catalog search links for recommended songs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Search endpoint the generated links point at
pub const SEARCH_URL: &str = "https://open.spotify.com/search/";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, matching
/// JavaScript's `encodeURIComponent`.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build a search link for a song from its title and artist
pub fn search_link(title: &str, artist: &str) -> String {
    let query = format!("{} {}", title, artist);
    format!("{}{}", SEARCH_URL, utf8_percent_encode(&query, COMPONENT_SET))
}
