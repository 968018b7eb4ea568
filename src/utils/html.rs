// src/utils/html.rs

use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Course descriptions and eligibility criteria are authored in the admin
/// panel and rendered as rich text on the course pages; this strips dangerous
/// tags (<script>, <iframe>) and attributes (onclick) while keeping safe
/// formatting tags, as a fail-safe against stored XSS.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
