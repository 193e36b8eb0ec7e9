//! Plain-text extraction from rendered wiki pages
//!
//! Extraction only looks at the page's main content container. Inside it, text under
//! structural elements (scripts, styles, navigation, header, footer) is discarded and
//! tiny fragments are dropped. The result is a single space-joined line.
//!
//! Section edit links (`<span class="mw-editsection">`) are skipped during extraction.
//! [`normalize_page_text`] then collapses whitespace, strips any literal `[edit]` markers
//! left in the text and bounds the length so a page never dominates the prompt.

use scraper::{CaseSensitivity, ElementRef, Html, Selector};

/// `id` values of the MediaWiki content wrapper (current and legacy)
pub const CONTENT_CONTAINER_IDS: [&str; 2] = ["mw-content-text", "bodyContent"];

/// Elements whose text is never part of the extracted content
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

/// Class MediaWiki puts on the `[edit]` link next to each section heading
const EDIT_SECTION_CLASS: &str = "mw-editsection";

/// Fragments with this many characters or fewer are dropped
const MIN_FRAGMENT_CHARS: usize = 3;

const EDIT_MARKER: &str = "[edit]";

/// Extract the text of the main content container of `html`
///
/// Returns an empty string when no element carries one of [`CONTENT_CONTAINER_IDS`].
/// Callers treat that as "content unavailable", not as an error.
///
/// # Examples
///
/// ```
/// use archlinux_ai_cli::wiki::html::extract_main_text;
///
/// let html = r#"<div id="mw-content-text">AB<script>x</script>CDEF</div>"#;
/// assert_eq!(extract_main_text(html), "CDEF");
/// assert_eq!(extract_main_text("<p>no container here</p>"), "");
/// ```
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Some(container) = find_content_container(&document) else {
        return String::new();
    };

    let mut fragments = Vec::new();
    collect_fragments(container, &mut fragments);
    fragments.join(" ")
}

fn find_content_container(document: &Html) -> Option<ElementRef<'_>> {
    let selector = CONTENT_CONTAINER_IDS.iter().map(|id| format!("#{id}")).collect::<Vec<_>>();
    let selector = Selector::parse(&selector.join(", ")).ok()?;
    // Document order, so an outer wrapper wins over a nested one
    document.select(&selector).next()
}

fn collect_fragments<'a>(element: ElementRef<'a>, fragments: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if trimmed.chars().count() > MIN_FRAGMENT_CHARS {
                fragments.push(trimmed);
            }
        } else if let Some(child_element) = ElementRef::wrap(child)
            && !is_skipped(child_element)
        {
            collect_fragments(child_element, fragments);
        }
    }
}

fn is_skipped(element: ElementRef<'_>) -> bool {
    let element = element.value();
    SKIPPED_ELEMENTS.contains(&element.name())
        || element.has_class(EDIT_SECTION_CLASS, CaseSensitivity::CaseSensitive)
}

/// Collapse whitespace, drop `[edit]` markers and bound the text to `max_chars`
///
/// Text longer than `max_chars` is cut to exactly `max_chars` characters followed by
/// [`truncation_marker`] naming `title`.
pub fn normalize_page_text(raw: &str, title: &str, max_chars: usize) -> String {
    let without_markers = raw.replace(EDIT_MARKER, " ");
    let collapsed = without_markers.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_page_text(collapsed, title, max_chars)
}

/// Cut `text` to `max_chars` characters and append the truncation marker when it is longer
pub fn truncate_page_text(text: String, title: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = text[..byte_index].to_string();
            truncated.push_str(&truncation_marker(title));
            truncated
        }
        None => text,
    }
}

/// Marker appended to truncated page text
pub fn truncation_marker(title: &str) -> String {
    format!("... [content truncated, see the full \"{}\" page]", title)
}
