use scraper::ElementRef;

/// Joins an element's text fragments with single spaces, dropping the
/// whitespace-only fragments the markup leaves between inline tags.
pub fn extract_text(node: ElementRef) -> String {
    node.text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
