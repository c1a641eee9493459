/// Placeholder for documents that are empty after trimming
pub const EMPTY_DOC_PLACEHOLDER: &str = "no description";

/// Guarantees every document is non-empty.
///
/// An empty or whitespace-only entry would vectorize to an all-zero vector
/// and destabilize the similarity math downstream, so it is replaced with a
/// fixed placeholder. The output always has the same length as the input.
pub fn normalize_documents(texts: &[&str]) -> Vec<String> {
    texts
        .iter()
        .map(|text| {
            if text.trim().is_empty() {
                EMPTY_DOC_PLACEHOLDER.to_string()
            } else {
                text.to_string()
            }
        })
        .collect()
}
