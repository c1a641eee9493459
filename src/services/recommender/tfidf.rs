//! Term-frequency / inverse-document-frequency vector space.
//!
//! Fitted fresh for every recommendation run over the combined corpus of
//! favorite, disliked and candidate texts, so that all three groups share
//! one coordinate space. The space is never cached across runs.

use std::collections::{HashMap, HashSet};

/// Maximum number of terms kept in the vocabulary
pub const MAX_VOCABULARY: usize = 1500;

/// Failure to fit a usable vector space on the given corpus
#[derive(Debug, thiserror::Error)]
pub enum VectorizeError {
    #[error("corpus produced an empty vocabulary")]
    EmptyVocabulary,
}

/// A TF-IDF vector space fitted on one corpus.
///
/// Terms are lowercase unigrams and bigrams with English stop-words removed.
/// Documents transform into dense, L2-normalized vectors over the fitted
/// vocabulary.
pub struct TfidfVectorizer {
    /// term -> column index
    vocabulary: HashMap<String, usize>,
    /// Per-column inverse document frequency
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fits the vocabulary and IDF weights on a corpus.
    ///
    /// The vocabulary keeps the `MAX_VOCABULARY` most frequent terms across
    /// the whole corpus, ties broken by term so the space is independent of
    /// hash iteration order. A corpus yielding no terms at all (empty or
    /// all stop-words) is an error the caller must handle.
    pub fn fit(corpus: &[String]) -> Result<Self, VectorizeError> {
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_counts: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let mut seen = HashSet::new();
            for term in extract_terms(doc) {
                if seen.insert(term.clone()) {
                    *doc_counts.entry(term.clone()).or_insert(0) += 1;
                }
                *corpus_counts.entry(term).or_insert(0) += 1;
            }
        }

        if corpus_counts.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(MAX_VOCABULARY);

        let total_docs = corpus.len() as f32;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (index, (term, _)) in ranked.into_iter().enumerate() {
            let df = doc_counts[&term] as f32;
            // Smoothed IDF; a term present in every document still carries
            // a small positive weight.
            idf.push(((1.0 + total_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Number of terms in the fitted vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transforms one document into a dense L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored; a document with no
    /// known terms transforms to the zero vector.
    pub fn transform(&self, doc: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for term in extract_terms(doc) {
            if let Some(&index) = self.vocabulary.get(&term) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }

    /// Transforms a batch of documents
    pub fn transform_all(&self, docs: &[String]) -> Vec<Vec<f32>> {
        docs.iter().map(|doc| self.transform(doc)).collect()
    }
}

/// Lowercase unigrams plus bigrams, stop-words removed.
///
/// Bigrams are formed from the filtered token stream so short domain
/// phrases ("dark fantasy") survive as single terms.
fn extract_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 2 && !is_stop_word(token))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each",
    "else", "every", "few", "for", "from", "had", "has", "have", "he", "her", "here", "him",
    "his", "how", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "might",
    "more", "most", "must", "my", "myself", "no", "nor", "not", "now", "of", "on", "once",
    "only", "or", "other", "our", "out", "over", "own", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "we", "were", "what", "when", "where", "which", "while", "who", "why", "will", "with",
    "would", "you", "your",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        assert!(matches!(
            TfidfVectorizer::fit(&[]),
            Err(VectorizeError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_fit_stop_word_corpus_fails() {
        let docs = corpus(&["the and of", "with from into"]);
        assert!(matches!(
            TfidfVectorizer::fit(&docs),
            Err(VectorizeError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_extract_terms_includes_bigrams() {
        let terms = extract_terms("a dark fantasy story");
        assert!(terms.contains(&"dark".to_string()));
        assert!(terms.contains(&"fantasy".to_string()));
        assert!(terms.contains(&"dark fantasy".to_string()));
        assert!(terms.contains(&"fantasy story".to_string()));
        // Single-letter tokens are dropped before bigram formation
        assert!(!terms.iter().any(|t| t.starts_with("a ")));
    }

    #[test]
    fn test_extract_terms_filters_stop_words() {
        let terms = extract_terms("the quick brown fox");
        assert!(!terms.contains(&"the".to_string()));
        assert!(terms.contains(&"quick brown".to_string()));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let docs = corpus(&["space opera epic", "desert planet saga"]);
        let vectorizer = TfidfVectorizer::fit(&docs).unwrap();

        let vector = vectorizer.transform("space opera epic");
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transform_unknown_terms_is_zero_vector() {
        let docs = corpus(&["space opera epic"]);
        let vectorizer = TfidfVectorizer::fit(&docs).unwrap();

        let vector = vectorizer.transform("gardening handbook");
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_identical_documents_transform_identically() {
        let docs = corpus(&["dark fantasy quest", "dark fantasy quest", "space opera"]);
        let vectorizer = TfidfVectorizer::fit(&docs).unwrap();

        assert_eq!(
            vectorizer.transform("dark fantasy quest"),
            vectorizer.transform("dark fantasy quest")
        );
    }

    #[test]
    fn test_vocabulary_is_capped() {
        let docs = corpus(&["space opera epic", "desert planet saga"]);
        let vectorizer = TfidfVectorizer::fit(&docs).unwrap();
        assert!(vectorizer.vocabulary_len() <= MAX_VOCABULARY);
        assert!(vectorizer.vocabulary_len() > 0);
    }

    #[test]
    fn test_rare_term_outweighs_common_term() {
        // "planet" appears in every document, "opera" only in one; IDF must
        // weight the rare term higher within a document carrying both once.
        let docs = corpus(&["planet opera", "planet desert", "planet saga"]);
        let vectorizer = TfidfVectorizer::fit(&docs).unwrap();

        let vector = vectorizer.transform("planet opera");
        let weight_of = |term: &str| {
            let index = *vectorizer.vocabulary.get(term).unwrap();
            vector[index]
        };
        assert!(weight_of("opera") > weight_of("planet"));
    }
}
