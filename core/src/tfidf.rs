//! TF-IDF vectors and cosine relevance.
//!
//! IDF is `ln(pages / document_frequency)`, TF is `occurrences / words` within
//! one page. Page vectors and their norms are computed once at build time;
//! only the query vector is built per call.

use crate::dict::HashDictionary;
use crate::error::Result;
use crate::set::HashSet;
use crate::Page;

/// Word to inverse document frequency.
pub type IdfTable = HashDictionary<String, f64>;

/// Sparse TF-IDF vector with its Euclidean norm cached alongside.
#[derive(Debug, Clone, Default)]
pub struct DocumentVector {
    weights: HashDictionary<String, f64>,
    norm: f64,
}

impl DocumentVector {
    fn from_weights(weights: HashDictionary<String, f64>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { weights, norm }
    }

    /// Weight of `word`, zero when the word is absent.
    pub fn weight(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(w, v)| (w.as_str(), *v))
    }
}

#[derive(Debug, Clone)]
pub struct TfIdfAnalyzer {
    idf: IdfTable,
    vectors: HashDictionary<String, DocumentVector>,
}

impl TfIdfAnalyzer {
    pub fn new(pages: &[Page]) -> Result<Self> {
        let idf = compute_idf(pages);

        let mut vectors = HashDictionary::with_buckets(pages.len() * 2 + 1);
        for page in pages {
            let mut weights = HashDictionary::new();
            for (word, tf) in term_frequencies(&page.words) {
                weights.put(word.to_string(), tf * *idf.get(word)?);
            }
            vectors.put(page.uri.clone(), DocumentVector::from_weights(weights));
        }

        tracing::info!(pages = vectors.len(), vocabulary = idf.len(), "built tf-idf index");
        Ok(Self { idf, vectors })
    }

    /// IDF of `word`; zero for words the corpus never used.
    pub fn idf(&self, word: &str) -> f64 {
        self.idf.get(word).copied().unwrap_or(0.0)
    }

    pub fn idf_scores(&self) -> &IdfTable {
        &self.idf
    }

    pub fn document_vector(&self, uri: &str) -> Result<&DocumentVector> {
        self.vectors.get(uri)
    }

    /// TF-IDF vector of a query against this corpus' IDF.
    pub fn query_vector<S: AsRef<str>>(&self, query: &[S]) -> DocumentVector {
        let mut weights = HashDictionary::new();
        for (word, tf) in term_frequencies(query) {
            weights.put(word.to_string(), tf * self.idf(word));
        }
        DocumentVector::from_weights(weights)
    }

    /// Cosine similarity between `query` and the page at `uri`, in `[0, 1]`.
    /// Zero when either vector has zero norm.
    pub fn compute_relevance<S: AsRef<str>>(&self, query: &[S], uri: &str) -> Result<f64> {
        let doc = self.vectors.get(uri)?;
        let query = self.query_vector(query);
        if doc.norm == 0.0 || query.norm == 0.0 {
            return Ok(0.0);
        }
        let dot: f64 = query.iter().map(|(word, q)| doc.weight(word) * q).sum();
        Ok((dot / (doc.norm * query.norm)).clamp(0.0, 1.0))
    }
}

fn compute_idf(pages: &[Page]) -> IdfTable {
    let mut document_frequency: HashDictionary<&str, u32> = HashDictionary::new();
    for page in pages {
        let distinct: HashSet<&str> = page.words.iter().map(String::as_str).collect();
        for word in distinct {
            *document_frequency.get_or_insert_with(word, || 0) += 1;
        }
    }

    let n = pages.len() as f64;
    document_frequency
        .into_iter()
        .map(|(word, df)| (word.to_string(), (n / df as f64).ln()))
        .collect()
}

fn term_frequencies<S: AsRef<str>>(words: &[S]) -> HashDictionary<&str, f64> {
    let mut counts: HashDictionary<&str, u32> = HashDictionary::new();
    for word in words {
        *counts.get_or_insert_with(word.as_ref(), || 0) += 1;
    }
    let total = words.len() as f64;
    counts
        .into_iter()
        .map(|(word, count)| (word, count as f64 / total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;

    fn page(uri: &str, words: &[&str]) -> Page {
        Page::new(uri, std::iter::empty::<&str>(), words.iter().copied())
    }

    #[test]
    fn word_in_every_page_has_zero_idf() {
        let pages = vec![page("p1", &["a", "b"]), page("p2", &["a", "a", "c"])];
        let index = TfIdfAnalyzer::new(&pages).unwrap();
        assert_eq!(index.idf("a"), 0.0);
        assert!((index.idf("b") - 2f64.ln()).abs() < 1e-12);
        assert_eq!(index.document_vector("p2").unwrap().weight("a"), 0.0);
    }

    #[test]
    fn term_frequency_is_share_of_page() {
        let pages = vec![page("p1", &["x", "x", "y", "z"]), page("p2", &["w"])];
        let index = TfIdfAnalyzer::new(&pages).unwrap();
        let vector = index.document_vector("p1").unwrap();
        assert!((vector.weight("x") - 0.5 * 2f64.ln()).abs() < 1e-12);
        assert!((vector.weight("y") - 0.25 * 2f64.ln()).abs() < 1e-12);
        let expected_norm = (0.25 + 0.0625 + 0.0625f64).sqrt() * 2f64.ln();
        assert!((vector.norm() - expected_norm).abs() < 1e-12);
    }

    #[test]
    fn unknown_words_and_empty_query_score_zero() {
        let pages = vec![page("p1", &["a"]), page("p2", &["b"])];
        let index = TfIdfAnalyzer::new(&pages).unwrap();
        assert_eq!(index.compute_relevance(&["nowhere"], "p1"), Ok(0.0));
        assert_eq!(index.compute_relevance::<&str>(&[], "p1"), Ok(0.0));
        assert_eq!(index.idf("nowhere"), 0.0);
    }

    #[test]
    fn empty_page_scores_zero() {
        let pages = vec![page("empty", &[]), page("p", &["a"])];
        let index = TfIdfAnalyzer::new(&pages).unwrap();
        assert_eq!(index.document_vector("empty").unwrap().norm(), 0.0);
        assert_eq!(index.compute_relevance(&["a"], "empty"), Ok(0.0));
    }

    #[test]
    fn repeated_query_words_do_not_inflate_score() {
        let pages = vec![page("p1", &["b", "q"]), page("p2", &["c"])];
        let index = TfIdfAnalyzer::new(&pages).unwrap();
        let once = index.compute_relevance(&["b"], "p1").unwrap();
        let twice = index.compute_relevance(&["b", "b"], "p1").unwrap();
        assert!((once - twice).abs() < 1e-12);
        assert!(once > 0.0 && once <= 1.0);
    }

    #[test]
    fn unknown_page_is_key_not_found() {
        let index = TfIdfAnalyzer::new(&[page("p1", &["a"])]).unwrap();
        assert_eq!(index.compute_relevance(&["a"], "p9"), Err(ContainerError::KeyNotFound));
    }
}
