use anyhow::{Context, Result};
use serde::Serialize;
use sift_core::tokenizer::{tokenize, TokenizerOptions};
use sift_core::{top_k, EngineConfig, Page, PageRankAnalyzer, TfIdfAnalyzer};
use std::cmp::Ordering;
use std::time::Instant;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

/// A page matching a query. Hits order by combined score, then relevance;
/// on a full tie the lexicographically smaller URI ranks higher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub uri: String,
    pub score: f64,
    pub relevance: f64,
    pub page_rank: f64,
}

impl PartialOrd for SearchHit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.score
                .partial_cmp(&other.score)?
                .then(self.relevance.partial_cmp(&other.relevance)?)
                .then_with(|| other.uri.cmp(&self.uri)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage {
    pub uri: String,
    pub page_rank: f64,
}

impl PartialOrd for RankedPage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.page_rank
                .partial_cmp(&other.page_rank)?
                .then_with(|| other.uri.cmp(&self.uri)),
        )
    }
}

/// Both ranking signals over one corpus snapshot.
pub struct SearchEngine {
    uris: Vec<String>,
    page_rank: PageRankAnalyzer,
    relevance: TfIdfAnalyzer,
    tokenizer: TokenizerOptions,
}

impl SearchEngine {
    pub fn build(pages: &[Page], config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let page_rank = PageRankAnalyzer::new(pages, config.pagerank)?;
        let relevance = TfIdfAnalyzer::new(pages)?;
        Ok(Self {
            uris: pages.iter().map(|p| p.uri.clone()).collect(),
            page_rank,
            relevance,
            tokenizer: config.tokenizer,
        })
    }

    pub fn page_rank(&self) -> &PageRankAnalyzer {
        &self.page_rank
    }

    pub fn relevance(&self) -> &TfIdfAnalyzer {
        &self.relevance
    }

    /// The `n` most authoritative pages, best first.
    pub fn top_pages(&self, n: usize) -> Result<Vec<RankedPage>> {
        let mut ranked = Vec::with_capacity(self.uris.len());
        for uri in &self.uris {
            ranked.push(RankedPage {
                uri: uri.clone(),
                page_rank: self.page_rank.compute_page_rank(uri)?,
            });
        }
        let mut top = top_k(to_k(n)?, &ranked)?;
        top.reverse();
        Ok(top)
    }

    /// Up to `k` pages with non-zero relevance to `words`, best first, plus
    /// the number of pages that matched at all.
    pub fn search_words<S: AsRef<str>>(&self, words: &[S], k: usize) -> Result<(Vec<SearchHit>, usize)> {
        let mut hits = Vec::new();
        for uri in &self.uris {
            let relevance = self.relevance.compute_relevance(words, uri)?;
            if relevance <= 0.0 {
                continue;
            }
            let page_rank = self.page_rank.compute_page_rank(uri)?;
            hits.push(SearchHit {
                uri: uri.clone(),
                score: relevance * page_rank,
                relevance,
                page_rank,
            });
        }
        let total = hits.len();
        let mut top = top_k(to_k(k)?, &hits)?;
        top.reverse();
        Ok((top, total))
    }

    pub fn search(&self, query: &str, k: usize) -> Result<SearchResponse> {
        let start = Instant::now();
        let words = tokenize(query, self.tokenizer);
        let (results, total_hits) = self.search_words(&words, k)?;
        let took_s = start.elapsed().as_secs_f64();
        tracing::info!(query, total_hits, returned = results.len(), took_s, "search complete");
        Ok(SearchResponse {
            query: query.to_string(),
            took_s,
            total_hits,
            results,
        })
    }
}

fn to_k(n: usize) -> Result<isize> {
    isize::try_from(n).context("result count too large")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(uri: &str, score: f64, relevance: f64) -> SearchHit {
        SearchHit { uri: uri.to_string(), score, relevance, page_rank: 0.0 }
    }

    #[test]
    fn hits_order_by_score_then_relevance_then_uri() {
        assert!(hit("a", 0.2, 0.1) > hit("b", 0.1, 0.9));
        assert!(hit("a", 0.2, 0.5) > hit("b", 0.2, 0.1));
        assert!(hit("a", 0.2, 0.5) > hit("b", 0.2, 0.5));
    }

    #[test]
    fn top_pages_best_first() {
        let pages = vec![
            Page::new("hub", Vec::<String>::new(), ["x"]),
            Page::new("a", ["hub"], ["y"]),
            Page::new("b", ["hub"], ["z"]),
        ];
        let engine = SearchEngine::build(&pages, &EngineConfig::default()).unwrap();
        let top = engine.top_pages(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].uri, "hub");
        assert_eq!(top[1].uri, "a");
    }
}
