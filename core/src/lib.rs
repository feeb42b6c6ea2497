//! Search-relevance core: hand-built containers plus the two ranking signals
//! computed on top of them, PageRank authority and TF-IDF cosine relevance.

pub mod config;
pub mod dict;
pub mod error;
pub mod graph;
pub mod heap;
pub mod pagerank;
pub mod set;
pub mod tfidf;
pub mod tokenizer;
pub mod topk;

pub use config::EngineConfig;
pub use dict::HashDictionary;
pub use error::ContainerError;
pub use graph::WebGraph;
pub use heap::BoundedHeap;
pub use pagerank::{PageRankAnalyzer, PageRankConfig, RankTable};
pub use set::HashSet;
pub use tfidf::{DocumentVector, IdfTable, TfIdfAnalyzer};
pub use topk::top_k;

use serde::{Deserialize, Serialize};

/// One crawled page, already parsed. Pages are identified by `uri` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub uri: String,
    /// Outbound link URIs in document order.
    pub links: Vec<String>,
    /// Tokenized, case-normalized words in document order.
    pub words: Vec<String>,
}

impl Page {
    pub fn new<U, L, W>(uri: U, links: L, words: W) -> Self
    where
        U: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        Self {
            uri: uri.into(),
            links: links.into_iter().map(Into::into).collect(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}
