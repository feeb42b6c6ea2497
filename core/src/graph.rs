use crate::dict::HashDictionary;
use crate::error::Result;
use crate::set::HashSet;
use crate::Page;

/// Directed link graph over one corpus, keyed by page URI.
///
/// Every edge points at a page of the same corpus and no page links to
/// itself. Built once by [`WebGraph::build`]; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct WebGraph {
    edges: HashDictionary<String, HashSet<String>>,
}

impl WebGraph {
    pub fn build(pages: &[Page]) -> Self {
        let corpus: HashSet<&str> = pages.iter().map(|p| p.uri.as_str()).collect();

        let mut edges = HashDictionary::new();
        let mut dropped = 0usize;
        for page in pages {
            let mut out = HashSet::new();
            for link in &page.links {
                if link != &page.uri && corpus.contains(link.as_str()) {
                    out.insert(link.clone());
                } else {
                    dropped += 1;
                }
            }
            if edges.put(page.uri.clone(), out).is_some() {
                tracing::warn!(uri = %page.uri, "duplicate page uri; later record replaces earlier");
            }
        }

        let graph = Self { edges };
        tracing::debug!(
            pages = graph.len(),
            edges = graph.edge_count(),
            dropped_links = dropped,
            "built web graph"
        );
        graph
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.edges.contains_key(uri)
    }

    pub fn out_links(&self, uri: &str) -> Result<&HashSet<String>> {
        self.edges.get(uri)
    }

    pub fn out_degree(&self, uri: &str) -> Result<usize> {
        Ok(self.out_links(uri)?.len())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    /// Pages with no outbound link inside the corpus.
    pub fn dangling_pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.edges
            .iter()
            .filter(|(_, out)| out.is_empty())
            .map(|(uri, _)| uri.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> + '_ {
        self.edges.iter().map(|(uri, out)| (uri.as_str(), out))
    }
}
