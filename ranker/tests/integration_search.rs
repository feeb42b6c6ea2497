use ranker::{load_pages, SearchEngine};
use sift_core::tokenizer::TokenizerOptions;
use sift_core::EngineConfig;
use std::fs;
use tempfile::tempdir;

fn write_tiny_corpus(dir: &std::path::Path) {
    fs::create_dir_all(dir.join("more")).unwrap();

    let jsonl = [
        r##"{"url": "https://rust.example/", "title": "Rust", "body": "Rust systems programming language", "links": ["/book", "https://elsewhere.example/", "#top"]}"##,
        r#"{"url": "https://rust.example/book", "title": "The Book", "body": "Learning rust from the book", "links": ["https://rust.example/"]}"#,
        "",
        r#"{"url": "https://rust.example/", "title": "Duplicate", "body": "ignored duplicate record"}"#,
    ]
    .join("\n");
    fs::write(dir.join("crawl.jsonl"), jsonl).unwrap();

    let json = r#"[
        {"uri": "garden", "words": ["Tomato", "basil", "soil"], "links": ["https://rust.example/book"]},
        {"uri": "kitchen", "words": ["tomato", "pasta"], "links": ["garden"]}
    ]"#;
    fs::write(dir.join("more/pages.json"), json).unwrap();
    fs::write(dir.join("more/notes.txt"), "not a corpus file").unwrap();
}

#[test]
fn loads_canonical_deduplicated_pages() {
    let dir = tempdir().unwrap();
    write_tiny_corpus(dir.path());

    let pages = load_pages(dir.path(), TokenizerOptions::default()).unwrap();
    assert_eq!(pages.len(), 4);

    let root = pages.iter().find(|p| p.uri == "https://rust.example/").unwrap();
    assert!(root.links.contains(&"https://rust.example/book".to_string()));
    // A bare fragment resolves back to the page itself.
    assert!(root.links.contains(&"https://rust.example/".to_string()));
    assert!(root.words.contains(&"rust".to_string()));

    let garden = pages.iter().find(|p| p.uri == "garden").unwrap();
    assert_eq!(garden.words.len(), 3);
    assert!(garden.words.contains(&"tomato".to_string()));
}

#[test]
fn search_returns_ranked_results() {
    let dir = tempdir().unwrap();
    write_tiny_corpus(dir.path());
    let pages = load_pages(dir.path(), TokenizerOptions::default()).unwrap();
    let engine = SearchEngine::build(&pages, &EngineConfig::default()).unwrap();

    let response = engine.search("tomato", 10).unwrap();
    assert_eq!(response.total_hits, 2);
    let uris: Vec<&str> = response.results.iter().map(|h| h.uri.as_str()).collect();
    // kitchen matches more closely, but garden carries the inbound link.
    assert_eq!(uris, vec!["garden", "kitchen"]);
    for hit in &response.results {
        assert!(hit.relevance > 0.0 && hit.relevance <= 1.0);
    }

    let none = engine.search("zeppelin", 10).unwrap();
    assert_eq!(none.total_hits, 0);
    assert!(none.results.is_empty());

    let limited = engine.search("tomato", 1).unwrap();
    assert_eq!(limited.results.len(), 1);
    assert_eq!(limited.total_hits, 2);
}

#[test]
fn page_rank_favours_linked_pages() {
    let dir = tempdir().unwrap();
    write_tiny_corpus(dir.path());
    let pages = load_pages(dir.path(), TokenizerOptions::default()).unwrap();
    let engine = SearchEngine::build(&pages, &EngineConfig::default()).unwrap();

    let top = engine.top_pages(10).unwrap();
    assert_eq!(top.len(), 4);
    assert!(top.windows(2).all(|w| w[0].page_rank >= w[1].page_rank));
    assert_eq!(top.last().unwrap().uri, "kitchen");
    assert!((engine.page_rank().total_mass() - 1.0).abs() < 1e-3);
}

#[test]
fn pre_split_words_share_the_query_vocabulary() {
    let dir = tempdir().unwrap();
    let json = r#"[{"uri": "p1", "words": ["Running", "dogs"]}, {"uri": "p2", "words": ["cats"]}]"#;
    fs::write(dir.path().join("pages.json"), json).unwrap();

    let pages = load_pages(dir.path(), TokenizerOptions::default()).unwrap();
    let p1 = pages.iter().find(|p| p.uri == "p1").unwrap();
    assert_eq!(p1.words, vec!["run", "dog"]);

    let engine = SearchEngine::build(&pages, &EngineConfig::default()).unwrap();
    let response = engine.search("running dogs", 10).unwrap();
    assert_eq!(response.total_hits, 1);
    assert_eq!(response.results[0].uri, "p1");
}
