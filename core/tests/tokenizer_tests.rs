use sift_core::tokenizer::{is_stopword, tokenize, TokenizerOptions};

#[test]
fn it_normalizes_and_stems() {
    let words = tokenize("Running Runners RUN! The menu.", TokenizerOptions::default());
    // Stemming to "run" should appear
    assert!(words.contains(&"run".to_string()));

    // NFKC folds the ligature and full-width forms before lowercasing
    let plain = TokenizerOptions { stem: false, remove_stopwords: false };
    assert_eq!(tokenize("\u{FB01}ne ＣＡＦÉ", plain), vec!["fine", "café"]);
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog", TokenizerOptions::default());
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(is_stopword("and"));
}

#[test]
fn it_keeps_stopwords_when_asked() {
    let options = TokenizerOptions { remove_stopwords: false, ..TokenizerOptions::default() };
    let words = tokenize("the fox", options);
    assert_eq!(words, vec!["the", "fox"]);
}
