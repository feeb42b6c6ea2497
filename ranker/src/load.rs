use anyhow::{Context, Result};
use serde::Deserialize;
use sift_core::tokenizer::{tokenize, TokenizerOptions};
use sift_core::{HashSet, Page};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

/// One page record as written by the crawler or by hand.
#[derive(Debug, Deserialize)]
struct InputPage {
    uri: Option<String>,
    url: Option<String>,
    id: Option<String>,
    #[serde(default)]
    links: Vec<String>,
    /// Pre-split words, normalized like queries; when absent, `title` and
    /// `body` are tokenized.
    words: Option<Vec<String>>,
    title: Option<String>,
    body: Option<String>,
}

/// Canonical form of a page or link URI.
///
/// URLs lose their fragment and relative links resolve against `base`.
/// Anything that does not parse as a URL is an opaque id and kept verbatim.
pub fn canonicalize(raw: &str, base: Option<&Url>) -> String {
    let raw = raw.trim();
    let parsed = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    };
    match parsed {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// Load every page under `input` (a file, or a directory of `.json`/`.jsonl`
/// files). The first record for a URI wins; later duplicates are skipped.
pub fn load_pages<P: AsRef<Path>>(input: P, options: TokenizerOptions) -> Result<Vec<Page>> {
    let input = input.as_ref();
    let mut loader = PageLoader { options, pages: Vec::new(), seen: HashSet::new() };
    for file in collect_files(input) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            loader.read_jsonl(&file)?;
        } else {
            loader.read_json(&file)?;
        }
    }
    tracing::info!(input = %input.display(), pages = loader.pages.len(), "loaded pages");
    Ok(loader.pages)
}

fn collect_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

struct PageLoader {
    options: TokenizerOptions,
    pages: Vec<Page>,
    seen: HashSet<String>,
}

impl PageLoader {
    fn read_jsonl(&mut self, file: &Path) -> Result<()> {
        let reader = BufReader::new(File::open(file)?);
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: InputPage = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}", file.display(), n + 1))?;
            self.ingest(record)?;
        }
        Ok(())
    }

    fn read_json(&mut self, file: &Path) -> Result<()> {
        let reader = BufReader::new(File::open(file)?);
        let json: serde_json::Value = serde_json::from_reader(reader)
            .with_context(|| format!("parsing {}", file.display()))?;
        match json {
            serde_json::Value::Array(arr) => {
                for v in arr {
                    self.ingest(serde_json::from_value(v)?)?;
                }
            }
            serde_json::Value::Object(_) => self.ingest(serde_json::from_value(json)?)?,
            _ => tracing::warn!(file = %file.display(), "skipping json that is neither object nor array"),
        }
        Ok(())
    }

    fn ingest(&mut self, record: InputPage) -> Result<()> {
        let raw = record
            .uri
            .or(record.url)
            .or(record.id)
            .context("page record has no uri, url or id")?;
        let uri = canonicalize(&raw, None);
        if !self.seen.insert(uri.clone()) {
            tracing::warn!(%uri, "duplicate page; keeping the first record");
            return Ok(());
        }

        let base = Url::parse(&uri).ok();
        let links = record.links.iter().map(|l| canonicalize(l, base.as_ref())).collect();
        let words = match record.words {
            Some(words) => tokenize(&words.join(" "), self.options),
            None => {
                let mut text = record.title.unwrap_or_default();
                text.push('\n');
                text.push_str(record.body.as_deref().unwrap_or(""));
                tokenize(&text, self.options)
            }
        };

        self.pages.push(Page { uri, links, words });
        Ok(())
    }
}
