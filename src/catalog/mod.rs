use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct SampleCatalog;

const INDEX_FILE: &str = "index.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} is missing from the built-in catalog")]
    MissingAsset(String),
    #[error("unknown list: {0}")]
    UnknownList(String),
    #[cfg(feature = "network")]
    #[error("could not fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// One source/target word pair. Unique by `source` within a list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    #[serde(alias = "es")]
    pub source: String,
    #[serde(alias = "en")]
    pub target: String,
}

impl WordPair {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub id: String,
    pub subject: String,
    pub name: String,
    #[serde(default)]
    pub word_count: usize,
    pub file: String,
    #[serde(default)]
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordList {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub name: String,
    pub pairs: Vec<WordPair>,
}

impl WordList {
    /// Drop later duplicates of a source word so scheduling keys stay unique.
    fn dedup_sources(&mut self) {
        let mut seen = HashSet::new();
        let before = self.pairs.len();
        self.pairs.retain(|p| seen.insert(p.source.clone()));
        if self.pairs.len() != before {
            log::warn!(
                "list {} had {} duplicate source words, keeping first occurrences",
                self.id,
                before - self.pairs.len()
            );
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogIndex {
    lists: Vec<ListMeta>,
}

/// Where list metadata and list files come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    Dir(PathBuf),
    #[cfg(feature = "network")]
    Url(String),
}

impl CatalogSource {
    /// Interpret a configured catalog location. Empty means the built-in sample.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.is_empty() {
            return CatalogSource::Builtin;
        }
        if let Some(source) = url_source(location) {
            return source;
        }
        CatalogSource::Dir(PathBuf::from(location))
    }

    fn read(&self, name: &str) -> Result<String, CatalogError> {
        match self {
            CatalogSource::Builtin => {
                let file = SampleCatalog::get(name)
                    .ok_or_else(|| CatalogError::MissingAsset(name.to_string()))?;
                Ok(String::from_utf8_lossy(file.data.as_ref()).into_owned())
            }
            CatalogSource::Dir(dir) => {
                let path = dir.join(name);
                fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
            #[cfg(feature = "network")]
            CatalogSource::Url(base) => {
                let url = format!("{base}/{name}");
                reqwest::blocking::get(&url)
                    .and_then(|res| res.error_for_status())
                    .and_then(|res| res.text())
                    .map_err(|source| CatalogError::Network { url, source })
            }
        }
    }
}

#[cfg(feature = "network")]
fn url_source(location: &str) -> Option<CatalogSource> {
    (location.starts_with("http://") || location.starts_with("https://"))
        .then(|| CatalogSource::Url(location.trim_end_matches('/').to_string()))
}

#[cfg(not(feature = "network"))]
fn url_source(_location: &str) -> Option<CatalogSource> {
    None
}

pub struct Catalog {
    source: CatalogSource,
    pub lists: Vec<ListMeta>,
}

impl Catalog {
    /// Load the index. Lists are ordered newest first.
    pub fn load(source: CatalogSource) -> Result<Self, CatalogError> {
        let content = source.read(INDEX_FILE)?;
        let index: CatalogIndex =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: INDEX_FILE.to_string(),
                source,
            })?;
        let mut lists = index.lists;
        lists.sort_by(|a, b| b.created.cmp(&a.created));
        log::info!("catalog loaded from {source:?}: {} lists", lists.len());
        Ok(Self { source, lists })
    }

    pub fn load_list(&self, meta: &ListMeta) -> Result<WordList, CatalogError> {
        let content = self.source.read(&meta.file)?;
        let mut list: WordList =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: meta.file.clone(),
                source,
            })?;
        list.dedup_sources();
        if list.subject.is_empty() {
            list.subject = meta.subject.clone();
        }
        if list.name.is_empty() {
            list.name = meta.name.clone();
        }
        Ok(list)
    }

    pub fn load_list_by_id(&self, id: &str) -> Result<WordList, CatalogError> {
        let meta = self
            .find(id)
            .ok_or_else(|| CatalogError::UnknownList(id.to_string()))?;
        self.load_list(meta)
    }

    pub fn find(&self, id: &str) -> Option<&ListMeta> {
        self.lists.iter().find(|m| m.id == id)
    }

    /// Distinct subjects in catalog order.
    pub fn subjects(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.lists
            .iter()
            .map(|m| m.subject.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }

    pub fn lists_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a ListMeta> {
        self.lists.iter().filter(move |m| m.subject == subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir) {
        let index = r#"{"lists": [
            {"id": "old", "subject": "Spanish 1", "name": "Unit 1", "wordCount": 2,
             "file": "old.json", "created": "2025-09-01"},
            {"id": "new", "subject": "Spanish 1", "name": "Unit 2", "wordCount": 3,
             "file": "new.json", "created": "2026-01-15"},
            {"id": "fr", "subject": "French", "name": "Basics", "wordCount": 1,
             "file": "fr.json", "created": "2025-10-01"}
        ]}"#;
        fs::write(dir.path().join("index.json"), index).unwrap();
        fs::write(
            dir.path().join("new.json"),
            r#"{"id": "new", "subject": "Spanish 1", "name": "Unit 2",
                "pairs": [{"es": "gato", "en": "cat"}, {"es": "perro", "en": "dog"},
                          {"es": "gato", "en": "kitty"}]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_lists_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        write_catalog(&dir);
        let catalog = Catalog::load(CatalogSource::Dir(dir.path().to_path_buf())).unwrap();
        let ids: Vec<&str> = catalog.lists.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "fr", "old"]);
        assert_eq!(catalog.subjects(), vec!["Spanish 1", "French"]);
        assert_eq!(catalog.lists_for("Spanish 1").count(), 2);
    }

    #[test]
    fn test_legacy_pair_fields_and_duplicate_sources() {
        let dir = TempDir::new().unwrap();
        write_catalog(&dir);
        let catalog = Catalog::load(CatalogSource::Dir(dir.path().to_path_buf())).unwrap();
        let list = catalog.load_list_by_id("new").unwrap();
        assert_eq!(list.pairs.len(), 2);
        assert_eq!(list.pairs[0], WordPair::new("gato", "cat"));
    }

    #[test]
    fn test_missing_list_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_catalog(&dir);
        let catalog = Catalog::load(CatalogSource::Dir(dir.path().to_path_buf())).unwrap();
        assert!(matches!(
            catalog.load_list_by_id("old"),
            Err(CatalogError::Io { .. })
        ));
        assert!(matches!(
            catalog.load_list_by_id("nope"),
            Err(CatalogError::UnknownList(_))
        ));
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::load(CatalogSource::Builtin).unwrap();
        assert!(!catalog.lists.is_empty());
        let first = catalog.lists[0].clone();
        let list = catalog.load_list(&first).unwrap();
        assert!(!list.pairs.is_empty());
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(CatalogSource::parse("  "), CatalogSource::Builtin);
        assert_eq!(
            CatalogSource::parse("/tmp/lists"),
            CatalogSource::Dir(PathBuf::from("/tmp/lists"))
        );
    }
}
