//! A [`ContentSource`] over a local fixture directory.
//!
//! Layout: the world page at `The_World.wiki`, category members as `*.wiki`
//! files under `scenes/`, `characters/`, and `items/`, and an optional
//! `images.json` name-to-URL map. Page titles map to file names with spaces
//! replaced by underscores; directory iteration is sorted so compile runs
//! are deterministic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pq_compiler::compiler::{CHARACTERS_CATEGORY, ITEMS_CATEGORY, SCENES_CATEGORY};
use pq_compiler::{ContentSource, ImageRecord, Page, SourceError};
use pq_core::image::canonical_name;

pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn category_dir(category: &str) -> Option<&'static str> {
        match category {
            SCENES_CATEGORY => Some("scenes"),
            CHARACTERS_CATEGORY => Some("characters"),
            ITEMS_CATEGORY => Some("items"),
            _ => None,
        }
    }

    fn image_map(&self) -> Result<BTreeMap<String, String>, SourceError> {
        let path = self.root.join("images.json");
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| SourceError::Transport(format!("cannot read images.json: {e}")))?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&text)
            .map_err(|e| SourceError::Transport(format!("malformed images.json: {e}")))?;
        Ok(raw
            .into_iter()
            .map(|(name, url)| (canonical_name(&name), url))
            .collect())
    }
}

impl ContentSource for DirSource {
    fn fetch_page(&self, title: &str) -> Result<String, SourceError> {
        let file = format!("{}.wiki", canonical_name(title));
        std::fs::read_to_string(self.root.join(file))
            .map_err(|_| SourceError::PageNotFound(title.to_string()))
    }

    fn fetch_category_members(&self, category: &str) -> Result<Vec<Page>, SourceError> {
        let dir = Self::category_dir(category)
            .ok_or_else(|| SourceError::CategoryNotFound(category.to_string()))?;
        let dir = self.root.join(dir);
        let entries = std::fs::read_dir(&dir)
            .map_err(|_| SourceError::CategoryNotFound(category.to_string()))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "wiki"))
            .collect();
        paths.sort();

        let mut pages = Vec::new();
        for path in paths {
            let text = std::fs::read_to_string(&path).map_err(|e| {
                SourceError::Transport(format!("cannot read {}: {e}", path.display()))
            })?;
            pages.push(Page {
                title: page_title(&path),
                text,
            });
        }
        Ok(pages)
    }

    fn resolve_image_urls(&self, names: &[String]) -> Result<Vec<ImageRecord>, SourceError> {
        let map = self.image_map()?;
        if map.is_empty() {
            return Ok(Vec::new());
        }
        Ok(names
            .iter()
            .map(|name| {
                let bare = name.strip_prefix("File:").unwrap_or(name);
                ImageRecord {
                    title: name.clone(),
                    url: map.get(&canonical_name(bare)).cloned(),
                }
            })
            .collect())
    }
}

/// File stem with underscores turned back into spaces.
fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}
