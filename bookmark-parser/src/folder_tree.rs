//! Conversions between the nested folder tree and its flat parent-path form
//!
//! HTML exports nest naturally and produce a tree while being parsed. CSV
//! exports only carry a path string per row, so their folders are collected
//! in a [`FolderPathRegistry`] and assembled into a tree afterwards.

pub use bookmark_import_core::count_folders;
use bookmark_import_core::{FlatFolder, ParsedFolder};
use std::collections::{HashMap, HashSet};

/// Registers folder paths and every one of their prefixes exactly once
#[derive(Debug, Default)]
pub struct FolderPathRegistry {
    paths: Vec<Vec<String>>,
    known: HashSet<Vec<String>>,
}

impl FolderPathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and all of its prefixes, keeping first-seen order.
    pub fn register(&mut self, path: &[String]) {
        for end in 1..=path.len() {
            let prefix = &path[..end];
            if !self.known.contains(prefix) {
                self.known.insert(prefix.to_vec());
                self.paths.push(prefix.to_vec());
            }
        }
    }

    pub fn contains(&self, path: &[String]) -> bool {
        self.known.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Registered paths in registration order
    pub fn paths(&self) -> &[Vec<String>] {
        &self.paths
    }

    pub fn to_flat(&self) -> Vec<FlatFolder> {
        self.paths.iter().map(|path| flat_entry(path)).collect()
    }

    pub fn into_tree(self) -> Vec<ParsedFolder> {
        build_tree(&self.to_flat())
    }
}

fn flat_entry(path: &[String]) -> FlatFolder {
    let depth = path.len().saturating_sub(1);
    FlatFolder {
        name: path.last().cloned().unwrap_or_default(),
        path: path.to_vec(),
        parent_path: (depth > 0).then(|| path[..depth].to_vec()),
        depth,
    }
}

/// Flatten a folder tree in pre-order, preserving sibling order.
pub fn flatten(folders: &[ParsedFolder]) -> Vec<FlatFolder> {
    fn walk(folders: &[ParsedFolder], out: &mut Vec<FlatFolder>) {
        for folder in folders {
            let mut entry = flat_entry(&folder.path);
            entry.name = folder.name.clone();
            out.push(entry);
            walk(&folder.children, out);
        }
    }

    let mut out = Vec::new();
    walk(folders, &mut out);
    out
}

/// Assemble a tree from flat entries.
///
/// Each entry is linked under the entry whose path is its own path minus the
/// last segment; entries without such a parent become roots. Siblings are
/// ordered by path length, then input order. Duplicate and empty paths are
/// dropped.
pub fn build_tree(flat: &[FlatFolder]) -> Vec<ParsedFolder> {
    let mut seen: HashSet<&[String]> = HashSet::new();
    let mut ordered: Vec<&FlatFolder> = flat
        .iter()
        .filter(|folder| !folder.path.is_empty() && seen.insert(folder.path.as_slice()))
        .collect();
    ordered.sort_by_key(|folder| folder.path.len());

    let mut roots = Vec::new();
    let mut children: HashMap<&[String], Vec<&FlatFolder>> = HashMap::new();
    for folder in ordered {
        let parent = &folder.path[..folder.path.len() - 1];
        if !parent.is_empty() && seen.contains(parent) {
            children.entry(parent).or_default().push(folder);
        } else {
            roots.push(folder);
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, &children))
        .collect()
}

fn assemble(folder: &FlatFolder, children: &HashMap<&[String], Vec<&FlatFolder>>) -> ParsedFolder {
    let nested = children
        .get(folder.path.as_slice())
        .map(|kids| kids.iter().map(|kid| assemble(kid, children)).collect())
        .unwrap_or_default();

    ParsedFolder {
        name: folder.name.clone(),
        path: folder.path.clone(),
        children: nested,
    }
}
