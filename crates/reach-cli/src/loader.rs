//! Walks a project directory into the in-memory snapshot the analyzer reads.

use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use serde_json::Value;

use reach_analysis::FileRecord;

use crate::error::{CliError, Result};

/// Files larger than this are kept as nodes but not read.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions of files that take part in the import graph.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs", "vue", "svelte", "astro", "json",
];

#[derive(Debug, Default)]
pub struct LoadedProject {
    /// Sorted by path.
    pub records: Vec<FileRecord>,
    /// Decoded `package.json`, when the root has one.
    pub manifest: Option<Value>,
    /// Files over [`MAX_FILE_SIZE`] or not valid UTF-8, loaded without content.
    pub unreadable: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectLoader {
    root: PathBuf,
    ignore: Vec<String>,
    max_file_size: u64,
}

impl ProjectLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: Vec::new(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Directory names to skip anywhere below the root.
    pub fn with_ignore(mut self, names: Vec<String>) -> Self {
        self.ignore = names;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn load(&self) -> Result<LoadedProject> {
        if !self.root.is_dir() {
            return Err(CliError::RootNotFound(self.root.clone()));
        }

        let ignore = self.ignore.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && ignore.iter().any(|name| entry.file_name() == name.as_str()))
            })
            .build();

        let mut project = LoadedProject::default();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Some(relative) = relative_path(&self.root, entry.path()) else {
                continue;
            };
            if !is_source_file(&relative) {
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > self.max_file_size {
                tracing::warn!(path = %relative, size, "file exceeds size limit; loaded without content");
                project.records.push(FileRecord::unloaded(relative.as_str()));
                project.unreadable.push(relative);
                continue;
            }

            match fs::read_to_string(entry.path()) {
                Ok(content) => project.records.push(FileRecord::new(relative, content)),
                Err(err) => {
                    tracing::debug!(path = %relative, error = %err, "file not readable as UTF-8; loaded without content");
                    project.records.push(FileRecord::unloaded(relative.as_str()));
                    project.unreadable.push(relative);
                }
            }
        }
        project.records.sort_by(|a, b| a.path.cmp(&b.path));
        project.unreadable.sort();

        project.manifest = read_manifest(&self.root.join("package.json"))?;

        tracing::debug!(
            root = %self.root.display(),
            files = project.records.len(),
            unreadable = project.unreadable.len(),
            manifest = project.manifest.is_some(),
            "project loaded"
        );
        Ok(project)
    }
}

/// Root-relative path with `/` separators. `None` for paths outside the root.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Whether a root-relative path belongs in the snapshot.
///
/// Root-level JSON files are tool configuration and stay out. The root
/// `index.html` is kept because Vite reads its script tags.
pub fn is_source_file(relative: &str) -> bool {
    let at_root = !relative.contains('/');
    if at_root && relative == "index.html" {
        return true;
    }
    let Some((_, ext)) = relative.rsplit_once('.') else {
        return false;
    };
    if ext == "json" {
        return !at_root;
    }
    SOURCE_EXTENSIONS.contains(&ext)
}

fn read_manifest(path: &Path) -> Result<Option<Value>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| CliError::InvalidManifest {
            path: path.to_path_buf(),
            source,
        })
}
