//! Immutable input snapshot: the files of one analysis pass.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

/// One source file as supplied by the upstream parser/indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Normalized, slash-separated identifier unique within the snapshot.
    pub path: String,
    /// File text, or `None` when the file was indexed but not loaded.
    #[serde(default)]
    pub content: Option<String>,
    /// Import specifiers already extracted by the parser.
    ///
    /// `None` means the parser did not supply them and the graph builder
    /// falls back to textual extraction from `content`.
    #[serde(default)]
    pub raw_imports: Option<Vec<String>>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: Some(content.into()),
            raw_imports: None,
        }
    }

    /// A record for a file whose content was never loaded.
    pub fn unloaded(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: None,
            raw_imports: None,
        }
    }

    /// Attach parser-supplied import specifiers.
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_imports = Some(imports.into_iter().map(Into::into).collect());
        self
    }
}

/// Normalize a path identifier.
///
/// Converts `\` to `/`, collapses repeated separators, drops `./` segments
/// and strips any trailing separator. `..` segments are left untouched; use
/// [`fold_segments`](crate::resolver::fold_segments) to fold them.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let joined = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// The set of known file paths, used for membership tests during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: HashSet<String>,
}

impl FileSet {
    /// Build a file set from arbitrary paths, normalizing each one.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|p| normalize_path(p.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

/// All files of one analysis pass, with normalized paths.
///
/// Records keep the order they were supplied in; duplicate paths after
/// normalization keep the first record.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<FileRecord>,
    index: HashMap<String, usize>,
    files: FileSet,
}

impl Snapshot {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FileRecord>,
    {
        let mut snapshot = Self::default();
        for mut record in records {
            record.path = normalize_path(&record.path);
            if snapshot.index.contains_key(&record.path) {
                tracing::debug!(path = %record.path, "duplicate file record ignored");
                continue;
            }
            snapshot
                .index
                .insert(record.path.clone(), snapshot.records.len());
            snapshot.files.paths.insert(record.path.clone());
            snapshot.records.push(record);
        }
        snapshot
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn record(&self, path: &str) -> Option<&FileRecord> {
        self.index.get(path).map(|&i| &self.records[i])
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    /// Paths in record order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("src\\components\\Button.tsx"), "src/components/Button.tsx");
        assert_eq!(normalize_path("src//utils///index.ts"), "src/utils/index.ts");
        assert_eq!(normalize_path("src/lib/"), "src/lib");
        assert_eq!(normalize_path("./src/./a.ts"), "src/a.ts");
        assert_eq!(normalize_path("/abs//x.ts"), "/abs/x.ts");
        assert_eq!(normalize_path("src/../a.ts"), "src/../a.ts");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_snapshot_normalizes_and_dedupes() {
        let snapshot = Snapshot::new([
            FileRecord::new("src\\a.ts", "first"),
            FileRecord::new("./src/a.ts", "second"),
            FileRecord::unloaded("src/b.ts"),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.files().contains("src/a.ts"));
        assert_eq!(
            snapshot.record("src/a.ts").and_then(|r| r.content.as_deref()),
            Some("first")
        );
        assert_eq!(snapshot.paths().collect::<Vec<_>>(), vec!["src/a.ts", "src/b.ts"]);
    }

    #[test]
    fn test_file_record_deserializes_camel_case() {
        let record: FileRecord = serde_json::from_str(
            r#"{ "path": "a.ts", "content": null, "rawImports": ["./b"] }"#,
        )
        .unwrap();

        assert_eq!(record.content, None);
        assert_eq!(record.raw_imports, Some(vec!["./b".to_string()]));
    }
}
