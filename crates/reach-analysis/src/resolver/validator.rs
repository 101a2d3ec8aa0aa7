//! Candidate path validation against the known-file set.
//!
//! Tries a candidate base path with the extension and index-file conventions
//! used by TypeScript and bundler resolution, in a fixed order so results are
//! deterministic.

use crate::snapshot::{FileSet, normalize_path};

/// Extensions tried for extensionless candidates, source languages first.
pub const EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".d.ts", ".mts", ".cts", ".js", ".jsx", ".mjs", ".cjs", ".vue", ".svelte",
    ".astro", ".json",
];

/// Output extensions and the source extensions they are compiled from.
///
/// TypeScript projects written for native ESM import `./util.js` while the
/// file on disk is `util.ts`.
const OUTPUT_TO_SOURCE: &[(&str, &[&str])] = &[
    (".js", &[".ts", ".tsx"]),
    (".jsx", &[".tsx"]),
    (".mjs", &[".mts"]),
    (".cjs", &[".cts"]),
];

/// Outcome of validating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCheck {
    /// The known file the candidate resolved to.
    pub matched: Option<String>,
    /// Every concrete path tested, in order.
    pub attempted: Vec<String>,
}

impl PathCheck {
    pub fn is_valid(&self) -> bool {
        self.matched.is_some()
    }

    /// Diagnostic for a failed check.
    pub fn failure_message(&self, candidate: &str) -> String {
        format!(
            "no known file matches '{}' ({} candidates tried)",
            normalize_path(candidate),
            self.attempted.len()
        )
    }
}

struct Search<'a> {
    files: &'a FileSet,
    attempted: Vec<String>,
}

impl Search<'_> {
    fn hit(&mut self, candidate: String) -> Option<String> {
        if candidate.is_empty() || self.attempted.contains(&candidate) {
            return None;
        }
        tracing::trace!(candidate = %candidate, "trying path");
        let found = self.files.contains(&candidate);
        self.attempted.push(candidate);
        if found { self.attempted.last().cloned() } else { None }
    }

    fn with_extensions(&mut self, base: &str) -> Option<String> {
        if base.is_empty() {
            return None;
        }
        EXTENSIONS
            .iter()
            .find_map(|ext| self.hit(format!("{base}{ext}")))
    }

    fn index_of(&mut self, dir: &str) -> Option<String> {
        EXTENSIONS
            .iter()
            .find_map(|ext| self.hit(join(dir, &format!("index{ext}"))))
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Split a trailing `.ext` off the last path segment.
///
/// Dotfiles (`.env`) and segments without a dot have no extension.
pub(crate) fn split_extension(path: &str) -> Option<(&str, &str)> {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    let dot = path[name_start..].rfind('.')? + name_start;
    if dot == name_start || dot + 1 == path.len() {
        return None;
    }
    let ext = &path[dot..];
    if !ext[1..].chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((&path[..dot], ext))
}

/// Validate a candidate base path against the known files.
///
/// Search order, stopping at the first hit:
/// 1. the normalized candidate itself
/// 2. candidate + each of [`EXTENSIONS`]
/// 3. an output extension (`.js`) swapped for its source extensions (`.ts`)
/// 4. an unmatched trailing extension stripped, as `stem/index.<ext>` and then `stem.<ext>`
/// 5. the candidate as a directory: `candidate/index.<ext>`
pub fn validate_path(candidate: &str, files: &FileSet) -> PathCheck {
    let normalized = normalize_path(candidate);
    let mut search = Search {
        files,
        attempted: Vec::new(),
    };

    let matched = search
        .hit(normalized.clone())
        .or_else(|| search.with_extensions(&normalized))
        .or_else(|| {
            let (stem, ext) = split_extension(&normalized)?;
            let sources = OUTPUT_TO_SOURCE
                .iter()
                .find(|(output, _)| *output == ext)
                .map(|(_, sources)| *sources)?;
            sources
                .iter()
                .find_map(|source| search.hit(format!("{stem}{source}")))
        })
        .or_else(|| {
            let (stem, _) = split_extension(&normalized)?;
            search
                .index_of(stem)
                .or_else(|| search.with_extensions(stem))
        })
        .or_else(|| search.index_of(&normalized));

    PathCheck {
        matched,
        attempted: search.attempted,
    }
}
