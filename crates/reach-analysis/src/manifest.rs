//! Entry points and framework hints from a decoded `package.json`.
//!
//! Only `main`, `module`, `browser`, `bin`, `scripts`, `exports`,
//! `dependencies` and `devDependencies` are interpreted; everything else in
//! the manifest is ignored.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use reach_graph::{EntryPoint, EntrySource};

use crate::resolver::validate_path;
use crate::snapshot::{FileSet, normalize_path};
use crate::{AnalyzeError, Result};

/// `node src/server.js`, `ts-node ./scripts/seed.ts`, `bun run src/index.ts`
static INTERPRETER_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|[\s;&|])(?:node|ts-node|tsx|bun|nodemon)\s(?:[^&|;]*?\s)?([^\s'"&|;]+\.[cm]?[jt]sx?)\b"#)
        .expect("interpreter script regex is valid")
});

/// `./bin/cli.js`, `../tools/release`
static RELATIVE_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|[\s;&|])(\.\.?/[^\s'"&|;]+)"#).expect("relative script regex is valid")
});

/// `--entry src/main.ts`, `--entry=./src/main.ts`
static ENTRY_FLAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"--entry[= ]\s*['"]?([^\s'"&|;]+)"#).expect("entry flag regex is valid")
});

/// `esbuild src/index.ts --bundle`, `tsup src/cli.ts`
static BUNDLER_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:^|[\s;&|])(?:webpack|esbuild|rollup|vite|parcel|tsup)\s(?:[^&|;]*?\s)?([^\s'"&|;=-][^\s'"&|;=]*\.[cm]?[jt]sx?)\b"#,
    )
    .expect("bundler script regex is valid")
});

/// Packages whose presence hints at a framework, keyed by hint name.
const FRAMEWORK_PACKAGES: &[(&str, &[&str])] = &[
    ("next", &["next"]),
    ("nuxt", &["nuxt", "nuxt3"]),
    ("sveltekit", &["@sveltejs/kit"]),
    ("remix", &["@remix-run/react", "@remix-run/node", "@remix-run/dev"]),
    ("astro", &["astro"]),
    ("gatsby", &["gatsby"]),
    ("vue", &["vue"]),
    ("react", &["react"]),
    ("angular", &["@angular/core"]),
    ("vite", &["vite"]),
];

/// Output directories whose files are usually built from `src/`.
const OUTPUT_DIRECTORIES: &[&str] = &["dist", "build", "lib", "out"];

/// Dependency-derived framework signals, e.g. `{"next": true, "vue": false}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkHints(BTreeMap<String, bool>);

impl FrameworkHints {
    pub fn is_set(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Names of every hint that is set.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, set)| **set)
            .map(|(name, _)| name.as_str())
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}

/// Everything read from one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Raw entry references, unvalidated and in declaration order.
    pub entries: Vec<EntryPoint>,
    pub framework_hints: FrameworkHints,
}

/// Read entry references and framework hints from a decoded manifest.
///
/// `null` reads as an empty manifest; any other non-object is rejected.
pub fn extract_manifest(manifest: &Value) -> Result<ManifestInfo> {
    let object = match manifest {
        Value::Object(object) => object,
        Value::Null => return Ok(ManifestInfo::default()),
        other => {
            return Err(AnalyzeError::InvalidManifest(format!(
                "expected an object, found {}",
                json_type(other)
            )));
        }
    };

    let mut entries = Vec::new();
    for field in ["main", "module", "browser"] {
        if let Some(path) = object.get(field).and_then(Value::as_str) {
            push_entry(&mut entries, path, EntrySource::ManifestMain);
        }
    }
    collect_bin(object, &mut entries);
    collect_scripts(object, &mut entries);
    if let Some(exports) = object.get("exports") {
        collect_exports(exports, 0, &mut entries);
    }

    Ok(ManifestInfo {
        entries,
        framework_hints: framework_hints(object),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn push_entry(entries: &mut Vec<EntryPoint>, raw: &str, source: EntrySource) {
    let path = normalize_path(raw.trim());
    if path.is_empty() || path.contains('*') {
        return;
    }
    if !entries.iter().any(|e| e.path == path) {
        entries.push(EntryPoint::new(path, source));
    }
}

fn collect_bin(object: &Map<String, Value>, entries: &mut Vec<EntryPoint>) {
    match object.get("bin") {
        Some(Value::String(path)) => push_entry(entries, path, EntrySource::ManifestBin),
        Some(Value::Object(map)) => {
            for path in map.values().filter_map(Value::as_str) {
                push_entry(entries, path, EntrySource::ManifestBin);
            }
        }
        _ => {}
    }
}

fn collect_scripts(object: &Map<String, Value>, entries: &mut Vec<EntryPoint>) {
    let Some(Value::Object(scripts)) = object.get("scripts") else {
        return;
    };
    for command in scripts.values().filter_map(Value::as_str) {
        for path in script_references(command) {
            push_entry(entries, &path, EntrySource::ManifestScript);
        }
    }
}

/// File references embedded in one script command.
pub fn script_references(command: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for regex in [
        &*INTERPRETER_SCRIPT,
        &*RELATIVE_SCRIPT,
        &*ENTRY_FLAG,
        &*BUNDLER_SCRIPT,
    ] {
        for captures in regex.captures_iter(command) {
            if let Some(path) = captures.get(1) {
                let path = path.as_str().to_string();
                if !found.contains(&path) {
                    found.push(path);
                }
            }
        }
    }
    found
}

/// `exports` may be a string, a subpath map, or a subpath map of condition maps.
fn collect_exports(value: &Value, depth: usize, entries: &mut Vec<EntryPoint>) {
    match value {
        Value::String(path) => push_entry(entries, path, EntrySource::ManifestExport),
        Value::Array(items) => {
            for item in items {
                collect_exports(item, depth, entries);
            }
        }
        Value::Object(map) if depth < 2 => {
            for nested in map.values() {
                collect_exports(nested, depth + 1, entries);
            }
        }
        _ => {}
    }
}

fn framework_hints(object: &Map<String, Value>) -> FrameworkHints {
    let has_dependency = |name: &str| {
        ["dependencies", "devDependencies"].iter().any(|field| {
            object
                .get(*field)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(name))
        })
    };

    FrameworkHints(
        FRAMEWORK_PACKAGES
            .iter()
            .map(|(hint, packages)| {
                (hint.to_string(), packages.iter().any(|p| has_dependency(*p)))
            })
            .collect(),
    )
}

/// Map raw entry references onto known files.
///
/// A reference under an output directory (`dist/index.js`) that matches no
/// file is retried re-rooted at `src/`. References matching nothing are
/// dropped, so every returned entry names a known file.
pub fn resolve_entry_points(raw: &[EntryPoint], files: &FileSet) -> Vec<EntryPoint> {
    let mut resolved: Vec<EntryPoint> = Vec::new();
    for entry in raw {
        let Some(path) = locate_entry(&entry.path, files) else {
            tracing::debug!(path = %entry.path, source = %entry.source, "entry point matches no known file");
            continue;
        };
        if !resolved.iter().any(|e| e.path == path) {
            resolved.push(EntryPoint::new(path, entry.source));
        }
    }
    resolved
}

fn locate_entry(path: &str, files: &FileSet) -> Option<String> {
    let path = path.trim_start_matches('/');
    if let Some(found) = validate_path(path, files).matched {
        return Some(found);
    }
    let (first, rest) = path.split_once('/')?;
    if !OUTPUT_DIRECTORIES.contains(&first) {
        return None;
    }
    validate_path(&format!("src/{rest}"), files).matched
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn paths(info: &ManifestInfo) -> Vec<(&str, EntrySource)> {
        info.entries
            .iter()
            .map(|e| (e.path.as_str(), e.source))
            .collect()
    }

    #[test]
    fn test_main_module_browser() {
        let info = extract_manifest(&json!({
            "main": "./dist/index.js",
            "module": "dist/index.mjs",
            "browser": { "./server.js": false },
        }))
        .unwrap();

        assert_eq!(
            paths(&info),
            vec![
                ("dist/index.js", EntrySource::ManifestMain),
                ("dist/index.mjs", EntrySource::ManifestMain),
            ]
        );
    }

    #[test]
    fn test_bin_string_and_map() {
        let single = extract_manifest(&json!({ "bin": "./cli.js" })).unwrap();
        assert_eq!(paths(&single), vec![("cli.js", EntrySource::ManifestBin)]);

        let many = extract_manifest(&json!({ "bin": { "a": "bin/a.js", "b": "bin/b.js" } })).unwrap();
        assert_eq!(many.entries.len(), 2);
        assert!(many.entries.iter().all(|e| e.source == EntrySource::ManifestBin));
    }

    #[test]
    fn test_script_patterns() {
        assert_eq!(script_references("node src/server.js"), vec!["src/server.js"]);
        assert_eq!(
            script_references("node -r dotenv/config src/index.js"),
            vec!["src/index.js"]
        );
        assert_eq!(script_references("./scripts/deploy.sh"), vec!["./scripts/deploy.sh"]);
        assert_eq!(
            script_references("webpack --entry=./src/main.ts --mode production"),
            vec!["./src/main.ts"]
        );
        assert_eq!(
            script_references("esbuild src/index.ts --bundle --outfile=dist/out.js"),
            vec!["src/index.ts"]
        );
        assert!(script_references("eslint . && prettier --check .").is_empty());
        assert_eq!(
            script_references("npm run lint && npx tsx watch src/dev.ts"),
            vec!["src/dev.ts"]
        );
    }

    #[test]
    fn test_tool_names_inside_file_names_are_not_commands() {
        assert!(script_references("eslint --fix src/App.tsx src/legacy.ts").is_empty());
        assert!(script_references("prettier --write vite.config.ts src/main.ts").is_empty());
        assert!(script_references("cat nodemon.json src/index.js").is_empty());
    }

    #[test]
    fn test_exports_shapes() {
        let info = extract_manifest(&json!({
            "exports": {
                ".": { "import": "./dist/index.mjs", "require": "./dist/index.cjs" },
                "./utils": "./dist/utils.js",
                "./assets/*": "./dist/assets/*.js",
            }
        }))
        .unwrap();

        let exported: Vec<_> = info.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(exported, vec!["dist/index.mjs", "dist/index.cjs", "dist/utils.js"]);

        let plain = extract_manifest(&json!({ "exports": "./index.js" })).unwrap();
        assert_eq!(paths(&plain), vec![("index.js", EntrySource::ManifestExport)]);
    }

    #[test]
    fn test_framework_hints_from_both_dependency_maps() {
        let info = extract_manifest(&json!({
            "dependencies": { "react": "^18" },
            "devDependencies": { "@sveltejs/kit": "^2", "vite": "^5" },
        }))
        .unwrap();

        let hints = &info.framework_hints;
        assert!(hints.is_set("react"));
        assert!(hints.is_set("sveltekit"));
        assert!(hints.is_set("vite"));
        assert!(!hints.is_set("next"));
        assert_eq!(hints.as_map().len(), FRAMEWORK_PACKAGES.len());
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(matches!(
            extract_manifest(&json!([1, 2])),
            Err(AnalyzeError::InvalidManifest(_))
        ));
        assert_eq!(extract_manifest(&Value::Null).unwrap(), ManifestInfo::default());
    }

    #[test]
    fn test_resolve_maps_output_directories_to_src() {
        let files = FileSet::from_paths(["src/index.ts", "bin/cli.js"]);
        let raw = vec![
            EntryPoint::new("dist/index.js", EntrySource::ManifestMain),
            EntryPoint::new("bin/cli.js", EntrySource::ManifestBin),
            EntryPoint::new("dist/missing.js", EntrySource::ManifestExport),
        ];

        let resolved = resolve_entry_points(&raw, &files);
        assert_eq!(
            resolved,
            vec![
                EntryPoint::new("src/index.ts", EntrySource::ManifestMain),
                EntryPoint::new("bin/cli.js", EntrySource::ManifestBin),
            ]
        );
    }
}
