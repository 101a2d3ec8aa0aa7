//! External package classification.
//!
//! External specifiers are never handed to a resolver: the analysis does not
//! look inside installed packages.

use rustc_hash::FxHashMap as HashMap;

use super::aliases::match_custom_alias;

/// Node.js built-in modules importable without the `node:` prefix.
pub const BUILTIN_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "crypto",
    "dgram",
    "dns",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "querystring",
    "readline",
    "stream",
    "stream/promises",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

/// Prefixes reserved for project aliases; never package names.
pub(crate) const ALIAS_PREFIXES: &[&str] = &["@/", "~/", "#/"];

/// Returns true for `./x`, `../x`, `.` and `..`.
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
}

/// Classify a specifier as an external package.
///
/// A specifier is external when it is a platform built-in (`fs`,
/// `node:path`), a bare single-segment name (`react`), or a scoped
/// two-segment name (`@tanstack/query`). Relative paths, rooted paths, the
/// reserved alias prefixes and any prefix of `custom_aliases` are never
/// external.
pub fn is_external_package(specifier: &str, custom_aliases: &HashMap<String, String>) -> bool {
    if specifier.is_empty() || is_relative(specifier) || specifier.starts_with('/') {
        return false;
    }
    if ALIAS_PREFIXES.iter().any(|prefix| specifier.starts_with(prefix)) {
        return false;
    }
    if match_custom_alias(specifier, custom_aliases).is_some() {
        return false;
    }
    if specifier.starts_with("node:") || BUILTIN_MODULES.contains(&specifier) {
        return true;
    }

    let segments: Vec<&str> = specifier.split('/').collect();
    match segments.as_slice() {
        [name] => !name.is_empty(),
        [scope, name] => scope.starts_with('@') && scope.len() > 1 && !name.is_empty(),
        _ => false,
    }
}

/// Extract the base package name from an import specifier.
///
/// This handles scoped packages correctly:
/// - `@foo/bar` -> `@foo/bar`
/// - `@foo/bar/baz` -> `@foo/bar`
/// - `lodash` -> `lodash`
/// - `lodash/fp` -> `lodash`
pub fn extract_package_name(specifier: &str) -> &str {
    if specifier.is_empty() {
        return specifier;
    }

    if specifier.starts_with('@') {
        if let Some(first_slash) = specifier.find('/') {
            if let Some(second_slash) = specifier[first_slash + 1..].find('/') {
                return &specifier[..first_slash + 1 + second_slash];
            }
        }
        return specifier;
    }

    match specifier.find('/') {
        Some(slash_idx) => &specifier[..slash_idx],
        None => specifier,
    }
}
