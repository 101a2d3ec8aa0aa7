//! Relative import resolution (`./x`, `../x`).

use super::external::is_relative;
use super::validator::validate_path;
use super::{ImportResolver, Resolution, ResolutionContext, Strategy};

/// Fold `specifier`'s segments onto the segments of `dir`.
///
/// `..` pops a segment (and is dropped once the stack is empty), `.` and
/// empty segments are skipped, everything else is pushed.
pub fn fold_segments(dir: &str, specifier: &str) -> String {
    let mut stack: Vec<&str> = dir
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    for segment in specifier.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    stack.join("/")
}

/// Base path of a relative `specifier` imported from the file `from`.
pub fn resolve_relative_base(from: &str, specifier: &str) -> String {
    let dir = from.rsplit_once('/').map_or("", |(dir, _)| dir);
    fold_segments(dir, specifier)
}

/// Resolves `./` and `../` imports against the importing file's directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelativeResolver;

impl RelativeResolver {
    pub const PRIORITY: u32 = 100;
}

impl ImportResolver for RelativeResolver {
    fn name(&self) -> &'static str {
        "relative"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn can_resolve(&self, specifier: &str, _ctx: &ResolutionContext) -> bool {
        is_relative(specifier)
    }

    fn resolve(&self, specifier: &str, from: &str, ctx: &ResolutionContext) -> Resolution {
        let base = resolve_relative_base(from, specifier);
        let check = validate_path(&base, ctx.files());
        Resolution::from_check(Strategy::Relative, &base, check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FileSet;

    #[test]
    fn test_fold_segments() {
        assert_eq!(fold_segments("src/components", "./Button"), "src/components/Button");
        assert_eq!(fold_segments("src/components", "../utils/a"), "src/utils/a");
        assert_eq!(fold_segments("src", "../../x"), "x");
        assert_eq!(fold_segments("", "./a"), "a");
        assert_eq!(fold_segments("a/b", "."), "a/b");
        assert_eq!(fold_segments("a/b", ".."), "a");
        assert_eq!(fold_segments("a", ".//b/./c"), "a/b/c");
    }

    #[test]
    fn test_base_uses_importer_directory() {
        assert_eq!(resolve_relative_base("src/app.ts", "./util"), "src/util");
        assert_eq!(resolve_relative_base("index.ts", "./util"), "util");
        assert_eq!(resolve_relative_base("a/c/d.ts", "../b"), "a/b");
    }

    #[test]
    fn test_resolves_directory_index() {
        let ctx = ResolutionContext::new(FileSet::from_paths(["src/lib/index.ts"]));
        let result = RelativeResolver.resolve("./lib", "src/main.ts", &ctx);

        assert!(result.exists);
        assert_eq!(result.resolved_path.as_deref(), Some("src/lib/index.ts"));
    }

    #[test]
    fn test_missing_file_is_data() {
        let ctx = ResolutionContext::new(FileSet::from_paths(["src/a.ts"]));
        let result = RelativeResolver.resolve("./nope", "src/a.ts", &ctx);

        assert!(!result.exists);
        assert_eq!(result.strategy, Strategy::Relative);
        assert!(result.failure_reason.unwrap().contains("src/nope"));
        assert!(!result.trace.is_empty());
    }
}
