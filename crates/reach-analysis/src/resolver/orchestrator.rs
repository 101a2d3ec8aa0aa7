//! Priority-ordered dispatch over the resolver strategies.

use super::external::is_external_package;
use super::{
    AbsoluteResolver, AliasResolver, FrameworkResolver, ImportResolver, RelativeResolver,
    Resolution, ResolutionContext,
};
use crate::{AnalyzeError, Result};

/// Dispatches imports to resolvers in descending priority order.
///
/// The resolver set is fixed at construction. The context (known files,
/// framework, aliases) can be replaced with [`initialize`](Self::initialize)
/// between passes without rebuilding resolvers.
#[derive(Debug)]
pub struct ImportOrchestrator {
    resolvers: Vec<Box<dyn ImportResolver>>,
    context: Option<ResolutionContext>,
}

impl Default for ImportOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportOrchestrator {
    /// Orchestrator with the four built-in strategies.
    pub fn new() -> Self {
        Self::with_resolvers(vec![
            Box::new(AbsoluteResolver),
            Box::new(FrameworkResolver),
            Box::new(AliasResolver),
            Box::new(RelativeResolver),
        ])
    }

    /// Orchestrator over a custom resolver set, sorted by descending priority.
    pub fn with_resolvers(mut resolvers: Vec<Box<dyn ImportResolver>>) -> Self {
        resolvers.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self {
            resolvers,
            context: None,
        }
    }

    /// Install (or replace) the resolution context.
    pub fn initialize(&mut self, context: ResolutionContext) {
        tracing::debug!(
            files = context.files().len(),
            framework = context.framework().map(|f| f.name.as_str()),
            aliases = context.custom_aliases().len(),
            "resolution context initialized"
        );
        self.context = Some(context);
    }

    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&ResolutionContext> {
        self.context.as_ref()
    }

    /// Resolver names in dispatch order.
    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Resolve one import of `specifier` from the file `from`.
    ///
    /// Only fails when no context was installed. Unresolvable imports come
    /// back as `Resolution`s with `exists == false`.
    pub fn resolve(&self, specifier: &str, from: &str) -> Result<Resolution> {
        let ctx = self
            .context
            .as_ref()
            .ok_or(AnalyzeError::ContextNotInitialized)?;

        if is_external_package(specifier, ctx.custom_aliases()) {
            tracing::trace!(specifier, "external package");
            return Ok(Resolution::external(
                format!("'{specifier}' is an external package"),
                Vec::new(),
            ));
        }

        let mut trace = Vec::new();
        let mut failures = Vec::new();
        for resolver in &self.resolvers {
            if !resolver.can_resolve(specifier, ctx) {
                continue;
            }
            let resolution = resolver.resolve(specifier, from, ctx);
            if resolution.exists {
                tracing::debug!(
                    specifier,
                    from,
                    resolver = resolver.name(),
                    resolved = resolution.resolved_path.as_deref(),
                    "import resolved"
                );
                return Ok(resolution);
            }
            trace.extend(resolution.trace);
            if let Some(reason) = resolution.failure_reason {
                failures.push(format!("{}: {reason}", resolver.name()));
            }
        }

        let reason = if failures.is_empty() {
            format!("no resolver claimed '{specifier}'")
        } else {
            format!("unresolved '{specifier}' ({})", failures.join("; "))
        };
        tracing::debug!(specifier, from, reason = %reason, "import unresolved");
        Ok(Resolution::external(reason, trace))
    }
}
