//! Gatsby: pages, templates, functions and `gatsby-*` lifecycle files.

use reach_graph::EntrySource;

use super::{FrameworkAnalyzer, is_root_file, is_script};
use crate::config::FrameworkKind;

const LIFECYCLE_FILES: &[&str] = &["gatsby-config", "gatsby-node", "gatsby-browser", "gatsby-ssr"];

#[derive(Debug, Default, Clone, Copy)]
pub struct GatsbyAnalyzer;

impl FrameworkAnalyzer for GatsbyAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::Gatsby
    }

    fn indicators(&self) -> &'static [&'static str] {
        &["gatsby-config.js", "gatsby-config.ts", "gatsby-config.mjs"]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["gatsby"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if !is_script(path) {
            return None;
        }
        if LIFECYCLE_FILES.iter().any(|base| is_root_file(path, base)) {
            return Some(EntrySource::FrameworkConfig);
        }
        if path.starts_with("src/pages/") || path.starts_with("src/templates/") {
            return Some(EntrySource::FrameworkPage);
        }
        path.starts_with("src/api/").then_some(EntrySource::FrameworkApi)
    }
}
