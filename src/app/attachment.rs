use crate::configuration::constants::attachments::{
    ATTACHMENT, PAGE_SCREENSHOT, PAGE_SOURCE, PAGE_SOURCE_EXT, SCREENSHOT_EXT,
};
use crate::reporter::AttachmentRef;
use lazy_static::*;
use mime::Mime;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};

lazy_static! {
    static ref SCREENSHOT_PATTERN: Regex =
        Regex::new(r#"href="([^"]*\.png)""#).expect("Regex compilation error");
    static ref PAGE_SOURCE_PATTERN: Regex =
        Regex::new(r#"href="([^"]*\.html)""#).expect("Regex compilation error");
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachmentKind {
    Screenshot,
    PageSource,
    Custom,
}

#[derive(Debug, Clone)]
pub struct AttachmentPattern {
    kind: AttachmentKind,
    regex: Regex,
}

impl AttachmentPattern {
    /// `regex` must capture the referenced path in group 1.
    pub fn new(kind: AttachmentKind, regex: Regex) -> Self {
        Self { kind, regex }
    }

    pub fn screenshot() -> Self {
        Self::new(AttachmentKind::Screenshot, SCREENSHOT_PATTERN.clone())
    }

    pub fn page_source() -> Self {
        Self::new(AttachmentKind::PageSource, PAGE_SOURCE_PATTERN.clone())
    }

    fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|path| path.as_str())
    }
}

/// Pulls screenshots and page sources referenced from failure diagnostics.
#[derive(Debug, Clone)]
pub struct AttachmentExtractor {
    root: PathBuf,
    patterns: Vec<AttachmentPattern>,
}

impl AttachmentExtractor {
    pub fn new<P: Into<PathBuf>>(root: P, patterns: Vec<AttachmentPattern>) -> Self {
        Self {
            root: root.into(),
            patterns,
        }
    }

    /// Screenshot and page-source patterns followed by `custom` ones.
    pub fn with_defaults<P: Into<PathBuf>>(root: P, custom: &[Regex]) -> Self {
        let mut patterns = vec![
            AttachmentPattern::screenshot(),
            AttachmentPattern::page_source(),
        ];
        patterns.extend(
            custom
                .iter()
                .cloned()
                .map(|regex| AttachmentPattern::new(AttachmentKind::Custom, regex)),
        );
        Self::new(root, patterns)
    }

    /// At most one attachment per pattern, taken from its first match.
    pub fn extract(&self, diagnostic: Option<&str>) -> Vec<AttachmentRef> {
        let text = match diagnostic {
            Some(text) => text,
            None => return Vec::new(),
        };
        self.patterns
            .iter()
            .filter_map(|pattern| {
                pattern.find(text).map(|found| {
                    trace!("Found {:?} reference '{}'", pattern.kind, found);
                    self.resolve(found)
                })
            })
            .collect()
    }

    fn resolve(&self, found: &str) -> AttachmentRef {
        let relative = Path::new(found.trim_start_matches('/'));
        let (name, mime) = classify(relative);
        if !stays_below_root(relative) {
            warn!(
                "Refusing attachment '{}' outside of '{}'",
                found,
                self.root.display()
            );
            return AttachmentRef::new(name, mime, None);
        }
        let path = self.root.join(relative);
        let payload = match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Cannot read attachment '{}': {}", path.display(), e);
                None
            }
        };
        AttachmentRef::new(name, mime, payload)
    }
}

/// Only plain names and `.` segments keep a joined path under the root.
fn stays_below_root(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

fn classify(path: &Path) -> (&'static str, Mime) {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if ext.eq_ignore_ascii_case(SCREENSHOT_EXT) {
        (PAGE_SCREENSHOT, mime::IMAGE_PNG)
    } else if ext.eq_ignore_ascii_case(PAGE_SOURCE_EXT) {
        (PAGE_SOURCE, mime::TEXT_HTML)
    } else {
        (ATTACHMENT, mime::TEXT_HTML)
    }
}
