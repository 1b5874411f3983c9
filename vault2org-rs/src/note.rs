//! Source notes and generated Org documents.

use crate::error::{ConvertError, Result};
use crate::org::{org_file_name, strip_property_blocks, OrgHeader};
use crate::parser::{parse_frontmatter, rewrite_links, split_frontmatter};
use crate::types::{ConversionJob, Frontmatter};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A parsed Markdown note.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path relative to the vault root (e.g., "proj/My Project.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub raw_text: String,

    /// Validated frontmatter.
    pub frontmatter: Frontmatter,

    body_start: usize,
}

impl SourceDocument {
    /// Parse a note from its raw text.
    pub fn parse(path: impl Into<PathBuf>, raw_text: String) -> Result<Self> {
        let path = path.into();
        let frontmatter = parse_frontmatter(&raw_text, &path)?;
        let body_start = raw_text.len() - split_frontmatter(&raw_text).content.len();

        Ok(Self {
            path,
            raw_text,
            frontmatter,
            body_start,
        })
    }

    /// Read and parse the note for a job.
    pub fn load(job: &ConversionJob) -> Result<Self> {
        let raw_text = std::fs::read_to_string(&job.source_path)
            .map_err(|e| ConvertError::fs(&job.relative_path, e))?;
        Self::parse(&job.relative_path, raw_text)
    }

    /// Content after the frontmatter block.
    pub fn body(&self) -> &str {
        &self.raw_text[self.body_start..]
    }

    /// The note's file name (e.g., "My Project.md").
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }

    /// Output file name this note converts to.
    pub fn org_file_name(&self) -> String {
        org_file_name(&self.frontmatter, &self.file_name())
    }
}

/// A fully assembled Org-roam file, built in memory and written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDocument {
    /// Output location, always a direct child of the output root.
    pub path: PathBuf,
    pub header: OrgHeader,
    /// Converted body with property drawers stripped and links rewritten.
    pub body: String,
}

impl TargetDocument {
    /// Assemble the output for `source` from its converted body.
    ///
    /// Property drawers left by the converter are stripped before the
    /// canonical header is added, then wikilinks are rewritten.
    pub fn build(source: &SourceDocument, converted_body: &str, output_root: &Path, math: bool) -> Self {
        let stripped = strip_property_blocks(converted_body);
        let body = rewrite_links(stripped.trim());

        Self {
            path: output_root.join(source.org_file_name()),
            header: OrgHeader::from_frontmatter(&source.frontmatter, math),
            body,
        }
    }

    /// Full file content.
    pub fn render(&self) -> String {
        let mut content = self.header.render();
        if !self.body.is_empty() {
            content.push_str(&self.body);
            content.push('\n');
        }
        content
    }

    /// Write the document to disk.
    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, self.render()).map_err(|e| ConvertError::fs(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const NOTE: &str = "---\ntitle: My Note\ncreated: 2023-05-01T10:00:00\n---\nSee [[Other Note]].\n";

    #[test]
    fn test_parse_and_body() {
        let doc = SourceDocument::parse("My Note.md", NOTE.to_string()).unwrap();
        assert_eq!(doc.frontmatter.title, "My Note");
        assert_eq!(doc.body(), "See [[Other Note]].\n");
        assert_eq!(doc.org_file_name(), "20230501100000-my_note.org");
    }

    #[test]
    fn test_file_name_ignores_folders() {
        let doc = SourceDocument::parse("deep/dir/My Note.md", NOTE.to_string()).unwrap();
        assert_eq!(doc.file_name(), "My Note.md");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_keeps_its_stem() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("dir").join(OsStr::from_bytes(b"caf\xe9 note.md"));
        let doc = SourceDocument::parse(path, NOTE.to_string()).unwrap();

        assert_eq!(doc.file_name(), "caf\u{fffd} note.md");
        assert_eq!(doc.org_file_name(), "20230501100000-caf\u{fffd}_note.org");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let job = ConversionJob::new(dir.path(), "gone.md");
        let err = SourceDocument::load(&job).unwrap_err();
        assert!(matches!(err, ConvertError::FileSystem { .. }));
    }

    #[test]
    fn test_build_and_render() {
        let doc = SourceDocument::parse("My Note.md", NOTE.to_string()).unwrap();
        let target = TargetDocument::build(&doc, doc.body(), Path::new("/out"), false);

        assert_eq!(target.path, PathBuf::from("/out/20230501100000-my_note.org"));
        assert_eq!(
            target.render(),
            ":PROPERTIES:\n\
             :ID:    my-note\n\
             :ROAM_ALIASES: \n\
             :END:\n\
             #+title: My Note\n\
             See [[id:other-note][Other Note]].\n"
        );
    }

    #[test]
    fn test_converter_drawers_stripped_before_header() {
        let doc = SourceDocument::parse("My Note.md", NOTE.to_string()).unwrap();
        let converted = "\n* Heading\n:PROPERTIES:\n:CUSTOM_ID: heading\n:END:\nText\n\n";
        let target = TargetDocument::build(&doc, converted, Path::new("out"), true);
        let rendered = target.render();

        assert_eq!(rendered.matches(":PROPERTIES:").count(), 1);
        assert!(!rendered.contains("CUSTOM_ID"));
        assert!(rendered.starts_with(":PROPERTIES:\n:ID:    my-note\n"));
        assert!(rendered.contains(":END:\n#+STARTUP: latexpreview\n#+title: My Note\n* Heading\n"));
        assert!(rendered.ends_with("Text\n"));
    }

    #[test]
    fn test_empty_body() {
        let doc = SourceDocument::parse(
            "Empty.md",
            "---\ntitle: Empty\ncreated: 2023-05-01\n---\n".to_string(),
        )
        .unwrap();
        let target = TargetDocument::build(&doc, "  \n", Path::new("out"), false);
        assert!(target.render().ends_with("#+title: Empty\n"));
    }

    #[test]
    fn test_save() {
        let dir = TempDir::new().unwrap();
        let doc = SourceDocument::parse("My Note.md", NOTE.to_string()).unwrap();
        let target = TargetDocument::build(&doc, doc.body(), dir.path(), false);
        target.save().unwrap();

        let written = std::fs::read_to_string(dir.path().join("20230501100000-my_note.org")).unwrap();
        assert_eq!(written, target.render());
    }
}
