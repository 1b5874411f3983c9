//! Org-roam file naming.

use crate::types::Frontmatter;
use std::path::Path;

/// Extension of every generated file.
pub const TARGET_EXTENSION: &str = "org";

/// Timestamp prefix format used by Org-roam file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Derive the output file name for a note.
///
/// `<created:YYYYMMDDHHMMSS>-<stem lowercased, spaces as underscores>.org`.
/// Two notes with the same `created` instant and stem get the same name;
/// the orchestrator detects that before anything is written.
pub fn org_file_name(frontmatter: &Frontmatter, source_file_name: &str) -> String {
    let stem = Path::new(source_file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_file_name);

    format!(
        "{}-{}.{}",
        frontmatter.created.format(TIMESTAMP_FORMAT),
        stem.replace(' ', "_").to_lowercase(),
        TARGET_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fm(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Frontmatter {
        Frontmatter {
            title: "irrelevant".to_string(),
            created: NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap(),
            aliases: None,
            tags: None,
        }
    }

    #[test]
    fn test_basic_name() {
        let name = org_file_name(&fm(2023, 5, 1, 10, 0, 0), "My Note.md");
        assert_eq!(name, "20230501100000-my_note.org");
    }

    #[test]
    fn test_zero_padded_timestamp() {
        let name = org_file_name(&fm(2021, 1, 2, 3, 4, 5), "a.md");
        assert_eq!(name, "20210102030405-a.org");
    }

    #[test]
    fn test_markdown_extension_removed() {
        let name = org_file_name(&fm(2023, 5, 1, 10, 0, 0), "Long Form.MARKDOWN");
        assert_eq!(name, "20230501100000-long_form.org");
    }

    #[test]
    fn test_inner_dots_kept() {
        let name = org_file_name(&fm(2023, 5, 1, 10, 0, 0), "v1.2 Release.md");
        assert_eq!(name, "20230501100000-v1.2_release.org");
    }

    #[test]
    fn test_deterministic() {
        let frontmatter = fm(2023, 5, 1, 10, 0, 0);
        assert_eq!(
            org_file_name(&frontmatter, "Same Name.md"),
            org_file_name(&frontmatter, "Same Name.md")
        );
    }
}
