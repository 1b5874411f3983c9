//! Parsers for Obsidian markdown syntax.

pub mod frontmatter;
pub mod wikilink;

pub use frontmatter::{extract_frontmatter, parse_frontmatter, split_frontmatter};
pub use wikilink::{parse_links, rewrite_links};
