//! Identity converter.

use crate::convert::BodyConverter;
use crate::error::Result;
use crate::note::SourceDocument;

/// Returns the body unchanged. Used for dry runs, tests and vaults whose
/// bodies need no markup conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughConverter;

impl BodyConverter for PassthroughConverter {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn convert(&self, doc: &SourceDocument) -> Result<String> {
        Ok(doc.body().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_returns_body() {
        let doc = SourceDocument::parse(
            Path::new("n.md"),
            "---\ntitle: T\ncreated: 2023-05-01\n---\nSee [[Other]].\n".to_string(),
        )
        .unwrap();
        let out = PassthroughConverter.convert(&doc).unwrap();
        assert_eq!(out, "See [[Other]].\n");
    }
}
