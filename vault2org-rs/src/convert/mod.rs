//! Body conversion from Markdown to Org.
//!
//! The markup transformation itself is delegated to an external tool. A
//! converter only turns the note body into Org text; header synthesis and
//! link rewriting happen afterwards in [`crate::pipeline`].

pub mod pandoc;
pub mod passthrough;

pub use pandoc::PandocConverter;
pub use passthrough::PassthroughConverter;

use crate::config::{Config, ConverterKind};
use crate::error::Result;
use crate::note::SourceDocument;

/// Converts a note body to Org markup.
///
/// Implementations must not wrap lines: a wikilink split across two lines
/// can no longer be rewritten.
pub trait BodyConverter: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Convert the body of `doc`, returning the Org text.
    fn convert(&self, doc: &SourceDocument) -> Result<String>;
}

/// Build the converter selected by the configuration.
pub fn converter_for(config: &Config) -> Box<dyn BodyConverter> {
    match config.converter {
        ConverterKind::Pandoc => Box::new(PandocConverter::new(
            config.pandoc.program.clone(),
            config.pandoc.extra_args.clone(),
        )),
        ConverterKind::Passthrough => Box::new(PassthroughConverter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_for_config() {
        let mut config = Config::default();
        assert_eq!(converter_for(&config).name(), "pandoc");

        config.converter = ConverterKind::Passthrough;
        assert_eq!(converter_for(&config).name(), "passthrough");
    }
}
