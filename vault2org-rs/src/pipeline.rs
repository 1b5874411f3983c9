//! Per-document pipeline and the batch orchestrator.
//!
//! A batch runs in three steps:
//!
//! 1. **Plan** (parallel): read each note, parse its frontmatter and derive
//!    its output name.
//! 2. **Claim** (serial): walk the plans in path order. The first note to
//!    produce a given output name owns it; later ones fail with
//!    [`ConvertError::OutputCollision`] and are never written.
//! 3. **Render** (parallel): convert the body, assemble the Org document and
//!    write it with a single write.
//!
//! Every task's error, or panic, is captured at the task boundary and
//! recorded in the [`BatchReport`]; siblings always run to completion.

use crate::cli::output::Output;
use crate::convert::BodyConverter;
use crate::error::{ConvertError, Result};
use crate::note::{SourceDocument, TargetDocument};
use crate::types::{BatchReport, ConversionJob, ConvertedNote, FailedNote};
use crate::vault::Vault;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Settings for one batch.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory all `.org` files are written to (flat, no subdirectories).
    pub output_root: PathBuf,
    /// Add the LaTeX preview startup line.
    pub math: bool,
    /// Worker pool size.
    pub jobs: usize,
    /// Run the pipeline without writing anything.
    pub dry_run: bool,
}

impl ConvertOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            math: false,
            jobs: 1,
            dry_run: false,
        }
    }
}

/// Run the full pipeline for one note, returning the assembled document.
pub fn convert_document(
    doc: &SourceDocument,
    converter: &dyn BodyConverter,
    options: &ConvertOptions,
) -> Result<TargetDocument> {
    let converted = converter.convert(doc)?;
    Ok(TargetDocument::build(
        doc,
        &converted,
        &options.output_root,
        options.math,
    ))
}

/// Dispatches conversion jobs over a fixed-size worker pool.
pub struct Orchestrator<'a> {
    converter: &'a dyn BodyConverter,
    options: ConvertOptions,
    output: &'a Output,
}

impl<'a> Orchestrator<'a> {
    pub fn new(converter: &'a dyn BodyConverter, options: ConvertOptions, output: &'a Output) -> Self {
        Self {
            converter,
            options,
            output,
        }
    }

    /// Convert every note in `vault`.
    ///
    /// Returns `Err` only for batch-level failures (unreadable root, output
    /// root not creatable, pool construction). Per-note failures end up in
    /// [`BatchReport::failed`].
    pub fn run(&self, vault: &Vault) -> Result<BatchReport> {
        let listing = vault.list_notes()?;
        let jobs = vault.jobs(&listing);

        let mut report = BatchReport {
            dry_run: self.options.dry_run,
            ..BatchReport::default()
        };

        for (path, reason) in listing.unreadable {
            self.output.error(&format!("{}: {}", path.display(), reason));
            report.failed.push(FailedNote {
                source: path,
                kind: "file_system".to_string(),
                reason,
            });
        }

        if !self.options.dry_run {
            std::fs::create_dir_all(&self.options.output_root)
                .map_err(|e| ConvertError::fs(&self.options.output_root, e))?;
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .build()?;
        self.output.debug(&format!(
            "Converting {} notes with {} workers using {}",
            jobs.len(),
            self.options.jobs,
            self.converter.name()
        ));

        let planned: Vec<(ConversionJob, Result<SourceDocument>)> = pool.install(|| {
            jobs.into_par_iter()
                .map(|job| {
                    let result = isolate(&job.relative_path, || SourceDocument::load(&job));
                    (job, result)
                })
                .collect()
        });

        let ready = self.claim_targets(planned, &mut report);

        let rendered: Vec<(PathBuf, Result<PathBuf>)> = pool.install(|| {
            ready
                .par_iter()
                .map(|doc| {
                    let result = isolate(&doc.path, || self.render(doc));
                    (doc.path.clone(), result)
                })
                .collect()
        });

        for (source, result) in rendered {
            match result {
                Ok(target) => report.converted.push(ConvertedNote { source, target }),
                Err(e) => self.record_failure(&mut report, source, e),
            }
        }

        report.sort();
        Ok(report)
    }

    /// Give each output name to the first note (in path order) that produces it.
    fn claim_targets(
        &self,
        planned: Vec<(ConversionJob, Result<SourceDocument>)>,
        report: &mut BatchReport,
    ) -> Vec<SourceDocument> {
        let mut claims: HashMap<String, PathBuf> = HashMap::new();
        let mut ready = Vec::new();

        for (job, result) in planned {
            let doc = match result {
                Ok(doc) => doc,
                Err(e) => {
                    self.record_failure(report, job.relative_path, e);
                    continue;
                }
            };

            let name = doc.org_file_name();
            if let Some(owner) = claims.get(&name) {
                let err = ConvertError::OutputCollision {
                    path: doc.path.clone(),
                    target: self.options.output_root.join(&name),
                    claimed_by: owner.clone(),
                };
                self.record_failure(report, doc.path, err);
                continue;
            }

            claims.insert(name, doc.path.clone());
            ready.push(doc);
        }

        ready
    }

    fn render(&self, doc: &SourceDocument) -> Result<PathBuf> {
        let target = convert_document(doc, self.converter, &self.options)?;
        if !self.options.dry_run {
            target.save()?;
        }
        self.output
            .info(&format!("{} -> {}", doc.path.display(), target.path.display()));
        Ok(target.path)
    }

    fn record_failure(&self, report: &mut BatchReport, source: PathBuf, err: ConvertError) {
        self.output.error(&err.to_string());
        report.failed.push(FailedNote {
            source,
            kind: err.kind().to_string(),
            reason: err.to_string(),
        });
    }
}

/// Run a task, turning a panic into a per-document error.
fn isolate<T>(path: &Path, task: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(result) => result,
        Err(payload) => Err(ConvertError::TaskPanicked {
            path: path.to_path_buf(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::convert::PassthroughConverter;
    use std::fs;
    use tempfile::TempDir;

    /// Panics on any note whose body mentions "boom".
    struct ExplodingConverter;

    impl BodyConverter for ExplodingConverter {
        fn name(&self) -> &'static str {
            "exploding"
        }

        fn convert(&self, doc: &SourceDocument) -> Result<String> {
            if doc.body().contains("boom") {
                panic!("converter exploded");
            }
            Ok(doc.body().to_string())
        }
    }

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn note(title: &str, created: &str, body: &str) -> String {
        format!("---\ntitle: {}\ncreated: {}\n---\n{}", title, created, body)
    }

    fn run(input: &Path, output_root: &Path, converter: &dyn BodyConverter, jobs: usize) -> BatchReport {
        let output = Output::new(OutputFormat::Json, true, false);
        let options = ConvertOptions {
            jobs,
            ..ConvertOptions::new(output_root)
        };
        let vault = Vault::new(input).unwrap();
        Orchestrator::new(converter, options, &output).run(&vault).unwrap()
    }

    #[test]
    fn test_convert_document() {
        let doc = SourceDocument::parse(
            "My Note.md",
            note("My Note", "2023-05-01T10:00:00", "See [[Other Note]]."),
        )
        .unwrap();
        let target =
            convert_document(&doc, &PassthroughConverter, &ConvertOptions::new("out")).unwrap();
        assert_eq!(target.path, PathBuf::from("out/20230501100000-my_note.org"));
        assert!(target.render().contains("[[id:other-note][Other Note]]"));
    }

    #[test]
    fn test_batch_flattens_nested_notes() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(input.path(), "top.md", &note("Top", "2023-01-01", "t"));
        write(input.path(), "a/b/c/deep.md", &note("Deep", "2023-01-02", "d"));

        let report = run(input.path(), out.path(), &PassthroughConverter, 2);
        assert!(report.is_success());
        assert_eq!(report.converted.len(), 2);
        assert!(out.path().join("20230101000000-top.org").is_file());
        assert!(out.path().join("20230102000000-deep.org").is_file());
    }

    #[test]
    fn test_failures_do_not_stop_siblings() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(input.path(), "good.md", &note("Good", "2023-01-01", "ok"));
        write(input.path(), "no_created.md", "---\ntitle: Broken\n---\nbody");
        write(input.path(), "no_block.md", "just text");

        let report = run(input.path(), out.path(), &PassthroughConverter, 4);
        assert!(!report.is_success());
        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 2);

        let kinds: Vec<&str> = report.failed.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, vec!["missing_frontmatter", "missing_required_field"]);
        assert_eq!(report.failed[1].source, PathBuf::from("no_created.md"));
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_panic_is_isolated() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(input.path(), "a.md", &note("A", "2023-01-01", "fine"));
        write(input.path(), "b.md", &note("B", "2023-01-02", "boom"));
        write(input.path(), "c.md", &note("C", "2023-01-03", "fine"));

        let report = run(input.path(), out.path(), &ExplodingConverter, 3);
        assert_eq!(report.converted.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].kind, "task_panicked");
        assert!(report.failed[0].reason.contains("converter exploded"));
    }

    #[test]
    fn test_collision_first_path_wins() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(input.path(), "x/Same.md", &note("From X", "2023-05-01T10:00:00", "x body"));
        write(input.path(), "y/same.md", &note("From Y", "2023-05-01T10:00:00", "y body"));

        for _ in 0..2 {
            let report = run(input.path(), out.path(), &PassthroughConverter, 4);
            assert_eq!(report.converted.len(), 1);
            assert_eq!(report.converted[0].source, PathBuf::from("x/Same.md"));
            assert_eq!(report.failed.len(), 1);
            assert_eq!(report.failed[0].source, PathBuf::from("y/same.md"));
            assert_eq!(report.failed[0].kind, "output_collision");

            let written =
                fs::read_to_string(out.path().join("20230501100000-same.org")).unwrap();
            assert!(written.contains("#+title: From X"));
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("not-created");
        write(input.path(), "n.md", &note("N", "2023-01-01", "body"));

        let output = Output::new(OutputFormat::Json, true, false);
        let options = ConvertOptions {
            dry_run: true,
            ..ConvertOptions::new(&output_root)
        };
        let vault = Vault::new(input.path()).unwrap();
        let report = Orchestrator::new(&PassthroughConverter, options, &output)
            .run(&vault)
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.converted.len(), 1);
        assert!(!output_root.exists());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
    }
}
