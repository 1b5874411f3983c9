//! Pandoc-backed body converter.

use crate::convert::BodyConverter;
use crate::error::{ConvertError, Result};
use crate::note::SourceDocument;
use std::io::Write;
use std::process::{Command, Stdio};

/// Runs `pandoc -f markdown -t org`, feeding the body on stdin.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: String,
    extra_args: Vec<String>,
}

impl PandocConverter {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    /// Arguments passed to pandoc, excluding the program name.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            "markdown".to_string(),
            "-t".to_string(),
            "org".to_string(),
            "--wrap=none".to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self::new("pandoc", Vec::new())
    }
}

impl BodyConverter for PandocConverter {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn convert(&self, doc: &SourceDocument) -> Result<String> {
        let failed = |message: String| ConvertError::Conversion {
            path: doc.path.clone(),
            message,
        };

        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("failed to run {}: {}", self.program, e)))?;

        // Feed stdin from its own thread so a large output can't block the write
        let stdin = child.stdin.take();
        let body = doc.body();
        let (write_result, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(body.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output =
            output.map_err(|e| failed(format!("failed to wait for {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        match write_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(failed(format!("failed to write to {}: {}", self.program, e))),
            Err(_) => return Err(failed(format!("stdin writer for {} panicked", self.program))),
        }

        String::from_utf8(output.stdout)
            .map_err(|e| failed(format!("{} produced invalid UTF-8: {}", self.program, e)))
    }
}
