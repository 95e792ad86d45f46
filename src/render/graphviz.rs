use crate::error::BgpmapError;
use crate::render::{OutputFormat, Renderer};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Renders DOT documents with the Graphviz `dot` executable.
pub struct Graphviz {
    program: PathBuf,
}

impl Default for Graphviz {
    fn default() -> Self {
        Graphviz {
            program: PathBuf::from("dot"),
        }
    }
}

impl Graphviz {
    pub fn new() -> Self {
        Graphviz::default()
    }

    /// Use another layout program accepting `dot`'s command line, e.g. `neato`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Graphviz {
            program: program.into(),
        }
    }
}

impl Renderer for Graphviz {
    fn render(
        &self,
        source: &Path,
        format: OutputFormat,
        output: &Path,
    ) -> Result<(), BgpmapError> {
        let program = which::which(&self.program).map_err(|e| {
            BgpmapError::Render(format!(
                "{} not found, is graphviz installed? ({})",
                self.program.display(),
                e
            ))
        })?;

        debug!(
            "running {} -T{} -o {} {}",
            program.display(),
            format,
            output.display(),
            source.display()
        );
        let result = Command::new(&program)
            .arg(format!("-T{}", format))
            .arg("-o")
            .arg(output)
            .arg(source)
            .output()
            .map_err(|e| {
                BgpmapError::Render(format!("unable to run {}: {}", program.display(), e))
            })?;

        if !result.status.success() {
            return Err(BgpmapError::Render(format!(
                "{} exited with {}: {}",
                program.display(),
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }
        Ok(())
    }
}
