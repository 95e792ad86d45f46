/*!
render module turns a [Graph](crate::models::Graph) into a graph description and hands it to an
external layout tool.
*/
use crate::error::BgpmapError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

pub mod dot;
pub mod graphviz;

pub use dot::to_dot;
pub use graphviz::Graphviz;

/// Turns a graph description on disk into an image.
pub trait Renderer {
    fn render(&self, source: &Path, format: OutputFormat, output: &Path)
        -> Result<(), BgpmapError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(
        &self,
        source: &Path,
        format: OutputFormat,
        output: &Path,
    ) -> Result<(), BgpmapError> {
        (**self).render(source, format, output)
    }
}

/// Image formats requested from the layout tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BgpmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(BgpmapError::InvalidInput(format!(
                "unsupported output format {:?}",
                other
            ))),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// File name stem for a graph title, e.g. `193.0.0.0/21` becomes `193.0.0.0_21`.
pub fn file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
