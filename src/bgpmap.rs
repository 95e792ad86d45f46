//! The query pipeline: fetch looking-glass paths, build graphs, resolve names, render.
use crate::error::BgpmapError;
use crate::models::{Graph, Target};
use crate::render::{file_stem, to_dot, OutputFormat, Renderer};
use crate::resolver::{AsnLookup, NameCache};
use crate::ris::{LookingGlass, RrcSelection};
use chrono::Local;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct BgpmapConfig {
    /// Each run writes into a timestamped folder below this directory.
    pub output_dir: PathBuf,
    pub formats: Vec<OutputFormat>,
    pub selection: RrcSelection,
    /// Draw one graph per collector instead of a single combined graph.
    pub per_collector: bool,
    /// Write DOT documents only, without invoking the renderer.
    pub dot_only: bool,
}

impl Default for BgpmapConfig {
    fn default() -> Self {
        BgpmapConfig {
            output_dir: PathBuf::from("output"),
            formats: vec![OutputFormat::Png],
            selection: RrcSelection::All,
            per_collector: false,
            dot_only: false,
        }
    }
}

/// A graph ready to be drawn, with the title its files are named after.
#[derive(Debug, Clone, Serialize)]
pub struct NamedGraph {
    pub title: String,
    pub graph: Graph,
}

/// Files produced for one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGraph {
    pub dot: PathBuf,
    pub images: Vec<PathBuf>,
}

pub struct Bgpmap<G, L, R> {
    looking_glass: G,
    names: NameCache<L>,
    renderer: R,
    config: BgpmapConfig,
}

impl<G, L, R> Bgpmap<G, L, R>
where
    G: LookingGlass,
    L: AsnLookup,
    R: Renderer,
{
    pub fn new(looking_glass: G, lookup: L, renderer: R, config: BgpmapConfig) -> Self {
        Bgpmap {
            looking_glass,
            names: NameCache::new(lookup),
            renderer,
            config,
        }
    }

    /// Fetch paths for `target` and build the graphs to draw, names resolved.
    pub fn build_graphs(&mut self, target: &Target) -> Result<Vec<NamedGraph>, BgpmapError> {
        let result = self.looking_glass.query(target)?;
        let collectors = self.config.selection.apply(result.collectors);
        let paths: usize = collectors.iter().map(|c| c.paths.len()).sum();
        info!(
            "{}: {} paths from {} collectors",
            result.resource,
            paths,
            collectors.len()
        );

        let mut graphs = match self.config.per_collector {
            true => collectors
                .iter()
                .map(|c| NamedGraph {
                    title: c.to_string(),
                    graph: Graph::from_collectors(result.resource.clone(), [c]),
                })
                .collect::<Vec<_>>(),
            false => vec![NamedGraph {
                title: result.resource.clone(),
                graph: Graph::from_collectors(result.resource.clone(), &collectors),
            }],
        };

        for named in &mut graphs {
            self.names.annotate(&mut named.graph);
        }
        Ok(graphs)
    }

    /// Run the whole pipeline for `target`, returning the files written per graph.
    pub fn run(&mut self, target: &Target) -> Result<Vec<RenderedGraph>, BgpmapError> {
        let graphs = self.build_graphs(target)?;

        let folder = self
            .config
            .output_dir
            .join(Local::now().format("%Y-%m-%d %H%M%S").to_string());
        fs::create_dir_all(&folder)?;

        let mut rendered = Vec::with_capacity(graphs.len());
        for named in &graphs {
            info!("now processing: {}", named.title);
            rendered.push(self.render_graph(&folder, named)?);
        }
        Ok(rendered)
    }

    /// Validate `input` and run the pipeline. Malformed input fails before any query is made.
    pub fn run_input(&mut self, input: &str) -> Result<Vec<RenderedGraph>, BgpmapError> {
        let target = Target::from_str(input)?;
        self.run(&target)
    }

    fn render_graph(
        &self,
        folder: &Path,
        named: &NamedGraph,
    ) -> Result<RenderedGraph, BgpmapError> {
        let stem = file_stem(&named.title);
        let dot = folder.join(format!("{}.dot", stem));
        fs::write(&dot, to_dot(&named.graph))?;

        let mut images = vec![];
        if self.config.dot_only {
            return Ok(RenderedGraph { dot, images });
        }

        for format in &self.config.formats {
            let image = folder.join(format!("{}.{}", stem, format.extension()));
            match self.renderer.render(&dot, *format, &image) {
                Ok(()) => images.push(image),
                Err(BgpmapError::Render(reason)) => {
                    warn!("graph description kept at {}", dot.display());
                    return Err(BgpmapError::Render(format!(
                        "{} (graph description kept at {})",
                        reason,
                        dot.display()
                    )));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(RenderedGraph { dot, images })
    }
}
