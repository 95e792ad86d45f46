use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use log::{error, warn};
use ris_bgpmap::models::Target;
use ris_bgpmap::render::{Graphviz, OutputFormat};
use ris_bgpmap::resolver::cymru::DEFAULT_DNS_TIMEOUT;
use ris_bgpmap::resolver::{AsnLookup, CymruResolver, NoLookup};
use ris_bgpmap::ris::{LookingGlass, RipeStatClient, RrcSelection, SavedResponse};
use ris_bgpmap::{Bgpmap, BgpmapConfig, BgpmapError};

/// ris-bgpmap creates routing graphs with data from RIPE NCC's RIS looking glass.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// IP prefix or address, will not search for the nearest announced object.
    #[clap(name = "ADDRESS_OR_PREFIX")]
    address_prefix: String,

    /// ID(s) of the collectors to graph, comma separated; all if none specified
    #[clap(long, default_value = "")]
    rrc: String,

    /// Base directory for output, each run writes into a timestamped folder
    #[clap(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Image formats to render, comma separated (png, svg, pdf)
    #[clap(short, long, default_value = "png")]
    format: String,

    /// Draw one graph per collector instead of one combined graph
    #[clap(long)]
    per_collector: bool,

    /// Skip AS name lookups
    #[clap(long)]
    no_resolve: bool,

    /// Only write graphviz DOT files, do not render images
    #[clap(long)]
    dot_only: bool,

    /// Read a saved looking glass response (JSON, optionally gzip compressed) instead of querying RIPEstat
    #[clap(long)]
    from_file: Option<String>,

    /// HTTP timeout in seconds
    #[clap(long, default_value_t = 30)]
    timeout: u64,

    /// Print the graphs as JSON instead of rendering them
    #[clap(long)]
    json: bool,
}

fn parse_formats(formats: &str) -> Result<Vec<OutputFormat>, BgpmapError> {
    formats
        .split(',')
        .filter(|f| !f.trim().is_empty())
        .map(OutputFormat::from_str)
        .collect()
}

fn run(opts: Opts) -> Result<(), BgpmapError> {
    // validate everything before the first request goes out
    let target = Target::from_str(&opts.address_prefix)?;
    let formats = parse_formats(&opts.format)?;

    let looking_glass: Box<dyn LookingGlass> = match &opts.from_file {
        Some(path) => Box::new(SavedResponse::new(path)),
        None => Box::new(RipeStatClient::new(Duration::from_secs(opts.timeout))?),
    };

    let lookup: Box<dyn AsnLookup> = match opts.no_resolve {
        true => Box::new(NoLookup),
        false => match CymruResolver::new(DEFAULT_DNS_TIMEOUT) {
            Ok(resolver) => Box::new(resolver),
            Err(e) => {
                warn!("AS name resolution unavailable: {}", e);
                Box::new(NoLookup)
            }
        },
    };

    let config = BgpmapConfig {
        output_dir: opts.output_dir,
        formats,
        selection: RrcSelection::from_str(&opts.rrc).unwrap_or_default(),
        per_collector: opts.per_collector,
        dot_only: opts.dot_only,
    };
    let mut bgpmap = Bgpmap::new(looking_glass, lookup, Graphviz::new(), config);

    if opts.json {
        let graphs = bgpmap.build_graphs(&target)?;
        println!("{}", serde_json::to_string_pretty(&graphs)?);
        return Ok(());
    }

    for rendered in bgpmap.run(&target)? {
        match rendered.images.is_empty() {
            true => println!("{}", rendered.dot.display()),
            false => rendered
                .images
                .iter()
                .for_each(|image| println!("{}", image.display())),
        }
    }
    Ok(())
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(opts) {
        error!("{}", e);
        std::process::exit(1);
    }
}
