use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use exonplot::{
    commands::{exonplot_exons, exonplot_figure, exonplot_generate, TrackSource},
    generate::GeneratorConfig,
    prelude::{CoordinateMode, ExonPlotError},
    Position, MAX_REPLICATES, NUM_EXONS, PADDING, POINTS_PER_TRACE,
};
use tracing::{info, Level};

const INFO: &str = "\
exonplot: multi-track exon diagrams in natural or genomic coordinates
usage: exonplot [--help] <subcommand>

Subcommands:

  generate: write random tracks as JSON.
  figure:   write a plot-ready figure (JSON) for random or supplied tracks.
  exons:    write exon spans as BED-like TSV.

";

#[derive(Parser)]
#[clap(name = "exonplot")]
#[clap(about = INFO)]
struct Cli {
    /// increase log verbosity (-d for info, -dd for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options for the random track generator.
#[derive(Args, Clone)]
struct GeneratorArgs {
    /// number of tracks (lanes) to generate
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    num: i64,

    /// random seed; a fresh random source is used if not specified
    #[arg(long)]
    seed: Option<u64>,

    /// number of exons per track
    #[arg(long, default_value_t = NUM_EXONS as i64, allow_negative_numbers = true)]
    num_exons: i64,

    /// number of points per trace
    #[arg(long, default_value_t = POINTS_PER_TRACE as i64, allow_negative_numbers = true)]
    points: i64,

    /// maximum number of replicate trace groups per track
    #[arg(long, default_value_t = MAX_REPLICATES as i64, allow_negative_numbers = true)]
    max_replicates: i64,

    /// probability that an exon gets no feature marker
    #[arg(long, default_value_t = 0.0)]
    omit_features: f64,
}

impl GeneratorArgs {
    fn source(&self) -> Result<TrackSource, ExonPlotError> {
        let config = GeneratorConfig::new(
            self.num_exons,
            self.points,
            self.max_replicates,
            self.omit_features,
        )?;
        Ok(TrackSource::Random {
            num: self.num,
            config,
            seed: self.seed,
        })
    }
}

/// Where tracks come from, and how they are drawn.
#[derive(Args, Clone)]
struct PlotArgs {
    /// a JSON file of tracks; random tracks are generated if not specified
    #[arg(long)]
    tracks: Option<PathBuf>,

    #[command(flatten)]
    generator: GeneratorArgs,

    /// draw in genomic coordinates (exons concatenated, introns hidden)
    #[arg(long)]
    genomic: bool,

    /// gap between consecutive exons in genomic coordinates
    #[arg(long, default_value_t = PADDING)]
    padding: Position,
}

impl PlotArgs {
    fn source(&self) -> Result<TrackSource, ExonPlotError> {
        match &self.tracks {
            Some(path) => Ok(TrackSource::File(path.clone())),
            None => self.generator.source(),
        }
    }

    fn mode(&self) -> CoordinateMode {
        CoordinateMode::from_flag(self.genomic)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write random tracks as JSON.
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a plot-ready figure as JSON.
    Figure {
        #[command(flatten)]
        plot: PlotArgs,

        /// figure height in pixels (derived from the number of tracks if not specified)
        #[arg(long)]
        height: Option<f64>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write exon spans as BED-like TSV.
    Exons {
        #[command(flatten)]
        plot: PlotArgs,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), ExonPlotError> {
    let cli = Cli::try_parse()?;
    init_logging(cli.debug);

    let result = match &cli.command {
        Some(Commands::Generate { generator, output }) => {
            exonplot_generate(&generator.source()?, output.as_ref())
        }
        Some(Commands::Figure {
            plot,
            height,
            output,
        }) => exonplot_figure(
            &plot.source()?,
            plot.mode(),
            plot.padding,
            *height,
            output.as_ref(),
        ),
        Some(Commands::Exons { plot, output }) => {
            exonplot_exons(&plot.source()?, plot.mode(), plot.padding, output.as_ref())
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    };
    let output = result?;
    output.report().log();
    info!(num_tracks = *output.value(), "done");
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(ExonPlotError::ArgumentError(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
