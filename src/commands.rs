//! One function per `exonplot` subcommand.
//!
//! Each command returns a [`CommandOutput`] holding the number of tracks it
//! processed, and a [`Report`] listing anything the user should hear about;
//! the binary logs these as warnings.

use std::io::Write;
use std::path::PathBuf;

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
    coordinates::{transform_tracks, CoordinateMode},
    error::ExonPlotError,
    figure::{build_figure_with_padding, default_height},
    generate::{checked_count, GeneratorConfig, TrackGenerator},
    io::{read_tracks, write_tracks, OutputFile},
    reporting::{CommandOutput, Report},
    track::Track,
    traits::{GenericRange, TsvSerialize},
    Position,
};

/// Where a command gets its tracks from.
#[derive(Clone, Debug)]
pub enum TrackSource {
    /// A JSON file of tracks (optionally gzip-compressed).
    File(PathBuf),
    /// Freshly generated random tracks.
    Random {
        num: i64,
        config: GeneratorConfig,
        seed: Option<u64>,
    },
}

impl TrackSource {
    /// Read or generate the tracks.
    pub fn load(&self) -> Result<Vec<Track>, ExonPlotError> {
        match self {
            TrackSource::File(path) => read_tracks(path),
            TrackSource::Random { num, config, seed } => {
                let num = checked_count("track", *num)?;
                let tracks = match seed {
                    Some(seed) => {
                        TrackGenerator::with_rng(config.clone(), StdRng::seed_from_u64(*seed))
                            .generate(num)
                    }
                    None => TrackGenerator::new(config.clone()).generate(num),
                };
                Ok(tracks)
            }
        }
    }
}

/// Note exons without a feature in the report.
fn report_missing_features(tracks: &[Track], report: &mut Report) {
    let missing: usize = tracks
        .iter()
        .map(|t| t.features.len() - t.features.num_present())
        .sum();
    if missing > 0 {
        report.add_issue(format!(
            "{} exons have no feature marker and will be skipped when drawn",
            missing
        ))
    }
}

/// Note features drawn outside the exon they belong to.
fn report_stray_features(tracks: &[Track], report: &mut Report) {
    let stray: usize = tracks
        .iter()
        .map(|t| {
            t.features
                .x
                .iter()
                .zip(t.exons.iter())
                .filter(|(x, exon)| x.map_or(false, |x| !exon.contains(x)))
                .count()
        })
        .sum();
    if stray > 0 {
        report.add_issue(format!("{} features lie outside their exon", stray))
    }
}

/// Generate random tracks and write them as JSON.
pub fn exonplot_generate(
    source: &TrackSource,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<usize>, ExonPlotError> {
    let tracks = source.load()?;
    write_tracks(&tracks, output)?;

    let mut report = Report::new();
    report_missing_features(&tracks, &mut report);
    info!(num_tracks = tracks.len(), "wrote tracks");
    Ok(CommandOutput::new(tracks.len(), report))
}

/// Build the figure for a set of tracks and write it as JSON.
///
/// The layout height is `height` if given, otherwise [`default_height()`] for
/// the number of tracks.
pub fn exonplot_figure(
    source: &TrackSource,
    mode: CoordinateMode,
    padding: Position,
    height: Option<f64>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<usize>, ExonPlotError> {
    let tracks = source.load()?;
    let mut report = Report::new();
    report_missing_features(&tracks, &mut report);
    report_stray_features(&tracks, &mut report);

    let height = height.unwrap_or_else(|| default_height(tracks.len()));
    let figure = build_figure_with_padding(&tracks, mode, padding)?.with_height(height);

    let output_stream = output.map_or(OutputFile::new_stdout(None), |file| {
        OutputFile::new(file, None)
    });
    let mut writer = output_stream.writer()?;
    serde_json::to_writer(&mut writer, &figure)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(CommandOutput::new(tracks.len(), report))
}

/// Write every exon span as a BED-like TSV line: `track<k>`, start, end.
pub fn exonplot_exons(
    source: &TrackSource,
    mode: CoordinateMode,
    padding: Position,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<usize>, ExonPlotError> {
    let tracks = transform_tracks(&source.load()?, mode, padding)?;

    let header = vec![format!("coordinates={}", mode)];
    let output_stream = output.map_or(OutputFile::new_stdout(Some(header.clone())), |file| {
        OutputFile::new(file, Some(header))
    });
    let mut writer = output_stream.writer()?;

    let mut report = Report::new();
    let mut singletons = 0;
    for (lane, track) in tracks.iter().enumerate() {
        for exon in &track.exons {
            if exon.is_singleton() {
                singletons += 1;
            }
            writeln!(writer, "track{}\t{}", lane, exon.to_tsv())?;
        }
    }
    writer.flush()?;

    if singletons > 0 {
        report.add_issue(format!("{} exons have zero length", singletons));
    }
    Ok(CommandOutput::new(tracks.len(), report))
}
