//! Top occupations and top work states of certified H1B visa applications.
//!
//! One forward pass over a delimited case table: resolve the header columns,
//! count each certified case number once, then rank both frequency tables and
//! write them out as `;`-separated reports.

pub mod analyzer;
pub mod error;
pub mod models;
pub mod ranking;
pub mod report;
pub mod resolver;

use analyzer::{RowStats, VisaAggregator};
use csv::ReaderBuilder;
use error::{Result, StatsError};
use models::{ColumnRoles, Config, RankedEntry, ReportKind};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Analysis {
    pub certified_total: u64,
    pub stats: RowStats,
    pub top_occupations: Vec<RankedEntry>,
    pub top_states: Vec<RankedEntry>,
}

/// Resolve columns, aggregate every data row of `input` and rank both tables.
pub fn analyze<R: Read>(config: &Config, input: R) -> Result<Analysis> {
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().map_err(StatsError::InputRead)?.clone();
    let roles = ColumnRoles::resolve(headers.iter(), config.employer_state_fallback)?;

    let mut aggregator = VisaAggregator::new(&roles);
    for record in reader.records() {
        match record {
            Ok(record) => {
                aggregator.process_record(&record);
            }
            Err(err) if err.is_io_error() => return Err(StatsError::InputRead(err)),
            Err(err) => {
                debug!(error = %err, "skipping undecodable row");
                aggregator.skip_malformed();
            }
        }
    }
    let aggregation = aggregator.finish();

    info!(
        rows = aggregation.stats.rows,
        certified = aggregation.certified_total,
        duplicates = aggregation.stats.duplicates,
        malformed = aggregation.stats.malformed,
        occupations = aggregation.occupations.len(),
        states = aggregation.states.len(),
        "aggregated input"
    );

    Ok(Analysis {
        certified_total: aggregation.certified_total,
        stats: aggregation.stats,
        top_occupations: ranking::rank_top(&aggregation.occupations, aggregation.certified_total),
        top_states: ranking::rank_top(&aggregation.states, aggregation.certified_total),
    })
}

/// Analyze `input` and write both reports to the given sinks.
pub fn run<R, O, S>(config: &Config, input: R, occupations: O, states: S) -> Result<Analysis>
where
    R: Read,
    O: Write,
    S: Write,
{
    let analysis = analyze(config, input)?;
    report::write_report(occupations, ReportKind::Occupations, &analysis.top_occupations)?;
    report::write_report(states, ReportKind::States, &analysis.top_states)?;
    Ok(analysis)
}

/// File-backed [`run`]. Nothing is written unless the whole input was analyzed,
/// and each report replaces its destination in one step.
pub fn run_files(
    config: &Config,
    input_path: &Path,
    occupations_path: &Path,
    states_path: &Path,
) -> Result<Analysis> {
    let input = File::open(input_path).map_err(|source| StatsError::InputOpen {
        path: input_path.to_path_buf(),
        source,
    })?;
    let analysis = analyze(config, input)?;

    let occupations = report::render_report(ReportKind::Occupations, &analysis.top_occupations);
    let states = report::render_report(ReportKind::States, &analysis.top_states);
    report::write_report_file(occupations_path, &occupations)?;
    report::write_report_file(states_path, &states)?;

    info!(
        occupations = %occupations_path.display(),
        states = %states_path.display(),
        "reports written"
    );
    Ok(analysis)
}
