use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use h1b_stats::models::{Config, RankedEntry};
use h1b_stats::Analysis;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let matches = Command::new("h1b-stats")
        .version("1.0")
        .about("Ranks occupations and work states by certified H1B applications")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Delimited H1B case table")
                .required_unless_present("init-config"),
        )
        .arg(
            Arg::new("occupations")
                .value_name("OCCUPATIONS_OUT")
                .help("Where to write the top occupations report")
                .required_unless_present("init-config"),
        )
        .arg(
            Arg::new("states")
                .value_name("STATES_OUT")
                .help("Where to write the top states report")
                .required_unless_present("init-config"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .value_name("CHAR")
                .value_parser(clap::value_parser!(char))
                .help("Input field delimiter, overrides the configuration"),
        )
        .arg(
            Arg::new("employer-state-fallback")
                .long("employer-state-fallback")
                .action(ArgAction::SetTrue)
                .help("Count the employer's state when the work state is blank"),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .value_name("FILE")
                .conflicts_with("config")
                .help("Write the default configuration to FILE and exit"),
        )
        .get_matches();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    if let Some(config_file) = matches.get_one::<String>("init-config") {
        Config::default()
            .save_to_file(config_file)
            .with_context(|| format!("Failed to write configuration: {}", config_file))?;
        println!("📝 Default configuration written to: {}", config_file);
        return Ok(());
    }

    let mut config = match matches.get_one::<String>("config") {
        Some(config_file) => Config::load_from_file(config_file)
            .with_context(|| format!("Failed to load configuration: {}", config_file))?,
        None => Config::default(),
    };
    if let Some(delimiter) = matches.get_one::<char>("delimiter") {
        config.delimiter = *delimiter;
    }
    if matches.get_flag("employer-state-fallback") {
        config.employer_state_fallback = true;
    }

    let input = path_arg(&matches, "input")?;
    let occupations = path_arg(&matches, "occupations")?;
    let states = path_arg(&matches, "states")?;

    let analysis = h1b_stats::run_files(&config, input, occupations, states)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    print_summary(&analysis);
    Ok(())
}

fn path_arg<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a Path> {
    matches
        .get_one::<String>(id)
        .map(Path::new)
        .with_context(|| format!("Missing argument: {}", id))
}

fn print_summary(analysis: &Analysis) {
    println!("\n📊 SUMMARY");
    println!("==========\n");
    println!(
        "   {} rows read, {} certified cases ({} duplicates, {} not certified, {} malformed)",
        analysis.stats.rows,
        analysis.certified_total,
        analysis.stats.duplicates,
        analysis.stats.not_certified,
        analysis.stats.malformed
    );
    print_top("🏢 Top occupations", &analysis.top_occupations);
    print_top("🗺️  Top states", &analysis.top_states);
}

fn print_top(title: &str, entries: &[RankedEntry]) {
    println!("\n{}:", title);
    if entries.is_empty() {
        println!("   (no certified applications)");
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "   {}. {} - {} ({:.1}%)",
            i + 1,
            entry.label,
            entry.count,
            entry.percentage
        );
    }
}
