//! Command-line interface components.
//!
//! Thin I/O wrapper around the decoder: read an ATCF file (or stdin),
//! decode it, and write the JSON rendering to stdout or a file.

use clap::Parser;
use colored::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AtcfConfig;
use crate::error::{AtcfError, Result};
use crate::models::{AtcfFile, ParseStats};

/// Input path meaning standard input
const STDIN_PATH: &str = "-";

#[derive(Parser, Debug, Clone)]
#[command(name = "atcf-processor")]
#[command(about = "Decode ATCF tropical cyclone track files into structured JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the ATCF track file, or `-` to read standard input
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write JSON to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write compact single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Emit only the file-level lineage rollup
    #[arg(long)]
    pub rollup_only: bool,

    /// Print a parse summary to stderr
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Tracing level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the processing configuration from the flags
    pub fn to_config(&self) -> AtcfConfig {
        let mut config = AtcfConfig::default().with_log_level(self.get_log_level());
        if self.compact {
            config = config.with_compact_output();
        }
        if self.rollup_only {
            config = config.with_rollup_only();
        }
        if self.quiet {
            config = config.with_compact_logs();
        }
        if let Some(path) = &self.output {
            config = config.with_output_path(path);
        }
        config
    }
}

/// Default filter directive when RUST_LOG is not set
pub fn default_log_directive(config: &AtcfConfig) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), config.log_level)
}

/// Install the tracing subscriber described by `config`, writing to stderr
pub fn setup_logging(config: &AtcfConfig) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(config)));

    // Exactly one of the two layers is present
    let compact_layer = config.compact_logs.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
    });
    let timed_layer = (!config.compact_logs).then(|| {
        fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact_layer)
        .with(timed_layer)
        .init();

    debug!("Logging initialized at level: {}", config.log_level);
}

/// Decode the input named by `args` and write its JSON rendering
pub fn run(args: &Args) -> Result<ParseStats> {
    let config = args.to_config();
    config.validate()?;

    let text = read_input(&args.input)?;
    let file = AtcfFile::parse(&text);
    let stats = file.stats();

    let json = render(&file, &config)?;
    write_output(&json, &config)?;

    if args.summary {
        print_summary(&file, &stats);
    }

    Ok(stats)
}

/// Read the whole input as UTF-8 text
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = if path.as_os_str() == STDIN_PATH {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .map_err(|e| AtcfError::io(path, e))?;
        buffer
    } else {
        fs::read(path).map_err(|e| AtcfError::io(path, e))?
    };

    debug!("Read {} bytes from {}", bytes.len(), path.display());

    String::from_utf8(bytes).map_err(|_| AtcfError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}

/// Serialize the decoded file, or only its rollup, as JSON
pub fn render(file: &AtcfFile, config: &AtcfConfig) -> Result<String> {
    let json = match (config.rollup_only, config.pretty) {
        (true, true) => serde_json::to_string_pretty(&file.rollup())?,
        (true, false) => serde_json::to_string(&file.rollup())?,
        (false, true) => serde_json::to_string_pretty(file)?,
        (false, false) => serde_json::to_string(file)?,
    };
    Ok(json)
}

/// Write JSON to the configured file, or stdout
pub fn write_output(json: &str, config: &AtcfConfig) -> Result<()> {
    match &config.output_path {
        Some(path) => {
            fs::write(path, format!("{}\n", json)).map_err(|e| AtcfError::io(path, e))?;
            info!("Wrote {} bytes to {}", json.len() + 1, path.display());
        }
        None => {
            let stdout = PathBuf::from("<stdout>");
            let mut handle = io::stdout().lock();
            writeln!(handle, "{}", json).map_err(|e| AtcfError::io(&stdout, e))?;
            handle.flush().map_err(|e| AtcfError::io(&stdout, e))?;
        }
    }
    Ok(())
}

/// Print a colored parse summary to stderr
fn print_summary(file: &AtcfFile, stats: &ParseStats) {
    eprintln!("{}", "ATCF parse summary".bright_green().bold());
    eprintln!(
        "  {} {}",
        "Records:".bright_white(),
        stats.total_records.to_string().bright_yellow()
    );
    eprintln!(
        "  {} {} ({:.1}%)",
        "With timestamp:".bright_white(),
        stats.records_with_timestamp,
        stats.timestamp_rate()
    );
    eprintln!(
        "  {} {}",
        "Best-track fixes:".bright_white(),
        file.best_track().count()
    );
    eprintln!(
        "  {} {}",
        "Techniques:".bright_white(),
        file.techniques().join(", ").bright_cyan()
    );

    let rollup = file.rollup();
    if let Some(gen_no) = rollup.gen_no {
        eprintln!("  {} {}", "Genesis number:".bright_white(), gen_no);
    }
    for (label, transition) in [
        ("Invest:", rollup.invest),
        ("Transitioned:", rollup.transitioned),
        ("Dissipated:", rollup.dissipated),
    ] {
        if let Some(transition) = transition {
            eprintln!("  {} {}", label.bright_white(), transition.to_string().bright_cyan());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["atcf-processor", "bwp012015.dat", "-o", "out.json", "--compact"]);
        assert_eq!(args.input, PathBuf::from("bwp012015.dat"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.compact);
        assert!(!args.rollup_only);
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["atcf-processor", "in.dat", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_config() {
        let args = Args::parse_from(["atcf-processor", "in.dat", "--rollup-only", "-v"]);
        let config = args.to_config();
        assert!(config.rollup_only);
        assert!(config.pretty);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_quiet_selects_compact_logs() {
        let config = Args::parse_from(["atcf-processor", "in.dat", "-q"]).to_config();
        assert!(config.compact_logs);
        assert_eq!(default_log_directive(&config), "atcf_processor=warn");

        let config = Args::parse_from(["atcf-processor", "in.dat"]).to_config();
        assert!(!config.compact_logs);
        assert_eq!(default_log_directive(&config), "atcf_processor=info");
    }

    #[test]
    fn test_render_rollup_only() {
        let file = AtcfFile::parse("WP, 01, 2015010100, , BEST");
        let config = AtcfConfig::default().with_compact_output().with_rollup_only();
        let json = render(&file, &config).unwrap();
        assert_eq!(
            json,
            r#"{"genNo":null,"invest":null,"trans":null,"diss":null}"#
        );
    }

    #[test]
    fn test_render_full_file() {
        let file = AtcfFile::parse("WP, 01, 2015010100, , BEST");
        let config = AtcfConfig::default().with_compact_output();
        let value: serde_json::Value = serde_json::from_str(&render(&file, &config).unwrap()).unwrap();
        assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["data"][0]["date"], "2015-01-01T00:00:00Z");
        assert!(value["genNo"].is_null());
    }
}
