#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the admission report toolchain.
//!
//! Runs the two passes either separately or back to back:
//!
//! 1. `extract`: PDF → plain-text dump (`extracted_content.txt`)
//! 2. `report`: dump → ranked markdown table (`sorted_universities.md`)
//!
//! With no subcommand both passes run with the default file names. A failed
//! pass is logged and reported on stdout but does not change the exit
//! status.

mod passes;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const DEFAULT_PDF: &str = "Undergraduate_Admission_Statistics.pdf";
const DEFAULT_DUMP: &str = "extracted_content.txt";
const DEFAULT_REPORT: &str = "sorted_universities.md";

#[derive(Parser)]
#[command(
    name = "admission_rank",
    about = "Admission report extraction and ranking tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract page text from the admission PDF into a text dump
    Extract {
        /// PDF report to read
        #[arg(long, default_value = DEFAULT_PDF)]
        input: PathBuf,
        /// Where to write the text dump
        #[arg(long, default_value = DEFAULT_DUMP)]
        output: PathBuf,
    },
    /// Parse a text dump and write the ranked markdown report
    Report {
        /// Text dump written by `extract`
        #[arg(long, default_value = DEFAULT_DUMP)]
        input: PathBuf,
        /// Where to write the markdown report
        #[arg(long, default_value = DEFAULT_REPORT)]
        output: PathBuf,
        /// TOML rule table to use instead of the built-in Guangdong 2025 rules
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Extract the PDF, then write the report from the fresh dump
    Run {
        /// PDF report to read
        #[arg(long, default_value = DEFAULT_PDF)]
        pdf: PathBuf,
        /// Intermediate text dump
        #[arg(long, default_value = DEFAULT_DUMP)]
        dump: PathBuf,
        /// Where to write the markdown report
        #[arg(long, default_value = DEFAULT_REPORT)]
        report: PathBuf,
        /// TOML rule table to use instead of the built-in Guangdong 2025 rules
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run {
            pdf: PathBuf::from(DEFAULT_PDF),
            dump: PathBuf::from(DEFAULT_DUMP),
            report: PathBuf::from(DEFAULT_REPORT),
            rules: None,
        }
    }
}

fn init_logger() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .try_init()
        .ok(); // Ignore error if logger was already set
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Extract { input, output } => passes::extract(&input, &output),
        Commands::Report {
            input,
            output,
            rules,
        } => passes::report(&input, &output, rules.as_deref()),
        Commands::Run {
            pdf,
            dump,
            report,
            rules,
        } => {
            passes::extract(&pdf, &dump);
            println!();
            passes::report(&dump, &report, rules.as_deref());
        }
    }
}
