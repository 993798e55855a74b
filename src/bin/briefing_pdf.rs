//! Render a briefing certificate from an incident JSON file.
//!
//! Usage:
//!   briefing-pdf <incident.json> [-o <output.pdf>] [--compress]
//!
//! Header text is taken from BRIEFING_ORG_NAME / BRIEFING_ORG_SUBTITLE.
//! Set RUST_LOG=debug for layout diagnostics.

use std::path::PathBuf;
use std::process::ExitCode;

use briefing_pdf::{attachment_filename, generate_with_report, BriefingConfig, IncidentDetail};

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    compress: bool,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut compress = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-o" | "--output" => {
                    i += 1;
                    match args.get(i) {
                        Some(path) => output = Some(PathBuf::from(path)),
                        None => return Err("missing value for --output".to_string()),
                    }
                },
                "--compress" => compress = true,
                "-h" | "--help" => return Err(String::new()),
                arg if arg.starts_with('-') => return Err(format!("unknown option: {}", arg)),
                arg => {
                    if input.is_some() {
                        return Err(format!("unexpected argument: {}", arg));
                    }
                    input = Some(PathBuf::from(arg));
                },
            }
            i += 1;
        }

        let input = input.ok_or_else(|| "missing input file".to_string())?;
        Ok(Self {
            input,
            output,
            compress,
        })
    }
}

fn print_usage() {
    eprintln!("Usage: briefing-pdf <incident.json> [-o <output.pdf>] [--compress]");
}

fn run(args: CliArgs) -> briefing_pdf::Result<PathBuf> {
    let json = std::fs::read(&args.input)?;
    let incident = IncidentDetail::from_json_slice(&json)?;

    let mut config = BriefingConfig::from_env()?;
    if args.compress {
        config = config.with_compress(true);
    }

    let (bytes, report) = generate_with_report(&incident, &config)?;
    log::info!(
        "Rendered {} topics and {} participant rows ({} signatures skipped)",
        report.topics_drawn,
        report.rows_drawn,
        report.signatures_skipped
    );

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(attachment_filename(&incident.id)));
    std::fs::write(&output, &bytes)?;
    Ok(output)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("Error: {}", msg);
            }
            print_usage();
            return ExitCode::from(2);
        },
    };

    match run(args) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
