//! # Gravity Dam Design CLI
//!
//! Analyzes the designs in a `.dam` file, or prompts for a single design when
//! no file is given, and prints a text report (or JSON with `--json`).
//!
//! Usage:
//!   dam_cli [FILE] [--json] [--save FILE]
//!
//! Exit status is 0 when every design is accepted, 2 when at least one design
//! fails a stability criterion and 1 on input or file errors. Set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) for calculation traces.

mod errors;
mod file_io;
mod project;
mod prompt;
mod report;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use dam_core::hydraulics::Freeboard;
use dam_core::AnalysisReport;
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{CliError, CliResult};
use crate::file_io::{load_project_with_lock_check, save_project, FileLock};
use crate::project::DamProject;
use crate::prompt::Prompter;
use crate::report::{render_report, status_icon};

const EXIT_ERROR: i32 = 1;
const EXIT_NOT_ACCEPTED: i32 = 2;

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    input: Option<PathBuf>,
    json: bool,
    save: Option<PathBuf>,
    help: bool,
}

/// One analyzed design in `--json` output.
#[derive(Serialize)]
struct DesignOutput<'a> {
    id: &'a Uuid,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    freeboard: Option<Freeboard>,
    report: AnalysisReport,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            report_error(&e);
            print_usage();
            process::exit(EXIT_ERROR);
        }
    };

    if options.help {
        print_usage();
        return;
    }

    match run(&options) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_NOT_ACCEPTED),
        Err(e) => {
            report_error(&e);
            process::exit(EXIT_ERROR);
        }
    }
}

fn parse_args(args: &[String]) -> CliResult<CliOptions> {
    let mut options = CliOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--save" => {
                i += 1;
                let path = args
                    .get(i)
                    .filter(|a| !a.starts_with('-'))
                    .ok_or_else(|| CliError::invalid_argument("--save", "expects a file path"))?;
                options.save = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => {
                return Err(CliError::invalid_argument(other, "unknown option"));
            }
            other => {
                if options.input.is_some() {
                    return Err(CliError::invalid_argument(other, "only one design file may be given"));
                }
                options.input = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Analyze every design; returns whether all of them are accepted.
fn run(options: &CliOptions) -> CliResult<bool> {
    let mut project = match &options.input {
        Some(path) => {
            let (project, lock) = load_project_with_lock_check(path)?;
            if let Some(lock) = lock {
                warn!(
                    "{} is being edited by {} since {}",
                    path.display(),
                    lock.user_id,
                    lock.locked_at.to_rfc3339()
                );
            }
            project
        }
        None => prompt_project(options.json)?,
    };

    if project.design_count() == 0 {
        warn!("no designs to analyze");
    }

    let mut all_accepted = true;
    let mut outputs = Vec::new();
    for (id, design) in project.designs_by_label() {
        let report = design.analyze()?;
        let freeboard = design.freeboard().transpose()?;

        for check in report.failed_checks() {
            warn!(
                "{}: {} failed for {} (computed {:.3}, limit {:.3})",
                design.label, check.criterion, check.case, check.computed, check.threshold
            );
        }
        all_accepted &= report.overall_pass;

        if options.json {
            outputs.push(DesignOutput {
                id,
                label: &design.label,
                freeboard,
                report,
            });
        } else {
            println!("{}", render_report(&design.label, &report, freeboard.as_ref()));
        }
    }

    if options.json {
        let json = serde_json::to_string_pretty(&outputs).map_err(|e| CliError::serialization(e.to_string()))?;
        println!("{}", json);
    }

    if let Some(path) = &options.save {
        let lock = FileLock::acquire(path, lock_user())?;
        project.touch();
        save_project(&project, path)?;
        info!(
            "{} saved to {} as {}",
            status_icon(true),
            path.display(),
            lock.info.user_id
        );
    }

    Ok(all_accepted)
}

/// Prompt for one design. Prompts go to stderr in JSON mode so stdout stays
/// machine-readable.
fn prompt_project(json: bool) -> CliResult<DamProject> {
    let output: Box<dyn Write> = if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), output);

    prompter.note("Gravity Dam Stability Analysis");
    prompter.note("==============================");
    prompter.note("Press Enter to accept the value in brackets.");
    prompter.note("");

    let design = prompter.prompt_design()?;
    prompter.note("");

    let mut project = DamProject::default();
    project.add_design(design);
    Ok(project)
}

fn lock_user() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "dam_cli".to_string())
}

fn report_error(e: &CliError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if e.is_recoverable() {
        eprintln!("The file may be free again shortly; retry once the other user is done.");
    }
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn print_usage() {
    eprintln!("Usage: dam_cli [FILE] [--json] [--save FILE]");
    eprintln!();
    eprintln!("  FILE          .dam design file; every design in it is analyzed");
    eprintln!("                (without FILE the parameters are prompted for)");
    eprintln!("  --json        print the analysis as JSON");
    eprintln!("  --save FILE   write the designs to a .dam file");
    eprintln!("  -h, --help    show this message");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_prompts() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn test_file_and_flags() {
        let options = parse_args(&args(&["dams.dam", "--json", "--save", "out.dam"])).unwrap();
        assert_eq!(options.input, Some(PathBuf::from("dams.dam")));
        assert!(options.json);
        assert_eq!(options.save, Some(PathBuf::from("out.dam")));
        assert!(!options.help);
    }

    #[test]
    fn test_help_flag() {
        assert!(parse_args(&args(&["-h"])).unwrap().help);
        assert!(parse_args(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_save_requires_path() {
        let err = parse_args(&args(&["--save"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert!(parse_args(&args(&["--save", "--json"])).is_err());
    }

    #[test]
    fn test_rejects_unknown_option_and_second_file() {
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["a.dam", "b.dam"])).is_err());
    }
}
