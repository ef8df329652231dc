//! hgl - Test HGL transcription specs and measure rule coverage
//!
//! `hgl test` runs the examples declared in spec files and optionally reports
//! which rules fired. `hgl dev` transcribes words with one spec, showing the
//! full rule trace on request.

use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use facet::Facet;
use hgl::config::{HarnessConfig, load_config};
use hgl::words::WordStream;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  hgl test <file.hgl>... [--cover] [--coverprofile <path>] [-c <config>]
  hgl dev <file.hgl> [word]... [-v] [-c <config>]
  hgl version";

/// Arguments of `hgl test`
#[derive(Debug, Facet)]
struct TestArgs {
    /// Spec files to test
    #[facet(positional, default)]
    files: Vec<String>,

    /// Enable coverage analysis
    #[facet(named, default)]
    cover: bool,

    /// Write a coverage profile to this file (implies --cover)
    #[facet(named, default)]
    coverprofile: Option<String>,

    /// Path to config file (default: .config/hgl/config.yaml)
    #[facet(named, short = 'c', default)]
    config: Option<String>,
}

/// Arguments of `hgl dev`
#[derive(Debug, Facet)]
struct DevArgs {
    /// Spec file to use
    #[facet(positional)]
    file: String,

    /// Words to transcribe (default: one per line from stdin)
    #[facet(positional, default)]
    words: Vec<String>,

    /// Print the full rule trace before each transcription
    #[facet(named, short = 'v', default)]
    verbose: bool,

    /// Path to config file (default: .config/hgl/config.yaml)
    #[facet(named, short = 'c', default)]
    config: Option<String>,
}

#[derive(Debug)]
enum Command {
    Test(TestArgs),
    Dev(DevArgs),
    Version,
    Help,
}

/// Pick the subcommand from the first argument and parse the rest into its
/// arguments.
fn parse_command(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        eyre::bail!("No command given.\n\n{USAGE}");
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    let command = match name.as_str() {
        "test" => Command::Test(
            facet_args::from_slice(&rest).wrap_err("Invalid arguments for `hgl test`")?,
        ),
        "dev" => Command::Dev(
            facet_args::from_slice(&rest).wrap_err("Invalid arguments for `hgl dev`")?,
        ),
        "version" => Command::Version,
        "help" | "-h" | "--help" => Command::Help,
        other => eyre::bail!("Unknown command `{other}`.\n\n{USAGE}"),
    };
    Ok(command)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HGL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    match parse_command(args)? {
        Command::Test(args) => {
            let file_config = load_config(args.config.as_deref().map(Path::new))?;
            let config = HarnessConfig::resolve(
                file_config,
                args.cover,
                args.coverprofile.map(PathBuf::from),
                false,
            );
            let files: Vec<PathBuf> = args.files.into_iter().map(PathBuf::from).collect();
            run_test_command(&files, &config)
        }
        Command::Dev(args) => {
            let file_config = load_config(args.config.as_deref().map(Path::new))?;
            let config = HarnessConfig::resolve(file_config, false, None, args.verbose);
            let stdin = std::io::stdin().lock();
            hgl::run_dev(
                Path::new(&args.file),
                WordStream::new(args.words, stdin),
                &config,
                &mut std::io::stdout().lock(),
            )
        }
        Command::Version => {
            println!("hgl-{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

fn run_test_command(files: &[PathBuf], config: &HarnessConfig) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let outcome = hgl::run_test(files, config, &mut stdout)?;
    stdout.flush()?;
    let report = &outcome.report;

    if outcome.passed() {
        eprintln!(
            "{} {} examples in {} files",
            "ok".green().bold(),
            report.examples,
            report.files
        );
        Ok(())
    } else {
        eprintln!(
            "{} {} of {} examples mismatched",
            "FAIL".red().bold(),
            report.mismatches.len(),
            report.examples
        );
        std::process::exit(1);
    }
}
