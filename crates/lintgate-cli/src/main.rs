//! Lintgate CLI
//!
//! Runs the lint-compliance check once and maps the verdict to an exit code.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use lintgate_core::Verdict;
use lintgate_runner::{ComplianceCheck, FileConfig, RunnerConfig};
use lintgate_scanner::ReportFormat;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const EXIT_PASS: i32 = 0;
const EXIT_FAIL: i32 = 1;
const EXIT_FATAL: i32 = 2;
const EXIT_SKIPPED: i32 = 3;

fn cli() -> Command {
    Command::new("lintgate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run a linter against a project and fail on reported issues")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (defaults to lintgate.toml in the project root)"),
        )
        .arg(
            Arg::new("root")
                .short('C')
                .long("root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value(".")
                .help("Project root the linter runs in"),
        )
        .arg(
            Arg::new("tool")
                .long("tool")
                .value_name("NAME")
                .help("Linter executable, looked up on PATH"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["text", "json"])
                .help("How to read the linter output"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Kill the linter after this many seconds"),
        )
        .arg(
            Arg::new("require-tool")
                .long("require-tool")
                .action(ArgAction::SetTrue)
                .help("Exit non-zero when the linter is not installed"),
        )
        .arg(
            Arg::new("args")
                .value_name("ARGS")
                .num_args(0..)
                .last(true)
                .help("Extra arguments passed to the linter after `run`"),
        )
}

fn main() {
    init_tracing();

    let matches = cli().get_matches();
    match run(&matches) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(EXIT_FATAL);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(matches: &ArgMatches) -> Result<i32, anyhow::Error> {
    let config = build_config(matches)?;
    let check = ComplianceCheck::new(config);
    let verdict = check.run().context("lint check aborted")?;

    Ok(report(&verdict, matches.get_flag("require-tool")))
}

fn build_config(matches: &ArgMatches) -> Result<RunnerConfig, anyhow::Error> {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = RunnerConfig::new(&root);
    if let Some(file) = load_file_config(matches.get_one::<PathBuf>("config"), &root)? {
        config = config.apply_file(file);
    }

    // Flags override the file
    if let Some(tool) = matches.get_one::<String>("tool") {
        config = config.with_tool(tool);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        let format: ReportFormat = format.parse().map_err(anyhow::Error::msg)?;
        config = config.with_format(format);
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*secs));
    }
    if let Some(args) = matches.get_many::<String>("args") {
        config = config.with_args(args.cloned());
    }

    debug!(
        tool = %config.tool,
        args = ?config.command_args(),
        format = %config.format,
        timeout = ?config.timeout,
        "configuration resolved"
    );
    Ok(config)
}

fn load_file_config(
    explicit: Option<&PathBuf>,
    root: &Path,
) -> Result<Option<FileConfig>, anyhow::Error> {
    let file = match explicit {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            Some(FileConfig::load(path)?)
        }
        None => FileConfig::discover(root)?,
    };
    if file.is_none() {
        debug!(root = %root.display(), "no config file, using defaults");
    }
    Ok(file)
}

fn report(verdict: &Verdict, require_tool: bool) -> i32 {
    let code = match verdict {
        Verdict::Pass => {
            println!("lint check passed");
            EXIT_PASS
        }
        Verdict::Skip { reason } => {
            println!("lint check skipped: {reason}");
            if require_tool { EXIT_SKIPPED } else { EXIT_PASS }
        }
        Verdict::Fail(failure) => {
            eprintln!("{failure}");
            EXIT_FAIL
        }
    };
    info!(code, require_tool, "exiting");
    code
}
