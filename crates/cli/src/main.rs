// gridcmp - cell-level comparison of two spreadsheets or delimited files

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Color;
use gridcmp_cli::exit_codes::{self, EXIT_USAGE};
use gridcmp_cli::file_type::{are_same_type, detect_file_type, FileType, SUPPORTED_EXTENSIONS};
use gridcmp_cli::modes::{self, DEFAULT_SHEET};
use gridcmp_cli::render::{self, Banner, ConsoleSink, JsonSummary};
use gridcmp_config::{ColorMode, Settings};
use gridcmp_engine::{
    ComparisonResult, CompareOptions, Comparer, ScanAnchor, Tolerance, ValidationError,
};

/// Environment variable holding the log filter (`EnvFilter` syntax).
const LOG_ENV: &str = "GRIDCMP_LOG";

#[derive(Parser)]
#[command(name = "gridcmp")]
#[command(about = "Compare two spreadsheets or delimited files cell by cell")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  gridcmp old.xlsx new.xlsx --all
  gridcmp old.xlsx new.xlsx --sheet Summary
  gridcmp export_a.csv export_b.csv --tolerance 1e-9
  gridcmp a.csv b.csv --json > summary.json")]
struct Cli {
    /// First file (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .tsv, .txt)
    file1: PathBuf,

    /// Second file, same type as the first
    file2: PathBuf,

    /// Compare every sheet present in both workbooks
    #[arg(long)]
    all: bool,

    /// Sheet to compare [default: Sheet1]
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Largest numeric difference still treated as equal [default: 1e-15]
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    tolerance: Option<String>,

    /// Scan start when only one side has data: origin (from A1) or data
    #[arg(long, value_name = "ANCHOR")]
    anchor: Option<ScanAnchor>,

    /// Colorize output: auto, always, never
    #[arg(long, value_name = "WHEN", env = "GRIDCMP_COLOR")]
    color: Option<ColorMode>,

    /// Print the summary as JSON on stdout; difference lines go to stderr
    #[arg(long)]
    json: bool,

    /// Suppress the banner and the difference log (summary still printed)
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  gridcmp-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Route `log` records from the library crates to stderr.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        eprintln!("warning: logging already initialized");
    }
}

/// Resolved run configuration: flags over settings over defaults.
struct RunPlan {
    file1: PathBuf,
    file2: PathBuf,
    file_type: FileType,
    options: CompareOptions,
    color: bool,
    all: bool,
    sheet: Option<String>,
    json: bool,
    quiet: bool,
}

fn run(cli: Cli) -> Result<u8, CliError> {
    let settings = Settings::load();
    let plan = plan(cli, &settings)?;
    Ok(execute(&plan))
}

fn plan(cli: Cli, settings: &Settings) -> Result<RunPlan, CliError> {
    let tolerance = match cli.tolerance.as_deref() {
        Some(raw) => parse_tolerance(raw)?,
        None => settings.tolerance().unwrap_or_default(),
    };
    let anchor = cli.anchor.unwrap_or(settings.anchor);
    let color_mode = cli.color.unwrap_or(settings.color);

    check_exists(&cli.file1)?;
    check_exists(&cli.file2)?;

    let type1 = detect_file_type(&cli.file1);
    let type2 = detect_file_type(&cli.file2);
    if type1 == FileType::Unknown && type2 == FileType::Unknown {
        return Err(CliError::usage("unsupported file type")
            .with_hint(format!("supported types: {}", SUPPORTED_EXTENSIONS)));
    }
    if !are_same_type(&cli.file1, &cli.file2) {
        return Err(CliError::usage("both files must be the same type (both Excel or both CSV)")
            .with_hint(format!("file 1: {}, file 2: {}", type1, type2)));
    }

    Ok(RunPlan {
        file1: cli.file1,
        file2: cli.file2,
        file_type: type1,
        options: CompareOptions { tolerance, anchor },
        color: color_mode.enabled(io::stdout().is_terminal()),
        all: cli.all,
        sheet: cli.sheet,
        json: cli.json,
        quiet: cli.quiet,
    })
}

fn parse_tolerance(raw: &str) -> Result<Tolerance, CliError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CliError::usage(format!("invalid tolerance value '{}'", raw)))?;
    Tolerance::new(value).map_err(|e| CliError::usage(e.to_string()))
}

fn check_exists(path: &Path) -> Result<(), CliError> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(CliError::usage(ValidationError::EmptyPath.to_string()));
    }
    if !path.exists() {
        return Err(CliError::usage(format!("file not found: {}", path.display())));
    }
    Ok(())
}

/// Run the comparison and print the summary. Returns the exit code.
fn execute(plan: &RunPlan) -> u8 {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Notes and errors share the difference log's stream
    let mut notes: Box<dyn Write> = if plan.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    if !plan.quiet && !plan.json {
        let banner = Banner {
            file1: &plan.file1,
            file2: &plan.file2,
            file_type: plan.file_type,
            tolerance: plan.options.tolerance,
        };
        report_io(render::write_banner(&mut out, &banner));
    }
    drop(out);

    for note in ignored_flag_notes(plan) {
        report_io(render::write_colored(&mut *notes, &note, Color::Yellow, plan.color));
    }

    let log: Box<dyn Write> = if plan.quiet {
        Box::new(io::sink())
    } else if plan.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut comparer = Comparer::new(plan.options, ConsoleSink::new(log, plan.color));

    let outcome = match plan.file_type {
        FileType::Csv => modes::run_csv(&mut comparer, &plan.file1, &plan.file2),
        _ if plan.all => modes::run_all_sheets(&mut comparer, &plan.file1, &plan.file2),
        _ => {
            let sheet = plan.sheet.as_deref().unwrap_or(DEFAULT_SHEET);
            modes::run_single_sheet(&mut comparer, &plan.file1, &plan.file2, sheet)
        }
    };

    let reporter = comparer.into_reporter();
    if reporter.received() > reporter.shown() as u64 {
        log::debug!("{} of {} differences shown", reporter.shown(), reporter.received());
    }
    drop(reporter);

    let (result, error, code) = match outcome {
        Ok(result) => (result, None, exit_codes::for_mismatches(result.total_mismatches())),
        Err(e) => {
            let message = format!("Error: {}", e);
            report_io(render::write_colored(&mut *notes, &message, Color::Red, plan.color));
            (ComparisonResult::default(), Some(e.to_string()), e.exit_code())
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if plan.json {
        let mut summary = JsonSummary::new(&result, plan.options.tolerance, plan.options.anchor);
        if let Some(error) = error {
            summary = summary.with_error(error);
        }
        report_io(render::write_json_summary(&mut out, &summary));
    } else {
        report_io(render::write_summary(&mut out, &result, plan.color));
    }
    report_io(out.flush());

    code
}

fn ignored_flag_notes(plan: &RunPlan) -> Vec<&'static str> {
    let mut notes = Vec::new();
    match plan.file_type {
        FileType::Csv => {
            if plan.all {
                notes.push("Note: --all flag is ignored for CSV files (CSV files have no sheets)");
            }
            if plan.sheet.is_some() {
                notes.push("Note: --sheet flag is ignored for CSV files (CSV files have no sheets)");
            }
        }
        _ => {
            if plan.all && plan.sheet.is_some() {
                notes.push("Warning: --sheet is ignored when --all is specified");
            }
        }
    }
    notes
}

fn report_io(result: io::Result<()>) {
    if let Err(e) = result {
        log::debug!("console write failed: {}", e);
    }
}

// ============================================================================
// CLI errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
