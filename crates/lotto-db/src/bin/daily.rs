//! # daily: Sales Entry from the Command Line
//!
//! The boundary between staff and the ledger. Dates and amounts are parsed
//! and rejected here, before any ledger code runs.
//!
//! ## Usage
//! ```bash
//! # Today's entries and totals
//! cargo run -p lotto-db --bin daily -- show
//!
//! # Load Monday's game codes as zero rows, then fill one in
//! cargo run -p lotto-db --bin daily -- --date 2024-06-03 template
//! cargo run -p lotto-db --bin daily -- --date 2024-06-03 edit <ID> NLB MSM 100 0
//!
//! # Export yesterday as JSON
//! cargo run -p lotto-db --bin daily -- --date yesterday export > report.json
//! ```
//!
//! Logs go to stderr so `export` output can be redirected as-is.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use lotto_core::{
    daily_overview, EntryId, Money, SaleBoard, SaleCandidate, SalesDayId, SalesLedger,
    STANDARD_TEMPLATES,
};
use lotto_db::{migrations, Database, LedgerConfig, DEFAULT_LOG_FILTER};
use tracing::warn;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Template,
    Preview,
    Add(SaleCandidate),
    Edit(EntryId, SaleCandidate),
    Delete(EntryId),
    Export,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cli {
    db: Option<PathBuf>,
    config: Option<PathBuf>,
    date: SalesDayId,
    command: Command,
}

const USAGE: &str = "\
Lotto Ledger daily sales

Usage: daily [OPTIONS] <COMMAND>

Commands:
  show                                     List entries and totals
  template                                 Load the weekday template as zero rows
  preview                                  Show the weekday template without loading
  add <NLB|DLB> <CODE> <GROSS> [RETURN]    Validate and add an entry
  edit <ID> <NLB|DLB> <CODE> <GROSS> [RETURN]
                                           Validate and replace an entry
  delete <ID>                              Delete an entry
  export                                   Print the daily report as JSON
  status                                   Database health and migrations

Options:
  -d, --db <PATH>        Database file (overrides config and LOTTO_DB_PATH)
  -c, --config <PATH>    Config file (default: ledger.toml in the config dir)
      --date <DATE>      YYYY-MM-DD, today or yesterday (default: today)
  -h, --help             Show this help message";

/// Parses everything after the program name. `Ok(None)` means help.
fn parse_args(args: &[String]) -> Result<Option<Cli>, String> {
    let mut db = None;
    let mut config = None;
    let mut date = None;
    let mut rest: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(None),
            "-d" | "--db" | "-c" | "--config" | "--date" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{arg} needs a value"))?;
                match arg {
                    "-d" | "--db" => db = Some(PathBuf::from(value)),
                    "-c" | "--config" => config = Some(PathBuf::from(value)),
                    _ => date = Some(resolve_date(value)?),
                }
                i += 1;
            }
            _ if arg.starts_with('-') && rest.is_empty() => {
                return Err(format!("unknown option {arg}"));
            }
            _ => rest.push(arg),
        }
        i += 1;
    }

    let date = match date {
        Some(date) => date,
        None => SalesDayId::today(),
    };

    Ok(Some(Cli {
        db,
        config,
        date,
        command: parse_command(&rest)?,
    }))
}

fn resolve_date(raw: &str) -> Result<SalesDayId, String> {
    match raw {
        "today" => Ok(SalesDayId::today()),
        "yesterday" => SalesDayId::today()
            .previous()
            .ok_or_else(|| "no day before today".to_string()),
        _ => SalesDayId::parse(raw).map_err(|e| e.to_string()),
    }
}

fn parse_command(words: &[&str]) -> Result<Command, String> {
    let Some((name, operands)) = words.split_first() else {
        return Err("missing command".to_string());
    };

    let expect_len = |min: usize, max: usize| {
        if operands.len() < min || operands.len() > max {
            Err(format!("wrong number of arguments for {name}"))
        } else {
            Ok(())
        }
    };

    match *name {
        "show" => expect_len(0, 0).map(|_| Command::Show),
        "template" => expect_len(0, 0).map(|_| Command::Template),
        "preview" => expect_len(0, 0).map(|_| Command::Preview),
        "export" => expect_len(0, 0).map(|_| Command::Export),
        "status" => expect_len(0, 0).map(|_| Command::Status),
        "add" => {
            expect_len(3, 4)?;
            Ok(Command::Add(parse_candidate(operands)?))
        }
        "edit" => {
            expect_len(4, 5)?;
            Ok(Command::Edit(
                EntryId::from(operands[0]),
                parse_candidate(&operands[1..])?,
            ))
        }
        "delete" => {
            expect_len(1, 1)?;
            Ok(Command::Delete(EntryId::from(operands[0])))
        }
        other => Err(format!("unknown command {other}")),
    }
}

/// `<BOARD> <CODE> <GROSS> [RETURN]`; return defaults to zero.
fn parse_candidate(operands: &[&str]) -> Result<SaleCandidate, String> {
    let board = operands[0].parse::<SaleBoard>().map_err(|e| e.to_string())?;
    let gross = operands[2].parse::<Money>().map_err(|e| e.to_string())?;
    let deduction = match operands.get(3) {
        Some(raw) => raw.parse::<Money>().map_err(|e| e.to_string())?,
        None => Money::zero(),
    };

    Ok(SaleCandidate::new(board, operands[1], gross, deduction))
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Up before the config load so its own log lines are not lost
    let apply_filter = init_tracing();

    let mut config = LedgerConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.db {
        config.database.path = path;
    }

    apply_filter(&config.logging.filter);

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(config.db_config()).await?;
    let store = db.sales();
    let day = cli.date;

    match cli.command {
        Command::Show => {
            println!("{}", daily_overview(&store, day).await?);
        }
        Command::Export => {
            println!("{}", daily_overview(&store, day).await?.to_json()?);
        }
        Command::Preview => {
            let preview = STANDARD_TEMPLATES.preview(day.weekday())?;
            println!("{} ({})", day, preview.label);
            println!("  NLB ({}): {}", preview.nlb.len(), preview.nlb.join(" "));
            println!("  DLB ({}): {}", preview.dlb.len(), preview.dlb.join(" "));
        }
        Command::Template => {
            let ledger = SalesLedger::open(&store, day).await?;
            let rows = ledger.load_template().await?;
            println!(
                "Loaded {} template rows for {} ({})",
                rows.len(),
                day,
                day.weekday()
            );
        }
        Command::Add(candidate) => {
            let ledger = SalesLedger::open(&store, day).await?;
            let entry = ledger.record(candidate).await?;
            if !STANDARD_TEMPLATES.is_code_scheduled(day.weekday(), entry.board(), &entry.fields.code) {
                eprintln!(
                    "note: {} is not on the {} {} schedule",
                    entry.fields.code,
                    day.weekday(),
                    entry.board()
                );
            }
            println!("{} {} {} net {}", entry.id, entry.board(), entry.fields.code, entry.net());
        }
        Command::Edit(id, candidate) => {
            let ledger = SalesLedger::attach(&store, day);
            let entry = ledger.amend(&id, candidate).await?;
            println!("{} {} {} net {}", entry.id, entry.board(), entry.fields.code, entry.net());
        }
        Command::Delete(id) => {
            let ledger = SalesLedger::attach(&store, day);
            ledger.remove(&id).await?;
            println!("Deleted {id}");
        }
        Command::Status => {
            let (total, applied) = migrations::migration_status(db.pool()).await?;
            println!("Database: {}", config.database.path.display());
            println!("Healthy: {}", db.health_check().await);
            println!("Migrations: {applied}/{total} applied");
        }
    }

    db.close().await;
    Ok(())
}

/// Installs the tracing subscriber with the default filter.
///
/// Returns a setter for the configured filter once `ledger.toml` has been
/// read. `RUST_LOG` wins over both.
fn init_tracing() -> impl Fn(&str) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_LOG_FILTER))
        .with_writer(std::io::stderr)
        .with_filter_reloading();
    let handle = builder.reload_handle();
    builder.init();

    move |configured: &str| {
        if let Err(err) = handle.reload(env_filter(configured)) {
            warn!(error = %err, "Could not apply configured log filter");
        }
    }
}

fn env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_add_with_default_return() {
        let cli = parse_args(&args("--date 2024-06-03 add nlb msm 12.50")).unwrap().unwrap();
        assert_eq!(cli.date.to_string(), "2024-06-03");
        assert_eq!(
            cli.command,
            Command::Add(SaleCandidate::new(
                SaleBoard::Nlb,
                "msm",
                Money::from_cents(1250),
                Money::zero()
            ))
        );
    }

    #[test]
    fn test_edit_and_delete() {
        let cli = parse_args(&args("-d x.db edit abc DLB LWM 10 2")).unwrap().unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert!(matches!(cli.command, Command::Edit(ref id, _) if id.as_str() == "abc"));

        let cli = parse_args(&args("delete abc")).unwrap().unwrap();
        assert_eq!(cli.command, Command::Delete(EntryId::from("abc")));
    }

    #[test]
    fn test_boundary_rejects_bad_dates() {
        assert!(parse_args(&args("--date 03/06/2024 show")).is_err());
        assert!(parse_args(&args("--date 2023-02-29 show")).is_err());
        assert!(parse_args(&args("--date")).is_err());
    }

    #[test]
    fn test_relative_dates() {
        let cli = parse_args(&args("--date yesterday show")).unwrap().unwrap();
        assert_eq!(Some(cli.date), SalesDayId::today().previous());
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_args(&args("")).is_err());
        assert!(parse_args(&args("frobnicate")).is_err());
        assert!(parse_args(&args("add NLB MSM")).is_err());
        assert!(parse_args(&args("add XLB MSM 10")).is_err());
        assert!(parse_args(&args("add NLB MSM 1.234")).is_err());
        assert!(parse_args(&args("show extra")).is_err());
        assert!(parse_args(&args("--verbose show")).is_err());
    }

    #[test]
    fn test_configured_filter_replaces_the_default() {
        // RUST_LOG overrides both filters
        if env::var_os("RUST_LOG").is_some() {
            return;
        }

        let apply_filter = init_tracing();
        assert!(tracing::enabled!(tracing::Level::INFO));

        apply_filter("warn");
        assert!(!tracing::enabled!(tracing::Level::INFO));
        assert!(tracing::enabled!(tracing::Level::WARN));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args("--help")), Ok(None));
    }
}
