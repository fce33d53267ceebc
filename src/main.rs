mod debug_report;

use reconcile::demo::{self, Fixture};
use reconcile::{
    AcceptOutcome, Context, FieldPath, ReconciliationStore, Registry, extract_verbose_with,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("RECONCILE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    input: Option<PathBuf>,
    guest_count: Option<i64>,
    ignores: Vec<(FieldPath, String)>,
    accepts: Vec<String>,
    json: bool,
    verbose: bool,
    color: bool,
}

fn run(config: &CliConfig) -> Result<(), String> {
    let mut fixture = load_fixture(config.input.as_ref())?;
    if let Some(count) = config.guest_count {
        info!(from = fixture.event.guest_count, to = count, "overriding guest count");
        fixture.event.guest_count = count;
    }
    let mut store = ReconciliationStore::from_fixture(fixture);

    for (field, discussion) in &config.ignores {
        let label = format!("{field}@{discussion}");
        store.ignore(&label, *field, discussion, true).map_err(|e| e.to_string())?;
    }

    let mut accepted: Vec<AcceptOutcome> = Vec::with_capacity(config.accepts.len());
    for id in &config.accepts {
        let suggestion = store
            .pending_suggestions()
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| format!("no pending suggestion with id '{id}'"))?;
        debug!(id = %suggestion.id, field = %suggestion.field, "accepting from command line");
        accepted.push(store.accept_suggestion(&suggestion).map_err(|e| e.to_string())?);
    }

    let pending = store.pending_suggestions();

    if config.json {
        let out = serde_json::json!({
            "event": store.record(),
            "accepted": accepted,
            "suggestions": pending,
        });
        let text = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let details = config.verbose.then(|| {
        let context = Context::new(store.baseline_guest_count());
        extract_verbose_with(Registry::builtin(), store.discussions(), store.ignored(), &context).details
    });
    debug_report::print_report(&store, &accepted, &pending, details.as_ref(), config.color);
    Ok(())
}

fn load_fixture(path: Option<&PathBuf>) -> Result<Fixture, String> {
    let Some(path) = path else {
        return demo::fixture().map_err(|e| e.to_string());
    };
    let text =
        std::fs::read_to_string(path).map_err(|err| format!("failed to read '{}': {err}", path.display()))?;
    Fixture::from_json(&text).map_err(|err| format!("'{}': {err}", path.display()))
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        input: None,
        guest_count: None,
        ignores: Vec::new(),
        accepts: Vec::new(),
        json: false,
        verbose: false,
        color: io::stdout().is_terminal(),
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args.next().ok_or_else(|| format!("error: {name} expects a value")),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("reconcile {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--json" => config.json = true,
            "--verbose" | "-v" => config.verbose = true,
            "--input" | "-i" => {
                let path = value("--input")?;
                if config.input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                config.input = Some(PathBuf::from(path));
            }
            "--guest-count" => {
                let raw = value("--guest-count")?;
                let count = raw
                    .parse::<i64>()
                    .ok()
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| format!("error: invalid --guest-count '{raw}' (expected a non-negative integer)"))?;
                config.guest_count = Some(count);
            }
            "--ignore" => config.ignores.push(parse_ignore(&value("--ignore")?)?),
            "--accept" => config.accepts.push(value("--accept")?),
            _ => return Err(format!("error: unknown argument '{arg}'\n\n{}", help_text())),
        }
    }

    Ok(config)
}

/// `<field>@<discussion>`, e.g. `menuPackage@disc-001`.
fn parse_ignore(value: &str) -> Result<(FieldPath, String), String> {
    let (field, discussion) = value
        .split_once('@')
        .filter(|(_, d)| !d.is_empty())
        .ok_or_else(|| format!("error: invalid --ignore '{value}' (expected <field>@<discussion>)"))?;
    let field = field.parse::<FieldPath>().map_err(|e| format!("error: invalid --ignore '{value}': {e}"))?;
    Ok((field, discussion.to_string()))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "reconcile {version}

Suggest event-record updates from client discussions.

Usage:
  reconcile [OPTIONS]

Options:
  -i, --input <path>            JSON file with {{\"event\": ..., \"discussions\": [...]}}.
                                Default: built-in demo (Johnson Wedding Reception).
  --guest-count <n>             Override the current guest count.
  --ignore <field>@<discussion> Permanently ignore a field for a discussion.
                                Repeatable.
  --accept <suggestion-id>      Accept a pending suggestion before listing.
                                Repeatable, applied in order.
  --json                        Print JSON instead of the report.
  -v, --verbose                 Also print raw candidates and run metrics.
  --color                       Force ANSI color output.
  --no-color                    Disable ANSI color output.
  -h, --help                    Show this help message.
  -V, --version                 Print version information.

Environment:
  RECONCILE_LOG                 Log filter (e.g. debug, reconcile=trace).
                                Default: warn.

Exit codes:
  0  Success.
  1  Runtime error (unreadable input, unknown suggestion id, ...).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_argument() {
        let (field, disc) = parse_ignore("menuPackage@disc-001").unwrap();
        assert_eq!(field, FieldPath::MenuPackage);
        assert_eq!(disc, "disc-001");

        let (field, _) = parse_ignore("timeline.start@disc-002").unwrap();
        assert_eq!(field, FieldPath::TimelineStart);

        assert!(parse_ignore("menuPackage").is_err());
        assert!(parse_ignore("menuPackage@").is_err());
        assert!(parse_ignore("menu@disc-001").is_err());
    }
}
