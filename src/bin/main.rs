//! querydeck CLI - build and run reports against a reflected schema
//!
//! Usage:
//!   querydeck [--connection <name> | --target <target>] tables
//!   querydeck columns <table>
//!   querydeck suggest <table>
//!   querydeck run --table <table> [--metric <expr>]... [--group-by <col>]... [--filter <pred>]...
//!
//! Examples:
//!   querydeck --target ./shop.db tables
//!   querydeck run --table orders --group-by region --filter "amount > 100"
//!   querydeck run --table orders --metric "SUM(amount) AS revenue" --limit 20 --show-spec

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use querydeck::backend::{Backend, WorkerBackend};
use querydeck::builder::SpecBuilder;
use querydeck::config::Settings;
use querydeck::model::FilterOp;
use querydeck::result::{render_value, ResultTable};
use querydeck::session::{ReportOutcome, Workspace};
use querydeck::worker::WorkerClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "querydeck")]
#[command(about = "querydeck - build report specs and run them against a reflected schema")]
#[command(version)]
struct Cli {
    /// Config file (defaults to QUERYDECK_CONFIG, ./querydeck.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Named connection from the config file
    #[arg(short, long, global = true)]
    connection: Option<String>,

    /// Connection target, overriding any named connection
    #[arg(short, long, global = true)]
    target: Option<String>,

    /// Worker driver for --target
    #[arg(long, global = true, default_value = "sqlite")]
    driver: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List reflected tables
    Tables,

    /// List the columns of a table
    Columns {
        table: String,
    },

    /// List shape suggestions for a table
    Suggest {
        table: String,
    },

    /// Build a report from selections and run it
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Base table
    #[arg(long)]
    table: String,

    /// Metric as "EXPR" or "EXPR AS alias" (repeatable)
    #[arg(short, long = "metric")]
    metrics: Vec<String>,

    /// Column to group by (repeatable)
    #[arg(short, long = "group-by")]
    group_by: Vec<String>,

    /// Filter as "COLUMN OP VALUE" (repeatable)
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Row limit (clamped to 1..=1000000)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Raw statement overriding the built report
    #[arg(long)]
    raw_sql: Option<String>,

    /// Print the report spec before running it
    #[arg(long)]
    show_spec: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Text grid followed by the trace
    Table,
    /// JSON object with headers, rows and trace
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    let mut workspace = match connect(&settings, &cli.connection).await {
        Ok(ws) => ws,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Tables => cmd_tables(&mut workspace).await,
        Commands::Columns { table } => cmd_columns(&workspace, &table),
        Commands::Suggest { table } => cmd_suggest(&mut workspace, &table).await,
        Commands::Run(args) => cmd_run(&mut workspace, args).await,
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the connection target, spawn the worker and connect.
async fn connect(settings: &Settings, args: &ConnectionArgs) -> Result<Workspace, String> {
    let (driver, target) = match (&args.target, &args.connection) {
        (Some(target), _) => (args.driver.clone(), target.clone()),
        (None, Some(name)) => {
            let conn = settings.get_connection(name).map_err(|e| e.to_string())?;
            let target = conn.resolved_target().map_err(|e| e.to_string())?;
            (conn.driver.clone(), target)
        }
        (None, None) => match settings.default_connection() {
            Some((_, conn)) => {
                let target = conn.resolved_target().map_err(|e| e.to_string())?;
                (conn.driver.clone(), target)
            }
            None => {
                return Err(
                    "No connection configured. Pass --target or define [connections] in querydeck.toml"
                        .to_string(),
                )
            }
        },
    };

    let client = WorkerClient::spawn_with_settings(&settings.worker)
        .await
        .map_err(|e| format!("Worker error: {}", e))?;
    let backend = Backend::from_shared(Arc::new(WorkerBackend::with_client(client, driver)));

    let mut workspace = Workspace::with_default_limit(settings.builder.effective_limit());
    workspace
        .connect(target, backend)
        .await
        .map_err(|e| format!("Connection error: {}", e))?;
    Ok(workspace)
}

async fn cmd_tables(workspace: &mut Workspace) -> ExitCode {
    let session = match workspace.session_mut() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match session.list_tables().await {
        Ok(tables) => {
            for table in tables {
                println!("{} ({} columns)", table.name, table.columns.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_columns(workspace: &Workspace, table: &str) -> ExitCode {
    if let Some(session) = workspace.session() {
        for column in session.columns_for(table) {
            println!("{}\t{}", column.name, column.data_type);
        }
    }
    ExitCode::SUCCESS
}

async fn cmd_suggest(workspace: &mut Workspace, table: &str) -> ExitCode {
    if let Err(e) = workspace.select_table(table).await {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    for (choice, label) in workspace.builder().suggestions().labels().enumerate() {
        println!("{:>3}  {}", choice, label);
    }
    ExitCode::SUCCESS
}

async fn cmd_run(workspace: &mut Workspace, args: RunArgs) -> ExitCode {
    if let Err(e) = workspace.select_table(&args.table).await {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Err(message) = apply_selections(workspace.builder_mut(), &args) {
        eprintln!("{}", message);
        return ExitCode::FAILURE;
    }

    let mut spec = workspace.builder().build();
    if let Some(sql) = &args.raw_sql {
        spec = spec.with_raw_sql(sql.clone());
    }

    if args.show_spec {
        match serde_json::to_string_pretty(&spec) {
            Ok(json) => println!("{}\n", json),
            Err(e) => eprintln!("Could not serialize spec: {}", e),
        }
    }

    let session = match workspace.session_mut() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match session.run_report(&spec).await {
        Ok(outcome) => {
            print_outcome(&outcome, &args.output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn apply_selections(builder: &mut SpecBuilder, args: &RunArgs) -> Result<(), String> {
    if !args.metrics.is_empty() {
        // Replace the default COUNT(*) row seeded by table selection.
        builder.remove_metric(0);
        for metric in &args.metrics {
            let (expr, alias) = parse_metric(metric);
            let row = builder.add_metric();
            builder.set_metric(row, expr, alias);
        }
    }

    for column in &args.group_by {
        if !builder.set_group_by(column, true) {
            return Err(format!("Unknown group-by column '{}'", column));
        }
    }

    for filter in &args.filters {
        let (column, op, value) = parse_filter(filter)?;
        let row = builder.add_filter();
        if !builder.select_filter_column(row, &column) {
            return Err(format!("Unknown filter column '{}'", column));
        }
        builder.set_filter_op(row, Some(op));
        builder.set_filter_value(row, value);
    }

    if let Some(limit) = args.limit {
        builder.set_limit(limit);
    }
    Ok(())
}

/// Split `EXPR AS alias` at the last ` as ` (any case).
fn parse_metric(s: &str) -> (String, String) {
    let lower = s.to_ascii_lowercase();
    match lower.rfind(" as ") {
        Some(pos) => (s[..pos].trim().to_string(), s[pos + 4..].trim().to_string()),
        None => (s.trim().to_string(), String::new()),
    }
}

/// Parse `COLUMN OP VALUE`; the value may contain spaces.
fn parse_filter(s: &str) -> Result<(String, FilterOp, String), String> {
    let s = s.trim();
    let (column, rest) = s
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("Filter '{}' must look like \"COLUMN OP VALUE\"", s))?;
    let rest = rest.trim_start();
    let (op, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let op = FilterOp::parse(op).ok_or_else(|| format!("Unknown filter operator '{}'", op))?;
    Ok((column.to_string(), op, value.trim().to_string()))
}

fn print_outcome(outcome: &ReportOutcome, format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", render_grid(&outcome.table));
            println!();
            println!("{}", outcome.trace);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "headers": outcome.table.headers,
                "rows": outcome.table.rows,
                "trace": outcome.trace.lines,
            });
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Could not serialize result: {}", e),
            }
        }
    }
}

/// Render a table as aligned text columns.
///
/// The column count is the first row's width; longer rows are cut and
/// shorter rows padded.
fn render_grid(table: &ResultTable) -> String {
    let width = table.width();
    if width == 0 {
        return "(no rows)".to_string();
    }

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            (0..width)
                .map(|i| row.get(i).map(render_value).unwrap_or_default())
                .collect()
        })
        .collect();

    let headers = table.display_headers();
    let mut widths: Vec<usize> = (0..width)
        .map(|i| headers.map_or(0, |h| h[i].chars().count()))
        .collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_line = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::new();
    if let Some(headers) = headers {
        lines.push(format_line(headers));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
    }
    for row in &cells {
        lines.push(format_line(row.as_slice()));
    }
    lines.join("\n")
}
