//! oxide-bind CLI
//!
//! Command-line tool that rebuilds bound SQL from a template and an ORM
//! trace log.

mod example;
mod input;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

use oxide_bind::{
    BindStatus, BooleanStyle, DEFAULT_MAX_INPUT_BYTES, LogLinePattern, PositionBase,
    ResolutionResult, ResolveOptions, Resolver,
};

use crate::report::Format;

/// Bind ORM trace log values into parameterized SQL.
#[derive(Parser)]
#[command(name = "oxide-bind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format.
    #[arg(
        short,
        long,
        value_enum,
        env = "OXIDE_BIND_FORMAT",
        default_value = "text",
        global = true
    )]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind a trace log into a SQL template.
    Resolve {
        /// File with the SQL template (`-` for stdin).
        #[arg(short, long)]
        sql: PathBuf,

        /// File with the trace log (`-` for stdin).
        #[arg(short, long)]
        log: PathBuf,

        /// Also write the bound SQL to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Resolve the bundled Hibernate example (1-based positions).
    Example {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Number of the first parameter in the log: 0 or 1.
    #[arg(long, env = "OXIDE_BIND_POSITION_BASE", value_parser = parse_position_base)]
    position_base: Option<PositionBase>,

    /// Custom line regex with `position`, `type` and `value` named groups.
    #[arg(long)]
    pattern: Option<String>,

    /// Regex marking a line as a bind line (defaults to --pattern).
    #[arg(long, requires = "pattern")]
    announcement: Option<String>,

    /// Value tokens treated as SQL NULL (repeatable).
    #[arg(long = "null", value_name = "TOKEN")]
    null_sentinels: Vec<String>,

    /// Reject inputs larger than this many bytes.
    #[arg(long, env = "OXIDE_BIND_MAX_INPUT_BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    max_input_bytes: usize,

    /// Expand comma separated text values for `IN (?)`.
    #[arg(long)]
    expand_in: bool,

    /// Write booleans as 1/0.
    #[arg(long)]
    numeric_booleans: bool,

    /// Report numeric values that do not look like numbers.
    #[arg(long)]
    flag_non_numeric: bool,
}

fn parse_position_base(s: &str) -> Result<PositionBase, String> {
    s.parse::<usize>()
        .ok()
        .and_then(PositionBase::from_number)
        .ok_or_else(|| format!("position base must be 0 or 1, got '{s}'"))
}

impl EngineArgs {
    fn options(&self, default_base: PositionBase) -> anyhow::Result<ResolveOptions> {
        let mut pattern = match &self.pattern {
            Some(line) => {
                let announcement = self.announcement.as_deref().unwrap_or(line);
                LogLinePattern::new("custom", announcement, line)?
            }
            None => LogLinePattern::hibernate(),
        };
        if !self.null_sentinels.is_empty() {
            pattern = pattern.with_null_sentinels(self.null_sentinels.iter().cloned());
        }

        let boolean_style = if self.numeric_booleans {
            BooleanStyle::Numeric
        } else {
            BooleanStyle::Verbatim
        };

        Ok(ResolveOptions::new()
            .with_position_base(self.position_base.unwrap_or(default_base))
            .with_log_pattern(pattern)
            .with_max_input_bytes(self.max_input_bytes)
            .with_boolean_style(boolean_style)
            .with_expand_in_lists(self.expand_in)
            .with_flag_non_numeric(self.flag_non_numeric))
    }
}

fn print_result(result: &ResolutionResult, format: Format) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    report::write_report(&mut stdout.lock(), result, format)?;

    let matched = result.parameters_with_status(BindStatus::Matched).count();
    if result.is_complete() {
        info!(
            "Bound {matched} of {} placeholders.",
            result.placeholder_count
        );
    } else {
        warn!(
            "Bound {matched} of {} placeholders with {} diagnostics.",
            result.placeholder_count,
            result.diagnostics.len()
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Resolve {
            sql,
            log,
            output,
            engine,
        } => {
            let options = engine.options(PositionBase::Zero)?;
            let (template, trace_log) = input::read_pair(&sql, &log)?;
            debug!(
                template_bytes = template.len(),
                log_bytes = trace_log.len(),
                pattern = options.log_pattern().name(),
                "Resolving"
            );

            let result = Resolver::new(options).resolve(&template, &trace_log)?;
            print_result(&result, cli.format)?;

            if let Some(path) = output {
                std::fs::write(&path, &result.bound_sql)?;
                info!("Wrote bound SQL to {}", path.display());
            }
        }

        Commands::Example { engine } => {
            let options = engine.options(PositionBase::One)?;
            let result =
                Resolver::new(options).resolve(example::EXAMPLE_SQL, example::EXAMPLE_LOG)?;
            print_result(&result, cli.format)?;
        }
    }

    Ok(())
}
