//! ncode: look up result codes and inspect declared types.
//!
//! Usage:
//!   ncode lookup -11 FILE_NOT_FOUND 3
//!   ncode list --facility external --leaves
//!   ncode types --objects
//!   ncode type NInt32

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ncode::codes::{self, CodeInfo, FacilityFilter};
use ncode::types::{self, KindFilter};
use ncode::{Config, OutputFormat, render};

/// Result-code and type-identity inspector.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format; overrides NCODE_FORMAT.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe raw result values or symbolic code names.
    #[command(allow_negative_numbers = true)]
    Lookup {
        /// Values such as `-11`, or names such as `ARGUMENT_NULL`.
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Print the result-code table.
    List {
        /// Only codes in this facility.
        #[arg(long, value_enum)]
        facility: Option<FacilityFilter>,

        /// Only leaf codes, without success, root or facility nodes.
        #[arg(long)]
        leaves: bool,
    },

    /// List the built-in types.
    #[command(group(ArgGroup::new("kind").args(["primitives", "objects"])))]
    Types {
        #[arg(long)]
        primitives: bool,

        #[arg(long)]
        objects: bool,
    },

    /// Describe one built-in type by name.
    Type {
        /// Type name, e.g. `NInt32`.
        name: String,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()
        .context("failed to load configuration")?
        .with_format(cli.format);
    debug!(format = ?config.format, command = ?cli.command, "running command");

    let output = run(cli.command, config.format)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

fn run(command: Command, format: OutputFormat) -> Result<String> {
    match command {
        Command::Lookup { codes: args } => {
            let infos = args
                .iter()
                .map(|arg| codes::parse_code(arg).map(CodeInfo::lookup))
                .collect::<Result<Vec<_>>>()?;
            render::codes(&infos, format)
        }
        Command::List { facility, leaves } => render::codes(&codes::list(facility, leaves), format),
        Command::Types {
            primitives,
            objects,
        } => {
            let filter = if primitives {
                KindFilter::Primitives
            } else if objects {
                KindFilter::Objects
            } else {
                KindFilter::All
            };
            render::types(&types::list(filter), format)
        }
        Command::Type { name } => render::single_type(&types::describe(&name)?, format),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
