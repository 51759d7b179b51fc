//! Builds a list from the command line, prints it, reverses it, and prints it again.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use singly_linked_list::LinkedList;

#[derive(Parser)]
#[command(name = "singly-linked-list")]
#[command(about = "Print a linked list before and after reversing it")]
struct Cli {
    /// Values to load; the first constructs the list, the rest are appended
    #[arg(default_values_t = [1, 2, 3, 4], allow_negative_numbers = true)]
    values: Vec<i64>,

    /// Log filter directive, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{directive}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let (first, rest) = cli
        .values
        .split_first()
        .context("at least one value is required")?;

    let mut list = LinkedList::new(*first);
    list.extend(rest.iter().copied());
    tracing::debug!(length = list.len(), "built list");

    println!("LL before reverse():");
    list.print_list()?;

    list.reverse();

    println!("\nLL after reverse():");
    list.print_list()?;
    Ok(())
}
