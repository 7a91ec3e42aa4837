//! # Chef CLI
//!
//! Command-line interface for the Chef recipe interpreter.
//!
//! Usage:
//!   chef run <file|->     Execute a recipe and print its dishes
//!   chef check <file|->   Parse a recipe without running it

use std::io::Read as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chef")]
#[command(version = "0.1.0")]
#[command(about = "An interpreter for the Chef esoteric cooking language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a recipe and print its dishes, one per line
    Run {
        /// Path to the recipe source file, or "-" to read stdin
        file: PathBuf,
    },
    /// Parse a recipe without executing it
    Check {
        /// Path to the recipe source file, or "-" to read stdin
        file: PathBuf,
    },
}

fn read_source(file: &PathBuf) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading recipe source from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading recipe source from {}", file.display()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file } => {
            let source = read_source(&file)?;
            let dishes = chef_vm::execute(&source).context("recipe execution failed")?;
            for dish in dishes {
                println!("{dish}");
            }
        }
        Commands::Check { file } => {
            let source = read_source(&file)?;
            let statements = chef_lexer::normalize(&source);
            chef_parser::parse_program(&statements).context("recipe failed to parse")?;
            println!("{}: ok", file.display());
        }
    }

    Ok(())
}
