// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sexpect CLI entry point.

use clap::{Args, Parser, Subcommand, ValueEnum};
use sexpect_cli::{commands, logging, Outcome};
use sexpect_example_store::{ExampleKey, ExampleKind, ExampleStore};
use std::path::PathBuf;
use std::process::ExitCode;

/// Match patterns against generated script trees and manage stored examples
#[derive(Parser, Debug)]
#[command(name = "sexpect")]
#[command(about = "Match patterns against script trees and compare stored examples")]
struct Cli {
    /// Ignore table (TOML) used when matching
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a pattern occurs in a tree
    Contains { tree: PathBuf, pattern: PathBuf },

    /// Print every node matching a pattern
    Filter { tree: PathBuf, pattern: PathBuf },

    /// Print the node at the end of a path of patterns
    Find {
        tree: PathBuf,
        #[arg(required = true)]
        patterns: Vec<PathBuf>,
    },

    /// Print the path of a stored example
    Path {
        #[command(flatten)]
        example: ExampleArgs,
    },

    /// Record a generated script as the example
    Store {
        #[command(flatten)]
        example: ExampleArgs,
        code: PathBuf,
    },

    /// Compare a generated script with its stored example
    Diff {
        #[command(flatten)]
        example: ExampleArgs,
        actual: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ExampleArgs {
    /// Subject type name, e.g. `AptPackages`
    subject: String,

    #[arg(long, value_enum, default_value_t = Kind::Addon)]
    kind: Kind,

    /// Case label appended to the file name
    #[arg(long)]
    name: Option<String>,

    /// Integration example
    #[arg(long)]
    integration: bool,

    /// Directory containing `examples/`
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Addon,
    Build,
}

impl ExampleArgs {
    fn store_and_key(&self) -> (ExampleStore, ExampleKey) {
        let kind = match self.kind {
            Kind::Addon => ExampleKind::Addon,
            Kind::Build => ExampleKind::Build,
        };
        let mut key = ExampleKey::new(kind, &self.subject).integration(self.integration);
        if let Some(ref name) = self.name {
            key = key.named(name);
        }
        (ExampleStore::new(&self.root), key)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome: Outcome = match cli.command {
        Command::Contains { tree, pattern } => {
            let matcher = commands::matcher(cli.config.as_deref())?;
            commands::contains(&matcher, &tree, &pattern).await?
        }
        Command::Filter { tree, pattern } => {
            let matcher = commands::matcher(cli.config.as_deref())?;
            commands::filter(&matcher, &tree, &pattern).await?
        }
        Command::Find { tree, patterns } => {
            let matcher = commands::matcher(cli.config.as_deref())?;
            commands::find(&matcher, &tree, &patterns).await?
        }
        Command::Path { example } => {
            let (store, key) = example.store_and_key();
            commands::example_path(&store, &key)
        }
        Command::Store { example, code } => {
            let (store, key) = example.store_and_key();
            commands::store(&store, &key, &code).await?
        }
        Command::Diff { example, actual } => {
            let (store, key) = example.store_and_key();
            commands::diff(&store, &key, &actual).await?
        }
    };

    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }
    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
