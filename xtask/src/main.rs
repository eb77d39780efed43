// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Workspace automation for the document approval service, invoked as
//! `cargo xtask <command>`.
//!
//! Nothing here needs external services. `cargo xtask ci` is what CI runs;
//! `cargo xtask serve` starts the server with the demo data loaded.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output};

use cargo_metadata::{Metadata, MetadataCommand};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SERVER_PACKAGE: &str = "doc-approval-server";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err:?}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run everything CI runs: lint, deny, machete, build, test
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Type-check every target
    #[command(visible_alias = "c")]
    Check,

    /// Write an lcov coverage report to target/lcov.info
    #[command(visible_alias = "cov")]
    Coverage,

    /// Audit dependencies with cargo-deny
    #[command(visible_alias = "cd")]
    Deny,

    /// Look for unused dependencies with cargo-machete
    #[command(visible_alias = "m")]
    Machete,

    /// Run clippy, rustdoc and rustfmt checks
    #[command(visible_alias = "l")]
    Lint,

    /// Apply clippy and rustfmt fixes
    #[command(visible_alias = "f")]
    Fix,

    /// Run unit and doc tests
    #[command(visible_alias = "t")]
    Test {
        /// Only test this package
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Start the server with the demo users and documents
    #[command(visible_alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => cargo(&["check", "--all-targets", "--all-features"]),
            Self::Coverage => cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Deny => cargo(&["deny", "check"]),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::Fix => fix(),
            Self::Test { package } => test(package.as_deref()),
            Self::Serve { port } => serve(port),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    cargo(&["deny", "check"])?;
    machete()?;
    cargo(&["build", "--all-targets", "--all-features"])?;
    test(None)
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

fn lint() -> Result<()> {
    cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])?;
    lint_docs()?;
    cargo_nightly(&["fmt", "--all", "--check"])
}

fn fix() -> Result<()> {
    cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
    ])?;
    cargo_nightly(&["fmt", "--all"])
}

/// Builds docs for each library package with docs.rs flags, failing on
/// any rustdoc warning.
fn lint_docs() -> Result<()> {
    let meta: Metadata = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        if package.name.as_str() == SERVER_PACKAGE {
            continue;
        }
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                package.name.as_str(),
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }
    Ok(())
}

fn test(package: Option<&str>) -> Result<()> {
    let mut args: Vec<&str> = vec!["test", "--all-targets", "--all-features"];
    if let Some(package) = package {
        args.extend(["--package", package]);
    }
    cargo(&args)?;
    // Doc tests are slow; run them last.
    let mut doc_args: Vec<&str> = vec!["test", "--doc", "--all-features"];
    if let Some(package) = package {
        doc_args.extend(["--package", package]);
    }
    cargo(&doc_args)
}

fn serve(port: u16) -> Result<()> {
    let port: String = port.to_string();
    cargo(&[
        "run",
        "--package",
        SERVER_PACKAGE,
        "--",
        "--seed",
        "--port",
        &port,
    ])
}

fn cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // Set by cargo for subcommands; it would pin the stable toolchain.
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Logs a `duct::Expression` before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
