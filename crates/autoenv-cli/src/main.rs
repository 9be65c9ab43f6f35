// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! autoenv - configuration tooling for the render-farm environment plugin

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_check;
mod cmd_show;

use cmd_check::CmdCheck;
use cmd_show::CmdShow;

#[derive(Parser)]
#[clap(
    name = "autoenv",
    about = "Inspect and validate autoenv plugin configuration",
    version,
    long_about = "Validate plugin-mapping configuration and preview the \
                  requirement lists it yields, without touching the scheduler"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a plugin configuration file
    Check(CmdCheck),

    /// Show the requirements resolved for a plugin type
    Show(CmdShow),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .init();

        // Dispatch to command
        match self.cmd {
            Command::Check(mut cmd) => cmd.run(),
            Command::Show(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
