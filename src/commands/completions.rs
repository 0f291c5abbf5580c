//! Shell completions command

use clap::CommandFactory;

use npm_unwrap::error::Result;

use crate::cli::{Cli, CompletionsArgs};

/// Generate shell completions
pub fn run(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(
        args.shell,
        &mut cmd,
        "npm-unwrap",
        &mut std::io::stdout().lock(),
    );

    Ok(())
}
