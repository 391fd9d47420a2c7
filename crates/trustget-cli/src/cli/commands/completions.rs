//! `trustget completions` / `trustget man` – generated shell and roff output.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

use crate::cli::{exit, Cli};

pub fn run_completions(shell: Shell) -> Result<i32> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "trustget", &mut io::stdout());
    Ok(exit::OK)
}

pub fn run_man() -> Result<i32> {
    clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
    Ok(exit::OK)
}
