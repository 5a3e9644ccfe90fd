//! `heisdmrg` - print DMRG energies per site of the Heisenberg chain.
//!
//! Usage: `heisdmrg [STATES_TO_KEEP] [SITES] [SWEEPS]`; missing values are
//! read from stdin.

mod cli;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use heisdmrg::Dmrg;
use heisdmrg::solver::LanczosSolver;
use heisdmrg::store::FileStore;
use log::info;

use crate::cli::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.resolve(&mut io::stdin().lock(), &mut io::stdout())?;
    config.validate().context("invalid run parameters")?;
    info!(
        "m = {}, L = {}, {} half-sweeps",
        config.states_to_keep, config.num_sites, config.half_sweeps
    );

    let scratch = tempfile::Builder::new()
        .prefix("heisdmrg-blocks-")
        .tempdir()
        .context("failed to create block directory")?;
    let store = FileStore::new(scratch.path())?;
    let mut dmrg = Dmrg::new(config, store, LanczosSolver::default())?;

    let mut stdout = io::stdout().lock();
    let mut write_error = None;
    dmrg.run_with(|measurement| {
        if write_error.is_none() {
            write_error = writeln!(stdout, "{measurement}").err();
        }
    })
    .context("DMRG run failed")?;

    if let Some(e) = write_error {
        return Err(e).context("failed to write results");
    }
    stdout.flush()?;
    Ok(())
}
