//! Command-line arguments and interactive prompts.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use heisdmrg::DmrgConfig;

#[derive(Debug, Parser)]
#[command(
    name = "heisdmrg",
    version,
    about = "Ground-state energy per site of the open spin-1/2 Heisenberg chain by DMRG"
)]
pub struct Cli {
    /// Number of block states to keep (m)
    pub states_to_keep: Option<usize>,
    /// Number of sites in the chain (even, at least 4)
    pub sites: Option<usize>,
    /// Number of finite-system half-sweeps
    pub sweeps: Option<usize>,
}

impl Cli {
    /// Fill in missing parameters by prompting on `output` and reading lines
    /// from `input`.
    pub fn resolve(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<DmrgConfig> {
        let states_to_keep = value_or_prompt(self.states_to_keep, "# states to keep: ", input, output)?;
        let sites = value_or_prompt(self.sites, "System size : ", input, output)?;
        let sweeps = value_or_prompt(self.sweeps, "FSA sweeps : ", input, output)?;
        Ok(DmrgConfig::new(states_to_keep, sites, sweeps))
    }
}

fn value_or_prompt(
    value: Option<usize>,
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<usize> {
    if let Some(value) = value {
        return Ok(value);
    }
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read from stdin")? == 0 {
        bail!("unexpected end of input while reading {:?}", prompt.trim());
    }
    line.trim()
        .parse()
        .with_context(|| format!("expected a non-negative integer, got {:?}", line.trim()))
}
