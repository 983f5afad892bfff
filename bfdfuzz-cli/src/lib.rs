//! CLI interface for the BFD fuzz harness
//!
//! Argument parsing lives in [`args`]; [`execute`] wires the parsed options
//! to the transport and runner crates.

pub mod args;

pub use args::{Cli, Commands};

use bfdfuzz_core::{Result, ScenarioContext, Verdict};
use bfdfuzz_runner::{Reporter, RunController};
use std::io::{self, Write};
use tracing::{info, warn};

/// Print the scenario catalog: name, variant count, RFC rule and what the
/// scenario sends.
pub fn list_scenarios<W: Write>(out: &mut W, seed: u64) -> io::Result<()> {
    let mut ctx = ScenarioContext::new(seed);
    let width = bfdfuzz_scenarios::names()
        .iter()
        .map(|n| n.len())
        .max()
        .unwrap_or(0);

    for desc in bfdfuzz_scenarios::CATALOG.iter() {
        let variants = desc.packets(&mut ctx).len();
        writeln!(
            out,
            "{:>2}  {:<width$}  {:>4}  {}",
            desc.id.0,
            desc.name,
            variants,
            desc.rfc_rule,
            width = width
        )?;
        writeln!(out, "    {}", desc.description)?;
    }
    Ok(())
}

/// Select scenarios, open the transport and run to a verdict.
///
/// Any `Err` here happened before the run finished and maps to exit code 2.
pub async fn execute(cli: &Cli) -> Result<Verdict> {
    let scenarios = bfdfuzz_scenarios::select(&cli.scenarios, &cli.skip)?;
    let transport_config = cli.transport_config();
    let transport = bfdfuzz_transport::connect(cli.transport, &transport_config).await?;

    let controller = RunController::new(transport, cli.run_config()).with_scenarios(scenarios);
    let target_addr = transport_config.target_addr();

    info!(
        target_addr = %target_addr,
        transport = %cli.transport,
        scenarios = controller.scenarios().len(),
        "transport ready"
    );

    let mut reporter = Reporter::stdout();
    if let Err(e) = reporter.banner(&target_addr.to_string(), controller.scenarios().len()) {
        warn!(error = %e, "console report write failed");
    }

    let report = controller.run(&mut reporter).await;
    Ok(report.verdict())
}
