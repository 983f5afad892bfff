//! Sequential run controller
//!
//! Runs the selected scenarios one after another, waits for the target to
//! drain its backlog, then asks the liveness oracle once.

use crate::reporter::Reporter;
use bfdfuzz_core::{
    FuzzPacket, RunResult, ScenarioContext, ScenarioDescriptor, ScenarioOutcome, Verdict,
    DEFAULT_SEED,
};
use bfdfuzz_packet::GTSM_TTL;
use bfdfuzz_transport::{Liveness, LivenessOracle, Transport, DEFAULT_PROBE_TIMEOUT};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Default wait between the last fuzz packet and the liveness probe
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(2);

/// Run timing and randomness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub settle: Duration,
    pub probe_timeout: Duration,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            seed: DEFAULT_SEED,
        }
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub result: RunResult,
    pub outcomes: Vec<ScenarioOutcome>,
    pub liveness: Liveness,
}

impl RunReport {
    pub fn verdict(&self) -> Verdict {
        self.result.verdict()
    }
}

pub struct RunController {
    transport: Box<dyn Transport>,
    config: RunConfig,
    scenarios: Vec<&'static ScenarioDescriptor>,
    oracle: LivenessOracle,
}

impl RunController {
    /// Controller over the full catalog
    pub fn new(transport: Box<dyn Transport>, config: RunConfig) -> Self {
        Self {
            transport,
            oracle: LivenessOracle::new(config.probe_timeout),
            config,
            scenarios: bfdfuzz_scenarios::all(),
        }
    }

    /// Restrict the run to `scenarios`, executed in the given order
    pub fn with_scenarios(mut self, scenarios: Vec<&'static ScenarioDescriptor>) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn scenarios(&self) -> &[&'static ScenarioDescriptor] {
        &self.scenarios
    }

    /// Execute every scenario, settle, probe, and reduce to a report.
    ///
    /// Send failures are recorded, never returned. A console that stops
    /// accepting output is logged and ignored so the liveness check still
    /// runs.
    pub async fn run<W: Write>(&self, reporter: &mut Reporter<W>) -> RunReport {
        let run_id = Uuid::now_v7();
        let span = info_span!("run", run_id = %run_id, transport = self.transport.name());

        async move {
            info!(
                scenarios = self.scenarios.len(),
                seed = self.config.seed,
                "starting fuzz run"
            );

            let mut ctx = ScenarioContext::new(self.config.seed);
            let mut result = RunResult::new();
            let mut outcomes = Vec::with_capacity(self.scenarios.len());

            for desc in &self.scenarios {
                let outcome = self.run_scenario(desc, &mut ctx).await;
                console(reporter.scenario(&outcome));
                result.record(&outcome);
                outcomes.push(outcome);
            }

            console(reporter.settling(self.config.settle));
            tokio::time::sleep(self.config.settle).await;

            console(reporter.checking_liveness());
            let liveness = self.oracle.check(self.transport.as_ref()).await;
            result.target_alive = liveness.is_alive();

            let report = RunReport {
                run_id,
                result,
                outcomes,
                liveness,
            };
            console(reporter.summary(&report));

            info!(
                verdict = %report.verdict(),
                exit_code = report.verdict().exit_code(),
                "fuzz run complete"
            );
            report
        }
        .instrument(span)
        .await
    }

    async fn run_scenario(
        &self,
        desc: &ScenarioDescriptor,
        ctx: &mut ScenarioContext,
    ) -> ScenarioOutcome {
        let packets = desc.packets(ctx);
        info!(
            scenario = %desc.name,
            rule = %desc.rfc_rule,
            variants = packets.len(),
            "running scenario"
        );

        let mut outcome = ScenarioOutcome::new(desc.name);
        for packet in packets {
            self.send_packet(desc.name, &packet, &mut outcome).await;
            outcome.labels.push(packet.label);
        }

        info!(
            scenario = %desc.name,
            sent = outcome.packets_sent,
            failed = outcome.packets_failed,
            "scenario finished"
        );
        outcome
    }

    async fn send_packet(
        &self,
        scenario: &str,
        packet: &FuzzPacket,
        outcome: &mut ScenarioOutcome,
    ) {
        let ttl = packet.ttl.unwrap_or(GTSM_TTL);

        match self.transport.send(&packet.bytes, ttl).await {
            Ok(bytes) => {
                debug!(
                    scenario = %scenario,
                    label = %packet.label,
                    size = packet.bytes.len(),
                    ttl,
                    "sent"
                );
                outcome.record_sent(bytes);
            }
            Err(e) => {
                warn!(
                    scenario = %scenario,
                    label = %packet.label,
                    size = packet.bytes.len(),
                    ttl,
                    error = %e,
                    "send failed"
                );
                outcome.record_failure(format!("{}: {}", packet.label, e));
            }
        }
    }
}

/// Report write failures never decide the verdict
fn console(written: io::Result<()>) {
    if let Err(e) = written {
        warn!(error = %e, "console report write failed");
    }
}
