//! Human-readable console report
//!
//! Written to stdout by the binary. Log output goes through `tracing` to
//! stderr, so the two never interleave in a redirected report.

use crate::controller::RunReport;
use bfdfuzz_core::{ScenarioOutcome, Verdict};
use bfdfuzz_transport::Liveness;
use std::io::{self, Write};
use std::time::Duration;

/// Labels shown per scenario before eliding the rest
pub const MAX_LABELS_SHOWN: usize = 5;

const RULE_WIDTH: usize = 60;

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, target: &str, scenarios: usize) -> io::Result<()> {
        writeln!(self.out, "BFD fuzzer: targeting {}", target)?;
        writeln!(self.out, "Running {} test cases...", scenarios)?;
        writeln!(self.out)
    }

    pub fn scenario(&mut self, outcome: &ScenarioOutcome) -> io::Result<()> {
        if let Some(error) = &outcome.first_error {
            writeln!(
                self.out,
                "  FAIL  {}: {} ({} of {} sends failed)",
                outcome.name,
                error,
                outcome.packets_failed,
                outcome.packets_failed + outcome.packets_sent
            )?;
            return Ok(());
        }

        let shown: Vec<&str> = outcome
            .labels
            .iter()
            .take(MAX_LABELS_SHOWN)
            .map(String::as_str)
            .collect();
        writeln!(self.out, "  SENT  {}: {}", outcome.name, shown.join(", "))?;

        if outcome.labels.len() > MAX_LABELS_SHOWN {
            writeln!(
                self.out,
                "        ... and {} more",
                outcome.labels.len() - MAX_LABELS_SHOWN
            )?;
        }
        Ok(())
    }

    pub fn settling(&mut self, settle: Duration) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Waiting {:.1}s for the target to process packets...",
            settle.as_secs_f64()
        )
    }

    pub fn checking_liveness(&mut self) -> io::Result<()> {
        writeln!(self.out, "Checking target liveness...")?;
        self.out.flush()
    }

    pub fn summary(&mut self, report: &RunReport) -> io::Result<()> {
        let result = &report.result;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "Tests sent:  {}", result.scenarios_attempted)?;
        writeln!(self.out, "Send OK:     {}", result.scenarios_sent)?;
        writeln!(self.out, "Send FAIL:   {}", result.scenarios_failed)?;
        writeln!(
            self.out,
            "Packets:     {} sent, {} failed, {} bytes",
            result.packets_sent, result.packets_failed, result.bytes_sent
        )?;
        let alive = match &report.liveness {
            Liveness::Alive { responded: true } => "YES (responded)".to_string(),
            Liveness::Alive { responded: false } => "YES (no response)".to_string(),
            Liveness::Unreachable { reason } => format!("NO (CRASHED!) {}", reason),
        };
        writeln!(self.out, "Target alive: {}", alive)?;
        writeln!(self.out, "Run ID:      {}", report.run_id)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out)?;

        match report.verdict() {
            Verdict::TargetFailure => {
                writeln!(self.out, "FATAL: target crashed under fuzz input!")?;
            }
            Verdict::InfrastructureFailure => {
                writeln!(
                    self.out,
                    "WARNING: {} test(s) failed to send packets",
                    result.scenarios_failed
                )?;
            }
            Verdict::Pass => {
                writeln!(self.out, "All fuzz packets sent and the target survived.")?;
            }
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfdfuzz_core::RunResult;
    use uuid::Uuid;

    fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Reporter<Vec<u8>>) -> io::Result<()>,
    {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn outcome(name: &str, labels: usize) -> ScenarioOutcome {
        let mut outcome = ScenarioOutcome::new(name);
        for i in 0..labels {
            outcome.labels.push(format!("v{}", i));
            outcome.record_sent(24);
        }
        outcome
    }

    fn report(result: RunResult, liveness: Liveness) -> RunReport {
        RunReport {
            run_id: Uuid::nil(),
            result,
            outcomes: Vec::new(),
            liveness,
        }
    }

    #[test]
    fn test_sent_line_elides_after_five() {
        let text = output(|r| r.scenario(&outcome("invalid_version", 7)));
        assert_eq!(
            text,
            "  SENT  invalid_version: v0, v1, v2, v3, v4\n        ... and 2 more\n"
        );

        let text = output(|r| r.scenario(&outcome("multipoint_set", 1)));
        assert_eq!(text, "  SENT  multipoint_set: v0\n");
    }

    #[test]
    fn test_fail_line() {
        let mut failed = outcome("truncated_packet", 5);
        failed.labels.insert(0, "size=0".into());
        failed.record_failure("size=0: Send failed: refused");

        let text = output(|r| r.scenario(&failed));
        assert_eq!(
            text,
            "  FAIL  truncated_packet: size=0: Send failed: refused (1 of 6 sends failed)\n"
        );
    }

    #[test]
    fn test_summary_pass() {
        let result = RunResult {
            scenarios_attempted: 18,
            scenarios_sent: 18,
            packets_sent: 1055,
            target_alive: true,
            ..Default::default()
        };
        let text = output(|r| r.summary(&report(result, Liveness::Alive { responded: false })));

        assert!(text.contains("Tests sent:  18\n"));
        assert!(text.contains("Send FAIL:   0\n"));
        assert!(text.contains("Target alive: YES (no response)\n"));
        assert!(text.ends_with("All fuzz packets sent and the target survived.\n"));
    }

    #[test]
    fn test_summary_failures() {
        let result = RunResult {
            scenarios_attempted: 18,
            scenarios_sent: 17,
            scenarios_failed: 1,
            target_alive: true,
            ..Default::default()
        };
        let text = output(|r| r.summary(&report(result, Liveness::Alive { responded: true })));
        assert!(text.contains("WARNING: 1 test(s) failed to send packets"));

        let unreachable = Liveness::Unreachable {
            reason: "Connection refused".into(),
        };
        let text = output(|r| r.summary(&report(RunResult::default(), unreachable)));
        assert!(text.contains("Target alive: NO (CRASHED!) Connection refused\n"));
        assert!(text.contains("FATAL: target crashed under fuzz input!"));
    }

    #[test]
    fn test_settling_line() {
        let text = output(|r| r.settling(Duration::from_millis(2000)));
        assert_eq!(text, "\nWaiting 2.0s for the target to process packets...\n");
    }
}
