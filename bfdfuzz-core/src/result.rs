//! Run bookkeeping and the final verdict

use std::fmt;

/// What happened when one scenario's packets were transmitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Variant labels, in send order
    pub labels: Vec<String>,
    /// Packets handed to the transport successfully
    pub packets_sent: u64,
    /// Packets the transport refused
    pub packets_failed: u64,
    /// Payload bytes sent
    pub bytes_sent: u64,
    /// First send error, if any
    pub first_error: Option<String>,
}

impl ScenarioOutcome {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn record_sent(&mut self, bytes: usize) {
        self.packets_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub fn record_failure<S: Into<String>>(&mut self, error: S) {
        self.packets_failed += 1;
        if self.first_error.is_none() {
            self.first_error = Some(error.into());
        }
    }

    /// True when every variant reached the network
    pub fn is_success(&self) -> bool {
        self.packets_failed == 0
    }
}

/// Aggregated result of one harness run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Scenarios executed
    pub scenarios_attempted: u64,
    /// Scenarios whose packets were all sent
    pub scenarios_sent: u64,
    /// Scenarios with at least one failed send
    pub scenarios_failed: u64,
    /// Total packets sent
    pub packets_sent: u64,
    /// Total packets that failed to send
    pub packets_failed: u64,
    /// Total payload bytes sent
    pub bytes_sent: u64,
    /// Oracle determination; false until the oracle reports
    pub target_alive: bool,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scenario outcome into the totals
    pub fn record(&mut self, outcome: &ScenarioOutcome) {
        self.scenarios_attempted += 1;
        if outcome.is_success() {
            self.scenarios_sent += 1;
        } else {
            self.scenarios_failed += 1;
        }
        self.packets_sent += outcome.packets_sent;
        self.packets_failed += outcome.packets_failed;
        self.bytes_sent += outcome.bytes_sent;
    }

    /// Reduce the run to its verdict. Target failure takes precedence.
    pub fn verdict(&self) -> Verdict {
        if !self.target_alive {
            Verdict::TargetFailure
        } else if self.scenarios_failed > 0 {
            Verdict::InfrastructureFailure
        } else {
            Verdict::Pass
        }
    }
}

/// The three mutually exclusive run verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Every packet sent and the target is still reachable
    Pass,
    /// The oracle found the target unreachable
    TargetFailure,
    /// Target reachable, but some scenarios failed to transmit
    InfrastructureFailure,
}

impl Verdict {
    /// Process exit code for this verdict
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Pass => 0,
            Verdict::TargetFailure => 1,
            Verdict::InfrastructureFailure => 2,
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Pass => "pass",
            Verdict::TargetFailure => "target failure",
            Verdict::InfrastructureFailure => "infrastructure failure",
        };
        write!(f, "{}", s)
    }
}
