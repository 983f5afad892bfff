//! CLI argument parsing
//!
//! Every run option can also come from the environment so the harness can be
//! dropped into a container next to the target without a wrapper script.

use bfdfuzz_core::DEFAULT_SEED;
use bfdfuzz_runner::RunConfig;
use bfdfuzz_transport::{TransportConfig, TransportKind};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "bfdfuzz")]
#[command(
    version,
    about = "BFD protocol-conformance fuzzer (RFC 5880 / RFC 5881)",
    long_about = None
)]
pub struct Cli {
    /// Target BFD speaker
    #[arg(short = 't', long, env = "BFD_TARGET_IP", default_value = "172.20.0.10")]
    pub target: IpAddr,

    /// Destination UDP port
    #[arg(short = 'p', long, env = "BFD_TARGET_PORT", default_value_t = 3784)]
    pub port: u16,

    /// Source UDP port of fuzz datagrams (0 = ephemeral)
    #[arg(long, default_value_t = 49152)]
    pub source_port: u16,

    /// Transport backend: udp or raw (needs CAP_NET_RAW)
    #[arg(long, default_value = "udp")]
    pub transport: TransportKind,

    /// Delay before the liveness probe, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub settle_ms: u64,

    /// Liveness probe receive timeout, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub probe_timeout_ms: u64,

    /// Seed for randomized scenarios
    #[arg(long, env = "BFD_FUZZ_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Run only the named scenario (repeatable)
    #[arg(short = 's', long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// Skip the named scenario (repeatable)
    #[arg(long = "skip", value_name = "NAME")]
    pub skip: Vec<String>,

    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List fuzz scenarios and exit
    List,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            settle: Duration::from_millis(self.settle_ms),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            seed: self.seed,
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.target)
            .with_dst_port(self.port)
            .with_src_port(self.source_port)
    }

    /// Log filter used when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["bfdfuzz"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_values() {
        let cli = parse(&[
            "-t",
            "10.0.0.1",
            "-p",
            "4784",
            "--source-port",
            "0",
            "--transport",
            "raw",
            "--settle-ms",
            "0",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.target, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(cli.transport, TransportKind::Raw);

        let transport = cli.transport_config();
        assert_eq!(transport.dst_port, 4784);
        assert_eq!(transport.src_port, 0);

        let run = cli.run_config();
        assert_eq!(run.settle, Duration::ZERO);
        assert_eq!(run.probe_timeout, Duration::from_secs(2));
        assert_eq!(run.seed, 7);
    }

    #[test]
    fn test_scenario_selection_is_repeatable() {
        let cli = parse(&["-s", "wrong_ttl", "--scenario", "rapid_fire", "--skip", "x"]);
        assert_eq!(cli.scenarios, vec!["wrong_ttl", "rapid_fire"]);
        assert_eq!(cli.skip, vec!["x"]);
    }

    #[test]
    fn test_list_subcommand_and_verbosity() {
        let cli = parse(&["list"]);
        assert_eq!(cli.command, Some(Commands::List));
        assert_eq!(cli.log_level(), "warn");

        assert_eq!(parse(&["-vv"]).log_level(), "debug");
        assert_eq!(parse(&["-vvvv"]).log_level(), "trace");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["bfdfuzz", "--transport", "tcp"]).is_err());
        assert!(Cli::try_parse_from(["bfdfuzz", "-t", "not-an-ip"]).is_err());
        assert!(Cli::try_parse_from(["bfdfuzz", "-p", "70000"]).is_err());
    }
}
