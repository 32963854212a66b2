//! `sgemm-bench`: checks the blocked kernel against `matrixmultiply` and
//! prints mean per-call latency for both.
//!
//! Report lines go to stdout; logs go to stderr and follow `RUST_LOG`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use sg_bench::{Harness, HarnessConfig};
use sg_kernel::Isa;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Blocked SGEMM verification and latency benchmark
#[derive(Debug, Parser)]
#[command(name = "sgemm-bench")]
#[command(about = "Cross-check the blocked SGEMM kernel against an oracle and report latency", long_about = None)]
struct Cli {
    /// Rows of A and C (multiple of 8)
    #[arg(short, long, default_value_t = 128)]
    m: usize,

    /// Columns of B and C (multiple of 8)
    #[arg(short, long, default_value_t = 256)]
    n: usize,

    /// Inner dimension (multiple of 8)
    #[arg(short, long, default_value_t = 1024)]
    k: usize,

    /// Outer repetitions, each printing one report per implementation
    #[arg(short, long, default_value_t = 10)]
    iterations: usize,

    /// Seed for the random inputs (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::default()
            .with_shape(self.m, self.n, self.k)
            .with_iterations(self.iterations);
        config.seed = self.seed;
        config
    }
}

/// Runs the harness described by `cli`, writing two report lines per
/// iteration to `out` as each iteration finishes.
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mut harness = Harness::new(cli.config()).context("failed to set up harness")?;
    let mut written = Ok(());
    harness
        .run(|report| {
            if written.is_ok() {
                written = writeln!(out, "{}", report.reference)
                    .and_then(|()| writeln!(out, "{}", report.candidate));
            }
        })
        .context("verification run aborted")?;
    written.context("failed to write report")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!(isa = Isa::detect().name(), "selected blocked kernel instruction set");

    run(&cli, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sgemm-bench"]).unwrap();
        assert_eq!(cli.config(), HarnessConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "sgemm-bench", "-m", "16", "-n", "24", "-k", "32", "-i", "3", "--seed", "9",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!((config.m, config.n, config.k), (16, 24, 32));
        assert_eq!(config.iterations, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.averaging_width, sg_bench::AVERAGING_WIDTH);
        assert_eq!(config.tolerance, sg_bench::ABS_TOLERANCE);
    }

    #[test]
    fn test_run_prints_two_lines_per_iteration() {
        let cli = Cli::try_parse_from([
            "sgemm-bench", "-m", "16", "-n", "8", "-k", "24", "-i", "3", "--seed", "1",
        ])
        .unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        for (i, line) in lines.iter().enumerate() {
            let fields: Vec<&str> = line.split(' ').collect();
            assert_eq!(fields.len(), 3, "unexpected report line {line:?}");
            let tag = if i % 2 == 0 { "[matrixmultiply]" } else { "[blocked]" };
            assert_eq!(fields[0], tag);
            let ms: f64 = fields[1].parse().unwrap();
            assert!(ms.is_finite() && ms >= 0.0);
            assert_eq!(fields[2], "[ms]");
        }
    }

    #[test]
    fn test_run_rejects_unaligned_shape() {
        let cli = Cli::try_parse_from(["sgemm-bench", "-m", "12", "-n", "8", "-k", "8"]).unwrap();
        let mut out = Vec::new();
        assert!(run(&cli, &mut out).is_err());
        assert!(out.is_empty());
    }
}
