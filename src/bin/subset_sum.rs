// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batch driver: run one or more queries against a shared input set.
//!
//! Mirrors the library's configuration surface one flag per option and
//! adds the timing flags, which are a concern of this binary alone. Each
//! query value gets its own prepare/execute/teardown cycle so the reported
//! phase times are honest.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;
use subset_sum_search::{QueryConfig, QuerySession};

#[derive(Parser)]
#[command(
    name = "subset-sum",
    about = "Count and list the multisets of an input set summing to a query value"
)]
struct Cli {
    /// Input set values, comma separated
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    input: Vec<f64>,

    /// Target sums, comma separated; one run per value
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    query: Vec<f64>,

    /// Tolerance around the target (only 0 is supported)
    #[arg(long, default_value_t = 0.0)]
    epsilon: f64,

    /// Decimal places of precision for all sum comparisons
    #[arg(long, default_value_t = 5)]
    dp_precision: u32,

    /// Minimum multiset cardinality reported
    #[arg(long, default_value_t = 2)]
    k_min: usize,

    /// Maximum multiset cardinality reported; 0 means unbounded
    #[arg(long, default_value_t = 0)]
    k_max: usize,

    /// Search exactly this cardinality; 0 searches the whole range
    #[arg(long, default_value_t = 0)]
    k_fixed: usize,

    /// Zeroboard cardinality; 0 chooses automatically
    #[arg(long, default_value_t = 0)]
    k_zb: usize,

    /// Print details about each run
    #[arg(long)]
    print_details: bool,

    /// Print every multiset summing to the query value
    #[arg(long)]
    print_comb: bool,

    /// Print per-phase runtimes
    #[arg(long)]
    print_times: bool,

    /// Print only the total runtime, one line per query
    #[arg(long)]
    print_test_times: bool,
}

impl Cli {
    fn config(&self, query: f64) -> QueryConfig {
        let mut config = QueryConfig::new(query);
        config.epsilon = self.epsilon;
        config.dp_precision = self.dp_precision;
        config.k_min = self.k_min;
        config.k_max = self.k_max;
        config.k_fixed = self.k_fixed;
        config.k_zb = self.k_zb;
        config.print_details = self.print_details;
        config.print_comb = self.print_comb;
        config
    }
}

fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), subset_sum_search::Error> {
    for &query in &cli.query {
        if cli.print_details {
            writeln!(out, "\n *** Running Unbounded Subset Sum Algorithm: ***\n")?;
        }
        let config = cli.config(query);

        let start = Instant::now();
        let session = QuerySession::prepare(&cli.input, &config)?;
        let build_time = start.elapsed();

        let start = Instant::now();
        session.execute(out)?;
        let query_time = start.elapsed();

        let start = Instant::now();
        drop(session);
        let teardown_time = start.elapsed();

        let total = build_time + query_time + teardown_time;
        if cli.print_times {
            writeln!(out, "{:.6} seconds to create zeroboard", build_time.as_secs_f64())?;
            writeln!(out, "{:.6} seconds to query zeroboard", query_time.as_secs_f64())?;
            writeln!(
                out,
                "{:.6} seconds to free zeroboard memory",
                teardown_time.as_secs_f64()
            )?;
            writeln!(out, "{:.6} seconds total\n", total.as_secs_f64())?;
        }
        if cli.print_test_times {
            writeln!(out, "{:.6}", total.as_secs_f64())?;
        }
        if cli.print_details {
            writeln!(out, " *** End of Algorithm Run ***")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("subset-sum: {}", err);
            ExitCode::FAILURE
        }
    }
}
