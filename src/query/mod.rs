// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The orchestrator: configuration intake, zeroboard lifecycle, and
//! invocation ordering.
//!
//! A query is a batch computation with no retries and no partial-failure
//! semantics: prepare (validate the configuration, preprocess the input,
//! build the board), execute (drive the search), and tear down (drop the
//! session). [`run_query`] does all three; [`QuerySession`] exposes the
//! prepare/execute split so callers can time or reuse the phases, which is
//! what the batch binary does.

use crate::atoms::AtomSet;
use crate::config::{ConfigError, QueryConfig, QueryPlan};
use crate::quantize::Quantizer;
use crate::report::QueryReport;
use crate::search::QueryDriver;
use crate::zeroboard::{BuildError, Zeroboard};
use std::fmt;
use std::io::{self, Write};

/// Everything that can go wrong across a query run.
#[derive(Debug)]
pub enum Error {
    /// Rejected configuration or input; nothing was computed.
    Config(ConfigError),

    /// The zeroboard could not be built (entry budget, precision).
    Build(BuildError),

    /// The output sink failed while emitting results.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "configuration error: {}", err),
            Error::Build(err) => write!(f, "zeroboard build error: {}", err),
            Error::Io(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Build(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Error::Build(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// A prepared query: validated atoms, resolved plan, built board.
///
/// The session owns the board exclusively; executing shares it immutably
/// with the driver, and dropping the session releases it.
#[derive(Debug)]
pub struct QuerySession {
    atoms: AtomSet,
    plan: QueryPlan,
    board: Zeroboard,
    print_details: bool,
    print_comb: bool,
}

impl QuerySession {
    /// Validate `config` against `input` and build the zeroboard.
    ///
    /// A nonzero epsilon is not an error; it produces a warning and exact
    /// matching is used (negative epsilon is still rejected).
    pub fn prepare(input: &[f64], config: &QueryConfig) -> Result<Self, Error> {
        let quant = Quantizer::new(config.dp_precision);
        let atoms = AtomSet::from_unsorted(input, &quant).map_err(ConfigError::from)?;
        let plan = QueryPlan::resolve(config, &atoms)?;

        if config.epsilon > 0.0 {
            eprintln!(
                "WARNING: epsilon {} is not supported; matching exactly at {} decimal places",
                config.epsilon,
                quant.dp()
            );
        }

        // Largest sum the driver will ever quantize.
        let reach = plan.query.max(plan.len_hi.max(plan.zb_len) as f64 * atoms.max());
        quant.ensure_exact(reach).map_err(BuildError::from)?;

        let board = Zeroboard::build(&atoms, plan.zb_len, quant)?;
        Ok(Self {
            atoms,
            plan,
            board,
            print_details: config.print_details,
            print_comb: config.print_comb,
        })
    }

    /// The validated atom set.
    pub fn atoms(&self) -> &AtomSet {
        &self.atoms
    }

    /// The resolved plan.
    pub fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    /// The built board.
    pub fn board(&self) -> &Zeroboard {
        &self.board
    }

    /// Drive the search and write any requested output to `out`.
    pub fn execute<W: Write + ?Sized>(&self, out: &mut W) -> Result<QueryReport, Error> {
        if self.print_details {
            writeln!(out, "Query value: {:.5}", self.plan.query)?;
            writeln!(out, "Zeroboard combination length: {}", self.plan.zb_len)?;
        }

        let driver = QueryDriver::new(&self.atoms, &self.board, &self.plan, self.print_comb);
        let report = driver.run(out)?;

        if self.print_details {
            report.write_details(out)?;
        }
        Ok(report)
    }
}

/// Prepare, execute, and tear down one query.
pub fn run_query<W: Write + ?Sized>(
    input: &[f64],
    config: &QueryConfig,
    out: &mut W,
) -> Result<QueryReport, Error> {
    let session = QuerySession::prepare(input, config)?;
    session.execute(out)
    // session drops here, releasing the board
}
