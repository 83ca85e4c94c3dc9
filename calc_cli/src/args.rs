//! CLI argument parsing for the demonstration graph.

use clap::Parser;

/// Evaluate a tiny ask/bid/mid calculation graph.
#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The ask provider's fixed value.
    #[arg(long, default_value_t = 100.0)]
    pub ask: f64,

    /// The bid provider's fixed value.
    #[arg(long, default_value_t = 102.0)]
    pub bid: f64,

    /// If set, overrides the mid calculator's ask input for this request
    /// only, bypassing the ask provider entirely.
    #[arg(long)]
    pub override_ask: Option<f64>,

    /// Pin the evaluation to an explicit logical timestamp instead of "now".
    #[arg(long)]
    pub logical_snapshot: Option<i64>,
}
