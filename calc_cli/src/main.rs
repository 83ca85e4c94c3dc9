#![allow(unused_imports)]

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod nodes;

use std::collections::HashSet;
use std::sync::Arc;

use calc_common::{CalcResult, ConnectionPoint, NodePath, Rid, Scope, Snapshot};
use calc_engine::{AdhocOverride, AtomicNode, Engine, Group, Node};
use clap::Parser;
use tracing::info;

use args::Args;
use nodes::{ConstantProvider, MidPrice};

fn ask_rid() -> Rid {
    Rid::of_type("Ask")
}

fn bid_rid() -> Rid {
    Rid::of_type("Bid")
}

fn mid_rid() -> Rid {
    Rid::of_type("Mid")
}

/// Builds the demonstration graph: a group `/g` with an `AskProvider`, a
/// `BidProvider` and a `MidCalc` that averages them.
fn demo_graph(ask_value: f64, bid_value: f64) -> Node {
    let ask_provider = Node::Atomic(AtomicNode::new(
        "AskProvider",
        Arc::new(ConstantProvider {
            output: ask_rid(),
            value: ask_value,
        }),
    ));
    let bid_provider = Node::Atomic(AtomicNode::new(
        "BidProvider",
        Arc::new(ConstantProvider {
            output: bid_rid(),
            value: bid_value,
        }),
    ));
    let mid_calc = Node::Atomic(AtomicNode::new(
        "MidCalc",
        Arc::new(MidPrice {
            ask: ask_rid(),
            bid: bid_rid(),
            mid: mid_rid(),
        }),
    ));
    Node::Group(Group::new(
        "g",
        vec![ask_provider, bid_provider, mid_calc],
        HashSet::new(),
        Scope::all(),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let engine = Engine::build_default(demo_graph(args.ask, args.bid))?;

    let snapshot = match args.logical_snapshot {
        Some(logical) => Snapshot::at(Some(logical), None),
        None => Snapshot::now(),
    };

    let overrides = match args.override_ask {
        Some(value) => {
            info!(value, "overriding MidCalc's Ask input for this request");
            AdhocOverride::new().with_input(
                ConnectionPoint::new(NodePath::new("/g/MidCalc"), ask_rid()),
                CalcResult::Success(value.into()),
            )
        }
        None => AdhocOverride::new(),
    };

    let mut requested = HashSet::new();
    requested.insert(mid_rid());

    let result = engine.evaluate(snapshot, &NodePath::new("/g/MidCalc"), requested, overrides);

    println!("=== Results ===");
    for (rid, value) in &result.results {
        println!("{rid}: {value:?}");
    }

    println!("\n=== Trace ===");
    for (path, evaluation) in &result.node_evaluations {
        println!("{path}:");
        for (rid, input) in &evaluation.inputs {
            println!(
                "  input  {rid} = {:?} (source = {:?}, direct = {})",
                input.value, input.source_type, input.is_direct
            );
        }
        for (rid, output) in &evaluation.outputs {
            println!("  output {rid} = {:?}", output.value);
        }
    }

    Ok(())
}
