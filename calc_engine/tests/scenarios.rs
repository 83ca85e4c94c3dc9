#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod fixtures;

use calc_common::{CalcResult, CalcValue, ConnectionPoint, Flywire, NodePath, Rid, Scope, Snapshot};
use calc_engine::{AdhocOverride, AtomicNode, Engine, EngineConfig, Group, Node, SourceType};
use fixtures::{setup_test_logging, FixedProvider, MidCalc, Passthrough};
use std::collections::HashSet;
use std::sync::Arc;

fn ask() -> Rid {
    Rid::of_type("Ask")
}

fn bid() -> Rid {
    Rid::of_type("Bid")
}

fn mid() -> Rid {
    Rid::of_type("Mid")
}

fn requested(rid: Rid) -> HashSet<Rid> {
    HashSet::from([rid])
}

#[test]
fn s1_direct_compute() {
    setup_test_logging();
    let provider = Arc::new(FixedProvider::new(ask(), 101.5));
    let root = Node::Atomic(AtomicNode::new("AskProvider", provider));
    let engine = Engine::build_default(root).expect("valid graph");

    let result = engine.evaluate(
        Snapshot::now(),
        &NodePath::new("/"),
        requested(ask()),
        AdhocOverride::new(),
    );

    assert_eq!(
        result.results.get(&ask()),
        Some(&CalcResult::Success(CalcValue::Number(101.5)))
    );
    let trace = result.node_evaluations.get(&NodePath::root()).expect("root traced");
    assert!(trace.inputs.is_empty());
    assert_eq!(trace.outputs.len(), 1);
}

fn s2_graph() -> Node {
    let ask_provider = Node::Atomic(AtomicNode::new(
        "AskProvider",
        Arc::new(FixedProvider::new(ask(), 100.0)),
    ));
    let bid_provider = Node::Atomic(AtomicNode::new(
        "BidProvider",
        Arc::new(FixedProvider::new(bid(), 102.0)),
    ));
    let mid_calc = Node::Atomic(AtomicNode::new(
        "MidCalc",
        Arc::new(MidCalc {
            ask: ask(),
            bid: bid(),
            mid: mid(),
        }),
    ));
    Node::Group(Group::new(
        "g",
        vec![ask_provider, bid_provider, mid_calc],
        HashSet::new(),
        Scope::all(),
    ))
}

#[test]
fn s2_sibling_dependency() {
    let root = Node::Group(Group::new("", vec![s2_graph()], HashSet::new(), Scope::all()));
    let engine = Engine::build_default(root).expect("valid graph");

    let result = engine.evaluate(
        Snapshot::now(),
        &NodePath::new("/g/MidCalc"),
        requested(mid()),
        AdhocOverride::new(),
    );

    assert_eq!(
        result.results.get(&mid()),
        Some(&CalcResult::Success(CalcValue::Number(101.0)))
    );
    let trace = result
        .node_evaluations
        .get(&NodePath::new("/g/MidCalc"))
        .expect("MidCalc traced");
    for rid in [ask(), bid()] {
        let input = trace.inputs.get(&rid).expect("input recorded");
        assert_eq!(input.source_type, SourceType::Sibling);
        assert!(input.is_direct);
    }
}

#[test]
fn s3_flywire_rewrite() {
    let group_a = Node::Group(Group::new(
        "a",
        vec![Node::Atomic(AtomicNode::new(
            "AskProvider",
            Arc::new(FixedProvider::new(ask(), 55.0)),
        ))],
        HashSet::new(),
        Scope::all(),
    ));
    let group_b = Node::Group(Group::new(
        "b",
        vec![Node::Atomic(AtomicNode::new(
            "Consumer",
            Arc::new(Passthrough {
                input: ask(),
                output: mid(),
            }),
        ))],
        HashSet::new(),
        Scope::all(),
    ));
    // The flywire crosses from /a's subtree into /b's, so it can only be
    // declared on their common ancestor: the root group.
    let flywire = Flywire::new(
        ConnectionPoint::new(NodePath::new("/a/AskProvider"), ask()),
        ConnectionPoint::new(NodePath::new("/b/Consumer"), ask()),
    )
    .expect("matching RID types");
    let root = Node::Group(Group::new(
        "",
        vec![group_a, group_b],
        HashSet::from([flywire]),
        Scope::all(),
    ));
    let engine = Engine::build_default(root).expect("valid graph");

    let result = engine.evaluate(
        Snapshot::now(),
        &NodePath::new("/b/Consumer"),
        requested(mid()),
        AdhocOverride::new(),
    );

    assert_eq!(
        result.results.get(&mid()),
        Some(&CalcResult::Success(CalcValue::Number(55.0)))
    );
    let trace = result
        .node_evaluations
        .get(&NodePath::new("/b/Consumer"))
        .expect("Consumer traced");
    let input = trace.inputs.get(&ask()).expect("Ask input recorded");
    assert_eq!(input.source_type, SourceType::Flywire);
    assert!(!input.is_direct);
}

#[test]
fn adhoc_input_override_is_honored_after_a_flywire_hop() {
    // Same shape as `s3_flywire_rewrite`, but this time an ad-hoc input
    // override targets the flywire's *source* endpoint directly. Resolution
    // restarts there after following the flywire, so the override must
    // still preempt `AskProvider` even though it was never registered
    // against the originally-requested connection point.
    let group_a = Node::Group(Group::new(
        "a",
        vec![Node::Atomic(AtomicNode::new(
            "AskProvider",
            Arc::new(FixedProvider::new(ask(), 55.0)),
        ))],
        HashSet::new(),
        Scope::all(),
    ));
    let group_b = Node::Group(Group::new(
        "b",
        vec![Node::Atomic(AtomicNode::new(
            "Consumer",
            Arc::new(Passthrough {
                input: ask(),
                output: mid(),
            }),
        ))],
        HashSet::new(),
        Scope::all(),
    ));
    let flywire = Flywire::new(
        ConnectionPoint::new(NodePath::new("/a/AskProvider"), ask()),
        ConnectionPoint::new(NodePath::new("/b/Consumer"), ask()),
    )
    .expect("matching RID types");
    let root = Node::Group(Group::new(
        "",
        vec![group_a, group_b],
        HashSet::from([flywire]),
        Scope::all(),
    ));
    let engine = Engine::build_default(root).expect("valid graph");

    let overrides = AdhocOverride::new().with_input(
        ConnectionPoint::new(NodePath::new("/a/AskProvider"), ask()),
        CalcResult::Success(CalcValue::Number(999.0)),
    );
    let result = engine.evaluate(
        Snapshot::now(),
        &NodePath::new("/b/Consumer"),
        requested(mid()),
        overrides,
    );

    assert_eq!(
        result.results.get(&mid()),
        Some(&CalcResult::Success(CalcValue::Number(999.0)))
    );
    let trace = result
        .node_evaluations
        .get(&NodePath::new("/b/Consumer"))
        .expect("Consumer traced");
    let input = trace.inputs.get(&ask()).expect("Ask input recorded");
    assert_eq!(input.source_type, SourceType::AdhocInput);
    assert!(input.is_direct);
    assert!(!result.node_evaluations.contains_key(&NodePath::new("/a/AskProvider")));
}

#[test]
fn s4_adhoc_input_override_skips_compute() {
    let root = Node::Group(Group::new("", vec![s2_graph()], HashSet::new(), Scope::all()));
    let engine = Engine::build_default(root).expect("valid graph");

    let overrides = AdhocOverride::new().with_input(
        ConnectionPoint::new(NodePath::new("/g/MidCalc"), ask()),
        CalcResult::Success(CalcValue::Number(100.0)),
    );
    let result = engine.evaluate(
        Snapshot::now(),
        &NodePath::new("/g/MidCalc"),
        requested(mid()),
        overrides,
    );

    assert_eq!(
        result.results.get(&mid()),
        Some(&CalcResult::Success(CalcValue::Number(101.0)))
    );
    let trace = result
        .node_evaluations
        .get(&NodePath::new("/g/MidCalc"))
        .expect("MidCalc traced");
    let ask_input = trace.inputs.get(&ask()).expect("Ask input recorded");
    assert_eq!(ask_input.source_type, SourceType::AdhocInput);
    assert!(ask_input.is_direct);

    // The AskProvider sibling should never have been touched: no trace
    // entry exists for it at all.
    assert!(!result.node_evaluations.contains_key(&NodePath::new("/g/AskProvider")));
}

#[test]
fn s5_cycle_is_detected_and_bounded() {
    let x = Rid::of_type("x");
    let y = Rid::of_type("y");
    let node_a = Node::Atomic(AtomicNode::new(
        "A",
        Arc::new(Passthrough {
            input: x.clone(),
            output: y.clone(),
        }),
    ));
    let node_b = Node::Atomic(AtomicNode::new(
        "B",
        Arc::new(Passthrough {
            input: y.clone(),
            output: x.clone(),
        }),
    ));
    let root = Node::Group(Group::new(
        "",
        vec![node_a, node_b],
        HashSet::new(),
        Scope::all(),
    ));
    let engine = Engine::build_default(root).expect("valid graph");

    let result = engine.evaluate(Snapshot::now(), &NodePath::new("/A"), requested(y.clone()), AdhocOverride::new());

    fn innermost(err: &calc_common::CalcError) -> &calc_common::CalcError {
        match err {
            calc_common::CalcError::UpstreamFailure { cause, .. } => innermost(cause),
            other => other,
        }
    }

    match result.results.get(&y) {
        Some(CalcResult::Failure(e)) => {
            assert!(matches!(innermost(e), calc_common::CalcError::CycleDetected(_)));
        }
        other => panic!("expected a cycle-rooted failure, got {other:?}"),
    }
}

#[test]
fn s6_unresolved_dependency_leaves_other_requests_intact() {
    let root = Node::Group(Group::new("", vec![s2_graph()], HashSet::new(), Scope::all()));
    let engine = Engine::build_default(root).expect("valid graph");

    let missing = Rid::of_type("NoSuchRid");
    let mut requested_rids = HashSet::new();
    requested_rids.insert(missing.clone());
    requested_rids.insert(ask());

    let result = engine.evaluate(
        Snapshot::now(),
        &NodePath::new("/g"),
        requested_rids,
        AdhocOverride::new(),
    );

    assert!(matches!(
        result.results.get(&missing),
        Some(CalcResult::Failure(calc_common::CalcError::UnresolvedDependency(_)))
    ));
    assert_eq!(
        result.results.get(&ask()),
        Some(&CalcResult::Success(CalcValue::Number(100.0)))
    );
}

#[test]
fn engine_config_caps_pathological_resolve_deps() {
    #[derive(Debug)]
    struct NeverStabilizes;
    impl calc_engine::Compute for NeverStabilizes {
        fn declared_inputs(&self) -> HashSet<Rid> {
            HashSet::new()
        }
        fn declared_outputs(&self) -> HashSet<Rid> {
            HashSet::from([mid()])
        }
        fn resolve_deps(
            &self,
            _snapshot: &Snapshot,
            already_resolved: &std::collections::HashMap<Rid, CalcResult<CalcValue>>,
        ) -> HashSet<Rid> {
            HashSet::from([Rid::new("never", vec![already_resolved.len().to_string()])])
        }
        fn compute(
            &self,
            _snapshot: &Snapshot,
            _inputs: &std::collections::HashMap<Rid, CalcResult<CalcValue>>,
        ) -> std::collections::HashMap<Rid, CalcResult<CalcValue>> {
            unreachable!("resolve_deps never stabilizes, compute must not run")
        }
    }

    let root = Node::Atomic(AtomicNode::new("Pathological", Arc::new(NeverStabilizes)));
    let engine = Engine::build(
        root,
        EngineConfig {
            max_resolve_iterations: 4,
        },
    )
    .expect("valid graph");

    let result = engine.evaluate(Snapshot::now(), &NodePath::root(), requested(mid()), AdhocOverride::new());
    assert!(matches!(
        result.results.get(&mid()),
        Some(CalcResult::Failure(calc_common::CalcError::ResolveDepsDidNotStabilize(4)))
    ));
}
