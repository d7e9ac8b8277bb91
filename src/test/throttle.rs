use super::{approx, constant, rule, wildcard};
use crate::component::{Model, Network};
use crate::error::Error;
use crate::sim::{Event, Scheduler, SimTime};

fn gated(cooldown: f64) -> Network {
    let mut net = Network::default();
    net.add_source("src", constant(1.0), "gate");
    net.add_throttle("gate", vec![wildcard(cooldown, "sink")]);
    net.add_sink("sink");
    assert!(net.link(), "link errors: {:?}", net.errors());
    net
}

#[test]
fn throttle_spaces_events_by_cooldown_without_executing() {
    let mut sched = Scheduler::new(gated(1.3), SimTime(4.5)).expect("runnable");
    sched.run().expect("run");

    let gate = sched.network().get("gate").expect("gate");
    let arrived: Vec<f64> = gate.log().iter().map(|e| e.arrived.as_f64()).collect();
    assert_eq!(arrived, vec![1.0, 2.0, 3.0, 4.0]);

    let expected = [1.0, 2.3, 3.6, 4.9];
    for (e, want) in gate.log().iter().zip(expected) {
        assert!(approx(e.started.as_f64(), want), "started {:?}", e.started);
        assert_eq!(e.completed, e.started);
        assert_eq!(e.executed, SimTime::ZERO);
        assert_eq!(e.elapsed, e.started - e.arrived);
    }

    let Some(Model::Throttle(t)) = sched.network().get("gate").map(|c| c.model()) else {
        panic!("expected throttle");
    };
    assert!(approx(t.available().as_f64(), 6.2));
}

#[test]
fn throttle_records_in_flight_queue_depth() {
    let mut sched = Scheduler::new(gated(2.5), SimTime(4.5)).expect("runnable");
    sched.run().expect("run");

    let gate = sched.network().get("gate").expect("gate");
    let depths: Vec<u64> = gate.depths().iter().map(|(_, d)| *d).collect();
    // e4 到达时 e2 已经通过，只有 e3 仍在等待
    assert_eq!(depths, vec![0, 0, 1, 1]);
}

#[test]
fn throttle_routes_each_source_by_its_rule_and_falls_back_to_wildcard() {
    let mut net = Network::default();
    let fast = net.add_source("fast", constant(1.0), "gate");
    let slow = net.add_source("slow", constant(1.0), "gate");
    net.add_throttle(
        "gate",
        vec![rule("fast", 0.5, "left"), wildcard(3.0, "right")],
    );
    let left = net.add_sink("left");
    let right = net.add_sink("right");
    assert!(net.link(), "link errors: {:?}", net.errors());
    let gate = net.lookup("gate").expect("gate");

    let mut a = Event::new(fast, 1, SimTime(1.0));
    a.component = Some(gate);
    net.visit(gate, &mut a).expect("visit");
    assert_eq!(a.component, Some(left));
    assert_eq!(net.available(gate), SimTime(1.5));

    let mut b = Event::new(slow, 1, SimTime(1.0));
    b.component = Some(gate);
    net.visit(gate, &mut b).expect("visit");
    assert_eq!(b.component, Some(right));
    assert_eq!(b.started, SimTime(1.5));
    assert_eq!(net.available(gate), SimTime(4.5));
}

#[test]
fn throttle_without_matching_rule_reports_unresolved_reference() {
    let mut net = Network::default();
    net.add_source("a", constant(1.0), "gate");
    let b = net.add_source("b", constant(1.0), "gate");
    net.add_throttle("gate", vec![rule("a", 1.0, "sink")]);
    net.add_sink("sink");
    assert!(net.link());
    let gate = net.lookup("gate").expect("gate");

    let mut ev = Event::new(b, 1, SimTime(1.0));
    ev.component = Some(gate);
    let err = net.visit(gate, &mut ev).expect_err("no rule for b");
    assert!(matches!(err, Error::UnresolvedReference(_)));
}
