use super::constant;
use crate::component::{ComponentId, Model, Network};
use crate::distributor::{self, Distributor, Policy, Random, RoundRobin, Smart};
use crate::sim::{Event, SimTime};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn bind_all(d: &mut dyn Distributor, names: &[&str]) {
    for (i, name) in names.iter().enumerate() {
        assert!(d.add_next(name, ComponentId(i)));
    }
}

#[test]
fn round_robin_cycles_in_declared_order_and_resets() {
    let net = Network::default();
    let mut rr = RoundRobin::new(labels(&["a", "b"]));
    bind_all(&mut rr, &["a", "b"]);

    // 预览不推进游标
    assert_eq!(rr.peek_index(&net), Some(0));
    assert_eq!(rr.peek_index(&net), Some(0));

    let picks: Vec<usize> = (0..4).filter_map(|_| rr.select_index(&net)).collect();
    assert_eq!(picks, vec![0, 1, 0, 1]);

    rr.select_index(&net);
    rr.reset();
    assert_eq!(rr.select_index(&net), Some(0));
}

#[test]
fn round_robin_assign_binds_component() {
    let net = Network::default();
    let mut rr = RoundRobin::new(labels(&["a", "b"]));
    bind_all(&mut rr, &["a", "b"]);

    let mut ev = Event::new(ComponentId(9), 1, SimTime::ZERO);
    rr.assign(&mut ev, &net).expect("assign");
    assert_eq!(ev.component, Some(ComponentId(0)));
    rr.assign(&mut ev, &net).expect("assign");
    assert_eq!(ev.component, Some(ComponentId(1)));
}

#[test]
fn unbound_distributor_cannot_assign() {
    let net = Network::default();
    let rr = RoundRobin::new(labels(&["a"]));
    assert!(!rr.is_bound());
    let mut ev = Event::new(ComponentId(0), 1, SimTime::ZERO);
    assert!(rr.assign(&mut ev, &net).is_err());
    assert_eq!(ev.component, None);
}

#[test]
fn random_is_uniform_over_targets() {
    let net = Network::default();
    let names = ["a", "b", "c", "d"];
    let mut rnd = Random::new(labels(&names), 42);
    bind_all(&mut rnd, &names);

    const DRAWS: usize = 2_000_000;
    let mut counts = [0usize; 4];
    for _ in 0..DRAWS {
        let idx = rnd.select_index(&net).expect("index");
        counts[idx] += 1;
    }
    for c in counts {
        let freq = c as f64 / DRAWS as f64;
        assert!((freq - 0.25).abs() < 0.002, "freq {freq}");
    }
}

#[test]
fn random_assign_honours_previewed_choice() {
    let net = Network::default();
    let names = ["a", "b", "c", "d"];
    let mut rnd = Random::new(labels(&names), 7);
    bind_all(&mut rnd, &names);

    for _ in 0..100 {
        let previewed = rnd.peek(&net).expect("peek");
        // 重复预览不会重新抽样
        assert_eq!(rnd.peek(&net), Some(previewed));
        let mut ev = Event::new(ComponentId(99), 1, SimTime::ZERO);
        rnd.assign(&mut ev, &net).expect("assign");
        assert_eq!(ev.component, Some(previewed));
    }
}

#[test]
fn random_reset_replays_the_same_sequence() {
    let net = Network::default();
    let names = ["a", "b", "c"];
    let mut rnd = Random::new(labels(&names), 1234);
    bind_all(&mut rnd, &names);

    let first: Vec<usize> = (0..50).filter_map(|_| rnd.select_index(&net)).collect();
    rnd.peek_index(&net);
    rnd.reset();
    let second: Vec<usize> = (0..50).filter_map(|_| rnd.select_index(&net)).collect();
    assert_eq!(first, second);
}

/// bal(smart) -> a/b/c 三个处理器，服务时长 2.0/1.0/0.5
fn smart_net() -> Network {
    let mut net = Network::default();
    net.add_source("src", constant(1.0), "bal");
    net.add_balancer("bal", distributor::build(Policy::Smart, labels(&["a", "b", "c"]), 0));
    net.add_processor("a", constant(2.0), Some("sink"));
    net.add_processor("b", constant(1.0), Some("sink"));
    net.add_processor("c", constant(0.5), Some("sink"));
    net.add_sink("sink");
    assert!(net.link(), "link errors: {:?}", net.errors());
    net
}

fn occupy(net: &mut Network, label: &str) {
    let id = net.lookup(label).expect("label");
    let src = net.lookup("src").expect("src");
    let mut ev = Event::new(src, 1, SimTime::ZERO);
    ev.component = Some(id);
    net.visit(id, &mut ev).expect("visit");
}

fn smart(net: &Network) -> &dyn Distributor {
    match net.get("bal").map(|c| c.model()) {
        Some(Model::Balancer(b)) => b.distributor(),
        _ => panic!("expected balancer"),
    }
}

#[test]
fn smart_picks_earliest_available_and_keeps_preview() {
    let mut net = smart_net();
    for label in ["a", "b", "c"] {
        occupy(&mut net, label);
    }
    let c = net.lookup("c").expect("c");
    let b = net.lookup("b").expect("b");
    assert_eq!(net.available(c), SimTime(0.5));

    assert_eq!(smart(&net).peek(&net), Some(c));
    let bal = net.lookup("bal").expect("bal");
    assert_eq!(net.available(bal), SimTime(0.5));

    // c 变忙后，预览过的选择仍然有效
    occupy(&mut net, "c");
    assert_eq!(net.available(c), SimTime(1.0));
    assert_eq!(smart(&net).select_index(&net), Some(2));

    // b 与 c 都在 1.0 可用：取声明顺序靠前的 b
    assert_eq!(smart(&net).peek(&net), Some(b));
}

#[test]
fn smart_reset_drops_cached_preview() {
    let net = Network::default();
    let mut s = Smart::new(labels(&["x", "y"]));
    bind_all(&mut s, &["x", "y"]);
    // 空网络中两个句柄都不存在，可用时间都为 0，取第一个
    assert_eq!(s.peek_index(&net), Some(0));
    s.reset();
    assert_eq!(s.select_index(&net), Some(0));
    assert_eq!(s.policy(), Policy::Smart);
}
