use super::{approx, constant, wildcard};
use crate::component::Network;
use crate::error::Error;
use crate::monitor::{Summary, display_statistics, render};
use crate::sim::{Scheduler, SimTime};

fn finished_chain() -> Network {
    let mut net = Network::default();
    net.add_source("src", constant(1.0), "proc");
    net.add_processor("proc", constant(2.0), Some("sink"));
    net.add_sink("sink");
    assert!(net.link());
    let mut sched = Scheduler::new(net, SimTime(4.5)).expect("runnable");
    sched.run().expect("run");
    sched.into_network()
}

#[test]
fn processor_statistics_over_full_window() {
    let net = finished_chain();
    let proc = net.get("proc").expect("proc");
    let report = display_statistics(proc, SimTime(0.0), SimTime(10.0)).expect("report");

    assert_eq!(report.events, 4);
    let arrivals = report.arrivals.expect("arrival intervals");
    assert!(approx(arrivals.mean, 1.0));
    assert!(approx(arrivals.std_dev, 0.0));
    assert_eq!(report.arrival_rate, Some(1.0));

    let service = report.service.as_ref().expect("service stats");
    assert!(approx(service.wait.mean, 1.5));
    assert!(approx(service.wait.min, 0.0));
    assert!(approx(service.wait.max, 3.0));
    assert!(approx(service.processing.mean, 2.0));
    assert!(approx(service.visit.mean, 3.5));
    assert!(approx(service.utilization, 8.0 / 9.0));
    assert_eq!(report.characteristics, vec!["constant(2.0000)".to_string()]);

    let text = render(&report);
    assert!(text.starts_with("[processor] proc"));
    assert!(text.contains("utilization"));
}

#[test]
fn source_statistics_have_no_service_section() {
    let net = finished_chain();
    let report =
        display_statistics(net.get("src").expect("src"), SimTime(0.0), SimTime(10.0)).expect("report");
    assert!(report.service.is_none());
    assert!(report.mean_queue_depth.is_none());
    assert_eq!(report.arrival_rate, Some(1.0));
    assert!(!render(&report).contains("utilization"));
}

#[test]
fn window_filters_on_arrival_and_completion() {
    let net = finished_chain();
    let proc = net.get("proc").expect("proc");
    // 只有到达于 2、3 且在 7 之前完成的事件
    let report = display_statistics(proc, SimTime(2.0), SimTime(7.0)).expect("report");
    assert_eq!(report.events, 2);
    assert!(approx(report.arrivals.expect("arrival intervals").mean, 1.0));
}

#[test]
fn empty_window_is_insufficient() {
    let net = finished_chain();
    let proc = net.get("proc").expect("proc");
    let err = display_statistics(proc, SimTime(20.0), SimTime(30.0)).expect_err("empty");
    assert!(matches!(err, Error::InsufficientSample(_)));
}

#[test]
fn single_event_window_keeps_service_statistics() {
    let net = finished_chain();
    let proc = net.get("proc").expect("proc");
    let report = display_statistics(proc, SimTime(0.0), SimTime(3.5)).expect("report");

    assert_eq!(report.events, 1);
    assert!(report.arrivals.is_none());
    assert!(report.arrival_rate.is_none());
    let service = report.service.as_ref().expect("service stats");
    assert!(approx(service.wait.mean, 0.0));
    assert!(approx(service.processing.mean, 2.0));
    assert!(approx(service.utilization, 2.0 / 3.0));
    assert!(render(&report).contains("arrival interval   n/a"));
}

#[test]
fn inverted_window_is_rejected() {
    let net = finished_chain();
    let proc = net.get("proc").expect("proc");
    let err = display_statistics(proc, SimTime(5.0), SimTime(5.0)).expect_err("start == end");
    assert!(matches!(err, Error::InvalidWindow { .. }));
}

#[test]
fn throttle_reports_mean_queue_depth() {
    let mut net = Network::default();
    net.add_source("src", constant(1.0), "gate");
    net.add_throttle("gate", vec![wildcard(2.5, "sink")]);
    net.add_sink("sink");
    assert!(net.link());
    let mut sched = Scheduler::new(net, SimTime(4.5)).expect("runnable");
    sched.run().expect("run");

    let gate = sched.network().get("gate").expect("gate");
    let report = display_statistics(gate, SimTime(0.0), SimTime(20.0)).expect("report");
    assert_eq!(report.mean_queue_depth, Some(0.5));
    let service = report.service.expect("service stats");
    assert!(approx(service.processing.mean, 0.0));
}

#[test]
fn summary_uses_population_deviation() {
    let s = Summary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).expect("summary");
    assert_eq!(s.count, 8);
    assert!(approx(s.mean, 5.0));
    assert!(approx(s.std_dev, 2.0));
    assert_eq!((s.min, s.max), (2.0, 9.0));
    assert!(Summary::from_samples(&[]).is_none());
}
