//! 纯文本报告

use std::fmt::Write;

use super::{ComponentReport, Summary};

fn row(out: &mut String, name: &str, s: &Summary) {
    let _ = writeln!(
        out,
        "  {name:<18} mean={:>10.4} std={:>10.4} min={:>10.4} max={:>10.4}",
        s.mean, s.std_dev, s.min, s.max
    );
}

pub fn render(report: &ComponentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {} window=[{}, {}] events={}",
        report.kind, report.label, report.window_start, report.window_end, report.events
    );
    for c in &report.characteristics {
        let _ = writeln!(out, "  generator          {c}");
    }
    match &report.arrivals {
        Some(arrivals) => row(&mut out, "arrival interval", arrivals),
        None => {
            let _ = writeln!(out, "  arrival interval   n/a");
        }
    }
    match report.arrival_rate {
        Some(rate) => {
            let _ = writeln!(out, "  arrival rate       {rate:.4}");
        }
        None => {
            let _ = writeln!(out, "  arrival rate       n/a");
        }
    }
    if let Some(service) = &report.service {
        row(&mut out, "wait", &service.wait);
        row(&mut out, "processing", &service.processing);
        row(&mut out, "visit", &service.visit);
        let _ = writeln!(out, "  utilization        {:.4}", service.utilization);
    }
    if let Some(depth) = report.mean_queue_depth {
        let _ = writeln!(out, "  mean queue depth   {depth:.4}");
    }
    out
}
