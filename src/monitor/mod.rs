//! 统计与报告
//!
//! 把站点日志限制在采样窗口内（arrived >= start 且 completed <= end），计算：
//! - 所有站点：到达间隔统计与到达率
//! - 非 Source 站点：等待时间、处理时间、逗留时间、利用率，以及队列深度均值
//!
//! 利用率 = (观测跨度 - 空闲) / 观测跨度。观测跨度从窗口起点到窗口内最后一次完成；
//! 空闲累加 started - max(窗口起点, 上一次完成)。

mod render;
mod summary;

pub use render::render;
pub use summary::Summary;

use serde::Serialize;

use crate::component::{Component, ComponentKind};
use crate::error::{Error, Result};
use crate::sim::{Event, SimTime};

/// 非 Source 站点的服务统计
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub wait: Summary,
    pub processing: Summary,
    pub visit: Summary,
    pub utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub label: String,
    pub kind: ComponentKind,
    pub characteristics: Vec<String>,
    pub window_start: SimTime,
    pub window_end: SimTime,
    pub events: usize,
    /// 窗口内只有一个事件时没有到达间隔
    pub arrivals: Option<Summary>,
    /// 平均到达间隔为 0 时无定义
    pub arrival_rate: Option<f64>,
    pub service: Option<ServiceStats>,
    pub mean_queue_depth: Option<f64>,
}

fn summarize(label: &str, what: &str, samples: &[f64]) -> Result<Summary> {
    Summary::from_samples(samples)
        .ok_or_else(|| Error::InsufficientSample(format!("{label}: no {what} samples in window")))
}

/// 计算站点在 [start, end] 窗口内的统计
pub fn display_statistics(
    component: &Component,
    start: SimTime,
    end: SimTime,
) -> Result<ComponentReport> {
    if start >= end {
        return Err(Error::InvalidWindow {
            start,
            end,
            horizon: end,
        });
    }
    let label = component.label();
    let window: Vec<&Event> = component
        .log()
        .iter()
        .filter(|e| e.arrived >= start && e.completed <= end)
        .collect();
    if window.is_empty() {
        return Err(Error::InsufficientSample(format!(
            "{label}: no events in window"
        )));
    }

    let mut arrived: Vec<f64> = window.iter().map(|e| e.arrived.as_f64()).collect();
    arrived.sort_by(f64::total_cmp);
    let intervals: Vec<f64> = arrived.windows(2).map(|w| w[1] - w[0]).collect();
    let arrivals = Summary::from_samples(&intervals);
    let arrival_rate = arrivals
        .filter(|s| s.mean > 0.0)
        .map(|s| 1.0 / s.mean);

    let mut report = ComponentReport {
        label: label.to_string(),
        kind: component.kind(),
        characteristics: component.model().characteristics(),
        window_start: start,
        window_end: end,
        events: window.len(),
        arrivals,
        arrival_rate,
        service: None,
        mean_queue_depth: None,
    };
    if component.kind() == ComponentKind::Source {
        return Ok(report);
    }

    let wait: Vec<f64> = window.iter().map(|e| (e.started - e.arrived).as_f64()).collect();
    let processing: Vec<f64> = window.iter().map(|e| (e.completed - e.started).as_f64()).collect();
    let visit: Vec<f64> = window.iter().map(|e| (e.completed - e.arrived).as_f64()).collect();

    report.service = Some(ServiceStats {
        wait: summarize(label, "wait", &wait)?,
        processing: summarize(label, "processing", &processing)?,
        visit: summarize(label, "visit", &visit)?,
        utilization: utilization(label, &window, start)?,
    });

    let depths: Vec<f64> = component
        .depths()
        .iter()
        .filter(|(at, _)| *at >= start && *at <= end)
        .map(|(_, d)| *d as f64)
        .collect();
    report.mean_queue_depth = Summary::from_samples(&depths).map(|s| s.mean);
    Ok(report)
}

fn utilization(label: &str, window: &[&Event], start: SimTime) -> Result<f64> {
    let mut ordered: Vec<&Event> = window.to_vec();
    ordered.sort_by(|a, b| a.started.cmp(&b.started));

    let mut idle = 0.0;
    let mut previous = start;
    for e in &ordered {
        idle += e.started.saturating_sub(previous.max(start)).as_f64();
        previous = previous.max(e.completed);
    }
    let span = (previous - start).as_f64();
    if span <= 0.0 {
        return Err(Error::InsufficientSample(format!(
            "{label}: zero observation span"
        )));
    }
    Ok((span - idle) / span)
}
