//! 排队网络仿真
//!
//! 读取 JSON 网络定义，回放到生成上限，输出采样窗口内各站点的统计。

use clap::Parser;
use queuesim_rs::component::Network;
use queuesim_rs::error::{Error, Result};
use queuesim_rs::monitor::{self, ComponentReport};
use queuesim_rs::sim::{NetworkSpec, Scheduler, SimTime};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "queuesim", about = "排队网络吞吐与时延仿真")]
struct Args {
    /// 网络定义文件（JSON）
    #[arg(long)]
    definition: PathBuf,
    /// 生成上限：不再产生到达时间不早于它的事件
    #[arg(long)]
    horizon: f64,
    /// 采样窗口起点
    #[arg(long)]
    window_start: f64,
    /// 采样窗口终点（需小于 horizon）
    #[arg(long)]
    window_end: f64,
    /// 覆盖定义文件中的种子
    #[arg(long)]
    seed: Option<u64>,
    /// 把全部报告以 JSON 数组写入该文件
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn run(args: &Args) -> Result<()> {
    let (start, end, horizon) = (
        SimTime(args.window_start),
        SimTime(args.window_end),
        SimTime(args.horizon),
    );
    // total_cmp 把 NaN 排在所有数之后，先排除非有限值
    let finite = [start, end, horizon].iter().all(|t| t.as_f64().is_finite());
    if !(finite && start < end && end < horizon) {
        return Err(Error::InvalidWindow {
            start,
            end,
            horizon,
        });
    }

    let mut spec = NetworkSpec::load(&args.definition)?;
    if let Some(seed) = args.seed {
        spec.seed = seed;
    }
    let net = Network::from_spec(&spec)?;

    let mut scheduler = Scheduler::new(net, horizon)?;
    let summary = scheduler.run()?;
    println!(
        "done @ {}, ticks={}, generated={}, completed={}, preemptions={}",
        summary.final_time, summary.ticks, summary.generated, summary.completed, summary.preemptions
    );

    let net = scheduler.network();
    let monitored = net.components().any(|c| c.is_monitored());
    let mut reports: Vec<ComponentReport> = Vec::new();
    for c in net.components().filter(|c| !monitored || c.is_monitored()) {
        match monitor::display_statistics(c, start, end) {
            Ok(report) => {
                print!("{}", monitor::render(&report));
                reports.push(report);
            }
            Err(Error::InsufficientSample(why)) => {
                warn!(component = %c.label(), "样本不足");
                println!("[{}] {}: insufficient sample ({why})", c.kind(), c.label());
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = &args.report_json {
        fs::write(path, serde_json::to_string_pretty(&reports)?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
