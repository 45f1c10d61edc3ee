//! 轨迹转换器
//!
//! 读取按时间排序的车辆 GPS 轨迹，输出 MANET 仿真器可用的连接事件日志。

use clap::Parser;
use conntrace_rs::conn::{Engine, EngineConfig, FileSink, SweepPolicy};
use conntrace_rs::error::TraceError;
use conntrace_rs::stats::RunSummary;
use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "conntrace",
    about = "Process the datatrace input and create a connection trace"
)]
struct Args {
    /// The datatrace file
    datatrace: PathBuf,

    /// The theoretical transmission range in meters
    #[arg(long, default_value_t = 100.0)]
    range: f64,

    /// The output filename
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,

    /// Re-check policy for still-open links after each record: all, touching or off
    #[arg(long, default_value = "all")]
    sweep: String,

    /// Write a JSON run summary to this path
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Progress report interval in seconds (0 disables)
    #[arg(long, default_value_t = 60)]
    progress_secs: u64,
}

fn parse_sweep(raw: &str) -> SweepPolicy {
    match raw {
        "touching" => SweepPolicy::Touching,
        "off" => SweepPolicy::Off,
        _ => SweepPolicy::All,
    }
}

/// 进度报告：按墙钟间隔把已处理行数打到标准输出（非核心诊断）。
struct Progress {
    interval: Duration,
    last: Instant,
}

impl Progress {
    fn new(secs: u64) -> Option<Self> {
        if secs == 0 {
            return None;
        }
        Some(Self {
            interval: Duration::from_secs(secs),
            last: Instant::now(),
        })
    }

    fn tick(&mut self, lines: u64, open_links: usize) {
        if self.last.elapsed() >= self.interval {
            println!("{lines} lines processed, {open_links} links open");
            self.last = Instant::now();
        }
    }
}

fn run(args: &Args) -> Result<RunSummary, TraceError> {
    let input = File::open(&args.datatrace).expect("open datatrace");
    let reader = BufReader::new(input);

    let mut sink = FileSink::append_to(&args.output)?;
    let mut engine = Engine::new(EngineConfig {
        range_m: args.range,
        sweep: parse_sweep(&args.sweep),
    });
    let mut progress = Progress::new(args.progress_secs);

    for (idx, line) in reader.lines().enumerate() {
        let raw = line.expect("read datatrace line");
        if let Err(err) = engine.consume_line(&raw, &mut sink) {
            error!(line = idx + 1, %err, "记录处理失败");
            return Err(err);
        }
        if let Some(p) = &mut progress {
            p.tick(engine.stats().lines_read, engine.open_links());
        }
    }

    engine.finish(&mut sink)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    info!(
        datatrace = %args.datatrace.display(),
        range_m = args.range,
        output = %args.output.display(),
        sweep = %args.sweep,
        "▶️  开始处理轨迹"
    );

    let summary = match run(&args) {
        Ok(summary) => summary,
        Err(err) => {
            error!(%err, "❌ 转换中止");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        lines = summary.lines_read,
        nodes = summary.nodes_seen,
        up = summary.events_up,
        down = summary.events_down,
        clock_end = summary.clock_end_secs,
        "✅ 处理完成"
    );

    if let Some(path) = &args.stats_json {
        let json = serde_json::to_string_pretty(&summary).expect("serialize run summary");
        fs::write(path, json).expect("write stats json");
        eprintln!("wrote run summary to {}", path.display());
    }

    println!(
        "done @ {}s, lines={}, nodes={}, up={}, down={}",
        summary.clock_end_secs,
        summary.lines_read,
        summary.nodes_seen,
        summary.events_up,
        summary.events_down
    );
    ExitCode::SUCCESS
}
