//! 滑动窗口 ARQ 仿真
//!
//! 在逻辑时钟上运行一次完整的发送过程，可选输出状态行与可视化 JSON。

use arqsim_rs::arq::{ArqConfig, ArqObserver, ArqSession, MAX_RETRIES, NoopObserver, RandomLoss};
use arqsim_rs::sim::SimTime;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "arq-sim", about = "滑动窗口 ARQ 仿真：随机丢包 + 超时重传 + 有限重试")]
struct Args {
    /// 窗口大小（同时在途的分组数）
    #[arg(long, default_value_t = 4)]
    window_size: u32,

    /// 丢包后重传 / 判定失败前的超时（毫秒）
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,

    /// 每次发送的丢包率（百分比）
    #[arg(long, default_value_t = 20)]
    loss_rate: u32,

    /// 要发送的分组总数
    #[arg(long, default_value_t = 10)]
    packets: u32,

    /// 动画速度（5 为正常速度，数值越大传输越快）
    #[arg(long, default_value_t = 5)]
    animation_speed: u32,

    /// 从 JSON 文件读取配置；命令行中的参数会被忽略
    #[arg(long)]
    config: Option<PathBuf>,

    /// 随机种子；不填则使用系统熵
    #[arg(long)]
    seed: Option<u64>,

    /// 仿真运行到多少毫秒；不填则运行到全部完成
    #[arg(long)]
    until_ms: Option<u64>,

    /// 打印每个分组的状态行
    #[arg(long, default_value_t = false)]
    status: bool,

    /// 输出可视化 JSON 事件文件；不填则不生成
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<ArqConfig, String> {
        if let Some(path) = &self.config {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("read config {}: {e}", path.display()))?;
            return ArqConfig::from_json_str(&raw).map_err(|e| format!("{}: {e}", path.display()));
        }
        Ok(ArqConfig {
            window_size: self.window_size,
            timeout_ms: self.timeout_ms,
            loss_rate: self.loss_rate,
            total_packets: self.packets,
            animation_speed_factor: ArqConfig::speed_factor_from_slider(self.animation_speed),
        })
    }
}

/// 仿照状态面板输出的逐行日志
struct StatusLines;

impl ArqObserver for StatusLines {
    fn on_send(&mut self, seq: u32) {
        println!("Packet F{seq}: sending");
    }

    fn on_lost(&mut self, seq: u32, attempt: u32) {
        println!("Packet F{seq} lost! (Attempt {attempt}/{})", MAX_RETRIES + 1);
    }

    fn on_failed(&mut self, seq: u32) {
        println!(
            "Packet F{seq} failed permanently after {} attempts",
            MAX_RETRIES + 1
        );
    }

    fn on_delivered(&mut self, seq: u32, attempt: u32) {
        if attempt > 1 {
            println!("Packet F{seq} received successfully (after {attempt} attempts)");
        } else {
            println!("Packet F{seq} received successfully");
        }
    }

    fn on_complete(&mut self) {
        println!("Simulation complete");
    }

    fn on_retransmit(&mut self, seq: u32, attempt: u32) {
        println!("Packet F{seq}: resending (Attempt {attempt}/{})", MAX_RETRIES + 1);
    }

    fn on_started(&mut self, _cfg: &ArqConfig) {
        println!("Simulation started");
    }

    fn on_reset(&mut self) {
        println!("Simulation reset");
    }
}

fn main() -> ExitCode {
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

    let cfg = match args.load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let loss = match args.seed {
        Some(seed) => RandomLoss::seeded(seed),
        None => RandomLoss::from_entropy(),
    };
    let observer: Box<dyn ArqObserver> = if args.status {
        Box::new(StatusLines)
    } else {
        Box::new(NoopObserver)
    };

    let mut session = ArqSession::new(Box::new(loss), observer);
    if args.viz_json.is_some() {
        session.enable_viz();
    }
    if let Err(e) = session.start(cfg) {
        eprintln!("error: invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    match args.until_ms {
        Some(ms) => session.advance(SimTime::from_millis(ms)),
        None => session.run(),
    }

    if let Some(path) = &args.viz_json {
        if let Some(v) = session.world_mut().viz.take() {
            let json = match v.to_json_pretty() {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("error: serialize viz events: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = fs::write(path, json) {
                eprintln!("error: write {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
            eprintln!("wrote viz events to {}", path.display());
        }
    }

    let w = session.world();
    let s = &w.stats;
    println!(
        "done @ {}ms\n  window: base_seq={}, next_seq={}, in_flight={}, complete={}\n  packets: sent={}, retransmitted={}, lost={}, delivered={}, delivered_after_retry={}, failed={}, peak_in_flight={}",
        session.now().as_millis(),
        w.window().base_seq(),
        w.window().next_seq(),
        w.window().in_flight_len(),
        session.is_complete(),
        s.sent,
        s.retransmitted,
        s.lost,
        s.delivered,
        s.delivered_after_retry,
        s.failed,
        s.peak_in_flight
    );
    ExitCode::SUCCESS
}
