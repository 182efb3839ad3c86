use serde::{Deserialize, Serialize};

/// 可视化事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 运行参数（每次 start 的第一条事件）
    Meta {
        window_size: u32,
        total_packets: u32,
        timeout_ms: u64,
        loss_rate: u32,
        animation_speed_factor: f64,
        max_retries: u32,
        transit_ns: u64,
    },
    /// 新序号被准入并首发
    Send { attempt: u32, arrive_ns: u64 },
    /// 丢包后的重传
    Retransmit { attempt: u32, arrive_ns: u64 },
    /// 一次尝试丢失（在传输结束时刻判定）
    Lost { attempt: u32, retry_ns: u64 },
    /// 重试用尽
    Failed { attempts: u32, resolve_ns: u64 },
    /// 成功送达
    Delivered {
        attempt: u32,
        retried: bool,
        resolve_ns: u64,
    },
    /// 终态分组释放窗口槽位后的窗口快照
    Resolved {
        window: VizWindow,
        admitted: Option<u32>,
    },
    /// 全部序号进入终态
    Complete,
    /// 运行被重置；此后旧 epoch 的事件不再出现
    Reset,
}

/// 窗口快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizWindow {
    pub base_seq: u32,
    pub next_seq: u32,
    pub in_flight: Vec<u32>,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEvent {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    pub epoch: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u32>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}
