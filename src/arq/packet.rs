//! 分组生命周期（PacketLifecycle）
//!
//! 每个逻辑分组一个状态机，状态为 InFlight / Lost / Delivered / Failed：
//! - 每次（重）发送都从 InFlight 开始，传输结束时掷一次 `r ∈ [0,100)`
//! - `r < loss_rate` 且尝试次数未用尽 → Lost，超时后重传（同一序号，attempt + 1）
//! - `r < loss_rate` 且已是最后一次尝试 → Failed（终态）
//! - 否则 → Delivered（终态）

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::MAX_RETRIES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketState {
    InFlight,
    Lost,
    Delivered,
    Failed,
}

impl PacketState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PacketState::Delivered | PacketState::Failed)
    }
}

/// 传输结束时的判定结果，只取决于尝试序号、随机数与丢包率
pub fn evaluate_outcome(attempt: u32, roll: u32, loss_rate: u32) -> PacketState {
    let dropped = roll < loss_rate;
    match (dropped, attempt < MAX_RETRIES) {
        (true, true) => PacketState::Lost,
        (true, false) => PacketState::Failed,
        (false, _) => PacketState::Delivered,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub seq: u32,
    /// 已进行的重传次数；首发为 0
    pub attempt: u32,
    pub state: PacketState,
}

impl Packet {
    /// 新准入的分组，立即处于首发的 InFlight
    pub fn new(seq: u32) -> Self {
        Self {
            seq,
            attempt: 0,
            state: PacketState::InFlight,
        }
    }

    /// 面向观察者的尝试编号（从 1 开始）
    pub fn attempt_number(&self) -> u32 {
        self.attempt + 1
    }

    pub fn needed_retries(&self) -> bool {
        self.attempt > 0
    }

    /// 传输结束：InFlight → Lost / Delivered / Failed
    pub fn arrive(&mut self, roll: u32, loss_rate: u32) -> Option<PacketState> {
        if self.state != PacketState::InFlight {
            warn!(seq = self.seq, state = ?self.state, "分组不在传输中，忽略到达");
            return None;
        }
        self.state = evaluate_outcome(self.attempt, roll, loss_rate);
        Some(self.state)
    }

    /// 重传超时：Lost → InFlight，尝试次数加一
    pub fn retransmit(&mut self) -> bool {
        if self.state != PacketState::Lost {
            warn!(seq = self.seq, state = ?self.state, "分组未丢失，忽略重传");
            return false;
        }
        self.attempt += 1;
        self.state = PacketState::InFlight;
        true
    }
}
