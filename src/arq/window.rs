//! 发送窗口（WindowController）
//!
//! 只维护序号游标与在途集合，不直接产生副作用：
//! `start` / `on_resolved` 返回本次新准入的序号，由 [`ArqWorld`](super::ArqWorld)
//! 负责通知观察者并启动对应分组的生命周期。
//!
//! 补位策略：任一在途分组进入终态就腾出一个槽位并准入下一个序号，
//! 不要求按序确认（更接近选择重传而非严格的回退 N）。

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::config::ArqConfig;

#[derive(Debug, Clone, Default)]
pub struct WindowController {
    window_size: u32,
    total_packets: u32,
    base_seq: u32,
    next_seq: u32,
    in_flight: BTreeSet<u32>,
}

impl WindowController {
    pub fn new(window_size: u32, total_packets: u32) -> Self {
        Self {
            window_size,
            total_packets,
            ..Self::default()
        }
    }

    /// 重置窗口状态并贪心准入，返回准入的序号（升序）
    pub fn start(&mut self, cfg: &ArqConfig) -> Vec<u32> {
        *self = Self::new(cfg.window_size, cfg.total_packets);
        let mut admitted = Vec::new();
        while let Some(seq) = self.admit_next() {
            admitted.push(seq);
        }
        debug!(?admitted, window_size = self.window_size, "窗口初始填充");
        admitted
    }

    /// 分组进入终态（送达或失败）：移出在途集合，若有空位且仍有未发序号则准入一个
    pub fn on_resolved(&mut self, seq: u32) -> Option<u32> {
        if !self.in_flight.remove(&seq) {
            warn!(seq, "分组不在窗口内，忽略确认");
            return None;
        }
        self.base_seq = self.in_flight.first().copied().unwrap_or(self.next_seq);
        let admitted = self.admit_next();
        debug!(
            seq,
            ?admitted,
            base_seq = self.base_seq,
            next_seq = self.next_seq,
            in_flight = self.in_flight.len(),
            "窗口滑动"
        );
        admitted
    }

    /// 窗口未满且仍有未发序号时准入 `next_seq`
    pub fn admit_next(&mut self) -> Option<u32> {
        if !self.has_room() || self.next_seq >= self.total_packets {
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq);
        Some(seq)
    }

    pub fn has_room(&self) -> bool {
        self.in_flight.len() < self.window_size as usize
    }

    /// 所有序号都已准入且全部进入终态
    pub fn is_complete(&self) -> bool {
        self.in_flight.is_empty() && self.next_seq == self.total_packets
    }

    pub fn contains(&self, seq: u32) -> bool {
        self.in_flight.contains(&seq)
    }

    /// 最小的未进入终态的序号；窗口为空时等于 `next_seq`
    pub fn base_seq(&self) -> u32 {
        self.base_seq
    }

    pub fn next_seq(&self) -> u32 {
        self.next_seq
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    pub fn total_packets(&self) -> u32 {
        self.total_packets
    }

    pub fn in_flight(&self) -> impl Iterator<Item = u32> + '_ {
        self.in_flight.iter().copied()
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }
}
