//! 外部渲染层的回调接口
//!
//! 核心只负责在状态迁移时通知，渲染/状态面板由实现方自行决定。

use super::config::ArqConfig;

/// 尝试编号均从 1 开始（首发为第 1 次）。
pub trait ArqObserver {
    /// 新序号被窗口准入，开始首发
    fn on_send(&mut self, seq: u32);
    /// 某次尝试丢失，超时后会重传
    fn on_lost(&mut self, seq: u32, attempt: u32);
    /// 重试用尽，分组永久失败
    fn on_failed(&mut self, seq: u32);
    /// 分组成功送达；`attempt > 1` 表示经过重传
    fn on_delivered(&mut self, seq: u32, attempt: u32);
    /// 所有序号都进入终态
    fn on_complete(&mut self);

    fn on_retransmit(&mut self, _seq: u32, _attempt: u32) {}
    fn on_started(&mut self, _cfg: &ArqConfig) {}
    fn on_reset(&mut self) {}
}

/// 什么都不做
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ArqObserver for NoopObserver {
    fn on_send(&mut self, _seq: u32) {}
    fn on_lost(&mut self, _seq: u32, _attempt: u32) {}
    fn on_failed(&mut self, _seq: u32) {}
    fn on_delivered(&mut self, _seq: u32, _attempt: u32) {}
    fn on_complete(&mut self) {}
}
