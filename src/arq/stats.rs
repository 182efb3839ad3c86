//! 统计信息

/// 单次运行的计数器；`reset`/`start` 时清零
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArqStats {
    /// 首发次数（等于被准入的序号数）
    pub sent: u64,
    pub retransmitted: u64,
    pub lost: u64,
    pub delivered: u64,
    /// 其中经过至少一次重传才送达的
    pub delivered_after_retry: u64,
    pub failed: u64,
    /// 运行期间在途分组数的峰值
    pub peak_in_flight: usize,
}

impl ArqStats {
    pub fn resolved(&self) -> u64 {
        self.delivered + self.failed
    }
}
