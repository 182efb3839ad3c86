//! 丢包随机源
//!
//! 判定逻辑只消费一个 `[0,100)` 的整数，测试可注入脚本化的序列来强制结果。

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait LossSource {
    /// 返回 `[0,100)` 内的均匀随机整数；`roll < loss_rate` 即判定为丢包
    fn roll(&mut self) -> u32;
}

/// 基于 `StdRng` 的随机源；同一 seed 的运行结果可复现
#[derive(Debug, Clone)]
pub struct RandomLoss {
    rng: StdRng,
}

impl RandomLoss {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl LossSource for RandomLoss {
    fn roll(&mut self) -> u32 {
        self.rng.random_range(0..100)
    }
}

/// 按顺序吐出预设值，耗尽后一直返回 `fallback`
#[derive(Debug, Clone, Default)]
pub struct ScriptedLoss {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedLoss {
    pub fn new(rolls: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: fallback.min(99),
        }
    }

    /// 永远不丢（除非 loss_rate 为 100）
    pub fn never() -> Self {
        Self::new([], 99)
    }

    /// 只要 loss_rate > 0 就丢
    pub fn always() -> Self {
        Self::new([], 0)
    }
}

impl LossSource for ScriptedLoss {
    fn roll(&mut self) -> u32 {
        self.rolls.pop_front().map_or(self.fallback, |r| r.min(99))
    }
}
