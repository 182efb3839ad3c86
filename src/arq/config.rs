//! ARQ 仿真配置
//!
//! 一次运行期间配置不可变；`ArqSession::start` 之前必须通过 [`ArqConfig::validate`]。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::SimTime;

/// 每个分组最多重传次数（含首发共 `MAX_RETRIES + 1` 次尝试）
pub const MAX_RETRIES: u32 = 3;

/// 速度倍率为 1.0 时分组从发送端走到接收端的时长：
/// 每帧推进 0.005，共 200 帧，按 60fps 计约 3.33s。
pub const BASE_TRANSIT: SimTime = SimTime(3_333_333_333);

/// 成功送达后淡出的时长，结束后才释放窗口槽位
pub const SETTLE_DELAY: SimTime = SimTime::from_millis(500);

/// 动画速度滑块的中位值，对应倍率 1.0
pub const SPEED_SLIDER_UNIT: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window size must be at least 1")]
    ZeroWindow,
    #[error("total packets must be at least 1")]
    ZeroPackets,
    #[error("loss rate {0}% is outside 0..=100")]
    LossRateOutOfRange(u32),
    #[error("animation speed factor {0} must be a positive finite number")]
    InvalidSpeedFactor(f64),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArqConfig {
    /// 窗口大小：同时在途（未确认）的分组上限
    pub window_size: u32,
    /// 丢包后重传 / 判定永久失败前的等待时长（毫秒）
    pub timeout_ms: u64,
    /// 每次发送尝试的独立丢包概率（百分比）
    pub loss_rate: u32,
    /// 要发送的分组总数，序号为 0..total_packets
    pub total_packets: u32,
    /// 传输时长的倍率，越大越快
    pub animation_speed_factor: f64,
}

impl Default for ArqConfig {
    fn default() -> Self {
        Self {
            window_size: 4,
            timeout_ms: 2_000,
            loss_rate: 20,
            total_packets: 10,
            animation_speed_factor: 1.0,
        }
    }
}

impl ArqConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.total_packets == 0 {
            return Err(ConfigError::ZeroPackets);
        }
        if self.loss_rate > 100 {
            return Err(ConfigError::LossRateOutOfRange(self.loss_rate));
        }
        let f = self.animation_speed_factor;
        if !f.is_finite() || f <= 0.0 {
            return Err(ConfigError::InvalidSpeedFactor(f));
        }
        Ok(())
    }

    /// 解析 JSON 配置（缺省字段取默认值）并校验
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ArqConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 由滑块值（1..=10，默认 5）换算速度倍率
    pub fn speed_factor_from_slider(speed: u32) -> f64 {
        speed as f64 / SPEED_SLIDER_UNIT as f64
    }

    pub fn timeout(&self) -> SimTime {
        SimTime::from_millis(self.timeout_ms)
    }

    /// 单次发送尝试的传输时长
    pub fn transit(&self) -> SimTime {
        BASE_TRANSIT.div_f64(self.animation_speed_factor)
    }
}
