//! 可视化事件记录（用于离线回放 ARQ 动画）
//!
//! 设计目标：
//! - **结构化**：渲染层消费 JSON 事件，而不是解析状态文本
//! - **可回放**：每条事件带仿真时间与所属运行的 epoch，前端可按时间轴播放、单步

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger, VizWindow};
