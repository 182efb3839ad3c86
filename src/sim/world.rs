//! 世界 trait
//!
//! 定义仿真世界接口。

use super::simulator::Simulator;
use std::any::Any;

/// 仿真世界：由业务层实现（例如一次 ARQ 运行的窗口/分组状态）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// 每执行完一个事件后回调，可用于检查不变量。
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
