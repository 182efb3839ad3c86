//! 仿真核心模块
//!
//! 单线程离散事件内核：仿真时间、事件、世界和仿真器。
//! ARQ 协议的所有延迟（传输、超时重传、淡出）都挂在这个事件队列上。

// 子模块声明
mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
