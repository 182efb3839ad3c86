//! 滑动窗口 ARQ 协议核心
//!
//! - [`WindowController`]：窗口准入与补位
//! - [`Packet`]：单个分组的丢失 / 重传 / 失败 / 送达状态机
//! - [`ArqWorld`]：一次运行的全部状态（带 epoch）
//! - [`ArqSession`]：start / reset / pause / resume 与时钟驱动

mod config;
mod events;
mod loss;
mod observer;
mod packet;
mod session;
mod stats;
mod window;
mod world;
mod world_viz;

pub use config::{ArqConfig, BASE_TRANSIT, ConfigError, MAX_RETRIES, SETTLE_DELAY, SPEED_SLIDER_UNIT};
pub use events::{ResolvePacket, RetransmitTimeout, TransitDone};
pub use loss::{LossSource, RandomLoss, ScriptedLoss};
pub use observer::{ArqObserver, NoopObserver};
pub use packet::{Packet, PacketState, evaluate_outcome};
pub use session::ArqSession;
pub use stats::ArqStats;
pub use window::WindowController;
pub use world::ArqWorld;
