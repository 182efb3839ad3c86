//! ARQ 的延迟事件
//!
//! 每个事件在调度时捕获所属运行的 `epoch`；执行时若世界已被重置（epoch 不同），
//! 事件直接作废，不触碰任何状态。

use tracing::{trace, warn};

use super::world::ArqWorld;
use crate::sim::{Event, Simulator, World};

/// 取出当前 epoch 的 ArqWorld；世界类型不符或 epoch 过期时返回 `None`
fn current_world<'a>(
    world: &'a mut dyn World,
    epoch: u64,
    what: &'static str,
) -> Option<&'a mut ArqWorld> {
    let Some(w) = world.as_any_mut().downcast_mut::<ArqWorld>() else {
        warn!(what, "world must be ArqWorld");
        return None;
    };
    if !w.is_current(epoch) {
        trace!(what, stale_epoch = epoch, current_epoch = w.epoch(), "丢弃过期事件");
        return None;
    }
    Some(w)
}

/// 一次发送尝试的传输结束
#[derive(Debug)]
pub struct TransitDone {
    pub epoch: u64,
    pub seq: u32,
}

impl Event for TransitDone {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TransitDone { epoch, seq } = *self;
        if let Some(w) = current_world(world, epoch, "transit_done") {
            w.on_transit_done(seq, sim);
        }
    }
}

/// 丢包后的重传超时
#[derive(Debug)]
pub struct RetransmitTimeout {
    pub epoch: u64,
    pub seq: u32,
}

impl Event for RetransmitTimeout {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let RetransmitTimeout { epoch, seq } = *self;
        if let Some(w) = current_world(world, epoch, "retransmit_timeout") {
            w.on_retransmit_timeout(seq, sim);
        }
    }
}

/// 终态分组释放窗口槽位（送达后的淡出结束，或失败后的超时结束）
#[derive(Debug)]
pub struct ResolvePacket {
    pub epoch: u64,
    pub seq: u32,
}

impl Event for ResolvePacket {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let ResolvePacket { epoch, seq } = *self;
        if let Some(w) = current_world(world, epoch, "resolve") {
            w.on_resolve(seq, sim);
        }
    }
}
