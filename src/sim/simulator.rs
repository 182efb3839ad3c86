//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 下一个事件的执行时间（队列为空时为 `None`）
    pub fn next_event_at(&self) -> Option<SimTime> {
        self.q.peek().map(|ev| ev.at)
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(level = "trace", skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at: at.max(self.now),
            seq,
            ev: Box::new(ev),
        });

        trace!(queue_size = self.q.len(), "事件已加入队列");
    }

    /// 在当前时间之后 `delay` 执行事件
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) {
        let at = self.now.saturating_add(delay);
        self.schedule(at, ev);
    }

    /// 丢弃所有待执行事件；时间不回退。
    pub fn clear(&mut self) {
        let dropped = self.q.len();
        self.q.clear();
        debug!(dropped, now = ?self.now, "清空事件队列");
    }

    /// 执行队首的一个事件；队列为空时返回 `false`。
    pub fn step(&mut self, world: &mut dyn World) -> bool {
        let Some(item) = self.q.pop() else {
            return false;
        };
        self.now = item.at;
        item.ev.execute(self, world);
        world.on_tick(self);
        true
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            self.step(world);
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        debug!(now = ?self.now, queue_size = self.q.len(), "开始运行仿真");

        let mut event_count: u64 = 0;
        while let Some(top) = self.q.peek() {
            event_count += 1;
            trace!(
                event_num = event_count,
                scheduled_at = ?top.at,
                seq = top.seq,
                remaining_queue = self.q.len() - 1,
                "执行事件"
            );
            self.step(world);
        }

        info!(
            total_events = event_count,
            final_time = ?self.now,
            "事件队列已耗尽"
        );
    }
}
