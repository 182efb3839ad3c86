//! 仿真会话：对外的 start / reset / pause / resume 入口
//!
//! 会话独占事件队列与 [`ArqWorld`]。时钟只在 [`ArqSession::advance`] / [`ArqSession::run`]
//! 中前进，暂停期间两者都不推进，因此传输、超时、淡出等所有延迟都随暂停冻结。

use tracing::{debug, info};

use super::config::{ArqConfig, ConfigError};
use super::loss::LossSource;
use super::observer::ArqObserver;
use super::world::ArqWorld;
use crate::sim::{SimTime, Simulator};
use crate::viz::VizLogger;

pub struct ArqSession {
    sim: Simulator,
    world: ArqWorld,
    paused: bool,
}

impl ArqSession {
    pub fn new(loss: Box<dyn LossSource>, observer: Box<dyn ArqObserver>) -> Self {
        Self {
            sim: Simulator::default(),
            world: ArqWorld::new(loss, observer),
            paused: false,
        }
    }

    /// 开始记录可视化事件
    pub fn enable_viz(&mut self) {
        if self.world.viz.is_none() {
            self.world.viz = Some(VizLogger::default());
        }
    }

    /// 校验配置并开始新的运行；已有运行会先被完整拆除。
    ///
    /// 配置非法时返回错误，当前运行保持不变。
    pub fn start(&mut self, cfg: ArqConfig) -> Result<(), ConfigError> {
        cfg.validate()?;
        let announce = self.world.has_run();
        self.sim.clear();
        self.world.teardown(&self.sim, announce);
        self.paused = false;
        self.world.begin(cfg, &mut self.sim);
        Ok(())
    }

    /// 取消所有待执行事件并丢弃窗口/分组状态
    pub fn reset(&mut self) {
        self.sim.clear();
        self.world.teardown(&self.sim, true);
        self.paused = false;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            info!(now = ?self.sim.now(), "⏸️  暂停");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            info!(now = ?self.sim.now(), "继续");
        }
        self.paused = false;
    }

    /// 切换暂停状态，返回切换后是否处于暂停
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 时钟前进 `dt`，执行期间到期的事件；暂停时不做任何事
    pub fn advance(&mut self, dt: SimTime) {
        if self.paused {
            debug!("暂停中，忽略 advance");
            return;
        }
        let until = self.sim.now().saturating_add(dt);
        self.sim.run_until(until, &mut self.world);
    }

    /// 只执行下一个事件；暂停或队列为空时返回 `false`
    pub fn step(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.sim.step(&mut self.world)
    }

    /// 一直运行到队列耗尽（即本次运行完成）；暂停时不做任何事
    pub fn run(&mut self) {
        if self.paused {
            debug!("暂停中，忽略 run");
            return;
        }
        self.sim.run(&mut self.world);
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    pub fn pending_events(&self) -> usize {
        self.sim.pending()
    }

    pub fn is_running(&self) -> bool {
        self.world.is_running()
    }

    pub fn is_complete(&self) -> bool {
        self.world.is_complete()
    }

    pub fn world(&self) -> &ArqWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut ArqWorld {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut Simulator, &mut ArqWorld) {
        (&mut self.sim, &mut self.world)
    }
}
