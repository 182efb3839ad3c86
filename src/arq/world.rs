//! ARQ 仿真世界
//!
//! 一次运行的全部可变状态都归 [`ArqWorld`] 所有：窗口、在途分组、随机源、观察者、统计。
//! 每次 reset 递增 `epoch`，延迟事件在调度时捕获 epoch，执行时不匹配即丢弃。

use std::any::Any;
use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use super::config::{ArqConfig, SETTLE_DELAY};
use super::events::{ResolvePacket, RetransmitTimeout, TransitDone};
use super::loss::LossSource;
use super::observer::ArqObserver;
use super::packet::{Packet, PacketState};
use super::stats::ArqStats;
use super::window::WindowController;
use crate::sim::{Simulator, World};
use crate::viz::VizLogger;

pub struct ArqWorld {
    cfg: ArqConfig,
    epoch: u64,
    running: bool,
    completed: bool,
    window: WindowController,
    packets: BTreeMap<u32, Packet>,
    loss: Box<dyn LossSource>,
    observer: Box<dyn ArqObserver>,
    pub viz: Option<VizLogger>,
    pub stats: ArqStats,
}

impl ArqWorld {
    pub fn new(loss: Box<dyn LossSource>, observer: Box<dyn ArqObserver>) -> Self {
        Self {
            cfg: ArqConfig::default(),
            epoch: 0,
            running: false,
            completed: false,
            window: WindowController::default(),
            packets: BTreeMap::new(),
            loss,
            observer,
            viz: None,
            stats: ArqStats::default(),
        }
    }

    pub fn config(&self) -> &ArqConfig {
        &self.cfg
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 已 start 且尚未完成 / 重置
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn window(&self) -> &WindowController {
        &self.window
    }

    pub fn packet(&self, seq: u32) -> Option<&Packet> {
        self.packets.get(&seq)
    }

    /// 尚未释放窗口槽位的分组（按序号升序）
    pub fn packets(&self) -> impl Iterator<Item = &Packet> + '_ {
        self.packets.values()
    }

    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// 是否有需要拆除的运行（进行中、已完成或仍有分组）
    pub(crate) fn has_run(&self) -> bool {
        self.running || self.completed || !self.packets.is_empty()
    }

    /// 丢弃当前运行的全部状态；之前调度的延迟事件随 epoch 失效。
    /// `announce` 为真时通知观察者并记录 reset 事件。
    pub(crate) fn teardown(&mut self, sim: &Simulator, announce: bool) {
        if announce {
            self.viz_reset(sim.now());
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.running = false;
        self.completed = false;
        self.window = WindowController::default();
        self.packets.clear();
        self.stats = ArqStats::default();
        if announce {
            info!(epoch = self.epoch, "仿真已重置");
            self.observer.on_reset();
        }
    }

    /// 以新配置开始一次运行（调用方保证已校验且已 teardown）
    pub(crate) fn begin(&mut self, cfg: ArqConfig, sim: &mut Simulator) {
        info!(
            epoch = self.epoch,
            window_size = cfg.window_size,
            total_packets = cfg.total_packets,
            loss_rate = cfg.loss_rate,
            timeout_ms = cfg.timeout_ms,
            "▶️  仿真开始"
        );
        self.cfg = cfg;
        self.running = true;
        self.observer.on_started(&self.cfg);
        self.viz_meta(sim.now());

        let admitted = self.window.start(&self.cfg);
        for seq in admitted {
            self.launch(seq, sim);
        }
        self.stats.peak_in_flight = self.window.in_flight_len();
    }

    /// 首发一个刚被准入的序号
    fn launch(&mut self, seq: u32, sim: &mut Simulator) {
        let pkt = Packet::new(seq);
        let attempt = pkt.attempt_number();
        self.packets.insert(seq, pkt);
        self.stats.sent += 1;

        let arrive = sim.now().saturating_add(self.cfg.transit());
        debug!(seq, now = ?sim.now(), ?arrive, "发送分组");
        self.observer.on_send(seq);
        self.viz_send(sim.now(), seq, attempt, arrive, false);
        sim.schedule(
            arrive,
            TransitDone {
                epoch: self.epoch,
                seq,
            },
        );
    }

    /// 传输结束：掷骰判定丢失 / 失败 / 送达
    pub(crate) fn on_transit_done(&mut self, seq: u32, sim: &mut Simulator) {
        let Some(pkt) = self.packets.get_mut(&seq) else {
            warn!(seq, "到达的分组未被跟踪");
            return;
        };
        let roll = self.loss.roll();
        let Some(state) = pkt.arrive(roll, self.cfg.loss_rate) else {
            return;
        };
        let attempt = pkt.attempt_number();
        let retried = pkt.needed_retries();
        let now = sim.now();
        trace!(seq, roll, loss_rate = self.cfg.loss_rate, ?state, "判定传输结果");

        match state {
            PacketState::Lost => {
                self.stats.lost += 1;
                let retry_at = now.saturating_add(self.cfg.timeout());
                debug!(seq, attempt, ?retry_at, "分组丢失");
                self.observer.on_lost(seq, attempt);
                self.viz_lost(now, seq, attempt, retry_at);
                sim.schedule(
                    retry_at,
                    RetransmitTimeout {
                        epoch: self.epoch,
                        seq,
                    },
                );
            }
            PacketState::Failed => {
                self.stats.failed += 1;
                let resolve_at = now.saturating_add(self.cfg.timeout());
                warn!(seq, attempts = attempt, "分组重试耗尽，永久失败");
                self.observer.on_failed(seq);
                self.viz_failed(now, seq, attempt, resolve_at);
                sim.schedule(
                    resolve_at,
                    ResolvePacket {
                        epoch: self.epoch,
                        seq,
                    },
                );
            }
            PacketState::Delivered => {
                self.stats.delivered += 1;
                if retried {
                    self.stats.delivered_after_retry += 1;
                }
                let resolve_at = now.saturating_add(SETTLE_DELAY);
                debug!(seq, attempt, "分组送达");
                self.observer.on_delivered(seq, attempt);
                self.viz_delivered(now, seq, attempt, retried, resolve_at);
                sim.schedule(
                    resolve_at,
                    ResolvePacket {
                        epoch: self.epoch,
                        seq,
                    },
                );
            }
            PacketState::InFlight => {
                warn!(seq, "判定结果不应为 InFlight");
            }
        }
    }

    /// 重传超时：同一序号以新的尝试重新进入传输
    pub(crate) fn on_retransmit_timeout(&mut self, seq: u32, sim: &mut Simulator) {
        let Some(pkt) = self.packets.get_mut(&seq) else {
            warn!(seq, "重传的分组未被跟踪");
            return;
        };
        if !pkt.retransmit() {
            return;
        }
        let attempt = pkt.attempt_number();
        self.stats.retransmitted += 1;

        let arrive = sim.now().saturating_add(self.cfg.transit());
        debug!(seq, attempt, ?arrive, "重传分组");
        self.observer.on_retransmit(seq, attempt);
        self.viz_send(sim.now(), seq, attempt, arrive, true);
        sim.schedule(
            arrive,
            TransitDone {
                epoch: self.epoch,
                seq,
            },
        );
    }

    /// 终态分组释放窗口槽位，补位，并检查整体是否完成
    pub(crate) fn on_resolve(&mut self, seq: u32, sim: &mut Simulator) {
        let terminal = self.packets.get(&seq).is_some_and(|p| p.state.is_terminal());
        if !terminal {
            warn!(seq, "分组未进入终态，忽略确认");
            return;
        }
        self.packets.remove(&seq);

        let admitted = self.window.on_resolved(seq);
        self.viz_resolved(sim.now(), seq, admitted);
        if let Some(next) = admitted {
            self.launch(next, sim);
        }

        if self.window.is_complete() && !self.completed {
            self.completed = true;
            self.running = false;
            info!(
                now = ?sim.now(),
                delivered = self.stats.delivered,
                failed = self.stats.failed,
                retransmitted = self.stats.retransmitted,
                "✅ 所有分组已进入终态"
            );
            self.observer.on_complete();
            self.viz_complete(sim.now());
        }
    }
}

impl World for ArqWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        let in_flight = self.window.in_flight_len();
        debug_assert!(in_flight <= self.window.window_size() as usize);
        self.stats.peak_in_flight = self.stats.peak_in_flight.max(in_flight);
    }
}
