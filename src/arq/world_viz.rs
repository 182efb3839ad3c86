//! ArqWorld 的可视化事件钩子

use crate::sim::SimTime;
use crate::viz::{VizEvent, VizEventKind, VizWindow};

use super::config::MAX_RETRIES;
use super::world::ArqWorld;

impl ArqWorld {
    fn viz_push(&mut self, t: SimTime, seq: Option<u32>, kind: VizEventKind) {
        let epoch = self.epoch();
        if let Some(v) = &mut self.viz {
            v.push(VizEvent {
                t_ns: t.0,
                epoch,
                seq,
                kind,
            });
        }
    }

    pub(crate) fn viz_meta(&mut self, t: SimTime) {
        if self.viz.is_none() {
            return;
        }
        let cfg = self.config();
        let kind = VizEventKind::Meta {
            window_size: cfg.window_size,
            total_packets: cfg.total_packets,
            timeout_ms: cfg.timeout_ms,
            loss_rate: cfg.loss_rate,
            animation_speed_factor: cfg.animation_speed_factor,
            max_retries: MAX_RETRIES,
            transit_ns: cfg.transit().0,
        };
        self.viz_push(t, None, kind);
    }

    pub(crate) fn viz_send(&mut self, t: SimTime, seq: u32, attempt: u32, arrive: SimTime, retrans: bool) {
        let kind = if retrans {
            VizEventKind::Retransmit {
                attempt,
                arrive_ns: arrive.0,
            }
        } else {
            VizEventKind::Send {
                attempt,
                arrive_ns: arrive.0,
            }
        };
        self.viz_push(t, Some(seq), kind);
    }

    pub(crate) fn viz_lost(&mut self, t: SimTime, seq: u32, attempt: u32, retry_at: SimTime) {
        self.viz_push(
            t,
            Some(seq),
            VizEventKind::Lost {
                attempt,
                retry_ns: retry_at.0,
            },
        );
    }

    pub(crate) fn viz_failed(&mut self, t: SimTime, seq: u32, attempts: u32, resolve_at: SimTime) {
        self.viz_push(
            t,
            Some(seq),
            VizEventKind::Failed {
                attempts,
                resolve_ns: resolve_at.0,
            },
        );
    }

    pub(crate) fn viz_delivered(
        &mut self,
        t: SimTime,
        seq: u32,
        attempt: u32,
        retried: bool,
        resolve_at: SimTime,
    ) {
        self.viz_push(
            t,
            Some(seq),
            VizEventKind::Delivered {
                attempt,
                retried,
                resolve_ns: resolve_at.0,
            },
        );
    }

    pub(crate) fn viz_resolved(&mut self, t: SimTime, seq: u32, admitted: Option<u32>) {
        if self.viz.is_none() {
            return;
        }
        let window = VizWindow {
            base_seq: self.window().base_seq(),
            next_seq: self.window().next_seq(),
            in_flight: self.window().in_flight().collect(),
        };
        self.viz_push(t, Some(seq), VizEventKind::Resolved { window, admitted });
    }

    pub(crate) fn viz_complete(&mut self, t: SimTime) {
        self.viz_push(t, None, VizEventKind::Complete);
    }

    pub(crate) fn viz_reset(&mut self, t: SimTime) {
        self.viz_push(t, None, VizEventKind::Reset);
    }
}
