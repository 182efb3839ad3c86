mod reset;
mod scenarios;
mod sim_time;

use crate::arq::{ArqConfig, ArqObserver, ArqSession, LossSource};
use std::sync::{Arc, Mutex};

/// 观察者收到的通知（尝试编号从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Started,
    Reset,
    Send(u32),
    Retransmit(u32, u32),
    Lost(u32, u32),
    Failed(u32),
    Delivered(u32, u32),
    Complete,
}

#[derive(Clone, Default)]
pub(crate) struct Recorder {
    log: Arc<Mutex<Vec<Notice>>>,
}

impl Recorder {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.log.lock().expect("log lock").clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Notice) -> bool) -> usize {
        self.log.lock().expect("log lock").iter().filter(|n| pred(n)).count()
    }

    fn push(&self, n: Notice) {
        self.log.lock().expect("log lock").push(n);
    }
}

impl ArqObserver for Recorder {
    fn on_send(&mut self, seq: u32) {
        self.push(Notice::Send(seq));
    }
    fn on_lost(&mut self, seq: u32, attempt: u32) {
        self.push(Notice::Lost(seq, attempt));
    }
    fn on_failed(&mut self, seq: u32) {
        self.push(Notice::Failed(seq));
    }
    fn on_delivered(&mut self, seq: u32, attempt: u32) {
        self.push(Notice::Delivered(seq, attempt));
    }
    fn on_complete(&mut self) {
        self.push(Notice::Complete);
    }
    fn on_retransmit(&mut self, seq: u32, attempt: u32) {
        self.push(Notice::Retransmit(seq, attempt));
    }
    fn on_started(&mut self, _cfg: &ArqConfig) {
        self.push(Notice::Started);
    }
    fn on_reset(&mut self) {
        self.push(Notice::Reset);
    }
}

pub(crate) fn session_with(loss: impl LossSource + 'static) -> (ArqSession, Recorder) {
    let rec = Recorder::default();
    let session = ArqSession::new(Box::new(loss), Box::new(rec.clone()));
    (session, rec)
}

pub(crate) fn cfg(window_size: u32, total_packets: u32, loss_rate: u32) -> ArqConfig {
    ArqConfig {
        window_size,
        total_packets,
        loss_rate,
        timeout_ms: 1_000,
        animation_speed_factor: 1.0,
    }
}
