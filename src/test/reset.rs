use crate::arq::{ArqConfig, ConfigError, PacketState, ScriptedLoss, TransitDone};
use crate::sim::SimTime;
use crate::test::{Notice, cfg, session_with};

#[test]
fn reset_mid_run_cancels_every_pending_callback() {
    let (mut session, rec) = session_with(ScriptedLoss::new([0, 0, 0], 99));
    let c = cfg(3, 10, 50);
    let transit = c.transit();
    session.start(c).expect("start");
    session.advance(transit);
    assert!(session.pending_events() > 0);

    session.reset();
    let after_reset = rec.notices().len();
    assert_eq!(rec.notices().last(), Some(&Notice::Reset));
    assert_eq!(session.pending_events(), 0);
    assert!(!session.is_running());
    assert_eq!(session.world().window().in_flight_len(), 0);
    assert_eq!(session.world().packets().count(), 0);
    assert_eq!(session.world().stats.sent, 0);

    session.advance(SimTime::from_secs(3_600));
    session.run();
    assert_eq!(rec.notices().len(), after_reset);
}

#[test]
fn stale_callback_from_a_superseded_run_is_a_noop() {
    let (mut session, rec) = session_with(ScriptedLoss::always());
    session.start(cfg(2, 4, 100)).expect("start");
    let old_epoch = session.world().epoch();

    session.start(cfg(2, 4, 100)).expect("restart");
    assert_ne!(session.world().epoch(), old_epoch);
    let before = rec.notices();

    let (sim, world) = session.parts_mut();
    sim.schedule(sim.now(), TransitDone { epoch: old_epoch, seq: 0 });
    assert!(sim.step(world));

    let p = session.world().packet(0).expect("packet 0 of the new run");
    assert_eq!((p.state, p.attempt), (PacketState::InFlight, 0));
    assert_eq!(rec.notices(), before);
    assert_eq!(session.world().stats.lost, 0);
}

#[test]
fn restarting_tears_down_the_previous_run_first() {
    let (mut session, rec) = session_with(ScriptedLoss::never());
    let first = cfg(4, 10, 0);
    let transit = first.transit();
    session.start(first).expect("start");
    session.advance(transit);

    session.start(cfg(1, 2, 0)).expect("restart");
    let notices = rec.notices();
    let reset_at = notices
        .iter()
        .position(|n| *n == Notice::Reset)
        .expect("reset notice");
    assert_eq!(notices[reset_at + 1], Notice::Started);

    session.run();
    let tail = &rec.notices()[reset_at..];
    assert_eq!(
        tail,
        &[
            Notice::Reset,
            Notice::Started,
            Notice::Send(0),
            Notice::Delivered(0, 1),
            Notice::Send(1),
            Notice::Delivered(1, 1),
            Notice::Complete,
        ]
    );
    assert_eq!(session.world().stats.sent, 2);
}

#[test]
fn starting_again_after_completion_resets_once() {
    let (mut session, rec) = session_with(ScriptedLoss::never());
    session.start(cfg(1, 1, 0)).expect("start");
    session.run();
    session.start(cfg(1, 1, 0)).expect("second start");
    session.run();

    assert_eq!(rec.count(|n| *n == Notice::Reset), 1);
    assert_eq!(rec.count(|n| *n == Notice::Complete), 2);
}

#[test]
fn invalid_config_is_rejected_without_touching_the_active_run() {
    let (mut session, rec) = session_with(ScriptedLoss::never());
    session.start(cfg(2, 4, 0)).expect("start");
    let epoch = session.world().epoch();
    let pending = session.pending_events();

    let bad = ArqConfig {
        loss_rate: 101,
        ..cfg(2, 4, 0)
    };
    assert!(matches!(session.start(bad), Err(ConfigError::LossRateOutOfRange(101))));
    assert!(matches!(session.start(cfg(0, 4, 0)), Err(ConfigError::ZeroWindow)));

    assert_eq!(session.world().epoch(), epoch);
    assert_eq!(session.pending_events(), pending);
    assert!(session.is_running());
    assert_eq!(rec.count(|n| *n == Notice::Reset), 0);

    session.run();
    assert!(session.is_complete());
}

#[test]
fn pause_freezes_the_clock_and_every_pending_delay() {
    let (mut session, rec) = session_with(ScriptedLoss::never());
    let c = cfg(2, 2, 0);
    let transit = c.transit();
    session.start(c).expect("start");

    session.advance(SimTime(transit.0 / 2));
    let paused_at = session.now();
    session.pause();
    assert!(session.is_paused());

    session.advance(SimTime::from_secs(60));
    session.run();
    assert!(!session.step());
    assert_eq!(session.now(), paused_at);
    assert_eq!(rec.count(|n| matches!(n, Notice::Delivered(..))), 0);

    assert!(!session.toggle_pause());
    session.advance(SimTime(transit.0 - transit.0 / 2));
    assert_eq!(session.now(), transit);
    assert_eq!(rec.count(|n| matches!(n, Notice::Delivered(..))), 2);
}

#[test]
fn reset_clears_pause() {
    let (mut session, _rec) = session_with(ScriptedLoss::never());
    session.start(cfg(1, 1, 0)).expect("start");
    session.pause();
    session.reset();
    assert!(!session.is_paused());
}
