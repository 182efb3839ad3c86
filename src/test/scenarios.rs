use crate::arq::{MAX_RETRIES, RandomLoss, ScriptedLoss};
use crate::test::{Notice, cfg, session_with};

#[test]
fn lossless_run_delivers_every_packet_on_first_attempt() {
    let (mut session, rec) = session_with(RandomLoss::seeded(1));
    session.start(cfg(4, 10, 0)).expect("start");
    session.run();

    assert_eq!(rec.count(|n| matches!(n, Notice::Send(_))), 10);
    assert_eq!(rec.count(|n| matches!(n, Notice::Delivered(_, 1))), 10);
    assert_eq!(rec.count(|n| matches!(n, Notice::Delivered(..))), 10);
    assert_eq!(rec.count(|n| matches!(n, Notice::Lost(..) | Notice::Failed(_))), 0);
    assert_eq!(rec.count(|n| matches!(n, Notice::Retransmit(..))), 0);
    assert_eq!(rec.count(|n| *n == Notice::Complete), 1);

    let stats = &session.world().stats;
    assert_eq!(stats.sent, 10);
    assert_eq!(stats.retransmitted, 0);
    assert_eq!(stats.peak_in_flight, 4);
    assert!(session.is_complete());
    assert!(!session.is_running());
    assert_eq!(session.pending_events(), 0);
}

#[test]
fn total_loss_fails_every_packet_after_four_attempts() {
    let (mut session, rec) = session_with(RandomLoss::seeded(2));
    session.start(cfg(2, 3, 100)).expect("start");
    session.run();

    for seq in 0..3 {
        let lost: Vec<u32> = rec
            .notices()
            .iter()
            .filter_map(|n| match n {
                Notice::Lost(s, a) if *s == seq => Some(*a),
                _ => None,
            })
            .collect();
        assert_eq!(lost, (1..=MAX_RETRIES).collect::<Vec<_>>(), "seq {seq}");
        assert_eq!(rec.count(|n| *n == Notice::Failed(seq)), 1);
        assert_eq!(
            rec.count(|n| matches!(n, Notice::Retransmit(s, _) if *s == seq)),
            MAX_RETRIES as usize
        );
    }
    assert_eq!(rec.count(|n| matches!(n, Notice::Delivered(..))), 0);
    assert_eq!(rec.count(|n| *n == Notice::Complete), 1);
    assert_eq!(rec.notices().last(), Some(&Notice::Complete));

    let stats = &session.world().stats;
    assert_eq!(stats.failed, 3);
    assert_eq!(stats.lost, 9);
}

#[test]
fn third_packet_waits_for_a_slot() {
    let (mut session, rec) = session_with(ScriptedLoss::never());
    session.start(cfg(2, 3, 0)).expect("start");

    assert_eq!(rec.count(|n| matches!(n, Notice::Send(_))), 2);
    assert!(!session.world().window().contains(2));

    // 0 和 1 同时到达，0 先释放槽位
    while !session.world().window().contains(2) {
        assert!(session.step(), "queue drained before packet 2 was admitted");
        assert!(session.world().window().in_flight_len() <= 2);
    }
    assert_eq!(rec.count(|n| matches!(n, Notice::Send(_))), 3);
    assert_eq!(rec.count(|n| matches!(n, Notice::Delivered(..))), 2);
}

#[test]
fn every_packet_resolves_exactly_once_under_random_loss() {
    for seed in 0..20 {
        let (mut session, rec) = session_with(RandomLoss::seeded(seed));
        let c = cfg(1 + (seed as u32 % 5), 12, 45);
        let window_size = c.window_size as usize;
        session.start(c).expect("start");

        while session.step() {
            let w = session.world().window();
            assert!(w.in_flight_len() <= window_size, "seed {seed}");
            assert!(w.next_seq() <= w.total_packets());
            for s in w.in_flight() {
                assert!(w.base_seq() <= s && s < w.next_seq(), "seed {seed}");
            }
            if rec.count(|n| *n == Notice::Complete) == 1 {
                assert!(w.is_complete());
            } else {
                assert!(!w.is_complete());
            }
        }

        for seq in 0..12 {
            let terminal = rec.count(|n| {
                matches!(n, Notice::Failed(s) | Notice::Delivered(s, _) if *s == seq)
            });
            assert_eq!(terminal, 1, "seed {seed} seq {seq}");
            assert_eq!(rec.count(|n| *n == Notice::Send(seq)), 1);
        }
        assert_eq!(rec.count(|n| *n == Notice::Complete), 1, "seed {seed}");
        assert!(rec.count(|n| matches!(n, Notice::Lost(_, a) if *a > MAX_RETRIES)) == 0);

        let stats = &session.world().stats;
        assert_eq!(stats.resolved(), 12);
        assert!(stats.peak_in_flight <= window_size);
    }
}

#[test]
fn same_seed_reproduces_the_same_run() {
    let run = |seed| {
        let (mut session, rec) = session_with(RandomLoss::seeded(seed));
        session.start(cfg(3, 8, 30)).expect("start");
        session.run();
        (rec.notices(), session.now())
    };
    assert_eq!(run(99), run(99));
}
