use crate::sim::SimTime;

#[test]
fn sim_time_unit_conversions() {
    assert_eq!(SimTime::from_micros(1), SimTime(1_000));
    assert_eq!(SimTime::from_millis(1), SimTime(1_000_000));
    assert_eq!(SimTime::from_secs(1), SimTime(1_000_000_000));
    assert_eq!(SimTime::from_millis(2_500).as_millis(), 2_500);
}

#[test]
fn sim_time_unit_conversions_saturate_on_overflow() {
    assert_eq!(SimTime::from_micros(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime::from_millis(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime(u64::MAX).saturating_add(SimTime(1)), SimTime(u64::MAX));
}

#[test]
fn div_f64_scales_and_rejects_bad_factors() {
    assert_eq!(SimTime(1_000).div_f64(2.0), SimTime(500));
    assert_eq!(SimTime(1_000).div_f64(0.5), SimTime(2_000));
    assert_eq!(SimTime(1_000).div_f64(0.0), SimTime(1_000));
    assert_eq!(SimTime(1_000).div_f64(f64::NAN), SimTime(1_000));
    assert_eq!(SimTime(1).div_f64(1_000.0), SimTime(1));
}
