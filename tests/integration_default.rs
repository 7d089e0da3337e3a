//! Integration tests for the default simulation scenarios.

mod common;

use microgrid_sim::sim::battery::Battery;
use microgrid_sim::sim::engine::Engine;
use microgrid_sim::sim::pid::PidController;
use microgrid_sim::sim::report::SummaryReport;
use microgrid_sim::sim::types::{DemandSampling, HourStatus, SimConfig};
use microgrid_sim::sources::{CyclicProfile, MainGrid};

#[test]
fn full_run_produces_one_record_per_hour() {
    let mut engine = common::seeded_engine(42);
    let records = engine.run(24);
    assert_eq!(records.len(), 24);
    for (i, r) in records.iter().enumerate() {
        assert_eq!(r.hour, i);
    }
}

#[test]
fn zero_duration_produces_empty_log_and_no_mutation() {
    let mut engine = common::seeded_engine(42);
    assert!(engine.run(0).is_empty());
    assert_eq!(engine.hours_elapsed(), 0);
    assert_eq!(engine.battery().charge_level_kwh(), 0.0);
    assert_eq!(engine.battery().charge_threshold, 0.8);
}

#[test]
fn battery_level_within_bounds_after_every_hour() {
    // Long stochastic run across many cycle wraps.
    let mut engine = common::seeded_engine(7);
    let capacity = engine.battery().capacity_kwh;
    let records = engine.run(240);
    for r in records {
        assert!(
            (0.0..=capacity).contains(&r.battery_level_kwh),
            "battery level {} out of [0, {capacity}] at hour {}",
            r.battery_level_kwh,
            r.hour
        );
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let mut a = common::seeded_engine(1234);
    let mut b = common::seeded_engine(1234);
    let ra = a.run(72).to_vec();
    let rb = b.run(72).to_vec();
    assert_eq!(ra.len(), rb.len());
    for (x, y) in ra.iter().zip(rb.iter()) {
        assert_eq!(x, y, "records diverge at hour {}", x.hour);
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = common::seeded_engine(1);
    let mut b = common::seeded_engine(2);
    let ra = a.run(24).to_vec();
    let rb = b.run(24).to_vec();
    assert!(
        ra.iter()
            .zip(rb.iter())
            .any(|(x, y)| x.total_available_kw != y.total_available_kw),
        "different seeds should produce different balances"
    );
}

#[test]
fn constant_scenario_three_hours_matches_hand_computation() {
    // solar 30, wind 20, load 40, grid 10, inert controller:
    // available = 60, 62, 64; battery level = 2, 4, 6; thresholds frozen.
    let mut engine = common::constant_engine();
    let records = engine.run(3);

    let expected = [(60.0, 2.0), (62.0, 4.0), (64.0, 6.0)];
    for (r, (available, level)) in records.iter().zip(expected) {
        assert!((r.total_available_kw - available).abs() < 1e-4);
        assert!((r.battery_level_kwh - level).abs() < 1e-4);
        assert_eq!(r.controller_output, 0.0);
        assert_eq!(r.status, HourStatus::Sufficient);
    }
    assert_eq!(engine.battery().charge_threshold, 0.8);
    assert_eq!(engine.battery().discharge_threshold, 0.2);
}

#[test]
fn deficit_equals_positive_part_of_first_sample_error() {
    // No renewables, pinned grid at 10, demand alternating 5 / 100:
    // the error of each hour comes from that hour's first demand sample.
    let mut demand = vec![5.0; 24];
    for slot in demand.iter_mut().skip(1).step_by(2) {
        *slot = 100.0;
    }
    let mut engine = Engine::new(
        SimConfig::new(24, DemandSampling::PerHour),
        CyclicProfile::new(vec![0.0; 24], 24),
        CyclicProfile::new(vec![0.0; 24], 24),
        CyclicProfile::new(demand.clone(), 24),
        MainGrid::new(10.0, 10.0, 0),
        PidController::new(0.0, 0.0, 0.0),
        Battery::new(50.0, 0.2, 0.1, 0.8, 0.2),
    );
    let records = engine.run(4).to_vec();
    for r in &records {
        let available = r.total_available_kw;
        let error = demand[r.hour % 24] - available;
        assert!(
            (r.deficit_kw - error.max(0.0)).abs() < 1e-4,
            "hour {}: deficit {} != max(0, {error})",
            r.hour,
            r.deficit_kw
        );
    }
    // Alternating demand yields alternating sufficiency.
    assert_eq!(records[0].status, HourStatus::Sufficient);
    assert!(matches!(records[1].status, HourStatus::Deficit { .. }));
}

#[test]
fn profiles_wrap_exactly_at_the_cycle_boundary() {
    // Distinct solar values and a demand so large the battery always ends
    // the hour empty, so total_available directly exposes the solar value.
    let solar: Vec<f32> = (0..24).map(|h| 100.0 + h as f32).collect();
    let mut engine = Engine::new(
        SimConfig::new(24, DemandSampling::PerHour),
        CyclicProfile::new(solar.clone(), 24),
        CyclicProfile::new(vec![0.0; 24], 24),
        CyclicProfile::new(vec![10_000.0; 24], 24),
        MainGrid::new(10.0, 10.0, 0),
        PidController::new(0.0, 0.0, 0.0),
        Battery::new(50.0, 0.2, 0.1, 0.8, 0.2),
    );
    let records = engine.run(30).to_vec();

    for (i, r) in records.iter().enumerate() {
        assert!(
            (r.total_available_kw - (solar[i % 24] + 10.0)).abs() < 1e-3,
            "hour {i}: available {} does not track solar[{}]",
            r.total_available_kw,
            i % 24
        );
    }
    // The wrap happens exactly at hour 24.
    assert!((records[23].total_available_kw - (solar[23] + 10.0)).abs() < 1e-3);
    assert!((records[24].total_available_kw - (solar[0] + 10.0)).abs() < 1e-3);
}

#[test]
fn engine_state_persists_across_runs() {
    let mut split = common::seeded_engine(9);
    split.run(10);
    let tail = split.run(14).to_vec();

    let mut whole = common::seeded_engine(9);
    let all = whole.run(24).to_vec();

    assert_eq!(tail.len(), 14);
    assert_eq!(&all[10..], &tail[..], "resumed run must continue seamlessly");
}

#[test]
fn thresholds_drift_unbounded_over_a_long_deficit_run() {
    // Persistent shortfall with integral gain: the controller output and the
    // thresholds must keep drifting, never saturating at some implicit bound.
    let mut engine = Engine::new(
        SimConfig::new(24, DemandSampling::PerCall),
        CyclicProfile::new(vec![1.0; 24], 24),
        CyclicProfile::new(vec![1.0; 24], 24),
        CyclicProfile::new(vec![80.0; 24], 24),
        MainGrid::new(5.0, 5.0, 0),
        PidController::new(0.1, 0.01, 0.05),
        Battery::new(50.0, 0.2, 0.1, 0.8, 0.2),
    );
    let records = engine.run(500).to_vec();
    let early = records[10].controller_output.abs();
    let late = records[490].controller_output.abs();
    assert!(
        late > early * 10.0,
        "integral term should dominate over time: early {early}, late {late}"
    );
    assert!(
        engine.battery().charge_threshold.abs() > 100.0,
        "thresholds should have drifted far from their initial fractions"
    );
}

#[test]
fn summary_report_is_consistent_with_the_log() {
    let mut engine = common::seeded_engine(42);
    let records = engine.run(48).to_vec();
    let report = SummaryReport::from_records(&records);

    assert_eq!(report.hours, 48);
    let deficits = records
        .iter()
        .filter(|r| matches!(r.status, HourStatus::Deficit { .. }))
        .count();
    assert_eq!(report.deficit_hours, deficits);
    assert!(report.min_battery_kwh >= 0.0);
    assert!(report.max_battery_kwh <= engine.battery().capacity_kwh);
}
