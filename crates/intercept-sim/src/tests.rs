//! End-to-end tests for the engine, scenario wiring, and batch runner.

use glam::DVec2;

use intercept_core::enums::*;
use intercept_core::state::SimHistory;

use crate::engine::SimulationEngine;
use crate::monte_carlo;
use crate::scenario::{NoiseConfig, ScenarioConfig};

/// Stationary target 1.5 km east of a co-located radar and launcher.
fn stationary_target_scenario() -> ScenarioConfig {
    let mut config = ScenarioConfig::default();
    config.target.position = DVec2::new(1500.0, 0.0);
    config.target.speed = 0.0;
    config.target.waypoints.clear();
    config.surveillance_sensor.pd_at_max_range = 0.9;
    config.surveillance_sensor.classification_accuracy = 1.0;
    config.interceptor.position = DVec2::ZERO;
    config
}

/// Target 2 km out and running away faster than a short-burn interceptor can close.
fn fleeing_target_scenario() -> ScenarioConfig {
    let mut config = ScenarioConfig::default();
    config.target.position = DVec2::new(2000.0, 0.0);
    config.target.speed = 30.0;
    config.target.waypoints = vec![DVec2::new(10_000.0, 0.0)];
    config.surveillance_sensor.pd_at_max_range = 0.9;
    config.surveillance_sensor.classification_accuracy = 1.0;
    config.interceptor.position = DVec2::ZERO;
    config.interceptor.max_flight_time = 3.0;
    config
}

fn noisy_scenario() -> ScenarioConfig {
    let mut config = ScenarioConfig::default();
    config.surveillance_sensor.noise = NoiseConfig {
        range_noise_fraction: 0.01,
        bearing_noise_deg: 0.5,
        speed_noise_fraction: 0.05,
        heading_noise_deg: 2.0,
    };
    config
}

fn run(config: &ScenarioConfig, seed: u64) -> SimulationEngine {
    let mut engine = config.build(seed).unwrap();
    engine.run();
    engine
}

fn history_json(history: &SimHistory) -> String {
    serde_json::to_string(history).unwrap()
}

// ---- Engagement outcomes ----

#[test]
fn test_stationary_target_is_hit() {
    let engine = run(&stationary_target_scenario(), 42);

    assert_eq!(engine.result(), EngagementResult::Hit);
    assert_eq!(engine.engagement().phase(), Phase::Complete);
    assert_eq!(engine.interceptor().state(), InterceptorState::Detonated);
    assert!(!engine.target().is_active());

    let last = engine.history().last().unwrap();
    assert_eq!(last.phase, Phase::Complete);
    assert!(!last.target_active);
    assert!(last.range() <= 5.0);
    assert!(engine.time().elapsed_secs < 120.0);
}

#[test]
fn test_flight_time_exhaustion_is_miss() {
    let engine = run(&fleeing_target_scenario(), 42);

    assert_eq!(engine.result(), EngagementResult::Miss);
    assert_eq!(engine.interceptor().state(), InterceptorState::Missed);
    assert!(engine.target().is_active());
    assert_eq!(engine.interceptor().speed(), 0.0);
}

#[test]
fn test_out_of_coverage_runs_to_max_time_pending() {
    let mut config = stationary_target_scenario();
    config.target.position = DVec2::new(9000.0, 0.0);
    config.simulation.max_time = 1.0;
    let engine = run(&config, 42);

    assert_eq!(engine.result(), EngagementResult::Pending);
    assert_eq!(engine.engagement().phase(), Phase::Search);
    assert!(engine.engagement().phase_log().is_empty());
    assert_eq!(engine.time().tick, 10);
    // One snapshot per tick plus the closing snapshot.
    assert_eq!(engine.history().len(), 11);
}

#[test]
fn test_timeout_is_never_reported() {
    for seed in 0..5 {
        let mut config = noisy_scenario();
        config.simulation.max_time = 20.0;
        let engine = run(&config, seed);
        assert_ne!(engine.result(), EngagementResult::Timeout);
    }
}

// ---- Engine loop ----

#[test]
fn test_step_after_finish_is_inert() {
    let mut engine = run(&stationary_target_scenario(), 5);
    let len = engine.history().len();
    let time = engine.time();

    assert!(engine.is_finished());
    assert!(!engine.step());
    assert_eq!(engine.history().len(), len);
    assert_eq!(engine.time(), time);
}

#[test]
fn test_history_times_follow_ticks() {
    let engine = run(&stationary_target_scenario(), 9);
    let history = engine.history();
    let dt = engine.dt();

    let times = history.times();
    for (i, t) in times.iter().enumerate().take(times.len() - 1) {
        assert!((t - i as f64 * dt).abs() < 1e-9, "snapshot {i} at {t}");
    }
    // Closing snapshot repeats the final time.
    let n = times.len();
    assert_eq!(times[n - 1], engine.time().elapsed_secs);
    assert!((times[n - 1] - times[n - 2] - dt).abs() < 1e-9);
}

#[test]
fn test_interceptor_holds_launch_position_until_launch() {
    let engine = run(&stationary_target_scenario(), 3);
    let launch = engine.launch_position();

    for state in engine.history().states() {
        if state.phase <= Phase::Launch {
            assert_eq!(state.interceptor_pos, launch);
            assert_eq!(state.interceptor_speed, 0.0);
        }
    }
}

// ---- Phase log ----

#[test]
fn test_phase_log_order_and_times() {
    let engine = run(&stationary_target_scenario(), 17);
    let log = engine.engagement().phase_log();

    let phases: Vec<Phase> = log.iter().map(|p| p.phase).collect();
    assert_eq!(
        phases,
        vec![
            Phase::Track,
            Phase::Classify,
            Phase::Launch,
            Phase::Midcourse,
            Phase::Terminal,
            Phase::Complete,
        ]
    );
    for pair in log.windows(2) {
        assert!(pair[0].time < pair[1].time, "phase times must strictly increase");
    }
}

#[test]
fn test_phase_log_matches_history_intervals() {
    let engine = run(&stationary_target_scenario(), 23);
    let intervals = engine.history().phase_intervals();
    let log = engine.engagement().phase_log();

    // Every logged phase shows up as its own interval, in order, after SEARCH.
    assert_eq!(intervals[0].phase, Phase::Search);
    let interval_phases: Vec<Phase> = intervals.iter().skip(1).map(|i| i.phase).collect();
    let log_phases: Vec<Phase> = log.iter().map(|p| p.phase).collect();
    assert_eq!(interval_phases, log_phases);
}

// ---- Sensing ----

#[test]
fn test_zero_noise_estimate_matches_truth() {
    let mut config = ScenarioConfig::default();
    config.surveillance_sensor.classification_accuracy = 1.0;
    let engine = run(&config, 8);

    let mut checked = 0;
    for state in engine.history().states() {
        if state.phase != Phase::Midcourse {
            continue;
        }
        if let Some(estimate) = state.estimated_target_pos {
            assert!((estimate - state.target_pos).length() < 1e-6);
            checked += 1;
        }
    }
    assert!(checked > 0, "expected midcourse estimates");
}

#[test]
fn test_noisy_estimate_differs_from_truth() {
    let engine = run(&noisy_scenario(), 8);
    let errors: Vec<f64> = engine
        .history()
        .states()
        .iter()
        .filter(|s| s.phase == Phase::Midcourse)
        .filter_map(|s| s.estimated_target_pos.map(|e| (e - s.target_pos).length()))
        .collect();
    assert!(!errors.is_empty());
    assert!(errors.iter().any(|&e| e > 1e-3));
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = noisy_scenario();
    let a = run(&config, 12345);
    let b = run(&config, 12345);

    assert_eq!(history_json(a.history()), history_json(b.history()));
    assert_eq!(a.engagement().phase_log(), b.engagement().phase_log());
    assert_eq!(a.result(), b.result());
}

#[test]
fn test_determinism_different_seeds() {
    let config = noisy_scenario();
    let a = run(&config, 111);
    let b = run(&config, 222);
    assert_ne!(history_json(a.history()), history_json(b.history()));
}

// ---- Summary ----

#[test]
fn test_summary_reflects_history() {
    let engine = run(&stationary_target_scenario(), 42);
    let summary = engine.summary();
    let history = engine.history();

    assert_eq!(summary.result, EngagementResult::Hit);
    assert_eq!(summary.duration_secs, history.last().unwrap().time);
    assert_eq!(summary.final_range, history.last().unwrap().range());
    assert_eq!(Some(summary.closest_approach), history.closest_approach());
    assert!(summary.closest_approach <= summary.final_range);
    assert_eq!(summary.phase_log, engine.engagement().phase_log());
}

// ---- Scenario documents ----

#[test]
fn test_json_scenario_runs_to_hit() {
    let json = r#"{
        "target": { "position": [1500.0, 0.0], "speed": 0.0 },
        "surveillance_sensor": {
            "max_range": 5000.0,
            "pd_at_max_range": 0.9,
            "classification_accuracy": 1.0
        },
        "interceptor": { "position": [0.0, 0.0] },
        "engagement": { "terminal_guidance": "pure_pursuit" }
    }"#;
    let config = ScenarioConfig::from_json_str(json).unwrap();
    let engine = run(&config, 1);
    assert_eq!(engine.engagement().params().terminal_guidance, TerminalGuidance::PurePursuit);
    assert_eq!(engine.result(), EngagementResult::Hit);
}

// ---- Monte Carlo ----

#[test]
fn test_batch_matches_sequential_runs() {
    let config = noisy_scenario();
    let seeds: Vec<u64> = (100..106).collect();
    let report = monte_carlo::run_batch(&config, &seeds).unwrap();

    for (outcome, &seed) in report.outcomes.iter().zip(&seeds) {
        let sequential = monte_carlo::run_single(&config, seed).unwrap();
        assert_eq!(*outcome, sequential);
    }
}

#[test]
fn test_batch_of_certain_hits() {
    let seeds = [1, 2, 3, 4];
    let report = monte_carlo::run_batch(&stationary_target_scenario(), &seeds).unwrap();
    assert_eq!(report.hits, 4);
    assert_eq!(report.hit_rate(), 1.0);

    let report = monte_carlo::run_batch(&fleeing_target_scenario(), &seeds).unwrap();
    assert_eq!(report.misses, 4);
    assert_eq!(report.hit_rate(), 0.0);
}
