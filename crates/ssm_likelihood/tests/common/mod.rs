//! Shared fixtures: simulated telemetry tracks.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};
use ssm_models::data::{TelemetryData, TelemetryDataBuilder};
use ssm_models::trajectory::Trajectory;

/// Install a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Simulated track: the data and the latent trajectory it was drawn from.
pub struct SimulatedTrack {
    pub data: TelemetryData,
    pub trajectory: Trajectory<f64>,
}

/// Columns shared by both process models.
struct Columns {
    dt: Vec<f64>,
    flags: Vec<i32>,
    models: Vec<i32>,
    weights: Vec<[f64; 2]>,
    semi_minor: Vec<f64>,
    semi_major: Vec<f64>,
    orientation: Vec<f64>,
}

fn draw_columns(rng: &mut StdRng, n: usize) -> Columns {
    let mut cols = Columns {
        dt: Vec::with_capacity(n),
        flags: Vec::with_capacity(n),
        models: Vec::with_capacity(n),
        weights: Vec::with_capacity(n),
        semi_minor: Vec::with_capacity(n),
        semi_major: Vec::with_capacity(n),
        orientation: Vec::with_capacity(n),
    };
    for i in 0..n {
        cols.dt.push(rng.gen_range(0.2..2.0));
        // first step always observed, then roughly one in four interpolated
        cols.flags.push(if i == 0 || rng.gen_bool(0.75) { 1 } else { 0 });
        cols.models.push(if rng.gen_bool(0.5) { 0 } else { 1 });
        cols.weights.push([rng.gen_range(0.5..3.0), rng.gen_range(0.5..3.0)]);
        let minor = rng.gen_range(0.2..1.0);
        cols.semi_minor.push(minor);
        cols.semi_major.push(minor + rng.gen_range(0.0..2.0));
        cols.orientation.push(rng.gen_range(-3.0..3.0));
    }
    cols
}

fn observe(rng: &mut StdRng, truth: &[[f64; 2]], noise_sd: f64) -> Vec<[f64; 2]> {
    let noise = Normal::new(0.0, noise_sd).unwrap();
    truth
        .iter()
        .map(|p| [p[0] + noise.sample(rng), p[1] + noise.sample(rng)])
        .collect()
}

/// Random-walk track with unit innovation scale.
pub fn random_walk_track(n: usize, seed: u64) -> SimulatedTrack {
    let mut rng = StdRng::seed_from_u64(seed);
    let cols = draw_columns(&mut rng, n);

    let mut locations = Vec::with_capacity(n);
    locations.push([0.0, 0.0]);
    for i in 1..n {
        let prev: [f64; 2] = locations[i - 1];
        let z0: f64 = StandardNormal.sample(&mut rng);
        let z1: f64 = StandardNormal.sample(&mut rng);
        locations.push([prev[0] + cols.dt[i] * z0, prev[1] + cols.dt[i] * z1]);
    }
    let positions = observe(&mut rng, &locations, 0.5);

    let data = TelemetryDataBuilder::new()
        .positions(positions)
        .time_deltas(cols.dt)
        .observation_flags(cols.flags)
        .observation_models(cols.models)
        .least_squares_weights(cols.weights)
        .ellipses(cols.semi_minor, cols.semi_major, cols.orientation)
        .process_model(0)
        .build()
        .unwrap();
    SimulatedTrack {
        data,
        trajectory: Trajectory::random_walk(locations),
    }
}

/// Correlated-random-walk track with `D = 1`; locations integrate the
/// velocity exactly and the first state equals the initial state.
pub fn correlated_track(n: usize, seed: u64) -> SimulatedTrack {
    let mut rng = StdRng::seed_from_u64(seed);
    let cols = draw_columns(&mut rng, n);
    let initial_state = [0.0, 0.0, 0.5, -0.25];

    let mut locations = Vec::with_capacity(n);
    let mut velocities = Vec::with_capacity(n);
    locations.push([initial_state[0], initial_state[1]]);
    velocities.push([initial_state[2], initial_state[3]]);
    for i in 1..n {
        let sd = (2.0 * cols.dt[i]).sqrt();
        let z0: f64 = StandardNormal.sample(&mut rng);
        let z1: f64 = StandardNormal.sample(&mut rng);
        let prev_v: [f64; 2] = velocities[i - 1];
        let v = [prev_v[0] + sd * z0, prev_v[1] + sd * z1];
        let prev: [f64; 2] = locations[i - 1];
        locations.push([prev[0] + v[0] * cols.dt[i], prev[1] + v[1] * cols.dt[i]]);
        velocities.push(v);
    }
    let positions = observe(&mut rng, &locations, 0.5);

    let data = TelemetryDataBuilder::new()
        .positions(positions)
        .time_deltas(cols.dt)
        .observation_flags(cols.flags)
        .observation_models(cols.models)
        .least_squares_weights(cols.weights)
        .ellipses(cols.semi_minor, cols.semi_major, cols.orientation)
        .process_model(1)
        .initial_state(initial_state)
        .build()
        .unwrap();
    SimulatedTrack {
        data,
        trajectory: Trajectory::correlated(locations, velocities),
    }
}
