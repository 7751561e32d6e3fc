//! 혈류 모델: Hagen–Poiseuille 식, 매개변수 스윕, 시나리오 비교.

pub mod poiseuille;
pub mod scenario;
pub mod sweep;

pub use poiseuille::{
    flow_rate, from_ml_per_s, pressure_drop, pressure_gradient, to_ml_per_s, vascular_resistance,
    FlowError, VesselParams,
};
pub use scenario::{
    compare_scenarios, exceeds_threshold, target_flow, Scenario, ScenarioKind, ScenarioResult,
    HIGH_PRESSURE_THRESHOLD_PA, SCENARIOS,
};
pub use sweep::{linspace, sweep_flow, SweepAxis};
