//! 입력값 전체를 받아 화면에 필요한 모든 값을 한 번에 다시 계산한다.
//!
//! GUI/CLI는 입력이 바뀔 때마다 [`run`]을 호출하고 결과를 그대로 그린다.
//! 이전 계산 결과는 재사용하지 않는다.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::flow::{self, FlowError, ScenarioResult, SweepAxis, VesselParams};
use crate::units::{mm_to_m, FlowUnit};

/// 반지름 입력 범위 [mm]
pub const RADIUS_RANGE_MM: RangeInclusive<f64> = 0.2..=3.0;
pub const RADIUS_STEP_MM: f64 = 0.1;
/// 선택 가능한 혈액 점도 [Pa·s]
pub const VISCOSITY_CHOICES: [f64; 3] = [0.003, 0.004, 0.005];
/// 압력차 입력 범위 [Pa]
pub const PRESSURE_RANGE_PA: RangeInclusive<f64> = 100.0..=3000.0;
/// 혈관 길이 입력 범위 [m]
pub const LENGTH_RANGE_M: RangeInclusive<f64> = 0.05..=0.30;
/// 기준 압력차 ΔP_base 입력 범위 [Pa]
pub const BASELINE_PRESSURE_RANGE_PA: RangeInclusive<f64> = 50.0..=2000.0;

/// Q vs r 그래프의 반지름 구간 [mm]
pub const RADIUS_SWEEP_MM: RangeInclusive<f64> = 0.2..=3.0;
/// Q vs η 그래프의 점도 구간 [Pa·s]
pub const VISCOSITY_SWEEP_PA_S: RangeInclusive<f64> = 0.003..=0.007;
/// 그래프 한 개당 점 개수
pub const SWEEP_POINTS: usize = 200;

/// 사용자가 조절하는 값 전체.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    pub radius_mm: f64,
    pub viscosity_pa_s: f64,
    pub pressure_diff_pa: f64,
    pub length_m: f64,
    pub baseline_pressure_pa: f64,
    pub flow_unit: FlowUnit,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            radius_mm: 1.0,
            viscosity_pa_s: 0.004,
            pressure_diff_pa: 1000.0,
            length_m: 0.10,
            baseline_pressure_pa: 200.0,
            flow_unit: FlowUnit::MilliliterPerSecond,
        }
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// 허용된 점도 중 가장 가까운 값.
pub fn nearest_viscosity_choice(value: f64) -> f64 {
    VISCOSITY_CHOICES
        .iter()
        .copied()
        .min_by(|a, b| {
            (a - value)
                .abs()
                .partial_cmp(&(b - value).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(VISCOSITY_CHOICES[1])
}

impl SimulationInput {
    /// 모든 값을 입력 범위 안으로 맞춘다. 점도는 가장 가까운 선택지로 맞춘다.
    pub fn clamped(&self) -> Self {
        Self {
            radius_mm: clamp_to(self.radius_mm, &RADIUS_RANGE_MM),
            viscosity_pa_s: nearest_viscosity_choice(self.viscosity_pa_s),
            pressure_diff_pa: clamp_to(self.pressure_diff_pa, &PRESSURE_RANGE_PA),
            length_m: clamp_to(self.length_m, &LENGTH_RANGE_M),
            baseline_pressure_pa: clamp_to(self.baseline_pressure_pa, &BASELINE_PRESSURE_RANGE_PA),
            flow_unit: self.flow_unit,
        }
    }

    /// 계산용 SI 값 묶음.
    pub fn vessel(&self) -> VesselParams {
        VesselParams {
            radius_m: mm_to_m(self.radius_mm),
            pressure_diff_pa: self.pressure_diff_pa,
            viscosity_pa_s: self.viscosity_pa_s,
            length_m: self.length_m,
        }
    }
}

/// 한 번의 재계산 결과. 그래프 점은 `[x, Q(표시 단위)]` 형태이다.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub input: SimulationInput,
    pub flow_m3_s: f64,
    pub flow_display: f64,
    /// x = 반지름 [mm]
    pub radius_curve: Vec<[f64; 2]>,
    /// x = 점도 [Pa·s]
    pub viscosity_curve: Vec<[f64; 2]>,
    pub target_flow_m3_s: f64,
    pub target_flow_display: f64,
    pub scenarios: Vec<ScenarioResult>,
    pub high_pressure_warning: bool,
}

impl SimulationReport {
    pub fn unit_label(&self) -> &'static str {
        self.input.flow_unit.label()
    }

    /// 시나리오 중 가장 큰 필요 압력차 [Pa].
    pub fn max_required_pressure_pa(&self) -> Option<f64> {
        self.scenarios
            .iter()
            .map(|s| s.required_pressure_pa)
            .reduce(f64::max)
    }
}

fn curve(
    base: &VesselParams,
    axis: SweepAxis,
    xs: &[f64],
    to_si: impl Fn(f64) -> f64,
    unit: FlowUnit,
) -> Result<Vec<[f64; 2]>, FlowError> {
    let si: Vec<f64> = xs.iter().map(|&x| to_si(x)).collect();
    let flows = flow::sweep_flow(base, axis, &si)?;
    Ok(xs
        .iter()
        .zip(flows)
        .map(|(&x, q)| [x, unit.from_m3_per_s(q)])
        .collect())
}

/// 입력 전체로부터 보고서를 새로 계산한다.
pub fn run(input: &SimulationInput) -> Result<SimulationReport, FlowError> {
    let unit = input.flow_unit;
    let vessel = input.vessel();

    let flow_m3_s = vessel.flow_rate()?;

    let radii_mm = flow::linspace(*RADIUS_SWEEP_MM.start(), *RADIUS_SWEEP_MM.end(), SWEEP_POINTS);
    let radius_curve = curve(&vessel, SweepAxis::Radius, &radii_mm, mm_to_m, unit)?;

    let etas = flow::linspace(
        *VISCOSITY_SWEEP_PA_S.start(),
        *VISCOSITY_SWEEP_PA_S.end(),
        SWEEP_POINTS,
    );
    let viscosity_curve = curve(&vessel, SweepAxis::Viscosity, &etas, |x| x, unit)?;

    let target_flow_m3_s = flow::target_flow(input.baseline_pressure_pa, input.length_m)?;
    let scenarios = flow::compare_scenarios(target_flow_m3_s, input.length_m)?;
    let high_pressure_warning = flow::exceeds_threshold(&scenarios);
    if high_pressure_warning {
        tracing::debug!(
            baseline_pa = input.baseline_pressure_pa,
            "required pressure exceeds advisory threshold"
        );
    }

    Ok(SimulationReport {
        input: *input,
        flow_m3_s,
        flow_display: unit.from_m3_per_s(flow_m3_s),
        radius_curve,
        viscosity_curve,
        target_flow_m3_s,
        target_flow_display: unit.from_m3_per_s(target_flow_m3_s),
        scenarios,
        high_pressure_warning,
    })
}
