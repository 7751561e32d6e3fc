//! 정상인과 질환자 비교용 시나리오 카탈로그.
//!
//! 기준 혈관(r = 1 mm, η = 0.004 Pa·s)에서 얻은 목표 유량을 각 시나리오가
//! 유지하려면 어느 정도의 압력차가 필요한지 계산한다.

use super::poiseuille::{self, FlowError, VesselParams};

/// 기준 혈관 반지름 [mm]
pub const BASELINE_RADIUS_MM: f64 = 1.0;
/// 기준 혈액 점도 [Pa·s]
pub const BASELINE_VISCOSITY_PA_S: f64 = 0.004;
/// 단일 구간 압력강하 경고 기준 [Pa] (약 40 mmHg)
pub const HIGH_PRESSURE_THRESHOLD_PA: f64 = 5333.0;

/// 시나리오 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Baseline,
    ArterialStiffening,
    Hyperlipidemia,
    Dehydration,
}

impl ScenarioKind {
    /// 번역 키
    pub fn i18n_key(self) -> &'static str {
        match self {
            ScenarioKind::Baseline => "scenario.baseline",
            ScenarioKind::ArterialStiffening => "scenario.arterial_stiffening",
            ScenarioKind::Hyperlipidemia => "scenario.hyperlipidemia",
            ScenarioKind::Dehydration => "scenario.dehydration",
        }
    }
}

/// 고정된 (반지름, 점도) 쌍으로 정의되는 생리학적 상태.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// 기본 표시 이름(한국어)
    pub name: &'static str,
    pub radius_mm: f64,
    pub viscosity_pa_s: f64,
}

impl Scenario {
    pub fn radius_m(&self) -> f64 {
        self.radius_mm / 1000.0
    }
}

/// 비교 대상 시나리오. 순서가 막대그래프 순서가 된다.
pub const SCENARIOS: [Scenario; 4] = [
    Scenario {
        kind: ScenarioKind::Baseline,
        name: "정상",
        radius_mm: 1.0,
        viscosity_pa_s: 0.004,
    },
    Scenario {
        kind: ScenarioKind::ArterialStiffening,
        name: "동맥경화",
        radius_mm: 0.7,
        viscosity_pa_s: 0.005,
    },
    Scenario {
        kind: ScenarioKind::Hyperlipidemia,
        name: "고지혈증",
        radius_mm: 1.0,
        viscosity_pa_s: 0.005,
    },
    Scenario {
        kind: ScenarioKind::Dehydration,
        name: "탈수",
        radius_mm: 1.0,
        viscosity_pa_s: 0.006,
    },
];

/// 시나리오별 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    /// 목표 유량 유지에 필요한 압력차 [Pa]
    pub required_pressure_pa: f64,
    /// 길이당 압력 구배 [Pa/m]
    pub gradient_pa_per_m: f64,
}

/// 기준 혈관에 `baseline_pressure_pa`를 걸었을 때의 목표 유량 [m³/s].
pub fn target_flow(baseline_pressure_pa: f64, length_m: f64) -> Result<f64, FlowError> {
    VesselParams {
        radius_m: BASELINE_RADIUS_MM / 1000.0,
        pressure_diff_pa: baseline_pressure_pa,
        viscosity_pa_s: BASELINE_VISCOSITY_PA_S,
        length_m,
    }
    .flow_rate()
}

/// 카탈로그 순서대로 각 시나리오가 `target_flow_m3_s`를 유지하는 데 필요한 압력차를 구한다.
pub fn compare_scenarios(target_flow_m3_s: f64, length_m: f64) -> Result<Vec<ScenarioResult>, FlowError> {
    SCENARIOS
        .iter()
        .map(|s| {
            let required = poiseuille::pressure_drop(s.radius_m(), target_flow_m3_s, s.viscosity_pa_s, length_m)?;
            Ok(ScenarioResult {
                scenario: *s,
                required_pressure_pa: required,
                gradient_pa_per_m: poiseuille::pressure_gradient(required, length_m)?,
            })
        })
        .collect()
}

/// 가장 큰 필요 압력차가 경고 기준을 넘는지 확인한다. 표시용 권고일 뿐이다.
pub fn exceeds_threshold(results: &[ScenarioResult]) -> bool {
    results
        .iter()
        .map(|r| r.required_pressure_pa)
        .fold(f64::NEG_INFINITY, f64::max)
        > HIGH_PRESSURE_THRESHOLD_PA
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn catalog_order_and_names() {
        let names: Vec<_> = SCENARIOS.iter().map(|s| s.name).collect();
        assert_eq!(names, ["정상", "동맥경화", "고지혈증", "탈수"]);
    }

    #[test]
    fn baseline_scenario_needs_baseline_pressure() {
        let q = target_flow(200.0, 0.1).unwrap();
        let results = compare_scenarios(q, 0.1).unwrap();
        assert!((results[0].required_pressure_pa - 200.0).abs() < 1e-9);
        assert!((results[0].gradient_pa_per_m - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn arterial_stiffening_closed_form() {
        let q = target_flow(200.0, 0.1).unwrap();
        // π·(1e-3)⁴·200 / (8·0.004·0.1)
        assert!((q - 1.963_495_408e-7).abs() < 1e-15);
        let results = compare_scenarios(q, 0.1).unwrap();
        let expected = 8.0 * 0.005 * 0.10 * q / (PI * 0.0007f64.powi(4));
        let got = results[1].required_pressure_pa;
        assert!((got - expected).abs() <= 1e-9 * expected, "got={got} expected={expected}");
    }

    #[test]
    fn threshold_is_strict() {
        let mk = |p| ScenarioResult {
            scenario: SCENARIOS[0],
            required_pressure_pa: p,
            gradient_pa_per_m: 0.0,
        };
        assert!(!exceeds_threshold(&[mk(100.0), mk(HIGH_PRESSURE_THRESHOLD_PA)]));
        assert!(exceeds_threshold(&[mk(100.0), mk(5333.5)]));
        assert!(!exceeds_threshold(&[]));
    }

    #[test]
    fn default_baseline_stays_below_threshold() {
        let q = target_flow(200.0, 0.1).unwrap();
        assert!(!exceeds_threshold(&compare_scenarios(q, 0.1).unwrap()));
        let q = target_flow(2000.0, 0.1).unwrap();
        assert!(exceeds_threshold(&compare_scenarios(q, 0.1).unwrap()));
    }
}
