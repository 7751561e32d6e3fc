//! Hagen–Poiseuille 관계식과 그 역식.
//!
//! 모든 함수는 SI 단위(m, Pa, Pa·s, m³/s)를 입력으로 받는다.

use std::f64::consts::PI;

use thiserror::Error;

/// mL/s 와 m³/s 사이의 환산 계수.
pub const ML_PER_M3: f64 = 1_000_000.0;

/// 식의 정의역을 벗어난 입력.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FlowError {
    /// 점도가 0 이하
    #[error("점도는 0보다 커야 합니다 (η = {0} Pa·s)")]
    NonPositiveViscosity(f64),
    /// 혈관 길이가 0 이하
    #[error("혈관 길이는 0보다 커야 합니다 (L = {0} m)")]
    NonPositiveLength(f64),
    /// 압력강하 계산에서 반지름이 0 이하
    #[error("혈관 반지름은 0보다 커야 합니다 (r = {0} m)")]
    NonPositiveRadius(f64),
    /// 유량 계산에서 반지름이 음수
    #[error("혈관 반지름은 음수일 수 없습니다 (r = {0} m)")]
    NegativeRadius(f64),
    /// NaN 또는 무한대
    #[error("유한하지 않은 값: {what} = {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// 혈관 한 구간을 나타내는 네 가지 물리량.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselParams {
    /// 반지름 [m]
    pub radius_m: f64,
    /// 압력차 [Pa]
    pub pressure_diff_pa: f64,
    /// 점도 [Pa·s]
    pub viscosity_pa_s: f64,
    /// 길이 [m]
    pub length_m: f64,
}

impl VesselParams {
    /// 현재 값으로 유량 [m³/s]을 계산한다.
    pub fn flow_rate(&self) -> Result<f64, FlowError> {
        flow_rate(
            self.radius_m,
            self.pressure_diff_pa,
            self.viscosity_pa_s,
            self.length_m,
        )
    }

    /// 같은 혈관에서 `flow_m3_s`를 흘리는 데 필요한 압력차 [Pa].
    pub fn pressure_drop_for(&self, flow_m3_s: f64) -> Result<f64, FlowError> {
        pressure_drop(self.radius_m, flow_m3_s, self.viscosity_pa_s, self.length_m)
    }
}

fn finite(what: &'static str, value: f64) -> Result<f64, FlowError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FlowError::NonFinite { what, value })
    }
}

fn check_viscosity_and_length(eta: f64, length_m: f64) -> Result<(), FlowError> {
    finite("eta", eta)?;
    finite("L", length_m)?;
    if eta <= 0.0 {
        return Err(FlowError::NonPositiveViscosity(eta));
    }
    if length_m <= 0.0 {
        return Err(FlowError::NonPositiveLength(length_m));
    }
    Ok(())
}

/// 유량 Q = π·r⁴·ΔP / (8·η·L) [m³/s].
///
/// r = 0 은 허용되며 유량 0을 돌려준다. ΔP의 부호는 흐름 방향을 뜻한다.
pub fn flow_rate(radius_m: f64, pressure_diff_pa: f64, eta: f64, length_m: f64) -> Result<f64, FlowError> {
    finite("r", radius_m)?;
    finite("dP", pressure_diff_pa)?;
    check_viscosity_and_length(eta, length_m)?;
    if radius_m < 0.0 {
        return Err(FlowError::NegativeRadius(radius_m));
    }
    Ok(PI * radius_m.powi(4) * pressure_diff_pa / (8.0 * eta * length_m))
}

/// 유량 Q를 유지하는 데 필요한 압력차 ΔP = 8·η·L·Q / (π·r⁴) [Pa].
pub fn pressure_drop(radius_m: f64, flow_m3_s: f64, eta: f64, length_m: f64) -> Result<f64, FlowError> {
    finite("Q", flow_m3_s)?;
    Ok(vascular_resistance(radius_m, eta, length_m)? * flow_m3_s)
}

/// 혈관 저항 R = 8·η·L / (π·r⁴) [Pa·s/m³]. ΔP = R·Q 관계를 만족한다.
pub fn vascular_resistance(radius_m: f64, eta: f64, length_m: f64) -> Result<f64, FlowError> {
    finite("r", radius_m)?;
    check_viscosity_and_length(eta, length_m)?;
    if radius_m <= 0.0 {
        return Err(FlowError::NonPositiveRadius(radius_m));
    }
    Ok(8.0 * eta * length_m / (PI * radius_m.powi(4)))
}

/// 단위 길이당 압력 구배 [Pa/m].
pub fn pressure_gradient(pressure_diff_pa: f64, length_m: f64) -> Result<f64, FlowError> {
    finite("dP", pressure_diff_pa)?;
    finite("L", length_m)?;
    if length_m <= 0.0 {
        return Err(FlowError::NonPositiveLength(length_m));
    }
    Ok(pressure_diff_pa / length_m)
}

/// m³/s → mL/s
pub fn to_ml_per_s(flow_m3_s: f64) -> f64 {
    flow_m3_s * ML_PER_M3
}

/// mL/s → m³/s
pub fn from_ml_per_s(flow_ml_s: f64) -> f64 {
    flow_ml_s / ML_PER_M3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(f64::MIN_POSITIVE)
    }

    #[test]
    fn default_vessel_flow_in_ml_per_s() {
        let q = flow_rate(0.001, 1000.0, 0.004, 0.10).unwrap();
        let expected = PI * 0.001f64.powi(4) * 1000.0 / (8.0 * 0.004 * 0.10);
        assert!(rel_close(q, expected, 1e-12));
        assert!((to_ml_per_s(q) - 0.9817).abs() < 1e-4, "q={}", to_ml_per_s(q));
    }

    #[test]
    fn zero_radius_gives_zero_flow() {
        assert_eq!(flow_rate(0.0, 1000.0, 0.004, 0.1).unwrap(), 0.0);
    }

    #[test]
    fn negative_pressure_reverses_flow() {
        let fwd = flow_rate(0.001, 500.0, 0.004, 0.1).unwrap();
        let back = flow_rate(0.001, -500.0, 0.004, 0.1).unwrap();
        assert_eq!(fwd, -back);
    }

    #[test]
    fn domain_errors() {
        assert_eq!(
            flow_rate(0.001, 1000.0, 0.0, 0.1),
            Err(FlowError::NonPositiveViscosity(0.0))
        );
        assert_eq!(
            flow_rate(0.001, 1000.0, 0.004, 0.0),
            Err(FlowError::NonPositiveLength(0.0))
        );
        assert_eq!(
            pressure_drop(0.0, 1e-9, 0.004, 0.1),
            Err(FlowError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            pressure_drop(0.001, 1e-9, 0.0, 0.1),
            Err(FlowError::NonPositiveViscosity(0.0))
        );
        assert_eq!(
            flow_rate(-0.001, 1000.0, 0.004, 0.1),
            Err(FlowError::NegativeRadius(-0.001))
        );
        assert!(matches!(
            flow_rate(f64::NAN, 1000.0, 0.004, 0.1),
            Err(FlowError::NonFinite { what: "r", .. })
        ));
    }

    #[test]
    fn resistance_links_pressure_and_flow() {
        let r = vascular_resistance(0.0012, 0.005, 0.2).unwrap();
        let q = 3.0e-7;
        assert!(rel_close(pressure_drop(0.0012, q, 0.005, 0.2).unwrap(), r * q, 1e-12));
    }

    #[test]
    fn vessel_params_delegate() {
        let v = VesselParams {
            radius_m: 0.0008,
            pressure_diff_pa: 1500.0,
            viscosity_pa_s: 0.003,
            length_m: 0.25,
        };
        let q = v.flow_rate().unwrap();
        assert!(rel_close(v.pressure_drop_for(q).unwrap(), 1500.0, 1e-12));
    }

    #[test]
    fn gradient_per_meter() {
        assert_eq!(pressure_gradient(200.0, 0.1).unwrap(), 2000.0);
        assert!(pressure_gradient(200.0, 0.0).is_err());
    }

    #[test]
    fn ml_conversion_roundtrip() {
        let q = 7.853_981_633_974_483e-10;
        assert_eq!(to_ml_per_s(q), q * 1e6);
        assert!(rel_close(from_ml_per_s(to_ml_per_s(q)), q, 1e-15));
    }
}
