//! 매개변수 스윕: 한 변수만 바꿔가며 유량을 계산해 그래프 데이터를 만든다.

use std::fmt;

use super::poiseuille::{FlowError, VesselParams};

/// 스윕 대상 변수.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    /// 반지름 [m]
    Radius,
    /// 점도 [Pa·s]
    Viscosity,
    /// 압력차 [Pa]
    PressureDifference,
    /// 길이 [m]
    Length,
}

impl SweepAxis {
    fn apply(self, base: &VesselParams, value: f64) -> VesselParams {
        let mut v = *base;
        match self {
            SweepAxis::Radius => v.radius_m = value,
            SweepAxis::Viscosity => v.viscosity_pa_s = value,
            SweepAxis::PressureDifference => v.pressure_diff_pa = value,
            SweepAxis::Length => v.length_m = value,
        }
        v
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radius => write!(f, "r"),
            Self::Viscosity => write!(f, "η"),
            Self::PressureDifference => write!(f, "ΔP"),
            Self::Length => write!(f, "L"),
        }
    }
}

/// `start`부터 `end`까지 `n`개의 등간격 점. 양 끝점을 포함한다.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// `axis`만 `values`로 바꿔가며 유량 [m³/s]을 계산한다. 입력 순서를 유지한다.
pub fn sweep_flow(base: &VesselParams, axis: SweepAxis, values: &[f64]) -> Result<Vec<f64>, FlowError> {
    values
        .iter()
        .map(|&value| axis.apply(base, value).flow_rate())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> VesselParams {
        VesselParams {
            radius_m: 0.001,
            pressure_diff_pa: 1000.0,
            viscosity_pa_s: 0.004,
            length_m: 0.1,
        }
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        let pts = linspace(0.2, 3.0, 200);
        assert_eq!(pts.len(), 200);
        assert_eq!(pts[0], 0.2);
        assert_eq!(pts[199], 3.0);
        assert!(pts.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn sweep_matches_pointwise() {
        let radii = linspace(0.0002, 0.003, 7);
        let flows = sweep_flow(&base(), SweepAxis::Radius, &radii).unwrap();
        for (r, q) in radii.iter().zip(&flows) {
            let expected = VesselParams { radius_m: *r, ..base() }.flow_rate().unwrap();
            assert_eq!(*q, expected);
        }
    }

    #[test]
    fn viscosity_sweep_decreases() {
        let etas = linspace(0.003, 0.007, 50);
        let flows = sweep_flow(&base(), SweepAxis::Viscosity, &etas).unwrap();
        assert!(flows.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn sweep_propagates_domain_error() {
        let res = sweep_flow(&base(), SweepAxis::Length, &[0.1, 0.0, 0.2]);
        assert_eq!(res, Err(FlowError::NonPositiveLength(0.0)));
    }
}
