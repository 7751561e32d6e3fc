use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flow::poiseuille::ML_PER_M3;

/// 단위 문자열 해석 실패.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("알 수 없는 단위: {0}")]
pub struct UnitParseError(pub String);

/// 유량 표시 단위. 내부 기준은 m³/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowUnit {
    #[default]
    MilliliterPerSecond,
    CubicMeterPerSecond,
}

impl FlowUnit {
    pub const ALL: [FlowUnit; 2] = [FlowUnit::MilliliterPerSecond, FlowUnit::CubicMeterPerSecond];

    /// 화면에 붙는 단위 기호
    pub fn label(self) -> &'static str {
        match self {
            FlowUnit::MilliliterPerSecond => "mL/s",
            FlowUnit::CubicMeterPerSecond => "m³/s",
        }
    }

    /// m³/s 값을 이 단위로 바꾼다.
    pub fn from_m3_per_s(self, value: f64) -> f64 {
        match self {
            FlowUnit::MilliliterPerSecond => value * ML_PER_M3,
            FlowUnit::CubicMeterPerSecond => value,
        }
    }

    /// 이 단위의 값을 m³/s로 바꾼다.
    pub fn to_m3_per_s(self, value: f64) -> f64 {
        match self {
            FlowUnit::MilliliterPerSecond => value / ML_PER_M3,
            FlowUnit::CubicMeterPerSecond => value,
        }
    }
}

impl FromStr for FlowUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ml/s" | "ml" | "mls" => Ok(FlowUnit::MilliliterPerSecond),
            "m3/s" | "m³/s" | "m3" | "m^3/s" => Ok(FlowUnit::CubicMeterPerSecond),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 유량 단위를 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    to.from_m3_per_s(from.to_m3_per_s(value))
}
