use serde::{Deserialize, Serialize};

/// 혈압 표시에 쓰는 압력 단위. 내부 기준은 Pa이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    MmHg,
}

/// 1 mmHg = 133.322 Pa
pub const PA_PER_MMHG: f64 = 133.322;

fn to_pa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value,
        PressureUnit::MmHg => value * PA_PER_MMHG,
    }
}

fn from_pa(value_pa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value_pa,
        PressureUnit::MmHg => value_pa / PA_PER_MMHG,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    from_pa(to_pa(value, from), to)
}
