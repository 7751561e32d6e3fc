//! 단위 정의 및 변환 모듈 모음.

pub mod flow;
pub mod length;
pub mod pressure;

pub use flow::{convert_flow, FlowUnit, UnitParseError};
pub use length::{convert_length, mm_to_m, LengthUnit};
pub use pressure::{convert_pressure, PressureUnit, PA_PER_MMHG};
