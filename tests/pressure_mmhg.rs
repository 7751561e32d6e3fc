//! 필요 압력차를 mmHg로 표시하는 회귀 테스트.
use blood_flow_simulator::flow::HIGH_PRESSURE_THRESHOLD_PA;
use blood_flow_simulator::i18n::Translator;
use blood_flow_simulator::ui_cli::pressure_line;
use blood_flow_simulator::units::{convert_pressure, PressureUnit};

#[test]
fn threshold_is_forty_mmhg() {
    let mmhg = convert_pressure(HIGH_PRESSURE_THRESHOLD_PA, PressureUnit::Pascal, PressureUnit::MmHg);
    assert!((mmhg - 40.0).abs() < 1e-2, "expected ~40 mmHg, got {mmhg}");
}

#[test]
fn mmhg_to_pa_one_atmosphere() {
    // 760 mmHg => 101 325 Pa
    let pa = convert_pressure(760.0, PressureUnit::MmHg, PressureUnit::Pascal);
    assert!((pa - 101_325.0).abs() < 1.0);
}

#[test]
fn pressure_line_shows_both_units() {
    let tr = Translator::new("en-us");
    let line = pressure_line(&tr, 1333.22);
    assert!(line.contains("1,333"), "{line}");
    assert!(line.contains("10.00"), "{line}");
}
