use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::flow::{self, ScenarioResult};
use crate::format::{format_axis, format_number};
use crate::i18n::{keys, Translator};
use crate::simulation::{self, SimulationInput, SimulationReport};
use crate::units::{convert_pressure, mm_to_m, FlowUnit, PressureUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FlowRate,
    PressureDrop,
    Sweep,
    Scenarios,
    Report,
    Settings,
    Exit,
}

/// 그래프 데이터로 출력할 곡선.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Radius,
    Viscosity,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MENU_TITLE));
    for key in [
        keys::MENU_FLOW,
        keys::MENU_PRESSURE,
        keys::MENU_SWEEP,
        keys::MENU_SCENARIOS,
        keys::MENU_REPORT,
        keys::MENU_SETTINGS,
        keys::MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::FlowRate),
        "2" => Some(MenuChoice::PressureDrop),
        "3" => Some(MenuChoice::Sweep),
        "4" => Some(MenuChoice::Scenarios),
        "5" => Some(MenuChoice::Report),
        "6" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 유량 계산 메뉴를 처리한다.
pub fn handle_flow_rate(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let input = read_vessel(tr, &cfg.defaults)?;
    let q = input.vessel().flow_rate()?;
    println!("{}", flow_line(tr, q, input.flow_unit));
    Ok(())
}

/// 필요 압력 계산 메뉴를 처리한다.
pub fn handle_pressure_drop(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let d = &cfg.defaults;
    let unit = d.flow_unit;
    let radius_mm = read_f64_or(tr, &tr.t(keys::PROMPT_RADIUS), d.radius_mm)?;
    let q_default = unit.from_m3_per_s(d.vessel().flow_rate()?);
    let q = read_f64_or(
        tr,
        &tr.tf(keys::PROMPT_FLOW, &[("unit", unit.label().to_string())]),
        q_default,
    )?;
    let eta = read_f64_or(tr, &tr.t(keys::PROMPT_VISCOSITY), d.viscosity_pa_s)?;
    let length = read_f64_or(tr, &tr.t(keys::PROMPT_LENGTH), d.length_m)?;
    let dp = flow::pressure_drop(mm_to_m(radius_mm), unit.to_m3_per_s(q), eta, length)?;
    println!("{}", pressure_line(tr, dp));
    Ok(())
}

/// 스윕(그래프 데이터) 메뉴를 처리한다. 나머지 변수는 기본 입력값을 쓴다.
pub fn handle_sweep(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let curve = loop {
        match read_line(&tr.t(keys::PROMPT_SWEEP_AXIS))?.trim() {
            "1" => break Curve::Radius,
            "2" => break Curve::Viscosity,
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let report = simulation::run(&cfg.defaults)?;
    print_curve(tr, &report, curve);
    Ok(())
}

/// 시나리오 비교 메뉴를 처리한다.
pub fn handle_scenarios(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let d = &cfg.defaults;
    let baseline = read_f64_or(tr, &tr.t(keys::PROMPT_BASELINE), d.baseline_pressure_pa)?;
    let length = read_f64_or(tr, &tr.t(keys::PROMPT_LENGTH), d.length_m)?;
    let q_target = flow::target_flow(baseline, length)?;
    let results = flow::compare_scenarios(q_target, length)?;
    print_scenarios(tr, q_target, d.flow_unit, &results);
    Ok(())
}

/// 전체 보고서 메뉴를 처리한다.
pub fn handle_report(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let mut input = read_vessel(tr, &cfg.defaults)?;
    input.baseline_pressure_pa =
        read_f64_or(tr, &tr.t(keys::PROMPT_BASELINE), input.baseline_pressure_pa)?;
    let report = simulation::run(&input)?;
    print_report(tr, &report);
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT_UNIT,
            &[("unit", cfg.defaults.flow_unit.label().to_string())]
        )
    );
    println!("{}", tr.t(keys::SETTINGS_UNIT_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let Some(unit) = parse_unit_choice(&sel) else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
        return Ok(());
    };
    cfg.defaults.flow_unit = unit;
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CHANGED,
            &[("unit", cfg.defaults.flow_unit.label().to_string())]
        )
    );
    Ok(())
}

fn parse_unit_choice(sel: &str) -> Option<FlowUnit> {
    match sel.trim() {
        "1" => Some(FlowUnit::MilliliterPerSecond),
        "2" => Some(FlowUnit::CubicMeterPerSecond),
        _ => None,
    }
}

/// 유량 결과 한 줄. m³/s는 아주 작은 값이라 지수 표기를 쓴다.
pub fn flow_line(tr: &Translator, q_m3_s: f64, unit: FlowUnit) -> String {
    tr.tf(
        keys::RESULT_FLOW,
        &[("q", format_flow(unit.from_m3_per_s(q_m3_s), unit)), ("unit", unit.label().to_string())],
    )
}

/// 표시 단위에 맞춘 유량 문자열. m³/s 값은 1e-6 이하라 고정 소수점 4자리로는
/// 0.0000이 되므로 유효숫자 5자리 지수 표기로 쓴다.
pub fn format_flow(value: f64, unit: FlowUnit) -> String {
    match unit {
        FlowUnit::MilliliterPerSecond => format_number(value, 4),
        FlowUnit::CubicMeterPerSecond => format!("{value:.4e}"),
    }
}

/// 필요 압력 결과 한 줄(Pa + mmHg).
pub fn pressure_line(tr: &Translator, dp_pa: f64) -> String {
    let mmhg = convert_pressure(dp_pa, PressureUnit::Pascal, PressureUnit::MmHg);
    tr.tf(
        keys::RESULT_PRESSURE,
        &[("dp", format_number(dp_pa, 3)), ("mmhg", format_number(mmhg, 2))],
    )
}

/// 곡선 데이터를 탭으로 구분해 출력한다.
pub fn print_curve(tr: &Translator, report: &SimulationReport, curve: Curve) {
    let (x_label, points) = match curve {
        Curve::Radius => ("r (mm)", &report.radius_curve),
        Curve::Viscosity => ("η (Pa·s)", &report.viscosity_curve),
    };
    println!(
        "{}",
        tr.tf(
            keys::RESULT_SWEEP_HEADER,
            &[("x", x_label.to_string()), ("unit", report.unit_label().to_string())]
        )
    );
    for [x, q] in points {
        println!("{}\t{}", format_number(*x, 4), format_flow(*q, report.input.flow_unit));
    }
}

/// 시나리오별 필요 압력을 출력한다.
pub fn print_scenarios(tr: &Translator, q_target_m3_s: f64, unit: FlowUnit, results: &[ScenarioResult]) {
    println!("\n{}", tr.t(keys::PRESSURE_HEADING));
    println!("{}", target_line(tr, q_target_m3_s, unit));
    println!("{}", tr.t(keys::PRESSURE_FORMULA));
    println!("{}", tr.t(keys::PRESSURE_COMPARE));
    for r in results {
        let label = tr.tf(
            keys::PRESSURE_BAR_LABEL,
            &[
                ("name", tr.t(r.scenario.kind.i18n_key())),
                ("r", format!("{:.2}", r.scenario.radius_mm)),
                ("eta", format!("{:.3}", r.scenario.viscosity_pa_s)),
            ],
        );
        let value = tr.tf(
            keys::PRESSURE_BAR_VALUE,
            &[
                ("dp", format_number(r.required_pressure_pa, 3)),
                ("grad", format_axis(r.gradient_pa_per_m)),
            ],
        );
        println!("  {label}: {value}");
    }
    if flow::exceeds_threshold(results) {
        println!("! {}", tr.t(keys::PRESSURE_WARNING));
    }
}

/// "기준 유량(Q_target) = …" 줄.
pub fn target_line(tr: &Translator, q_target_m3_s: f64, unit: FlowUnit) -> String {
    tr.tf(
        keys::PRESSURE_TARGET,
        &[
            ("q", format_flow(unit.from_m3_per_s(q_target_m3_s), unit)),
            ("unit", unit.label().to_string()),
        ],
    )
}

/// 전체 보고서를 출력한다. 곡선은 생략한다.
pub fn print_report(tr: &Translator, report: &SimulationReport) {
    let input = &report.input;
    println!("\n{}", tr.t(keys::FLOW_HEADING));
    println!("{}", tr.t(keys::FLOW_FORMULA));
    println!("{}", substitution_line(tr, report));
    print_scenarios(tr, report.target_flow_m3_s, input.flow_unit, &report.scenarios);
}

/// "대입값: r = …" 줄.
pub fn substitution_line(tr: &Translator, report: &SimulationReport) -> String {
    let input = &report.input;
    tr.tf(
        keys::FLOW_SUBSTITUTION,
        &[
            ("r", format_number(input.radius_mm, 3)),
            ("dp", format_number(input.pressure_diff_pa, 0)),
            ("eta", format_number(input.viscosity_pa_s, 3)),
            ("l", format_number(input.length_m, 2)),
            ("q", format_flow(report.flow_display, input.flow_unit)),
            ("unit", report.unit_label().to_string()),
        ],
    )
}

fn read_vessel(tr: &Translator, defaults: &SimulationInput) -> Result<SimulationInput, AppError> {
    Ok(SimulationInput {
        radius_mm: read_f64_or(tr, &tr.t(keys::PROMPT_RADIUS), defaults.radius_mm)?,
        pressure_diff_pa: read_f64_or(tr, &tr.t(keys::PROMPT_PRESSURE), defaults.pressure_diff_pa)?,
        viscosity_pa_s: read_f64_or(tr, &tr.t(keys::PROMPT_VISCOSITY), defaults.viscosity_pa_s)?,
        length_m: read_f64_or(tr, &tr.t(keys::PROMPT_LENGTH), defaults.length_m)?,
        ..*defaults
    })
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 숫자를 읽는다. 빈 입력이면 `default`를 쓴다.
fn read_f64_or(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    let prompt = format!("{}[{default}] ", prompt);
    loop {
        let s = read_line(&prompt)?;
        match parse_number_or(&s, default) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn parse_number_or(s: &str, default: f64) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(default);
    }
    s.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers() {
        assert_eq!(parse_menu(" 1\n"), Some(MenuChoice::FlowRate));
        assert_eq!(parse_menu("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu("9"), None);
    }

    #[test]
    fn number_input_with_default_and_separators() {
        assert_eq!(parse_number_or("\n", 0.1), Some(0.1));
        assert_eq!(parse_number_or("1,500", 0.0), Some(1500.0));
        assert_eq!(parse_number_or("abc", 0.0), None);
    }

    #[test]
    fn result_lines() {
        let tr = Translator::new("ko");
        let q = flow::flow_rate(0.001, 1000.0, 0.004, 0.1).unwrap();
        assert_eq!(
            flow_line(&tr, q, FlowUnit::MilliliterPerSecond),
            "유량 Q = 0.9817 mL/s"
        );
        assert!(pressure_line(&tr, 5333.0).contains("40.00 mmHg"));
    }

    #[test]
    fn unit_choice_parsing() {
        assert_eq!(parse_unit_choice("1\n"), Some(FlowUnit::MilliliterPerSecond));
        assert_eq!(parse_unit_choice(" 2 "), Some(FlowUnit::CubicMeterPerSecond));
        assert_eq!(parse_unit_choice("3"), None);
        assert_eq!(parse_unit_choice("m3"), None);
    }

    #[test]
    fn cubic_meter_lines_use_exponent_notation() {
        let tr = Translator::new("en");
        let input = SimulationInput {
            flow_unit: FlowUnit::CubicMeterPerSecond,
            ..SimulationInput::default()
        };
        let report = simulation::run(&input).unwrap();
        let line = substitution_line(&tr, &report);
        assert!(line.contains("Q = 9.8175e-7 m³/s"), "{line}");
        let target = target_line(&tr, report.target_flow_m3_s, FlowUnit::CubicMeterPerSecond);
        assert_eq!(target, "Reference flow (Q_target) = 1.9635e-7 m³/s");
        let target_ml = target_line(&tr, report.target_flow_m3_s, FlowUnit::MilliliterPerSecond);
        assert_eq!(target_ml, "Reference flow (Q_target) = 0.1963 mL/s");
    }

    #[test]
    fn substitution_matches_inputs() {
        let tr = Translator::new("en");
        let report = simulation::run(&SimulationInput::default()).unwrap();
        let line = substitution_line(&tr, &report);
        assert!(line.contains("r = 1.000 mm"), "{line}");
        assert!(line.contains("ΔP = 1,000 Pa"), "{line}");
        assert!(line.contains("Q = 0.9817 mL/s"), "{line}");
    }
}
