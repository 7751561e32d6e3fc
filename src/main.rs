use std::path::PathBuf;
use std::process::ExitCode;

use blood_flow_simulator::{
    app::{self, AppError},
    config, flow, i18n, simulation,
    simulation::SimulationInput,
    ui_cli::{self, Curve},
    units::{mm_to_m, FlowUnit},
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "blood_flow_simulator_cli")]
#[command(about = "Hagen–Poiseuille 혈류 시뮬레이터 (CLI)", long_about = None)]
struct Cli {
    /// 언어: auto/ko/en-us
    #[arg(short = 'L', long, default_value = "auto", global = true)]
    lang: String,
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 유량 Q 계산
    Flow(VesselArgs),
    /// 주어진 유량을 유지하는 데 필요한 압력차 계산
    Pressure {
        /// 유량 (표시 단위 기준)
        #[arg(long)]
        flow: f64,
        #[command(flatten)]
        vessel: VesselArgs,
    },
    /// 그래프용 스윕 데이터 출력
    Sweep {
        #[arg(value_enum)]
        axis: AxisArg,
        #[command(flatten)]
        vessel: VesselArgs,
    },
    /// 정상인/질환자 시나리오 비교
    Scenarios {
        /// 정상 기준 ΔP_base [Pa]
        #[arg(long)]
        baseline: Option<f64>,
        /// 혈관 길이 L [m]
        #[arg(long)]
        length: Option<f64>,
        /// 유량 표시 단위 (mL/s, m3/s)
        #[arg(long)]
        unit: Option<FlowUnit>,
    },
    /// 전체 보고서
    Report {
        /// 정상 기준 ΔP_base [Pa]
        #[arg(long)]
        baseline: Option<f64>,
        #[command(flatten)]
        vessel: VesselArgs,
    },
    /// 대화형 메뉴 (기본)
    Interactive,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    Radius,
    Viscosity,
}

/// 생략한 값은 설정 파일의 기본 입력값을 쓴다.
#[derive(Args)]
struct VesselArgs {
    /// 혈관 반지름 r [mm]
    #[arg(long, short = 'r')]
    radius: Option<f64>,
    /// 압력차 ΔP [Pa]
    #[arg(long, short = 'p')]
    pressure: Option<f64>,
    /// 혈액 점도 η [Pa·s]
    #[arg(long, short = 'e')]
    viscosity: Option<f64>,
    /// 혈관 길이 L [m]
    #[arg(long, short = 'l')]
    length: Option<f64>,
    /// 유량 표시 단위 (mL/s, m3/s)
    #[arg(long, short = 'u')]
    unit: Option<FlowUnit>,
}

impl VesselArgs {
    fn merge(&self, defaults: &SimulationInput) -> SimulationInput {
        SimulationInput {
            radius_mm: self.radius.unwrap_or(defaults.radius_mm),
            pressure_diff_pa: self.pressure.unwrap_or(defaults.pressure_diff_pa),
            viscosity_pa_s: self.viscosity.unwrap_or(defaults.viscosity_pa_s),
            length_m: self.length.unwrap_or(defaults.length_m),
            flow_unit: self.unit.unwrap_or(defaults.flow_unit),
            ..*defaults
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_or_default_from(path)?,
        None => config::load_or_default()?,
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    tracing::debug!(lang = %lang, "resolved language");
    let defaults = cfg.defaults;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Flow(vessel) => {
            let input = vessel.merge(&defaults);
            let q = input.vessel().flow_rate()?;
            println!("{}", ui_cli::flow_line(&tr, q, input.flow_unit));
        }
        Commands::Pressure { flow: q, vessel } => {
            let input = vessel.merge(&defaults);
            let dp = flow::pressure_drop(
                mm_to_m(input.radius_mm),
                input.flow_unit.to_m3_per_s(q),
                input.viscosity_pa_s,
                input.length_m,
            )?;
            println!("{}", ui_cli::pressure_line(&tr, dp));
        }
        Commands::Sweep { axis, vessel } => {
            let report = simulation::run(&vessel.merge(&defaults))?;
            let curve = match axis {
                AxisArg::Radius => Curve::Radius,
                AxisArg::Viscosity => Curve::Viscosity,
            };
            ui_cli::print_curve(&tr, &report, curve);
        }
        Commands::Scenarios {
            baseline,
            length,
            unit,
        } => {
            let length = length.unwrap_or(defaults.length_m);
            let q_target = flow::target_flow(baseline.unwrap_or(defaults.baseline_pressure_pa), length)?;
            let results = flow::compare_scenarios(q_target, length)?;
            ui_cli::print_scenarios(&tr, q_target, unit.unwrap_or(defaults.flow_unit), &results);
        }
        Commands::Report { baseline, vessel } => {
            let mut input = vessel.merge(&defaults);
            if let Some(b) = baseline {
                input.baseline_pressure_pa = b;
            }
            let report = simulation::run(&input)?;
            ui_cli::print_report(&tr, &report);
        }
        Commands::Interactive => app::run(&mut cfg, &tr)?,
    }
    Ok(())
}
