use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::flow::FlowError;
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice};
use crate::units::UnitParseError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 혈류 계산 정의역 오류
    #[error("계산 오류: {0}")]
    Flow(#[from] FlowError),
    /// 단위 해석 오류
    #[error("단위 오류: {0}")]
    Unit(#[from] UnitParseError),
}

/// 대화형 CLI 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::FlowRate => ui_cli::handle_flow_rate(tr, config),
            MenuChoice::PressureDrop => ui_cli::handle_pressure_drop(tr, config),
            MenuChoice::Sweep => ui_cli::handle_sweep(tr, config),
            MenuChoice::Scenarios => ui_cli::handle_scenarios(tr, config),
            MenuChoice::Report => ui_cli::handle_report(tr, config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save().map_err(AppError::from)
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 계산 오류는 메뉴로 돌아간다
        match outcome {
            Err(AppError::Flow(e)) => {
                tracing::debug!(error = %e, "calculation rejected input");
                println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            other => other?,
        }
    }
    Ok(())
}
