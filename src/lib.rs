//! 혈류 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코드를 쓴다.

pub mod app;
pub mod config;
pub mod flow;
pub mod fonts;
pub mod format;
pub mod i18n;
pub mod simulation;
pub mod ui_cli;
pub mod units;
