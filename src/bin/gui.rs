#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use blood_flow_simulator::{
    config,
    flow::FlowError,
    fonts,
    format::{format_axis, format_number},
    i18n::{self, keys, Translator},
    simulation::{
        self, SimulationInput, SimulationReport, BASELINE_PRESSURE_RANGE_PA, LENGTH_RANGE_M,
        PRESSURE_RANGE_PA, RADIUS_RANGE_MM, RADIUS_STEP_MM, VISCOSITY_CHOICES,
    },
    ui_cli,
    units::FlowUnit,
};
use clap::Parser;
use eframe::{egui, App, Frame};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path};

/// 시나리오 막대 색상 (정상, 동맥경화, 고지혈증, 탈수)
const BAR_COLORS: [egui::Color32; 4] = [
    egui::Color32::from_rgb(0x2E, 0x86, 0xAB),
    egui::Color32::from_rgb(0xF1, 0x8F, 0x01),
    egui::Color32::from_rgb(0xC7, 0x3E, 0x1D),
    egui::Color32::from_rgb(0x6C, 0x5B, 0x7B),
];
const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(0xD9, 0x8C, 0x00);

#[derive(Parser)]
#[command(name = "blood_flow_simulator", about = "혈류 시뮬레이터 (GUI)")]
struct GuiArgs {
    /// 언어: auto/ko/en-us
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt::init();
    let args = GuiArgs::parse();

    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    // --lang은 이번 실행에만 적용한다. 설정 파일의 값("auto" 포함)은 그대로 둔다.
    let lang = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, app_cfg.language_pack_dir.as_deref());

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 860.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        &tr.t(keys::APP_WINDOW_TITLE),
        options,
        Box::new(move |cc| {
            let font_status = setup_fonts(&cc.egui_ctx, app_cfg.custom_font_path.as_deref())
                .err()
                .map(|_| tr.t(keys::FONT_NOT_FOUND));
            cc.egui_ctx.set_pixels_per_point(app_cfg.ui_scale);
            let mut app = GuiApp::new(app_cfg, &lang);
            app.font_status = font_status;
            Box::new(app)
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 폰트를 찾아 적용한다. 찾지 못하면 egui 기본 폰트를 그대로 쓴다.
fn setup_fonts(ctx: &egui::Context, custom: Option<&str>) -> Result<(), String> {
    match fonts::resolve_korean_font(custom.map(Path::new)) {
        Some(font) => {
            let name = font.name();
            apply_font_bytes(ctx, font.bytes, &name);
            Ok(())
        }
        None => Err("Font not found".into()),
    }
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다. 읽을 수 없는 파일은 적용하지 않는다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let font = fonts::resolve_from(&[Path::new(path).to_path_buf()], &[])
        .ok_or_else(|| format!("Font file not found or not a TTF/OTF font: {path}"))?;
    apply_font_bytes(ctx, font.bytes, "user_font");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    input: SimulationInput,
    report: Result<SimulationReport, FlowError>,
    show_settings_modal: bool,
    lang_input: String,
    ui_scale: f32,
    custom_font_path: String,
    font_status: Option<String>,
    save_status: Option<String>,
}

impl GuiApp {
    /// `cli_lang`이 "auto"가 아니면 설정보다 우선한다.
    fn new(config: config::Config, cli_lang: &str) -> Self {
        let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
        let input = config.defaults.clamped();
        Self {
            tr,
            input,
            report: simulation::run(&input),
            show_settings_modal: false,
            lang_input: config.language.clone(),
            ui_scale: config.ui_scale,
            custom_font_path: config.custom_font_path.clone().unwrap_or_default(),
            font_status: None,
            save_status: None,
            config,
        }
    }

    /// 입력이 바뀌면 전체를 다시 계산한다.
    fn recompute(&mut self) {
        self.input = self.input.clamped();
        self.report = simulation::run(&self.input);
        if let Err(e) = &self.report {
            tracing::warn!(error = %e, "simulation rejected input");
        }
    }

    /// 좌측 변수 조절 패널. 값이 바뀌었으면 true.
    fn ui_inputs(&mut self, ui: &mut egui::Ui) -> bool {
        let tr = self.tr.clone();
        let mut changed = false;
        ui.heading(tr.t(keys::SIDEBAR_HEADER));
        ui.add_space(8.0);

        ui.label(tr.t(keys::INPUT_RADIUS));
        changed |= ui
            .add(egui::Slider::new(&mut self.input.radius_mm, RADIUS_RANGE_MM).step_by(RADIUS_STEP_MM))
            .changed();

        ui.label(tr.t(keys::INPUT_VISCOSITY));
        egui::ComboBox::from_id_source("viscosity_choice")
            .selected_text(format!("{:.3}", self.input.viscosity_pa_s))
            .show_ui(ui, |ui| {
                for choice in VISCOSITY_CHOICES {
                    changed |= ui
                        .selectable_value(&mut self.input.viscosity_pa_s, choice, format!("{choice:.3}"))
                        .changed();
                }
            });

        ui.label(tr.t(keys::INPUT_PRESSURE));
        changed |= ui
            .add(egui::Slider::new(&mut self.input.pressure_diff_pa, PRESSURE_RANGE_PA).step_by(1.0))
            .changed();

        ui.label(tr.t(keys::INPUT_LENGTH));
        changed |= ui
            .add(egui::Slider::new(&mut self.input.length_m, LENGTH_RANGE_M).step_by(0.01))
            .changed();
        changed
    }

    /// 유량 계산 + Q vs r, Q vs η 그래프.
    fn ui_flow(&mut self, ui: &mut egui::Ui, report: &SimulationReport) -> bool {
        let tr = self.tr.clone();
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::INPUT_UNIT));
            for unit in FlowUnit::ALL {
                changed |= ui.radio_value(&mut self.input.flow_unit, unit, unit.label()).changed();
            }
        });

        ui.heading(tr.t(keys::FLOW_HEADING));
        ui.monospace(tr.t(keys::FLOW_FORMULA));
        ui.label(egui::RichText::new(ui_cli::substitution_line(&tr, report)).strong());
        ui.add_space(8.0);

        let y_label = tr.tf(keys::CHART_FLOW_Y, &[("unit", report.unit_label().to_string())]);
        ui.label(egui::RichText::new(tr.t(keys::CHART_RADIUS_TITLE)).strong());
        Plot::new("q_vs_r")
            .height(220.0)
            .allow_scroll(false)
            .x_axis_label(tr.t(keys::CHART_RADIUS_X))
            .y_axis_label(y_label.clone())
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(PlotPoints::from(report.radius_curve.clone())).name("Q"));
                plot_ui.points(
                    Points::new(vec![[report.input.radius_mm, report.flow_display]]).radius(4.0),
                );
            });

        ui.label(egui::RichText::new(tr.t(keys::CHART_VISCOSITY_TITLE)).strong());
        Plot::new("q_vs_eta")
            .height(220.0)
            .allow_scroll(false)
            .x_axis_label(tr.t(keys::CHART_VISCOSITY_X))
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(PlotPoints::from(report.viscosity_curve.clone())).name("Q"));
                plot_ui.points(
                    Points::new(vec![[report.input.viscosity_pa_s, report.flow_display]]).radius(4.0),
                );
            });
        changed
    }

    /// 같은 유량 유지에 필요한 ΔP 비교.
    fn ui_scenarios(&mut self, ui: &mut egui::Ui, report: &SimulationReport) -> bool {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::PRESSURE_HEADING));
        ui.label(tr.t(keys::INPUT_BASELINE));
        let changed = ui
            .add(
                egui::Slider::new(&mut self.input.baseline_pressure_pa, BASELINE_PRESSURE_RANGE_PA)
                    .step_by(1.0),
            )
            .changed();
        ui.label(
            egui::RichText::new(ui_cli::target_line(
                &tr,
                report.target_flow_m3_s,
                report.input.flow_unit,
            ))
            .strong(),
        );
        ui.monospace(tr.t(keys::PRESSURE_FORMULA));
        ui.label(egui::RichText::new(tr.t(keys::PRESSURE_COMPARE)).strong());

        let bars: Vec<Bar> = report
            .scenarios
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Bar::new(i as f64, s.required_pressure_pa)
                    .width(0.6)
                    .fill(BAR_COLORS[i % BAR_COLORS.len()])
                    .name(tr.t(s.scenario.kind.i18n_key()))
            })
            .collect();
        let labels: Vec<(f64, f64, String)> = report
            .scenarios
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let value = tr.tf(
                    keys::PRESSURE_BAR_VALUE,
                    &[
                        ("dp", format_number(s.required_pressure_pa, 3)),
                        ("grad", format_axis(s.gradient_pa_per_m)),
                    ],
                );
                (i as f64, s.required_pressure_pa, value)
            })
            .collect();

        Plot::new("scenario_bars")
            .height(320.0)
            .allow_scroll(false)
            .allow_drag(false)
            .show_x(false)
            .y_axis_label(tr.t(keys::CHART_PRESSURE_Y))
            .y_axis_formatter(|mark, _, _| format_axis(mark.value))
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
                for (x, y, text) in labels {
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), text).anchor(egui::Align2::CENTER_BOTTOM),
                    );
                }
            });

        for (i, s) in report.scenarios.iter().enumerate() {
            let label = tr.tf(
                keys::PRESSURE_BAR_LABEL,
                &[
                    ("name", tr.t(s.scenario.kind.i18n_key())),
                    ("r", format!("{:.2}", s.scenario.radius_mm)),
                    ("eta", format!("{:.3}", s.scenario.viscosity_pa_s)),
                ],
            );
            ui.colored_label(BAR_COLORS[i % BAR_COLORS.len()], label);
        }

        if report.high_pressure_warning {
            ui.add_space(6.0);
            ui.colored_label(WARNING_COLOR, format!("⚠ {}", tr.t(keys::PRESSURE_WARNING)));
        }
        changed
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut open = self.show_settings_modal;
        egui::Window::new(tr.t(keys::SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::SETTINGS_LANGUAGE));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), tr.t(keys::SETTINGS_LANG_AUTO));
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                    });
                ui.separator();

                ui.label(tr.t(keys::SETTINGS_UI_SCALE));
                if ui
                    .add(egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x"))
                    .changed()
                {
                    ctx.set_pixels_per_point(self.ui_scale);
                }
                ui.separator();

                ui.label(tr.t(keys::SETTINGS_FONT));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.custom_font_path);
                    if ui.button(tr.t(keys::SETTINGS_FONT_PICK)).clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("font", &["ttf", "ttc", "otf"])
                            .pick_file()
                        {
                            self.custom_font_path = path.display().to_string();
                        }
                    }
                    if ui.button(tr.t(keys::SETTINGS_FONT_APPLY)).clicked() {
                        match load_custom_font(ctx, &self.custom_font_path) {
                            Ok(()) => {
                                self.config.custom_font_path = Some(self.custom_font_path.clone());
                                self.font_status = None;
                            }
                            Err(e) => self.font_status = Some(e),
                        }
                    }
                });
                if let Some(msg) = &self.font_status {
                    ui.colored_label(WARNING_COLOR, msg);
                }
                ui.separator();

                if ui.button(tr.t(keys::SETTINGS_SAVE)).clicked() {
                    self.save_settings();
                }
                if let Some(msg) = &self.save_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }

    /// 설정 창의 언어/배율과 현재 입력값을 설정에 반영하고 번역기를 다시 만든다.
    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.ui_scale = self.ui_scale;
        self.config.defaults = self.input;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
    }

    fn save_settings(&mut self) {
        self.apply_settings();
        self.save_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
                if let Some(msg) = &self.font_status {
                    ui.colored_label(WARNING_COLOR, msg);
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        let mut changed = false;
        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(200.0)
            .default_width(260.0)
            .show(ctx, |ui| {
                changed |= self.ui_inputs(ui);
            });

        // 마지막 계산 결과를 그린다. 입력이 바뀌면 프레임 끝에서 다시 계산한다.
        let report = self.report.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match &report {
                    Ok(report) => {
                        changed |= self.ui_flow(ui, report);
                        ui.separator();
                        changed |= self.ui_scenarios(ui, report);
                    }
                    Err(e) => {
                        ui.colored_label(
                            egui::Color32::RED,
                            format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                        );
                    }
                });
        });

        if changed {
            self.recompute();
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_computes_default_report() {
        let app = GuiApp::new(config::Config::default(), "auto");
        let report = app.report.as_ref().unwrap();
        assert!((report.flow_display - 0.98175).abs() < 1e-4);
        assert_eq!(report.scenarios.len(), 4);
    }

    #[test]
    fn recompute_follows_last_input() {
        let mut app = GuiApp::new(config::Config::default(), "auto");
        app.input.radius_mm = 2.0;
        app.input.flow_unit = FlowUnit::CubicMeterPerSecond;
        app.recompute();
        let report = app.report.as_ref().unwrap();
        // r⁴ 비례: 1 mm → 2 mm 이면 16배
        let base = 9.817_477e-7;
        assert!((report.flow_display / base - 16.0).abs() < 1e-4);
    }

    #[test]
    fn auto_language_survives_applying_settings() {
        let mut app = GuiApp::new(config::Config::default(), "en-us");
        assert_eq!(app.config.language, "auto");
        assert_eq!(app.lang_input, "auto");
        assert_eq!(app.tr.t(keys::APP_TITLE), "Blood Flow Simulator");
        app.apply_settings();
        assert_eq!(app.config.language, "auto");
    }

    #[test]
    fn configured_language_used_without_cli_flag() {
        let mut cfg = config::Config::default();
        cfg.language = "ko".into();
        let app = GuiApp::new(cfg, "auto");
        assert_eq!(app.lang_input, "ko");
        assert_eq!(app.tr.t(keys::APP_TITLE), "혈류 시뮬레이터");
    }

    #[test]
    fn custom_font_rejects_non_font_file() {
        let path = std::env::temp_dir().join(format!("blood_flow_gui_{}_NanumGothic.ttf", std::process::id()));
        fs::write(&path, b"version https://git-lfs.github.com/spec/v1\n").unwrap();
        let ctx = egui::Context::default();
        assert!(load_custom_font(&ctx, &path.display().to_string()).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn recompute_clamps_out_of_range_values() {
        let mut app = GuiApp::new(config::Config::default(), "auto");
        app.input.length_m = 0.0;
        app.recompute();
        assert_eq!(app.input.length_m, 0.05);
        assert!(app.report.is_ok());
    }
}
