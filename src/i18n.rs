use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

const KO_PACK: &str = include_str!("../locales/ko-kr.toml");
const EN_PACK: &str = include_str!("../locales/en-us.toml");

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "app.title";
    pub const APP_WINDOW_TITLE: &str = "app.window_title";

    pub const SIDEBAR_HEADER: &str = "sidebar.header";
    pub const INPUT_RADIUS: &str = "input.radius";
    pub const INPUT_VISCOSITY: &str = "input.viscosity";
    pub const INPUT_PRESSURE: &str = "input.pressure";
    pub const INPUT_LENGTH: &str = "input.length";
    pub const INPUT_UNIT: &str = "input.unit";
    pub const INPUT_BASELINE: &str = "input.baseline";

    pub const FLOW_HEADING: &str = "flow.heading";
    pub const FLOW_FORMULA: &str = "flow.formula";
    pub const FLOW_SUBSTITUTION: &str = "flow.substitution";

    pub const CHART_RADIUS_TITLE: &str = "chart.radius_title";
    pub const CHART_RADIUS_X: &str = "chart.radius_x";
    pub const CHART_VISCOSITY_TITLE: &str = "chart.viscosity_title";
    pub const CHART_VISCOSITY_X: &str = "chart.viscosity_x";
    pub const CHART_FLOW_Y: &str = "chart.flow_y";
    pub const CHART_PRESSURE_Y: &str = "chart.pressure_y";

    pub const PRESSURE_HEADING: &str = "pressure.heading";
    pub const PRESSURE_TARGET: &str = "pressure.target";
    pub const PRESSURE_FORMULA: &str = "pressure.formula";
    pub const PRESSURE_COMPARE: &str = "pressure.compare";
    pub const PRESSURE_BAR_LABEL: &str = "pressure.bar_label";
    pub const PRESSURE_BAR_VALUE: &str = "pressure.bar_value";
    pub const PRESSURE_WARNING: &str = "pressure.warning";

    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_LANG_AUTO: &str = "settings.lang_auto";
    pub const SETTINGS_UI_SCALE: &str = "settings.ui_scale";
    pub const SETTINGS_FONT: &str = "settings.font";
    pub const SETTINGS_FONT_PICK: &str = "settings.font_pick";
    pub const SETTINGS_FONT_APPLY: &str = "settings.font_apply";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_CURRENT_UNIT: &str = "settings.current_unit";
    pub const SETTINGS_UNIT_OPTIONS: &str = "settings.unit_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_CHANGED: &str = "settings.changed";
    pub const SETTINGS_INVALID: &str = "settings.invalid";

    pub const FONT_NOT_FOUND: &str = "font.not_found";

    pub const MENU_TITLE: &str = "menu.title";
    pub const MENU_FLOW: &str = "menu.flow";
    pub const MENU_PRESSURE: &str = "menu.pressure";
    pub const MENU_SWEEP: &str = "menu.sweep";
    pub const MENU_SCENARIOS: &str = "menu.scenarios";
    pub const MENU_REPORT: &str = "menu.report";
    pub const MENU_SETTINGS: &str = "menu.settings";
    pub const MENU_EXIT: &str = "menu.exit";

    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_RADIUS: &str = "prompt.radius";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_VISCOSITY: &str = "prompt.viscosity";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const PROMPT_FLOW: &str = "prompt.flow";
    pub const PROMPT_BASELINE: &str = "prompt.baseline";
    pub const PROMPT_SWEEP_AXIS: &str = "prompt.sweep_axis";

    pub const RESULT_FLOW: &str = "result.flow";
    pub const RESULT_PRESSURE: &str = "result.pressure";
    pub const RESULT_SWEEP_HEADER: &str = "result.sweep_header";

    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    fn built_in(self) -> HashMap<String, String> {
        let src = match self {
            Language::Ko => KO_PACK,
            Language::En => EN_PACK,
        };
        parse_toml_to_map(src).unwrap_or_default()
    }
}

/// 런타임 언어 번들을 제공한다.
///
/// 조회 순서: 외부 언어팩 → 내장 언어팩 → 내장 한국어 → 키 자체.
#[derive(Debug, Clone)]
pub struct Translator {
    overrides: Option<HashMap<String, String>>,
    built_in: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        let lang = Language::from_code(lang_code);
        Self {
            overrides: None,
            built_in: lang.built_in(),
            fallback: Language::Ko.built_in(),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let mut tr = Self::new(lang_code);
        tr.overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if tr.overrides.is_some() {
            tracing::debug!(lang = lang_code, "loaded external language pack");
        }
        tr
    }

    /// 키를 조회해 문자열을 반환한다. 어디에도 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .or_else(|| self.built_in.get(key))
            .or_else(|| self.fallback.get(key))
            .cloned()
    }

    /// 번역을 가져온다. 번역이 없으면 키를 그대로 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// `{key}` 형태의 자리표시자를 값으로 바꾼다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    lang.split_once(['-', '_']).and_then(|(base, _)| try_load(base))
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_cover_every_key() {
        let ko = Language::Ko.built_in();
        let en = Language::En.built_in();
        assert!(!ko.is_empty());
        for k in ko.keys() {
            assert!(en.contains_key(k), "en pack missing {k}");
        }
        for k in en.keys() {
            assert!(ko.contains_key(k), "ko pack missing {k}");
        }
    }

    #[test]
    fn korean_and_english_lookup() {
        assert_eq!(Translator::new("ko").t(keys::APP_TITLE), "혈류 시뮬레이터");
        assert_eq!(Translator::new("en-us").t(keys::APP_TITLE), "Blood Flow Simulator");
        assert_eq!(Translator::new("xx").t(keys::APP_TITLE), "혈류 시뮬레이터");
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_eq!(tr.lookup("no.such.key"), None);
    }

    #[test]
    fn template_filling() {
        let tr = Translator::new("ko");
        let s = tr.tf(keys::RESULT_FLOW, &[("q", "0.9817".into()), ("unit", "mL/s".into())]);
        assert_eq!(s, "유량 Q = 0.9817 mL/s");
    }

    #[test]
    fn language_resolution_order() {
        assert_eq!(resolve_language("en", Some("ko")), "en-us");
        assert_eq!(resolve_language("auto", Some("ko-KR")), "ko");
        assert_eq!(normalize_lang("EN-UK").as_deref(), Some("en-us"));
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko"));
        assert_eq!(normalize_locale_string("fr_FR"), None);
    }

    #[test]
    fn external_pack_overrides_built_in() {
        let dir = std::env::temp_dir().join(format!("blood_flow_locales_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en.toml"), "[app]\ntitle = \"Custom\"\n").unwrap();
        let tr = Translator::new_with_pack("en-us", dir.to_str());
        assert_eq!(tr.t(keys::APP_TITLE), "Custom");
        // 언어팩에 없는 키는 내장 문자열로
        assert_eq!(tr.t(keys::FLOW_HEADING), "Flow rate Q");
        fs::remove_dir_all(&dir).unwrap();
    }
}
