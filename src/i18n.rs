use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_PAPERS: &str = "main_menu.papers";
    pub const MAIN_MENU_EDIT_PAPER: &str = "main_menu.edit_paper";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const ESTIMATE_HEADING: &str = "estimate.heading";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const PROMPT_WIDTH: &str = "prompt.width";
    pub const PROMPT_HEIGHT: &str = "prompt.height";
    pub const PROMPT_GLUE_ALLOWANCE: &str = "prompt.glue_allowance";
    pub const PROMPT_LANES: &str = "prompt.lanes";
    pub const PROMPT_TRIM: &str = "prompt.trim";
    pub const PROMPT_MANUAL_WIDTH: &str = "prompt.manual_width";
    pub const PROMPT_FLUTE: &str = "prompt.flute";
    pub const PROMPT_PAPER_FOR: &str = "prompt.paper_for";
    pub const PROMPT_PRINT_COLORS: &str = "prompt.print_colors";
    pub const PROMPT_LOSS_RATE: &str = "prompt.loss_rate";
    pub const PROMPT_DIE_CUT: &str = "prompt.die_cut";
    pub const PROMPT_GLUE_COST: &str = "prompt.glue_cost";
    pub const PROMPT_MISC_COST: &str = "prompt.misc_cost";
    pub const PROMPT_QUANTITY: &str = "prompt.quantity";
    pub const PROMPT_VAT: &str = "prompt.vat";
    pub const PROMPT_EXPORT: &str = "prompt.export";
    pub const RESULT_UNIT_PRICE: &str = "result.unit_price";
    pub const RESULT_DETAIL_HEADING: &str = "result.detail_heading";
    pub const EXPORT_SAVED: &str = "export.saved";

    pub const PAPERS_HEADING: &str = "papers.heading";
    pub const PAPERS_COLUMNS: &str = "papers.columns";
    pub const PAPERS_SUPPLIERS: &str = "papers.suppliers";
    pub const EDIT_PAPER_PROMPT_LABEL: &str = "edit_paper.prompt_label";
    pub const EDIT_PAPER_PROMPT_PRICE: &str = "edit_paper.prompt_price";
    pub const EDIT_PAPER_PROMPT_GSM: &str = "edit_paper.prompt_gsm";
    pub const EDIT_PAPER_UPDATED: &str = "edit_paper.updated";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_POLICY: &str = "settings.current_policy";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const FIELD_LENGTH: &str = "field.length";
    pub const FIELD_WIDTH: &str = "field.width";
    pub const FIELD_HEIGHT: &str = "field.height";
    pub const FIELD_GLUE_ALLOWANCE: &str = "field.glue_allowance";
    pub const FIELD_LANE_COUNT: &str = "field.lane_count";
    pub const FIELD_TRIM_ALLOWANCE: &str = "field.trim_allowance";
    pub const FIELD_UNROLLED_LENGTH: &str = "field.unrolled_length";
    pub const FIELD_UNROLLED_WIDTH: &str = "field.unrolled_width";
    pub const FIELD_THEORETICAL_WIDTH: &str = "field.theoretical_width";
    pub const FIELD_PRODUCTION_WIDTH: &str = "field.production_width";
    pub const FIELD_WIDTH_SOURCE: &str = "field.width_source";
    pub const FIELD_FLUTE: &str = "field.flute";
    pub const FIELD_AREA: &str = "field.area";
    pub const FIELD_BASE_MATERIAL: &str = "field.base_material";
    pub const FIELD_LOSS_RATE: &str = "field.loss_rate";
    pub const FIELD_MATERIAL_PER_SQM: &str = "field.material_per_sqm";
    pub const FIELD_MATERIAL_PER_UNIT: &str = "field.material_per_unit";
    pub const FIELD_PROCESSING_PER_SQM: &str = "field.processing_per_sqm";
    pub const FIELD_DIE_CUT: &str = "field.die_cut";
    pub const FIELD_GLUE_COST: &str = "field.glue_cost";
    pub const FIELD_MISC_COST: &str = "field.misc_cost";
    pub const FIELD_PROCESSING_PER_UNIT: &str = "field.processing_per_unit";
    pub const FIELD_COST_PER_UNIT: &str = "field.cost_per_unit";
    pub const FIELD_PRINT_COLORS: &str = "field.print_colors";
    pub const FIELD_PRINT_COST: &str = "field.print_cost";
    pub const FIELD_QUANTITY: &str = "field.quantity";
    pub const FIELD_VAT: &str = "field.vat";
    pub const FIELD_TOTAL: &str = "field.total";
    pub const FIELD_UNIT_PRICE: &str = "field.unit_price";
    pub const FIELD_SHEET_WIDTH_MODE: &str = "field.sheet_width_mode";
    pub const FIELD_AREA_MODE: &str = "field.area_mode";
    pub const FIELD_ROUNDING_MODE: &str = "field.rounding_mode";
    pub const FIELD_MATERIAL_LOOKUP: &str = "field.material_lookup";

    pub const LAYER_OUTER: &str = "layer.outer";
    pub const LAYER_FLUTE: &str = "layer.flute";
    pub const LAYER_FLUTE_A: &str = "layer.flute_a";
    pub const LAYER_CENTER: &str = "layer.center";
    pub const LAYER_FLUTE_B: &str = "layer.flute_b";
    pub const LAYER_INNER: &str = "layer.inner";

    pub const SOURCE_THEORETICAL: &str = "source.theoretical";
    pub const SOURCE_SNAPPED: &str = "source.snapped";
    pub const SOURCE_MANUAL: &str = "source.manual";

    pub const VALUE_YES: &str = "value.yes";
    pub const VALUE_NO: &str = "value.no";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
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

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// `pack_dir`가 없으면 `./locales`를 찾고, 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let lang = Language::from_code(lang_code);
        let dir = pack_dir.unwrap_or_else(|| Path::new("locales"));
        let overrides = load_overrides(dir, lang.as_code());
        if pack_dir.is_some() && overrides.is_none() {
            tracing::warn!(dir = %dir.display(), lang = lang.as_code(), "language pack not found");
        }
        Self { lang, overrides }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 예/아니오 표기.
    pub fn yes_no(&self, value: bool) -> &str {
        self.t(if value { keys::VALUE_YES } else { keys::VALUE_NO })
    }
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
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
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
        "en" => Some("en".into()),
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

/// TOML 기반 언어팩을 로드한다. 형식: 섹션.키 = "값"
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
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

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 박스 제작 단가 계산기 ===",
        MAIN_MENU_ESTIMATE => "1) 단가 계산",
        MAIN_MENU_PAPERS => "2) 원지 목록",
        MAIN_MENU_EDIT_PAPER => "3) 원지 단가 수정",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ESTIMATE_HEADING => "\n-- 박스 사양 입력 --",
        PROMPT_LENGTH => "장(L, mm)",
        PROMPT_WIDTH => "폭(W, mm)",
        PROMPT_HEIGHT => "고(H, mm)",
        PROMPT_GLUE_ALLOWANCE => "미미(접착여유, mm)",
        PROMPT_LANES => "폭수",
        PROMPT_TRIM => "재단 여유값(mm)",
        PROMPT_MANUAL_WIDTH => "생산 지폭 수동 입력(mm, 자동이면 엔터): ",
        PROMPT_FLUTE => "골 종류 (E/B/A/DW)",
        PROMPT_PAPER_FOR => "원지 선택",
        PROMPT_PRINT_COLORS => "인쇄 도수 (0/1/2/4)",
        PROMPT_LOSS_RATE => "재료 로스율(%)",
        PROMPT_DIE_CUT => "톰슨비(도무송, 1개당)",
        PROMPT_GLUE_COST => "접착비(1개당)",
        PROMPT_MISC_COST => "부자재비(1개당)",
        PROMPT_QUANTITY => "총 생산 수량",
        PROMPT_VAT => "부가세 10% 포함 (y/n)",
        PROMPT_EXPORT => "상세내역 저장 (1=CSV, 2=JSON, 엔터=저장 안 함): ",
        RESULT_UNIT_PRICE => "▶ 개당 예상 단가 (원):",
        RESULT_DETAIL_HEADING => "\n### 상세 내역",
        EXPORT_SAVED => "저장했습니다:",
        PAPERS_HEADING => "\n-- 원지 데이터 --",
        PAPERS_COLUMNS => "원지명      원지값(원/kg)   평량(g/㎡)",
        PAPERS_SUPPLIERS => "등록된 제조사 (*: 사용 중):",
        EDIT_PAPER_PROMPT_LABEL => "수정할 원지명: ",
        EDIT_PAPER_PROMPT_PRICE => "원지값(원/kg)",
        EDIT_PAPER_PROMPT_GSM => "평량(g/㎡)",
        EDIT_PAPER_UPDATED => "원지 데이터를 수정했습니다 (이번 실행에만 적용):",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_POLICY => "현재 계산 정책:",
        SETTINGS_OPTIONS => "1) 지폭 정책 전환  2) 면적 방식 전환  3) 반올림 정책 전환  4) 원지 조회 정책 전환",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "계산 정책이 변경되었습니다:",
        FIELD_LENGTH => "장(mm)",
        FIELD_WIDTH => "폭(mm)",
        FIELD_HEIGHT => "고(mm)",
        FIELD_GLUE_ALLOWANCE => "미미(mm)",
        FIELD_LANE_COUNT => "폭수",
        FIELD_TRIM_ALLOWANCE => "재단 여유값(mm)",
        FIELD_UNROLLED_LENGTH => "전장(mm)",
        FIELD_UNROLLED_WIDTH => "전폭(mm)",
        FIELD_THEORETICAL_WIDTH => "계산된 실제지폭(mm)",
        FIELD_PRODUCTION_WIDTH => "생산 지폭(mm)",
        FIELD_WIDTH_SOURCE => "지폭 결정 방식",
        FIELD_FLUTE => "골 종류",
        FIELD_AREA => "박스당 소요량(㎡)",
        FIELD_BASE_MATERIAL => "㎡당 원재료비(원, 로스 전)",
        FIELD_LOSS_RATE => "적용 로스율(%)",
        FIELD_MATERIAL_PER_SQM => "㎡당 원재료비(원, 로스포함)",
        FIELD_MATERIAL_PER_UNIT => "박스당 원단비(원)",
        FIELD_PROCESSING_PER_SQM => "㎡당 가공비(원)",
        FIELD_DIE_CUT => "톰슨비(원/개)",
        FIELD_GLUE_COST => "접착비(원/개)",
        FIELD_MISC_COST => "부자재비(원/개)",
        FIELD_PROCESSING_PER_UNIT => "박스당 가공비(원)",
        FIELD_COST_PER_UNIT => "박스당 비용(원, 인쇄비 제외)",
        FIELD_PRINT_COLORS => "인쇄 도수",
        FIELD_PRINT_COST => "인쇄비(원)",
        FIELD_QUANTITY => "수량",
        FIELD_VAT => "부가세 포함",
        FIELD_TOTAL => "총 비용(원)",
        FIELD_UNIT_PRICE => "개당 최종 단가(원)",
        FIELD_SHEET_WIDTH_MODE => "지폭 정책",
        FIELD_AREA_MODE => "면적 방식",
        FIELD_ROUNDING_MODE => "반올림 정책",
        FIELD_MATERIAL_LOOKUP => "원지 조회 정책",
        LAYER_OUTER => "표면지",
        LAYER_FLUTE => "골심지",
        LAYER_FLUTE_A => "골심지A",
        LAYER_CENTER => "중심지",
        LAYER_FLUTE_B => "골심지B",
        LAYER_INNER => "이면지",
        SOURCE_THEORETICAL => "계산값",
        SOURCE_SNAPPED => "규격 지폭",
        SOURCE_MANUAL => "수동 입력",
        VALUE_YES => "예",
        VALUE_NO => "아니오",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Box Unit Cost Estimator ===",
        MAIN_MENU_ESTIMATE => "1) Estimate",
        MAIN_MENU_PAPERS => "2) Paper catalog",
        MAIN_MENU_EDIT_PAPER => "3) Edit paper price",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ESTIMATE_HEADING => "\n-- Box specification --",
        PROMPT_LENGTH => "Length (L, mm)",
        PROMPT_WIDTH => "Width (W, mm)",
        PROMPT_HEIGHT => "Height (H, mm)",
        PROMPT_GLUE_ALLOWANCE => "Glue flap (mm)",
        PROMPT_LANES => "Lanes",
        PROMPT_TRIM => "Trim allowance (mm)",
        PROMPT_MANUAL_WIDTH => "Manual sheet width (mm, enter for auto): ",
        PROMPT_FLUTE => "Flute (E/B/A/DW)",
        PROMPT_PAPER_FOR => "Paper",
        PROMPT_PRINT_COLORS => "Print colors (0/1/2/4)",
        PROMPT_LOSS_RATE => "Loss rate (%)",
        PROMPT_DIE_CUT => "Die-cut (per unit)",
        PROMPT_GLUE_COST => "Gluing (per unit)",
        PROMPT_MISC_COST => "Misc. material (per unit)",
        PROMPT_QUANTITY => "Quantity",
        PROMPT_VAT => "Include 10% VAT (y/n)",
        PROMPT_EXPORT => "Save breakdown (1=CSV, 2=JSON, enter=skip): ",
        RESULT_UNIT_PRICE => "▶ Estimated unit price:",
        RESULT_DETAIL_HEADING => "\n### Breakdown",
        EXPORT_SAVED => "Saved:",
        PAPERS_HEADING => "\n-- Paper catalog --",
        PAPERS_COLUMNS => "Paper       Price(/kg)      Grammage(g/m2)",
        PAPERS_SUPPLIERS => "Suppliers (*: active):",
        EDIT_PAPER_PROMPT_LABEL => "Paper to edit: ",
        EDIT_PAPER_PROMPT_PRICE => "Price per kg",
        EDIT_PAPER_PROMPT_GSM => "Grammage (g/m2)",
        EDIT_PAPER_UPDATED => "Paper updated (this session only):",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_POLICY => "Current policy:",
        SETTINGS_OPTIONS => "1) Toggle sheet width  2) Toggle area mode  3) Cycle rounding  4) Toggle paper lookup",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; policy unchanged.",
        SETTINGS_SAVED => "Policy changed to:",
        FIELD_LENGTH => "Length (mm)",
        FIELD_WIDTH => "Width (mm)",
        FIELD_HEIGHT => "Height (mm)",
        FIELD_GLUE_ALLOWANCE => "Glue flap (mm)",
        FIELD_LANE_COUNT => "Lanes",
        FIELD_TRIM_ALLOWANCE => "Trim allowance (mm)",
        FIELD_UNROLLED_LENGTH => "Unrolled length (mm)",
        FIELD_UNROLLED_WIDTH => "Unrolled width (mm)",
        FIELD_THEORETICAL_WIDTH => "Required sheet width (mm)",
        FIELD_PRODUCTION_WIDTH => "Production sheet width (mm)",
        FIELD_WIDTH_SOURCE => "Width source",
        FIELD_FLUTE => "Flute",
        FIELD_AREA => "Area per unit (m2)",
        FIELD_BASE_MATERIAL => "Material per m2 (before loss)",
        FIELD_LOSS_RATE => "Loss rate (%)",
        FIELD_MATERIAL_PER_SQM => "Material per m2 (with loss)",
        FIELD_MATERIAL_PER_UNIT => "Material per unit",
        FIELD_PROCESSING_PER_SQM => "Processing per m2",
        FIELD_DIE_CUT => "Die-cut per unit",
        FIELD_GLUE_COST => "Gluing per unit",
        FIELD_MISC_COST => "Misc. per unit",
        FIELD_PROCESSING_PER_UNIT => "Processing per unit",
        FIELD_COST_PER_UNIT => "Cost per unit (before print)",
        FIELD_PRINT_COLORS => "Print colors",
        FIELD_PRINT_COST => "Print cost",
        FIELD_QUANTITY => "Quantity",
        FIELD_VAT => "VAT included",
        FIELD_TOTAL => "Total cost",
        FIELD_UNIT_PRICE => "Unit price",
        FIELD_SHEET_WIDTH_MODE => "Sheet width policy",
        FIELD_AREA_MODE => "Area mode",
        FIELD_ROUNDING_MODE => "Rounding",
        FIELD_MATERIAL_LOOKUP => "Paper lookup",
        LAYER_OUTER => "Outer liner",
        LAYER_FLUTE => "Fluting",
        LAYER_FLUTE_A => "Fluting A",
        LAYER_CENTER => "Center liner",
        LAYER_FLUTE_B => "Fluting B",
        LAYER_INNER => "Inner liner",
        SOURCE_THEORETICAL => "as computed",
        SOURCE_SNAPPED => "standard width",
        SOURCE_MANUAL => "manual",
        VALUE_YES => "yes",
        VALUE_NO => "no",
        _ => return None,
    })
}
