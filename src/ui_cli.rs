use std::io::{self, BufRead, Write};

use crate::app::{AppError, Session};
use crate::config::Config;
use crate::costing::{
    self, AreaMode, BoardSpecification, BoxDimensions, CostBreakdown, CostParameters, CostPolicy,
    EstimateInput, FixedCosts, FluteGrade, LayerRole, MaterialLookup, PaperGrade, PrintColors,
    RoundingMode, SheetWidthMode, SupplierCatalog,
};
use crate::export::{self, ExportFormat};
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    Papers,
    EditPaper,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 종료로 본다.
pub fn main_menu<R: BufRead>(tr: &Translator, input: &mut R) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_PAPERS));
    println!("{}", tr.t(keys::MAIN_MENU_EDIT_PAPER));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line(input, tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(s) => s,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                return Ok(MenuChoice::Exit);
            }
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::Papers),
            "3" => return Ok(MenuChoice::EditPaper),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 단가 계산 메뉴를 처리한다. 계산 오류는 출력만 하고 메뉴로 돌아간다.
pub fn handle_estimate<R: BufRead>(
    tr: &Translator,
    session: &Session,
    input: &mut R,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ESTIMATE_HEADING));
    let dimensions = BoxDimensions {
        length_mm: read_f64_or(input, tr, keys::PROMPT_LENGTH, 300.0)?,
        width_mm: read_f64_or(input, tr, keys::PROMPT_WIDTH, 200.0)?,
        height_mm: read_f64_or(input, tr, keys::PROMPT_HEIGHT, 150.0)?,
        glue_allowance_mm: read_f64_or(input, tr, keys::PROMPT_GLUE_ALLOWANCE, 40.0)?,
        lane_count: read_u32_or(input, tr, keys::PROMPT_LANES, 4)?,
        trim_allowance_mm: read_f64_or(input, tr, keys::PROMPT_TRIM, 50.0)?,
    };
    let manual_production_width_mm = read_manual_width(input, tr)?;

    let flute = loop {
        let s = read_line(input, &format!("{} [DW]: ", tr.t(keys::PROMPT_FLUTE)))?;
        if s.trim().is_empty() {
            break FluteGrade::DoubleWall;
        }
        if let Some(f) = FluteGrade::parse(&s) {
            break f;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    let board = read_board(input, tr, flute, &session.catalog)?;

    let d = session.config.defaults;
    let print_colors = loop {
        let n = read_u32_or(input, tr, keys::PROMPT_PRINT_COLORS, u32::from(d.print_colors.count()))?;
        if let Some(p) = u8::try_from(n).ok().and_then(PrintColors::from_count) {
            break p;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    let params = CostParameters {
        loss_rate_percent: read_f64_or(input, tr, keys::PROMPT_LOSS_RATE, d.loss_rate_percent)?,
        fixed: FixedCosts {
            die_cut: read_f64_or(input, tr, keys::PROMPT_DIE_CUT, d.fixed.die_cut)?,
            glue: read_f64_or(input, tr, keys::PROMPT_GLUE_COST, d.fixed.glue)?,
            misc: read_f64_or(input, tr, keys::PROMPT_MISC_COST, d.fixed.misc)?,
        },
        print_colors,
        quantity: read_u32_or(input, tr, keys::PROMPT_QUANTITY, d.quantity)?,
        vat_included: read_bool_or(input, tr, keys::PROMPT_VAT, d.vat_included)?,
    };

    let estimate = EstimateInput {
        dimensions,
        manual_production_width_mm,
        board,
        catalog: &session.catalog,
        flute,
        params,
        policy: session.config.policy,
    };
    let breakdown = match costing::compute_cost(&estimate) {
        Ok(b) => b,
        Err(e) => {
            println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
            return Ok(());
        }
    };
    print_breakdown(tr, &breakdown);

    let sel = read_line(input, tr.t(keys::PROMPT_EXPORT))?;
    let format = match sel.trim() {
        "1" => Some(ExportFormat::Csv),
        "2" => Some(ExportFormat::Json),
        _ => None,
    };
    if let Some(format) = format {
        let path = export::write_export(&breakdown, tr, format, &session.export_dir)?;
        println!("{} {}", tr.t(keys::EXPORT_SAVED), path.display());
    }
    Ok(())
}

/// 수동 생산 지폭. 빈 입력은 자동 결정, 숫자가 아니면 다시 묻는다.
fn read_manual_width<R: BufRead>(input: &mut R, tr: &Translator) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(input, tr.t(keys::PROMPT_MANUAL_WIDTH))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_board<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    flute: FluteGrade,
    catalog: &SupplierCatalog,
) -> Result<BoardSpecification, AppError> {
    let defaults = BoardSpecification::default_for(flute);
    let labels: Vec<&str> = catalog.labels().collect();
    println!("{}: {}", tr.t(keys::PROMPT_PAPER_FOR), labels.join(", "));
    let mut board = BoardSpecification::new();
    for &role in LayerRole::required_for(flute) {
        let default = defaults.get(role).unwrap_or_default();
        loop {
            let s = read_line(input, &format!("{} [{default}]: ", role_label(tr, role)))?;
            let typed = match s.trim() {
                "" => default,
                other => other,
            };
            if let Some(label) = catalog.find_label(typed) {
                board.set(role, label);
                break;
            }
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
        }
    }
    Ok(board)
}

fn role_label(tr: &Translator, role: LayerRole) -> &str {
    tr.t(match role {
        LayerRole::Outer => keys::LAYER_OUTER,
        LayerRole::Flute => keys::LAYER_FLUTE,
        LayerRole::FluteA => keys::LAYER_FLUTE_A,
        LayerRole::Center => keys::LAYER_CENTER,
        LayerRole::FluteB => keys::LAYER_FLUTE_B,
        LayerRole::Inner => keys::LAYER_INNER,
    })
}

/// 개당 단가와 상세 내역 표를 출력한다.
pub fn print_breakdown(tr: &Translator, breakdown: &CostBreakdown) {
    println!(
        "\n{} {:.2}",
        tr.t(keys::RESULT_UNIT_PRICE),
        breakdown.unit_price
    );
    println!("{}", tr.t(keys::RESULT_DETAIL_HEADING));
    print!("{}", export::render_table(&export::breakdown_rows(breakdown, tr)));
}

/// 등록된 제조사 목록과 사용 중인 제조사의 원지 목록을 출력한다.
pub fn print_catalog(tr: &Translator, session: &Session) {
    println!("{}", tr.t(keys::PAPERS_SUPPLIERS));
    for name in session.config.supplier_names() {
        let mark = if name == session.supplier { '*' } else { ' ' };
        println!(" {mark} {name}");
    }
    println!("{} ({})", tr.t(keys::PAPERS_HEADING), session.supplier);
    println!("{}", tr.t(keys::PAPERS_COLUMNS));
    for (label, grade) in session.catalog.iter() {
        println!("{label:<10}  {:>12.1}  {:>12.1}", grade.price_per_kg, grade.gsm);
    }
}

/// 이번 실행에 한해 원지 단가/평량을 수정한다. 설정 파일은 바꾸지 않는다.
/// 이미 있는 원지는 등록된 표기를 따르고, 새 원지는 입력한 그대로 추가한다.
pub fn handle_edit_paper<R: BufRead>(
    tr: &Translator,
    catalog: &mut SupplierCatalog,
    input: &mut R,
) -> Result<(), AppError> {
    let typed = read_line(input, tr.t(keys::EDIT_PAPER_PROMPT_LABEL))?;
    let typed = typed.trim();
    if typed.is_empty() {
        return Ok(());
    }
    let label = catalog.find_label(typed).unwrap_or(typed).to_string();
    let current = catalog.get(&label).copied().unwrap_or(PaperGrade::new(0.0, 0.0));
    let price = read_f64_or(input, tr, keys::EDIT_PAPER_PROMPT_PRICE, current.price_per_kg)?;
    let gsm = read_f64_or(input, tr, keys::EDIT_PAPER_PROMPT_GSM, current.gsm)?;
    if !(price > 0.0 && gsm > 0.0) {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
        return Ok(());
    }
    println!("{} {label} {price}/{gsm}", tr.t(keys::EDIT_PAPER_UPDATED));
    catalog.insert(label, PaperGrade::new(price, gsm));
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings<R: BufRead>(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut R,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_POLICY), describe_policy(&cfg.policy));
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let p = &mut cfg.policy;
    match sel.trim() {
        "1" => {
            p.sheet_width = match p.sheet_width {
                SheetWidthMode::HardCap => SheetWidthMode::SnapTable,
                SheetWidthMode::SnapTable => SheetWidthMode::HardCap,
            }
        }
        "2" => {
            p.area = match p.area {
                AreaMode::PerBlankFromFullSheet => AreaMode::PerBlankDividedByLanes,
                AreaMode::PerBlankDividedByLanes => AreaMode::PerBlankFromFullSheet,
            }
        }
        "3" => {
            p.rounding = match p.rounding {
                RoundingMode::Unrounded => RoundingMode::RoundAfterLoss,
                RoundingMode::RoundAfterLoss => RoundingMode::RoundBeforeLoss,
                RoundingMode::RoundBeforeLoss => RoundingMode::Unrounded,
            }
        }
        "4" => {
            p.material_lookup = match p.material_lookup {
                MaterialLookup::Strict => MaterialLookup::Permissive,
                MaterialLookup::Permissive => MaterialLookup::Strict,
            }
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), describe_policy(&cfg.policy));
    Ok(())
}

fn describe_policy(p: &CostPolicy) -> String {
    format!(
        "{:?} / {:?} / {:?} / {:?}",
        p.sheet_width, p.area, p.rounding, p.material_lookup
    )
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `UnexpectedEof`.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_f64_or<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    key: &str,
    default: f64,
) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, &format!("{} [{default}]: ", tr.t(key)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_u32_or<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    key: &str,
    default: u32,
) -> Result<u32, AppError> {
    loop {
        let s = read_line(input, &format!("{} [{default}]: ", tr.t(key)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_bool_or<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    key: &str,
    default: bool,
) -> Result<bool, AppError> {
    let hint = if default { "Y" } else { "N" };
    let s = read_line(input, &format!("{} [{hint}]: ", tr.t(key)))?;
    Ok(match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "예" | "1" => true,
        "n" | "no" | "아니오" | "0" => false,
        _ => default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn menu_exits_when_input_ends() {
        let tr = Translator::new("ko");
        let mut empty = Cursor::new("");
        assert_eq!(main_menu(&tr, &mut empty).unwrap(), MenuChoice::Exit);

        // 잘못된 선택 뒤에 입력이 끝나도 멈추지 않고 종료한다
        let mut piped = Cursor::new("9\n");
        assert_eq!(main_menu(&tr, &mut piped).unwrap(), MenuChoice::Exit);

        let mut chosen = Cursor::new("9\n2\n");
        assert_eq!(main_menu(&tr, &mut chosen).unwrap(), MenuChoice::Papers);
    }

    #[test]
    fn prompt_reports_end_of_input() {
        let mut empty = Cursor::new("");
        let err = read_line(&mut empty, "> ").unwrap_err();
        assert!(matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn manual_width_reprompts_on_bad_number() {
        let tr = Translator::new("ko");
        let mut input = Cursor::new("abc\n1800\n");
        assert_eq!(read_manual_width(&mut input, &tr).unwrap(), Some(1800.0));

        let mut input = Cursor::new("abc\n\n");
        assert_eq!(read_manual_width(&mut input, &tr).unwrap(), None);

        let mut input = Cursor::new("abc\n");
        assert!(read_manual_width(&mut input, &tr).is_err());
    }

    #[test]
    fn board_accepts_labels_as_written() {
        let tr = Translator::new("ko");
        let mut cat = SupplierCatalog::builtin();
        cat.insert("Kraft-x", PaperGrade::new(700.0, 200.0));
        let mut input = Cursor::new("Kraft-x\ns120\n\n");
        let board = read_board(&mut input, &tr, FluteGrade::B, &cat).unwrap();
        assert_eq!(board.get(LayerRole::Outer), Some("Kraft-x"));
        assert_eq!(board.get(LayerRole::Flute), Some("S120"));
        assert_eq!(board.get(LayerRole::Inner), Some("K180"));
    }

    #[test]
    fn edit_paper_keeps_label_spelling() {
        let tr = Translator::new("ko");
        let mut cat = SupplierCatalog::builtin();
        cat.insert("Kraft-x", PaperGrade::new(700.0, 200.0));
        let mut input = Cursor::new("kraft-x\n720\n\n");
        handle_edit_paper(&tr, &mut cat, &mut input).unwrap();
        assert_eq!(cat.get("Kraft-x"), Some(&PaperGrade::new(720.0, 200.0)));
        assert!(cat.get("kraft-x").is_none());

        let mut input = Cursor::new("newPaper\n500\n150\n");
        handle_edit_paper(&tr, &mut cat, &mut input).unwrap();
        assert_eq!(cat.get("newPaper"), Some(&PaperGrade::new(500.0, 150.0)));
    }
}
