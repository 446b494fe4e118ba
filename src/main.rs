use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::de::{value::StrDeserializer, DeserializeOwned};
use tracing_subscriber::EnvFilter;

use box_cost_estimator::app::{self, AppError, Session};
use box_cost_estimator::config::{self, DEFAULT_CONFIG_PATH};
use box_cost_estimator::costing::{
    self, AreaMode, BoardSpecification, BoxDimensions, EstimateInput, FluteGrade, LayerRole,
    MaterialLookup, PrintColors, RoundingMode, SheetWidthMode,
};
use box_cost_estimator::export::{self, ExportFormat};
use box_cost_estimator::i18n::{self, Translator};
use box_cost_estimator::ui_cli;

#[derive(Parser)]
#[command(name = "box_cost_estimator", about = "골판지 박스 제작 단가 계산기", version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,

    /// 사용할 제조사 (기본: 설정의 active_supplier)
    #[arg(long)]
    supplier: Option<String>,

    /// 내보낸 파일을 저장할 디렉터리
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// 언어팩 디렉터리 ({lang}.toml). 없으면 ./locales 를 찾는다
    #[arg(long)]
    locales: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 명령행 인자로 단가를 계산한다
    Estimate(EstimateArgs),
    /// 활성 제조사의 원지 목록을 출력한다
    Papers,
    /// 대화형 메뉴 (기본)
    Interactive,
}

#[derive(Args)]
struct EstimateArgs {
    /// 장 L [mm]
    #[arg(long)]
    length: f64,
    /// 폭 W [mm]
    #[arg(long)]
    width: f64,
    /// 고 H [mm]
    #[arg(long)]
    height: f64,
    /// 미미(접착여유) [mm]
    #[arg(long, default_value_t = 40.0)]
    glue_allowance: f64,
    /// 폭수
    #[arg(long, default_value_t = 4)]
    lanes: u32,
    /// 재단 여유값 [mm]
    #[arg(long, default_value_t = 50.0)]
    trim: f64,
    /// 생산 지폭 수동 지정 [mm]
    #[arg(long)]
    manual_width: Option<f64>,

    /// 골 종류 (E/B/A/DW)
    #[arg(long, default_value = "DW", value_parser = parse_flute)]
    flute: FluteGrade,
    /// 표면지
    #[arg(long)]
    outer: Option<String>,
    /// 골심지 (편면골)
    #[arg(long)]
    fluting: Option<String>,
    /// 골심지A (이중골)
    #[arg(long)]
    fluting_a: Option<String>,
    /// 중심지 (이중골)
    #[arg(long)]
    center: Option<String>,
    /// 골심지B (이중골)
    #[arg(long)]
    fluting_b: Option<String>,
    /// 이면지
    #[arg(long)]
    inner: Option<String>,

    /// 재료 로스율 [%]
    #[arg(long)]
    loss_rate: Option<f64>,
    /// 톰슨비 [원/개]
    #[arg(long)]
    die_cut: Option<f64>,
    /// 접착비 [원/개]
    #[arg(long)]
    glue_cost: Option<f64>,
    /// 부자재비 [원/개]
    #[arg(long)]
    misc_cost: Option<f64>,
    /// 인쇄 도수 (0/1/2/4)
    #[arg(long, value_parser = parse_print_colors)]
    print_colors: Option<PrintColors>,
    /// 총 생산 수량
    #[arg(long)]
    quantity: Option<u32>,
    /// 부가세 포함 여부
    #[arg(long)]
    vat: Option<bool>,

    /// 지폭 정책 (hard_cap/snap_table)
    #[arg(long, value_parser = parse_variant::<SheetWidthMode>)]
    sheet_width: Option<SheetWidthMode>,
    /// 면적 방식 (per_blank_from_full_sheet/per_blank_divided_by_lanes)
    #[arg(long, value_parser = parse_variant::<AreaMode>)]
    area_mode: Option<AreaMode>,
    /// 반올림 정책 (unrounded/round_after_loss/round_before_loss)
    #[arg(long, value_parser = parse_variant::<RoundingMode>)]
    rounding: Option<RoundingMode>,
    /// 원지 조회 정책 (strict/permissive)
    #[arg(long, value_parser = parse_variant::<MaterialLookup>)]
    material_lookup: Option<MaterialLookup>,

    /// 상세 내역 저장 형식
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,
}

fn parse_flute(s: &str) -> Result<FluteGrade, String> {
    FluteGrade::parse(s).ok_or_else(|| format!("unknown flute grade: {s}"))
}

fn parse_print_colors(s: &str) -> Result<PrintColors, String> {
    s.trim()
        .trim_end_matches('도')
        .parse::<u8>()
        .ok()
        .and_then(PrintColors::from_count)
        .ok_or_else(|| format!("print colors must be 0, 1, 2 or 4: {s}"))
}

/// snake_case 정책 이름을 serde로 해석한다.
fn parse_variant<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    T::deserialize(StrDeserializer::<serde::de::value::Error>::new(s)).map_err(|e| e.to_string())
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cli.locales.as_deref());
    let mut session = Session::new(cfg, cli.config.clone(), cli.supplier.as_deref(), cli.out.clone())?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => app::run(&mut session, &tr),
        Command::Papers => {
            ui_cli::print_catalog(&tr, &session);
            Ok(())
        }
        Command::Estimate(args) => run_estimate(&session, &tr, args),
    }
}

fn board_from_args(args: &EstimateArgs) -> BoardSpecification {
    let mut board = BoardSpecification::default_for(args.flute);
    let given = [
        (LayerRole::Outer, &args.outer),
        (LayerRole::Flute, &args.fluting),
        (LayerRole::FluteA, &args.fluting_a),
        (LayerRole::Center, &args.center),
        (LayerRole::FluteB, &args.fluting_b),
        (LayerRole::Inner, &args.inner),
    ];
    for (role, label) in given {
        if let Some(label) = label {
            board.set(role, label.as_str());
        }
    }
    board
}

fn run_estimate(session: &Session, tr: &Translator, args: EstimateArgs) -> Result<(), AppError> {
    let required = LayerRole::required_for(args.flute);
    let stray = [
        (LayerRole::Flute, args.fluting.is_some()),
        (LayerRole::FluteA, args.fluting_a.is_some()),
        (LayerRole::Center, args.center.is_some()),
        (LayerRole::FluteB, args.fluting_b.is_some()),
    ]
    .into_iter()
    .find(|(role, given)| *given && !required.contains(role));
    if let Some((role, _)) = stray {
        return Err(AppError::InvalidArgument(format!(
            "{role} layer is not used by flute {}",
            args.flute
        )));
    }

    let defaults = session.config.defaults;
    let mut params = defaults;
    params.loss_rate_percent = args.loss_rate.unwrap_or(defaults.loss_rate_percent);
    params.fixed.die_cut = args.die_cut.unwrap_or(defaults.fixed.die_cut);
    params.fixed.glue = args.glue_cost.unwrap_or(defaults.fixed.glue);
    params.fixed.misc = args.misc_cost.unwrap_or(defaults.fixed.misc);
    params.print_colors = args.print_colors.unwrap_or(defaults.print_colors);
    params.quantity = args.quantity.unwrap_or(defaults.quantity);
    params.vat_included = args.vat.unwrap_or(defaults.vat_included);

    let mut policy = session.config.policy;
    if let Some(v) = args.sheet_width {
        policy.sheet_width = v;
    }
    if let Some(v) = args.area_mode {
        policy.area = v;
    }
    if let Some(v) = args.rounding {
        policy.rounding = v;
    }
    if let Some(v) = args.material_lookup {
        policy.material_lookup = v;
    }

    let input = EstimateInput {
        dimensions: BoxDimensions {
            length_mm: args.length,
            width_mm: args.width,
            height_mm: args.height,
            glue_allowance_mm: args.glue_allowance,
            lane_count: args.lanes,
            trim_allowance_mm: args.trim,
        },
        manual_production_width_mm: args.manual_width,
        board: board_from_args(&args),
        catalog: &session.catalog,
        flute: args.flute,
        params,
        policy,
    };
    let breakdown = costing::compute_cost(&input)?;
    ui_cli::print_breakdown(tr, &breakdown);
    if let Some(format) = args.export {
        let path = export::write_export(&breakdown, tr, format, &session.export_dir)?;
        println!("{} {}", tr.t(i18n::keys::EXPORT_SAVED), path.display());
    }
    Ok(())
}
