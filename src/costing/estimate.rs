//! 단가 계산 진입점. 지폭 결정 → 면적 → 원재료비 → 가공비 → 총액/단가 순으로 흐른다.

use serde::{Deserialize, Serialize};

use super::board::BoardSpecification;
use super::error::CostError;
use super::flute::FluteGrade;
use super::geometry::{self, SheetWidthMode, WidthSource};
use super::material::{self, AreaMode, LayerCost, MaterialLookup, RoundingMode};
use super::paper::SupplierCatalog;
use super::pricing::{self, FixedCosts, PrintColors};

/// 박스 치수와 생산 조건 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    /// 장 [mm]
    pub length_mm: f64,
    /// 폭 [mm]
    pub width_mm: f64,
    /// 고 [mm]
    pub height_mm: f64,
    /// 미미(접착여유) [mm]
    pub glue_allowance_mm: f64,
    /// 폭수
    pub lane_count: u32,
    /// 재단 여유값 [mm]
    pub trim_allowance_mm: f64,
}

/// 계산 시점에 선택하는 정책 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    pub sheet_width: SheetWidthMode,
    pub area: AreaMode,
    pub rounding: RoundingMode,
    pub material_lookup: MaterialLookup,
}

/// 비용 및 수량 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParameters {
    /// 재료 로스율 [%]
    pub loss_rate_percent: f64,
    pub fixed: FixedCosts,
    pub print_colors: PrintColors,
    /// 총 생산 수량
    pub quantity: u32,
    /// 부가세 10% 포함 여부
    pub vat_included: bool,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            loss_rate_percent: 10.0,
            fixed: FixedCosts {
                die_cut: 50.0,
                glue: 30.0,
                misc: 0.0,
            },
            print_colors: PrintColors::One,
            quantity: 1000,
            vat_included: true,
        }
    }
}

/// 한 번의 계산에 필요한 모든 입력.
#[derive(Debug, Clone)]
pub struct EstimateInput<'a> {
    pub dimensions: BoxDimensions,
    /// 작업자가 직접 지정한 생산 지폭 [mm]. 지정되면 지폭 정책을 건너뛴다.
    pub manual_production_width_mm: Option<f64>,
    pub board: BoardSpecification,
    pub catalog: &'a SupplierCatalog,
    pub flute: FluteGrade,
    pub params: CostParameters,
    pub policy: CostPolicy,
}

/// 계산 결과 상세 내역. 필드 순서가 내보내기 순서이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub dimensions: BoxDimensions,
    pub flute: FluteGrade,
    /// 전장 [mm]
    pub unrolled_length_mm: f64,
    /// 전폭 [mm]
    pub unrolled_width_mm: f64,
    /// 계산된 실제지폭 [mm]
    pub theoretical_sheet_width_mm: f64,
    /// 생산 지폭 [mm]
    pub production_sheet_width_mm: f64,
    pub width_source: WidthSource,
    /// 박스당 소요량 [㎡]
    pub area_per_unit_sqm: f64,
    pub layers: Vec<LayerCost>,
    /// 로스 적용 전 ㎡당 원재료비 [원/㎡]
    pub base_material_cost_per_sqm: f64,
    pub loss_rate_percent: f64,
    /// 로스 포함 ㎡당 원재료비 [원/㎡]
    pub material_cost_per_sqm: f64,
    /// 박스당 원단비 [원]
    pub material_cost_per_unit: f64,
    /// ㎡당 가공비 [원/㎡]
    pub processing_cost_per_sqm: f64,
    pub fixed_costs: FixedCosts,
    /// 박스당 가공비 [원]
    pub processing_cost_per_unit: f64,
    /// 인쇄비 제외 박스당 비용 [원]
    pub cost_per_unit: f64,
    pub print_colors: PrintColors,
    /// 인쇄비 총액 [원]
    pub print_cost_total: f64,
    pub quantity: u32,
    pub vat_included: bool,
    /// 총 비용 [원]
    pub total_cost: f64,
    /// 개당 최종 단가 [원]
    pub unit_price: f64,
    pub policy: CostPolicy,
}

fn check(field: &'static str, value: f64, allow_zero: bool) -> Result<(), CostError> {
    let ok = value.is_finite() && if allow_zero { value >= 0.0 } else { value > 0.0 };
    if ok {
        Ok(())
    } else {
        Err(CostError::InvalidDimension { field, value })
    }
}

fn validate(input: &EstimateInput<'_>) -> Result<(), CostError> {
    let d = &input.dimensions;
    check("length_mm", d.length_mm, false)?;
    check("width_mm", d.width_mm, false)?;
    check("height_mm", d.height_mm, false)?;
    check("glue_allowance_mm", d.glue_allowance_mm, true)?;
    check("trim_allowance_mm", d.trim_allowance_mm, true)?;
    if d.lane_count == 0 {
        return Err(CostError::InvalidDimension {
            field: "lane_count",
            value: 0.0,
        });
    }
    let p = &input.params;
    check("loss_rate_percent", p.loss_rate_percent, true)?;
    check("die_cut", p.fixed.die_cut, true)?;
    check("glue", p.fixed.glue, true)?;
    check("misc", p.fixed.misc, true)?;
    if p.quantity == 0 {
        return Err(CostError::InvalidQuantity);
    }
    if let Some(w) = input.manual_production_width_mm {
        if !(w.is_finite() && w > 0.0) {
            return Err(CostError::InvalidManualWidth { value: w });
        }
    }
    Ok(())
}

/// 입력 한 벌로 박스 단가를 계산한다.
pub fn compute_cost(input: &EstimateInput<'_>) -> Result<CostBreakdown, CostError> {
    validate(input)?;
    let d = input.dimensions;
    let policy = input.policy;
    let params = input.params;

    let unrolled =
        geometry::unrolled_dimensions(d.length_mm, d.width_mm, d.height_mm, d.glue_allowance_mm);
    let theoretical =
        geometry::theoretical_sheet_width(unrolled.width_mm, d.lane_count, d.trim_allowance_mm);
    let (production, width_source) = match input.manual_production_width_mm {
        Some(w) => (w, WidthSource::Manual),
        None => geometry::resolve_production_width(theoretical, policy.sheet_width)?,
    };
    tracing::debug!(theoretical, production, ?width_source, "sheet width resolved");

    let area = material::area_per_unit(unrolled.length_mm, production, d.lane_count, policy.area);

    let layers =
        material::material_cost_per_area(&input.board, input.catalog, input.flute, policy.material_lookup)?;
    let base = material::sum_layers(&layers);
    let per_sqm = material::apply_loss_and_round(base, params.loss_rate_percent, policy.rounding);

    let processing_per_sqm = input.flute.processing_cost_per_sqm();
    let unit = pricing::unit_cost(per_sqm, area, processing_per_sqm, &params.fixed);
    let print_total = params.print_colors.total_cost();
    let (total, unit_price) =
        pricing::total_and_unit_price(unit.cost_per_unit, params.quantity, print_total, params.vat_included);

    tracing::info!(unit_price, total, quantity = params.quantity, "estimate computed");

    Ok(CostBreakdown {
        dimensions: d,
        flute: input.flute,
        unrolled_length_mm: unrolled.length_mm,
        unrolled_width_mm: unrolled.width_mm,
        theoretical_sheet_width_mm: theoretical,
        production_sheet_width_mm: production,
        width_source,
        area_per_unit_sqm: area,
        layers,
        base_material_cost_per_sqm: base,
        loss_rate_percent: params.loss_rate_percent,
        material_cost_per_sqm: per_sqm,
        material_cost_per_unit: unit.material_per_unit,
        processing_cost_per_sqm: processing_per_sqm,
        fixed_costs: params.fixed,
        processing_cost_per_unit: unit.processing_per_unit,
        cost_per_unit: unit.cost_per_unit,
        print_colors: params.print_colors,
        print_cost_total: print_total,
        quantity: params.quantity,
        vat_included: params.vat_included,
        total_cost: total,
        unit_price,
        policy,
    })
}
