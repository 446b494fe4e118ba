use serde::{Deserialize, Serialize};

/// 부가세 배수 (10%)
pub const VAT_MULTIPLIER: f64 = 1.10;

/// 인쇄 도수. 인쇄비는 수량과 무관하게 총액에 한 번 더해진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintColors {
    /// 0도 (무지)
    None,
    /// 1도
    #[default]
    One,
    /// 2도
    Two,
    /// 4도
    Four,
}

impl PrintColors {
    pub const ALL: [PrintColors; 4] = [
        PrintColors::None,
        PrintColors::One,
        PrintColors::Two,
        PrintColors::Four,
    ];

    /// 인쇄비 총액 [원]
    pub fn total_cost(self) -> f64 {
        match self {
            PrintColors::None => 0.0,
            PrintColors::One => 10_000.0,
            PrintColors::Two => 20_000.0,
            PrintColors::Four => 35_000.0,
        }
    }

    pub fn count(self) -> u8 {
        match self {
            PrintColors::None => 0,
            PrintColors::One => 1,
            PrintColors::Two => 2,
            PrintColors::Four => 4,
        }
    }

    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(PrintColors::None),
            1 => Some(PrintColors::One),
            2 => Some(PrintColors::Two),
            4 => Some(PrintColors::Four),
            _ => None,
        }
    }
}

/// 박스 1개당 고정 가공비 [원/개].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCosts {
    /// 톰슨비(도무송)
    pub die_cut: f64,
    /// 접착비
    pub glue: f64,
    /// 부자재비
    pub misc: f64,
}

impl FixedCosts {
    pub fn sum(&self) -> f64 {
        self.die_cut + self.glue + self.misc
    }
}

/// 박스 1개당 비용 내역 (인쇄비, 부가세 제외).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCost {
    pub material_per_unit: f64,
    pub processing_per_unit: f64,
    pub cost_per_unit: f64,
}

/// 박스 1개당 원단비와 가공비를 더한다.
pub fn unit_cost(
    final_cost_per_sqm: f64,
    area_sqm: f64,
    processing_cost_per_sqm: f64,
    fixed: &FixedCosts,
) -> UnitCost {
    let material_per_unit = final_cost_per_sqm * area_sqm;
    let processing_per_unit = processing_cost_per_sqm * area_sqm + fixed.sum();
    UnitCost {
        material_per_unit,
        processing_per_unit,
        cost_per_unit: material_per_unit + processing_per_unit,
    }
}

/// 총 비용과 개당 단가를 구한다. 수량이 0이면 단가는 0이다.
pub fn total_and_unit_price(
    cost_per_unit: f64,
    quantity: u32,
    print_cost_total: f64,
    vat_included: bool,
) -> (f64, f64) {
    let mut total = cost_per_unit * f64::from(quantity) + print_cost_total;
    if vat_included {
        total *= VAT_MULTIPLIER;
    }
    let unit_price = if quantity == 0 {
        0.0
    } else {
        total / f64::from(quantity)
    };
    (total, unit_price)
}
