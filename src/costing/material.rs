//! 소요 면적과 ㎡당 원재료비 계산.

use serde::{Deserialize, Serialize};

use super::board::{BoardSpecification, LayerRole};
use super::error::CostError;
use super::flute::FluteGrade;
use super::paper::SupplierCatalog;

/// 박스 1개당 면적 계산 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaMode {
    /// 전장 × 지폭 (폭수는 지폭 계산에 이미 반영됨)
    #[default]
    PerBlankFromFullSheet,
    /// 전장 × 지폭 ÷ 폭수
    PerBlankDividedByLanes,
}

/// 카탈로그에 없는 원지를 만났을 때의 처리.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialLookup {
    /// `UnknownMaterial` 오류로 중단
    #[default]
    Strict,
    /// 해당 층을 0원으로 취급
    Permissive,
}

/// ㎡당 원재료비 반올림 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 반올림 없이 최종 단가까지 전체 정밀도 유지
    #[default]
    Unrounded,
    /// 로스율 적용 후 ㎡당 원재료비를 원 단위로 반올림
    RoundAfterLoss,
    /// ㎡당 원재료비를 원 단위로 반올림한 뒤 로스율 적용
    RoundBeforeLoss,
}

/// 층 하나의 원재료비 내역.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerCost {
    pub role: LayerRole,
    pub paper: String,
    /// 원지값 [원/kg], 카탈로그에 없으면 0
    pub price_per_kg: f64,
    /// 평량 [g/㎡], 카탈로그에 없으면 0
    pub gsm: f64,
    /// 단조율
    pub factor: f64,
    /// 이 층의 ㎡당 원재료비 [원/㎡]
    pub cost_per_sqm: f64,
}

/// 박스 1개당 면적 [㎡].
pub fn area_per_unit(unrolled_length_mm: f64, production_width_mm: f64, lane_count: u32, mode: AreaMode) -> f64 {
    let sheet_mm2 = unrolled_length_mm * production_width_mm;
    match mode {
        AreaMode::PerBlankFromFullSheet => sheet_mm2 / 1_000_000.0,
        AreaMode::PerBlankDividedByLanes => {
            if lane_count == 0 {
                0.0
            } else {
                sheet_mm2 / f64::from(lane_count) / 1_000_000.0
            }
        }
    }
}

/// 원단 사양의 각 층 원재료비를 계산한다. 합계는 로스율 적용 전 ㎡당 원재료비이다.
pub fn material_cost_per_area(
    board: &BoardSpecification,
    catalog: &SupplierCatalog,
    flute: FluteGrade,
    lookup: MaterialLookup,
) -> Result<Vec<LayerCost>, CostError> {
    let mut layers = Vec::with_capacity(5);
    for &role in LayerRole::required_for(flute) {
        let label = board.get(role).ok_or(CostError::MissingLayer { role })?;
        let factor = role.take_up_factor(flute);
        let layer = match (catalog.get(label), lookup) {
            (Some(grade), _) => LayerCost {
                role,
                paper: label.to_string(),
                price_per_kg: grade.price_per_kg,
                gsm: grade.gsm,
                factor,
                cost_per_sqm: grade.cost_per_sqm() * factor,
            },
            (None, MaterialLookup::Strict) => {
                return Err(CostError::UnknownMaterial {
                    role,
                    label: label.to_string(),
                });
            }
            (None, MaterialLookup::Permissive) => {
                tracing::warn!(%role, label, "unknown paper treated as zero cost");
                LayerCost {
                    role,
                    paper: label.to_string(),
                    price_per_kg: 0.0,
                    gsm: 0.0,
                    factor,
                    cost_per_sqm: 0.0,
                }
            }
        };
        tracing::debug!(%role, paper = label, cost_per_sqm = layer.cost_per_sqm, "layer cost");
        layers.push(layer);
    }
    Ok(layers)
}

/// 층별 내역의 합계 [원/㎡].
pub fn sum_layers(layers: &[LayerCost]) -> f64 {
    layers.iter().map(|l| l.cost_per_sqm).sum()
}

/// 로스율을 적용하고 정책에 따라 반올림한다.
pub fn apply_loss_and_round(base_cost_per_sqm: f64, loss_rate_percent: f64, rounding: RoundingMode) -> f64 {
    let loss = 1.0 + loss_rate_percent / 100.0;
    match rounding {
        RoundingMode::Unrounded => base_cost_per_sqm * loss,
        RoundingMode::RoundAfterLoss => (base_cost_per_sqm * loss).round(),
        RoundingMode::RoundBeforeLoss => base_cost_per_sqm.round() * loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::paper::PaperGrade;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn area_modes() {
        assert!(approx(area_per_unit(1040.0, 400.0, 1, AreaMode::PerBlankFromFullSheet), 0.416));
        assert!(approx(area_per_unit(1040.0, 1600.0, 4, AreaMode::PerBlankDividedByLanes), 0.416));
        assert_eq!(area_per_unit(1040.0, 1600.0, 0, AreaMode::PerBlankDividedByLanes), 0.0);
    }

    #[test]
    fn single_wall_a_flute() {
        let cat = SupplierCatalog::builtin();
        let board = BoardSpecification::single_wall("K180", "S120", "SK180");
        let layers = material_cost_per_area(&board, &cat, FluteGrade::A, MaterialLookup::Strict).unwrap();
        assert_eq!(layers.len(), 3);
        // 117 + 580*0.12*1.6 + 117
        assert!(approx(sum_layers(&layers), 345.36));
    }

    #[test]
    fn double_wall_applies_each_sub_factor() {
        let mut cat = SupplierCatalog::new();
        cat.insert("P", PaperGrade::new(1000.0, 100.0)); // 100원/㎡
        cat.insert("FA", PaperGrade::new(1000.0, 200.0)); // 200원/㎡
        cat.insert("FB", PaperGrade::new(1000.0, 300.0)); // 300원/㎡
        let board = BoardSpecification::double_wall("P", "FA", "P", "FB", "P");
        let layers =
            material_cost_per_area(&board, &cat, FluteGrade::DoubleWall, MaterialLookup::Strict).unwrap();
        // 100 + 200*1.6 + 100 + 300*1.4 + 100
        assert!(approx(sum_layers(&layers), 1040.0));
        // 단일 명목 단조율(3.0)을 양쪽에 나눠 쓰면 다른 값이 나와야 한다.
        assert!(!approx(sum_layers(&layers), 300.0 + (200.0 + 300.0) * 1.5));
    }

    #[test]
    fn strict_rejects_unknown_paper() {
        let cat = SupplierCatalog::builtin();
        let board = BoardSpecification::single_wall("K180", "NOPE", "SK180");
        let err = material_cost_per_area(&board, &cat, FluteGrade::B, MaterialLookup::Strict).unwrap_err();
        assert_eq!(
            err,
            CostError::UnknownMaterial {
                role: LayerRole::Flute,
                label: "NOPE".into()
            }
        );
    }

    #[test]
    fn permissive_zeroes_unknown_paper() {
        let cat = SupplierCatalog::builtin();
        let board = BoardSpecification::single_wall("K180", "NOPE", "SK180");
        let layers = material_cost_per_area(&board, &cat, FluteGrade::B, MaterialLookup::Permissive).unwrap();
        assert!(approx(sum_layers(&layers), 234.0));
    }

    #[test]
    fn missing_role_always_fails() {
        let cat = SupplierCatalog::builtin();
        let board = BoardSpecification::single_wall("K180", "S120", "SK180");
        let err = material_cost_per_area(&board, &cat, FluteGrade::DoubleWall, MaterialLookup::Permissive)
            .unwrap_err();
        assert_eq!(err, CostError::MissingLayer { role: LayerRole::FluteA });
    }

    #[test]
    fn rounding_policies() {
        assert!(approx(apply_loss_and_round(345.36, 10.0, RoundingMode::Unrounded), 379.896));
        assert_eq!(apply_loss_and_round(345.36, 10.0, RoundingMode::RoundAfterLoss), 380.0);
        assert!(approx(apply_loss_and_round(345.36, 10.0, RoundingMode::RoundBeforeLoss), 379.5));
    }
}
