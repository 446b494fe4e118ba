//! 박스 전개 치수와 실제 생산 지폭을 결정한다.

use serde::{Deserialize, Serialize};

use super::error::CostError;

/// 생산 가능한 최대 지폭 [mm]
pub const MAX_SHEET_WIDTH_MM: f64 = 2500.0;

/// 이 값 미만의 지폭은 규격 지폭으로 올리지 않는다 [mm]
pub const SNAP_FLOOR_MM: f64 = 1100.0;

/// 규격 지폭표 [mm]. 오름차순이어야 한다.
pub const STANDARD_WIDTHS_MM: [f64; 21] = [
    1150.0, 1200.0, 1250.0, 1300.0, 1350.0, 1400.0, 1450.0, 1500.0, 1550.0, 1600.0, 1650.0,
    1700.0, 1750.0, 1800.0, 1900.0, 2000.0, 2100.0, 2200.0, 2300.0, 2400.0, 2500.0,
];

/// 박스 한 장의 전개 치수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnrolledDimensions {
    /// 전장 [mm]
    pub length_mm: f64,
    /// 전폭 [mm]
    pub width_mm: f64,
}

/// 지폭 결정 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetWidthMode {
    /// 최대 지폭 초과 시 오류, 그 외에는 계산값 그대로 사용
    #[default]
    HardCap,
    /// 규격 지폭표에서 올림, 최대치 초과는 최대치로 고정
    SnapTable,
}

/// 생산 지폭이 어떻게 정해졌는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthSource {
    /// 계산값 그대로
    Theoretical,
    /// 규격 지폭으로 올림 또는 최대치 고정
    Snapped,
    /// 작업자 수동 입력
    Manual,
}

/// 전장/전폭을 계산한다. 입력 검증은 호출 측 책임이다.
pub fn unrolled_dimensions(
    length_mm: f64,
    width_mm: f64,
    height_mm: f64,
    glue_allowance_mm: f64,
) -> UnrolledDimensions {
    UnrolledDimensions {
        length_mm: (length_mm + width_mm) * 2.0 + glue_allowance_mm,
        width_mm: width_mm + height_mm,
    }
}

/// 계산상 필요한 지폭 = 전폭 × 폭수 + 여유값.
pub fn theoretical_sheet_width(unrolled_width_mm: f64, lane_count: u32, trim_allowance_mm: f64) -> f64 {
    unrolled_width_mm * f64::from(lane_count) + trim_allowance_mm
}

/// 규격 지폭표에서 필요한 지폭 이상인 가장 작은 값을 고른다.
/// 하한 미만은 그대로, 표 범위를 넘으면 최대치로 고정한다.
pub fn snap_to_standard(required_mm: f64) -> f64 {
    if required_mm < SNAP_FLOOR_MM {
        return required_mm;
    }
    let idx = STANDARD_WIDTHS_MM.partition_point(|&w| w < required_mm);
    match STANDARD_WIDTHS_MM.get(idx) {
        Some(&w) => w,
        None => {
            tracing::warn!(
                required_mm,
                max_mm = MAX_SHEET_WIDTH_MM,
                "required sheet width above standard table, clamped"
            );
            MAX_SHEET_WIDTH_MM
        }
    }
}

/// 정책에 따라 생산 지폭을 결정한다.
pub fn resolve_production_width(
    required_mm: f64,
    mode: SheetWidthMode,
) -> Result<(f64, WidthSource), CostError> {
    match mode {
        SheetWidthMode::HardCap => {
            if required_mm > MAX_SHEET_WIDTH_MM {
                Err(CostError::SheetWidthExceeded {
                    required_mm,
                    max_mm: MAX_SHEET_WIDTH_MM,
                })
            } else {
                Ok((required_mm, WidthSource::Theoretical))
            }
        }
        SheetWidthMode::SnapTable => {
            let snapped = snap_to_standard(required_mm);
            let source = if snapped == required_mm {
                WidthSource::Theoretical
            } else {
                WidthSource::Snapped
            };
            Ok((snapped, source))
        }
    }
}
