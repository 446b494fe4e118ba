use super::board::LayerRole;

/// 단가 계산 도메인 오류. 오류가 나면 상세 내역은 만들어지지 않는다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    /// 계산된 실제지폭이 생산 가능한 최대 지폭을 넘음 (HardCap 정책)
    #[error(
        "계산된 실제지폭({required_mm}mm)이 최대 허용치 {max_mm}mm를 초과합니다. '폭수' 또는 '여유값'을 조정해주세요."
    )]
    SheetWidthExceeded { required_mm: f64, max_mm: f64 },
    /// 원단 사양의 원지가 활성 카탈로그에 없음
    #[error("{}({role}) 층의 원지 '{label}'이(가) 원지 목록에 없습니다.", .role.korean_name())]
    UnknownMaterial { role: LayerRole, label: String },
    /// 골 종류가 요구하는 층이 원단 사양에 빠짐
    #[error("{}({role}) 층의 원지가 지정되지 않았습니다.", .role.korean_name())]
    MissingLayer { role: LayerRole },
    /// 수량이 1 미만
    #[error("생산 수량은 1 이상이어야 합니다.")]
    InvalidQuantity,
    /// 치수나 비용 입력이 허용 범위를 벗어남
    #[error("입력값 '{field}'이(가) 올바르지 않습니다: {value}")]
    InvalidDimension { field: &'static str, value: f64 },
    /// 수동 지폭은 0보다 커야 함
    #[error("수동 지폭은 0보다 커야 합니다: {value}")]
    InvalidManualWidth { value: f64 },
}
