use serde::{Deserialize, Serialize};

/// 골 종류. 편면골(E/B/A)과 이중골(DW = A+B)이 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluteGrade {
    E,
    B,
    A,
    /// A골 + B골 이중골
    #[serde(rename = "DW")]
    DoubleWall,
}

/// 이중골의 A측 골심지 단조율
pub const DW_FACTOR_A: f64 = 1.6;
/// 이중골의 B측 골심지 단조율
pub const DW_FACTOR_B: f64 = 1.4;

impl FluteGrade {
    pub const ALL: [FluteGrade; 4] = [
        FluteGrade::E,
        FluteGrade::B,
        FluteGrade::A,
        FluteGrade::DoubleWall,
    ];

    /// 골심지 단조율(평면 면적 대비 원지 소요 배수).
    /// 이중골은 두 골심지 단조율의 합을 명목값으로 갖는다.
    pub fn take_up_factor(self) -> f64 {
        match self {
            FluteGrade::E => 1.3,
            FluteGrade::B => 1.4,
            FluteGrade::A => 1.6,
            FluteGrade::DoubleWall => 3.0,
        }
    }

    /// ㎡당 가공비 [원/㎡]
    pub fn processing_cost_per_sqm(self) -> f64 {
        match self {
            FluteGrade::E => 15.0,
            FluteGrade::B => 10.0,
            FluteGrade::A => 20.0,
            FluteGrade::DoubleWall => 29.0,
        }
    }

    pub fn is_double_wall(self) -> bool {
        matches!(self, FluteGrade::DoubleWall)
    }

    /// 이중골이면 (A측, B측) 단조율을 돌려준다.
    pub fn sub_factors(self) -> Option<(f64, f64)> {
        match self {
            FluteGrade::DoubleWall => Some((DW_FACTOR_A, DW_FACTOR_B)),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            FluteGrade::E => "E",
            FluteGrade::B => "B",
            FluteGrade::A => "A",
            FluteGrade::DoubleWall => "DW",
        }
    }

    /// "B", "b", "B골", "DW골(A+B)" 같은 표기를 받아들인다.
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.trim().to_ascii_uppercase();
        let t = t.trim_end_matches("골(A+B)").trim_end_matches('골');
        match t {
            "E" => Some(FluteGrade::E),
            "B" => Some(FluteGrade::B),
            "A" => Some(FluteGrade::A),
            "DW" | "AB" | "A+B" => Some(FluteGrade::DoubleWall),
            _ => None,
        }
    }
}

impl std::fmt::Display for FluteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_wall_sub_factors_sum_to_nominal() {
        for grade in FluteGrade::ALL {
            if let Some((a, b)) = grade.sub_factors() {
                assert!((a + b - grade.take_up_factor()).abs() < 1e-12, "{grade}");
            }
        }
    }

    #[test]
    fn parses_korean_labels() {
        assert_eq!(FluteGrade::parse("B골"), Some(FluteGrade::B));
        assert_eq!(FluteGrade::parse("DW골(A+B)"), Some(FluteGrade::DoubleWall));
        assert_eq!(FluteGrade::parse("dw"), Some(FluteGrade::DoubleWall));
        assert_eq!(FluteGrade::parse("C"), None);
    }
}
