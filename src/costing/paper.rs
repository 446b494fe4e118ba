use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 원지 한 종류의 단가와 평량.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperGrade {
    /// 원지값 [원/kg]
    pub price_per_kg: f64,
    /// 평량 [g/㎡]
    pub gsm: f64,
}

impl PaperGrade {
    pub const fn new(price_per_kg: f64, gsm: f64) -> Self {
        Self { price_per_kg, gsm }
    }

    /// 이 원지 한 겹의 ㎡당 비용 [원/㎡].
    pub fn cost_per_sqm(&self) -> f64 {
        self.price_per_kg * (self.gsm / 1000.0)
    }
}

/// 기본 원지 기준표. 라벨 → (원지값 원/kg, 평량 g/㎡)
const DEFAULT_PAPERS: &[(&str, PaperGrade)] = &[
    ("S120", PaperGrade::new(580.0, 120.0)),
    ("B150", PaperGrade::new(560.0, 150.0)),
    ("K180", PaperGrade::new(650.0, 180.0)),
    ("K200", PaperGrade::new(630.0, 200.0)),
    ("SK180", PaperGrade::new(650.0, 180.0)),
    ("KLB175", PaperGrade::new(720.0, 175.0)),
    ("WK180", PaperGrade::new(850.0, 180.0)),
];

/// 기본 제조사 이름.
pub const DEFAULT_SUPPLIER: &str = "default";

/// 제조사 하나의 원지 목록. 계산 한 번에는 하나의 카탈로그만 쓰인다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierCatalog {
    papers: BTreeMap<String, PaperGrade>,
}

impl SupplierCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 내장 기준표로 채운 카탈로그를 만든다.
    pub fn builtin() -> Self {
        let papers = DEFAULT_PAPERS
            .iter()
            .map(|(label, grade)| (label.to_string(), *grade))
            .collect();
        Self { papers }
    }

    pub fn get(&self, label: &str) -> Option<&PaperGrade> {
        self.papers.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.papers.contains_key(label)
    }

    /// 입력한 원지명을 카탈로그에 등록된 표기로 찾는다.
    /// 정확히 일치하는 이름이 우선이고, 없으면 대소문자를 무시해 하나만 맞을 때 그 이름을 쓴다.
    pub fn find_label(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        if let Some((label, _)) = self.papers.get_key_value(input) {
            return Some(label.as_str());
        }
        let mut matches = self
            .papers
            .keys()
            .filter(|label| label.eq_ignore_ascii_case(input));
        match (matches.next(), matches.next()) {
            (Some(label), None) => Some(label.as_str()),
            _ => None,
        }
    }

    /// 원지를 추가하거나 덮어쓴다.
    pub fn insert(&mut self, label: impl Into<String>, grade: PaperGrade) {
        self.papers.insert(label.into(), grade);
    }

    /// `overrides`의 항목을 덮어쓴 사본을 반환한다. 원본은 바뀌지 않는다.
    pub fn with_overrides(&self, overrides: &SupplierCatalog) -> SupplierCatalog {
        let mut merged = self.clone();
        for (label, grade) in &overrides.papers {
            merged.papers.insert(label.clone(), *grade);
        }
        merged
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.papers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaperGrade)> {
        self.papers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_label_keeps_catalog_spelling() {
        let mut cat = SupplierCatalog::builtin();
        cat.insert("Kraft-x", PaperGrade::new(700.0, 200.0));
        assert_eq!(cat.find_label("Kraft-x"), Some("Kraft-x"));
        assert_eq!(cat.find_label(" kraft-X "), Some("Kraft-x"));
        assert_eq!(cat.find_label("sk180"), Some("SK180"));
        assert_eq!(cat.find_label("nope"), None);

        // 대소문자만 다른 이름이 둘이면 정확히 입력해야 한다
        cat.insert("kraft-x", PaperGrade::new(710.0, 200.0));
        assert_eq!(cat.find_label("KRAFT-X"), None);
        assert_eq!(cat.find_label("kraft-x"), Some("kraft-x"));
    }

    #[test]
    fn builtin_has_seven_grades() {
        let cat = SupplierCatalog::builtin();
        assert_eq!(cat.iter().count(), 7);
        let sk = cat.get("SK180").unwrap();
        assert_eq!(sk.price_per_kg, 650.0);
        assert_eq!(sk.gsm, 180.0);
    }

    #[test]
    fn overrides_do_not_touch_base() {
        let base = SupplierCatalog::builtin();
        let mut patch = SupplierCatalog::new();
        patch.insert("K180", PaperGrade::new(700.0, 180.0));
        patch.insert("X100", PaperGrade::new(400.0, 100.0));
        let merged = base.with_overrides(&patch);
        assert_eq!(merged.get("K180").unwrap().price_per_kg, 700.0);
        assert!(merged.contains("X100"));
        assert_eq!(base.get("K180").unwrap().price_per_kg, 650.0);
        assert!(!base.contains("X100"));
    }

    #[test]
    fn cost_per_sqm_uses_kg_grammage() {
        // 650원/kg * 0.18kg/㎡ = 117원/㎡
        let g = PaperGrade::new(650.0, 180.0);
        assert!((g.cost_per_sqm() - 117.0).abs() < 1e-9);
    }
}
