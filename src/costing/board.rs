use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::flute::FluteGrade;

/// 원단의 물리적 층 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// 표면지
    Outer,
    /// 골심지 (편면골)
    Flute,
    /// 골심지A (이중골)
    FluteA,
    /// 중심지 (이중골)
    Center,
    /// 골심지B (이중골)
    FluteB,
    /// 이면지
    Inner,
}

const SINGLE_WALL_ROLES: [LayerRole; 3] = [LayerRole::Outer, LayerRole::Flute, LayerRole::Inner];

const DOUBLE_WALL_ROLES: [LayerRole; 5] = [
    LayerRole::Outer,
    LayerRole::FluteA,
    LayerRole::Center,
    LayerRole::FluteB,
    LayerRole::Inner,
];

impl LayerRole {
    /// 골 종류가 요구하는 층 역할을 바깥쪽부터 순서대로 돌려준다.
    pub fn required_for(flute: FluteGrade) -> &'static [LayerRole] {
        if flute.is_double_wall() {
            &DOUBLE_WALL_ROLES
        } else {
            &SINGLE_WALL_ROLES
        }
    }

    /// 층 역할별 단조율. 평면층은 1.0, 이중골의 A/B 골심지는 고정 단조율을 쓴다.
    pub fn take_up_factor(self, flute: FluteGrade) -> f64 {
        match self {
            LayerRole::Outer | LayerRole::Inner | LayerRole::Center => 1.0,
            LayerRole::Flute => flute.take_up_factor(),
            LayerRole::FluteA => super::flute::DW_FACTOR_A,
            LayerRole::FluteB => super::flute::DW_FACTOR_B,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LayerRole::Outer => "outer",
            LayerRole::Flute => "flute",
            LayerRole::FluteA => "flute_a",
            LayerRole::Center => "center",
            LayerRole::FluteB => "flute_b",
            LayerRole::Inner => "inner",
        }
    }

    /// 원래 견적표에서 쓰던 한국어 층 이름.
    pub fn korean_name(self) -> &'static str {
        match self {
            LayerRole::Outer => "표면지",
            LayerRole::Flute => "골심지",
            LayerRole::FluteA => "골심지A",
            LayerRole::Center => "중심지",
            LayerRole::FluteB => "골심지B",
            LayerRole::Inner => "이면지",
        }
    }
}

impl std::fmt::Display for LayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// 층 역할 → 원지 라벨 배정.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSpecification {
    layers: BTreeMap<LayerRole, String>,
}

impl BoardSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// 편면골 사양 (표면지/골심지/이면지).
    pub fn single_wall(outer: &str, flute: &str, inner: &str) -> Self {
        Self::new()
            .with(LayerRole::Outer, outer)
            .with(LayerRole::Flute, flute)
            .with(LayerRole::Inner, inner)
    }

    /// 이중골 사양 (표면지/골심지A/중심지/골심지B/이면지).
    pub fn double_wall(outer: &str, flute_a: &str, center: &str, flute_b: &str, inner: &str) -> Self {
        Self::new()
            .with(LayerRole::Outer, outer)
            .with(LayerRole::FluteA, flute_a)
            .with(LayerRole::Center, center)
            .with(LayerRole::FluteB, flute_b)
            .with(LayerRole::Inner, inner)
    }

    /// 견적 화면의 기본 선택값 (표면지 SK180, 이면지 K180, 골심지/중심지 S120).
    pub fn default_for(flute: FluteGrade) -> Self {
        if flute.is_double_wall() {
            Self::double_wall("SK180", "S120", "S120", "S120", "K180")
        } else {
            Self::single_wall("SK180", "S120", "K180")
        }
    }

    pub fn with(mut self, role: LayerRole, label: impl Into<String>) -> Self {
        self.set(role, label);
        self
    }

    pub fn set(&mut self, role: LayerRole, label: impl Into<String>) {
        self.layers.insert(role, label.into());
    }

    pub fn get(&self, role: LayerRole) -> Option<&str> {
        self.layers.get(&role).map(String::as_str)
    }
}
