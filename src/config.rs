use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::costing::{CostParameters, CostPolicy, SupplierCatalog, DEFAULT_SUPPLIER};

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 표시 언어 (auto/ko/en)
    pub language: String,
    /// 계산에 사용할 제조사
    pub active_supplier: String,
    /// 기본 계산 정책
    pub policy: CostPolicy,
    /// 입력을 생략했을 때 쓰는 비용/수량 기본값
    pub defaults: CostParameters,
    /// 제조사별 원지 단가. 내장 기준표 위에 덮어쓴다.
    pub suppliers: BTreeMap<String, SupplierCatalog>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            active_supplier: DEFAULT_SUPPLIER.to_string(),
            policy: CostPolicy::default(),
            defaults: CostParameters::default(),
            suppliers: BTreeMap::new(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 제조사 이름에 해당하는 카탈로그 사본을 만든다.
    /// 내장 기준표에 설정 파일의 값을 덮어쓴 결과이며, 모르는 제조사면 None.
    pub fn catalog_for(&self, supplier: &str) -> Option<SupplierCatalog> {
        let base = SupplierCatalog::builtin();
        match self.suppliers.get(supplier) {
            Some(overrides) => Some(base.with_overrides(overrides)),
            None if supplier == DEFAULT_SUPPLIER => Some(base),
            None => None,
        }
    }

    pub fn supplier_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.suppliers.keys().cloned().collect();
        if !self.suppliers.contains_key(DEFAULT_SUPPLIER) {
            names.insert(0, DEFAULT_SUPPLIER.to_string());
        }
        names
    }
}
