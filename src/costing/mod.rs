//! 골판지 박스 단가 계산 모듈 모음.

pub mod board;
pub mod error;
pub mod estimate;
pub mod flute;
pub mod geometry;
pub mod material;
pub mod paper;
pub mod pricing;

pub use board::{BoardSpecification, LayerRole};
pub use error::CostError;
pub use estimate::*;
pub use flute::FluteGrade;
pub use geometry::{SheetWidthMode, WidthSource};
pub use material::{AreaMode, LayerCost, MaterialLookup, RoundingMode};
pub use paper::{PaperGrade, SupplierCatalog, DEFAULT_SUPPLIER};
pub use pricing::{FixedCosts, PrintColors};
