//! 상세 내역을 표/CSV/JSON으로 내보낸다. 행 순서는 고정이다.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::costing::{CostBreakdown, LayerRole, WidthSource};
use crate::i18n::{keys, Language, Translator};

/// 내보내기 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// 내보내기 중 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV 작성 오류: {0}")]
    Csv(#[from] csv::Error),
}

/// 표 한 행: (항목, 값)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

fn layer_key(role: LayerRole) -> &'static str {
    match role {
        LayerRole::Outer => keys::LAYER_OUTER,
        LayerRole::Flute => keys::LAYER_FLUTE,
        LayerRole::FluteA => keys::LAYER_FLUTE_A,
        LayerRole::Center => keys::LAYER_CENTER,
        LayerRole::FluteB => keys::LAYER_FLUTE_B,
        LayerRole::Inner => keys::LAYER_INNER,
    }
}

fn source_key(source: WidthSource) -> &'static str {
    match source {
        WidthSource::Theoretical => keys::SOURCE_THEORETICAL,
        WidthSource::Snapped => keys::SOURCE_SNAPPED,
        WidthSource::Manual => keys::SOURCE_MANUAL,
    }
}

/// 직렬화된 enum 이름(snake_case)을 얻는다.
fn variant_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

/// 숫자 표기. 정수면 소수점 없이, 아니면 주어진 자릿수까지 반올림 후 뒤의 0을 자른다.
fn num(value: f64, decimals: usize) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn money(value: f64) -> String {
    num(value, 2)
}

fn push(rows: &mut Vec<Row>, tr: &Translator, key: &str, value: String) {
    rows.push(Row {
        label: tr.t(key).to_string(),
        value,
    });
}

/// 상세 내역을 고정 순서의 행 목록으로 만든다.
pub fn breakdown_rows(b: &CostBreakdown, tr: &Translator) -> Vec<Row> {
    let mut rows = Vec::with_capacity(40);
    let r = &mut rows;
    let d = &b.dimensions;
    push(r, tr, keys::FIELD_LENGTH, num(d.length_mm, 2));
    push(r, tr, keys::FIELD_WIDTH, num(d.width_mm, 2));
    push(r, tr, keys::FIELD_HEIGHT, num(d.height_mm, 2));
    push(r, tr, keys::FIELD_GLUE_ALLOWANCE, num(d.glue_allowance_mm, 2));
    push(r, tr, keys::FIELD_LANE_COUNT, d.lane_count.to_string());
    push(r, tr, keys::FIELD_TRIM_ALLOWANCE, num(d.trim_allowance_mm, 2));
    push(r, tr, keys::FIELD_UNROLLED_LENGTH, num(b.unrolled_length_mm, 2));
    push(r, tr, keys::FIELD_UNROLLED_WIDTH, num(b.unrolled_width_mm, 2));
    push(r, tr, keys::FIELD_THEORETICAL_WIDTH, num(b.theoretical_sheet_width_mm, 2));
    push(r, tr, keys::FIELD_PRODUCTION_WIDTH, num(b.production_sheet_width_mm, 2));
    push(r, tr, keys::FIELD_WIDTH_SOURCE, tr.t(source_key(b.width_source)).to_string());
    push(r, tr, keys::FIELD_FLUTE, b.flute.code().to_string());
    push(r, tr, keys::FIELD_AREA, num(b.area_per_unit_sqm, 5));

    // 층별 ㎡당 원재료비
    for layer in &b.layers {
        r.push(Row {
            label: format!("{} [{}] ×{}", tr.t(layer_key(layer.role)), layer.paper, layer.factor),
            value: money(layer.cost_per_sqm),
        });
    }

    push(r, tr, keys::FIELD_BASE_MATERIAL, money(b.base_material_cost_per_sqm));
    push(r, tr, keys::FIELD_LOSS_RATE, num(b.loss_rate_percent, 2));
    push(r, tr, keys::FIELD_MATERIAL_PER_SQM, money(b.material_cost_per_sqm));
    push(r, tr, keys::FIELD_MATERIAL_PER_UNIT, money(b.material_cost_per_unit));
    push(r, tr, keys::FIELD_PROCESSING_PER_SQM, money(b.processing_cost_per_sqm));
    push(r, tr, keys::FIELD_DIE_CUT, money(b.fixed_costs.die_cut));
    push(r, tr, keys::FIELD_GLUE_COST, money(b.fixed_costs.glue));
    push(r, tr, keys::FIELD_MISC_COST, money(b.fixed_costs.misc));
    push(r, tr, keys::FIELD_PROCESSING_PER_UNIT, money(b.processing_cost_per_unit));
    push(r, tr, keys::FIELD_COST_PER_UNIT, money(b.cost_per_unit));
    push(r, tr, keys::FIELD_PRINT_COLORS, b.print_colors.count().to_string());
    push(r, tr, keys::FIELD_PRINT_COST, money(b.print_cost_total));
    push(r, tr, keys::FIELD_QUANTITY, b.quantity.to_string());
    push(r, tr, keys::FIELD_VAT, tr.yes_no(b.vat_included).to_string());
    push(r, tr, keys::FIELD_TOTAL, money(b.total_cost));
    push(r, tr, keys::FIELD_UNIT_PRICE, money(b.unit_price));
    push(r, tr, keys::FIELD_SHEET_WIDTH_MODE, variant_name(&b.policy.sheet_width));
    push(r, tr, keys::FIELD_AREA_MODE, variant_name(&b.policy.area));
    push(r, tr, keys::FIELD_ROUNDING_MODE, variant_name(&b.policy.rounding));
    push(r, tr, keys::FIELD_MATERIAL_LOOKUP, variant_name(&b.policy.material_lookup));
    rows
}

/// 터미널 출력용 `항목: 값` 목록.
/// 한글은 터미널에서 두 칸을 차지하므로 열 정렬은 하지 않는다.
pub fn render_table(rows: &[Row]) -> String {
    rows.iter()
        .map(|r| format!("{}: {}\n", r.label, r.value))
        .collect()
}

/// 항목/값 2열 CSV. 엑셀에서 한글이 깨지지 않도록 BOM을 먼저 쓴다.
pub fn to_csv(rows: &[Row], tr: &Translator) -> Result<String, ExportError> {
    let (item, value) = match tr.language() {
        Language::Ko => ("항목", "값"),
        Language::En => ("Item", "Value"),
    };
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer("\u{feff}".as_bytes().to_vec());
    wtr.write_record([item, value])?;
    for r in rows {
        wtr.write_record([r.label.as_str(), r.value.as_str()])?;
    }
    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 전체 정밀도의 상세 내역 JSON.
pub fn to_json(breakdown: &CostBreakdown) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(breakdown)?)
}

/// `box_price_YYYYMMDD_HHMMSS.<ext>`
pub fn export_file_name(now: DateTime<Local>, format: ExportFormat) -> String {
    format!("box_price_{}.{}", now.format("%Y%m%d_%H%M%S"), format.extension())
}

/// 상세 내역을 `dir` 아래에 저장하고 경로를 돌려준다.
pub fn write_export(
    breakdown: &CostBreakdown,
    tr: &Translator,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let content = match format {
        ExportFormat::Csv => to_csv(&breakdown_rows(breakdown, tr), tr)?,
        ExportFormat::Json => to_json(breakdown)?,
    };
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(Local::now(), format));
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "breakdown exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn number_formatting() {
        assert_eq!(num(400.0, 2), "400");
        assert_eq!(num(0.416, 5), "0.416");
        assert_eq!(money(281.99240960000004), "281.99");
        assert_eq!(money(88.32), "88.32");
    }

    #[test]
    fn csv_quotes_commas() {
        let rows = vec![
            Row {
                label: "a,b".into(),
                value: "say \"hi\"".into(),
            },
            Row {
                label: "plain".into(),
                value: "1".into(),
            },
        ];
        let csv = to_csv(&rows, &Translator::new("en")).unwrap();
        assert_eq!(
            csv,
            "\u{feff}Item,Value\r\n\"a,b\",\"say \"\"hi\"\"\"\r\nplain,1\r\n"
        );
    }

    #[test]
    fn table_lists_label_and_value() {
        let rows = vec![Row {
            label: "수량".into(),
            value: "1000".into(),
        }];
        assert_eq!(render_table(&rows), "수량: 1000\n");
    }

    #[test]
    fn file_name_has_timestamp() {
        let t = Local.with_ymd_and_hms(2026, 3, 5, 9, 7, 1).unwrap();
        assert_eq!(export_file_name(t, ExportFormat::Csv), "box_price_20260305_090701.csv");
    }
}
