use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::domain::entities::handpump::{
    parse_flag, HandpumpId, HandpumpRecord, PumpStatus, WaterQuality,
};
use crate::domain::entities::requisition::{
    RequisitionId, RequisitionKind, RequisitionRecord, RequisitionStatus,
};
use crate::infra::import::csv::read_csv_table;
use crate::infra::import::xlsx::read_xlsx_table;
use crate::usecase::ports::spreadsheet::TabularData;

pub fn load_table(path: &Path) -> Result<TabularData> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => read_csv_table(path),
        "xlsx" | "xls" | "xlsm" | "ods" => read_xlsx_table(path),
        other => anyhow::bail!("unsupported file type {other:?}: {}", path.display()),
    }
}

pub fn load_handpumps(path: &Path) -> Result<Vec<HandpumpRecord>> {
    let table = load_table(path)?;
    handpumps_from_table(&table)
        .with_context(|| format!("failed to load handpumps from {}", path.display()))
}

pub fn load_requisitions(path: &Path) -> Result<Vec<RequisitionRecord>> {
    let table = load_table(path)?;
    requisitions_from_table(&table)
        .with_context(|| format!("failed to load requisitions from {}", path.display()))
}

struct Columns<'a> {
    table: &'a TabularData,
}

impl<'a> Columns<'a> {
    fn required(&self, name: &str) -> Result<usize> {
        self.table
            .column_index(name)
            .ok_or_else(|| anyhow!("missing required column: {name}"))
    }

    fn optional(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.table.column_index(name))
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|value| value.trim()).unwrap_or("")
}

fn optional_cell(row: &[String], idx: Option<usize>) -> Option<String> {
    idx.map(|idx| cell(row, idx))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn flag(row: &[String], idx: Option<usize>) -> bool {
    idx.is_some_and(|idx| parse_flag(cell(row, idx)))
}

fn parse_id(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(id);
    }
    // spreadsheet tools sometimes hand ids back as `12.0`
    match trimmed.parse::<f64>() {
        Ok(id) if id.fract() == 0.0 && id.is_finite() => Ok(id as i64),
        _ => Err(anyhow!("invalid id: {value:?}")),
    }
}

pub fn handpumps_from_table(table: &TabularData) -> Result<Vec<HandpumpRecord>> {
    let columns = Columns { table };
    let id = columns.required("id")?;
    let district = columns.required("district")?;
    let block = columns.required("block")?;
    let gram_panchayat = columns.required("gram_panchayat")?;
    let village = columns.required("village")?;
    let status = columns.required("status")?;
    let water_quality = columns.optional(&["water_quality"]);
    let soak_pit = columns.optional(&["soak_pit"]);
    let drainage = columns.optional(&["drainage"]);
    let platform = columns.optional(&["platform"]);
    let created_on = columns.optional(&["created_on", "created_at", "created_date"]);
    let contact_person = columns.optional(&["contact_person", "person_name"]);
    let mobile = columns.optional(&["mobile", "contact_number"]);

    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| -> Result<HandpumpRecord> {
            let record_id = parse_id(cell(row, id))
                .with_context(|| format!("row {}: bad handpump id", row_idx + 1))?;
            Ok(HandpumpRecord {
                id: HandpumpId(record_id),
                district: cell(row, district).to_string(),
                block: cell(row, block).to_string(),
                gram_panchayat: cell(row, gram_panchayat).to_string(),
                village: cell(row, village).to_string(),
                status: PumpStatus::parse(cell(row, status)),
                water_quality: water_quality.and_then(|idx| WaterQuality::parse(cell(row, idx))),
                soak_pit: flag(row, soak_pit),
                drainage: flag(row, drainage),
                platform: flag(row, platform),
                created_on: optional_cell(row, created_on).unwrap_or_default(),
                contact_person: optional_cell(row, contact_person),
                mobile: optional_cell(row, mobile),
            })
        })
        .collect()
}

pub fn requisitions_from_table(table: &TabularData) -> Result<Vec<RequisitionRecord>> {
    let columns = Columns { table };
    let id = columns.required("id")?;
    let handpump_id = columns.required("handpump_id")?;
    let kind = columns.required("type")?;
    let status = columns.required("status")?;
    let sanction_amount = columns.optional(&["sanction_amount"]);
    let completion_date = columns.optional(&["completion_date"]);

    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| -> Result<RequisitionRecord> {
            let line = row_idx + 1;
            Ok(RequisitionRecord {
                id: RequisitionId(
                    parse_id(cell(row, id))
                        .with_context(|| format!("row {line}: bad requisition id"))?,
                ),
                handpump_id: HandpumpId(
                    parse_id(cell(row, handpump_id))
                        .with_context(|| format!("row {line}: bad handpump id"))?,
                ),
                kind: RequisitionKind::parse(cell(row, kind))
                    .with_context(|| format!("row {line}: bad requisition type"))?,
                status: RequisitionStatus::parse(cell(row, status))
                    .with_context(|| format!("row {line}: bad requisition status"))?,
                sanction_amount: optional_cell(row, sanction_amount),
                completion_date: optional_cell(row, completion_date),
            })
        })
        .collect()
}
