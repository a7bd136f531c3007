use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::domain::entities::fiscal::parse_record_date;
use crate::domain::entities::handpump::HandpumpRecord;
use crate::domain::entities::region::{RegionLevel, RegionPerformance};
use crate::domain::entities::requisition::RequisitionRecord;
use crate::usecase::ports::notifier::Notifier;
use crate::usecase::ports::spreadsheet::{SpreadsheetWriter, TabularData};
use crate::usecase::services::aggregate_service::try_parse_amount;

const NOT_AVAILABLE: &str = "N/A";
const NO_VALUE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Handpumps,
    Requisitions,
    DistrictReport,
    BlockReport,
    GramPanchayatReport,
}

impl ExportKind {
    pub const ALL: [ExportKind; 5] = [
        ExportKind::Handpumps,
        ExportKind::Requisitions,
        ExportKind::DistrictReport,
        ExportKind::BlockReport,
        ExportKind::GramPanchayatReport,
    ];

    pub fn file_prefix(self) -> &'static str {
        match self {
            ExportKind::Handpumps => "handpumps",
            ExportKind::Requisitions => "requisitions",
            ExportKind::DistrictReport => "district_report",
            ExportKind::BlockReport => "block_report",
            ExportKind::GramPanchayatReport => "gram_panchayat_report",
        }
    }

    pub fn sheet_name(self) -> &'static str {
        match self {
            ExportKind::Handpumps => "Handpumps",
            ExportKind::Requisitions => "Requisitions",
            ExportKind::DistrictReport => "District Report",
            ExportKind::BlockReport => "Block Report",
            ExportKind::GramPanchayatReport => "Gram Panchayat Report",
        }
    }

    pub fn for_level(level: RegionLevel) -> Self {
        match level {
            RegionLevel::District => ExportKind::DistrictReport,
            RegionLevel::Block => ExportKind::BlockReport,
            RegionLevel::GramPanchayat => ExportKind::GramPanchayatReport,
        }
    }
}

/// One spreadsheet row as ordered `label -> display text` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRow {
    pub cells: Vec<(&'static str, String)>,
}

impl ExportRow {
    fn push(&mut self, label: &'static str, value: impl Into<String>) {
        self.cells.push((label, value.into()));
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    Empty,
    Failed(String),
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// `DD-MM-YYYY` becomes `DD/MM/YYYY`; text that is not a date is passed through.
pub fn display_date(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    match parse_record_date(trimmed) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => trimmed.to_string(),
    }
}

pub fn format_number_with_commas(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && text.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn handpump_row(record: &HandpumpRecord) -> ExportRow {
    let mut row = ExportRow::default();
    row.push("Handpump ID", record.id.to_string());
    row.push("District", text_or(Some(record.district.as_str()), NOT_AVAILABLE));
    row.push("Block", text_or(Some(record.block.as_str()), NOT_AVAILABLE));
    row.push("Gram Panchayat", text_or(Some(record.gram_panchayat.as_str()), NOT_AVAILABLE));
    row.push("Village", text_or(Some(record.village.as_str()), NOT_AVAILABLE));
    row.push("Status", text_or(Some(record.status.label()), NOT_AVAILABLE));
    row.push(
        "Water Quality",
        record.water_quality.map_or(NOT_AVAILABLE, |q| q.label()),
    );
    row.push("Soak Pit", yes_no(record.soak_pit));
    row.push("Drainage", yes_no(record.drainage));
    row.push("Platform", yes_no(record.platform));
    row.push(
        "Contact Person",
        text_or(record.contact_person.as_deref(), NOT_AVAILABLE),
    );
    row.push("Mobile", text_or(record.mobile.as_deref(), NOT_AVAILABLE));
    row.push("Created On", display_date(&record.created_on, NOT_AVAILABLE));
    row
}

pub fn requisition_row(record: &RequisitionRecord) -> ExportRow {
    let amount = record
        .sanction_amount
        .as_deref()
        .and_then(try_parse_amount)
        .map_or_else(|| NO_VALUE.to_string(), |amount| format_number_with_commas(amount, 2));

    let mut row = ExportRow::default();
    row.push("Requisition ID", record.id.0.to_string());
    row.push("Handpump ID", record.handpump_id.to_string());
    row.push("Type", record.kind.label());
    row.push("Status", record.status.label());
    row.push("Sanction Amount", amount);
    row.push(
        "Completion Date",
        display_date(record.completion_date.as_deref().unwrap_or(""), NO_VALUE),
    );
    row
}

pub fn region_row(level: RegionLevel, region: &RegionPerformance) -> ExportRow {
    let mut row = ExportRow::default();
    row.push(level.label(), region.name.clone());
    if let Some(parent_label) = level.parent_label() {
        row.push(parent_label, text_or(region.parent.as_deref(), NOT_AVAILABLE));
    }
    row.push("Total Handpumps", region.total.to_string());
    row.push("Active", region.active.to_string());
    row.push("Inactive", region.inactive.to_string());
    row.push("Performance (%)", region.performance.to_string());
    row
}

/// Labels of the first row become the header; every row shares that layout.
pub fn rows_to_table(rows: &[ExportRow]) -> TabularData {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.cells.iter().map(|(label, _)| label.to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(|(_, value)| value.clone()).collect())
        .collect();
    TabularData { columns, rows }
}

pub fn export_file_stem(kind: ExportKind, today: NaiveDate) -> String {
    format!("{}_{}", kind.file_prefix(), today.format("%Y-%m-%d"))
}

pub struct ExportService {
    writer: Arc<dyn SpreadsheetWriter>,
    notifier: Arc<dyn Notifier>,
}

impl ExportService {
    pub fn new(writer: Arc<dyn SpreadsheetWriter>, notifier: Arc<dyn Notifier>) -> Self {
        Self { writer, notifier }
    }

    pub(crate) fn export(
        &self,
        kind: ExportKind,
        rows: &[ExportRow],
        today: NaiveDate,
    ) -> ExportOutcome {
        if rows.is_empty() {
            warn!(kind = kind.file_prefix(), "nothing to export");
            self.notifier.warn("Export", "No data available to export.");
            return ExportOutcome::Empty;
        }

        let file_stem = export_file_stem(kind, today);
        let table = rows_to_table(rows);
        match self.writer.write(&table, kind.sheet_name(), &file_stem) {
            Ok(path) => {
                info!(path = %path.display(), rows = rows.len(), "export written");
                ExportOutcome::Written(path)
            }
            Err(err) => {
                let message = format!("Failed to export data: {err:#}");
                error!(kind = kind.file_prefix(), "{message}");
                self.notifier.error("Export failed", &message);
                ExportOutcome::Failed(message)
            }
        }
    }

    pub fn export_handpumps(&self, records: &[HandpumpRecord], today: NaiveDate) -> ExportOutcome {
        let rows: Vec<ExportRow> = records.iter().map(handpump_row).collect();
        self.export(ExportKind::Handpumps, &rows, today)
    }

    pub fn export_requisitions(
        &self,
        records: &[RequisitionRecord],
        today: NaiveDate,
    ) -> ExportOutcome {
        let rows: Vec<ExportRow> = records.iter().map(requisition_row).collect();
        self.export(ExportKind::Requisitions, &rows, today)
    }

    pub fn export_region_report(
        &self,
        level: RegionLevel,
        regions: &[RegionPerformance],
        today: NaiveDate,
    ) -> ExportOutcome {
        let rows: Vec<ExportRow> = regions.iter().map(|r| region_row(level, r)).collect();
        self.export(ExportKind::for_level(level), &rows, today)
    }
}
