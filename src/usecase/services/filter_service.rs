use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::entities::fiscal::{parse_record_date, FinancialYear};
use crate::domain::entities::handpump::HandpumpRecord;
use crate::domain::entities::requisition::RequisitionRecord;
use crate::domain::entities::selection::{FilterSelection, ALL_OPTION};

fn location_matches(wanted: &str, actual: &str) -> bool {
    wanted.is_empty() || wanted == actual
}

fn distinct_names<'a, I>(names: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    names
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn district_options(all: &[HandpumpRecord]) -> Vec<String> {
    let mut options = vec![ALL_OPTION.to_string()];
    options.extend(distinct_names(all.iter().map(|r| r.district.as_str())));
    options
}

pub fn block_options(all: &[HandpumpRecord], selection: &FilterSelection) -> Vec<String> {
    distinct_names(
        all.iter()
            .filter(|r| location_matches(&selection.district, &r.district))
            .map(|r| r.block.as_str()),
    )
}

pub fn gram_panchayat_options(all: &[HandpumpRecord], selection: &FilterSelection) -> Vec<String> {
    distinct_names(
        all.iter()
            .filter(|r| location_matches(&selection.district, &r.district))
            .filter(|r| location_matches(&selection.block, &r.block))
            .map(|r| r.gram_panchayat.as_str()),
    )
}

pub fn village_options(all: &[HandpumpRecord], selection: &FilterSelection) -> Vec<String> {
    distinct_names(
        all.iter()
            .filter(|r| location_matches(&selection.district, &r.district))
            .filter(|r| location_matches(&selection.block, &r.block))
            .filter(|r| location_matches(&selection.gram_panchayat, &r.gram_panchayat))
            .map(|r| r.village.as_str()),
    )
}

/// Every financial year from `first_start_year` up to the one containing
/// `today`, newest first.
pub fn financial_year_options(first_start_year: i32, today: NaiveDate) -> Vec<String> {
    let current = FinancialYear::containing(today).start_year();
    (first_start_year.min(current)..=current)
        .rev()
        .map(|year| FinancialYear::starting(year).to_string())
        .collect()
}

fn financial_year_matches(selected: &str, record: &HandpumpRecord) -> bool {
    if selected.is_empty() {
        return true;
    }
    let financial_year = match selected.parse::<FinancialYear>() {
        Ok(fy) => fy,
        Err(err) => {
            warn!(%err, "ignoring financial year filter");
            return true;
        }
    };
    match parse_record_date(&record.created_on) {
        Some(date) => financial_year.contains(date),
        None => {
            debug!(
                handpump_id = %record.id,
                created_on = %record.created_on,
                "unparseable creation date, keeping record"
            );
            true
        }
    }
}

pub fn matches(record: &HandpumpRecord, selection: &FilterSelection) -> bool {
    location_matches(&selection.district, &record.district)
        && location_matches(&selection.block, &record.block)
        && location_matches(&selection.gram_panchayat, &record.gram_panchayat)
        && location_matches(&selection.village, &record.village)
        && financial_year_matches(&selection.financial_year, record)
}

pub fn filter_records(all: &[HandpumpRecord], selection: &FilterSelection) -> Vec<HandpumpRecord> {
    all.iter()
        .filter(|record| matches(record, selection))
        .cloned()
        .collect()
}

/// Requisitions raised against any pump in `handpumps`.
pub fn requisitions_for(
    handpumps: &[HandpumpRecord],
    requisitions: &[RequisitionRecord],
) -> Vec<RequisitionRecord> {
    let ids: HashSet<_> = handpumps.iter().map(|r| r.id).collect();
    requisitions
        .iter()
        .filter(|req| ids.contains(&req.handpump_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::requisition::{RequisitionKind, RequisitionStatus};
    use crate::domain::entities::selection::FilterField;

    fn fixture() -> Vec<HandpumpRecord> {
        vec![
            HandpumpRecord::new(1, "Ranchi", "Kanke", "Pithoria", "Sikidiri"),
            HandpumpRecord::new(2, "Ranchi", "Kanke", "Chipra", "Chipra"),
            HandpumpRecord::new(3, "Ranchi", "Ratu", "Tigra", "Tigra"),
            HandpumpRecord::new(4, "Gumla", "Kanke", "Basia", "Basia"),
            HandpumpRecord::new(5, "", "", "", ""),
        ]
    }

    #[test]
    fn district_options_are_distinct_with_all_first() {
        assert_eq!(district_options(&fixture()), vec!["All", "Gumla", "Ranchi"]);
    }

    #[test]
    fn block_options_follow_selected_district() {
        let all = fixture();
        let selection = FilterSelection::default().with_field(FilterField::District, "Gumla");

        assert_eq!(block_options(&all, &selection), vec!["Kanke"]);
        assert_eq!(
            block_options(&all, &FilterSelection::default()),
            vec!["Kanke", "Ratu"]
        );
    }

    #[test]
    fn lower_options_respect_every_higher_constraint() {
        let all = fixture();
        let selection = FilterSelection::default()
            .with_field(FilterField::District, "Ranchi")
            .with_field(FilterField::Block, "Kanke");

        assert_eq!(
            gram_panchayat_options(&all, &selection),
            vec!["Chipra", "Pithoria"]
        );

        let selection = selection.with_field(FilterField::GramPanchayat, "Pithoria");
        assert_eq!(village_options(&all, &selection), vec!["Sikidiri"]);
    }

    #[test]
    fn location_filter_is_exact_match() {
        let all = fixture();
        let selection = FilterSelection::default().with_field(FilterField::Block, "Kanke");
        let ids: Vec<i64> = filter_records(&all, &selection)
            .iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn financial_year_uses_april_boundary() {
        let may = HandpumpRecord::new(1, "A", "B", "C", "D").with_created_on("15-05-2024");
        let feb = HandpumpRecord::new(2, "A", "B", "C", "D").with_created_on("15-02-2024");

        let fy_2024 = FilterSelection::default().with_field(FilterField::FinancialYear, "2024-25");
        let fy_2023 = FilterSelection::default().with_field(FilterField::FinancialYear, "2023-24");

        assert!(matches(&may, &fy_2024));
        assert!(!matches(&feb, &fy_2024));
        assert!(matches(&feb, &fy_2023));
        assert!(!matches(&may, &fy_2023));
    }

    #[test]
    fn unparseable_dates_are_kept() {
        let record = HandpumpRecord::new(1, "A", "B", "C", "D").with_created_on("not a date");
        let selection = FilterSelection::default().with_field(FilterField::FinancialYear, "2024-25");
        assert!(matches(&record, &selection));

        let blank = HandpumpRecord::new(2, "A", "B", "C", "D");
        assert!(matches(&blank, &selection));
    }

    #[test]
    fn malformed_financial_year_selection_is_ignored() {
        let record = HandpumpRecord::new(1, "A", "B", "C", "D").with_created_on("15-02-2020");
        let selection = FilterSelection::default().with_field(FilterField::FinancialYear, "FY24");
        assert!(matches(&record, &selection));
    }

    #[test]
    fn filter_records_is_idempotent() {
        let mut all = fixture();
        all.push(HandpumpRecord::new(6, "Ranchi", "Kanke", "Pithoria", "Sikidiri").with_created_on("01-01-2019"));
        let selection = FilterSelection::default()
            .with_field(FilterField::District, "Ranchi")
            .with_field(FilterField::FinancialYear, "2024-25");

        let once = filter_records(&all, &selection);
        let twice = filter_records(&once, &selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn financial_year_options_run_newest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date");
        assert_eq!(
            financial_year_options(2023, today),
            vec!["2025-26", "2024-25", "2023-24"]
        );
    }

    #[test]
    fn requisitions_follow_filtered_pumps() {
        let pumps = vec![HandpumpRecord::new(1, "A", "B", "C", "D")];
        let reqs = vec![
            RequisitionRecord::new(10, 1, RequisitionKind::Repair, RequisitionStatus::Pending),
            RequisitionRecord::new(11, 2, RequisitionKind::Rebore, RequisitionStatus::Approved),
        ];
        let kept = requisitions_for(&pumps, &reqs);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.0, 10);
    }
}
