use chrono::NaiveDate;

use crate::domain::entities::fiscal::{calendar_month_name, FinancialYear, FISCAL_MONTHS};
use crate::domain::entities::handpump::HandpumpRecord;
use crate::domain::entities::selection::{FilterField, FilterSelection};
use crate::usecase::services::filter_service::{
    block_options, district_options, filter_records, financial_year_options,
    gram_panchayat_options, village_options,
};

/// Values `reset_filters` restores for the period fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDefaults {
    pub financial_year: String,
    pub month: String,
    pub first_financial_year: i32,
    pub today: NaiveDate,
}

impl FilterDefaults {
    pub fn for_date(today: NaiveDate, first_financial_year: i32) -> Self {
        Self {
            financial_year: FinancialYear::containing(today).to_string(),
            month: calendar_month_name(today).to_string(),
            first_financial_year,
            today,
        }
    }

    pub fn with_month(mut self, month: &str) -> Self {
        self.month = month.to_string();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub districts: Vec<String>,
    pub blocks: Vec<String>,
    pub gram_panchayats: Vec<String>,
    pub villages: Vec<String>,
    pub financial_years: Vec<String>,
    pub months: Vec<String>,
}

pub struct FilterState {
    selection: FilterSelection,
    defaults: FilterDefaults,
}

impl FilterState {
    pub fn new(defaults: FilterDefaults) -> Self {
        let selection = Self::initial_selection(&defaults);
        Self {
            selection,
            defaults,
        }
    }

    fn initial_selection(defaults: &FilterDefaults) -> FilterSelection {
        FilterSelection {
            financial_year: defaults.financial_year.clone(),
            month: defaults.month.clone(),
            ..FilterSelection::default()
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        self.selection = self.selection.with_field(field, value);
    }

    pub fn reset_filters(&mut self) {
        self.selection = Self::initial_selection(&self.defaults);
    }

    pub fn options(&self, all: &[HandpumpRecord]) -> FilterOptions {
        FilterOptions {
            districts: district_options(all),
            blocks: block_options(all, &self.selection),
            gram_panchayats: gram_panchayat_options(all, &self.selection),
            villages: village_options(all, &self.selection),
            financial_years: financial_year_options(
                self.defaults.first_financial_year,
                self.defaults.today,
            ),
            months: FISCAL_MONTHS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn filter_records(&self, all: &[HandpumpRecord]) -> Vec<HandpumpRecord> {
        filter_records(all, &self.selection)
    }
}
