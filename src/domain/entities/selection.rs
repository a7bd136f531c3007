/// Dropdown sentinel meaning "no constraint".
pub const ALL_OPTION: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    District,
    Block,
    GramPanchayat,
    Village,
    FinancialYear,
    Month,
}

impl FilterField {
    /// Location fields below this one, in hierarchy order.
    pub fn dependents(self) -> &'static [FilterField] {
        match self {
            FilterField::District => &[
                FilterField::Block,
                FilterField::GramPanchayat,
                FilterField::Village,
            ],
            FilterField::Block => &[FilterField::GramPanchayat, FilterField::Village],
            FilterField::GramPanchayat => &[FilterField::Village],
            FilterField::Village | FilterField::FinancialYear | FilterField::Month => &[],
        }
    }
}

/// Current dashboard selection. Empty strings are unconstrained.
///
/// The value is never edited in place: every change goes through
/// [`FilterSelection::with_field`], which applies the location cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub district: String,
    pub block: String,
    pub gram_panchayat: String,
    pub village: String,
    pub financial_year: String,
    pub month: String,
}

impl FilterSelection {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::District => &self.district,
            FilterField::Block => &self.block,
            FilterField::GramPanchayat => &self.gram_panchayat,
            FilterField::Village => &self.village,
            FilterField::FinancialYear => &self.financial_year,
            FilterField::Month => &self.month,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::District => &mut self.district,
            FilterField::Block => &mut self.block,
            FilterField::GramPanchayat => &mut self.gram_panchayat,
            FilterField::Village => &mut self.village,
            FilterField::FinancialYear => &mut self.financial_year,
            FilterField::Month => &mut self.month,
        }
    }

    pub fn with_field(&self, field: FilterField, value: &str) -> Self {
        let value = value.trim();
        let value = if value == ALL_OPTION { "" } else { value };

        let mut next = self.clone();
        *next.slot(field) = value.to_string();
        for dependent in field.dependents() {
            next.slot(*dependent).clear();
        }
        next
    }

    pub fn is_unconstrained(&self, field: FilterField) -> bool {
        self.get(field).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_selection() -> FilterSelection {
        FilterSelection {
            district: "Ranchi".to_string(),
            block: "Kanke".to_string(),
            gram_panchayat: "Pithoria".to_string(),
            village: "Sikidiri".to_string(),
            financial_year: "2024-25".to_string(),
            month: "May".to_string(),
        }
    }

    #[test]
    fn district_change_clears_every_location_below() {
        let next = full_selection().with_field(FilterField::District, "Gumla");

        assert_eq!(next.district, "Gumla");
        assert_eq!(next.block, "");
        assert_eq!(next.gram_panchayat, "");
        assert_eq!(next.village, "");
        assert_eq!(next.financial_year, "2024-25", "period should be kept");
        assert_eq!(next.month, "May");
    }

    #[test]
    fn block_change_keeps_district() {
        let next = full_selection().with_field(FilterField::Block, "Ratu");

        assert_eq!(next.district, "Ranchi");
        assert_eq!(next.block, "Ratu");
        assert_eq!(next.gram_panchayat, "");
        assert_eq!(next.village, "");
    }

    #[test]
    fn village_and_period_changes_do_not_cascade() {
        let selection = full_selection();
        let next = selection.with_field(FilterField::Village, "Other");
        assert_eq!(next.gram_panchayat, "Pithoria");

        let next = selection.with_field(FilterField::FinancialYear, "2023-24");
        assert_eq!(next.village, "Sikidiri");
    }

    #[test]
    fn all_sentinel_is_stored_as_unconstrained() {
        let next = full_selection().with_field(FilterField::District, ALL_OPTION);
        assert!(next.is_unconstrained(FilterField::District));
        assert!(next.is_unconstrained(FilterField::Block));
    }

    #[test]
    fn with_field_leaves_original_untouched() {
        let selection = full_selection();
        let _ = selection.with_field(FilterField::District, "Gumla");
        assert_eq!(selection, full_selection());
    }
}
