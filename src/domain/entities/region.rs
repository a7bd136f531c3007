use crate::domain::entities::handpump::HandpumpRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionLevel {
    District,
    Block,
    GramPanchayat,
}

impl RegionLevel {
    pub const ALL: [RegionLevel; 3] = [
        RegionLevel::District,
        RegionLevel::Block,
        RegionLevel::GramPanchayat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RegionLevel::District => "District",
            RegionLevel::Block => "Block",
            RegionLevel::GramPanchayat => "Gram Panchayat",
        }
    }

    pub fn parent_label(self) -> Option<&'static str> {
        match self {
            RegionLevel::District => None,
            RegionLevel::Block => Some("District"),
            RegionLevel::GramPanchayat => Some("Block"),
        }
    }

    pub fn name_of(self, record: &HandpumpRecord) -> &str {
        match self {
            RegionLevel::District => &record.district,
            RegionLevel::Block => &record.block,
            RegionLevel::GramPanchayat => &record.gram_panchayat,
        }
    }

    /// Same-named blocks exist in different districts, and same-named GPs in
    /// different blocks, so those levels are qualified by their parent.
    pub fn parent_of(self, record: &HandpumpRecord) -> Option<&str> {
        match self {
            RegionLevel::District => None,
            RegionLevel::Block => Some(&record.district),
            RegionLevel::GramPanchayat => Some(&record.block),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPerformance {
    pub name: String,
    pub parent: Option<String>,
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Rounded percentage of active pumps, 0..=100.
    pub performance: u8,
}

pub fn performance_percent(active: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = active.min(total) as f64 / total as f64 * 100.0;
    ratio.round() as u8
}
