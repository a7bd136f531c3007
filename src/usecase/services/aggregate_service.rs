use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::handpump::HandpumpRecord;
use crate::domain::entities::region::{performance_percent, RegionLevel, RegionPerformance};
use crate::domain::entities::requisition::{
    RequisitionKind, RequisitionRecord, RequisitionStatus,
};

pub const REGIONAL_PERFORMANCE_LIMIT: usize = 8;
pub const RANKING_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_handpumps: usize,
    pub active_handpumps: usize,
    pub inactive_handpumps: usize,
    pub total_requisitions: usize,
    pub repair_requisitions: usize,
    pub rebore_requisitions: usize,
    pub pending_requisitions: usize,
    pub approved_requisitions: usize,
    pub completed_requisitions: usize,
    pub total_sanction_amount: f64,
    pub districts: usize,
    pub blocks: usize,
    pub gram_panchayats: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedRegions {
    pub top: Vec<RegionPerformance>,
    pub bottom: Vec<RegionPerformance>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rankings {
    pub districts: RankedRegions,
    pub blocks: RankedRegions,
    pub gram_panchayats: RankedRegions,
}

impl Rankings {
    pub fn for_level(&self, level: RegionLevel) -> &RankedRegions {
        match level {
            RegionLevel::District => &self.districts,
            RegionLevel::Block => &self.blocks,
            RegionLevel::GramPanchayat => &self.gram_panchayats,
        }
    }
}

/// Sanction amounts are free text with optional thousands separators.
pub fn try_parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Totals count amounts that fail to parse as zero.
pub fn parse_amount(value: &str) -> f64 {
    try_parse_amount(value).unwrap_or(0.0)
}

fn distinct_count<'a, I>(names: I) -> usize
where
    I: Iterator<Item = &'a str>,
{
    names
        .filter(|name| !name.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn compute_summary(
    handpumps: &[HandpumpRecord],
    requisitions: &[RequisitionRecord],
) -> DashboardSummary {
    let count_kind = |kind: RequisitionKind| requisitions.iter().filter(|r| r.kind == kind).count();
    let count_status =
        |status: RequisitionStatus| requisitions.iter().filter(|r| r.status == status).count();

    DashboardSummary {
        total_handpumps: handpumps.len(),
        active_handpumps: handpumps.iter().filter(|r| r.status.is_active()).count(),
        inactive_handpumps: handpumps.iter().filter(|r| r.status.is_inactive()).count(),
        total_requisitions: requisitions.len(),
        repair_requisitions: count_kind(RequisitionKind::Repair),
        rebore_requisitions: count_kind(RequisitionKind::Rebore),
        pending_requisitions: count_status(RequisitionStatus::Pending),
        approved_requisitions: count_status(RequisitionStatus::Approved),
        completed_requisitions: count_status(RequisitionStatus::Completed),
        total_sanction_amount: requisitions
            .iter()
            .filter_map(|r| r.sanction_amount.as_deref())
            .map(parse_amount)
            .sum(),
        districts: distinct_count(handpumps.iter().map(|r| r.district.as_str())),
        blocks: distinct_count(handpumps.iter().map(|r| r.block.as_str())),
        gram_panchayats: distinct_count(handpumps.iter().map(|r| r.gram_panchayat.as_str())),
    }
}

/// Groups pumps per region and computes the active share. `qualified` keys
/// blocks and GPs by their parent as well as their own name.
fn group_regions(
    handpumps: &[HandpumpRecord],
    level: RegionLevel,
    qualified: bool,
) -> Vec<RegionPerformance> {
    let mut order: Vec<(String, Option<String>)> = Vec::new();
    let mut counts: HashMap<(String, Option<String>), (usize, usize, usize)> = HashMap::new();

    for record in handpumps {
        let name = level.name_of(record);
        if name.trim().is_empty() {
            continue;
        }
        let parent = if qualified {
            level.parent_of(record).map(str::to_string)
        } else {
            None
        };
        let key = (name.to_string(), parent);
        let entry = counts.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0, 0, 0)
        });
        entry.0 += 1;
        if record.status.is_active() {
            entry.1 += 1;
        }
        if record.status.is_inactive() {
            entry.2 += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let (total, active, inactive) = counts.get(&key).copied()?;
            let (name, parent) = key;
            Some(RegionPerformance {
                name,
                parent,
                total,
                active,
                inactive,
                performance: performance_percent(active, total),
            })
        })
        .collect()
}

fn by_name(a: &RegionPerformance, b: &RegionPerformance) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.parent.cmp(&b.parent))
}

fn best_first(a: &RegionPerformance, b: &RegionPerformance) -> Ordering {
    b.performance.cmp(&a.performance).then_with(|| by_name(a, b))
}

fn worst_first(a: &RegionPerformance, b: &RegionPerformance) -> Ordering {
    a.performance.cmp(&b.performance).then_with(|| by_name(a, b))
}

/// Every region at `level`, best performing first.
pub fn region_report(handpumps: &[HandpumpRecord], level: RegionLevel) -> Vec<RegionPerformance> {
    let mut regions = group_regions(handpumps, level, false);
    regions.sort_by(best_first);
    regions
}

pub fn compute_regional_performance(
    handpumps: &[HandpumpRecord],
    level: RegionLevel,
) -> Vec<RegionPerformance> {
    let mut regions = region_report(handpumps, level);
    regions.truncate(REGIONAL_PERFORMANCE_LIMIT);
    regions
}

fn rank(all: &[HandpumpRecord], level: RegionLevel) -> RankedRegions {
    let mut top = group_regions(all, level, true);
    let mut bottom = top.clone();

    top.sort_by(best_first);
    top.truncate(RANKING_LIMIT);
    bottom.sort_by(worst_first);
    bottom.truncate(RANKING_LIMIT);

    RankedRegions { top, bottom }
}

/// Rankings always cover the whole collection; callers pass the unfiltered
/// records so narrowing the dashboard selection never changes them.
pub fn compute_rankings(all_handpumps: &[HandpumpRecord]) -> Rankings {
    Rankings {
        districts: rank(all_handpumps, RegionLevel::District),
        blocks: rank(all_handpumps, RegionLevel::Block),
        gram_panchayats: rank(all_handpumps, RegionLevel::GramPanchayat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::handpump::PumpStatus;

    fn pump(id: i64, district: &str, block: &str, gp: &str, status: PumpStatus) -> HandpumpRecord {
        HandpumpRecord::new(id, district, block, gp, "V").with_status(status)
    }

    #[test]
    fn district_performance_example() {
        let pumps = vec![
            pump(1, "A", "X", "P", PumpStatus::Active),
            pump(2, "A", "X", "P", PumpStatus::Inactive),
            pump(3, "B", "Y", "Q", PumpStatus::Active),
        ];

        let performance = compute_regional_performance(&pumps, RegionLevel::District);
        let pairs: Vec<(&str, u8)> = performance
            .iter()
            .map(|r| (r.name.as_str(), r.performance))
            .collect();
        assert_eq!(pairs, vec![("B", 100), ("A", 50)]);

        let rankings = compute_rankings(&pumps);
        assert_eq!(rankings.districts.top[0].name, "B");
        assert_eq!(rankings.districts.bottom[0].name, "A");
    }

    #[test]
    fn regional_performance_is_capped_and_sorted() {
        let mut pumps = Vec::new();
        for district in 0..12_i64 {
            for idx in 0..4_i64 {
                let status = if idx < district % 5 {
                    PumpStatus::Active
                } else {
                    PumpStatus::Inactive
                };
                pumps.push(pump(district * 10 + idx, &format!("D{district:02}"), "B", "G", status));
            }
        }

        let performance = compute_regional_performance(&pumps, RegionLevel::District);

        assert_eq!(performance.len(), REGIONAL_PERFORMANCE_LIMIT);
        assert!(performance.iter().all(|r| r.performance <= 100));
        assert!(performance
            .windows(2)
            .all(|pair| pair[0].performance >= pair[1].performance));
    }

    #[test]
    fn ties_are_broken_by_name() {
        let pumps = vec![
            pump(1, "Zeta", "X", "P", PumpStatus::Active),
            pump(2, "Alpha", "X", "P", PumpStatus::Active),
            pump(3, "Mid", "X", "P", PumpStatus::Inactive),
        ];

        let rankings = compute_rankings(&pumps);
        let top: Vec<&str> = rankings.districts.top.iter().map(|r| r.name.as_str()).collect();
        let bottom: Vec<&str> = rankings
            .districts
            .bottom
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(top, vec!["Alpha", "Zeta", "Mid"]);
        assert_eq!(bottom, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn block_rankings_keep_same_named_blocks_apart() {
        let pumps = vec![
            pump(1, "North", "Central", "P", PumpStatus::Active),
            pump(2, "South", "Central", "Q", PumpStatus::Inactive),
        ];

        let rankings = compute_rankings(&pumps);
        assert_eq!(rankings.blocks.top.len(), 2);
        assert_eq!(rankings.blocks.top[0].parent.as_deref(), Some("North"));
        assert_eq!(rankings.blocks.top[0].performance, 100);
        assert_eq!(rankings.blocks.bottom[0].parent.as_deref(), Some("South"));

        let merged = compute_regional_performance(&pumps, RegionLevel::Block);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].performance, 50);
    }

    #[test]
    fn gram_panchayat_rankings_are_keyed_by_block() {
        let pumps = vec![
            pump(1, "North", "Kanke", "Pithoria", PumpStatus::Active),
            pump(2, "North", "Kanke", "Pithoria", PumpStatus::Active),
            pump(3, "North", "Ratu", "Pithoria", PumpStatus::Active),
            pump(4, "North", "Ratu", "Pithoria", PumpStatus::Inactive),
            pump(5, "South", "Ratu", "Pithoria", PumpStatus::Inactive),
        ];

        let rankings = compute_rankings(&pumps);
        let top: Vec<(Option<&str>, usize, u8)> = rankings
            .gram_panchayats
            .top
            .iter()
            .map(|r| (r.parent.as_deref(), r.total, r.performance))
            .collect();
        // same GP and block in two districts still shares one ranking entry
        assert_eq!(top, vec![(Some("Kanke"), 2, 100), (Some("Ratu"), 3, 33)]);
        assert!(rankings
            .gram_panchayats
            .top
            .iter()
            .all(|r| r.name == "Pithoria"));
        assert_eq!(rankings.gram_panchayats.bottom[0].parent.as_deref(), Some("Ratu"));

        let merged = compute_regional_performance(&pumps, RegionLevel::GramPanchayat);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Pithoria");
        assert_eq!(merged[0].parent, None);
        assert_eq!(merged[0].total, 5);
        assert_eq!(merged[0].performance, 60);
    }

    #[test]
    fn summary_counts_and_sums_amounts() {
        let pumps = vec![
            pump(1, "A", "X", "P", PumpStatus::Active),
            pump(2, "A", "Y", "Q", PumpStatus::Inactive),
            pump(3, "B", "Y", "R", PumpStatus::Other("Under Repair".to_string())),
        ];
        let reqs = vec![
            RequisitionRecord::new(1, 1, RequisitionKind::Repair, RequisitionStatus::Pending)
                .with_sanction_amount("1,500.50"),
            RequisitionRecord::new(2, 2, RequisitionKind::Rebore, RequisitionStatus::Completed)
                .with_sanction_amount("abc"),
            RequisitionRecord::new(3, 3, RequisitionKind::Repair, RequisitionStatus::Approved)
                .with_sanction_amount("2000"),
            RequisitionRecord::new(4, 3, RequisitionKind::Repair, RequisitionStatus::Approved),
        ];

        let summary = compute_summary(&pumps, &reqs);

        assert_eq!(summary.total_handpumps, 3);
        assert_eq!(summary.active_handpumps, 1);
        assert_eq!(summary.inactive_handpumps, 1);
        assert_eq!(summary.total_requisitions, 4);
        assert_eq!(summary.repair_requisitions, 3);
        assert_eq!(summary.rebore_requisitions, 1);
        assert_eq!(summary.pending_requisitions, 1);
        assert_eq!(summary.approved_requisitions, 2);
        assert_eq!(summary.completed_requisitions, 1);
        assert!((summary.total_sanction_amount - 3500.5).abs() < 1e-9);
        assert_eq!(summary.districts, 2);
        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.gram_panchayats, 3);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(compute_summary(&[], &[]), DashboardSummary::default());
    }

    #[test]
    fn parse_amount_treats_garbage_as_zero() {
        assert_eq!(parse_amount(" 12,345.5 "), 12345.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("Rs. 100"), 0.0);
    }
}
