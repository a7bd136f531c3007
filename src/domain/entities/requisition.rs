use std::fmt;

use crate::domain::entities::handpump::HandpumpId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequisitionId(pub i64);

impl From<i64> for RequisitionId {
    fn from(value: i64) -> Self {
        RequisitionId(value)
    }
}

impl From<RequisitionId> for i64 {
    fn from(value: RequisitionId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequisitionError {
    UnknownKind(String),
    UnknownStatus(String),
}

impl fmt::Display for RequisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequisitionError::UnknownKind(value) => {
                write!(f, "unknown requisition type: {value:?}")
            }
            RequisitionError::UnknownStatus(value) => {
                write!(f, "unknown requisition status: {value:?}")
            }
        }
    }
}

impl std::error::Error for RequisitionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequisitionKind {
    Repair,
    Rebore,
}

impl RequisitionKind {
    pub fn parse(value: &str) -> Result<Self, RequisitionError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "repair" => Ok(RequisitionKind::Repair),
            "rebore" => Ok(RequisitionKind::Rebore),
            _ => Err(RequisitionError::UnknownKind(value.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequisitionKind::Repair => "Repair",
            RequisitionKind::Rebore => "Rebore",
        }
    }
}

/// Workflow stage, stored upstream as an ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequisitionStatus {
    Pending = 1,
    Approved = 2,
    Completed = 3,
}

impl RequisitionStatus {
    pub fn parse(value: &str) -> Result<Self, RequisitionError> {
        let ordinal = value
            .trim()
            .parse::<i64>()
            .map_err(|_| RequisitionError::UnknownStatus(value.to_string()))?;
        Self::try_from(ordinal)
    }

    pub fn label(self) -> &'static str {
        match self {
            RequisitionStatus::Pending => "Pending",
            RequisitionStatus::Approved => "Approved",
            RequisitionStatus::Completed => "Completed",
        }
    }
}

impl TryFrom<i64> for RequisitionStatus {
    type Error = RequisitionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RequisitionStatus::Pending),
            2 => Ok(RequisitionStatus::Approved),
            3 => Ok(RequisitionStatus::Completed),
            other => Err(RequisitionError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisitionRecord {
    pub id: RequisitionId,
    pub handpump_id: HandpumpId,
    pub kind: RequisitionKind,
    pub status: RequisitionStatus,
    /// Decimal text as entered; may carry thousands separators or be garbage.
    pub sanction_amount: Option<String>,
    pub completion_date: Option<String>,
}

impl RequisitionRecord {
    pub fn new(
        id: i64,
        handpump_id: i64,
        kind: RequisitionKind,
        status: RequisitionStatus,
    ) -> Self {
        Self {
            id: RequisitionId(id),
            handpump_id: HandpumpId(handpump_id),
            kind,
            status,
            sanction_amount: None,
            completion_date: None,
        }
    }

    pub fn with_sanction_amount(mut self, amount: &str) -> Self {
        self.sanction_amount = Some(amount.to_string());
        self
    }

    pub fn with_completion_date(mut self, date: &str) -> Self {
        self.completion_date = Some(date.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_ordinals() {
        assert_eq!(RequisitionStatus::parse("1"), Ok(RequisitionStatus::Pending));
        assert_eq!(RequisitionStatus::parse(" 3 "), Ok(RequisitionStatus::Completed));
        assert_eq!(
            RequisitionStatus::parse("4"),
            Err(RequisitionError::UnknownStatus("4".to_string()))
        );
        assert!(RequisitionStatus::parse("approved").is_err());
    }

    #[test]
    fn kind_parse_rejects_unknown_values() {
        assert_eq!(RequisitionKind::parse("Rebore"), Ok(RequisitionKind::Rebore));
        let err = RequisitionKind::parse("replace").expect_err("unknown kind should fail");
        assert!(err.to_string().contains("replace"), "unexpected error: {err}");
    }
}
