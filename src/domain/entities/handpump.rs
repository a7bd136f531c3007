use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandpumpId(pub i64);

impl From<i64> for HandpumpId {
    fn from(value: i64) -> Self {
        HandpumpId(value)
    }
}

impl From<HandpumpId> for i64 {
    fn from(value: HandpumpId) -> Self {
        value.0
    }
}

impl fmt::Display for HandpumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational status as reported by the field survey. Anything other than
/// the two canonical values is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpStatus {
    Active,
    Inactive,
    Other(String),
}

impl PumpStatus {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("active") {
            PumpStatus::Active
        } else if trimmed.eq_ignore_ascii_case("inactive") {
            PumpStatus::Inactive
        } else {
            PumpStatus::Other(trimmed.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PumpStatus::Active)
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self, PumpStatus::Inactive)
    }

    pub fn label(&self) -> &str {
        match self {
            PumpStatus::Active => "Active",
            PumpStatus::Inactive => "Inactive",
            PumpStatus::Other(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterQuality {
    Good,
    Fair,
    Poor,
    Contaminated,
}

impl WaterQuality {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => Some(WaterQuality::Good),
            "fair" => Some(WaterQuality::Fair),
            "poor" => Some(WaterQuality::Poor),
            "contaminated" => Some(WaterQuality::Contaminated),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WaterQuality::Good => "Good",
            WaterQuality::Fair => "Fair",
            WaterQuality::Poor => "Poor",
            WaterQuality::Contaminated => "Contaminated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandpumpRecord {
    pub id: HandpumpId,
    pub district: String,
    pub block: String,
    pub gram_panchayat: String,
    pub village: String,
    pub status: PumpStatus,
    pub water_quality: Option<WaterQuality>,
    pub soak_pit: bool,
    pub drainage: bool,
    pub platform: bool,
    /// `DD-MM-YYYY`, kept as text so unparseable values survive loading.
    pub created_on: String,
    pub contact_person: Option<String>,
    pub mobile: Option<String>,
}

impl HandpumpRecord {
    pub fn new(id: i64, district: &str, block: &str, gram_panchayat: &str, village: &str) -> Self {
        Self {
            id: HandpumpId(id),
            district: district.to_string(),
            block: block.to_string(),
            gram_panchayat: gram_panchayat.to_string(),
            village: village.to_string(),
            status: PumpStatus::Active,
            water_quality: None,
            soak_pit: false,
            drainage: false,
            platform: false,
            created_on: String::new(),
            contact_person: None,
            mobile: None,
        }
    }

    pub fn with_status(mut self, status: PumpStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_on(mut self, created_on: &str) -> Self {
        self.created_on = created_on.to_string();
        self
    }
}

/// Integer-like flag columns arrive as `1`/`0`, occasionally as words.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_keeps_unknown_text() {
        assert_eq!(PumpStatus::parse(" active "), PumpStatus::Active);
        assert_eq!(PumpStatus::parse("INACTIVE"), PumpStatus::Inactive);
        assert_eq!(
            PumpStatus::parse("Under Repair"),
            PumpStatus::Other("Under Repair".to_string())
        );
        assert_eq!(PumpStatus::parse("Under Repair").label(), "Under Repair");
    }

    #[test]
    fn water_quality_parse_is_case_insensitive() {
        assert_eq!(WaterQuality::parse("good"), Some(WaterQuality::Good));
        assert_eq!(
            WaterQuality::parse("Contaminated"),
            Some(WaterQuality::Contaminated)
        );
        assert_eq!(WaterQuality::parse(""), None);
    }

    #[test]
    fn parse_flag_accepts_integer_and_words() {
        assert!(parse_flag("1"));
        assert!(parse_flag("Yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
