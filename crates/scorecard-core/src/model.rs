use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eleven scorecard metric fields, in the positional order they appear
/// in the dealer metrics table. Extraction maps values to fields by this
/// order, so the order here is part of the data contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    VscCaseRequirements,
    VscClosedCorrectly,
    TtActivation,
    SmMonthlyDwellAvgDays,
    SmAverageTriageHours,
    SmTriageUnder4Pct,
    EtrMonthlyAvgDays,
    EtrCasesPct,
    TripleNotesPct,
    RdsMonthlyAvgDays,
    RdsYtdDwellAvgDays,
}

impl MetricField {
    /// All fields in table order.
    pub const ALL: [MetricField; 11] = [
        MetricField::VscCaseRequirements,
        MetricField::VscClosedCorrectly,
        MetricField::TtActivation,
        MetricField::SmMonthlyDwellAvgDays,
        MetricField::SmAverageTriageHours,
        MetricField::SmTriageUnder4Pct,
        MetricField::EtrMonthlyAvgDays,
        MetricField::EtrCasesPct,
        MetricField::TripleNotesPct,
        MetricField::RdsMonthlyAvgDays,
        MetricField::RdsYtdDwellAvgDays,
    ];

    /// The camelCase key used in JSON output and on the CLI.
    pub fn key(&self) -> &'static str {
        match self {
            MetricField::VscCaseRequirements => "vscCaseRequirements",
            MetricField::VscClosedCorrectly => "vscClosedCorrectly",
            MetricField::TtActivation => "ttActivation",
            MetricField::SmMonthlyDwellAvgDays => "smMonthlyDwellAvgDays",
            MetricField::SmAverageTriageHours => "smAverageTriageHours",
            MetricField::SmTriageUnder4Pct => "smTriageUnder4Pct",
            MetricField::EtrMonthlyAvgDays => "etrMonthlyAvgDays",
            MetricField::EtrCasesPct => "etrCasesPct",
            MetricField::TripleNotesPct => "tripleNotesPct",
            MetricField::RdsMonthlyAvgDays => "rdsMonthlyAvgDays",
            MetricField::RdsYtdDwellAvgDays => "rdsYtdDwellAvgDays",
        }
    }

    /// Human-readable label as printed on the scorecard.
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::VscCaseRequirements => "VSC Case Requirements",
            MetricField::VscClosedCorrectly => "VSC Closed Correctly",
            MetricField::TtActivation => "TT+ Activation",
            MetricField::SmMonthlyDwellAvgDays => "SM Monthly Dwell Avg Days",
            MetricField::SmAverageTriageHours => "SM Average Triage Hours",
            MetricField::SmTriageUnder4Pct => "SM Triage % < 4 Hours",
            MetricField::EtrMonthlyAvgDays => "ETR Monthly Avg Days",
            MetricField::EtrCasesPct => "ETR % of Cases",
            MetricField::TripleNotesPct => "% Cases with 3+ Notes",
            MetricField::RdsMonthlyAvgDays => "RDS Monthly Dwell Avg Days",
            MetricField::RdsYtdDwellAvgDays => "RDS YTD Dwell Avg Days",
        }
    }

    /// Case-insensitive lookup by camelCase key.
    pub fn from_key_loose(s: &str) -> Option<MetricField> {
        let s = s.trim();
        MetricField::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The extracted metric set for one location in one reporting period.
///
/// All values are stored exactly as they appeared in the source document:
/// percentages keep their trailing `%`, missing values are the literal
/// string `"N/A"`, never null. A record only exists when all eleven values
/// were found; partial records are rejected during extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetricRecord {
    pub name: String,
    pub location_id: String,
    pub vsc_case_requirements: String,
    pub vsc_closed_correctly: String,
    pub tt_activation: String,
    pub sm_monthly_dwell_avg_days: String,
    pub sm_average_triage_hours: String,
    pub sm_triage_under_4_pct: String,
    pub etr_monthly_avg_days: String,
    pub etr_cases_pct: String,
    pub triple_notes_pct: String,
    pub rds_monthly_avg_days: String,
    pub rds_ytd_dwell_avg_days: String,
}

impl LocationMetricRecord {
    /// Build a record from exactly eleven values in table order.
    pub fn from_values(name: &str, location_id: &str, values: [String; 11]) -> Self {
        let [v0, v1, v2, v3, v4, v5, v6, v7, v8, v9, v10] = values;
        LocationMetricRecord {
            name: name.to_string(),
            location_id: location_id.to_string(),
            vsc_case_requirements: v0,
            vsc_closed_correctly: v1,
            tt_activation: v2,
            sm_monthly_dwell_avg_days: v3,
            sm_average_triage_hours: v4,
            sm_triage_under_4_pct: v5,
            etr_monthly_avg_days: v6,
            etr_cases_pct: v7,
            triple_notes_pct: v8,
            rds_monthly_avg_days: v9,
            rds_ytd_dwell_avg_days: v10,
        }
    }

    /// Raw string value for a metric field.
    pub fn value(&self, field: MetricField) -> &str {
        match field {
            MetricField::VscCaseRequirements => &self.vsc_case_requirements,
            MetricField::VscClosedCorrectly => &self.vsc_closed_correctly,
            MetricField::TtActivation => &self.tt_activation,
            MetricField::SmMonthlyDwellAvgDays => &self.sm_monthly_dwell_avg_days,
            MetricField::SmAverageTriageHours => &self.sm_average_triage_hours,
            MetricField::SmTriageUnder4Pct => &self.sm_triage_under_4_pct,
            MetricField::EtrMonthlyAvgDays => &self.etr_monthly_avg_days,
            MetricField::EtrCasesPct => &self.etr_cases_pct,
            MetricField::TripleNotesPct => &self.triple_notes_pct,
            MetricField::RdsMonthlyAvgDays => &self.rds_monthly_avg_days,
            MetricField::RdsYtdDwellAvgDays => &self.rds_ytd_dwell_avg_days,
        }
    }
}

/// One recall/campaign row attributed to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub code: String,
    pub name: String,
    pub close_rate: String,
    pub national_rate: String,
    pub goal: String,
}

impl CampaignRecord {
    /// Close rate as an exact decimal (the `%` stripped), if parseable.
    pub fn close_rate_value(&self) -> Option<Decimal> {
        parse_percent(&self.close_rate)
    }
}

/// Parse a raw percentage string like "59%" into its numeric part.
pub fn parse_percent(raw: &str) -> Option<Decimal> {
    let s = raw.trim().strip_suffix('%')?;
    Decimal::from_str(s.trim()).ok()
}

/// Campaign rows and summary for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCampaignSummary {
    pub location_id: String,
    pub location_name: String,
    pub campaigns: Vec<CampaignRecord>,
    /// Mean of this location's close rates, if it has any campaigns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_close_rate: Option<Decimal>,
}

/// Cross-location view of a single campaign code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub code: String,
    pub name: String,
    /// Number of locations reporting this campaign.
    pub locations: usize,
    /// Mean close rate across reporting locations.
    pub average_close_rate: Decimal,
}

/// Aggregated campaign completion data across all locations.
///
/// `overall_close_rate` is the mean of per-location averages, not a flat
/// mean over every row, so locations with many campaigns do not dominate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignAggregate {
    pub total_campaigns: usize,
    pub total_locations: usize,
    pub locations: Vec<LocationCampaignSummary>,
    pub campaigns: Vec<CampaignSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_close_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_location: Option<String>,
    /// Campaigns whose cross-location average close rate is at goal (>= 100%).
    pub at_goal: usize,
}

/// Best-effort dealership-level summary fields pulled from free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealershipMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Critical,
    Important,
    Info,
}

/// A recoverable problem noted during extraction (skipped location,
/// missing section, unmatched line). Never fatal on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub message: String,
    pub severity: WarningSeverity,
}

/// One extracted, aggregated set of metrics for one reporting period.
/// This is the unit handed to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub dealership: DealershipMetrics,
    pub locations: Vec<LocationMetricRecord>,
    pub campaigns: CampaignAggregate,
    pub extracted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ExtractionWarning>,
    /// Set when the document yielded no location records at all, so callers
    /// can distinguish "no data" from a crash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw document text, retained only on the zero-record shell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

/// One numeric observation for a (location, metric) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDataPoint {
    pub month: u32,
    pub year: i32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
}
