//! Company fundamentals, corporate actions and the CSV calendars.

use serde::Deserialize;
use serde_with::serde_as;

use super::{wire_enum, Labeled, Lenient};

/// `OVERVIEW` is a flat object of around fifty string fields keyed by
/// name (`"PERatio"`, `"52WeekHigh"`, ...).
pub type CompanyOverviewResponse = Labeled;

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EtfProfileResponse {
    #[serde_as(as = "Lenient")]
    pub net_assets: Option<String>,
    #[serde_as(as = "Lenient")]
    pub net_expense_ratio: Option<String>,
    #[serde_as(as = "Lenient")]
    pub portfolio_turnover: Option<String>,
    #[serde_as(as = "Lenient")]
    pub dividend_yield: Option<String>,
    #[serde_as(as = "Lenient")]
    pub inception_date: Option<String>,
    #[serde_as(as = "Lenient")]
    pub leveraged: Option<String>,
    pub sectors: Vec<EtfSector>,
    pub holdings: Vec<EtfHolding>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EtfSector {
    #[serde_as(as = "Lenient")]
    pub sector: String,
    #[serde_as(as = "Lenient")]
    pub weight: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EtfHolding {
    #[serde_as(as = "Lenient")]
    pub symbol: String,
    #[serde_as(as = "Lenient")]
    pub description: Option<String>,
    #[serde_as(as = "Lenient")]
    pub weight: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DividendsResponse {
    pub symbol: Option<String>,
    pub data: Vec<Dividend>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Dividend {
    #[serde_as(as = "Lenient")]
    pub ex_dividend_date: String,
    #[serde_as(as = "Lenient")]
    pub declaration_date: String,
    #[serde_as(as = "Lenient")]
    pub record_date: String,
    #[serde_as(as = "Lenient")]
    pub payment_date: String,
    #[serde_as(as = "Lenient")]
    pub amount: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SplitsResponse {
    pub symbol: Option<String>,
    pub data: Vec<Split>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Split {
    #[serde_as(as = "Lenient")]
    pub effective_date: String,
    #[serde_as(as = "Lenient")]
    pub split_factor: String,
}

/// Income statement, balance sheet and cash flow share one envelope. Report
/// line items are camelCase keys holding numbers as strings, or `"None"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatementResponse {
    pub symbol: Option<String>,
    pub annual_reports: Vec<Labeled>,
    pub quarterly_reports: Vec<Labeled>,
}

impl StatementResponse {
    pub fn reports(&self, report_type: ReportType) -> &[Labeled] {
        match report_type {
            ReportType::Annual => &self.annual_reports,
            ReportType::Quarterly => &self.quarterly_reports,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EarningsResponse {
    pub symbol: Option<String>,
    pub annual_earnings: Vec<AnnualEarnings>,
    pub quarterly_earnings: Vec<QuarterlyEarnings>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnualEarnings {
    #[serde_as(as = "Lenient")]
    pub fiscal_date_ending: String,
    #[serde(rename = "reportedEPS")]
    #[serde_as(as = "Lenient")]
    pub reported_eps: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuarterlyEarnings {
    #[serde_as(as = "Lenient")]
    pub fiscal_date_ending: String,
    #[serde_as(as = "Lenient")]
    pub reported_date: String,
    #[serde(rename = "reportedEPS")]
    #[serde_as(as = "Lenient")]
    pub reported_eps: String,
    #[serde(rename = "estimatedEPS")]
    #[serde_as(as = "Lenient")]
    pub estimated_eps: String,
    #[serde_as(as = "Lenient")]
    pub surprise: String,
    #[serde_as(as = "Lenient")]
    pub surprise_percentage: String,
}

/// One row of the `IPO_CALENDAR` CSV.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpoEntry {
    pub symbol: String,
    pub name: String,
    pub ipo_date: String,
    pub price_range_low: String,
    pub price_range_high: String,
    pub currency: String,
    pub exchange: String,
}

/// One row of the `EARNINGS_CALENDAR` CSV. The csv reader maps empty
/// fields onto `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EarningsCalendarEntry {
    pub symbol: String,
    pub name: Option<String>,
    pub report_date: String,
    pub fiscal_date_ending: Option<String>,
    pub estimate: Option<String>,
    pub currency: String,
}

wire_enum! {
    pub enum ReportType {
        Annual => "annual",
        Quarterly => "quarterly",
    }
}

wire_enum! {
    /// Look-ahead window for the earnings calendar.
    pub enum EarningsHorizon {
        ThreeMonth => "3month",
        SixMonth => "6month",
        TwelveMonth => "12month",
    }
}
