//! Commodity prices and US economic indicators.
//!
//! Both families answer with the same `name / interval / unit / data[]`
//! document, newest point first.

use serde::Deserialize;
use serde_with::serde_as;

use super::{wire_enum, Lenient};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MacroSeriesResponse {
    pub name: Option<String>,
    pub interval: Option<String>,
    pub unit: Option<String>,
    pub data: Option<Vec<DataPoint>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    #[serde_as(as = "Lenient")]
    pub date: String,
    #[serde_as(as = "Lenient")]
    pub value: String,
}

wire_enum! {
    pub enum Commodity {
        Wti => "WTI",
        Brent => "BRENT",
        NaturalGas => "NATURAL_GAS",
        Copper => "COPPER",
        Aluminum => "ALUMINUM",
        Wheat => "WHEAT",
        Corn => "CORN",
        Cotton => "COTTON",
        Sugar => "SUGAR",
        Coffee => "COFFEE",
        AllCommodities => "ALL_COMMODITIES",
    }
}

impl Commodity {
    pub fn tool_name(&self) -> &'static str {
        match self {
            Commodity::Wti => "get-wti",
            Commodity::Brent => "get-brent",
            Commodity::NaturalGas => "get-natural-gas",
            Commodity::Copper => "get-copper",
            Commodity::Aluminum => "get-aluminum",
            Commodity::Wheat => "get-wheat",
            Commodity::Corn => "get-corn",
            Commodity::Cotton => "get-cotton",
            Commodity::Sugar => "get-sugar",
            Commodity::Coffee => "get-coffee",
            Commodity::AllCommodities => "get-global-commodities-index",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Commodity::Wti => "Get West Texas Intermediate (WTI) crude oil prices",
            Commodity::Brent => "Get Brent (Europe) crude oil prices",
            Commodity::NaturalGas => "Get natural gas prices",
            Commodity::Copper => "Get global copper prices",
            Commodity::Aluminum => "Get global aluminum prices",
            Commodity::Wheat => "Get global wheat prices",
            Commodity::Corn => "Get global corn prices",
            Commodity::Cotton => "Get global cotton prices",
            Commodity::Sugar => "Get global sugar prices",
            Commodity::Coffee => "Get global coffee prices",
            Commodity::AllCommodities => "Get global price index of all commodities",
        }
    }
}

wire_enum! {
    pub enum EconomicIndicator {
        RealGdp => "REAL_GDP",
        RealGdpPerCapita => "REAL_GDP_PER_CAPITA",
        TreasuryYield => "TREASURY_YIELD",
        FederalFundsRate => "FEDERAL_FUNDS_RATE",
        Cpi => "CPI",
        Inflation => "INFLATION",
        RetailSales => "RETAIL_SALES",
        Durables => "DURABLES",
        Unemployment => "UNEMPLOYMENT",
        NonfarmPayroll => "NONFARM_PAYROLL",
    }
}

impl EconomicIndicator {
    pub fn tool_name(&self) -> &'static str {
        match self {
            EconomicIndicator::RealGdp => "get-real-gdp",
            EconomicIndicator::RealGdpPerCapita => "get-real-gdp-per-capita",
            EconomicIndicator::TreasuryYield => "get-treasury-yield",
            EconomicIndicator::FederalFundsRate => "get-federal-funds-rate",
            EconomicIndicator::Cpi => "get-cpi",
            EconomicIndicator::Inflation => "get-inflation",
            EconomicIndicator::RetailSales => "get-retail-sales",
            EconomicIndicator::Durables => "get-durable-goods-orders",
            EconomicIndicator::Unemployment => "get-unemployment-rate",
            EconomicIndicator::NonfarmPayroll => "get-nonfarm-payroll",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EconomicIndicator::RealGdp => "Get real gross domestic product (GDP) of the United States",
            EconomicIndicator::RealGdpPerCapita => "Get real GDP per capita of the United States",
            EconomicIndicator::TreasuryYield => "Get U.S. treasury yield of a given maturity",
            EconomicIndicator::FederalFundsRate => "Get federal funds rate in the United States",
            EconomicIndicator::Cpi => "Get consumer price index (CPI) of the United States",
            EconomicIndicator::Inflation => {
                "Get annual inflation rates (consumer prices) of the United States"
            }
            EconomicIndicator::RetailSales => {
                "Get advance estimates of U.S. retail and food services sales"
            }
            EconomicIndicator::Durables => "Get U.S. manufacturers' new orders of durable goods",
            EconomicIndicator::Unemployment => "Get monthly unemployment data of the United States",
            EconomicIndicator::NonfarmPayroll => {
                "Get monthly US All Employees: Total Nonfarm (Nonfarm Payroll)"
            }
        }
    }

    pub fn accepts_interval(&self) -> bool {
        matches!(
            self,
            EconomicIndicator::RealGdp
                | EconomicIndicator::TreasuryYield
                | EconomicIndicator::FederalFundsRate
                | EconomicIndicator::Cpi
        )
    }

    pub fn accepts_maturity(&self) -> bool {
        matches!(self, EconomicIndicator::TreasuryYield)
    }
}

wire_enum! {
    /// Sampling interval for commodity prices.
    pub enum SeriesInterval {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Quarterly => "quarterly",
        Annual => "annual",
    }
}

wire_enum! {
    /// Sampling interval for economic indicators. Each indicator supports a
    /// subset; the provider rejects the rest.
    pub enum EconomicInterval {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Quarterly => "quarterly",
        Annual => "annual",
        Semiannual => "semiannual",
    }
}

wire_enum! {
    /// Treasury maturity.
    pub enum Maturity {
        ThreeMonth => "3month",
        TwoYear => "2year",
        FiveYear => "5year",
        SevenYear => "7year",
        TenYear => "10year",
        ThirtyYear => "30year",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_macro_series() {
        let resp: MacroSeriesResponse = serde_json::from_value(json!({
            "name": "Crude Oil Prices WTI",
            "interval": "monthly",
            "unit": "dollars per barrel",
            "data": [{ "date": "2024-03-01", "value": "81.28" }]
        }))
        .unwrap();
        assert_eq!(resp.data.unwrap()[0].value, "81.28");
    }

    #[test]
    fn only_some_indicators_take_an_interval() {
        let with: Vec<_> = EconomicIndicator::ALL
            .iter()
            .filter(|i| i.accepts_interval())
            .map(|i| i.as_str())
            .collect();
        assert_eq!(with, ["REAL_GDP", "TREASURY_YIELD", "FEDERAL_FUNDS_RATE", "CPI"]);
        assert!(EconomicIndicator::TreasuryYield.accepts_maturity());
        assert!(!EconomicIndicator::Cpi.accepts_maturity());
    }

    #[test]
    fn tool_names_are_unique() {
        let mut names: Vec<_> = Commodity::ALL.iter().map(|c| c.tool_name()).collect();
        names.extend(EconomicIndicator::ALL.iter().map(|i| i.tool_name()));
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
