//! Company fundamentals, corporate actions and the CSV calendars.

use chrono::Local;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::AlphaVantageServer;
use crate::api::fundamental::{
    CompanyOverviewResponse, DividendsResponse, EarningsCalendarEntry, EarningsHorizon,
    EarningsResponse, EtfProfileResponse, IpoEntry, ReportType, SplitsResponse,
    StatementResponse,
};
use crate::format::fundamental::{self, Statement};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyParams {
    /// The stock symbol to lookup
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EtfProfileParams {
    /// The ETF symbol to lookup (e.g., QQQ, SPY, VOO)
    pub symbol: String,
    /// Set to true to display all holdings instead of just the top 10
    pub show_all_holdings: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DividendsParams {
    /// The stock symbol to lookup
    pub symbol: String,
    /// Set to true to display all historical dividends instead of just the recent 10
    pub show_all_history: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatementParams {
    /// The stock symbol to lookup
    pub symbol: String,
    /// The type of report to retrieve (default: annual)
    pub report_type: Option<ReportType>,
    /// The number of periods to display (default: all available)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EarningsCalendarParams {
    /// The stock symbol to lookup (e.g., IBM). When not set, returns the full list of company earnings scheduled.
    pub symbol: Option<String>,
    /// Time horizon for expected earnings. Options are 3month, 6month, or 12month. Default is 3month.
    pub horizon: Option<EarningsHorizon>,
}

impl AlphaVantageServer {
    async fn statement(
        &self,
        kind: Statement,
        p: StatementParams,
        failure: &str,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new(kind.function()).param("symbol", &p.symbol);
        let report_type = p.report_type.unwrap_or(ReportType::Annual);
        self.render_json(query, failure, |resp: StatementResponse| {
            fundamental::statement(&resp, kind, report_type, p.limit)
        })
        .await
    }
}

#[tool_router(router = fundamental_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-company-overview",
        description = "Get the company information, financial ratios, and other key metrics for a specific stock"
    )]
    pub async fn company_overview(
        &self,
        Parameters(p): Parameters<CompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("OVERVIEW").param("symbol", &p.symbol);
        self.render_json(
            query,
            "Error: Failed to fetch company overview data.",
            |resp: CompanyOverviewResponse| fundamental::company_overview(&resp),
        )
        .await
    }

    #[tool(
        name = "get-etf-profile",
        description = "Get ETF profile, sector allocation, and holdings data for a specific ETF"
    )]
    pub async fn etf_profile(
        &self,
        Parameters(p): Parameters<EtfProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("ETF_PROFILE").param("symbol", &p.symbol);
        let show_all = p.show_all_holdings.unwrap_or(false);
        self.render_json(
            query,
            "Error: Failed to fetch ETF profile data.",
            |resp: EtfProfileResponse| fundamental::etf_profile(&resp, show_all),
        )
        .await
    }

    #[tool(
        name = "get-dividends",
        description = "Get historical and future (declared) dividend distributions for a specific stock"
    )]
    pub async fn dividends(
        &self,
        Parameters(p): Parameters<DividendsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("DIVIDENDS").param("symbol", &p.symbol);
        let show_all = p.show_all_history.unwrap_or(false);
        let today = Local::now().date_naive();
        self.render_json(
            query,
            "Error: Failed to fetch dividend data.",
            |resp: DividendsResponse| fundamental::dividends(&resp, today, show_all),
        )
        .await
    }

    #[tool(
        name = "get-stock-splits",
        description = "Get historical stock split events for a specific stock"
    )]
    pub async fn stock_splits(
        &self,
        Parameters(p): Parameters<CompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("SPLITS").param("symbol", &p.symbol);
        self.render_json(
            query,
            "Error: Failed to fetch stock split data.",
            |resp: SplitsResponse| fundamental::splits(&resp),
        )
        .await
    }

    #[tool(
        name = "get-income-statement",
        description = "Get annual and quarterly income statements for a specific company"
    )]
    pub async fn income_statement(
        &self,
        Parameters(p): Parameters<StatementParams>,
    ) -> Result<CallToolResult, McpError> {
        self.statement(
            Statement::Income,
            p,
            "Error: Failed to fetch income statement data.",
        )
        .await
    }

    #[tool(
        name = "get-balance-sheet",
        description = "Get annual and quarterly balance sheets for a specific company"
    )]
    pub async fn balance_sheet(
        &self,
        Parameters(p): Parameters<StatementParams>,
    ) -> Result<CallToolResult, McpError> {
        self.statement(
            Statement::Balance,
            p,
            "Error: Failed to fetch balance sheet data.",
        )
        .await
    }

    #[tool(
        name = "get-cash-flow",
        description = "Get annual and quarterly cash flow statements for a specific company"
    )]
    pub async fn cash_flow(
        &self,
        Parameters(p): Parameters<StatementParams>,
    ) -> Result<CallToolResult, McpError> {
        self.statement(
            Statement::CashFlow,
            p,
            "Error: Failed to fetch cash flow data.",
        )
        .await
    }

    #[tool(
        name = "get-earnings",
        description = "Get annual and quarterly earnings (EPS) data for a specific company"
    )]
    pub async fn earnings(
        &self,
        Parameters(p): Parameters<CompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("EARNINGS").param("symbol", &p.symbol);
        self.render_json(
            query,
            "Error: Failed to fetch earnings data.",
            |resp: EarningsResponse| fundamental::earnings(&resp),
        )
        .await
    }

    #[tool(
        name = "get-ipo-calendar",
        description = "Get a list of upcoming IPOs expected in the next 3 months"
    )]
    pub async fn ipo_calendar(&self) -> Result<CallToolResult, McpError> {
        self.render_csv(
            Query::new("IPO_CALENDAR"),
            "Error: Failed to fetch IPO calendar data.",
            |rows: Vec<IpoEntry>| fundamental::ipo_calendar(&rows),
        )
        .await
    }

    #[tool(
        name = "get-earnings-calendar",
        description = "Get a list of company earnings expected in the next 3, 6, or 12 months"
    )]
    pub async fn earnings_calendar(
        &self,
        Parameters(p): Parameters<EarningsCalendarParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("EARNINGS_CALENDAR")
            .opt_str("symbol", p.symbol.as_deref())
            .opt("horizon", p.horizon);
        self.render_csv(
            query,
            "Error: Failed to fetch earnings calendar data.",
            |rows: Vec<EarningsCalendarEntry>| fundamental::earnings_calendar(&rows),
        )
        .await
    }
}
