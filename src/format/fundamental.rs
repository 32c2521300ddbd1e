//! Company fundamentals: overview, ETF profile, corporate actions,
//! financial statements, earnings and the CSV calendars.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::{
    grouped_fixed, grouped_integer, month_year, number, or, or_string,
    parse_date, percent, quarter, us_date, NA, UNKNOWN,
};
use crate::api::fundamental::{
    CompanyOverviewResponse, Dividend, DividendsResponse, EarningsCalendarEntry,
    EarningsResponse, EtfHolding, EtfProfileResponse, IpoEntry, ReportType, SplitsResponse,
    StatementResponse,
};
use crate::api::Labeled;

pub fn company_overview(o: &CompanyOverviewResponse) -> String {
    let Some(symbol) = o.get("Symbol") else {
        return "No company data available".to_string();
    };
    let field = |key: &str| or_string(o.get(key), UNKNOWN);
    let grouped = |key: &str| {
        o.get(key)
            .and_then(|v| grouped_integer(&v))
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    let pct = |key: &str, default: &str| {
        percent(o.get(key).as_deref(), 2).unwrap_or_else(|| default.to_string())
    };

    let sections = [
        vec![
            format!("== Company Information: {} ({}) ==", field("Name"), symbol),
            format!("Asset Type: {}", field("AssetType")),
            format!("Exchange: {}", field("Exchange")),
            format!("Currency: {}", field("Currency")),
            format!("Country: {}", field("Country")),
            format!("Sector: {}", field("Sector")),
            format!("Industry: {}", field("Industry")),
            format!("Address: {}", field("Address")),
            format!("Website: {}", field("OfficialSite")),
            format!("CIK: {}", field("CIK")),
            format!("Fiscal Year End: {}", field("FiscalYearEnd")),
            format!("Latest Quarter: {}", field("LatestQuarter")),
            String::new(),
            format!(
                "Description: {}",
                or_string(o.get("Description"), "No description available")
            ),
            String::new(),
        ],
        vec![
            "== Key Financial Metrics ==".to_string(),
            format!("Market Cap: {}", grouped("MarketCapitalization")),
            format!("EBITDA: {}", grouped("EBITDA")),
            format!("Revenue (TTM): {}", grouped("RevenueTTM")),
            format!("Gross Profit (TTM): {}", grouped("GrossProfitTTM")),
            format!("Shares Outstanding: {}", grouped("SharesOutstanding")),
            String::new(),
        ],
        vec![
            "== Ratios and Performance ==".to_string(),
            format!("EPS: {}", field("EPS")),
            format!("PE Ratio: {}", field("PERatio")),
            format!("PEG Ratio: {}", field("PEGRatio")),
            format!("Forward PE: {}", field("ForwardPE")),
            format!("Price to Sales (TTM): {}", field("PriceToSalesRatioTTM")),
            format!("Price to Book: {}", field("PriceToBookRatio")),
            format!("EV to Revenue: {}", field("EVToRevenue")),
            format!("EV to EBITDA: {}", field("EVToEBITDA")),
            format!("Book Value: {}", field("BookValue")),
            format!("Revenue Per Share (TTM): {}", field("RevenuePerShareTTM")),
            format!("Diluted EPS (TTM): {}", field("DilutedEPSTTM")),
            String::new(),
        ],
        vec![
            "== Profitability and Growth ==".to_string(),
            format!("Profit Margin: {}", pct("ProfitMargin", UNKNOWN)),
            format!("Operating Margin (TTM): {}", pct("OperatingMarginTTM", UNKNOWN)),
            format!("Return on Assets (TTM): {}", pct("ReturnOnAssetsTTM", UNKNOWN)),
            format!("Return on Equity (TTM): {}", pct("ReturnOnEquityTTM", UNKNOWN)),
            format!(
                "Quarterly Earnings Growth (YOY): {}",
                pct("QuarterlyEarningsGrowthYOY", UNKNOWN)
            ),
            format!(
                "Quarterly Revenue Growth (YOY): {}",
                pct("QuarterlyRevenueGrowthYOY", UNKNOWN)
            ),
            String::new(),
        ],
        vec![
            "== Dividends ==".to_string(),
            format!("Dividend Per Share: {}", or_string(o.get("DividendPerShare"), NA)),
            format!("Dividend Yield: {}", pct("DividendYield", NA)),
            format!("Dividend Date: {}", or_string(o.get("DividendDate"), NA)),
            format!("Ex-Dividend Date: {}", or_string(o.get("ExDividendDate"), NA)),
            String::new(),
        ],
        vec![
            "== Market Data ==".to_string(),
            format!("Beta: {}", field("Beta")),
            format!("52-Week High: {}", field("52WeekHigh")),
            format!("52-Week Low: {}", field("52WeekLow")),
            format!("50-Day Moving Average: {}", field("50DayMovingAverage")),
            format!("200-Day Moving Average: {}", field("200DayMovingAverage")),
            String::new(),
        ],
        vec![
            "== Analyst Ratings ==".to_string(),
            format!("Analyst Target Price: {}", field("AnalystTargetPrice")),
            format!("Strong Buy: {}", or_string(o.get("AnalystRatingStrongBuy"), "0")),
            format!("Buy: {}", or_string(o.get("AnalystRatingBuy"), "0")),
            format!("Hold: {}", or_string(o.get("AnalystRatingHold"), "0")),
            format!("Sell: {}", or_string(o.get("AnalystRatingSell"), "0")),
            format!("Strong Sell: {}", or_string(o.get("AnalystRatingStrongSell"), "0")),
        ],
    ];

    join_sections(&sections, "\n\n")
}

fn join_sections(sections: &[Vec<String>], separator: &str) -> String {
    sections
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.join("\n"))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Grouped number with up to three fraction digits, trailing zeros dropped.
fn grouped_number(n: f64) -> String {
    let text = grouped_fixed(n, 3);
    match text.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{}.{}", int, frac)
            }
        }
        None => text,
    }
}

fn weight(value: &str) -> String {
    percent(Some(value), 2).unwrap_or_else(|| NA.to_string())
}

fn holding_line(i: usize, h: &EtfHolding) -> String {
    format!(
        "{}. {} - {}: {}",
        i + 1,
        h.symbol,
        or(h.description.as_deref(), NA),
        weight(&h.weight)
    )
}

pub fn etf_profile(resp: &EtfProfileResponse, show_all_holdings: bool) -> String {
    let Some(net_assets) = &resp.net_assets else {
        return "No ETF profile data available".to_string();
    };
    let ratio = |v: &Option<String>| percent(v.as_deref(), 2).unwrap_or_else(|| NA.to_string());

    let overview = vec![
        "== ETF Profile Overview ==".to_string(),
        format!(
            "Net Assets: ${}",
            number(net_assets)
                .map(grouped_number)
                .unwrap_or_else(|| NA.to_string())
        ),
        format!("Expense Ratio: {}", ratio(&resp.net_expense_ratio)),
        format!("Portfolio Turnover: {}", ratio(&resp.portfolio_turnover)),
        format!("Dividend Yield: {}", ratio(&resp.dividend_yield)),
        format!("Inception Date: {}", or(resp.inception_date.as_deref(), UNKNOWN)),
        format!("Leveraged: {}", or(resp.leveraged.as_deref(), UNKNOWN)),
    ];

    let mut sectors = vec!["== Sector Allocation ==".to_string()];
    if resp.sectors.is_empty() {
        sectors.push("No sector data available".to_string());
    } else {
        sectors.extend(
            resp.sectors
                .iter()
                .map(|s| format!("{}: {}", s.sector, weight(&s.weight))),
        );
    }

    let mut holdings = vec!["== Top Holdings ==".to_string()];
    if resp.holdings.is_empty() {
        holdings.push("No holdings data available".to_string());
    } else {
        holdings.extend(resp.holdings.iter().take(10).enumerate().map(|(i, h)| holding_line(i, h)));
        holdings.push(String::new());
        holdings.push(format!("Total Holdings: {}", resp.holdings.len()));
    }

    let mut text = join_sections(&[overview, sectors, holdings], "\n\n");

    if show_all_holdings && resp.holdings.len() > 10 {
        text.push_str("\n\n== All Holdings ==");
        for (i, h) in resp.holdings.iter().enumerate() {
            text.push('\n');
            text.push_str(&holding_line(i, h));
        }
    }

    text
}

fn dividend_line(d: &Dividend) -> String {
    format!(
        "Payment: {} | Ex-Div: {} | Declared: {} | Amount: ${}",
        d.payment_date, d.ex_dividend_date, d.declaration_date, d.amount
    )
}

/// Dividends split into declared (paid after `today`) and historical ones.
/// Rows without a parsable payment date belong to neither.
pub fn dividends(resp: &DividendsResponse, today: NaiveDate, show_all_history: bool) -> String {
    let Some(symbol) = resp.symbol.as_deref().filter(|_| !resp.data.is_empty()) else {
        return "No dividend data available".to_string();
    };

    let upcoming: Vec<&Dividend> = resp
        .data
        .iter()
        .filter(|d| parse_date(&d.payment_date).is_some_and(|p| p > today))
        .collect();
    let history: Vec<&Dividend> = resp
        .data
        .iter()
        .filter(|d| parse_date(&d.payment_date).is_some_and(|p| p <= today))
        .collect();

    let amounts: Vec<f64> = history.iter().filter_map(|d| number(&d.amount)).collect();
    let average = if history.is_empty() {
        0.0
    } else {
        amounts.iter().sum::<f64>() / history.len() as f64
    };

    let mut per_year: BTreeMap<i32, f64> = BTreeMap::new();
    for d in &history {
        if let (Some(paid), Some(amount)) = (parse_date(&d.payment_date), number(&d.amount)) {
            *per_year.entry(paid.year()).or_default() += amount;
        }
    }

    let header = vec![
        format!("== Dividend History for {} ==", symbol),
        format!("Total Records: {}", resp.data.len()),
        format!("Average Dividend: ${:.2}", average),
        String::new(),
    ];

    let mut declared = Vec::new();
    if !upcoming.is_empty() {
        declared.push("== Upcoming Dividends ==".to_string());
        declared.extend(upcoming.iter().map(|d| {
            format!(
                "Payment Date: {} | Ex-Div Date: {} | Amount: ${}",
                d.payment_date, d.ex_dividend_date, d.amount
            )
        }));
        declared.push(String::new());
    }

    let mut annual = Vec::new();
    if !per_year.is_empty() {
        annual.push("== Annual Dividend Totals ==".to_string());
        annual.extend(
            per_year
                .iter()
                .rev()
                .map(|(year, total)| format!("{}: ${:.2}", year, total)),
        );
        annual.push(String::new());
    }

    let mut recent = vec!["== Recent Dividend History ==".to_string()];
    recent.extend(history.iter().take(10).map(|d| dividend_line(d)));
    if history.len() > 10 {
        recent.push(format!("... and {} more historical dividends", history.len() - 10));
    }

    let mut text = join_sections(&[header, declared, annual, recent], "\n\n");

    if show_all_history && resp.data.len() > 10 {
        text.push_str("\n\n== Complete Dividend History ==");
        for d in &history {
            text.push('\n');
            text.push_str(&dividend_line(d));
        }
    }

    text
}

pub fn splits(resp: &SplitsResponse) -> String {
    let Some(symbol) = resp.symbol.as_deref().filter(|_| !resp.data.is_empty()) else {
        return "No stock split data available".to_string();
    };

    let mut sorted: Vec<_> = resp.data.iter().collect();
    sorted.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));

    let cumulative = resp
        .data
        .iter()
        .map(|s| number(&s.split_factor))
        .try_fold(1.0, |acc, f| f.map(|f| acc * f))
        .map(|f| format!("{:.4}", f))
        .unwrap_or_else(|| NA.to_string());

    let header = vec![
        format!("== Stock Split History for {} ==", symbol),
        format!("Total Split Events: {}", resp.data.len()),
        format!("Cumulative Split Factor: {}", cumulative),
        format!(
            "(Original shares multiplied by {} equals current shares)",
            cumulative
        ),
        String::new(),
    ];

    let mut events = vec!["== All Stock Splits (Most Recent First) ==".to_string()];
    for split in &sorted {
        let (kind, ratio) = match number(&split.split_factor) {
            Some(f) if f > 1.0 => ("Forward Split", format!("{}:1", f)),
            Some(f) if f < 1.0 && f > 0.0 => ("Reverse Split", format!("1:{}", (1.0 / f).round())),
            _ => ("Stock Distribution", "1:1".to_string()),
        };
        events.push(format!(
            "{}: {} - {} (factor: {})",
            split.effective_date, kind, ratio, split.split_factor
        ));
    }

    let mut decades = Vec::new();
    if resp.data.len() >= 3 {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for split in &sorted {
            if let Some(date) = parse_date(&split.effective_date) {
                *counts.entry(date.year() / 10 * 10).or_default() += 1;
            }
        }
        decades.push(String::new());
        decades.push("== Splits By Decade ==".to_string());
        decades.extend(counts.iter().rev().map(|(decade, n)| {
            format!("{}s: {} split{}", decade, n, if *n == 1 { "" } else { "s" })
        }));
    }

    join_sections(&[header, events, decades], "\n")
}

/// Which statement a report set holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Income,
    Balance,
    CashFlow,
}

impl Statement {
    pub fn function(self) -> &'static str {
        match self {
            Statement::Income => "INCOME_STATEMENT",
            Statement::Balance => "BALANCE_SHEET",
            Statement::CashFlow => "CASH_FLOW",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Statement::Income => "Income Statement",
            Statement::Balance => "Balance Sheet",
            Statement::CashFlow => "Cash Flow Statement",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Statement::Income => "income statement",
            Statement::Balance => "balance sheet",
            Statement::CashFlow => "cash flow",
        }
    }

    fn sections(self) -> [(&'static str, fn(&Labeled) -> Vec<String>); 4] {
        match self {
            Statement::Income => [
                ("Revenue and Gross Profit", income_revenue),
                ("Operating Expenses", income_operating),
                ("Other Income and Expenses", income_other),
                ("Profit Metrics", income_profit),
            ],
            Statement::Balance => [
                ("Assets", balance_assets),
                ("Liabilities", balance_liabilities),
                ("Shareholders' Equity", balance_equity),
                ("Key Financial Ratios", balance_ratios),
            ],
            Statement::CashFlow => [
                ("Cash Flow from Operating Activities", cash_operating),
                ("Cash Flow from Investing Activities", cash_investing),
                ("Cash Flow from Financing Activities", cash_financing),
                ("Key Cash Flow Metrics", cash_metrics),
            ],
        }
    }
}

/// A report value, `"None"` and blanks excluded.
fn value(report: &Labeled, key: &str) -> Option<f64> {
    report.get(key).as_deref().and_then(number)
}

/// `61860000000` -> `$61,860.0M`.
fn millions(report: &Labeled, key: &str) -> String {
    match value(report, key) {
        Some(v) if v < 0.0 => format!("-${}M", grouped_fixed(-v / 1e6, 1)),
        Some(v) => format!("${}M", grouped_fixed(v / 1e6, 1)),
        None => NA.to_string(),
    }
}

/// Cash flows carry an explicit sign: `+$1.0M`, `-$2.5M`.
fn flow(v: Option<f64>) -> String {
    match v {
        Some(v) if v < 0.0 => format!("-${}M", grouped_fixed(-v / 1e6, 1)),
        Some(v) => format!("+${}M", grouped_fixed(v / 1e6, 1)),
        None => NA.to_string(),
    }
}

fn share(report: &Labeled, key: &str, total_key: &str) -> String {
    match (value(report, key), value(report, total_key)) {
        (Some(_), Some(total)) if total == 0.0 => "0.0%".to_string(),
        (Some(v), Some(total)) => format!("{:.1}%", v / total * 100.0),
        _ => NA.to_string(),
    }
}

fn ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) if b != 0.0 => Some(a / b),
        _ => None,
    }
}

fn fixed2(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| NA.to_string())
}

fn pct1(v: Option<f64>) -> String {
    v.map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| NA.to_string())
}

fn income_revenue(r: &Labeled) -> Vec<String> {
    vec![
        format!("  Total Revenue: {}", millions(r, "totalRevenue")),
        format!(
            "  Cost of Revenue: {} ({} of revenue)",
            millions(r, "costOfRevenue"),
            share(r, "costOfRevenue", "totalRevenue")
        ),
        format!(
            "  Gross Profit: {} ({} of revenue)",
            millions(r, "grossProfit"),
            share(r, "grossProfit", "totalRevenue")
        ),
    ]
}

fn income_operating(r: &Labeled) -> Vec<String> {
    vec![
        format!(
            "  SG&A: {} ({} of revenue)",
            millions(r, "sellingGeneralAndAdministrative"),
            share(r, "sellingGeneralAndAdministrative", "totalRevenue")
        ),
        format!(
            "  R&D: {} ({} of revenue)",
            millions(r, "researchAndDevelopment"),
            share(r, "researchAndDevelopment", "totalRevenue")
        ),
        format!("  Total Operating Expenses: {}", millions(r, "operatingExpenses")),
        format!(
            "  Operating Income: {} ({} of revenue)",
            millions(r, "operatingIncome"),
            share(r, "operatingIncome", "totalRevenue")
        ),
    ]
}

fn income_other(r: &Labeled) -> Vec<String> {
    vec![
        format!("  Interest Income: {}", millions(r, "interestIncome")),
        format!("  Interest Expense: {}", millions(r, "interestExpense")),
        format!("  Net Interest Income: {}", millions(r, "netInterestIncome")),
        format!(
            "  Depreciation & Amortization: {}",
            millions(r, "depreciationAndAmortization")
        ),
    ]
}

fn income_profit(r: &Labeled) -> Vec<String> {
    vec![
        format!(
            "  Income Before Tax: {} ({} of revenue)",
            millions(r, "incomeBeforeTax"),
            share(r, "incomeBeforeTax", "totalRevenue")
        ),
        format!("  Income Tax Expense: {}", millions(r, "incomeTaxExpense")),
        format!(
            "  Net Income: {} ({} of revenue)",
            millions(r, "netIncome"),
            share(r, "netIncome", "totalRevenue")
        ),
        format!("  EBIT: {}", millions(r, "ebit")),
        format!("  EBITDA: {}", millions(r, "ebitda")),
    ]
}

fn balance_assets(r: &Labeled) -> Vec<String> {
    vec![
        format!("  Total Assets: {}", millions(r, "totalAssets")),
        String::new(),
        format!(
            "  Current Assets: {} ({} of total assets)",
            millions(r, "totalCurrentAssets"),
            share(r, "totalCurrentAssets", "totalAssets")
        ),
        format!(
            "    - Cash & Equivalents: {}",
            millions(r, "cashAndCashEquivalentsAtCarryingValue")
        ),
        format!("    - Short-term Investments: {}", millions(r, "shortTermInvestments")),
        format!("    - Inventory: {}", millions(r, "inventory")),
        format!("    - Other Current Assets: {}", millions(r, "otherCurrentAssets")),
        String::new(),
        format!(
            "  Non-Current Assets: {} ({} of total assets)",
            millions(r, "totalNonCurrentAssets"),
            share(r, "totalNonCurrentAssets", "totalAssets")
        ),
        format!("    - Goodwill: {}", millions(r, "goodwill")),
        format!("    - Intangible Assets: {}", millions(r, "intangibleAssets")),
        format!("    - Long-term Investments: {}", millions(r, "longTermInvestments")),
    ]
}

fn balance_liabilities(r: &Labeled) -> Vec<String> {
    vec![
        format!(
            "  Total Liabilities: {} ({} of total assets)",
            millions(r, "totalLiabilities"),
            share(r, "totalLiabilities", "totalAssets")
        ),
        String::new(),
        format!(
            "  Current Liabilities: {} ({} of total liabilities)",
            millions(r, "totalCurrentLiabilities"),
            share(r, "totalCurrentLiabilities", "totalLiabilities")
        ),
        format!("    - Short-term Debt: {}", millions(r, "shortTermDebt")),
        format!(
            "    - Current Portion of Long-term Debt: {}",
            millions(r, "currentLongTermDebt")
        ),
        format!(
            "    - Other Current Liabilities: {}",
            millions(r, "otherCurrentLiabilities")
        ),
        String::new(),
        format!(
            "  Non-Current Liabilities: {} ({} of total liabilities)",
            millions(r, "totalNonCurrentLiabilities"),
            share(r, "totalNonCurrentLiabilities", "totalLiabilities")
        ),
        format!("    - Long-term Debt: {}", millions(r, "longTermDebt")),
        format!(
            "    - Capital Lease Obligations: {}",
            millions(r, "capitalLeaseObligations")
        ),
        format!(
            "    - Other Non-Current Liabilities: {}",
            millions(r, "otherNonCurrentLiabilities")
        ),
    ]
}

fn balance_equity(r: &Labeled) -> Vec<String> {
    vec![
        format!(
            "  Total Shareholders' Equity: {} ({} of total assets)",
            millions(r, "totalShareholderEquity"),
            share(r, "totalShareholderEquity", "totalAssets")
        ),
        format!("    - Common Stock: {}", millions(r, "commonStock")),
        format!("    - Retained Earnings: {}", millions(r, "retainedEarnings")),
        format!(
            "    - Shares Outstanding: {}",
            r.get("commonStockSharesOutstanding")
                .and_then(|v| grouped_integer(&v))
                .unwrap_or_else(|| NA.to_string())
        ),
    ]
}

fn balance_ratios(r: &Labeled) -> Vec<String> {
    let debt = value(r, "shortLongTermDebtTotal");
    let equity = value(r, "totalShareholderEquity");
    let book_value = ratio(equity, value(r, "commonStockSharesOutstanding"))
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| NA.to_string());

    vec![
        format!(
            "  Current Ratio: {}",
            fixed2(ratio(
                value(r, "totalCurrentAssets"),
                value(r, "totalCurrentLiabilities")
            ))
        ),
        format!("  Debt to Equity: {}", fixed2(ratio(debt, equity))),
        format!(
            "  Debt to Assets: {}",
            fixed2(ratio(debt, value(r, "totalAssets")))
        ),
        format!("  Book Value per Share: {}", book_value),
    ]
}

fn cash_operating(r: &Labeled) -> Vec<String> {
    vec![
        format!("  Net Income: {}", flow(value(r, "netIncome"))),
        format!(
            "  Depreciation & Amortization: {}",
            flow(value(r, "depreciationDepletionAndAmortization"))
        ),
        format!("  Change in Inventory: {}", flow(value(r, "changeInInventory"))),
        format!("  Net Operating Cash Flow: {}", flow(value(r, "operatingCashflow"))),
    ]
}

fn cash_investing(r: &Labeled) -> Vec<String> {
    vec![
        format!("  Capital Expenditures: {}", flow(value(r, "capitalExpenditures"))),
        format!(
            "  Cash Flow from Investment: {}",
            flow(value(r, "cashflowFromInvestment"))
        ),
    ]
}

fn cash_financing(r: &Labeled) -> Vec<String> {
    vec![
        format!("  Dividend Payout: {}", flow(value(r, "dividendPayout"))),
        format!(
            "  Stock Repurchase: {}",
            flow(value(r, "proceedsFromRepurchaseOfEquity"))
        ),
        format!(
            "  Debt Proceeds: {}",
            flow(value(
                r,
                "proceedsFromIssuanceOfLongTermDebtAndCapitalSecuritiesNet"
            ))
        ),
        format!(
            "  Net Financing Cash Flow: {}",
            flow(value(r, "cashflowFromFinancing"))
        ),
    ]
}

fn cash_metrics(r: &Labeled) -> Vec<String> {
    let ocf = value(r, "operatingCashflow");
    let capex = value(r, "capitalExpenditures");
    let fcf = match (ocf, capex) {
        (Some(o), Some(c)) => Some(o - c),
        _ => None,
    };

    vec![
        format!("  Free Cash Flow (OCF - CapEx): {}", flow(fcf)),
        format!(
            "  FCF to Net Income Ratio: {}",
            pct1(ratio(fcf, value(r, "netIncome")))
        ),
        format!("  Capital Expenditure to OCF: {}", pct1(ratio(capex, ocf))),
        format!(
            "  Dividend Payout Ratio: {}",
            pct1(ratio(value(r, "dividendPayout"), ocf))
        ),
    ]
}

/// Income statement, balance sheet or cash flow for one report type.
/// `limit` keeps only the most recent periods.
pub fn statement(
    resp: &StatementResponse,
    kind: Statement,
    report_type: ReportType,
    limit: Option<usize>,
) -> String {
    let mut reports = resp.reports(report_type);
    if let Some(limit) = limit.filter(|l| *l > 0) {
        reports = &reports[..reports.len().min(limit)];
    }

    let Some(symbol) = resp.symbol.as_deref().filter(|_| !reports.is_empty()) else {
        return format!("No {} {} data available", report_type, kind.noun());
    };

    let periods: Vec<String> = reports
        .iter()
        .map(|r| {
            let date = r.get("fiscalDateEnding").unwrap_or_default();
            match report_type {
                ReportType::Annual => date.chars().take(4).collect(),
                ReportType::Quarterly => quarter(&date).unwrap_or(date),
            }
        })
        .collect();

    let report_title = match report_type {
        ReportType::Annual => "Annual",
        ReportType::Quarterly => "Quarterly",
    };

    let mut sections = vec![vec![
        format!("== {} {} for {} ==", report_title, kind.title(), symbol),
        format!("Currency: {}", or_string(reports[0].get("reportedCurrency"), UNKNOWN)),
        format!("Periods: {}", periods.join(", ")),
        String::new(),
    ]];

    for (i, (title, render)) in kind.sections().iter().enumerate() {
        let mut section = Vec::new();
        if i > 0 {
            section.push(String::new());
        }
        section.push(format!("== {} ==", title));
        for (period, report) in periods.iter().zip(reports) {
            section.push(format!("{}:\n{}", period, render(report).join("\n")));
        }
        sections.push(section);
    }

    join_sections(&sections, "\n")
}

fn is_pending(eps: &str) -> bool {
    eps == "0" || number(eps) == Some(0.0)
}

/// `"-0.05"` -> `"-$0.05"`, `"0.1"` -> `"+$0.1"`.
fn signed_dollars(raw: &str) -> String {
    match number(raw) {
        Some(n) if n < 0.0 => format!("-${}", raw.trim().trim_start_matches('-')),
        Some(_) => format!("+${}", raw.trim()),
        None => NA.to_string(),
    }
}

pub fn earnings(resp: &EarningsResponse) -> String {
    let Some(symbol) = resp.symbol.as_deref() else {
        return "No earnings data available".to_string();
    };

    let annual = &resp.annual_earnings;
    let upcoming: Vec<_> = annual.iter().filter(|e| is_pending(&e.reported_eps)).collect();
    let history: Vec<_> = annual.iter().filter(|e| !is_pending(&e.reported_eps)).collect();

    let mut sections = vec![vec![format!("== Earnings Data for {} ==", symbol), String::new()]];

    if !upcoming.is_empty() {
        let mut section = vec!["== Upcoming Earnings Dates ==".to_string()];
        section.extend(
            upcoming
                .iter()
                .map(|e| format!("Fiscal Year Ending: {}", e.fiscal_date_ending)),
        );
        section.push(String::new());
        sections.push(section);
    }

    let mut yearly = vec!["== Annual Earnings ==".to_string()];
    if annual.is_empty() {
        yearly.push("No annual earnings data available".to_string());
    }
    for (i, e) in history.iter().enumerate() {
        let year: String = e.fiscal_date_ending.chars().take(4).collect();
        let growth = history.get(i + 1).and_then(|prev| {
            let current = number(&e.reported_eps)?;
            let previous = number(&prev.reported_eps)?;
            Some(if previous != 0.0 {
                (current - previous) / previous * 100.0
            } else {
                0.0
            })
        });
        yearly.push(match growth {
            Some(g) => format!("{}: ${} (YoY: {}%)", year, e.reported_eps, super::signed(g, 2)),
            None => format!("{}: ${}", year, e.reported_eps),
        });
    }
    sections.push(yearly);
    sections.push(vec![String::new()]);

    let mut quarterly = Vec::new();
    if resp.quarterly_earnings.is_empty() {
        quarterly.push("== Quarterly Earnings ==".to_string());
        quarterly.push("No quarterly earnings data available".to_string());
    } else {
        quarterly.push("== Quarterly Earnings (Last 8 Quarters) ==".to_string());
        let mut sorted: Vec<_> = resp.quarterly_earnings.iter().collect();
        sorted.sort_by(|a, b| b.fiscal_date_ending.cmp(&a.fiscal_date_ending));

        for q in sorted.into_iter().take(8) {
            let estimate = number(&q.estimated_eps).map(|_| q.estimated_eps.as_str());
            let outcome = match (number(&q.reported_eps), estimate.and_then(number)) {
                (Some(actual), Some(est)) if actual > est => "Beat",
                (Some(actual), Some(est)) if actual < est => "Missed",
                (Some(_), Some(_)) => "Met",
                _ => NA,
            };
            let surprise_pct = match number(&q.surprise_percentage) {
                Some(p) if p >= 0.0 => format!("+{}%", q.surprise_percentage.trim()),
                Some(_) => format!("{}%", q.surprise_percentage.trim()),
                None => NA.to_string(),
            };
            quarterly.push(format!(
                "{} (Reported: {}): Actual: ${} | Est: {} | {} by {} ({})",
                quarter(&q.fiscal_date_ending).unwrap_or_else(|| q.fiscal_date_ending.clone()),
                q.reported_date,
                q.reported_eps,
                estimate.unwrap_or(NA),
                outcome,
                signed_dollars(&q.surprise),
                surprise_pct
            ));
        }
    }
    sections.push(quarterly);

    if history.len() > 1 {
        let eps: Vec<f64> = history.iter().filter_map(|e| number(&e.reported_eps)).collect();
        let years = (history.len() - 1) as f64;
        let cagr = match (eps.first(), eps.last()) {
            (Some(latest), Some(first)) => {
                let rate = ((latest / first).powf(1.0 / years) - 1.0) * 100.0;
                rate.is_finite().then(|| format!("{:.2}%", rate))
            }
            _ => None,
        };
        let average = |n: usize| {
            let window = &eps[..eps.len().min(n)];
            if window.is_empty() {
                NA.to_string()
            } else {
                format!("${:.2}", window.iter().sum::<f64>() / window.len() as f64)
            }
        };

        sections.push(vec![String::new()]);
        sections.push(vec![
            "== Earnings Trends ==".to_string(),
            format!(
                "Average Annual EPS Growth Rate: {}",
                cagr.unwrap_or_else(|| NA.to_string())
            ),
            format!("3-Year Average EPS: {}", average(3)),
            format!("5-Year Average EPS: {}", average(5)),
            format!("Latest Annual EPS: ${}", history[0].reported_eps),
        ]);
    }

    join_sections(&sections, "\n")
}

/// Group calendar rows by month, months and rows in date order. Rows
/// without a parsable date are left out of the listing.
fn by_month<'a, T>(
    rows: &'a [T],
    date: impl Fn(&T) -> &str,
) -> BTreeMap<(i32, u32), Vec<&'a T>> {
    let mut months: BTreeMap<(i32, u32), Vec<&T>> = BTreeMap::new();
    for row in rows {
        if let Some(d) = parse_date(date(row)) {
            months.entry((d.year(), d.month())).or_default().push(row);
        }
    }
    for entries in months.values_mut() {
        entries.sort_by(|a, b| date(*a).cmp(date(*b)));
    }
    months
}

fn calendar<T>(
    title: &str,
    total_label: &str,
    rows: &[T],
    date: impl Fn(&T) -> &str,
    line: impl Fn(&T) -> String,
) -> String {
    let mut sections = vec![vec![
        format!("== {} ==", title),
        format!("{}: {}", total_label, rows.len()),
        String::new(),
    ]];

    for entries in by_month(rows, &date).values() {
        let heading = month_year(date(entries[0])).unwrap_or_default();
        let mut section = vec![format!("== {} ==", heading)];
        section.extend(entries.iter().map(|e| line(*e)));
        section.push(String::new());
        sections.push(section);
    }

    join_sections(&sections, "\n")
}

pub fn ipo_calendar(rows: &[IpoEntry]) -> String {
    if rows.is_empty() {
        return "No upcoming IPO data available or error parsing the response.".to_string();
    }

    calendar(
        "Upcoming IPO Calendar",
        "Total Upcoming IPOs",
        rows,
        |ipo| ipo.ipo_date.as_str(),
        |ipo| {
            let range = if ipo.price_range_low == "0" && ipo.price_range_high == "0" {
                "TBD".to_string()
            } else {
                format!("{}-{} {}", ipo.price_range_low, ipo.price_range_high, ipo.currency)
            };
            format!(
                "{} - {} - {} - {} - Price Range: {}",
                us_date(&ipo.ipo_date),
                ipo.symbol,
                ipo.name,
                ipo.exchange,
                range
            )
        },
    )
}

pub fn earnings_calendar(rows: &[EarningsCalendarEntry]) -> String {
    if rows.is_empty() {
        return "No upcoming earnings data available or error parsing the response.".to_string();
    }

    calendar(
        "Upcoming Earnings Calendar",
        "Total Upcoming Earnings Reports",
        rows,
        |entry| entry.report_date.as_str(),
        |entry| {
            let mut parts = vec![
                us_date(&entry.report_date),
                entry.symbol.clone(),
                or(entry.name.as_deref(), &entry.symbol).to_string(),
                match &entry.estimate {
                    Some(estimate) => format!("Estimate: ${}", estimate),
                    None => "No estimate available".to_string(),
                },
            ];
            if let Some(fiscal) = &entry.fiscal_date_ending {
                parts.push(format!("Fiscal Period: {}", fiscal));
            }
            parts.push(entry.currency.clone());
            parts.join(" - ")
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fundamental::Split;
    use serde_json::json;

    fn labeled(value: serde_json::Value) -> Labeled {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn overview_sections() {
        let overview = labeled(json!({
            "Symbol": "IBM",
            "Name": "International Business Machines",
            "MarketCapitalization": "170000000000",
            "ProfitMargin": "0.136",
            "DividendYield": "None",
            "52WeekHigh": "199.18",
            "AnalystRatingBuy": "7"
        }));

        let text = company_overview(&overview);
        assert!(text.starts_with("== Company Information: International Business Machines (IBM) ==\nAsset Type: Unknown"));
        assert!(text.contains("Market Cap: 170,000,000,000\nEBITDA: Unknown"));
        assert!(text.contains("Profit Margin: 13.60%"));
        assert!(text.contains("Dividend Yield: N/A"));
        assert!(text.contains("52-Week High: 199.18"));
        assert!(text.contains("\n\n\n== Key Financial Metrics =="));
        assert!(text.ends_with("Buy: 7\nHold: 0\nSell: 0\nStrong Sell: 0"));

        assert_eq!(company_overview(&Labeled::default()), "No company data available");
    }

    #[test]
    fn etf_profile_top_holdings() {
        let holdings: Vec<_> = (1..=12)
            .map(|i| json!({ "symbol": format!("H{}", i), "description": "", "weight": "0.01" }))
            .collect();
        let resp: EtfProfileResponse = serde_json::from_value(json!({
            "net_assets": "285000000000",
            "net_expense_ratio": "0.002",
            "portfolio_turnover": "0.08",
            "dividend_yield": "0.0057",
            "inception_date": "1999-03-10",
            "leveraged": "NO",
            "sectors": [{ "sector": "INFORMATION TECHNOLOGY", "weight": "0.507" }],
            "holdings": holdings
        }))
        .unwrap();

        let text = etf_profile(&resp, false);
        assert!(text.starts_with("== ETF Profile Overview ==\nNet Assets: $285,000,000,000\nExpense Ratio: 0.20%"));
        assert!(text.contains("== Sector Allocation ==\nINFORMATION TECHNOLOGY: 50.70%"));
        assert!(text.contains("10. H10 - N/A: 1.00%\n\nTotal Holdings: 12"));
        assert!(!text.contains("11. H11"));

        let all = etf_profile(&resp, true);
        assert!(all.contains("== All Holdings ==\n1. H1 - N/A: 1.00%"));
        assert!(all.ends_with("12. H12 - N/A: 1.00%"));
    }

    #[test]
    fn dividends_split_on_today() {
        let resp: DividendsResponse = serde_json::from_value(json!({
            "symbol": "IBM",
            "data": [
                { "ex_dividend_date": "2024-05-09", "declaration_date": "2024-04-30",
                  "record_date": "2024-05-10", "payment_date": "2024-06-10", "amount": "1.67" },
                { "ex_dividend_date": "2024-02-08", "declaration_date": "2024-01-30",
                  "record_date": "2024-02-09", "payment_date": "2024-03-09", "amount": "1.66" },
                { "ex_dividend_date": "2023-11-09", "declaration_date": "2023-10-31",
                  "record_date": "2023-11-10", "payment_date": "2023-12-09", "amount": "1.66" }
            ]
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

        assert_eq!(
            dividends(&resp, today, false),
            "== Dividend History for IBM ==\nTotal Records: 3\nAverage Dividend: $1.66\n\n\n\
             == Upcoming Dividends ==\nPayment Date: 2024-06-10 | Ex-Div Date: 2024-05-09 | Amount: $1.67\n\n\n\
             == Annual Dividend Totals ==\n2024: $1.66\n2023: $1.66\n\n\n\
             == Recent Dividend History ==\n\
             Payment: 2024-03-09 | Ex-Div: 2024-02-08 | Declared: 2024-01-30 | Amount: $1.66\n\
             Payment: 2023-12-09 | Ex-Div: 2023-11-09 | Declared: 2023-10-31 | Amount: $1.66"
        );
    }

    #[test]
    fn splits_forward_reverse_and_decades() {
        let resp = SplitsResponse {
            symbol: Some("XYZ".into()),
            data: vec![
                Split { effective_date: "1999-05-27".into(), split_factor: "2.0000".into() },
                Split { effective_date: "2021-01-04".into(), split_factor: "0.2500".into() },
                Split { effective_date: "1997-05-28".into(), split_factor: "2.0000".into() },
            ],
        };

        assert_eq!(
            splits(&resp),
            "== Stock Split History for XYZ ==\nTotal Split Events: 3\n\
             Cumulative Split Factor: 1.0000\n\
             (Original shares multiplied by 1.0000 equals current shares)\n\n\
             == All Stock Splits (Most Recent First) ==\n\
             2021-01-04: Reverse Split - 1:4 (factor: 0.2500)\n\
             1999-05-27: Forward Split - 2:1 (factor: 2.0000)\n\
             1997-05-28: Forward Split - 2:1 (factor: 2.0000)\n\n\
             == Splits By Decade ==\n2020s: 1 split\n1990s: 2 splits"
        );
    }

    #[test]
    fn income_statement_blocks() {
        let resp: StatementResponse = serde_json::from_value(json!({
            "symbol": "IBM",
            "annualReports": [
                { "fiscalDateEnding": "2023-12-31", "reportedCurrency": "USD",
                  "totalRevenue": "61860000000", "costOfRevenue": "27560000000",
                  "grossProfit": "34300000000", "researchAndDevelopment": "None" },
                { "fiscalDateEnding": "2022-12-31", "reportedCurrency": "USD",
                  "totalRevenue": "60530000000" }
            ]
        }))
        .unwrap();

        let text = statement(&resp, Statement::Income, ReportType::Annual, Some(1));
        assert!(text.starts_with(
            "== Annual Income Statement for IBM ==\nCurrency: USD\nPeriods: 2023\n\n\
             == Revenue and Gross Profit ==\n2023:\n  Total Revenue: $61,860.0M\n\
             \x20 Cost of Revenue: $27,560.0M (44.6% of revenue)"
        ));
        assert!(text.contains("  R&D: N/A (N/A of revenue)"));
        assert!(text.contains("\n\n== Operating Expenses ==\n2023:\n"));
        assert!(!text.contains("2022"));

        assert_eq!(
            statement(&resp, Statement::Income, ReportType::Quarterly, None),
            "No quarterly income statement data available"
        );
    }

    #[test]
    fn cash_flow_signs_and_metrics() {
        let resp: StatementResponse = serde_json::from_value(json!({
            "symbol": "IBM",
            "quarterlyReports": [{
                "fiscalDateEnding": "2024-03-31", "reportedCurrency": "USD",
                "operatingCashflow": "4200000000", "capitalExpenditures": "400000000",
                "netIncome": "1600000000", "dividendPayout": "1520000000",
                "cashflowFromInvestment": "-5000000000"
            }]
        }))
        .unwrap();

        let text = statement(&resp, Statement::CashFlow, ReportType::Quarterly, None);
        assert!(text.starts_with("== Quarterly Cash Flow Statement for IBM ==\nCurrency: USD\nPeriods: Q1 2024"));
        assert!(text.contains("Cash Flow from Investment: -$5,000.0M"));
        assert!(text.contains("Free Cash Flow (OCF - CapEx): +$3,800.0M"));
        assert!(text.contains("FCF to Net Income Ratio: 237.5%"));
        assert!(text.contains("Capital Expenditure to OCF: 9.5%"));
        assert!(text.contains("Stock Repurchase: N/A"));
    }

    #[test]
    fn balance_sheet_ratios() {
        let resp: StatementResponse = serde_json::from_value(json!({
            "symbol": "IBM",
            "annualReports": [{
                "fiscalDateEnding": "2023-12-31", "reportedCurrency": "USD",
                "totalAssets": "135241000000", "totalCurrentAssets": "32908000000",
                "totalCurrentLiabilities": "34122000000", "totalShareholderEquity": "22533000000",
                "shortLongTermDebtTotal": "56548000000", "commonStockSharesOutstanding": "916000000"
            }]
        }))
        .unwrap();

        let text = statement(&resp, Statement::Balance, ReportType::Annual, None);
        assert!(text.contains("  Total Assets: $135,241.0M\n\n  Current Assets: $32,908.0M (24.3% of total assets)"));
        assert!(text.contains("    - Shares Outstanding: 916,000,000"));
        assert!(text.contains("  Current Ratio: 0.96\n  Debt to Equity: 2.51\n  Debt to Assets: 0.42\n  Book Value per Share: $24.60"));
    }

    #[test]
    fn earnings_annual_and_quarterly() {
        let resp: EarningsResponse = serde_json::from_value(json!({
            "symbol": "IBM",
            "annualEarnings": [
                { "fiscalDateEnding": "2024-12-31", "reportedEPS": "0" },
                { "fiscalDateEnding": "2023-12-31", "reportedEPS": "9.61" },
                { "fiscalDateEnding": "2022-12-31", "reportedEPS": "9.13" }
            ],
            "quarterlyEarnings": [
                { "fiscalDateEnding": "2023-12-31", "reportedDate": "2024-01-24",
                  "reportedEPS": "3.87", "estimatedEPS": "3.78",
                  "surprise": "0.09", "surprisePercentage": "2.381" },
                { "fiscalDateEnding": "2024-03-31", "reportedDate": "2024-04-24",
                  "reportedEPS": "1.68", "estimatedEPS": "1.74",
                  "surprise": "-0.06", "surprisePercentage": "-3.4483" }
            ]
        }))
        .unwrap();

        let text = earnings(&resp);
        assert!(text.starts_with(
            "== Earnings Data for IBM ==\n\n== Upcoming Earnings Dates ==\n\
             Fiscal Year Ending: 2024-12-31\n\n== Annual Earnings ==\n\
             2023: $9.61 (YoY: +5.26%)\n2022: $9.13\n\n== Quarterly Earnings (Last 8 Quarters) ==\n\
             Q1 2024 (Reported: 2024-04-24): Actual: $1.68 | Est: 1.74 | Missed by -$0.06 (-3.4483%)\n\
             Q4 2023 (Reported: 2024-01-24): Actual: $3.87 | Est: 3.78 | Beat by +$0.09 (+2.381%)"
        ));
        assert!(text.contains("\n\n== Earnings Trends ==\nAverage Annual EPS Growth Rate: 5.26%"));
        assert!(text.contains("3-Year Average EPS: $9.37"));
        assert!(text.ends_with("Latest Annual EPS: $9.61"));
    }

    #[test]
    fn ipo_calendar_groups_by_month() {
        let rows = vec![
            IpoEntry {
                symbol: "BBB".into(),
                name: "Beta Corp".into(),
                ipo_date: "2024-05-02".into(),
                price_range_low: "0".into(),
                price_range_high: "0".into(),
                currency: "USD".into(),
                exchange: "NYSE".into(),
            },
            IpoEntry {
                symbol: "AAA".into(),
                name: "Alpha Inc".into(),
                ipo_date: "2024-04-18".into(),
                price_range_low: "14".into(),
                price_range_high: "16".into(),
                currency: "USD".into(),
                exchange: "NASDAQ".into(),
            },
        ];

        assert_eq!(
            ipo_calendar(&rows),
            "== Upcoming IPO Calendar ==\nTotal Upcoming IPOs: 2\n\n\
             == April 2024 ==\n4/18/2024 - AAA - Alpha Inc - NASDAQ - Price Range: 14-16 USD\n\n\
             == May 2024 ==\n5/2/2024 - BBB - Beta Corp - NYSE - Price Range: TBD\n"
        );
        assert_eq!(
            ipo_calendar(&[]),
            "No upcoming IPO data available or error parsing the response."
        );
    }

    #[test]
    fn earnings_calendar_lines() {
        let rows = vec![EarningsCalendarEntry {
            symbol: "IBM".into(),
            name: None,
            report_date: "2024-04-24".into(),
            fiscal_date_ending: None,
            estimate: Some("1.74".into()),
            currency: "USD".into(),
        }];

        assert!(earnings_calendar(&rows)
            .contains("== April 2024 ==\n4/24/2024 - IBM - IBM - Estimate: $1.74 - USD\n"));
    }
}
