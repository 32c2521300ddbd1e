//! Technical indicators, one tool per indicator family.
//!
//! The indicator enum names the provider function; everything else the
//! caller supplies is forwarded as-is, and `limit` only trims the output.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::AlphaVantageServer;
use crate::api::technical::{
    CycleIndicator, IndicatorInterval, MomentumIndicator, MovingAverage, SeriesType,
    TechnicalResponse, VolatilityIndicator, VolumeIndicator,
};
use crate::format::technical;
use crate::query::Query;

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MovingAverageParams {
    /// The type of moving average to calculate
    pub ma_type: MovingAverage,
    /// The stock or forex symbol (e.g., IBM, MSFT, USDEUR)
    pub symbol: String,
    /// Time interval between data points
    pub interval: IndicatorInterval,
    /// Number of data points used for calculation (required for most MA types)
    pub time_period: Option<u32>,
    /// The price series to use for calculations (default: close)
    pub series_type: Option<SeriesType>,
    /// Upper limit used in the adaptive algorithm (for MAMA only, default: 0.5)
    pub fastlimit: Option<f64>,
    /// Lower limit used in the adaptive algorithm (for MAMA only, default: 0.05)
    pub slowlimit: Option<f64>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MomentumParams {
    /// The type of momentum indicator to calculate
    pub indicator_type: MomentumIndicator,
    /// The stock or forex symbol (e.g., IBM, MSFT, USDEUR)
    pub symbol: String,
    /// Time interval between data points
    pub interval: IndicatorInterval,
    /// Number of data points used for calculation (required for most indicators)
    pub time_period: Option<u32>,
    /// The price series to use for calculations (default: close)
    pub series_type: Option<SeriesType>,
    /// Fast period (default: 12)
    pub fastperiod: Option<u32>,
    /// Slow period (default: 26)
    pub slowperiod: Option<u32>,
    /// Signal period (default: 9)
    pub signalperiod: Option<u32>,
    /// Fast MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA, 4=TEMA, 5=TRIMA)
    pub fastmatype: Option<u8>,
    /// Slow MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA, 4=TEMA, 5=TRIMA)
    pub slowmatype: Option<u8>,
    /// Signal MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA, 4=TEMA, 5=TRIMA)
    pub signalmatype: Option<u8>,
    /// Fast K period (default: 5)
    pub fastkperiod: Option<u32>,
    /// Slow K period (default: 3)
    pub slowkperiod: Option<u32>,
    /// Slow D period (default: 3)
    pub slowdperiod: Option<u32>,
    /// Slow K MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA)
    pub slowkmatype: Option<u8>,
    /// Slow D MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA)
    pub slowdmatype: Option<u8>,
    /// Fast D period (default: 3)
    pub fastdperiod: Option<u32>,
    /// Fast D MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA)
    pub fastdmatype: Option<u8>,
    /// MA type (0=SMA, 1=EMA, 2=WMA, 3=DEMA, 4=TEMA, 5=TRIMA)
    pub matype: Option<u8>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VolatilityParams {
    /// The type of volatility indicator to calculate
    pub indicator_type: VolatilityIndicator,
    /// The stock or forex symbol (e.g., IBM, MSFT, USDEUR)
    pub symbol: String,
    /// Time interval between data points
    pub interval: IndicatorInterval,
    /// The price series to use for calculations (default: close)
    pub series_type: Option<SeriesType>,
    /// Number of data points for calculation (required for BBANDS, MIDPOINT, MIDPRICE, ATR, NATR)
    pub time_period: Option<u32>,
    /// Standard deviations above the middle band (default: 2)
    pub nbdevup: Option<u32>,
    /// Standard deviations below the middle band (default: 2)
    pub nbdevdn: Option<u32>,
    /// MA type for the middle band (0=SMA, 1=EMA, 2=WMA, 3=DEMA, 4=TEMA, 5=TRIMA)
    pub matype: Option<u8>,
    /// Acceleration factor (default: 0.02)
    pub acceleration: Option<f64>,
    /// Maximum acceleration factor (default: 0.2)
    pub maximum: Option<f64>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VolumeParams {
    /// The type of volume indicator to calculate
    pub indicator_type: VolumeIndicator,
    /// The stock or forex symbol (e.g., IBM, MSFT, USDEUR)
    pub symbol: String,
    /// Time interval between data points
    pub interval: IndicatorInterval,
    /// Fast period (default: 3)
    pub fastperiod: Option<u32>,
    /// Slow period (default: 10)
    pub slowperiod: Option<u32>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CycleParams {
    /// The type of Hilbert Transform cycle indicator to calculate
    pub indicator_type: CycleIndicator,
    /// The stock or forex symbol (e.g., IBM, MSFT, USDEUR)
    pub symbol: String,
    /// Time interval between data points
    pub interval: IndicatorInterval,
    /// The price series to use for calculations (default: close)
    pub series_type: Option<SeriesType>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

/// Query shared by every indicator: function, symbol and interval.
fn base_query(function: &str, symbol: &str, interval: IndicatorInterval) -> Query {
    Query::new(function)
        .param("symbol", symbol)
        .param("interval", interval)
}

impl AlphaVantageServer {
    async fn indicator_table(
        &self,
        function: &'static str,
        query: Query,
        limit: Option<usize>,
    ) -> Result<CallToolResult, McpError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let failure = format!("Error: Failed to fetch {} data.", function);
        self.render_json(query, &failure, |resp: TechnicalResponse| {
            technical::indicator(&resp, function, limit)
        })
        .await
    }
}

#[tool_router(router = technical_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-moving-average",
        description = "Get various types of moving averages (SMA, EMA, WMA, DEMA, TEMA, TRIMA, KAMA, MAMA, VWAP, T3)"
    )]
    pub async fn moving_average(
        &self,
        Parameters(p): Parameters<MovingAverageParams>,
    ) -> Result<CallToolResult, McpError> {
        let function = p.ma_type.as_str();
        let query = base_query(function, &p.symbol, p.interval)
            .opt("time_period", p.time_period)
            .opt("series_type", p.series_type)
            .opt("fastlimit", p.fastlimit)
            .opt("slowlimit", p.slowlimit);
        self.indicator_table(function, query, p.limit).await
    }

    #[tool(
        name = "get-momentum-indicator",
        description = "Get momentum indicators (MACD, MACDEXT, STOCH, STOCHF, RSI, STOCHRSI, WILLR, ADX, ADXR, APO, PPO, MOM, BOP, CCI, CMO, ROC, ROCR)"
    )]
    pub async fn momentum_indicator(
        &self,
        Parameters(p): Parameters<MomentumParams>,
    ) -> Result<CallToolResult, McpError> {
        let function = p.indicator_type.as_str();
        let query = base_query(function, &p.symbol, p.interval)
            .opt("time_period", p.time_period)
            .opt("series_type", p.series_type)
            .opt("fastperiod", p.fastperiod)
            .opt("slowperiod", p.slowperiod)
            .opt("signalperiod", p.signalperiod)
            .opt("fastmatype", p.fastmatype)
            .opt("slowmatype", p.slowmatype)
            .opt("signalmatype", p.signalmatype)
            .opt("fastkperiod", p.fastkperiod)
            .opt("slowkperiod", p.slowkperiod)
            .opt("slowdperiod", p.slowdperiod)
            .opt("slowkmatype", p.slowkmatype)
            .opt("slowdmatype", p.slowdmatype)
            .opt("fastdperiod", p.fastdperiod)
            .opt("fastdmatype", p.fastdmatype)
            .opt("matype", p.matype);
        self.indicator_table(function, query, p.limit).await
    }

    #[tool(
        name = "get-volatility-indicator",
        description = "Get volatility indicators (BBANDS, MIDPOINT, MIDPRICE, SAR, TRANGE, ATR, NATR)"
    )]
    pub async fn volatility_indicator(
        &self,
        Parameters(p): Parameters<VolatilityParams>,
    ) -> Result<CallToolResult, McpError> {
        let function = p.indicator_type.as_str();
        let query = base_query(function, &p.symbol, p.interval)
            .opt("series_type", p.series_type)
            .opt("time_period", p.time_period)
            .opt("nbdevup", p.nbdevup)
            .opt("nbdevdn", p.nbdevdn)
            .opt("matype", p.matype)
            .opt("acceleration", p.acceleration)
            .opt("maximum", p.maximum);
        self.indicator_table(function, query, p.limit).await
    }

    #[tool(
        name = "get-volume-indicator",
        description = "Get volume indicators (AD, ADOSC, OBV)"
    )]
    pub async fn volume_indicator(
        &self,
        Parameters(p): Parameters<VolumeParams>,
    ) -> Result<CallToolResult, McpError> {
        let function = p.indicator_type.as_str();
        let query = base_query(function, &p.symbol, p.interval)
            .opt("fastperiod", p.fastperiod)
            .opt("slowperiod", p.slowperiod);
        self.indicator_table(function, query, p.limit).await
    }

    #[tool(
        name = "get-cycle-indicator",
        description = "Get Hilbert Transform cycle indicators (HT_TRENDLINE, HT_SINE, HT_TRENDMODE, HT_DCPERIOD, HT_DCPHASE, HT_PHASOR)"
    )]
    pub async fn cycle_indicator(
        &self,
        Parameters(p): Parameters<CycleParams>,
    ) -> Result<CallToolResult, McpError> {
        let function = p.indicator_type.as_str();
        let query = base_query(function, &p.symbol, p.interval).opt("series_type", p.series_type);
        self.indicator_table(function, query, p.limit).await
    }
}
