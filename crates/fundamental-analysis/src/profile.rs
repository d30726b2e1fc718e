//! Market profiles: where each metric lives in a market's fundamentals block,
//! and how much each health category weighs for that market.
//!
//! US and Indian payloads come from different providers with different field
//! names and reporting conventions. The scoring algorithm is shared; only the
//! data in these tables differs.

use analysis_core::{HealthCategory, Market, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Revenue,
    RevenueGrowth,
    NetIncome,
    Eps,
    GrossMargin,
    OperatingMargin,
    NetMargin,
    ReturnOnEquity,
    ReturnOnCapital,
    ReturnOnAssets,
    CurrentRatio,
    QuickRatio,
    DebtToEquity,
    TotalDebt,
    TotalEquity,
    PriceEarnings,
    PriceToBook,
    BookValue,
    DividendYield,
    MarketCap,
    FreeCashFlow,
}

impl MetricKey {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Revenue => "Revenue",
            MetricKey::RevenueGrowth => "Revenue Growth",
            MetricKey::NetIncome => "Net Income",
            MetricKey::Eps => "EPS",
            MetricKey::GrossMargin => "Gross Profit Margin",
            MetricKey::OperatingMargin => "Operating Margin",
            MetricKey::NetMargin => "Net Margin",
            MetricKey::ReturnOnEquity => "ROE",
            MetricKey::ReturnOnCapital => "ROCE",
            MetricKey::ReturnOnAssets => "ROA",
            MetricKey::CurrentRatio => "Current Ratio",
            MetricKey::QuickRatio => "Quick Ratio",
            MetricKey::DebtToEquity => "Debt to Equity",
            MetricKey::TotalDebt => "Total Debt",
            MetricKey::TotalEquity => "Total Equity",
            MetricKey::PriceEarnings => "P/E Ratio",
            MetricKey::PriceToBook => "P/B Ratio",
            MetricKey::BookValue => "Book Value",
            MetricKey::DividendYield => "Dividend Yield",
            MetricKey::MarketCap => "Market Cap",
            MetricKey::FreeCashFlow => "Free Cash Flow",
        }
    }

    /// How the metric is displayed
    pub fn kind(&self) -> ValueKind {
        match self {
            MetricKey::Revenue
            | MetricKey::NetIncome
            | MetricKey::Eps
            | MetricKey::TotalDebt
            | MetricKey::TotalEquity
            | MetricKey::BookValue
            | MetricKey::MarketCap
            | MetricKey::FreeCashFlow => ValueKind::Currency,
            MetricKey::RevenueGrowth
            | MetricKey::GrossMargin
            | MetricKey::OperatingMargin
            | MetricKey::NetMargin
            | MetricKey::ReturnOnEquity
            | MetricKey::ReturnOnCapital
            | MetricKey::ReturnOnAssets
            | MetricKey::DividendYield => ValueKind::Percentage,
            MetricKey::CurrentRatio
            | MetricKey::QuickRatio
            | MetricKey::DebtToEquity
            | MetricKey::PriceEarnings
            | MetricKey::PriceToBook => ValueKind::Numeric,
        }
    }
}

/// Metric whose presence decides whether a category is evaluated at all
pub fn driving_metric(category: HealthCategory) -> MetricKey {
    match category {
        HealthCategory::RevenueGrowth => MetricKey::Revenue,
        HealthCategory::ReturnOnEquity => MetricKey::ReturnOnEquity,
        HealthCategory::CurrentRatio => MetricKey::CurrentRatio,
        HealthCategory::DebtToEquity => MetricKey::DebtToEquity,
    }
}

#[derive(Debug)]
pub struct MarketProfile {
    pub market: Market,
    pub currency_symbol: &'static str,
    /// Category weights in percent; they sum to 100
    pub weights: &'static [(HealthCategory, f64)],
    pub fields: &'static [(MetricKey, &'static str)],
    /// Metrics shown as key figures, in display order
    pub key_metrics: &'static [MetricKey],
}

impl MarketProfile {
    pub fn field_path(&self, key: MetricKey) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, path)| *path)
    }

    pub fn weight(&self, category: HealthCategory) -> Option<f64> {
        self.weights
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, w)| *w)
    }
}

static US_PROFILE: MarketProfile = MarketProfile {
    market: Market::US,
    currency_symbol: "$",
    weights: &[
        (HealthCategory::RevenueGrowth, 25.0),
        (HealthCategory::ReturnOnEquity, 35.0),
        (HealthCategory::CurrentRatio, 40.0),
    ],
    fields: &[
        (MetricKey::Revenue, "income_statement.revenue"),
        (MetricKey::RevenueGrowth, "income_statement.revenueGrowth"),
        (MetricKey::NetIncome, "income_statement.netIncome"),
        (MetricKey::Eps, "income_statement.eps"),
        (MetricKey::GrossMargin, "income_statement.grossProfitRatio"),
        (MetricKey::OperatingMargin, "income_statement.operatingIncomeRatio"),
        (MetricKey::NetMargin, "income_statement.netIncomeRatio"),
        (MetricKey::ReturnOnEquity, "ratios.returnOnEquity"),
        (MetricKey::ReturnOnAssets, "ratios.returnOnTangibleAssets"),
        (MetricKey::CurrentRatio, "ratios.currentRatio"),
        (MetricKey::QuickRatio, "ratios.quickRatio"),
        (MetricKey::DebtToEquity, "ratios.debtEquityRatio"),
        (MetricKey::TotalDebt, "balance_sheet.totalDebt"),
        (MetricKey::TotalEquity, "balance_sheet.totalStockholdersEquity"),
        (MetricKey::PriceEarnings, "ratios.priceEarningsRatio"),
        (MetricKey::PriceToBook, "ratios.priceToBookRatio"),
        (MetricKey::DividendYield, "ratios.dividendYield"),
        (MetricKey::FreeCashFlow, "cash_flow.freeCashFlow"),
    ],
    key_metrics: &[
        MetricKey::Revenue,
        MetricKey::NetIncome,
        MetricKey::GrossMargin,
        MetricKey::OperatingMargin,
        MetricKey::TotalDebt,
        MetricKey::TotalEquity,
        MetricKey::PriceEarnings,
        MetricKey::PriceToBook,
        MetricKey::Eps,
        MetricKey::FreeCashFlow,
    ],
};

static INDIAN_PROFILE: MarketProfile = MarketProfile {
    market: Market::Indian,
    currency_symbol: "₹",
    weights: &[
        (HealthCategory::ReturnOnEquity, 40.0),
        (HealthCategory::CurrentRatio, 30.0),
        (HealthCategory::DebtToEquity, 30.0),
    ],
    fields: &[
        (MetricKey::Revenue, "annual_financials.revenue"),
        (MetricKey::NetIncome, "annual_financials.net_profit"),
        (MetricKey::ReturnOnEquity, "key_ratios.roe"),
        (MetricKey::ReturnOnCapital, "key_ratios.roce"),
        (MetricKey::CurrentRatio, "key_ratios.current_ratio"),
        (MetricKey::DebtToEquity, "key_ratios.debt_to_equity"),
        (MetricKey::PriceEarnings, "key_ratios.pe_ratio"),
        (MetricKey::PriceToBook, "key_ratios.price_to_book"),
        (MetricKey::BookValue, "key_ratios.book_value"),
        (MetricKey::DividendYield, "key_ratios.dividend_yield"),
        (MetricKey::MarketCap, "key_ratios.market_cap"),
    ],
    key_metrics: &[
        MetricKey::PriceEarnings,
        MetricKey::BookValue,
        MetricKey::ReturnOnEquity,
        MetricKey::ReturnOnCapital,
        MetricKey::DebtToEquity,
        MetricKey::DividendYield,
        MetricKey::MarketCap,
        MetricKey::PriceToBook,
    ],
};

pub fn profile_for(market: Market) -> &'static MarketProfile {
    match market {
        Market::US => &US_PROFILE,
        Market::Indian => &INDIAN_PROFILE,
    }
}

/// Category weights for a market, in percent
pub fn weights_for(market: Market) -> BTreeMap<HealthCategory, f64> {
    profile_for(market).weights.iter().copied().collect()
}

pub fn field_path_for(market: Market, key: MetricKey) -> Option<&'static str> {
    profile_for(market).field_path(key)
}
