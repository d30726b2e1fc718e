use analysis_core::{
    as_percent, classify, normalize, normalize_field, present_number, AnalysisPayload,
    HealthCategory, HealthRating, IndicatorSignal, NormalizedValue, RuleSet, Scorecard, ValueKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod profile;
pub use profile::{
    driving_metric, field_path_for, profile_for, weights_for, MarketProfile, MetricKey,
};

/// Ratio signals reported alongside the health score: (metric, signal name, rule, percentage-scaled)
const RATIO_RULES: &[(MetricKey, &str, RuleSet, bool)] = &[
    (MetricKey::PriceEarnings, "pe_ratio", RuleSet::PriceEarnings, false),
    (MetricKey::ReturnOnEquity, "roe", RuleSet::HigherIsBetter, true),
    (MetricKey::ReturnOnCapital, "roce", RuleSet::HigherIsBetter, true),
    (MetricKey::ReturnOnAssets, "roa", RuleSet::HigherIsBetter, true),
    (MetricKey::GrossMargin, "gross_margin", RuleSet::HigherIsBetter, true),
    (MetricKey::OperatingMargin, "operating_margin", RuleSet::HigherIsBetter, true),
    (MetricKey::NetMargin, "net_margin", RuleSet::HigherIsBetter, true),
    (MetricKey::DebtToEquity, "debt_to_equity", RuleSet::LowerIsBetter, false),
];

/// One labelled figure for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub key: MetricKey,
    pub label: String,
    pub value: NormalizedValue,
    /// Formatted value with the market's currency symbol where applicable, "N/A" when absent
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalReport {
    pub scorecard: Scorecard,
    pub signals: Vec<IndicatorSignal>,
    pub key_metrics: Vec<KeyMetric>,
}

pub struct FundamentalAnalysisEngine;

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Debt/equity from the balance sheet when the ratio itself is not reported
    fn derived_debt_to_equity(&self, payload: &AnalysisPayload) -> Option<f64> {
        let debt = self.reported(payload, MetricKey::TotalDebt)?;
        let equity = self.reported(payload, MetricKey::TotalEquity)?;
        if equity > 0.0 {
            Some(debt / equity)
        } else {
            None
        }
    }

    fn reported(&self, payload: &AnalysisPayload, key: MetricKey) -> Option<f64> {
        let path = profile_for(payload.market).field_path(key)?;
        present_number(payload.fundamental(path))
    }

    /// Present value of a metric for the payload's market
    pub fn metric(&self, payload: &AnalysisPayload, key: MetricKey) -> Option<f64> {
        match self.reported(payload, key) {
            Some(v) => Some(v),
            None if key == MetricKey::DebtToEquity => self.derived_debt_to_equity(payload),
            None => None,
        }
    }

    /// Normalized display value of a metric
    pub fn metric_value(&self, payload: &AnalysisPayload, key: MetricKey) -> NormalizedValue {
        let kind = key.kind();
        let profile = profile_for(payload.market);
        let raw = profile.field_path(key).and_then(|path| payload.fundamental(path));
        let value = normalize_field(raw, kind);
        if !value.present && key == MetricKey::DebtToEquity {
            if let Some(derived) = self.derived_debt_to_equity(payload) {
                return normalize(&Value::from(derived), kind);
            }
        }
        value
    }

    /// Achievement bucket (0, 1] for a category whose driving field is present
    fn bucket_fraction(&self, payload: &AnalysisPayload, category: HealthCategory, value: f64) -> f64 {
        match category {
            // Revenue presence earns full credit unless a growth figure says otherwise
            HealthCategory::RevenueGrowth => match self.metric(payload, MetricKey::RevenueGrowth) {
                None => 1.0,
                Some(growth) => {
                    let g = as_percent(growth);
                    if g > 10.0 {
                        1.0
                    } else if g > 0.0 {
                        0.75
                    } else if g > -5.0 {
                        0.5
                    } else {
                        0.25
                    }
                }
            },
            HealthCategory::ReturnOnEquity => {
                let roe = as_percent(value);
                if roe > 15.0 {
                    1.0
                } else if roe > 10.0 {
                    0.75
                } else if roe > 5.0 {
                    0.5
                } else {
                    0.2
                }
            }
            HealthCategory::CurrentRatio => {
                if value >= 2.0 {
                    1.0
                } else if value >= 1.5 {
                    0.75
                } else if value >= 1.0 {
                    0.5
                } else {
                    0.15
                }
            }
            HealthCategory::DebtToEquity => {
                if value < 0.5 {
                    1.0
                } else if value < 1.0 {
                    0.7
                } else if value < 2.0 {
                    0.5
                } else {
                    0.2
                }
            }
        }
    }

    /// Weighted composite health score. Categories whose driving field is absent
    /// drop out of both numerator and denominator.
    pub fn score(&self, payload: &AnalysisPayload) -> Scorecard {
        let profile = profile_for(payload.market);
        let mut achieved_weight = 0.0;
        let mut available_weight = 0.0;
        let mut sub_scores = BTreeMap::new();

        for &(category, weight) in profile.weights {
            let Some(value) = self.metric(payload, driving_metric(category)) else {
                tracing::debug!(symbol = %payload.symbol, ?category, "driving field absent, category skipped");
                continue;
            };
            let fraction = self.bucket_fraction(payload, category, value);
            achieved_weight += weight * fraction;
            available_weight += weight;
            sub_scores.insert(category, (fraction * 100.0).round() as u32);
            tracing::debug!(symbol = %payload.symbol, ?category, value, fraction, "category scored");
        }

        let composite_score = if available_weight > 0.0 {
            (100.0 * achieved_weight / available_weight).round().clamp(0.0, 100.0) as u32
        } else {
            0
        };

        Scorecard {
            composite_score,
            rating: HealthRating::from_score(composite_score),
            sub_scores,
        }
    }

    /// Classified fundamental ratios available in the payload's market profile
    pub fn ratio_signals(&self, payload: &AnalysisPayload) -> Vec<IndicatorSignal> {
        let profile = profile_for(payload.market);
        RATIO_RULES
            .iter()
            .filter(|(key, _, _, _)| {
                profile.field_path(*key).is_some()
                    || (*key == MetricKey::DebtToEquity
                        && profile.field_path(MetricKey::TotalDebt).is_some())
            })
            .map(|(key, name, rules, percent)| {
                let value = self
                    .metric(payload, *key)
                    .map(|v| if *percent { as_percent(v) } else { v });
                classify(name, value, rules)
            })
            .collect()
    }

    pub fn key_metrics(&self, payload: &AnalysisPayload) -> Vec<KeyMetric> {
        let profile = profile_for(payload.market);
        profile
            .key_metrics
            .iter()
            .map(|&key| {
                let value = self.metric_value(payload, key);
                let display = match (&value.value, value.kind) {
                    (Some(v), ValueKind::Currency) => format!("{}{}", profile.currency_symbol, v),
                    (Some(v), _) => v.clone(),
                    (None, _) => value.display().to_string(),
                };
                KeyMetric {
                    key,
                    label: key.label().to_string(),
                    value,
                    display,
                }
            })
            .collect()
    }

    pub fn analyze(&self, payload: &AnalysisPayload) -> FundamentalReport {
        FundamentalReport {
            scorecard: self.score(payload),
            signals: self.ratio_signals(payload),
            key_metrics: self.key_metrics(payload),
        }
    }
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
