use analysis_core::{
    classify, present_number, AggregateSentiment, AnalysisPayload, ChartPattern, IndicatorSignal,
    PatternType, RuleSet, Signal,
};
use serde::{Deserialize, Serialize};

use crate::aggregator::aggregate;

// Candidate paths per field; the backend nests some indicators and flattens others.
const RSI: &[&str] = &["rsi.rsi_14", "rsi.value", "rsi_14", "rsi"];
const MACD_LINE: &[&str] = &["macd.macd", "macd.value", "macd"];
const MACD_SIGNAL: &[&str] = &["macd.signal", "macd_signal"];
const ADX: &[&str] = &["adx.adx", "adx.value", "adx"];
const DI_PLUS: &[&str] = &["adx.di_plus", "adx.plus_di", "di_plus"];
const DI_MINUS: &[&str] = &["adx.di_minus", "adx.minus_di", "di_minus"];
const WILLIAMS_R: &[&str] = &["williams_r.williams_r", "williams_r.value", "williams_r"];
const CCI: &[&str] = &["cci.cci", "cci.cci_20", "cci.value", "cci"];
const STOCHASTIC: &[&str] = &["stochastic.k", "stochastic.stoch_k", "stoch_k", "stochastic"];
const BB_UPPER: &[&str] = &["bollinger_bands.upper", "bollinger.upper", "bb_upper"];
const BB_LOWER: &[&str] = &["bollinger_bands.lower", "bollinger.lower", "bb_lower"];
const PRICE: &[&str] = &["current_price", "close", "price"];

const MOVING_AVERAGES: &[(&str, &[&str])] = &[
    ("sma_20", &["sma_20", "moving_averages.sma_20", "sma.sma_20"]),
    ("sma_50", &["sma_50", "moving_averages.sma_50", "sma.sma_50"]),
    ("sma_200", &["sma_200", "moving_averages.sma_200", "sma.sma_200"]),
];

/// Technical view of one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    /// Directional indicator and pattern signals, in a fixed order
    pub signals: Vec<IndicatorSignal>,
    /// ADX trend strength; informative only, not part of the tally
    pub trend_strength: IndicatorSignal,
    pub sentiment: AggregateSentiment,
}

pub struct TechnicalAnalysisEngine;

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    fn field(payload: &AnalysisPayload, candidates: &[&str]) -> Option<f64> {
        present_number(payload.technical_field(candidates))
    }

    /// Current price, from the price block first and the technical block second
    fn current_price(payload: &AnalysisPayload) -> Option<f64> {
        present_number(payload.price("current_price")).or_else(|| Self::field(payload, PRICE))
    }

    /// Classify every indicator the technical block can carry. Absent indicators
    /// are returned as `Unknown` so the caller sees which were missing.
    pub fn indicator_signals(&self, payload: &AnalysisPayload) -> Vec<IndicatorSignal> {
        let mut signals = Vec::new();

        signals.push(classify("rsi", Self::field(payload, RSI), &RuleSet::Rsi));

        signals.push(classify(
            "macd",
            Self::field(payload, MACD_LINE),
            &RuleSet::Macd {
                signal_line: Self::field(payload, MACD_SIGNAL),
            },
        ));

        signals.push(classify(
            "adx_direction",
            Self::field(payload, ADX),
            &RuleSet::TrendDirection {
                di_plus: Self::field(payload, DI_PLUS),
                di_minus: Self::field(payload, DI_MINUS),
            },
        ));

        signals.push(classify("williams_r", Self::field(payload, WILLIAMS_R), &RuleSet::WilliamsR));
        signals.push(classify("cci", Self::field(payload, CCI), &RuleSet::Cci));
        signals.push(classify("stochastic", Self::field(payload, STOCHASTIC), &RuleSet::Stochastic));

        let price = Self::current_price(payload);
        signals.push(classify(
            "bollinger_bands",
            price,
            &RuleSet::Bands {
                upper: Self::field(payload, BB_UPPER),
                lower: Self::field(payload, BB_LOWER),
            },
        ));

        for (name, candidates) in MOVING_AVERAGES {
            signals.push(classify(
                name,
                price,
                &RuleSet::AboveAverage {
                    average: Self::field(payload, candidates),
                },
            ));
        }

        signals.extend(payload.patterns.iter().map(pattern_signal));

        for s in &signals {
            tracing::debug!(symbol = %payload.symbol, indicator = %s.name, value = ?s.raw_value, signal = ?s.signal, "classified indicator");
        }
        signals
    }

    pub fn trend_strength(&self, payload: &AnalysisPayload) -> IndicatorSignal {
        classify("adx", Self::field(payload, ADX), &RuleSet::TrendStrength)
    }

    pub fn analyze(&self, payload: &AnalysisPayload) -> TechnicalReport {
        let signals = self.indicator_signals(payload);
        let sentiment = aggregate(&signals);
        tracing::debug!(
            symbol = %payload.symbol,
            overall = ?sentiment.overall,
            confidence = sentiment.confidence,
            total = sentiment.total_signals,
            "technical sentiment"
        );
        TechnicalReport {
            signals,
            trend_strength: self.trend_strength(payload),
            sentiment,
        }
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Chart patterns vote with their reported direction, weighted by strength
pub fn pattern_signal(pattern: &ChartPattern) -> IndicatorSignal {
    let signal = match pattern.pattern_type {
        PatternType::Bullish => Signal::Bullish,
        PatternType::Bearish => Signal::Bearish,
        PatternType::Neutral => Signal::Neutral,
    };
    IndicatorSignal::new(
        pattern.pattern.clone(),
        pattern.confidence,
        signal,
        pattern.strength.weight(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{Direction, Tone};
    use serde_json::json;

    fn payload(technical: serde_json::Value, price: serde_json::Value) -> AnalysisPayload {
        serde_json::from_value(json!({
            "symbol": "AAPL",
            "market": "US",
            "technical": technical,
            "price_data": price,
            "patterns": [
                {"pattern": "Double Bottom", "type": "Bullish", "strength": "Strong", "confidence": 72.0},
                {"pattern": "Doji", "type": "Neutral", "strength": "Weak"}
            ]
        }))
        .unwrap()
    }

    fn find<'a>(signals: &'a [IndicatorSignal], name: &str) -> &'a IndicatorSignal {
        signals.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_nested_technical_block() {
        let p = payload(
            json!({
                "rsi": {"rsi_14": 25.0},
                "macd": {"macd": 1.2, "signal": 0.8, "histogram": 0.4},
                "adx": {"adx": 32.0, "di_plus": 28.0, "di_minus": 14.0},
                "bollinger_bands": {"upper": 190.0, "middle": 180.0, "lower": 170.0},
                "sma_20": 175.0, "sma_50": 182.0, "sma_200": "N/A"
            }),
            json!({"current_price": 178.0}),
        );
        let engine = TechnicalAnalysisEngine::new();
        let signals = engine.indicator_signals(&p);

        assert_eq!(find(&signals, "rsi").signal, Signal::Oversold);
        assert_eq!(find(&signals, "macd").signal, Signal::Bullish);
        assert_eq!(find(&signals, "adx_direction").signal, Signal::Bullish);
        assert_eq!(find(&signals, "bollinger_bands").signal, Signal::Neutral);
        assert_eq!(find(&signals, "sma_20").signal, Signal::Bullish);
        assert_eq!(find(&signals, "sma_50").signal, Signal::Bearish);
        assert_eq!(find(&signals, "sma_200").signal, Signal::Unknown);
        assert_eq!(find(&signals, "cci").signal, Signal::Unknown);

        let pattern = find(&signals, "Double Bottom");
        assert_eq!(pattern.weight, 3);
        assert_eq!(pattern.tone, Tone::Success);
        assert_eq!(find(&signals, "rsi").tone, Tone::Success);
        assert_eq!(pattern.raw_value, Some(72.0));

        assert_eq!(engine.trend_strength(&p).signal, Signal::ModerateTrend);
    }

    #[test]
    fn test_flat_technical_block() {
        let p = payload(
            json!({"rsi": 75.5, "adx": 55.0, "macd": {"macd": 0.5}}),
            json!({}),
        );
        let engine = TechnicalAnalysisEngine::new();
        let report = engine.analyze(&p);

        assert_eq!(find(&report.signals, "rsi").signal, Signal::Overbought);
        // Signal line missing
        assert_eq!(find(&report.signals, "macd").signal, Signal::Unknown);
        // No +DI/-DI
        assert_eq!(find(&report.signals, "adx_direction").signal, Signal::Unknown);
        assert_eq!(report.trend_strength.signal, Signal::StrongTrend);
    }

    #[test]
    fn test_report_tally() {
        let p = payload(
            json!({
                "rsi": 80.0,
                "macd": {"macd": -0.3, "signal": 0.1},
                "cci": -150.0
            }),
            json!({}),
        );
        let report = TechnicalAnalysisEngine::new().analyze(&p);
        // Overbought RSI, bearish MACD, oversold CCI, bullish pattern, neutral pattern
        assert_eq!(report.sentiment.bearish_count, 2);
        assert_eq!(report.sentiment.bullish_count, 2);
        assert_eq!(report.sentiment.neutral_count, 1);
        assert_eq!(report.sentiment.total_signals, 5);
        assert_eq!(report.sentiment.overall, Direction::Neutral);
        assert_eq!(report.sentiment.confidence, 0);
    }
}
