use crate::{IndicatorSignal, Signal};

/// Threshold rule families. Rules that compare against a second series carry it inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleSet {
    /// > 70 overbought, < 30 oversold
    Rsi,
    /// MACD line above its signal line is bullish
    Macd { signal_line: Option<f64> },
    /// ADX: > 50 strong, (25, 50] moderate, else weak
    TrendStrength,
    /// ADX direction: only decided when ADX > 25, +DI above -DI is bullish
    TrendDirection { di_plus: Option<f64>, di_minus: Option<f64> },
    /// P/E: < 15 undervalued, [15, 25) fair, else overvalued
    PriceEarnings,
    /// Percentage ratios such as ROE or margins: > 15 good, (5, 15] caution, else poor
    HigherIsBetter,
    /// Leverage ratios such as debt/equity: < 0.5 good, [0.5, 1) caution, else poor
    LowerIsBetter,
    /// Williams %R on its [-100, 0] scale: > -20 overbought, < -80 oversold
    WilliamsR,
    /// CCI: > 100 overbought, < -100 oversold
    Cci,
    /// Stochastic %K: > 80 overbought, < 20 oversold
    Stochastic,
    /// Price against Bollinger bands
    Bands { upper: Option<f64>, lower: Option<f64> },
    /// Price against a moving average
    AboveAverage { average: Option<f64> },
}

impl RuleSet {
    /// Single-valued rule for a conventional indicator name
    pub fn for_indicator(name: &str) -> Option<RuleSet> {
        match name.to_lowercase().as_str() {
            "rsi" | "rsi_14" => Some(RuleSet::Rsi),
            "adx" => Some(RuleSet::TrendStrength),
            "pe" | "pe_ratio" | "p/e" => Some(RuleSet::PriceEarnings),
            "williams_r" | "williams %r" | "willr" => Some(RuleSet::WilliamsR),
            "cci" => Some(RuleSet::Cci),
            "stochastic" | "stoch_k" => Some(RuleSet::Stochastic),
            "roe" | "roce" | "roa" | "gross_margin" | "operating_margin" | "net_margin" => {
                Some(RuleSet::HigherIsBetter)
            }
            "debt_to_equity" => Some(RuleSet::LowerIsBetter),
            _ => None,
        }
    }

    /// Weight a signal from this rule carries
    pub fn default_weight(&self) -> u32 {
        match self {
            RuleSet::Macd { .. } | RuleSet::TrendDirection { .. } | RuleSet::PriceEarnings => 3,
            RuleSet::TrendStrength => 1,
            _ => 2,
        }
    }
}

fn two_sided(value: f64, overbought: f64, oversold: f64) -> Signal {
    if value > overbought {
        Signal::Overbought
    } else if value < oversold {
        Signal::Oversold
    } else {
        Signal::Neutral
    }
}

/// Map one indicator value to a qualitative signal. Absent inputs give `Unknown`.
pub fn classify(name: &str, value: Option<f64>, rules: &RuleSet) -> IndicatorSignal {
    let weight = rules.default_weight();
    let Some(v) = value else {
        return IndicatorSignal::unknown(name, weight);
    };

    let signal = match *rules {
        RuleSet::Rsi => two_sided(v, 70.0, 30.0),
        RuleSet::Macd { signal_line } => match signal_line {
            Some(line) if v > line => Signal::Bullish,
            Some(_) => Signal::Bearish,
            None => Signal::Unknown,
        },
        RuleSet::TrendStrength => {
            if v > 50.0 {
                Signal::StrongTrend
            } else if v > 25.0 {
                Signal::ModerateTrend
            } else {
                Signal::WeakTrend
            }
        }
        RuleSet::TrendDirection { di_plus, di_minus } => match (di_plus, di_minus) {
            (Some(plus), Some(minus)) if v > 25.0 => {
                if plus > minus {
                    Signal::Bullish
                } else {
                    Signal::Bearish
                }
            }
            (Some(_), Some(_)) => Signal::Neutral,
            _ => Signal::Unknown,
        },
        RuleSet::PriceEarnings => {
            // Negative earnings leave the valuation band undefined
            if v <= 0.0 {
                Signal::Unknown
            } else if v < 15.0 {
                Signal::Undervalued
            } else if v < 25.0 {
                Signal::FairValue
            } else {
                Signal::Overvalued
            }
        }
        RuleSet::HigherIsBetter => {
            if v > 15.0 {
                Signal::Good
            } else if v > 5.0 {
                Signal::Caution
            } else {
                Signal::Poor
            }
        }
        RuleSet::LowerIsBetter => {
            if v < 0.5 {
                Signal::Good
            } else if v < 1.0 {
                Signal::Caution
            } else {
                Signal::Poor
            }
        }
        RuleSet::WilliamsR => two_sided(v, -20.0, -80.0),
        RuleSet::Cci => two_sided(v, 100.0, -100.0),
        RuleSet::Stochastic => two_sided(v, 80.0, 20.0),
        RuleSet::Bands { upper, lower } => match (upper, lower) {
            (None, None) => Signal::Unknown,
            (upper, lower) => {
                if upper.map_or(false, |u| v > u) {
                    Signal::Overbought
                } else if lower.map_or(false, |l| v < l) {
                    Signal::Oversold
                } else {
                    Signal::Neutral
                }
            }
        },
        RuleSet::AboveAverage { average } => match average {
            Some(avg) if v > avg => Signal::Bullish,
            Some(avg) if v < avg => Signal::Bearish,
            Some(_) => Signal::Neutral,
            None => Signal::Unknown,
        },
    };

    IndicatorSignal::new(name, Some(v), signal, weight)
}

/// Classify by conventional indicator name; names without a single-valued rule give `Unknown`.
pub fn classify_value(name: &str, value: f64) -> IndicatorSignal {
    match RuleSet::for_indicator(name) {
        Some(rules) => classify(name, Some(value), &rules),
        None => {
            let mut signal = IndicatorSignal::unknown(name, 1);
            signal.raw_value = Some(value);
            signal
        }
    }
}
