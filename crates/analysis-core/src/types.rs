use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{parse_numeric, AnalysisError};

/// Market an instrument is listed on. Selects the market profile used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "US", alias = "us", alias = "USA")]
    US,
    #[serde(rename = "Indian", alias = "India", alias = "indian", alias = "IN")]
    Indian,
}

impl Market {
    pub fn label(&self) -> &'static str {
        match self {
            Market::US => "US",
            Market::Indian => "Indian",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Market {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" => Ok(Market::US),
            "indian" | "india" | "in" => Ok(Market::Indian),
            other => Err(AnalysisError::InvalidData(format!("unknown market '{}'", other))),
        }
    }
}

/// Direction of a detected chart pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternType {
    Bullish,
    Bearish,
    #[serde(other)]
    #[default]
    Neutral,
}

/// Unrecognized strengths count as `Weak`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternStrength {
    Medium,
    Strong,
    #[serde(other)]
    #[default]
    Weak,
}

impl PatternStrength {
    /// Signal weight carried by a pattern of this strength
    pub fn weight(&self) -> u32 {
        match self {
            PatternStrength::Weak => 1,
            PatternStrength::Medium => 2,
            PatternStrength::Strong => 3,
        }
    }
}

/// Chart pattern as reported by the analysis backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPattern {
    #[serde(default, deserialize_with = "lenient_text")]
    pub pattern: String,
    #[serde(rename = "type", default)]
    pub pattern_type: PatternType,
    #[serde(default)]
    pub strength: PatternStrength,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>, // 0 to 100
}

/// AI commentary block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default, deserialize_with = "lenient_string")]
    pub analysis: Option<String>,
    /// Generation time as sent; see [`AiAnalysis::generated_at`]
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

impl AiAnalysis {
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.timestamp.as_deref()?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(default, deserialize_with = "lenient_count")]
    pub positive: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub negative: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub neutral: u32,
}

impl SentimentCounts {
    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, alias = "site", deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, alias = "publishedDate", deserialize_with = "lenient_string")]
    pub published_date: Option<String>,
    /// Per-article label when the backend already classified it
    #[serde(default, deserialize_with = "lenient_string")]
    pub sentiment: Option<String>,
}

impl NewsArticle {
    /// Body text, preferring the full text over the summary
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().or(self.summary.as_deref())
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.published_date.as_deref()?)
    }
}

/// News block: aggregate counts plus the article list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsBlock {
    #[serde(default, deserialize_with = "lenient_string")]
    pub overall_sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient_counts")]
    pub sentiment_counts: Option<SentimentCounts>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<NewsArticle>,
}

/// Immutable snapshot of everything the backend returned for one symbol/market pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub symbol: String,
    pub market: Market,
    /// Named ratio groups -> field -> value
    #[serde(default)]
    pub fundamentals: Value,
    /// Indicator name -> sub-fields (or a bare number)
    #[serde(default, alias = "technical_analysis")]
    pub technical: Value,
    #[serde(default, alias = "chart_patterns", deserialize_with = "null_as_default")]
    pub patterns: Vec<ChartPattern>,
    #[serde(default)]
    pub price_data: Value,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
    #[serde(default, alias = "news_sentiment")]
    pub news: Option<NewsBlock>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Leaf decoders below never fail: a malformed leaf reads as missing.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(parse_numeric(&Value::deserialize(deserializer)?))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(lenient_number(deserializer)?
        .filter(|v| *v >= 0.0)
        .map(|v| v.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

fn lenient_counts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SentimentCounts>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Object(_) => serde_json::from_value(raw).ok(),
        _ => None,
    })
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (fractional
/// seconds allowed) read as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Resolve a dotted path (`ratios.returnOnEquity`) inside a nested JSON mapping.
/// JSON `null` resolves to `None`.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

impl AnalysisPayload {
    pub fn from_json(raw: &str) -> Result<Self, AnalysisError> {
        let payload: AnalysisPayload = serde_json::from_str(raw)?;
        if payload.symbol.trim().is_empty() {
            return Err(AnalysisError::InvalidData("payload has an empty symbol".to_string()));
        }
        Ok(payload)
    }

    /// Free-form AI text; empty when the backend produced none
    pub fn ai_text(&self) -> &str {
        self.ai_analysis
            .as_ref()
            .and_then(|a| a.analysis.as_deref())
            .unwrap_or("")
    }

    pub fn fundamental(&self, path: &str) -> Option<&Value> {
        lookup(&self.fundamentals, path)
    }

    /// First candidate path present in the technical block.
    /// Indicators arrive either nested (`rsi.rsi_14`) or flat (`rsi`).
    pub fn technical_field(&self, candidates: &[&str]) -> Option<&Value> {
        candidates
            .iter()
            .find_map(|path| lookup(&self.technical, path).filter(|v| !v.is_object()))
    }

    pub fn price(&self, path: &str) -> Option<&Value> {
        lookup(&self.price_data, path)
    }
}

/// Directional bias, the three labels the aggregators tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

/// Display tone for a classified value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Neutral,
}

/// Qualitative label produced by the threshold classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
    Overbought,
    Oversold,
    Undervalued,
    FairValue,
    Overvalued,
    StrongTrend,
    ModerateTrend,
    WeakTrend,
    Good,
    Caution,
    Poor,
    Unknown,
}

impl Signal {
    /// Directional equivalent used when tallying. `None` for `Unknown`, which never counts.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Signal::Bullish | Signal::Oversold | Signal::Undervalued | Signal::Good => {
                Some(Direction::Bullish)
            }
            Signal::Bearish | Signal::Overbought | Signal::Overvalued | Signal::Poor => {
                Some(Direction::Bearish)
            }
            Signal::Neutral
            | Signal::FairValue
            | Signal::Caution
            | Signal::StrongTrend
            | Signal::ModerateTrend
            | Signal::WeakTrend => Some(Direction::Neutral),
            Signal::Unknown => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Signal::Bullish | Signal::Oversold | Signal::Undervalued | Signal::Good => Tone::Success,
            Signal::Bearish | Signal::Overbought | Signal::Overvalued | Signal::Poor => Tone::Error,
            Signal::Caution | Signal::FairValue => Tone::Warning,
            _ => Tone::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::Bullish => "Bullish",
            Signal::Bearish => "Bearish",
            Signal::Neutral => "Neutral",
            Signal::Overbought => "Overbought",
            Signal::Oversold => "Oversold",
            Signal::Undervalued => "Undervalued",
            Signal::FairValue => "Fair",
            Signal::Overvalued => "Overvalued",
            Signal::StrongTrend => "Strong Trend",
            Signal::ModerateTrend => "Moderate Trend",
            Signal::WeakTrend => "Weak Trend",
            Signal::Good => "Good",
            Signal::Caution => "Caution",
            Signal::Poor => "Poor",
            Signal::Unknown => "N/A",
        }
    }
}

/// One classified indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSignal {
    pub name: String,
    pub raw_value: Option<f64>,
    pub signal: Signal,
    /// Display tone of `signal`, carried so renderers need no mapping of their own
    pub tone: Tone,
    pub weight: u32,
}

impl IndicatorSignal {
    pub fn new(name: impl Into<String>, raw_value: Option<f64>, signal: Signal, weight: u32) -> Self {
        Self {
            name: name.into(),
            raw_value,
            signal,
            tone: signal.tone(),
            weight,
        }
    }

    pub fn unknown(name: impl Into<String>, weight: u32) -> Self {
        Self::new(name, None, Signal::Unknown, weight)
    }
}

/// Category of the composite health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    RevenueGrowth,
    ReturnOnEquity,
    CurrentRatio,
    DebtToEquity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthRating {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => HealthRating::Excellent,
            s if s >= 60 => HealthRating::Good,
            s if s >= 40 => HealthRating::Fair,
            _ => HealthRating::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthRating::Poor => "Poor",
            HealthRating::Fair => "Fair",
            HealthRating::Good => "Good",
            HealthRating::Excellent => "Excellent",
        }
    }
}

/// Composite health score for one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub composite_score: u32, // 0 to 100
    pub rating: HealthRating,
    /// Per evaluated category, 0 to 100. Categories whose driving field was absent are omitted.
    pub sub_scores: BTreeMap<HealthCategory, u32>,
}

/// Plurality sentiment over a set of directional votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSentiment {
    pub overall: Direction,
    pub confidence: u32, // 0 to 100
    pub bullish_count: u32,
    pub bearish_count: u32,
    pub neutral_count: u32,
    pub total_signals: u32,
}

impl AggregateSentiment {
    /// Reduce directional counts to a plurality label and a margin-based confidence.
    ///
    /// confidence = round(100 * (2 * winner - runner_up) / (2 * total)), clamped to [0, 100].
    /// A tie for the top count resolves to Neutral with confidence 0.
    pub fn from_counts(bullish: u32, bearish: u32, neutral: u32) -> Self {
        let total = bullish + bearish + neutral;
        let mut result = Self {
            overall: Direction::Neutral,
            confidence: 0,
            bullish_count: bullish,
            bearish_count: bearish,
            neutral_count: neutral,
            total_signals: total,
        };
        if total == 0 {
            return result;
        }

        let mut ranked = [
            (Direction::Bullish, bullish),
            (Direction::Bearish, bearish),
            (Direction::Neutral, neutral),
        ];
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let (winner, winning_count) = ranked[0];
        let runner_up = ranked[1].1;
        if winning_count == runner_up {
            return result;
        }

        let margin = (2 * winning_count - runner_up) as f64 / (2 * total) as f64;
        result.overall = winner;
        result.confidence = (100.0 * margin).round().clamp(0.0, 100.0) as u32;
        result
    }
}

/// AI commentary split into labelled sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredNarrative {
    pub recommendation: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub risks: String,
    pub targets: String,
    pub strategy: String,
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_and_null() {
        let root = json!({"ratios": {"returnOnEquity": 0.18, "quickRatio": null}});
        assert_eq!(lookup(&root, "ratios.returnOnEquity"), Some(&json!(0.18)));
        assert_eq!(lookup(&root, "ratios.quickRatio"), None);
        assert_eq!(lookup(&root, "ratios.missing"), None);
        assert_eq!(lookup(&root, "ratios.returnOnEquity.deeper"), None);
    }

    #[test]
    fn test_payload_from_backend_json() {
        let raw = json!({
            "symbol": "RELIANCE",
            "market": "Indian",
            "fundamentals": {"key_ratios": {"roe": 9.2}},
            "technical_analysis": {"rsi": 55.0},
            "chart_patterns": null,
            "ai_analysis": {"analysis": "Hold for now."},
            "news_sentiment": {"overall_sentiment": "Positive", "articles": []}
        })
        .to_string();

        let payload = AnalysisPayload::from_json(&raw).unwrap();
        assert_eq!(payload.market, Market::Indian);
        assert!(payload.patterns.is_empty());
        assert_eq!(payload.ai_text(), "Hold for now.");
        assert_eq!(payload.technical_field(&["rsi.rsi_14", "rsi"]), Some(&json!(55.0)));
        assert_eq!(payload.news.unwrap().overall_sentiment.as_deref(), Some("Positive"));
    }

    #[test]
    fn test_payload_rejects_empty_symbol() {
        let raw = json!({"symbol": " ", "market": "US"}).to_string();
        assert!(matches!(
            AnalysisPayload::from_json(&raw),
            Err(AnalysisError::InvalidData(_))
        ));
    }

    #[test]
    fn test_technical_field_prefers_nested_scalar() {
        let raw = json!({
            "symbol": "AAPL",
            "market": "US",
            "technical": {"rsi": {"rsi_14": 72.5}}
        })
        .to_string();
        let payload = AnalysisPayload::from_json(&raw).unwrap();
        // `rsi` itself is an object, so only the nested scalar qualifies
        assert_eq!(payload.technical_field(&["rsi", "rsi.rsi_14"]), Some(&json!(72.5)));
    }

    #[test]
    fn test_unrecognised_pattern_labels_fall_back() {
        let pattern: ChartPattern = serde_json::from_value(json!({
            "pattern": "Flag",
            "type": "Sideways",
            "strength": "Extreme"
        }))
        .unwrap();
        assert_eq!(pattern.pattern_type, PatternType::Neutral);
        assert_eq!(pattern.strength, PatternStrength::Weak);
    }

    #[test]
    fn test_pattern_strength_round_trips_and_weighs() {
        for (label, strength, weight) in [
            ("Weak", PatternStrength::Weak, 1),
            ("Medium", PatternStrength::Medium, 2),
            ("Strong", PatternStrength::Strong, 3),
        ] {
            let parsed: PatternStrength = serde_json::from_value(json!(label)).unwrap();
            assert_eq!(parsed, strength);
            assert_eq!(parsed.weight(), weight);
            assert_eq!(serde_json::to_value(strength).unwrap(), json!(label));
        }
    }

    #[test]
    fn test_malformed_leaves_read_as_missing() {
        let raw = json!({
            "symbol": "AAPL",
            "market": "US",
            "chart_patterns": [{"pattern": null, "confidence": "N/A"}],
            "ai_analysis": {"analysis": "Hold.", "timestamp": "2024-05-02T20:30:00.123456"},
            "news_sentiment": {
                "overall_sentiment": 3,
                "sentiment_counts": {"positive": "4", "negative": null, "neutral": -2},
                "articles": [{"title": null, "text": {"nested": true}, "publishedDate": false}]
            }
        })
        .to_string();

        let payload = AnalysisPayload::from_json(&raw).unwrap();

        let pattern = &payload.patterns[0];
        assert_eq!(pattern.pattern, "");
        assert_eq!(pattern.pattern_type, PatternType::Neutral);
        assert_eq!(pattern.strength, PatternStrength::Weak);
        assert_eq!(pattern.confidence, None);

        let ai = payload.ai_analysis.as_ref().unwrap();
        assert_eq!(
            ai.generated_at(),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 20, 30, 0).unwrap() + chrono::Duration::microseconds(123456))
        );

        let news = payload.news.as_ref().unwrap();
        assert_eq!(news.overall_sentiment.as_deref(), Some("3"));
        assert_eq!(
            news.sentiment_counts,
            Some(SentimentCounts { positive: 4, negative: 0, neutral: 0 })
        );
        let article = &news.articles[0];
        assert_eq!(article.title, "");
        assert_eq!(article.text, None);
        assert_eq!(article.published_at(), None);
    }

    #[test]
    fn test_unparseable_timestamp_and_counts_block() {
        let raw = json!({
            "symbol": "TCS",
            "market": "Indian",
            "ai_analysis": {"timestamp": "yesterday"},
            "news_sentiment": {"sentiment_counts": "unavailable"}
        })
        .to_string();
        let payload = AnalysisPayload::from_json(&raw).unwrap();
        assert_eq!(payload.ai_analysis.unwrap().generated_at(), None);
        assert_eq!(payload.news.unwrap().sentiment_counts, None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T09:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T15:00:00+05:30"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-03-01 09:30:00 "), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("03/01/2024"), None);
    }

    #[test]
    fn test_signal_tones() {
        assert_eq!(Signal::Good.tone(), Tone::Success);
        assert_eq!(Signal::Caution.tone(), Tone::Warning);
        assert_eq!(Signal::Poor.tone(), Tone::Error);
        assert_eq!(Signal::Oversold.tone(), Tone::Success);
        assert_eq!(Signal::Overbought.tone(), Tone::Error);
        assert_eq!(Signal::FairValue.tone(), Tone::Warning);
        assert_eq!(Signal::ModerateTrend.tone(), Tone::Neutral);
        assert_eq!(Signal::Unknown.tone(), Tone::Neutral);

        let signal = IndicatorSignal::new("roe", Some(3.0), Signal::Poor, 2);
        assert_eq!(signal.tone, Tone::Error);
        assert_eq!(serde_json::to_value(&signal).unwrap()["tone"], json!("Error"));
        assert_eq!(IndicatorSignal::unknown("cci", 2).tone, Tone::Neutral);
    }

    #[test]
    fn test_market_from_str() {
        assert_eq!("india".parse::<Market>().unwrap(), Market::Indian);
        assert_eq!("US".parse::<Market>().unwrap(), Market::US);
        assert!("LSE".parse::<Market>().is_err());
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(HealthRating::from_score(100), HealthRating::Excellent);
        assert_eq!(HealthRating::from_score(80), HealthRating::Excellent);
        assert_eq!(HealthRating::from_score(79), HealthRating::Good);
        assert_eq!(HealthRating::from_score(60), HealthRating::Good);
        assert_eq!(HealthRating::from_score(59), HealthRating::Fair);
        assert_eq!(HealthRating::from_score(40), HealthRating::Fair);
        assert_eq!(HealthRating::from_score(39), HealthRating::Poor);
        assert_eq!(HealthRating::from_score(0), HealthRating::Poor);
    }

    #[test]
    fn test_from_counts_plurality_and_confidence() {
        let s = AggregateSentiment::from_counts(3, 0, 0);
        assert_eq!(s.overall, Direction::Bullish);
        assert_eq!(s.confidence, 100);

        let s = AggregateSentiment::from_counts(2, 1, 0);
        assert_eq!(s.overall, Direction::Bullish);
        assert_eq!(s.confidence, 50); // (4 - 1) / 6

        let s = AggregateSentiment::from_counts(1, 3, 1);
        assert_eq!(s.overall, Direction::Bearish);
        assert_eq!(s.confidence, 50); // (6 - 1) / 10
        assert_eq!(s.bullish_count + s.bearish_count + s.neutral_count, s.total_signals);
    }

    #[test]
    fn test_from_counts_tie_and_empty() {
        let tie = AggregateSentiment::from_counts(2, 2, 1);
        assert_eq!(tie.overall, Direction::Neutral);
        assert_eq!(tie.confidence, 0);

        let empty = AggregateSentiment::from_counts(0, 0, 0);
        assert_eq!(empty.overall, Direction::Neutral);
        assert_eq!(empty.confidence, 0);
        assert_eq!(empty.total_signals, 0);
    }
}
