use analysis_core::{AnalysisError, AnalysisPayload, Market, PayloadSource, StructuredNarrative};
use fundamental_analysis::{FundamentalAnalysisEngine, FundamentalReport};
use sentiment_analysis::{segment, NewsSentimentSummary, SentimentAnalysisEngine};
use serde::{Deserialize, Serialize};
use technical_analysis::{TechnicalAnalysisEngine, TechnicalReport};

pub mod config;
pub use config::EngineConfig;

/// Short form of the narrative for the report header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeDigest {
    pub headline: String,
    pub top_strengths: Vec<String>,
    pub top_weaknesses: Vec<String>,
}

impl NarrativeDigest {
    pub fn from_narrative(narrative: &StructuredNarrative, config: &EngineConfig) -> Self {
        let recommendation = narrative.recommendation.trim();
        let headline = if recommendation.is_empty() {
            narrative
                .raw
                .chars()
                .take(config.preview_chars)
                .collect::<String>()
                .trim()
                .to_string()
        } else {
            recommendation.to_string()
        };
        Self {
            headline,
            top_strengths: narrative.strengths.iter().take(config.highlight_limit).cloned().collect(),
            top_weaknesses: narrative.weaknesses.iter().take(config.highlight_limit).cloned().collect(),
        }
    }
}

/// Everything derived from one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub symbol: String,
    pub market: Market,
    pub fundamental: FundamentalReport,
    pub technical: TechnicalReport,
    pub narrative: StructuredNarrative,
    pub digest: NarrativeDigest,
    /// `None` when the payload carried no news block
    pub news: Option<NewsSentimentSummary>,
}

pub struct SignalEngine {
    config: EngineConfig,
    technical_analyzer: TechnicalAnalysisEngine,
    fundamental_analyzer: FundamentalAnalysisEngine,
    sentiment_analyzer: SentimentAnalysisEngine,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            technical_analyzer: TechnicalAnalysisEngine::new(),
            fundamental_analyzer: FundamentalAnalysisEngine::new(),
            sentiment_analyzer: SentimentAnalysisEngine::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive the full report. Pure: the same payload always yields the same report.
    pub fn evaluate(&self, payload: &AnalysisPayload) -> DashboardReport {
        tracing::info!("Evaluating {} ({})", payload.symbol, payload.market);

        let fundamental = self.fundamental_analyzer.analyze(payload);
        let technical = self.technical_analyzer.analyze(payload);
        let narrative = segment(payload.ai_text());
        let digest = NarrativeDigest::from_narrative(&narrative, &self.config);
        let news = payload.news.as_ref().map(|block| self.sentiment_analyzer.summarize(block));

        tracing::info!(
            symbol = %payload.symbol,
            health = fundamental.scorecard.composite_score,
            rating = fundamental.scorecard.rating.label(),
            technical = ?technical.sentiment.overall,
            confidence = technical.sentiment.confidence,
            "evaluation complete"
        );

        DashboardReport {
            symbol: payload.symbol.clone(),
            market: payload.market,
            fundamental,
            technical,
            narrative,
            digest,
            news,
        }
    }

    /// Fetch a payload from `source` and evaluate it
    pub async fn evaluate_from<S>(
        &self,
        source: &S,
        symbol: &str,
        market: Market,
    ) -> Result<DashboardReport, AnalysisError>
    where
        S: PayloadSource + ?Sized,
    {
        let payload = source.fetch(symbol, market).await?;
        if payload.market != market || !payload.symbol.eq_ignore_ascii_case(symbol) {
            tracing::warn!(
                "Requested {} ({}), source returned {} ({})",
                symbol,
                market,
                payload.symbol,
                payload.market
            );
        }
        Ok(self.evaluate(&payload))
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
