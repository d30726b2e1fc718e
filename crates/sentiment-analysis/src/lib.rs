use analysis_core::{AggregateSentiment, Direction, NewsArticle, NewsBlock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod lexicon;
pub mod narrative;
pub use lexicon::{Lexicon, NEWS_LEXICON};
pub use narrative::{segment, NarrativeSegmenter, Section, TRANSITIONS};

/// Where the tally in a summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryBasis {
    ReportedCounts,
    Articles,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSentiment {
    pub title: String,
    pub direction: Direction,
    /// Lexicon score; `None` when the backend label was used
    pub score: Option<f64>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSentimentSummary {
    /// `overall_sentiment` exactly as the backend reported it
    pub reported: Option<String>,
    pub sentiment: AggregateSentiment,
    pub basis: SummaryBasis,
    pub article_count: u32,
    pub latest_published: Option<DateTime<Utc>>,
    pub articles: Vec<ArticleSentiment>,
}

/// Direction named by a backend label such as "Positive" or "bearish"
pub fn label_direction(label: &str) -> Option<Direction> {
    match label.trim().to_lowercase().as_str() {
        "positive" | "bullish" => Some(Direction::Bullish),
        "negative" | "bearish" => Some(Direction::Bearish),
        "neutral" => Some(Direction::Neutral),
        _ => None,
    }
}

pub struct SentimentAnalysisEngine {
    lexicon: Lexicon,
}

impl SentimentAnalysisEngine {
    pub fn new() -> Self {
        Self::with_lexicon(NEWS_LEXICON)
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Net lexicon score of a text
    pub fn analyze_text(&self, text: &str) -> f64 {
        lexicon::score_tokens(self.lexicon, &lexicon::tokenize(text)) as f64
    }

    /// Title counts double
    pub fn article_score(&self, article: &NewsArticle) -> f64 {
        let mut total = self.analyze_text(&article.title) * 2.0;
        if let Some(body) = article.body() {
            total += self.analyze_text(body);
        }
        total
    }

    pub fn classify_article(&self, article: &NewsArticle) -> ArticleSentiment {
        let labelled = article.sentiment.as_deref().and_then(label_direction);
        let (direction, score) = match labelled {
            Some(direction) => (direction, None),
            None => {
                let score = self.article_score(article);
                let direction = if score > 0.0 {
                    Direction::Bullish
                } else if score < 0.0 {
                    Direction::Bearish
                } else {
                    Direction::Neutral
                };
                (direction, Some(score))
            }
        };
        ArticleSentiment {
            title: article.title.clone(),
            direction,
            score,
            published_at: article.published_at(),
        }
    }

    /// Summarize a news block. Reported counts win when they are non-zero;
    /// otherwise the articles are classified one by one.
    pub fn summarize(&self, news: &NewsBlock) -> NewsSentimentSummary {
        let articles: Vec<ArticleSentiment> =
            news.articles.iter().map(|a| self.classify_article(a)).collect();
        let latest_published = articles.iter().filter_map(|a| a.published_at).max();

        let reported_counts = news.sentiment_counts.filter(|c| c.total() > 0);
        let (sentiment, basis) = if let Some(counts) = reported_counts {
            (
                AggregateSentiment::from_counts(counts.positive, counts.negative, counts.neutral),
                SummaryBasis::ReportedCounts,
            )
        } else if !articles.is_empty() {
            let count = |d: Direction| articles.iter().filter(|a| a.direction == d).count() as u32;
            (
                AggregateSentiment::from_counts(
                    count(Direction::Bullish),
                    count(Direction::Bearish),
                    count(Direction::Neutral),
                ),
                SummaryBasis::Articles,
            )
        } else {
            (AggregateSentiment::from_counts(0, 0, 0), SummaryBasis::Empty)
        };

        tracing::debug!(
            articles = articles.len(),
            basis = ?basis,
            overall = ?sentiment.overall,
            "news sentiment"
        );

        NewsSentimentSummary {
            reported: news.overall_sentiment.clone(),
            sentiment,
            basis,
            article_count: articles.len() as u32,
            latest_published,
            articles,
        }
    }
}

impl Default for SentimentAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
