use async_trait::async_trait;
use crate::{AnalysisError, AnalysisPayload, Market};

/// Supplier of analysis payloads (the backend "analyze" endpoint, a file, a fixture).
///
/// Fetching is the only fallible, I/O-bound step; everything downstream of the
/// returned payload is a pure transformation.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    async fn fetch(&self, symbol: &str, market: Market) -> Result<AnalysisPayload, AnalysisError>;
}
