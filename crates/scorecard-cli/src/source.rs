use analysis_core::{AnalysisError, AnalysisPayload, Market, PayloadSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Payloads saved as JSON on disk.
///
/// `root` is either a single payload file, returned for every request, or a
/// directory holding one `<SYMBOL>.json` per instrument.
pub struct FilePayloadSource {
    root: PathBuf,
}

impl FilePayloadSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn path_for(&self, symbol: &str) -> PathBuf {
        let is_dir = tokio::fs::metadata(&self.root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if is_dir {
            self.root.join(format!("{}.json", symbol.to_uppercase()))
        } else {
            self.root.clone()
        }
    }

    pub async fn load(&self, path: &Path) -> Result<AnalysisPayload, AnalysisError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AnalysisError::SourceError(format!("{}: {}", path.display(), e)))?;
        AnalysisPayload::from_json(&raw)
    }

    /// Load the root file as-is, whatever symbol it holds
    pub async fn load_root(&self) -> Result<AnalysisPayload, AnalysisError> {
        self.load(&self.root).await
    }
}

#[async_trait]
impl PayloadSource for FilePayloadSource {
    async fn fetch(&self, symbol: &str, market: Market) -> Result<AnalysisPayload, AnalysisError> {
        let path = self.path_for(symbol).await;
        tracing::debug!("Loading {} ({}) from {}", symbol, market, path.display());
        self.load(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scorecard-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_fetch_from_directory() {
        let dir = scratch_dir("dir");
        std::fs::write(
            dir.join("TCS.json"),
            r#"{"symbol": "TCS", "market": "Indian", "fundamentals": {"key_ratios": {"roe": 45.2}}}"#,
        )
        .unwrap();

        let source = FilePayloadSource::new(&dir);
        let payload = source.fetch("tcs", Market::Indian).await.unwrap();
        assert_eq!(payload.symbol, "TCS");
        assert_eq!(payload.market, Market::Indian);

        let missing = source.fetch("WIPRO", Market::Indian).await.unwrap_err();
        assert!(matches!(missing, AnalysisError::SourceError(_)));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_missing_root_reports_source_error() {
        let source = FilePayloadSource::new(scratch_dir("missing").join("nowhere"));
        assert_eq!(source.path_for("AAPL").await, source.root);
        let err = source.fetch("AAPL", Market::US).await.unwrap_err();
        assert!(matches!(err, AnalysisError::SourceError(_)));
    }

    #[tokio::test]
    async fn test_single_file_and_bad_json() {
        let dir = scratch_dir("file");
        let good = dir.join("payload.json");
        std::fs::write(&good, r#"{"symbol": "AAPL", "market": "US"}"#).unwrap();
        let bad = dir.join("broken.json");
        std::fs::write(&bad, "{not json").unwrap();

        let payload = FilePayloadSource::new(&good).fetch("ANY", Market::US).await.unwrap();
        assert_eq!(payload.symbol, "AAPL");

        let err = FilePayloadSource::new(&bad).load_root().await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidData(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
