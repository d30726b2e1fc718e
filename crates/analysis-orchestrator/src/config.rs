/// Tunables for report assembly. None of them affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Strengths and weaknesses carried into the digest
    pub highlight_limit: usize,
    /// Headline length when the narrative has no recommendation
    pub preview_chars: usize,
}

const DEFAULT_HIGHLIGHT_LIMIT: usize = 3;
const DEFAULT_PREVIEW_CHARS: usize = 200;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highlight_limit: DEFAULT_HIGHLIGHT_LIMIT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl EngineConfig {
    /// Read `SIGNAL_ENGINE_HIGHLIGHT_LIMIT` and `SIGNAL_ENGINE_PREVIEW_CHARS`,
    /// keeping the default for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: usize| match get(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring {}={:?}, using {}", key, raw, default);
                default
            }),
            None => default,
        };
        Self {
            highlight_limit: read("SIGNAL_ENGINE_HIGHLIGHT_LIMIT", DEFAULT_HIGHLIGHT_LIMIT),
            preview_chars: read("SIGNAL_ENGINE_PREVIEW_CHARS", DEFAULT_PREVIEW_CHARS),
        }
    }
}
