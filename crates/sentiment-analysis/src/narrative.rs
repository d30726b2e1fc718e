//! Line-oriented segmentation of AI commentary into labelled sections.
//!
//! A single pass over the lines drives a small state machine. A line whose
//! lowercased text contains a section keyword switches the current section, and
//! the same line is then emitted into the section it just switched to. Lines
//! before the first keyword have no section and are dropped.

use analysis_core::StructuredNarrative;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Recommendation,
    Strengths,
    Weaknesses,
    Risks,
    Targets,
    Strategy,
}

/// Keywords per section, checked top to bottom; the first row with a hit wins.
pub const TRANSITIONS: &[(&[&str], Section)] = &[
    (&["recommendation", "buy", "sell", "hold"], Section::Recommendation),
    (&["strength"], Section::Strengths),
    (&["weakness"], Section::Weaknesses),
    (&["risk"], Section::Risks),
    (&["target"], Section::Targets),
    (&["strategy"], Section::Strategy),
];

const BULLET_MARKERS: &[char] = &['-', '•'];

/// Section a line switches to, if it names one
pub fn transition(line: &str) -> Option<Section> {
    let lower = line.to_lowercase();
    TRANSITIONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, section)| *section)
}

/// Item text of a bulleted line, marker stripped
fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| BULLET_MARKERS.contains(c))?;
    let item = trimmed[marker.len_utf8()..].trim();
    if item.is_empty() {
        None
    } else {
        Some(item)
    }
}

fn append_prose(field: &mut String, line: &str) {
    field.push_str(line);
    field.push(' ');
}

/// Incremental segmenter; feed lines in order, then `finish`.
#[derive(Debug, Default)]
pub struct NarrativeSegmenter {
    state: Option<Section>,
    narrative: StructuredNarrative,
}

impl NarrativeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<Section> {
        self.state
    }

    pub fn feed_line(&mut self, line: &str) {
        if let Some(next) = transition(line) {
            self.state = Some(next);
        }
        if line.trim().is_empty() {
            return;
        }

        let n = &mut self.narrative;
        match self.state {
            None => {}
            Some(Section::Recommendation) => append_prose(&mut n.recommendation, line),
            Some(Section::Risks) => append_prose(&mut n.risks, line),
            Some(Section::Targets) => append_prose(&mut n.targets, line),
            Some(Section::Strategy) => append_prose(&mut n.strategy, line),
            Some(Section::Strengths) => {
                if let Some(item) = bullet_item(line) {
                    n.strengths.push(item.to_string());
                }
            }
            Some(Section::Weaknesses) => {
                if let Some(item) = bullet_item(line) {
                    n.weaknesses.push(item.to_string());
                }
            }
        }
    }

    pub fn finish(self, raw: &str) -> StructuredNarrative {
        StructuredNarrative {
            raw: raw.to_string(),
            ..self.narrative
        }
    }
}

/// Segment free-form analysis text. Empty input yields an empty narrative.
pub fn segment(text: &str) -> StructuredNarrative {
    let mut segmenter = NarrativeSegmenter::new();
    for line in text.lines() {
        segmenter.feed_line(line);
    }
    segmenter.finish(text)
}
