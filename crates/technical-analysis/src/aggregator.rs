use analysis_core::{AggregateSentiment, Direction, IndicatorSignal};

/// Tally signals by directional equivalent and reduce to a plurality sentiment.
/// `Unknown` signals carry no vote and are not counted in `total_signals`.
pub fn aggregate(signals: &[IndicatorSignal]) -> AggregateSentiment {
    let (mut bullish, mut bearish, mut neutral) = (0u32, 0u32, 0u32);
    for s in signals {
        match s.signal.direction() {
            Some(Direction::Bullish) => bullish += 1,
            Some(Direction::Bearish) => bearish += 1,
            Some(Direction::Neutral) => neutral += 1,
            None => {}
        }
    }
    AggregateSentiment::from_counts(bullish, bearish, neutral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::Signal;

    fn sig(name: &str, signal: Signal) -> IndicatorSignal {
        IndicatorSignal::new(name, Some(1.0), signal, 2)
    }

    #[test]
    fn test_empty_set() {
        let s = aggregate(&[]);
        assert_eq!(s.total_signals, 0);
        assert_eq!(s.confidence, 0);
        assert_eq!(s.overall, Direction::Neutral);
    }

    #[test]
    fn test_oscillator_bias_maps_to_direction() {
        let signals = vec![
            sig("rsi", Signal::Oversold),
            sig("cci", Signal::Oversold),
            sig("macd", Signal::Bearish),
        ];
        let s = aggregate(&signals);
        assert_eq!(s.bullish_count, 2);
        assert_eq!(s.bearish_count, 1);
        assert_eq!(s.overall, Direction::Bullish);
        assert_eq!(s.confidence, 50);
    }

    #[test]
    fn test_unknown_is_not_counted() {
        let signals = vec![
            sig("rsi", Signal::Overbought),
            IndicatorSignal::unknown("macd", 3),
            sig("stochastic", Signal::Neutral),
            sig("sma_20", Signal::Bearish),
        ];
        let s = aggregate(&signals);
        assert_eq!(s.total_signals, 3);
        assert_eq!(s.bullish_count + s.bearish_count + s.neutral_count, s.total_signals);
        assert_eq!(s.overall, Direction::Bearish);
        // (2 * 2 - 1) / (2 * 3) = 0.5
        assert_eq!(s.confidence, 50);
    }

    #[test]
    fn test_tie_resolves_neutral() {
        let signals = vec![sig("a", Signal::Bullish), sig("b", Signal::Bearish)];
        let s = aggregate(&signals);
        assert_eq!(s.overall, Direction::Neutral);
        assert_eq!(s.confidence, 0);
    }

    #[test]
    fn test_confidence_bounded() {
        let signals: Vec<IndicatorSignal> =
            (0..7).map(|i| sig(&format!("s{}", i), Signal::Bullish)).collect();
        let s = aggregate(&signals);
        assert_eq!(s.confidence, 100);
    }
}
