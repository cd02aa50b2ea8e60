//! Relative-performance coloring of comparison-table cells
//!
//! Every rendered cell compares the primary run's value against the values
//! of the other runs for the same instance and column. The background
//! encodes the outcome: green when the primary value beats the whole
//! comparison band, red when it trails it, gray shaded by the sample
//! spread when it lands inside, dark gray when ratios carry no meaning.

use log::trace;

use super::palette::{self, Rgb};

/// Fixed shade intensity when a zero makes band ratios meaningless.
const ZERO_BAND_FACTOR: f64 = 0.9;

/// What a column measures. Decides how values are normalized before they
/// are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MetricKind {
    /// Elapsed times, offset by one second so sub-second runs keep sane
    /// ratios.
    Time,
    /// Branch-and-bound node counts, offset by 100 nodes.
    NodeCount,
    /// Solver bounds: compared by magnitude, never ranked green or red.
    Bound,
    #[default]
    Generic,
}

impl MetricKind {
    /// Classify a column by its label, e.g. `"Time_solve"` or `"Nodes"`.
    pub fn from_column_label(label: &str) -> Self {
        if label.contains("Time") {
            Self::Time
        } else if label.contains("Nodes") {
            Self::NodeCount
        } else if label.contains("Bound") {
            Self::Bound
        } else {
            Self::Generic
        }
    }

    /// Map a parsed value into the space band ratios are computed in.
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Self::Time => value + 1.0,
            Self::NodeCount => value + 100.0,
            Self::Bound => value.abs(),
            Self::Generic => value,
        }
    }
}

/// Result of parsing one raw cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedValue {
    Numeric(f64),
    NonNumeric(String),
}

impl ParsedValue {
    /// Parse a raw cell value. Only finite numbers count as numeric;
    /// `NaN`/`inf` spellings and everything else stay opaque strings.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Numeric(value),
            _ => Self::NonNumeric(raw.to_string()),
        }
    }
}

/// One cell's worth of comparison input. Built fresh for every render and
/// discarded afterwards; nothing here is cached between frames.
#[derive(Clone, Debug)]
pub struct MetricSample {
    /// Displayed value of the run being judged.
    pub primary: String,
    /// Values of the other runs for the same instance and column.
    pub others: Vec<String>,
    pub kind: MetricKind,
    /// Bigger values are better for this metric.
    pub invert: bool,
}

impl MetricSample {
    pub fn new(primary: String, others: Vec<String>, kind: MetricKind, invert: bool) -> Self {
        Self {
            primary,
            others,
            kind,
            invert,
        }
    }
}

/// Background color for one cell, or `None` when the cell carries nothing
/// worth highlighting. Total over its input: malformed values degrade to
/// the neutral gray instead of failing.
pub fn colorize(sample: &MetricSample) -> Option<Rgb> {
    let values = match parse_values(sample) {
        Some(values) => values,
        None => {
            // Mixed numeric/text content. Identical text throughout means
            // there is no difference to show.
            return if all_raw_equal(sample) {
                None
            } else {
                Some(palette::GRAY)
            };
        }
    };

    if pairwise_equal(&values) {
        return None;
    }

    let normalized: Vec<f64> = values
        .iter()
        .map(|&value| sample.kind.normalize(value))
        .collect();
    let value = normalized[0];
    let comparisons = &normalized[1..];

    // Band spanned by the comparison runs; the primary value is excluded.
    let smallest = comparisons.iter().cloned().fold(f64::INFINITY, f64::min);
    let largest = comparisons.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Ratios are meaningless against a zero endpoint.
    if value == 0.0 || smallest == 0.0 || largest == 0.0 {
        return Some(palette::background_color(
            palette::DARK_GRAY,
            ZERO_BAND_FACTOR,
        ));
    }

    let factor = band_position_factor(value, smallest, largest);
    trace!(
        "value {} vs band [{}, {}] -> factor {}",
        value,
        smallest,
        largest,
        factor
    );

    if sample.kind == MetricKind::Bound {
        // Bound columns are only ever shaded, never ranked green or red.
        return Some(palette::background_color(palette::DARK_GRAY, factor));
    }

    let color = if value < smallest {
        palette::background_color(palette::GREEN, factor)
    } else if value > largest {
        palette::background_color(palette::RED, factor)
    } else {
        palette::background_color(palette::GRAY, relative_spread(&normalized, smallest))
    };
    Some(color)
}

/// Every value parsed with `invert` applied, or `None` when any value is
/// non-numeric.
fn parse_values(sample: &MetricSample) -> Option<Vec<f64>> {
    let mut values = Vec::with_capacity(sample.others.len() + 1);
    for raw in std::iter::once(&sample.primary).chain(sample.others.iter()) {
        match ParsedValue::parse(raw) {
            ParsedValue::Numeric(value) => {
                values.push(if sample.invert { -value } else { value })
            }
            ParsedValue::NonNumeric(_) => return None,
        }
    }
    Some(values)
}

fn pairwise_equal(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

fn all_raw_equal(sample: &MetricSample) -> bool {
    sample.others.iter().all(|other| *other == sample.primary)
}

/// Distance from the comparison band in ratio terms: 0 inside the band,
/// growing toward 1 as the value leaves it.
fn band_position_factor(value: f64, smallest: f64, largest: f64) -> f64 {
    let ratio = if value < smallest {
        value / smallest
    } else if value > largest {
        largest / value
    } else {
        1.0
    };
    1.0 - ratio
}

/// Spread of the whole sample relative to the band minimum. Two values
/// total carry no spread; otherwise a population deviation is taken
/// around `smallest` rather than the mean.
fn relative_spread(normalized: &[f64], smallest: f64) -> f64 {
    if normalized.len() <= 2 {
        return 0.0;
    }
    let sum_squares: f64 = normalized
        .iter()
        .map(|value| (value - smallest) * (value - smallest))
        .sum();
    libm::sqrt(sum_squares / normalized.len() as f64) / smallest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(primary: &str, others: &[&str], kind: MetricKind, invert: bool) -> MetricSample {
        MetricSample::new(
            primary.to_string(),
            others.iter().map(|v| v.to_string()).collect(),
            kind,
            invert,
        )
    }

    fn generic(primary: &str, others: &[&str]) -> MetricSample {
        sample(primary, others, MetricKind::Generic, false)
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(ParsedValue::parse("5.0"), ParsedValue::Numeric(5.0));
        assert_eq!(ParsedValue::parse(" 7 "), ParsedValue::Numeric(7.0));
        assert_eq!(ParsedValue::parse("1e3"), ParsedValue::Numeric(1000.0));
        assert_eq!(ParsedValue::parse("-0.5"), ParsedValue::Numeric(-0.5));
        assert_eq!(
            ParsedValue::parse("timeout"),
            ParsedValue::NonNumeric("timeout".to_string())
        );
        // Non-finite spellings stay opaque
        assert_eq!(
            ParsedValue::parse("NaN"),
            ParsedValue::NonNumeric("NaN".to_string())
        );
        assert_eq!(
            ParsedValue::parse("inf"),
            ParsedValue::NonNumeric("inf".to_string())
        );
    }

    #[test]
    fn test_kind_from_column_label() {
        assert_eq!(
            MetricKind::from_column_label("TotalTime_solving"),
            MetricKind::Time
        );
        assert_eq!(MetricKind::from_column_label("Nodes"), MetricKind::NodeCount);
        assert_eq!(
            MetricKind::from_column_label("DualBound"),
            MetricKind::Bound
        );
        assert_eq!(
            MetricKind::from_column_label("Iterations"),
            MetricKind::Generic
        );
    }

    #[test]
    fn test_equal_values_get_no_color() {
        assert_eq!(colorize(&generic("5", &["5", "5"])), None);
        // Equality is decided on parsed values, not raw text
        assert_eq!(colorize(&generic("5", &["5.0", " 5"])), None);
        // A lone value has nothing to compare against
        assert_eq!(colorize(&generic("5", &[])), None);
    }

    #[test]
    fn test_identical_text_gets_no_color() {
        assert_eq!(colorize(&sample("timeout", &["timeout", "timeout"], MetricKind::Time, false)), None);
        assert_eq!(colorize(&generic("timeout", &[])), None);
    }

    #[test]
    fn test_mixed_content_gets_neutral_gray() {
        assert_eq!(
            colorize(&generic("timeout", &["5.0", "3.2"])),
            Some(Rgb::new(200, 200, 200))
        );
        assert_eq!(
            colorize(&generic("5.0", &["timeout", "3.2"])),
            Some(Rgb::new(200, 200, 200))
        );
    }

    #[test]
    fn test_better_than_band_is_green() {
        // 5 against [10, 30]: factor 1 - 5/10 = 0.5
        assert_eq!(
            colorize(&generic("5", &["10", "20", "30"])),
            Some(Rgb::new(192, 227, 142))
        );
    }

    #[test]
    fn test_worse_than_band_is_red() {
        // 40 against [10, 30]: factor 1 - 30/40 = 0.25
        assert_eq!(
            colorize(&generic("40", &["10", "20", "30"])),
            Some(Rgb::new(251, 201, 228))
        );
    }

    #[test]
    fn test_inside_band_is_gray_shaded_by_spread() {
        // Normalized values [12, 10, 11, 13], deviations from 10:
        // sqrt(14 / 4) / 10 ~= 0.187
        assert_eq!(
            colorize(&generic("12", &["10", "11", "13"])),
            Some(Rgb::new(244, 244, 244))
        );
        // Wide spread saturates at the full gray base
        assert_eq!(
            colorize(&generic("15", &["10", "20", "30"])),
            Some(Rgb::new(200, 200, 200))
        );
    }

    #[test]
    fn test_zero_band_guard() {
        assert_eq!(
            colorize(&generic("0", &["10", "20"])),
            Some(Rgb::new(169, 169, 169))
        );
        assert_eq!(
            colorize(&generic("10", &["0", "20"])),
            Some(Rgb::new(169, 169, 169))
        );
    }

    #[test]
    fn test_time_normalization_shifts_by_one() {
        // Normalized to [1, 2, 3]: 1 against [2, 3] gives factor 0.5
        assert_eq!(
            colorize(&sample("0", &["1", "2"], MetricKind::Time, false)),
            Some(Rgb::new(192, 227, 142))
        );
        // -1s normalizes to exactly zero and hits the guard
        assert_eq!(
            colorize(&sample("-1", &["1", "2"], MetricKind::Time, false)),
            Some(Rgb::new(169, 169, 169))
        );
    }

    #[test]
    fn test_bound_is_always_a_dark_gray_shade() {
        // Magnitudes [5, 10, 20]: below the band, but still gray
        let below = colorize(&sample("5", &["-10", "20"], MetricKind::Bound, false));
        assert_eq!(below, Some(Rgb::new(207, 207, 207)));
        // Above the band: same hue family, never red
        let above = colorize(&sample("-40", &["10", "20"], MetricKind::Bound, false));
        let rgb = above.unwrap();
        assert_eq!(rgb.r, rgb.g);
        assert_eq!(rgb.g, rgb.b);
    }

    #[test]
    fn test_invert_flips_direction() {
        // 30 against [10, 20], bigger is better: negation puts -30 below
        // the band, factor -0.5 is raised to the visibility minimum
        assert_eq!(
            colorize(&sample("30", &["10", "20"], MetricKind::Generic, true)),
            Some(Rgb::new(242, 249, 232))
        );
        // Without invert the same cell is worse than the band (reddish)
        let plain = colorize(&generic("30", &["10", "20"])).unwrap();
        assert!(plain.r > plain.g);
    }

    #[test]
    fn test_green_saturation_grows_with_distance() {
        let comparisons = ["10", "20", "30"];
        let mut saturations = Vec::new();
        for primary in ["9", "7", "5", "3", "1"] {
            let rgb = colorize(&generic(primary, &comparisons)).unwrap();
            assert!(rgb.g > rgb.r);
            saturations.push(255 - rgb.g);
        }
        assert!(saturations.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_colorize_is_deterministic() {
        let cell = generic("7.5", &["10", "20", "30"]);
        assert_eq!(colorize(&cell), colorize(&cell));
    }
}
