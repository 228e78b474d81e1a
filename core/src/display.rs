//! Display formatting for estimates.
//!
//! Volumes keep one decimal, flows two, and durations are floored to whole
//! minutes so a shown time is never longer than the computed one.

use std::fmt;

use serde::Deserialize;

use crate::estimator::Readout;
use crate::models::CalculationResult;

/// A duration ready for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationDisplay {
    Minutes { minutes: u64 },
    Infinite,
}

impl DurationDisplay {
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes.is_finite() {
            DurationDisplay::Minutes {
                minutes: minutes.max(0.0).floor() as u64,
            }
        } else {
            DurationDisplay::Infinite
        }
    }
}

impl fmt::Display for DurationDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationDisplay::Minutes { minutes } => write!(f, "{minutes}"),
            DurationDisplay::Infinite => f.write_str(INFINITE_MARK),
        }
    }
}

/// Result values formatted for display, without units.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayResult {
    pub remaining_volume: String,
    pub consumption_flow: String,
    pub available_duration: DurationDisplay,
    pub safe_duration: DurationDisplay,
}

pub fn format_result(result: &CalculationResult) -> DisplayResult {
    DisplayResult {
        remaining_volume: fixed(result.remaining_volume, 1),
        consumption_flow: fixed(result.consumption_flow, 2),
        available_duration: DurationDisplay::from_minutes(result.available_duration),
        safe_duration: DurationDisplay::from_minutes(result.safe_duration),
    }
}

fn fixed(value: f64, places: usize) -> String {
    // Adding +0.0 turns -0.0 into 0.0 so it never prints as "-0.0".
    format!("{:.*}", places, value + 0.0)
}

const INFINITE_MARK: &str = "∞";
const PLACEHOLDER: &str = "--";

/// Language for unit labels and the infinite-duration note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Japanese,
}

impl Locale {
    fn flow_unit(&self) -> &'static str {
        match self {
            Locale::English => "L/min",
            Locale::Japanese => "L/分",
        }
    }

    fn minute_unit(&self) -> &'static str {
        match self {
            Locale::English => "min",
            Locale::Japanese => "分",
        }
    }

    fn unlimited_note(&self) -> &'static str {
        match self {
            Locale::English => "Infinite (no oxygen consumption)",
            Locale::Japanese => "無限大 (酸素消費なし)",
        }
    }
}

/// Text for each output slot of a calculator screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadoutText {
    /// Safe duration in minutes, `∞`, or `--`.
    pub headline: String,
    pub remaining_volume: String,
    pub consumption_flow: String,
    pub available_duration: String,
}

/// Render a readout, using placeholders when there is no result.
pub fn render_readout(readout: &Readout, locale: Locale) -> ReadoutText {
    let display = match readout {
        Readout::NoResult => {
            return ReadoutText {
                headline: PLACEHOLDER.to_string(),
                remaining_volume: format!("{PLACEHOLDER} L"),
                consumption_flow: format!("{PLACEHOLDER} {}", locale.flow_unit()),
                available_duration: format!("{PLACEHOLDER} {}", locale.minute_unit()),
            }
        }
        Readout::Ready { display, .. } => display,
    };

    let available_duration = match display.available_duration {
        DurationDisplay::Minutes { minutes } => format!("{minutes} {}", locale.minute_unit()),
        DurationDisplay::Infinite => locale.unlimited_note().to_string(),
    };

    ReadoutText {
        headline: display.safe_duration.to_string(),
        remaining_volume: format!("{} L", display.remaining_volume),
        consumption_flow: format!("{} {}", display.consumption_flow, locale.flow_unit()),
        available_duration,
    }
}
