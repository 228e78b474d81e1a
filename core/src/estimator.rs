//! Remaining-time estimate for an oxygen supply.
//!
//! The cylinder holds `volume * pressure * 10` litres of gas at atmospheric
//! pressure. Blended modes only draw the share of the delivered flow that
//! lifts FiO2 above room air, i.e. `(fio2 - 21) / 79` of the total; plain
//! oxygen therapy draws its whole flow.

use crate::config::EstimatorConfig;
use crate::display::{format_result, render_readout, DisplayResult, ReadoutText};
use crate::error::{EstimateError, Violation};
use crate::models::{
    CalculationInput, CalculationResult, Cylinder, DeviceMode, Field, RawFields, Ventilation,
};
use crate::parser::read_input;

// ============================================================================
// Constants
// ============================================================================

/// Oxygen share of room air (%).
pub const AIR_FIO2_PERCENT: f64 = 21.0;

/// Highest valid FiO2 (%).
pub const MAX_FIO2_PERCENT: f64 = 100.0;

/// Litres of free gas per litre of cylinder capacity per MPa on the gauge.
pub const LITRES_PER_MPA: f64 = 10.0;

/// Fraction of the raw duration treated as safe to rely on.
pub const DEFAULT_SAFETY_FACTOR: f64 = 0.8;

// ============================================================================
// Results
// ============================================================================

/// Outcome of one read/validate/compute/format cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum Readout {
    /// Inputs are incomplete or invalid; show placeholders.
    NoResult,
    Ready {
        result: CalculationResult,
        display: DisplayResult,
    },
}

impl Readout {
    pub fn result(&self) -> Option<&CalculationResult> {
        match self {
            Readout::NoResult => None,
            Readout::Ready { result, .. } => Some(result),
        }
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Stateless estimator. Holds only its configuration.
#[derive(Clone, Debug, Default)]
pub struct DurationEstimator {
    config: EstimatorConfig,
}

impl DurationEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Check the input against the ranges its mode requires.
    ///
    /// Fields are checked cylinder first, then in the mode's display order;
    /// the first violation wins.
    pub fn validate(&self, input: &CalculationInput) -> Result<(), EstimateError> {
        let checked = check_input(input);
        if let Err(err) = &checked {
            tracing::debug!(mode = %input.mode(), field = %err.field(), "input rejected: {err}");
        }
        checked
    }

    /// Compute the estimate for an input that passed [`validate`](Self::validate).
    pub fn compute(&self, input: &CalculationInput) -> CalculationResult {
        let remaining_volume = remaining_volume(input.cylinder());
        let consumption_flow = consumption_flow(input);

        let (available_duration, safe_duration) = if consumption_flow > 0.0 {
            let available = remaining_volume / consumption_flow;
            (available, available * self.config.safety_factor)
        } else {
            (f64::INFINITY, f64::INFINITY)
        };

        tracing::trace!(
            mode = %input.mode(),
            remaining_volume,
            consumption_flow,
            available_duration,
            safe_duration,
            "computed oxygen duration"
        );

        CalculationResult {
            remaining_volume,
            consumption_flow,
            available_duration,
            safe_duration,
        }
    }

    /// Run the full cycle on raw field text.
    pub fn estimate(&self, mode: DeviceMode, fields: &RawFields) -> Readout {
        let input = match read_input(mode, fields) {
            Ok(input) => input,
            Err(err) => {
                tracing::debug!(%mode, field = %err.field(), "input unreadable: {err}");
                return Readout::NoResult;
            }
        };
        if self.validate(&input).is_err() {
            return Readout::NoResult;
        }

        let result = self.compute(&input);
        let display = format_result(&result);
        Readout::Ready { result, display }
    }

    /// Run the full cycle and render it in the configured locale.
    pub fn estimate_text(&self, mode: DeviceMode, fields: &RawFields) -> ReadoutText {
        render_readout(&self.estimate(mode, fields), self.config.locale)
    }

    pub fn is_valid(&self, mode: DeviceMode, fields: &RawFields) -> bool {
        read_input(mode, fields)
            .and_then(|input| check_input(&input))
            .is_ok()
    }
}

/// Free gas left in the cylinder, in litres.
pub fn remaining_volume(cylinder: &Cylinder) -> f64 {
    cylinder.volume * cylinder.pressure * LITRES_PER_MPA
}

/// Pure oxygen drawn from the supply, in L/min.
pub fn consumption_flow(input: &CalculationInput) -> f64 {
    match input {
        CalculationInput::Simple {
            minute_volume,
            fio2,
            ..
        } => minute_volume * oxygen_share(*fio2),
        CalculationInput::Ippv { ventilation, .. } => ventilated_flow(ventilation, 0.0),
        CalculationInput::Nppv {
            ventilation, leak, ..
        } => ventilated_flow(ventilation, *leak),
        CalculationInput::O2Therapy { o2_flow, .. } => *o2_flow,
        CalculationInput::Nhf {
            total_flow, fio2, ..
        } => total_flow * oxygen_share(*fio2),
    }
}

fn ventilated_flow(ventilation: &Ventilation, leak: f64) -> f64 {
    (ventilation.minute_volume + ventilation.float_trigger + leak) * oxygen_share(ventilation.fio2)
}

/// Share of a blended flow that comes from the oxygen supply.
fn oxygen_share(fio2: f64) -> f64 {
    if fio2 > AIR_FIO2_PERCENT {
        (fio2 - AIR_FIO2_PERCENT) / (MAX_FIO2_PERCENT - AIR_FIO2_PERCENT)
    } else {
        0.0
    }
}

fn check_input(input: &CalculationInput) -> Result<(), EstimateError> {
    for (field, value) in field_values(input) {
        check_field(field, value)?;
    }

    // In-range values can still overflow once multiplied out.
    if !remaining_volume(input.cylinder()).is_finite() {
        return Err(EstimateError::invalid(Field::CylinderVolume, Violation::TooLarge));
    }
    if !consumption_flow(input).is_finite() {
        return Err(EstimateError::invalid(input.mode().fields()[2], Violation::TooLarge));
    }
    Ok(())
}

/// Values of `input` paired with their fields, in the mode's display order.
fn field_values(input: &CalculationInput) -> Vec<(Field, f64)> {
    let cylinder = input.cylinder();
    let mut values = vec![
        (Field::CylinderVolume, cylinder.volume),
        (Field::Pressure, cylinder.pressure),
    ];
    match input {
        CalculationInput::Simple {
            minute_volume,
            fio2,
            ..
        } => values.extend([(Field::MinuteVolume, *minute_volume), (Field::Fio2, *fio2)]),
        CalculationInput::Ippv { ventilation, .. } => values.extend([
            (Field::MinuteVolume, ventilation.minute_volume),
            (Field::FloatTrigger, ventilation.float_trigger),
            (Field::Fio2, ventilation.fio2),
        ]),
        CalculationInput::Nppv {
            ventilation, leak, ..
        } => values.extend([
            (Field::MinuteVolume, ventilation.minute_volume),
            (Field::FloatTrigger, ventilation.float_trigger),
            (Field::LeakMv, *leak),
            (Field::Fio2, ventilation.fio2),
        ]),
        CalculationInput::O2Therapy { o2_flow, .. } => values.push((Field::O2Flow, *o2_flow)),
        CalculationInput::Nhf {
            total_flow, fio2, ..
        } => values.extend([(Field::TotalFlow, *total_flow), (Field::Fio2, *fio2)]),
    }
    values
}

/// Range rule for a single field value.
pub(crate) fn check_field(field: Field, value: f64) -> Result<(), EstimateError> {
    if !value.is_finite() {
        return Err(EstimateError::invalid(field, Violation::NotNumeric));
    }

    let violation = match field {
        Field::CylinderVolume | Field::MinuteVolume | Field::O2Flow | Field::TotalFlow
            if value <= 0.0 =>
        {
            Violation::NotPositive
        }
        Field::Pressure | Field::FloatTrigger | Field::LeakMv if value < 0.0 => {
            Violation::Negative
        }
        Field::Fio2 if !(AIR_FIO2_PERCENT..=MAX_FIO2_PERCENT).contains(&value) => {
            Violation::OutOfRange {
                min: AIR_FIO2_PERCENT,
                max: MAX_FIO2_PERCENT,
            }
        }
        _ => return Ok(()),
    };
    Err(EstimateError::invalid(field, violation))
}
