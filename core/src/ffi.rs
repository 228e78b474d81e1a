//! Functions exported through the `o2supply` UniFFI namespace.
//!
//! Host shells call these once per input change; every call is independent.

use crate::config::EstimatorConfig;
use crate::display::{self, DisplayResult, Locale, ReadoutText};
use crate::error::{ConfigError, EstimateError};
use crate::estimator::{DurationEstimator, Readout};
use crate::models::{CalculationInput, CalculationResult, DeviceMode, Field, RawFields};
use crate::parser;

pub fn parse_mode(selector: String) -> Option<DeviceMode> {
    DeviceMode::from_selector(&selector)
}

pub fn visible_fields(mode: DeviceMode) -> Vec<Field> {
    mode.fields().to_vec()
}

pub fn read_input(mode: DeviceMode, fields: RawFields) -> Result<CalculationInput, EstimateError> {
    parser::read_input(mode, &fields)
}

pub fn validate_input(input: CalculationInput) -> Result<(), EstimateError> {
    DurationEstimator::default().validate(&input)
}

pub fn is_valid(mode: DeviceMode, fields: RawFields) -> bool {
    DurationEstimator::default().is_valid(mode, &fields)
}

pub fn compute(input: CalculationInput) -> CalculationResult {
    DurationEstimator::default().compute(&input)
}

pub fn estimate(mode: DeviceMode, fields: RawFields) -> Readout {
    DurationEstimator::default().estimate(mode, &fields)
}

pub fn estimate_with_config(
    config: EstimatorConfig,
    mode: DeviceMode,
    fields: RawFields,
) -> Readout {
    DurationEstimator::new(config).estimate(mode, &fields)
}

/// Full cycle rendered in `config.locale`.
pub fn estimate_text_with_config(
    config: EstimatorConfig,
    mode: DeviceMode,
    fields: RawFields,
) -> ReadoutText {
    DurationEstimator::new(config).estimate_text(mode, &fields)
}

pub fn format_result(result: CalculationResult) -> DisplayResult {
    display::format_result(&result)
}

pub fn render_readout(readout: Readout, locale: Locale) -> ReadoutText {
    display::render_readout(&readout, locale)
}

pub fn config_from_toml(source: String) -> Result<EstimatorConfig, ConfigError> {
    EstimatorConfig::load_from_str(&source)
}
