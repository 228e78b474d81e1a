//! Stateless compute core estimating how long a medical oxygen supply lasts.
//!
//! ```
//! use o2supply_compute::{DeviceMode, DurationEstimator, Field, RawFields};
//!
//! let fields = RawFields::default()
//!     .with(Field::CylinderVolume, "7")
//!     .with(Field::Pressure, "10")
//!     .with(Field::O2Flow, "2");
//!
//! let readout = DurationEstimator::default().estimate(DeviceMode::O2Therapy, &fields);
//! let result = readout.result().expect("valid input");
//! assert!((result.available_duration - 35.0).abs() < f64::EPSILON);
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod estimator;
pub mod ffi;
pub mod logging;
pub mod models;
pub mod parser;

uniffi::include_scaffolding!("o2supply");

pub use config::EstimatorConfig;
pub use display::{DisplayResult, DurationDisplay, Locale, ReadoutText};
pub use error::{ConfigError, EstimateError, Violation};
pub use estimator::{DurationEstimator, Readout};
pub use ffi::{
    compute, config_from_toml, estimate, estimate_text_with_config, estimate_with_config,
    format_result, is_valid, parse_mode, read_input, render_readout, validate_input,
    visible_fields,
};
pub use logging::init_logging;
pub use models::{
    CalculationInput, CalculationResult, Cylinder, DeviceMode, Field, RawFields, Ventilation,
};
