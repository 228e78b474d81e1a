//! Reading raw field text into typed calculation inputs.
//!
//! Field text is a plain decimal number with optional surrounding
//! whitespace (`"15"`, `" 0.5"`, `"1e1"`). Anything else is rejected rather
//! than read as zero, except for the fields listed by
//! [`Field::defaults_to_zero`].

use nom::{
    character::complete::multispace0,
    combinator::{all_consuming, map_res},
    number::complete::recognize_float,
    sequence::delimited,
    IResult, Parser,
};

use crate::error::{EstimateError, Violation};
use crate::estimator::check_field;
use crate::models::{CalculationInput, Cylinder, DeviceMode, Field, RawFields, Ventilation};

/// Parse one field's text into a finite number.
pub fn parse_decimal(text: &str) -> Result<f64, Violation> {
    if text.trim().is_empty() {
        return Err(Violation::Missing);
    }

    match field_value(text) {
        Ok((_, value)) if value.is_finite() => Ok(value),
        _ => Err(Violation::NotNumeric),
    }
}

fn field_value(input: &str) -> IResult<&str, f64> {
    all_consuming(delimited(multispace0, decimal, multispace0)).parse(input)
}

fn decimal(input: &str) -> IResult<&str, f64> {
    map_res(recognize_float, |s: &str| s.parse::<f64>()).parse(input)
}

/// Read the fields `mode` uses into a typed input.
///
/// Each field is parsed and range-checked before the next one is read,
/// cylinder first and then in the mode's display order, so the first
/// reported error is the first bad field a user sees on screen.
pub fn read_input(mode: DeviceMode, fields: &RawFields) -> Result<CalculationInput, EstimateError> {
    let cylinder = Cylinder {
        volume: required(fields, Field::CylinderVolume)?,
        pressure: required(fields, Field::Pressure)?,
    };

    let input = match mode {
        DeviceMode::Simple => CalculationInput::Simple {
            cylinder,
            minute_volume: required(fields, Field::MinuteVolume)?,
            fio2: required(fields, Field::Fio2)?,
        },
        DeviceMode::Ippv => {
            let minute_volume = required(fields, Field::MinuteVolume)?;
            let float_trigger = or_zero(fields, Field::FloatTrigger)?;
            let fio2 = required(fields, Field::Fio2)?;
            CalculationInput::Ippv {
                cylinder,
                ventilation: Ventilation {
                    minute_volume,
                    float_trigger,
                    fio2,
                },
            }
        }
        DeviceMode::Nppv => {
            let minute_volume = required(fields, Field::MinuteVolume)?;
            let float_trigger = or_zero(fields, Field::FloatTrigger)?;
            let leak = or_zero(fields, Field::LeakMv)?;
            let fio2 = required(fields, Field::Fio2)?;
            CalculationInput::Nppv {
                cylinder,
                ventilation: Ventilation {
                    minute_volume,
                    float_trigger,
                    fio2,
                },
                leak,
            }
        }
        DeviceMode::O2Therapy => CalculationInput::O2Therapy {
            cylinder,
            o2_flow: required(fields, Field::O2Flow)?,
        },
        DeviceMode::Nhf => CalculationInput::Nhf {
            cylinder,
            total_flow: required(fields, Field::TotalFlow)?,
            fio2: required(fields, Field::Fio2)?,
        },
    };

    Ok(input)
}

fn required(fields: &RawFields, field: Field) -> Result<f64, EstimateError> {
    let value = parse_decimal(fields.get(field).unwrap_or_default())
        .map_err(|violation| EstimateError::invalid(field, violation))?;
    check_field(field, value)?;
    Ok(value)
}

fn or_zero(fields: &RawFields, field: Field) -> Result<f64, EstimateError> {
    debug_assert!(field.defaults_to_zero());
    let value = parse_decimal(fields.get(field).unwrap_or_default()).unwrap_or(0.0);
    check_field(field, value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("42"), Ok(42.0));
        assert_eq!(parse_decimal("3.5"), Ok(3.5));
        assert_eq!(parse_decimal("  15 "), Ok(15.0));
        assert_eq!(parse_decimal(".5"), Ok(0.5));
        assert_eq!(parse_decimal("1e1"), Ok(10.0));
        assert_eq!(parse_decimal("-2"), Ok(-2.0));
        assert_eq!(parse_decimal("+7"), Ok(7.0));
    }

    #[test]
    fn test_parse_decimal_missing() {
        assert_eq!(parse_decimal(""), Err(Violation::Missing));
        assert_eq!(parse_decimal("   "), Err(Violation::Missing));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal("abc"), Err(Violation::NotNumeric));
        assert_eq!(parse_decimal("12abc"), Err(Violation::NotNumeric));
        assert_eq!(parse_decimal("1,5"), Err(Violation::NotNumeric));
        assert_eq!(parse_decimal("1 2"), Err(Violation::NotNumeric));
        assert_eq!(parse_decimal("NaN"), Err(Violation::NotNumeric));
        assert_eq!(parse_decimal("inf"), Err(Violation::NotNumeric));
        assert_eq!(parse_decimal("1e999"), Err(Violation::NotNumeric));
    }

    fn cylinder_fields() -> RawFields {
        RawFields::default()
            .with(Field::CylinderVolume, "10")
            .with(Field::Pressure, "15")
    }

    #[test]
    fn test_read_simple() {
        let raw = cylinder_fields()
            .with(Field::MinuteVolume, "6")
            .with(Field::Fio2, "40")
            .with(Field::FloatTrigger, "3");
        let input = read_input(DeviceMode::Simple, &raw).unwrap();
        assert_eq!(
            input,
            CalculationInput::Simple {
                cylinder: Cylinder {
                    volume: 10.0,
                    pressure: 15.0,
                },
                minute_volume: 6.0,
                fio2: 40.0,
            }
        );
    }

    #[test]
    fn test_read_nppv() {
        let raw = cylinder_fields()
            .with(Field::MinuteVolume, "5")
            .with(Field::FloatTrigger, "1")
            .with(Field::LeakMv, "2")
            .with(Field::Fio2, "31");
        let input = read_input(DeviceMode::Nppv, &raw).unwrap();
        if let CalculationInput::Nppv {
            ventilation, leak, ..
        } = input
        {
            assert_eq!(ventilation.minute_volume, 5.0);
            assert_eq!(ventilation.float_trigger, 1.0);
            assert_eq!(ventilation.fio2, 31.0);
            assert_eq!(leak, 2.0);
        } else {
            panic!("Expected NPPV input");
        }
    }

    #[test]
    fn test_optional_fields_default_to_zero() {
        let raw = cylinder_fields()
            .with(Field::MinuteVolume, "5")
            .with(Field::FloatTrigger, "oops")
            .with(Field::Fio2, "31");
        let input = read_input(DeviceMode::Nppv, &raw).unwrap();
        if let CalculationInput::Nppv {
            ventilation, leak, ..
        } = input
        {
            assert_eq!(ventilation.float_trigger, 0.0);
            assert_eq!(leak, 0.0);
        } else {
            panic!("Expected NPPV input");
        }
    }

    #[test]
    fn test_negative_optional_field_is_rejected() {
        let raw = cylinder_fields()
            .with(Field::MinuteVolume, "5")
            .with(Field::FloatTrigger, "-1")
            .with(Field::Fio2, "31");
        let err = read_input(DeviceMode::Ippv, &raw).unwrap_err();
        assert_eq!(
            err,
            EstimateError::invalid(Field::FloatTrigger, Violation::Negative)
        );
    }

    #[test]
    fn test_cylinder_range_reported_before_later_missing_field() {
        let raw = RawFields::default()
            .with(Field::CylinderVolume, "10")
            .with(Field::Pressure, "-1")
            .with(Field::Fio2, "40");
        let err = read_input(DeviceMode::Ippv, &raw).unwrap_err();
        assert_eq!(err, EstimateError::invalid(Field::Pressure, Violation::Negative));
    }

    #[test]
    fn test_errors_follow_display_order() {
        // Out-of-range minute volume comes before the unparseable FiO2.
        let raw = cylinder_fields()
            .with(Field::MinuteVolume, "0")
            .with(Field::Fio2, "");
        let err = read_input(DeviceMode::Simple, &raw).unwrap_err();
        assert_eq!(
            err,
            EstimateError::invalid(Field::MinuteVolume, Violation::NotPositive)
        );

        // NPPV shows leak before FiO2.
        let raw = cylinder_fields()
            .with(Field::MinuteVolume, "5")
            .with(Field::LeakMv, "-1")
            .with(Field::Fio2, "101");
        let err = read_input(DeviceMode::Nppv, &raw).unwrap_err();
        assert_eq!(err, EstimateError::invalid(Field::LeakMv, Violation::Negative));
    }

    #[test]
    fn test_required_field_errors() {
        let raw = cylinder_fields().with(Field::Fio2, "40");
        let err = read_input(DeviceMode::Ippv, &raw).unwrap_err();
        assert_eq!(
            err,
            EstimateError::invalid(Field::MinuteVolume, Violation::Missing)
        );

        let raw = cylinder_fields().with(Field::O2Flow, "two");
        let err = read_input(DeviceMode::O2Therapy, &raw).unwrap_err();
        assert_eq!(
            err,
            EstimateError::invalid(Field::O2Flow, Violation::NotNumeric)
        );

        let raw = RawFields::default().with(Field::Pressure, "15");
        let err = read_input(DeviceMode::Nhf, &raw).unwrap_err();
        assert_eq!(err.field(), Field::CylinderVolume);
    }

    #[test]
    fn test_o2_therapy_ignores_fio2() {
        let raw = cylinder_fields()
            .with(Field::O2Flow, "2")
            .with(Field::Fio2, "not a number");
        let input = read_input(DeviceMode::O2Therapy, &raw).unwrap();
        assert!(matches!(input, CalculationInput::O2Therapy { .. }));
    }
}
