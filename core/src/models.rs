use std::fmt;

/// Device the oxygen supply is feeding.
///
/// Selects both the input fields that apply and the consumption formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceMode {
    /// Single ventilator profile without mode selection.
    Simple,
    /// Invasive positive pressure ventilation.
    Ippv,
    /// Non-invasive positive pressure ventilation (adds mask leak).
    Nppv,
    /// Plain oxygen therapy at a set flow of pure oxygen.
    O2Therapy,
    /// Nasal high flow with a blended oxygen fraction.
    Nhf,
}

impl DeviceMode {
    pub const ALL: [DeviceMode; 5] = [
        DeviceMode::Simple,
        DeviceMode::Ippv,
        DeviceMode::Nppv,
        DeviceMode::O2Therapy,
        DeviceMode::Nhf,
    ];

    /// Parse the value a host's mode selector submits.
    pub fn from_selector(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.selector().eq_ignore_ascii_case(selector))
    }

    pub fn selector(&self) -> &'static str {
        match self {
            DeviceMode::Simple => "simple",
            DeviceMode::Ippv => "ippv",
            DeviceMode::Nppv => "nppv",
            DeviceMode::O2Therapy => "o2_therapy",
            DeviceMode::Nhf => "nhf",
        }
    }

    /// Input fields shown for this mode, in display order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            DeviceMode::Simple => &[
                Field::CylinderVolume,
                Field::Pressure,
                Field::MinuteVolume,
                Field::Fio2,
            ],
            DeviceMode::Ippv => &[
                Field::CylinderVolume,
                Field::Pressure,
                Field::MinuteVolume,
                Field::FloatTrigger,
                Field::Fio2,
            ],
            DeviceMode::Nppv => &[
                Field::CylinderVolume,
                Field::Pressure,
                Field::MinuteVolume,
                Field::FloatTrigger,
                Field::LeakMv,
                Field::Fio2,
            ],
            DeviceMode::O2Therapy => &[Field::CylinderVolume, Field::Pressure, Field::O2Flow],
            DeviceMode::Nhf => &[
                Field::CylinderVolume,
                Field::Pressure,
                Field::TotalFlow,
                Field::Fio2,
            ],
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Named input fields a host collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    CylinderVolume,
    Pressure,
    MinuteVolume,
    FloatTrigger,
    LeakMv,
    O2Flow,
    TotalFlow,
    Fio2,
}

impl Field {
    /// Key used by host forms.
    pub fn key(&self) -> &'static str {
        match self {
            Field::CylinderVolume => "cylinderVolume",
            Field::Pressure => "pressure",
            Field::MinuteVolume => "minuteVolume",
            Field::FloatTrigger => "floatTrigger",
            Field::LeakMv => "leakMv",
            Field::O2Flow => "o2Flow",
            Field::TotalFlow => "totalFlow",
            Field::Fio2 => "fio2",
        }
    }

    /// Fields read as zero when left blank or unparseable.
    pub fn defaults_to_zero(&self) -> bool {
        matches!(self, Field::FloatTrigger | Field::LeakMv)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Oxygen cylinder as read off its label and gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    /// Internal (water) capacity in litres.
    pub volume: f64,
    /// Gauge reading in MPa.
    pub pressure: f64,
}

/// Ventilator settings shared by IPPV and NPPV.
#[derive(Clone, Debug, PartialEq)]
pub struct Ventilation {
    /// Minute volume in L/min.
    pub minute_volume: f64,
    /// Bias (float trigger) flow in L/min.
    pub float_trigger: f64,
    /// Inspired oxygen concentration in percent.
    pub fio2: f64,
}

/// Typed calculation input, one variant per [`DeviceMode`].
#[derive(Clone, Debug, PartialEq)]
pub enum CalculationInput {
    Simple {
        cylinder: Cylinder,
        minute_volume: f64,
        fio2: f64,
    },
    Ippv {
        cylinder: Cylinder,
        ventilation: Ventilation,
    },
    Nppv {
        cylinder: Cylinder,
        ventilation: Ventilation,
        /// Mask leak in L/min.
        leak: f64,
    },
    O2Therapy {
        cylinder: Cylinder,
        /// Pure oxygen flow in L/min.
        o2_flow: f64,
    },
    Nhf {
        cylinder: Cylinder,
        /// Total blended flow in L/min.
        total_flow: f64,
        fio2: f64,
    },
}

impl CalculationInput {
    pub fn mode(&self) -> DeviceMode {
        match self {
            CalculationInput::Simple { .. } => DeviceMode::Simple,
            CalculationInput::Ippv { .. } => DeviceMode::Ippv,
            CalculationInput::Nppv { .. } => DeviceMode::Nppv,
            CalculationInput::O2Therapy { .. } => DeviceMode::O2Therapy,
            CalculationInput::Nhf { .. } => DeviceMode::Nhf,
        }
    }

    pub fn cylinder(&self) -> &Cylinder {
        match self {
            CalculationInput::Simple { cylinder, .. }
            | CalculationInput::Ippv { cylinder, .. }
            | CalculationInput::Nppv { cylinder, .. }
            | CalculationInput::O2Therapy { cylinder, .. }
            | CalculationInput::Nhf { cylinder, .. } => cylinder,
        }
    }
}

/// Raw field text as typed by the user. `None` and blank text are equivalent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawFields {
    pub cylinder_volume: Option<String>,
    pub pressure: Option<String>,
    pub minute_volume: Option<String>,
    pub float_trigger: Option<String>,
    pub leak_mv: Option<String>,
    pub o2_flow: Option<String>,
    pub total_flow: Option<String>,
    pub fio2: Option<String>,
}

impl RawFields {
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::CylinderVolume => &self.cylinder_volume,
            Field::Pressure => &self.pressure,
            Field::MinuteVolume => &self.minute_volume,
            Field::FloatTrigger => &self.float_trigger,
            Field::LeakMv => &self.leak_mv,
            Field::O2Flow => &self.o2_flow,
            Field::TotalFlow => &self.total_flow,
            Field::Fio2 => &self.fio2,
        };
        value.as_deref()
    }

    /// Builder-style setter keyed by [`Field`].
    pub fn with(mut self, field: Field, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match field {
            Field::CylinderVolume => self.cylinder_volume = text,
            Field::Pressure => self.pressure = text,
            Field::MinuteVolume => self.minute_volume = text,
            Field::FloatTrigger => self.float_trigger = text,
            Field::LeakMv => self.leak_mv = text,
            Field::O2Flow => self.o2_flow = text,
            Field::TotalFlow => self.total_flow = text,
            Field::Fio2 => self.fio2 = text,
        }
        self
    }
}

/// Output of one estimate. Durations are `f64::INFINITY` when nothing is consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    /// Litres of gas left in the cylinder.
    pub remaining_volume: f64,
    /// Oxygen drawn from the cylinder in L/min.
    pub consumption_flow: f64,
    /// Minutes until empty.
    pub available_duration: f64,
    /// Minutes until empty after the safety factor.
    pub safe_duration: f64,
}
