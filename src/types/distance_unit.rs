//! Drawing units declared by the `$INSUNITS` header variable

/// Unit of measure for drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i16)]
pub enum DistanceUnit {
    #[default]
    Unitless = 0,
    Inches = 1,
    Feet = 2,
    Miles = 3,
    Millimeters = 4,
    Centimeters = 5,
    Meters = 6,
    Kilometers = 7,
    Microinches = 8,
    Mils = 9,
    Yards = 10,
    Angstroms = 11,
    Nanometers = 12,
    Microns = 13,
    Decimeters = 14,
    Decameters = 15,
    Hectometers = 16,
    Gigameters = 17,
    AstronomicalUnits = 18,
    LightYears = 19,
    Parsecs = 20,
}

impl DistanceUnit {
    /// Create from the `$INSUNITS` code; unknown codes map to `Unitless`
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => DistanceUnit::Inches,
            2 => DistanceUnit::Feet,
            3 => DistanceUnit::Miles,
            4 => DistanceUnit::Millimeters,
            5 => DistanceUnit::Centimeters,
            6 => DistanceUnit::Meters,
            7 => DistanceUnit::Kilometers,
            8 => DistanceUnit::Microinches,
            9 => DistanceUnit::Mils,
            10 => DistanceUnit::Yards,
            11 => DistanceUnit::Angstroms,
            12 => DistanceUnit::Nanometers,
            13 => DistanceUnit::Microns,
            14 => DistanceUnit::Decimeters,
            15 => DistanceUnit::Decameters,
            16 => DistanceUnit::Hectometers,
            17 => DistanceUnit::Gigameters,
            18 => DistanceUnit::AstronomicalUnits,
            19 => DistanceUnit::LightYears,
            20 => DistanceUnit::Parsecs,
            _ => DistanceUnit::Unitless,
        }
    }

    /// The `$INSUNITS` code
    pub fn code(&self) -> i16 {
        *self as i16
    }

    /// Length of one unit in meters, `None` when unitless
    pub fn meters_per_unit(&self) -> Option<f64> {
        let meters = match self {
            DistanceUnit::Unitless => return None,
            DistanceUnit::Inches => 0.0254,
            DistanceUnit::Feet => 0.3048,
            DistanceUnit::Miles => 1609.344,
            DistanceUnit::Millimeters => 1e-3,
            DistanceUnit::Centimeters => 1e-2,
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => 1e3,
            DistanceUnit::Microinches => 0.0254e-6,
            DistanceUnit::Mils => 0.0254e-3,
            DistanceUnit::Yards => 0.9144,
            DistanceUnit::Angstroms => 1e-10,
            DistanceUnit::Nanometers => 1e-9,
            DistanceUnit::Microns => 1e-6,
            DistanceUnit::Decimeters => 1e-1,
            DistanceUnit::Decameters => 1e1,
            DistanceUnit::Hectometers => 1e2,
            DistanceUnit::Gigameters => 1e9,
            DistanceUnit::AstronomicalUnits => 1.495_978_707e11,
            DistanceUnit::LightYears => 9.460_730_472_580_8e15,
            DistanceUnit::Parsecs => 3.085_677_581_491_367e16,
        };
        Some(meters)
    }
}
