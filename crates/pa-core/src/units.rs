// pa-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, Energy as UomEnergy, Length as UomLength,
    MassDensity as UomMassDensity, Power as UomPower, Pressure as UomPressure,
    Time as UomTime, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Current = UomElectricCurrent;
pub type Voltage = UomElectricPotential;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Time = UomTime;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn amps(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn volts(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn to_kw(p: Power) -> f64 {
    p.get::<uom::si::power::kilowatt>()
}

#[inline]
pub fn to_kwh(e: Energy) -> f64 {
    e.get::<uom::si::energy::kilowatt_hour>()
}

#[inline]
pub fn to_m(l: Length) -> f64 {
    l.get::<uom::si::length::meter>()
}

pub mod constants {
    pub const G0_MPS2: f64 = 9.806_65;

    /// Fresh water at ~4 °C, the density implied by 10.197 m of head per bar.
    pub const WATER_DENSITY_KG_M3: f64 = 1000.0;

    /// Upper bound for a yearly duty figure (leap year).
    pub const MAX_HOURS_PER_YEAR: f64 = 8784.0;
}
