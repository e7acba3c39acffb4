//! Kinetic-theory formulas for an ideal gas.
//!
//! None of these validate their inputs: a zero or negative mass/temperature
//! yields NaN or infinity, which then propagates through the engine.

use std::f64::consts::PI;

/// Boltzmann constant k_B in J/K.
pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-23;

/// Atomic mass unit in kg (rounded).
pub const ATOMIC_MASS_UNIT: f64 = 1.66e-27;

/// Speed scale `sqrt(3 k_B T / m)` used to randomize particle velocities.
#[inline]
pub fn average_velocity(temperature: f64, mass: f64) -> f64 {
    (3.0 * BOLTZMANN_CONSTANT * temperature / mass).sqrt()
}

/// Mean translational kinetic energy per particle, `3/2 k_B T`.
#[inline]
pub fn mean_kinetic_energy(temperature: f64) -> f64 {
    1.5 * BOLTZMANN_CONSTANT * temperature
}

/// Most probable speed of the Maxwell distribution, `sqrt(2 k_B T / m)`.
#[inline]
pub fn most_probable_speed(temperature: f64, mass: f64) -> f64 {
    (2.0 * BOLTZMANN_CONSTANT * temperature / mass).sqrt()
}

/// Mean speed of the Maxwell distribution, `sqrt(8 k_B T / (pi m))`.
#[inline]
pub fn mean_speed(temperature: f64, mass: f64) -> f64 {
    (8.0 * BOLTZMANN_CONSTANT * temperature / (PI * mass)).sqrt()
}

/// The headline numbers for a given temperature and particle mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalStats {
    pub mean_kinetic_energy: f64,
    pub average_velocity: f64,
    pub most_probable_speed: f64,
    pub mean_speed: f64,
}

impl ThermalStats {
    pub fn new(temperature: f64, mass: f64) -> Self {
        Self {
            mean_kinetic_energy: mean_kinetic_energy(temperature),
            average_velocity: average_velocity(temperature, mass),
            most_probable_speed: most_probable_speed(temperature, mass),
            mean_speed: mean_speed(temperature, mass),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-12
    }

    #[test]
    fn oxygen_at_100k() {
        let m = 16.0 * ATOMIC_MASS_UNIT;
        let s = ThermalStats::new(100.0, m);
        assert!(close(s.average_velocity, (3.0 * BOLTZMANN_CONSTANT * 100.0 / m).sqrt()));
        // ~394.9 m/s
        assert!((s.average_velocity - 394.9).abs() < 1.0);
        assert!(close(s.mean_kinetic_energy, 1.5 * BOLTZMANN_CONSTANT * 100.0));
        assert!(s.most_probable_speed < s.mean_speed);
        assert!(s.mean_speed < s.average_velocity);
    }

    #[test]
    fn speed_ratios_are_mass_independent() {
        let a = ThermalStats::new(300.0, 1.0e-26);
        let b = ThermalStats::new(300.0, 7.0e-26);
        assert!(close(
            a.average_velocity / a.most_probable_speed,
            b.average_velocity / b.most_probable_speed
        ));
        assert!(close(a.average_velocity / a.most_probable_speed, 1.5_f64.sqrt()));
    }

    #[test]
    fn degenerate_inputs_propagate() {
        assert!(average_velocity(100.0, 0.0).is_infinite());
        assert!(average_velocity(-100.0, 1.0).is_nan());
    }
}
