//! 2D ideal-gas kinetic model.
//!
//! Circular particles bounce elastically off each other and off the walls of
//! a rectangle; their speeds follow the temperature and particle mass via
//! `v = sqrt(3 k_B T / m)`. Bounds, population, mass, temperature, color and
//! timestep can all change while the simulation runs.
//!
//! ```
//! use idealgas::config::{ConfigDelta, Settings};
//! use idealgas::core::FrameDriver;
//!
//! let mut driver = FrameDriver::from_settings(&Settings {
//!     particle_count: 50,
//!     seed: Some(1),
//!     ..Settings::default()
//! })?;
//! driver.frame(&ConfigDelta::new().with_temperature(300.0));
//! assert_eq!(driver.simulation().draw_list().count(), 50);
//! # Ok::<(), idealgas::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python {
    use numpy::ndarray::{Array1, Array2};
    use numpy::{IntoPyArray, PyArray1, PyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{ConfigDelta, Settings};
    use crate::core::{FrameDriver, GrowthPolicy};

    fn py_err<E: ToString>(e: E) -> PyErr {
        PyValueError::new_err(e.to_string())
    }

    /// Python-facing wrapper around the frame driver.
    ///
    /// - __new__(width=800, height=800, particle_count=200, radius=5.0, mass=16u,
    ///   temperature=100.0, color="#73c875", simulation_speed=0.01,
    ///   inclusive_growth=False, seed=None)
    /// - update(**delta) / frame(**delta) / step()
    /// - get_positions() -> (N, 2), get_velocities() -> (N, 2),
    ///   get_colors() -> (N, 3) uint8, get_radii() -> (N,)
    #[pyclass]
    pub struct IdealGas {
        driver: FrameDriver,
    }

    #[allow(clippy::too_many_arguments)]
    fn delta(
        canvas_width: Option<u32>,
        canvas_height: Option<u32>,
        particle_count: Option<usize>,
        mass: Option<f64>,
        temperature: Option<f64>,
        color: Option<String>,
        simulation_speed: Option<f64>,
        is_paused: Option<bool>,
    ) -> ConfigDelta {
        ConfigDelta {
            canvas_width,
            canvas_height,
            particle_count,
            mass,
            temperature,
            color,
            simulation_speed,
            is_paused,
        }
    }

    #[pymethods]
    impl IdealGas {
        /// Create and populate a simulation.
        ///
        /// Errors: raises ValueError on a bad color or non-positive bounds.
        #[new]
        #[pyo3(signature = (
            width=800, height=800, particle_count=200, radius=5.0, mass=None,
            temperature=100.0, color="#73c875".to_string(), simulation_speed=0.01,
            inclusive_growth=false, seed=None
        ))]
        #[allow(clippy::too_many_arguments)]
        fn new(
            width: u32,
            height: u32,
            particle_count: usize,
            radius: f64,
            mass: Option<f64>,
            temperature: f64,
            color: String,
            simulation_speed: f64,
            inclusive_growth: bool,
            seed: Option<u64>,
        ) -> PyResult<Self> {
            let defaults = Settings::default();
            let settings = Settings {
                width,
                height,
                particle_count,
                radius,
                mass: mass.unwrap_or(defaults.mass),
                temperature,
                color,
                simulation_speed,
                growth: if inclusive_growth {
                    GrowthPolicy::Inclusive
                } else {
                    GrowthPolicy::Exact
                },
                seed,
            };
            let driver = FrameDriver::from_settings(&settings).map_err(py_err)?;
            Ok(Self { driver })
        }

        /// Apply a sparse configuration change without stepping.
        ///
        /// Returns True if anything changed. Out-of-range values are ignored.
        #[pyo3(signature = (
            canvas_width=None, canvas_height=None, particle_count=None, mass=None,
            temperature=None, color=None, simulation_speed=None, is_paused=None
        ))]
        #[allow(clippy::too_many_arguments)]
        fn update(
            &mut self,
            canvas_width: Option<u32>,
            canvas_height: Option<u32>,
            particle_count: Option<usize>,
            mass: Option<f64>,
            temperature: Option<f64>,
            color: Option<String>,
            simulation_speed: Option<f64>,
            is_paused: Option<bool>,
        ) -> bool {
            let d = delta(
                canvas_width,
                canvas_height,
                particle_count,
                mass,
                temperature,
                color,
                simulation_speed,
                is_paused,
            );
            if let Some(paused) = d.is_paused {
                self.driver.set_paused(paused);
            }
            self.driver.simulation_mut().apply_config(&d).any()
        }

        /// Apply a configuration change, then step unless paused.
        ///
        /// Returns True if a physics step ran.
        #[pyo3(signature = (
            canvas_width=None, canvas_height=None, particle_count=None, mass=None,
            temperature=None, color=None, simulation_speed=None, is_paused=None
        ))]
        #[allow(clippy::too_many_arguments)]
        fn frame(
            &mut self,
            py: Python<'_>,
            canvas_width: Option<u32>,
            canvas_height: Option<u32>,
            particle_count: Option<usize>,
            mass: Option<f64>,
            temperature: Option<f64>,
            color: Option<String>,
            simulation_speed: Option<f64>,
            is_paused: Option<bool>,
        ) -> bool {
            let d = delta(
                canvas_width,
                canvas_height,
                particle_count,
                mass,
                temperature,
                color,
                simulation_speed,
                is_paused,
            );
            py.detach(|| self.driver.frame(&d)).stepped()
        }

        /// Run one physics step regardless of the pause flag.
        /// Returns (pair_collisions, wall_bounces).
        fn step(&mut self, py: Python<'_>) -> (usize, usize) {
            let stats = py.detach(|| self.driver.simulation_mut().step());
            (stats.pair_collisions, stats.wall_bounces)
        }

        #[getter]
        fn is_paused(&self) -> bool {
            self.driver.is_paused()
        }

        fn num_particles(&self) -> usize {
            self.driver.simulation().num_particles()
        }

        /// Total kinetic energy of all particles.
        fn kinetic_energy(&self) -> f64 {
            self.driver.simulation().kinetic_energy()
        }

        /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
        fn get_positions<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
            let sim = self.driver.simulation();
            let mut arr = Array2::<f64>::zeros((sim.num_particles(), 2));
            for (i, p) in sim.particles().iter().enumerate() {
                arr[[i, 0]] = p.position.x;
                arr[[i, 1]] = p.position.y;
            }
            arr.into_pyarray(py).unbind()
        }

        /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
        fn get_velocities<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
            let sim = self.driver.simulation();
            let mut arr = Array2::<f64>::zeros((sim.num_particles(), 2));
            for (i, p) in sim.particles().iter().enumerate() {
                arr[[i, 0]] = p.velocity.x;
                arr[[i, 1]] = p.velocity.y;
            }
            arr.into_pyarray(py).unbind()
        }

        /// Return colors as a NumPy array of shape (N, 3), dtype=uint8.
        fn get_colors<'py>(&self, py: Python<'py>) -> Py<PyArray2<u8>> {
            let sim = self.driver.simulation();
            let mut arr = Array2::<u8>::zeros((sim.num_particles(), 3));
            for (i, c) in sim.draw_list().enumerate() {
                for (k, v) in c.color.to_array().into_iter().enumerate() {
                    arr[[i, k]] = v;
                }
            }
            arr.into_pyarray(py).unbind()
        }

        /// Return radii as a NumPy array of shape (N,), dtype=float64.
        fn get_radii<'py>(&self, py: Python<'py>) -> Py<PyArray1<f64>> {
            let radii: Array1<f64> = self.driver.simulation().draw_list().map(|c| c.radius).collect();
            radii.into_pyarray(py).unbind()
        }
    }

    /// The idealgas Python module entry point.
    #[pymodule]
    fn idealgas(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<IdealGas>()?;
        Ok(())
    }
}
