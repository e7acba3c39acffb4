use crate::config::{
    ConfigDelta, Settings, CANVAS_MAX, CANVAS_MIN, PARTICLE_COUNT_MAX, PARTICLE_COUNT_MIN,
};
use crate::core::color::ColorRgb;
use crate::core::particle::{Particle, ParticleSpec};
use crate::core::thermo::ThermalStats;
use crate::core::vector::Vector2D;
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

/// How far `set_particle_count` grows the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Grow until the population equals the target.
    #[default]
    Exact,
    /// Grow while `len <= target`, ending with `target + 1` particles.
    Inclusive,
}

/// Counters for a single [`Simulation::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particle pairs whose velocities were exchanged.
    pub pair_collisions: usize,
    /// Particles that had one velocity axis reversed by a wall.
    pub wall_bounces: usize,
}

/// Which reconfigurations a [`ConfigDelta`] actually triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    /// Width and height were replaced.
    pub bounds: bool,
    /// Mass changed and velocities were re-drawn.
    pub mass: bool,
    /// Temperature changed and velocities were re-drawn.
    pub temperature: bool,
    /// Particles were added or removed.
    pub population: bool,
    /// Every particle was recolored.
    pub color: bool,
    /// The timestep changed.
    pub speed: bool,
}

impl AppliedChanges {
    pub fn any(&self) -> bool {
        self.bounds || self.mass || self.temperature || self.population || self.color || self.speed
    }
}

/// What a renderer needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Particle position.
    pub center: Vector2D,
    /// Particle radius.
    pub radius: f64,
    /// Fill color.
    pub color: ColorRgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Bounded 2D box of elastic particles, advanced one frame at a time.
///
/// The domain is `[0, width] x [0, height]`. Mass, temperature and color are
/// held as ambient parameters and pushed to every particle on change, so
/// particles never diverge in those attributes.
#[derive(Debug)]
pub struct Simulation {
    width: f64,
    height: f64,
    timestep: f64,
    particles: Vec<Particle>,
    ambient: ParticleSpec,
    growth: GrowthPolicy,
    population_target: usize,
    rng: StdRng,
}

impl Simulation {
    /// Create an empty simulation with timestep 1.
    ///
    /// `seed` makes every random draw (placement and velocities) reproducible;
    /// `None` seeds from the thread RNG.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `width` or `height` is not finite and > 0.
    pub fn new(width: f64, height: f64, ambient: ParticleSpec, seed: Option<u64>) -> Result<Self> {
        check_bounds(width, height)?;
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Ok(Self {
            width,
            height,
            timestep: 1.0,
            particles: Vec::new(),
            ambient,
            growth: GrowthPolicy::default(),
            population_target: 0,
            rng,
        })
    }

    /// Build and populate a simulation from [`Settings`].
    ///
    /// The initial population is exactly `settings.particle_count` whatever the
    /// growth policy.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let ambient = settings.ambient()?;
        let mut sim = Self::new(
            f64::from(settings.width),
            f64::from(settings.height),
            ambient,
            settings.seed,
        )?;
        sim.growth = settings.growth;
        sim.set_timestep(settings.simulation_speed);
        sim.spawn_until(settings.particle_count, ambient);
        sim.population_target = settings.particle_count;
        debug!(
            width = sim.width,
            height = sim.height,
            particles = sim.particles.len(),
            "simulation initialised"
        );
        Ok(sim)
    }

    pub fn with_growth_policy(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    // ============ Queries ============

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Current ambient radius/mass/temperature/color.
    pub fn ambient(&self) -> ParticleSpec {
        self.ambient
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn positions(&self) -> Vec<Vector2D> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn velocities(&self) -> Vec<Vector2D> {
        self.particles.iter().map(|p| p.velocity).collect()
    }

    /// Read-only render view, one circle per particle in collection order.
    pub fn draw_list(&self) -> impl Iterator<Item = Circle> + '_ {
        self.particles.iter().map(|p| Circle {
            center: p.position,
            radius: p.radius,
            color: p.color,
        })
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Total linear momentum (diagnostic).
    pub fn momentum(&self) -> Vector2D {
        self.particles
            .iter()
            .fold(Vector2D::ZERO, |acc, p| acc + p.momentum())
    }

    /// Kinetic-theory figures for the ambient temperature and mass.
    pub fn thermal_stats(&self) -> ThermalStats {
        ThermalStats::new(self.ambient.temperature, self.ambient.mass)
    }

    // ============ Frame update ============

    /// Advance one frame.
    ///
    /// 1. Visit every pair `(i, j)` with `i < j` in ascending order and test
    ///    it against the current velocities, so a pair turned towards each
    ///    other by an earlier pair in the same frame still collides. Both new
    ///    velocities are computed before either is written.
    /// 2. Bounce off walls, at most one axis per particle.
    /// 3. Move every particle by `velocity * timestep`.
    pub fn step(&mut self) -> StepStats {
        let mut stats = StepStats::default();

        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.resolve_contact(i, j) {
                    stats.pair_collisions += 1;
                }
            }
        }

        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            match wall_contact(p, width, height) {
                Some(Axis::Y) => p.reverse_y_velocity(),
                Some(Axis::X) => p.reverse_x_velocity(),
                None => continue,
            }
            stats.wall_bounces += 1;
        }

        let dt = self.timestep;
        for p in &mut self.particles {
            p.update_position(dt);
        }

        trace!(
            pair_collisions = stats.pair_collisions,
            wall_bounces = stats.wall_bounces,
            "step"
        );
        stats
    }

    // ============ Reconfiguration ============

    /// Resize the domain, pinning particles that now lie beyond an edge to
    /// `bound - 1` on that axis. Positions inside the new box are untouched.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if either bound is not finite and > 0.
    pub fn set_bounds(&mut self, width: f64, height: f64) -> Result<()> {
        check_bounds(width, height)?;
        self.width = width;
        self.height = height;
        let mut pinned = 0usize;
        for p in &mut self.particles {
            let mut moved = false;
            if p.position.x > width {
                p.position.x = width - 1.0;
                moved = true;
            }
            if p.position.y > height {
                p.position.y = height - 1.0;
                moved = true;
            }
            pinned += usize::from(moved);
        }
        debug!(width, height, pinned, "bounds changed");
        Ok(())
    }

    /// Grow or shrink the population towards `target`.
    ///
    /// Growing appends particles spawned from `spec` at uniform random
    /// positions inside the box (overlaps are not resolved); how far depends on
    /// the [`GrowthPolicy`]. Shrinking drops particles from the end.
    pub fn set_particle_count(&mut self, target: usize, spec: ParticleSpec) {
        let before = self.particles.len();
        match target.cmp(&before) {
            Ordering::Greater => {
                let goal = match self.growth {
                    GrowthPolicy::Exact => target,
                    GrowthPolicy::Inclusive => target + 1,
                };
                self.spawn_until(goal, spec);
            }
            Ordering::Less => self.particles.truncate(target),
            Ordering::Equal => {}
        }
        self.population_target = target;
        debug!(target, before, after = self.particles.len(), "population changed");
    }

    /// Set the temperature of every particle and re-randomize all velocities,
    /// even if the temperature did not change.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.ambient.temperature = temperature;
        for p in &mut self.particles {
            p.temperature = temperature;
            p.update_velocity(&mut self.rng);
        }
        debug!(temperature, "temperature changed");
    }

    /// Set the mass of every particle and re-randomize all velocities,
    /// even if the mass did not change.
    pub fn set_mass(&mut self, mass: f64) {
        self.ambient.mass = mass;
        for p in &mut self.particles {
            p.mass = mass;
            p.update_velocity(&mut self.rng);
        }
        debug!(mass, "mass changed");
    }

    /// Parse `hex` and recolor every particle.
    ///
    /// Errors:
    /// - `Error::InvalidColor` if `hex` does not parse; nothing is changed.
    pub fn set_color(&mut self, hex: &str) -> Result<()> {
        let color = ColorRgb::from_hex(hex)?;
        self.set_color_rgb(color);
        Ok(())
    }

    pub fn set_color_rgb(&mut self, color: ColorRgb) {
        self.ambient.color = color;
        for p in &mut self.particles {
            p.color = color;
        }
        debug!(%color, "color changed");
    }

    /// Replace the timestep; negative values collapse to 0 (motion halts, the
    /// collision passes still run).
    pub fn set_timestep(&mut self, timestep: f64) {
        let timestep = clamp_timestep(timestep);
        if timestep != self.timestep {
            self.timestep = timestep;
            debug!(timestep, "timestep changed");
        }
    }

    /// Multiply the timestep by `factor`, clamping at 0.
    pub fn scale_timestep(&mut self, factor: f64) {
        self.set_timestep(self.timestep * factor);
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Apply a sparse configuration delta.
    ///
    /// Fields are applied in the order bounds, mass, temperature, population,
    /// color, speed. Invalid values are dropped without touching the state:
    /// - a resize needs both dimensions, each in `[CANVAS_MIN, CANVAS_MAX]`;
    ///   otherwise the whole request is ignored.
    /// - a population outside `[PARTICLE_COUNT_MIN, PARTICLE_COUNT_MAX]` is ignored.
    /// - an unparsable color is ignored.
    ///
    /// Mass, temperature, population, color and speed only apply when they
    /// differ from the current value. `is_paused` is not read here.
    pub fn apply_config(&mut self, delta: &ConfigDelta) -> AppliedChanges {
        let mut applied = AppliedChanges::default();

        if let (Some(w), Some(h)) = (delta.canvas_width, delta.canvas_height) {
            let range = CANVAS_MIN..=CANVAS_MAX;
            if range.contains(&w) && range.contains(&h) {
                applied.bounds = self.set_bounds(f64::from(w), f64::from(h)).is_ok();
            } else {
                debug!(width = w, height = h, "resize out of range, dropped");
            }
        }

        if let Some(mass) = delta.mass {
            if mass != self.ambient.mass {
                self.set_mass(mass);
                applied.mass = true;
            }
        }

        if let Some(temperature) = delta.temperature {
            if temperature != self.ambient.temperature {
                self.set_temperature(temperature);
                applied.temperature = true;
            }
        }

        if let Some(count) = delta.particle_count {
            if !(PARTICLE_COUNT_MIN..=PARTICLE_COUNT_MAX).contains(&count) {
                warn!(count, "particle count out of range, dropped");
            } else if count != self.population_target {
                let spec = self.ambient;
                self.set_particle_count(count, spec);
                applied.population = true;
            }
        }

        if let Some(hex) = delta.color.as_deref() {
            match ColorRgb::from_hex(hex) {
                Ok(color) if color != self.ambient.color => {
                    self.set_color_rgb(color);
                    applied.color = true;
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "color dropped"),
            }
        }

        if let Some(speed) = delta.simulation_speed {
            if clamp_timestep(speed) != self.timestep {
                self.set_timestep(speed);
                applied.speed = true;
            }
        }

        applied
    }

    // ============ Internal helpers ============

    fn spawn_until(&mut self, goal: usize, spec: ParticleSpec) {
        self.particles.reserve(goal.saturating_sub(self.particles.len()));
        while self.particles.len() < goal {
            let x = self.rng.random_range(0.0..self.width);
            let y = self.rng.random_range(0.0..self.height);
            let p = spec.spawn(x, y, &mut self.rng);
            self.add_particle(p);
        }
    }

    fn resolve_contact(&mut self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.particles[i], &self.particles[j]);
        if !a.collides_with(b) {
            return false;
        }
        let va = a.calculate_collision(b);
        let vb = b.calculate_collision(a);
        self.particles[i].velocity = va;
        self.particles[j].velocity = vb;
        true
    }
}

// ============ Utility helpers ============

#[inline]
fn clamp_timestep(timestep: f64) -> f64 {
    if timestep < 0.0 {
        0.0
    } else {
        timestep
    }
}

fn check_bounds(width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(Error::InvalidParam(format!(
            "bounds must be finite and > 0, got {width} x {height}"
        )));
    }
    Ok(())
}

/// Axis to reverse if the particle touches a wall while moving into it.
/// Y wins over X, so a corner hit only reverses Y this frame.
fn wall_contact(p: &Particle, width: f64, height: f64) -> Option<Axis> {
    let (pos, vel, r) = (p.position, p.velocity, p.radius);
    let touched_y = (pos.y <= r && vel.y < 0.0) || (height - pos.y <= r && vel.y > 0.0);
    let touched_x = (pos.x <= r && vel.x < 0.0) || (width - pos.x <= r && vel.x > 0.0);
    if touched_y {
        Some(Axis::Y)
    } else if touched_x {
        Some(Axis::X)
    } else {
        None
    }
}
