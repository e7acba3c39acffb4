use crate::core::color::ColorRgb;
use crate::core::thermo;
use crate::core::vector::Vector2D;
use rand::Rng;

/// A circular gas particle in 2D.
///
/// Mass, temperature and color are in practice shared by every particle of a
/// [`Simulation`](crate::core::Simulation); they live here so each particle can
/// derive its own velocity and be drawn without a back-reference.
///
/// No field is validated: non-positive radius/mass/temperature simply produce
/// NaN or infinite velocities downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Center of the circle.
    pub position: Vector2D,
    /// Derived from temperature and mass with a random component.
    pub velocity: Vector2D,
    /// Circle radius; fixed for the particle's lifetime.
    pub radius: f64,
    /// Mass in kg.
    pub mass: f64,
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Fill color.
    pub color: ColorRgb,
}

/// Ambient attributes used to spawn particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// Radius given to new particles.
    pub radius: f64,
    /// Mass shared by every particle.
    pub mass: f64,
    /// Temperature shared by every particle.
    pub temperature: f64,
    /// Color shared by every particle.
    pub color: ColorRgb,
}

impl ParticleSpec {
    /// Spawn a particle centred at `(x, y)` with a freshly randomized velocity.
    pub fn spawn<R: Rng>(&self, x: f64, y: f64, rng: &mut R) -> Particle {
        Particle::create(x, y, self.radius, self.mass, self.temperature, self.color, rng)
    }
}

impl Particle {
    /// Build a particle with an explicit velocity.
    pub fn new(
        position: Vector2D,
        velocity: Vector2D,
        radius: f64,
        mass: f64,
        temperature: f64,
        color: ColorRgb,
    ) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass,
            temperature,
            color,
        }
    }

    /// Factory: place a particle at `(x, y)` and draw its initial velocity
    /// from the thermal speed scale.
    pub fn create<R: Rng>(
        x: f64,
        y: f64,
        radius: f64,
        mass: f64,
        temperature: f64,
        color: ColorRgb,
        rng: &mut R,
    ) -> Self {
        let mut p = Self::new(
            Vector2D::new(x, y),
            Vector2D::ZERO,
            radius,
            mass,
            temperature,
            color,
        );
        p.update_velocity(rng);
        p
    }

    /// Speed scale `sqrt(3 k_B T / m)` for this particle's temperature and mass.
    #[inline]
    pub fn average_velocity(&self) -> f64 {
        thermo::average_velocity(self.temperature, self.mass)
    }

    /// Re-randomize the velocity: each axis is `v_avg * U[-1, 1]`, drawn
    /// independently (x first). The resulting distribution is deliberately
    /// not isotropic.
    pub fn update_velocity<R: Rng>(&mut self, rng: &mut R) {
        let v_avg = self.average_velocity();
        let rx: f64 = rng.random_range(-1.0..=1.0);
        let ry: f64 = rng.random_range(-1.0..=1.0);
        self.velocity = Vector2D::new(v_avg * rx, v_avg * ry);
    }

    #[inline]
    pub fn update_position(&mut self, timestep: f64) {
        self.position += self.velocity * timestep;
    }

    #[inline]
    pub fn reverse_x_velocity(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    #[inline]
    pub fn reverse_y_velocity(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    /// True when the circles touch or overlap and the particles are approaching.
    ///
    /// The approach gate keeps a touching pair from bouncing again on every
    /// frame while it separates.
    pub fn collides_with(&self, other: &Particle) -> bool {
        let dx = self.position - other.position;
        if dx.length() > self.radius + other.radius {
            return false;
        }
        let dv = self.velocity - other.velocity;
        dv.dot(dx) < 0.0
    }

    /// Post-collision velocity of `self` after an elastic collision with `other`.
    ///
    /// `v1' = v1 - 2 m2 / (m1 + m2) * <v1 - v2, x1 - x2> / |x1 - x2|^2 * (x1 - x2)`
    ///
    /// Pure: the caller must compute both sides from the pre-collision state
    /// before assigning either.
    pub fn calculate_collision(&self, other: &Particle) -> Vector2D {
        let dx = self.position - other.position;
        let dv = self.velocity - other.velocity;
        let mass_term = 2.0 * other.mass / (self.mass + other.mass);
        let scalar = mass_term * (dv.dot(dx) / dx.length_squared());
        self.velocity - dx * scalar
    }

    /// Kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline]
    pub fn momentum(&self) -> Vector2D {
        self.velocity * self.mass
    }
}
