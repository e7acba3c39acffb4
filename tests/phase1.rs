use idealgas::config::{ConfigDelta, Settings};
use idealgas::core::{ColorRgb, GrowthPolicy, Particle, Simulation, Vector2D};
use idealgas::error::Result;

fn sim_with(count: usize, seed: u64) -> Result<Simulation> {
    Simulation::from_settings(&Settings {
        particle_count: count,
        seed: Some(seed),
        ..Settings::default()
    })
}

/// Re-applying the current mass still re-draws every velocity, and nothing else.
#[test]
fn set_mass_rerandomizes_velocity_only() -> Result<()> {
    let mut sim = sim_with(50, 1)?;
    let before: Vec<Particle> = sim.particles().to_vec();
    let mass = sim.ambient().mass;
    sim.set_mass(mass);

    let mut changed = 0;
    for (old, new) in before.iter().zip(sim.particles()) {
        assert_eq!(old.position, new.position);
        assert_eq!(old.radius, new.radius);
        assert_eq!(old.color, new.color);
        assert_eq!(old.mass, new.mass);
        changed += usize::from(old.velocity != new.velocity);
    }
    assert!(changed > 40, "only {changed} velocities changed");
    Ok(())
}

/// Heavier particles are slower; the bound per axis follows sqrt(3kT/m).
#[test]
fn set_mass_rescales_speeds() -> Result<()> {
    let mut sim = sim_with(100, 2)?;
    let m = sim.ambient().mass * 4.0;
    sim.set_mass(m);
    assert_eq!(sim.ambient().mass, m);
    let v_avg = sim.thermal_stats().average_velocity;
    for p in sim.particles() {
        assert_eq!(p.mass, m);
        assert!(p.velocity.x.abs() <= v_avg && p.velocity.y.abs() <= v_avg);
    }
    Ok(())
}

#[test]
fn set_temperature_updates_every_particle() -> Result<()> {
    let mut sim = sim_with(100, 3)?;
    let cold = sim.thermal_stats().average_velocity;
    sim.set_temperature(400.0);
    let hot = sim.thermal_stats().average_velocity;
    assert!((hot / cold - 2.0).abs() < 1e-12);
    let fastest = sim
        .particles()
        .iter()
        .map(|p| p.velocity.x.abs().max(p.velocity.y.abs()))
        .fold(0.0, f64::max);
    assert!(fastest <= hot);
    assert!(fastest > cold, "no particle exceeds the old speed scale");
    assert!(sim.particles().iter().all(|p| p.temperature == 400.0));
    Ok(())
}

/// Growing keeps existing particles; shrinking only removes from the end.
#[test]
fn population_resize() -> Result<()> {
    let mut sim = sim_with(200, 4)?;
    let first: Vec<Particle> = sim.particles().to_vec();
    let spec = sim.ambient();

    sim.set_particle_count(500, spec);
    assert_eq!(sim.num_particles(), 500);
    assert_eq!(&sim.particles()[..200], first.as_slice());

    sim.set_particle_count(120, spec);
    assert_eq!(sim.num_particles(), 120);
    assert_eq!(sim.particles(), &first[..120]);

    sim.set_particle_count(120, spec);
    assert_eq!(sim.num_particles(), 120);
    Ok(())
}

/// Inclusive growth ends one particle past the target.
#[test]
fn inclusive_growth_overshoots_by_one() -> Result<()> {
    let mut sim = Simulation::from_settings(&Settings {
        particle_count: 200,
        growth: GrowthPolicy::Inclusive,
        seed: Some(5),
        ..Settings::default()
    })?;
    assert_eq!(sim.num_particles(), 200);

    let delta = ConfigDelta::new().with_particle_count(500);
    assert!(sim.apply_config(&delta).population);
    assert_eq!(sim.num_particles(), 501);

    // The same request again is not a change.
    assert!(!sim.apply_config(&delta).population);
    assert_eq!(sim.num_particles(), 501);
    Ok(())
}

#[test]
fn recolor_and_bad_hex() -> Result<()> {
    let mut sim = sim_with(30, 6)?;
    sim.set_color("#f00")?;
    assert!(sim.particles().iter().all(|p| p.color == ColorRgb::new(255, 0, 0)));
    assert_eq!(sim.ambient().color, ColorRgb::new(255, 0, 0));

    assert!(sim.set_color("not-a-color").is_err());
    assert!(sim.particles().iter().all(|p| p.color == ColorRgb::new(255, 0, 0)));
    Ok(())
}

/// A resize outside [200, 1000] on either axis is dropped entirely.
#[test]
fn resize_validation_is_all_or_nothing() -> Result<()> {
    let mut sim = sim_with(10, 7)?;
    for delta in [
        ConfigDelta::new().with_bounds(1200, 500),
        ConfigDelta::new().with_bounds(500, 199),
        ConfigDelta {
            canvas_width: Some(500),
            ..ConfigDelta::default()
        },
    ] {
        assert!(!sim.apply_config(&delta).bounds);
        assert_eq!((sim.width(), sim.height()), (800.0, 800.0));
    }

    assert!(sim.apply_config(&ConfigDelta::new().with_bounds(200, 1000)).bounds);
    assert_eq!((sim.width(), sim.height()), (200.0, 1000.0));
    for p in sim.particles() {
        assert!(p.position.x <= 200.0);
    }
    Ok(())
}

#[test]
fn resize_pins_outside_particles() -> Result<()> {
    let mut sim = sim_with(0, 8)?;
    let spec = sim.ambient();
    let at = |x, y| Particle::new(Vector2D::new(x, y), Vector2D::ZERO, 5.0, spec.mass, 100.0, spec.color);
    sim.add_particle(at(750.0, 750.0));
    sim.add_particle(at(300.0, 100.0));
    sim.apply_config(&ConfigDelta::new().with_bounds(400, 400));
    assert_eq!(sim.positions(), vec![Vector2D::new(399.0, 399.0), Vector2D::new(300.0, 100.0)]);
    Ok(())
}

/// Unchanged values in a delta do not re-randomize anything.
#[test]
fn unchanged_delta_fields_are_skipped() -> Result<()> {
    let mut sim = sim_with(40, 9)?;
    let before = sim.velocities();
    let spec = sim.ambient();
    let delta = ConfigDelta::new()
        .with_mass(spec.mass)
        .with_temperature(spec.temperature)
        .with_color(spec.color.to_hex())
        .with_particle_count(40)
        .with_simulation_speed(sim.timestep());
    let applied = sim.apply_config(&delta);
    assert!(!applied.any(), "{applied:?}");
    assert_eq!(sim.velocities(), before);
    Ok(())
}

#[test]
fn delta_out_of_range_values_dropped() -> Result<()> {
    let mut sim = sim_with(40, 10)?;
    let applied = sim.apply_config(
        &ConfigDelta::new()
            .with_particle_count(0)
            .with_color("#12")
            .with_simulation_speed(-3.0),
    );
    assert!(!applied.population);
    assert!(!applied.color);
    assert!(applied.speed);
    assert_eq!(sim.num_particles(), 40);
    assert_eq!(sim.timestep(), 0.0);

    // The same negative speed again clamps to the same timestep: no change.
    assert!(!sim.apply_config(&ConfigDelta::new().with_simulation_speed(-3.0)).speed);
    assert!(!sim.apply_config(&ConfigDelta::new().with_simulation_speed(-0.5)).speed);
    assert_eq!(sim.timestep(), 0.0);

    assert!(!sim.apply_config(&ConfigDelta::new().with_particle_count(1001)).population);
    assert_eq!(sim.num_particles(), 40);
    Ok(())
}

/// Independent simulations do not share state.
#[test]
fn simulations_are_independent() -> Result<()> {
    let mut a = sim_with(20, 11)?;
    let b = sim_with(20, 11)?;
    a.set_temperature(1000.0);
    a.set_color("#000000")?;
    assert_eq!(b.ambient().temperature, 100.0);
    assert!(b.particles().iter().all(|p| p.temperature == 100.0));
    Ok(())
}
