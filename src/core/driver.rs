use crate::config::{ConfigDelta, Settings};
use crate::core::sim::{AppliedChanges, Simulation, StepStats};
use crate::error::Result;
use tracing::debug;

/// Result of one [`FrameDriver::frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub applied: AppliedChanges,
    /// `None` when the frame was paused and no physics step ran.
    pub step: Option<StepStats>,
}

impl FrameOutcome {
    pub fn stepped(&self) -> bool {
        self.step.is_some()
    }
}

/// Per-frame loop around a [`Simulation`]: apply pending configuration, step
/// unless paused, then let the caller draw from
/// [`Simulation::draw_list`].
///
/// The pause flag is owned here; the simulation never sees it.
#[derive(Debug)]
pub struct FrameDriver {
    sim: Simulation,
    paused: bool,
    frames: u64,
    steps: u64,
}

impl FrameDriver {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            paused: false,
            frames: 0,
            steps: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(Simulation::from_settings(settings)?))
    }

    /// Drive one frame.
    pub fn frame(&mut self, delta: &ConfigDelta) -> FrameOutcome {
        let applied = self.sim.apply_config(delta);
        if let Some(paused) = delta.is_paused {
            self.set_paused(paused);
        }
        self.frames += 1;

        let step = if self.paused {
            None
        } else {
            self.steps += 1;
            Some(self.sim.step())
        };
        FrameOutcome { applied, step }
    }

    /// Drive a frame with no configuration change.
    pub fn tick(&mut self) -> FrameOutcome {
        self.frame(&ConfigDelta::default())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            debug!(paused, "pause toggled");
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Frames driven so far, paused or not.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that ran a physics step.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn into_simulation(self) -> Simulation {
        self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Result<FrameDriver> {
        FrameDriver::from_settings(&Settings {
            particle_count: 20,
            seed: Some(11),
            ..Settings::default()
        })
    }

    #[test]
    fn paused_frames_do_not_step() -> Result<()> {
        let mut d = small()?;
        let before = d.simulation().positions();
        let out = d.frame(&ConfigDelta::new().with_paused(true));
        assert!(!out.stepped());
        assert!(d.is_paused());
        assert_eq!(d.simulation().positions(), before);
        assert_eq!((d.frames(), d.steps()), (1, 0));

        d.toggle_pause();
        assert!(d.tick().stepped());
        assert_eq!((d.frames(), d.steps()), (2, 1));
        Ok(())
    }

    #[test]
    fn config_applies_while_paused() -> Result<()> {
        let mut d = small()?;
        d.set_paused(true);
        let out = d.frame(&ConfigDelta::new().with_particle_count(5));
        assert!(out.applied.population);
        assert!(!out.stepped());
        assert_eq!(d.simulation().num_particles(), 5);
        Ok(())
    }

    #[test]
    fn into_simulation_keeps_state() -> Result<()> {
        let mut d = small()?;
        d.frame(&ConfigDelta::new().with_temperature(250.0));
        let positions = d.simulation().positions();
        let sim = d.into_simulation();
        assert_eq!(sim.positions(), positions);
        assert_eq!(sim.ambient().temperature, 250.0);
        Ok(())
    }
}
