//! Capability contract for an external physics simulation.

use crate::Result;

/// A stepped physics simulation owned by the caller.
///
/// The evaluator only needs two things from the simulation: the timestep one
/// call to [`advance`](Simulation::advance) covers, and the advance operation
/// itself. Everything else (solver, contacts, integration) stays behind this
/// boundary.
pub trait Simulation {
    /// Simulated time advanced by each [`advance`](Simulation::advance) call,
    /// in seconds.
    fn timestep(&self) -> f64;

    /// Advance the simulation by one timestep.
    ///
    /// # Errors
    ///
    /// Implementations report failures as
    /// [`ImitationError::SimulationStep`](crate::ImitationError::SimulationStep);
    /// failures end the episode.
    fn advance(&mut self) -> Result<()>;
}
