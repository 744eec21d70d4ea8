//! Per-cube tick rules.
//!
//! A cube is either falling (ALIVE) or gone (RETIRED). Each tick moves it by its
//! own velocities and then checks the exit condition; the caller renders between
//! the two and performs the retirement itself, since retirement touches the
//! backend, the scheduler and the live count.

use crate::cube::Cube;
use crate::viewport::ViewportTracker;

/// Result of one tick of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved and still on screen; ticks again next frame.
    Alive,
    /// Fell past the bottom edge on this tick and was released.
    Retired,
    /// Not due yet: still inside its stagger delay, or already ticked at this
    /// frame time. Nothing was touched.
    Waiting,
    /// The task belongs to a cancelled epoch or nothing is mounted. Nothing was touched.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Falling,
    Exited,
}

pub fn advance_cube<H>(cube: &mut Cube<H>, viewport: &ViewportTracker) -> Motion {
    cube.advance();
    if cube.has_exited(viewport.height()) {
        Motion::Exited
    } else {
        Motion::Falling
    }
}
