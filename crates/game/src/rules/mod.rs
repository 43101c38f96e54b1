//! Rules of Seega.
//!
//! Functions in this module validate and apply single actions. They don't
//! know about seats or game status; [`crate::GameService`] checks those.

pub mod capture;
pub mod movement;
pub mod placement;
pub mod victory;
