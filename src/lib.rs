//! Pocket Arena
//!
//! A shared-display party game: phones act as joystick controllers, a single
//! display runs the simulation and renders every avatar. Circular players
//! push each other around with elastic collisions and a dash skill.
//!
//! The crate splits into the simulation core (`game`), the inbound event
//! plumbing (`net`), the display seam (`render`), and the frame-loop harness
//! (`session`).

pub mod config;
pub mod game;
pub mod net;
pub mod render;
pub mod session;
pub mod util;
