pub mod constants;
pub mod controller;
pub mod player;
pub mod skill;
pub mod world;
