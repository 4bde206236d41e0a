mod components;
mod systems;
mod tic;

pub use components::{ActorFlags, Animation, InputCmd, Position, Velocity};
pub use systems::{MOVE_SPEED, PLAYER_RADIUS, TURN_RATE, player_input};
pub use tic::{DT, SIM_FPS, TicRunner};
