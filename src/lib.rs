//! Grid raycaster with a software frame-buffer.
//!
//! * [`world`]: grid map, camera, texture and sprite banks.
//! * [`renderer`]: the [`Renderer`](renderer::Renderer) trait and its
//!   software backend.
//! * [`sim`]: the small ECS that feeds renderables to the viewer.

pub mod config;
pub mod renderer;
pub mod sim;
pub mod world;
