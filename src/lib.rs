//! Shared plumbing of the triangle demos: window and context setup, the
//! render loop, keyboard state and the two demo scenes.

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod scene;
pub mod shaders;
