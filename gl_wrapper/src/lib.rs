pub mod driver;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod shader;
