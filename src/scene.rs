use thiserror::Error;

use gl_wrapper::driver::{GlDriver, ShaderDriver};
use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder, ProgramError, UniformError, UniformLocation};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::shader::{ShaderSource, SourceError};

use crate::input::InputState;
use crate::mesh::{COLORED_TRIANGLE, RECTANGLE, RECTANGLE_INDICES};
use crate::shaders::{HELLO_FRAG, HELLO_VERT, PULSE_UNIFORM, SHADED_FRAG, SHADED_VERT};

/// Geometry and program of one demo.
///
/// Needs a current GL context to be built and to be released.
pub struct Scene<D: ShaderDriver = GlDriver> {
    geometry: Option<Geometry>,
    program: Program<D>,
    pulse: Option<UniformLocation>,
    wireframe: bool,
}

impl Scene<GlDriver> {
    /// Position-only rectangle drawn as two indexed triangles, in wireframe.
    pub fn hello() -> Result<Self, SceneError> {
        let geometry = GeometryBuilder::new(&RECTANGLE)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&RECTANGLE_INDICES)
            .build()?;

        let program = ProgramBuilder::new().build(
            &ShaderSource::vertex(HELLO_VERT)?,
            &ShaderSource::fragment(HELLO_FRAG)?,
        )?;

        Ok(Self {
            geometry: Some(geometry),
            program,
            pulse: None,
            wireframe: true,
        })
    }

    /// Triangle with per-vertex colours and a pulsing brightness.
    pub fn shaded() -> Result<Self, SceneError> {
        let geometry = GeometryBuilder::new(&COLORED_TRIANGLE)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        let program = ProgramBuilder::new().build(
            &ShaderSource::vertex(SHADED_VERT)?,
            &ShaderSource::fragment(SHADED_FRAG)?,
        )?;

        let pulse = program.uniform_location(PULSE_UNIFORM)?;

        Ok(Self {
            geometry: Some(geometry),
            program,
            pulse: Some(pulse),
            wireframe: false,
        })
    }
}

impl<D: ShaderDriver> Scene<D> {
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn is_released(&self) -> bool {
        self.geometry.is_none() && self.program.is_released()
    }

    pub fn draw(&self, renderer: &mut GlRenderer, input: &InputState, elapsed: f32) {
        let Some(geometry) = &self.geometry else {
            return;
        };

        if self.program.is_released() {
            return;
        }

        renderer.use_program(&self.program);

        if let Some(pulse) = self.pulse {
            self.program.set_f32(pulse, input.pulse(elapsed));
        }

        renderer.draw(geometry, &self.program);
    }

    /// Frees the program and the vertex buffers, later draws are skipped.
    ///
    /// The event loop never drops its captures, so this is the only place the
    /// buffers are deleted.
    pub fn release(&mut self) {
        self.program.release();
        self.geometry.take();
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Geometry(#[from] GBError),
    #[error(transparent)]
    Uniform(#[from] UniformError),
}

impl SceneError {
    /// Compile and link failures are logged by the program builder itself.
    pub fn already_logged(&self) -> bool {
        matches!(self, SceneError::Program(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_wrapper::driver::fake::FakeDriver;
    use gl_wrapper::program::LinkError;
    use gl_wrapper::shader::ShaderStage;

    // Geometry needs a live context, so these scenes only carry a program.
    fn shaded_program(driver: &FakeDriver) -> Scene<FakeDriver> {
        let program = ProgramBuilder::with_driver(driver.clone())
            .build(
                &ShaderSource::vertex(SHADED_VERT).unwrap(),
                &ShaderSource::fragment(SHADED_FRAG).unwrap(),
            )
            .unwrap();
        let pulse = program.uniform_location(PULSE_UNIFORM).unwrap();

        Scene {
            geometry: None,
            program,
            pulse: Some(pulse),
            wireframe: false,
        }
    }

    #[test]
    fn released_scene_skips_drawing() {
        let driver = FakeDriver::new();
        let mut scene = shaded_program(&driver);
        let id = scene.program.get_id();
        let mut renderer = GlRenderer::new();

        scene.release();
        assert!(scene.is_released());

        scene.draw(&mut renderer, &InputState::default(), 1.0);
        assert_eq!(driver.current_program(), 0);
        assert!(driver.uniform_writes().is_empty());

        scene.release();
        assert_eq!(driver.program_deletions(id), 1);
    }

    #[test]
    fn scene_without_geometry_is_not_drawn() {
        let driver = FakeDriver::new();
        let scene = shaded_program(&driver);

        scene.draw(&mut GlRenderer::new(), &InputState::default(), 1.0);

        assert!(!scene.is_released());
        assert_eq!(driver.current_program(), 0);
    }

    #[test]
    fn builder_failures_are_not_logged_twice() {
        let link = SceneError::Program(ProgramError::Link(LinkError { log: "x".into() }));
        let source = SceneError::Source(SourceError::Empty(ShaderStage::Vertex));
        let geometry = SceneError::Geometry(GBError::InvalidDataLength);

        assert!(link.already_logged());
        assert!(!source.already_logged());
        assert!(!geometry.already_logged());
    }
}
