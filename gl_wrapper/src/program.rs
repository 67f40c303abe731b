use gl::types::{GLint, GLuint};
use std::ffi::CString;
use thiserror::Error;

use crate::driver::{clamp_log, GlDriver, ShaderDriver};
use crate::shader::{CompiledShader, ShaderSource, ShaderStage};

/// Progress of a single program build.
///
/// Each step is only reached when it succeeded and every step before it did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildState {
    Created,
    CompiledVertex,
    CompiledFragment,
    Linked,
}

impl BuildState {
    fn next(self) -> Option<BuildState> {
        match self {
            BuildState::Created => Some(BuildState::CompiledVertex),
            BuildState::CompiledVertex => Some(BuildState::CompiledFragment),
            BuildState::CompiledFragment => Some(BuildState::Linked),
            BuildState::Linked => None,
        }
    }
}

/// Compiles a vertex and a fragment shader and links them into a [`Program`].
///
/// The first failing step ends the build: [`ProgramBuilder::build`] returns
/// its error and nothing after it runs.
pub struct ProgramBuilder<D: ShaderDriver = GlDriver> {
    driver: D,
    state: BuildState,
}

impl ProgramBuilder<GlDriver> {
    pub fn new() -> Self {
        Self::with_driver(GlDriver)
    }
}

impl Default for ProgramBuilder<GlDriver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ShaderDriver> ProgramBuilder<D> {
    pub fn with_driver(driver: D) -> Self {
        Self {
            driver,
            state: BuildState::Created,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    fn advance(&mut self, reached: BuildState) {
        if self.state.next() == Some(reached) {
            self.state = reached;
        }
    }

    pub fn compile(&mut self, source: &ShaderSource) -> Result<CompiledShader<D>, CompileError> {
        let stage = source.stage();

        let Some(id) = self.driver.create_shader(stage) else {
            let err = CompileError {
                stage,
                log: "driver could not allocate a shader object".to_string(),
            };
            log::error!("{err}");
            return Err(err);
        };

        // Owned from here on, so the object is released on every early return.
        let shader = CompiledShader {
            id,
            stage,
            driver: self.driver.clone(),
        };

        self.driver.compile_shader(id, source.text());

        if !self.driver.compile_status(id) {
            let err = CompileError {
                stage,
                log: clamp_log(self.driver.shader_info_log(id)),
            };
            log::error!("{err}");
            return Err(err);
        }

        self.advance(match stage {
            ShaderStage::Vertex => BuildState::CompiledVertex,
            ShaderStage::Fragment => BuildState::CompiledFragment,
        });

        log::debug!("compiled {stage} shader {id}");

        Ok(shader)
    }

    /// Links `vertex` and `fragment` into a program.
    ///
    /// Both shaders are released before this returns, whatever the outcome.
    pub fn link(
        &mut self,
        vertex: CompiledShader<D>,
        fragment: CompiledShader<D>,
    ) -> Result<Program<D>, LinkError> {
        if vertex.stage() != ShaderStage::Vertex || fragment.stage() != ShaderStage::Fragment {
            let err = LinkError {
                log: format!(
                    "expected a VERTEX and a FRAGMENT shader, got {} and {}",
                    vertex.stage(),
                    fragment.stage()
                ),
            };
            log::error!("{err}");
            return Err(err);
        }

        let Some(id) = self.driver.create_program() else {
            let err = LinkError {
                log: "driver could not allocate a program object".to_string(),
            };
            log::error!("{err}");
            return Err(err);
        };

        self.driver.attach_shader(id, vertex.id());
        self.driver.attach_shader(id, fragment.id());
        self.driver.link_program(id);

        let linked = self.driver.link_status(id);
        let log = if linked {
            String::new()
        } else {
            clamp_log(self.driver.program_info_log(id))
        };

        drop(vertex);
        drop(fragment);

        if !linked {
            self.driver.delete_program(id);
            let err = LinkError { log };
            log::error!("{err}");
            return Err(err);
        }

        self.advance(BuildState::Linked);

        log::debug!("linked program {id}");

        Ok(Program {
            id: Some(id),
            driver: self.driver.clone(),
        })
    }

    pub fn build(
        mut self,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Program<D>, ProgramError> {
        let vert = self.compile(vertex)?;
        let frag = self.compile(fragment)?;

        Ok(self.link(vert, frag)?)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("ERROR::SHADER::{stage}::COMPILATION_FAILED\n{log}")]
pub struct CompileError {
    pub stage: ShaderStage,
    pub log: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{log}")]
pub struct LinkError {
    pub log: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgramError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Link(#[from] LinkError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UniformError {
    #[error("could not find uniform location: {0}")]
    NotFound(String),
    #[error("invalid uniform name: {0:?}")]
    InvalidName(String),
    #[error("program was already released")]
    Released,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniformLocation(GLint);

/// A linked shader program.
///
/// Released on drop unless [`Program::release`] already did it.
pub struct Program<D: ShaderDriver = GlDriver> {
    id: Option<GLuint>,
    driver: D,
}

impl<D: ShaderDriver> Program<D> {
    /// The program name, `0` once released.
    pub fn get_id(&self) -> GLuint {
        self.id.unwrap_or(0)
    }

    pub fn is_released(&self) -> bool {
        self.id.is_none()
    }

    pub fn bind(&self) {
        if let Some(id) = self.id {
            self.driver.use_program(id);
        }
    }

    /// Deletes the program. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.driver.delete_program(id);
            log::debug!("released program {id}");
        }
    }

    pub fn uniform_location(&self, name: &str) -> Result<UniformLocation, UniformError> {
        let id = self.id.ok_or(UniformError::Released)?;
        let c_name =
            CString::new(name).map_err(|_| UniformError::InvalidName(name.to_string()))?;

        self.driver
            .uniform_location(id, &c_name)
            .map(UniformLocation)
            .ok_or_else(|| UniformError::NotFound(name.to_string()))
    }

    /// Writes a float uniform. The program has to be bound.
    pub fn set_f32(&self, location: UniformLocation, value: f32) {
        if self.id.is_some() {
            self.driver.uniform_f32(location.0, value);
        }
    }
}

impl<D: ShaderDriver> Drop for Program<D> {
    fn drop(&mut self) {
        self.release();
    }
}
