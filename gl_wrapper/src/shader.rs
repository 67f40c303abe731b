use gl::types::{GLenum, GLuint};
use std::ffi::{CStr, CString};
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::driver::ShaderDriver;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Upper case name used in diagnostic tags.
    pub fn tag(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Shader text tagged with its pipeline stage.
///
/// The text is kept nul-terminated so it can be handed to the driver as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: CString,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: &str) -> Result<Self, SourceError> {
        if text.trim().is_empty() {
            return Err(SourceError::Empty(stage));
        }

        let text = CString::new(text).map_err(|e| SourceError::InteriorNul {
            stage,
            position: e.nul_position(),
        })?;

        Ok(Self { stage, text })
    }

    pub fn vertex(text: &str) -> Result<Self, SourceError> {
        Self::new(ShaderStage::Vertex, text)
    }

    pub fn fragment(text: &str) -> Result<Self, SourceError> {
        Self::new(ShaderStage::Fragment, text)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn text(&self) -> &CStr {
        &self.text
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("{0} shader source is empty")]
    Empty(ShaderStage),
    #[error("{stage} shader source contains a nul byte at {position}")]
    InteriorNul { stage: ShaderStage, position: usize },
}

/// A successfully compiled shader object.
///
/// Single use: it is consumed by a link attempt, and released when dropped.
pub struct CompiledShader<D: ShaderDriver> {
    pub(crate) id: GLuint,
    pub(crate) stage: ShaderStage,
    pub(crate) driver: D,
}

impl<D: ShaderDriver> CompiledShader<D> {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<D: ShaderDriver> Drop for CompiledShader<D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_tags() {
        assert_eq!(ShaderStage::Vertex.tag(), "VERTEX");
        assert_eq!(ShaderStage::Fragment.to_string(), "FRAGMENT");
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn source_is_nul_terminated() {
        let src = ShaderSource::vertex("void main() {}").unwrap();

        assert_eq!(src.stage(), ShaderStage::Vertex);
        assert_eq!(src.text().to_bytes_with_nul().last(), Some(&0));
        assert_eq!(src.text().to_str().unwrap(), "void main() {}");
    }

    #[test]
    fn empty_source_is_rejected() {
        assert_eq!(
            ShaderSource::fragment(" \n\t"),
            Err(SourceError::Empty(ShaderStage::Fragment))
        );
    }

    #[test]
    fn interior_nul_is_rejected() {
        assert_eq!(
            ShaderSource::vertex("void\0main"),
            Err(SourceError::InteriorNul {
                stage: ShaderStage::Vertex,
                position: 4
            })
        );
    }
}
