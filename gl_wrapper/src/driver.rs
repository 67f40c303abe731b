use gl::types::{GLchar, GLint, GLsizei, GLuint};
use std::ffi::CStr;

use crate::shader::ShaderStage;

#[cfg(any(test, feature = "fake-driver"))]
pub mod fake;

/// Maximum size in bytes of a diagnostic log read back from the driver.
pub const INFO_LOG_CAPACITY: usize = 512;

/// The driver calls needed to build and use a shader program.
///
/// Handles are plain object names as returned by the driver; `0` is never a
/// valid name.
pub trait ShaderDriver: Clone {
    /// Allocates a shader object for `stage`, `None` if the driver refused.
    fn create_shader(&self, stage: ShaderStage) -> Option<GLuint>;
    /// Submits `source` and compiles it.
    fn compile_shader(&self, shader: GLuint, source: &CStr);
    fn compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> Option<GLuint>;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);

    fn use_program(&self, program: GLuint);
    /// Location of an active uniform, `None` if the program has no such uniform.
    fn uniform_location(&self, program: GLuint, name: &CStr) -> Option<GLint>;
    fn uniform_f32(&self, location: GLint, value: f32);
}

/// [`ShaderDriver`] backed by the loaded `gl` function pointers.
///
/// Every call goes to the context current on the calling thread.
#[derive(Copy, Clone, Debug, Default)]
pub struct GlDriver;

impl ShaderDriver for GlDriver {
    fn create_shader(&self, stage: ShaderStage) -> Option<GLuint> {
        let id = unsafe { gl::CreateShader(stage.gl_enum()) };
        (id != 0).then_some(id)
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
            gl::CompileShader(shader);
        }
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut buf = [0_u8; INFO_LOG_CAPACITY];
        let mut written: GLsizei = 0;

        unsafe {
            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_CAPACITY as GLsizei,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );
        }

        log_from_buffer(&buf[..written.clamp(0, INFO_LOG_CAPACITY as GLsizei) as usize])
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> Option<GLuint> {
        let id = unsafe { gl::CreateProgram() };
        (id != 0).then_some(id)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut buf = [0_u8; INFO_LOG_CAPACITY];
        let mut written: GLsizei = 0;

        unsafe {
            gl::GetProgramInfoLog(
                program,
                INFO_LOG_CAPACITY as GLsizei,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );
        }

        log_from_buffer(&buf[..written.clamp(0, INFO_LOG_CAPACITY as GLsizei) as usize])
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> Option<GLint> {
        let location = unsafe { gl::GetUniformLocation(program, name.as_ptr()) };
        (location != -1).then_some(location)
    }

    fn uniform_f32(&self, location: GLint, value: f32) {
        unsafe { gl::Uniform1f(location, value) }
    }
}

/// Decodes a nul-terminated info log buffer.
pub fn log_from_buffer(buf: &[u8]) -> String {
    let data = buf.split(|b| *b == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

/// Cuts `log` down to [`INFO_LOG_CAPACITY`] bytes without splitting a character.
pub fn clamp_log(mut log: String) -> String {
    if log.len() > INFO_LOG_CAPACITY {
        let mut end = INFO_LOG_CAPACITY;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_stops_at_nul() {
        let mut buf = [0_u8; 32];
        buf[..12].copy_from_slice(b"0:1: error\n\n");

        assert_eq!(log_from_buffer(&buf), "0:1: error");
        assert_eq!(log_from_buffer(b"no terminator"), "no terminator");
        assert_eq!(log_from_buffer(&[]), "");
    }

    #[test]
    fn clamp_keeps_short_logs() {
        assert_eq!(clamp_log("short".into()), "short");
    }

    #[test]
    fn clamp_respects_char_boundaries() {
        let long = "é".repeat(INFO_LOG_CAPACITY);
        let clamped = clamp_log(long);

        assert!(clamped.len() <= INFO_LOG_CAPACITY);
        assert_eq!(clamped.len(), INFO_LOG_CAPACITY);
        assert!(clamped.chars().all(|c| c == 'é'));

        let odd = format!("a{}", "é".repeat(INFO_LOG_CAPACITY));
        let clamped = clamp_log(odd);
        assert_eq!(clamped.len(), INFO_LOG_CAPACITY - 1);
    }
}
