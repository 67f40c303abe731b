//! In-memory [`ShaderDriver`] for tests, also exported with the
//! `fake-driver` feature.
//!
//! Compilation is a line based syntax check: every statement inside a block
//! and every declaration at the top level must end with `;`. Linking needs
//! exactly one compiled vertex and one compiled fragment shader.

use gl::types::{GLint, GLuint};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;
use std::rc::Rc;

use super::ShaderDriver;
use crate::shader::ShaderStage;

#[derive(Default)]
struct FakeShader {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<GLuint>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
}

#[derive(Default)]
struct FakeState {
    next_id: GLuint,
    shaders: HashMap<GLuint, FakeShader>,
    programs: HashMap<GLuint, FakeProgram>,
    deleted_shaders: Vec<GLuint>,
    deleted_programs: Vec<GLuint>,
    current_program: GLuint,
    uniform_writes: Vec<(GLint, f32)>,
    refuse_allocation: bool,
    log_padding: usize,
}

impl FakeState {
    fn next_id(&mut self) -> GLuint {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `create_*` call fail.
    pub fn refusing_allocation() -> Self {
        let driver = Self::default();
        driver.state.borrow_mut().refuse_allocation = true;
        driver
    }

    /// Appends `padding` bytes of filler to every diagnostic log.
    pub fn with_log_padding(padding: usize) -> Self {
        let driver = Self::default();
        driver.state.borrow_mut().log_padding = padding;
        driver
    }

    pub fn created_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn created_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// How many times `shader` was deleted.
    pub fn shader_deletions(&self, shader: GLuint) -> usize {
        let state = self.state.borrow();
        state.deleted_shaders.iter().filter(|s| **s == shader).count()
    }

    pub fn deleted_shaders(&self) -> Vec<GLuint> {
        self.state.borrow().deleted_shaders.clone()
    }

    pub fn program_deletions(&self, program: GLuint) -> usize {
        let state = self.state.borrow();
        state.deleted_programs.iter().filter(|p| **p == program).count()
    }

    pub fn deleted_programs(&self) -> Vec<GLuint> {
        self.state.borrow().deleted_programs.clone()
    }

    pub fn current_program(&self) -> GLuint {
        self.state.borrow().current_program
    }

    pub fn uniform_writes(&self) -> Vec<(GLint, f32)> {
        self.state.borrow().uniform_writes.clone()
    }

    fn padded(&self, log: String) -> String {
        let padding = self.state.borrow().log_padding;
        if padding == 0 || log.is_empty() {
            log
        } else {
            format!("{log}\n{}", "#".repeat(padding))
        }
    }
}

fn check_syntax(source: &str) -> Result<(), String> {
    let mut depth = 0_usize;

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        let number = number + 1;

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        match line {
            "{" => {
                depth += 1;
                continue;
            }
            "}" => {
                if depth == 0 {
                    return Err(format!("0:{number}(1): error: syntax error, unexpected '}}'"));
                }
                depth -= 1;
                continue;
            }
            _ => {}
        }

        let header = depth == 0 && line.ends_with(')');
        if !header && !line.ends_with(';') {
            return Err(format!(
                "0:{number}(1): error: syntax error, unexpected end of statement, expecting ';'"
            ));
        }
    }

    if depth != 0 {
        return Err("0:0(1): error: syntax error, unexpected end of file".to_string());
    }

    if !source.contains("void main()") {
        return Err("0:0(1): error: no function with name 'main'".to_string());
    }

    Ok(())
}

fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let rest = line.trim().strip_prefix("uniform ")?;
        let name = rest.trim_end_matches(';').split_whitespace().last()?;
        Some(name.to_string())
    })
}

impl ShaderDriver for FakeDriver {
    fn create_shader(&self, stage: ShaderStage) -> Option<GLuint> {
        let mut state = self.state.borrow_mut();
        if state.refuse_allocation {
            return None;
        }

        let id = state.next_id();
        state.shaders.insert(
            id,
            FakeShader {
                stage: Some(stage),
                ..Default::default()
            },
        );
        Some(id)
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) {
        let source = source.to_string_lossy().to_string();
        let result = check_syntax(&source);

        let mut state = self.state.borrow_mut();
        let entry = state.shaders.get_mut(&shader).expect("unknown shader");
        entry.source = source;
        match result {
            Ok(()) => {
                entry.compiled = true;
                entry.log.clear();
            }
            Err(log) => {
                entry.compiled = false;
                entry.log = log;
            }
        }
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        self.state.borrow().shaders[&shader].compiled
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let log = self.state.borrow().shaders[&shader].log.clone();
        self.padded(log)
    }

    fn delete_shader(&self, shader: GLuint) {
        self.state.borrow_mut().deleted_shaders.push(shader);
    }

    fn create_program(&self) -> Option<GLuint> {
        let mut state = self.state.borrow_mut();
        if state.refuse_allocation {
            return None;
        }

        let id = state.next_id();
        state.programs.insert(id, FakeProgram::default());
        Some(id)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        let entry = state.programs.get_mut(&program).expect("unknown program");
        entry.attached.push(shader);
    }

    fn link_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        let attached = state.programs[&program].attached.clone();

        let mut vertex = 0;
        let mut fragment = 0;
        let mut uncompiled = false;
        let mut uniforms = Vec::new();

        for shader in &attached {
            let entry = &state.shaders[shader];
            uncompiled |= !entry.compiled;
            match entry.stage {
                Some(ShaderStage::Vertex) => vertex += 1,
                Some(ShaderStage::Fragment) => fragment += 1,
                None => {}
            }
            uniforms.extend(declared_uniforms(&entry.source));
        }

        let log = if uncompiled {
            "error: linking with uncompiled/unspecialized shader".to_string()
        } else if vertex > 1 || fragment > 1 {
            "error: function `main' is multiply defined".to_string()
        } else if vertex != 1 || fragment != 1 {
            "error: program lacks a vertex or fragment stage".to_string()
        } else {
            String::new()
        };

        let entry = state.programs.get_mut(&program).expect("unknown program");
        entry.linked = log.is_empty();
        entry.log = log;
        entry.uniforms = uniforms;
    }

    fn link_status(&self, program: GLuint) -> bool {
        self.state.borrow().programs[&program].linked
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let log = self.state.borrow().programs[&program].log.clone();
        self.padded(log)
    }

    fn delete_program(&self, program: GLuint) {
        self.state.borrow_mut().deleted_programs.push(program);
    }

    fn use_program(&self, program: GLuint) {
        self.state.borrow_mut().current_program = program;
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> Option<GLint> {
        let state = self.state.borrow();
        let name = name.to_str().ok()?;
        state.programs[&program]
            .uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| i as GLint)
    }

    fn uniform_f32(&self, location: GLint, value: f32) {
        self.state.borrow_mut().uniform_writes.push((location, value));
    }
}
