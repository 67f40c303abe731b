use crate::driver::ShaderDriver;
use crate::geometry::Geometry;
use crate::program::Program;

#[derive(Default)]
pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    /// Makes `program` current, skipping the call when it already is.
    pub fn use_program<D: ShaderDriver>(&mut self, program: &Program<D>) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            program.bind();
            self.current_program = p_id;
        }
    }

    pub fn draw<D: ShaderDriver>(&mut self, geometry: &Geometry, program: &Program<D>) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            match geometry.indices() {
                Some(count) => gl::DrawElements(
                    gl::TRIANGLES,
                    count as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                ),
                None => gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertices() as i32),
            }
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn set_wireframe(&self, enabled: bool) {
        let mode = if enabled { gl::LINE } else { gl::FILL };
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeDriver;
    use crate::program::ProgramBuilder;
    use crate::shader::ShaderSource;

    const VERT: &str = "void main()\n{\n    gl_Position = vec4(0.0);\n}\n";
    const FRAG: &str = "out vec4 FragColor;\nvoid main()\n{\n    FragColor = vec4(1.0);\n}\n";

    fn program(driver: &FakeDriver) -> Program<FakeDriver> {
        ProgramBuilder::with_driver(driver.clone())
            .build(
                &ShaderSource::vertex(VERT).unwrap(),
                &ShaderSource::fragment(FRAG).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn program_switch_is_cached() {
        let driver = FakeDriver::new();
        let a = program(&driver);
        let b = program(&driver);
        let mut renderer = GlRenderer::new();

        renderer.use_program(&a);
        assert_eq!(driver.current_program(), a.get_id());

        // rebinding behind the renderer's back is not undone
        b.bind();
        renderer.use_program(&a);
        assert_eq!(driver.current_program(), b.get_id());

        renderer.use_program(&b);
        renderer.use_program(&a);
        assert_eq!(driver.current_program(), a.get_id());
    }
}
