/// Window and context settings of a demo.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 3],
    /// Requested OpenGL core profile version, major and minor.
    pub gl_version: (u8, u8),
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Hello",
            width: 800,
            height: 600,
            clear_color: [0.8, 0.4, 0.7],
            gl_version: (3, 3),
        }
    }
}

impl DemoConfig {
    pub fn hello() -> Self {
        Self {
            title: "Hello triangle",
            ..Default::default()
        }
    }

    pub fn shaded() -> Self {
        Self {
            title: "Shaded triangle",
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demos_share_context_settings() {
        let hello = DemoConfig::hello();
        let shaded = DemoConfig::shaded();

        assert_ne!(hello.title, shaded.title);
        assert_eq!(hello.gl_version, (3, 3));
        assert_eq!((hello.width, hello.height), (shaded.width, shaded.height));
        assert_eq!(hello.clear_color, [0.8, 0.4, 0.7]);
    }
}
