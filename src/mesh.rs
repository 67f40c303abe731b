/// Rectangle corners, drawn with [`RECTANGLE_INDICES`].
#[rustfmt::skip]
pub const RECTANGLE: [f32; 12] = [
    0.5, 0.5, 0.0,   // top right
    0.5, -0.5, 0.0,  // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0,  // top left
];

#[rustfmt::skip]
pub const RECTANGLE_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

/// Interleaved position and colour.
#[rustfmt::skip]
pub const COLORED_TRIANGLE: [f32; 18] = [
    0.5, -0.5, 0.0,   1.0, 0.0, 0.0, // bottom right
    -0.5, -0.5, 0.0,  0.0, 1.0, 0.0, // bottom left
    0.0, 0.5, 0.0,    0.0, 0.0, 1.0, // top
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_indices_address_corners() {
        let corners = RECTANGLE.len() / 3;

        assert_eq!(corners, 4);
        assert!(RECTANGLE_INDICES.iter().all(|i| (*i as usize) < corners));
        assert_eq!(RECTANGLE_INDICES.len() % 3, 0);
    }

    #[test]
    fn triangle_colors_are_primaries() {
        let colors: Vec<[f32; 3]> = COLORED_TRIANGLE
            .chunks(6)
            .map(|v| [v[3], v[4], v[5]])
            .collect();

        assert_eq!(
            colors,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }
}
