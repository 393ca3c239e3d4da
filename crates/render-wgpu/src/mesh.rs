use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Generate a UV sphere by latitude/longitude subdivision.
///
/// `rings` divides pole to pole, `segments` divides the equator. Winding is
/// counter-clockwise seen from outside, matching back-face culling.
pub(crate) fn sphere_mesh(radius: f32, rings: u32, segments: u32) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            vertices.push(Vertex {
                position: [x * radius, y * radius, z * radius],
                normal: [x, y, z],
            });
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = (ring * (segments + 1) + seg) as u16;
            let next = current + segments as u16 + 1;

            indices.push(current);
            indices.push(current + 1);
            indices.push(next);

            indices.push(current + 1);
            indices.push(next + 1);
            indices.push(next);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let (vertices, indices) = sphere_mesh(1.0, 32, 32);
        assert_eq!(vertices.len(), 33 * 33);
        assert_eq!(indices.len(), 32 * 32 * 6);
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let (vertices, _) = sphere_mesh(0.1, 16, 16);
        for v in &vertices {
            let r = (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((r - 0.1).abs() < 1e-5, "radius {r}");
            let n = (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
            assert!((n - 1.0).abs() < 1e-4, "normal length {n}");
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let (vertices, indices) = sphere_mesh(1.0, 32, 32);
        let max = *indices.iter().max().unwrap() as usize;
        assert!(max < vertices.len());
    }

    #[test]
    fn poles_sit_on_the_axis() {
        let (vertices, _) = sphere_mesh(1.0, 8, 8);
        let north = &vertices[0];
        assert!((north.position[1] - 1.0).abs() < 1e-6);
        let south = vertices.last().unwrap();
        assert!((south.position[1] + 1.0).abs() < 1e-6);
    }
}
