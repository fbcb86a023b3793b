/// Icosphere generation: unit icosahedron and midpoint subdivision.
///
/// Each subdivision level splits every triangle into four. Edge midpoints
/// are shared between the two faces of an edge through an edge map keyed
/// by `(min index, max index)` and pushed back onto the unit sphere.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};

const X: f32 = 0.525_731_1;
const Z: f32 = 0.850_650_8;

/// Indexed triangle mesh with u16 indices
#[derive(Debug, Clone, PartialEq)]
pub struct IcoMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u16>,
}

impl IcoMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The 12-vertex, 20-face unit icosahedron
pub fn icosahedron() -> IcoMesh {
    let vertices = vec![
        Vec3::new(-X, 0.0, Z), Vec3::new(X, 0.0, Z), Vec3::new(-X, 0.0, -Z), Vec3::new(X, 0.0, -Z),
        Vec3::new(0.0, Z, X), Vec3::new(0.0, Z, -X), Vec3::new(0.0, -Z, X), Vec3::new(0.0, -Z, -X),
        Vec3::new(Z, X, 0.0), Vec3::new(-Z, X, 0.0), Vec3::new(Z, -X, 0.0), Vec3::new(-Z, -X, 0.0),
    ];
    let indices = vec![
        0, 4, 1,   0, 9, 4,   9, 5, 4,   4, 5, 8,   4, 8, 1,
        8, 10, 1,  8, 3, 10,  5, 3, 8,   5, 2, 3,   2, 7, 3,
        7, 10, 3,  7, 6, 10,  7, 11, 6,  11, 0, 6,  0, 1, 6,
        6, 1, 10,  9, 0, 11,  9, 11, 2,  9, 2, 5,   7, 2, 11,
    ];
    IcoMesh { vertices, indices }
}

/// Subdivide `mesh` `levels` times.
///
/// Fails when the vertex count would no longer fit u16 indices.
pub fn tessellate(mesh: &IcoMesh, levels: u32) -> Result<IcoMesh> {
    let mut out = mesh.clone();
    for _ in 0..levels {
        out = subdivide(out)?;
    }
    Ok(out)
}

fn subdivide(mesh: IcoMesh) -> Result<IcoMesh> {
    let IcoMesh { mut vertices, indices } = mesh;
    let mut midpoints: FxHashMap<(u16, u16), u16> = FxHashMap::default();
    let mut result = Vec::with_capacity(indices.len() * 4);

    for face in indices.chunks_exact(3) {
        let mut mid = [0u16; 3];
        for i in 0..3 {
            let (a, b) = (face[i], face[(i + 1) % 3]);
            let key = (a.min(b), a.max(b));
            mid[i] = match midpoints.get(&key) {
                Some(&index) => index,
                None => {
                    let index = u16::try_from(vertices.len()).map_err(|_| {
                        Error::InvalidResource(format!(
                            "Icosphere exceeds {} vertices",
                            u16::MAX as u32 + 1
                        ))
                    })?;
                    let v0 = vertices[key.0 as usize];
                    let v1 = vertices[key.1 as usize];
                    vertices.push((v0 + (v1 - v0) * 0.5).normalize());
                    midpoints.insert(key, index);
                    index
                }
            };
        }

        result.extend_from_slice(&[
            face[0], mid[0], mid[2],
            mid[0], face[1], mid[1],
            mid[2], mid[1], face[2],
            mid[0], mid[1], mid[2],
        ]);
    }

    Ok(IcoMesh { vertices, indices: result })
}

#[cfg(test)]
#[path = "icosphere_tests.rs"]
mod tests;
