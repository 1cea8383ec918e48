//! Static cube geometry: 24 position-only vertices, 36 u16 indices.

use bytemuck::{Pod, Zeroable};

/// One vertex record: position only, three contiguous f32s.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex { position: [x, y, z] }
}

/// Bytes between consecutive vertex records.
pub const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

const P: f32 = 0.5;

/// Unit cube, four vertices per face so each face is flat-addressable.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 24] = [
    // +Z face
    v(-P, -P,  P), v( P, -P,  P), v( P,  P,  P), v(-P,  P,  P),
    // -Z face
    v( P, -P, -P), v(-P, -P, -P), v(-P,  P, -P), v( P,  P, -P),
    // +X face
    v( P, -P,  P), v( P, -P, -P), v( P,  P, -P), v( P,  P,  P),
    // -X face
    v(-P, -P, -P), v(-P, -P,  P), v(-P,  P,  P), v(-P,  P, -P),
    // +Y face
    v(-P,  P,  P), v( P,  P,  P), v( P,  P, -P), v(-P,  P, -P),
    // -Y face
    v(-P, -P, -P), v( P, -P, -P), v( P, -P,  P), v(-P, -P,  P),
];

/// Two counter-clockwise triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2,  2, 3, 0,       // +Z
    4, 5, 6,  6, 7, 4,       // -Z
    8, 9, 10,  10, 11, 8,    // +X
    12, 13, 14,  14, 15, 12, // -X
    16, 17, 18,  18, 19, 16, // +Y
    20, 21, 22,  22, 23, 20, // -Y
];
