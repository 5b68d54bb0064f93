use super::display_list::{DispListKind, DisplayList, DisplayListError};
use glam::Vec3;

/// A flat strip of `triangles` triangles in the XY plane, facing +Z.
pub fn triangle_strip(triangles: usize) -> Result<DisplayList, DisplayListError> {
    let columns = triangles.div_ceil(2);
    let mut verts = Vec::with_capacity((columns + 1) * 2);
    for col in 0..=columns {
        let x = col as f32;
        verts.push([x, 0.0, 0.0]);
        verts.push([x, 1.0, 0.0]);
    }
    let nors = vec![[0.0, 0.0, 1.0]; verts.len()];

    let mut index = Vec::with_capacity(triangles * 3);
    for tri in 0..triangles as u32 {
        let col = tri / 2;
        let bottom = col * 2;
        let top = bottom + 1;
        if tri % 2 == 0 {
            index.extend_from_slice(&[bottom, bottom + 2, top]);
        } else {
            index.extend_from_slice(&[top, bottom + 2, top + 2]);
        }
    }

    let mut list = DisplayList::new();
    list.add_indexed(DispListKind::Index3, verts, nors, index)?;
    Ok(list)
}

/// Octahedron written the way the metaball polygonizer emits triangles:
/// `Index4` faces with the last index repeating the third.
pub fn octahedron(radius: f32) -> Result<DisplayList, DisplayListError> {
    let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let verts: Vec<[f32; 3]> = axes.iter().map(|a| (*a * radius).to_array()).collect();
    // For a shape centred on the origin the normal is the normalized position
    let nors: Vec<[f32; 3]> = axes.iter().map(|a| a.normalize().to_array()).collect();

    let (px, nx, py, ny, pz, nz) = (0, 1, 2, 3, 4, 5);
    let faces = [
        [px, py, pz],
        [py, nx, pz],
        [nx, ny, pz],
        [ny, px, pz],
        [py, px, nz],
        [nx, py, nz],
        [ny, nx, nz],
        [px, ny, nz],
    ];
    let index = faces
        .iter()
        .flat_map(|&[a, b, c]| [a, b, c, c])
        .collect();

    let mut list = DisplayList::new();
    list.add_indexed(DispListKind::Index4, verts, nors, index)?;
    Ok(list)
}
