//! Export functions for hull meshes

use crate::types::{Mesh, Vertex};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Added to the normal length so that a zero-area face exports a zero normal
const NORMAL_GUARD: f64 = 2.23e-9;

fn guarded_normal(mesh: &Mesh, index: usize) -> Vertex {
    let vertices = mesh.vertices();
    let face = mesh.faces()[index];
    let v0 = &vertices[face.v0];
    let n = vertices[face.v1].sub(v0).cross(&vertices[face.v2].sub(v0));
    n.scale(1.0 / (n.magnitude() + NORMAL_GUARD))
}

/// Write a mesh in Wavefront OBJ format
///
/// One `vn` per face, and each `f` line refers to its face's normal. With
/// `keep_only_used`, every face gets its own three `v` lines (in face order)
/// so points that are not on the hull never appear in the file; otherwise
/// all input points are written and faces index them directly.
pub fn write_obj<W: Write>(
    writer: &mut W,
    mesh: &Mesh,
    keep_only_used: bool,
) -> std::io::Result<()> {
    writeln!(writer, "o")?;

    if keep_only_used {
        for face in mesh.faces() {
            for i in face.indices() {
                let v = &mesh.vertices()[i];
                writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
            }
        }
    } else {
        for v in mesh.vertices() {
            writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
    }

    for i in 0..mesh.num_faces() {
        let n = guarded_normal(mesh, i);
        writeln!(writer, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
    }

    // OBJ uses 1-based indexing
    for (i, face) in mesh.faces().iter().enumerate() {
        let [a, b, c] = if keep_only_used {
            [3 * i + 1, 3 * i + 2, 3 * i + 3]
        } else {
            [face.v0 + 1, face.v1 + 1, face.v2 + 1]
        };
        let n = i + 1;
        writeln!(writer, "f {a}//{n} {b}//{n} {c}//{n}")?;
    }

    Ok(())
}

/// Export a mesh to an OBJ file, see [`write_obj`]
pub fn export_obj<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    keep_only_used: bool,
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(&mut writer, mesh, keep_only_used)?;
    writer.flush()
}

/// Write a mesh as a MATLAB/Octave script defining `vertices` (N x 3) and
/// `faces` (F x 3, 1-based)
pub fn write_m<W: Write>(writer: &mut W, mesh: &Mesh) -> std::io::Result<()> {
    writeln!(writer, "vertices = [")?;
    for v in mesh.vertices() {
        writeln!(writer, "{:.6}, {:.6}, {:.6};", v.x, v.y, v.z)?;
    }
    writeln!(writer, "];")?;
    writeln!(writer)?;

    writeln!(writer, "faces = [")?;
    for face in mesh.faces() {
        writeln!(writer, " {}, {}, {};", face.v0 + 1, face.v1 + 1, face.v2 + 1)?;
    }
    writeln!(writer, "];")?;

    Ok(())
}

/// Export a mesh to a `.m` file, see [`write_m`]
pub fn export_m<P: AsRef<Path>>(mesh: &Mesh, path: P) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_m(&mut writer, mesh)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Face;

    fn tetrahedron_with_interior_point() -> Mesh {
        let vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(0.1, 0.1, 0.1),
            Vertex::new(0.0, 0.0, 1.0),
        ];
        let faces = vec![
            Face::new(0, 2, 1),
            Face::new(0, 1, 4),
            Face::new(0, 4, 2),
            Face::new(1, 2, 4),
        ];
        Mesh::new(vertices, faces)
    }

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_obj_all_vertices() {
        let mesh = tetrahedron_with_interior_point();
        let mut out = Vec::new();
        write_obj(&mut out, &mesh, false).unwrap();
        let lines = lines(out);

        assert_eq!(lines[0], "o");
        assert_eq!(lines.iter().filter(|l| l.starts_with("v ")).count(), 5);
        assert_eq!(lines.iter().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(lines[4], "v 0.100000 0.100000 0.100000");
        // z = 0 face looks down
        assert_eq!(lines[6], "vn 0.000000 0.000000 -1.000000");
        assert_eq!(lines[10], "f 1//1 3//1 2//1");
        assert_eq!(lines[13], "f 2//4 3//4 5//4");
    }

    #[test]
    fn test_obj_keep_only_used() {
        let mesh = tetrahedron_with_interior_point();
        let mut out = Vec::new();
        write_obj(&mut out, &mesh, true).unwrap();
        let lines = lines(out);

        let vertex_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("v ")).collect();
        assert_eq!(vertex_lines.len(), 12);
        assert!(!vertex_lines.iter().any(|l| l.contains("0.100000")));
        assert_eq!(lines.last().unwrap(), "f 10//4 11//4 12//4");
    }

    #[test]
    fn test_obj_degenerate_face_normal() {
        let vertices = vec![Vertex::new(1.0, 1.0, 1.0); 3];
        let mesh = Mesh::new(vertices, vec![Face::new(0, 1, 2)]);
        let mut out = Vec::new();
        write_obj(&mut out, &mesh, false).unwrap();
        assert!(lines(out).contains(&"vn 0.000000 0.000000 0.000000".to_string()));
    }

    #[test]
    fn test_matlab_script() {
        let mesh = tetrahedron_with_interior_point();
        let mut out = Vec::new();
        write_m(&mut out, &mesh).unwrap();
        let lines = lines(out);

        assert_eq!(lines[0], "vertices = [");
        assert_eq!(lines[2], "1.000000, 0.000000, 0.000000;");
        assert_eq!(lines[6], "];");
        assert_eq!(lines[8], "faces = [");
        assert_eq!(lines[9], " 1, 3, 2;");
        assert_eq!(lines.last().unwrap(), "];");
    }

    #[test]
    fn test_export_files() {
        let mesh = tetrahedron_with_interior_point();
        let dir = std::env::temp_dir().join("hrtf_hull_export_test");
        std::fs::create_dir_all(&dir).unwrap();

        let obj = dir.join("tetra.obj");
        let m = dir.join("tetra.m");
        export_obj(&mesh, &obj, false).unwrap();
        export_m(&mesh, &m).unwrap();

        let content = std::fs::read_to_string(&obj).unwrap();
        assert_eq!(content.lines().filter(|l| l.starts_with("f ")).count(), 4);
        assert!(std::fs::read_to_string(&m).unwrap().contains("faces = ["));
    }
}
