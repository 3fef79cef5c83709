//! Reading measurement directions from Wavefront OBJ files

use crate::types::Vertex;
use crate::{HullError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse the `v x y z` lines of an OBJ stream.
///
/// Everything else (comments, normals, texture coordinates, faces, groups)
/// is ignored. Extra components after `z` (a `w` or vertex colours) are
/// ignored as well. A `v` line with fewer than three numbers fails with
/// [`HullError::Parse`].
pub fn parse_obj_vertices<R: BufRead>(reader: R) -> Result<Vec<Vertex>> {
    let mut vertices = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        let mut parts = line.split_whitespace();
        if parts.next() != Some("v") {
            continue;
        }

        let mut coords = [0.0_f64; 3];
        for (axis, coord) in coords.iter_mut().enumerate() {
            let token = parts.next().ok_or_else(|| HullError::Parse {
                line: number + 1,
                message: format!("vertex has {} coordinates, expected 3", axis),
            })?;
            *coord = token.parse().map_err(|e| HullError::Parse {
                line: number + 1,
                message: format!("invalid coordinate '{}': {}", token, e),
            })?;
        }

        vertices.push(Vertex::new(coords[0], coords[1], coords[2]));
    }

    Ok(vertices)
}

/// Load the vertices of an OBJ file, see [`parse_obj_vertices`]
pub fn load_obj_vertices<P: AsRef<Path>>(path: P) -> Result<Vec<Vertex>> {
    let path = path.as_ref();
    let vertices = parse_obj_vertices(BufReader::new(File::open(path)?))?;
    log::debug!("{}: {} vertices", path.display(), vertices.len());
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vertices_only() {
        let obj = "\
# measurement grid
o grid
v 1.0 0.0 0.0
vn 0.0 0.0 1.0
vt 0.5 0.5
  v   0.0 -2.5 3e-1   1.0
f 1//1 2//1 1//1

v 4 5 6
";
        let vertices = parse_obj_vertices(obj.as_bytes()).unwrap();
        assert_eq!(
            vertices,
            vec![
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, -2.5, 0.3),
                Vertex::new(4.0, 5.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_obj_vertices("v 1 2 3\nv 1 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, HullError::Parse { line: 2, .. }));

        let err = parse_obj_vertices("# x\n\nv 1 abc 3\n".as_bytes()).unwrap_err();
        match err {
            HullError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_obj_vertices("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_obj_vertices("/nonexistent/hrtf_hull/grid.obj").unwrap_err();
        assert!(matches!(err, HullError::Io(_)));
    }
}
