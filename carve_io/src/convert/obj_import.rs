//! OBJ import into a [`ReferenceMesh`].
//!
//! Reads `v` and `f` records; faces with more than three corners are fan
//! triangulated. Texture and normal records are skipped because OBJ indexes
//! them per face corner rather than per vertex.

use std::io::{BufRead, BufReader, Read};

use carve_core::Point3;

use crate::error::{CarveIoError, Result};
use crate::mesh::ReferenceMesh;

fn parse_error(line: usize, message: impl Into<String>) -> CarveIoError {
    CarveIoError::Parse {
        line,
        message: message.into(),
    }
}

/// Parse OBJ text from a reader.
pub fn parse_obj<R: Read>(reader: R) -> Result<ReferenceMesh> {
    let buf_reader = BufReader::new(reader);
    let mut positions = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (line_idx, line) in buf_reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut coord = [0.0f32; 3];
                for (axis, slot) in coord.iter_mut().enumerate() {
                    let token = parts.next().ok_or_else(|| {
                        parse_error(line_no, format!("vertex is missing component {}", axis))
                    })?;
                    *slot = token
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("invalid coordinate '{}'", token)))?;
                }
                positions.push(Point3::from(coord));
            }
            Some("f") => {
                // "f 1 2 3", "f 1/1 2/2 3/3", "f 1/1/1 ...", "f 1//1 ..."
                let mut corners: Vec<u32> = Vec::new();
                for part in parts {
                    let idx_str = part.split('/').next().unwrap_or(part);
                    let idx: i64 = idx_str
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("invalid face index '{}'", idx_str)))?;
                    // 1-based, negative values are relative to the end
                    let resolved = match idx {
                        0 => return Err(parse_error(line_no, "face index 0 is not valid")),
                        i if i > 0 => i - 1,
                        i => positions.len() as i64 + i,
                    };
                    if resolved < 0 || resolved >= positions.len() as i64 {
                        return Err(parse_error(
                            line_no,
                            format!("face index {} out of range", idx),
                        ));
                    }
                    corners.push(resolved as u32);
                }
                if corners.len() < 3 {
                    return Err(parse_error(line_no, "face needs at least 3 vertices"));
                }
                for i in 1..corners.len() - 1 {
                    indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    let mesh = ReferenceMesh::new(positions, &indices)?;
    log::info!(
        "parsed OBJ: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse an OBJ file from a path.
pub fn parse_obj_file<P: AsRef<std::path::Path>>(path: P) -> Result<ReferenceMesh> {
    let file = std::fs::File::open(path)?;
    parse_obj(file)
}
