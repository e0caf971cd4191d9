//! Format conversion.
//!
//! - `obj_import`: Wavefront OBJ → [`ReferenceMesh`](crate::mesh::ReferenceMesh)

pub mod obj_import;

pub use obj_import::{parse_obj, parse_obj_file};
