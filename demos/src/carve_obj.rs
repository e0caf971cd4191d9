//! Carve Demo
//!
//! Voxelizes an OBJ mesh, punches a row of holes through it, saves the grid,
//! reloads it and writes the carved surface back out:
//! 1. Parse the OBJ mesh
//! 2. Build the voxel body
//! 3. Carve
//! 4. Save and reload the `.vox` grid
//! 5. Export the carved surface
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release --bin carve_obj -- input/bunny.obj output/ 0.02
//! ```

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use instant::Instant;

use carve_rs::prelude::*;
use carve_rs::write_obj;

fn banner(title: &str) {
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ {:<60}│", title);
    println!("└─────────────────────────────────────────────────────────────┘");
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("Error {}: {}", context, err);
    std::process::exit(1);
}

fn print_stats(mesh: &ExtractedMesh) {
    let stats = MeshStats::from_mesh(mesh);
    println!("  Triangles:       {}", stats.triangle_count);
    println!("  Vertices:        {}", stats.vertex_count);
    println!("  Surface area:    {:.4}", stats.surface_area);
    println!(
        "  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
        stats.bbox_min.x, stats.bbox_min.y, stats.bbox_min.z, stats.bbox_max.x, stats.bbox_max.y,
        stats.bbox_max.z
    );
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          Voxel Carving Demo");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = env::args().collect();
    let (input_path, output_dir) = if args.len() >= 3 {
        (PathBuf::from(&args[1]), PathBuf::from(&args[2]))
    } else {
        println!("Usage: {} <input.obj> <output_dir> [cell_size]", args[0]);
        println!();
        println!("Using default: input/landscape.obj → output/");
        (PathBuf::from("input/landscape.obj"), PathBuf::from("output"))
    };
    let cell_override = args.get(3).and_then(|s| s.parse::<f32>().ok());

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        fail("creating output directory", e);
    }

    // =========================================================================
    // Step 1: Parse OBJ file
    // =========================================================================
    banner("Step 1: Parse Input Mesh");

    let start = Instant::now();
    let mesh = parse_obj_file(&input_path).unwrap_or_else(|e| {
        fail(&format!("parsing OBJ file '{}'", input_path.display()), e)
    });
    let bounds = mesh.bounds();
    println!("  Input file:      {}", input_path.display());
    println!("  Vertices:        {}", mesh.vertex_count());
    println!("  Triangles:       {}", mesh.triangle_count());
    println!(
        "  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    println!("  Parse time:      {:.3}s", start.elapsed().as_secs_f64());
    println!();

    // =========================================================================
    // Step 2: Build the voxel body
    // =========================================================================
    banner("Step 2: Voxelize");

    let extent = bounds.extent();
    let max_extent = extent.x.max(extent.y).max(extent.z);
    let cell_size = cell_override.unwrap_or(max_extent / 64.0);
    let config = BodyConfig::new(cell_size).with_padding(2);

    let start = Instant::now();
    let mut body = VoxelBody::from_mesh(mesh, Placement::IDENTITY, config)
        .unwrap_or_else(|e| fail("voxelizing mesh", e));
    let dims = body.grid().dims();
    println!("  Cell size:       {:.4}", cell_size);
    println!("  Grid:            {} x {} x {} cells", dims.x, dims.y, dims.z);
    println!("  Samples inside:  {}", body.grid().inside_count());
    println!("  Build time:      {:.3}s", start.elapsed().as_secs_f64());
    print_stats(body.mesh());
    println!();

    // =========================================================================
    // Step 3: Carve a row of holes along X
    // =========================================================================
    banner("Step 3: Carve");

    let center = bounds.center();
    let radius = max_extent * 0.12;
    let start = Instant::now();
    let mut carved = 0;
    for i in 0..5 {
        let t = i as f32 / 4.0;
        let x = bounds.min.x + extent.x * (0.1 + 0.8 * t);
        carved += body.carve(Point3::new(x, center.y, bounds.max.z), radius);
    }
    println!("  Radius:          {:.4}", radius);
    println!("  Samples carved:  {}", carved);
    println!("  Carve time:      {:.3}s", start.elapsed().as_secs_f64());
    print_stats(body.mesh());
    println!();

    // =========================================================================
    // Step 4: Save and reload
    // =========================================================================
    banner("Step 4: Save / Load");

    let vox_path = output_dir.join("carved.vox");
    let start = Instant::now();
    if let Err(e) = body.save_file(&vox_path) {
        fail("saving grid", e);
    }
    let size = std::fs::metadata(&vox_path).map(|m| m.len()).unwrap_or(0);
    println!("  Saved:           {} ({} bytes)", vox_path.display(), size);

    let mut restored = VoxelBody::from_grid(
        body.grid().clone(),
        Placement::IDENTITY,
        body.config().clone(),
    )
    .unwrap_or_else(|e| fail("wrapping grid", e));
    if let Err(e) = restored.load_file(&vox_path) {
        fail("loading grid", e);
    }
    let identical = restored.grid().samples() == body.grid().samples();
    println!("  Reloaded:        {}", if identical { "bit-exact" } else { "MISMATCH" });
    println!("  Round trip:      {:.3}s", start.elapsed().as_secs_f64());
    println!();

    // =========================================================================
    // Step 5: Export to OBJ
    // =========================================================================
    banner("Step 5: Export to OBJ");

    let obj_path = output_dir.join("carved.obj");
    export(body.mesh(), &obj_path);
    println!("  Wrote:           {}", obj_path.display());
    println!();
    println!("Done.");
}

fn export(mesh: &ExtractedMesh, path: &Path) {
    let file = File::create(path).unwrap_or_else(|e| fail("creating OBJ file", e));
    if let Err(e) = write_obj(mesh, &mut BufWriter::new(file)) {
        fail("writing OBJ file", e);
    }
}
