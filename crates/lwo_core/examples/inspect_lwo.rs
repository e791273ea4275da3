//! Example: Load and inspect an LWO2 file.
//!
//! Run with: cargo run --example inspect_lwo -- assets/crate.lwo
//! Options:  cargo run --example inspect_lwo -- assets/crate.lwo --options decode.json

use std::env;

use anyhow::{bail, Context, Result};
use lwo_core::lwo2::load_lwo_with_options;
use lwo_core::DecodeOptions;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_lwo <path-to-lwo-file> [--options <options.json>]");
        println!("\nExamples:");
        println!("  cargo run --example inspect_lwo -- assets/crate.lwo");
        println!("  RUST_LOG=debug cargo run --example inspect_lwo -- assets/crate.lwo");
        return Ok(());
    }

    let options = match args.get(2).map(String::as_str) {
        Some("--options") => {
            let Some(options_path) = args.get(3) else {
                bail!("--options needs a path");
            };
            let json = std::fs::read_to_string(options_path)
                .with_context(|| format!("reading {}", options_path))?;
            DecodeOptions::from_json_str(&json).with_context(|| format!("parsing {}", options_path))?
        }
        Some(other) => bail!("Unknown argument: {}", other),
        None => DecodeOptions::default(),
    };

    let path = &args[1];
    println!("Loading LWO file: {}", path);

    let object = load_lwo_with_options(path, &options).with_context(|| format!("loading {}", path))?;

    println!("\n=== Object: {} ===", object.name);
    println!("Vertices: {}", object.vertex_count());
    println!("Surfaces: {}", object.child_count());
    println!("Total triangles: {}", object.total_triangle_count());

    println!("\n--- Surfaces ---");
    for (i, surface) in object.children.iter().enumerate() {
        let material = &surface.material;
        println!(
            "  [{}] {:?} - {} triangles",
            i,
            surface.name,
            surface.mesh.triangle_count()
        );
        println!(
            "       Color: ({:.3}, {:.3}, {:.3}, {:.3}){}",
            material.base_color.x,
            material.base_color.y,
            material.base_color.z,
            material.base_color.w,
            if material.defined { "" } else { " [no SURF record]" }
        );
        for image in &material.image_paths {
            println!("       Image: {}", image);
        }
        let b = &surface.mesh.bounds;
        println!(
            "       Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
        );
    }

    let bounds = object.bounds();
    if !bounds.is_empty() {
        println!("\n--- Object Bounds ---");
        println!("  Min: ({:.2}, {:.2}, {:.2})", bounds.min.x, bounds.min.y, bounds.min.z);
        println!("  Max: ({:.2}, {:.2}, {:.2})", bounds.max.x, bounds.max.y, bounds.max.z);
        let center = bounds.centroid();
        println!("  Center: ({:.2}, {:.2}, {:.2})", center.x, center.y, center.z);
    }

    Ok(())
}
