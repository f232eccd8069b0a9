//! worlduv CLI - world-space UV unwrapping tool.
//!
//! Usage: worlduv <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `worlduv --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use nalgebra::{Matrix4, Vector3};

use worlduv::algo::planar::ProjectOptions;
use worlduv::algo::unwrap::{world_space_unwrap, world_space_unwrap_faces, UnwrapOptions};
use worlduv::algo::uv::LoopUvMap;
use worlduv::io::{self, obj, Format};
use worlduv::mesh::PolygonMesh;

#[derive(Parser)]
#[command(name = "worlduv")]
#[command(author, version, about = "World-space UV unwrapping CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Unwrap UVs in world space and save as OBJ
    Unwrap {
        /// Input mesh file (OBJ or STL)
        input: PathBuf,

        /// Output OBJ file
        output: PathBuf,

        /// UV scale in world units per UV unit (minimum 0.001)
        #[arg(short, long, default_value = "1.0")]
        scale: f64,

        /// UV rotation in degrees
        #[arg(short, long, default_value = "0.0")]
        rotation: f64,

        /// UV offset, U component
        #[arg(long, default_value = "0.0")]
        offset_u: f64,

        /// UV offset, V component
        #[arg(long, default_value = "0.0")]
        offset_v: f64,

        /// Object-to-world translation (x y z)
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"])]
        translate: Option<Vec<f64>>,

        /// Object-to-world uniform scale
        #[arg(long, default_value = "1.0")]
        object_scale: f64,

        /// Unwrap only these faces (comma-separated indices); others keep
        /// zero UVs
        #[arg(long, value_delimiter = ',')]
        faces: Vec<usize>,

        /// Texture image to reference from a generated MTL file
        #[arg(long)]
        texture: Option<String>,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Unwrap {
            input,
            output,
            scale,
            rotation,
            offset_u,
            offset_v,
            translate,
            object_scale,
            faces,
            texture,
            sequential,
        } => {
            cmd_unwrap(
                &input,
                &output,
                scale,
                rotation,
                (offset_u, offset_v),
                translate,
                object_scale,
                &faces,
                texture.as_deref(),
                sequential,
            )?;
        }
    }

    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Loops: {}", mesh.num_loops());

    let mut total_area = 0.0;
    let mut min_area = f64::MAX;
    let mut max_area = 0.0_f64;

    for f in mesh.face_ids() {
        let area = mesh.face_area(f);
        total_area += area;
        min_area = min_area.min(area);
        max_area = max_area.max(area);
    }

    println!("Surface area: {:.6}", total_area);
    println!("Face area range: [{:.6}, {:.6}]", min_area, max_area);

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    if mesh.is_triangle_mesh() {
        println!("Mesh type: Triangle mesh");
    } else if mesh.is_quad_mesh() {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Mixed polygon mesh");
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_unwrap(
    input: &PathBuf,
    output: &PathBuf,
    scale: f64,
    rotation_degrees: f64,
    offset: (f64, f64),
    translate: Option<Vec<f64>>,
    object_scale: f64,
    faces: &[usize],
    texture: Option<&str>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if Format::from_path(output) != Some(Format::Obj) {
        return Err("output must be an .obj file (STL cannot store UVs)".into());
    }

    let mesh: PolygonMesh = io::load(input)?;
    println!(
        "Loaded: {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    );

    let project = ProjectOptions::default()
        .with_scale(scale)
        .with_rotation_degrees(rotation_degrees)
        .with_offset(offset.0, offset.1);

    let mut world = Matrix4::new_scaling(object_scale);
    if let Some(t) = translate {
        world = Matrix4::new_translation(&Vector3::new(t[0], t[1], t[2])) * world;
    }

    let options = UnwrapOptions::default()
        .with_project(project)
        .with_world_transform(world)
        .with_parallel(!sequential);

    let mode = if sequential { "sequential" } else { "parallel" };
    log::info!(
        "unwrapping with scale={}, rotation={}deg, offset=({}, {}), {}",
        project.scale,
        rotation_degrees,
        offset.0,
        offset.1,
        mode
    );

    let start = Instant::now();
    let uvs = if faces.is_empty() {
        world_space_unwrap(&mesh, &options)?
    } else {
        let mut uvs = LoopUvMap::zeros(mesh.num_loops());
        world_space_unwrap_faces(&mesh, faces, &options, &mut uvs)?;
        uvs
    };
    let elapsed = start.elapsed();

    println!(
        "Unwrapped {} faces in {:.2?}",
        if faces.is_empty() {
            mesh.num_faces()
        } else {
            faces.len()
        },
        elapsed
    );

    if let Some((min, max)) = uvs.bounding_box() {
        println!(
            "UV bounds: ({:.3}, {:.3}) to ({:.3}, {:.3})",
            min.x, min.y, max.x, max.y
        );
    }

    let mtl_name = texture.map(|_| {
        let mut mtl = output.clone();
        mtl.set_extension("mtl");
        mtl
    });

    obj::save_with_uvs(
        &mesh,
        &uvs,
        output,
        mtl_name
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str()),
    )?;
    println!("Saved {}", output.display());

    if let (Some(mtl_path), Some(texture)) = (mtl_name, texture) {
        obj::write_mtl(&mtl_path, texture)?;
        println!("Saved {}", mtl_path.display());
    }

    Ok(())
}
