//! polyclip CLI - clip polygons and meshes from JSON job files
//!
//! Writes the clipped result as JSON and optionally renders PNG previews.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polyclip::polyclip_render::{render_clip, render_graph, render_mesh, save_png};
use polyclip::{ClipSettings, TraceStrategy};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

mod job;
mod logger;

use job::{MeshJob, MeshReport, PolygonJob, PolygonReport};

#[derive(Parser)]
#[command(name = "polyclip")]
#[command(about = "Clip polygons and triangle meshes against a simple polygon", long_about = None)]
struct Cli {
    /// Log per-face decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides shared by every subcommand.
#[derive(Args)]
struct ClipArgs {
    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Render a PNG preview of the result
    #[arg(long)]
    png: Option<PathBuf>,
    /// Use the lazy tracing strategy
    #[arg(long)]
    lazy: bool,
    /// Iteration cap for splitting and tracing
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Disable the convex half-plane shortcut
    #[arg(long)]
    no_fast_path: bool,
}

impl ClipArgs {
    fn apply(&self, settings: &mut ClipSettings) {
        if self.lazy {
            settings.strategy = TraceStrategy::Lazy;
        }
        if let Some(n) = self.max_iterations {
            settings.max_iterations = n;
        }
        if self.no_fast_path {
            settings.convex_fast_path = false;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Clip a target polygon against a clip polygon
    Polygon {
        /// Job file with `target`, `clip` and optional `settings`
        job: PathBuf,
        #[command(flatten)]
        args: ClipArgs,
        /// Render the split graph with all crossings
        #[arg(long)]
        graph_png: Option<PathBuf>,
    },
    /// Clip every face of a mesh against a clip polygon
    Mesh {
        /// Job file with `vertices`, `faces`, `clip` and optional `options`
        job: PathBuf,
        #[command(flatten)]
        args: ClipArgs,
        /// Clip faces in parallel
        #[arg(long)]
        parallel: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose)?;

    match cli.command {
        Commands::Polygon {
            job,
            args,
            graph_png,
        } => clip_polygon(&job, &args, graph_png.as_deref())?,
        Commands::Mesh {
            job,
            args,
            parallel,
        } => clip_mesh(&job, &args, parallel)?,
    }

    Ok(())
}

fn read_job<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read job file {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid job file {}", path.display()))
}

fn write_report<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn clip_polygon(path: &Path, args: &ClipArgs, graph_png: Option<&Path>) -> Result<()> {
    let mut job: PolygonJob = read_job(path)?;
    args.apply(&mut job.settings);
    let (target, clip) = (job.target(), job.clip());

    let triangles = polyclip::clip_with(&target, &clip, &job.settings)?;
    eprintln!(
        "{} triangles, area {:.6}",
        triangles.len(),
        polyclip::triangles_area(&triangles)
    );

    if let Some(png) = &args.png {
        save_png(&render_clip(&target, &clip, &triangles)?, png)?;
        eprintln!("Saved preview to {}", png.display());
    }
    if let Some(png) = graph_png {
        let graph = polyclip::split_graph(&target, &clip, &job.settings)?;
        save_png(&render_graph(&graph, &job.settings.tolerance())?, png)?;
        eprintln!("Saved graph to {}", png.display());
    }

    write_report(&PolygonReport::new(&triangles), args.output.as_deref())
}

fn clip_mesh(path: &Path, args: &ClipArgs, parallel: bool) -> Result<()> {
    let mut job: MeshJob = read_job(path)?;
    args.apply(&mut job.options.settings);
    job.options.parallel |= parallel;
    let (mesh, clip) = (job.mesh(), job.clip());

    let out = polyclip::clip_mesh_with(&mesh, &clip, &job.options)?;
    eprintln!(
        "{} input faces -> {} vertices, {} faces, {} skipped",
        mesh.num_faces(),
        out.mesh.vertices.len(),
        out.mesh.num_faces(),
        out.skipped.len()
    );

    if let Some(png) = &args.png {
        save_png(&render_mesh(&mesh, &clip, &out.mesh)?, png)?;
        eprintln!("Saved preview to {}", png.display());
    }

    write_report(&MeshReport::new(&out), args.output.as_deref())
}
