use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use partyreel::{
    process_sheet,
    render::{CommandStore, DispatchReport},
    schedule::extract_schedule,
    table::{is_print_sheet, load_workbook_dir},
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Turn cached booking worksheets into per-child birthday videos.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory of cached worksheet CSVs
    #[arg(long, default_value = "worksheets")]
    worksheets: PathBuf,

    /// Root directory for rendered videos
    #[arg(long, default_value = "video")]
    video_dir: PathBuf,

    /// Template video passed to the renderer
    #[arg(long, default_value = "template.mp4")]
    template: PathBuf,

    /// Render program, invoked as `<program> [args..] <NAME> <output>`;
    /// omit for a dry run
    #[arg(long)]
    render_cmd: Option<PathBuf>,

    /// Extra leading arguments for the render program
    #[arg(long = "render-arg", allow_hyphen_values = true)]
    render_args: Vec<String>,

    /// Print the extracted schedules as JSON instead of rendering
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    // ─── 2) load cached sheets ───────────────────────────────────────
    let sheets = load_workbook_dir(&args.worksheets)
        .with_context(|| format!("loading worksheets from {}", args.worksheets.display()))?;
    if sheets.is_empty() {
        warn!("no worksheets in {}", args.worksheets.display());
        return Ok(());
    }
    info!("{} worksheets loaded", sheets.len());

    let sheets = sheets.into_iter().filter(|(name, _)| {
        if is_print_sheet(name) {
            info!("skipping print layout {}", name);
            false
        } else {
            true
        }
    });

    // ─── 3) json dump ────────────────────────────────────────────────
    if args.json {
        let mut out = Map::new();
        for (name, table) in sheets {
            out.insert(name, serde_json::to_value(extract_schedule(table))?);
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(out))?);
        return Ok(());
    }

    // ─── 4) render ───────────────────────────────────────────────────
    let mut store = CommandStore::new(&args.video_dir, &args.template);
    if let Some(program) = &args.render_cmd {
        store = store.with_program(program, args.render_args.clone());
    }

    let mut total = DispatchReport::default();
    for (name, table) in sheets {
        total.merge(process_sheet(&name, table, &mut store)?);
    }

    if args.render_cmd.is_none() {
        info!("dry run: {} videos pending", store.pending().len());
    }
    if !total.rejected.is_empty() {
        warn!("{} bookings had no usable birthday child", total.rejected.len());
    }
    info!(
        materialized = total.materialized,
        skipped = total.skipped,
        "Task complete for today's date: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
