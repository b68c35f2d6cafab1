use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyzone_cli::{AppEvent, PointerButton, Response, Session};
use polyzone_core::{Point, PolygonGenerator};
use polyzone_io::{FileStore, ZoneSettings};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "polyzone", about = "Drag random polygons onto a pannable, zoomable canvas")]
#[command(version)]
struct Cli {
    /// Directory holding the persisted state
    #[arg(long, global = true, default_value = ".polyzone")]
    store: PathBuf,

    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the polygon generator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of 5-20 polygons into the buffer
    Generate,
    /// List buffered and placed polygons
    Show,
    /// Print the full render frame as JSON
    Frame,
    /// Print the ruler labels for the current view
    Grid,
    /// Save the board and view now
    Save,
    /// Clear both collections and the saved board
    Reset,
    /// Drag a buffered polygon and drop it at a screen position
    Drop {
        id: Uuid,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Drop this raw transfer data instead of the dragged polygon
        #[arg(long)]
        payload: Option<String>,
    },
    /// Scroll the wheel over the work canvas (positive zooms out)
    Zoom {
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },
    /// Drag the work canvas by a pixel delta
    Pan {
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings = match &cli.config {
        Some(path) => ZoneSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => ZoneSettings::default(),
    };
    let store = FileStore::open(&cli.store)
        .with_context(|| format!("failed to open store at {}", cli.store.display()))?;
    let generator = match cli.seed {
        Some(seed) => PolygonGenerator::seeded(seed),
        None => PolygonGenerator::from_entropy(),
    };
    let mut session = Session::open(settings, Box::new(store), generator)?;

    match cli.command {
        Commands::Generate => {
            let added = session.generate_batch()?;
            println!(
                "generated {added} polygons ({} in buffer)",
                session.board().buffer().len()
            );
        }
        Commands::Show => print_board(&session),
        Commands::Frame => println!("{}", session.frame(Instant::now()).to_json()?),
        Commands::Grid => print_grid(&session),
        Commands::Save => {
            session.save()?;
            println!("saved");
        }
        Commands::Reset => {
            session.reset()?;
            println!("reset");
        }
        Commands::Drop { id, x, y, payload } => {
            drop_polygon(&mut session, id, Point::new(x, y), payload)?
        }
        Commands::Zoom { delta } => {
            session.handle(AppEvent::Wheel { delta_y: delta }, Instant::now())?;
            session.save()?;
            println!("scale {:.4}", session.view().scale());
        }
        Commands::Pan { dx, dy } => {
            let now = Instant::now();
            let start = Point::new(0.0, 0.0);
            session.handle(
                AppEvent::PointerDown {
                    button: PointerButton::Primary,
                    position: start,
                },
                now,
            )?;
            session.handle(
                AppEvent::PointerMove {
                    position: start.translate(dx, dy),
                },
                now,
            )?;
            session.handle(AppEvent::PointerUp, now)?;
            session.save()?;
            let view = session.view();
            println!("offset ({:.2}, {:.2})", view.offset_x(), view.offset_y());
        }
    }

    Ok(())
}

fn drop_polygon(
    session: &mut Session,
    id: Uuid,
    position: Point,
    payload: Option<String>,
) -> Result<()> {
    let now = Instant::now();
    let started = match session.handle(AppEvent::DragStart { id }, now)? {
        Response::DragStarted(started) => started,
        other => anyhow::bail!("unexpected response to drag start: {other:?}"),
    };
    session.handle(AppEvent::DragOver, now)?;
    let data = payload.unwrap_or(started.payload);
    let response = session.handle(AppEvent::Drop { data, position }, now)?;
    session.handle(AppEvent::DragEnd, now)?;

    match response {
        Response::Placed { placed, outcome } => {
            if let Some(at) = placed.polygon.position() {
                println!(
                    "placed {} at ({:.2}, {:.2}) [{outcome:?}]",
                    placed.polygon.id(),
                    at.x,
                    at.y
                );
            }
        }
        Response::DropRejected { message } => eprintln!("notice: {message}"),
        other => log::debug!("drop ignored: {other:?}"),
    }
    Ok(())
}

fn print_board(session: &Session) {
    let board = session.board();
    println!("buffer ({}):", board.buffer().len());
    for p in board.buffer() {
        println!("  {}  {:>2} vertices  {}", p.id(), p.vertex_count(), p.fill());
    }
    println!("work ({}):", board.work().len());
    for p in board.work() {
        let at = p.position().unwrap_or(Point::new(0.0, 0.0));
        println!(
            "  {}  {:>2} vertices  {}  at ({:.2}, {:.2})",
            p.id(),
            p.vertex_count(),
            p.fill(),
            at.x,
            at.y
        );
    }
}

fn print_grid(session: &Session) {
    let view = session.view();
    let grid = session.grid();
    println!(
        "scale {:.4}  offset ({:.2}, {:.2})",
        view.scale(),
        view.offset_x(),
        view.offset_y()
    );
    if grid.is_empty() {
        println!("no ruler labels in view");
        return;
    }
    log::debug!("{} ruler labels", grid.len());
    let fmt = |labels: &[polyzone_renderer::AxisLabel]| {
        labels
            .iter()
            .map(|l| format!("{}@{:.1}", l.value, l.position))
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!("x: {}", fmt(&grid.horizontal));
    println!("y: {}", fmt(&grid.vertical));
    match grid.origin {
        Some(origin) => println!("0 at ({:.1}, {:.1})", origin.x, origin.y),
        None => println!("origin off screen"),
    }
}
