//! barload - Barbell loading companion
//!
//! Plate math for the bar in front of you: greedy per-side breakdowns,
//! warmup ramps, set logging, and rest timing.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use barload::db::{Database, WorkoutSet};
use barload::plates::{Loadout, PlateInventory, Rack};
use barload::stats::Analytics;
use barload::timer::{format_mm_ss, RestTimer};
use barload::tui::App;
use barload::units::{Unit, Weight};
use barload::warmup::warmup_sets;

#[derive(Parser)]
#[command(name = "barload")]
#[command(author, version, about = "Barbell plate math, set logging, and rest timing")]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "BARLOAD_DB", default_value = "barload.db", global = true)]
    db: String,

    /// Measurement unit: lbs or kg
    #[arg(short, long, env = "BARLOAD_UNIT", default_value = "lbs", global = true)]
    unit: Unit,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Show the per-side plate breakdown for a target weight
    Plates {
        /// Target total weight on the bar
        target: Weight,

        /// Bar weight override
        #[arg(short, long)]
        bar: Option<Weight>,

        /// Owned plates as sizexcount pairs, e.g. "45x4,25x2,10x4"
        #[arg(short, long)]
        plates: Option<PlateInventory>,

        /// JSON inventory file, [{"size":45.0,"count":4}, ...]
        #[arg(short, long)]
        inventory: Option<String>,
    },

    /// Print the warmup ramp toward a work weight
    Warmup {
        /// Work weight to ramp toward
        work: Weight,

        /// Bar weight override
        #[arg(short, long)]
        bar: Option<Weight>,

        /// Owned plates as sizexcount pairs, e.g. "45x4,25x2,10x4"
        #[arg(short, long)]
        plates: Option<PlateInventory>,

        /// JSON inventory file, [{"size":45.0,"count":4}, ...]
        #[arg(short, long)]
        inventory: Option<String>,
    },

    /// Log a set
    Log {
        /// Exercise name (e.g., "squat", "bench press")
        exercise: String,

        /// Weight on the bar
        weight: Weight,

        /// Number of sets
        #[arg(short, long, default_value = "3")]
        sets: i32,

        /// Number of reps per set
        #[arg(short, long, default_value = "5")]
        reps: i32,

        /// Rest between sets in seconds
        #[arg(long)]
        rest: Option<i32>,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List logged sets
    List {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show training statistics
    Stats {
        /// Filter by exercise name
        exercise: Option<String>,
    },

    /// Run a rest countdown in the terminal
    Timer {
        /// Countdown length in seconds
        #[arg(default_value = "90")]
        secs: u64,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tui) | None => {
            let db = Database::open(&cli.db)?;
            let mut app = App::new(db, cli.unit)?;
            app.run()?;
        }

        Some(Commands::Plates { target, bar, plates, inventory }) => {
            let rack = build_rack(cli.unit, bar, plates, inventory)?;
            let loadout = rack.load(target);
            println!("Target: {} {}", target, cli.unit);
            print_loadout(&loadout, cli.unit);
        }

        Some(Commands::Warmup { work, bar, plates, inventory }) => {
            let rack = build_rack(cli.unit, bar, plates, inventory)?;
            println!("Warmup for {} {}:", work, cli.unit);
            println!("{:-<60}", "");
            for set in warmup_sets(&rack, cli.unit, work) {
                let short = if set.loadout.leftover().is_zero() {
                    String::new()
                } else {
                    format!(" (short {} per side)", set.loadout.leftover())
                };
                println!(
                    "{:>3}% | {:>7} {} x{:<2} | {}{}",
                    set.percent,
                    set.target.to_string(),
                    cli.unit,
                    set.reps,
                    grouped_summary(&set.loadout),
                    short
                );
            }
        }

        Some(Commands::Log { exercise, weight, sets, reps, rest, notes }) => {
            let db = Database::open(&cli.db)?;
            let set = WorkoutSet {
                id: None,
                date: Utc::now(),
                exercise: exercise.clone(),
                weight,
                unit: cli.unit,
                sets,
                reps,
                rest_secs: rest,
                notes,
            };
            let id = db.add_set(&set)?;
            println!(
                "Logged: {} - {} {} {}x{} (id: {})",
                exercise, weight, cli.unit, sets, reps, id
            );
        }

        Some(Commands::List { limit, json }) => {
            let db = Database::open(&cli.db)?;
            let shown: Vec<_> = db.get_sets()?.into_iter().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Recent sets:");
                println!("{:-<72}", "");
                for s in &shown {
                    println!(
                        "{} | {:20} | {:>7} {} | {}x{} | {}",
                        s.date.format("%Y-%m-%d %H:%M"),
                        s.exercise,
                        s.weight.to_string(),
                        s.unit,
                        s.sets,
                        s.reps,
                        s.notes.as_deref().unwrap_or("-")
                    );
                }
            }
        }

        Some(Commands::Stats { exercise }) => {
            let db = Database::open(&cli.db)?;
            let analytics = Analytics::new(db.get_sets()?);

            println!("Training Statistics");
            println!("{:-<40}", "");

            if let Some(ex) = exercise {
                println!("Exercise: {}", ex);
                println!("Total volume: {} reps", analytics.total_volume(&ex));

                if let Some(best) = analytics.best_set(&ex) {
                    println!("Best set: {} {} x{}", best.weight, best.unit, best.reps);
                    if let Some(e1rm) = analytics.estimated_one_rep_max(&ex) {
                        println!("Estimated 1RM: {} {}", e1rm, best.unit);
                    }
                }
                if let Some((next, unit)) = analytics.suggest_next_load(&ex) {
                    println!("Suggested next: {} {}", next, unit);
                }
            } else {
                println!(
                    "Weekly frequency: {:.1} sets/week",
                    analytics.weekly_frequency()
                );
            }
        }

        Some(Commands::Timer { secs }) => {
            let timer = RestTimer::start(Duration::from_secs(secs));
            println!("Resting {}", format_mm_ss(timer.duration()));
            while !timer.is_done() {
                print!("\r{}  ", format_mm_ss(timer.remaining()));
                std::io::stdout().flush()?;
                std::thread::sleep(Duration::from_millis(250));
            }
            println!("\r0:00  ");
            println!("Rest over.\x07");
        }
    }

    Ok(())
}

/// Rack from the CLI flags. An explicit `--plates` list wins over an
/// inventory file; with neither, the unit's canonical plates are unbounded.
fn build_rack(
    unit: Unit,
    bar: Option<Weight>,
    plates: Option<PlateInventory>,
    inventory_path: Option<String>,
) -> Result<Rack> {
    let bar_weight = bar.unwrap_or_else(|| unit.bar_weight());

    let inventory = match (plates, inventory_path) {
        (Some(p), _) => Some(p),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(&path)?;
            Some(serde_json::from_str(&text)?)
        }
        (None, None) => None,
    };

    Ok(match inventory {
        Some(inv) => Rack::from_inventory(bar_weight, inv),
        None => Rack::with_bar(unit, bar_weight),
    })
}

fn grouped_summary(loadout: &Loadout) -> String {
    if loadout.is_bar_only() {
        return "bar".to_string();
    }
    let groups: Vec<String> = loadout
        .grouped()
        .iter()
        .map(|(size, count)| format!("{count}x{size}"))
        .collect();
    groups.join(" ")
}

fn print_loadout(loadout: &Loadout, unit: Unit) {
    if loadout.is_bar_only() {
        println!("Empty bar ({} {})", loadout.bar_weight(), unit);
    } else {
        println!("Per side: {}", grouped_summary(loadout));
        println!(
            "Loaded:   {} {} on a {} {} bar",
            loadout.total(),
            unit,
            loadout.bar_weight(),
            unit
        );
    }
    if !loadout.leftover().is_zero() {
        println!("Short by {} per side", loadout.leftover());
    }
}
