//! Headless keymaze driver.
//!
//! Generates a level, walks a random player through it for a bounded
//! number of ticks, and reports the outcome. Useful for smoke-testing
//! generation parameters and watching the simulation behave without
//! any rendering stack.

use clap::Parser;

use keymaze_core::dungeon::{Position, Tile};
use keymaze_core::{GameEvent, GameRng, SimConfig, SimStatus, Simulation};

#[derive(Parser, Debug)]
#[command(name = "keymaze", about = "Run a keymaze level without a renderer")]
struct Args {
    /// Maze width (odd, >= 5).
    #[arg(long, default_value_t = 21)]
    width: i32,

    /// Maze height (odd, >= 5).
    #[arg(long, default_value_t = 21)]
    height: i32,

    /// Key/door pairs to place (0..=4).
    #[arg(long, default_value_t = 3)]
    keys: u8,

    /// Extra loop connections carved into the perfect maze.
    #[arg(long, default_value_t = 15)]
    branches: u32,

    /// Enemies to spawn.
    #[arg(long, default_value_t = 2)]
    enemies: u32,

    /// Contact damage per enemy hit.
    #[arg(long, default_value_t = 10)]
    damage: i32,

    /// Level seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum simulation ticks before giving up.
    #[arg(long, default_value_t = 20_000)]
    ticks: u32,

    /// Seconds of simulated time per tick.
    #[arg(long, default_value_t = 0.016)]
    step: f32,

    /// Print the final map.
    #[arg(long)]
    map: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = SimConfig {
        width: args.width,
        height: args.height,
        key_count: args.keys,
        branch_count: args.branches,
        enemy_count: args.enemies,
        enemy_damage: args.damage,
        seed: args.seed,
    };

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("keymaze: {err}");
            std::process::exit(2);
        }
    };
    log::info!("level seed {}", sim.seed());

    let mut walker = GameRng::new(sim.seed().wrapping_add(1));
    let steps: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    let mut ticks_run = 0;

    for _ in 0..args.ticks {
        if sim.status() != SimStatus::Running {
            break;
        }
        if !sim.player().is_moving() {
            let &(dx, dy) = walker.choose(&steps).expect("non-empty");
            sim.move_player(dx, dy);
        }
        sim.update(args.step);
        ticks_run += 1;

        for event in sim.drain_events() {
            match event {
                GameEvent::Won => log::info!("player reached the exit"),
                GameEvent::Lost => log::info!("player died"),
                GameEvent::KeyCollected { id } => log::info!("collected {id}"),
                GameEvent::DoorUnlocked { id } => log::info!("unlocked door for {id}"),
                GameEvent::PlayerDamaged { damage, health } => {
                    log::debug!("hit for {damage}, health now {health}")
                }
            }
        }
    }

    if args.map {
        print!("{}", render_map(&sim));
    }

    let player = sim.player();
    println!(
        "seed {} | {} after {ticks_run} ticks ({:.1}s simulated) | health {} | keys held {}",
        sim.seed(),
        sim.status(),
        sim.clock(),
        player.health,
        player.inventory.len(),
    );
}

/// ASCII dump of the grid with entities overlaid.
fn render_map(sim: &Simulation) -> String {
    let grid = sim.grid();
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            let ch = if sim.player().pos == pos {
                '@'
            } else if sim.enemies().iter().any(|e| e.pos == pos) {
                'o'
            } else {
                Tile::from_code(grid.get(pos)).map_or('?', Tile::symbol)
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
