use anyhow::Context;
use clap::{ArgAction, Parser};
use crossterm::event::KeyCode;
use log::info;
use std::io::{self, Write};
use std::time::Duration;
use termbonsai::palette::Palette;
use termbonsai::render::{write_ansi, write_json};
use termbonsai::reveal::RevealSchedule;
use termbonsai::settings::Settings;
use termbonsai::terminal::{detect_viewport, quit_requested, Flow, Terminal};
use termbonsai::{BonsaiConfig, TreeSession, Viewport};

#[derive(Parser)]
#[command(name = "termbonsai")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Grow a seeded ASCII bonsai tree in the terminal", long_about = None)]
struct Cli {
    /// Show live growth animation
    #[arg(short, long)]
    live: bool,

    /// Keep generating trees infinitely
    #[arg(short, long)]
    infinite: bool,

    /// Print tree to stdout (no interactive display)
    #[arg(short, long)]
    print: bool,

    /// Print the tree as JSON for another renderer
    #[arg(long, conflicts_with_all = ["live", "infinite"])]
    json: bool,

    /// Animation step delay in seconds
    #[arg(short, long)]
    time: Option<f32>,

    /// Wait time between trees in infinite mode (seconds)
    #[arg(short, long)]
    wait: Option<f64>,

    /// Initial branch life (0-200, higher = bigger tree)
    #[arg(short = 'L', long, allow_negative_numbers = true)]
    life: Option<i32>,

    /// Branch multiplier (0-20, higher = bushier)
    #[arg(short = 'M', long, allow_negative_numbers = true)]
    multiplier: Option<i32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u32>,

    /// Base/pot type (0=none, 1=large pot, 2=small pot)
    #[arg(short, long)]
    base: Option<u8>,

    /// Leaf characters (comma-separated)
    #[arg(short = 'c', long)]
    leaf: Option<String>,

    /// Message to display next to tree
    #[arg(short, long)]
    message: Option<String>,

    /// Color palette: default, cherry, wisteria, maple
    #[arg(short = 'P', long)]
    palette: Option<String>,

    /// Grid height (defaults to the terminal height)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid width (defaults to the terminal width)
    #[arg(long)]
    cols: Option<usize>,

    /// Chance per step that a shoot or leaf branch sprouts leaves (0-1)
    #[arg(long)]
    leaf_chance: Option<f64>,

    /// Chance per step that the trunk sprouts leaves (0-1)
    #[arg(long)]
    trunk_leaf_chance: Option<f64>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Command-line flags on top of the settings-file config
    fn apply(&self, mut config: BonsaiConfig) -> BonsaiConfig {
        config.live = self.live;
        config.infinite = self.infinite;
        config.print = self.print;
        config.json = self.json;
        config.seed = self.seed;
        if let Some(time) = self.time {
            config.time_step = time;
        }
        if let Some(wait) = self.wait {
            config.time_wait = wait;
        }
        if let Some(life) = self.life {
            config.life = life;
        }
        if let Some(multiplier) = self.multiplier {
            config.multiplier = multiplier;
        }
        if let Some(base) = self.base {
            config.base = base;
        }
        if let Some(leaf) = &self.leaf {
            config.leaves = leaf.split(',').map(|s| s.to_string()).collect();
        }
        if let Some(message) = &self.message {
            config.message = Some(message.clone());
        }
        if let Some(palette) = &self.palette {
            config.palette = palette.clone();
        }
        if let Some(chance) = self.leaf_chance {
            config.tuning.leaf_chance = chance;
        }
        if let Some(chance) = self.trunk_leaf_chance {
            config.tuning.trunk_leaf_chance = chance;
        }
        config
    }

    /// Explicit dimensions win over the detected ones
    fn viewport(&self, detected: Viewport) -> Viewport {
        Viewport::new(
            self.rows.unwrap_or(detected.rows),
            self.cols.unwrap_or(detected.cols),
        )
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = Settings::load();
    let config = cli.apply(settings.to_config());

    if config.json || config.print {
        let session = TreeSession::new(config, cli.viewport(detect_viewport()))?;
        if session.config().json {
            run_json(&session)
        } else {
            run_print_mode(session)
        }
    } else {
        let mut term = Terminal::new(true).context("interactive mode needs a terminal; try --print")?;
        let session = TreeSession::new(config, cli.viewport(term.viewport()))?;
        run_interactive(&mut term, session)
    }
}

fn run_json(session: &TreeSession) -> anyhow::Result<()> {
    let tree = session.generate();
    let palette = Palette::named_or_default(&session.config().palette);
    let mut out = io::stdout().lock();
    write_json(&mut out, &tree, &palette)?;
    Ok(())
}

fn run_print_mode(mut session: TreeSession) -> anyhow::Result<()> {
    let palette = Palette::named_or_default(&session.config().palette);

    loop {
        let tree = session.generate();
        info!(
            "seed {}: {} branches, {} shoots",
            tree.seed, tree.stats.branches, tree.stats.shoots
        );
        {
            let mut out = io::stdout().lock();
            write_ansi(&mut out, &tree.grid, &palette)?;
            out.flush()?;
        }

        if !session.config().infinite {
            break;
        }

        std::thread::sleep(Duration::from_secs_f64(session.config().time_wait));
        session.reseed(None);
    }

    Ok(())
}

fn run_interactive(term: &mut Terminal, mut session: TreeSession) -> anyhow::Result<()> {
    let palette = Palette::named_or_default(&session.config().palette);
    let step = Duration::from_secs_f32(session.config().time_step);

    loop {
        let tree = session.generate();
        info!(
            "seed {}: {} branches, {} shoots",
            tree.seed, tree.stats.branches, tree.stats.shoots
        );
        term.clear_screen()?;

        if session.config().live {
            let schedule = RevealSchedule::new(&tree.grid, step);
            info!(
                "revealing {} cells over {:?}",
                schedule.len(),
                schedule.total_duration(step)
            );
            if term.play(&tree.grid, &schedule, &palette)? == Flow::Quit {
                break;
            }
        } else {
            term.render(&tree.grid, &palette)?;
        }

        if session.config().infinite {
            // Infinite mode: wait between trees
            let wait = Duration::from_secs_f64(session.config().time_wait);
            if quit_requested(term.wait_key(wait)?) {
                break;
            }
        } else {
            // q/Esc quits, n grows another tree
            match wait_for_choice(term)? {
                Flow::Quit => break,
                Flow::Continue => {}
            }
        }

        session.reseed(None);
    }

    Ok(())
}

fn wait_for_choice(term: &Terminal) -> io::Result<Flow> {
    loop {
        match term.wait_key(Duration::from_millis(100))? {
            Some(KeyCode::Char('n')) => return Ok(Flow::Continue),
            key if quit_requested(key) => return Ok(Flow::Quit),
            _ => {}
        }
    }
}
