use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use ied_core::{CampaignConfig, HighScoreStore, InputMode, MineSampler, MissionController};

use command::Command;
use render::TextRenderer;
use store::JsonFileStore;

mod command;
mod logging;
mod render;
mod store;

#[derive(Parser, Debug)]
#[command(version, about = "Sweep a campaign of IED fields in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Campaign settings in TOML, missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u16>,

    #[arg(long)]
    cols: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "ied-highscore.json")]
    high_score_file: PathBuf,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CampaignConfig> {
    let Some(path) = path else {
        return Ok(CampaignConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter());

    let mut config = load_config(args.config.as_deref())?;
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    config.validate().context("Invalid campaign settings")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let store = JsonFileStore::open(&args.high_score_file);
    let game = MissionController::with_seed(config, store, seed)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    play(game, stdin.lock(), &mut stdout.lock())?;
    log::info!("Session ended");
    Ok(())
}

/// Reads commands until `quit` or end of input, redrawing after every action.
fn play<H, S>(
    mut game: MissionController<H, S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    H: HighScoreStore,
    S: MineSampler,
{
    let size = game.board().size();
    let mut renderer = TextRenderer::new(size);
    let mut mode = InputMode::default();

    renderer.apply(&game.snapshot());
    writeln!(out, "{}", command::HELP)?;
    redraw(&game, &renderer, mode, out)?;

    for line in input.lines() {
        let line = line.context("Could not read input")?;
        let command = match command::parse(&line, size) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        let action = match command {
            Command::Act(action) => action,
            Command::Click(pos) => mode.action_at(pos),
            Command::SetMode(next) => {
                mode = next;
                redraw(&game, &renderer, mode, out)?;
                continue;
            }
            Command::CycleMode => {
                mode = mode.next();
                redraw(&game, &renderer, mode, out)?;
                continue;
            }
            Command::Show => {
                redraw(&game, &renderer, mode, out)?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{}", command::HELP)?;
                continue;
            }
            Command::Quit => break,
        };

        let frame = game.apply(action);
        if !frame.has_update() {
            writeln!(out, "Nothing happens.")?;
            continue;
        }
        for message in renderer.apply(&frame) {
            writeln!(out, "{}", message)?;
        }
        redraw(&game, &renderer, mode, out)?;
    }

    Ok(())
}

fn redraw<H, S>(
    game: &MissionController<H, S>,
    renderer: &TextRenderer,
    mode: InputMode,
    out: &mut impl Write,
) -> io::Result<()>
where
    H: HighScoreStore,
    S: MineSampler,
{
    renderer.draw(out)?;
    let mission = game.mission();
    writeln!(
        out,
        "Mission {} | Armor {} | Score {} (best {}) | Moves {} | Markers {} | Mode {:?}",
        game.level() + 1,
        game.armor(),
        game.score(),
        game.high_score(),
        mission.moves,
        mission.flags,
        mode
    )
}
