//! Mini Golf headless driver
//!
//! Plays rounds with the autoplay planner through the same pointer path a
//! windowed front end would use, and reports the results.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use mini_golf::sim::{Pointer, Round, RoundEvent, RoundOutcome, TickInput, Viewport, plan_shot};
use mini_golf::ui::{self, PlayAgainButton};
use mini_golf::{Tuning, consts};

#[derive(Debug, Parser)]
#[command(name = "mini-golf", about = "Play mini golf rounds headlessly")]
struct Args {
    /// RNG seed for hole placement (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning file; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = consts::SCREEN_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = consts::SCREEN_HEIGHT)]
    height: u32,

    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Give up on a round after this many frames
    #[arg(long, default_value_t = 20_000)]
    max_frames: u32,

    /// Print a JSON summary to stdout
    #[arg(long)]
    json: bool,
}

/// Pointer driven by the driver script
#[derive(Debug, Default)]
struct ScriptedPointer {
    position: Vec2,
    pressed: bool,
    released: bool,
    held: bool,
}

impl ScriptedPointer {
    fn press(&mut self, at: Vec2) {
        self.position = at;
        self.pressed = true;
        self.held = true;
    }

    fn release(&mut self, at: Vec2) {
        self.position = at;
        self.released = true;
        self.held = false;
    }

    /// Clear edge flags after a frame has consumed them
    fn end_frame(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

impl Pointer for ScriptedPointer {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn pressed_this_frame(&self) -> bool {
        self.pressed
    }

    fn released_this_frame(&self) -> bool {
        self.released
    }

    fn held_down(&self) -> bool {
        self.held
    }
}

#[derive(Debug, Serialize)]
struct RoundReport {
    round: u32,
    hole: Vec2,
    outcome: Option<RoundOutcome>,
    strokes: u32,
    frames: u32,
    bounces: u32,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    viewport: Viewport,
    rounds: Vec<RoundReport>,
}

fn play_round(
    round: &mut Round,
    pointer: &mut ScriptedPointer,
    viewport: Viewport,
    index: u32,
    max_frames: u32,
) -> RoundReport {
    let hole = round.state.hole_pos;
    let mut pending_release = None;
    let mut bounces = 0;
    let mut frames = 0;

    while frames < max_frames && !round.is_won() {
        if let Some(end) = pending_release.take() {
            pointer.release(end);
        } else if let Some(plan) = plan_shot(&round.state, round.tuning()) {
            pointer.press(plan.drag_start);
            pending_release = Some(plan.drag_end);
        }

        let input = TickInput::sample(&*pointer, &viewport);
        for event in round.tick(&input) {
            match event {
                RoundEvent::WallBounce { .. } => bounces += 1,
                RoundEvent::ShotTaken { stroke, power, .. } => {
                    log::debug!("Round {}: stroke {} at {:.0}% power", index, stroke, power * 100.0)
                }
                _ => {}
            }
        }
        pointer.end_frame();
        frames += 1;
    }

    let outcome = round.outcome();
    match outcome {
        Some(outcome) => log::info!(
            "Round {}: {}",
            index,
            ui::Banner::for_outcome(outcome).text
        ),
        None => log::warn!("Round {}: gave up after {} frames", index, frames),
    }

    RoundReport {
        round: index,
        hole,
        outcome,
        strokes: round.state.strokes,
        frames,
        bounces,
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let viewport = Viewport::new(args.width, args.height);
    let seed = args.seed.unwrap_or_else(mini_golf::time_seed);
    log::info!("Mini Golf starting with seed {} on {}x{}", seed, args.width, args.height);

    let mut round = Round::new(seed, tuning, viewport).context("setting up the first round")?;
    let mut pointer = ScriptedPointer::default();
    let mut reports = Vec::with_capacity(args.rounds as usize);

    for index in 1..=args.rounds {
        if index > 1 {
            if round.is_won() {
                // Click "play again" like a player would
                let button = PlayAgainButton::layout(viewport);
                pointer.press(button.rect.center());
                let input = TickInput::sample(&pointer, &viewport);
                ui::handle_play_again(&mut round, &input).context("starting a new round")?;
                pointer.release(button.rect.center());
                pointer.end_frame();
            } else {
                round.reset_round().context("starting a new round")?;
            }
        }
        reports.push(play_round(&mut round, &mut pointer, viewport, index, args.max_frames));
    }

    let summary = Summary {
        seed,
        viewport,
        rounds: reports,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for report in &summary.rounds {
            println!(
                "round {}: {} strokes, {} frames, sunk: {}",
                report.round,
                report.strokes,
                report.frames,
                report.outcome.is_some()
            );
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        log::error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
