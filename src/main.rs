use std::{
    io::{self, BufRead},
    process::ExitCode,
    thread,
    time::Instant,
};

use anyhow::{Context, Result};
use lifecore::{Automaton, Engine, Game, Pattern, Pos2};

mod console;
mod options;
mod stats;

use options::{Args, EngineKind};
use stats::{Recorder, SwitchRecorder};

fn args_to_pattern(args: &Args) -> Result<Pattern> {
    if let Some(path) = args.seed() {
        return Ok(Pattern::load(&path, args.glyph()?)?);
    }
    if let Some(fill) = args.fill_mode()? {
        let side = args.size()?;
        let alive = fill.create_alive(i32::try_from(side).context("--size does not fit a coordinate")?);
        return Ok(Pattern::from_cells(alive, side, side));
    }
    Ok(Pattern::glider_gun())
}

fn pattern_to_engine(args: &Args, pattern: &Pattern) -> Result<Engine> {
    let engine = match args.engine()? {
        EngineKind::Dense => pattern.to_dense(args.size()?)?.into(),
        EngineKind::Sparse => pattern.to_sparse(args.offset()?, args.bounds()?)?.into(),
    };
    Ok(engine)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let Some(args) = Args::from_env()? else {
        return Ok(());
    };

    let pattern = args_to_pattern(&args)?;
    let engine = pattern_to_engine(&args, &pattern)?;
    println!("alive: {}", engine.alive_count());

    let mut game = Game::new(engine).with_parallel(args.multithreading());
    let mut stats = SwitchRecorder::new(game.alive_count(), args.stats_file().is_some());
    if !args.debug() {
        game.start();
    }

    if args.console() {
        run_console(&args, &mut game, &mut stats)?;
    } else if args.debug() {
        run_manual(&args, &mut game, &mut stats)?;
    } else {
        run_headless(&args, &mut game, &mut stats)?;
    }

    if let Some(file_name) = args.stats_file() {
        stats
            .save(&file_name)
            .with_context(|| format!("failed to write stats to {file_name}"))?;
    }
    Ok(())
}

fn record(game: &Game<Engine>, stats: &mut SwitchRecorder) {
    stats.record(game.generation(), game.alive_count());
}

fn run_console(args: &Args, game: &mut Game<Engine>, stats: &mut SwitchRecorder) -> Result<()> {
    let interval = args.tick_interval()?.unwrap_or_default();
    let max_gens = args.generations()?;
    let mut console = console::ConsoleRender::new(args.offset()?)?;

    'frames: while game.generation() < max_gens {
        let frame_start = Instant::now();
        if stats.has_report() {
            console.set_report(stats.report());
        }
        console.render(game)?;
        if game.tick() {
            record(game, stats);
        }

        // react to keys until the next frame is due
        loop {
            let remaining = interval.saturating_sub(frame_start.elapsed());
            let Some(cmd) = console.poll_events(remaining)? else {
                break;
            };
            match cmd {
                console::ConsoleCommand::Exit => break 'frames,
                console::ConsoleCommand::Toggle => game.toggle_running(),
                console::ConsoleCommand::Step => {
                    game.step();
                    record(game, stats);
                }
                console::ConsoleCommand::Reset => game.reset(),
                console::ConsoleCommand::Handled => {}
            }
            console.render(game)?;
        }
    }
    Ok(())
}

/// Prints the grid and advances one generation per line read from stdin
fn run_manual(args: &Args, game: &mut Game<Engine>, stats: &mut SwitchRecorder) -> Result<()> {
    let size = i32::try_from(args.size()?).context("--size does not fit a coordinate")?;
    let tl = args.offset()?;
    let br = tl.saturating_add(Pos2::new(size, size));
    let max_gens = args.generations()?;

    let mut lines = io::stdin().lock().lines();
    while game.generation() < max_gens {
        println!("gen:{} alive:{}", game.generation(), game.alive_count());
        println!("{}", game.current().window(tl, br));
        println!("[enter] step, [r] reset, [q] quit");

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        match line.trim() {
            "q" => break,
            "r" => game.reset(),
            _ => {
                game.step();
                record(game, stats);
            }
        }
    }
    Ok(())
}

fn run_headless(args: &Args, game: &mut Game<Engine>, stats: &mut SwitchRecorder) -> Result<()> {
    let sleep = args.tick_interval()?;
    let max_gens = args.generations()?;

    while game.generation() < max_gens && game.tick() {
        record(game, stats);
        // report metrics every 500ms
        if stats.has_report() {
            println!("{}", stats.report());
        }
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    println!("gen:{} alive:{}", game.generation(), game.alive_count());
    Ok(())
}
