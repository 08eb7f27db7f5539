// turtleart/demo/replay/src/main.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Headless turtle sessions on the command line.
//!
//! `turtle-demo draw` runs a short program and prints the events it shares,
//! one per line. `turtle-demo replay FILE` applies such lines as a peer
//! would and reports what ended up on the canvas.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use turtleart_share::EventSender;
use turtleart_turtle::{CanvasOp, Recorder, SessionConfig, TurtleSession, Window};

struct Stdout;

impl EventSender for Stdout {
    fn send_event(&mut self, event: &str) {
        println!("{}", event);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let matches = App::new("turtle-demo")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("scale")
                .long("scale")
                .takes_value(true)
                .help("Coordinate scale factor"),
        )
        .subcommand(
            SubCommand::with_name("draw")
                .about("Draws a flower and prints the shared events")
                .arg(
                    Arg::with_name("petals")
                        .long("petals")
                        .takes_value(true)
                        .default_value("6"),
                ),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Applies shared events from a file, or stdin if none is given")
                .arg(
                    Arg::with_name("as")
                        .long("as")
                        .takes_value(true)
                        .default_value("observer")
                        .help("Nick to replay as; events signed with it are skipped"),
                )
                .arg(Arg::with_name("INPUT").index(1)),
        )
        .get_matches();

    let mut config = SessionConfig::from_env();
    if let Some(scale) = matches.value_of("scale") {
        config.coord_scale = scale.parse().context("--scale must be a number")?;
    }

    match matches.subcommand() {
        ("draw", Some(args)) => draw(config, args),
        ("replay", Some(args)) => replay(config, args),
        _ => Ok(()),
    }
}

fn draw(config: SessionConfig, args: &ArgMatches) -> Result<()> {
    let petals: u32 = args
        .value_of("petals")
        .unwrap_or("6")
        .parse()
        .context("--petals must be a whole number")?;

    let window = Window::new(config, Box::new(Recorder::new())).with_sharing(Box::new(Stdout));
    let mut session = TurtleSession::new(window)?;
    {
        let (turtle, window) = session.active();
        turtle.set_pen_size(window, 3.0, true);
        turtle.start_fill();
        for petal in 0..petals {
            turtle.set_color(window, f64::from(petal * 100 / petals.max(1)), true);
            turtle.arc(window, 60.0, 100.0, true);
            turtle.right(window, 120.0, true);
            turtle.arc(window, 60.0, 100.0, true);
            turtle.right(window, 120.0 + 360.0 / f64::from(petals.max(1)), true);
        }
        turtle.stop_fill(window, true);
        turtle.set_color(window, "black", true);
        turtle.draw_text(window, "flower", 0.0, -120.0, 14.0, 80.0, true);
    }
    session.run_idle();
    io::stdout().flush()?;
    Ok(())
}

fn replay(mut config: SessionConfig, args: &ArgMatches) -> Result<()> {
    if let Some(nick) = args.value_of("as") {
        config.nick = nick.to_owned();
    }
    let input: Box<dyn BufRead> = match args.value_of("INPUT") {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let canvas = Recorder::new();
    let window = Window::new(config, Box::new(canvas.clone()));
    let mut session = TurtleSession::new(window)?;

    let (mut applied, mut rejected) = (0, 0);
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match session.apply_event(line.trim()) {
            Ok(()) => applied += 1,
            Err(err) => {
                tracing::warn!(line = number + 1, "skipping event: {}", err);
                rejected += 1;
            }
        }
    }

    let ops = canvas.ops();
    let count = |f: fn(&CanvasOp) -> bool| ops.iter().filter(|op| f(op)).count();
    println!("events: {} applied, {} rejected", applied, rejected);
    println!(
        "canvas: {} lines, {} arcs, {} fills, {} images, {} labels",
        count(|op| matches!(op, CanvasOp::Line { .. })),
        count(|op| matches!(op, CanvasOp::RArc { .. } | CanvasOp::LArc { .. })),
        count(|op| matches!(op, CanvasOp::Fill(..))),
        count(|op| matches!(op, CanvasOp::Pixbuf { .. })),
        count(|op| matches!(op, CanvasOp::Text { .. })),
    );

    let mut turtles: Vec<_> = session.turtles().iter().collect();
    turtles.sort_by(|a, b| a.name().cmp(b.name()));
    for turtle in turtles {
        let (x, y) = turtle.xy();
        println!(
            "{:>12}{} at ({:.1}, {:.1}) heading {:.1}, pen {} size {} color {}",
            turtle.name(),
            if turtle.is_remote() { "*" } else { " " },
            x,
            y,
            turtle.heading(),
            if turtle.pen_state() { "down" } else { "up" },
            turtle.pen_size(),
            turtle.color(),
        );
    }

    let diagnostics = session.window().diagnostics();
    if !diagnostics.is_empty() {
        println!("diagnostics: {}", diagnostics);
    }
    Ok(())
}
