//! Narrator main entry point
//!
//! The front end's main loop handles two sources on one thread:
//! 1. user commands, read line by line from stdin on a helper thread
//! 2. backend lifecycle events, pumped from the controller every tick

use log::{debug, error, info, warn};
use narrator::backend::{create_controller, BackendKind};
use narrator::config::Config;
use narrator::input::{create_default_keymap, parse_command, UiAction};
use narrator::navigation::{Navigator, RouteNavigator};
use narrator::playback::{PlaybackController, PlaybackState, NEXT_LABEL, STOP_GLYPH};
use narrator::source::Catalog;
use narrator::Result;
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::process;
use std::rc::Rc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// How often lifecycle events are pumped while waiting for input
const TICK: Duration = Duration::from_millis(50);

/// Command line options
struct Options {
    debug: bool,
    json: bool,
    backend: Option<String>,
    language: Option<String>,
    config: Option<String>,
}

impl Options {
    fn parse() -> Self {
        let mut options = Options {
            debug: false,
            json: false,
            backend: None,
            language: None,
            config: None,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--debug" | "-d" => options.debug = true,
                "--json" => options.json = true,
                "--backend" | "-b" => options.backend = args.next(),
                "--lang" | "-l" => options.language = args.next(),
                "--config" | "-c" => options.config = args.next(),
                other => eprintln!("Ignoring unknown argument: {}", other),
            }
        }
        options
    }
}

fn main() {
    let options = Options::parse();

    // Initialize logger
    if options.debug {
        // Debug mode: write to narrator.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("narrator.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open narrator.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "Narrator version {} starting (debug mode, logging to narrator.log)",
            narrator::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run(options) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(options: Options) -> Result<()> {
    debug!("Initializing narrator");

    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    info!("Configuration loaded from {:?}", config.path());

    let catalog = Catalog::from_config(&config);
    let language = options.language.unwrap_or_else(|| config.language());
    let source = catalog.source(&language)?;

    let kind: BackendKind = options
        .backend
        .unwrap_or_else(|| config.backend())
        .parse()?;
    let mut controller = create_controller(kind, &config, source)?;
    let mut navigator = RouteNavigator::new(config.next_screen());

    // Observers only record; rendering happens in the loop
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    controller.subscribe(Box::new(move |state: PlaybackState| {
        sink.borrow_mut().push(state)
    }));

    let keymap = create_default_keymap();
    let lines = spawn_stdin_reader();

    if !options.json {
        print_screen(controller.as_ref(), &catalog);
    }
    render(controller.as_ref(), options.json)?;

    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) => match parse_command(&keymap, &line) {
                Some(UiAction::Quit) => break,
                Some(UiAction::Next) => {
                    navigator.advance()?;
                    if let Some(route) = navigator.take_pending() {
                        if !options.json {
                            println!("→ {}", route);
                        }
                    }
                    break;
                }
                Some(action) => handle(action, controller.as_mut(), &catalog),
                None => println!("Unknown command, type 'h' for help"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                debug!("stdin closed");
                break;
            }
        }

        controller.pump_events();

        let changed = !changes.borrow().is_empty();
        if changed {
            changes.borrow_mut().clear();
            render(controller.as_ref(), options.json)?;
        }
    }

    // Leaving the screen tears the narration down
    controller.dispose();
    info!("Narrator exiting");
    Ok(())
}

fn handle(action: UiAction, controller: &mut dyn PlaybackController, catalog: &Catalog) {
    match action {
        UiAction::TogglePlayback => controller.toggle(),
        UiAction::Play => controller.play(),
        UiAction::Pause => controller.pause(),
        UiAction::Stop => controller.stop(),
        UiAction::SetLanguage(key) => match catalog.source(&key) {
            Ok(source) => {
                controller.set_source(source);
                println!("{}", controller.source().message());
            }
            Err(e) => warn!("{}", e),
        },
        UiAction::Help => print_help(),
        UiAction::Next | UiAction::Quit => {}
    }
}

/// Read stdin lines on a helper thread so the main loop can keep pumping
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_screen(controller: &dyn PlaybackController, catalog: &Catalog) {
    println!("Narrator {} ({} backend)", narrator::VERSION, controller.backend_name());
    println!();
    println!("{}", controller.source().message());
    println!();
    let languages: Vec<String> = catalog
        .languages()
        .map(|l| format!("{} ({})", l.display_name(), l))
        .collect();
    println!("Language: {}", languages.join(", "));
    println!("Type 'h' for help");
}

fn print_help() {
    println!("  <enter>, p   play/pause");
    println!("  play, pause  play / pause");
    println!("  s            stop ({})", STOP_GLYPH);
    println!("  l <key>      switch language");
    println!("  n            {}", NEXT_LABEL);
    println!("  q            quit");
}

fn render(controller: &dyn PlaybackController, json: bool) -> Result<()> {
    let snapshot = controller.snapshot();
    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        println!(
            "[{}] [{}]  {}  ({})",
            snapshot.glyph, STOP_GLYPH, snapshot.state, snapshot.language
        );
    }
    Ok(())
}
