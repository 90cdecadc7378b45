//! CLI tool for stickygrid - builds a generated grid and dumps one frame
//!
//! Usage:
//!   stickygrid_cli                              # Default config, frame JSON to stdout
//!   stickygrid_cli config.json --scroll 3500    # Custom config, scrolled
//!   stickygrid_cli --drag 600:650 --text        # Resize pinned columns, text dump
//!   stickygrid_cli --viewport 1280x720 -o out.json
//!
//! Set `RUST_LOG=stickygrid=debug` to see configuration and drag logs.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use stickygrid::{
    generate_rows, GridConfig, GridView, ListenerRegistry, RenderBackend, TextRenderer,
};

const USAGE: &str = "Usage: stickygrid_cli [config.json] [--scroll Y] [--scroll-x X] \
                     [--viewport WxH] [--drag FROM:TO] [--text] [-o output]";

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    scroll_y: f64,
    scroll_x: f64,
    viewport: Option<(f64, f64)>,
    drag: Option<(f64, f64)>,
    text: bool,
    output_path: Option<String>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    eprintln!("{USAGE}");
    std::process::exit(1);
}

fn parse_number(flag: &str, value: Option<&String>) -> f64 {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or_else(|| fail(&format!("{flag} expects a number")))
}

fn parse_pair(flag: &str, value: Option<&String>, sep: char) -> (f64, f64) {
    let parsed = value.and_then(|v| {
        let (a, b) = v.split_once(sep)?;
        Some((a.parse::<f64>().ok()?, b.parse::<f64>().ok()?))
    });
    parsed.unwrap_or_else(|| fail(&format!("{flag} expects A{sep}B")))
}

fn parse_args() -> Args {
    let argv: Vec<String> = env::args().skip(1).collect();
    let mut args = Args::default();
    let mut i = 0;
    while i < argv.len() {
        let flag = argv[i].as_str();
        let value = argv.get(i + 1);
        match flag {
            "--scroll" => args.scroll_y = parse_number(flag, value),
            "--scroll-x" => args.scroll_x = parse_number(flag, value),
            "--viewport" => args.viewport = Some(parse_pair(flag, value, 'x')),
            "--drag" => args.drag = Some(parse_pair(flag, value, ':')),
            "-o" => {
                args.output_path = Some(
                    value
                        .cloned()
                        .unwrap_or_else(|| fail("-o expects a path")),
                );
            }
            "--text" => {
                args.text = true;
                i += 1;
                continue;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with('-') => fail(&format!("Unknown flag: {other}")),
            path => {
                args.config_path = Some(path.to_string());
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    args
}

fn load_config(path: Option<&str>) -> stickygrid::Result<GridConfig> {
    let Some(path) = path else {
        return Ok(GridConfig::default());
    };
    let json = fs::read_to_string(path)?;
    GridConfig::from_json(&json)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args();
    let config = match load_config(args.config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let total = usize::try_from(config.total_count.max(0)).unwrap_or(0);
    let columns = usize::try_from(config.columns_per_row.max(0)).unwrap_or(0);
    let registry = ListenerRegistry::new();
    let mut view = match GridView::new(&config, generate_rows(total, columns), registry.clone()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some((width, height)) = args.viewport {
        view.set_viewport_size(width, height);
    }
    view.set_scroll(args.scroll_x, args.scroll_y);

    if let Some((from, to)) = args.drag {
        view.pointer_down(from);
        view.pointer_move(to);
        view.pointer_up();
        info!(
            width = view.column_width(),
            live_listeners = registry.live(),
            "drag replayed"
        );
    }

    let output = if args.text {
        let mut text = TextRenderer::new();
        let viewport = *view.viewport();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        text.resize(viewport.width as u32, viewport.height as u32, 1.0);
        if let Err(e) = view.render(&mut text) {
            eprintln!("Error rendering: {}", e);
            std::process::exit(1);
        }
        text.into_output()
    } else {
        match serde_json::to_string_pretty(&view.frame()) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing JSON: {}", e);
                std::process::exit(1);
            }
        }
    };

    match args.output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(output.as_bytes()).unwrap();
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
}
