use std::env;
use std::fs;
use std::path::PathBuf;

use catalog::ShipCatalog;
use overlay::{Breakpoint, PanelLayout, PanelSide};
use tools::{TraceFile, simulate};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "simulate" => cmd_simulate(args),
        "layout" => cmd_layout(args),
        "catalog" => cmd_catalog(args),
        _ => Err(usage()),
    }
}

fn cmd_simulate(args: Vec<String>) -> Result<(), String> {
    // shipview simulate <trace.json> [--every N] [--summary]
    if args.is_empty() {
        return Err(usage());
    }

    let path = PathBuf::from(&args[0]);
    let mut every: usize = 1;
    let mut summary_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--every" => {
                i += 1;
                if i >= args.len() {
                    return Err("--every requires a value".to_string());
                }
                every = args[i]
                    .parse::<usize>()
                    .map_err(|e| format!("--every: {e}"))?
                    .max(1);
            }
            "--summary" => summary_only = true,
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let raw = fs::read_to_string(&path).map_err(|e| format!("read {path:?}: {e}"))?;
    let trace = TraceFile::from_json_str(&raw)?;
    let report = simulate(&trace);

    if !summary_only {
        for row in report.rows.iter().step_by(every) {
            let line = serde_json::to_string(row).map_err(|e| format!("json: {e}"))?;
            println!("{line}");
        }
    }

    for (n, m) in report.sessions.iter().enumerate() {
        info!(
            session = n + 1,
            ticks = m.ticks,
            stalls = m.stalls,
            peak_fake_bonus = m.peak_fake_bonus,
            "session summary"
        );
    }
    if summary_only {
        let payload = serde_json::to_string_pretty(&report.sessions)
            .map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
    }
    if report.events_dropped > 0 {
        warn!(
            dropped = report.events_dropped,
            "event log overflowed during replay"
        );
    }
    if !report.monotonic {
        warn!("display progress went down during a session (raw progress regressed?)");
    }
    Ok(())
}

fn cmd_layout(args: Vec<String>) -> Result<(), String> {
    // shipview layout <width> [--hover-left] [--hover-right]
    if args.is_empty() {
        return Err(usage());
    }

    let width: f64 = args[0]
        .parse()
        .map_err(|e| format!("width {:?}: {e}", args[0]))?;
    let mut layout = PanelLayout::new(width);
    for arg in &args[1..] {
        match arg.as_str() {
            "--hover-left" => layout.set_hover(PanelSide::Left, true),
            "--hover-right" => layout.set_hover(PanelSide::Right, true),
            other => return Err(format!("unknown arg: {other}\n\n{}", usage())),
        }
    }

    let bp: Breakpoint = layout.breakpoint();
    let payload = serde_json::json!({
        "width": width,
        "breakpoint": bp,
        "offsets": layout.offsets(),
        "hover_trigger": {
            "left": layout.shows_hover_trigger(PanelSide::Left),
            "right": layout.shows_hover_trigger(PanelSide::Right),
        },
        "right_panel_width_px": bp.right_panel_width_px(),
    });
    let payload = serde_json::to_string_pretty(&payload).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn cmd_catalog(args: Vec<String>) -> Result<(), String> {
    // shipview catalog [<catalog.json>]
    let catalog = match args.first() {
        Some(p) => {
            let path = PathBuf::from(p);
            let raw = fs::read_to_string(&path).map_err(|e| format!("read {path:?}: {e}"))?;
            ShipCatalog::from_json_str(&raw).map_err(|e| e.to_string())?
        }
        None => ShipCatalog::builtin().map_err(|e| e.to_string())?,
    };

    for (id, entry) in &catalog.ships {
        let marker = if *id == catalog.default_ship { "*" } else { " " };
        println!(
            "{marker} {id:<12} {:<24} {:<12} {}",
            entry.stats.name, entry.stats.class, entry.model
        );
    }
    eprintln!(
        "ok: {} ships, {} factions (default {}/{})",
        catalog.ships.len(),
        catalog.factions.len(),
        catalog.default_ship,
        catalog.default_faction
    );
    Ok(())
}

fn usage() -> String {
    [
        "usage:",
        "  shipview simulate <trace.json> [--every N] [--summary]",
        "  shipview layout <width> [--hover-left] [--hover-right]",
        "  shipview catalog [<catalog.json>]",
        "",
        "Log verbosity follows RUST_LOG (e.g. RUST_LOG=loading=debug).",
    ]
    .join("\n")
}
