use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use swingmeter_core::{CharacterRecord, MeterConfigExt, Reader, parse_file as replay_file};

use crate::context::{CliContext, load_tracker};
use crate::report;

pub async fn process_line(text: &str, ctx: &CliContext) {
    match ctx.tracker.write().await.process_line(text) {
        Some(event) => println!("{event:?}"),
        None => println!("unrecognized line"),
    }
}

pub async fn enter_combat(ctx: &CliContext) {
    let mut tracker = ctx.tracker.write().await;
    tracker.enter_combat();
    println!("in combat");
}

pub async fn leave_combat(ctx: &CliContext) {
    let mut tracker = ctx.tracker.write().await;
    tracker.leave_combat();
    println!(
        "out of combat, {:.1}s this session",
        tracker.effective_combat_seconds()
    );
}

pub async fn show_stats(ctx: &CliContext) {
    let snap = ctx.tracker.read().await.freeze();
    let state = if ctx.tracker.read().await.in_combat() {
        "in combat"
    } else {
        "out of combat"
    };
    print!("{}", report::snapshot(&format!("Current session, {state}"), &snap));
}

pub async fn show_spells(ctx: &CliContext) {
    let snap = ctx.tracker.read().await.freeze();
    print!("{}", report::spells(&snap));
}

pub async fn reset(ctx: &CliContext) {
    let (snap, sessions) = {
        let mut tracker = ctx.tracker.write().await;
        let snap = tracker.reset();
        (snap, tracker.store().history.len())
    };
    print!("{}", report::snapshot("Session ended", &snap));
    println!("{sessions} sessions in history");

    if ctx.config.read().await.autosave {
        persist(ctx).await;
    }
}

pub async fn save_snapshot(name: &str, ctx: &CliContext) {
    match ctx.tracker.write().await.save_named(name) {
        Ok(()) => println!("saved snapshot '{}'", name.trim()),
        Err(e) => println!("{e}"),
    }
}

pub async fn delete_snapshot(name: &str, ctx: &CliContext) {
    match ctx.tracker.write().await.delete_named(name) {
        Ok(_) => println!("deleted snapshot '{name}'"),
        Err(e) => println!("{e}"),
    }
}

pub async fn list_snapshots(ctx: &CliContext) {
    let tracker = ctx.tracker.read().await;
    let named = &tracker.store().named;
    if named.is_empty() {
        println!("No saved snapshots");
        return;
    }

    println!("{:<24} {:<20} {:>10} {:>8}", "Name", "Taken", "Damage", "DPS");
    println!("{}", "-".repeat(65));
    for name in named.names() {
        if let Ok(snap) = named.get(name) {
            println!(
                "{:<24} {:<20} {:>10} {:>8.1}",
                name,
                snap.timestamp().format("%Y-%m-%d %H:%M"),
                snap.total_damage(),
                snap.dps()
            );
        }
    }
}

pub async fn compare(a: &str, b: &str, ctx: &CliContext) {
    match ctx.tracker.read().await.compare(a, b) {
        Ok(result) => print!("{}", report::comparison(&result)),
        Err(e) => println!("{e}"),
    }
}

pub async fn show_history(ctx: &CliContext) {
    let tracker = ctx.tracker.read().await;
    let history = &tracker.store().history;
    if history.is_empty() {
        println!("No sessions recorded");
        return;
    }

    println!("{:<4} {:<20} {:>10} {:>9} {:>8}", "#", "Ended", "Damage", "Combat", "DPS");
    println!("{}", "-".repeat(55));
    for (i, snap) in history.iter().enumerate().rev() {
        println!(
            "{:<4} {:<20} {:>10} {:>8.1}s {:>8.1}",
            i + 1,
            snap.timestamp().format("%Y-%m-%d %H:%M"),
            snap.total_damage(),
            snap.combat_seconds(),
            snap.dps()
        );
    }
}

pub async fn show_lifetime(ctx: &CliContext) {
    let character = ctx.config.read().await.character.clone();
    let tracker = ctx.tracker.read().await;
    print!("{}", report::lifetime(&character, &tracker.store().lifetime));
}

pub async fn parse_file(path: &str, follow: bool, ctx: &CliContext) {
    ctx.tasks.lock().await.stop_tail();

    let path = PathBuf::from(path);
    let timeout = ctx.config.read().await.combat_timeout_secs;
    let result = {
        let mut tracker = ctx.tracker.write().await;
        replay_file(&mut *tracker, &path, timeout)
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            println!("failed to parse log file: {e}");
            return;
        }
    };
    println!(
        "parsed {} events from {} lines in {}ms",
        result.events_count, result.lines_count, result.elapsed_ms
    );

    if follow {
        start_tail(path, result.end_pos, ctx).await;
    }
}

/// Follow a log from its current end, ignoring what is already in it.
pub async fn tail(path: &str, ctx: &CliContext) {
    let path = PathBuf::from(path);
    let end_pos = match std::fs::metadata(&path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            println!("cannot tail {}: {e}", path.display());
            return;
        }
    };
    start_tail(path, end_pos, ctx).await;
}

async fn start_tail(path: PathBuf, pos: u64, ctx: &CliContext) {
    let mut tasks = ctx.tasks.lock().await;
    tasks.stop_tail();

    println!("Beginning file tail: {}", path.display());
    let timeout = ctx.config.read().await.combat_timeout_secs;
    let handle = Arc::clone(&ctx.tracker);
    let reader = Reader::from(path);
    tasks.log_tail = Some(tokio::spawn(async move {
        if let Err(e) = reader.tail_log_file(pos, handle, timeout).await {
            tracing::error!(error = %e, "log tail stopped");
        }
    }));
}

pub async fn stop_tail(ctx: &CliContext) {
    if ctx.tasks.lock().await.stop_tail() {
        println!("stopped tailing");
    } else {
        println!("not tailing");
    }
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    println!("character:      {}", config.character);
    println!("data directory: {}", config.data_path().display());
    println!("combat timeout: {}s", config.combat_timeout_secs);
    println!("autosave:       {}", config.autosave);
}

/// Log the current character out and load `name`'s record.
pub async fn set_character(name: &str, ctx: &CliContext) {
    let name = name.trim();
    let data_dir = ctx.config.read().await.data_path();
    if let Err(e) = CharacterRecord::path_for(&data_dir, name) {
        println!("{e}");
        return;
    }
    ctx.tasks.lock().await.stop_tail();
    logout(ctx).await;

    let mut config = ctx.config.write().await;
    config.character = name.to_string();
    *ctx.tracker.write().await = load_tracker(&config);
    if let Err(e) = config.save() {
        tracing::warn!(error = %e, "failed to save configuration");
    }
    println!("logged in as {name}");
}

/// End the session and write the character's record.
pub async fn logout(ctx: &CliContext) {
    let snap = ctx.tracker.write().await.reset();
    if !snap.is_empty() {
        print!("{}", report::snapshot("Session ended", &snap));
    }
    persist(ctx).await;
}

pub async fn exit(ctx: &CliContext) -> Result<(), String> {
    ctx.tasks.lock().await.stop_tail();
    logout(ctx).await;
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

async fn persist(ctx: &CliContext) {
    if let Err(e) = ctx.persist().await {
        tracing::error!(error = %e, "failed to save character record");
        println!("failed to save character record: {e}");
    }
}
