use clap::{Parser, Subcommand};
use std::io::Write;
use swingmeter_cli::{CliContext, commands, logging, readline};

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "swingmeter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed one combat log line, e.g. `line You hit Kobold for 12.`
    Line {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    EnterCombat,
    LeaveCombat,
    Stats,
    Spells,
    Reset,
    Save {
        name: String,
    },
    Delete {
        name: String,
    },
    Snapshots,
    Compare {
        a: String,
        b: String,
    },
    History,
    Lifetime,
    ParseFile {
        #[arg(short, long)]
        path: String,
        /// Keep tailing the file after the replay
        #[arg(short, long)]
        follow: bool,
    },
    Tail {
        #[arg(short, long)]
        path: String,
    },
    StopTail,
    Config,
    SetCharacter {
        #[arg(short, long)]
        name: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "swingmeter".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Line { text }) => commands::process_line(&text.join(" "), ctx).await,
        Some(Commands::EnterCombat) => commands::enter_combat(ctx).await,
        Some(Commands::LeaveCombat) => commands::leave_combat(ctx).await,
        Some(Commands::Stats) => commands::show_stats(ctx).await,
        Some(Commands::Spells) => commands::show_spells(ctx).await,
        Some(Commands::Reset) => commands::reset(ctx).await,
        Some(Commands::Save { name }) => commands::save_snapshot(name, ctx).await,
        Some(Commands::Delete { name }) => commands::delete_snapshot(name, ctx).await,
        Some(Commands::Snapshots) => commands::list_snapshots(ctx).await,
        Some(Commands::Compare { a, b }) => commands::compare(a, b, ctx).await,
        Some(Commands::History) => commands::show_history(ctx).await,
        Some(Commands::Lifetime) => commands::show_lifetime(ctx).await,
        Some(Commands::ParseFile { path, follow }) => {
            commands::parse_file(path, *follow, ctx).await
        }
        Some(Commands::Tail { path }) => commands::tail(path, ctx).await,
        Some(Commands::StopTail) => commands::stop_tail(ctx).await,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::SetCharacter { name }) => commands::set_character(name, ctx).await,
        Some(Commands::Exit) => {
            commands::exit(ctx).await?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
