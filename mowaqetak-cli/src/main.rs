use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mowaqetak_core::{
    Defaults, FormInput, KSA_BOUNDS, KeyValueStore, LocalParts, PlanSlot, Script,
    current_local_parts,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod render;
mod state;

use crate::config::{Config, config_path, init_config, load_config};
use crate::state::FileStore;

#[derive(Parser, Debug)]
#[command(
    name = "mowaqetak",
    version,
    about = "When to leave home to make a Riyadh appointment on time"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a leave-by time and remember it as the latest appointment
    Plan(PlanArgs),

    /// Show the latest saved appointment
    Show,

    /// Print the current Riyadh date and time in form format
    Now,

    /// Convert a position on the map (fractions, x right / y down) to coordinates
    Pick {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },

    /// Manage ~/.mowaqetak/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct PlanArgs {
    /// Origin as LAT,LNG
    #[arg(long, allow_hyphen_values = true)]
    from: String,

    /// Destination as LAT,LNG
    #[arg(long, allow_hyphen_values = true)]
    to: String,

    /// Appointment date, YYYY-MM-DD (default: today in Riyadh)
    #[arg(long)]
    date: Option<String>,

    /// Appointment time, HH:MM 24-hour (default: now in Riyadh)
    #[arg(long)]
    time: Option<String>,

    /// Preparation minutes (default from config)
    #[arg(long, allow_hyphen_values = true)]
    prep: Option<String>,

    /// Extra delay margin in minutes (default from config)
    #[arg(long, allow_hyphen_values = true)]
    delay: Option<String>,

    /// Destination label shown on the result card
    #[arg(long)]
    label: Option<String>,

    /// Print the result without saving it
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => {
            let cfg = load_config()?;
            let form = form_from_args(&args, &cfg.defaults, current_local_parts());
            let slot = if args.dry_run {
                info!("dry run; not saving");
                None
            } else {
                Some(PlanSlot::new(FileStore::open_default()?))
            };
            print!("{}", plan(&form, &cfg, slot)?);
        }

        Command::Show => {
            let cfg = load_config()?;
            let store = FileStore::open_default()?;
            info!(dir = %store.dir().display(), "loading latest plan");
            print!("{}", show(&PlanSlot::new(store), cfg.display.script));
        }

        Command::Now => {
            let now = current_local_parts();
            println!("{} {}", now.date_text(), now.time_text());
        }

        Command::Pick { x, y } => {
            let p = KSA_BOUNDS.point_at(x, y);
            println!("{:.4},{:.4}", p.lat, p.lng);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("# {}", config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Fill the form from flags; omitted date/time are "now", omitted prep/delay
/// come from config.
fn form_from_args(args: &PlanArgs, defaults: &Defaults, now: LocalParts) -> FormInput {
    let (origin_lat, origin_lng) = split_pair(&args.from);
    let (dest_lat, dest_lng) = split_pair(&args.to);
    FormInput {
        origin_lat,
        origin_lng,
        dest_lat,
        dest_lng,
        date: args.date.clone().unwrap_or_else(|| now.date_text()),
        time: args.time.clone().unwrap_or_else(|| now.time_text()),
        prep_minutes: args
            .prep
            .clone()
            .unwrap_or_else(|| defaults.prep_minutes.to_string()),
        delay_minutes: args
            .delay
            .clone()
            .unwrap_or_else(|| defaults.delay_minutes.to_string()),
        destination_label: args.label.clone(),
    }
}

/// Validate, plan, save into `slot` when given, and return the card text.
fn plan<S: KeyValueStore>(
    form: &FormInput,
    cfg: &Config,
    slot: Option<PlanSlot<S>>,
) -> Result<String> {
    let request = form.validate(&cfg.defaults)?;
    let plan = request.plan()?;

    if let Some(mut slot) = slot {
        slot.save(&plan).context("saving latest plan")?;
        info!(travel_minutes = plan.travel_minutes, "saved latest plan");
    }

    Ok(render::render(Some(&plan), cfg.display.script))
}

fn show<S: KeyValueStore>(slot: &PlanSlot<S>, script: Script) -> String {
    render::render(slot.load().as_ref(), script)
}

/// Split `"lat,lng"`; a missing half comes back empty and fails validation later.
fn split_pair(text: &str) -> (String, String) {
    match text.split_once(',') {
        Some((a, b)) => (a.trim().to_string(), b.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mowaqetak_core::MemoryStore;
    use tempfile::tempdir;

    const NOW: LocalParts = LocalParts { year: 2024, month: 1, day: 15, hour: 9, minute: 5 };

    fn args() -> PlanArgs {
        PlanArgs {
            from: "24.7136,46.6753".into(),
            to: "24.8036,46.6753".into(),
            date: Some("2024-01-15".into()),
            time: Some("14:30".into()),
            ..PlanArgs::default()
        }
    }

    fn cfg_with(prep: u32, delay: u32) -> Config {
        let mut cfg = Config::default();
        cfg.defaults.prep_minutes = prep;
        cfg.defaults.delay_minutes = delay;
        cfg
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("24.7, 46.6"), ("24.7".to_string(), "46.6".to_string()));
        assert_eq!(split_pair("24.7"), ("24.7".to_string(), String::new()));
    }

    #[test]
    fn test_cli_parses_plan() {
        let cli = Cli::try_parse_from([
            "mowaqetak", "plan", "--from", "24.7136,46.6753", "--to", "-21.5,39.2", "--prep", "-5",
        ])
        .unwrap();
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.to, "-21.5,39.2");
                assert_eq!(args.prep.as_deref(), Some("-5"));
                assert!(!args.dry_run);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_pick() {
        let cli = Cli::try_parse_from(["mowaqetak", "pick", "--x", "0.5", "--y", "0.25"]).unwrap();
        assert!(matches!(cli.command, Command::Pick { x, y } if x == 0.5 && y == 0.25));
    }

    #[test]
    fn test_omitted_flags_use_config_and_now() {
        let mut a = args();
        a.date = None;
        a.time = None;
        let form = form_from_args(&a, &cfg_with(20, 5).defaults, NOW);
        assert_eq!(form.date, "2024-01-15");
        assert_eq!(form.time, "09:05");

        let req = form.validate(&cfg_with(20, 5).defaults).unwrap();
        assert_eq!(req.prep_minutes, 20);
        assert_eq!(req.delay_minutes, 5);
    }

    #[test]
    fn test_bad_flag_falls_back_to_config() {
        let mut a = args();
        a.prep = Some("-5".into());
        a.delay = Some("10".into());
        let cfg = cfg_with(12, 3);
        let req = form_from_args(&a, &cfg.defaults, NOW).validate(&cfg.defaults).unwrap();
        assert_eq!(req.prep_minutes, 12);
        assert_eq!(req.delay_minutes, 10);
    }

    #[test]
    fn test_plan_then_show_from_disk() {
        let dir = tempdir().expect("tempdir");
        let cfg = cfg_with(15, 10);
        let form = form_from_args(&args(), &cfg.defaults, NOW);

        let out = plan(&form, &cfg, Some(PlanSlot::new(FileStore::new(dir.path())))).unwrap();
        assert!(out.contains("Leave at:    1:45 PM"), "{out}");
        assert!(dir.path().join("mowaqetak_last.json").exists());

        let shown = show(&PlanSlot::new(FileStore::new(dir.path())), Script::Latin);
        assert_eq!(shown, out);
    }

    #[test]
    fn test_dry_run_stores_nothing() {
        let dir = tempdir().expect("tempdir");
        let cfg = cfg_with(15, 10);
        let form = form_from_args(&args(), &cfg.defaults, NOW);
        let out = plan::<FileStore>(&form, &cfg, None).unwrap();
        assert!(out.contains("Travel:      20 min"));

        assert!(!dir.path().join("mowaqetak_last.json").exists());
        let shown = show(&PlanSlot::new(FileStore::new(dir.path())), Script::Latin);
        assert!(shown.starts_with("No appointment yet"));
    }

    #[test]
    fn test_plan_rejects_missing_destination() {
        let mut a = args();
        a.to = "24.8".into();
        let cfg = Config::default();
        let form = form_from_args(&a, &cfg.defaults, NOW);
        let err = plan(&form, &cfg, Some(PlanSlot::new(MemoryStore::new()))).unwrap_err();
        assert!(err.to_string().contains("origin and destination"));
    }
}
