use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use peakrando::multiworld::LocalMultiworld;
use peakrando::randomize::{make_rng, PeakWorld};
use peakrando::settings::{parse_options, PeakOptions};
use peakrando::spoiler_log::get_spoiler_log;
use peakrando_game::GameData;
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long)]
    random_seed: Option<usize>,

    #[arg(long, default_value = "Player1")]
    player_name: String,

    #[arg(long)]
    output_slot_data: Option<PathBuf>,

    #[arg(long)]
    output_spoiler_log: Option<PathBuf>,
}

fn load_options(args: &Args) -> Result<PeakOptions> {
    match &args.options {
        Some(path) => {
            let options_str = std::fs::read_to_string(path)
                .with_context(|| format!("Unable to read options file {}", path.display()))?;
            parse_options(&options_str)
                .with_context(|| format!("Unable to parse options file {}", path.display()))
        }
        None => Ok(PeakOptions::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let game_data = GameData::load()?;
    let options = load_options(&args)?;

    let seed = match args.random_seed {
        Some(s) => s,
        None => (rand::rngs::StdRng::from_entropy().next_u64() & 0xFFFFFFFF) as usize,
    };
    info!("Generating with seed {seed}");
    let mut rng = make_rng(seed);

    let mut multiworld = LocalMultiworld::new();
    let player = multiworld.add_player(&args.player_name);
    let world = PeakWorld::new(&game_data, options.clone(), player);
    let slot_data = world.generate(&mut multiworld, &mut rng)?;

    let spoiler_log = get_spoiler_log(&multiworld, &game_data, player, &options, seed);
    info!(
        "Goal reachable with full pool: {} ({} of {} locations reachable)",
        spoiler_log.goal_reachable,
        spoiler_log.reachable_locations,
        spoiler_log.locations.iter().filter(|x| x.code.is_some()).count()
    );

    if let Some(output_slot_data_path) = &args.output_slot_data {
        println!(
            "Writing slot data to {}",
            output_slot_data_path.display()
        );
        let slot_data_str = serde_json::to_string_pretty(&slot_data)?;
        std::fs::write(output_slot_data_path, slot_data_str)?;
    }

    if let Some(output_spoiler_log_path) = &args.output_spoiler_log {
        println!(
            "Writing spoiler log to {}",
            output_spoiler_log_path.display()
        );
        let spoiler_str = serde_json::to_string_pretty(&spoiler_log)?;
        std::fs::write(output_spoiler_log_path, spoiler_str)?;
    }

    Ok(())
}
