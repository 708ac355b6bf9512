//! GeTrix asset and audio tool.
//!
//! Command-line front door to the `getrix` library:
//!
//! - `--init-layout` creates the music, sound and image folders with README files
//! - `--check-assets` (default) prints how every asset slot resolves
//! - `--store`, `--buy`, `--equip`, `--add-chips` manage LineChips and skins
//! - `--sound-pack` validates a custom pack and saves it to the settings file
//! - `--play-mode`, `--play-startup`, `--play-sound` preview audio through the
//!   background audio thread for `--seconds`
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini --play-mode menu --seconds 20
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use getrix::events::gameplay::SoundRequest;
use getrix::events::music::MusicRequest;
use getrix::game::{build_schedule, build_world};
use getrix::layout_generator::init_layout;
use getrix::report::{asset_report, store_report};
use getrix::resources::assetlayout::AssetLayout;
use getrix::resources::audio::{setup_audio, shutdown_audio};
use getrix::resources::gameconfig::{DEFAULT_CONFIG_PATH, GameConfig};
use getrix::resources::imagecatalog::ImageCatalog;
use getrix::resources::musiclibrary::{GameMode, MusicLibrary};
use getrix::resources::soundbank::{SoundBank, SoundEffect};
use getrix::resources::store::Store;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

/// GeTrix asset, audio and store tool
#[derive(Parser)]
#[command(version, about = "Asset layout, audio preview and LineChips store for GeTrix")]
struct Cli {
    /// Settings file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Create the asset folders and README files, then exit.
    #[arg(long)]
    init_layout: bool,

    /// Print how every asset resolves (default when nothing else is asked).
    #[arg(long)]
    check_assets: bool,

    /// Print the LineChips balance and the skin catalog.
    #[arg(long)]
    store: bool,

    /// Buy a skin with LineChips.
    #[arg(long, value_name = "SKIN")]
    buy: Option<String>,

    /// Make an owned skin the active one.
    #[arg(long, value_name = "SKIN")]
    equip: Option<String>,

    /// Credit LineChips.
    #[arg(long, value_name = "N")]
    add_chips: Option<u64>,

    /// Validate a sound pack under sounds/custom/ and save it as active.
    #[arg(long, value_name = "NAME")]
    sound_pack: Option<String>,

    /// Preview the music of a mode (startup, menu, standard, dual, gesture, crazy).
    #[arg(long, value_name = "MODE")]
    play_mode: Option<GameMode>,

    /// Preview the startup music.
    #[arg(long)]
    play_startup: bool,

    /// Preview a sound effect (block_land, line_clear, level_up, game_over).
    #[arg(long, value_name = "EFFECT")]
    play_sound: Option<SoundEffect>,

    /// Length of an audio preview.
    #[arg(long, value_name = "N", default_value_t = 10)]
    seconds: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: PathBuf) -> GameConfig {
    let mut config = GameConfig::with_path(path);
    if let Err(e) = config.load_or_create() {
        log::warn!("{}; using defaults", e);
    }
    config
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = load_config(cli.config.clone());
    let layout = AssetLayout::from_config(&config);

    if cli.init_layout {
        let created = init_layout(&layout)?;
        for path in &created {
            println!("created {}", path.display());
        }
        println!("{} entries created", created.len());
        return Ok(());
    }

    let mut handled = false;

    if let Some(pack) = &cli.sound_pack {
        let mut bank = SoundBank::load(&layout);
        bank.set_active_pack(pack)?;
        config.sound_pack = bank.active_pack().to_string();
        config.save_to_file()?;
        println!("Sound pack '{}' saved to {}", config.sound_pack, config.config_path.display());
        handled = true;
    }

    if cli.add_chips.is_some() || cli.buy.is_some() || cli.equip.is_some() || cli.store {
        let mut store = Store::open(&config.store_file);
        if let Some(amount) = cli.add_chips {
            let balance = store.add_line_chips(amount).map_err(|e| e.to_string())?;
            println!("Added {} LineChips, balance {}", amount, balance);
        }
        if let Some(id) = &cli.buy {
            let name = store
                .purchase_skin(id)
                .map_err(|e| e.to_string())?
                .name
                .clone();
            println!("Bought {} ({} LineChips left)", name, store.line_chips());
        }
        if let Some(id) = &cli.equip {
            let name = store
                .set_active_skin(id)
                .map_err(|e| e.to_string())?
                .name
                .clone();
            println!("Equipped {}", name);
        }
        if cli.store {
            print!("{}", store_report(&store));
        }
        handled = true;
    }

    if cli.play_mode.is_some() || cli.play_startup || cli.play_sound.is_some() {
        preview(&cli, config)?;
        return Ok(());
    }

    if cli.check_assets || !handled {
        let report = asset_report(
            &MusicLibrary::load(&layout),
            &SoundBank::load_with_pack(&layout, &config.sound_pack),
            &ImageCatalog::new(&layout),
        );
        print!("{}", report);
    }
    Ok(())
}

fn preview_deadline(start: Instant, seconds: u64) -> Result<Instant, String> {
    start
        .checked_add(Duration::from_secs(seconds))
        .ok_or_else(|| format!("--seconds {} is too large", seconds))
}

/// Play music and/or an effect through the audio thread for `cli.seconds`.
fn preview(cli: &Cli, config: GameConfig) -> Result<(), String> {
    let mut world = build_world(config);
    let mut update = build_schedule();
    update
        .initialize(&mut world)
        .map_err(|e| format!("Failed to initialize schedule: {e}"))?;
    setup_audio(&mut world);

    {
        let mut requests = world.resource_mut::<Messages<MusicRequest>>();
        if cli.play_startup {
            requests.write(MusicRequest::PlayStartup);
        }
        if let Some(mode) = cli.play_mode {
            requests.write(MusicRequest::play(mode));
        }
    }
    if let Some(effect) = cli.play_sound {
        world
            .resource_mut::<Messages<SoundRequest>>()
            .write(SoundRequest(effect));
    }

    let deadline = preview_deadline(Instant::now(), cli.seconds)?;
    while Instant::now() < deadline {
        update.run(&mut world);
        std::thread::sleep(FRAME);
    }

    world
        .resource_mut::<Messages<MusicRequest>>()
        .write(MusicRequest::Stop);
    update.run(&mut world);
    shutdown_audio(&mut world);
    Ok(())
}
