//! Tile scene demo entry point.
//!
//! Two small scenes built on:
//! - **raylib** for windowing, graphics and keyboard input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Build the scene configuration (scene defaults, then `config.ini`,
//!    then command line)
//! 2. Open the raylib window and preload the scene's assets
//! 3. Create the scene: tiles, camera, player
//! 4. Run the scene schedule every frame until the window closes
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scene tiled
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use tilescene::scenes::{SceneKind, init_world, preload::preload};
use tilescene::systems::time::update_world_time;

/// Tiled map and arcade physics demo scenes
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Scene to run.
    #[arg(long, value_enum, default_value_t = SceneKind::Physics)]
    scene: SceneKind,

    /// Configuration file overriding the scene defaults.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Directory asset paths are resolved against.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = cli.scene.config().with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(assets) = cli.assets {
        config = config.with_asset_root(assets);
    }
    info!("Starting {:?} scene", cli.scene);

    // --------------- Raylib window ---------------
    let mut builder = raylib::init();
    builder
        .size(config.width as i32, config.height as i32)
        .title(&config.title);
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    // --------------- ECS world + assets ---------------
    let mut world = World::new();
    init_world(&mut world, config);

    if let Err(e) = preload(&mut world, &mut rl, &thread, &cli.scene.manifest()) {
        error!("Failed to load assets: {}", e);
        return ExitCode::FAILURE;
    }
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    if let Err(e) = cli.scene.create(&mut world) {
        error!("Failed to create scene: {}", e);
        return ExitCode::FAILURE;
    }

    let mut update = cli.scene.schedule();
    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        return ExitCode::FAILURE;
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    ExitCode::SUCCESS
}
