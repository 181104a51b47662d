use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use tracing::{Level, error, info};

mod cli;
mod plugins;

fn main() -> AppExit {
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return AppExit::error();
        }
    };

    let assets_root = pp_utils::portal_assets_root();
    info!(assets = %assets_root.display(), model = %config.model.path, "Starting patient portal");

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(AssetPlugin {
                    file_path: assets_root.to_string_lossy().into_owned(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Patient Portal".to_string(),
                        resolution: (1600.0, 900.0).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(plugins::PortalCorePlugin::new(config))
        .add_plugins((pp_render::RenderPlugin, pp_ui::UiPlugin))
        .run()
}
