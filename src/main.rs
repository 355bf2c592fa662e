use std::path::Path;

use anyhow::Context;

use clip_plane_viewer::{load_config, run_viewer, DEFAULT_CONFIG_FILE};

fn main() -> anyhow::Result<()> {
    let command = clap::Command::new("clip-plane-viewer")
        .about("3D viewer with draggable clipping planes")
        .arg(
            clap::Arg::new("config")
                .long("config")
                .help("Path to config.toml")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("plane-size")
                .long("plane-size")
                .help("Side length of new clipping planes")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("no-default-planes")
                .long("no-default-planes")
                .help("Start without the configured clipping planes"),
        );
    let matches = command.get_matches();

    let config_path = matches.value_of("config").unwrap_or(DEFAULT_CONFIG_FILE);
    let mut config = load_config(Path::new(config_path));

    if let Some(plane_size) = matches.value_of("plane-size") {
        config.clipping.plane_size = plane_size
            .parse::<f32>()
            .with_context(|| format!("Invalid --plane-size {}", plane_size))?;
    }

    if matches.is_present("no-default-planes") {
        config.planes.clear();
    }

    run_viewer(&config);
    Ok(())
}
