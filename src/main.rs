use std::path::PathBuf;

use clap::Parser;
use tileframe::{options::Options, tiles::manifest::DEFAULT_TILESET, Viewer};

#[derive(Parser, Debug)]
#[command(name = "tileframe")]
#[command(about = "Stream a 3D Tiles tileset and frame it in a window")]
struct Cli {
    /// Tileset manifest path or http(s) URL
    #[arg(default_value = DEFAULT_TILESET)]
    location: String,

    /// TOML options preset
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,
}

impl Cli {
    fn load_options(&self) -> Result<Options, tileframe::TilesError> {
        self.options
            .as_deref()
            .map_or_else(|| Ok(Options::default()), Options::load)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = match cli.load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let result = Viewer::builder()
        .with_location(cli.location)
        .with_options(options)
        .build()
        .run();
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
