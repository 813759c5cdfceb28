mod bootstrap;
mod session;

use std::io;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_data::loader::{CitySources, TripLoader};

use crate::session::{Session, SessionOptions};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, page size: {}, format: {}",
        settings.data_dir.display(),
        settings.page_size,
        settings.format
    );

    let options = SessionOptions::from_settings(&settings)?;
    let loader = TripLoader::new(CitySources::new(&settings.data_dir));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&loader, options, stdin.lock(), stdout.lock());
    session.run()?;

    tracing::info!("Session finished");
    Ok(())
}
