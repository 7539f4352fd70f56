//! Interactive Carelog terminal front end.
//!
//! # Responsibility
//! - Read settings from the environment and start core logging.
//! - Own the single resident store for the lifetime of the process.

mod exam_io;
mod menu;
mod render;
mod settings;

use carelog_core::{demo_residents, init_logging, ResidentStore};
use log::info;
use menu::App;
use settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let log_dir = settings.log_dir.to_string_lossy().into_owned();
    init_logging(&settings.log_level, &log_dir)?;

    let residents = if settings.seed_demo {
        demo_residents()
    } else {
        Vec::new()
    };
    info!(
        "event=cli_start module=cli status=ok core_version={} residents={}",
        carelog_core::core_version(),
        residents.len()
    );

    App::new(ResidentStore::with_residents(residents)).start();

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
