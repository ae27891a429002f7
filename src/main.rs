mod logging;
mod models;
mod persist;
mod run;
mod session;
mod store;
mod sync;
mod ui;

use anyhow::{Context, Result};

use crate::persist::FileStorage;
use crate::session::Session;
use crate::store::LedgerStore;
use crate::sync::SyncClient;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    logging::init(&data_dir)?;

    let storage = FileStorage::new(&data_dir)?;
    let store = LedgerStore::open(Box::new(storage));
    let sync = SyncClient::from_env()?;
    let mut session = Session::new(store, sync);

    match args.len() {
        1 => run::as_tui(&mut session),
        _ => run::as_cli(&args, &mut session),
    }
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "homeledger", "HomeLedger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
