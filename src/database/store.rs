use crate::config::Config;
use crate::database::memory::MemoryStore;
use crate::error::Result;

pub fn create_store(config: &Config) -> Result<MemoryStore> {
    match &config.data_file {
        Some(path) => MemoryStore::open(path),
        None => {
            tracing::warn!("DATA_FILE not set, data will not survive a restart");
            Ok(MemoryStore::new())
        }
    }
}
