use common::object_store::{ObjectWriter, Storage, StoreError};
use common::pin::Pinner;

use super::config::Config;

/// Main service state - owns the pinner and, through it, the stores
#[derive(Clone, Debug)]
pub struct State {
    pinner: Pinner,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup primary store
        tracing::info!("Primary store: {:?}", config.store);
        let primary = Storage::new(config.store.clone())
            .await
            .map_err(StateSetupError::PrimaryStore)?;
        let mut writer = ObjectWriter::new(primary);

        // 2. Setup cache, if configured
        if let Some(cache_config) = &config.cache {
            tracing::info!("Cache store: {:?}", cache_config);
            let cache = Storage::new(cache_config.clone())
                .await
                .map_err(StateSetupError::CacheStore)?;
            writer = writer.with_cache(cache);
        }

        // 3. Build the pinner over both
        let pinner = Pinner::new(writer).with_limits(config.pin_limits());
        Ok(Self { pinner })
    }

    pub fn new(pinner: Pinner) -> Self {
        Self { pinner }
    }

    pub fn pinner(&self) -> &Pinner {
        &self.pinner
    }
}

impl AsRef<Pinner> for State {
    fn as_ref(&self) -> &Pinner {
        &self.pinner
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Primary store setup error: {0}")]
    PrimaryStore(StoreError),
    #[error("Cache store setup error: {0}")]
    CacheStore(StoreError),
}
