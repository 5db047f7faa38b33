use leadgen_core::{
    load_services, AppConfig, AppSettings, FileStore, SearchHistory, ServiceCatalog,
};

/// Everything a command needs: configuration, the on-disk store, and the
/// service catalog.
pub(crate) struct CliContext {
    pub config: AppConfig,
    pub store: FileStore,
    pub catalog: ServiceCatalog,
}

impl CliContext {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        let catalog = match &config.services_path {
            Some(path) => {
                let catalog = load_services(path)?;
                tracing::debug!(
                    path = %path.display(),
                    services = catalog.services.len(),
                    "loaded service catalog"
                );
                catalog
            }
            None => ServiceCatalog::default(),
        };

        Ok(Self {
            config,
            store,
            catalog,
        })
    }

    pub fn settings(&self) -> anyhow::Result<AppSettings> {
        Ok(AppSettings::load(&self.store, self.config.default_settings())?)
    }

    pub fn history(&self) -> anyhow::Result<SearchHistory> {
        Ok(SearchHistory::load(&self.store, self.config.history_limit)?)
    }
}
