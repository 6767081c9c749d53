use crate::domain::model::Creature;
use crate::utils::error::Result;
use async_trait::async_trait;

/// External data provider the catalog is loaded from once at startup.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Creature>>;

    /// Human-readable origin for log lines.
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn catalog_source(&self) -> &str;
    fn allowed_origin(&self) -> &str;
    fn icon_base_url(&self) -> &str;
    fn default_page_size(&self) -> usize;
}
