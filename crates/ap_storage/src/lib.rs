use async_trait::async_trait;
use ap_core::{ArticleStorage, Error, Result};
use std::sync::Arc;

pub mod backends;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: ArticleStorage + Sized + 'static {
    /// Name accepted by [`create_storage`].
    fn kind() -> &'static str;

    fn get_error_message() -> &'static str;

    /// Open the backend. `url` is backend specific; `None` picks the default.
    async fn connect(url: Option<&str>) -> Result<Self>;
}

async fn open<T: StorageBackend>(url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    let storage = T::connect(url).await.map_err(|e| {
        tracing::error!(target: "storage", backend = T::kind(), error = %e, "{}", T::get_error_message());
        e
    })?;
    tracing::info!(target: "storage", backend = T::kind(), "Storage backend ready");
    Ok(Arc::new(storage))
}

/// Build a storage backend by name (`memory` or `sqlite`).
pub async fn create_storage(kind: &str, url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    match kind.trim().to_lowercase().as_str() {
        "memory" => open::<MemoryStorage>(url).await,
        #[cfg(feature = "sqlite")]
        "sqlite" => open::<SQLiteStorage>(url).await,
        other => Err(Error::Config(format!(
            "Unknown storage backend '{}'. Available backends: {}",
            other,
            available_backends().join(", ")
        ))),
    }
}

pub fn available_backends() -> Vec<&'static str> {
    let mut kinds = vec![MemoryStorage::kind()];
    #[cfg(feature = "sqlite")]
    kinds.push(SQLiteStorage::kind());
    kinds
}

pub mod prelude {
    pub use super::{create_storage, StorageBackend};
    pub use super::backends::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage_by_name() {
        let storage = create_storage("Memory", None).await.unwrap();
        assert_eq!(storage.count_articles().await.unwrap(), 0);

        assert!(matches!(
            create_storage("postgres", None).await,
            Err(Error::Config(_))
        ));
    }
}
