pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::GenerationBackend;
pub use storage::ArticleStorage;
pub use types::{
    reading_time, Article, ArticleUpdate, CandidateArticle, Category, HealthStatus, SearchParams,
};
