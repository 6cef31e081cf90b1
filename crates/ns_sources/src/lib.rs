pub mod fixture;
pub mod newsapi;
pub mod topics;

pub use fixture::StaticSource;
pub use newsapi::{NewsApiConfig, NewsApiSource};
pub use topics::{topic_query, DEFAULT_QUERY};

pub mod prelude {
    pub use super::{NewsApiSource, StaticSource};
    pub use ns_core::{Article, ArticleSource, Error, Result};
}
