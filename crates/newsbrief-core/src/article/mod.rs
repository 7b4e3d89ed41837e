mod lookup;
mod models;

pub use lookup::{ArticleLookup, BackendClient};
pub use models::ArticleRef;
