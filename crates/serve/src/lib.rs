// crates/serve/src/lib.rs

pub mod cache;
pub mod files;
pub mod graphql;
pub mod page;
pub mod preview;
pub mod render;
pub mod source;

pub use cache::{CachedSource, RequestCache};
pub use files::FileSource;
pub use graphql::GraphQlClient;
pub use page::{load_page, page_metadata, Metadata, PageView};
pub use render::{HbsEngine, TemplateEngine};
pub use source::{ContentSource, PageKey};

use http::StatusCode;
use render::error::RenderError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("invalid content path {0:?}")]
    InvalidPath(String),
}

impl Error {
    pub fn to_status(&self) -> StatusCode {
        match self {
            Error::InvalidPath(_) => StatusCode::NOT_FOUND,
            Error::Http(_) | Error::Status { .. } | Error::GraphQl(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
