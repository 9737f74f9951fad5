//! Single-page blog front end: tag and text filtering over a static post
//! list, an inline Markdown reader, and url/history synchronization.

pub mod app;
pub mod config;
pub mod filter;
pub mod history;
pub mod markdown;
pub mod post;
pub mod renderer;
pub mod route;
pub mod state;
pub mod store;
pub mod text;

pub use app::App;
pub use config::SiteConfig;
pub use markdown::MarkdownRenderer;
pub use post::Post;
pub use state::{Action, ViewState};
pub use store::PostStore;
