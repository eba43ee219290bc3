pub mod config;
pub mod text;
pub mod types;

pub use config::Config;
pub use text::{excerpt, CONTENT_MAX_CHARS};
pub use types::{Annotation, Category, Record, Severity, Verdict};
