//! Template rendering using Handlebars.
//!
//! PR titles, commit messages and PR bodies are Handlebars templates rendered
//! against [`TemplateData`].

mod data;
pub mod defaults;
mod error;
mod renderer;

pub use data::TemplateData;
pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};
