//! formwork-schema: form schema model, JSON documents, and renderer projection.
//!
//! The full [`FormSchema`] is owned by the authoring side ([`SchemaSession`]).
//! The presentation layer only ever receives a [`RendererSchema`] produced by
//! [`renderer::project`], which has no room for rules, visibility conditions,
//! or builder hints. Rule evaluation over the full schema lives in
//! `formwork-eval`.

pub mod document;
pub mod error;
pub mod renderer;
pub mod session;
pub mod types;

pub use error::SchemaError;
pub use renderer::{project, RendererField, RendererSchema};
pub use session::SchemaSession;
pub use types::*;
