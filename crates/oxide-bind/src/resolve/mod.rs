//! Bind resolution: pairing placeholders with recorded bindings.

mod engine;
mod options;
mod result;

pub use engine::{Resolver, resolve};
pub use options::{DEFAULT_MAX_INPUT_BYTES, ResolveOptions};
pub use result::{BindStatus, BoundParameter, ResolutionResult};
