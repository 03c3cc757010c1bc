//! Descriptions of GPU shader effects, and the checked dispatch of their arguments.
//!
//! Each effect (pixellate, wave, chroma key, ...) is an external shader function which takes its
//! arguments by position.  A [`Registry`] holds one [`EffectDescriptor`] per effect, and turns
//! argument lists (usually produced from [`settings`]) into [`Invocation`]s which a [`Renderer`]
//! can run.

pub mod effects;
pub mod error;
pub mod image;
pub mod registry;
pub mod render;
pub mod settings;
pub mod types;
pub mod utils;

pub use effects::{Category, EffectDescriptor, EffectName, ParamSpec};
pub use error::{Error, Result};
pub use registry::{build_invocation, Invocation, Registry};
pub use render::{render_or_original, RenderBackendError, Renderer};
pub use types::{Color, Kind, Value};
