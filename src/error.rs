use thiserror::Error;

use crate::{effects::EffectName, render::RenderBackendError, types::Kind};

/// Everything that can go wrong when looking up, invoking or rendering an effect.  All of these
/// are programming or configuration mistakes, so none of them are worth retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// No effect is registered under this name.
    #[error("no effect named {0:?}")]
    UnknownEffect(String),

    /// Wrong number of arguments for the effect's signature.
    #[error("`{effect}` takes {expected} argument(s), but {found} were given")]
    ArityMismatch {
        effect: EffectName,
        expected: usize,
        found: usize,
    },

    /// An argument's kind disagrees with the effect's signature.
    #[error("argument {position} (`{param}`) of `{effect}` should be {expected}, found {found}")]
    TypeMismatch {
        effect: EffectName,
        position: usize,
        param: &'static str,
        expected: Kind,
        found: Kind,
    },

    /// Two effects were registered under the same name.
    #[error("effect `{0}` is registered twice")]
    DuplicateEffect(EffectName),

    /// The external renderer couldn't run the effect.
    #[error(transparent)]
    RenderBackend(#[from] RenderBackendError),

    /// A source image couldn't be loaded.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
