//! The boundary between effect invocations and the (external) GPU renderer which runs them.

use cgmath::Vector2;
use thiserror::Error;

use crate::{
    effects::EffectDescriptor,
    image::{ImageSet, SourceImage},
    registry::Invocation,
    utils::Rect,
};

/// Something which can run shader functions over images, e.g. a GPU surface.
pub trait Renderer {
    /// The result of a successful render
    type Surface;

    /// Apply `invocation` to `source`.  Any [`ImageId`](crate::image::ImageId) arguments refer to
    /// images in `images`.
    fn render(
        &mut self,
        source: &SourceImage,
        images: &ImageSet,
        invocation: &Invocation,
    ) -> Result<Self::Surface, RenderBackendError>;
}

/// The backend couldn't run a shader function (e.g. the function is missing from the compiled
/// shader library).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render backend failed to run `{function}`: {reason}")]
pub struct RenderBackendError {
    pub function: String,
    pub reason: String,
}

impl RenderBackendError {
    pub fn new(invocation: &Invocation, reason: impl Into<String>) -> Self {
        Self {
            function: invocation.function_name().to_owned(),
            reason: reason.into(),
        }
    }
}

/// What ended up on screen after trying to render an effect
#[derive(Debug)]
pub enum Output<'src, S> {
    /// The effect was applied
    Rendered(S),
    /// The effect failed, so the unmodified source is shown instead
    Original(&'src SourceImage),
    /// The effect is switched off, so the renderer was never called
    Disabled(&'src SourceImage),
}

impl<'src, S> Output<'src, S> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    /// The unmodified source image, if that's what ended up on screen
    pub fn source(&self) -> Option<&'src SourceImage> {
        match *self {
            Self::Rendered(_) => None,
            Self::Original(src) | Self::Disabled(src) => Some(src),
        }
    }
}

/// Render `invocation`, falling back to the unmodified `source` image if the renderer fails.  A
/// broken effect should never take the rest of the view down with it.  Disabled invocations skip
/// the renderer entirely.
pub fn render_or_original<'src, R: Renderer>(
    renderer: &mut R,
    source: &'src SourceImage,
    images: &ImageSet,
    invocation: &Invocation,
) -> Output<'src, R::Surface> {
    if !invocation.is_enabled() {
        log::trace!("{} is switched off", invocation.function_name());
        return Output::Disabled(source);
    }
    match renderer.render(source, images, invocation) {
        Ok(surface) => Output::Rendered(surface),
        Err(e) => {
            log::warn!("{}; showing the original image instead", e);
            Output::Original(source)
        }
    }
}

/// A [`Renderer`] with no GPU behind it.  Every render fails, so [`render_or_original`] always
/// shows the original image.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Renderer for Headless {
    type Surface = SourceImage;

    fn render(
        &mut self,
        _source: &SourceImage,
        _images: &ImageSet,
        invocation: &Invocation,
    ) -> Result<Self::Surface, RenderBackendError> {
        Err(RenderBackendError::new(invocation, "no GPU backend available"))
    }
}

/////////////
// PADDING //
/////////////

/// The region which must be allocated around `bounds` so that every sample `descriptor`'s effect
/// makes from inside `bounds` lands inside the allocation.
pub fn padded_bounds(descriptor: &EffectDescriptor, bounds: Rect<f32>) -> Rect<f32> {
    bounds.pad(descriptor.max_sample_offset())
}

/// Size (in whole pixels) of the padded texture needed to apply `descriptor` to a
/// `width`x`height` image.
pub fn padded_size(descriptor: &EffectDescriptor, width: u32, height: u32) -> Vector2<u32> {
    let padded = padded_bounds(descriptor, Rect::from_origin(width as f32, height as f32));
    Vector2::new(padded.width().ceil() as u32, padded.height().ceil() as u32)
}

/// The part of a source image of size `source_size` which `descriptor` could read while writing
/// the pixels in `out_region`.
pub fn sample_region(
    descriptor: &EffectDescriptor,
    out_region: Rect<f32>,
    source_size: Vector2<u32>,
) -> Rect<f32> {
    let source_bounds = Rect::from_origin(source_size.x as f32, source_size.y as f32);
    padded_bounds(descriptor, out_region).intersection(source_bounds)
}
