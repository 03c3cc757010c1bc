//! Source images to which effects are applied, and the images passed to shaders as arguments.

use std::{
    fmt::{Debug, Formatter},
    ops::Deref,
    path::Path,
};

use cgmath::Vector2;
use index_vec::IndexVec;

index_vec::define_index_type! {
    /// Handle to an image in an [`ImageSet`]
    pub struct ImageId = usize;
}

/// A source image, decoded into CPU memory.  The renderer decides how (and whether) to upload it.
///
/// Wraps [`image::RgbaImage`] with a human-friendly [`Debug`] impl.
#[derive(Clone, PartialEq)]
pub struct SourceImage(image::RgbaImage);

impl SourceImage {
    pub fn new(image: image::RgbaImage) -> Self {
        Self(image)
    }

    /// Load a source image from a file.  Images without an alpha channel are given full opacity.
    pub fn from_file(path: impl AsRef<Path>) -> image::ImageResult<Self> {
        let dyn_image = image::io::Reader::open(path)?.decode()?;
        Ok(Self(dyn_image.into_rgba8()))
    }

    pub fn dimensions(&self) -> Vector2<u32> {
        self.0.dimensions().into()
    }

    pub fn into_inner(self) -> image::RgbaImage {
        self.0
    }
}

impl Deref for SourceImage {
    type Target = image::RgbaImage;

    fn deref(&self) -> &image::RgbaImage {
        &self.0
    }
}

impl Debug for SourceImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.0.dimensions();
        write!(f, "RgbaImage({}x{})", w, h)
    }
}

/// Every image which can be referred to by an [`ImageId`] argument
#[derive(Debug, Default)]
pub struct ImageSet {
    images: IndexVec<ImageId, SourceImage>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image to the set, returning its [`ImageId`]
    pub fn insert(&mut self, image: SourceImage) -> ImageId {
        self.images.push(image)
    }

    /// Load an image from a file and add it to the set
    pub fn load(&mut self, path: impl AsRef<Path>) -> crate::Result<ImageId> {
        Ok(self.insert(SourceImage::from_file(path)?))
    }

    /// Given an [`ImageId`], get the corresponding [`SourceImage`] or `None` if no image with
    /// that ID is found.
    pub fn get(&self, id: ImageId) -> Option<&SourceImage> {
        self.images.get(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
