//! Built-in effects.  Each function describes one shader function of the default shader library;
//! argument order must match the function's signature exactly.

use std::f32::consts::TAU;

use super::{Category, EffectDescriptor, ParamSpec};
use crate::types::Color;

pub const PIXELLATE: &str = "pixellate";
pub const WAVE: &str = "wave";
pub const GRAYSCALE: &str = "grayscale";
pub const GAUSSIAN_BLUR: &str = "gaussianBlurFragment";
pub const CIRCLE_BLUR: &str = "circleBlur";
pub const CHROMA_KEY: &str = "chromaKey";
pub const LOUPE: &str = "loupe";
pub const GRADIENT_BLUR_VERTICAL: &str = "gradientBlurVertical";
pub const GRADIENT_BLUR_HORIZONTAL: &str = "gradientBlurHorizontal";
pub const MOTION_BLUR: &str = "motionBlur";

/// Every built-in effect
pub fn all() -> Vec<EffectDescriptor> {
    vec![
        pixellate(),
        wave(),
        grayscale(),
        gaussian_blur(),
        circle_blur(),
        chroma_key(),
        loupe(),
        gradient_blur_vertical(),
        gradient_blur_horizontal(),
        motion_blur(),
    ]
}

/// Snaps every pixel to the centre of its `strength`-sized cell
pub fn pixellate() -> EffectDescriptor {
    EffectDescriptor::new(PIXELLATE, Category::Distortion)
        .param(ParamSpec::float("strength").range(1.0, 20.0).default(1.0f32))
        .with_max_sample_offset(20.0, 20.0)
}

/// Vertical sine-wave displacement, animated by `time` (seconds since the effect was shown)
pub fn wave() -> EffectDescriptor {
    EffectDescriptor::new(WAVE, Category::Distortion)
        .param(ParamSpec::float("time").default(0.0f32))
        .param(ParamSpec::float("speed").range(1.0, 15.0).default(1.0f32))
        .param(ParamSpec::float("frequency").range(1.0, 50.0).default(15.0f32))
        .param(ParamSpec::float("amplitude").range(1.0, 35.0).default(5.0f32))
        .with_max_sample_offset(0.0, 35.0)
}

pub fn grayscale() -> EffectDescriptor {
    EffectDescriptor::new(GRAYSCALE, Category::Layer)
}

/// Blurs using a second image as the blur source.  The image has no default.
pub fn gaussian_blur() -> EffectDescriptor {
    EffectDescriptor::new(GAUSSIAN_BLUR, Category::Color).param(ParamSpec::image("image"))
}

/// Blur whose strength grows with distance from the centre of a `size`-sized view
pub fn circle_blur() -> EffectDescriptor {
    EffectDescriptor::new(CIRCLE_BLUR, Category::Layer)
        .param(ParamSpec::float2("size").default([200.0f32, 200.0]))
        .param(ParamSpec::float("radius").range(0.0, 10.0).default(0.0f32))
        .param(ParamSpec::float("falloff").range(0.0, 200.0).default(100.0f32))
        .with_max_sample_offset(10.0, 10.0)
}

/// Makes pixels close to the `key` colour transparent
pub fn chroma_key() -> EffectDescriptor {
    EffectDescriptor::new(CHROMA_KEY, Category::Color)
        .param(ParamSpec::color("key").default(Color::WHITE))
        .param(ParamSpec::float("range").range(0.0, 1.0).default(0.1f32))
        .param(ParamSpec::float("softness").range(0.0, 1.0).default(0.1f32))
        .param(ParamSpec::float("edgeDesaturation").range(0.0, 1.0).default(0.5f32))
        .param(ParamSpec::float("alphaCrop").range(0.0, 1.0).default(0.5f32))
}

/// Magnifies a circle of `radius` pixels around the pointer location `touch`
pub fn loupe() -> EffectDescriptor {
    EffectDescriptor::new(LOUPE, Category::Layer)
        .param(ParamSpec::float2("size").default([200.0f32, 200.0]))
        .param(ParamSpec::float2("touch").default([100.0f32, 100.0]))
        .param(ParamSpec::float("radius").range(10.0, 150.0).default(60.0f32))
        .param(ParamSpec::float("magnification").range(1.0, 4.0).default(2.0f32))
        .with_max_sample_offset(150.0, 150.0)
}

/// Blur which goes from nothing at the top of the view to `radius` at the bottom
pub fn gradient_blur_vertical() -> EffectDescriptor {
    EffectDescriptor::new(GRADIENT_BLUR_VERTICAL, Category::Layer)
        .param(ParamSpec::float2("size").default([200.0f32, 200.0]))
        .param(ParamSpec::float("radius").range(0.0, 20.0).default(10.0f32))
        .with_max_sample_offset(0.0, 20.0)
}

/// Blur which goes from nothing at the left of the view to `radius` at the right
pub fn gradient_blur_horizontal() -> EffectDescriptor {
    EffectDescriptor::new(GRADIENT_BLUR_HORIZONTAL, Category::Layer)
        .param(ParamSpec::float2("size").default([200.0f32, 200.0]))
        .param(ParamSpec::float("radius").range(0.0, 20.0).default(10.0f32))
        .with_max_sample_offset(20.0, 0.0)
}

/// Directional blur along `angle` (radians, clockwise from the x axis)
pub fn motion_blur() -> EffectDescriptor {
    EffectDescriptor::new(MOTION_BLUR, Category::Layer)
        .param(ParamSpec::float2("size").default([200.0f32, 200.0]))
        .param(ParamSpec::float("angle").range(0.0, TAU).default(0.0f32))
        .param(ParamSpec::float("length").range(0.0, 30.0).default(10.0f32))
        .with_max_sample_offset(30.0, 30.0)
}
