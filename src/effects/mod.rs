//! Descriptions of shader effects: the contract between the host and each external GPU function.

pub mod built_ins;

use std::{
    borrow::Borrow,
    fmt::{Debug, Display, Formatter},
};

use cgmath::Vector2;
use index_vec::IndexVec;

use crate::types::{Kind, Value};

index_vec::define_index_type! {
    /// Position of an argument in a shader function's signature
    pub struct ParamIdx = usize;
}
pub type ParamVec<T> = IndexVec<ParamIdx, T>;

/// How an effect is attached to the view it modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Remaps sampling coordinates (e.g. pixellation, waves)
    Distortion,
    /// Computes each pixel's new colour from only its old colour
    Color,
    /// Can sample any pixel of the layer it's applied to (e.g. blurs, loupes)
    Layer,
}

impl Category {
    /// Can effects of this `Category` read pixels other than the one they're writing?
    pub fn samples_neighbours(self) -> bool {
        match self {
            Self::Distortion | Self::Layer => true,
            Self::Color => false,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Distortion => "distortion",
            Self::Color => "color",
            Self::Layer => "layer",
        })
    }
}

/// Immutable description of one shader effect: which external function to call, how to attach
/// it, and what arguments it takes (in the exact order of the function's signature).
#[derive(Debug, Clone, PartialEq)]
pub struct EffectDescriptor {
    name: EffectName,
    category: Category,
    params: ParamVec<ParamSpec>,
    /// Largest distance (in pixels) between an output pixel and any input pixel it reads
    max_sample_offset: Vector2<f32>,
}

impl EffectDescriptor {
    /// Creates a descriptor which takes no arguments and reads no neighbouring pixels.  Add
    /// arguments with [`param`](Self::param).
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            name: EffectName::from(name),
            category,
            params: ParamVec::new(),
            max_sample_offset: Vector2::new(0.0, 0.0),
        }
    }

    /// Appends an argument to the end of the signature
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    #[must_use]
    pub fn with_max_sample_offset(mut self, width: f32, height: f32) -> Self {
        assert!(width >= 0.0 && height >= 0.0);
        // Colour effects only ever see their own pixel
        debug_assert!(self.category.samples_neighbours() || (width == 0.0 && height == 0.0));
        self.max_sample_offset = Vector2::new(width, height);
        self
    }

    pub fn name(&self) -> &EffectName {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn params(&self) -> &ParamVec<ParamSpec> {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The [`Kind`] of every argument, in signature order
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.params.iter().map(|p| p.kind)
    }

    pub fn max_sample_offset(&self) -> Vector2<f32> {
        self.max_sample_offset
    }

    /// The default value of every argument, or `None` if any argument has no default.
    pub fn default_args(&self) -> Option<Vec<Value>> {
        self.params.iter().map(|p| p.default).collect()
    }
}

/// Description of one positional argument of a shader function
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Only used for diagnostics; arguments are always bound by position
    pub name: &'static str,
    pub kind: Kind,
    /// Inclusive range of valid values.  Only meaningful for numeric kinds.
    pub range: Option<(f32, f32)>,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            range: None,
            default: None,
        }
    }

    pub fn float(name: &'static str) -> Self {
        Self::new(name, Kind::Float)
    }

    pub fn float2(name: &'static str) -> Self {
        Self::new(name, Kind::Float2)
    }

    pub fn color(name: &'static str) -> Self {
        Self::new(name, Kind::Color)
    }

    pub fn image(name: &'static str) -> Self {
        Self::new(name, Kind::Image)
    }

    #[must_use]
    pub fn range(mut self, min: f32, max: f32) -> Self {
        assert!(self.kind.is_numeric(), "only numeric arguments have ranges");
        assert!(min <= max);
        self.range = Some((min, max));
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        assert_eq!(value.kind(), self.kind);
        self.default = Some(value);
        self
    }

    /// Returns `true` if `value` has the right kind and lies within this argument's range (if it
    /// has one).
    pub fn accepts(&self, value: Value) -> bool {
        value.kind() == self.kind && self.clamp(value) == value
    }

    /// Clamps every component of a numeric `value` into this argument's range.  Values without a
    /// range (or of a non-numeric kind) are returned unchanged.
    pub fn clamp(&self, value: Value) -> Value {
        let (min, max) = match self.range {
            Some(r) => r,
            None => return value,
        };
        match value {
            Value::Float(v) => Value::Float(v.clamp(min, max)),
            Value::Float2(v) => Value::Float2(Vector2::new(v.x.clamp(min, max), v.y.clamp(min, max))),
            other => other,
        }
    }
}

/// A unique identifier for effects.  This is also the name of the shader function which
/// implements the effect.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectName(String);

impl EffectName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for EffectName {
    fn from(s: &str) -> Self {
        EffectName(s.to_owned())
    }
}

impl Borrow<str> for EffectName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Debug for EffectName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EffectName({:?})", self.0)
    }
}

impl Display for EffectName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn clamp_respects_range() {
        let spec = ParamSpec::float("strength").range(1.0, 20.0);
        assert_eq!(spec.clamp(Value::Float(0.0)), Value::Float(1.0));
        assert_eq!(spec.clamp(Value::Float(25.0)), Value::Float(20.0));
        assert_eq!(spec.clamp(Value::Float(7.5)), Value::Float(7.5));
        assert!(spec.accepts(Value::Float(20.0)));
        assert!(!spec.accepts(Value::Float(20.5)));
        assert!(!spec.accepts(Value::Color(Color::RED)));
    }

    #[test]
    fn unranged_values_pass_through() {
        let spec = ParamSpec::float("time");
        assert_eq!(spec.clamp(Value::Float(-3.0)), Value::Float(-3.0));
        let key = ParamSpec::color("key");
        assert!(key.accepts(Value::Color(Color::GREEN)));
    }

    #[test]
    #[should_panic]
    fn colours_have_no_range() {
        let _ = ParamSpec::color("key").range(0.0, 1.0);
    }

    #[test]
    fn descriptor_keeps_parameter_order() {
        let d = EffectDescriptor::new("test", Category::Layer)
            .param(ParamSpec::float2("size"))
            .param(ParamSpec::float("radius").default(3.0f32))
            .with_max_sample_offset(3.0, 3.0);
        assert_eq!(d.kinds().collect::<Vec<_>>(), vec![Kind::Float2, Kind::Float]);
        assert_eq!(d.params()[ParamIdx::from_usize(1)].name, "radius");
        assert_eq!(d.arity(), 2);
        assert_eq!(d.default_args(), None); // `size` has no default
        assert_eq!(d.max_sample_offset(), Vector2::new(3.0, 3.0));
    }

    #[test]
    fn category_sampling() {
        assert!(Category::Layer.samples_neighbours());
        assert!(Category::Distortion.samples_neighbours());
        assert!(!Category::Color.samples_neighbours());
    }
}
