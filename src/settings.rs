//! Per-effect settings: the values a UI exposes for each effect (slider positions, picked colours,
//! pointer locations, etc.), and how they turn into shader arguments.
//!
//! Every struct's [`Default`] matches the initial state of the corresponding controls.  Settings
//! can be stored as JSON, where each field is optional:
//!
//! ```json
//! { "effect": "chromaKey", "key": { "r": 0, "g": 1, "b": 0, "a": 1 }, "softness": 0.3 }
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{
    effects::{built_ins, EffectDescriptor},
    error::Result,
    image::ImageId,
    registry::{build_invocation, Invocation, Registry},
    types::{Color, Value},
};

/// Settings which can be turned into an invocation of one effect
pub trait EffectSettings {
    /// The name of the effect which these settings control
    fn effect(&self) -> &'static str;

    /// The shader arguments, in signature order
    fn args(&self) -> Vec<Value>;

    /// Build an [`Invocation`] from these settings, exactly as they are
    fn invocation<'r>(&self, registry: &'r Registry) -> Result<Invocation<'r>> {
        registry.invoke(self.effect(), self.args())
    }

    /// Build an [`Invocation`] after clamping every argument into its valid range
    fn clamped_invocation<'r>(&self, registry: &'r Registry) -> Result<Invocation<'r>> {
        let descriptor = registry.describe(self.effect())?;
        build_invocation(descriptor, clamp_args(descriptor, self.args()))
    }
}

/// Clamp each argument into the range of the parameter at the same position.  Surplus arguments
/// are left alone (they'll be rejected by [`build_invocation`] anyway).
pub fn clamp_args(descriptor: &EffectDescriptor, args: Vec<Value>) -> Vec<Value> {
    let mut specs = descriptor.params().iter();
    args.into_iter()
        .map(|value| match specs.next() {
            Some(spec) => spec.clamp(value),
            None => value,
        })
        .collect()
}

///////////////
// PIXELLATE //
///////////////

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PixellateSettings {
    pub strength: f32,
}

impl Default for PixellateSettings {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

impl EffectSettings for PixellateSettings {
    fn effect(&self) -> &'static str {
        built_ins::PIXELLATE
    }

    fn args(&self) -> Vec<Value> {
        vec![Value::Float(self.strength)]
    }
}

//////////
// WAVE //
//////////

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveSettings {
    /// Seconds since the animation started
    pub time: f32,
    pub speed: f32,
    pub frequency: f32,
    pub amplitude: f32,
}

impl WaveSettings {
    /// Set `time` from the animation clock
    #[must_use]
    pub fn at_time_since(mut self, start: Instant) -> Self {
        self.time = start.elapsed().as_secs_f32();
        self
    }
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
            frequency: 15.0,
            amplitude: 5.0,
        }
    }
}

impl EffectSettings for WaveSettings {
    fn effect(&self) -> &'static str {
        built_ins::WAVE
    }

    fn args(&self) -> Vec<Value> {
        vec![
            Value::Float(self.time),
            Value::Float(self.speed),
            Value::Float(self.frequency),
            Value::Float(self.amplitude),
        ]
    }
}

///////////////
// GRAYSCALE //
///////////////

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrayscaleSettings;

impl EffectSettings for GrayscaleSettings {
    fn effect(&self) -> &'static str {
        built_ins::GRAYSCALE
    }

    fn args(&self) -> Vec<Value> {
        vec![]
    }
}

///////////////////
// GAUSSIAN BLUR //
///////////////////

/// Has no [`Default`] because the blur source image has to be loaded first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBlurSettings {
    pub image: ImageId,
}

impl EffectSettings for GaussianBlurSettings {
    fn effect(&self) -> &'static str {
        built_ins::GAUSSIAN_BLUR
    }

    fn args(&self) -> Vec<Value> {
        vec![Value::Image(self.image)]
    }
}

/////////////////
// CIRCLE BLUR //
/////////////////

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleBlurSettings {
    pub size: [f32; 2],
    pub radius: f32,
    pub falloff: f32,
}

impl Default for CircleBlurSettings {
    fn default() -> Self {
        Self {
            size: [200.0, 200.0],
            radius: 0.0,
            falloff: 100.0,
        }
    }
}

impl EffectSettings for CircleBlurSettings {
    fn effect(&self) -> &'static str {
        built_ins::CIRCLE_BLUR
    }

    fn args(&self) -> Vec<Value> {
        vec![
            self.size.into(),
            Value::Float(self.radius),
            Value::Float(self.falloff),
        ]
    }
}

////////////////
// CHROMA KEY //
////////////////

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromaKeySettings {
    /// The colour which is made transparent
    pub key: Color,
    pub range: f32,
    pub softness: f32,
    pub edge_desaturation: f32,
    pub alpha_crop: f32,
}

impl Default for ChromaKeySettings {
    fn default() -> Self {
        Self {
            key: Color::WHITE,
            range: 0.1,
            softness: 0.1,
            edge_desaturation: 0.5,
            alpha_crop: 0.5,
        }
    }
}

impl EffectSettings for ChromaKeySettings {
    fn effect(&self) -> &'static str {
        built_ins::CHROMA_KEY
    }

    fn args(&self) -> Vec<Value> {
        vec![
            Value::Color(self.key),
            Value::Float(self.range),
            Value::Float(self.softness),
            Value::Float(self.edge_desaturation),
            Value::Float(self.alpha_crop),
        ]
    }
}

///////////
// LOUPE //
///////////

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoupeSettings {
    pub size: [f32; 2],
    /// Pointer location, in view coordinates
    pub touch: [f32; 2],
    pub radius: f32,
    pub magnification: f32,
}

impl LoupeSettings {
    /// Move the loupe to follow a pointer drag
    #[must_use]
    pub fn with_touch(mut self, x: f32, y: f32) -> Self {
        self.touch = [x, y];
        self
    }
}

impl Default for LoupeSettings {
    fn default() -> Self {
        Self {
            size: [200.0, 200.0],
            touch: [100.0, 100.0],
            radius: 60.0,
            magnification: 2.0,
        }
    }
}

impl EffectSettings for LoupeSettings {
    fn effect(&self) -> &'static str {
        built_ins::LOUPE
    }

    fn args(&self) -> Vec<Value> {
        vec![
            self.size.into(),
            self.touch.into(),
            Value::Float(self.radius),
            Value::Float(self.magnification),
        ]
    }
}

///////////////////
// GRADIENT BLUR //
///////////////////

/// The direction in which a gradient blur gets stronger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GradientBlurSettings {
    pub direction: Direction,
    pub size: [f32; 2],
    pub radius: f32,
}

impl Default for GradientBlurSettings {
    fn default() -> Self {
        Self {
            direction: Direction::Vertical,
            size: [200.0, 200.0],
            radius: 10.0,
        }
    }
}

impl EffectSettings for GradientBlurSettings {
    fn effect(&self) -> &'static str {
        match self.direction {
            Direction::Vertical => built_ins::GRADIENT_BLUR_VERTICAL,
            Direction::Horizontal => built_ins::GRADIENT_BLUR_HORIZONTAL,
        }
    }

    fn args(&self) -> Vec<Value> {
        vec![self.size.into(), Value::Float(self.radius)]
    }
}

/////////////////
// MOTION BLUR //
/////////////////

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionBlurSettings {
    pub size: [f32; 2],
    /// Radians, clockwise from the x axis
    pub angle: f32,
    pub length: f32,
}

impl Default for MotionBlurSettings {
    fn default() -> Self {
        Self {
            size: [200.0, 200.0],
            angle: 0.0,
            length: 10.0,
        }
    }
}

impl EffectSettings for MotionBlurSettings {
    fn effect(&self) -> &'static str {
        built_ins::MOTION_BLUR
    }

    fn args(&self) -> Vec<Value> {
        vec![
            self.size.into(),
            Value::Float(self.angle),
            Value::Float(self.length),
        ]
    }
}

/////////////
// PRESETS //
/////////////

/// Settings for any effect which can be stored on disk, tagged with the effect's name.  The
/// Gaussian blur isn't included, because its argument is an image handle which only makes sense
/// while the program is running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
pub enum Preset {
    Pixellate(PixellateSettings),
    Wave(WaveSettings),
    Grayscale,
    CircleBlur(CircleBlurSettings),
    ChromaKey(ChromaKeySettings),
    Loupe(LoupeSettings),
    GradientBlur(GradientBlurSettings),
    MotionBlur(MotionBlurSettings),
}

impl Preset {
    /// The default settings for the effect called `name`, or `None` if `name` isn't an effect
    /// which has presets.
    pub fn default_for(name: &str) -> Option<Self> {
        Some(match name {
            built_ins::PIXELLATE => Self::Pixellate(Default::default()),
            built_ins::WAVE => Self::Wave(Default::default()),
            built_ins::GRAYSCALE => Self::Grayscale,
            built_ins::CIRCLE_BLUR => Self::CircleBlur(Default::default()),
            built_ins::CHROMA_KEY => Self::ChromaKey(Default::default()),
            built_ins::LOUPE => Self::Loupe(Default::default()),
            built_ins::GRADIENT_BLUR_VERTICAL => Self::GradientBlur(Default::default()),
            built_ins::GRADIENT_BLUR_HORIZONTAL => Self::GradientBlur(GradientBlurSettings {
                direction: Direction::Horizontal,
                ..Default::default()
            }),
            built_ins::MOTION_BLUR => Self::MotionBlur(Default::default()),
            _ => return None,
        })
    }

    /// Parse a preset from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn settings(&self) -> &dyn EffectSettings {
        match self {
            Self::Pixellate(s) => s,
            Self::Wave(s) => s,
            Self::Grayscale => &GrayscaleSettings,
            Self::CircleBlur(s) => s,
            Self::ChromaKey(s) => s,
            Self::Loupe(s) => s,
            Self::GradientBlur(s) => s,
            Self::MotionBlur(s) => s,
        }
    }
}

impl EffectSettings for Preset {
    fn effect(&self) -> &'static str {
        self.settings().effect()
    }

    fn args(&self) -> Vec<Value> {
        self.settings().args()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::types::Kind;

    #[test]
    fn defaults_match_descriptor_defaults() {
        let reg = Registry::built_in();
        for desc in reg.descriptors() {
            let preset = match Preset::default_for(desc.name().as_str()) {
                Some(p) => p,
                None => continue,
            };
            assert_eq!(preset.effect(), desc.name().as_str());
            assert_eq!(Some(preset.args()), desc.default_args(), "{}", desc.name());
        }
    }

    #[test]
    fn every_preset_builds_an_invocation() {
        let reg = Registry::built_in();
        for name in reg.names() {
            if let Some(preset) = Preset::default_for(name.as_str()) {
                let inv = preset.invocation(&reg).unwrap();
                assert_eq!(inv.kinds().collect_vec(), inv.descriptor().kinds().collect_vec());
            }
        }
        // Only the Gaussian blur needs a runtime image
        let image = ImageId::from_usize(0);
        assert!(GaussianBlurSettings { image }.invocation(&reg).is_ok());
    }

    #[test]
    fn chroma_key_defaults() {
        let reg = Registry::built_in();
        let inv = ChromaKeySettings::default().invocation(&reg).unwrap();
        let kinds = inv.kinds().collect_vec();
        assert_eq!(
            kinds,
            vec![Kind::Color, Kind::Float, Kind::Float, Kind::Float, Kind::Float]
        );
        assert_eq!(&inv.args()[1..], &[0.1f32.into(), 0.1f32.into(), 0.5f32.into(), 0.5f32.into()]);
    }

    #[test]
    fn clamping_is_opt_in() {
        let reg = Registry::built_in();
        let wave = WaveSettings {
            time: 100.0,
            speed: 40.0,
            frequency: 0.0,
            amplitude: 35.0,
        };
        let raw = wave.invocation(&reg).unwrap();
        assert_eq!(raw.args()[1], Value::Float(40.0));
        let clamped = wave.clamped_invocation(&reg).unwrap();
        let values = clamped.args().iter().map(|v| v.get_float().unwrap()).collect_vec();
        // `time` has no range
        assert_eq!(values, vec![100.0, 15.0, 1.0, 35.0]);
    }

    #[test]
    fn loupe_follows_pointer() {
        let reg = Registry::built_in();
        let loupe = LoupeSettings::default().with_touch(30.0, 40.0);
        let inv = loupe.invocation(&reg).unwrap();
        assert_eq!(inv.args()[1], Value::from([30.0f32, 40.0]));
    }

    #[test]
    fn wave_time_comes_from_clock() {
        let start = Instant::now();
        let wave = WaveSettings::default().at_time_since(start);
        assert!(wave.time >= 0.0);
    }

    #[test]
    fn presets_from_json() {
        let preset = Preset::from_json(r#"{ "effect": "chromaKey", "softness": 0.3 }"#).unwrap();
        assert_eq!(
            preset,
            Preset::ChromaKey(ChromaKeySettings {
                softness: 0.3,
                ..Default::default()
            })
        );
        let preset =
            Preset::from_json(r#"{ "effect": "gradientBlur", "direction": "horizontal" }"#)
                .unwrap();
        assert_eq!(preset.effect(), built_ins::GRADIENT_BLUR_HORIZONTAL);
        assert_eq!(Preset::from_json(r#"{ "effect": "grayscale" }"#).unwrap(), Preset::Grayscale);
        assert!(Preset::from_json(r#"{ "effect": "sepia" }"#).is_err());
    }

    #[test]
    fn presets_round_trip_through_json() {
        let preset = Preset::Loupe(LoupeSettings::default().with_touch(1.0, 2.0));
        let json = serde_json::to_string(&preset).unwrap();
        assert_eq!(Preset::from_json(&json).unwrap(), preset);
    }
}
