//! The effect dispatch table: turns effect names and argument lists into [`Invocation`]s.

use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    effects::{built_ins, EffectDescriptor, EffectName},
    error::{Error, Result},
    image::ImageId,
    types::{BufferBuilder, Kind, Value},
};

/// Every effect that can be invoked.  Read-only once created, so one `Registry` can be shared by
/// every view.
#[derive(Debug, Clone)]
pub struct Registry {
    effects: HashMap<EffectName, EffectDescriptor>,
}

impl Registry {
    /// Creates a `Registry` from a set of descriptors, failing if any two share a name.
    pub fn new(descriptors: impl IntoIterator<Item = EffectDescriptor>) -> Result<Self> {
        let mut effects = HashMap::new();
        for desc in descriptors {
            let name = desc.name().clone();
            if effects.insert(name.clone(), desc).is_some() {
                return Err(Error::DuplicateEffect(name));
            }
        }
        log::debug!("Registered {} effects", effects.len());
        Ok(Self { effects })
    }

    /// Creates a `Registry` containing every [built-in](built_ins) effect.
    pub fn built_in() -> Self {
        let effects: HashMap<_, _> = built_ins::all()
            .into_iter()
            .map(|desc| (desc.name().clone(), desc))
            .collect();
        // Built-in names are unique (checked by `built_ins::tests`)
        debug_assert_eq!(effects.len(), built_ins::all().len());
        Self { effects }
    }

    /// Given an effect's name, return its [`EffectDescriptor`]
    pub fn describe(&self, name: &str) -> Result<&EffectDescriptor> {
        self.effects
            .get(name)
            .ok_or_else(|| Error::UnknownEffect(name.to_owned()))
    }

    /// Look up an effect and build an [`Invocation`] of it in one go
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Invocation<'_>> {
        build_invocation(self.describe(name)?, args)
    }

    /// The names of every registered effect, in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &EffectName> {
        self.effects.keys().sorted()
    }

    /// Every registered [`EffectDescriptor`], in alphabetical order of name
    pub fn descriptors(&self) -> impl Iterator<Item = &EffectDescriptor> {
        self.names().map(move |name| &self.effects[name])
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::built_in()
    }
}

/// Checks that `args` matches the signature of `descriptor`, and bundles them into an
/// [`Invocation`].  Values are **not** checked against their ranges; callers are expected to
/// clamp values before they get here.
///
/// [`Image`](Value::Image) arguments are only checked for kind.  Whether the [`ImageId`] refers to
/// a loaded image is up to the [`Renderer`](crate::render::Renderer), which resolves it against
/// its [`ImageSet`](crate::image::ImageSet).
pub fn build_invocation(
    descriptor: &EffectDescriptor,
    args: Vec<Value>,
) -> Result<Invocation<'_>> {
    if args.len() != descriptor.arity() {
        return Err(Error::ArityMismatch {
            effect: descriptor.name().clone(),
            expected: descriptor.arity(),
            found: args.len(),
        });
    }
    for (position, (spec, value)) in descriptor.params().iter().zip_eq(&args).enumerate() {
        if value.kind() != spec.kind {
            return Err(Error::TypeMismatch {
                effect: descriptor.name().clone(),
                position,
                param: spec.name,
                expected: spec.kind,
                found: value.kind(),
            });
        }
    }
    log::debug!(
        "Invoking {}({})",
        descriptor.name(),
        args.iter().map(Value::to_string).join(", ")
    );
    Ok(Invocation {
        descriptor,
        args,
        enabled: true,
    })
}

/// A single, well-formed call of a shader function.  These are created for every update of an
/// effect's arguments (slider change, animation tick, etc.) and consumed by one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<'d> {
    descriptor: &'d EffectDescriptor,
    args: Vec<Value>,
    /// Switched-off effects are never sent to the renderer
    enabled: bool,
}

impl<'d> Invocation<'d> {
    pub fn descriptor(&self) -> &'d EffectDescriptor {
        self.descriptor
    }

    /// Switch the effect on or off.  Invocations start out enabled.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The name of the shader function to call
    pub fn function_name(&self) -> &'d str {
        self.descriptor.name().as_str()
    }

    /// The arguments, in the order of the shader function's signature
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.args.iter().map(|v| v.kind())
    }

    /// Images which the renderer needs to bind as textures, in signature order
    pub fn images(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.args.iter().filter_map(|v| v.get_image())
    }

    /// Pack every non-image argument into the byte layout of a GPU uniform buffer
    pub fn uniform_bytes(&self) -> Vec<u8> {
        let mut buffer = BufferBuilder::default();
        for &value in &self.args {
            buffer.add_value(value);
        }
        buffer.finish()
    }

    pub fn into_args(self) -> Vec<Value> {
        self.args
    }
}
