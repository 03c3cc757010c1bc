//! Signature checking for every built-in effect

use itertools::Itertools;
use shader_fx::{
    image::ImageId,
    settings::{ChromaKeySettings, EffectSettings},
    Color, EffectDescriptor, Error, Kind, Registry, Value,
};

/// Some value of the given kind
fn sample(kind: Kind) -> Value {
    match kind {
        Kind::Float => Value::Float(1.0),
        Kind::Float2 => Value::from([1.0f32, 2.0]),
        Kind::Color => Value::Color(Color::RED),
        Kind::Image => Value::Image(ImageId::from_usize(0)),
    }
}

/// Some value which is **not** of the given kind
fn wrong_sample(kind: Kind) -> Value {
    match kind {
        Kind::Float => Value::Color(Color::GREEN),
        Kind::Float2 | Kind::Color | Kind::Image => Value::Float(0.5),
    }
}

fn well_formed_args(desc: &EffectDescriptor) -> Vec<Value> {
    desc.kinds().map(sample).collect()
}

#[test]
fn well_formed_args_are_accepted() {
    let reg = Registry::built_in();
    for desc in reg.descriptors() {
        let described = reg.describe(desc.name().as_str()).unwrap();
        let inv = shader_fx::build_invocation(described, well_formed_args(described)).unwrap();
        assert_eq!(inv.kinds().collect_vec(), described.kinds().collect_vec());
        assert_eq!(inv.function_name(), desc.name().as_str());
    }
}

#[test]
fn one_too_few_or_many_args() {
    let reg = Registry::built_in();
    for desc in reg.descriptors() {
        let n = desc.arity();
        let mut too_many = well_formed_args(desc);
        too_many.push(Value::Float(0.0));
        let err = shader_fx::build_invocation(desc, too_many).unwrap_err();
        assert!(
            matches!(err, Error::ArityMismatch { expected, found, .. } if expected == n && found == n + 1),
            "{}: {}",
            desc.name(),
            err
        );

        if n > 0 {
            let mut too_few = well_formed_args(desc);
            too_few.pop();
            let err = shader_fx::build_invocation(desc, too_few).unwrap_err();
            assert!(
                matches!(err, Error::ArityMismatch { found, .. } if found == n - 1),
                "{}: {}",
                desc.name(),
                err
            );
        }
    }
}

#[test]
fn wrong_kind_at_any_position() {
    let reg = Registry::built_in();
    for desc in reg.descriptors() {
        for (i, kind) in desc.kinds().enumerate() {
            let mut args = well_formed_args(desc);
            args[i] = wrong_sample(kind);
            let err = shader_fx::build_invocation(desc, args).unwrap_err();
            match err {
                Error::TypeMismatch {
                    position,
                    expected,
                    found,
                    ..
                } => {
                    assert_eq!(position, i);
                    assert_eq!(expected, kind);
                    assert_ne!(found, kind);
                }
                other => panic!("{}: expected a type mismatch, got {}", desc.name(), other),
            }
        }
    }
}

#[test]
fn unknown_effect_is_reported() {
    let reg = Registry::built_in();
    assert!(matches!(
        reg.describe("no-such-effect"),
        Err(Error::UnknownEffect(_))
    ));
    assert!(matches!(
        reg.invoke("no-such-effect", vec![]),
        Err(Error::UnknownEffect(_))
    ));
}

#[test]
fn pixellate() {
    let reg = Registry::built_in();
    let desc = reg.describe("pixellate").unwrap();
    assert_eq!(desc.kinds().collect_vec(), vec![Kind::Float]);
    assert!(reg.invoke("pixellate", vec![Value::Float(5.0)]).is_ok());
    assert!(matches!(
        reg.invoke("pixellate", vec![Value::Float(5.0), Value::Float(1.0)]),
        Err(Error::ArityMismatch { .. })
    ));
    let red = "red".parse::<Value>().unwrap();
    assert!(matches!(
        reg.invoke("pixellate", vec![red]),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn wave() {
    let reg = Registry::built_in();
    let desc = reg.describe("wave").unwrap();
    assert_eq!(desc.kinds().collect_vec(), vec![Kind::Float; 4]);
    let names = desc.params().iter().map(|p| p.name).collect_vec();
    assert_eq!(names, ["time", "speed", "frequency", "amplitude"]);
    let args = [0.0, 1.0, 15.0, 5.0].iter().map(|&v| Value::Float(v)).collect();
    assert!(reg.invoke("wave", args).is_ok());
}

#[test]
fn chroma_key() {
    let reg = Registry::built_in();
    let desc = reg.describe("chromaKey").unwrap();
    assert_eq!(
        desc.kinds().collect_vec(),
        vec![Kind::Color, Kind::Float, Kind::Float, Kind::Float, Kind::Float]
    );
    let settings = ChromaKeySettings::default();
    assert_eq!(
        (settings.range, settings.softness, settings.edge_desaturation, settings.alpha_crop),
        (0.1, 0.1, 0.5, 0.5)
    );
    let inv = settings.invocation(&reg).unwrap();
    // One colour slot, then four floats packed into the next slot
    assert_eq!(inv.uniform_bytes().len(), 32);
}

#[test]
fn image_ids_are_not_resolved() {
    // Nothing is loaded, so resolving `image:99` is left to the renderer
    let reg = Registry::built_in();
    let arg = "image:99".parse::<Value>().unwrap();
    let inv = reg.invoke("gaussianBlurFragment", vec![arg]).unwrap();
    assert_eq!(inv.images().collect_vec(), vec![ImageId::from_usize(99)]);
    assert!(inv.uniform_bytes().is_empty());
    assert!(inv.is_enabled());
}
