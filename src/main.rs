use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use shader_fx::{
    effects::built_ins,
    image::{ImageSet, SourceImage},
    render::{render_or_original, Headless, Output},
    settings::{clamp_args, EffectSettings, GaussianBlurSettings, Preset},
    Registry, Value,
};

/// Inspect the built-in shader effects and check argument lists against their signatures.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every effect
    List,
    /// Print the signature of one effect
    Describe { effect: String },
    /// Check an argument list and print the packed uniform buffer
    Invoke {
        effect: String,
        /// Arguments in signature order: `1.5`, `200,200`, `red`, `#00ff00`, `image:0`.  If
        /// omitted, the effect's default settings are used.
        args: Vec<String>,
        /// Load the settings from a JSON preset instead
        #[arg(long, conflicts_with = "args")]
        settings: Option<PathBuf>,
        /// Clamp every argument into its valid range first
        #[arg(long)]
        clamp: bool,
        /// Source image to render the effect onto
        #[arg(long, requires = "out")]
        image: Option<PathBuf>,
        /// Where to write the rendered image
        #[arg(long, requires = "image")]
        out: Option<PathBuf>,
        /// Switch the effect off, writing the source image unchanged
        #[arg(long, requires = "out")]
        disabled: bool,
    },
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::built_in();
    match command {
        Command::List => {
            for desc in registry.descriptors() {
                println!("{:<24} {}", desc.name(), desc.category());
            }
        }
        Command::Describe { effect } => describe(&registry, &effect)?,
        Command::Invoke {
            effect,
            args,
            settings,
            clamp,
            image,
            out,
            disabled,
        } => {
            let mut images = ImageSet::new();
            let source = match &image {
                Some(path) => Some(SourceImage::from_file(path)?),
                None => None,
            };
            let values = if let Some(path) = settings {
                let preset = Preset::from_json(&std::fs::read_to_string(path)?)?;
                if preset.effect() != effect {
                    let msg = format!("preset is for `{}`, not `{}`", preset.effect(), effect);
                    return Err(msg.into());
                }
                preset.args()
            } else if !args.is_empty() {
                args
                    .iter()
                    .map(|a| a.parse::<Value>())
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                default_args(&effect, &mut images, source.as_ref())?
            };

            let descriptor = registry.describe(&effect)?;
            let values = if clamp {
                clamp_args(descriptor, values)
            } else {
                values
            };
            let invocation = shader_fx::build_invocation(descriptor, values)?.enabled(!disabled);
            println!(
                "{}({})",
                invocation.function_name(),
                invocation.args().iter().join(", ")
            );
            println!(
                "uniforms: [{}]",
                invocation
                    .uniform_bytes()
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .join(" ")
            );

            if let (Some(source), Some(out)) = (source, out) {
                match render_or_original(&mut Headless, &source, &images, &invocation) {
                    Output::Rendered(surface) => surface.save(&out)?,
                    Output::Original(original) | Output::Disabled(original) => {
                        original.save(&out)?
                    }
                }
                println!("wrote {}", out.display());
            }
        }
    }
    Ok(())
}

fn describe(registry: &Registry, effect: &str) -> shader_fx::Result<()> {
    let desc = registry.describe(effect)?;
    println!("{} ({} effect)", desc.name(), desc.category());
    for spec in desc.params() {
        let range = spec
            .range
            .map(|(min, max)| format!(" in {}..={}", min, max))
            .unwrap_or_default();
        let default = spec
            .default
            .map(|v| format!(" = {}", v))
            .unwrap_or_default();
        println!("    {}: {}{}{}", spec.name, spec.kind, range, default);
    }
    let offset = desc.max_sample_offset();
    println!("max sample offset: {}x{}", offset.x, offset.y);
    Ok(())
}

/// The arguments used when none are given on the command line
fn default_args(
    effect: &str,
    images: &mut ImageSet,
    source: Option<&SourceImage>,
) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    if effect == built_ins::GAUSSIAN_BLUR {
        // Blur the source image with itself
        let source = source.ok_or("`gaussianBlurFragment` needs an image (pass --image)")?;
        let image = images.insert(source.clone());
        return Ok(GaussianBlurSettings { image }.args());
    }
    match Preset::default_for(effect) {
        Some(preset) => Ok(preset.args()),
        // Let the registry report the unknown effect
        None => Ok(vec![]),
    }
}
