//! Custom types used for describing shader arguments and sending dynamically typed data to the GPU.

use std::{
    alloc::Layout,
    fmt::{Display, Formatter},
    str::FromStr,
};

use cgmath::Vector2;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::image::ImageId;

/// Enum of the different kinds of argument which can be passed to a shader function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// 32-bit floating point number
    Float,
    /// Pair of 32-bit floats (sizes, pointer locations, etc.)
    Float2,
    Color,
    /// A source image, bound as a texture rather than through the uniform buffer
    Image,
}

impl Kind {
    /// The name of this kind in the shading language's function signatures
    pub fn shader_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Float2 => "float2",
            Self::Color => "half4",
            Self::Image => "texture2d<half>",
        }
    }

    /// The size and alignment of this kind inside a uniform buffer, or `None` if values of this
    /// kind aren't stored in the buffer.
    pub fn uniform_layout(self) -> Option<Layout> {
        match self {
            Self::Float => Some(Layout::new::<f32>()),
            Self::Float2 => Some(Layout::new::<Float2Slot>()),
            Self::Color => Some(Layout::new::<Float4Slot>()),
            Self::Image => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Float2)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.shader_name())
    }
}

// Only used for their layouts.  GPU vectors are aligned to their own size (rounded up to a power
// of two), which Rust arrays aren't.
#[allow(dead_code)]
#[repr(C, align(8))]
struct Float2Slot([f32; 2]);
#[allow(dead_code)]
#[repr(C, align(16))]
struct Float4Slot([f32; 4]);

/// Possible values of a dynamic [`Kind`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    Float2(Vector2<f32>),
    Color(Color),
    Image(ImageId),
}

impl Value {
    pub fn kind(self) -> Kind {
        match self {
            Self::Float(_) => Kind::Float,
            Self::Float2(_) => Kind::Float2,
            Self::Color(_) => Kind::Color,
            Self::Image(_) => Kind::Image,
        }
    }

    pub fn get_float(self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_float2(self) -> Option<Vector2<f32>> {
        match self {
            Self::Float2(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn get_image(self) -> Option<ImageId> {
        match self {
            Self::Image(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the raw bytes covering the value in `self`.  Images have no bytes because they're
    /// bound as textures.
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Float(v) => bytemuck::bytes_of(v),
            Self::Float2(v) => {
                let arr: &[f32; 2] = v.as_ref();
                bytemuck::bytes_of(arr)
            }
            Self::Color(c) => bytemuck::bytes_of(c),
            Self::Image(_) => &[],
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<[f32; 2]> for Value {
    fn from(v: [f32; 2]) -> Self {
        Self::Float2(v.into())
    }
}

impl From<Vector2<f32>> for Value {
    fn from(v: Vector2<f32>) -> Self {
        Self::Float2(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<ImageId> for Value {
    fn from(id: ImageId) -> Self {
        Self::Image(id)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{}", v),
            Self::Float2(v) => write!(f, "{},{}", v.x, v.y),
            Self::Color(c) => write!(f, "{}", c),
            Self::Image(id) => write!(f, "image:{}", id.index()),
        }
    }
}

/// Parses the textual forms produced by [`Value`]'s `Display` impl: `1.5` (float), `200,200`
/// (float2), a colour name, `#rrggbb[aa]` or `rgba(r,g,b,a)` (colour), and `image:<n>` (image).
impl FromStr for Value {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("rgba(") {
            return s.parse::<Color>().map(Self::Color);
        }
        if let Some(idx) = s.strip_prefix("image:") {
            let idx = idx.parse::<usize>().map_err(|_| ParseValueError(s.to_owned()))?;
            return Ok(Self::Image(ImageId::from_usize(idx)));
        }
        if let Some((x, y)) = s.split_once(',') {
            return match (x.trim().parse::<f32>(), y.trim().parse::<f32>()) {
                (Ok(x), Ok(y)) => Ok(Self::Float2(Vector2::new(x, y))),
                _ => Err(ParseValueError(s.to_owned())),
            };
        }
        if let Ok(v) = s.parse::<f32>() {
            return Ok(Self::Float(v));
        }
        s.parse::<Color>().map(Self::Color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("can't parse {0:?} as a shader argument")]
pub struct ParseValueError(String);

///////////
// COLOR //
///////////

/// A linear RGBA colour with components in `0.0..=1.0`.  Alpha is not premultiplied.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);

    /// The colours offered when picking a chroma key, in display order
    pub const NAMED: [(&'static str, Self); 5] = [
        ("white", Self::WHITE),
        ("red", Self::RED),
        ("yellow", Self::YELLOW),
        ("blue", Self::BLUE),
        ("green", Self::GREEN),
    ];

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// The 8-bit channels of this colour, or `None` if any channel would be rounded
    fn to_bytes(self) -> Option<[u8; 4]> {
        let channels = [self.r, self.g, self.b, self.a];
        let bytes = channels.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        let exact = channels
            .iter()
            .zip_eq(&bytes)
            .all(|(&c, &b)| b as f32 / 255.0 == c);
        exact.then(|| bytes)
    }

    pub fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, c)| c == self)
            .map(|(name, _)| *name)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.to_bytes() {
            Some([r, g, b, a]) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
            // Not representable in hex without rounding
            None => write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a),
        }
    }
}

impl FromStr for Color {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseValueError(s.to_owned());
        if let Some((_, c)) = Self::NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(s)) {
            return Ok(*c);
        }
        if let Some(inner) = s.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            let channels = inner
                .split(',')
                .map(|c| c.trim().parse::<f32>().map_err(|_| err()))
                .collect::<Result<Vec<_>, _>>()?;
            return match channels.as_slice() {
                &[r, g, b, a] => Ok(Self { r, g, b, a }),
                _ => Err(err()),
            };
        }
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(err());
        }
        let mut channels = [u8::MAX; 4];
        for (i, chan) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            *chan = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| err())?;
        }
        let [r, g, b, a] = channels.map(|c| c as f32 / 255.0);
        Ok(Self { r, g, b, a })
    }
}

////////////////////
// UNIFORM BUFFER //
////////////////////

/// Packs shader arguments into the byte layout of a GPU uniform buffer
#[derive(Debug, Default)]
pub struct BufferBuilder {
    inner: Vec<u8>,
}

impl BufferBuilder {
    /// Adds a value to the buffer.  Values with no [`uniform_layout`](Kind::uniform_layout) are
    /// skipped.
    pub fn add_value(&mut self, value: Value) {
        if let Some(layout) = value.kind().uniform_layout() {
            self.add_bytes(layout, value.bytes());
        }
    }

    pub fn add<T: bytemuck::Pod>(&mut self, value: T) {
        self.add_bytes(Layout::new::<T>(), bytemuck::bytes_of(&value));
    }

    pub fn add_bytes(&mut self, layout: Layout, bytes: &[u8]) {
        assert_eq!(bytes.len(), layout.size());
        self.pad_to(layout.align());
        // Write the bytes of this type into the buffer
        self.inner.extend_from_slice(bytes);
    }

    /// Add (zero) padding until we reach a multiple of `alignment`
    fn pad_to(&mut self, alignment: usize) {
        while self.inner.len() % alignment != 0 {
            self.inner.push(0);
        }
    }

    /// Finish the buffer, padding it to a whole number of 16-byte uniform slots
    pub fn finish(mut self) -> Vec<u8> {
        self.pad_to(UNIFORM_SLOT_SIZE);
        self.inner
    }
}

impl From<BufferBuilder> for Vec<u8> {
    fn from(b: BufferBuilder) -> Self {
        b.finish()
    }
}

/// Uniform buffers are always allocated in multiples of this many bytes
pub const UNIFORM_SLOT_SIZE: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_follow_gpu_alignment() {
        let f2 = Kind::Float2.uniform_layout().unwrap();
        assert_eq!((f2.size(), f2.align()), (8, 8));
        let col = Kind::Color.uniform_layout().unwrap();
        assert_eq!((col.size(), col.align()), (16, 16));
        assert!(Kind::Image.uniform_layout().is_none());
    }

    #[test]
    fn buffer_pads_between_values() {
        let mut buf = BufferBuilder::default();
        buf.add_value(Value::Float(1.0));
        buf.add_value(Value::Float2(Vector2::new(2.0, 3.0)));
        buf.add_value(Value::Color(Color::RED));
        let bytes = buf.finish();
        // f32 @ 0, padding @ 4, float2 @ 8, colour @ 16
        assert_eq!(bytes.len(), 32);
        let floats = bytes
            .chunks(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect::<Vec<_>>();
        assert_eq!(floats, [1.0, 0.0, 2.0, 3.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn images_take_no_buffer_space() {
        let mut buf = BufferBuilder::default();
        buf.add_value(Value::Image(ImageId::from_usize(3)));
        assert!(buf.finish().is_empty());
    }

    #[test]
    fn parse_values() {
        assert_eq!("5".parse::<Value>(), Ok(Value::Float(5.0)));
        assert_eq!(
            "200, 100".parse::<Value>(),
            Ok(Value::Float2(Vector2::new(200.0, 100.0)))
        );
        assert_eq!("red".parse::<Value>(), Ok(Value::Color(Color::RED)));
        assert_eq!(
            "image:2".parse::<Value>(),
            Ok(Value::Image(ImageId::from_usize(2)))
        );
        assert!("purple".parse::<Value>().is_err());
        assert!("1,x".parse::<Value>().is_err());
    }

    #[test]
    fn hex_colours() {
        let c = "#00ff0080".parse::<Color>().unwrap();
        assert_eq!((c.r, c.g, c.b), (0.0, 1.0, 0.0));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!("#0000ff".parse::<Color>(), Ok(Color::BLUE));
        assert_eq!(c.to_string(), "#00ff0080");
        assert_eq!(Color::YELLOW.to_string(), "yellow");
    }

    #[test]
    fn unrounded_colours_print_exactly() {
        let grey = Color::rgb(0.3, 0.3, 0.3);
        let text = grey.to_string();
        assert_eq!(text, "rgba(0.3,0.3,0.3,1)");
        assert_eq!(text.parse::<Color>(), Ok(grey));
        assert_eq!(text.parse::<Value>(), Ok(Value::Color(grey)));
        assert!("rgba(0.3,0.3,0.3)".parse::<Color>().is_err());
    }
}
