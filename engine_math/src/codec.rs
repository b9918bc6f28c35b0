//! Binary Save/Load.
//!
//! Every type is written field by field in declaration order as little-endian
//! `f32`s. There is no header, tag or version: the reader must already know
//! which type comes next. `Colour` is the one exception and stores its four
//! channels as raw bytes.
//!
//! ```text
//! Vec3  (12 bytes): | x f32 | y f32 | z f32 |
//! Plane (16 bytes): | normal Vec3          | d f32 |
//! ```

use std::io::{Read, Write};

use anyhow::{ensure, Context};
use bytes::{BufMut, Bytes, BytesMut};

/// Fixed-size little-endian binary encoding.
pub trait BinaryCodec: Sized {
    /// Exact encoded size.
    const SIZE_IN_BYTES: usize;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()>;

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self>;
}

pub(crate) fn write_f32<W: Write>(w: &mut W, v: f32) -> anyhow::Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub(crate) fn read_f32<R: Read>(r: &mut R) -> anyhow::Result<f32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

pub(crate) fn write_f32s<W: Write>(w: &mut W, values: &[f32]) -> anyhow::Result<()> {
    for v in values {
        write_f32(w, *v)?;
    }
    Ok(())
}

pub(crate) fn read_f32s<R: Read, const N: usize>(r: &mut R) -> anyhow::Result<[f32; N]> {
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        *slot = read_f32(r)?;
    }
    Ok(out)
}

/// Encodes a single value into a standalone frame.
pub fn encode_to_bytes<T: BinaryCodec>(value: &T) -> anyhow::Result<Bytes> {
    let mut w = BytesMut::with_capacity(T::SIZE_IN_BYTES).writer();
    value
        .save(&mut w)
        .with_context(|| format!("encode {}", std::any::type_name::<T>()))?;
    Ok(w.into_inner().freeze())
}

/// Decodes a frame produced by [`encode_to_bytes`]. Trailing or missing bytes are an error.
pub fn decode_from_bytes<T: BinaryCodec>(b: &[u8]) -> anyhow::Result<T> {
    ensure!(
        b.len() == T::SIZE_IN_BYTES,
        "{} frame must be {} bytes, got {}",
        std::any::type_name::<T>(),
        T::SIZE_IN_BYTES,
        b.len()
    );
    let mut r = b;
    T::load(&mut r).with_context(|| format!("decode {}", std::any::type_name::<T>()))
}
