//! Compact little-endian `.orbyte` save format.
//!
//! ```text
//! "ORBY" | version u8 | mode u8 | time_scale f64
//! central: name_len u8 | name | mass f64 | scale f64
//! count u32
//! body:    name_len u8 | name | position 3×f64 | mass f64 | scale f64
//!          | velocity 3×f64 | parent i32 (-1 for roots)
//! ```

use std::fs;
use std::path::Path;

use orbyte_config::GravityModeConfig;
use orbyte_core::Vector3;
use orbyte_system::{BodyRecord, CentralRecord};

use crate::save::{SAVE_VERSION, SaveFile, SavedBody};
use crate::ExportError;

pub const MAGIC: [u8; 4] = *b"ORBY";
pub const EXTENSION: &str = "orbyte";

const MODE_CENTRAL: u8 = 0;
const MODE_MUTUAL: u8 = 1;
const NO_PARENT: i32 = -1;

pub fn encode(save: &SaveFile) -> Result<Vec<u8>, ExportError> {
    let version =
        u8::try_from(save.version).map_err(|_| ExportError::UnsupportedVersion(save.version))?;

    let mut out = Vec::with_capacity(64 + save.bodies.len() * 96);
    out.extend_from_slice(&MAGIC);
    out.push(version);
    out.push(match save.mode {
        GravityModeConfig::Central => MODE_CENTRAL,
        GravityModeConfig::Mutual => MODE_MUTUAL,
    });
    put_f64(&mut out, save.time_scale);

    put_name(&mut out, &save.central.name)?;
    put_f64(&mut out, save.central.mass);
    put_f64(&mut out, save.central.scale);

    let count = u32::try_from(save.bodies.len())
        .map_err(|_| ExportError::TooManyBodies(save.bodies.len()))?;
    out.extend_from_slice(&count.to_le_bytes());

    for (slot, body) in save.bodies.iter().enumerate() {
        let record = &body.record;
        put_name(&mut out, &record.name)?;
        put_vector(&mut out, record.position);
        put_f64(&mut out, record.mass);
        put_f64(&mut out, record.scale);
        put_vector(&mut out, record.velocity);

        let parent = match body.parent {
            None => NO_PARENT,
            Some(parent) if parent < slot => i32::try_from(parent)
                .map_err(|_| ExportError::DanglingParent { body: slot, parent })?,
            Some(parent) => return Err(ExportError::DanglingParent { body: slot, parent }),
        };
        out.extend_from_slice(&parent.to_le_bytes());
    }
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<SaveFile, ExportError> {
    let mut reader = Reader::new(bytes);

    let magic: [u8; 4] = reader.array()?;
    if magic != MAGIC {
        return Err(ExportError::BadMagic(magic));
    }
    let version = u32::from(reader.u8()?);
    if version != SAVE_VERSION {
        return Err(ExportError::UnsupportedVersion(version));
    }
    let mode = match reader.u8()? {
        MODE_CENTRAL => GravityModeConfig::Central,
        MODE_MUTUAL => GravityModeConfig::Mutual,
        other => return Err(ExportError::UnknownMode(other)),
    };
    let time_scale = reader.f64()?;

    let central = CentralRecord {
        name: reader.name()?,
        mass: reader.f64()?,
        scale: reader.f64()?,
    };

    let count = reader.u32()? as usize;
    let mut bodies = Vec::new();
    for slot in 0..count {
        let record = BodyRecord {
            name: reader.name()?,
            position: reader.vector()?,
            mass: reader.f64()?,
            scale: reader.f64()?,
            velocity: reader.vector()?,
        };
        let parent = match reader.i32()? {
            NO_PARENT => None,
            raw => {
                let parent = usize::try_from(raw).unwrap_or(usize::MAX);
                if parent >= slot {
                    return Err(ExportError::DanglingParent { body: slot, parent });
                }
                Some(parent)
            }
        };
        bodies.push(SavedBody { record, parent });
    }

    Ok(SaveFile {
        version,
        mode,
        time_scale,
        central,
        bodies,
    })
}

pub fn write_file(path: &Path, save: &SaveFile) -> Result<(), ExportError> {
    let bytes = encode(save)?;
    fs::write(path, &bytes)?;
    log::info!(
        "saved {} bodies ({} bytes) to {}",
        save.bodies.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

pub fn read_file(path: &Path) -> Result<SaveFile, ExportError> {
    let save = decode(&fs::read(path)?)?;
    log::info!("loaded {} bodies from {}", save.bodies.len(), path.display());
    Ok(save)
}

fn put_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_vector(out: &mut Vec<u8>, v: Vector3) {
    put_f64(out, v.x);
    put_f64(out, v.y);
    put_f64(out, v.z);
}

fn put_name(out: &mut Vec<u8>, name: &str) -> Result<(), ExportError> {
    if name.is_empty() {
        return Err(ExportError::EmptyName);
    }
    let len = u8::try_from(name.len()).map_err(|_| ExportError::NameTooLong {
        name: name.to_string(),
        len: name.len(),
    })?;
    out.push(len);
    out.extend_from_slice(name.as_bytes());
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, offset: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ExportError> {
        let end = self.offset + n;
        let slice = self.bytes.get(self.offset..end).ok_or(ExportError::Truncated {
            offset: self.offset,
        })?;
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ExportError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn u8(&mut self) -> Result<u8, ExportError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, ExportError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32, ExportError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> Result<f64, ExportError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    fn vector(&mut self) -> Result<Vector3, ExportError> {
        Ok(Vector3::new(self.f64()?, self.f64()?, self.f64()?))
    }

    fn name(&mut self) -> Result<String, ExportError> {
        let len = self.u8()? as usize;
        if len == 0 {
            return Err(ExportError::EmptyName);
        }
        Ok(String::from_utf8(self.take(len)?.to_vec())?)
    }
}
