//! Whole-simulation snapshots and the JSON save format.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use orbyte_config::GravityModeConfig;
use orbyte_system::{BodyId, BodyRecord, BodySpec, CentralBody, CentralRecord, Simulation};
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;

use crate::{ExportError, orbyte};

/// Version written into every save file, JSON or binary.
pub const SAVE_VERSION: u32 = 1;

/// One stored body. `parent` indexes an earlier entry of [`SaveFile::bodies`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBody {
    #[serde(flatten)]
    pub record: BodyRecord,
    #[serde(default)]
    pub parent: Option<usize>,
}

/// Everything needed to rebuild a [`Simulation`]. Trails and orientation are not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub mode: GravityModeConfig,
    pub time_scale: f64,
    pub central: CentralRecord,
    pub bodies: Vec<SavedBody>,
}

impl SaveFile {
    /// Snapshot the current state of `sim`.
    ///
    /// Bodies marked for deletion are left out, and so are their satellites.
    pub fn capture(sim: &Simulation) -> Self {
        let mut slots: HashMap<BodyId, usize> = HashMap::new();
        let mut bodies = Vec::new();
        for body in sim.visible_bodies() {
            let parent = match body.parent() {
                None => None,
                Some(parent) => match slots.get(&parent) {
                    Some(&slot) => Some(slot),
                    None => continue,
                },
            };
            slots.insert(body.id(), bodies.len());
            bodies.push(SavedBody {
                record: body.record(),
                parent,
            });
        }

        SaveFile {
            version: SAVE_VERSION,
            mode: sim.mode().into(),
            time_scale: sim.clock().time_scale(),
            central: sim.central().record(),
            bodies,
        }
    }

    /// Rebuild a simulation. Every body starts with its stored state as the reset snapshot.
    pub fn restore(&self) -> Result<Simulation, ExportError> {
        if self.version != SAVE_VERSION {
            return Err(ExportError::UnsupportedVersion(self.version));
        }
        let central = CentralBody::try_from(self.central.clone())?;
        let mut sim = Simulation::new(central, self.mode.into());
        sim.clock_mut().set_time_scale(self.time_scale)?;

        let mut ids: Vec<BodyId> = Vec::with_capacity(self.bodies.len());
        for (slot, saved) in self.bodies.iter().enumerate() {
            let spec = BodySpec::from(saved.record.clone());
            let id = match saved.parent {
                None => sim.add_body(spec)?,
                Some(parent) => {
                    let parent_id = *ids.get(parent).ok_or(ExportError::DanglingParent {
                        body: slot,
                        parent,
                    })?;
                    sim.add_satellite(parent_id, spec)?
                }
            };
            ids.push(id);
        }
        Ok(sim)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let writer = BufWriter::new(File::create(path)?);
        to_writer_pretty(writer, self)?;
        log::info!("saved {} bodies to {}", self.bodies.len(), path.display());
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self, ExportError> {
        let reader = BufReader::new(File::open(path)?);
        let save: SaveFile = serde_json::from_reader(reader)?;
        log::info!("loaded {} bodies from {}", save.bodies.len(), path.display());
        Ok(save)
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(orbyte::EXTENSION))
        .unwrap_or(false)
}

/// Write `.orbyte` files in the binary format and anything else as JSON.
pub fn write_auto(path: &Path, save: &SaveFile) -> Result<(), ExportError> {
    if is_binary(path) {
        orbyte::write_file(path, save)
    } else {
        save.write_json(path)
    }
}

/// Read a save file, picking the codec by extension.
pub fn read_auto(path: &Path) -> Result<SaveFile, ExportError> {
    if is_binary(path) {
        orbyte::read_file(path)
    } else {
        SaveFile::read_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbyte_core::Vector3;
    use orbyte_system::GravityMode;

    fn system() -> (Simulation, BodyId, BodyId) {
        let central = CentralBody::new("Sun", 1.989e30, 6.96e8).unwrap();
        let mut sim = Simulation::new(central, GravityMode::Central);
        let earth = sim
            .add_body(BodySpec::new(
                "Earth",
                Vector3::new(1.496e11, 0.0, 0.0),
                Vector3::new(0.0, 29_780.0, 0.0),
                5.972e24,
                6.371e6,
            ))
            .unwrap();
        let moon = sim
            .add_satellite(
                earth,
                BodySpec::new(
                    "Moon",
                    Vector3::new(3.844e8, 0.0, 0.0),
                    Vector3::new(0.0, 1_022.0, 0.0),
                    7.342e22,
                    1.737e6,
                ),
            )
            .unwrap();
        (sim, earth, moon)
    }

    #[test]
    fn capture_links_satellites_by_slot() {
        let (sim, ..) = system();
        let save = SaveFile::capture(&sim);
        assert_eq!(save.bodies.len(), 2);
        assert_eq!(save.bodies[0].parent, None);
        assert_eq!(save.bodies[1].parent, Some(0));
        assert_eq!(save.central.name, "Sun");
    }

    #[test]
    fn capture_skips_marked_subtrees() {
        let (mut sim, earth, _moon) = system();
        sim.delete(earth).unwrap();
        let save = SaveFile::capture(&sim);
        assert!(save.bodies.is_empty());
    }

    #[test]
    fn json_keeps_record_fields_flat() {
        let (sim, ..) = system();
        let json = serde_json::to_value(SaveFile::capture(&sim)).unwrap();
        let moon = &json["bodies"][1];
        assert_eq!(moon["name"], "Moon");
        assert_eq!(moon["parent"], 0);
        assert_eq!(moon["position"]["x"], 3.844e8);
        assert_eq!(json["mode"], "central");
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let (sim, ..) = system();
        let mut save = SaveFile::capture(&sim);
        save.bodies[1].parent = Some(1);
        assert!(matches!(
            save.restore(),
            Err(ExportError::DanglingParent { body: 1, parent: 1 })
        ));
    }

    #[test]
    fn auto_selects_codec_by_extension() {
        let (sim, ..) = system();
        let save = SaveFile::capture(&sim);
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("scene.json");
        write_auto(&json, &save).unwrap();
        assert!(std::fs::read_to_string(&json).unwrap().contains("\"Moon\""));
        assert_eq!(read_auto(&json).unwrap(), save);

        let binary = dir.path().join("scene.orbyte");
        write_auto(&binary, &save).unwrap();
        assert_eq!(&std::fs::read(&binary).unwrap()[..4], b"ORBY");
        assert_eq!(read_auto(&binary).unwrap(), save);
    }
}
