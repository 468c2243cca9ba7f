//! Importer registry for format-agnostic mesh loading
//!
//! Every importer satisfies the same contract, `import(path) -> PolygonMesh`.
//! The format is picked from a closed set of tags derived from the file
//! extension, and callers may swap in their own importer for any tag.

use crate::{ObjImporter, OffImporter, StlImporter};
use meshorbit_core::{Error, PolygonMesh, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshImporter: Send + Sync {
    /// Read a mesh from the given path
    fn import(&self, path: &Path) -> Result<PolygonMesh>;

    /// Get the format name this importer handles
    fn format_name(&self) -> &'static str;
}

/// Mesh formats known to the capture pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshFormat {
    Off,
    Obj,
    Stl,
}

impl MeshFormat {
    /// All known formats
    pub const ALL: [MeshFormat; 3] = [MeshFormat::Off, MeshFormat::Obj, MeshFormat::Stl];

    /// Format for a file extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "off" => Some(MeshFormat::Off),
            "obj" => Some(MeshFormat::Obj),
            "stl" => Some(MeshFormat::Stl),
            _ => None,
        }
    }

    /// Format for a path, based on its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "no mesh importer for extension {:?} ({})",
                ext,
                path.display()
            ))
        })
    }

    /// Canonical lowercase extension
    pub fn extension(&self) -> &'static str {
        match self {
            MeshFormat::Off => "off",
            MeshFormat::Obj => "obj",
            MeshFormat::Stl => "stl",
        }
    }

    /// The built-in importer for this format
    pub fn default_importer(&self) -> Box<dyn MeshImporter> {
        match self {
            MeshFormat::Off => Box::new(OffImporter),
            MeshFormat::Obj => Box::new(ObjImporter),
            MeshFormat::Stl => Box::new(StlImporter),
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Registry that maps format tags to importers
pub struct ImporterRegistry {
    importers: HashMap<MeshFormat, Box<dyn MeshImporter>>,
}

impl ImporterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            importers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in OFF, OBJ and STL importers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for format in MeshFormat::ALL {
            registry.register(format, format.default_importer());
        }
        registry
    }

    /// Register an importer, replacing any previous one for `format`
    pub fn register(&mut self, format: MeshFormat, importer: Box<dyn MeshImporter>) {
        self.importers.insert(format, importer);
    }

    /// Check if a format has an importer
    pub fn supports(&self, format: MeshFormat) -> bool {
        self.importers.contains_key(&format)
    }

    /// Get a list of formats with importers
    pub fn supported_formats(&self) -> Vec<MeshFormat> {
        let mut formats: Vec<_> = self.importers.keys().copied().collect();
        formats.sort_by_key(|f| f.extension());
        formats
    }

    /// Import a mesh, choosing the importer from the file extension
    pub fn import(&self, path: &Path) -> Result<PolygonMesh> {
        let format = MeshFormat::from_path(path)?;
        let importer = self.importers.get(&format).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no importer registered for {}", format))
        })?;

        log::debug!("Importing {} with {} importer", path.display(), importer.format_name());
        importer.import(path)
    }
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Identifier for a mesh file: its base name without the extension
///
/// Used for naming output images and for scene bookkeeping.
pub fn mesh_identifier(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::InvalidData(format!("cannot derive a mesh name from {}", path.display()))
        })
}
