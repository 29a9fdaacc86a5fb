//! Asset resolution for scene init.
//!
//! Scenes carry embedded fallback shader sources so the demo runs with no
//! files on disk; pointing [`Assets`] at a root directory overrides them,
//! which is how you iterate on shader text without recompiling. All disk
//! failures degrade: a missing override falls back to the embedded source, a
//! missing material falls back to the plastic default, and both are logged.

use std::fs;
use std::path::PathBuf;

use crate::material::Material;

/// Resolves shader sources and materials, preferring an optional on-disk
/// root over embedded fallbacks.
#[derive(Clone, Debug, Default)]
pub struct Assets {
    root: Option<PathBuf>,
}

impl Assets {
    /// Resolver with no disk root; embedded fallbacks only.
    pub fn embedded() -> Self {
        Self { root: None }
    }

    /// Resolver that checks `root` first.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    /// Shader source text for `name` (e.g. `"frag_lambert.glsl"`).
    ///
    /// Returns the on-disk override when present and readable, otherwise the
    /// embedded fallback. Read failures are logged with the path.
    pub fn shader_source(&self, name: &str, embedded: &str) -> String {
        if let Some(root) = &self.root {
            let path = root.join(name);
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(source) => return source,
                    Err(err) => {
                        log::error!("failed to read shader {}: {err}", path.display());
                        return String::new();
                    }
                }
            }
        }
        embedded.to_owned()
    }

    /// Material for `name`, falling back to plastic when no root is set or
    /// the file is unusable.
    pub fn material(&self, name: &str) -> Material {
        match &self.root {
            Some(root) => Material::from_mtl(&root.join(name)),
            None => Material::plastic(),
        }
    }
}
