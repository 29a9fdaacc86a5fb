//! Surface materials pushed as shader uniforms.

use std::fs;
use std::path::Path;

/// Phong-style material coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub shininess: f32,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl Material {
    pub fn new(shininess: f32, ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            shininess,
            ambient,
            diffuse,
            specular,
        }
    }

    pub fn metal() -> Self {
        Self::new(128.0, 0.1, 0.6, 1.0)
    }

    pub fn rubber() -> Self {
        Self::new(8.0, 0.3, 0.9, 0.1)
    }

    pub fn plastic() -> Self {
        Self::new(32.0, 0.2, 0.8, 0.5)
    }

    pub fn stone() -> Self {
        Self::new(4.0, 0.3, 0.7, 0.1)
    }

    pub fn gold() -> Self {
        Self::new(256.0, 0.25, 0.4, 1.0)
    }

    /// Load coefficients from a Wavefront MTL file.
    ///
    /// Any read or parse failure logs and falls back to the plastic default:
    /// a missing material file means a bland object, not a dead scene.
    pub fn from_mtl(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse_mtl(&text),
            Err(err) => {
                log::warn!("failed to read MTL {}: {err}", path.display());
                Self::plastic()
            }
        }
    }

    fn parse_mtl(text: &str) -> Self {
        let mut material = Self::plastic();
        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let Some(prefix) = fields.next() else { continue };
            // Ka/Kd/Ks are RGB in the file; the lighting model here is
            // scalar, so the first channel carries the coefficient.
            let first = fields.next().and_then(|v| v.parse::<f32>().ok());
            match (prefix, first) {
                ("Ns", Some(v)) => material.shininess = v,
                ("Ka", Some(v)) => material.ambient = v,
                ("Kd", Some(v)) => material.diffuse = v,
                ("Ks", Some(v)) => material.specular = v,
                _ => {}
            }
        }
        material
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::plastic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coefficients() {
        let mtl = "newmtl mole\nNs 64.0\nKa 0.15 0.15 0.15\nKd 0.7 0.6 0.5\nKs 0.9 0.9 0.9\n";
        let material = Material::parse_mtl(mtl);
        assert_eq!(material.shininess, 64.0);
        assert_eq!(material.ambient, 0.15);
        assert_eq!(material.diffuse, 0.7);
        assert_eq!(material.specular, 0.9);
    }

    #[test]
    fn garbage_lines_are_ignored() {
        let mtl = "# comment\nNs not-a-number\nillum 2\nKd 0.5 0.5 0.5\n";
        let material = Material::parse_mtl(mtl);
        assert_eq!(material.diffuse, 0.5);
        // Unparsable Ns keeps the default.
        assert_eq!(material.shininess, Material::plastic().shininess);
    }

    #[test]
    fn missing_file_degrades_to_plastic() {
        let material = Material::from_mtl(Path::new("/nonexistent/mole.mtl"));
        assert_eq!(material, Material::plastic());
    }
}
