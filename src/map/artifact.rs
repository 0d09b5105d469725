use std::path::{Path, PathBuf};

/// A rendered output file
#[derive(Debug, Clone, PartialEq)]
pub struct MapArtifact {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl MapArtifact {
    pub fn html(path: impl Into<PathBuf>, html: String) -> Self {
        MapArtifact {
            path: path.into(),
            content_type: "text/html",
            bytes: html.into_bytes(),
        }
    }

    pub fn geojson(path: impl Into<PathBuf>, json: String) -> Self {
        MapArtifact {
            path: path.into(),
            content_type: "application/geo+json",
            bytes: json.into_bytes(),
        }
    }

    /// Write the artifact under `base` (or at its path, if absolute)
    ///
    /// Missing parent directories are created. Returns the written path.
    pub fn write_to(&self, base: &Path) -> std::io::Result<PathBuf> {
        let target = base.join(&self.path);
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&target, &self.bytes)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = MapArtifact::html("out/maps/quakes.html", "<html></html>".to_string());

        let written = artifact.write_to(dir.path()).unwrap();
        assert_eq!(written, dir.path().join("out/maps/quakes.html"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "<html></html>");
        assert_eq!(artifact.content_type, "text/html");
    }
}
