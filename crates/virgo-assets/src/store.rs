use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use virgo_glb::container::MAGIC;
use virgo_glb::GlbHeader;

use crate::error::AssetError;

/// Request paths must live under this prefix.
pub const MODELS_PREFIX: &str = "/models/";

/// Outcome of validating a model file. Serializes to the camelCase shape
/// the viewer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub exists: bool,
    pub is_valid: bool,
    pub size: Option<u64>,
    pub error: Option<String>,
}

impl ValidationReport {
    fn missing() -> Self {
        Self {
            exists: false,
            is_valid: false,
            size: None,
            error: Some("File not found".to_string()),
        }
    }
}

/// Check whether `bytes` start with the GLB magic.
pub fn inspect_bytes(bytes: &[u8]) -> ValidationReport {
    let is_valid = matches!(GlbHeader::read(bytes), Ok(header) if header.magic == MAGIC);
    ValidationReport {
        exists: true,
        is_valid,
        size: Some(bytes.len() as u64),
        error: (!is_valid).then(|| "Invalid GLB format".to_string()),
    }
}

/// Model files served from a public directory, addressed by `/models/...`
/// request paths.
pub struct ModelStore {
    base_path: PathBuf,
}

impl ModelStore {
    /// Create a store rooted at the given base path (the directory that
    /// contains `models/`).
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("ModelStore created with base path: {}", base_path.display());
        Self { base_path }
    }

    /// Map a `/models/...` request path onto the filesystem.
    fn resolve(&self, request_path: &str) -> Result<PathBuf, AssetError> {
        let Some(relative) = request_path.strip_prefix('/') else {
            return Err(AssetError::InvalidPath(request_path.to_string()));
        };
        if !request_path.starts_with(MODELS_PREFIX) {
            return Err(AssetError::InvalidPath(request_path.to_string()));
        }

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AssetError::InvalidPath(request_path.to_string()));
        }

        Ok(self.base_path.join(relative))
    }

    /// Validate the model at `request_path`. A missing file is reported,
    /// not treated as an error; a path outside `/models/` is an error.
    pub fn validate(&self, request_path: &str) -> Result<ValidationReport, AssetError> {
        let full_path = self.resolve(request_path)?;

        if !full_path.is_file() {
            debug!("Model not found: {}", full_path.display());
            return Ok(ValidationReport::missing());
        }

        let bytes = std::fs::read(&full_path).map_err(|e| AssetError::Io(full_path.clone(), e))?;
        let report = inspect_bytes(&bytes);
        debug!(
            "Validated {}: valid={} size={}",
            full_path.display(),
            report.is_valid,
            bytes.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virgo_glb::build_cube_glb;

    fn store_with(name: &str, bytes: &[u8]) -> (tempfile::TempDir, ModelStore) {
        let dir = tempfile::tempdir().unwrap();
        let models = dir.path().join("models");
        std::fs::create_dir_all(&models).unwrap();
        std::fs::write(models.join(name), bytes).unwrap();
        let store = ModelStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn fixture_is_valid() {
        let glb = build_cube_glb().unwrap();
        let (_dir, store) = store_with("sample-virgo.glb", &glb);

        let report = store.validate("/models/sample-virgo.glb").unwrap();
        assert!(report.exists);
        assert!(report.is_valid);
        assert_eq!(report.size, Some(glb.len() as u64));
        assert!(report.error.is_none());
    }

    #[test]
    fn non_glb_is_invalid() {
        let (_dir, store) = store_with("fake.glb", b"<html>not a model</html>");

        let report = store.validate("/models/fake.glb").unwrap();
        assert!(report.exists);
        assert!(!report.is_valid);
        assert_eq!(report.error.as_deref(), Some("Invalid GLB format"));
    }

    #[test]
    fn tiny_file_is_invalid() {
        let report = inspect_bytes(b"gl");
        assert!(!report.is_valid);
        assert_eq!(report.size, Some(2));
    }

    #[test]
    fn missing_file_is_reported() {
        let (_dir, store) = store_with("a.glb", b"");
        let report = store.validate("/models/b.glb").unwrap();
        assert_eq!(report, ValidationReport::missing());
    }

    #[test]
    fn paths_outside_models_rejected() {
        let store = ModelStore::new("/srv/public");
        for path in ["", "models/a.glb", "/textures/a.png", "/models/../secret.glb"] {
            match store.validate(path) {
                Err(AssetError::InvalidPath(p)) => assert_eq!(p, path),
                other => panic!("expected InvalidPath for {:?}, got: {:?}", path, other),
            }
        }
    }

    #[test]
    fn resolve_joins_base_path() {
        let store = ModelStore::new("/srv/public");
        assert_eq!(
            store.resolve("/models/box.glb").unwrap(),
            PathBuf::from("/srv/public/models/box.glb")
        );
    }

    #[test]
    fn report_serializes_camel_case() {
        let value = serde_json::to_value(inspect_bytes(b"glTF\x02\0\0\0\x0c\0\0\0")).unwrap();
        assert_eq!(value["isValid"], true);
        assert_eq!(value["size"], 12);
    }
}
