//! Virgo - cube GLB fixture generator
//!
//! Writes `sample-virgo.glb`, a minimal binary glTF file holding a single
//! cube mesh, and reports its size.

mod settings;

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use settings::GeneratorSettings;
use virgo_assets::{inspect_bytes, load_glb};
use virgo_glb::{build_cube_glb, Glb};

/// Fixture location relative to the working directory
const OUTPUT_PATH: &str = "public/models/sample-virgo.glb";

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the result line
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let settings = GeneratorSettings::load();
    let output = Path::new(OUTPUT_PATH);

    let glb = build_cube_glb().context("Failed to encode cube GLB")?;
    write_fixture(output, &glb)?;

    if settings.verify {
        verify_fixture(output, glb.len())?;
    }

    println!(
        "Generated valid GLB file: {} ({} bytes)",
        output.display(),
        glb.len()
    );
    Ok(())
}

/// Write the fixture, creating missing parent directories.
fn write_fixture(path: &Path, glb: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, glb).with_context(|| format!("Failed to write GLB to {}", path.display()))?;
    info!("Wrote {} bytes to {}", glb.len(), path.display());
    Ok(())
}

/// Read the written file back and check it end to end.
fn verify_fixture(path: &Path, expected_len: usize) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read back {}", path.display()))?;
    ensure!(
        bytes.len() == expected_len,
        "{} holds {} bytes, expected {}",
        path.display(),
        bytes.len(),
        expected_len
    );

    let report = inspect_bytes(&bytes);
    ensure!(report.is_valid, "{} does not start with the glTF magic", path.display());

    Glb::from_slice(&bytes).context("GLB container check failed")?;

    let contents = load_glb(path).context("glTF import of the fixture failed")?;
    let (vertices, triangles) = contents
        .meshes
        .iter()
        .flat_map(|m| &m.primitives)
        .fold((0, 0), |(v, t), p| (v + p.positions.len(), t + p.triangle_count()));
    info!(
        "Verified {}: {} meshes, {} vertices, {} triangles",
        path.display(),
        contents.meshes.len(),
        vertices,
        triangles
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_is_fixed() {
        assert_eq!(Path::new(OUTPUT_PATH), Path::new("public/models/sample-virgo.glb"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/models/sample-virgo.glb");
        let glb = build_cube_glb().unwrap();

        write_fixture(&path, &glb).unwrap();
        assert_eq!(fs::read(&path).unwrap(), glb);
        verify_fixture(&path, glb.len()).unwrap();
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample-virgo.glb");

        write_fixture(&path, &build_cube_glb().unwrap()).unwrap();
        let first = fs::read(&path).unwrap();
        write_fixture(&path, &build_cube_glb().unwrap()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file cannot be used as a parent directory.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = write_fixture(&blocker.join("out.glb"), &[0u8; 4]).unwrap_err();
        assert!(err.to_string().contains("Failed to create directory"));
    }

    #[test]
    fn test_verify_rejects_foreign_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.glb");
        fs::write(&path, b"not a glb").unwrap();

        assert!(verify_fixture(&path, 9).is_err());
    }
}
