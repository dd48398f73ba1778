//! Packaging: descriptor generation and artifact archiving.

use std::fs::File;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use railyard_config::Manifest;
use railyard_util::fs::ensure_dir;
use railyard_util::maven::validate_part;

use crate::descriptor::BuildDescriptor;
use crate::error::EngineError;

/// Produce the descriptor file and the artifact for one library.
///
/// The descriptor (`pom.xml`) lands at the fixed nested path inside the
/// staging directory mirroring the remote repository layout; it is parsed
/// back before use so a malformed descriptor can never ship. The artifact
/// is a gzipped tar of the library's `src/` directory (plus `resources/`
/// when present) at the deterministic path derived from name + version.
///
/// # Errors
/// Returns `EngineError::Package` when the source directory is missing or
/// the generated descriptor does not parse, and I/O errors otherwise.
pub fn package_library(descriptor: &BuildDescriptor) -> Result<(), EngineError> {
    let manifest = if descriptor.manifest_path.exists() {
        Manifest::from_path(&descriptor.manifest_path)?
    } else {
        Manifest::default()
    };

    write_descriptor(descriptor, &manifest)?;
    write_archive(descriptor)?;
    Ok(())
}

fn write_descriptor(
    descriptor: &BuildDescriptor,
    manifest: &Manifest,
) -> Result<(), EngineError> {
    let pom = render_pom(descriptor, manifest)?;

    // A descriptor that does not parse must never reach a store.
    roxmltree::Document::parse(&pom).map_err(|e| EngineError::Package {
        path: descriptor.descriptor_path.display().to_string(),
        message: format!("generated descriptor does not parse: {e}"),
    })?;

    if let Some(parent) = descriptor.descriptor_path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(&descriptor.descriptor_path, pom).map_err(|source| EngineError::Io {
        path: descriptor.descriptor_path.display().to_string(),
        source,
    })
}

/// Render the Maven-layout descriptor. Coordinate parts are restricted to
/// path-safe characters, so no XML escaping is needed — anything else is
/// rejected.
fn render_pom(descriptor: &BuildDescriptor, manifest: &Manifest) -> Result<String, EngineError> {
    let coordinate = &descriptor.artifact.coordinate;

    let mut pom = String::new();
    pom.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    pom.push_str("<project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n");
    pom.push_str("  <modelVersion>4.0.0</modelVersion>\n");
    pom.push_str(&format!("  <groupId>{}</groupId>\n", coordinate.group_id));
    pom.push_str(&format!(
        "  <artifactId>{}</artifactId>\n",
        coordinate.artifact_id
    ));
    pom.push_str(&format!(
        "  <version>{}</version>\n",
        descriptor.artifact.version
    ));
    pom.push_str(&format!(
        "  <packaging>{}</packaging>\n",
        descriptor.artifact.packaging
    ));

    if !manifest.dependencies.is_empty() {
        pom.push_str("  <dependencies>\n");
        for (coordinate_str, version) in &manifest.dependencies {
            let dep = railyard_util::maven::Coordinate::parse(coordinate_str)?;
            validate_part(version)?;
            pom.push_str("    <dependency>\n");
            pom.push_str(&format!("      <groupId>{}</groupId>\n", dep.group_id));
            pom.push_str(&format!(
                "      <artifactId>{}</artifactId>\n",
                dep.artifact_id
            ));
            pom.push_str(&format!("      <version>{version}</version>\n"));
            pom.push_str("    </dependency>\n");
        }
        pom.push_str("  </dependencies>\n");
    }

    pom.push_str("</project>\n");
    Ok(pom)
}

fn write_archive(descriptor: &BuildDescriptor) -> Result<(), EngineError> {
    if !descriptor.src_dir.is_dir() {
        return Err(EngineError::Package {
            path: descriptor.lib_dir.display().to_string(),
            message: "library has no src directory".to_owned(),
        });
    }

    if let Some(parent) = descriptor.artifact_path.parent() {
        ensure_dir(parent)?;
    }
    let file = File::create(&descriptor.artifact_path).map_err(|source| EngineError::Io {
        path: descriptor.artifact_path.display().to_string(),
        source,
    })?;

    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    append_tree(&mut archive, "src", &descriptor.src_dir, descriptor)?;
    if descriptor.resources_dir.is_dir() {
        append_tree(
            &mut archive,
            "resources",
            &descriptor.resources_dir,
            descriptor,
        )?;
    }

    let encoder = archive.into_inner().map_err(|source| EngineError::Io {
        path: descriptor.artifact_path.display().to_string(),
        source,
    })?;
    encoder.finish().map_err(|source| EngineError::Io {
        path: descriptor.artifact_path.display().to_string(),
        source,
    })?;
    Ok(())
}

fn append_tree<W: std::io::Write>(
    archive: &mut tar::Builder<W>,
    name: &str,
    dir: &Path,
    descriptor: &BuildDescriptor,
) -> Result<(), EngineError> {
    archive
        .append_dir_all(name, dir)
        .map_err(|source| EngineError::Io {
            path: descriptor.artifact_path.display().to_string(),
            source,
        })
}
