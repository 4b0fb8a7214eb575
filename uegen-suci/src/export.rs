//! YAML export of generated profiles

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use uegen_common::Error;

use crate::operator::UeProfile;

/// Write any serializable value as YAML, creating parent directories.
pub fn export_yaml<T, P>(path: P, value: &T) -> Result<(), Error>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(value)?;
    fs::write(path, yaml)?;
    debug!("Exported YAML to {}", path.display());
    Ok(())
}

/// Write one `<supi>.yaml` per profile into `dir`.
///
/// Returns the written paths in profile order.
pub fn export_profiles<P: AsRef<Path>>(
    dir: P,
    profiles: &[UeProfile],
) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    profiles
        .iter()
        .map(|profile| -> Result<PathBuf, Error> {
            let path = dir.join(format!("{}.yaml", profile.supi));
            export_yaml(&path, profile)?;
            Ok(path)
        })
        .collect()
}
