use fs_err as fs;
use serde_json::to_string_pretty;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::StoreError;
use crate::wire::PlanRecord;

/// Location of a persisted plan artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanHandle(PathBuf);

impl PlanHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Flat directory of per-run plan files.
///
/// Artifacts are keyed by the record's second-resolution timestamp, so two
/// saves within the same second land on the same file and the later one wins.
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn plan_path(&self, timestamp: &str) -> PathBuf {
        self.dir.join(format!("plan_{timestamp}.json"))
    }

    pub fn debug_plan_path(&self, timestamp: &str) -> PathBuf {
        self.dir.join(format!("debug_plan_{timestamp}.md"))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
            debug!(dir = %self.dir.display(), "created plan directory");
        }
        Ok(())
    }

    pub fn save(&self, plan: &PlanRecord) -> Result<PlanHandle, StoreError> {
        self.ensure_dir()?;
        let handle = PlanHandle(self.plan_path(&plan.timestamp));
        self.write_record(&handle, plan)?;
        debug!(path = %handle.path().display(), "saved plan");
        Ok(handle)
    }

    /// Rewrite an existing artifact in place.
    pub fn overwrite(&self, handle: &PlanHandle, plan: &PlanRecord) -> Result<(), StoreError> {
        if !handle.path().is_file() {
            return Err(StoreError::NotFound(handle.path().to_path_buf()));
        }
        self.write_record(handle, plan)
    }

    pub fn load(&self, handle: &PlanHandle) -> Result<PlanRecord, StoreError> {
        let path = handle.path();
        let raw = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the human-facing debug plan next to the JSON artifacts. Never read back.
    pub fn save_debug_narrative(&self, plan: &PlanRecord) -> Result<PathBuf, StoreError> {
        self.ensure_dir()?;
        let path = self.debug_plan_path(&plan.timestamp);
        atomic_write(&path, debug_narrative(&plan.user_input).as_bytes())?;
        debug!(path = %path.display(), "saved debug plan");
        Ok(path)
    }

    fn write_record(&self, handle: &PlanHandle, plan: &PlanRecord) -> Result<(), StoreError> {
        let body = to_string_pretty(plan).map_err(StoreError::Serialize)?;
        atomic_write(handle.path(), body.as_bytes())?;
        Ok(())
    }
}

/// Temp file in the target's directory, then rename over the target.
/// Artifacts end up `0644` on unix, like a plain `File::create`.
fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn debug_narrative(error_description: &str) -> String {
    format!(
        "# Plan de Depuración
## Error Reportado
{error_description}

## Análisis Inicial
[Pendiente de aprobación]

## Pasos de Diagnóstico
[Pendiente de aprobación]

## Estrategia de Pruebas
[Pendiente de aprobación]

⚠️ Este plan requiere aprobación antes de proceder."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, UserInput};
    use crate::wire::{Mode, PlanStatus};
    use tempfile::TempDir;

    fn sample(mode: Mode) -> PlanRecord {
        build_plan(&UserInput::parse("Build a photo-sharing web app").unwrap(), mode)
    }

    #[test]
    fn test_save_creates_directory_on_first_use() {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path().join("nested").join("plans"));
        assert!(!store.dir().exists());

        let plan = sample(Mode::Development);
        let handle = store.save(&plan).unwrap();

        assert!(store.dir().is_dir());
        assert_eq!(
            handle.path().file_name().unwrap().to_str().unwrap(),
            format!("plan_{}.json", plan.timestamp)
        );
    }

    #[test]
    fn test_round_trip_preserves_status() {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path());
        for status in [PlanStatus::PendingValidation, PlanStatus::Validated, PlanStatus::Invalid] {
            let mut plan = sample(Mode::Debug);
            plan.status = status;
            let handle = store.save(&plan).unwrap();
            assert_eq!(store.load(&handle).unwrap(), plan);
        }
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path());
        let err = store
            .load(&PlanHandle::from_path(tmp.path().join("plan_nope.json")))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plan_bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = PlanStore::new(tmp.path());
        let err = store.load(&PlanHandle::from_path(&path)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_overwrite_requires_existing_artifact() {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path());
        let handle = PlanHandle::from_path(tmp.path().join("plan_missing.json"));
        let err = store.overwrite(&handle, &sample(Mode::Development)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_debug_narrative_content() {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path());
        let plan = sample(Mode::Debug);
        let path = store.save_debug_narrative(&plan).unwrap();

        assert_eq!(path, store.debug_plan_path(&plan.timestamp));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("# Plan de Depuración\n## Error Reportado\nBuild a photo-sharing web app\n"));
        assert_eq!(text.matches("[Pendiente de aprobación]").count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_artifacts_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path());
        let plan = sample(Mode::Debug);
        let handle = store.save(&plan).unwrap();
        let narrative = store.save_debug_narrative(&plan).unwrap();

        for path in [handle.path(), narrative.as_path()] {
            let mode = std::fs::metadata(path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644, "{}", path.display());
        }
    }
}
