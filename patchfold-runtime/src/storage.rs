#[cfg(feature = "fs")]
pub use fs_storage::FsStorage;
#[cfg(feature = "memory")]
pub use memory::InMemoryStorage;

#[cfg(feature = "fs")]
mod fs_storage {
    use crate::ports::Storage;
    use anyhow::Context;
    use camino::{Utf8Path, Utf8PathBuf};
    use fs_err as fs;
    use glob::{Pattern, glob};
    use tracing::debug;

    /// Filesystem-backed storage.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FsStorage;

    impl Storage for FsStorage {
        fn read(&self, path: &Utf8Path) -> anyhow::Result<Vec<u8>> {
            fs::read(path).with_context(|| format!("read {}", path))
        }

        fn write(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
            if let Some(parent) = path.parent()
                && !parent.as_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create parent dir for {}", path))?;
            }
            fs::write(path, contents).with_context(|| format!("write {}", path))
        }

        fn exists(&self, path: &Utf8Path) -> bool {
            path.exists()
        }

        fn remove(&self, path: &Utf8Path) -> anyhow::Result<()> {
            fs::remove_file(path).with_context(|| format!("remove {}", path))
        }

        fn list(&self, dir: &Utf8Path, extension: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
            let pattern = format!("{}/*.{}", Pattern::escape(dir.as_str()), extension);
            debug!(pattern = %pattern, "listing storage");

            let mut out = Vec::new();
            for entry in glob(&pattern).with_context(|| format!("glob {}", pattern))? {
                let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
                if !path.is_file() {
                    continue;
                }
                let utf8 = Utf8PathBuf::from_path_buf(path)
                    .map_err(|p| anyhow::anyhow!("non-utf8 path: {}", p.display()))?;
                out.push(utf8);
            }

            // Deterministic order matters.
            out.sort();
            Ok(out)
        }
    }

}

#[cfg(feature = "memory")]
mod memory {
    use crate::ports::Storage;
    use camino::{Utf8Path, Utf8PathBuf};
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    /// In-memory storage for embedding and testing.
    #[derive(Debug, Default)]
    pub struct InMemoryStorage {
        files: Mutex<BTreeMap<Utf8PathBuf, Vec<u8>>>,
    }

    impl InMemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: impl Into<Utf8PathBuf>, contents: impl AsRef<[u8]>) -> Self {
            self.files_mut()
                .insert(path.into(), contents.as_ref().to_vec());
            self
        }

        fn files_mut(&self) -> MutexGuard<'_, BTreeMap<Utf8PathBuf, Vec<u8>>> {
            match self.files.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    impl Storage for InMemoryStorage {
        fn read(&self, path: &Utf8Path) -> anyhow::Result<Vec<u8>> {
            self.files_mut()
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("read {}: not found", path))
        }

        fn write(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
            self.files_mut()
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }

        fn exists(&self, path: &Utf8Path) -> bool {
            self.files_mut().contains_key(path)
        }

        fn remove(&self, path: &Utf8Path) -> anyhow::Result<()> {
            self.files_mut()
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| anyhow::anyhow!("remove {}: not found", path))
        }

        fn list(&self, dir: &Utf8Path, extension: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
            // BTreeMap keys are already sorted.
            Ok(self
                .files_mut()
                .keys()
                .filter(|p| p.parent() == Some(dir) && p.extension() == Some(extension))
                .cloned()
                .collect())
        }
    }

}
