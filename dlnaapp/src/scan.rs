//! Parcours récursif d'un répertoire de contenu vers le VFS.

use std::path::Path;

use dlnaprofiler::ProfilerRegistry;
use dlnavfs::SharedVfs;
use tracing::{debug, warn};

/// Ajoute récursivement `dir` sous le container `parent_id` : un
/// container par sous-répertoire, une ressource par fichier profilable.
/// Les entrées cachées sont ignorées, les fichiers non reconnus sont
/// journalisés et passés. Retourne le nombre de ressources ajoutées.
pub fn add_dir(registry: &ProfilerRegistry, vfs: &SharedVfs, dir: &Path, parent_id: u32) -> usize {
    let mut added = 0;

    let Ok(entries) = std::fs::read_dir(dir) else {
        warn!("cannot read directory {}", dir.display());
        return 0;
    };
    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();

        if path.is_dir() {
            let container_id = vfs
                .lock()
                .add_container(&path.to_string_lossy(), 0, parent_id);
            added += add_dir(registry, vfs, &path, container_id);
        } else {
            let url = path.to_string_lossy().to_string();
            match registry.create_item(&url) {
                Ok(item) => {
                    vfs.lock().add_resource(&name.to_string_lossy(), item, parent_id);
                    added += 1;
                }
                Err(e) => {
                    debug!("skipping {}: {}", url, e);
                }
            }
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlnavfs::{Vfs, VfsMode, shared};
    use std::io::Write;

    #[test]
    fn test_scan_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("album");
        std::fs::create_dir(&sub).unwrap();
        for name in ["a.mp3", "b.xyz", ".hidden.mp3"] {
            let mut file = std::fs::File::create(sub.join(name)).unwrap();
            file.write_all(b"x").unwrap();
        }

        let registry = ProfilerRegistry::new();
        let vfs = shared(Vfs::new(VfsMode::default()));
        let added = add_dir(&registry, &vfs, dir.path(), 0);

        // seul a.mp3 est profilable et visible
        assert_eq!(added, 1);
        let guard = vfs.lock();
        let album = guard.get_by_name("album").unwrap();
        assert_eq!(album.as_container().unwrap().children.len(), 1);
    }
}
