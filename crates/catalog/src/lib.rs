use std::{
    fs, io,
    path::{Path, PathBuf},
};

use shared::domain::{Catalog, ModelActions, ModelId};
use tracing::{debug, warn};

pub mod descriptor;

pub use descriptor::{Descriptor, DescriptorError};

/// Folder inside each model directory holding playable clips.
pub const SOUNDS_DIR: &str = "sounds";

const AUDIO_EXTENSIONS: [&str; 3] = ["wav", "mp3", "ogg"];

/// Query surface over the installed model bundles. Holds no state besides
/// the root path; every call rescans.
#[derive(Debug, Clone)]
pub struct CatalogService {
    root: PathBuf,
}

impl CatalogService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list_resources(&self) -> Catalog {
        scan(&self.root)
    }
}

/// Builds a fresh catalog from `root`.
///
/// A missing root means nothing is installed and yields an empty catalog.
/// Failures inside one model directory are logged and only drop that
/// model's `actions` entry; the model still shows up in `models`.
pub fn scan(root: &Path) -> Catalog {
    let mut catalog = Catalog::default();

    let models = match list_model_dirs(root) {
        Ok(models) => models,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "resources root does not exist");
            return catalog;
        }
        Err(error) => {
            warn!(root = %root.display(), %error, "failed to list resources root");
            return catalog;
        }
    };

    for (model, model_dir) in models {
        if let Some(actions) = scan_model(&model, &model_dir) {
            catalog.actions.insert(model.clone(), actions);
        }
        catalog.models.push(model);
    }

    catalog
}

// Names that are not valid UTF-8 are listed lossily; the real path is kept
// so their bundle still resolves.
fn list_model_dirs(root: &Path) -> io::Result<Vec<(ModelId, PathBuf)>> {
    let mut models = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(root = %root.display(), %error, "skipping unreadable directory entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        // `fs::metadata` follows symlinks, so linked model folders count.
        let path = entry.path();
        if fs::metadata(&path).is_ok_and(|meta| meta.is_dir()) {
            models.push((ModelId(name), path));
        }
    }
    models.sort();
    Ok(models)
}

fn scan_model(model: &ModelId, model_dir: &Path) -> Option<ModelActions> {
    let descriptor_path = model_dir.join(model.descriptor_file_name());
    if !descriptor_path.is_file() {
        debug!(%model, path = %descriptor_path.display(), "model has no descriptor");
        return None;
    }

    let descriptor = match Descriptor::load(&descriptor_path) {
        Ok(descriptor) => descriptor,
        Err(error) => {
            warn!(%model, path = %descriptor_path.display(), %error, "skipping model");
            return None;
        }
    };

    Some(ModelActions {
        motions: descriptor.motions,
        expressions: descriptor.expressions,
        sounds: scan_sounds(model, &model_dir.join(SOUNDS_DIR)),
    })
}

/// Lists audio clips directly under `sounds_dir` as `sounds/<file>`.
fn scan_sounds(model: &ModelId, sounds_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(sounds_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(error) => {
            warn!(%model, path = %sounds_dir.display(), %error, "failed to scan sounds");
            return Vec::new();
        }
    };

    let mut sounds: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| !kind.is_dir()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| is_audio_file(name))
        .collect();
    sounds.sort();
    sounds
        .into_iter()
        .map(|name| format!("{SOUNDS_DIR}/{name}"))
        .collect()
}

pub fn is_audio_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|audio| ext.eq_ignore_ascii_case(audio))
        })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
