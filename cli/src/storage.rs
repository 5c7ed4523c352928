use std::{
    fs,
    path::{Path, PathBuf},
};

use reviewflow_shared::session::CredentialStorage;

const TOKEN_FILE: &str = "admin_token";

/// `~/.reviewflow`, or `./.reviewflow` when no home directory is known.
pub fn default_state_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".reviewflow")
}

/// Admin token persisted as a single file so it survives between invocations.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(TOKEN_FILE),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStorage for FileStorage {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn store(&self, token: &str) {
        let written = self
            .path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&self.path, token));
        if let Err(err) = written {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to store admin token");
        }
    }

    fn remove(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {},
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {},
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove admin token")
            },
        }
    }
}
