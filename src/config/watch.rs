//! Live reload of the configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::Config;

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    ConfigFileChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Keeps the underlying file watcher alive. Dropping it stops reloads.
#[derive(Debug)]
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Watch `path` and send a freshly loaded [`Config`] every time it changes.
///
/// The file's directory is watched, so the file itself may be created later.
/// A change that fails to load is logged and skipped.
pub fn watch(path: &Path) -> Result<(ConfigWatcher, mpsc::UnboundedReceiver<Config>)> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let file_name = path
        .file_name()
        .with_context(|| format!("Config path has no file name: {}", path.display()))?
        .to_os_string();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    for changed in event.paths {
                        if changed.file_name() == Some(file_name.as_os_str()) {
                            let _ = event_tx.send(WatcherEvent::ConfigFileChanged(changed));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = event_tx.send(WatcherEvent::WatcherError(e));
            }
        },
        notify::Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch config directory: {}", dir.display()))?;
    log::debug!("Watching {} for configuration changes", path.display());

    let (config_tx, config_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                WatcherEvent::ConfigFileChanged(path) => match Config::load_file(&path) {
                    Ok(config) => {
                        if config_tx.send(config).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("Keeping previous configuration: {:#}", e);
                    }
                },
                WatcherEvent::WatcherError(e) => {
                    log::error!("Config file watcher error: {}", e);
                }
            }
        }
    });

    Ok((
        ConfigWatcher {
            _watcher: watcher,
            path: path.to_path_buf(),
        },
        config_rx,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope").join("config.toml");
        assert!(watch(&path).is_err());
    }
}
