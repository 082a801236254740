use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mines_core::PlayerStats;
use parking_lot::Mutex;

use crate::{PlayerId, StoreError};

type StatsTable = BTreeMap<PlayerId, PlayerStats>;

#[derive(Debug, Default)]
struct Inner {
    players: StatsTable,
    /// Set while the file lags behind `players`.
    dirty: bool,
}

/// Per-player totals of finished games, optionally backed by a JSON file.
#[derive(Debug)]
pub struct StatsStore {
    path: Option<PathBuf>,
    inner: Mutex<Inner>,
}

impl StatsStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: Mutex::default(),
        }
    }

    /// Reads the store at `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let players = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Format {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No stats file at {}, starting empty", path.display());
                StatsTable::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        log::debug!("Loaded stats of {} players", players.len());
        Ok(Self {
            path: Some(path),
            inner: Mutex::new(Inner {
                players,
                dirty: false,
            }),
        })
    }

    /// Like [`Self::load`], but an unreadable store starts empty instead of failing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(path.clone()) {
            Ok(store) => store,
            Err(err) => {
                log::error!("Could not load stats, starting empty: {:?}", err);
                Self {
                    path: Some(path),
                    inner: Mutex::default(),
                }
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Zero stats for players without a finished game.
    pub fn get(&self, player: &PlayerId) -> PlayerStats {
        self.inner
            .lock()
            .players
            .get(player)
            .copied()
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> BTreeMap<PlayerId, PlayerStats> {
        self.inner.lock().players.clone()
    }

    /// Accounts one finished game and flushes. A failed flush is logged and retried on the next call.
    pub fn record_result(&self, player: &PlayerId, won: bool, cells_revealed: u64) -> PlayerStats {
        let mut inner = self.inner.lock();
        let stats = inner.players.entry(player.clone()).or_default();
        stats.record(won, cells_revealed);
        let updated = *stats;
        inner.dirty = true;

        if let Err(err) = self.flush(&mut inner) {
            log::warn!("Stats not saved, will retry on next result: {:?}", err);
        }
        updated
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        self.flush(&mut inner)
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.lock().dirty
    }

    fn flush(&self, inner: &mut Inner) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            inner.dirty = false;
            return Ok(());
        };

        write_table(path, &inner.players)?;
        inner.dirty = false;
        log::debug!("Saved stats of {} players to {}", inner.players.len(), path.display());
        Ok(())
    }
}

/// Writes next to `path` and renames, so readers never see a partial file.
fn write_table(path: &Path, players: &StatsTable) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(players).map_err(|source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp_path = OsString::from(path.as_os_str());
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    fs::write(&tmp_path, json).map_err(io_error)?;
    fs::rename(&tmp_path, path).map_err(|err| {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            log::warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        io_error(err)
    })
}
