use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use comms::event::{JoinedRoom, User};
use serde::{Deserialize, Serialize};

use crate::state_store::Settings;

/// Everything that outlives a run of the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredData {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub room: Option<JoinedRoom>,
    pub settings: Option<Settings>,
}

/// A JSON file holding [StoredData], rewritten on every change
pub struct LocalStorage {
    path: PathBuf,
    data: StoredData,
}

impl LocalStorage {
    /// Loads the file at `path`, a missing file is an empty storage
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("could not read storage file '{}'", path.display()))?;

            match serde_json::from_str(&raw) {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring unreadable storage file");
                    StoredData::default()
                }
            }
        } else {
            StoredData::default()
        };

        Ok(LocalStorage { path, data })
    }

    pub fn data(&self) -> &StoredData {
        &self.data
    }

    pub fn set_room(&mut self, room: Option<JoinedRoom>) -> anyhow::Result<()> {
        if self.data.room == room {
            return Ok(());
        }

        self.data.room = room;
        self.flush()
    }

    pub fn set_settings(&mut self, settings: Settings) -> anyhow::Result<()> {
        if self.data.settings.as_ref() == Some(&settings) {
            return Ok(());
        }

        self.data.settings = Some(settings);
        self.flush()
    }

    /// Keeps the id and the name of the user, the life total is not kept
    pub fn set_identity(&mut self, user: &User) -> anyhow::Result<()> {
        if self.data.user_id.as_deref() == Some(user.id.as_str())
            && self.data.name.as_deref() == Some(user.name.as_str())
        {
            return Ok(());
        }

        self.data.user_id = Some(user.id.clone());
        self.data.name = Some(user.name.clone());
        self.flush()
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create '{}'", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("could not write storage file '{}'", self.path.display()))?;

        Ok(())
    }
}
