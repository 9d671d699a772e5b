use std::path::PathBuf;

use quill_config::QuillConfig;
use quill_schema::SchemaRegistry;
use quill_store::{FsStore, TrailWriter};

use crate::cli::GlobalFlags;

const LOCKS_DIR: &str = ".locks";
const TRAIL_DIR: &str = "trail";

/// Everything a store-backed command needs.
pub struct AppContext {
    pub root: PathBuf,
    pub config: QuillConfig,
    pub store: FsStore,
    pub schema: SchemaRegistry,
}

impl AppContext {
    /// `--root` wins over `storage.root`. Nothing is created on disk.
    #[must_use]
    pub fn init(flags: &GlobalFlags, config: QuillConfig) -> Self {
        let root = flags
            .root
            .as_ref()
            .map_or_else(|| PathBuf::from(&config.storage.root), PathBuf::from);
        tracing::debug!(root = %root.display(), "using store root");

        Self {
            store: FsStore::new(&root),
            schema: SchemaRegistry::new(),
            root,
            config,
        }
    }

    #[must_use]
    pub fn locks_dir(&self) -> PathBuf {
        self.root.join(LOCKS_DIR)
    }

    #[must_use]
    pub fn trail_dir(&self) -> PathBuf {
        self.root.join(TRAIL_DIR)
    }

    /// Trail writer for this root, or a disabled one.
    pub fn trail(&self, enabled: bool) -> anyhow::Result<TrailWriter> {
        if enabled {
            Ok(TrailWriter::new(self.trail_dir())?)
        } else {
            Ok(TrailWriter::disabled())
        }
    }
}
