use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::{ClipPlayer, MotionClip};
use crate::errors::{MocapError, Result};

/// Receives finished clips and starts their playback.
pub trait ClipLibrary {
    /// Stores `clip`, replacing any clip with the same name.
    fn store(&mut self, clip: MotionClip) -> Result<()>;

    /// Starts playing the named clip.
    fn play(&mut self, name: &str) -> Result<()>;

    /// Player of the clip started by the last [`play`](Self::play).
    fn active_player(&self) -> Option<&ClipPlayer>;

    fn active_player_mut(&mut self) -> Option<&mut ClipPlayer>;
}

/// In-memory clip table with a single active player.
#[derive(Debug, Default)]
pub struct MemoryClipLibrary {
    clips: FxHashMap<String, Arc<MotionClip>>,
    player: Option<ClipPlayer>,
}

impl MemoryClipLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<MotionClip>> {
        self.clips.get(name).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn insert(&mut self, clip: MotionClip) -> Arc<MotionClip> {
        let clip = Arc::new(clip);
        self.clips.insert(clip.name.clone(), Arc::clone(&clip));
        clip
    }

    /// Player started by the last [`play`](ClipLibrary::play).
    #[must_use]
    pub fn player(&self) -> Option<&ClipPlayer> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut ClipPlayer> {
        self.player.as_mut()
    }

    pub fn stop(&mut self) {
        self.player = None;
    }
}

impl ClipLibrary for MemoryClipLibrary {
    fn store(&mut self, clip: MotionClip) -> Result<()> {
        self.insert(clip);
        Ok(())
    }

    fn play(&mut self, name: &str) -> Result<()> {
        match self.clips.get(name) {
            Some(clip) => {
                self.player = Some(ClipPlayer::new(Arc::clone(clip)));
                Ok(())
            }
            None => Err(MocapError::ClipNotFound(name.to_string())),
        }
    }

    fn active_player(&self) -> Option<&ClipPlayer> {
        self.player.as_ref()
    }

    fn active_player_mut(&mut self) -> Option<&mut ClipPlayer> {
        self.player.as_mut()
    }
}

/// Writes each clip to `<dir>/<name>.json` and keeps it loaded for playback.
#[derive(Debug)]
pub struct JsonClipLibrary {
    dir: PathBuf,
    loaded: MemoryClipLibrary,
}

impl JsonClipLibrary {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            loaded: MemoryClipLibrary::new(),
        }
    }

    #[must_use]
    pub fn clip_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Reads a clip from disk and makes it available for playback.
    pub fn load(&mut self, name: &str) -> Result<Arc<MotionClip>> {
        let text = std::fs::read_to_string(self.clip_path(name))?;
        let clip = MotionClip::from_json(&text)?;
        Ok(self.loaded.insert(clip))
    }

    #[must_use]
    pub fn loaded(&self) -> &MemoryClipLibrary {
        &self.loaded
    }

    pub fn loaded_mut(&mut self) -> &mut MemoryClipLibrary {
        &mut self.loaded
    }
}

impl ClipLibrary for JsonClipLibrary {
    fn store(&mut self, clip: MotionClip) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.clip_path(&clip.name), clip.to_json()?)?;
        log::info!("Saved clip '{}' to {}", clip.name, self.dir.display());
        self.loaded.insert(clip);
        Ok(())
    }

    fn play(&mut self, name: &str) -> Result<()> {
        if self.loaded.get(name).is_none() {
            self.load(name)?;
        }
        self.loaded.play(name)
    }

    fn active_player(&self) -> Option<&ClipPlayer> {
        self.loaded.active_player()
    }

    fn active_player_mut(&mut self) -> Option<&mut ClipPlayer> {
        self.loaded.active_player_mut()
    }
}
