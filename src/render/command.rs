// src/render/command.rs
use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::{debug, info};

use super::ArtifactStore;
use crate::schedule::BookingRecord;

/// Videos on disk under `<video_dir>/<date>/<KEY>.mp4`, rendered by an
/// external program invoked as `<program> [args..] <KEY> <output>`.
///
/// Without a program the store only records what it would have rendered.
pub struct CommandStore {
    video_dir: PathBuf,
    template: PathBuf,
    program: Option<(PathBuf, Vec<String>)>,
    pending: Vec<PathBuf>,
}

impl CommandStore {
    pub fn new(video_dir: impl Into<PathBuf>, template: impl Into<PathBuf>) -> Self {
        Self {
            video_dir: video_dir.into(),
            template: template.into(),
            program: None,
            pending: Vec::new(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.program = Some((program.into(), args));
        self
    }

    pub fn artifact_path(&self, date: &str, key: &str) -> PathBuf {
        self.video_dir.join(date).join(format!("{}.mp4", key))
    }

    /// Outputs skipped because no render program is configured.
    pub fn pending(&self) -> &[PathBuf] {
        &self.pending
    }

    fn run(&self, program: &Path, args: &[String], key: &str, out: &Path) -> Result<()> {
        debug!(program = %program.display(), out = %out.display(), "spawning renderer");
        let status = Command::new(program)
            .args(args)
            .arg(key)
            .arg(out)
            .env("PARTYREEL_TEMPLATE", &self.template)
            .status()
            .with_context(|| format!("Failed to spawn renderer {:?}", program))?;
        if !status.success() {
            bail!("renderer {:?} exited with {}", program, status);
        }
        Ok(())
    }
}

impl ArtifactStore for CommandStore {
    fn exists(&self, date: &str, key: &str) -> bool {
        self.artifact_path(date, key).exists()
    }

    fn materialize(&mut self, date: &str, key: &str, _record: &BookingRecord) -> Result<()> {
        let out = self.artifact_path(date, key);
        let Some((program, args)) = &self.program else {
            info!("dry run: would render {} → {}", key, out.display());
            self.pending.push(out);
            return Ok(());
        };

        let dir = self.video_dir.join(date);
        fs::create_dir_all(&dir).with_context(|| format!("creating video dir {:?}", dir))?;
        self.run(program, args, key, &out)?;
        info!("Video saved for {} on {}", key, date);
        Ok(())
    }
}
