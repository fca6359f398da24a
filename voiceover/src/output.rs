use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::TtsError;

/// An audio file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub path: PathBuf,
    pub bytes: u64,
}

impl AudioFile {
    pub fn size_kb(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

impl fmt::Display for AudioFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} KB", self.size_kb())
    }
}

/// Persist synthesized audio. An empty buffer is rejected and nothing is created.
pub fn write_audio<P: AsRef<Path>>(path: P, audio: &[u8]) -> Result<AudioFile, TtsError> {
    let path = path.as_ref();
    if audio.is_empty() {
        return Err(TtsError::EmptyAudio);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TtsError::io(parent, e))?;
    }
    fs::write(path, audio).map_err(|e| TtsError::io(path, e))?;

    // Report what actually landed on disk
    let bytes = fs::metadata(path).map_err(|e| TtsError::io(path, e))?.len();
    Ok(AudioFile {
        path: path.to_path_buf(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_audio_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voiceover.mp3");
        let result = write_audio(&path, &[]);
        assert!(matches!(result, Err(TtsError::EmptyAudio)));
        assert!(!path.exists());
    }

    #[test]
    fn test_reported_size_matches_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/voiceover.mp3");
        let audio = vec![0xFFu8; 3 * 1024 + 512];

        let file = write_audio(&path, &audio).unwrap();
        assert_eq!(file.bytes, fs::metadata(&path).unwrap().len());
        assert_eq!(fs::read(&path).unwrap(), audio);
        assert_eq!(file.size_kb(), 3.5);
        assert_eq!(file.to_string(), "3.5 KB");
    }

    #[test]
    fn test_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voiceover.mp3");
        fs::write(&path, vec![1u8; 4096]).unwrap();

        let file = write_audio(&path, &[7u8; 10]).unwrap();
        assert_eq!(file.bytes, 10);
        assert_eq!(file.to_string(), "0.0 KB");
    }
}
