//! TOML persistence for the last paired target.
//!
//! The relay remembers the most recent successful pairing so `stream` and
//! `click` work without re-scanning:
//!
//! - Windows:  `%APPDATA%\GyroPoint\cache.toml`
//! - Linux:    `~/.config/gyropoint/cache.toml`
//! - macOS:    `~/Library/Application Support/GyroPoint/cache.toml`
//!
//! A missing file is not an error; it just means nothing has been paired
//! yet.  The cached string is stored as scanned and re-validated on use,
//! so a stale or hand-edited entry fails at parse time, not here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for pairing-cache file operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing pairing cache at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse pairing cache TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The cache could not be serialized to TOML.
    #[error("failed to serialize pairing cache: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// On-disk pairing state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairingCache {
    /// The last successfully parsed target, rendered as `host:port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_target: Option<String>,
}

// ── Cache repository ──────────────────────────────────────────────────────────

/// Resolves the full path to the cache file.
///
/// # Errors
///
/// Returns [`CacheError::NoPlatformConfigDir`] if the base directory cannot
/// be determined from the environment.
pub fn cache_file_path() -> Result<PathBuf, CacheError> {
    let dir = platform_config_dir().ok_or(CacheError::NoPlatformConfigDir)?;
    Ok(dir.join("cache.toml"))
}

/// Loads the pairing cache, returning `PairingCache::default()` if the file
/// does not yet exist.
///
/// # Errors
///
/// Returns [`CacheError::Io`] for file-system errors other than "not
/// found", and [`CacheError::Parse`] if the TOML is malformed.
pub fn load_cache() -> Result<PairingCache, CacheError> {
    load_from(&cache_file_path()?)
}

/// Persists `cache` to the platform cache file, creating the directory if
/// needed.
///
/// # Errors
///
/// Returns [`CacheError::Io`] or [`CacheError::Serialize`] on failure.
pub fn save_cache(cache: &PairingCache) -> Result<(), CacheError> {
    save_to(&cache_file_path()?, cache)
}

/// Loads a cache from an explicit path (the testable core of [`load_cache`]).
pub fn load_from(path: &Path) -> Result<PairingCache, CacheError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PairingCache::default()),
        Err(source) => Err(CacheError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes a cache to an explicit path (the testable core of [`save_cache`]).
pub fn save_to(path: &Path, cache: &PairingCache) -> Result<(), CacheError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| CacheError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(cache)?;
    std::fs::write(path, content).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("GyroPoint"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("gyropoint"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("GyroPoint")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("gyropoint_test_{tag}_{}", std::process::id()))
            .join("cache.toml")
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/cache.toml");
        let cache = load_from(&path).unwrap();
        assert_eq!(cache, PairingCache::default());
        assert!(cache.last_target.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        // Arrange
        let path = temp_cache_path("round_trip");
        let cache = PairingCache {
            last_target: Some("192.168.1.10:49152".to_string()),
        };

        // Act
        save_to(&path, &cache).unwrap();
        let loaded = load_from(&path).unwrap();

        // Assert
        assert_eq!(loaded, cache);

        // Cleanup
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_empty_cache_serializes_without_last_target_key() {
        let toml_str = toml::to_string_pretty(&PairingCache::default()).unwrap();
        assert!(
            !toml_str.contains("last_target"),
            "None must be omitted, got: {toml_str}"
        );
    }

    #[test]
    fn test_load_from_malformed_toml_is_a_parse_error() {
        // Arrange
        let path = temp_cache_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_from(&path);

        // Assert
        assert!(matches!(result, Err(CacheError::Parse(_))));

        // Cleanup
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_save_to_creates_missing_directories() {
        let base = std::env::temp_dir().join(format!("gyropoint_test_mkdirs_{}", std::process::id()));
        let path = base.join("deeply").join("nested").join("cache.toml");
        let cache = PairingCache {
            last_target: Some("10.0.0.1:9000".to_string()),
        };
        save_to(&path, &cache).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&base).ok();
    }

    #[test]
    fn test_cache_file_path_ends_with_cache_toml() {
        if let Ok(path) = cache_file_path() {
            assert!(path.ends_with("cache.toml"));
        }
        // NoPlatformConfigDir in a stripped environment is also acceptable.
    }
}
