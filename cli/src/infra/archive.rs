//! Archive infrastructure: implements `ArchiveExtractor` with `tar`,
//! `flate2` and `zip`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::ArchiveExtractor;
use crate::domain::ExtractError;

/// Unpacks packages with native decoders.
pub struct NativeExtractor;

impl ArchiveExtractor for NativeExtractor {
    fn extract_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()> {
        unpack_tar_gz(archive, dest)?;
        Ok(())
    }

    fn extract_zip(&self, archive: &Path, dest: &Path) -> Result<usize> {
        Ok(unpack_zip(archive, dest)?)
    }
}

/// Unpack a gzip-tar with ownership normalized to the invoking user.
///
/// Same effect as `tar zxf <archive> --no-same-owner -C <dest>`: recorded
/// UID/GID are never applied, mode bits are kept minus setuid/setgid/sticky,
/// existing files are overwritten, and entries escaping `dest` are skipped.
///
/// # Errors
///
/// Returns [`ExtractError::Tar`] on any decode or filesystem failure.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let tar_err = |source| ExtractError::Tar {
        archive: archive.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    };
    let file = File::open(archive).map_err(tar_err)?;
    std::fs::create_dir_all(dest).map_err(tar_err)?;

    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(BufReader::new(file)));
    tar.set_preserve_ownerships(false);
    tar.set_preserve_permissions(false);
    tar.set_unpack_xattrs(false);
    tar.set_overwrite(true);
    tar.unpack(dest).map_err(tar_err)
}

/// Unpack a zip, replacing files that already exist at the destination.
///
/// Same effect as `unzip -o <archive> -d <dest>`: the last archive written
/// wins for every path it contains; files it does not contain are left alone.
/// Symlink entries are restored as links on unix when their target is
/// relative and free of `..`. Returns the number of regular files written.
///
/// # Errors
///
/// Returns [`ExtractError::ZipMissing`] if the archive does not exist,
/// [`ExtractError::ZipCorrupt`] if it cannot be decoded or an entry escapes
/// `dest`, and [`ExtractError::ZipWrite`] if a file cannot be written.
pub fn unpack_zip(archive: &Path, dest: &Path) -> Result<usize, ExtractError> {
    let corrupt = |message: String| ExtractError::ZipCorrupt {
        archive: archive.to_path_buf(),
        message,
    };
    let file = File::open(archive).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::ZipMissing {
                archive: archive.to_path_buf(),
            }
        } else {
            corrupt(e.to_string())
        }
    })?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file)).map_err(|e| corrupt(e.to_string()))?;

    create_dir(dest)?;
    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| corrupt(e.to_string()))?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| corrupt(format!("unsafe entry path '{}'", entry.name())))?;
        let out = dest.join(relative);

        if entry.is_dir() {
            create_dir(&out)?;
            continue;
        }

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| corrupt(format!("{}: {e}", entry.name())))?;

        if let Some(parent) = out.parent() {
            create_dir(parent)?;
        }

        #[cfg(unix)]
        if entry.is_symlink() {
            let target = std::str::from_utf8(&content)
                .ok()
                .map(PathBuf::from)
                .filter(|t| is_contained_link(t))
                .ok_or_else(|| corrupt(format!("unsafe symlink target in '{}'", entry.name())))?;
            replace_symlink(&out, &target)?;
            continue;
        }

        replace_file(&out, &content)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out, std::fs::Permissions::from_mode(mode & 0o777))
                .map_err(|source| zip_write_err(&out, source))?;
        }
        written += 1;
    }
    Ok(written)
}

/// Unlink then recreate, so read-only files from an earlier run are replaced
/// rather than rejected.
fn replace_file(path: &Path, content: &[u8]) -> Result<(), ExtractError> {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => return Err(zip_write_err(path, source)),
    }
    std::fs::write(path, content).map_err(|source| zip_write_err(path, source))
}

/// Link targets must be relative and stay inside the extraction root.
#[cfg(unix)]
fn is_contained_link(target: &Path) -> bool {
    use std::path::Component;
    !target.as_os_str().is_empty()
        && target
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(unix)]
fn replace_symlink(path: &Path, target: &Path) -> Result<(), ExtractError> {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => return Err(zip_write_err(path, source)),
    }
    std::os::unix::fs::symlink(target, path).map_err(|source| zip_write_err(path, source))
}

fn create_dir(path: &Path) -> Result<(), ExtractError> {
    std::fs::create_dir_all(path).map_err(|source| zip_write_err(path, source))
}

fn zip_write_err(path: &Path, source: std::io::Error) -> ExtractError {
    ExtractError::ZipWrite {
        path: PathBuf::from(path),
        source,
    }
}
