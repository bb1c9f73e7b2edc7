//! Resolves OS "recent item" entries to the file they point at.
//!
//! Handles Windows Shell Link (`.lnk`) files, freedesktop `.desktop` entries
//! (`URL=file://...`), and plain symlinks.

use std::path::{Path, PathBuf};

use url::Url;

const LNK_HEADER_SIZE: usize = 0x4C;
const HAS_LINK_TARGET_ID_LIST: u32 = 0x01;
const HAS_LINK_INFO: u32 = 0x02;
const VOLUME_ID_AND_LOCAL_BASE_PATH: u32 = 0x01;

/// Target of a shortcut or link, if it can be resolved.
pub fn resolve(path: &Path) -> Option<PathBuf> {
    let is_symlink = std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if is_symlink {
        let target = std::fs::read_link(path).ok()?;
        return Some(match path.parent() {
            Some(parent) if target.is_relative() => parent.join(target),
            _ => target,
        });
    }

    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "lnk" => parse_lnk(&std::fs::read(path).ok()?),
        "desktop" => parse_desktop_entry(&std::fs::read_to_string(path).ok()?),
        _ => None,
    }
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn read_cstr(data: &[u8], at: usize) -> Option<String> {
    let rest = data.get(at..)?;
    let end = rest.iter().position(|&b| b == 0)?;
    Some(String::from_utf8_lossy(&rest[..end]).to_string())
}

/// Extracts `LocalBasePath` + `CommonPathSuffix` from a Shell Link file.
pub fn parse_lnk(data: &[u8]) -> Option<PathBuf> {
    if read_u32(data, 0)? as usize != LNK_HEADER_SIZE {
        return None;
    }
    let flags = read_u32(data, 20)?;
    if flags & HAS_LINK_INFO == 0 {
        return None;
    }

    let mut offset = LNK_HEADER_SIZE;
    if flags & HAS_LINK_TARGET_ID_LIST != 0 {
        offset += 2 + read_u16(data, offset)? as usize;
    }

    let info = offset;
    let info_flags = read_u32(data, info + 8)?;
    if info_flags & VOLUME_ID_AND_LOCAL_BASE_PATH == 0 {
        return None;
    }
    let base_offset = read_u32(data, info + 16)? as usize;
    let suffix_offset = read_u32(data, info + 24)? as usize;

    let mut target = read_cstr(data, info + base_offset)?;
    if let Some(suffix) = read_cstr(data, info + suffix_offset).filter(|s| !s.is_empty()) {
        if !target.ends_with('\\') {
            target.push('\\');
        }
        target.push_str(&suffix);
    }
    (!target.is_empty()).then(|| PathBuf::from(target))
}

/// Reads the first `URL=file://` (or `URL[$e]=`) line of a `.desktop` entry.
pub fn parse_desktop_entry(content: &str) -> Option<PathBuf> {
    content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != "URL" && key.trim() != "URL[$e]" {
            return None;
        }
        let url = Url::parse(value.trim()).ok().filter(|u| u.scheme() == "file")?;
        url.to_file_path().ok()
    })
}
