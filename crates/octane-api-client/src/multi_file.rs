//! Tar packing for `multi-file` content
//!
//! Bundles are built and read entirely in memory.

use std::{
    io::Read,
    path::{Component, Path},
};

use tar::{Archive, Builder, EntryType, Header};
use tracing::debug;

use crate::{
    error_code::{ERR_COMPRESSION_FAILED, ERR_DECOMPRESSION_FAILED},
    error_response::ErrorResponse,
    types::FileInfo,
};

/// Packs files into a `multi-file` bundle
pub struct MultiFileCompressor;

impl MultiFileCompressor {
    /// Pack `files` into a tar archive, one regular entry per file, in order
    pub fn compress(files: &[FileInfo]) -> Result<Vec<u8>, ErrorResponse> {
        let mut builder = Builder::new(Vec::new());

        for file in files {
            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Regular);
            header.set_size(file.data.len() as u64);
            header.set_mode(0o644);
            builder
                .append_data(&mut header, &file.filename, file.data.as_slice())
                .map_err(|e| {
                    ErrorResponse::new(ERR_COMPRESSION_FAILED, format!("{}: {e}", file.filename))
                })?;
        }

        let data = builder
            .into_inner()
            .map_err(|e| ErrorResponse::new(ERR_COMPRESSION_FAILED, e.to_string()))?;
        debug!("packed {} files into {} bytes", files.len(), data.len());
        Ok(data)
    }
}

/// Reads a `multi-file` bundle back into files
pub struct MultiFileDecompressor;

impl MultiFileDecompressor {
    /// Read the regular entries of a tar archive back, in order
    ///
    /// Entries with an absolute path or a `..`/`.` component are rejected.
    pub fn decompress(data: &[u8]) -> Result<Vec<FileInfo>, ErrorResponse> {
        let failed = |e: std::io::Error| ErrorResponse::new(ERR_DECOMPRESSION_FAILED, e.to_string());

        let mut archive = Archive::new(data);
        let mut files = Vec::new();

        for entry in archive.entries().map_err(failed)? {
            let mut entry = entry.map_err(failed)?;
            if !entry.header().entry_type().is_file() {
                continue;
            }
            let filename = entry.path().map_err(failed)?.to_string_lossy().into_owned();
            if !is_relative_file_name(&filename) {
                return Err(ErrorResponse::new(
                    ERR_DECOMPRESSION_FAILED,
                    format!("{filename}: entry path leaves the bundle"),
                ));
            }
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).map_err(failed)?;
            files.push(FileInfo::new(filename, contents));
        }

        debug!("unpacked {} files from {} bytes", files.len(), data.len());
        Ok(files)
    }
}

/// True when `name` is a non-empty path made only of normal components
pub fn is_relative_file_name(name: &str) -> bool {
    let path = Path::new(name);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}
