//! Page-aligned, count-less container format (ARCHIVE-READER).
//!
//! Walks a stream of directory headers until EOF. Each directory carries an
//! explicit file count, but the archive itself has none: the stream simply
//! ends after the last directory's last file.

use crate::bytes::ByteReader;
use crate::error::{Error, Result};

const PAGE: u64 = 2048;

/// One file entry read from the archive, with its owning directory name.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub directory: String,
    pub file_name: String,
    pub payload: Vec<u8>,
}

fn align_up(pos: u64) -> u64 {
    (pos + (PAGE - 1)) & !(PAGE - 1)
}

/// Walk `data` and yield every `(directory, file, payload)` entry in order.
///
/// # Errors
/// Returns [`Error::Truncated`] if the stream ends mid-header; EOF between
/// directories (the normal terminator, since there is no top-level count) is
/// not an error.
pub fn read_entries(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    let mut r = ByteReader::new(data);

    while r.remaining() > 0 {
        // A directory header is 8 + 32 + 4 = 44 bytes; fewer remaining bytes
        // than that at the top level is a truncated directory, not EOF.
        if r.remaining() < 44 {
            return Err(Error::Truncated {
                what: "directory header",
                needed: 44,
                available: r.remaining(),
            });
        }

        r.skip("directory unknown header", 8)?;
        let directory = r.fixed_ascii("directory name", 32)?;
        let file_count = r.u32("directory file count")?;

        tracing::debug!(directory = %directory, file_count, "reading archive directory");

        for _ in 0..file_count {
            let file_name = r.fixed_ascii("file name", 32)?;
            let size = r.u32("file size")? as usize;
            r.skip("file unknown header", 4)?;
            let payload = r.bytes("file payload", size)?.to_vec();

            entries.push(ArchiveEntry {
                directory: directory.clone(),
                file_name,
                payload,
            });

            let next = align_up(r.position());
            r.seek(next);
        }
    }

    Ok(entries)
}
