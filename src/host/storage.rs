//! File I/O for the host shell. Documents never touch the disk themselves;
//! the group reads whole files here and writes back the transcoded bytes.

use std::io;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Read the entire contents of `path`
pub async fn read_bytes(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path).await
}

/// Create or truncate `path` and write `bytes` to it
pub async fn write_bytes(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

/// Canonical form of an existing path, or the path itself if it cannot be resolved
pub async fn normalize(path: &Path) -> std::path::PathBuf {
    fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}
