//! # Transfer
//!
//! Chunked byte copying for the download endpoints, in both execution
//! styles: `copy_blocking` holds its thread for the whole transfer,
//! `copy_streaming` yields to the scheduler between chunks. Bytes are
//! written in source order; there is no other delivery guarantee, and an
//! I/O failure mid-copy is terminal with no partial-completion recovery.

use std::io::{Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Chunk size shared by both copy loops
pub const CHUNK_SIZE: usize = 1024;

/// Copy all bytes, blocking the calling thread until complete
pub fn copy_blocking<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> std::io::Result<u64> {
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut copied = 0u64;
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n])?;
        copied += n as u64;
    }
    Ok(copied)
}

/// Copy all bytes, yielding between chunks
pub async fn copy_streaming<R, W>(reader: &mut R, writer: &mut W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut copied = 0u64;
    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).await?;
        copied += n as u64;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn payload() -> Vec<u8> {
        // larger than one chunk so both loops iterate
        (0..5000u32).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_copy_blocking() {
        let data = payload();
        let mut reader = Cursor::new(data.clone());
        let mut out = Vec::new();

        let copied = copy_blocking(&mut reader, &mut out).unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }

    #[tokio::test]
    async fn test_copy_streaming() {
        let data = payload();
        let mut reader = Cursor::new(data.clone());
        let mut out = Vec::new();

        let copied = copy_streaming(&mut reader, &mut out).await.unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn test_copy_blocking_empty() {
        let mut reader = Cursor::new(Vec::<u8>::new());
        let mut out = Vec::new();
        assert_eq!(copy_blocking(&mut reader, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
