//! Bounded-memory spooling of upload streams
//!
//! The backend needs a known content length before a put can start, so an
//! incoming part cannot be piped through directly. Instead the stream is
//! drained into a `PutBody`: small parts stay in memory, anything past the
//! threshold spills to a temp file that the backend later streams from
//! disk. Memory use per upload is bounded by the threshold; upload size is
//! not.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use stash_store::PutBody;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors while draining an upload stream
#[derive(Error, Debug)]
pub enum SpoolError<E> {
    /// The client-side stream failed mid-read
    #[error("failed to read upload stream: {0}")]
    Read(E),

    /// The spill file could not be written
    #[error("failed to spool upload to disk: {0}")]
    Io(#[from] std::io::Error),
}

/// Drain `stream` into a [`PutBody`], keeping at most `threshold` bytes in
/// memory before spilling to a temp file.
pub async fn spool_stream<S, E>(stream: S, threshold: usize) -> Result<PutBody, SpoolError<E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    futures::pin_mut!(stream);

    let mut buffered = BytesMut::new();
    let mut spill: Option<(NamedTempFile, tokio::fs::File, u64)> = None;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(SpoolError::Read)?;

        if let Some((_, file, len)) = spill.as_mut() {
            file.write_all(&chunk).await?;
            *len += chunk.len() as u64;
        } else if buffered.len() + chunk.len() > threshold {
            let tmp = NamedTempFile::new()?;
            let mut file = tokio::fs::File::from_std(tmp.reopen()?);
            file.write_all(&buffered).await?;
            file.write_all(&chunk).await?;
            let len = (buffered.len() + chunk.len()) as u64;
            buffered = BytesMut::new();
            spill = Some((tmp, file, len));
        } else {
            buffered.extend_from_slice(&chunk);
        }
    }

    match spill {
        Some((tmp, mut file, len)) => {
            file.flush().await?;
            Ok(PutBody::Spooled { file: tmp, len })
        }
        None => Ok(PutBody::Bytes(buffered.freeze())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    type ReadResult = Result<Bytes, std::io::Error>;

    fn chunks(parts: &[&[u8]]) -> Vec<ReadResult> {
        parts.iter().map(|p| Ok(Bytes::copy_from_slice(p))).collect()
    }

    #[tokio::test]
    async fn small_upload_stays_in_memory() {
        let input = chunks(&[b"hello", b"-", b"test"]);
        let body = spool_stream(stream::iter(input), 1024).await.unwrap();

        match body {
            PutBody::Bytes(bytes) => assert_eq!(bytes, Bytes::from("hello-test")),
            PutBody::Spooled { .. } => panic!("small upload should not spill"),
        }
    }

    #[tokio::test]
    async fn upload_at_threshold_stays_in_memory() {
        let input = chunks(&[&[0u8; 512], &[1u8; 512]]);
        let body = spool_stream(stream::iter(input), 1024).await.unwrap();
        assert!(matches!(body, PutBody::Bytes(_)));
        assert_eq!(body.len(), 1024);
    }

    #[tokio::test]
    async fn large_upload_spills_to_disk() {
        let first = vec![7u8; 900];
        let second = vec![8u8; 900];
        let input = chunks(&[&first, &second]);

        let body = spool_stream(stream::iter(input), 1024).await.unwrap();

        match body {
            PutBody::Spooled { file, len } => {
                assert_eq!(len, 1800);
                let on_disk = std::fs::read(file.path()).unwrap();
                assert_eq!(&on_disk[..900], first.as_slice());
                assert_eq!(&on_disk[900..], second.as_slice());
            }
            PutBody::Bytes(_) => panic!("large upload should spill"),
        }
    }

    #[tokio::test]
    async fn spill_file_is_removed_on_drop() {
        let input = chunks(&[&[0u8; 2048]]);
        let body = spool_stream(stream::iter(input), 1024).await.unwrap();

        let path = match &body {
            PutBody::Spooled { file, .. } => file.path().to_path_buf(),
            PutBody::Bytes(_) => panic!("expected spill"),
        };
        assert!(path.exists());
        drop(body);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn read_error_is_propagated() {
        let input: Vec<ReadResult> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("client went away")),
        ];
        let result = spool_stream(stream::iter(input), 1024).await;
        assert!(matches!(result, Err(SpoolError::Read(_))));
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_body() {
        let input: Vec<ReadResult> = vec![];
        let body = spool_stream(stream::iter(input), 1024).await.unwrap();
        assert!(body.is_empty());
    }
}
