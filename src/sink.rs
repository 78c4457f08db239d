//! Output sinks for downloaded bodies.
//!
//! A sink is any asynchronous writer that can also be forced to durable
//! storage. The [`Downloader`](crate::Downloader) copies the response body
//! into the sink and calls [`WriteSyncer::sync`] exactly once after a
//! successful copy. It never closes the sink: its lifecycle belongs to the
//! caller.

use async_trait::async_trait;
use std::io;
use tokio::{fs::File, io::AsyncWrite, io::AsyncWriteExt};

/// A writer with an explicit durability barrier.
#[async_trait]
pub trait WriteSyncer: AsyncWrite + Unpin + Send {
    /// Flush buffered data and make it durable.
    async fn sync(&mut self) -> io::Result<()>;
}

#[async_trait]
impl WriteSyncer for File {
    async fn sync(&mut self) -> io::Result<()> {
        self.flush().await?;
        self.sync_all().await
    }
}

/// In-memory sink. Syncing is a no-op.
#[async_trait]
impl WriteSyncer for Vec<u8> {
    async fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T> WriteSyncer for Box<T>
where
    T: WriteSyncer + ?Sized,
{
    async fn sync(&mut self) -> io::Result<()> {
        (**self).sync().await
    }
}
