use crate::feed::source::HTTP_CLIENT;
use crate::prelude::HashSet;
use crate::{MapError, Result};
use crossbeam_channel::{Receiver, Sender};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TileLoaderConfig {
    /// Downloaded tiles kept in memory
    pub cache_size: usize,
    /// Downloads allowed in flight at once
    pub max_concurrent: usize,
}

impl Default for TileLoaderConfig {
    fn default() -> Self {
        Self {
            cache_size: 512,
            max_concurrent: 8,
        }
    }
}

/// Outcome of one tile download
struct TileResult {
    url: String,
    data: Result<Vec<u8>>,
}

/// Downloads tile images on the Tokio runtime. Results come back over a
/// channel and are drained with [`TileLoader::poll`] from the UI thread.
/// Failed tiles are logged and never retried.
pub struct TileLoader {
    config: TileLoaderConfig,
    tx: Sender<TileResult>,
    rx: Receiver<TileResult>,
    cache: LruCache<String, Arc<Vec<u8>>>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl TileLoader {
    pub fn new(config: TileLoaderConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            tx,
            rx,
            cache: LruCache::new(capacity),
            pending: HashSet::default(),
            failed: HashSet::default(),
        }
    }

    /// Returns the tile bytes if they are cached; otherwise starts the
    /// download (once) and returns `None`
    pub fn request(&mut self, url: &str) -> Option<Arc<Vec<u8>>> {
        let key = url.to_string();
        if let Some(data) = self.cache.get(&key) {
            return Some(Arc::clone(data));
        }
        if self.pending.contains(&key)
            || self.failed.contains(&key)
            || self.pending.len() >= self.config.max_concurrent
        {
            return None;
        }

        let tx = self.tx.clone();
        let task_url = key.clone();
        let spawned = crate::runtime::spawn(async move {
            let data = download(&task_url).await;
            let _ = tx.send(TileResult {
                url: task_url,
                data,
            });
        });

        match spawned {
            Ok(_) => {
                self.pending.insert(key);
            }
            Err(e) => {
                log::warn!("cannot load tile {}: {}", url, e);
                self.failed.insert(key);
            }
        }
        None
    }

    /// Moves finished downloads into the cache; returns how many arrived
    pub fn poll(&mut self) -> usize {
        let mut received = 0;
        while let Ok(result) = self.rx.try_recv() {
            self.pending.remove(&result.url);
            match result.data {
                Ok(bytes) => {
                    log::debug!("tile {} ({} bytes)", result.url, bytes.len());
                    self.cache.put(result.url, Arc::new(bytes));
                    received += 1;
                }
                Err(e) => {
                    log::warn!("tile {} failed: {}", result.url, e);
                    self.failed.insert(result.url);
                }
            }
        }
        received
    }

    /// Marks a tile as unusable (e.g. undecodable) so it is not requested again
    pub fn mark_failed(&mut self, url: &str) {
        let key = url.to_string();
        self.cache.pop(&key);
        self.failed.insert(key);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

impl Default for TileLoader {
    fn default() -> Self {
        Self::new(TileLoaderConfig::default())
    }
}

async fn download(url: &str) -> Result<Vec<u8>> {
    let response = HTTP_CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MapError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_runtime_marks_failed() {
        let mut loader = TileLoader::default();
        assert!(loader.request("http://127.0.0.1:9/0/0/0.png").is_none());
        assert_eq!(loader.pending_count(), 0);

        // not attempted again
        assert!(loader.request("http://127.0.0.1:9/0/0/0.png").is_none());
        assert_eq!(loader.poll(), 0);
    }

    #[tokio::test]
    async fn test_failed_download_is_not_retried() {
        let mut loader = TileLoader::default();
        let url = "http://127.0.0.1:9/1/0/0.png";
        assert!(loader.request(url).is_none());
        assert_eq!(loader.pending_count(), 1);

        let mut waited = 0;
        while loader.pending_count() > 0 && waited < 200 {
            loader.poll();
            tokio::time::sleep(std::time::Duration::from_millis(25)).await;
            waited += 1;
        }

        assert_eq!(loader.pending_count(), 0);
        assert_eq!(loader.cached_count(), 0);
        assert!(loader.request(url).is_none());
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn test_cache_hit() {
        let mut loader = TileLoader::default();
        loader.tx.send(TileResult {
            url: "tile".to_string(),
            data: Ok(vec![1, 2, 3]),
        })
        .unwrap();

        assert_eq!(loader.poll(), 1);
        assert_eq!(loader.request("tile").as_deref(), Some(&vec![1, 2, 3]));

        loader.mark_failed("tile");
        assert!(loader.request("tile").is_none());
        assert_eq!(loader.cached_count(), 0);
    }
}
