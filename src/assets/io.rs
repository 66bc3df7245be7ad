use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncReadExt;

use crate::errors::{Result, VernissageError};

/// 逐块读取时的进度回调，参数为（已读字节，总字节）。
/// 总字节未知时报 0，由调用方自行估算。
pub type ProgressFn<'a> = &'a mut (dyn FnMut(u64, u64) + Send);

/// 资产读取器 Trait
/// 支持本地文件和网络资源的异步读取
pub trait AssetReader: Send + Sync {
    /// 异步读取资源字节流，边读边上报进度
    fn read_bytes(
        &self,
        uri: &str,
        progress: ProgressFn<'_>,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

const FILE_CHUNK: usize = 64 * 1024;

/// 本地文件读取器
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        let mut file = tokio::fs::File::open(&path).await?;
        let total = file.metadata().await?.len();

        let mut data = Vec::with_capacity(total as usize);
        let mut chunk = vec![0u8; FILE_CHUNK];
        loop {
            let read = file.read(&mut chunk).await?;
            if read == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..read]);
            progress(data.len() as u64, total);
        }

        Ok(data)
    }
}

/// HTTP 网络读取器
pub struct HttpAssetReader {
    root_url: url::Url,
    client: reqwest::Client,
}

impl HttpAssetReader {
    pub fn new(url_str: &str) -> Result<Self> {
        let url = url::Url::parse(url_str)?;
        let root_url = if url.path().ends_with('/') {
            url
        } else {
            let mut u = url.clone();
            if let Ok(mut segments) = u.path_segments_mut() {
                segments.pop();
                segments.push("");
            }
            u
        };

        Ok(Self {
            root_url,
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
        })
    }

    #[inline]
    pub fn root_url(&self) -> &url::Url {
        &self.root_url
    }
}

impl AssetReader for HttpAssetReader {
    async fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        let url = self.root_url.join(uri)?;
        let mut resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(VernissageError::HttpResponseError {
                status: resp.status().as_u16(),
            });
        }

        // 服务端没报 Content-Length 时 total 为 0
        let total = resp.content_length().unwrap_or(0);

        let mut data = Vec::with_capacity(total as usize);
        while let Some(chunk) = resp.chunk().await? {
            data.extend_from_slice(&chunk);
            progress(data.len() as u64, total);
        }

        Ok(data)
    }
}

/// 资产读取器变体枚举
/// 避免 trait object 的运行时开销
#[derive(Clone)]
pub enum AssetReaderVariant {
    File(Arc<FileAssetReader>),
    Http(Arc<HttpAssetReader>),
}

impl AssetReaderVariant {
    /// 从路径或 URL 自动创建合适的读取器
    pub fn from_source(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(Self::Http(Arc::new(HttpAssetReader::new(source)?)))
        } else {
            Ok(Self::File(Arc::new(FileAssetReader::new(source))))
        }
    }

    /// 异步读取字节数据
    pub async fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        match self {
            Self::File(r) => r.read_bytes(uri, progress).await,
            Self::Http(r) => r.read_bytes(uri, progress).await,
        }
    }

    /// 获取基础路径的文件名部分
    pub fn source_filename(source: &str) -> &str {
        if source.starts_with("http://") || source.starts_with("https://") {
            source.rsplit('/').next().unwrap_or(source)
        } else {
            Path::new(source)
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(source)
        }
    }
}
