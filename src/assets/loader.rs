use std::sync::{Arc, OnceLock};

use futures::future::join_all;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::runtime::Runtime;

use crate::assets::bundle::{FileBlob, ResourceBundle};
use crate::assets::io::AssetReaderVariant;
use crate::assets::{ResourceBook, gltf};
use crate::errors::{Result, VernissageError};
use crate::resources::{Image, Texture};

fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create asset loader runtime"))
}

/// 加载过程对外的三种事件
#[derive(Clone)]
pub enum LoadEvent {
    /// 总体进度，0.0 到 1.0，完成前最后一次必为 1.0
    Progress(f32),
    Complete(Arc<ResourceBundle>),
    Failed { errors: Vec<String> },
}

// ============================================================================
// 进度核算
// ============================================================================

/// 按条目等权核算总体进度
///
/// 每个条目贡献 min(loaded/total, 1) / url_count。服务端没报总量时
/// 查已知尺寸表，查不到就用 loaded + 1 让分量贴近但到不了满格。
/// 条目落定后记成精确的 1/1，全部落定时总和除以条目数恰好等于 1.0。
struct ProgressTracker {
    url_count: usize,
    known_sizes: FxHashMap<String, u64>,
    records: Mutex<FxHashMap<String, (u64, u64)>>,
}

impl ProgressTracker {
    fn new(url_count: usize, known_sizes: FxHashMap<String, u64>) -> Self {
        Self {
            url_count,
            known_sizes,
            records: Mutex::new(FxHashMap::default()),
        }
    }

    fn fix_total(&self, url: &str, loaded: u64, total: u64) -> u64 {
        if total != 0 {
            return total;
        }

        for (name, &size) in &self.known_sizes {
            if url.contains(name.as_str()) {
                log::debug!("{url} loaded: {loaded} total: 0, fixed => {size}");
                return size;
            }
        }

        loaded + 1
    }

    fn record(&self, url: &str, loaded: u64, total: u64) -> f32 {
        let total = self.fix_total(url, loaded, total);
        let mut records = self.records.lock();
        records.insert(url.to_string(), (loaded, total));
        Self::aggregate(&records, self.url_count)
    }

    fn finish(&self, url: &str) -> f32 {
        let mut records = self.records.lock();
        records.insert(url.to_string(), (1, 1));
        Self::aggregate(&records, self.url_count)
    }

    fn aggregate(records: &FxHashMap<String, (u64, u64)>, url_count: usize) -> f32 {
        if url_count == 0 {
            return 1.0;
        }
        let sum: f32 = records
            .values()
            .map(|&(loaded, total)| (loaded as f32 / total as f32).min(1.0))
            .sum();
        sum / url_count as f32
    }

    fn progress(&self) -> f32 {
        Self::aggregate(&self.records.lock(), self.url_count)
    }
}

// ============================================================================
// BundleLoader
// ============================================================================

enum ItemKind {
    Mesh,
    Texture,
    File,
    Data,
}

enum LoadedItem {
    Scene(String, crate::scene::Scene),
    Texture(String, Texture),
    Blob(String, FileBlob),
    Data(serde_json::Value),
}

/// 把一本 [`ResourceBook`] 的所有条目并发拉取、解码成一份
/// [`ResourceBundle`]
///
/// 事件通过 [`BundleLoader::events`] 的通道送出：若干次 `Progress`，
/// 然后恰好一次 `Complete` 或 `Failed`。任何条目失败都让整本清单
/// 判定失败，已取到的条目不进产物。加载器一次性使用，重复调用
/// `load` 只会留下一条警告。
pub struct BundleLoader {
    book: ResourceBook,
    reader: AssetReaderVariant,
    tracker: Arc<ProgressTracker>,

    events_tx: flume::Sender<LoadEvent>,
    events_rx: flume::Receiver<LoadEvent>,

    started: bool,
    is_loaded: bool,
    is_failed: bool,
    errors: Vec<String>,
    bundle: Option<Arc<ResourceBundle>>,
}

impl BundleLoader {
    #[must_use]
    pub fn new(book: ResourceBook, reader: AssetReaderVariant) -> Self {
        // 旧站点的主场景文件从不带 Content-Length，尺寸写死在这里
        let known_sizes = [("lofoscene.glb".to_string(), 7_456_348_u64)]
            .into_iter()
            .collect();
        Self::with_known_sizes(book, reader, known_sizes)
    }

    #[must_use]
    pub fn with_known_sizes(
        book: ResourceBook,
        reader: AssetReaderVariant,
        known_sizes: FxHashMap<String, u64>,
    ) -> Self {
        let (events_tx, events_rx) = flume::unbounded();
        let tracker = Arc::new(ProgressTracker::new(book.url_count(), known_sizes));

        Self {
            book,
            reader,
            tracker,
            events_tx,
            events_rx,
            started: false,
            is_loaded: false,
            is_failed: false,
            errors: Vec::new(),
            bundle: None,
        }
    }

    /// 事件接收端，可以在 `load` 之前拿好
    #[must_use]
    pub fn events(&self) -> flume::Receiver<LoadEvent> {
        self.events_rx.clone()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.is_failed
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.is_loaded {
            return 1.0;
        }
        self.tracker.progress()
    }

    /// 加载完成后的产物；失败的清单带着逐条错误报出来
    pub fn bundle(&self) -> Result<Arc<ResourceBundle>> {
        if self.is_failed {
            return Err(VernissageError::LoadFailed {
                errors: self.errors.clone(),
            });
        }
        match &self.bundle {
            Some(bundle) if self.is_loaded => Ok(Arc::clone(bundle)),
            _ => Err(VernissageError::BundleNotLoaded),
        }
    }

    /// 并发拉取整本清单
    pub async fn load(&mut self) {
        if self.started {
            log::warn!("bundle loader load() should be called only once");
            return;
        }
        self.started = true;

        if self.book.is_empty() {
            self.finish_success(ResourceBundle::default(), 1.0);
            return;
        }

        let _ = self.events_tx.send(LoadEvent::Progress(0.0));

        let mut items = Vec::with_capacity(self.book.url_count());
        for url in self.book.mesh_urls() {
            items.push((url.clone(), ItemKind::Mesh));
        }
        for url in self.book.texture_urls() {
            items.push((url.clone(), ItemKind::Texture));
        }
        for url in self.book.file_urls() {
            items.push((url.clone(), ItemKind::File));
        }
        if let Some(url) = self.book.data_url() {
            items.push((url.to_string(), ItemKind::Data));
        }

        let futures: Vec<_> = items
            .into_iter()
            .map(|(url, kind)| {
                fetch_item(
                    self.reader.clone(),
                    Arc::clone(&self.tracker),
                    self.events_tx.clone(),
                    url,
                    kind,
                )
            })
            .collect();

        let mut bundle = ResourceBundle::default();
        let mut errors = Vec::new();

        for result in join_all(futures).await {
            match result {
                Ok(LoadedItem::Scene(url, scene)) => {
                    bundle.scenes.insert(url, scene);
                }
                Ok(LoadedItem::Texture(url, texture)) => {
                    bundle.textures.insert(url, texture);
                }
                Ok(LoadedItem::Blob(url, blob)) => {
                    bundle.files.insert(url, blob);
                }
                Ok(LoadedItem::Data(value)) => {
                    bundle.data = Some(value);
                }
                Err(message) => {
                    log::error!("{message}");
                    errors.push(message);
                }
            }
        }

        if errors.is_empty() {
            self.finish_success(bundle, self.tracker.progress());
        } else {
            self.is_failed = true;
            self.errors = errors.clone();
            let _ = self.events_tx.send(LoadEvent::Failed { errors });
        }
    }

    /// 在内部运行时上同步加载，给非异步调用方用
    pub fn load_blocking(&mut self) {
        get_asset_runtime().block_on(self.load());
    }

    fn finish_success(&mut self, bundle: ResourceBundle, progress: f32) {
        let bundle = Arc::new(bundle);
        self.is_loaded = true;
        self.bundle = Some(Arc::clone(&bundle));
        let _ = self.events_tx.send(LoadEvent::Progress(progress));
        let _ = self.events_tx.send(LoadEvent::Complete(bundle));
    }
}

async fn fetch_item(
    reader: AssetReaderVariant,
    tracker: Arc<ProgressTracker>,
    events_tx: flume::Sender<LoadEvent>,
    url: String,
    kind: ItemKind,
) -> std::result::Result<LoadedItem, String> {
    let extension = url.rsplit('.').next().unwrap_or("").to_ascii_lowercase();

    // 场景和贴图条目必须有认识的扩展名才开始拉取
    match kind {
        ItemKind::Mesh if !matches!(extension.as_str(), "glb" | "gltf") => {
            return Err(unknown_extension(&url, &extension));
        }
        ItemKind::Texture if !matches!(extension.as_str(), "jpg" | "jpeg" | "png" | "webp") => {
            return Err(unknown_extension(&url, &extension));
        }
        _ => {}
    }

    let mut on_progress = |loaded: u64, total: u64| {
        let progress = tracker.record(&url, loaded, total);
        let _ = events_tx.send(LoadEvent::Progress(progress));
    };

    let bytes = reader
        .read_bytes(&url, &mut on_progress)
        .await
        .map_err(|e| format!("There was an error loading {url}: {e}"))?;

    let item = decode_item(&url, &extension, bytes, &kind)
        .map_err(|e| format!("There was an error loading {url}: {e}"))?;

    let progress = tracker.finish(&url);
    let _ = events_tx.send(LoadEvent::Progress(progress));

    Ok(item)
}

fn decode_item(
    url: &str,
    extension: &str,
    bytes: Vec<u8>,
    kind: &ItemKind,
) -> Result<LoadedItem> {
    let name = AssetReaderVariant::source_filename(url);

    match kind {
        ItemKind::Mesh => {
            let scene = gltf::import_scene(name, &bytes)?;
            Ok(LoadedItem::Scene(url.to_string(), scene))
        }
        ItemKind::Texture => {
            let image = Image::decode(name, &bytes)?;
            Ok(LoadedItem::Texture(
                url.to_string(),
                Texture::new(name, image),
            ))
        }
        ItemKind::File => {
            let blob = FileBlob::new(bytes, mime_for_extension(extension));
            Ok(LoadedItem::Blob(url.to_string(), blob))
        }
        ItemKind::Data => {
            let value = serde_json::from_slice(&bytes)?;
            Ok(LoadedItem::Data(value))
        }
    }
}

fn unknown_extension(url: &str, extension: &str) -> String {
    VernissageError::UnknownExtension {
        url: url.to_string(),
        extension: extension.to_string(),
    }
    .to_string()
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        // 部分服务端给 svg 发 octet-stream，这里强行纠正
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "json" => "application/json",
        "glb" => "model/gltf-binary",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(url_count: usize) -> ProgressTracker {
        let known_sizes = [("lofoscene.glb".to_string(), 7_456_348_u64)]
            .into_iter()
            .collect();
        ProgressTracker::new(url_count, known_sizes)
    }

    #[test]
    fn items_are_count_weighted() {
        let t = tracker(2);
        // 一大一小，各占一半
        let p = t.record("big.glb", 500, 1000);
        assert!((p - 0.25).abs() < 1e-6);
        let p = t.record("small.png", 10, 10);
        assert!((p - 0.75).abs() < 1e-6);
    }

    #[test]
    fn zero_total_uses_known_size() {
        let t = tracker(1);
        let p = t.record("assets/lofoscene.glb", 3_728_174, 0);
        assert!((p - 0.5).abs() < 1e-3);
    }

    #[test]
    fn zero_total_without_known_size_stays_below_one() {
        let t = tracker(1);
        let p = t.record("mystery.bin", 999, 0);
        assert!(p < 1.0);
        assert!(p > 0.99);
    }

    #[test]
    fn item_fraction_is_clamped() {
        // 服务端少报总量时单项不超过满格
        let t = tracker(2);
        let p = t.record("lied.bin", 2000, 1000);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn all_finished_is_exactly_one() {
        for count in 1..=7 {
            let t = tracker(count);
            for i in 0..count {
                t.record(&format!("item{i}"), 1, 3);
            }
            let mut last = 0.0;
            for i in 0..count {
                last = t.finish(&format!("item{i}"));
            }
            assert_eq!(last, 1.0);
        }
    }
}
