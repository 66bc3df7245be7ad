/// 一组待加载资源的清单
///
/// 四类条目：场景文件、贴图、任意文件、至多一份 JSON 数据。进度
/// 核算按条目数等权，见加载器。
#[derive(Debug, Clone, Default)]
pub struct ResourceBook {
    mesh_urls: Vec<String>,
    texture_urls: Vec<String>,
    file_urls: Vec<String>,
    data_url: Option<String>,
}

impl ResourceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mesh(mut self, url: impl Into<String>) -> Self {
        self.mesh_urls.push(url.into());
        self
    }

    #[must_use]
    pub fn with_meshes<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mesh_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_texture(mut self, url: impl Into<String>) -> Self {
        self.texture_urls.push(url.into());
        self
    }

    #[must_use]
    pub fn with_textures<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texture_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_file(mut self, url: impl Into<String>) -> Self {
        self.file_urls.push(url.into());
        self
    }

    #[must_use]
    pub fn with_files<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    /// 设置数据 URL。空字符串视为未设置。
    #[must_use]
    pub fn with_data(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.data_url = if url.is_empty() { None } else { Some(url) };
        self
    }

    #[must_use]
    pub fn mesh_urls(&self) -> &[String] {
        &self.mesh_urls
    }

    #[must_use]
    pub fn texture_urls(&self) -> &[String] {
        &self.texture_urls
    }

    #[must_use]
    pub fn file_urls(&self) -> &[String] {
        &self.file_urls
    }

    #[must_use]
    pub fn data_url(&self) -> Option<&str> {
        self.data_url.as_deref()
    }

    /// 清单条目总数，数据 URL 有则计 1
    #[must_use]
    pub fn url_count(&self) -> usize {
        self.mesh_urls.len()
            + self.texture_urls.len()
            + self.file_urls.len()
            + usize::from(self.data_url.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url_count() == 0
    }
}
