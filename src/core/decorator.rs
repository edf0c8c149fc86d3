use crate::core::CommentService;
use std::sync::{Arc, Mutex};

/// 基本服務：收到的留言全部貼上
#[derive(Debug, Clone, Default)]
pub struct DefaultCommentService {
    board: Arc<Mutex<Vec<String>>>,
}

impl DefaultCommentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(&self) -> Vec<String> {
        self.board
            .lock()
            .map(|board| board.clone())
            .unwrap_or_default()
    }
}

impl CommentService for DefaultCommentService {
    fn add_comment(&self, comment: &str) {
        let mut board = self
            .board
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        board.push(comment.to_string());
    }
}

/// 留言鏈的一層，回傳 `None` 表示靜默丟棄
pub trait CommentLayer: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, comment: String) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct SpamFilter {
    markers: Vec<String>,
}

impl SpamFilter {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    pub fn is_spam(&self, comment: &str) -> bool {
        // 空字串會比對到所有留言，略過
        self.markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| comment.contains(marker.as_str()))
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        Self::new(vec!["http".to_string()])
    }
}

impl CommentLayer for SpamFilter {
    fn name(&self) -> &str {
        "spam-filter"
    }

    fn apply(&self, comment: String) -> Option<String> {
        if self.is_spam(&comment) {
            None
        } else {
            Some(comment)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Trimming {
    markers: Vec<String>,
}

impl Trimming {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }
}

impl Default for Trimming {
    fn default() -> Self {
        Self::new(vec!["...".to_string()])
    }
}

impl CommentLayer for Trimming {
    fn name(&self) -> &str {
        "trimming"
    }

    fn apply(&self, comment: String) -> Option<String> {
        Some(
            self.markers
                .iter()
                .filter(|marker| !marker.is_empty())
                .fold(comment, |acc, marker| acc.replace(marker.as_str(), "")),
        )
    }
}

/// 用 closure 臨時組一層
pub struct FnLayer<F> {
    name: String,
    f: F,
}

impl<F> FnLayer<F>
where
    F: Fn(String) -> Option<String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> CommentLayer for FnLayer<F>
where
    F: Fn(String) -> Option<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, comment: String) -> Option<String> {
        (self.f)(comment)
    }
}

/// 包在基本服務外面的有序 layer 列表
///
/// 依加入順序執行，第一個加入的在最外層、最先看到留言。
/// 鏈本身也是 `CommentService`，可以巢狀。
pub struct CommentChain<S: CommentService> {
    layers: Vec<Box<dyn CommentLayer>>,
    inner: S,
}

impl<S: CommentService> CommentChain<S> {
    pub fn new(inner: S) -> Self {
        Self {
            layers: Vec::new(),
            inner,
        }
    }

    pub fn layer<L: CommentLayer + 'static>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// 只跑 layer，回傳會送進內層服務的內容
    pub fn process(&self, comment: &str) -> Option<String> {
        let mut current = comment.to_string();
        for layer in &self.layers {
            match layer.apply(current) {
                Some(next) => current = next,
                None => {
                    tracing::warn!("Comment suppressed by {}", layer.name());
                    return None;
                }
            }
        }
        Some(current)
    }
}

impl<S: CommentService> CommentService for CommentChain<S> {
    fn add_comment(&self, comment: &str) {
        if let Some(processed) = self.process(comment) {
            self.inner.add_comment(&processed);
        }
    }
}
