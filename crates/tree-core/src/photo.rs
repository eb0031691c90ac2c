//! Single-flight photo overlay selection driven by pinch edges.

use rand::Rng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoChange {
    Shown { index: usize },
    Hidden,
}

#[derive(Clone, Debug, Default)]
pub struct PhotoOverlay {
    photos: Vec<String>,
    current: Option<usize>,
}

impl PhotoOverlay {
    pub fn new<I, S>(photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            photos: photos.into_iter().map(Into::into).collect(),
            current: None,
        }
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.photos.get(i))
            .map(String::as_str)
    }

    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    /// Pick a photo uniformly at random unless one is already on screen.
    pub fn on_pinch_start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PhotoChange> {
        if self.current.is_some() || self.photos.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.photos.len());
        self.current = Some(index);
        log::info!("[photo] showing {}", self.photos[index]);
        Some(PhotoChange::Shown { index })
    }

    pub fn on_pinch_end(&mut self) -> Option<PhotoChange> {
        self.hide()
    }

    /// Explicit user dismissal (close button, Escape).
    pub fn dismiss(&mut self) -> Option<PhotoChange> {
        self.hide()
    }

    fn hide(&mut self) -> Option<PhotoChange> {
        self.current.take().map(|_| {
            log::info!("[photo] hidden");
            PhotoChange::Hidden
        })
    }
}
