//! Scaled copies of face images, keyed by image identity and target size.

use std::sync::Arc;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use lantern_assets::{ImageHandle, ImageId};
use rustc_hash::FxHashMap;

/// Unbounded for the session; zoom levels are few and images are shared.
#[derive(Default)]
pub struct ScaledImageCache {
    images: FxHashMap<(ImageId, u32, u32), Arc<RgbaImage>>,
}

impl ScaledImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `handle` scaled to `width` x `height` and whether it was
    /// already cached. Nearest filtering keeps pixel art crisp.
    pub fn get_or_scale(&mut self, handle: &ImageHandle, width: u32, height: u32) -> (Arc<RgbaImage>, bool) {
        let key = (handle.id, width, height);
        if let Some(image) = self.images.get(&key) {
            return (Arc::clone(image), true);
        }
        let scaled = if (width, height) == (handle.width(), handle.height()) {
            Arc::clone(&handle.image)
        } else {
            Arc::new(imageops::resize(&*handle.image, width, height, FilterType::Nearest))
        };
        self.images.insert(key, Arc::clone(&scaled));
        (scaled, false)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_same_key_reuses_image() {
        let mut cache = ScaledImageCache::new();
        let handle = ImageHandle::new(ImageId(7), RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));

        let (a, hit_a) = cache.get_or_scale(&handle, 8, 8);
        let (b, hit_b) = cache.get_or_scale(&handle, 8, 8);
        assert!(!hit_a);
        assert!(hit_b);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.dimensions(), (8, 8));
        assert_eq!(*a.get_pixel(7, 7), Rgba([1, 2, 3, 255]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sizes_and_ids_are_separate_entries() {
        let mut cache = ScaledImageCache::new();
        let a = ImageHandle::new(ImageId(1), RgbaImage::new(4, 4));
        let b = ImageHandle::new(ImageId(2), RgbaImage::new(4, 4));
        cache.get_or_scale(&a, 2, 2);
        cache.get_or_scale(&a, 6, 6);
        cache.get_or_scale(&b, 2, 2);
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_native_size_shares_source() {
        let mut cache = ScaledImageCache::new();
        let handle = ImageHandle::new(ImageId(3), RgbaImage::new(5, 3));
        let (image, _) = cache.get_or_scale(&handle, 5, 3);
        assert!(Arc::ptr_eq(&image, &handle.image));
    }
}
