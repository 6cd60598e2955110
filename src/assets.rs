//! Poster image resolution.
//!
//! A title becomes a displayable bitmap through an ordered fallback chain:
//! local poster directory, then the remote lookup service, then a procedural
//! flat-color placeholder. The chain never fails: every error is absorbed
//! here, logged, and answered with the next fallback.
//!
//! The remote step is the only unbounded-latency operation in the program, so
//! the gameplay path (`PosterProvider::acquire`) never blocks on it: posters
//! spawn immediately with a local bitmap or a placeholder, the lookup runs on
//! a worker thread, and a successful result is delivered through a channel
//! drained at tick start. Deliveries are keyed by session generation so a
//! reset can discard lookups from a torn-down session.

use crate::config::Config;
use crate::core::net::TitleLookup;
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader, Rgba, RgbaImage};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Probe order is fixed: `.jpg` before `.png`.
const POSTER_EXTENSIONS: &[&str] = &["jpg", "png"];

#[derive(Debug)]
pub enum ResolveError {
    AssetNotFound,
    AssetLoadError(image::ImageError),
    RemoteLookupFailed(String),
    RemoteFetchFailed(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetNotFound => write!(f, "no local poster file"),
            Self::AssetLoadError(e) => write!(f, "local poster unreadable: {e}"),
            Self::RemoteLookupFailed(e) => write!(f, "remote lookup failed: {e}"),
            Self::RemoteFetchFailed(e) => write!(f, "remote fetch failed: {e}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A remote resolution result headed back to the tick loop.
#[derive(Debug)]
pub struct PosterDelivery {
    pub generation: u64,
    pub lane: usize,
    pub title: String,
    pub bitmap: RgbaImage,
}

/// What the game session asks of the resolver: an immediately usable bitmap
/// for a poster, with any slow work deferred.
pub trait PosterProvider {
    fn acquire(&mut self, generation: u64, lane: usize, title: &str) -> RgbaImage;
}

pub struct ImageResolver {
    poster_dir: PathBuf,
    width: u32,
    height_cap: u32,
    lookup: Option<Arc<dyn TitleLookup>>,
    tx: mpsc::Sender<PosterDelivery>,
    rx: mpsc::Receiver<PosterDelivery>,
}

impl ImageResolver {
    pub fn new(cfg: &Config, lookup: Option<Arc<dyn TitleLookup>>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            poster_dir: cfg.poster_dir.clone(),
            width: cfg.poster_width,
            height_cap: cfg.poster_height_cap,
            lookup,
            tx,
            rx,
        }
    }

    /// Full synchronous chain: local, remote, placeholder. Always returns a
    /// usable bitmap of the configured footprint.
    pub fn resolve(&self, title: &str) -> RgbaImage {
        match self.probe_local(title) {
            Ok(bitmap) => return bitmap,
            Err(e) => debug!("Local poster for '{title}': {e}"),
        }
        if let Some(lookup) = &self.lookup {
            match remote_resolve(&**lookup, title, self.width, self.height_cap) {
                Ok(bitmap) => return bitmap,
                Err(e) => warn!("Remote poster for '{title}': {e}"),
            }
        }
        placeholder(title, self.width, self.height_cap)
    }

    /// Probes the poster directory for `<title>.<ext>` in fixed extension
    /// order; the first existing, loadable file wins. A file that exists but
    /// fails to decode does not stop the probe.
    fn probe_local(&self, title: &str) -> Result<RgbaImage, ResolveError> {
        let mut last_err = ResolveError::AssetNotFound;
        for ext in POSTER_EXTENSIONS {
            let path = self.poster_dir.join(format!("{title}.{ext}"));
            if !path.exists() {
                continue;
            }
            match open_image_fallback(&path) {
                Ok(img) => return Ok(scale_poster(&img.to_rgba8(), self.width, self.height_cap)),
                Err(e) => last_err = ResolveError::AssetLoadError(e),
            }
        }
        Err(last_err)
    }

    /// Drains one pending remote result, if any.
    pub fn poll_delivery(&self) -> Option<PosterDelivery> {
        self.rx.try_recv().ok()
    }
}

impl PosterProvider for ImageResolver {
    fn acquire(&mut self, generation: u64, lane: usize, title: &str) -> RgbaImage {
        match self.probe_local(title) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                debug!("Local poster for '{title}': {e}");
                if let Some(lookup) = self.lookup.clone() {
                    let tx = self.tx.clone();
                    let title = title.to_string();
                    let (width, cap) = (self.width, self.height_cap);
                    thread::spawn(move || {
                        match remote_resolve(&*lookup, &title, width, cap) {
                            Ok(bitmap) => {
                                let _ = tx.send(PosterDelivery {
                                    generation,
                                    lane,
                                    title,
                                    bitmap,
                                });
                            }
                            Err(e) => warn!("Remote poster for '{title}': {e}"),
                        }
                    });
                }
                placeholder(title, self.width, self.height_cap)
            }
        }
    }
}

fn remote_resolve(
    lookup: &dyn TitleLookup,
    title: &str,
    width: u32,
    height_cap: u32,
) -> Result<RgbaImage, ResolveError> {
    let url = lookup
        .lookup(title)
        .map_err(|e| ResolveError::RemoteLookupFailed(e.to_string()))?;
    let bytes = lookup
        .fetch(&url)
        .map_err(|e| ResolveError::RemoteFetchFailed(e.to_string()))?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| ResolveError::RemoteFetchFailed(e.to_string()))?;
    Ok(scale_poster(&img.to_rgba8(), width, height_cap))
}

/// Opens an image by its extension hint first, then re-reads with format
/// guessing if the hint fails (files are sometimes misnamed).
fn open_image_fallback(path: &Path) -> image::ImageResult<image::DynamicImage> {
    if let Ok(fmt) = ImageFormat::from_path(path) {
        let mut reader = ImageReader::open(path).map_err(image::ImageError::IoError)?;
        reader.set_format(fmt);
        if let Ok(img) = reader.decode() {
            return Ok(img);
        }
        warn!("Poster file '{}' is not valid {fmt:?}", path.display());
    }
    ImageReader::open(path)
        .map_err(image::ImageError::IoError)?
        .with_guessed_format()?
        .decode()
}

/// Scales to the fixed output width, preserving aspect ratio up to the
/// height cap: `out_h = min(ceil(width * src_h / src_w), height_cap)`.
pub fn scale_poster(src: &RgbaImage, width: u32, height_cap: u32) -> RgbaImage {
    let sw = u64::from(src.width().max(1));
    let sh = u64::from(src.height().max(1));
    let natural_h = (u64::from(width) * sh).div_ceil(sw) as u32;
    let out_h = natural_h.min(height_cap).max(1);
    if src.width() == width && src.height() == out_h {
        return src.clone();
    }
    image::imageops::resize(src, width, out_h, FilterType::Triangle)
}

/// Deterministic flat-color placeholder: the same title always gets the same
/// color, in the bright range so captions stay readable over it.
pub fn placeholder(title: &str, width: u32, height: u32) -> RgbaImage {
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(hasher.finish());
    let r = rng.random_range(100..=255u8);
    let g = rng.random_range(100..=255u8);
    let b = rng.random_range(100..=255u8);
    RgbaImage::from_pixel(width.max(1), height.max(1), Rgba([r, g, b, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::LookupError;
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder;

    struct StubLookup {
        poster: Option<Vec<u8>>,
    }

    impl TitleLookup for StubLookup {
        fn lookup(&self, _title: &str) -> Result<String, LookupError> {
            match self.poster {
                Some(_) => Ok("stub://poster".to_string()),
                None => Err(LookupError::NotFound),
            }
        }
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, LookupError> {
            self.poster
                .clone()
                .ok_or_else(|| LookupError::Http("unreachable".to_string()))
        }
    }

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]));
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(img.as_raw(), w, h, image::ExtendedColorType::Rgba8)
            .unwrap();
        out
    }

    fn test_config(dir: &Path) -> Config {
        Config {
            poster_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn resolve_never_fails_even_with_no_sources() {
        let cfg = test_config(Path::new("no/such/dir"));
        let resolver = ImageResolver::new(&cfg, None);
        for title in ["", "Unknown Movie", "WALL-E"] {
            let bitmap = resolver.resolve(title);
            assert_eq!(bitmap.width(), cfg.poster_width);
            assert_eq!(bitmap.height(), cfg.poster_height_cap);
        }
    }

    #[test]
    fn remote_not_found_falls_through_to_placeholder() {
        let cfg = test_config(Path::new("no/such/dir"));
        let resolver = ImageResolver::new(&cfg, Some(Arc::new(StubLookup { poster: None })));
        let bitmap = resolver.resolve("Inception");
        assert_eq!(
            (bitmap.width(), bitmap.height()),
            (cfg.poster_width, cfg.poster_height_cap)
        );
        // The placeholder is deterministic per title.
        assert_eq!(
            resolver.resolve("Inception").get_pixel(0, 0),
            bitmap.get_pixel(0, 0)
        );
    }

    #[test]
    fn remote_hit_is_scaled_to_the_poster_footprint() {
        let cfg = test_config(Path::new("no/such/dir"));
        // 200x400 source: aspect 2.0, natural height 200 at width 100,
        // capped at 150.
        let resolver = ImageResolver::new(
            &cfg,
            Some(Arc::new(StubLookup {
                poster: Some(png_bytes(200, 400)),
            })),
        );
        let bitmap = resolver.resolve("Tall Poster");
        assert_eq!((bitmap.width(), bitmap.height()), (100, 150));
    }

    #[test]
    fn local_file_wins_over_remote() {
        let dir = std::env::temp_dir().join("reelrunner_assets_local");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Up.png"), png_bytes(100, 100)).unwrap();

        let cfg = test_config(&dir);
        let resolver = ImageResolver::new(&cfg, Some(Arc::new(StubLookup { poster: None })));
        let bitmap = resolver.resolve("Up");
        // 100x100 source at width 100: aspect preserved, under the cap.
        assert_eq!((bitmap.width(), bitmap.height()), (100, 100));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_local_file_falls_through() {
        let dir = std::env::temp_dir().join("reelrunner_assets_corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Broken.jpg"), b"not an image").unwrap();

        let cfg = test_config(&dir);
        let resolver = ImageResolver::new(&cfg, None);
        let bitmap = resolver.resolve("Broken");
        assert_eq!(
            (bitmap.width(), bitmap.height()),
            (cfg.poster_width, cfg.poster_height_cap)
        );
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn scale_policy_never_upscales_past_the_cap() {
        let wide = RgbaImage::from_pixel(400, 100, Rgba([0, 0, 0, 255]));
        let scaled = scale_poster(&wide, 100, 150);
        assert_eq!((scaled.width(), scaled.height()), (100, 25));

        let tall = RgbaImage::from_pixel(100, 1000, Rgba([0, 0, 0, 255]));
        let scaled = scale_poster(&tall, 100, 150);
        assert_eq!((scaled.width(), scaled.height()), (100, 150));
    }

    #[test]
    fn acquire_returns_placeholder_and_delivers_remote_result() {
        let cfg = test_config(Path::new("no/such/dir"));
        let mut resolver = ImageResolver::new(
            &cfg,
            Some(Arc::new(StubLookup {
                poster: Some(png_bytes(100, 150)),
            })),
        );
        let immediate = resolver.acquire(3, 0, "Dune");
        assert_eq!(
            (immediate.width(), immediate.height()),
            (cfg.poster_width, cfg.poster_height_cap)
        );

        // The worker delivers the real bitmap tagged with our generation.
        let delivery = {
            let mut d = resolver.poll_delivery();
            let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
            while d.is_none() && std::time::Instant::now() < deadline {
                std::thread::sleep(std::time::Duration::from_millis(5));
                d = resolver.poll_delivery();
            }
            d.expect("remote delivery")
        };
        assert_eq!(delivery.generation, 3);
        assert_eq!(delivery.lane, 0);
        assert_eq!(delivery.title, "Dune");
    }
}
