//! Placeholder JPEGs for the demo dataset.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::{Rgb, RgbImage, codecs::jpeg::JpegEncoder};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::fixtures::IMAGES;

pub const MEDIA_DIRS: [&str; 8] = [
    "categories",
    "regions",
    "artisans",
    "products",
    "stories",
    "gallery",
    "shop_logos",
    "profiles",
];

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 600;
pub const QUALITY: u8 = 85;

const BAND_ORIGIN: u32 = 40;
const BAND_HEIGHT: u32 = 56;
const BAND_PAD: u32 = 14;
const BAND_COLOR: Rgb<u8> = Rgb([245, 245, 240]);
const INK: Rgb<u8> = Rgb([24, 24, 24]);

// 5x7 glyphs, one byte per row, bit 4 is the leftmost column.
const GLYPH_ROWS: u32 = 7;
const GLYPH_COLS: u32 = 5;
const SCALE: u32 = 4;
const ADVANCE: u32 = (GLYPH_COLS + 1) * SCALE;

static LETTERS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
];

static DIGITS: [[u8; 7]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
];

/// Upper-case glyph for `ch`. Anything else renders as a gap.
fn glyph(ch: char) -> Option<&'static [u8; 7]> {
    let ch = ch.to_ascii_uppercase();
    match ch {
        'A'..='Z' => LETTERS.get((ch as u8 - b'A') as usize),
        '0'..='9' => DIGITS.get((ch as u8 - b'0') as usize),
        _ => None,
    }
}

/// Fill colour for a label. Stable across runs and platforms; every channel
/// lies in 40..=200.
pub fn color_for(label: &str) -> Rgb<u8> {
    let mut rng = StdRng::seed_from_u64(fnv1a(label.as_bytes()));
    Rgb([
        rng.gen_range(40..=200),
        rng.gen_range(40..=200),
        rng.gen_range(40..=200),
    ])
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Solid fill with a light band at (40, 40) carrying the label.
pub fn render(label: &str) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, color_for(label));
    let chars = label.chars().count() as u32;
    let band_width = (2 * BAND_PAD + chars * ADVANCE).min(WIDTH - 2 * BAND_ORIGIN);
    let band_right = BAND_ORIGIN + band_width;
    for y in BAND_ORIGIN..BAND_ORIGIN + BAND_HEIGHT {
        for x in BAND_ORIGIN..band_right {
            img.put_pixel(x, y, BAND_COLOR);
        }
    }

    let top = BAND_ORIGIN + (BAND_HEIGHT - GLYPH_ROWS * SCALE) / 2;
    let mut left = BAND_ORIGIN + BAND_PAD;
    for ch in label.chars() {
        if left + GLYPH_COLS * SCALE > band_right {
            break;
        }
        if let Some(rows) = glyph(ch) {
            draw_glyph(&mut img, rows, left, top);
        }
        left += ADVANCE;
    }
    img
}

fn draw_glyph(img: &mut RgbImage, rows: &[u8; 7], left: u32, top: u32) {
    for (row, bits) in (0..GLYPH_ROWS).zip(rows) {
        for col in 0..GLYPH_COLS {
            if *bits & (0x10u8 >> col) == 0 {
                continue;
            }
            for dy in 0..SCALE {
                for dx in 0..SCALE {
                    img.put_pixel(left + col * SCALE + dx, top + row * SCALE + dy, INK);
                }
            }
        }
    }
}

/// Write one placeholder unless the file already exists. Returns whether a
/// file was written.
pub fn write_placeholder(path: &Path, label: &str) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, QUALITY)
        .encode_image(&render(label))
        .with_context(|| format!("encoding {}", path.display()))?;
    Ok(true)
}

/// Create the media sub-directories and any missing placeholder images.
/// Returns how many files were written.
pub async fn write_placeholders(media_root: &Path) -> anyhow::Result<usize> {
    for dir in MEDIA_DIRS {
        tokio::fs::create_dir_all(media_root.join(dir)).await?;
    }

    let root: PathBuf = media_root.to_path_buf();
    let written = tokio::task::spawn_blocking(move || -> anyhow::Result<usize> {
        let mut written = 0;
        for (rel, label) in IMAGES {
            if write_placeholder(&root.join(rel), label)? {
                written += 1;
            }
        }
        Ok(written)
    })
    .await??;

    tracing::info!(
        media_root = %media_root.display(),
        written,
        total = IMAGES.len(),
        "placeholder images ready"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_stable_and_in_range() {
        let a = color_for("Textiles");
        assert_eq!(a, color_for("Textiles"));
        for label in ["Textiles", "Pottery", "Blue Vase", ""] {
            let Rgb(channels) = color_for(label);
            assert!(channels.iter().all(|c| (40..=200).contains(c)));
        }
    }

    #[test]
    fn band_is_drawn_over_the_fill() {
        let img = render("Loom");
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(*img.get_pixel(BAND_ORIGIN, BAND_ORIGIN), BAND_COLOR);
        assert_eq!(*img.get_pixel(0, 0), color_for("Loom"));
        assert_eq!(*img.get_pixel(WIDTH - 1, HEIGHT - 1), color_for("Loom"));
    }

    #[test]
    fn label_is_lettered_on_the_band() {
        let img = render("Loom");
        let top = BAND_ORIGIN + (BAND_HEIGHT - GLYPH_ROWS * SCALE) / 2;
        let left = BAND_ORIGIN + BAND_PAD;

        // L starts with its left stroke, O with a blank corner.
        assert_eq!(*img.get_pixel(left, top), INK);
        assert_eq!(*img.get_pixel(left + ADVANCE, top), BAND_COLOR);
        // bottom bar of the L
        assert_eq!(*img.get_pixel(left + 4 * SCALE, top + 6 * SCALE), INK);

        let inked = |img: &RgbImage| img.pixels().filter(|p| **p == INK).count();
        assert!(inked(&img) > 0);
        assert_eq!(inked(&render("")), 0);
        assert_eq!(inked(&render("loom")), inked(&img));
    }

    #[test]
    fn long_labels_stay_inside_the_band() {
        let img = render(&"W".repeat(60));
        let right = WIDTH - BAND_ORIGIN;
        for y in 0..HEIGHT {
            assert_ne!(*img.get_pixel(right, y), INK);
        }
    }

    #[tokio::test]
    async fn writes_every_placeholder_once() {
        let dir = tempfile::tempdir().expect("tempdir");

        let first = write_placeholders(dir.path()).await.expect("first pass");
        let unique: std::collections::HashSet<_> = IMAGES.iter().map(|(p, _)| *p).collect();
        assert_eq!(first, unique.len());
        for sub in MEDIA_DIRS {
            assert!(dir.path().join(sub).is_dir());
        }

        let dims = image::image_dimensions(dir.path().join("products/kantha-throw.jpg"))
            .expect("decodable jpeg");
        assert_eq!(dims, (WIDTH, HEIGHT));

        let second = write_placeholders(dir.path()).await.expect("second pass");
        assert_eq!(second, 0);
    }

    #[test]
    fn existing_files_are_left_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gallery/loom.jpg");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, b"keep me").expect("write");

        assert!(!write_placeholder(&path, "Loom").expect("skip"));
        assert_eq!(std::fs::read(&path).expect("read"), b"keep me");
    }
}
