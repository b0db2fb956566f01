//! PNG encoding for figure canvases.
//!
//! Filled-contour figures usually hold only a few dozen distinct colors, so
//! the encoder first tries an indexed image (color type 3) and falls back to
//! full RGBA (color type 6) when more than 256 colors are present.

use plot_common::{PlotError, PlotResult};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Color type byte of the IHDR chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorType {
    Indexed = 3,
    Rgba = 6,
}

/// Palette of packed RGBA colors plus one index per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: Vec<[u8; 4]>,
    pub indices: Vec<u8>,
}

#[inline(always)]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

impl Palette {
    /// Build a palette, or `None` when the image has more than 256 colors.
    pub fn extract(rgba: &[u8]) -> Option<Self> {
        if rgba.len() / 4 >= PARALLEL_THRESHOLD {
            Self::extract_parallel(rgba)
        } else {
            Self::extract_sequential(rgba)
        }
    }

    fn extract_sequential(rgba: &[u8]) -> Option<Self> {
        let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
        let mut colors = Vec::with_capacity(MAX_PALETTE_SIZE);
        let mut indices = Vec::with_capacity(rgba.len() / 4);

        for px in rgba.chunks_exact(4) {
            let key = pack(px);
            let idx = match lookup.get(&key) {
                Some(&idx) => idx,
                None => {
                    if colors.len() == MAX_PALETTE_SIZE {
                        return None;
                    }
                    let idx = colors.len() as u8;
                    colors.push([px[0], px[1], px[2], px[3]]);
                    lookup.insert(key, idx);
                    idx
                }
            };
            indices.push(idx);
        }
        Some(Self { colors, indices })
    }

    /// Unique colors are gathered per chunk in parallel, merged, then every
    /// pixel is mapped to its index in a second parallel pass.
    fn extract_parallel(rgba: &[u8]) -> Option<Self> {
        let chunk_px = (rgba.len() / 4 / rayon::current_num_threads()).max(256);

        let unique = rgba
            .par_chunks(chunk_px * 4)
            .map(|chunk| {
                let mut seen = HashSet::with_capacity(MAX_PALETTE_SIZE);
                for px in chunk.chunks_exact(4) {
                    seen.insert(pack(px));
                    if seen.len() > MAX_PALETTE_SIZE {
                        return None;
                    }
                }
                Some(seen)
            })
            .try_reduce(HashSet::new, |mut a, b| {
                a.extend(b);
                (a.len() <= MAX_PALETTE_SIZE).then_some(a)
            })?;

        let mut keys: Vec<u32> = unique.into_iter().collect();
        keys.sort_unstable();
        let lookup: HashMap<u32, u8> = keys
            .iter()
            .enumerate()
            .map(|(i, &k)| (k, i as u8))
            .collect();

        let indices = rgba
            .par_chunks_exact(4)
            .map(|px| lookup.get(&pack(px)).copied().unwrap_or(0))
            .collect();
        let colors = keys.into_iter().map(u32::to_le_bytes).collect();

        Some(Self { colors, indices })
    }
}

/// Encode RGBA pixels, choosing indexed or RGBA encoding automatically.
pub fn create_png_auto(rgba: &[u8], width: usize, height: usize) -> PlotResult<Vec<u8>> {
    check_len(rgba.len(), width * height * 4)?;
    match Palette::extract(rgba) {
        Some(palette) => create_png_indexed(&palette, width, height),
        None => create_png(rgba, width, height),
    }
}

/// Encode an indexed PNG from a palette.
pub fn create_png_indexed(palette: &Palette, width: usize, height: usize) -> PlotResult<Vec<u8>> {
    check_len(palette.indices.len(), width * height)?;

    let mut png = start_png(width, height, ColorType::Indexed);

    let plte: Vec<u8> = palette.colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.colors.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.colors.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(&palette.indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode a full-color RGBA PNG.
pub fn create_png(rgba: &[u8], width: usize, height: usize) -> PlotResult<Vec<u8>> {
    check_len(rgba.len(), width * height * 4)?;

    let mut png = start_png(width, height, ColorType::Rgba);
    let idat = deflate_scanlines(rgba, width * 4, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn check_len(actual: usize, expected: usize) -> PlotResult<()> {
    if actual != expected {
        return Err(PlotError::EncodeError(format!(
            "pixel buffer holds {} bytes, expected {}",
            actual, expected
        )));
    }
    Ok(())
}

/// Signature plus IHDR.
fn start_png(width: usize, height: usize, color_type: ColorType) -> Vec<u8> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type as u8);
    ihdr.extend_from_slice(&[0, 0, 0]); // compression, filter, interlace
    write_chunk(&mut png, b"IHDR", &ihdr);
    png
}

/// Prefix every row with filter type 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> PlotResult<Vec<u8>> {
    let mut raw = Vec::with_capacity(height * (row_bytes + 1));
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let compress = |raw: &[u8]| -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
        encoder.write_all(raw)?;
        encoder.finish()
    };
    compress(&raw).map_err(|e| PlotError::EncodeError(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);

    png.extend_from_slice(kind);
    png.extend_from_slice(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_sequential() {
        let pixels = [
            255, 0, 0, 255, // red
            0, 0, 255, 255, // blue
            255, 0, 0, 255, // red again
        ];
        let palette = Palette::extract(&pixels).unwrap();
        assert_eq!(palette.colors.len(), 2);
        assert_eq!(palette.indices, vec![0, 1, 0]);
    }

    #[test]
    fn test_palette_parallel_matches_colors() {
        // 128x128 with 16 distinct colors triggers the parallel path.
        let mut pixels = Vec::with_capacity(128 * 128 * 4);
        for y in 0..128u32 {
            for x in 0..128u32 {
                let band = ((x / 32) * 4 + y / 32) as u8;
                pixels.extend_from_slice(&[band * 10, 255 - band, 7, 255]);
            }
        }
        let palette = Palette::extract(&pixels).unwrap();
        assert_eq!(palette.colors.len(), 16);
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            let c = palette.colors[palette.indices[i] as usize];
            assert_eq!(&c[..], px);
        }
    }

    #[test]
    fn test_too_many_colors() {
        let pixels: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
            .collect();
        assert!(Palette::extract(&pixels).is_none());
    }

    #[test]
    fn test_png_signature_and_type() {
        let pixels = [0u8, 0, 0, 255, 255, 255, 255, 255];
        let png = create_png_auto(&pixels, 2, 1).unwrap();
        assert_eq!(&png[..8], &SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        // color type byte follows width, height and bit depth
        assert_eq!(png[25], ColorType::Indexed as u8);

        let png = create_png(&pixels, 2, 1).unwrap();
        assert_eq!(png[25], ColorType::Rgba as u8);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(create_png(&[0u8; 7], 2, 1).is_err());
    }
}
