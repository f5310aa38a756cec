use super::error::StoreError;
use image::{GrayImage, Luma};
use ndarray::Array2;
use std::path::Path;

/// File name of the projection image of a frame, e.g. `frame_000042.png`.
pub fn frame_image_name(frame_index: usize) -> String {
    format!("frame_{:06}.png", frame_index)
}

/// Renders a 2-D map as an 8-bit grayscale image scaled by its maximum.
///
/// Array rows map to image rows, so element `[r, c]` lands at pixel `(c, r)`.
pub fn render_map(map: &Array2<f64>) -> GrayImage {
    let (rows, cols) = map.dim();
    let max = map
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };

    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let value = map[[y as usize, x as usize]];
        let level = if value.is_finite() {
            (value * scale).round().clamp(0.0, 255.0) as u8
        } else {
            0
        };
        Luma([level])
    })
}

pub fn write_map_png<P: AsRef<Path>>(path: P, map: &Array2<f64>) -> Result<(), StoreError> {
    render_map(map).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn frame_image_name_is_zero_padded() {
        assert_eq!(frame_image_name(42), "frame_000042.png");
    }

    #[test]
    fn render_map_scales_to_the_maximum() {
        let map = array![[0.0, 1.0, 2.0], [4.0, 0.0, 0.0]];
        let img = render_map(&map);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 1)[0], 255);
        assert_eq!(img.get_pixel(2, 0)[0], 128);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn all_zero_map_renders_black() {
        let img = render_map(&Array2::zeros((2, 2)));
        assert!(img.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn write_map_png_creates_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(frame_image_name(0));
        write_map_png(&path, &array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let decoded = image::open(&path).unwrap().to_luma8();
        assert_eq!(decoded.get_pixel(1, 1)[0], 255);
    }
}
