//! Fixed preprocessing step between an uploaded image and the classifier:
//! decode, force 3-channel RGB, resize to a fixed square, scale pixel values
//! to `[0, 1]` and add a batch dimension of 1 (NHWC).

use image::imageops::FilterType;
use tract_onnx::prelude::*;

/// Model input resolution (width and height).
pub const INPUT_SIZE: u32 = 128;

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Shape uploaded image bytes into a `[1, 128, 128, 3]` `f32` tensor.
pub fn image_to_tensor(bytes: &[u8]) -> Result<Tensor, PreprocessError> {
    let img = image::load_from_memory(bytes)?
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();
    let side = INPUT_SIZE as usize;
    let arr = tract_ndarray::Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
        img.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    });
    Ok(arr.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 0, 0]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodable_image_yields_batched_unit_scaled_tensor() {
        let tensor = image_to_tensor(&tiny_png()).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);

        let view = tensor.to_array_view::<f32>().unwrap();
        for &v in view.iter() {
            assert!((0.0..=1.0).contains(&v));
        }
        // Solid red input: the red channel stays saturated after resizing.
        assert!((view[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn undecodable_bytes_error_without_panicking() {
        assert!(image_to_tensor(b"definitely not an image").is_err());
        assert!(image_to_tensor(&[]).is_err());
    }
}
