use crate::classifier::interface::ImageTensor;
use image::{imageops, DynamicImage};

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
    let image = image::load_from_memory(bytes)?;
    Ok(image)
}

/// Squashes the image into a `size` x `size` square with nearest-neighbor
/// sampling. Aspect ratio is not preserved.
pub fn resize_image(image: &DynamicImage, size: u32) -> DynamicImage {
    image.resize_exact(size, size, imageops::FilterType::Nearest)
}

pub fn image_to_tensor(image: &DynamicImage) -> ImageTensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    ImageTensor::from_shape_fn((1, height, width, 3), |(_, y, x, c)| {
        rgb.get_pixel(x as u32, y as u32)[c] as f32
    })
}

pub fn image_bytes_to_tensor(
    bytes: &[u8],
    size: u32,
) -> Result<ImageTensor, Box<dyn std::error::Error + Send + Sync>> {
    let image = decode_image(bytes)?;
    let resized = resize_image(&image, size);
    Ok(image_to_tensor(&resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode_png(image: &DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_tensor_shape_is_nhwc() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(300, 200, Rgb([10, 20, 30])));

        let tensor = image_bytes_to_tensor(&encode_png(&image), 180).unwrap();

        assert_eq!(tensor.shape(), &[1, 180, 180, 3]);
    }

    #[test]
    fn test_tensor_keeps_raw_channel_values() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([255, 128, 0])));

        let tensor = image_to_tensor(&image);

        assert_eq!(tensor[[0, 0, 0, 0]], 255.0);
        assert_eq!(tensor[[0, 0, 0, 1]], 128.0);
        assert_eq!(tensor[[0, 3, 3, 2]], 0.0);
    }

    #[test]
    fn test_nearest_neighbor_does_not_blend() {
        // 2x2 checkerboard scaled up must only contain the original colors
        let mut buffer = ImageBuffer::new(2, 2);
        buffer.put_pixel(0, 0, Rgb([255u8, 255, 255]));
        buffer.put_pixel(1, 0, Rgb([0, 0, 0]));
        buffer.put_pixel(0, 1, Rgb([0, 0, 0]));
        buffer.put_pixel(1, 1, Rgb([255, 255, 255]));
        let image = DynamicImage::ImageRgb8(buffer);

        let tensor = image_to_tensor(&resize_image(&image, 16));

        assert!(tensor.iter().all(|&v| v == 0.0 || v == 255.0));
        assert_eq!(tensor[[0, 0, 0, 0]], 255.0);
        assert_eq!(tensor[[0, 0, 15, 0]], 0.0);
    }

    #[test]
    fn test_row_and_column_order() {
        // left column red, right column blue
        let mut buffer = ImageBuffer::new(2, 1);
        buffer.put_pixel(0, 0, Rgb([255u8, 0, 0]));
        buffer.put_pixel(1, 0, Rgb([0, 0, 255]));
        let image = DynamicImage::ImageRgb8(buffer);

        let tensor = image_to_tensor(&image);

        assert_eq!(tensor.shape(), &[1, 1, 2, 3]);
        assert_eq!(tensor[[0, 0, 0, 0]], 255.0);
        assert_eq!(tensor[[0, 0, 1, 2]], 255.0);
        assert_eq!(tensor[[0, 0, 1, 0]], 0.0);
    }

    #[test]
    fn test_undecodable_bytes_fail() {
        let result = image_bytes_to_tensor(b"definitely not an image", 180);
        assert!(result.is_err());
    }
}
