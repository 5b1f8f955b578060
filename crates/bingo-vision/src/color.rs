use crate::error::VisionError;
use crate::geometry::PixelMask;
use bingo_data::ColorSample;
use image::RgbImage;

/// Averages the RGB values of `rgb` under `mask`, channel by channel.
///
/// The mask usually comes from the grayscale pipeline while `rgb` is the
/// original screenshot, which is what lets a shape found in intensity space
/// be classified by its true color. Mask points outside the image are
/// skipped; if nothing remains the result is [`VisionError::EmptyMask`].
pub fn color_stats(rgb: &RgbImage, mask: &PixelMask) -> Result<ColorSample, VisionError> {
    let mut sum = [0.0_f64; 3];
    let mut count = 0_u64;

    for point in mask {
        let Some(pixel) = rgb.get_pixel_checked(point.x, point.y) else {
            continue;
        };
        sum[0] += pixel[0] as f64;
        sum[1] += pixel[1] as f64;
        sum[2] += pixel[2] as f64;
        count += 1;
    }

    if count == 0 {
        return Err(VisionError::EmptyMask);
    }
    let n = count as f64;
    Ok(ColorSample::new(sum[0] / n, sum[1] / n, sum[2] / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_average_is_per_channel() {
        let mut rgb = RgbImage::new(4, 4);
        rgb.put_pixel(0, 0, image::Rgb([10, 20, 30]));
        rgb.put_pixel(1, 0, image::Rgb([30, 40, 50]));

        let mask = vec![Point::new(0, 0), Point::new(1, 0)];
        let sample = color_stats(&rgb, &mask).expect("two masked pixels");
        assert_eq!(sample, ColorSample::new(20.0, 30.0, 40.0));
    }

    #[test]
    fn test_empty_mask_is_an_error() {
        let rgb = RgbImage::new(4, 4);
        assert_eq!(color_stats(&rgb, &Vec::new()), Err(VisionError::EmptyMask));
    }

    #[test]
    fn test_out_of_bounds_points_are_ignored() {
        let rgb = RgbImage::from_pixel(3, 3, image::Rgb([90, 90, 90]));
        let mask = vec![Point::new(1, 1), Point::new(50, 50)];
        let sample = color_stats(&rgb, &mask).expect("one point is in bounds");
        assert_eq!(sample, ColorSample::new(90.0, 90.0, 90.0));
    }

    #[test]
    fn test_all_points_out_of_bounds_is_an_error() {
        let rgb = RgbImage::new(3, 3);
        let mask = vec![Point::new(10, 10), Point::new(11, 11)];
        assert_eq!(color_stats(&rgb, &mask), Err(VisionError::EmptyMask));
    }
}
