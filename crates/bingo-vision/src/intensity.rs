use image::GrayImage;

/// Adds `offset` to every pixel, clamping into the valid range.
///
/// With `cut_max` set the ceiling drops to 254 so that 255 stays free for
/// the background sentinel. Screenshots are shifted by -1 with `cut_max`
/// before any fill runs, which is what makes the sentinel unambiguous.
pub fn shift(grid: &GrayImage, offset: i16, cut_max: bool) -> GrayImage {
    let ceiling: i32 = if cut_max { 254 } else { 255 };
    GrayImage::from_fn(grid.width(), grid.height(), |x, y| {
        let value = grid.get_pixel(x, y)[0] as i32 + offset as i32;
        image::Luma([value.clamp(0, ceiling) as u8])
    })
}
