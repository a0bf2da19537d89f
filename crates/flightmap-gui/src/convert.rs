use flightmap_core::config::Rgba;
use flightmap_core::error::Result;
use flightmap_core::export::{PixelBuffer, PixelFormat};

/// Convert an egui screenshot into a BGRA8888 buffer, the layout the map
/// export hands to the PNG encoder.
pub fn color_image_to_bgra(image: &egui::ColorImage) -> Result<PixelBuffer> {
    let [w, h] = image.size;
    let mut data = Vec::with_capacity(w * h * 4);
    for px in &image.pixels {
        let [r, g, b, a] = px.to_srgba_unmultiplied();
        data.extend_from_slice(&[b, g, r, a]);
    }
    PixelBuffer::new(w as u32, h as u32, PixelFormat::Bgra8888, data)
}

/// Cut the map rectangle (in points) out of a full-window screenshot.
pub fn crop_screenshot(
    image: &egui::ColorImage,
    map_rect: egui::Rect,
    pixels_per_point: f32,
) -> Result<PixelBuffer> {
    let full = color_image_to_bgra(image)?;
    let [img_w, img_h] = [full.width(), full.height()];

    let px = |v: f32, max: u32| ((v * pixels_per_point).round().max(0.0) as u32).min(max);
    let x0 = px(map_rect.min.x, img_w);
    let y0 = px(map_rect.min.y, img_h);
    let x1 = px(map_rect.max.x, img_w);
    let y1 = px(map_rect.max.y, img_h);

    full.crop(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

pub fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}
