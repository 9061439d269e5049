use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::Detection;

const BOX_COLOR: Rgb<u8> = Rgb([220, 40, 40]);

/// Render detections as hollow rectangles over an RGB copy of the image.
pub fn draw_detections(img: &DynamicImage, detections: &[Detection]) -> RgbImage {
    let mut canvas = img.to_rgb8();

    for detection in detections {
        let rect = Rect::at(detection.x as i32, detection.y as i32)
            .of_size(detection.width.max(1), detection.height.max(1));
        draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);

        // Second pass gives a 2px outline
        if detection.width > 2 && detection.height > 2 {
            let inner = Rect::at(detection.x as i32 + 1, detection.y as i32 + 1)
                .of_size(detection.width - 2, detection.height - 2);
            draw_hollow_rect_mut(&mut canvas, inner, BOX_COLOR);
        }
    }

    canvas
}
