/// Connected pixel region in an edge image, tracked by its bounding box.
#[derive(Debug, Clone)]
pub struct Region {
    pub label: u32,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn bbox_area(&self) -> u32 {
        self.width() * self.height()
    }

    /// Fraction of the bounding box covered by region pixels.
    pub fn fill_ratio(&self) -> f32 {
        let area = self.bbox_area();
        if area == 0 {
            return 0.0;
        }
        self.pixel_count as f32 / area as f32
    }

    /// Regions tracing nearly the whole frame are border artifacts, not objects.
    pub fn spans_frame(&self, img_width: u32, img_height: u32) -> bool {
        self.width() * 10 >= img_width * 9 && self.height() * 10 >= img_height * 9
    }

    pub fn center(&self) -> (u32, u32) {
        ((self.min_x + self.max_x) / 2, (self.min_y + self.max_y) / 2)
    }
}

/// A single detected object in pixel coordinates.
#[derive(Debug, Clone)]
pub struct Detection {
    pub class_id: u32,
    pub confidence: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Detection {
    pub fn from_region(class_id: u32, region: &Region) -> Self {
        Self {
            class_id,
            confidence: region.fill_ratio().clamp(0.05, 1.0),
            x: region.min_x,
            y: region.min_y,
            width: region.width(),
            height: region.height(),
        }
    }

    /// One YOLO label line: class index plus center/size normalized to the
    /// image dimensions.
    pub fn yolo_line(&self, img_width: u32, img_height: u32) -> String {
        let x_center = (self.x as f64 + self.width as f64 / 2.0) / img_width as f64;
        let y_center = (self.y as f64 + self.height as f64 / 2.0) / img_height as f64;
        let width = self.width as f64 / img_width as f64;
        let height = self.height as f64 / img_height as f64;

        format!(
            "{} {:.6} {:.6} {:.6} {:.6}\n",
            self.class_id, x_center, y_center, width, height
        )
    }
}
