use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::HashMap;

use crate::models::Region;

/// Group edge pixels into connected regions and keep those with enough
/// supporting pixels.
pub fn find_regions(edges: &GrayImage, min_area: u32) -> Vec<Region> {
    // Label connected components (white pixels = edges)
    let labeled = connected_components(edges, Connectivity::Eight, Luma([0]));

    let mut regions: HashMap<u32, Region> = HashMap::new();

    for (x, y, label) in labeled.enumerate_pixels() {
        let label_val = label[0];
        if label_val == 0 {
            continue; // Skip background
        }

        regions
            .entry(label_val)
            .and_modify(|region| {
                region.min_x = region.min_x.min(x);
                region.min_y = region.min_y.min(y);
                region.max_x = region.max_x.max(x);
                region.max_y = region.max_y.max(y);
                region.pixel_count += 1;
            })
            .or_insert(Region {
                label: label_val,
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                pixel_count: 1,
            });
    }

    let mut regions: Vec<_> = regions
        .into_values()
        .filter(|region| region.pixel_count >= min_area)
        .collect();
    regions.sort_by_key(|region| region.label);
    regions
}
