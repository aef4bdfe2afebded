//! Full-page image placement.

use lopdf::content::Operation;
use lopdf::{Object, Stream, dictionary};

use crate::domain::config::PageSetup;
use crate::domain::raster::RasterImage;

/// Where an image lands on the page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale uniformly to the largest size that fits the drawable area and
/// center the result.
pub fn fit_image(width_px: u32, height_px: u32, page: &PageSetup) -> Placement {
    let avail_w = page.drawable_width();
    let avail_h = page.drawable_height();
    let scale = (avail_w / width_px as f32).min(avail_h / height_px as f32);
    let width = width_px as f32 * scale;
    let height = height_px as f32 * scale;
    Placement {
        x: page.margin + (avail_w - width) / 2.0,
        y: page.margin + (avail_h - height) / 2.0,
        width,
        height,
    }
}

pub fn image_xobject(image: &RasterImage) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(image.width())),
            "Height" => Object::Integer(i64::from(image.height())),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
        },
        image.rgb().to_vec(),
    )
}

/// Draw the XObject registered as `name` at `placement`. No axes, frame or
/// caption.
pub fn image_operations(name: &str, placement: &Placement) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                placement.width.into(),
                0.0f32.into(),
                0.0f32.into(),
                placement.height.into(),
                placement.x.into(),
                placement.y.into(),
            ],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wide_image_fills_width_and_centers_vertically() {
        let page = PageSetup::default();
        let p = fit_image(1600, 400, &page);
        assert_relative_eq!(p.width, page.drawable_width());
        assert_relative_eq!(p.height, 198.0);
        assert_relative_eq!(p.x, page.margin);
        assert_relative_eq!(p.y, page.margin + (504.0 - 198.0) / 2.0);
    }

    #[test]
    fn tall_image_fills_height_and_centers_horizontally() {
        let page = PageSetup::default();
        let p = fit_image(100, 200, &page);
        assert_relative_eq!(p.height, page.drawable_height());
        assert_relative_eq!(p.width, 252.0);
        assert_relative_eq!(p.x, page.margin + (792.0 - 252.0) / 2.0);
    }

    #[test]
    fn small_image_is_scaled_up() {
        let page = PageSetup::default();
        let p = fit_image(12, 8, &page);
        assert!(p.width > 12.0 && p.height > 8.0);
        assert_relative_eq!(p.width / p.height, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn operations_paint_the_named_xobject_once() {
        let ops = image_operations("Im1", &fit_image(10, 10, &PageSetup::default()));
        let painted: Vec<_> = ops.iter().filter(|op| op.operator == "Do").collect();
        assert_eq!(painted.len(), 1);
        assert_eq!(painted[0].operands[0].as_name().unwrap(), b"Im1");
    }

    #[test]
    fn xobject_describes_rgb_pixels() {
        let raster = RasterImage::new(2, 1, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let stream = image_xobject(&raster);
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 2);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 1);
        assert_eq!(stream.content.len(), 6);
    }
}
