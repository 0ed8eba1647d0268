use image::{DynamicImage, GenericImageView};

use crate::error::MazeError;
use crate::grid::{Cell, Grid};

/// Decode an image into a passability grid: any channel value > 0 is an open
/// passage, 0 is a wall.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, MazeError> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    if width == 0 || height == 0 {
        return Err(MazeError::EmptyImage);
    }

    let mut cells = vec![vec![Cell::Wall; width]; height];

    for y in 0..height {
        for x in 0..width {
            let p = img.get_pixel(x as u32, y as u32);

            cells[y][x] = if p.0[0] > 0 { Cell::Open } else { Cell::Wall };
        }
    }

    Ok(Grid {
        width,
        height,
        cells,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_parse_img_thresholds_on_zero() {
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(1, 0, Luma([255]));
        img.put_pixel(2, 1, Luma([1]));

        let grid = parse_img(&DynamicImage::ImageLuma8(img)).unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert!(!grid.is_open(0, 0));
        assert!(grid.is_open(1, 0));
        assert!(grid.is_open(2, 1));
    }

    #[test]
    fn test_parse_img_rejects_empty() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(parse_img(&img), Err(MazeError::EmptyImage)));
    }
}
