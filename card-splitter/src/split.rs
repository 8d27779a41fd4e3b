use clap::Args;
use image::{imageops, DynamicImage, GenericImageView};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::PieceNaming;
use crate::grid::{cell_boxes, BoundingBox, CellSize, GridSpec};

#[derive(Args, Clone)]
pub struct SplitArgs {
    #[arg(long, help = "The image you want to split")]
    pub target: String,
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Number of cards wide (integer)"
    )]
    pub width: u32,
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Number of cards high (integer)"
    )]
    pub height: u32,
    #[arg(long, default_value = ".", help = "Directory the pieces are written to")]
    pub output_path: String,
}

/// Copy `bbox` out of `img`. Parts of the box past the image edge stay
/// zero-filled so the piece always has the box's size.
fn crop_padded(
    img: &DynamicImage,
    bbox: BoundingBox,
) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (width, height) = img.dimensions();
    if bbox.right <= width && bbox.bottom <= height {
        return Ok(img.crop_imm(bbox.left, bbox.top, bbox.width(), bbox.height()));
    }

    let mut piece = DynamicImage::new(bbox.width(), bbox.height(), img.color());
    if bbox.left < width && bbox.top < height {
        let visible = img.crop_imm(
            bbox.left,
            bbox.top,
            bbox.right.min(width) - bbox.left,
            bbox.bottom.min(height) - bbox.top,
        );
        paste_at_origin(&mut piece, &visible)?;
    }
    Ok(piece)
}

/// Paste `src` into the top-left of `dst` without changing the pixel type.
/// Both images must share a color type.
fn paste_at_origin(
    dst: &mut DynamicImage,
    src: &DynamicImage,
) -> Result<(), Box<dyn std::error::Error>> {
    match (dst, src) {
        (DynamicImage::ImageLuma8(d), DynamicImage::ImageLuma8(s)) => imageops::replace(d, s, 0, 0),
        (DynamicImage::ImageLumaA8(d), DynamicImage::ImageLumaA8(s)) => imageops::replace(d, s, 0, 0),
        (DynamicImage::ImageRgb8(d), DynamicImage::ImageRgb8(s)) => imageops::replace(d, s, 0, 0),
        (DynamicImage::ImageRgba8(d), DynamicImage::ImageRgba8(s)) => imageops::replace(d, s, 0, 0),
        (DynamicImage::ImageLuma16(d), DynamicImage::ImageLuma16(s)) => imageops::replace(d, s, 0, 0),
        (DynamicImage::ImageLumaA16(d), DynamicImage::ImageLumaA16(s)) => {
            imageops::replace(d, s, 0, 0)
        }
        (DynamicImage::ImageRgb16(d), DynamicImage::ImageRgb16(s)) => imageops::replace(d, s, 0, 0),
        (DynamicImage::ImageRgba16(d), DynamicImage::ImageRgba16(s)) => {
            imageops::replace(d, s, 0, 0)
        }
        (DynamicImage::ImageRgb32F(d), DynamicImage::ImageRgb32F(s)) => {
            imageops::replace(d, s, 0, 0)
        }
        (DynamicImage::ImageRgba32F(d), DynamicImage::ImageRgba32F(s)) => {
            imageops::replace(d, s, 0, 0)
        }
        (d, s) => {
            return Err(format!(
                "Cannot paste {:?} pixels into a {:?} image",
                s.color(),
                d.color()
            )
            .into())
        }
    }
    Ok(())
}

/// Cut `input` into square pieces and save them to `output_dir`. Returns the
/// written paths in piece order.
pub fn split_image(
    input: &Path,
    output_dir: &Path,
    grid: GridSpec,
    progress: impl Fn(f64, &str),
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let naming = PieceNaming::for_input(input)?;

    let img = image::open(input)?;
    let (img_width, img_height) = img.dimensions();
    let cell = CellSize::for_image(img_width, img_height, grid);
    let boxes = cell_boxes(img_width, img_height, grid);
    progress(
        0.0,
        &format!(
            "Loaded {}x{} image, cell {}x{}, {} pieces",
            img_width,
            img_height,
            cell.width,
            cell.height,
            boxes.len()
        ),
    );

    fs::create_dir_all(output_dir)?;

    let total = boxes.len();
    let mut written = Vec::with_capacity(total);
    for (count, bbox) in boxes.into_iter().enumerate() {
        let piece = crop_padded(&img, bbox)?;
        let path = naming.path_in(output_dir, count);
        piece.save_with_format(&path, naming.format())?;
        progress(
            (count + 1) as f64 / total as f64,
            &format!("Saved piece {} {} to {}", count, bbox, path.display()),
        );
        written.push(path);
    }
    Ok(written)
}

pub fn run(
    args: SplitArgs,
    progress: impl Fn(f64, &str),
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridSpec::new(args.width, args.height)?;
    let output_dir = Path::new(&args.output_path);
    let written = split_image(Path::new(&args.target), output_dir, grid, &progress)?;
    progress(
        1.0,
        &format!("Wrote {} pieces to {}", written.len(), output_dir.display()),
    );
    Ok(())
}
