//! Grid arithmetic: cell size from image dimensions and the column-major
//! sequence of square crop boxes.

/// Number of cards across and down the scanned sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub cells_wide: u32,
    pub cells_high: u32,
}

impl GridSpec {
    pub fn new(cells_wide: u32, cells_high: u32) -> Result<Self, Box<dyn std::error::Error>> {
        if cells_wide == 0 || cells_high == 0 {
            return Err(format!(
                "Grid dimensions must be positive (got {}x{})",
                cells_wide, cells_high
            )
            .into());
        }
        Ok(Self {
            cells_wide,
            cells_high,
        })
    }
}

/// Stride between cells. One pixel larger than the truncated quotient so the
/// strides always cover the full image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub fn for_image(img_width: u32, img_height: u32, grid: GridSpec) -> Self {
        Self {
            width: img_width / grid.cells_wide + 1,
            height: img_height / grid.cells_high + 1,
        }
    }
}

/// Crop region in source pixel coordinates. `right` and `bottom` are exclusive
/// and may lie past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Square box for the cell whose top-left stride origin is `(x, y)`.
    ///
    /// The longer side is trimmed symmetrically. When the difference is odd the
    /// trimmed box is one pixel off square, and the width is then set to the
    /// height by moving the right edge.
    pub fn for_cell(x: u32, y: u32, cell: CellSize) -> Self {
        let half = cell.width.abs_diff(cell.height) / 2;
        let mut bbox = if cell.width < cell.height {
            Self {
                left: x,
                top: y + half,
                right: x + cell.width,
                bottom: y + cell.height - half,
            }
        } else {
            Self {
                left: x + half,
                top: y,
                right: x + cell.width - half,
                bottom: y + cell.height,
            }
        };
        if bbox.width() != bbox.height() {
            bbox.right = bbox.left + bbox.height();
        }
        bbox
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.left, self.top, self.right, self.bottom)
    }
}

/// All crop boxes for an image, column by column, top to bottom within each
/// column.
pub fn cell_boxes(img_width: u32, img_height: u32, grid: GridSpec) -> Vec<BoundingBox> {
    let cell = CellSize::for_image(img_width, img_height, grid);
    let mut boxes = Vec::new();
    for x in (0..img_width).step_by(cell.width as usize) {
        for y in (0..img_height).step_by(cell.height as usize) {
            boxes.push(BoundingBox::for_cell(x, y, cell));
        }
    }
    boxes
}
