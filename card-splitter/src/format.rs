use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Extensions whose encoder goes by another name. Matched case-insensitively.
const FORMAT_ALIASES: &[(&str, &str)] = &[("jpg", "jpeg")];

/// Encoder name for a file extension (without the leading dot).
pub fn format_name(ext: &str) -> String {
    let lower = ext.to_ascii_lowercase();
    FORMAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or(lower)
}

/// Naming and encoding shared by every piece cut from one input image.
#[derive(Debug, Clone)]
pub struct PieceNaming {
    stem: String,
    ext: String,
    format: ImageFormat,
}

impl PieceNaming {
    pub fn for_input(input: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("Cannot derive a file name from {}", input.display()))?;
        let ext = input
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("Input has no file extension: {}", input.display()))?;
        let name = format_name(ext);
        let format = ImageFormat::from_extension(&name)
            .ok_or_else(|| format!("Unsupported output format: {}", name))?;
        if !format.writing_enabled() {
            return Err(format!("Cannot encode {:?} images", format).into());
        }
        Ok(Self {
            stem: stem.to_string(),
            ext: ext.to_string(),
            format,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// `<stem>-piece-<index>.<ext>`, keeping the input's extension as written.
    pub fn file_name(&self, index: usize) -> String {
        format!("{}-piece-{}.{}", self.stem, index, self.ext)
    }

    pub fn path_in(&self, dir: &Path, index: usize) -> PathBuf {
        dir.join(self.file_name(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpg_alias_maps_to_jpeg() {
        assert_eq!(format_name("jpg"), "jpeg");
        assert_eq!(format_name("JPG"), "jpeg");
        assert_eq!(format_name("Jpg"), "jpeg");
        assert_eq!(format_name("jpeg"), "jpeg");
        assert_eq!(format_name("PNG"), "png");
    }

    #[test]
    fn jpg_input_keeps_extension_but_encodes_jpeg() {
        let naming = PieceNaming::for_input(Path::new("scans/three.JPG")).unwrap();
        assert_eq!(naming.format(), ImageFormat::Jpeg);
        assert_eq!(naming.file_name(0), "three-piece-0.JPG");
        assert_eq!(naming.file_name(12), "three-piece-12.JPG");
    }

    #[test]
    fn base_name_drops_directories() {
        let naming = PieceNaming::for_input(Path::new("/tmp/deck/cards.v2.png")).unwrap();
        assert_eq!(naming.format(), ImageFormat::Png);
        assert_eq!(
            naming.path_in(Path::new("out"), 3),
            Path::new("out").join("cards.v2-piece-3.png")
        );
    }

    #[test]
    fn missing_or_unknown_extension_rejected() {
        assert!(PieceNaming::for_input(Path::new("cards")).is_err());
        assert!(PieceNaming::for_input(Path::new("cards.txt")).is_err());
    }
}
