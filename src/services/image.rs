//! Image metadata service.
//!
//! Only the header is read; pixel data is never decoded.

use crate::Result;
use std::path::Path;

/// Image orientation derived from its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
    /// Wider than tall, or square.
    Landscape,
}

impl Orientation {
    /// Orientation for the given width and height.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Base filename for artwork of this orientation.
    pub fn artwork_name(self) -> &'static str {
        match self {
            Orientation::Portrait => "poster",
            Orientation::Landscape => "background",
        }
    }
}

/// Read `(width, height)` of an image file.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    let dimensions = image::image_dimensions(path)?;
    tracing::debug!("{} is {}x{}", path.display(), dimensions.0, dimensions.1);
    Ok(dimensions)
}

/// Read the orientation of an image file.
pub fn read_orientation(path: &Path) -> Result<Orientation> {
    let (width, height) = read_dimensions(path)?;
    Ok(Orientation::from_dimensions(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::from_dimensions(1000, 1500), Orientation::Portrait);
        assert_eq!(Orientation::from_dimensions(1500, 1000), Orientation::Landscape);
        assert_eq!(Orientation::from_dimensions(1000, 1000), Orientation::Landscape);
        assert_eq!(Orientation::Portrait.artwork_name(), "poster");
        assert_eq!(Orientation::Landscape.artwork_name(), "background");
    }

    #[test]
    fn test_read_dimensions_missing_file() {
        assert!(read_dimensions(Path::new("/nonexistent/image.png")).is_err());
    }
}
