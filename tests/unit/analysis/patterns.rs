//! Tests for sample indexing and pattern catalog extraction

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use wavetile::AlgorithmError;
    use wavetile::analysis::patterns::{PatternCatalog, Sample};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn checkerboard(size: u32) -> Sample {
        let image = RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 { Rgba(RED) } else { Rgba(BLUE) }
        });
        Sample::from_image(&image).unwrap_or_else(|e| unreachable!("valid sample: {e}"))
    }

    // Tests palette indices follow first-seen row-major order
    // Verified by sorting the palette by color value
    #[test]
    fn test_palette_first_seen_order() {
        let image = RgbaImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => Rgba(BLUE),
            _ => Rgba(RED),
        });
        let sample = Sample::from_image(&image).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(sample.palette(), &[BLUE, RED]);
        assert_eq!(sample.index_at(0, 0), 0);
        assert_eq!(sample.index_at(1, 1), 1);
    }

    // Tests sample lookups wrap around both edges
    // Verified by clamping instead of wrapping
    #[test]
    fn test_index_wraps() {
        let sample = checkerboard(2);

        assert_eq!(sample.width(), 2);
        assert_eq!(sample.height(), 2);
        assert_eq!(sample.index_at(2, 0), sample.index_at(0, 0));
        assert_eq!(sample.index_at(3, 5), sample.index_at(1, 1));
    }

    // Tests an empty image is rejected
    // Verified by accepting zero-sized images
    #[test]
    fn test_empty_sample() {
        let result = Sample::from_image(&RgbaImage::new(0, 0));
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests a periodic checkerboard yields two patterns with equal counts
    // Verified by counting each window once regardless of symmetry
    #[test]
    fn test_checkerboard_patterns() {
        let sample = checkerboard(2);
        let catalog =
            PatternCatalog::extract(&sample, 2, 1, true).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.pattern_size(), 2);
        assert_eq!(catalog.patterns().first(), Some(&vec![0, 1, 1, 0]));
        assert_eq!(catalog.weights(), &[2.0, 2.0]);
    }

    // Tests orientations are merged into the counts
    // Verified by taking all eight orientations regardless of symmetry
    #[test]
    fn test_symmetry_counts() {
        let sample = checkerboard(2);
        let catalog =
            PatternCatalog::extract(&sample, 2, 8, true).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.weights().iter().sum::<f64>(), 32.0);
    }

    // Tests non-periodic input only reads windows inside the sample
    // Verified by wrapping windows regardless of the flag
    #[test]
    fn test_non_periodic_windows() {
        let image = RgbaImage::from_fn(3, 1, |x, _| if x == 0 { Rgba(RED) } else { Rgba(BLUE) });
        let sample = Sample::from_image(&image).unwrap_or_else(|e| unreachable!("{e}"));
        let catalog =
            PatternCatalog::extract(&sample, 1, 1, false).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.weights(), &[1.0, 2.0]);
    }

    // Tests a sample smaller than one window is rejected without wrapping
    // Verified by accepting zero windows
    #[test]
    fn test_sample_too_small() {
        let sample = checkerboard(2);
        let result = PatternCatalog::extract(&sample, 3, 1, false);

        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests parameter validation
    // Verified by allowing a symmetry of nine
    #[test]
    fn test_invalid_parameters() {
        let sample = checkerboard(2);

        assert!(matches!(
            PatternCatalog::extract(&sample, 0, 1, true),
            Err(AlgorithmError::InvalidParameter { parameter: "N", .. })
        ));
        assert!(matches!(
            PatternCatalog::extract(&sample, 2, 0, true),
            Err(AlgorithmError::InvalidParameter {
                parameter: "symmetry",
                ..
            })
        ));
        assert!(matches!(
            PatternCatalog::extract(&sample, 2, 9, true),
            Err(AlgorithmError::InvalidParameter {
                parameter: "symmetry",
                ..
            })
        ));
    }

    // Tests samples load from disk
    // Verified by skipping the RGBA conversion
    #[test]
    fn test_from_png_path() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| unreachable!("{e}"));
        let path = dir.path().join("sample.png");
        let image = RgbaImage::from_fn(3, 2, |x, _| if x == 1 { Rgba(RED) } else { Rgba(BLUE) });
        image.save(&path).unwrap_or_else(|e| unreachable!("{e}"));

        let sample = Sample::from_png_path(&path).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(sample.width(), 3);
        assert_eq!(sample.palette(), &[BLUE, RED]);
    }
}
