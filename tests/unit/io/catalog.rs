//! Tests for tileset catalog parsing

#[cfg(test)]
mod tests {
    use std::path::Path;
    use wavetile::AlgorithmError;
    use wavetile::io::catalog::{TileCatalog, TileRef};
    use wavetile::spatial::symmetry::SymmetryClass;

    fn parse(xml: &str) -> wavetile::Result<TileCatalog> {
        TileCatalog::parse(xml, Path::new("data.xml"))
    }

    const KNOTS: &str = r#"
        <set size="10" unique="False">
          <tiles>
            <tile name="corner" symmetry="L" weight="0.5"/>
            <tile name="cross" symmetry="I"/>
            <tile name="empty" symmetry="X" weight="0"/>
          </tiles>
          <neighbors>
            <neighbor left="corner 1" right="cross"/>
            <neighbor left="empty" right="empty"/>
          </neighbors>
          <subsets>
            <subset name="Dense">
              <tile name="corner"/>
              <tile name="cross"/>
            </subset>
          </subsets>
        </set>"#;

    // Tests a full catalog parses in document order
    // Verified by skipping the weight attribute
    #[test]
    fn test_parse_full_catalog() {
        let catalog = parse(KNOTS).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(catalog.size, 10);
        assert!(!catalog.unique);
        let names: Vec<&str> = catalog.tiles.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["corner", "cross", "empty"]);
        assert_eq!(
            catalog.tiles.first().map(|t| (t.symmetry, t.weight)),
            Some((SymmetryClass::L, 0.5))
        );
        assert_eq!(catalog.neighbors.len(), 2);
        assert_eq!(
            catalog.neighbors.first().map(|rule| rule.left.clone()),
            Some(TileRef {
                name: "corner".to_string(),
                variant: 1
            })
        );
    }

    // Tests zero and absent weights default to one
    // Verified by keeping a zero weight
    #[test]
    fn test_default_weights() {
        let catalog = parse(KNOTS).unwrap_or_else(|e| unreachable!("{e}"));
        let weights: Vec<f64> = catalog.tiles.iter().map(|t| t.weight).collect();

        assert_eq!(weights, vec![0.5, 1.0, 1.0]);
    }

    // Tests subsets list their member tiles
    // Verified by pushing subset members into the main tile list
    #[test]
    fn test_subsets() {
        let catalog = parse(KNOTS).unwrap_or_else(|e| unreachable!("{e}"));

        let dense = catalog.subset("Dense").unwrap_or_else(|e| unreachable!("{e}"));
        assert!(dense.contains("corner"));
        assert!(!dense.contains("empty"));
        assert_eq!(catalog.tiles.len(), 3);
        assert!(matches!(
            catalog.subset("Sparse"),
            Err(AlgorithmError::UnknownSubset { .. })
        ));
    }

    // Tests a missing size falls back to the default and unique accepts any case
    // Verified by defaulting the size to zero
    #[test]
    fn test_defaults_and_flags() {
        let catalog = parse(r#"<set unique="TRUE"><tiles><tile name="a"/></tiles></set>"#)
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(catalog.size, 16);
        assert!(catalog.unique);
        assert_eq!(
            catalog.tiles.first().map(|t| t.symmetry),
            Some(SymmetryClass::X)
        );
    }

    // Tests tile references with and without variants
    // Verified by defaulting the variant to one
    #[test]
    fn test_tile_ref_parse() {
        let plain = TileRef::parse("road").unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(plain.name, "road");
        assert_eq!(plain.variant, 0);

        let turned = TileRef::parse("road 3").unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(turned.variant, 3);

        assert!(TileRef::parse("road 8").is_err());
        assert!(TileRef::parse("road x").is_err());
    }

    // Tests malformed documents are rejected
    // Verified by ignoring XML reader errors
    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse(r#"<set><tiles><tile name="a"></set>"#),
            Err(AlgorithmError::Catalog { .. })
        ));
        assert!(matches!(parse(""), Err(AlgorithmError::Catalog { .. })));
    }

    // Tests semantic errors in tile declarations
    // Verified by accepting duplicate tile names
    #[test]
    fn test_invalid_tiles() {
        assert!(matches!(
            parse(r#"<set><tiles><tile name="a"/><tile name="a"/></tiles></set>"#),
            Err(AlgorithmError::Catalog { .. })
        ));
        assert!(matches!(
            parse(r#"<set><tiles><tile name="a" symmetry="Z"/></tiles></set>"#),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
        assert!(matches!(
            parse(r#"<set><tiles><tile name="a" weight="-2"/></tiles></set>"#),
            Err(AlgorithmError::Catalog { .. })
        ));
        assert!(matches!(
            parse(r#"<set><tiles></tiles></set>"#),
            Err(AlgorithmError::Catalog { .. })
        ));
        assert!(matches!(
            parse(r#"<set size="0"><tiles><tile name="a"/></tiles></set>"#),
            Err(AlgorithmError::Catalog { .. })
        ));
    }

    // Tests catalogs are read from disk
    // Verified by reading from the parent directory
    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| unreachable!("{e}"));
        let path = dir.path().join("data.xml");
        std::fs::write(&path, KNOTS).unwrap_or_else(|e| unreachable!("{e}"));

        let catalog = TileCatalog::from_path(&path).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(catalog.tiles.len(), 3);

        assert!(matches!(
            TileCatalog::from_path(dir.path().join("missing.xml")),
            Err(AlgorithmError::FileSystem { .. })
        ));
    }
}
