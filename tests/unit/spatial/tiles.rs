//! Tests for tile set expansion, neighbor rule spreading and subset filtering

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use wavetile::AlgorithmError;
    use wavetile::io::catalog::{TileCatalog, TileRef};
    use wavetile::spatial::tiles::{Direction, TileSet};

    fn catalog(xml: &str) -> TileCatalog {
        TileCatalog::parse(xml, Path::new("test.xml")).unwrap_or_else(|e| {
            unreachable!("test catalog should parse: {e}");
        })
    }

    fn build(xml: &str, subset: Option<&str>) -> TileSet {
        TileSet::build(&catalog(xml), subset).unwrap_or_else(|e| {
            unreachable!("test tile set should build: {e}");
        })
    }

    const PAIR: &str = r#"
        <set size="4">
          <tiles>
            <tile name="a" symmetry="X"/>
            <tile name="b" symmetry="X" weight="3"/>
          </tiles>
          <neighbors>
            <neighbor left="a" right="b"/>
          </neighbors>
          <subsets>
            <subset name="only-a"><tile name="a"/></subset>
          </subsets>
        </set>"#;

    // Tests direction offsets and opposites
    // Verified by flipping the north offset
    #[test]
    fn test_direction_geometry() {
        assert_eq!(Direction::East.offset(), (1, 0));
        assert_eq!(Direction::North.offset(), (0, -1));
        assert_eq!(Direction::West.offset(), (-1, 0));
        assert_eq!(Direction::South.offset(), (0, 1));
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dx, dy) = direction.offset();
            assert_eq!(direction.opposite().offset(), (-dx, -dy));
        }
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    // Tests each tile expands into its symmetry cardinality
    // Verified by expanding every tile into one state
    #[test]
    fn test_variant_expansion() {
        let tiles = build(
            r#"<set><tiles>
                 <tile name="corner" symmetry="L" weight="0.5"/>
                 <tile name="line" symmetry="I"/>
                 <tile name="empty"/>
               </tiles></set>"#,
            None,
        );

        assert_eq!(tiles.state_count(), 7);
        assert_eq!(tiles.weights(), &[0.5, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0]);
        assert_eq!(tiles.tile_size(), 16);

        let corner_rotations: Vec<usize> = tiles
            .variants()
            .iter()
            .take(4)
            .map(|variant| variant.rotation)
            .collect();
        assert_eq!(corner_rotations, vec![0, 1, 2, 3]);
        assert!(
            tiles
                .variants()
                .iter()
                .take(4)
                .all(|variant| variant.texture == PathBuf::from("corner.png"))
        );
    }

    // Tests unique catalogs give every variant its own texture
    // Verified by rotating unique textures as well
    #[test]
    fn test_unique_textures() {
        let tiles = build(
            r#"<set unique="True"><tiles><tile name="bend" symmetry="L"/></tiles></set>"#,
            None,
        );

        let variant = tiles.variants().get(2);
        assert_eq!(
            variant.map(|v| v.texture.clone()),
            Some(PathBuf::from("bend 2.png"))
        );
        assert_eq!(variant.map(|v| v.rotation), Some(0));
    }

    // Tests tile references resolve through the action table
    // Verified by adding the variant index to the base directly
    #[test]
    fn test_state_of_reference() {
        let tiles = build(
            r#"<set><tiles>
                 <tile name="pad" symmetry="X"/>
                 <tile name="corner" symmetry="L"/>
               </tiles></set>"#,
            None,
        );

        let reference = |text: &str| {
            TileRef::parse(text).unwrap_or_else(|e| unreachable!("bad reference: {e}"))
        };
        assert_eq!(tiles.state_of(&reference("pad")), Some(0));
        assert_eq!(tiles.state_of(&reference("corner 1")), Some(2));
        assert_eq!(tiles.state_of(&reference("corner 4")), Some(2));
        assert_eq!(tiles.state_of(&reference("missing")), None);
    }

    // Tests a horizontal rule spreads to its mirror and vertical forms
    // Verified by skipping the reflected horizontal pair
    #[test]
    fn test_rule_spreading_symmetric_tiles() {
        let tiles = build(PAIR, None);

        assert!(tiles.is_compatible(Direction::East, 0, 1));
        assert!(tiles.is_compatible(Direction::East, 1, 0));
        assert!(!tiles.is_compatible(Direction::East, 0, 0));
        assert!(!tiles.is_compatible(Direction::East, 1, 1));
        assert!(tiles.is_compatible(Direction::North, 0, 1));
        assert!(tiles.is_compatible(Direction::North, 1, 0));
    }

    // Tests west and south are the transposes of east and north
    // Verified by copying east into west without transposing
    #[test]
    fn test_opposite_matrices_transposed() {
        let tiles = build(
            r#"<set><tiles>
                 <tile name="corner" symmetry="L"/>
                 <tile name="line" symmetry="I"/>
               </tiles>
               <neighbors>
                 <neighbor left="corner 1" right="line"/>
                 <neighbor left="line 1" right="corner"/>
               </neighbors></set>"#,
            None,
        );

        let count = tiles.state_count();
        for from in 0..count {
            for to in 0..count {
                assert_eq!(
                    tiles.is_compatible(Direction::East, from, to),
                    tiles.is_compatible(Direction::West, to, from)
                );
                assert_eq!(
                    tiles.is_compatible(Direction::North, from, to),
                    tiles.is_compatible(Direction::South, to, from)
                );
            }
        }
    }

    // Tests subsets drop tiles and the rules that mention them
    // Verified by keeping rules whose tiles are outside the subset
    #[test]
    fn test_subset_filtering() {
        let tiles = build(PAIR, Some("only-a"));

        assert_eq!(tiles.state_count(), 1);
        assert!(!tiles.is_compatible(Direction::East, 0, 0));
    }

    // Tests unknown subsets are rejected
    // Verified by ignoring unknown subset names
    #[test]
    fn test_unknown_subset() {
        let result = TileSet::build(&catalog(PAIR), Some("nope"));
        assert!(matches!(result, Err(AlgorithmError::UnknownSubset { name }) if name == "nope"));
    }

    // Tests rules naming undeclared tiles are rejected
    // Verified by silently skipping unresolved rules
    #[test]
    fn test_unknown_tile_in_rule() {
        let result = TileSet::build(
            &catalog(
                r#"<set><tiles><tile name="a"/></tiles>
                   <neighbors><neighbor left="a" right="ghost"/></neighbors></set>"#,
            ),
            None,
        );
        assert!(matches!(result, Err(AlgorithmError::UnknownTile { name }) if name == "ghost"));
    }

    // Tests an empty subset leaves nothing to build
    // Verified by accepting zero states
    #[test]
    fn test_empty_subset() {
        let result = TileSet::build(
            &catalog(
                r#"<set><tiles><tile name="a"/></tiles>
                   <subsets><subset name="none"/></subsets></set>"#,
            ),
            Some("none"),
        );
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests the action table is exposed per state
    // Verified by returning rows shifted by one state
    #[test]
    fn test_action_rows_exposed() {
        let tiles = build(
            r#"<set><tiles><tile name="pad"/><tile name="t" symmetry="T"/></tiles></set>"#,
            None,
        );

        assert_eq!(tiles.action(0), Some(&[0; 8]));
        assert_eq!(tiles.action(1), Some(&[1, 2, 3, 4, 1, 4, 3, 2]));
        assert_eq!(tiles.action(5), None);
    }
}
