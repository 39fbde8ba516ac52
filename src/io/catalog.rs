//! Tile catalog loading from `data.xml` tileset descriptions
//!
//! ```xml
//! <set size="16" unique="False">
//!   <tiles><tile name="corner" symmetry="L" weight="0.5"/></tiles>
//!   <neighbors><neighbor left="corner 1" right="corner"/></neighbors>
//!   <subsets><subset name="Plain"><tile name="corner"/></subset></subsets>
//! </set>
//! ```

use crate::io::configuration::DEFAULT_TILE_SIZE;
use crate::io::error::{AlgorithmError, Result, catalog_error};
use crate::spatial::symmetry::SymmetryClass;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

/// One tile declaration
#[derive(Clone, Debug, PartialEq)]
pub struct TileDef {
    /// Tile name, also the texture file stem
    pub name: String,
    /// Symmetry class deciding how many oriented variants the tile expands into
    pub symmetry: SymmetryClass,
    /// Stationary weight shared by every variant
    pub weight: f64,
}

/// Reference to a tile variant inside a neighbor rule, written `"name"` or `"name 3"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRef {
    /// Referenced tile name
    pub name: String,
    /// Column of the tile's action table (0–7)
    pub variant: usize,
}

impl TileRef {
    /// Parse `"name"` or `"name <variant>"`
    ///
    /// # Errors
    ///
    /// Returns an error if the variant suffix is not an integer in `0..8`
    pub fn parse(text: &str) -> Result<Self> {
        let (name, variant) = match text.split_once(' ') {
            Some((name, suffix)) => {
                let variant = suffix.trim().parse::<usize>().map_err(|e| {
                    AlgorithmError::InvalidParameter {
                        parameter: "neighbor",
                        value: text.to_string(),
                        reason: format!("variant suffix is not an integer: {e}"),
                    }
                })?;
                (name, variant)
            }
            None => (text, 0),
        };

        if variant >= 8 {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "neighbor",
                value: text.to_string(),
                reason: "variant index must be below 8".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            variant,
        })
    }
}

/// Horizontal adjacency rule: `right` may sit directly east of `left`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborRule {
    /// Western tile
    pub left: TileRef,
    /// Eastern tile
    pub right: TileRef,
}

/// Named restriction of the catalog
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subset {
    /// Subset name
    pub name: String,
    /// Tiles participating when the subset is selected
    pub tiles: Vec<String>,
}

impl Subset {
    /// Test whether the subset includes `tile`
    pub fn contains(&self, tile: &str) -> bool {
        self.tiles.iter().any(|name| name == tile)
    }
}

/// Parsed tileset description
#[derive(Clone, Debug, PartialEq)]
pub struct TileCatalog {
    /// Tile edge length in pixels
    pub size: usize,
    /// Whether every variant has its own texture (`"<name> <t>.png"`)
    pub unique: bool,
    /// Tile declarations in document order
    pub tiles: Vec<TileDef>,
    /// Adjacency rules in document order
    pub neighbors: Vec<NeighborRule>,
    /// Declared subsets
    pub subsets: Vec<Subset>,
}

impl TileCatalog {
    /// Read and parse a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read catalog",
            source: e,
        })?;
        Self::parse(&xml, path)
    }

    /// Parse catalog XML; `origin` labels errors
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML, unknown symmetry tags, bad weights or
    /// variant suffixes, and duplicate tile names
    pub fn parse(xml: &str, origin: &Path) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut builder = CatalogBuilder::default();
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => builder.open(e, false, origin)?,
                Ok(Event::Empty(ref e)) => builder.open(e, true, origin)?,
                Ok(Event::End(ref e)) => builder.close(e.name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(catalog_error(
                        origin,
                        &format!(
                            "XML parse error at byte {}: {e}",
                            reader.buffer_position()
                        ),
                    ));
                }
                _ => {}
            }
        }

        builder.finish(origin)
    }

    /// Look up a subset by name
    ///
    /// # Errors
    ///
    /// Returns an error if no subset carries that name
    pub fn subset(&self, name: &str) -> Result<&Subset> {
        self.subsets
            .iter()
            .find(|subset| subset.name == name)
            .ok_or_else(|| AlgorithmError::UnknownSubset {
                name: name.to_string(),
            })
    }
}

#[derive(Default)]
struct CatalogBuilder {
    root_seen: bool,
    size: Option<usize>,
    unique: bool,
    tiles: Vec<TileDef>,
    neighbors: Vec<NeighborRule>,
    subsets: Vec<Subset>,
    in_tiles: bool,
    in_neighbors: bool,
    open_subset: Option<Subset>,
}

impl CatalogBuilder {
    fn open(&mut self, element: &BytesStart<'_>, empty: bool, origin: &Path) -> Result<()> {
        let attributes = read_attributes(element, origin)?;

        if !self.root_seen {
            self.root_seen = true;
            if let Some(size) = attributes.get("size") {
                self.size = Some(parse_number(size, "size", origin)?);
            }
            if let Some(unique) = attributes.get("unique") {
                self.unique = parse_flag(unique, "unique", origin)?;
            }
            return Ok(());
        }

        match element.name().as_ref() {
            b"tiles" => self.in_tiles = !empty,
            b"neighbors" => self.in_neighbors = !empty,
            b"tile" => {
                let name = required(&attributes, "name", "tile", origin)?;
                if let Some(subset) = self.open_subset.as_mut() {
                    subset.tiles.push(name);
                } else if self.in_tiles {
                    self.push_tile(name, &attributes, origin)?;
                }
            }
            b"neighbor" if self.in_neighbors => {
                let left = required(&attributes, "left", "neighbor", origin)?;
                let right = required(&attributes, "right", "neighbor", origin)?;
                self.neighbors.push(NeighborRule {
                    left: TileRef::parse(&left)?,
                    right: TileRef::parse(&right)?,
                });
            }
            b"subset" => {
                let subset = Subset {
                    name: required(&attributes, "name", "subset", origin)?,
                    tiles: Vec::new(),
                };
                if empty {
                    self.subsets.push(subset);
                } else {
                    self.open_subset = Some(subset);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"tiles" => self.in_tiles = false,
            b"neighbors" => self.in_neighbors = false,
            b"subset" => {
                if let Some(subset) = self.open_subset.take() {
                    self.subsets.push(subset);
                }
            }
            _ => {}
        }
    }

    fn push_tile(
        &mut self,
        name: String,
        attributes: &HashMap<String, String>,
        origin: &Path,
    ) -> Result<()> {
        if self.tiles.iter().any(|tile| tile.name == name) {
            return Err(catalog_error(origin, &format!("duplicate tile '{name}'")));
        }

        let symmetry = SymmetryClass::parse(
            attributes.get("symmetry").map_or("", String::as_str),
        )?;

        // An absent or zero weight means the default of one
        let weight = match attributes.get("weight") {
            Some(text) => text
                .parse::<f64>()
                .map_err(|e| catalog_error(origin, &format!("tile '{name}' weight: {e}")))?,
            None => 0.0,
        };
        if !weight.is_finite() || weight < 0.0 {
            return Err(catalog_error(
                origin,
                &format!("tile '{name}' weight must be a non-negative number"),
            ));
        }

        self.tiles.push(TileDef {
            name,
            symmetry,
            weight: if weight == 0.0 { 1.0 } else { weight },
        });
        Ok(())
    }

    fn finish(self, origin: &Path) -> Result<TileCatalog> {
        if !self.root_seen {
            return Err(catalog_error(origin, &"document has no root element"));
        }
        if self.tiles.is_empty() {
            return Err(catalog_error(origin, &"catalog declares no tiles"));
        }

        let size = self.size.unwrap_or(DEFAULT_TILE_SIZE);
        if size == 0 {
            return Err(catalog_error(origin, &"tile size must be positive"));
        }

        Ok(TileCatalog {
            size,
            unique: self.unique,
            tiles: self.tiles,
            neighbors: self.neighbors,
            subsets: self.subsets,
        })
    }
}

/// Collect an element's attributes as owned strings
pub(crate) fn read_attributes(
    element: &BytesStart<'_>,
    origin: &Path,
) -> Result<HashMap<String, String>> {
    let mut attributes = HashMap::new();
    for attribute in element.attributes() {
        let attribute =
            attribute.map_err(|e| catalog_error(origin, &format!("bad attribute: {e}")))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| catalog_error(origin, &format!("attribute name: {e}")))?;
        let value = std::str::from_utf8(&attribute.value)
            .map_err(|e| catalog_error(origin, &format!("attribute '{key}': {e}")))?;
        attributes.insert(key.to_string(), value.to_string());
    }
    Ok(attributes)
}

/// Parse a boolean attribute (`true`, `True`, `1`, `false`, `False`, `0`)
pub(crate) fn parse_flag(text: &str, attribute: &str, origin: &Path) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(catalog_error(
            origin,
            &format!("attribute '{attribute}' is not a boolean: '{text}'"),
        )),
    }
}

/// Parse a numeric attribute
pub(crate) fn parse_number<T>(text: &str, attribute: &str, origin: &Path) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    text.trim().parse::<T>().map_err(|e| {
        catalog_error(
            origin,
            &format!("attribute '{attribute}' = '{text}': {e}"),
        )
    })
}

fn required(
    attributes: &HashMap<String, String>,
    attribute: &str,
    element: &str,
    origin: &Path,
) -> Result<String> {
    attributes.get(attribute).cloned().ok_or_else(|| {
        catalog_error(
            origin,
            &format!("<{element}> is missing the '{attribute}' attribute"),
        )
    })
}
