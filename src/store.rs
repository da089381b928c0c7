//! Geometry model: country outlines and the immutable store that owns them.
//!
//! This module defines the typed path model for a country's silhouette
//! (`PathSeg`, `SubPath`, `CountryGeometry`) and the runtime store mapping
//! country codes to geometry (`GeometryStore`). The store is constructed once
//! from a JSON resource, validated up front, and read-only thereafter: the
//! hit tester reads cached flattened rings and bounding boxes, the renderer
//! reads the authored segments.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::info;

use crate::consts::CURVE_FLATTEN_STEPS;
use crate::transform::{Point, Rect};

/// Country identifier: a short ISO-style code, preserved exactly as authored.
pub type CountryCode = String;

/// Error raised when the geometry resource is malformed.
///
/// Fatal at load time — the widget cannot be constructed without a valid
/// store, so these should surface during development rather than at runtime.
#[derive(Debug, thiserror::Error)]
pub enum DataFormatError {
    /// The resource is not valid JSON of the expected shape.
    #[error("failed to parse geometry resource: {0}")]
    Parse(#[from] serde_json::Error),
    /// The reference space dimensions are missing, non-finite, or not positive.
    #[error("invalid reference space: {width} x {height}")]
    InvalidReferenceSpace { width: f64, height: f64 },
    /// A country code is not 2-3 ASCII letters.
    #[error("invalid country code {0:?}")]
    InvalidCountryCode(String),
    /// A country has no subpaths at all.
    #[error("country {0} has no geometry")]
    EmptyGeometry(CountryCode),
    /// A subpath has no segments.
    #[error("country {0} has an empty path")]
    EmptyPath(CountryCode),
    /// A segment is neither a `[x, y]` point nor a `[c1x, c1y, c2x, c2y, x, y]` cubic.
    #[error("country {code} path segment {index} has {arity} coordinates")]
    InvalidSegment { code: CountryCode, index: usize, arity: usize },
    /// A coordinate is NaN or infinite.
    #[error("country {0} contains a non-finite coordinate")]
    NonFiniteCoordinate(CountryCode),
}

/// One step along a subpath outline, starting from the previous point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    /// Straight segment to `to`.
    Line { to: Point },
    /// Cubic curve to `to` with control points `c1` and `c2`.
    Cubic { c1: Point, c2: Point, to: Point },
}

/// One closed outline of a country (the mainland, or one island).
///
/// Subpaths are implicitly closed: the last point connects back to `start`.
/// `ring` is the flattened polygon used for hit-testing; `bounds` is its
/// bounding box. A degenerate ring (fewer than three vertices) is legal and
/// simply never contains a point.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub start: Point,
    pub segs: Vec<PathSeg>,
    ring: Vec<Point>,
    bounds: Rect,
}

impl SubPath {
    fn new(start: Point, segs: Vec<PathSeg>) -> Self {
        let ring = flatten(start, &segs);
        let bounds = Rect::bounding(&ring);
        Self { start, segs, ring, bounds }
    }

    /// The flattened closed polygon ring for hit-testing.
    #[must_use]
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    /// Bounding box of the flattened ring.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// A country's full silhouette: one or more closed subpaths in reference space.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryGeometry {
    subpaths: Vec<SubPath>,
    bounds: Rect,
}

impl CountryGeometry {
    fn new(subpaths: Vec<SubPath>) -> Self {
        let mut bounds = subpaths[0].bounds();
        for sp in &subpaths[1..] {
            bounds = bounds.union(sp.bounds());
        }
        Self { subpaths, bounds }
    }

    #[must_use]
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// Bounding box over all subpaths.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Raw shape of the JSON geometry resource.
///
/// A segment is a bare coordinate list: `[x, y]` for a line point,
/// `[c1x, c1y, c2x, c2y, x, y]` for a cubic curve. The first segment of each
/// subpath must be a plain point (the subpath start).
#[derive(Debug, Deserialize)]
struct RawResource {
    width: f64,
    height: f64,
    countries: BTreeMap<String, Vec<Vec<Vec<f64>>>>,
}

/// Immutable store of country geometry plus the reference coordinate space.
///
/// Countries iterate in code order (the loader collects into an ordered
/// map), which is the documented deterministic tie-break order for hit
/// testing. Lookup by code is O(1) expected.
#[derive(Debug)]
pub struct GeometryStore {
    countries: Vec<(CountryCode, CountryGeometry)>,
    index: HashMap<CountryCode, usize>,
    width: f64,
    height: f64,
}

impl GeometryStore {
    /// Parse and validate a JSON geometry resource.
    ///
    /// # Errors
    ///
    /// Returns a [`DataFormatError`] describing the first problem found:
    /// unparseable JSON, a bad reference space, a malformed country code, or
    /// empty/invalid path data.
    pub fn from_json(data: &str) -> Result<Self, DataFormatError> {
        let raw: RawResource = serde_json::from_str(data)?;

        if !raw.width.is_finite() || !raw.height.is_finite() || raw.width <= 0.0 || raw.height <= 0.0 {
            return Err(DataFormatError::InvalidReferenceSpace { width: raw.width, height: raw.height });
        }

        let mut countries = Vec::with_capacity(raw.countries.len());
        let mut index = HashMap::with_capacity(raw.countries.len());
        for (code, subpaths) in raw.countries {
            validate_code(&code)?;
            let geometry = build_geometry(&code, subpaths)?;
            index.insert(code.clone(), countries.len());
            countries.push((code, geometry));
        }

        info!(countries = countries.len(), width = raw.width, height = raw.height, "geometry loaded");

        Ok(Self { countries, index, width: raw.width, height: raw.height })
    }

    /// Width of the reference coordinate space.
    #[must_use]
    pub fn reference_width(&self) -> f64 {
        self.width
    }

    /// Height of the reference coordinate space.
    #[must_use]
    pub fn reference_height(&self) -> f64 {
        self.height
    }

    /// Look up a country's geometry by code.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&CountryGeometry> {
        self.index.get(code).map(|&i| &self.countries[i].1)
    }

    /// Whether the store contains the given code.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Iterate countries in the store's deterministic order (sorted by code).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryGeometry)> {
        self.countries.iter().map(|(code, geom)| (code.as_str(), geom))
    }

    /// Number of countries in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Returns `true` if the store holds no countries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Country codes are 2-3 ASCII letters, kept exactly as authored.
fn validate_code(code: &str) -> Result<(), DataFormatError> {
    let ok = (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_alphabetic());
    if ok {
        Ok(())
    } else {
        Err(DataFormatError::InvalidCountryCode(code.to_owned()))
    }
}

fn build_geometry(code: &str, raw_subpaths: Vec<Vec<Vec<f64>>>) -> Result<CountryGeometry, DataFormatError> {
    if raw_subpaths.is_empty() {
        return Err(DataFormatError::EmptyGeometry(code.to_owned()));
    }

    let mut subpaths = Vec::with_capacity(raw_subpaths.len());
    for raw in raw_subpaths {
        subpaths.push(build_subpath(code, raw)?);
    }
    Ok(CountryGeometry::new(subpaths))
}

fn build_subpath(code: &str, raw: Vec<Vec<f64>>) -> Result<SubPath, DataFormatError> {
    let mut iter = raw.into_iter().enumerate();
    let Some((_, first)) = iter.next() else {
        return Err(DataFormatError::EmptyPath(code.to_owned()));
    };

    // The first segment is the subpath start and must be a plain point.
    if first.len() != 2 {
        return Err(DataFormatError::InvalidSegment { code: code.to_owned(), index: 0, arity: first.len() });
    }
    let start = point(code, &first, 0)?;

    let mut segs = Vec::new();
    for (index, raw_seg) in iter {
        match raw_seg.len() {
            2 => segs.push(PathSeg::Line { to: point(code, &raw_seg, 0)? }),
            6 => segs.push(PathSeg::Cubic {
                c1: point(code, &raw_seg, 0)?,
                c2: point(code, &raw_seg, 2)?,
                to: point(code, &raw_seg, 4)?,
            }),
            arity => {
                return Err(DataFormatError::InvalidSegment { code: code.to_owned(), index, arity });
            }
        }
    }

    Ok(SubPath::new(start, segs))
}

fn point(code: &str, coords: &[f64], at: usize) -> Result<Point, DataFormatError> {
    let (x, y) = (coords[at], coords[at + 1]);
    if x.is_finite() && y.is_finite() {
        Ok(Point::new(x, y))
    } else {
        Err(DataFormatError::NonFiniteCoordinate(code.to_owned()))
    }
}

/// Flatten a subpath into a closed polygon ring for hit-testing.
///
/// Cubics are sampled at a fixed resolution; an authored explicit closing
/// point (equal to the start) is dropped so the ring has no duplicate vertex.
fn flatten(start: Point, segs: &[PathSeg]) -> Vec<Point> {
    let mut ring = vec![start];
    for seg in segs {
        match *seg {
            PathSeg::Line { to } => ring.push(to),
            PathSeg::Cubic { c1, c2, to } => {
                let from = ring[ring.len() - 1];
                for step in 1..=CURVE_FLATTEN_STEPS {
                    #[allow(clippy::cast_precision_loss)]
                    let t = step as f64 / CURVE_FLATTEN_STEPS as f64;
                    ring.push(cubic_at(from, c1, c2, to, t));
                }
            }
        }
    }
    if ring.len() > 1 && ring[ring.len() - 1] == ring[0] {
        ring.pop();
    }
    ring
}

fn cubic_at(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}
