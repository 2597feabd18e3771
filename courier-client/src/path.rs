//! Dot-separated paths and the tree body mutator.

use crate::{Body, CourierError, Result};
use serde_json::{Map, Value};

/// A parsed dot-separated path such as `order.items.0.sku`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> Path<'a> {
    /// Parse a path, rejecting empty paths and empty segments.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let segments: Vec<&str> = raw.split('.').collect();
        if raw.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(CourierError::InvalidPath(raw.to_string()));
        }
        Ok(Self { raw, segments })
    }

    /// The path as written.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Segments in order, never empty.
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// The terminal segment.
    pub fn last(&self) -> &'a str {
        // parse() guarantees at least one segment
        self.segments[self.segments.len() - 1]
    }

    fn first(&self) -> &'a str {
        self.segments[0]
    }
}

/// Largest length a growable sequence may reach.
pub const MAX_SEQUENCE_GROWTH: usize = 10_000;

/// Writes values into a [`Body::Tree`] by path.
///
/// A top-level sequence that this mutator materialized from an empty body
/// grows when addressed past its end. Sequences supplied by configuration
/// keep their length.
#[derive(Debug, Clone, Default)]
pub struct PathMutator {
    growable: bool,
}

impl PathMutator {
    /// Create a mutator with no growable sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget whether the current top-level sequence may grow. Called when
    /// the body is replaced wholesale.
    pub fn reset(&mut self) {
        self.growable = false;
    }

    /// Assign `value` at `path`.
    ///
    /// Every failure is detected before the first write: new containers are
    /// only created under nodes that are themselves new, so the walk cannot
    /// fail after it has started mutating.
    pub fn set(&mut self, body: &mut Body, path: &Path<'_>, value: Value) -> Result<()> {
        let root = self.prepare_root(body, path.first())?;
        walk(root, path, value)
    }

    fn prepare_root<'b>(&mut self, body: &'b mut Body, first: &str) -> Result<&'b mut Value> {
        if body.is_empty() {
            let root = match first.parse::<usize>() {
                Ok(index) => Value::Array(vec![Value::Null; grown_len(index, 0)?]),
                Err(_) => Value::Object(Map::new()),
            };
            self.growable = root.is_array();
            *body = Body::Tree(root);
        }

        match body {
            Body::Tree(root) => {
                if self.growable
                    && let Value::Array(items) = root
                    && let Ok(index) = first.parse::<usize>()
                    && index >= items.len()
                {
                    let len = grown_len(index, items.len())?;
                    items.resize(len, Value::Null);
                }
                Ok(root)
            }
            other => Err(CourierError::unsupported("path write", other.kind())),
        }
    }
}

/// Length needed to make `index` addressable, bounded by
/// [`MAX_SEQUENCE_GROWTH`].
fn grown_len(index: usize, len: usize) -> Result<usize> {
    index
        .checked_add(1)
        .filter(|needed| *needed <= MAX_SEQUENCE_GROWTH)
        .ok_or(CourierError::IndexOutOfRange { index, len })
}

fn walk(root: &mut Value, path: &Path<'_>, value: Value) -> Result<()> {
    let segments = path.segments();
    let last = segments.len() - 1;
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == last;

        current = match current {
            Value::Object(map) => {
                if is_last {
                    map.insert(segment.to_string(), value);
                    return Ok(());
                }
                let child = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if child.is_null() {
                    *child = Value::Object(Map::new());
                }
                child
            }
            Value::Array(items) => {
                let index: usize = segment
                    .parse()
                    .map_err(|_| CourierError::InvalidIndex(segment.to_string()))?;
                let len = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(CourierError::IndexOutOfRange { index, len })?;
                if is_last {
                    *slot = value;
                    return Ok(());
                }
                if slot.is_null() {
                    *slot = Value::Object(Map::new());
                }
                slot
            }
            _ => {
                return Err(CourierError::PathNavigation {
                    path: path.as_str().to_string(),
                    segment: segment.to_string(),
                });
            }
        };
    }

    Ok(())
}
