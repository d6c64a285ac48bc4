pub mod errors;

pub use errors::{ComputeResult, FepError, FepErrorCategory, FepResult, ParserResult};

use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

/// Tolerance used when comparing a geometry coordinate against its window.
pub static GEOMETRY_TOLERANCE: LazyLock<BigDecimal> =
    LazyLock::new(|| BigDecimal::new(1.into(), 4));

/// Reaction-coordinate window identifier.
///
/// Keeps the label exactly as it appears in the results file, its exact
/// decimal value for tolerance checks and an `f64` for sorting and display.
/// Equality follows the label; ordering is numeric with the label as
/// tie-breaker.
#[derive(Debug, Clone)]
pub struct WindowId {
    label: String,
    exact: BigDecimal,
    value: f64,
}

impl WindowId {
    pub fn parse(label: &str) -> Option<Self> {
        let value = label.parse::<f64>().ok().filter(|value| value.is_finite())?;
        let exact = BigDecimal::from_str(label).ok()?;
        Some(Self {
            label: label.to_string(),
            exact,
            value,
        })
    }

    pub fn exact(&self) -> &BigDecimal {
        &self.exact
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn value(&self) -> f64 {
        self.value
    }
}

impl PartialEq for WindowId {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for WindowId {}

impl Hash for WindowId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl PartialOrd for WindowId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WindowId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl Display for WindowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Which geometry a sample was evaluated at, relative to its own window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryPosition {
    Before,
    This,
    After,
}

impl GeometryPosition {
    /// Exact decimal offset, so a coordinate written 0.0001 away is `This`.
    pub fn classify(window: &WindowId, geometry: &BigDecimal) -> Self {
        let offset = geometry - window.exact();
        if offset.abs() <= *GEOMETRY_TOLERANCE {
            Self::This
        } else if offset < BigDecimal::zero() {
            Self::Before
        } else {
            Self::After
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::This => "this",
            Self::After => "after",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub line_number: usize,
    pub window: WindowId,
    pub geometry: BigDecimal,
    pub energy: BigDecimal,
}

impl SampleRecord {
    pub fn position(&self) -> GeometryPosition {
        GeometryPosition::classify(&self.window, &self.geometry)
    }
}

/// Energies (Hartree) for one window, split by geometry and kept in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowBucket {
    pub before: Vec<BigDecimal>,
    pub this: Vec<BigDecimal>,
    pub after: Vec<BigDecimal>,
}

impl WindowBucket {
    pub fn push(&mut self, position: GeometryPosition, energy: BigDecimal) {
        match position {
            GeometryPosition::Before => self.before.push(energy),
            GeometryPosition::This => self.this.push(energy),
            GeometryPosition::After => self.after.push(energy),
        }
    }

    pub fn samples(&self, position: GeometryPosition) -> &[BigDecimal] {
        match position {
            GeometryPosition::Before => &self.before,
            GeometryPosition::This => &self.this,
            GeometryPosition::After => &self.after,
        }
    }

    pub fn total_samples(&self) -> usize {
        self.before.len() + self.this.len() + self.after.len()
    }
}

/// All windows read from one results file, iterated in numeric window order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSet {
    windows: BTreeMap<WindowId, WindowBucket>,
}

impl WindowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: SampleRecord) {
        let position = record.position();
        self.windows
            .entry(record.window)
            .or_default()
            .push(position, record.energy);
    }

    pub fn get(&self, label: &str) -> Option<&WindowBucket> {
        let window = WindowId::parse(label)?;
        self.windows.get(&window)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WindowId, &WindowBucket)> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn total_samples(&self) -> usize {
        self.windows.values().map(WindowBucket::total_samples).sum()
    }
}

impl FromIterator<(WindowId, WindowBucket)> for WindowSet {
    fn from_iter<T: IntoIterator<Item = (WindowId, WindowBucket)>>(iter: T) -> Self {
        Self {
            windows: iter.into_iter().collect(),
        }
    }
}
