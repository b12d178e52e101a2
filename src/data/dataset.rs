use serde::{Serialize, Deserialize};

use crate::loss::TaskKind;

/// One labeled sample. Classification targets are 0 or 1; regression
/// targets are continuous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub target: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64, target: f64) -> DataPoint {
        DataPoint { x, y, target }
    }
}

/// A generated point set. Never edited after generation; a change of
/// generator parameters produces a new `Dataset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub task: TaskKind,
    pub points: Vec<DataPoint>,
}

/// Axis-aligned rectangle `[x_min, x_max] × [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds { x_min: -3.0, x_max: 3.0, y_min: -3.0, y_max: 3.0 }
    }
}

impl Dataset {
    pub fn new(name: &str, task: TaskKind, points: Vec<DataPoint>) -> Dataset {
        Dataset { name: name.to_owned(), task, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(x, y)` pairs in dataset order, ready for `Network::step`.
    pub fn inputs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.target).collect()
    }

    /// Bounding box of the points grown by `padding` on every side; the
    /// default `[-3, 3]²` box when the dataset is empty.
    pub fn bounds(&self, padding: f64) -> Bounds {
        if self.points.is_empty() {
            return Bounds::default();
        }
        let init = Bounds {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        let b = self.points.iter().fold(init, |b, p| Bounds {
            x_min: b.x_min.min(p.x),
            x_max: b.x_max.max(p.x),
            y_min: b.y_min.min(p.y),
            y_max: b.y_max.max(p.y),
        });
        Bounds {
            x_min: b.x_min - padding,
            x_max: b.x_max + padding,
            y_min: b.y_min - padding,
            y_max: b.y_max + padding,
        }
    }

    /// Number of points per label; only meaningful for classification sets.
    pub fn class_counts(&self) -> (usize, usize) {
        self.points.iter().fold((0, 0), |(zeros, ones), p| {
            if p.target >= 0.5 { (zeros, ones + 1) } else { (zeros + 1, ones) }
        })
    }
}
