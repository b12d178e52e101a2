//! Synthetic 2D datasets.
//!
//! Classification generators emit `count` points per class (`2·count` in
//! total, labels 0/1); regression generators emit `count` points. Point
//! placement that uses the seeded uniform source is reproducible from
//! `seed`; Gaussian jitter comes from process-global entropy and is not,
//! except in `xor`, which draws its jitter from the same seeded source.
//! `circles` and `spirals` use no seeded draws at all, so two calls with the
//! same seed generally differ once `noise > 0`.

use log::warn;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::data::dataset::{DataPoint, Dataset};
use crate::error::{PlaygroundError, Result};
use crate::loss::TaskKind;
use crate::math::{SeededUniform, gaussian_from, gaussian_sample};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: i64 = 42;

/// Draw budget per requested `xor` point; each draw fills a given class with
/// probability 1/2, so a healthy sequence never gets near it.
const XOR_DRAWS_PER_POINT: usize = 64;

/// Keeps `sin(r)/r` finite at the origin.
const SINC_EPS: f64 = 1e-6;

/// Two interleaved half-ring arcs.
pub fn moons(count: usize, noise: f64, seed: Option<i64>) -> Dataset {
    let mut uniform = SeededUniform::new(seed.unwrap_or(DEFAULT_SEED));
    let jitter = noise * 0.15;
    let mut points = Vec::with_capacity(2 * count);

    for _ in 0..count {
        let t = PI * uniform.next_f64();
        let r = 1.0 + (uniform.next_f64() - 0.5) * 0.2;
        let (cx, cy) = (r * t.cos(), r * t.sin());
        points.push(DataPoint::new(
            cx + gaussian_sample() * jitter,
            cy + gaussian_sample() * jitter,
            0.0,
        ));
        points.push(DataPoint::new(
            1.0 - cx + gaussian_sample() * jitter,
            0.5 - cy + gaussian_sample() * jitter,
            1.0,
        ));
    }

    Dataset::new("moons", TaskKind::Classification, points)
}

/// Two concentric rings: inner (label 0) near radius 0.6, outer (label 1)
/// near radius 1.3. Ignores `seed`.
pub fn circles(count: usize, noise: f64, _seed: Option<i64>) -> Dataset {
    let mut points = Vec::with_capacity(2 * count);

    for (radius, label) in [(0.6, 0.0), (1.3, 1.0)] {
        for i in 0..count {
            let angle = 2.0 * PI * i as f64 / count as f64;
            let r = radius + gaussian_sample() * noise * 0.1;
            points.push(DataPoint::new(r * angle.cos(), r * angle.sin(), label));
        }
    }

    Dataset::new("circles", TaskKind::Classification, points)
}

/// Points uniform in `[-2, 2]²`, labeled 1 when the coordinate signs differ.
///
/// Draws continue until both classes hold `count` points, so the classes are
/// exactly balanced. Jitter is seeded too: the whole set is fixed by `seed`.
/// Sampling is capped at a fixed draw budget, so a stuck source yields a
/// short set instead of looping forever.
pub fn xor(count: usize, noise: f64, seed: Option<i64>) -> Dataset {
    let mut uniform = SeededUniform::new(seed.unwrap_or(DEFAULT_SEED));
    let jitter = noise * 0.1;
    let mut points = Vec::with_capacity(2 * count);
    let mut per_class = [0usize; 2];

    let max_draws = XOR_DRAWS_PER_POINT.saturating_mul(count.saturating_mul(2));
    let mut draws = 0;

    while per_class[0] < count || per_class[1] < count {
        if draws == max_draws {
            warn!("xor: gave up after {draws} draws with classes {per_class:?}");
            break;
        }
        draws += 1;
        let x = uniform.range(-2.0, 2.0);
        let y = uniform.range(-2.0, 2.0);
        let label = usize::from((x > 0.0) != (y > 0.0));
        if per_class[label] == count {
            continue;
        }
        per_class[label] += 1;
        let dx = gaussian_from(&mut uniform) * jitter;
        let dy = gaussian_from(&mut uniform) * jitter;
        points.push(DataPoint::new(x + dx, y + dy, label as f64));
    }

    Dataset::new("xor", TaskKind::Classification, points)
}

/// Two logarithmic spirals, the second rotated by π. Ignores `seed`.
pub fn spirals(count: usize, noise: f64, _seed: Option<i64>) -> Dataset {
    let jitter = noise * 0.1;
    let mut points = Vec::with_capacity(2 * count);

    for (offset, label) in [(0.0, 0.0), (PI, 1.0)] {
        for i in 0..count {
            let t = 3.0 * PI * i as f64 / count as f64;
            let r = 0.2 * (0.2 * t).exp();
            points.push(DataPoint::new(
                r * (t + offset).cos() + gaussian_sample() * jitter,
                r * (t + offset).sin() + gaussian_sample() * jitter,
                label,
            ));
        }
    }

    Dataset::new("spirals", TaskKind::Classification, points)
}

/// Regression on `sin(r)/r` over `[-3, 3]²`.
pub fn sinc(count: usize, noise: f64, seed: Option<i64>) -> Dataset {
    let mut uniform = SeededUniform::new(seed.unwrap_or(DEFAULT_SEED));
    let points = (0..count)
        .map(|_| {
            let x = uniform.range(-3.0, 3.0);
            let y = uniform.range(-3.0, 3.0);
            let r = (x * x + y * y).sqrt() + SINC_EPS;
            DataPoint::new(x, y, r.sin() / r + gaussian_sample() * noise * 0.05)
        })
        .collect();

    Dataset::new("sinc", TaskKind::Regression, points)
}

/// Regression on the plane `0.6x - 0.3y + 0.2` over `[-2, 2]²`.
pub fn plane(count: usize, noise: f64, seed: Option<i64>) -> Dataset {
    let mut uniform = SeededUniform::new(seed.unwrap_or(DEFAULT_SEED));
    let points = (0..count)
        .map(|_| {
            let x = uniform.range(-2.0, 2.0);
            let y = uniform.range(-2.0, 2.0);
            DataPoint::new(x, y, 0.6 * x - 0.3 * y + 0.2 + gaussian_sample() * noise * 0.1)
        })
        .collect();

    Dataset::new("plane", TaskKind::Regression, points)
}

/// The six built-in generators, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Moons,
    Circles,
    Xor,
    Spirals,
    Sinc,
    Plane,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Moons,
        DatasetKind::Circles,
        DatasetKind::Xor,
        DatasetKind::Spirals,
        DatasetKind::Sinc,
        DatasetKind::Plane,
    ];

    pub fn from_name(name: &str) -> Result<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| PlaygroundError::UnknownDataset(name.to_owned()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Moons => "moons",
            DatasetKind::Circles => "circles",
            DatasetKind::Xor => "xor",
            DatasetKind::Spirals => "spirals",
            DatasetKind::Sinc => "sinc",
            DatasetKind::Plane => "plane",
        }
    }

    pub fn task(&self) -> TaskKind {
        match self {
            DatasetKind::Sinc | DatasetKind::Plane => TaskKind::Regression,
            _ => TaskKind::Classification,
        }
    }

    pub fn generate(&self, count: usize, noise: f64, seed: Option<i64>) -> Dataset {
        match self {
            DatasetKind::Moons => moons(count, noise, seed),
            DatasetKind::Circles => circles(count, noise, seed),
            DatasetKind::Xor => xor(count, noise, seed),
            DatasetKind::Spirals => spirals(count, noise, seed),
            DatasetKind::Sinc => sinc(count, noise, seed),
            DatasetKind::Plane => plane(count, noise, seed),
        }
    }
}

impl FromStr for DatasetKind {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        DatasetKind::from_name(s)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation parameters; any change to them means a fresh dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetParams {
    pub kind: DatasetKind,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub noise: f64,
    #[serde(default)]
    pub seed: Option<i64>,
}

fn default_count() -> usize {
    100
}

impl DatasetParams {
    pub fn generate(&self) -> Dataset {
        self.kind.generate(self.count, self.noise, self.seed)
    }
}

impl Default for DatasetParams {
    fn default() -> Self {
        DatasetParams {
            kind: DatasetKind::Xor,
            count: default_count(),
            noise: 0.1,
            seed: None,
        }
    }
}
