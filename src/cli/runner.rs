// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command execution: load, stitch and classify with timing

use crate::classify::{Classification, PointClassifier};
use crate::config::Config;
use crate::geometry::FaceBvh;
use crate::io;
use crate::mesh::MeshSet;
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::path::Path;
use std::time::{Duration, Instant};

/// Result of a stitch operation
pub struct StitchResult {
    pub meshes: MeshSet,
    pub duration: Duration,
}

/// Runner for stitching and classification commands
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a polygon file and stitch it
    pub fn stitch_file(&self, input: &Path) -> Result<StitchResult> {
        let polygons = io::load_polygons(input)?;
        let start = Instant::now();
        let meshes = MeshSet::from_polygons(&polygons, &self.config.stitch)
            .with_context(|| format!("Failed to build faces from {}", input.display()))?;
        Ok(StitchResult {
            meshes,
            duration: start.elapsed(),
        })
    }

    /// Classify a batch of points in parallel.
    ///
    /// Point `i` draws its rays from a generator seeded with `seed + i`, so
    /// results do not depend on scheduling.
    pub fn classify_points(
        &self,
        meshes: &MeshSet,
        points: &[Point3<f64>],
        mesh_filter: Option<usize>,
        seed: u64,
    ) -> Vec<crate::Result<Classification>> {
        let index = FaceBvh::from_soup(meshes.soup());
        let classifier = PointClassifier::new(meshes, &index, self.config.classify);
        points
            .par_iter()
            .enumerate()
            .map(|(i, point)| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                classifier.classify(point, mesh_filter, &mut rng)
            })
            .collect()
    }
}

/// Parse `x,y,z` (commas and/or whitespace) into a point
pub fn parse_point(text: &str) -> Result<Point3<f64>> {
    let coords = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid point: {:?}", text))?;
    if coords.len() != 3 {
        bail!("Point needs 3 coordinates, got {}: {:?}", coords.len(), text);
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Read one point per non-empty, non-`#` line
pub fn read_points(path: &Path) -> Result<Vec<Point3<f64>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read points file: {}", path.display()))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(n, line)| parse_point(line).with_context(|| format!("{}:{}", path.display(), n + 1)))
        .collect()
}
