use crate::errors::{WayfinderError, WayfinderResult};
use crate::map::TerrainData;
use crate::terrain::constants::*;
use bevy::log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::time::Instant;

pub mod fields;
pub mod noise_sampler;

pub use noise_sampler::{NoiseSampler, ridge};

/// Which layer a noise pass produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoisePass {
    Height,
    Water,
}

/// Seed-derived inputs for one noise pass
#[derive(Debug, Clone)]
pub struct PassSeed {
    pub sampler: NoiseSampler,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl PassSeed {
    /// Offsets for the height pass come straight from the top-level seed. The
    /// water pass re-seeds from the first draw of that stream so the two layers
    /// are decorrelated but both reproducible.
    pub fn derive(seed: u32, pass: NoisePass) -> Self {
        let (sampler_seed, mut rng) = match pass {
            NoisePass::Height => (seed, Pcg64::seed_from_u64(seed as u64)),
            NoisePass::Water => {
                let reseed: u32 = Pcg64::seed_from_u64(seed as u64).r#gen();
                (reseed, Pcg64::seed_from_u64(reseed as u64))
            }
        };

        let x_offset = rng.gen_range(0..SEED_OFFSET_RANGE) as f64;
        let y_offset = rng.gen_range(0..SEED_OFFSET_RANGE) as f64;

        Self {
            sampler: NoiseSampler::new(sampler_seed),
            x_offset,
            y_offset,
        }
    }
}

/// Main terrain generator struct
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    pub seed: u32,
}

impl TerrainGenerator {
    /// Create a new terrain generator
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Generate all four terrain layers
    pub fn generate(&self, width: u32, height: u32) -> WayfinderResult<TerrainData> {
        if width == 0 || height == 0 {
            return Err(WayfinderError::InvalidDimensions { width, height });
        }

        let started = Instant::now();

        let heights = self.height_field(width, height);
        let water = self.water_field(width, height);
        debug!(
            "Noise passes for {width}x{height} finished in {:.2?}",
            started.elapsed()
        );

        let terrain = TerrainData::from_layers(width, height, heights, water)?;

        let (land, water_cells, forest) = terrain.kind_counts();
        info!(
            "Generated {width}x{height} terrain from seed {seed}: {land} land, {water_cells} water, {forest} forest cells",
            seed = self.seed
        );
        debug!("Terrain generation took {:.2?}", started.elapsed());

        Ok(terrain)
    }

    /// Elevation layer in [0, HEIGHT_CEILING]
    pub fn height_field(&self, width: u32, height: u32) -> Vec<f32> {
        let pass = PassSeed::derive(self.seed, NoisePass::Height);
        let mut heights = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                let n = layered_noise(&pass, x, y, width, height);
                let d = center_distance(x, y, width, height);
                heights.push(shape_elevation(n, d));
            }
        }

        heights
    }

    /// Moisture layer in [0, 255]
    pub fn water_field(&self, width: u32, height: u32) -> Vec<u8> {
        let pass = PassSeed::derive(self.seed, NoisePass::Water);
        let mut water = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                let n = layered_noise(&pass, x, y, width, height);
                water.push(shape_moisture(n));
            }
        }

        water
    }
}

/// Fractal noise for one cell, normalised by the accumulated octave range.
///
/// Only the base sample is shifted by the pass offsets. Each octave feeds the
/// running value back into its ridge term, so octaves amplify whatever the
/// lower layers already built up. Both passes share this shape and differ only
/// in their seeds; without the feedback moisture never climbs into the forest band.
pub fn layered_noise(pass: &PassSeed, x: u32, y: u32, width: u32, height: u32) -> f64 {
    let mut frequency = BASE_FREQUENCY;
    let mut amplitude = 1.0;
    let mut range = 1.0;

    let pos_x = (x as f64 / width as f64 - 0.5) * frequency;
    let pos_y = (y as f64 / height as f64 - 0.5) * frequency;

    let sampler = &pass.sampler;
    let mut n = sampler.sample(pos_x + pass.x_offset, pos_y + pass.y_offset);

    for _ in 0..OCTAVES {
        frequency *= 2.0;
        amplitude *= 0.5;
        range += amplitude;

        let (ox, oy) = (pos_x * frequency, pos_y * frequency);
        n += OCTAVE_WEIGHT * sampler.ridge_sample(ox, oy) * amplitude * n;
        n += OCTAVE_WEIGHT * sampler.sample(ox, oy) * amplitude;
    }

    n / range
}

/// Distance from the map centre, normalised by half the map width
pub fn center_distance(x: u32, y: u32, width: u32, height: u32) -> f64 {
    let half_width = width as f64 / 2.0;
    let half_height = height as f64 / 2.0;
    let dx = half_width - x as f64;
    let dy = half_height - y as f64;
    (dx * dx + dy * dy).sqrt() / half_width
}

/// Blend noise between two radial envelopes so land tapers into sea at the edges,
/// then scale to the elevation ceiling
pub fn shape_elevation(n: f64, d: f64) -> f32 {
    let inner = 1.0 - d.powf(COAST_INNER_EXPONENT);
    let outer = 1.0 - d.powf(COAST_OUTER_EXPONENT);

    let shaped = n * (outer - inner) + COAST_LOWER_WEIGHT * inner;
    let shaped = shaped.clamp(0.0, 1.0).powf(HEIGHT_SHAPING_EXPONENT);

    (shaped * HEIGHT_CEILING as f64) as f32
}

/// Sharpen moisture contrast and quantise to a byte. Negative noise reads as bone dry.
pub fn shape_moisture(n: f64) -> u8 {
    let shaped = n.max(0.0).powf(WATER_SHAPING_EXPONENT).clamp(0.0, 1.0);
    let shaped = shaped.powf(WATER_CONTRAST_EXPONENT);

    (shaped * WATER_CEILING) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain_generation::fields::is_forest;

    #[test]
    fn test_generation_is_deterministic() {
        let a = TerrainGenerator::new(1234).generate(48, 40).unwrap();
        let b = TerrainGenerator::new(1234).generate(48, 40).unwrap();

        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.heights), bits(&b.heights));
        assert_eq!(bits(&a.slopes), bits(&b.slopes));
        assert_eq!(a.water, b.water);
        assert_eq!(a.forest, b.forest);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = TerrainGenerator::new(1).generate(32, 32).unwrap();
        let b = TerrainGenerator::new(2).generate(32, 32).unwrap();
        assert_ne!(a.heights, b.heights);
    }

    #[test]
    fn test_field_ranges() {
        for seed in [0, 7, 1234, 99_999] {
            let terrain = TerrainGenerator::new(seed).generate(64, 48).unwrap();
            assert_eq!(terrain.cell_count(), 64 * 48);
            assert!(
                terrain
                    .heights
                    .iter()
                    .all(|h| h.is_finite() && (0.0..=HEIGHT_CEILING).contains(h)),
                "heights out of range for seed {seed}"
            );
            assert!(terrain.slopes.iter().all(|s| (0.0..90.0).contains(s)));
            // u8 already bounds water to [0, 255]; make sure the layer has the right size
            assert_eq!(terrain.water.len(), terrain.cell_count());
        }
    }

    #[test]
    fn test_forest_matches_rule_both_ways() {
        let mut forested = 0;
        let mut open = 0;

        for seed in 1..=8 {
            let terrain = TerrainGenerator::new(seed).generate(128, 128).unwrap();

            for i in 0..terrain.cell_count() {
                let e = terrain.heights[i] / 10.0;
                let in_band = e > 25.0 && e < 70.0 && terrain.water[i] > 55;
                assert_eq!(
                    terrain.forest[i], in_band,
                    "forest mismatch at index {i}, seed {seed}"
                );
                assert_eq!(terrain.forest[i], is_forest(terrain.heights[i], terrain.water[i]));

                if terrain.forest[i] {
                    forested += 1;
                } else {
                    open += 1;
                }
            }
        }

        assert!(forested > 0, "generated worlds should grow some forest");
        assert!(open > 0);
    }

    #[test]
    fn test_height_pass_octaves_feed_back_into_ridge() {
        let pass = PassSeed::derive(99, NoisePass::Height);
        let (width, height) = (64, 48);
        let mut feedback_mattered = false;

        for (x, y) in [(13, 29), (0, 0), (40, 7), (63, 47), (32, 24)] {
            let pos_x = (x as f64 / width as f64 - 0.5) * 2.0;
            let pos_y = (y as f64 / height as f64 - 0.5) * 2.0;

            let base = pass.sampler.sample(pos_x + pass.x_offset, pos_y + pass.y_offset);
            let mut n = base;
            let mut plain = base;
            let (mut frequency, mut amplitude, mut range) = (2.0, 1.0, 1.0);
            for _ in 0..3 {
                frequency *= 2.0;
                amplitude *= 0.5;
                range += amplitude;
                let s = pass.sampler.sample(pos_x * frequency, pos_y * frequency);
                n += 0.5 * ridge(s) * amplitude * n;
                n += 0.5 * s * amplitude;
                plain += 0.5 * s * amplitude;
            }

            assert_eq!(layered_noise(&pass, x, y, width, height), n / range);
            feedback_mattered |= n != plain;
        }

        assert!(feedback_mattered, "ridge feedback should change the result");
    }

    #[test]
    fn test_water_pass_uses_its_own_seed() {
        let generator = TerrainGenerator::new(99);
        let height_pass = PassSeed::derive(99, NoisePass::Height);
        let water_pass = PassSeed::derive(99, NoisePass::Water);
        let water = generator.water_field(64, 48);

        let mut differs = false;
        for (x, y) in [(13, 29), (40, 7), (32, 24), (20, 30)] {
            let index = (y * 64 + x) as usize;
            let from_water = layered_noise(&water_pass, x, y, 64, 48);
            assert_eq!(water[index], shape_moisture(from_water));
            differs |= from_water != layered_noise(&height_pass, x, y, 64, 48);
        }
        assert!(differs);
    }

    #[test]
    fn test_slope_uses_in_bounds_neighbor_count() {
        let terrain = TerrainGenerator::new(77).generate(12, 9).unwrap();
        let (w, h) = (terrain.width, terrain.height);

        for y in 0..h {
            for x in 0..w {
                let index = (y * w + x) as usize;
                let center = terrain.heights[index];
                let mut sum = 0.0f32;
                let mut count = 0;
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                        if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                            continue;
                        }
                        let other = terrain.heights[(ny * w as i64 + nx) as usize];
                        sum += fields::slope_between(center, other);
                        count += 1;
                    }
                }

                let corner = (x == 0 || x == w - 1) && (y == 0 || y == h - 1);
                let edge = !corner && (x == 0 || x == w - 1 || y == 0 || y == h - 1);
                let expected_count = if corner { 3 } else if edge { 5 } else { 8 };
                assert_eq!(count, expected_count);

                let expected = sum / count as f32;
                assert!((terrain.slopes[index] - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_envelopes_meet_at_unit_distance() {
        // Both envelopes vanish at d = 1, whatever the noise says
        for n in [-1.0, -0.3, 0.0, 0.4, 1.0] {
            assert_eq!(shape_elevation(n, 1.0), 0.0);
        }
        assert_eq!(center_distance(32, 32, 64, 64), 0.0);
        assert_eq!(center_distance(0, 32, 64, 64), 1.0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let generator = TerrainGenerator::new(1);
        assert!(matches!(
            generator.generate(0, 10),
            Err(WayfinderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(generator.generate(10, 0).is_err());
    }

    #[test]
    fn test_pass_seeds_are_decorrelated() {
        let height = PassSeed::derive(1234, NoisePass::Height);
        let water = PassSeed::derive(1234, NoisePass::Water);
        assert_ne!(height.sampler.seed(), water.sampler.seed());

        let again = PassSeed::derive(1234, NoisePass::Water);
        assert_eq!(water.x_offset, again.x_offset);
        assert_eq!(water.y_offset, again.y_offset);
        assert!((0.0..2048.0).contains(&height.x_offset));
    }

    #[test]
    fn test_shape_elevation_bounds() {
        assert_eq!(shape_elevation(-5.0, 0.5), 0.0);
        assert_eq!(shape_elevation(5.0, 0.5), HEIGHT_CEILING);
        // At the centre, the lower envelope alone contributes 0.4
        let expected = (0.4f64.powf(1.5) * 2550.0) as f32;
        assert_eq!(shape_elevation(0.0, 0.0), expected);
    }

    #[test]
    fn test_shape_moisture() {
        assert_eq!(shape_moisture(-0.5), 0);
        assert_eq!(shape_moisture(0.0), 0);
        assert_eq!(shape_moisture(1.0), 255);
        assert_eq!(shape_moisture(3.0), 255);
        // 0.5^1.5 cubed = 0.5^4.5 ~ 0.0442 -> 11
        assert_eq!(shape_moisture(0.5), 11);
    }
}
