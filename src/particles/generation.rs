use rand::Rng;

use crate::particles::config::FieldConfig;
use crate::particles::error::FieldError;
use crate::particles::field_data::ParticleField;
use crate::particles::palette::{band_color, pick_band};

/// Create a field of `count` particles with the default look.
pub fn create_field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<ParticleField, FieldError> {
    generate_field(&FieldConfig::with_count(count), rng)
}

/// Generate a field from a full configuration.
///
/// Each particle draws, in order: x, y, z, band choice, lightness jitter,
/// base size. Given the same config and the same rng state the output is
/// identical.
pub fn generate_field<R: Rng + ?Sized>(
    config: &FieldConfig,
    rng: &mut R,
) -> Result<ParticleField, FieldError> {
    config.validate()?;

    let count = config.count;
    let palette = &config.palette;

    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);
    let mut band_histogram = vec![0usize; palette.bands.len()];

    for _ in 0..count {
        positions.push(sample_position(rng, config.extent));

        let band_index = pick_band(&palette.bands, rng.gen::<f32>());
        band_histogram[band_index] += 1;

        let lightness = palette.lightness_base + rng.gen::<f32>() * palette.lightness_jitter;
        colors.push(band_color(
            &palette.bands[band_index],
            palette.saturation,
            lightness,
            palette.color_space,
        ));

        sizes.push(sample_size(rng, config.size_range));
    }

    log::debug!(
        "Generated particle field: {} particles, extent {}, bands {:?}",
        count,
        config.extent,
        band_histogram
    );

    Ok(ParticleField::from_generated(
        positions,
        colors,
        sizes,
        band_histogram,
        config.wave,
        config.rotation,
    ))
}

/// Uniform point in the cube of side `extent` centered at the origin
fn sample_position<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> [f32; 3] {
    let x = (rng.gen::<f32>() - 0.5) * extent;
    let y = (rng.gen::<f32>() - 0.5) * extent;
    let z = (rng.gen::<f32>() - 0.5) * extent;
    [x, y, z]
}

fn sample_size<R: Rng + ?Sized>(rng: &mut R, [min, max]: [f32; 2]) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::palette::{hsl_to_rgb, srgb_to_linear, ColorSpace};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_buffer_lengths_match_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [1, 4, 2000] {
            let field = create_field(count, &mut rng).unwrap();
            assert_eq!(field.count(), count);
            assert_eq!(field.positions().len(), count);
            assert_eq!(field.colors().len(), count);
            assert_eq!(field.sizes().len(), count);
            assert_eq!(field.positions_flat().len(), count * 3);
        }
    }

    #[test]
    fn test_zero_count_fails_fast() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(create_field(0, &mut rng), Err(FieldError::EmptyField)));
    }

    #[test]
    fn test_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        let field = create_field(2000, &mut rng).unwrap();

        for p in field.positions() {
            assert!(p.iter().all(|c| (-25.0..=25.0).contains(c)));
        }
        for c in field.colors() {
            assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        for s in field.sizes() {
            assert!((0.05..=0.20).contains(s));
        }
    }

    #[test]
    fn test_all_bands_used() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = create_field(2000, &mut rng).unwrap();
        let histogram = field.band_histogram();

        assert_eq!(histogram.len(), 3);
        assert_eq!(histogram.iter().sum::<usize>(), 2000);
        // Roughly a third each
        for &n in histogram {
            assert!(n > 500 && n < 850, "unbalanced band count {}", n);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = create_field(128, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = create_field(128, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
        assert_eq!(a.sizes(), b.sizes());
    }

    /// Replay the per-particle draw order and rebuild each expected color
    fn expected_colors(config: &FieldConfig, seed: u64) -> Vec<[f32; 3]> {
        let palette = &config.palette;
        let mut rng = StdRng::seed_from_u64(seed);

        (0..config.count)
            .map(|_| {
                let _position: [f32; 3] = [rng.gen(), rng.gen(), rng.gen()];
                let band = &palette.bands[pick_band(&palette.bands, rng.gen::<f32>())];
                let jitter = rng.gen::<f32>();
                let _size = rng.gen::<f32>();

                assert!((0.0..1.0).contains(&jitter));
                let lightness = 0.5 + jitter * 0.2;
                assert!((0.5..=0.7).contains(&lightness));

                let rgb = hsl_to_rgb(band.hue, 0.8, lightness);
                match palette.color_space {
                    ColorSpace::Working => rgb,
                    ColorSpace::Srgb => rgb.map(srgb_to_linear),
                }
            })
            .collect()
    }

    #[test]
    fn test_colors_follow_band_hsl() {
        let config = FieldConfig::with_count(500);
        let field = generate_field(&config, &mut StdRng::seed_from_u64(21)).unwrap();

        let expected = expected_colors(&config, 21);
        for (i, (got, want)) in field.colors().iter().zip(&expected).enumerate() {
            for c in 0..3 {
                assert!(
                    (got[c] - want[c]).abs() < 1e-6,
                    "particle {} color {:?} expected {:?}",
                    i,
                    got,
                    want
                );
            }
        }

        // Every generated color is one of the band hues at saturation 0.8
        for color in field.colors() {
            let max = color.iter().cloned().fold(f32::MIN, f32::max);
            let min = color.iter().cloned().fold(f32::MAX, f32::min);
            let lightness = (max + min) / 2.0;
            assert!((0.5 - 1e-5..0.7 + 1e-5).contains(&lightness));
            let saturation = (max - min) / (1.0 - (2.0 * lightness - 1.0).abs());
            assert!((saturation - 0.8).abs() < 1e-4);
        }
    }

    #[test]
    fn test_srgb_colors_are_decoded_working_colors() {
        let working = FieldConfig::with_count(200);
        let mut srgb = working.clone();
        srgb.palette.color_space = ColorSpace::Srgb;

        let a = generate_field(&working, &mut StdRng::seed_from_u64(8)).unwrap();
        let b = generate_field(&srgb, &mut StdRng::seed_from_u64(8)).unwrap();

        assert_eq!(a.positions(), b.positions());
        for (w, s) in a.colors().iter().zip(b.colors()) {
            assert_eq!(w.map(srgb_to_linear), *s);
        }
        assert_eq!(expected_colors(&srgb, 8), b.colors());

        let band = &working.palette.bands[1];
        assert_eq!(
            band_color(band, 0.8, 0.6, ColorSpace::Srgb),
            band_color(band, 0.8, 0.6, ColorSpace::Working).map(srgb_to_linear)
        );
    }

    #[test]
    fn test_custom_extent() {
        let config = FieldConfig {
            count: 500,
            extent: 2.0,
            ..FieldConfig::default()
        };
        let field = generate_field(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert!(field.positions().iter().flatten().all(|c| c.abs() <= 1.0));
    }
}
