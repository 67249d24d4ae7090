use crate::palette::format_hex;

pub const SCHEMES: [&str; 4] = ["complementary", "analogous", "triadic", "monochromatic"];

/// Derives a five-color palette from one base color. The base is always the
/// first entry. Returns `None` for an unknown scheme name.
pub fn harmony_palette(base: [u8; 3], scheme: &str) -> Option<Vec<String>> {
    let (h, s, l) = rgb_to_hsl(base);
    let colors = match scheme {
        "complementary" => vec![
            base,
            hsl_to_rgb(h, s, lighten(l, 0.15)),
            hsl_to_rgb(rotate(h, 180.0), s, l),
            hsl_to_rgb(rotate(h, 180.0), s, lighten(l, 0.15)),
            hsl_to_rgb(h, s, lighten(l, -0.2)),
        ],
        "analogous" => vec![
            base,
            hsl_to_rgb(rotate(h, 30.0), s, l),
            hsl_to_rgb(rotate(h, -30.0), s, l),
            hsl_to_rgb(rotate(h, 60.0), s, l),
            hsl_to_rgb(rotate(h, -60.0), s, l),
        ],
        "triadic" => vec![
            base,
            hsl_to_rgb(rotate(h, 120.0), s, l),
            hsl_to_rgb(rotate(h, 240.0), s, l),
            hsl_to_rgb(rotate(h, 120.0), s, lighten(l, 0.15)),
            hsl_to_rgb(rotate(h, 240.0), s, lighten(l, -0.15)),
        ],
        "monochromatic" => vec![
            base,
            hsl_to_rgb(h, s, lighten(l, 0.25)),
            hsl_to_rgb(h, s, lighten(l, 0.12)),
            hsl_to_rgb(h, s, lighten(l, -0.12)),
            hsl_to_rgb(h, s, lighten(l, -0.25)),
        ],
        _ => return None,
    };
    Some(colors.into_iter().map(format_hex).collect())
}

fn rotate(hue: f64, degrees: f64) -> f64 {
    (hue + degrees).rem_euclid(360.0)
}

fn lighten(lightness: f64, delta: f64) -> f64 {
    (lightness + delta).clamp(0.05, 0.95)
}

/// RGB -> HSL with hue in degrees, saturation and lightness in [0,1].
fn rgb_to_hsl(rgb: [u8; 3]) -> (f64, f64, f64) {
    let r = f64::from(rgb[0]) / 255.0;
    let g = f64::from(rgb[1]) / 255.0;
    let b = f64::from(rgb[2]) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());

    let (r, g, b) = match hp {
        hp if hp < 1.0 => (c, x, 0.0),
        hp if hp < 2.0 => (x, c, 0.0),
        hp if hp < 3.0 => (0.0, c, x),
        hp if hp < 4.0 => (0.0, x, c),
        hp if hp < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PALETTE_SIZE;
    use crate::palette::parse_hex;

    const RED: [u8; 3] = [255, 0, 0];

    #[test]
    fn every_scheme_yields_five_valid_colors_with_base_first() {
        for scheme in SCHEMES {
            let colors = harmony_palette(RED, scheme).expect(scheme);
            assert_eq!(colors.len(), PALETTE_SIZE, "{scheme}");
            assert_eq!(colors[0], "#FF0000", "{scheme}");
            for color in &colors {
                assert!(parse_hex(color).is_some(), "{scheme}: bad color {color}");
            }
        }
    }

    #[test]
    fn complementary_of_red_includes_cyan() {
        let colors = harmony_palette(RED, "complementary").unwrap();
        assert!(colors.contains(&"#00FFFF".to_string()), "{colors:?}");
    }

    #[test]
    fn triadic_of_red_rotates_to_green_and_blue() {
        let colors = harmony_palette(RED, "triadic").unwrap();
        assert_eq!(colors[1], "#00FF00");
        assert_eq!(colors[2], "#0000FF");
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(harmony_palette(RED, "vaporwave").is_none());
    }

    #[test]
    fn hsl_round_trip_on_saturated_colors() {
        for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0], [128, 64, 32]] {
            let (h, s, l) = rgb_to_hsl(rgb);
            let back = hsl_to_rgb(h, s, l);
            for channel in 0..3 {
                let diff = (i16::from(rgb[channel]) - i16::from(back[channel])).abs();
                assert!(diff <= 1, "{rgb:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn lightness_stays_clamped() {
        let colors = harmony_palette([250, 250, 250], "monochromatic").unwrap();
        assert_eq!(colors.len(), PALETTE_SIZE);
        for color in &colors {
            assert!(parse_hex(color).is_some());
        }
    }
}
