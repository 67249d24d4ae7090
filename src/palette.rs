use rand::Rng;

/// Parses `#RRGGBB` (the leading `#` is optional) into an RGB triple.
pub fn parse_hex(value: &str) -> Option<[u8; 3]> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

pub fn random_palette(size: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..size)
        .map(|_| {
            format_hex([
                rng.gen_range(0..=255),
                rng.gen_range(0..=255),
                rng.gen_range(0..=255),
            ])
        })
        .collect()
}

/// Flattens a palette into RGB channels scaled to [0,1], in color order.
/// Malformed entries are skipped rather than failing the whole palette.
pub fn palette_features(colors: &[String]) -> Vec<f64> {
    colors
        .iter()
        .filter_map(|color| parse_hex(color))
        .flat_map(|[r, g, b]| {
            [
                f64::from(r) / 255.0,
                f64::from(g) / 255.0,
                f64::from(b) / 255.0,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FEATURE_COUNT, PALETTE_SIZE};

    #[test]
    fn parse_hex_accepts_both_prefixed_and_bare() {
        assert_eq!(parse_hex("#FF8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex("ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex(" #FF8000 "), Some([255, 128, 0]));
    }

    #[test]
    fn parse_hex_rejects_malformed_values() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(parse_hex("#FF80000"), None);
    }

    #[test]
    fn format_parse_round_trip() {
        let rgb = [7, 130, 255];
        assert_eq!(parse_hex(&format_hex(rgb)), Some(rgb));
    }

    #[test]
    fn random_palette_yields_valid_hex_codes() {
        let palette = random_palette(PALETTE_SIZE);
        assert_eq!(palette.len(), PALETTE_SIZE);
        for color in &palette {
            assert!(parse_hex(color).is_some(), "bad color {color}");
        }
    }

    #[test]
    fn features_are_normalized_and_ordered() {
        let features = palette_features(&["#FF0000".into(), "#000080".into()]);
        assert_eq!(features, vec![1.0, 0.0, 0.0, 0.0, 0.0, 128.0 / 255.0]);
    }

    #[test]
    fn features_skip_malformed_colors() {
        let colors: Vec<String> = vec![
            "#FF0000".into(),
            "oops".into(),
            "#00FF00".into(),
            "#0000FF".into(),
            "#FFFFFF".into(),
            "#000000".into(),
        ];
        assert_eq!(palette_features(&colors).len(), FEATURE_COUNT);
    }
}
