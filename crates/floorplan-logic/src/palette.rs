//! Named color palette for room boxes.
//!
//! Upstream room lists carry free-form color names. Only names in
//! [`PALETTE`] survive validation; anything else is swapped for a random
//! palette entry drawn from the caller's RNG.

use rand::seq::SliceRandom;
use rand::Rng;

/// CSS color names accepted for rooms.
pub const PALETTE: &[&str] = &[
    "red", "green", "blue", "yellow", "orange", "purple", "pink", "cyan", "magenta", "lime",
    "teal", "lavender", "brown", "beige", "maroon", "olive", "navy", "grey", "white", "black",
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "bisque", "blanchedalmond",
    "blueviolet", "burlywood", "cadetblue", "chartreuse", "chocolate", "coral",
    "cornflowerblue", "cornsilk", "crimson", "darkblue", "darkcyan", "darkgoldenrod",
    "darkgray", "darkgreen", "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange",
    "darkorchid", "darkred", "darksalmon", "darkseagreen", "darkslateblue", "darkslategray",
    "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray", "dodgerblue",
    "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold",
    "goldenrod", "greenyellow", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgreen", "lightpink", "lightsalmon", "lightseagreen",
    "lightskyblue", "lightslategray", "lightsteelblue", "lightyellow", "limegreen", "linen",
    "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
    "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred",
    "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite", "oldlace",
    "olivedrab", "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise",
    "palevioletred", "papayawhip", "peachpuff", "peru", "plum", "powderblue", "rosybrown",
    "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna",
    "silver", "skyblue", "slateblue", "slategray", "snow", "springgreen", "steelblue", "tan",
    "thistle", "tomato", "turquoise", "violet", "wheat", "whitesmoke", "yellowgreen",
];

/// True if `name` is an exact (lower-case) palette member.
pub fn is_palette_color(name: &str) -> bool {
    PALETTE.contains(&name)
}

/// Uniformly random palette color.
pub fn random_color(rng: &mut impl Rng) -> &'static str {
    // PALETTE is a non-empty constant
    PALETTE.choose(rng).copied().unwrap_or("grey")
}

/// Lower-case a supplied color and keep it if it is in the palette.
/// Unknown or missing colors get a random palette pick.
pub fn normalize_color(color: Option<&str>, rng: &mut impl Rng) -> String {
    match color.map(|c| c.trim().to_lowercase()) {
        Some(c) if is_palette_color(&c) => c,
        _ => random_color(rng).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_palette_has_no_duplicates() {
        let unique: HashSet<&str> = PALETTE.iter().copied().collect();
        assert_eq!(unique.len(), PALETTE.len());
        assert_eq!(PALETTE.len(), 139);
    }

    #[test]
    fn test_palette_is_lowercase() {
        for name in PALETTE {
            assert_eq!(*name, name.to_lowercase(), "{} should be lower-case", name);
        }
    }

    #[test]
    fn test_known_color_kept_case_insensitively() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(normalize_color(Some("CornflowerBlue"), &mut rng), "cornflowerblue");
        assert_eq!(normalize_color(Some("teal"), &mut rng), "teal");
    }

    #[test]
    fn test_unknown_color_replaced() {
        let mut rng = StdRng::seed_from_u64(7);
        let c = normalize_color(Some("rebeccapurple-ish"), &mut rng);
        assert!(is_palette_color(&c));
    }

    #[test]
    fn test_missing_color_assigned() {
        let mut rng = StdRng::seed_from_u64(7);
        let c = normalize_color(None, &mut rng);
        assert!(is_palette_color(&c));
    }

    #[test]
    fn test_random_color_deterministic_with_seed() {
        let a: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..10).map(|_| random_color(&mut rng)).collect()
        };
        let b: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..10).map(|_| random_color(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }
}
