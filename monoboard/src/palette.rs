//! Column color rotation.
//!
//! New columns take the first palette color no existing column uses, so a
//! board's columns stay visually distinct until the palette runs out.

/// The six column colors, in rotation order.
pub const PALETTE: &[&str] = &[
    "#ef4444", // red
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#10b981", // emerald
    "#06b6d4", // cyan
    "#f97316", // orange
];

/// Pick the first palette color not in `used`, or the first color when all are taken.
pub fn next_column_color<'a, I>(used: I) -> &'static str
where
    I: IntoIterator<Item = &'a str>,
{
    let used: Vec<&str> = used.into_iter().collect();
    PALETTE
        .iter()
        .copied()
        .find(|color| !used.iter().any(|u| u.eq_ignore_ascii_case(color)))
        .unwrap_or(PALETTE[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_color_when_empty() {
        assert_eq!(next_column_color(std::iter::empty()), "#ef4444");
    }

    #[test]
    fn test_skips_used_colors() {
        assert_eq!(next_column_color(["#ef4444", "#f59e0b"]), "#8b5cf6");
        // Gaps are filled first
        assert_eq!(next_column_color(["#f59e0b"]), "#ef4444");
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(next_column_color(["#EF4444"]), "#f59e0b");
    }

    #[test]
    fn test_wraps_to_first_when_exhausted() {
        assert_eq!(next_column_color(PALETTE.iter().copied()), PALETTE[0]);
    }

    #[test]
    fn test_palette_valid_hex() {
        assert_eq!(PALETTE.len(), 6);
        for color in PALETTE {
            assert_eq!(color.len(), 7);
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
