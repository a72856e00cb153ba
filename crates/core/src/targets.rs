//! Target display helpers

use colored::Color;

use crate::target_set::TargetSet;

// Red and green are reserved for failure and success lines.
const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::BrightCyan,
    Color::BrightMagenta,
    Color::BrightBlue,
];

/// Label color for the target declared at `position`
///
/// Neighbours in declaration order always get different colors, so adjacent
/// lines of `--list` and run headers stay distinguishable.
pub fn target_color(position: usize) -> Color {
    PALETTE[position % PALETTE.len()]
}

/// Label color for a target by name; unknown names get the first palette entry
pub fn color_for(targets: &TargetSet, name: &str) -> Color {
    target_color(targets.position(name).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::builtin::builtin_targets;

    #[test]
    fn neighbours_never_share_a_color() {
        for position in 0..20 {
            assert_ne!(target_color(position), target_color(position + 1));
        }
    }

    #[test]
    fn colors_follow_declaration_order() {
        let targets = TargetSet::from_config(builtin_targets()).unwrap();
        assert_eq!(color_for(&targets, "lint"), target_color(0));
        assert_eq!(color_for(&targets, "pre-commit"), target_color(6));
        assert_eq!(target_color(6), target_color(0));
    }
}
