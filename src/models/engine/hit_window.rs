//! Pixel-space hit window above the judgment line.

use super::playfield::PlayfieldConfig;

/// A key-down judges a note as a hit when its head sits inside
/// `[judgment_line_y - hit_box, judgment_line_y]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitWindow {
    pub top: i32,
    pub judgment_line: i32,
}

impl HitWindow {
    pub fn new(judgment_line_y: i32, hit_box: i32) -> Self {
        Self {
            top: judgment_line_y - hit_box,
            judgment_line: judgment_line_y,
        }
    }

    pub fn from_playfield(field: &PlayfieldConfig) -> Self {
        Self::new(field.judgment_line_y, field.hit_box)
    }

    pub fn contains(&self, pos_y: i32) -> bool {
        (self.top..=self.judgment_line).contains(&pos_y)
    }

    /// True once a note head has scrolled past the judgment line.
    pub fn is_past(&self, pos_y: i32) -> bool {
        pos_y > self.judgment_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let window = HitWindow::new(594, 68);
        assert!(!window.contains(525));
        assert!(window.contains(526));
        assert!(window.contains(560));
        assert!(window.contains(594));
        assert!(!window.contains(595));
    }

    #[test]
    fn past_means_strictly_below_the_line() {
        let window = HitWindow::from_playfield(&PlayfieldConfig::default());
        assert!(!window.is_past(594));
        assert!(window.is_past(595));
    }
}
