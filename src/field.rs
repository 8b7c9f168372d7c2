use crate::error::{GameError, Result};
use crate::snake::Position;

/// The playable rectangle. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    width: i32,
    height: i32,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidField { width, height });
        }
        Ok(Field { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(400, 300).unwrap()
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(Field::new(0, 300), Err(GameError::InvalidField { width: 0, height: 300 })));
        assert!(matches!(Field::new(400, -1), Err(GameError::InvalidField { .. })));
        assert!(Field::new(1, 1).is_ok());
    }

    #[test]
    fn contains_edges() {
        let f = field();
        assert!(f.contains(Position::new(200, 150)));
        assert!(f.contains(Position::new(0, 0)));
        assert!(f.contains(Position::new(399, 299)));
        assert!(!f.contains(Position::new(400, 150)));
        assert!(!f.contains(Position::new(-1, 150)));
        assert!(!f.contains(Position::new(200, 300)));
        assert!(!f.contains(Position::new(200, -1)));
        assert!(!f.contains(Position::new(450, 350)));
    }

    #[test]
    fn center_is_inside() {
        assert_eq!(field().center(), Position::new(200, 150));
        let tiny = Field::new(1, 1).unwrap();
        assert!(tiny.contains(tiny.center()));
    }

    proptest! {
        #[test]
        fn contains_matches_bounds(x in -1000i32..1000, y in -1000i32..1000) {
            let expected = x >= 0 && x < 400 && y >= 0 && y < 300;
            prop_assert_eq!(field().contains(Position::new(x, y)), expected);
        }
    }
}
