use motiongrid_common::config::GridConfig;
use motiongrid_common::error::MotionGridResult;
use motiongrid_processing_core::GridSize;

/// What a typed character asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Switch the overlay to a new grid size.
    SelectGrid(GridSize),
    /// Space: reserved, currently does nothing.
    Reserved,
    Ignored,
}

/// Maps the digit keys `1`, `2`, ... onto configured grid presets.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    presets: Vec<GridSize>,
}

impl KeyBindings {
    pub fn from_config(config: &GridConfig) -> MotionGridResult<Self> {
        let presets = config
            .presets
            .iter()
            .map(|&cells| GridSize::new(cells))
            .collect::<MotionGridResult<Vec<_>>>()?;
        Ok(Self { presets })
    }

    pub fn action_for(&self, ch: char) -> KeyAction {
        if ch == ' ' {
            return KeyAction::Reserved;
        }
        let Some(digit) = ch.to_digit(10).filter(|d| *d >= 1) else {
            return KeyAction::Ignored;
        };
        self.presets
            .get(digit as usize - 1)
            .copied()
            .map_or(KeyAction::Ignored, KeyAction::SelectGrid)
    }
}
