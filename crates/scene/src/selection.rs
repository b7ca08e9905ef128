/// Interaction state of one region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RegionState {
    #[default]
    Idle,
    Hovered,
    Selected,
}

/// Per-region interaction states with at most one `Selected` entry.
///
/// States are indexed by feature index; out-of-range indices are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionStates {
    states: Vec<RegionState>,
    selected: Option<usize>,
}

impl RegionStates {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![RegionState::Idle; len],
            selected: None,
        }
    }

    /// Resets to `len` idle regions.
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> RegionState {
        self.states.get(index).copied().unwrap_or_default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, RegionState)> + '_ {
        self.states.iter().copied().enumerate()
    }

    /// Idle → Hovered. Returns `true` if the state changed.
    pub fn hover(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(s @ RegionState::Idle) => {
                *s = RegionState::Hovered;
                true
            }
            _ => false,
        }
    }

    /// Hovered → Idle. A selected region stays selected.
    pub fn unhover(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(s @ RegionState::Hovered) => {
                *s = RegionState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Selects `index`; every other region returns to idle.
    ///
    /// Returns `false` for an unknown index, leaving states untouched.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.states.len() {
            return false;
        }
        self.states.fill(RegionState::Idle);
        self.states[index] = RegionState::Selected;
        self.selected = Some(index);
        true
    }

    /// Every region back to idle. Returns the previously selected index.
    pub fn clear(&mut self) -> Option<usize> {
        self.states.fill(RegionState::Idle);
        self.selected.take()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PointState {
    #[default]
    Idle,
    Hovered,
}

/// Per-point hover states, independent of region states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointStates {
    states: Vec<PointState>,
}

impl PointStates {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![PointState::Idle; len],
        }
    }

    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> PointState {
        self.states.get(index).copied().unwrap_or_default()
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.state(index) == PointState::Hovered
    }

    /// Indices of hovered points in ascending order.
    pub fn hovered(&self) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == PointState::Hovered)
            .map(|(i, _)| i)
    }

    pub fn hover(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(s @ PointState::Idle) => {
                *s = PointState::Hovered;
                true
            }
            _ => false,
        }
    }

    pub fn unhover(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(s @ PointState::Hovered) => {
                *s = PointState::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PointState, PointStates, RegionState, RegionStates};

    #[test]
    fn hover_does_not_touch_selected() {
        let mut r = RegionStates::new(3);
        assert!(r.hover(0));
        assert!(!r.hover(0));
        assert!(r.select(1));
        assert_eq!(r.state(0), RegionState::Idle);
        assert!(!r.hover(1));
        assert!(!r.unhover(1));
        assert_eq!(r.state(1), RegionState::Selected);
    }

    #[test]
    fn at_most_one_selected() {
        let mut r = RegionStates::new(3);
        r.select(0);
        r.hover(2);
        r.select(1);
        let selected: Vec<_> = r
            .iter()
            .filter(|(_, s)| *s == RegionState::Selected)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, vec![1]);
        assert_eq!(r.state(2), RegionState::Idle);
        assert_eq!(r.selected(), Some(1));
    }

    #[test]
    fn clear_and_unknown_indices() {
        let mut r = RegionStates::new(2);
        assert!(!r.select(5));
        assert_eq!(r.selected(), None);
        r.select(0);
        assert_eq!(r.clear(), Some(0));
        assert!(r.iter().all(|(_, s)| s == RegionState::Idle));
        assert_eq!(r.state(9), RegionState::Idle);
    }

    #[test]
    fn point_hover_round_trip() {
        let mut p = PointStates::new(3);
        assert!(p.hover(2));
        assert!(p.hover(0));
        assert_eq!(p.hovered().collect::<Vec<_>>(), vec![0, 2]);
        assert!(p.unhover(2));
        assert_eq!(p.state(2), PointState::Idle);
        assert!(!p.hover(7));
        p.reset(1);
        assert!(p.hovered().next().is_none());
    }
}
