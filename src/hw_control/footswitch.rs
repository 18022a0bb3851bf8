/// Tracks one momentary switch across poll ticks.
///
/// A press fires on release: the tick where the previous level was HIGH and
/// the current one is LOW.  Holding the switch fires nothing until it is let go.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeTracker {
    previous: bool,
    current: bool,
}

impl EdgeTracker {
    pub fn new() -> EdgeTracker {
        EdgeTracker::default()
    }
    /// Take this tick's level, returns true on a falling edge
    pub fn update(&mut self, level: bool) -> bool {
        self.previous = self.current;
        self.current = level;
        self.previous && !self.current
    }
    pub fn level(&self) -> bool {
        self.current
    }
}

#[cfg(test)]
mod test_footswitch {
    use super::*;

    #[test]
    fn fires_on_release() {
        let mut switch = EdgeTracker::new();
        let levels = [false, true, true, false, false, true, false];
        let edges: Vec<bool> = levels.iter().map(|l| switch.update(*l)).collect();
        assert_eq!(edges, vec![false, false, false, true, false, false, true]);
        assert!(!switch.level());
    }

    #[test]
    fn idle_low_never_fires() {
        let mut switch = EdgeTracker::new();
        for _ in 0..10 {
            assert!(!switch.update(false));
        }
    }
}
