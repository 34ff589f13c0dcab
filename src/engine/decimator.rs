/// Keeps one tick out of every `frames_to_skip + 1`, starting with the first
#[derive(Debug, Clone, Default)]
pub struct Decimator {
    frames_to_skip: u32,
    skipped: u32,
}

impl Decimator {
    pub fn new(frames_to_skip: u32) -> Self {
        Self {
            frames_to_skip,
            skipped: 0,
        }
    }

    /// Advance one tick; true when this tick's frame should be emitted
    pub fn tick(&mut self) -> bool {
        if self.skipped == self.frames_to_skip {
            self.skipped = 0;
            true
        } else {
            self.skipped += 1;
            false
        }
    }

    pub fn frames_to_skip(&self) -> u32 {
        self.frames_to_skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_decimation_emits_everything() {
        let mut d = Decimator::new(0);
        assert!((0..10).all(|_| d.tick()));
    }

    #[test]
    fn test_skip_two_pattern() {
        let mut d = Decimator::new(2);
        assert_eq!(d.frames_to_skip(), 2);
        let pattern: Vec<bool> = (0..7).map(|_| d.tick()).collect();
        assert_eq!(pattern, vec![true, false, false, true, false, false, true]);
    }
}
