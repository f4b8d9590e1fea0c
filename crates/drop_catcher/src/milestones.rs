use std::collections::BTreeMap;

/// Score thresholds and the celebration shown when the score lands exactly on one.
///
/// The score only grows during a round and restarts from zero, so each threshold fires at most
/// once per round without extra bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Milestones(BTreeMap<u32, &'static str>);

impl Milestones {
    pub fn new(milestones: impl IntoIterator<Item = (u32, &'static str)>) -> Self {
        Self(milestones.into_iter().collect())
    }

    pub fn celebration_for(&self, score: u32) -> Option<&'static str> {
        self.0.get(&score).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.0.iter().map(|(score, message)| (*score, *message))
    }
}

impl Default for Milestones {
    fn default() -> Self {
        Self::new([
            (10, "Great job!"),
            (25, "Awesome! You're helping bring clean water!"),
            (50, "Incredible! You're making a big impact!"),
            (100, "Legend! You are the King of Water!"),
        ])
    }
}
