mod weighting;
mod summary;

pub use weighting::{
    difficulty_multiplier, FixtureWeights, RoundMultipliers, MIN_MULTIPLIER, NEUTRAL_MULTIPLIER,
};
pub use summary::{
    summarize_fixtures, ClubFixtures, FixtureDescriptor, FixtureSummary, Outlook, Venue,
};
