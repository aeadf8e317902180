use serde::{Deserialize, Serialize};
use squadopt_types::{ClubId, Fixture, FixtureTable, PlayerRecord, Position, RoundWindow};

/// Shape of a synthetic player pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub clubs: u32,
    /// Players per club in GK, DEF, MID, FWD order
    pub per_club: [usize; 4],
    /// Cost band (min, max) in tenths per position, same order
    pub cost_bands: [(i64, i64); 4],
    /// Write `ep_gw{r}` columns for these rounds; `None` leaves only season totals
    pub ep_rounds: Option<RoundWindow>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            clubs: 20,
            per_club: [2, 6, 6, 4],
            cost_bands: [(40, 60), (40, 75), (45, 130), (45, 140)],
            ep_rounds: Some(RoundWindow::default()),
        }
    }
}

impl PoolConfig {
    pub fn pool_size(&self) -> usize {
        self.clubs as usize * self.per_club.iter().sum::<usize>()
    }
}

/// Deterministic generator for player pools and fixture lists
pub struct PoolGenerator {
    seed: u64,
}

impl PoolGenerator {
    pub fn new() -> Self {
        PoolGenerator { seed: 42 }
    }

    pub fn with_seed(seed: u64) -> Self {
        PoolGenerator { seed }
    }

    /// Club strength in [0, 1), fixed per seed
    pub fn club_strength(&self, clubs: u32) -> Vec<f64> {
        let mut rng = SimpleRng::new(self.seed ^ 0x5157_7e46);
        (0..clubs).map(|_| rng.next_f64()).collect()
    }

    /// Players for every club; ids run from 1 in club order
    pub fn generate_players(&self, config: &PoolConfig) -> Vec<PlayerRecord> {
        let strength = self.club_strength(config.clubs);
        let mut rng = SimpleRng::new(self.seed);
        let mut players = Vec::with_capacity(config.pool_size());
        let mut id = 0;

        for club in 1..=config.clubs {
            let club_strength = strength[(club - 1) as usize];
            for (&position, (&count, &(lo, hi))) in Position::all()
                .iter()
                .zip(config.per_club.iter().zip(config.cost_bands.iter()))
            {
                for n in 0..count {
                    id += 1;
                    let span = (hi - lo).max(0) as f64;
                    let cost = lo + (rng.next_f64() * span).round() as i64;

                    // Pricier players and stronger clubs score more per round
                    let quality = (cost - lo) as f64 / span.max(1.0);
                    let per_round = 1.0 + 4.0 * quality * (0.6 + 0.4 * club_strength)
                        + rng.next_f64();

                    let mut record = PlayerRecord::new(id, position.code(), club, cost)
                        .with_total_points((per_round * 38.0 * 0.9).round())
                        .with_name(position.as_str(), &format!("{}-{}", club, n + 1));

                    if let Some(window) = config.ep_rounds {
                        for round in window.rounds() {
                            let ep = per_round * (0.75 + 0.5 * rng.next_f64());
                            record = record
                                .with_column(&format!("ep_gw{}", round), (ep * 10.0).round() / 10.0);
                        }
                    }
                    players.push(record);
                }
            }
        }
        players
    }

    /// Double round-robin by the circle method, cut to the window.
    ///
    /// Difficulty for a side is 1..=5 from the opponent's strength.
    pub fn generate_fixtures(&self, clubs: u32, window: RoundWindow) -> FixtureTable {
        let strength = self.club_strength(clubs);
        let difficulty = |opponent: ClubId| -> i32 {
            let s = strength.get((opponent - 1) as usize).copied().unwrap_or(0.5);
            1 + (s * 5.0).floor().min(4.0) as i32
        };

        // Odd club counts get a bye slot (0)
        let mut slots: Vec<ClubId> = (1..=clubs).collect();
        if slots.len() % 2 == 1 {
            slots.push(0);
        }
        let n = slots.len();
        if n < 2 {
            return FixtureTable::empty();
        }
        let cycle = (n - 1) as u32;

        let mut fixtures = Vec::new();
        for round in window.rounds() {
            let turn = ((round - 1) % cycle) as usize;
            let second_half = ((round - 1) / cycle) % 2 == 1;

            // Rotate every slot except the first
            let mut order = vec![slots[0]];
            order.extend((0..n - 1).map(|i| slots[1 + (i + n - 1 - turn) % (n - 1)]));

            for i in 0..n / 2 {
                let (mut home, mut away) = (order[i], order[n - 1 - i]);
                if (turn + i) % 2 == 1 {
                    std::mem::swap(&mut home, &mut away);
                }
                if second_half {
                    std::mem::swap(&mut home, &mut away);
                }
                if home == 0 || away == 0 {
                    continue;
                }
                fixtures.push(Fixture::new(round, home, away, difficulty(away), difficulty(home)));
            }
        }
        FixtureTable::new(fixtures)
    }
}

impl Default for PoolGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear congruential generator, reproducible across platforms
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}
