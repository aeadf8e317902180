use squadopt_types::{Cost, PlayerId, Position, Result, RoundWindow, SquadOptError};
use std::collections::BTreeMap;

use crate::params::ExtraConstraints;
use crate::projection::ProjectedPlayer;

/// Everything a squad solver needs: projected pool, budget and extra
/// constraints
#[derive(Debug, Clone)]
pub struct SquadInstance {
    pub pool: Vec<ProjectedPlayer>,
    pub window: RoundWindow,
    pub budget: Cost,
    pub constraints: ExtraConstraints,
    index: BTreeMap<PlayerId, usize>,
}

impl SquadInstance {
    pub fn new(
        pool: Vec<ProjectedPlayer>,
        window: RoundWindow,
        budget: Cost,
        constraints: ExtraConstraints,
    ) -> Self {
        let index = pool
            .iter()
            .enumerate()
            .map(|(i, p)| (p.player.id, i))
            .collect();
        SquadInstance {
            pool,
            window,
            budget,
            constraints,
            index,
        }
    }

    pub fn position_of(&self, id: PlayerId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: PlayerId) -> Option<&ProjectedPlayer> {
        self.position_of(id).map(|i| &self.pool[i])
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Candidates for a position, excluded players left out
    pub fn candidates(&self, position: Position) -> impl Iterator<Item = &ProjectedPlayer> {
        self.pool.iter().filter(move |p| {
            p.player.position == position && !self.constraints.is_excluded(p.player.id)
        })
    }

    /// Fail fast when a position cannot reach its quota at any price
    pub fn check_supply(&self) -> Result<()> {
        for &position in Position::all() {
            let available = self.candidates(position).count();
            if available < position.squad_quota() {
                return Err(SquadOptError::Infeasible(format!(
                    "Not enough {} candidates: need {}, have {}",
                    position,
                    position.squad_quota(),
                    available
                )));
            }
        }
        Ok(())
    }
}
