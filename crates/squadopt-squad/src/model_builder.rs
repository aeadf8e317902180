use nalgebra::DVector;
use squadopt_solver::{IpConstraint, IpModel, VarMeta};
use squadopt_types::{ClubId, Position, Result, MAX_PER_CLUB, SQUAD_SIZE};
use std::collections::BTreeMap;

use crate::instance::SquadInstance;

/// Builder for the squad selection binary program
pub struct ModelBuilder;

impl ModelBuilder {
    /// One binary per player; maximize window points subject to squad size,
    /// position quotas, budget and the per-club cap. Included and excluded
    /// players become fixed variables.
    pub fn build(inst: &SquadInstance) -> Result<IpModel> {
        let n = inst.len();
        let objective = DVector::from_iterator(n, inst.pool.iter().map(|p| p.window_points));
        let metas = inst
            .pool
            .iter()
            .map(|p| VarMeta::Player(p.player.id))
            .collect();
        let mut model = IpModel::new(objective, metas);

        // Squad size
        let all: BTreeMap<usize, f64> = (0..n).map(|i| (i, 1.0)).collect();
        model.add_constraint(IpConstraint::eq(all, SQUAD_SIZE as f64));

        // Position quotas
        for &position in Position::all() {
            let row: BTreeMap<usize, f64> = inst
                .pool
                .iter()
                .enumerate()
                .filter(|(_, p)| p.player.position == position)
                .map(|(i, _)| (i, 1.0))
                .collect();
            model.add_constraint(IpConstraint::eq(row, position.squad_quota() as f64));
        }

        // Budget in tenths
        let costs: BTreeMap<usize, f64> = inst
            .pool
            .iter()
            .enumerate()
            .filter(|(_, p)| p.player.cost.tenths() != 0)
            .map(|(i, p)| (i, p.player.cost.tenths() as f64))
            .collect();
        model.add_constraint(IpConstraint::at_most(costs, inst.budget.tenths() as f64));

        // Club cap, only where it can bind
        let mut clubs: BTreeMap<ClubId, BTreeMap<usize, f64>> = BTreeMap::new();
        for (i, p) in inst.pool.iter().enumerate() {
            clubs.entry(p.player.club).or_default().insert(i, 1.0);
        }
        for (_, row) in clubs {
            if row.len() > MAX_PER_CLUB {
                model.add_constraint(IpConstraint::at_most(row, MAX_PER_CLUB as f64));
            }
        }

        for id in &inst.constraints.include {
            if let Some(i) = inst.position_of(*id) {
                model.fix(i, true);
            }
        }
        for id in &inst.constraints.exclude {
            if let Some(i) = inst.position_of(*id) {
                model.fix(i, false);
            }
        }

        model.validate()?;
        Ok(model)
    }
}
