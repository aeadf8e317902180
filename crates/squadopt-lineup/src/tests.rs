// Tests for starting eleven selection

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;
    use squadopt_squad::{select_squad, SelectionParams, SquadResult};
    use squadopt_types::{PlayerRecord, Position, SquadOptError};
    use std::collections::BTreeSet;

    /// Exactly 15 players, so every selection returns all of them.
    /// Points per round: GK 5,3 | DEF 6,5,4,3,2 | MID 9,8,7,6,5 | FWD 10,4,1
    fn squad_with(points: [f64; 15]) -> SquadResult {
        let layout = [1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4];
        let pool: Vec<PlayerRecord> = layout
            .iter()
            .zip(points.iter())
            .enumerate()
            .map(|(i, (&et, &ep))| {
                (1..=4).fold(
                    PlayerRecord::new(i as u64 + 1, et, (i as u32 % 5) + 1, 40),
                    |r, gw| r.with_column(&format!("ep_gw{}", gw), ep),
                )
            })
            .collect();
        select_squad(&pool, None, &SelectionParams::default()).unwrap()
    }

    fn squad() -> SquadResult {
        squad_with([
            5.0, 3.0, 6.0, 5.0, 4.0, 3.0, 2.0, 9.0, 8.0, 7.0, 6.0, 5.0, 10.0, 4.0, 1.0,
        ])
    }

    #[test]
    fn test_formation_order_and_labels() {
        let labels: Vec<String> = Formation::ALLOWED.iter().map(|f| f.label()).collect();
        assert_eq!(
            labels,
            vec!["3-4-3", "3-5-2", "4-3-3", "4-4-2", "4-5-1", "5-2-3", "5-3-2", "5-4-1"]
        );
        for formation in Formation::ALLOWED {
            let outfield = formation.defenders + formation.midfielders + formation.forwards;
            assert_eq!(outfield + formation.slots(Position::Goalkeeper), 11);
        }
        assert!(!Formation::new(2, 5, 3).is_allowed());
    }

    #[test]
    fn test_best_formation() {
        let lineup = select_lineup(&squad(), &LineupParams::default()).unwrap();

        assert_eq!(lineup.formation_label, "3-5-2");
        assert_eq!(lineup.starter_ids(), vec![1, 3, 4, 5, 8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(lineup.bench_ids(), vec![2, 6, 7, 15]);
        assert_eq!(lineup.captain, 13);
        assert_eq!(lineup.vice_captain, 8);
        assert!((lineup.expected_points - 79.0).abs() < 1e-9);
        assert_eq!(lineup.breakdown.get(&Position::Goalkeeper), Some(&1));
        assert_eq!(lineup.breakdown.get(&Position::Midfielder), Some(&5));
    }

    #[test]
    fn test_lineup_partitions_squad() {
        let squad = squad();
        let lineup = select_lineup(&squad, &LineupParams::for_round(2)).unwrap();

        let starters: BTreeSet<u64> = lineup.starter_ids().into_iter().collect();
        let bench: BTreeSet<u64> = lineup.bench_ids().into_iter().collect();
        let all: BTreeSet<u64> = squad.ids().into_iter().collect();

        assert_eq!(starters.len(), 11);
        assert_eq!(bench.len(), 4);
        assert!(starters.is_disjoint(&bench));
        assert_eq!(starters.union(&bench).copied().collect::<BTreeSet<_>>(), all);
        assert_eq!(
            lineup
                .starters
                .iter()
                .filter(|p| p.position == Position::Goalkeeper)
                .count(),
            1
        );
        assert_ne!(lineup.captain, lineup.vice_captain);
        assert!(lineup.formation.is_allowed());
    }

    #[test]
    fn test_captain_weight() {
        let params = LineupParams {
            captain_weight: 3.0,
            vice_weight: 1.5,
            ..LineupParams::default()
        };
        let lineup = select_lineup(&squad(), &params).unwrap();
        // 69 + 10 * 2 + 9 * 0.5
        assert!((lineup.expected_points - 93.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_sums_weighted_starters_in_order() {
        let squad = squad_with([
            0.7, 0.3, 1.1, 0.9, 0.6, 0.2, 0.1, 2.3, 1.7, 1.3, 0.4, 0.8, 3.1, 0.5, 0.3,
        ]);
        let params = LineupParams {
            captain_weight: 2.7,
            vice_weight: 1.3,
            ..LineupParams::default()
        };
        let lineup = select_lineup(&squad, &params).unwrap();

        let mut expected = 0.0;
        for p in &lineup.starters {
            expected += if p.id == lineup.captain {
                p.points * params.captain_weight
            } else if p.id == lineup.vice_captain {
                p.points * params.vice_weight
            } else {
                p.points
            };
        }
        assert_eq!(lineup.expected_points, expected);
        assert_eq!(lineup.captain, 13);
        assert_eq!(lineup.vice_captain, 8);
    }

    #[test]
    fn test_ties_prefer_earliest_formation_and_lowest_id() {
        let lineup = select_lineup(&squad_with([2.0; 15]), &LineupParams::default()).unwrap();

        assert_eq!(lineup.formation_label, "3-4-3");
        assert_eq!(lineup.captain, 1);
        assert_eq!(lineup.vice_captain, 3);
        assert_eq!(lineup.starter_ids(), vec![1, 3, 4, 5, 8, 9, 10, 11, 13, 14, 15]);
    }

    #[test]
    fn test_round_outside_window_uses_average() {
        let squad = squad();
        let inside = select_lineup(&squad, &LineupParams::for_round(4)).unwrap();
        let outside = select_lineup(&squad, &LineupParams::for_round(9)).unwrap();

        assert_eq!(outside.round, 9);
        assert_eq!(outside.formation_label, inside.formation_label);
        let forward = squad.player(13).unwrap();
        assert!((round_points(&squad, forward, 9) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_round() {
        let err = select_lineup(&squad(), &LineupParams::for_round(0)).unwrap_err();
        assert!(matches!(err, SquadOptError::Range(_)));
    }

    #[test]
    fn test_no_goalkeeper_is_config_error() {
        let mut squad = squad();
        squad.players.retain(|p| p.position != Position::Goalkeeper);

        let err = select_lineup(&squad, &LineupParams::default()).unwrap_err();
        assert!(matches!(err, SquadOptError::Config(_)));
    }

    #[test]
    fn test_lineup_serializes() {
        let lineup = select_lineup(&squad(), &LineupParams::default()).unwrap();
        let json = serde_json::to_value(&lineup).unwrap();
        assert_eq!(json["formation_label"], "3-5-2");
        assert_eq!(json["breakdown"]["DEF"], 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_lineup_is_legal(points in prop::array::uniform15(0.0f64..12.0), round in 1u32..=6) {
            let squad = squad_with(points);
            let lineup = select_lineup(&squad, &LineupParams::for_round(round)).unwrap();

            prop_assert!(lineup.formation.is_allowed());
            prop_assert_eq!(lineup.starters.len(), 11);
            prop_assert_eq!(lineup.bench.len(), 4);
            prop_assert_ne!(lineup.captain, lineup.vice_captain);

            let captain = lineup.starters.iter().find(|p| p.id == lineup.captain).unwrap();
            prop_assert!(lineup.starters.iter().all(|p| p.points <= captain.points));
        }
    }
}
