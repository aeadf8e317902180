use squadopt_fixtures::{difficulty_multiplier, summarize_fixtures, FixtureWeights, Outlook};
use squadopt_sim::{PoolConfig, PoolGenerator};
use squadopt_squad::{build_projection, select_squad, ProjectionSource, SelectionParams};
use squadopt_types::{validate_players, FixtureTable, RoundWindow};

#[test]
fn test_projection_applies_fixture_multipliers() {
    let config = PoolConfig {
        clubs: 6,
        ..PoolConfig::default()
    };
    let generator = PoolGenerator::with_seed(9);
    let window = RoundWindow::default();
    let fixtures = generator.generate_fixtures(config.clubs, window);
    let players = validate_players(&generator.generate_players(&config)).unwrap();

    let weighted = build_projection(players.clone(), Some(&fixtures), window, None).unwrap();
    let neutral = build_projection(players, None, window, None).unwrap();
    let weights = FixtureWeights::new(Some(&fixtures), window);

    assert_eq!(weighted.source, ProjectionSource::Columns);
    for (w, n) in weighted.players.iter().zip(neutral.players.iter()) {
        for (i, round) in window.rounds().enumerate() {
            let expected = n.round_points[i] * weights.multiplier(w.player.club, round);
            assert!((w.round_points[i] - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn test_fixtures_change_the_optimum() {
    let config = PoolConfig {
        clubs: 8,
        ..PoolConfig::default()
    };
    let generator = PoolGenerator::with_seed(4);
    let records = generator.generate_players(&config);
    let fixtures = generator.generate_fixtures(config.clubs, RoundWindow::default());

    let with = select_squad(&records, Some(&fixtures), &SelectionParams::default()).unwrap();
    let without = select_squad(&records, None, &SelectionParams::default()).unwrap();
    let empty = select_squad(&records, Some(&FixtureTable::empty()), &SelectionParams::default())
        .unwrap();

    assert!((with.total_points - without.total_points).abs() > 1e-6);
    // An empty table behaves exactly like no table
    assert_eq!(without.ids(), empty.ids());
    assert!((without.total_points - empty.total_points).abs() < 1e-9);
}

#[test]
fn test_summary_matches_generated_schedule() {
    let generator = PoolGenerator::with_seed(1);
    let window = RoundWindow::new(1, 3).unwrap();
    let fixtures = generator.generate_fixtures(6, window);
    let summary = summarize_fixtures(1..=6, Some(&fixtures), window);

    assert_eq!(summary.rounds, vec![1, 2, 3]);
    for (club, info) in &summary.clubs {
        assert_eq!(info.fixtures.len(), 3);
        assert!(info.fixtures.iter().all(|f| !f.is_placeholder()));
        assert!(info.fixtures.iter().all(|f| f.opponent != Some(*club)));

        let mean = info.total_difficulty as f64 / 3.0;
        assert!((info.avg_difficulty - mean).abs() < 1e-12);
        let expected = if mean < 2.5 {
            Outlook::Favourable
        } else if mean > 3.5 {
            Outlook::Tough
        } else {
            Outlook::Neutral
        };
        assert_eq!(info.outlook(), expected);
    }

    let ranked = summary.easiest(6);
    assert!(ranked
        .windows(2)
        .all(|w| w[0].1.avg_difficulty <= w[1].1.avg_difficulty));
}

#[test]
fn test_multiplier_table() {
    let table: Vec<f64> = (1..=5).map(difficulty_multiplier).collect();
    assert_eq!(table, vec![1.4, 1.2, 1.0, 0.8, 0.6]);
}
