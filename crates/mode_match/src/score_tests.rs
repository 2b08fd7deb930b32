use super::*;

#[test]
fn test_record_and_score() {
    let mut result = MatchResult::new();
    result.record(Some(GameResult::Win));
    result.record(Some(GameResult::Draw));
    result.record(Some(GameResult::Loss));
    result.record(Some(GameResult::Loss));
    result.record(None);

    assert_eq!(result.total_games(), 4);
    assert_eq!(result.aborted, 1);
    assert!((result.score() - 0.375).abs() < 1e-9);
}

#[test]
fn test_empty_match_is_even() {
    let result = MatchResult::new();
    assert!((result.score() - 0.5).abs() < 1e-9);
    assert_eq!(result.elo_difference(), Some(0.0));
}

#[test]
fn test_elo_difference() {
    // 3 of 4 points is roughly +191
    let result = MatchResult {
        wins: 3,
        losses: 1,
        draws: 0,
        aborted: 0,
    };
    let diff = result.elo_difference().unwrap();
    assert!((diff - 190.85).abs() < 0.1);

    let sweep = MatchResult {
        losses: 5,
        ..Default::default()
    };
    assert_eq!(sweep.elo_difference(), None);
}
