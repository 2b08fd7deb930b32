use super::*;
use client_core::Mode;

fn ply(mode: Mode, action: &str, confidence: f64) -> Ply {
    Ply {
        mode,
        action: action.to_string(),
        confidence: Some(confidence),
    }
}

fn sample() -> ModeMatchResults {
    let games = vec![
        GameRecord {
            easy_color: PlayerColor::White,
            plies: vec![
                ply(Mode::Easy, "f2f3", 0.2),
                ply(Mode::Hard, "e7e5", -0.8),
                ply(Mode::Easy, "g2g4", 0.1),
                ply(Mode::Hard, "d8h4", -0.9),
            ],
            end: GameEnd::Checkmate { winner: Mode::Hard },
        },
        GameRecord {
            easy_color: PlayerColor::Black,
            plies: vec![ply(Mode::Hard, "e2e4", -0.6)],
            end: GameEnd::RequestFailed {
                error: "request timed out".to_string(),
            },
        },
        GameRecord {
            easy_color: PlayerColor::White,
            plies: Vec::new(),
            end: GameEnd::PlyCap,
        },
    ];
    ModeMatchResults::new("http://127.0.0.1:5000", MatchConfig::default(), games)
}

#[test]
fn test_summary_counts() {
    let results = sample();
    assert_eq!(results.summary.losses, 1);
    assert_eq!(results.summary.draws, 1);
    assert_eq!(results.summary.aborted, 1);
    assert_eq!(results.summary.wins, 0);
}

#[test]
fn test_plies_grouped_by_easy_color() {
    let results = sample();
    assert_eq!(results.plies_with_easy_as(PlayerColor::White).len(), 2);

    let black = results.plies_with_easy_as(PlayerColor::Black);
    assert_eq!(black.len(), 1);
    assert_eq!(black[0][0].action, "e2e4");
}

#[test]
fn test_report_lines() {
    let report = sample().generate_report();
    assert!(report.contains("Server: http://127.0.0.1:5000"));
    assert!(report.contains("hard mates"));
    assert!(report.contains("request failed: request timed out"));
    assert!(report.contains("Easy: 0 wins, 1 losses, 1 draws, 1 aborted"));
    assert!(report.contains("Score: 25.0%"));
}

#[test]
fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("mode_match_{}.json", std::process::id()));
    let results = sample();

    results.save(&path).unwrap();
    let loaded = ModeMatchResults::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, results);
}

#[test]
fn test_load_missing_file() {
    let err = ModeMatchResults::load(Path::new("/nonexistent/mode_match.json")).unwrap_err();
    assert!(matches!(err, ResultsError::Read { .. }));
}
