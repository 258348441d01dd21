use std::fs;
use std::time::Duration;

use wordtree::export::{export_to_file, Format};
use wordtree::{Analyzer, AnalyzerConfig, Rotation};

const PASSAGE: &str = "It was the best of times, it was the worst of times, it was the age \
of wisdom, it was the age of foolishness, it was the epoch of belief, it was the \
epoch of incredulity, it was the season of Light, it was the season of Darkness.";

#[test]
fn test_end_to_end_analysis() {
    let analyzer = Analyzer::new(AnalyzerConfig::new()).expect("valid config");
    let analysis = analyzer.analyze(PASSAGE);

    assert_eq!(analysis.stats.total_words, 48);
    assert_eq!(analysis.stats.trees_generated, 3);
    assert_eq!(analysis.reports.len(), 3);

    let inserted: usize = analysis.reports.iter().map(|r| r.words_inserted).sum();
    assert_eq!(inserted, analysis.stats.total_words);

    for report in &analysis.reports {
        assert!(report.distinct_keys <= report.words_inserted);
        assert!(report.height as f64 <= 1.44 * ((report.distinct_keys + 2) as f64).log2());
    }
}

#[test]
fn test_every_chunk_tree_is_valid() {
    let config = AnalyzerConfig::new().with_chunk_size(7);
    let analyzer = Analyzer::new(config).expect("valid config");
    let words = wordtree::text::tokenize(PASSAGE);

    for mut playback in analyzer.playbacks(&words) {
        assert!(playback.len() <= 7);
        while let Some(frame) = playback.tick() {
            playback.tree().validate().expect("invariants hold after each step");
            let snapshot = frame.snapshot.expect("tree is non-empty after an insert");
            assert_eq!(snapshot.node_count(), playback.tree().len());
            if frame.trace.rotated() {
                assert_eq!(frame.trace.touched.len(), 2);
            }
        }
        assert!(playback.is_finished());
    }
}

#[test]
fn test_rotation_tally_matches_frames() {
    let analyzer = Analyzer::new(AnalyzerConfig::new()).expect("valid config");
    let words = wordtree::text::tokenize(PASSAGE);
    let mut playback = analyzer.playback(&words, 1).expect("first tree");

    let frames = playback.run_to_end();
    let report = playback.report();
    for rotation in Rotation::CASES {
        let seen = frames.iter().filter(|f| f.trace.rotation == rotation).count();
        assert_eq!(report.rotations.get(rotation), seen, "{} count", rotation);
    }
}

#[test]
fn test_playback_interval_comes_from_config() {
    let analyzer = Analyzer::new(AnalyzerConfig::new().with_interval_ms(1200)).expect("valid config");
    let words = wordtree::text::tokenize("alpha beta");
    let playback = analyzer.playback(&words, 1).expect("first tree");
    assert_eq!(playback.interval(), Duration::from_millis(1200));
}

#[test]
fn test_export_csv_to_file() {
    let analyzer = Analyzer::new(AnalyzerConfig::new()).expect("valid config");
    let analysis = analyzer.analyze(PASSAGE);

    let path = std::env::temp_dir().join(format!("wordtree-stats-{}.csv", std::process::id()));
    export_to_file(&path, &analysis.stats, Format::Csv).expect("export succeeds");

    let written = fs::read_to_string(&path).expect("read export");
    let _ = fs::remove_file(&path);

    let first = written.lines().next().expect("at least one line");
    assert_eq!(first, format!("total_words,{}", analysis.stats.total_words));
    assert_eq!(written.lines().count(), 3);
}

#[cfg(feature = "visualize")]
#[test]
fn test_frame_serializes_for_renderers() {
    let analyzer = Analyzer::new(AnalyzerConfig::new()).expect("valid config");
    let mut playback = analyzer
        .playback_from_keys(["c", "b", "a"])
        .expect("valid keys");
    let frame = playback.run_to_end().pop().expect("three frames");

    let value = serde_json::to_value(&frame).expect("frame serializes");
    assert_eq!(value["step"], 3);
    assert_eq!(value["trace"]["rotation"], "LL");
    assert_eq!(value["trace"]["touched"], serde_json::json!(["c", "b"]));
    assert_eq!(value["trace"]["outcome"]["kind"], "inserted");
    assert_eq!(value["snapshot"]["key"], "b");
    assert_eq!(value["snapshot"]["children"][0]["side"], "left");
}
