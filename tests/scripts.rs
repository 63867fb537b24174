use std::{fs, path::Path};

use wingcalc::Engine;
use walkdir::WalkDir;

/// Every `.wc` file under `tests/scripts` runs in one session, line by line.
///
/// A line reads `expression => expected`, where the expectation is a number,
/// `nan`, `inf`, `-inf` or `error`. Lines starting with a backtick are
/// comments.
#[test]
fn script_corpus_passes() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "wc"))
    {
        count += run_script(entry.path());
    }

    assert!(count > 0, "No script lines found in tests/scripts");
}

fn run_script(path: &Path) -> usize {
    let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
    let engine = Engine::new();
    let mut count = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('`') {
            continue;
        }

        let (source, expected) =
            line.rsplit_once("=>")
                .unwrap_or_else(|| panic!("{path:?}:{} has no expectation: {line}", i + 1));
        let (source, expected) = (source.trim(), expected.trim());
        let result = engine.solve(source);

        let passed = match (expected, &result) {
            ("error", Err(_)) => true,
            ("nan", Ok(value)) => value.is_nan(),
            ("inf", Ok(value)) => *value == f64::INFINITY,
            ("-inf", Ok(value)) => *value == f64::NEG_INFINITY,
            (number, Ok(value)) => number.parse::<f64>()
                                         .is_ok_and(|number| (number - value).abs() <= 1e-9 * number.abs().max(1.0)),
            _ => false,
        };

        assert!(passed,
                "{path:?}:{}: {source}\nexpected {expected}, got {result:?}",
                i + 1);
        count += 1;
    }

    count
}
