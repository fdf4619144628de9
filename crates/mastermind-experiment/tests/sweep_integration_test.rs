//! End-to-end sweeps through the public API.
//!
//! Tests the full flow of:
//! - SweepConfig -> SweepRunner -> ResultTable
//! - Console reporting alongside the sweep
//! - Persisting the table and charting one code length

use std::thread;
use std::time::Duration;

use rand::RngCore;

use mastermind_experiment::experiment::{Silent, SweepRunner};
use mastermind_experiment::plot::render_charts;
use mastermind_experiment::registry::StrategyRegistry;
use mastermind_experiment::report::ConsoleReporter;
use mastermind_experiment::results::ResultTable;
use mastermind_kernel::{Configuration, Oracle, Strategy, StrategyError, SweepConfig};

/// Takes about 10ms and always claims five guesses.
struct SlowFive;

impl Strategy for SlowFive {
    fn name(&self) -> &str {
        "slow-five"
    }

    fn solve(&self, _oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
        thread::sleep(Duration::from_millis(10));
        Ok(5)
    }
}

fn small_config(alphabet_sizes: Vec<usize>, code_lengths: Vec<usize>, trials: usize) -> SweepConfig {
    SweepConfig {
        alphabet_sizes,
        code_lengths,
        trials,
        seed: Some(42),
        ..SweepConfig::default()
    }
}

#[test]
fn test_single_configuration_stub_sweep() {
    let mut registry = StrategyRegistry::new();
    registry.register(Box::new(SlowFive)).unwrap();

    let mut runner = SweepRunner::new(small_config(vec![4], vec![4], 3), registry).unwrap();
    let mut table = ResultTable::new();
    runner.run(&mut table, &mut Silent).unwrap();

    assert_eq!(table.len(), 1);
    let stats = table.get("slow-five").unwrap();
    assert_eq!(stats.len(), 1);

    let stat = &stats[0];
    assert_eq!(stat.configuration, Configuration::new(4, 4).unwrap());
    assert_eq!(stat.mean_guesses, 5.0);
    assert_eq!(stat.std_guesses, 0.0);
    assert!(stat.mean_runtime >= 0.01, "runtime {}", stat.mean_runtime);
    assert!(stat.mean_runtime < 0.5, "runtime {}", stat.mean_runtime);
    assert!(stat.std_runtime < 0.1, "runtime spread {}", stat.std_runtime);
}

#[test]
fn test_standard_lineup_small_sweep() {
    let mut runner =
        SweepRunner::new(small_config(vec![3, 4], vec![3], 2), StrategyRegistry::standard()).unwrap();
    let mut table = ResultTable::new();
    let mut reporter = ConsoleReporter::new(Vec::new(), true);
    runner.run(&mut table, &mut reporter).unwrap();

    let names: Vec<&str> = table.strategies().collect();
    assert_eq!(names, StrategyRegistry::standard().names());
    for entry in table.entries() {
        let alphabets: Vec<usize> = entry
            .stats
            .iter()
            .map(|s| s.configuration.alphabet_size())
            .collect();
        assert_eq!(alphabets, vec![3, 4], "{}", entry.strategy);
        for stat in &entry.stats {
            assert!(stat.mean_guesses >= 1.0);
            assert!(stat.mean_guesses <= 30.0);
            assert!(stat.std_guesses >= 0.0);
            assert!(stat.mean_runtime >= 0.0);
        }
    }

    let console = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(console.contains("alphabet size: 3, code length: 3"));
    assert!(console.contains("alphabet size: 4, code length: 3"));
    assert!(console.contains("GA-entropy"));

    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("results.json");
    table.save(&results_path).unwrap();
    assert_eq!(ResultTable::load(&results_path).unwrap(), table);

    let charts = render_charts(&table, 3, dir.path().join("charts")).unwrap();
    assert_eq!(charts.len(), 2);
    assert!(charts.iter().all(|p| p.exists()));
}

#[test]
fn test_selected_strategies_only() {
    let registry = StrategyRegistry::standard()
        .select(&["entropy-all", "knuth"])
        .unwrap();
    let mut runner = SweepRunner::new(small_config(vec![4], vec![3], 1), registry).unwrap();
    let mut table = ResultTable::new();
    runner.run(&mut table, &mut Silent).unwrap();

    assert_eq!(table.strategies().collect::<Vec<_>>(), vec!["knuth", "entropy-all"]);
}

#[test]
fn test_config_file_drives_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.json");
    std::fs::write(
        &path,
        r#"{ "alphabet_sizes": [4, 5], "code_lengths": [2], "trials": 2, "seed": 9 }"#,
    )
    .unwrap();

    let config = SweepConfig::from_json_file(&path).unwrap();
    let mut registry = StrategyRegistry::new();
    registry.register(Box::new(SlowFive)).unwrap();
    let mut runner = SweepRunner::new(config, registry).unwrap();
    let mut table = ResultTable::new();
    runner.run(&mut table, &mut Silent).unwrap();

    let configs: Vec<(usize, usize)> = table
        .get("slow-five")
        .unwrap()
        .iter()
        .map(|s| (s.configuration.alphabet_size(), s.configuration.code_length()))
        .collect();
    assert_eq!(configs, vec![(4, 2), (5, 2)]);
}
