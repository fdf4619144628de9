//! Sweep runner for Mastermind strategy benchmarks.
//!
//! Orchestrates the benchmark lifecycle:
//! 1. Enumerate configurations (alphabet sizes outer, code lengths inner)
//! 2. Draw one secret per configuration
//! 3. Run every registered strategy N times against that secret, timing each call
//! 4. Fold each strategy's samples into an aggregate and append it to the table
//!
//! Everything runs on the calling thread; a strategy call blocks the sweep
//! until it returns. The first strategy failure aborts the sweep.

use std::io;
use std::time::Instant;

use anyhow::{Result, anyhow};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use mastermind_kernel::{Code, Configuration, Oracle, Strategy, StrategyError, SweepConfig};

use crate::generator::generate_secret;
use crate::registry::StrategyRegistry;
use crate::results::{AggregateStat, ResultTable, TrialSample};

/// Per-trial settings handed to the trial runner.
#[derive(Debug, Clone, Copy)]
pub struct TrialSettings {
    pub trials: usize,
    pub max_guesses: usize,
    pub trace_guesses: bool,
}

impl From<&SweepConfig> for TrialSettings {
    fn from(config: &SweepConfig) -> Self {
        Self {
            trials: config.trials,
            max_guesses: config.max_guesses,
            trace_guesses: config.trace_guesses,
        }
    }
}

/// Run one strategy `settings.trials` times against the same secret.
///
/// Each call is timed with a monotonic clock. Strategy errors propagate
/// unchanged; there is no retry.
pub fn run_trials(
    strategy: &dyn Strategy,
    configuration: Configuration,
    secret: &Code,
    settings: TrialSettings,
    rng: &mut dyn RngCore,
) -> Result<Vec<TrialSample>, StrategyError> {
    let mut samples = Vec::with_capacity(settings.trials);
    for trial in 0..settings.trials {
        let mut oracle = Oracle::new(
            configuration,
            secret,
            settings.max_guesses,
            settings.trace_guesses,
        )?;

        let start = Instant::now();
        let guess_count = strategy.solve(&mut oracle, rng)?;
        let elapsed_seconds = start.elapsed().as_secs_f64();

        if guess_count == 0 {
            return Err(StrategyError::NoGuesses);
        }
        debug!(
            strategy = strategy.name(),
            trial = trial,
            guesses = guess_count,
            elapsed_seconds = elapsed_seconds,
            "Trial complete"
        );
        samples.push(TrialSample {
            guess_count,
            elapsed_seconds,
        });
    }
    Ok(samples)
}

/// Hooks for watching a sweep as it runs.
///
/// All methods default to doing nothing. An error from a hook aborts the sweep.
pub trait SweepObserver {
    /// A new configuration is about to be evaluated.
    fn configuration_started(&mut self, _configuration: &Configuration, _secret: &Code) -> io::Result<()> {
        Ok(())
    }

    /// A strategy is about to run its trials.
    fn strategy_started(&mut self, _strategy: &str, _configuration: &Configuration) -> io::Result<()> {
        Ok(())
    }

    /// A strategy finished all trials at a configuration.
    fn strategy_finished(&mut self, _strategy: &str, _stat: &AggregateStat) -> io::Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
pub struct Silent;

impl SweepObserver for Silent {}

/// Drives a full sweep over the configured grid.
pub struct SweepRunner {
    config: SweepConfig,
    registry: StrategyRegistry,
    rng: StdRng,
}

impl SweepRunner {
    /// Validate the configuration and set up the shared random source.
    pub fn new(config: SweepConfig, registry: StrategyRegistry) -> Result<Self> {
        config.validate()?;
        if registry.is_empty() {
            return Err(mastermind_kernel::ConfigError::NoStrategies.into());
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            registry,
            rng,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Run the sweep, appending one aggregate per (strategy, configuration).
    ///
    /// The table may already hold entries from an earlier sweep; they are kept.
    /// Nothing is appended unless the whole grid completes.
    pub fn run(&mut self, table: &mut ResultTable, observer: &mut dyn SweepObserver) -> Result<()> {
        let grid = mastermind_kernel::configurations(
            &self.config.alphabet_sizes,
            &self.config.code_lengths,
        )?;
        let settings = TrialSettings::from(&self.config);
        let total = grid.len() * self.registry.len();
        let mut completed = 0;
        let mut sweep = ResultTable::new();

        info!(
            configurations = grid.len(),
            strategies = self.registry.len(),
            trials = settings.trials,
            "Starting sweep"
        );

        for configuration in grid {
            let secret = generate_secret(&configuration, &mut self.rng);
            observer.configuration_started(&configuration, &secret)?;

            for strategy in self.registry.iter() {
                observer.strategy_started(strategy.name(), &configuration)?;

                let samples =
                    run_trials(strategy, configuration, &secret, settings, &mut self.rng)?;
                let stat = AggregateStat::from_samples(configuration, &samples)
                    .ok_or_else(|| anyhow!("no samples collected for {}", strategy.name()))?;
                sweep.append(strategy.name(), stat);
                completed += 1;

                info!(
                    progress = format!("{}/{}", completed, total),
                    strategy = strategy.name(),
                    alphabet_size = configuration.alphabet_size(),
                    code_length = configuration.code_length(),
                    mean_guesses = stat.mean_guesses,
                    "Completed configuration"
                );
                observer.strategy_finished(strategy.name(), &stat)?;
            }
        }

        table.extend(sweep);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    /// Records every secret it is shown and answers with a fixed count.
    struct Recorder {
        name: &'static str,
        seen: Rc<RefCell<Vec<Code>>>,
    }

    impl Strategy for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn solve(&self, oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
            // Recover the secret by brute force through the oracle's scoring.
            let config = *oracle.configuration();
            let secret = (0..config.search_space_size())
                .map(|i| Code::from_index(i, &config))
                .find(|c| oracle.guess(c).map(|fb| fb.is_win(config.code_length())).unwrap_or(false))
                .ok_or(StrategyError::NonConvergence {
                    max_guesses: oracle.max_guesses(),
                })?;
            self.seen.borrow_mut().push(secret);
            Ok(oracle.guesses())
        }
    }

    /// Fails on its n-th call.
    struct FailsOnCall {
        calls: Cell<usize>,
        fail_at: usize,
    }

    impl Strategy for FailsOnCall {
        fn name(&self) -> &str {
            "fails"
        }

        fn solve(&self, _oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_at {
                Err(StrategyError::Internal("boom".to_string()))
            } else {
                Ok(3)
            }
        }
    }

    struct Zero;

    impl Strategy for Zero {
        fn name(&self) -> &str {
            "zero"
        }

        fn solve(&self, _oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
            Ok(0)
        }
    }

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    impl SweepObserver for Log {
        fn configuration_started(&mut self, configuration: &Configuration, _secret: &Code) -> io::Result<()> {
            self.events.push(format!("config {configuration}"));
            Ok(())
        }

        fn strategy_finished(&mut self, strategy: &str, _stat: &AggregateStat) -> io::Result<()> {
            self.events.push(format!("done {strategy}"));
            Ok(())
        }
    }

    /// Plays the first code of the space twice, whatever the answer.
    struct TwoGuesses;

    impl Strategy for TwoGuesses {
        fn name(&self) -> &str {
            "two-guesses"
        }

        fn solve(&self, oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
            let first = Code::from_index(0, oracle.configuration());
            oracle.guess(&first)?;
            oracle.guess(&first)?;
            Ok(oracle.guesses())
        }
    }

    /// Output that is gone by the time the first strategy reports.
    struct BrokenOutput;

    impl SweepObserver for BrokenOutput {
        fn strategy_finished(&mut self, _strategy: &str, _stat: &AggregateStat) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn small_sweep(alphabet_sizes: Vec<usize>, trials: usize) -> SweepConfig {
        SweepConfig {
            alphabet_sizes,
            code_lengths: vec![2],
            trials,
            max_guesses: 100,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_strategy_and_trial_sees_the_same_secret() {
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));
        let mut registry = StrategyRegistry::new();
        registry
            .register(Box::new(Recorder { name: "a", seen: seen_a.clone() }))
            .unwrap();
        registry
            .register(Box::new(Recorder { name: "b", seen: seen_b.clone() }))
            .unwrap();

        let mut runner = SweepRunner::new(small_sweep(vec![3, 4], 4), registry).unwrap();
        let mut table = ResultTable::new();
        runner.run(&mut table, &mut Silent).unwrap();

        let a = seen_a.borrow();
        let b = seen_b.borrow();
        assert_eq!(a.len(), 8);
        assert_eq!(*a, *b);
        // Within each configuration all four trials share one secret.
        for chunk in a.chunks(4) {
            assert!(chunk.iter().all(|s| *s == chunk[0]));
        }
    }

    #[test]
    fn test_samples_are_positive() {
        let registry = StrategyRegistry::standard()
            .select(&["knuth", "random_search", "SA-bernier", "GA-entropy"])
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let config = Configuration::new(4, 3).unwrap();
        let secret = generate_secret(&config, &mut rng);
        let settings = TrialSettings {
            trials: 3,
            max_guesses: 30,
            trace_guesses: false,
        };

        for strategy in registry.iter() {
            let samples = run_trials(strategy, config, &secret, settings, &mut rng).unwrap();
            assert_eq!(samples.len(), 3);
            for sample in samples {
                assert!(sample.guess_count >= 1);
                assert!(sample.elapsed_seconds >= 0.0);
            }
        }
    }

    #[test]
    fn test_strategy_failure_propagates_unchanged() {
        let strategy = FailsOnCall {
            calls: Cell::new(0),
            fail_at: 2,
        };
        let config = Configuration::new(4, 4).unwrap();
        let secret = Code::new(vec![0, 1, 2, 3]);
        let settings = TrialSettings {
            trials: 5,
            max_guesses: 10,
            trace_guesses: false,
        };

        let err = run_trials(&strategy, config, &secret, settings, &mut rand::rng()).unwrap_err();
        assert_eq!(err, StrategyError::Internal("boom".to_string()));
        assert_eq!(strategy.calls.get(), 2, "no retry after failure");
    }

    #[test]
    fn test_sweep_aborts_on_failure_without_partial_entry() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(Box::new(FailsOnCall {
                calls: Cell::new(0),
                fail_at: 4,
            }))
            .unwrap();

        let mut runner = SweepRunner::new(small_sweep(vec![3, 4], 3), registry).unwrap();
        let mut table = ResultTable::new();
        let earlier = AggregateStat {
            configuration: Configuration::new(6, 2).unwrap(),
            mean_guesses: 3.0,
            mean_runtime: 0.001,
            std_guesses: 0.0,
            std_runtime: 0.0,
        };
        table.append("fails", earlier);
        let before = table.clone();

        // First configuration finishes, second fails on its first trial.
        let err = runner.run(&mut table, &mut Silent).unwrap_err();

        assert_eq!(
            err.downcast_ref::<StrategyError>(),
            Some(&StrategyError::Internal("boom".to_string()))
        );
        assert_eq!(table, before);
        assert_eq!(table.get("fails").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_sweep_guess_ceiling_reaches_oracle() {
        let mut registry = StrategyRegistry::new();
        registry.register(Box::new(TwoGuesses)).unwrap();
        let config = SweepConfig {
            max_guesses: 1,
            ..small_sweep(vec![3], 2)
        };

        let mut runner = SweepRunner::new(config, registry).unwrap();
        let mut table = ResultTable::new();
        let err = runner.run(&mut table, &mut Silent).unwrap_err();

        assert_eq!(
            err.downcast_ref::<StrategyError>(),
            Some(&StrategyError::NonConvergence { max_guesses: 1 })
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_observer_error_aborts_sweep() {
        let mut registry = StrategyRegistry::new();
        registry.register(Box::new(TwoGuesses)).unwrap();
        let mut runner = SweepRunner::new(small_sweep(vec![3, 4], 1), registry).unwrap();
        let mut table = ResultTable::new();

        let err = runner.run(&mut table, &mut BrokenOutput).unwrap_err();
        assert_eq!(
            err.downcast_ref::<io::Error>().map(|e| e.kind()),
            Some(io::ErrorKind::BrokenPipe)
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_guess_report_is_rejected() {
        let config = Configuration::new(4, 4).unwrap();
        let secret = Code::new(vec![0, 0, 0, 0]);
        let settings = TrialSettings {
            trials: 1,
            max_guesses: 10,
            trace_guesses: false,
        };
        let err = run_trials(&Zero, config, &secret, settings, &mut rand::rng()).unwrap_err();
        assert_eq!(err, StrategyError::NoGuesses);
    }

    #[test]
    fn test_observer_sees_configurations_in_sweep_order() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(Box::new(FailsOnCall {
                calls: Cell::new(0),
                fail_at: usize::MAX,
            }))
            .unwrap();
        let mut runner = SweepRunner::new(small_sweep(vec![5, 3], 2), registry).unwrap();
        let mut log = Log::default();
        runner.run(&mut ResultTable::new(), &mut log).unwrap();

        assert_eq!(
            log.events,
            vec!["config (5, 2)", "done fails", "config (3, 2)", "done fails"]
        );
    }

    #[test]
    fn test_rerun_appends_to_existing_table() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(Box::new(FailsOnCall {
                calls: Cell::new(0),
                fail_at: usize::MAX,
            }))
            .unwrap();
        let mut runner = SweepRunner::new(small_sweep(vec![3], 2), registry).unwrap();
        let mut table = ResultTable::new();
        runner.run(&mut table, &mut Silent).unwrap();
        let first = table.get("fails").unwrap()[0];
        runner.run(&mut table, &mut Silent).unwrap();

        let stats = table.get("fails").unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0], first);
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let config = SweepConfig {
            alphabet_sizes: vec![1],
            ..Default::default()
        };
        assert!(SweepRunner::new(config, StrategyRegistry::standard()).is_err());
        assert!(SweepRunner::new(SweepConfig::default(), StrategyRegistry::new()).is_err());
    }

    #[test]
    fn test_seeded_sweeps_draw_identical_secrets() {
        let secrets = |seed| {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let mut registry = StrategyRegistry::new();
            registry
                .register(Box::new(Recorder { name: "r", seen: seen.clone() }))
                .unwrap();
            let config = SweepConfig {
                seed: Some(seed),
                ..small_sweep(vec![3, 4, 5], 1)
            };
            SweepRunner::new(config, registry)
                .unwrap()
                .run(&mut ResultTable::new(), &mut Silent)
                .unwrap();
            seen.take()
        };
        assert_eq!(secrets(9), secrets(9));
    }
}
