//! Strategy registry: the fixed, ordered list of strategies under test.

use mastermind_kernel::{ConfigError, Strategy};

use crate::strategies::{
    EntropyMaximizer, GeneticAlgorithm, Knuth, Objective, RandomSearch, SimulatedAnnealing,
};

/// Named strategies, evaluated in registration order.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full benchmark line-up.
    pub fn standard() -> Self {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(Knuth::default()),
            Box::new(RandomSearch::default()),
            Box::new(EntropyMaximizer::all_steps()),
            Box::new(EntropyMaximizer::minus_one()),
            Box::new(SimulatedAnnealing::new(Objective::Bernier)),
            Box::new(SimulatedAnnealing::new(Objective::Entropy)),
            Box::new(GeneticAlgorithm::new(Objective::Bernier)),
            Box::new(GeneticAlgorithm::new(Objective::Entropy)),
        ];
        Self { strategies }
    }

    /// Add a strategy; names must be unique.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) -> Result<(), ConfigError> {
        if self.get(strategy.name()).is_some() {
            return Err(ConfigError::DuplicateStrategy(strategy.name().to_string()));
        }
        self.strategies.push(strategy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Keep only the named strategies, preserving registration order.
    ///
    /// Names are matched case-insensitively; unknown names are rejected.
    pub fn select<S: AsRef<str>>(self, names: &[S]) -> Result<Self, ConfigError> {
        let known = self.names().join(", ");
        for name in names {
            let name = name.as_ref();
            if !self
                .strategies
                .iter()
                .any(|s| s.name().eq_ignore_ascii_case(name))
            {
                return Err(ConfigError::UnknownStrategy {
                    name: name.to_string(),
                    valid: known,
                });
            }
        }

        let strategies: Vec<Box<dyn Strategy>> = self
            .strategies
            .into_iter()
            .filter(|s| names.iter().any(|n| s.name().eq_ignore_ascii_case(n.as_ref())))
            .collect();
        if strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        Ok(Self { strategies })
    }
}
