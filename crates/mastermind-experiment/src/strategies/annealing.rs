//! Simulated annealing over Bernier inconsistency.
//!
//! Between guesses, a random walk over codes is cooled towards codes that
//! agree with every answer so far. Consistent codes visited on the way are
//! collected into an eligible set, and the [`Objective`] picks the guess.
//! If the walk finds none, the least inconsistent code seen is played.

use rand::{Rng, RngCore};

use mastermind_kernel::code::inconsistency;
use mastermind_kernel::{Code, Configuration, Oracle, Strategy, StrategyError, Turn};

use super::{Objective, neighbor};

/// Below this temperature the schedule restarts from the initial temperature.
const MIN_TEMPERATURE: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    objective: Objective,
    name: String,
    /// Starting temperature of each anneal
    initial_temperature: f64,
    /// Multiplicative cooling per temperature stage
    cooling_rate: f64,
    /// Proposals evaluated at each temperature
    steps_per_temperature: usize,
    /// Proposal budget per guess
    max_steps: usize,
    /// Stop once this many consistent codes are collected
    eligible_cap: usize,
}

impl SimulatedAnnealing {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            name: format!("SA-{}", objective.label()),
            initial_temperature: 5.0,
            cooling_rate: 0.9,
            steps_per_temperature: 20,
            max_steps: 20_000,
            eligible_cap: 30,
        }
    }

    /// Replace the cooling schedule.
    pub fn with_schedule(
        mut self,
        initial_temperature: f64,
        cooling_rate: f64,
        steps_per_temperature: usize,
    ) -> Self {
        self.initial_temperature = initial_temperature;
        self.cooling_rate = cooling_rate;
        self.steps_per_temperature = steps_per_temperature.max(1);
        self
    }

    fn anneal(&self, configuration: &Configuration, history: &[Turn], rng: &mut dyn RngCore) -> Code {
        let mut state = Code::random(configuration, rng);
        let mut energy = inconsistency(&state, history);
        let mut best = (state.clone(), energy);
        let mut eligible: Vec<Code> = Vec::new();
        let mut temperature = self.initial_temperature;

        for step in 0..self.max_steps {
            if energy == 0 && !eligible.contains(&state) {
                eligible.push(state.clone());
                if eligible.len() >= self.eligible_cap {
                    break;
                }
            }

            let candidate = neighbor(&state, configuration, rng);
            let candidate_energy = inconsistency(&candidate, history);
            let delta = candidate_energy as f64 - energy as f64;
            if delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                state = candidate;
                energy = candidate_energy;
                if energy < best.1 {
                    best = (state.clone(), energy);
                }
            }

            if (step + 1) % self.steps_per_temperature == 0 {
                temperature *= self.cooling_rate;
                if temperature < MIN_TEMPERATURE {
                    // Frozen in a local minimum: reheat.
                    temperature = self.initial_temperature;
                }
            }
        }
        if energy == 0 && !eligible.contains(&state) {
            eligible.push(state);
        }

        self.objective
            .select(&eligible)
            .cloned()
            .unwrap_or(best.0)
    }
}

impl Strategy for SimulatedAnnealing {
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, oracle: &mut Oracle<'_>, rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
        loop {
            let guess = if oracle.history().is_empty() {
                Code::random(oracle.configuration(), rng)
            } else {
                self.anneal(oracle.configuration(), oracle.history(), rng)
            };
            if oracle.guess(&guess)?.is_win(oracle.code_length()) {
                return Ok(oracle.guesses());
            }
        }
    }
}
