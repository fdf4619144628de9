//! Genetic algorithm over Bernier inconsistency.
//!
//! Each guess evolves a fresh population whose fitness is the inconsistency
//! with the answers so far (lower is fitter). Consistent individuals join the
//! eligible set, from which the [`Objective`] picks the guess.

use rand::{Rng, RngCore};

use mastermind_kernel::code::inconsistency;
use mastermind_kernel::{Code, Configuration, Oracle, Strategy, StrategyError, Turn};

use super::{Objective, other_symbol};

#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    objective: Objective,
    name: String,
    population_size: usize,
    generations: usize,
    /// Per-position recolouring probability
    mutation_rate: f64,
    /// Fittest individuals copied unchanged into the next generation
    elite: usize,
    tournament_size: usize,
    /// Stop once this many consistent codes are collected
    eligible_cap: usize,
}

impl GeneticAlgorithm {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            name: format!("GA-{}", objective.label()),
            population_size: 60,
            generations: 100,
            mutation_rate: 0.05,
            elite: 6,
            tournament_size: 3,
            eligible_cap: 30,
        }
    }

    /// Replace population size and generation budget.
    pub fn with_population(mut self, population_size: usize, generations: usize) -> Self {
        self.population_size = population_size.max(2);
        self.generations = generations;
        self.elite = self.elite.min(self.population_size / 2);
        self
    }

    fn evolve(&self, configuration: &Configuration, history: &[Turn], rng: &mut dyn RngCore) -> Code {
        let mut population: Vec<(Code, usize)> = (0..self.population_size)
            .map(|_| {
                let code = Code::random(configuration, rng);
                let fitness = inconsistency(&code, history);
                (code, fitness)
            })
            .collect();
        let mut eligible: Vec<Code> = Vec::new();

        for _ in 0..self.generations {
            for (code, fitness) in &population {
                if *fitness == 0 && !eligible.contains(code) {
                    eligible.push(code.clone());
                }
            }
            if eligible.len() >= self.eligible_cap {
                break;
            }

            population.sort_by_key(|(_, fitness)| *fitness);
            let mut next: Vec<(Code, usize)> = population[..self.elite].to_vec();
            while next.len() < self.population_size {
                let a = self.tournament(&population, rng);
                let b = self.tournament(&population, rng);
                let child = crossover(a, b, rng);
                let child = self.mutate(child, configuration, rng);
                let fitness = inconsistency(&child, history);
                next.push((child, fitness));
            }
            population = next;
        }
        for (code, fitness) in &population {
            if *fitness == 0 && !eligible.contains(code) {
                eligible.push(code.clone());
            }
        }

        if let Some(code) = self.objective.select(&eligible) {
            return code.clone();
        }
        population
            .into_iter()
            .min_by_key(|(_, fitness)| *fitness)
            .map(|(code, _)| code)
            .unwrap_or_else(|| Code::random(configuration, rng))
    }

    /// The fittest of `tournament_size` random individuals.
    fn tournament<'p>(&self, population: &'p [(Code, usize)], rng: &mut dyn RngCore) -> &'p Code {
        let mut best = &population[rng.random_range(0..population.len())];
        for _ in 1..self.tournament_size {
            let challenger = &population[rng.random_range(0..population.len())];
            if challenger.1 < best.1 {
                best = challenger;
            }
        }
        &best.0
    }

    fn mutate(&self, code: Code, configuration: &Configuration, rng: &mut dyn RngCore) -> Code {
        let mut symbols = code.symbols().to_vec();
        for symbol in symbols.iter_mut() {
            if rng.random_bool(self.mutation_rate) {
                *symbol = other_symbol(*symbol, configuration, rng);
            }
        }
        Code::new(symbols)
    }
}

/// One-point crossover; single-position codes pick a parent.
fn crossover(a: &Code, b: &Code, rng: &mut dyn RngCore) -> Code {
    let length = a.len();
    if length < 2 {
        return if rng.random_bool(0.5) { a.clone() } else { b.clone() };
    }
    let cut = rng.random_range(1..length);
    let mut symbols = a.symbols()[..cut].to_vec();
    symbols.extend_from_slice(&b.symbols()[cut..]);
    Code::new(symbols)
}

impl Strategy for GeneticAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, oracle: &mut Oracle<'_>, rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
        loop {
            let guess = if oracle.history().is_empty() {
                Code::random(oracle.configuration(), rng)
            } else {
                self.evolve(oracle.configuration(), oracle.history(), rng)
            };
            if oracle.guess(&guess)?.is_win(oracle.code_length()) {
                return Ok(oracle.guesses());
            }
        }
    }
}
