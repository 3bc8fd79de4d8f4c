use clap::ValueEnum;

use crate::ai::{FirstLegalMoveSelector, GreedySelector, MoveSelector};
use crate::engine::ReversiEngine;

/// Engine whose move selector is picked at runtime.
pub type ConfiguredEngine = ReversiEngine<Box<dyn MoveSelector>>;

/// How the automated opponent picks its moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Corner-aware greedy capture with random tie-breaks.
    #[default]
    Greedy,
    /// Always the lowest-indexed legal move.
    FirstLegal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub strategy: Strategy,
    /// Fixed tie-break seed. The wall clock is used when unset.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn build(&self) -> ConfiguredEngine {
        let selector: Box<dyn MoveSelector> = match (self.strategy, self.seed) {
            (Strategy::Greedy, Some(seed)) => Box::new(GreedySelector::with_seed(seed)),
            (Strategy::Greedy, None) => Box::new(GreedySelector::new()),
            (Strategy::FirstLegal, _) => Box::new(FirstLegalMoveSelector),
        };
        ReversiEngine::new(selector)
    }
}
