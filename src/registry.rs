//! Units linked into the binary that player archives can refer to.
//!
//! An archive entry such as `classic/tit_for_tat.unit` names the symbol
//! `classic::tit_for_tat`. The registry resolves that symbol to a [`Unit`]: either a factory
//! building a [`Strategy`] through its zero-argument path, or a support unit that exists
//! but does not implement the contract.

use std::collections::HashMap;

use crate::players;
use crate::strategy::Strategy;

/// Zero-argument construction path of a strategy.
pub type StrategyFactory = fn() -> anyhow::Result<Box<dyn Strategy>>;

/// A registered unit.
#[derive(Clone, Copy)]
pub enum Unit {
    /// Implements [`Strategy`]; can be instantiated.
    Strategy(StrategyFactory),
    /// Linked, but not a player (helpers, shared tables, ...).
    Support,
}

impl std::fmt::Debug for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Strategy(_) => write!(f, "Strategy"),
            Unit::Support => write!(f, "Support"),
        }
    }
}

/// Symbol table consulted by the player loader.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    units: HashMap<String, Unit>,
}

impl StrategyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in classic strategy under `classic::*`, plus the
    /// `classic::history` support unit.
    pub fn with_classic_players() -> Self {
        fn boxed<S: Strategy + Default + 'static>() -> anyhow::Result<Box<dyn Strategy>> {
            Ok(Box::new(S::default()))
        }

        Self::new()
            .with_strategy("classic::always_cooperate", boxed::<players::AlwaysCooperate>)
            .with_strategy("classic::always_defect", boxed::<players::AlwaysDefect>)
            .with_strategy("classic::tit_for_tat", boxed::<players::TitForTat>)
            .with_strategy(
                "classic::suspicious_tit_for_tat",
                boxed::<players::SuspiciousTitForTat>,
            )
            .with_strategy("classic::tit_for_two_tats", boxed::<players::TitForTwoTats>)
            .with_strategy("classic::grim_trigger", boxed::<players::GrimTrigger>)
            .with_strategy("classic::pavlov", boxed::<players::Pavlov>)
            .with_strategy("classic::random", boxed::<players::RandomPlayer>)
            .with_support("classic::history")
    }

    /// Registers a strategy factory under `symbol`, replacing any previous unit.
    pub fn with_strategy(mut self, symbol: &str, factory: StrategyFactory) -> Self {
        self.units
            .insert(symbol.to_owned(), Unit::Strategy(factory));
        self
    }

    /// Registers a non-player unit under `symbol`.
    pub fn with_support(mut self, symbol: &str) -> Self {
        self.units.insert(symbol.to_owned(), Unit::Support);
        self
    }

    pub fn resolve(&self, symbol: &str) -> Option<Unit> {
        self.units.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::strategy::Decision;

    #[test]
    fn test_classic_registry() {
        let registry = StrategyRegistry::with_classic_players();
        assert_eq!(registry.len(), 9);

        let Some(Unit::Strategy(factory)) = registry.resolve("classic::tit_for_tat") else {
            panic!("tit for tat should be a strategy");
        };
        let mut strategy = factory().unwrap();
        assert_eq!(strategy.engine_name(), "Tit for Tat");
        assert_eq!(strategy.decide(Decision::None), Decision::Cooperate);

        assert!(matches!(
            registry.resolve("classic::history"),
            Some(Unit::Support)
        ));
        assert!(registry.resolve("classic::nothing").is_none());
    }

    #[test]
    fn test_later_registration_wins() {
        let registry = StrategyRegistry::new()
            .with_support("a::b")
            .with_strategy("a::b", || Ok(Box::new(crate::players::AlwaysDefect)));
        assert!(matches!(registry.resolve("a::b"), Some(Unit::Strategy(_))));
        assert_eq!(registry.len(), 1);
    }
}
