//! Combination detection and hand partitioning for two-deck rummy with jokers.

mod bitset;
mod bonus;
mod combo;
mod config;
mod cover;
mod deck;
mod error;
mod extract;
mod runs_sets;
mod shapes;
mod validate;
mod wildcards;

pub use bitset::{combine_mask, merge_words, CardMask};
pub use bonus::{extract_natural_seven_combo, has_natural_seven};
pub use combo::{covers_exactly, Combo, ComboCard, ComboKind, Partition};
pub use config::{Rules, RulesConfig, DEFAULT_HAND_SIZE};
pub use cover::extract_exhaustive_partition;
pub use deck::{
    card_from_str, create_deck, parse_hand, shuffle, shuffle_with_seed, Card, CardId, Color, Rank,
    Suit, DECK_SIZE, JOKER_IDS, SUITS,
};
pub use error::RulesError;
pub use extract::{extract_win_partition, WildcardPool};
pub use shapes::{
    is_quad, is_run, is_run_with_wildcards, is_triple, is_triple_with_wildcards, Strictness,
};
pub use validate::{has_win_shape, validate_win, validate_win_with, PartitionStrategy};
pub use wildcards::{split_hand, WildcardSet};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyModule;

    use crate::{Card, CardMask, Combo, Partition, RulesError, WildcardSet};

    #[pyclass(name = "Combo")]
    #[derive(Clone)]
    pub struct PyCombo {
        #[pyo3(get)]
        pub kind: String,
        #[pyo3(get)]
        pub cards: Vec<String>,
        #[pyo3(get)]
        pub values: Vec<u8>,
        #[pyo3(get)]
        pub wildcards_used: usize,
    }

    impl From<&Combo> for PyCombo {
        fn from(combo: &Combo) -> Self {
            Self {
                kind: combo.kind.name().to_string(),
                cards: combo.ids().map(|id| id.to_string()).collect(),
                values: combo.cards.iter().map(|slot| slot.value()).collect(),
                wildcards_used: combo.wildcards_used(),
            }
        }
    }

    fn to_py_err(err: RulesError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn hand(ids: Vec<String>) -> PyResult<Vec<Card>> {
        crate::parse_hand(ids.as_slice()).map_err(to_py_err)
    }

    fn wildcards(ids: Vec<String>) -> PyResult<WildcardSet> {
        let cards = hand(ids)?;
        Ok(WildcardSet::from_ids(cards.iter().map(|card| card.id)))
    }

    fn combos(partition: &Partition) -> Vec<PyCombo> {
        partition.iter().map(PyCombo::from).collect()
    }

    #[pyfunction]
    fn create_deck() -> Vec<String> {
        crate::create_deck().iter().map(|card| card.id.to_string()).collect()
    }

    #[pyfunction]
    fn shuffled_deck(seed: u64) -> Vec<String> {
        crate::shuffle_with_seed(&crate::create_deck(), seed)
            .iter()
            .map(|card| card.id.to_string())
            .collect()
    }

    #[pyfunction]
    fn wildcards_for_round(revealed: &str) -> PyResult<Vec<String>> {
        let card = crate::card_from_str(revealed).map_err(to_py_err)?;
        Ok(WildcardSet::for_round(&card).ids().map(|id| id.to_string()).collect())
    }

    #[pyfunction]
    fn hand_mask(ids: Vec<String>) -> PyResult<(u64, u64)> {
        let cards = hand(ids)?;
        Ok(crate::combine_mask(CardMask::from_ids(cards.iter().map(|card| card.id))))
    }

    #[pyfunction]
    fn mask_to_ids(mask_hi: u64, mask_lo: u64) -> Vec<String> {
        crate::merge_words(mask_hi, mask_lo)
            .ids()
            .map(|id| id.to_string())
            .collect()
    }

    #[pyfunction]
    fn has_natural_seven(ids: Vec<String>) -> PyResult<bool> {
        Ok(crate::has_natural_seven(&hand(ids)?))
    }

    #[pyfunction]
    fn extract_natural_seven_combo(ids: Vec<String>) -> PyResult<Vec<PyCombo>> {
        Ok(combos(&crate::extract_natural_seven_combo(&hand(ids)?)))
    }

    #[pyfunction]
    #[pyo3(signature = (ids, wildcard_ids, exhaustive = false))]
    fn validate_win(
        ids: Vec<String>,
        wildcard_ids: Vec<String>,
        exhaustive: bool,
    ) -> PyResult<bool> {
        let strategy = if exhaustive {
            crate::PartitionStrategy::Exhaustive
        } else {
            crate::PartitionStrategy::Greedy
        };
        Ok(crate::validate_win_with(&hand(ids)?, &wildcards(wildcard_ids)?, strategy))
    }

    #[pyfunction]
    fn extract_win_partition(
        ids: Vec<String>,
        wildcard_ids: Vec<String>,
    ) -> PyResult<Vec<PyCombo>> {
        let partition = crate::extract_win_partition(&hand(ids)?, &wildcards(wildcard_ids)?);
        Ok(combos(&partition))
    }

    #[pymodule]
    fn rummy_melds(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
        module.add_function(wrap_pyfunction!(create_deck, module)?)?;
        module.add_function(wrap_pyfunction!(shuffled_deck, module)?)?;
        module.add_function(wrap_pyfunction!(wildcards_for_round, module)?)?;
        module.add_function(wrap_pyfunction!(hand_mask, module)?)?;
        module.add_function(wrap_pyfunction!(mask_to_ids, module)?)?;
        module.add_function(wrap_pyfunction!(has_natural_seven, module)?)?;
        module.add_function(wrap_pyfunction!(extract_natural_seven_combo, module)?)?;
        module.add_function(wrap_pyfunction!(validate_win, module)?)?;
        module.add_function(wrap_pyfunction!(extract_win_partition, module)?)?;
        module.add_class::<PyCombo>()?;
        Ok(())
    }
}
