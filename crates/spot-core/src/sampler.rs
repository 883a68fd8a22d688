//! SolutionSampler: sortea N disoluciones que no reaccionan internamente.
//!
//! - Pool de cationes ponderado por reactividad (número de resultados
//!   coloreados en la tabla, mínimo 1). Cada catión sorteado sale del pool
//!   aunque luego no encuentre anión.
//! - Candidatos de anión: todos los aniones conocidos menos los ya usados y
//!   menos los que tienen entrada para ese catión. Si no queda ninguno se
//!   aceptan las entradas explícitas `no-reaction` todavía libres.
//! - Con `allow_reactive_fallback` se acepta además cualquier anión libre,
//!   aunque rompa la autoconsistencia de la pipeta (comportamiento legado).
use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use spot_domain::{ReactionTable, Solution};

use crate::draw::{weighted_index, weighted_take};
use crate::GenerationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerOptions {
    /// Último recurso: aceptar un anión que sí reacciona con el catión.
    pub allow_reactive_fallback: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SolutionSampler<'t> {
    table: &'t ReactionTable,
    options: SamplerOptions,
}

impl<'t> SolutionSampler<'t> {
    pub fn new(table: &'t ReactionTable) -> Self {
        Self { table,
               options: SamplerOptions::default() }
    }

    pub fn with_options(mut self, options: SamplerOptions) -> Self {
        self.options = options;
        self
    }

    /// Peso de selección de un catión.
    pub fn reactivity_weight(&self, cation: &str) -> usize {
        self.table.colored_outcome_count(cation).max(1)
    }

    /// Sortea `n` disoluciones con etiquetas `P1..Pn`.
    ///
    /// # Errores
    /// `GenerationError::Exhausted` si el pool de cationes se vacía antes.
    pub fn sample<R>(&self, n: usize, rng: &mut R) -> Result<Vec<Solution>, GenerationError>
        where R: Rng + ?Sized
    {
        let mut pool: Vec<(&'t str, usize)> = self.table.cations().map(|c| (c, self.reactivity_weight(c))).collect();
        let mut used: HashSet<&'t str> = HashSet::new();
        let mut solutions = Vec::with_capacity(n);

        while solutions.len() < n {
            let Some((cation, _)) = weighted_take(&mut pool, |(_, w)| *w as f64, rng) else {
                break;
            };
            let candidates = self.candidate_anions(cation, &used);
            let Some(idx) = weighted_index(&candidates, |_| 1.0, rng) else {
                debug!("[sampler] sin anión disponible para {cation}, se descarta");
                continue;
            };
            let anion = candidates[idx];
            used.insert(anion);
            let intrinsic = self.table.intrinsic_swatch(cation, anion);
            solutions.push(Solution::new(solutions.len(), cation, anion, intrinsic));
        }

        if solutions.len() < n {
            return Err(GenerationError::Exhausted { requested: n,
                                                    produced: solutions.len() });
        }
        Ok(solutions)
    }

    /// Aniones aceptables para `cation`, aplicando los respaldos en orden.
    pub fn candidate_anions(&self, cation: &str, used: &HashSet<&'t str>) -> Vec<&'t str> {
        let entry = self.table.cation(cation);
        let has_entry = |a: &str| entry.is_some_and(|e| e.get(a).is_some());
        let free = || self.table.all_anions().iter().map(String::as_str).filter(|a| !used.contains(a));

        let primary: Vec<&'t str> = free().filter(|&a| !has_entry(a)).collect();
        if !primary.is_empty() {
            return primary;
        }

        let inert: Vec<&'t str> = free().filter(|&a| entry.and_then(|e| e.get(a)).is_some_and(|r| r.is_no_reaction()))
                                        .collect();
        if !inert.is_empty() {
            return inert;
        }

        if self.options.allow_reactive_fallback {
            let any: Vec<&'t str> = free().collect();
            if !any.is_empty() {
                warn!("[sampler] {cation}: sólo quedan aniones reactivos, se acepta uno (reactive fallback)");
            }
            return any;
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn weights_have_floor_of_one() {
        let t = ReactionTable::from_json_value(json!({
            "inorganic": {
                "Cu2+": {"OH-": {"type": "ppt", "color": "blue"}, "S2-": {"type": "ppt", "color": "black"}},
                "Na+": {}
            }
        })).unwrap();
        let s = SolutionSampler::new(&t);
        assert_eq!(s.reactivity_weight("Cu2+"), 2);
        assert_eq!(s.reactivity_weight("Na+"), 1);
    }

    #[test]
    fn inert_entry_is_used_when_nothing_else_remains() {
        let t = ReactionTable::from_json_value(json!({
            "inorganic": {"X+": {"Y-": {"type": "no-reaction"}}}
        })).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let sols = SolutionSampler::new(&t).sample(1, &mut rng).unwrap();
        assert_eq!(sols[0].cation(), "X+");
        assert_eq!(sols[0].anion(), "Y-");
        assert_eq!(sols[0].label(), "P1");
    }

    #[test]
    fn reactive_only_cation_is_skipped_without_fallback() {
        let t = ReactionTable::from_json_value(json!({
            "inorganic": {"Ag+": {"Cl-": {"type": "ppt", "color": "white"}}}
        })).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let err = SolutionSampler::new(&t).sample(1, &mut rng).unwrap_err();
        assert_eq!(err, GenerationError::Exhausted { requested: 1, produced: 0 });

        let legacy = SolutionSampler::new(&t).with_options(SamplerOptions { allow_reactive_fallback: true });
        let sols = legacy.sample(1, &mut rng).unwrap();
        assert_eq!(sols[0].anion(), "Cl-");
    }

    #[test]
    fn exhausted_when_pool_too_small() {
        let t = ReactionTable::from_json_value(json!({
            "inorganic": {"A+": {"X-": {"type": "no-reaction"}}, "B+": {"Y-": {"type": "no-reaction"}}}
        })).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let err = SolutionSampler::new(&t).sample(3, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::Exhausted { requested: 3, .. }));
    }

    #[test]
    fn anions_unique_and_pairs_self_consistent() {
        let t = ReactionTable::from_json_value(json!({
            "inorganic": {
                "Ag+": {"Cl-": {"type": "ppt", "color": "white"}, "I-": {"type": "ppt", "color": "yellow"}},
                "Ba2+": {"SO4 2-": {"type": "ppt", "color": "white"}},
                "Cu2+": {"OH-": {"type": "ppt", "color": "blue"}},
                "Na+": {},
                "K+": {}
            }
        })).unwrap();
        let sampler = SolutionSampler::new(&t);
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let sols = sampler.sample(4, &mut rng).unwrap();
            let anions: HashSet<&str> = sols.iter().map(|s| s.anion()).collect();
            assert_eq!(anions.len(), 4);
            for s in &sols {
                let own = t.lookup(s.cation(), s.anion());
                assert!(own.map_or(true, |r| r.is_no_reaction()), "{s} reacts with itself");
            }
        }
    }
}
