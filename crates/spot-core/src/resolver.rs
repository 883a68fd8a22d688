//! OutcomeResolver: resultado observable de mezclar dos disoluciones.
//!
//! La tabla está indexada por (catión de una, anión de la otra), así que
//! hay que mirar ambos cruces:
//! - e1 = tabla[a.catión][b.anión]
//! - e2 = tabla[b.catión][a.anión]
//!
//! Si sólo existe uno se devuelve ése; si existen ambos gana el coloreado;
//! si empatan gana e1. Para que el resultado no dependa del orden de los
//! argumentos, `a` es siempre la disolución generada primero.
use spot_domain::{OutcomeRecord, ReactionTable, Solution};

#[derive(Debug, Clone, Copy)]
pub struct OutcomeResolver<'t> {
    table: &'t ReactionTable,
}

impl<'t> OutcomeResolver<'t> {
    pub fn new(table: &'t ReactionTable) -> Self {
        Self { table }
    }

    /// `None` significa "sin resultado visible", distinto de un registro
    /// `no-reaction` explícito. La diagonal (a con a) no pasa por aquí.
    pub fn resolve(&self, a: &Solution, b: &Solution) -> Option<&'t OutcomeRecord> {
        let (a, b) = if declaration_key(b) < declaration_key(a) { (b, a) } else { (a, b) };
        let e1 = self.table.lookup(a.cation(), b.anion());
        let e2 = self.table.lookup(b.cation(), a.anion());
        match (e1, e2) {
            (Some(x), None) => Some(x),
            (None, Some(y)) => Some(y),
            (Some(x), Some(y)) => {
                if !self.table.is_colored(x) && self.table.is_colored(y) {
                    Some(y)
                } else {
                    Some(x)
                }
            }
            (None, None) => None,
        }
    }
}

fn declaration_key(s: &Solution) -> (usize, &str, &str) {
    (s.index(), s.cation(), s.anion())
}
