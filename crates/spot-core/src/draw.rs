//! Sorteo ponderado por peso acumulado.
//!
//! Una sola rutina sirve para cationes (peso = reactividad) y aniones
//! (peso uniforme): se toma un valor uniforme en `[0, total)` y se restan
//! los pesos en orden del pool hasta que el resto deja de ser positivo.
use rand::Rng;

/// Índice elegido con probabilidad proporcional a `weight`. Pesos negativos
/// cuentan como cero; si todos son cero se elige de forma uniforme.
pub fn weighted_index<T, R, W>(items: &[T], weight: W, rng: &mut R) -> Option<usize>
    where R: Rng + ?Sized,
          W: Fn(&T) -> f64
{
    if items.is_empty() {
        return None;
    }
    let weights: Vec<f64> = items.iter().map(|t| weight(t).max(0.0)).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Some(rng.gen_range(0..items.len()));
    }
    let mut r = rng.gen_range(0.0..total);
    for (idx, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        r -= w;
        if r <= 0.0 {
            return Some(idx);
        }
    }
    // Redondeo de coma flotante: queda el último con peso.
    weights.iter().rposition(|w| *w > 0.0)
}

/// Extrae (sin reemplazo) un elemento del pool.
pub fn weighted_take<T, R, W>(pool: &mut Vec<T>, weight: W, rng: &mut R) -> Option<T>
    where R: Rng + ?Sized,
          W: Fn(&T) -> f64
{
    let idx = weighted_index(pool, weight, rng)?;
    Some(pool.remove(idx))
}
