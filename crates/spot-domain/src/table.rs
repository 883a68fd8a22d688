//! Tabla de reacciones tipada: catión → (anión → `OutcomeRecord`).
//!
//! El documento JSON de origen mezcla claves centinela (`selbst` para el
//! color propio del catión y `flamme` para el ensayo a la llama) con los
//! aniones reales. Al cargar se separan en campos opcionales de
//! `CationEntry`, de modo que iterar "todos los aniones" nunca incluye
//! centinelas. El orden de declaración de cationes y aniones se conserva.
use indexmap::{IndexMap, IndexSet};
use log::warn;
use serde::Deserialize;

use crate::color::{self, PLACEHOLDER};
use crate::{DomainError, OutcomeRecord, Rgb, Swatch};

/// Clave centinela del color intrínseco del catión.
pub const SELF_KEY: &str = "selbst";
/// Clave centinela del ensayo a la llama.
pub const FLAME_KEY: &str = "flamme";

/// Fila de la tabla para un catión.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CationEntry {
    pub reactions: IndexMap<String, OutcomeRecord>,
    pub self_outcome: Option<OutcomeRecord>,
    pub flame_test: Option<OutcomeRecord>,
}

impl CationEntry {
    pub fn get(&self, anion: &str) -> Option<&OutcomeRecord> {
        self.reactions.get(anion)
    }

    /// Aniones con entrada explícita (reactiva o no) para este catión.
    pub fn anions(&self) -> impl Iterator<Item = &str> {
        self.reactions.keys().map(String::as_str)
    }
}

#[derive(Deserialize)]
struct RawTable {
    inorganic: Option<IndexMap<String, IndexMap<String, serde_json::Value>>>,
    #[serde(rename = "colorVocab", default)]
    color_vocab: Vec<String>,
    #[serde(rename = "intrinsicColors", default)]
    intrinsic_colors: IndexMap<String, String>,
    #[serde(default)]
    aliases: IndexMap<String, Vec<String>>,
}

/// Fuente de datos de sólo lectura consumida por el generador.
#[derive(Debug, Clone, Default)]
pub struct ReactionTable {
    cations: IndexMap<String, CationEntry>,
    anions: Vec<String>,
    color_vocab: Vec<String>,
    intrinsic_colors: IndexMap<String, String>,
    aliases: IndexMap<String, Vec<String>>,
}

impl ReactionTable {
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_json_value(value)
    }

    /// Construye la tabla desde el documento JSON.
    ///
    /// # Errores
    /// `ValidationError` si falta la sección `inorganic`;
    /// `SerializationError` si el documento no tiene la forma esperada.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DomainError> {
        let raw: RawTable = serde_json::from_value(value)?;
        let inorganic = raw.inorganic
                           .ok_or_else(|| DomainError::ValidationError("la tabla no contiene la sección 'inorganic'".into()))?;

        let mut cations = IndexMap::with_capacity(inorganic.len());
        let mut anions: IndexSet<String> = IndexSet::new();
        for (cation, cells) in inorganic {
            let mut entry = CationEntry::default();
            for (key, cell) in cells {
                let mut record: OutcomeRecord = match serde_json::from_value(cell) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!("[table] celda ignorada {cation}/{key}: {e}");
                        continue;
                    }
                };
                if record.normalize() {
                    warn!("[table] {cation}/{key}: 'no-reaction' con color, se descarta el color");
                }
                match key.as_str() {
                    SELF_KEY => entry.self_outcome = Some(record),
                    FLAME_KEY => entry.flame_test = Some(record),
                    _ => {
                        anions.insert(key.clone());
                        entry.reactions.insert(key, record);
                    }
                }
            }
            cations.insert(cation, entry);
        }

        Ok(ReactionTable { cations,
                           anions: anions.into_iter().collect(),
                           color_vocab: raw.color_vocab,
                           intrinsic_colors: raw.intrinsic_colors,
                           aliases: raw.aliases })
    }

    pub fn len(&self) -> usize {
        self.cations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cations.is_empty()
    }

    /// Cationes en orden de declaración.
    pub fn cations(&self) -> impl Iterator<Item = &str> {
        self.cations.keys().map(String::as_str)
    }

    pub fn cation(&self, name: &str) -> Option<&CationEntry> {
        self.cations.get(name)
    }

    /// Todos los aniones conocidos (sin repetir, orden de primera aparición).
    pub fn all_anions(&self) -> &[String] {
        &self.anions
    }

    pub fn lookup(&self, cation: &str, anion: &str) -> Option<&OutcomeRecord> {
        self.cations.get(cation)?.get(anion)
    }

    /// Nombre del color propio del catión (entrada `selbst`), si es válido.
    pub fn intrinsic_color(&self, cation: &str) -> Option<&str> {
        let own = self.cations.get(cation)?.self_outcome.as_ref()?;
        own.color.as_deref().filter(|c| self.is_valid_color_name(c))
    }

    /// Color de la tabla `intrinsicColors` para una clave de compuesto.
    pub fn named_intrinsic_color(&self, key: &str) -> Option<&str> {
        self.intrinsic_colors.get(key).map(String::as_str).filter(|c| self.is_valid_color_name(c))
    }

    /// Resuelve el color intrínseco de una disolución (catión + anión):
    /// primero el color propio del catión, luego las claves
    /// `{cat}{an}(aq)`, `{cat}{an}`, `{cat}(aq)` y `{cat}`.
    pub fn intrinsic_swatch(&self, cation: &str, anion: &str) -> Option<Swatch> {
        if let Some(own) = self.intrinsic_color(cation) {
            return self.swatch(own);
        }
        let keys = [format!("{cation}{anion}(aq)"),
                    format!("{cation}{anion}"),
                    format!("{cation}(aq)"),
                    cation.to_string()];
        let name = keys.iter().find_map(|k| self.named_intrinsic_color(k))?;
        self.swatch(name)
    }

    pub fn flame_test(&self, cation: &str) -> Option<&OutcomeRecord> {
        self.cations.get(cation)?.flame_test.as_ref()
    }

    pub fn aliases(&self, name: &str) -> &[String] {
        self.aliases.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn color_vocab(&self) -> &[String] {
        &self.color_vocab
    }

    /// Un nombre es válido si no es el placeholder y, cuando existe
    /// vocabulario, pertenece a él; sin vocabulario basta con que la tabla
    /// fija lo conozca.
    pub fn is_valid_color_name(&self, name: &str) -> bool {
        if name.is_empty() || name == PLACEHOLDER {
            return false;
        }
        if !self.color_vocab.is_empty() {
            return self.color_vocab.iter().any(|c| c == name);
        }
        color::named_rgb(name).is_some()
    }

    pub fn color_name_to_rgb(&self, name: &str) -> Option<Rgb> {
        if !self.is_valid_color_name(name) {
            return None;
        }
        color::named_rgb(name)
    }

    pub fn swatch(&self, name: &str) -> Option<Swatch> {
        self.color_name_to_rgb(name).map(|rgb| Swatch { name: name.to_string(), rgb })
    }

    /// RGB observable de un registro: el explícito gana, si no el del nombre.
    pub fn outcome_rgb(&self, record: &OutcomeRecord) -> Option<Rgb> {
        if record.is_no_reaction() {
            return None;
        }
        record.rgb.or_else(|| record.color.as_deref().and_then(|c| self.color_name_to_rgb(c)))
    }

    /// Coloreado = hay reacción y el color es resoluble.
    pub fn is_colored(&self, record: &OutcomeRecord) -> bool {
        !record.is_no_reaction() && self.outcome_rgb(record).is_some()
    }

    pub fn colored_outcome_count(&self, cation: &str) -> usize {
        self.cations
            .get(cation)
            .map(|e| e.reactions.values().filter(|r| self.is_colored(r)).count())
            .unwrap_or(0)
    }

    /// Todas las celdas (catión, anión, registro) en orden de tabla.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, &OutcomeRecord)> {
        self.cations
            .iter()
            .flat_map(|(c, e)| e.reactions.iter().map(move |(a, r)| (c.as_str(), a.as_str(), r)))
    }
}
