//! Registro de resultado cualitativo para una celda (catión, anión) de la
//! tabla de reacciones.
use serde::{Deserialize, Deserializer, Serialize};

use crate::Rgb;

/// Tipo de resultado observado al mezclar dos iones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutcomeKind {
    #[serde(rename = "ppt")]
    Precipitate,
    #[serde(rename = "observation")]
    Observation,
    #[serde(rename = "no-reaction")]
    NoReaction,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

/// Resultado almacenado en la tabla. Un registro `NoReaction` nunca lleva
/// color (la tabla lo normaliza al cargar).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(rename = "type", default, deserialize_with = "kind_or_unknown")]
    pub kind: OutcomeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// RGB explícito; si existe tiene prioridad sobre `color`.
    #[serde(default, deserialize_with = "lenient_rgb", skip_serializing_if = "Option::is_none")]
    pub rgb: Option<Rgb>,
    #[serde(default, deserialize_with = "string_or_list", skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<String>,
}

impl OutcomeRecord {
    pub fn new(kind: OutcomeKind, color: Option<&str>) -> Self {
        let mut rec = OutcomeRecord { kind,
                                      color: color.map(str::to_string),
                                      ..Default::default() };
        rec.normalize();
        rec
    }

    pub fn precipitate(color: &str) -> Self {
        Self::new(OutcomeKind::Precipitate, Some(color))
    }

    pub fn observation(color: &str) -> Self {
        Self::new(OutcomeKind::Observation, Some(color))
    }

    pub fn no_reaction() -> Self {
        Self::new(OutcomeKind::NoReaction, None)
    }

    pub fn is_no_reaction(&self) -> bool {
        self.kind == OutcomeKind::NoReaction
    }

    /// Elimina color/RGB de un registro `NoReaction`. Devuelve `true` si
    /// tuvo que corregir algo.
    pub fn normalize(&mut self) -> bool {
        if self.is_no_reaction() && (self.color.is_some() || self.rgb.is_some()) {
            self.color = None;
            self.rgb = None;
            return true;
        }
        false
    }
}

fn kind_or_unknown<'de, D>(d: D) -> Result<OutcomeKind, D::Error>
    where D: Deserializer<'de>
{
    Ok(Option::<OutcomeKind>::deserialize(d)?.unwrap_or_default())
}

fn lenient_rgb<'de, D>(d: D) -> Result<Option<Rgb>, D::Error>
    where D: Deserializer<'de>
{
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(raw.as_ref().and_then(Rgb::from_json))
}

fn string_or_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
    where D: Deserializer<'de>
{
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => vec![s],
        Some(serde_json::Value::Array(items)) => items.into_iter()
                                                      .filter_map(|v| v.as_str().map(str::to_string))
                                                      .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_kind_names() {
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "ppt", "color": "white"})).unwrap();
        assert_eq!(r.kind, OutcomeKind::Precipitate);
        assert_eq!(r.color.as_deref(), Some("white"));
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "no-reaction"})).unwrap();
        assert!(r.is_no_reaction());
    }

    #[test]
    fn missing_or_odd_kind_is_unknown() {
        let r: OutcomeRecord = serde_json::from_value(json!({"color": "blue"})).unwrap();
        assert_eq!(r.kind, OutcomeKind::Unknown);
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "gas"})).unwrap();
        assert_eq!(r.kind, OutcomeKind::Unknown);
        let r: OutcomeRecord = serde_json::from_value(json!({"type": null})).unwrap();
        assert_eq!(r.kind, OutcomeKind::Unknown);
    }

    #[test]
    fn notes_accept_string_or_list() {
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "ppt", "notes": "in NH3 löslich"})).unwrap();
        assert_eq!(r.notes, vec!["in NH3 löslich".to_string()]);
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "ppt", "notes": ["a", 1, "b"]})).unwrap();
        assert_eq!(r.notes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn malformed_rgb_is_ignored() {
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "ppt", "rgb": [1, 2]})).unwrap();
        assert_eq!(r.rgb, None);
        let r: OutcomeRecord = serde_json::from_value(json!({"type": "ppt", "rgb": [10, 20, 30]})).unwrap();
        assert_eq!(r.rgb, Some(Rgb(10, 20, 30)));
    }

    #[test]
    fn no_reaction_never_keeps_color() {
        let r = OutcomeRecord::new(OutcomeKind::NoReaction, Some("blue"));
        assert_eq!(r.color, None);
        let mut raw: OutcomeRecord = serde_json::from_value(json!({"type": "no-reaction", "color": "red"})).unwrap();
        assert!(raw.normalize());
        assert_eq!(raw.color, None);
        assert!(!raw.normalize());
    }
}
