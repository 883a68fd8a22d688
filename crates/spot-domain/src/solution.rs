use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Rgb;

/// Color con nombre y su RGB ya resuelto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub rgb: Rgb,
}

/// Una "pipeta" desconocida: par catión + anión con etiqueta secuencial.
/// Inmutable una vez creada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    index: usize,
    label: String,
    cation: String,
    anion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    intrinsic_color: Option<Swatch>,
}

impl Solution {
    /// `index` es el orden de generación (desde 0); la etiqueta es `P{index+1}`.
    pub fn new(index: usize, cation: impl Into<String>, anion: impl Into<String>, intrinsic_color: Option<Swatch>) -> Self {
        Solution { index,
                   label: format!("P{}", index + 1),
                   cation: cation.into(),
                   anion: anion.into(),
                   intrinsic_color }
    }

    pub fn index(&self) -> usize { self.index }
    pub fn label(&self) -> &str { &self.label }
    pub fn cation(&self) -> &str { &self.cation }
    pub fn anion(&self) -> &str { &self.anion }
    pub fn intrinsic_color(&self) -> Option<&Swatch> { self.intrinsic_color.as_ref() }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label, self.cation, self.anion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_follows_index() {
        let s = Solution::new(2, "Cu2+", "SO4 2-", None);
        assert_eq!(s.label(), "P3");
        assert_eq!(s.to_string(), "P3: Cu2+ SO4 2-");
    }

    #[test]
    fn serializes_camel_case() {
        let s = Solution::new(0, "Ni2+", "Cl-", Some(Swatch { name: "green".into(), rgb: Rgb(0, 128, 0) }));
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["intrinsicColor"]["rgb"], serde_json::json!([0, 128, 0]));
        assert_eq!(v["label"], "P1");
    }
}
