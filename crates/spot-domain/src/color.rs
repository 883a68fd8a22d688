//! Vocabulario cerrado de colores y su traducción aproximada a RGB.
//!
//! Los nombres se resuelven contra una tabla fija; un nombre desconocido
//! nunca produce un color "adivinado", simplemente no resuelve.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Palabra de relleno que algunas tablas usan en lugar de un color real.
pub const PLACEHOLDER: &str = "color";

/// Color RGB de 8 bits por canal. Se serializa como `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn is_white(&self) -> bool {
        *self == Rgb::WHITE
    }

    /// Cuantiza cada canal dividiendo por `size` y redondeando, de modo que
    /// tonos casi idénticos caen en el mismo cubo.
    pub fn bucket(&self, size: u8) -> (u8, u8, u8) {
        let size = f64::from(size.max(1));
        let q = |c: u8| (f64::from(c) / size).round() as u8;
        (q(self.0), q(self.1), q(self.2))
    }

    /// Interpreta un valor JSON `[r, g, b]`; cualquier otra forma es `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Rgb> {
        let arr = value.as_array()?;
        if arr.len() != 3 {
            return None;
        }
        let mut ch = [0u8; 3];
        for (slot, v) in ch.iter_mut().zip(arr) {
            *slot = u8::try_from(v.as_u64()?).ok()?;
        }
        Some(Rgb(ch[0], ch[1], ch[2]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

static NAME_TO_RGB: Lazy<HashMap<&'static str, Rgb>> = Lazy::new(|| {
    HashMap::from([("white", Rgb(255, 255, 255)),
                   ("off-white", Rgb(248, 248, 244)),
                   ("cream", Rgb(245, 236, 200)),
                   ("yellow", Rgb(255, 230, 0)),
                   ("gold-yellow", Rgb(255, 204, 0)),
                   ("orange", Rgb(255, 165, 0)),
                   ("brick-red", Rgb(178, 34, 34)),
                   ("brown", Rgb(120, 72, 0)),
                   ("black", Rgb(0, 0, 0)),
                   ("grey", Rgb(128, 128, 128)),
                   ("gray", Rgb(128, 128, 128)),
                   ("green", Rgb(0, 128, 0)),
                   ("blue", Rgb(0, 102, 204)),
                   ("deep-blue", Rgb(0, 51, 153)),
                   ("violet", Rgb(138, 43, 226)),
                   ("purple", Rgb(128, 0, 128)),
                   ("pink", Rgb(255, 105, 180)),
                   ("red", Rgb(220, 0, 0)),
                   ("cyan", Rgb(0, 180, 200))])
});

/// Busca un nombre en la tabla fija nombre→RGB (sin consultar vocabulario).
pub fn named_rgb(name: &str) -> Option<Rgb> {
    if name == PLACEHOLDER {
        return None;
    }
    NAME_TO_RGB.get(name).copied()
}

/// Nombres conocidos por la tabla fija.
pub fn known_names() -> impl Iterator<Item = &'static str> {
    NAME_TO_RGB.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_rgb_fails_closed() {
        assert_eq!(named_rgb("blue"), Some(Rgb(0, 102, 204)));
        assert_eq!(named_rgb("color"), None);
        assert_eq!(named_rgb("chartreuse"), None);
        assert_eq!(named_rgb("Blue"), None);
    }

    #[test]
    fn bucket_merges_close_shades() {
        assert_eq!(named_rgb("grey").unwrap().bucket(24), named_rgb("gray").unwrap().bucket(24));
        assert_eq!(Rgb(0, 0, 0).bucket(24), (0, 0, 0));
        assert_eq!(Rgb(12, 11, 255).bucket(24), (1, 0, 11));
        assert_ne!(named_rgb("red").unwrap().bucket(24), named_rgb("brick-red").unwrap().bucket(24));
    }

    #[test]
    fn rgb_from_json_requires_three_bytes() {
        assert_eq!(Rgb::from_json(&json!([1, 2, 3])), Some(Rgb(1, 2, 3)));
        assert_eq!(Rgb::from_json(&json!([1, 2])), None);
        assert_eq!(Rgb::from_json(&json!([1, 2, 300])), None);
        assert_eq!(Rgb::from_json(&json!("red")), None);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Rgb(255, 165, 0).to_string(), "#ffa500");
    }
}
