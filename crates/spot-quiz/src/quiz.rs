//! Generador de preguntas sobre la tabla de reacciones.
//!
//! Dos modos:
//! - `pair-to-color`: se elige un par (catión, anión) y se pregunta qué
//!   ocurre. Con trampas activas, un 30 % de las veces el par elegido es un
//!   `no-reaction` explícito.
//! - `color-to-reactions`: se elige un color y hay que listar todas las
//!   reacciones que lo producen.
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use spot_domain::{OutcomeKind, OutcomeRecord, ReactionTable};

use crate::QuizError;

/// Probabilidad de plantear una pregunta trampa.
pub const TRAP_PROBABILITY: f64 = 0.3;

/// Respuestas aceptadas como "no hay reacción".
pub const NO_REACTION_ANSWERS: [&str; 4] = ["no reaction", "no-reaction", "none", "—"];

pub const COLOR_LIST_NOTE: &str = "Semi-correct if you miss any combinations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    #[default]
    PairToColor,
    ColorToReactions,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::PairToColor => "pair-to-color",
            QuizMode::ColorToReactions => "color-to-reactions",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizMode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pair-to-color" => Ok(QuizMode::PairToColor),
            "color-to-reactions" => Ok(QuizMode::ColorToReactions),
            other => Err(QuizError::UnknownMode(other.to_string())),
        }
    }
}

/// Cuerpo de una petición de quiz. Ambos campos son opcionales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_traps")]
    pub traps: bool,
}

fn default_mode() -> String {
    QuizMode::PairToColor.as_str().to_string()
}

fn default_traps() -> bool {
    true
}

impl Default for QuizRequest {
    fn default() -> Self {
        QuizRequest { mode: default_mode(),
                      traps: default_traps() }
    }
}

impl QuizRequest {
    pub fn from_json(body: &serde_json::Value) -> Result<Self, QuizError> {
        serde_json::from_value(body.clone()).map_err(|e| QuizError::InvalidRequest(e.to_string()))
    }

    pub fn mode(&self) -> Result<QuizMode, QuizError> {
        self.mode.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grading {
    pub accept: Vec<String>,
    pub color_must_match: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum QuizQuestion {
    PairToColor {
        prompt: String,
        cation: String,
        anion: String,
        expected: ExpectedOutcome,
        grading: Grading,
    },
    ColorToReactions {
        prompt: String,
        color: String,
        answers: Vec<String>,
        note: String,
    },
}

impl QuizQuestion {
    pub fn mode(&self) -> QuizMode {
        match self {
            QuizQuestion::PairToColor { .. } => QuizMode::PairToColor,
            QuizQuestion::ColorToReactions { .. } => QuizMode::ColorToReactions,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            QuizQuestion::PairToColor { prompt, .. } | QuizQuestion::ColorToReactions { prompt, .. } => prompt,
        }
    }
}

type Pair<'t> = (&'t str, &'t str, &'t OutcomeRecord);

#[derive(Debug, Clone, Copy)]
pub struct QuizGenerator<'t> {
    table: &'t ReactionTable,
}

impl<'t> QuizGenerator<'t> {
    pub fn new(table: &'t ReactionTable) -> Self {
        Self { table }
    }

    /// Pares con reacción y un nombre de color válido.
    pub fn colored_pairs(&self) -> Vec<Pair<'t>> {
        self.table
            .pairs()
            .filter(|(_, _, r)| !r.is_no_reaction() && r.color.as_deref().is_some_and(|c| self.table.is_valid_color_name(c)))
            .collect()
    }

    pub fn no_reaction_pairs(&self) -> Vec<Pair<'t>> {
        self.table.pairs().filter(|(_, _, r)| r.is_no_reaction()).collect()
    }

    /// Respuestas `"{catión} + {anión}"` agrupadas por color, en orden de
    /// primera aparición.
    pub fn reactions_by_color(&self) -> Vec<(&'t str, Vec<String>)> {
        let mut groups: Vec<(&'t str, Vec<String>)> = Vec::new();
        for (cation, anion, record) in self.colored_pairs() {
            let Some(color) = record.color.as_deref() else { continue };
            let answer = format!("{cation} + {anion}");
            match groups.iter_mut().find(|(c, _)| *c == color) {
                Some((_, answers)) => answers.push(answer),
                None => groups.push((color, vec![answer])),
            }
        }
        groups
    }

    pub fn generate<R>(&self, request: &QuizRequest, rng: &mut R) -> Result<QuizQuestion, QuizError>
        where R: Rng + ?Sized
    {
        match request.mode()? {
            QuizMode::PairToColor => self.pair_to_color(request.traps, rng),
            QuizMode::ColorToReactions => self.color_to_reactions(rng),
        }
    }

    pub fn pair_to_color<R>(&self, traps: bool, rng: &mut R) -> Result<QuizQuestion, QuizError>
        where R: Rng + ?Sized
    {
        let traps_pool = self.no_reaction_pairs();
        let pick_trap = traps && rng.gen_bool(TRAP_PROBABILITY) && !traps_pool.is_empty();
        let pool = if pick_trap { traps_pool } else { self.colored_pairs() };
        let &(cation, anion, record) =
            pool.choose(rng).ok_or_else(|| QuizError::NoCandidates(QuizMode::PairToColor.to_string()))?;

        let expected = if record.is_no_reaction() {
            ExpectedOutcome { kind: OutcomeKind::NoReaction,
                              color: None }
        } else {
            ExpectedOutcome { kind: record.kind,
                              color: record.color.clone() }
        };
        let grading = Grading { accept: NO_REACTION_ANSWERS.iter().map(|s| s.to_string()).collect(),
                                color_must_match: expected.color.is_some() };
        Ok(QuizQuestion::PairToColor { prompt: format!("What happens when {cation} mixes with {anion}?"),
                                       cation: cation.to_string(),
                                       anion: anion.to_string(),
                                       expected,
                                       grading })
    }

    pub fn color_to_reactions<R>(&self, rng: &mut R) -> Result<QuizQuestion, QuizError>
        where R: Rng + ?Sized
    {
        let groups = self.reactions_by_color();
        let (color, answers) =
            groups.choose(rng).ok_or_else(|| QuizError::NoCandidates(QuizMode::ColorToReactions.to_string()))?;
        Ok(QuizQuestion::ColorToReactions { prompt: format!("List ALL reactions that give the color: {color}."),
                                            color: color.to_string(),
                                            answers: answers.clone(),
                                            note: COLOR_LIST_NOTE.to_string() })
    }
}
