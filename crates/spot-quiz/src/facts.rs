//! Precarga de hechos para el tutor.
//!
//! Si el mensaje del usuario menciona un color, se adjuntan al contexto las
//! reacciones de la tabla que lo producen. El modelo sólo debe responder con
//! esos hechos; la llamada al servicio de completado queda fuera del crate
//! detrás de `CompletionClient`.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spot_domain::{OutcomeKind, ReactionTable};

use crate::QuizError;

/// Palabras clave de color, en orden de preferencia a igual posición.
pub const COLOR_KEYWORDS: [&str; 13] = ["white", "yellow", "orange", "brick-red", "brown", "black", "grey", "green", "blue",
                                        "purple", "pink", "red", "violet"];

/// Máximo de hechos adjuntados por defecto.
pub const FACTS_LIMIT: usize = 40;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const GUARD_INSTRUCTION: &str =
    "You must answer ONLY using the provided facts when relevant. If missing, say \"Not in the database\". Colors must be names.";

pub const SYSTEM_PROMPT: &str = r#"You are **ChemSpot**, a trainer for the Austrian Chemistry Olympiad spot-test table.
You must strictly adhere to the provided reaction database; never invent reactions or colors.

POLICY
- Colors: always named words (e.g., white, cream, yellow, gold-yellow, green, blue, deep-blue, violet, brown, black, brick-red).
  No RGB values. If the user gives an imprecise or wrong color, correct it and explain why the actual color occurs.
- Truth: if a reaction or pair is not in the database, reply: "Not in the database". Do not guess.
- Grading: Correct / Semi-correct / Incorrect. Semi-correct when ANY required reaction is missing in a list.
- Teaching style: motivating, patient, concise; provide the "why" behind colors/precipitates (complex/oxidation/solubility).
- Trick questions are allowed (e.g., Ag+ + SO4^2- gives no precipitate under stated conditions).

MODES
1) Ask-the-Tutor (Q&A): answer questions about spot tests, reactions, colors, and combinations.
2) Quiz:
   a) Pair to Color (may include traps with no reaction).
   b) Color to Reactions: user must list ALL reactions that yield a given color; grade as semi-correct if any are missing.
3) Realistic Learning Mode:
   - Provide 5-9 labeled pipettes with soluble salts/molecules/acids/bases (some intrinsically colored).
   - Show a reaction grid (each pair mixed) with precipitate/color/no-reaction results (plain table, no code).
   - Then guide identification stepwise; allow hints (hazards, obvious identifiers, molar mass).

FORMAT
When appropriate, use short headings:
**Prompt**: the task/question.
**Answer Check**: Correct / Semi-correct / Incorrect with bullet corrections.
**Mechanism/Equations**: net ionic or relevant steps.
**Safety**: brief PPE/handling notes when hazardous.
**Next**: a follow-up.

Obey the database strictly. If a fact is not in the facts provided by the server, say "Not in the database".
"#;

/// Primera palabra clave de color que aparece en `text` (sin distinguir
/// mayúsculas). A igual posición gana la que va antes en `COLOR_KEYWORDS`.
pub fn detect_color_mention(text: &str) -> Option<&'static str> {
    let lowered = text.to_ascii_lowercase();
    let bytes = lowered.as_bytes();
    (0..bytes.len()).find_map(|start| {
                        COLOR_KEYWORDS.iter()
                                      .copied()
                                      .find(|kw| bytes[start..].starts_with(kw.as_bytes()))
                    })
}

/// Una reacción de la tabla tal como se entrega al modelo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub cation: String,
    pub anion: String,
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<String>,
}

/// Reacciones cuyo color declarado es exactamente `color`, en orden de tabla.
pub fn list_by_color(table: &ReactionTable, color: &str) -> Vec<Fact> {
    table.pairs()
         .filter(|(_, _, r)| !r.is_no_reaction() && r.color.as_deref() == Some(color))
         .map(|(cation, anion, r)| Fact { cation: cation.to_string(),
                                          anion: anion.to_string(),
                                          kind: r.kind,
                                          color: r.color.clone(),
                                          notes: r.notes.clone(),
                                          eq: r.eq.clone() })
         .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage { role: Role::System,
                      content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage { role: Role::User,
                      content: content.into() }
    }
}

/// Petición completa para el servicio de completado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub instructions: String,
    pub input: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Serialize)]
struct FactsPayload<'a> {
    facts: &'a [Fact],
}

/// Contexto del tutor para un mensaje de usuario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorContext {
    pub user_text: String,
    pub color: Option<&'static str>,
    pub facts: Vec<Fact>,
}

impl TutorContext {
    pub fn build(table: &ReactionTable, user_text: &str) -> Self {
        Self::build_with_limit(table, user_text, FACTS_LIMIT)
    }

    pub fn build_with_limit(table: &ReactionTable, user_text: &str, limit: usize) -> Self {
        let color = detect_color_mention(user_text);
        let mut facts = color.map(|c| list_by_color(table, c)).unwrap_or_default();
        facts.truncate(limit);
        TutorContext { user_text: user_text.to_string(),
                       color,
                       facts }
    }

    /// Mensajes en orden: guardia, hechos, historial y mensaje del usuario.
    pub fn messages(&self, history: &[ChatMessage]) -> Result<Vec<ChatMessage>, QuizError> {
        let payload = FactsPayload { facts: &self.facts };
        let facts = serde_json::to_string(&payload).map_err(|e| QuizError::InvalidRequest(e.to_string()))?;
        let mut out = Vec::with_capacity(history.len() + 3);
        out.push(ChatMessage::system(GUARD_INSTRUCTION));
        out.push(ChatMessage::system(facts));
        out.extend(history.iter().cloned());
        out.push(ChatMessage::user(self.user_text.clone()));
        Ok(out)
    }

    pub fn request(&self, model: &str, history: &[ChatMessage]) -> Result<CompletionRequest, QuizError> {
        Ok(CompletionRequest { model: model.to_string(),
                               instructions: SYSTEM_PROMPT.to_string(),
                               input: self.messages(history)?,
                               temperature: DEFAULT_TEMPERATURE })
    }
}

/// Servicio externo que completa la conversación.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, QuizError>;
}

/// Arma el contexto y delega en el cliente.
pub async fn ask<C>(client: &C, table: &ReactionTable, model: &str, history: &[ChatMessage], user_text: &str) -> Result<String, QuizError>
    where C: CompletionClient + ?Sized
{
    let request = TutorContext::build(table, user_text).request(model, history)?;
    client.complete(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn table() -> ReactionTable {
        ReactionTable::from_json_value(json!({
            "inorganic": {
                "Ag+": {
                    "Cl-": {"type": "ppt", "color": "white"},
                    "I-": {"type": "ppt", "color": "yellow", "notes": ["in NH3 unlöslich"]},
                    "SO4 2-": {"type": "no-reaction"}
                },
                "Pb2+": {"I-": {"type": "ppt", "color": "yellow"}},
                "Fe3+": {"SCN-": {"type": "observation", "color": "red"}}
            }
        })).unwrap()
    }

    #[test]
    fn detects_leftmost_color() {
        assert_eq!(detect_color_mention("Which give a YELLOW or white ppt?"), Some("yellow"));
        assert_eq!(detect_color_mention("brick-red flame"), Some("brick-red"));
        assert_eq!(detect_color_mention("nothing here"), None);
        assert_eq!(detect_color_mention(""), None);
        // "red" dentro de otra palabra también cuenta
        assert_eq!(detect_color_mention("it was covered"), Some("red"));
    }

    #[test]
    fn non_ascii_text_is_safe() {
        assert_eq!(detect_color_mention("Lösung → grün? nein, green"), Some("green"));
    }

    #[test]
    fn facts_by_color_in_table_order() {
        let facts = list_by_color(&table(), "yellow");
        let pairs: Vec<(&str, &str)> = facts.iter().map(|f| (f.cation.as_str(), f.anion.as_str())).collect();
        assert_eq!(pairs, vec![("Ag+", "I-"), ("Pb2+", "I-")]);
        assert_eq!(facts[0].notes, vec!["in NH3 unlöslich".to_string()]);
        assert!(list_by_color(&table(), "cyan").is_empty());
    }

    #[test]
    fn context_respects_limit() {
        let ctx = TutorContext::build_with_limit(&table(), "yellow ones?", 1);
        assert_eq!(ctx.color, Some("yellow"));
        assert_eq!(ctx.facts.len(), 1);
        let none = TutorContext::build(&table(), "hello");
        assert!(none.facts.is_empty());
    }

    #[test]
    fn messages_order() {
        let ctx = TutorContext::build(&table(), "red?");
        let history = vec![ChatMessage { role: Role::Assistant,
                                         content: "hi".into() }];
        let msgs = ctx.messages(&history).unwrap();
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0].content, GUARD_INSTRUCTION);
        let facts: serde_json::Value = serde_json::from_str(&msgs[1].content).unwrap();
        assert_eq!(facts["facts"][0]["cation"], "Fe3+");
        assert_eq!(msgs[2].role, Role::Assistant);
        assert_eq!(msgs[3], ChatMessage::user("red?"));
    }

    struct RecordingClient {
        seen: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, QuizError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.clone());
            }
            Ok("Not in the database".to_string())
        }
    }

    #[tokio::test]
    async fn ask_forwards_prompt_and_facts() {
        let client = RecordingClient { seen: Mutex::new(Vec::new()) };
        let text = ask(&client, &table(), "gpt-4o-mini", &[], "white ppt?").await.unwrap();
        assert_eq!(text, "Not in the database");
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].instructions, SYSTEM_PROMPT);
        assert_eq!(seen[0].temperature, DEFAULT_TEMPERATURE);
        assert!(seen[0].input[1].content.contains("Cl-"));
    }
}
