// spot-quiz: preguntas de práctica y contexto del tutor sobre la tabla.
pub mod error;
pub mod facts;
pub mod quiz;

pub use error::QuizError;
pub use facts::{ask, detect_color_mention, list_by_color, ChatMessage, CompletionClient, CompletionRequest, Fact, Role,
                TutorContext};
pub use quiz::{QuizGenerator, QuizMode, QuizQuestion, QuizRequest};
