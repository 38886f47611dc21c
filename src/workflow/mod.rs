pub mod answer_flow;
pub mod question_ctx;
pub mod quiz_session;

pub use answer_flow::{AnswerFlow, ProcessResult};
pub use question_ctx::QuestionCtx;
pub use quiz_session::{QuizSession, QuizState};
