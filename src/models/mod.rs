pub mod bank;
pub mod loaders;
pub mod question;
pub mod quiz;

pub use bank::{MergeOutcome, QuestionBank};
pub use loaders::{load_bank, save_bank, BankLoad};
pub use question::{letter_for, index_for, QuestionOption, QuestionRecord, LETTERS, MAX_OPTIONS};
pub use quiz::{GradeResult, QuestionOutcome, QuizSample, UserAnswerState};
