//! Study-session engine for pitch-accent vocabulary practice.
//!
//! Provides:
//! - Mora segmentation and pitch pattern levels for kana readings
//! - Pitch-accent distractor generation
//! - The fixed-ease spaced repetition scheduler
//! - The quiz session state machine and an async driver for it
//! - Shared types (Word, StudyItem, AnswerOption, etc.)

pub mod distractor;
pub mod driver;
pub mod error;
pub mod mora;
pub mod scheduler;
pub mod session;
pub mod shuffle;
pub mod source;
pub mod types;

pub use distractor::generate;
pub use driver::StudyDriver;
pub use error::{SourceError, SourceOperation};
pub use mora::{pitch_levels, segment, PitchLevel};
pub use scheduler::{advance, SchedulingResult};
pub use session::{Dispatch, Phase, Request, Response, Selection, Session, StudyQueue, Ticket};
pub use shuffle::{shuffle, study_rng, StudyRng};
pub use source::StudySource;
pub use types::{Answer, AnswerOption, LearnerId, QueueEntry, StudyItem, Word};
