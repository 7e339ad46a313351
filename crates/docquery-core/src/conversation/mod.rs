pub mod model;
pub mod session;

pub use model::ConversationTurn;
pub use session::{ConversationSession, SessionPhase};
