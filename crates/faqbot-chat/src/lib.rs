//! faqbot-chat
//!
//! The assistant around the matcher: canned fallbacks when nothing matches,
//! FAQ browsing, and an in-memory chat transcript with ratings.
pub mod assistant;
pub mod browse;
pub mod session;

pub use assistant::{decode_query, FaqAssistant, Reply};
pub use browse::{categories, FaqFilter};
pub use session::{ChatMessage, ChatSession, Rating, Sender};
