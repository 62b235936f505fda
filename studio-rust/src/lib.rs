mod chat;
pub mod config;
pub mod content;
mod content_type;
mod errors;
pub mod history;
pub mod input;
pub mod keystone;
pub mod parse;
mod payload;
mod session;
pub mod strategies;
pub mod video;

pub use chat::BrandChat;
pub use config::{StudioConfig, StudioConfigBuilder};
pub use content::GeneratedContent;
pub use content_type::{ContentType, TaskType};
pub use errors::{HistoryError, StudioError, StudioResult};
pub use history::{FileHistoryStore, HistoryItem, HistoryStore, MemoryHistoryStore};
pub use input::GenerationInput;
pub use payload::{
    AmpArticleDetails, BusinessPostDetails, EmailDetails, SeoBlogDetails, WebhookPayload,
};
pub use session::{GenerationSession, SessionState};
pub use strategies::{strategy_for, GenerationStrategy};
pub use video::VideoStream;
