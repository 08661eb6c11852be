//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Model Ports
//!
//! - `AIProvider` - Generative model completions
//!
//! ## Persistence Ports
//!
//! - `DialogueRepository` - Stored dialogues and favorites
//! - `PracticeStatsRepository` - Per-user practice counters
//!
//! ## Identity Ports
//!
//! - `SessionValidator` - Access token validation
//! - `IdentityProvider` - Email/password sign-in and sign-up

mod ai_provider;
mod dialogue_repository;
mod identity_provider;
mod practice_stats_repository;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use dialogue_repository::DialogueRepository;
pub use identity_provider::{AuthSession, IdentityProvider, SignUpOutcome};
pub use practice_stats_repository::PracticeStatsRepository;
pub use session_validator::SessionValidator;
