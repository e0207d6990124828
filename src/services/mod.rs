// Service exports
pub mod memory;
pub mod notify;
pub mod predictive;
pub mod store;

pub use memory::InMemoryStore;
pub use notify::{LogNotifier, NotificationKind, Notifier, WebhookNotifier};
pub use predictive::{
    HttpPredictiveService, NoopPredictive, PredictiveError, PredictiveService, RiskLevel,
    RoiPrediction,
};
pub use store::{CollaborationPatch, MatchStore, StoreError};
