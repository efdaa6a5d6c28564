mod auth;
mod json;
mod preference;
mod recommendation;

pub use auth::TokenManager;
pub use json::StoreError;
pub use preference::PreferenceStore;
pub use recommendation::RecommendationStore;
