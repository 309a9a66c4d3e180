use ragbasic_core::Config;

use crate::rag::RagService;

pub struct AppState {
    pub config: Config,
    /// `None` when no embedding backend could be built; retrieval routes return 503.
    pub rag: Option<RagService>,
}
