pub mod completion;
pub mod email;
pub mod enrichment;
pub mod normalizer;
pub mod prompt;
pub mod recommendations;
pub mod video_search;

pub use completion::{CompletionBackend, CompletionClient, GeminiBackend};
pub use email::{Mailer, SmtpMailTransport};
pub use enrichment::{CostEnricher, CostService, TravelCostClient};
pub use recommendations::RecommendationPipeline;
pub use video_search::{VideoProvider, VideoSearch, YoutubeProvider};
