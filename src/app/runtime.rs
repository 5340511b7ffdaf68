use crate::config::Config;
use crate::intent::{ClassifierGateway, IntentRouter};
use crate::llm::{GeminiProvider, Provider};
use crate::media::{BinaryStore, CloudinaryStore};
use crate::publishing::{
    ContentGenerator, FacebookPublisher, PostService, Publisher, UniquenessOracle,
};
use crate::scheduler::DeferredScheduler;
use std::sync::Arc;

/// Everything one process needs to handle chat turns, wired from config.
pub struct PilotRuntime {
    pub router: Arc<IntentRouter>,
    pub posts: Arc<PostService>,
    pub scheduler: Arc<DeferredScheduler>,
    pub media: Option<Arc<dyn BinaryStore>>,
}

impl PilotRuntime {
    /// Gemini + Graph API + Cloudinary (when configured).
    pub fn from_config(config: &Config) -> Self {
        let provider = GeminiProvider::with_base_url(
            config.api_key.as_deref(),
            &config.llm.base_url,
            config.llm.timeout_secs,
        );
        if !provider.has_api_key() {
            tracing::warn!("no Gemini API key configured; every generation call will fail");
        }
        let publisher = FacebookPublisher::from_config(&config.publishing);
        let media: Option<Arc<dyn BinaryStore>> = match CloudinaryStore::from_config(&config.media)
        {
            Ok(store) => Some(Arc::new(store)),
            Err(error) => {
                tracing::info!(%error, "image uploads disabled");
                None
            }
        };

        Self::with_backends(config, Arc::new(provider), Arc::new(publisher), media)
    }

    pub fn with_backends(
        config: &Config,
        provider: Arc<dyn Provider>,
        publisher: Arc<dyn Publisher>,
        media: Option<Arc<dyn BinaryStore>>,
    ) -> Self {
        let classifier = Arc::new(ClassifierGateway::new(
            provider,
            config.default_model.clone(),
            config.default_temperature,
        ));
        let generator = ContentGenerator::new(
            UniquenessOracle::new(Arc::clone(&publisher)),
            Arc::clone(&classifier),
            config.publishing.business_description.clone(),
        );
        let posts = Arc::new(PostService::new(publisher, generator));
        let scheduler = Arc::new(DeferredScheduler::new(posts.clone()));
        let router = Arc::new(IntentRouter::new(
            classifier,
            Arc::clone(&posts),
            Arc::clone(&scheduler),
            config.scheduler.content_policy,
        ));

        Self {
            router,
            posts,
            scheduler,
            media,
        }
    }
}
