use std::fmt;
use std::sync::{Arc, Mutex};

use ap_core::{reading_time, CandidateArticle, Category, Error, GenerationBackend};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

pub mod parse;
pub mod templates;
pub mod topics;

pub use parse::{parse_response, ArticleDraft};
pub use templates::fallback_article;
pub use topics::{pick_tags, pick_topic, TopicChoice};

/// Anything that can hand out candidate articles. Generation never fails.
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self) -> CandidateArticle;
}

pub fn build_prompt(topic: &str, category: Category) -> String {
    format!(
        "Write a professional blog article about \"{topic}\" in the {category} sector.

Requirements:
- Title should be engaging and SEO-friendly
- Include 6-8 paragraphs of substantive content
- Be informative and well-structured
- Write in a professional but accessible tone

Format your response as:
TITLE: [Your title here]
SUMMARY: [A 1-2 sentence summary]
CONTENT:
[Your article content here]"
    )
}

/// Produces candidates from a backend, falling back to the local templates
/// whenever the backend fails or answers in an unexpected shape.
pub struct ContentGenerator {
    backend: Arc<dyn GenerationBackend>,
    rng: Mutex<StdRng>,
}

impl fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl ContentGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    pub fn with_rng(backend: Arc<dyn GenerationBackend>, rng: StdRng) -> Self {
        Self {
            backend,
            rng: Mutex::new(rng),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    fn with_rng_locked<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    async fn draft(&self, choice: &TopicChoice) -> ArticleDraft {
        let prompt = build_prompt(choice.topic, choice.category);
        let result = match self.backend.complete(&prompt).await {
            Ok(text) => parse_response(&text),
            Err(e) => Err(e),
        };

        match result {
            Ok(draft) => draft,
            Err(e @ Error::UnparseableResponse(_)) => {
                warn!(target: "ai", error = %e, "Could not parse AI response, using fallback");
                fallback_article(choice, Utc::now().year())
            }
            Err(e) => {
                warn!(target: "ai", error = %e, "AI generation failed, using fallback");
                fallback_article(choice, Utc::now().year())
            }
        }
    }
}

#[async_trait]
impl ArticleGenerator for ContentGenerator {
    async fn generate(&self) -> CandidateArticle {
        let choice = self.with_rng_locked(|rng| pick_topic(rng));
        info!(
            target: "ai",
            topic = choice.topic,
            category = %choice.category,
            "Generating article about: {} ({})",
            choice.topic,
            choice.category
        );

        let draft = self.draft(&choice).await;
        let tags = self.with_rng_locked(|rng| pick_tags(choice.category, rng));

        CandidateArticle {
            reading_time: reading_time(&draft.content),
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            category: choice.category,
            tags,
            generator_name: self.backend.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::topics::tag_pool;
    use crate::models::DummyModel;
    use ap_core::Result;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend returning a fixed answer and recording the prompts it saw.
    #[derive(Debug)]
    struct Canned {
        answer: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(answer: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for Canned {
        fn name(&self) -> &str {
            "HuggingFace"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer
                .map(str::to_string)
                .ok_or_else(|| Error::BackendUnavailable("connection refused".to_string()))
        }
    }

    fn generator(backend: Arc<Canned>, seed: u64) -> ContentGenerator {
        ContentGenerator::with_rng(backend, StdRng::seed_from_u64(seed))
    }

    fn assert_tags_valid(candidate: &CandidateArticle) {
        assert_eq!(candidate.tags.len(), 3);
        assert_eq!(candidate.tags.iter().collect::<HashSet<_>>().len(), 3);
        let pool = tag_pool(candidate.category);
        assert!(candidate.tags.iter().all(|t| pool.contains(&t.as_str())));
    }

    #[test]
    fn test_prompt_names_topic_and_format() {
        let prompt = build_prompt("robotics", Category::Innovation);
        assert!(prompt.starts_with("Write a professional blog article about \"robotics\" in the Innovation sector."));
        for label in ["TITLE:", "SUMMARY:", "CONTENT:"] {
            assert!(prompt.contains(label));
        }
    }

    #[tokio::test]
    async fn test_parsed_response_is_used() {
        let backend = Canned::new(Some(
            "TITLE: Quantum Computing Today\nSUMMARY: Qubits grow up.\nCONTENT:\nOne two three four.",
        ));
        let candidate = generator(backend.clone(), 3).generate().await;

        assert_eq!(candidate.title, "Quantum Computing Today");
        assert_eq!(candidate.summary, "Qubits grow up.");
        assert_eq!(candidate.content, "One two three four.");
        assert_eq!(candidate.reading_time, 1);
        assert_eq!(candidate.generator_name, "HuggingFace");
        assert_tags_valid(&candidate);

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(&format!("in the {} sector", candidate.category)));
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back() {
        let backend = Canned::new(None);
        let generator = generator(backend.clone(), 11);
        for _ in 0..25 {
            let candidate = generator.generate().await;
            assert!(
                candidate.title.starts_with("The Future of")
                    || candidate.title.starts_with("Understanding")
            );
            assert!(candidate.summary.starts_with("An in-depth exploration of"));
            assert!(candidate.reading_time >= 3);
            assert_eq!(candidate.reading_time, reading_time(&candidate.content));
            assert_eq!(
                candidate.reading_time as usize,
                candidate.content.split_whitespace().count().div_ceil(200)
            );
            assert_tags_valid(&candidate);
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 25);
    }

    #[tokio::test]
    async fn test_missing_content_label_keeps_backend_provenance() {
        let backend = Canned::new(Some("TITLE: Half an answer\nSUMMARY: Nothing follows."));
        let candidate = generator(backend, 5).generate().await;

        assert_ne!(candidate.title, "Half an answer");
        assert!(candidate.reading_time >= 3);
        assert_eq!(candidate.generator_name, "HuggingFace");
    }

    #[tokio::test]
    async fn test_seeded_generators_agree() {
        let a = generator(Canned::new(None), 99).generate().await;
        let b = generator(Canned::new(None), 99).generate().await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_dummy_backend_end_to_end() {
        let generator = ContentGenerator::new(Arc::new(DummyModel::new()));
        let candidate = generator.generate().await;
        assert!(candidate.title.starts_with("Field Notes on"));
        assert_eq!(candidate.generator_name, "Dummy");
        assert_eq!(generator.backend_name(), "Dummy");
    }
}
