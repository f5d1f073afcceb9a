//! Fixed category/topic and tag tables, and the random selections over them.

use ap_core::Category;
use rand::seq::SliceRandom;
use rand::Rng;

pub const TAGS_PER_ARTICLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicChoice {
    pub category: Category,
    pub topic_index: usize,
    pub topic: &'static str,
}

pub fn topics_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technology => &[
            "artificial intelligence",
            "cloud computing",
            "cybersecurity",
            "blockchain",
            "software development",
            "quantum computing",
            "edge computing",
            "5G networks",
        ],
        Category::Science => &[
            "space exploration",
            "climate science",
            "biotechnology",
            "renewable energy",
            "neuroscience",
            "particle physics",
            "genetics",
            "marine biology",
        ],
        Category::Innovation => &[
            "startup ecosystem",
            "sustainable technology",
            "smart cities",
            "digital transformation",
            "automation",
            "internet of things",
            "robotics",
            "augmented reality",
        ],
        Category::Business => &[
            "future of work",
            "digital marketing",
            "e-commerce trends",
            "venture capital",
            "remote collaboration",
            "business analytics",
            "supply chain innovation",
            "fintech",
        ],
        Category::Health => &[
            "personalized medicine",
            "mental health technology",
            "telemedicine",
            "wearable health devices",
            "genomic medicine",
            "health data analytics",
            "drug discovery",
            "preventive healthcare",
        ],
    }
}

pub fn tag_pool(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technology => &[
            "AI",
            "Machine Learning",
            "Cloud",
            "DevOps",
            "Security",
            "Data",
            "APIs",
            "Programming",
            "Infrastructure",
            "Automation",
        ],
        Category::Science => &[
            "Research",
            "Discovery",
            "Environment",
            "Physics",
            "Biology",
            "Chemistry",
            "Space",
            "Climate",
            "Innovation",
            "Sustainability",
        ],
        Category::Innovation => &[
            "Startups",
            "Disruption",
            "Future Tech",
            "Smart Solutions",
            "IoT",
            "Digital",
            "Transformation",
            "Trends",
            "Emerging Tech",
            "R&D",
        ],
        Category::Business => &[
            "Strategy",
            "Growth",
            "Leadership",
            "Analytics",
            "Finance",
            "Marketing",
            "Enterprise",
            "Productivity",
            "Remote Work",
            "E-commerce",
        ],
        Category::Health => &[
            "Wellness",
            "Medical Tech",
            "Healthcare",
            "Biotech",
            "Fitness",
            "Mental Health",
            "Diagnostics",
            "Treatment",
            "Prevention",
            "Research",
        ],
    }
}

/// Uniform over categories, then uniform over that category's topics.
pub fn pick_topic<R: Rng + ?Sized>(rng: &mut R) -> TopicChoice {
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    let topics = topics_for(category);
    let topic_index = rng.gen_range(0..topics.len());
    TopicChoice {
        category,
        topic_index,
        topic: topics[topic_index],
    }
}

/// Shuffle the category's pool and keep the first three.
pub fn pick_tags<R: Rng + ?Sized>(category: Category, rng: &mut R) -> Vec<String> {
    let mut pool = tag_pool(category).to_vec();
    pool.shuffle(rng);
    pool.into_iter()
        .take(TAGS_PER_ARTICLE)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_tables_are_well_formed() {
        for category in Category::ALL {
            let pool = tag_pool(category);
            assert!(pool.len() >= TAGS_PER_ARTICLE);
            assert_eq!(pool.iter().collect::<HashSet<_>>().len(), pool.len());
            assert!(!topics_for(category).is_empty());
        }
    }

    #[test]
    fn test_pick_tags_draws_three_distinct_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            for category in Category::ALL {
                let tags = pick_tags(category, &mut rng);
                assert_eq!(tags.len(), 3);
                assert_eq!(tags.iter().collect::<HashSet<_>>().len(), 3);
                assert!(tags.iter().all(|t| tag_pool(category).contains(&t.as_str())));
            }
        }
    }

    #[test]
    fn test_pick_topic_is_seed_deterministic() {
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| pick_topic(&mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| pick_topic(&mut rng)).collect()
        };
        assert_eq!(a, b);
        for choice in a {
            assert_eq!(topics_for(choice.category)[choice.topic_index], choice.topic);
        }
    }

    #[test]
    fn test_pick_topic_covers_every_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<_> = (0..500).map(|_| pick_topic(&mut rng).category).collect();
        assert_eq!(seen.len(), Category::ALL.len());
    }
}
