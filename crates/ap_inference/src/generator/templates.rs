//! Local article templates used when the backend cannot be used.
//!
//! Placeholders: `{topic}`, `{Topic}` (first letter capitalised), `{Title}`
//! (title case), `{category}`, `{category_lower}` and `{year}`.

use ap_core::Category;

use super::parse::ArticleDraft;
use super::topics::TopicChoice;

#[derive(Debug)]
pub struct FallbackTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const SUMMARY_TEMPLATE: &str = "An in-depth exploration of {topic} and its impact on the {category_lower} landscape, examining current trends, challenges, and future opportunities.";

pub static FALLBACK_TEMPLATES: [FallbackTemplate; 2] = [
    FallbackTemplate {
        id: "outlook",
        title: "The Future of {Title}: Trends and Insights for {year}",
        body: "Few fields are moving as quickly as {topic}. Over the course of {year}, a series of practical breakthroughs has pushed it out of research labs and pilot programs and into the everyday operations of organizations of every size, changing what teams expect from their tools and from each other.

The speed of this shift is striking. Projects that once took years of planning now move from idea to production in a matter of months. Leaders who treated {topic} as a distant experiment are discovering that competitors have already built it into their products, their supply chains, and their customer relationships.

A defining trend this year is a stronger focus on responsible adoption. Practitioners are asking not only what {topic} can do but who benefits from it, how its risks are governed, and how its results can be explained to the people affected by them. Careful implementation is becoming a competitive advantage rather than a constraint.

{Topic} is also increasingly combined with neighbouring disciplines. When it meets better data infrastructure, cheaper sensors, or more capable software platforms, the results are often greater than the sum of their parts. These combinations are opening applications in education, finance, logistics, and public services that were hard to imagine only recently.

Investment reflects this momentum. Public research budgets and private capital alike are flowing toward {topic}, funding new companies, laboratories, and training programs. That money shortens the distance between discovery and deployment, which in turn attracts further investment and talent to the {category_lower} sector.

The effect on work is significant. New roles are appearing that blend technical depth with domain knowledge, while many existing jobs are being reshaped rather than replaced. Universities, bootcamps, and employers are all redesigning their courses to prepare people for the skills that {topic} now demands.

Collaboration remains essential. The hardest problems in {topic} cross borders and disciplines, and no single organization has every answer. Shared standards, open research, and partnerships between industry and academia are helping the whole community move faster and avoid repeating the same mistakes.

There are still obstacles. Costs can be high, expertise is scarce, and regulation is evolving. Organizations that start with focused, well-measured projects tend to learn faster than those that attempt sweeping change all at once, and they build the internal confidence needed for larger efforts.

Looking beyond {year}, the trajectory of {topic} points toward deeper integration with how we live and work. The coming years will reward those who stay curious, invest in people as much as in technology, and treat every deployment as an opportunity to learn something new.",
    },
    FallbackTemplate {
        id: "guide",
        title: "Understanding {Title}: A Comprehensive Guide",
        body: "{Topic} has become one of the central subjects in the {category_lower} world. This guide walks through what it is, why it matters, where it is being used, and what anyone hoping to understand or adopt it should keep in mind along the way.

At its heart, {topic} is a new way of approaching familiar problems. Its core ideas have been refined through decades of research and practice, producing methods that are rigorous enough for demanding environments yet flexible enough to adapt to very different goals and constraints.

The range of applications is wide. Some organizations use {topic} to remove friction from existing processes, while others build entirely new products and services around it. Even sectors that once seemed insulated from change are finding that the ideas behind {topic} apply to their work as well.

Understanding the foundations pays off. The vocabulary can feel intimidating at first, but the underlying concepts are approachable for anyone willing to spend some time with them. Courses, open documentation, community forums, and hands-on tutorials have never been easier to find.

An ecosystem has grown up around {topic}. Vendors, consultants, researchers, and independent practitioners now form a lively network that shares tools and lessons. This community accelerates improvement, because each successful project leaves behind knowledge that the next team can reuse and extend.

Adoption is not without difficulty. Budgets, technical complexity, and a shortage of experienced people still slow many organizations down. These barriers are easing as tools mature, as best practices are written down, and as more professionals gain direct experience with real deployments.

Measurement deserves attention from the start. Teams that define what success looks like before they begin, and that track both the benefits and the costs of {topic} over time, find it far easier to decide where to expand, where to pause, and where a different approach would serve them better.

Policy is part of the picture too. Regulators are working out how to encourage progress in {topic} while protecting consumers and the public interest. Teams that follow these discussions closely and design with compliance in mind avoid costly rework later on.

Early adopters offer useful lessons. Successful programs usually have committed sponsors, begin with a narrow pilot that has clear success measures, and invest steadily in training. Just as importantly, they treat setbacks as information and keep adjusting their approach as they learn.

Going forward, {topic} will likely become part of the background of daily life and business, much as earlier waves of {category_lower} change did before it. Those who build a solid understanding now will be well placed to shape how it develops through {year} and beyond.",
    },
];

/// Static lookup from a topic selection to its template.
pub fn template_for(choice: &TopicChoice) -> &'static FallbackTemplate {
    let index = (choice.category as usize + choice.topic_index) % FALLBACK_TEMPLATES.len();
    &FALLBACK_TEMPLATES[index]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

pub fn render(text: &str, topic: &str, category: Category, year: i32) -> String {
    text.replace("{Title}", &title_case(topic))
        .replace("{Topic}", &capitalize(topic))
        .replace("{topic}", topic)
        .replace("{category_lower}", &category.as_str().to_lowercase())
        .replace("{category}", category.as_str())
        .replace("{year}", &year.to_string())
}

/// Build an article from the local template table. Deterministic for a given
/// choice and year.
pub fn fallback_article(choice: &TopicChoice, year: i32) -> ArticleDraft {
    let template = template_for(choice);
    ArticleDraft {
        title: render(template.title, choice.topic, choice.category, year),
        summary: render(SUMMARY_TEMPLATE, choice.topic, choice.category, year),
        content: render(template.body, choice.topic, choice.category, year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::topics::topics_for;
    use ap_core::reading_time;

    fn choice(category: Category, topic_index: usize) -> TopicChoice {
        TopicChoice {
            category,
            topic_index,
            topic: topics_for(category)[topic_index],
        }
    }

    #[test]
    fn test_templates_exceed_minimum_reading_time() {
        for template in FALLBACK_TEMPLATES.iter() {
            let body = render(template.body, "telemedicine", Category::Health, 2026);
            assert!(reading_time(&body) >= 3, "template {} too short", template.id);
            assert!(!body.contains('{'), "unrendered placeholder in {}", template.id);
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let c = choice(Category::Technology, 7);
        let a = fallback_article(&c, 2026);
        let b = fallback_article(&c, 2026);
        assert_eq!(a, b);
        assert_eq!(a.title, "Understanding 5G Networks: A Comprehensive Guide");
        assert!(a.content.starts_with("5G networks has become"));
        assert!(a.summary.contains("the technology landscape"));
    }

    #[test]
    fn test_table_uses_both_templates() {
        let a = template_for(&choice(Category::Technology, 0));
        let b = template_for(&choice(Category::Technology, 1));
        assert_ne!(a.id, b.id);

        let outlook = fallback_article(&choice(Category::Business, 7), 2026);
        assert_eq!(outlook.title, "The Future of Fintech: Trends and Insights for 2026");
        assert!(outlook.content.starts_with("Few fields are moving as quickly as fintech."));
        assert!(outlook.content.contains("Over the course of 2026"));
    }
}
