use serde::{Deserialize, Serialize};

use crate::matching::{ClientPreferences, ReasonLocale, ScoredMatch};

/// System instruction plus user message handed to a narrative generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativePrompt {
    pub system: String,
    pub user: String,
}

impl NarrativePrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Summarise the client's preferences and the `top_n` best matches.
    ///
    /// `matches` must already be ranked; the prompt takes them in order.
    pub fn for_matches(
        preferences: &ClientPreferences,
        matches: &[ScoredMatch],
        candidate_count: usize,
        top_n: usize,
        locale: ReasonLocale,
    ) -> Self {
        let text = PromptText::for_locale(locale);
        let type_labels: Vec<&str> = preferences
            .property_types
            .iter()
            .map(|kind| match locale {
                ReasonLocale::English => kind.label(),
                ReasonLocale::Vietnamese => kind.local_label(),
            })
            .collect();
        let min_area = preferences
            .min_area
            .map(|area| format!("{area} m²"))
            .unwrap_or_else(|| text.unspecified.to_string());
        let bedrooms = preferences
            .bedrooms
            .map(|count| count.to_string())
            .unwrap_or_else(|| text.unspecified.to_string());

        let mut lines = vec![
            text.heading.to_string(),
            String::new(),
            text.requirements.to_string(),
            format!(
                "- {}: {} - {} VND",
                text.budget,
                format_amount(preferences.budget.min, text.thousands),
                format_amount(preferences.budget.max, text.thousands),
            ),
            format!(
                "- {}: {}",
                text.locations,
                join_or(preferences.locations.iter().map(String::as_str), text.unspecified),
            ),
            format!(
                "- {}: {}",
                text.types,
                join_or(type_labels.into_iter(), text.unspecified),
            ),
            format!("- {}: {}", text.min_area, min_area),
            format!("- {}: {}", text.bedrooms, bedrooms),
            String::new(),
            format!("{}: {}", text.inventory, candidate_count),
        ];

        if matches.is_empty() || top_n == 0 {
            lines.push(text.no_matches.to_string());
        } else {
            lines.push(text.top_matches.to_string());
            lines.extend(matches.iter().take(top_n).enumerate().map(|(rank, scored)| {
                let listing = &scored.listing;
                format!(
                    "{}. {} ({}) - {} VND, {} m², {} {}/100: {}",
                    rank + 1,
                    listing.display_name(),
                    listing.location,
                    format_amount(listing.price, text.thousands),
                    listing.area,
                    text.score,
                    scored.score,
                    scored.reasons.join(", "),
                )
            }));
        }

        lines.push(String::new());
        lines.push(text.closing.to_string());
        let user = lines.join("\n");

        Self::new(text.system, user)
    }
}

struct PromptText {
    system: &'static str,
    heading: &'static str,
    requirements: &'static str,
    budget: &'static str,
    locations: &'static str,
    types: &'static str,
    min_area: &'static str,
    bedrooms: &'static str,
    unspecified: &'static str,
    inventory: &'static str,
    top_matches: &'static str,
    no_matches: &'static str,
    score: &'static str,
    closing: &'static str,
    thousands: char,
}

impl PromptText {
    fn for_locale(locale: ReasonLocale) -> Self {
        match locale {
            ReasonLocale::English => Self {
                system: "You are a real-estate advisor helping a sales agent in Vietnam. \
                         Give concise, professional advice grounded in the listings provided.",
                heading: "Recommend suitable properties for this client.",
                requirements: "Client requirements:",
                budget: "Budget",
                locations: "Locations",
                types: "Property types",
                min_area: "Minimum area",
                bedrooms: "Bedrooms",
                unspecified: "not specified",
                inventory: "Listings reviewed",
                top_matches: "Best matches:",
                no_matches: "No listing matched any requirement.",
                score: "score",
                closing: "Explain which listings fit best and what the agent should propose next.",
                thousands: ',',
            },
            ReasonLocale::Vietnamese => Self {
                system: "Bạn là chuyên gia bất động sản AI. \
                         Hãy phân tích và đưa ra lời khuyên phù hợp cho nhân viên kinh doanh.",
                heading: "Tìm bất động sản phù hợp cho khách hàng.",
                requirements: "Yêu cầu khách hàng:",
                budget: "Ngân sách",
                locations: "Vị trí",
                types: "Loại hình",
                min_area: "Diện tích tối thiểu",
                bedrooms: "Số phòng ngủ",
                unspecified: "Không yêu cầu",
                inventory: "Số BĐS đã xét",
                top_matches: "Các BĐS phù hợp nhất:",
                no_matches: "Không có BĐS nào đáp ứng yêu cầu.",
                score: "điểm",
                closing: "Hãy phân tích và đưa ra lời khuyên chi tiết. Trả lời bằng tiếng Việt.",
                thousands: '.',
            },
        }
    }
}

fn join_or<'a, I>(values: I, fallback: &str) -> String
where
    I: Iterator<Item = &'a str>,
{
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

pub(crate) fn format_amount(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
