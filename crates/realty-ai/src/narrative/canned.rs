use super::{NarrativeFuture, NarrativeGenerator, NarrativePrompt};

/// Offline responder used when no provider key is configured.
///
/// Picks one of a few fixed answers by keyword so demos and tests behave the same without
/// network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedNarrator;

impl CannedNarrator {
    pub fn respond(&self, prompt: &NarrativePrompt) -> String {
        let message = prompt.user.to_lowercase();
        let topic = if contains_any(&message, &["căn hộ", "apartment"]) {
            CannedTopic::Apartment
        } else if contains_any(&message, &["thị trường", "market"]) {
            CannedTopic::Market
        } else {
            CannedTopic::General
        };
        topic.answer(is_vietnamese(&message)).to_string()
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn is_vietnamese(message: &str) -> bool {
    contains_any(message, &["khách hàng", "ngân sách", "tiếng việt"])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CannedTopic {
    Apartment,
    Market,
    General,
}

impl CannedTopic {
    fn answer(self, vietnamese: bool) -> &'static str {
        match (self, vietnamese) {
            (CannedTopic::Apartment, false) => {
                "Apartment shortlist: lead with the highest-scoring listing and book a site visit \
                 this week. Compare maintenance fees and handover dates across the top matches, \
                 and keep one option below the budget ceiling as a fallback."
            }
            (CannedTopic::Apartment, true) => {
                "Tư vấn căn hộ: ưu tiên giới thiệu căn có điểm phù hợp cao nhất và hẹn khách \
                 đi xem nhà trong tuần. So sánh phí quản lý, thời điểm bàn giao và giữ một \
                 phương án dưới mức ngân sách tối đa để dự phòng."
            }
            (CannedTopic::Market, false) => {
                "Market view: eastern districts such as Thu Duc City and District 9 continue to \
                 lead price growth on the back of new infrastructure. Present recent comparable \
                 transactions before discussing price."
            }
            (CannedTopic::Market, true) => {
                "Nhận định thị trường: khu Đông như TP. Thủ Đức và Quận 9 tiếp tục dẫn đầu về \
                 tăng giá nhờ hạ tầng mới. Nên trình bày các giao dịch tương tự gần đây trước \
                 khi thương lượng giá."
            }
            (CannedTopic::General, false) => {
                "Review the ranked listings with the client, confirm which requirements are firm, \
                 and follow up with the best two options."
            }
            (CannedTopic::General, true) => {
                "Rà soát danh sách BĐS đã xếp hạng cùng khách hàng, xác nhận các yêu cầu bắt \
                 buộc và chủ động liên hệ lại với hai phương án tốt nhất."
            }
        }
    }
}

impl NarrativeGenerator for CannedNarrator {
    fn name(&self) -> &str {
        "canned"
    }

    fn generate<'a>(&'a self, prompt: &'a NarrativePrompt) -> NarrativeFuture<'a> {
        let text = self.respond(prompt);
        Box::pin(async move { Ok(text) })
    }
}
