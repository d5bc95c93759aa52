use crate::models::journal::Mood;

const POSITIVE_KEYWORDS: &[&str] = &[
    "开心", "顺利", "完成", "自信", "不错", "棒", "收获", "进步", "解决", "轻松",
];

const ANXIOUS_KEYWORDS: &[&str] = &[
    "焦虑", "担心", "紧张", "慌", "卡住", "不会", "压力", "糟糕", "慌张",
];

const DOWN_KEYWORDS: &[&str] = &[
    "沮丧", "难过", "低落", "想放弃", "疲惫", "累", "不想学", "崩溃", "失落",
];

/// Classify free-form journal text into a coarse mood bucket.
///
/// Each category's score is the total number of non-overlapping keyword hits
/// in the text; ASCII keywords match case-insensitively, everything else is
/// an exact substring match. Positive wins ties by evaluation order, but a
/// full three-way tie is reported as neutral rather than positive.
pub fn classify(raw_text: &str) -> Mood {
    let normalized = raw_text.trim();
    if normalized.is_empty() {
        return Mood::Neutral;
    }

    let haystack = normalized.to_lowercase();
    let score = |keywords: &[&str]| -> usize {
        keywords
            .iter()
            .map(|token| {
                let lowered = token.to_lowercase();
                count_occurrences(&haystack, &lowered).max(count_occurrences(normalized, token))
            })
            .sum()
    };

    let positive = score(POSITIVE_KEYWORDS);
    let anxious = score(ANXIOUS_KEYWORDS);
    let down = score(DOWN_KEYWORDS);

    let (dominant, top) = [(Mood::Anxious, anxious), (Mood::Down, down)]
        .into_iter()
        .fold((Mood::Positive, positive), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    if top == 0 {
        return Mood::Neutral;
    }

    if dominant == Mood::Positive && positive <= anxious && positive <= down {
        return Mood::Neutral;
    }

    dominant
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
