use crate::models::journal::{Mood, Tone};

/// Used when a tone has no curated line for the detected mood.
const FALLBACK_LINE: &str = "你的状态我已经收到啦，我们一起把今天安排得更有力量。";

fn opening(tone: Tone) -> &'static str {
    match tone {
        Tone::Strict => "教练模式启动：",
        Tone::Healer => "温柔提醒：",
        Tone::Social => "搭子上线啦：",
    }
}

fn mood_line(tone: Tone, mood: Mood) -> Option<&'static str> {
    match (tone, mood) {
        (Tone::Strict, Mood::Positive) => {
            Some("保持这种节奏，别放松，下一步记得把收获沉淀为题目或总结。")
        }
        (Tone::Strict, Mood::Neutral) => {
            Some("既然已经投入时间，就用明确目标把今天的学习打磨得更扎实。")
        }
        (Tone::Strict, Mood::Anxious) => {
            Some("先把问题拆成更小的步骤，给我一个具体的行动，再执行。")
        }
        (Tone::Strict, Mood::Down) => {
            Some("状态低也得交出最低限度的成果，列三个必须完成的小任务。")
        }
        (Tone::Healer, Mood::Positive) => Some("感受到了你的闪光点，记得奖励自己一个小憩～"),
        (Tone::Healer, Mood::Neutral) => Some("慢慢来没关系，把注意力放在当下，你已经在路上。"),
        (Tone::Healer, Mood::Anxious) => {
            Some("紧张说明你在乎结果，先深呼吸两次，然后挑最容易的点开个头。")
        }
        (Tone::Healer, Mood::Down) => {
            Some("允许自己脆弱，但别忘了，有我陪你，先写下此刻最想感谢的事吧。")
        }
        (Tone::Social, Mood::Positive) => Some("太棒啦！这一刻必须点赞，等着看你炫成果。"),
        (Tone::Social, Mood::Neutral) => {
            Some("搭子听得懂你！要不要一起设个小目标？我随时 online。")
        }
        (Tone::Social, Mood::Anxious) => {
            Some("别慌，我们并肩冲，先说说卡住哪一步，搭子帮你出主意。")
        }
        (Tone::Social, Mood::Down) => Some("抱抱你～把难过告诉我，顺便安排个轻松任务当缓冲。"),
    }
}

fn follow_up(tone: Tone) -> &'static str {
    match tone {
        Tone::Strict => "写完日志后，用 10 分钟复盘今天最关键的一个知识点，立刻执行。",
        Tone::Healer => "给自己一点缓冲，喝口水或伸展一下，再决定下一步小行动。",
        Tone::Social => "记得来和我继续汇报战况，我们一起把学习热度保持住！",
    }
}

/// Render the canned study-buddy reply: opening, optional noted summary,
/// per-mood body, and the tone's fixed follow-up, joined by blank lines.
pub fn render(tone: Tone, mood: Mood, summary: Option<&str>) -> String {
    let noted;
    let mut lines = vec![opening(tone)];

    if let Some(summary) = summary.filter(|s| !s.is_empty()) {
        noted = format!("我记下了：{summary}");
        lines.push(&noted);
    }

    lines.push(mood_line(tone, mood).unwrap_or(FALLBACK_LINE));
    lines.push(follow_up(tone));

    lines.join("\n\n")
}
