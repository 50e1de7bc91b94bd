//! Prompt assembly for the generation call.

use chrono::{Datelike, NaiveDate};
use utamaro_interface::GenerationRequest;

/// Base instruction asking the model for the two marked sections the
/// splitter understands.
const SYSTEM_PROMPT_BASE: &str = "\
あなたは美容サロンのSNS担当です。与えられたテーマで投稿文を2種類作成してください。
必ず以下の形式で出力してください:
【Google投稿】
来店を促す丁寧な紹介文（1500文字以内、ハッシュタグなし）
【Instagram】
親しみやすいキャプション（2200文字以内、ハッシュタグを3〜5個）
装飾記号や見出し記号は使わないでください。";

const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Assemble the full prompt for one generation request.
///
/// Mirrors the context block sent by the operator UI: current date in
/// Japanese form, the target persona label, and the active keyword set,
/// followed by the request's own prompt line.
///
/// # Examples
///
/// ```
/// use utamaro_gemini::build_prompt;
/// use utamaro_interface::GenerationRequest;
/// use utamaro_core::TargetAudience;
/// use chrono::NaiveDate;
///
/// let request = GenerationRequest::for_topic(
///     "春メニュー",
///     TargetAudience::Twenties,
///     vec!["ヘッドスパ".to_string()],
/// );
/// let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let prompt = build_prompt(&request, today);
/// assert!(prompt.contains("2024年4月1日(月)"));
/// assert!(prompt.contains("テーマ: 春メニュー"));
/// ```
pub fn build_prompt(request: &GenerationRequest, today: NaiveDate) -> String {
    let weekday = WEEKDAYS_JA[today.weekday().num_days_from_sunday() as usize];
    let date_line = format!(
        "{}年{}月{}日({})",
        today.year(),
        today.month(),
        today.day(),
        weekday
    );

    format!(
        "{SYSTEM_PROMPT_BASE}\n現在日時: {date_line}\nターゲット: {}\n強調語: {}\n{}",
        request.audience.label(),
        request.keywords.join(","),
        request.prompt
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use utamaro_core::TargetAudience;

    #[test]
    fn prompt_carries_context_and_topic() {
        let request = GenerationRequest::for_topic(
            "新色カラー",
            TargetAudience::Matures,
            vec!["艶".to_string(), "ダメージケア".to_string()],
        );
        let today = NaiveDate::from_ymd_opt(2024, 4, 7).unwrap();
        let prompt = build_prompt(&request, today);

        assert!(prompt.contains("【Google投稿】"));
        assert!(prompt.contains("【Instagram】"));
        assert!(prompt.contains("2024年4月7日(日)"));
        assert!(prompt.contains("ターゲット: 30〜40代女性"));
        assert!(prompt.contains("強調語: 艶,ダメージケア"));
        assert!(prompt.ends_with("テーマ: 新色カラー"));
    }

    #[test]
    fn empty_keywords_leave_the_field_blank() {
        let request =
            GenerationRequest::for_topic("本日の空き状況", TargetAudience::General, vec![]);
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let prompt = build_prompt(&request, today);
        assert!(prompt.contains("強調語: \n"));
    }
}
