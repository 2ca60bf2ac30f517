//! Contextual emoji selection.
//!
//! Reply text is classified by testing an ordered list of keyword patterns;
//! the first matching category supplies a glyph pool. The picker remembers the
//! last glyph handed out per category so the same one never appears twice in
//! a row when the pool has alternatives.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use std::collections::HashMap;

/// Semantic tag selecting a glyph pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmojiCategory {
    Greeting,
    Farewell,
    Empathy,
    Encouragement,
    Anxiety,
    Depression,
    Hope,
    Mindfulness,
    Gratitude,
    Sleep,
    Confidence,
    Learning,
    Celebration,
}

impl EmojiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiCategory::Greeting => "greeting",
            EmojiCategory::Farewell => "farewell",
            EmojiCategory::Empathy => "empathy",
            EmojiCategory::Encouragement => "encouragement",
            EmojiCategory::Anxiety => "anxiety",
            EmojiCategory::Depression => "depression",
            EmojiCategory::Hope => "hope",
            EmojiCategory::Mindfulness => "mindfulness",
            EmojiCategory::Gratitude => "gratitude",
            EmojiCategory::Sleep => "sleep",
            EmojiCategory::Confidence => "confidence",
            EmojiCategory::Learning => "learning",
            EmojiCategory::Celebration => "celebration",
        }
    }
}

/// Where a chosen glyph is placed relative to the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiPosition {
    Prefix,
    Suffix,
}

/// A category's keyword pattern, glyph pool and placement.
pub struct CategoryRule {
    pub category: EmojiCategory,
    pub pattern: Regex,
    pub glyphs: &'static [&'static str],
    pub position: EmojiPosition,
}

fn rule(
    category: EmojiCategory,
    keywords: &str,
    glyphs: &'static [&'static str],
    position: EmojiPosition,
) -> CategoryRule {
    let pattern = Regex::new(&format!(r"(?i)\b(?:{})", keywords))
        .expect("emoji keyword regex pattern is valid");
    CategoryRule {
        category,
        pattern,
        glyphs,
        position,
    }
}

/// Category table in match order. Earlier rules win.
pub static CATEGORY_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    use EmojiCategory::*;
    use EmojiPosition::*;
    vec![
        rule(
            Greeting,
            r"hello\b|hi\b|hey\b|welcome|greetings|good (?:morning|afternoon|evening)\b",
            &["👋", "😊", "🌞", "🙂"],
            Prefix,
        ),
        rule(
            Farewell,
            r"goodbye|bye\b|see you|take care|farewell|good ?night\b",
            &["👋", "🌙", "💫", "🤗"],
            Suffix,
        ),
        rule(
            Empathy,
            r"sorry|that sounds (?:hard|difficult|tough)|i hear you|must be (?:hard|difficult)|it'?s okay to feel",
            &["🤗", "💙", "🫂", "💗"],
            Prefix,
        ),
        rule(
            Encouragement,
            r"you can do|keep going|keep it up|great job|well done|proud of you|don'?t give up",
            &["💪", "🌟", "👏", "🚀"],
            Suffix,
        ),
        rule(
            Anxiety,
            r"anxi\w*|worr\w*|nervous|panic\w*|stress\w*|overwhelm\w*",
            &["🌿", "🫧", "🍃", "🕊️"],
            Prefix,
        ),
        rule(
            Depression,
            r"depress\w*|sad(?:ness)?\b|lonely|loneliness|hopeless\w*|feeling down|empty inside",
            &["💙", "🌧️", "🤍", "🫶"],
            Prefix,
        ),
        rule(
            Hope,
            r"hope\w*|better days|brighter|optimis\w*|things will get better",
            &["🌈", "🌅", "✨", "🌻"],
            Suffix,
        ),
        rule(
            Mindfulness,
            r"breath\w*|mindful\w*|meditat\w*|calm\w*|relax\w*|present moment|grounding",
            &["🧘", "🌸", "🍃", "☮️"],
            Prefix,
        ),
        rule(
            Gratitude,
            r"thank\w*|grateful|gratitude|appreciat\w*",
            &["🙏", "💖", "🌼", "😊"],
            Suffix,
        ),
        rule(
            Sleep,
            r"sleep\w*|insomnia|tired|bedtime|nap\b|rest(?:ful)?\b",
            &["😴", "🌙", "💤", "🛌"],
            Prefix,
        ),
        rule(
            Confidence,
            r"confiden\w*|believe in yourself|self-esteem|capable|you(?:'re| are) strong",
            &["🦁", "💪", "⭐", "🔥"],
            Suffix,
        ),
        rule(
            Learning,
            r"learn\w*|stud(?:y|ying|ied)\b|exam\w*|homework|quiz\w*|lesson\w*|concept\w*",
            &["📚", "💡", "🧠", "📝", "🎓"],
            Prefix,
        ),
        rule(
            Celebration,
            r"congrat\w*|celebrat\w*|achiev\w*|success\w*",
            &["🎉", "🥳", "🏆", "🎊"],
            Suffix,
        ),
    ]
});

/// Look up the rule for a category.
pub fn rule_for(category: EmojiCategory) -> Option<&'static CategoryRule> {
    CATEGORY_RULES.iter().find(|r| r.category == category)
}

/// Return the first category whose keywords appear in `text`.
pub fn classify(text: &str) -> Option<EmojiCategory> {
    CATEGORY_RULES
        .iter()
        .find(|r| r.pattern.is_match(text))
        .map(|r| r.category)
}

/// A glyph chosen for a message, with its category and placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiChoice {
    pub category: EmojiCategory,
    pub glyph: &'static str,
    pub position: EmojiPosition,
}

/// Picks glyphs at random while avoiding immediate repeats per category.
pub struct EmojiPicker {
    rng: StdRng,
    last: HashMap<EmojiCategory, &'static str>,
}

impl Default for EmojiPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl EmojiPicker {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic picker, for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            last: HashMap::new(),
        }
    }

    /// Choose a glyph from `category`'s pool, skipping the previous pick when possible.
    pub fn pick(&mut self, category: EmojiCategory) -> Option<&'static str> {
        let rule = rule_for(category)?;
        self.pick_from(category, rule.glyphs)
    }

    fn pick_from(
        &mut self,
        category: EmojiCategory,
        glyphs: &'static [&'static str],
    ) -> Option<&'static str> {
        let previous = self.last.get(&category).copied();

        // A single-glyph pool has nothing to rotate to.
        let candidates: Vec<&'static str> = if glyphs.len() > 1 {
            glyphs
                .iter()
                .copied()
                .filter(|g| Some(*g) != previous)
                .collect()
        } else {
            glyphs.to_vec()
        };

        let glyph = *candidates.choose(&mut self.rng)?;
        self.last.insert(category, glyph);
        Some(glyph)
    }

    /// Classify `text` and pick a glyph for the matching category, if any.
    pub fn choose_for(&mut self, text: &str) -> Option<EmojiChoice> {
        let category = classify(text)?;
        let position = rule_for(category)?.position;
        let glyph = self.pick(category)?;
        Some(EmojiChoice {
            category,
            glyph,
            position,
        })
    }

    /// The last glyph handed out for `category`.
    pub fn last_glyph(&self, category: EmojiCategory) -> Option<&'static str> {
        self.last.get(&category).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_rule() {
        use EmojiCategory::*;
        for category in [
            Greeting,
            Farewell,
            Empathy,
            Encouragement,
            Anxiety,
            Depression,
            Hope,
            Mindfulness,
            Gratitude,
            Sleep,
            Confidence,
            Learning,
            Celebration,
        ] {
            let rule = rule_for(category).expect("rule exists");
            assert!(!rule.glyphs.is_empty(), "{} has glyphs", category.as_str());
        }
    }

    #[test]
    fn test_classify_keywords() {
        assert_eq!(classify("Hello, how are you?"), Some(EmojiCategory::Greeting));
        assert_eq!(classify("Take care of yourself"), Some(EmojiCategory::Farewell));
        assert_eq!(classify("I feel so anxious today"), Some(EmojiCategory::Anxiety));
        assert_eq!(classify("Step 1: breathe deeply"), Some(EmojiCategory::Mindfulness));
        assert_eq!(classify("Thank you so much"), Some(EmojiCategory::Gratitude));
        assert_eq!(classify("Let's study for the exam"), Some(EmojiCategory::Learning));
        assert_eq!(classify("The derivative of x"), None);
    }

    #[test]
    fn test_classify_respects_word_boundaries() {
        // "this" contains "hi" but is not a greeting
        assert_eq!(classify("this works"), None);
        assert_eq!(classify("Sadly the function is slow"), None);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // Greeting is listed before gratitude
        assert_eq!(classify("Hello and thank you"), Some(EmojiCategory::Greeting));
    }

    #[test]
    fn test_pick_never_repeats_previous_glyph() {
        let mut picker = EmojiPicker::seeded(7);
        let mut previous = picker.pick(EmojiCategory::Mindfulness).unwrap();
        for _ in 0..200 {
            let next = picker.pick(EmojiCategory::Mindfulness).unwrap();
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_single_glyph_pool_repeats() {
        static ONLY: &[&str] = &["🎓"];
        let mut picker = EmojiPicker::seeded(1);
        for _ in 0..3 {
            assert_eq!(picker.pick_from(EmojiCategory::Learning, ONLY), Some("🎓"));
        }
        assert_eq!(picker.last_glyph(EmojiCategory::Learning), Some("🎓"));
    }

    #[test]
    fn test_two_glyph_pool_alternates() {
        static PAIR: &[&str] = &["🌙", "💤"];
        let mut picker = EmojiPicker::seeded(8);
        let first = picker.pick_from(EmojiCategory::Sleep, PAIR).unwrap();
        let second = picker.pick_from(EmojiCategory::Sleep, PAIR).unwrap();
        let third = picker.pick_from(EmojiCategory::Sleep, PAIR).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_bare_step_line_is_classified_by_its_body() {
        assert_eq!(classify("Step 2: relax your jaw"), Some(EmojiCategory::Mindfulness));
    }

    #[test]
    fn test_repeat_memory_is_per_category() {
        let mut picker = EmojiPicker::seeded(3);
        let glyph = picker.pick(EmojiCategory::Sleep).unwrap();
        assert_eq!(picker.last_glyph(EmojiCategory::Sleep), Some(glyph));
        assert_eq!(picker.last_glyph(EmojiCategory::Hope), None);
    }

    #[test]
    fn test_choose_for_uses_category_position() {
        let mut picker = EmojiPicker::seeded(11);
        let choice = picker.choose_for("Try to breathe slowly").unwrap();
        assert_eq!(choice.category, EmojiCategory::Mindfulness);
        assert_eq!(choice.position, EmojiPosition::Prefix);

        let choice = picker.choose_for("Thanks for sharing").unwrap();
        assert_eq!(choice.position, EmojiPosition::Suffix);

        assert!(picker.choose_for("x = 4").is_none());
    }
}
