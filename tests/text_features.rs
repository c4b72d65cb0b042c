use post_score::analysis::text::{count_paragraphs, count_sections, count_sentences};
use post_score::analysis::{
    analyze_title, classify_style, extract_keywords, extract_text_features, score_readability,
};
use post_score::scoring::engagement_score;
use post_score::{analyze_text, KeywordCategory, Perspective, ReadingGrade, StructureKind, Tone};

#[test]
fn chinese_call_to_action_is_detected() {
    let features = extract_text_features("快来评论区分享");
    assert!(!features.call_to_action.is_empty());
    assert!(features
        .call_to_action
        .iter()
        .any(|cta| cta == "快来评论区分享"));

    let report = analyze_text("", "快来评论区分享");
    assert!(engagement_score(&report.text) >= 70.0);
}

#[test]
fn english_calls_to_action_are_case_insensitive() {
    let features = extract_text_features("Great post. Follow me and Read More on the blog.");
    assert_eq!(features.call_to_action, vec!["follow me", "read more"]);
}

#[test]
fn keyword_needs_two_occurrences() {
    let keywords = extract_keywords("rust rust python");
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].word, "rust");
    assert_eq!(keywords[0].frequency, 2);
    assert!((keywords[0].relevance - 2.0 / 3.0).abs() < 1e-9);
    assert!(keywords.iter().all(|keyword| keyword.word != "python"));
}

#[test]
fn keywords_keep_first_occurrence_order() {
    let words: Vec<String> = extract_keywords("zeta alpha zeta alpha")
        .into_iter()
        .map(|keyword| keyword.word)
        .collect();
    assert_eq!(words, vec!["zeta", "alpha"]);
}

#[test]
fn keyword_relevance_counts_tokens_before_filtering() {
    let keywords = extract_keywords("the the the cats cats");
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].word, "cats");
    assert!((keywords[0].relevance - 0.4).abs() < 1e-9);
}

#[test]
fn keyword_tokens_are_stripped_of_punctuation() {
    let keywords = extract_keywords("Rust, rust!");
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].word, "rust");
}

#[test]
fn keyword_categories_use_cue_words() {
    assert_eq!(extract_keywords("love love")[0].category, KeywordCategory::Emotion);
    assert_eq!(extract_keywords("buy buy")[0].category, KeywordCategory::Action);
    assert_eq!(extract_keywords("rust rust")[0].category, KeywordCategory::Topic);
}

#[test]
fn sentence_counting_ignores_empty_segments() {
    assert_eq!(count_sentences("Hello world. How are you? Fine!"), 3);
    assert_eq!(count_sentences("Wait... what?!"), 2);
    assert_eq!(count_sentences(""), 0);
}

#[test]
fn paragraphs_split_on_blank_lines() {
    assert_eq!(count_paragraphs("a\n\nb\n \nc"), 3);
    assert_eq!(count_paragraphs("single line\nsecond line"), 1);
    assert_eq!(count_paragraphs(""), 0);
}

#[test]
fn sections_count_headings_and_caps_lines() {
    assert_eq!(count_sections("# Intro\ntext\n## Part\nSUMMARY\nbody"), 4);
    assert_eq!(count_sections("小结\n正文"), 1);
    assert_eq!(count_sections(""), 1);
}

#[test]
fn hashtags_and_mentions_are_unicode_aware() {
    let features = extract_text_features("Loving #rust and #编程 with @alice_1");
    assert_eq!(features.hashtags, vec!["#rust", "#编程"]);
    assert_eq!(features.mentions, vec!["@alice_1"]);
}

#[test]
fn structure_labels() {
    let list = extract_text_features("- one\n- two").structure;
    assert!(list.has_bullet_points);
    assert_eq!(list.structure, StructureKind::List);

    let numbered = extract_text_features("1. first\n2. second").structure;
    assert_eq!(numbered.structure, StructureKind::List);

    let qa = extract_text_features("What is this?").structure;
    assert_eq!(qa.structure, StructureKind::Qa);

    let story = extract_text_features(
        "Hello everyone, this is how it went. In conclusion, thanks for reading.",
    )
    .structure;
    assert!(story.has_intro);
    assert!(story.has_conclusion);
    assert_eq!(story.structure, StructureKind::Story);

    let linear = extract_text_features("Plain statement.").structure;
    assert_eq!(linear.structure, StructureKind::Linear);
    assert!(!linear.has_numbers);

    assert!(extract_text_features("Version 2 is out").structure.has_numbers);
}

#[test]
fn intro_cue_must_be_near_the_start() {
    let filler = "x ".repeat(80);
    let text = format!("{}hello there", filler);
    assert!(!extract_text_features(&text).structure.has_intro);
}

#[test]
fn perspective_prefers_first_person_on_ties() {
    assert_eq!(classify_style("I think you should try it").perspective, Perspective::First);
    assert_eq!(classify_style("我觉得你说得对").perspective, Perspective::First);
    assert_eq!(classify_style("you and your friends").perspective, Perspective::Second);
    assert_eq!(classify_style("The cat sat.").perspective, Perspective::Third);
    assert_eq!(
        classify_style("I'm sure I've found it, you will like it").perspective,
        Perspective::First
    );
    assert_eq!(classify_style("you're right, you’ll see").perspective, Perspective::Second);
}

#[test]
fn tone_classification() {
    assert_eq!(classify_style("The meeting starts at noon.").tone, Tone::Formal);
    assert_eq!(classify_style("what's up?").tone, Tone::Casual);
    assert_eq!(
        classify_style("amazing wonderful fantastic incredible day").tone,
        Tone::Enthusiastic
    );
}

#[test]
fn formality_and_authenticity_are_clamped() {
    assert!((classify_style("").formality - 0.5).abs() < 1e-9);
    assert!((classify_style("therefore however").formality - 1.0).abs() < 1e-9);

    let style = classify_style("I think this is guaranteed");
    assert!((style.authenticity - 0.75).abs() < 1e-9);
}

#[test]
fn reading_time_has_a_floor() {
    assert_eq!(score_readability("word").reading_time, 30);

    let long = "word ".repeat(500);
    assert_eq!(score_readability(&long).reading_time, 120);
}

#[test]
fn flesch_uses_word_length_approximation() {
    let metrics = score_readability("aaaa bbbb.");
    let expected = 206.835 - 1.015 * 2.0 - 84.6 * (4.5 / 4.7);
    assert!((metrics.avg_sentence_length - 2.0).abs() < 1e-9);
    assert!((metrics.avg_word_length - 4.5).abs() < 1e-9);
    assert!((metrics.flesch_score - expected).abs() < 1e-9);
    assert_eq!(metrics.grade, ReadingGrade::Easy);

    let dense = "internationalization ".repeat(30);
    let metrics = score_readability(&dense);
    assert_eq!(metrics.grade, ReadingGrade::Hard);
    assert!((metrics.complex_word_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn title_signals() {
    assert!(analyze_title("Best tips 🚀").has_emoji);

    let bait = analyze_title("Shocking secret: 3 ways?");
    assert!((bait.clickbait_score - 1.0).abs() < 1e-9);
    assert_eq!(bait.power_words, vec!["secret"]);
    assert!(bait.has_questions);

    assert!((analyze_title("Hi").clarity_score - 0.6).abs() < 1e-9);
    assert!((analyze_title(&"a".repeat(60)).clarity_score - 0.7).abs() < 1e-9);

    assert_eq!(analyze_title("Amazing trip").emotional_words, vec!["amazing"]);
}

#[test]
fn title_length_counts_characters() {
    let title = analyze_title("5个提升工作效率的小技巧");
    assert_eq!(title.length, 12);
    assert!(title.has_numbers);
    assert!(title.clickbait_score >= 0.2);
}

#[test]
fn empty_input_yields_zeroed_features() {
    let features = extract_text_features("");
    assert_eq!(features.word_count, 0);
    assert_eq!(features.char_count, 0);
    assert_eq!(features.paragraph_count, 0);
    assert_eq!(features.sentence_count, 0);
    assert!(features.call_to_action.is_empty());
    assert_eq!(features.structure.section_count, 1);
}
