// src/catalog/english.rs

use crate::models::{
    content::{BranchOutcome, Branching, SurveyContent, Track, TrackSelection, UiLabels},
    question::{ChoiceOption, Question, QuestionType, SubQuestion},
};

fn question(id: &str, question_type: QuestionType, title: &str) -> Question {
    Question {
        id: id.to_string(),
        question_type,
        title: title.to_string(),
        description: None,
        options: Vec::new(),
        sub_questions: Vec::new(),
        min_select: None,
        max_select: None,
    }
}

/// Options whose id and stored value are the same string.
fn choice(id: &str, question_type: QuestionType, title: &str, options: &[(&str, &str)]) -> Question {
    Question {
        options: options
            .iter()
            .map(|(value, label)| ChoiceOption {
                id: value.to_string(),
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect(),
        ..question(id, question_type, title)
    }
}

fn matrix(id: &str, title: &str, description: &str, rows: &[(&str, &str)]) -> Question {
    Question {
        description: Some(description.to_string()),
        sub_questions: rows
            .iter()
            .map(|(id, text)| SubQuestion {
                id: id.to_string(),
                text: text.to_string(),
            })
            .collect(),
        ..question(id, QuestionType::RatingMatrix, title)
    }
}

const AGREEMENT_SCALE: &[(&str, &str)] = &[
    ("5", "Strongly Agree"),
    ("4", "Agree"),
    ("3", "Neutral"),
    ("2", "Disagree"),
    ("1", "Strongly Disagree"),
];

fn ui() -> UiLabels {
    UiLabels {
        title: "Student Learning Habits in the AI Era".to_string(),
        subtitle: "De-moralization · Quantifying Mismatch · Diagnosing Offloading".to_string(),
        description: "Hello! Generative AI like ChatGPT is changing our lives. Some call it a \
                      \"cheating tool\", others a \"second brain\". However you use it, we want \
                      your honest thoughts. This survey is anonymous and for academic research only."
            .to_string(),
        start_btn: "Start".to_string(),
        back_btn: "Back".to_string(),
        next_btn: "Next".to_string(),
        submitting_btn: "Submitting...".to_string(),
        lowest: "Lowest".to_string(),
        highest: "Highest".to_string(),
        placeholder: "Type your answer here...".to_string(),
        complete_title: "Thank you!".to_string(),
        complete_text: "Your response has been recorded.".to_string(),
        return_home: "Return home".to_string(),
        consent_title: "Before you begin".to_string(),
        consent_text: "Your answers are anonymous and will only be used for academic research."
            .to_string(),
        consent_checkbox: "I understand and agree to take part.".to_string(),
    }
}

fn initial_question() -> Question {
    choice(
        "q0_grade",
        QuestionType::SingleChoice,
        "What is your current grade level?",
        &[
            ("middle", "Middle School"),
            ("high", "High School / Vocational"),
            ("uni", "University / Graduate School"),
        ],
    )
}

fn branching() -> Branching {
    let outcome = |value: &str, track, label: &str| BranchOutcome {
        value: value.to_string(),
        track,
        label: label.to_string(),
    };

    Branching {
        outcomes: vec![
            outcome("middle", Track::Lower, "middle_school"),
            outcome("high", Track::Lower, "high_school"),
            outcome("uni", Track::University, "university"),
        ],
        fallback: TrackSelection {
            track: Track::Lower,
            label: "middle_school".to_string(),
        },
    }
}

fn lower_track() -> Vec<Question> {
    use QuestionType::*;

    vec![
        choice(
            "q1_rank",
            SingleChoice,
            "Where does your academic performance usually rank in your class?",
            &[
                ("top20", "Top 20%"),
                ("20-50", "20%-50%"),
                ("50-80", "50%-80%"),
                ("bottom20", "Bottom 20%"),
            ],
        ),
        choice(
            "q2_freq",
            SingleChoice,
            "How often do you use generative AI tools?",
            &[
                ("daily", "Almost every day"),
                ("weekly", "Several times a week"),
                ("rarely", "Occasionally"),
                ("tried", "Tried, but stopped"),
                ("never", "Never used"),
            ],
        ),
        matrix(
            "q3_behavior",
            "How do you use AI for the following tasks?",
            "1=Not at all, 3=Half-half, 5=Fully AI generated",
            &[
                ("mech", "A. Mechanical Tasks (Translation, rote filling)"),
                ("diff", "B. Understanding Difficulties (Concepts, ancient texts)"),
                ("struct", "C. Structure Optimization (Outlining, polishing)"),
                ("idea", "D. Creative Inspiration (Brainstorming)"),
                ("logic", "E. Logic Deduction (Solving math/science problems)"),
            ],
        ),
        choice(
            "q4_essay",
            SingleChoice,
            "For an essay on \"Environment\", which habit is closest to yours?",
            &[
                ("proxy", "A. Full Proxy: Generate and submit."),
                ("collage", "B. Collage: Generate parts and assemble."),
                ("mentor", "C. Mentor: I write core points, AI adds data/checks."),
                ("trad", "D. Traditional: No AI used."),
            ],
        ),
        choice(
            "q5_history",
            SingleChoice,
            "How do you prefer to master a complex historical event today?",
            &[
                ("disk", "A. Hard Drive: Memorize everything."),
                ("index", "B. Index: Know the logic, search for details."),
                ("box", "C. Blind Box: Just ask AI when needed."),
            ],
        ),
        choice(
            "q6_opinion_poetry",
            Likert,
            "Opinion: Memorizing poetry/vocab is still crucial with AI.",
            AGREEMENT_SCALE,
        ),
        choice(
            "q7_opinion_questioning",
            Likert,
            "Opinion: Future competitiveness is about asking AI good questions, not answering them.",
            AGREEMENT_SCALE,
        ),
        choice(
            "q9_homework",
            SingleChoice,
            "What type of homework do teachers mostly assign?",
            &[
                ("memory", "A. Memory Recall: Rote memorization."),
                ("mixed", "B. Mixed."),
                ("explore", "C. Open Inquiry: Real-life projects, debates."),
            ],
        ),
        choice(
            "q10_awkward",
            MultiChoice,
            "Have you encountered these awkward situations with AI homework? (Multi-select)",
            &[
                ("none", "None."),
                ("cant_tell", "Teacher can't tell the difference, gives a high score for an AI look."),
                ("doubt", "Teacher suspected my high-quality AI-assisted work."),
                ("exam_fail", "Understood via AI, but failed rote memory exams."),
            ],
        ),
        choice(
            "q11_school_score",
            SingleChoice,
            "How would you rate your school's \"AI Adaptability\"?",
            &[
                ("conservative", "Conservative: Strictly prohibited."),
                ("ostrich", "Ostrich: Ignores AI existence."),
                ("explorer", "Explorer: Teaches usage, allows AI homework."),
            ],
        ),
        choice(
            "q12_time",
            SingleChoice,
            "Where does the time saved by AI usually go?",
            &[
                ("ent", "A. Entertainment/Rest."),
                ("more_qs", "B. More drills."),
                ("deep", "C. Deep learning."),
                ("creative", "D. Creative activities."),
            ],
        ),
        question(
            "q14_open",
            Text,
            "If you could say one sentence to education policy makers about AI and exams, what would it be?",
        ),
    ]
}

fn university_track() -> Vec<Question> {
    use QuestionType::*;

    vec![
        choice(
            "u1_stage",
            SingleChoice,
            "Academic Stage?",
            &[("bachelor", "Bachelor"), ("master", "Master"), ("phd", "PhD")],
        ),
        choice(
            "u2_major",
            SingleChoice,
            "Major Discipline?",
            &[
                ("stem", "STEM"),
                ("humanities", "Humanities & Social Sciences"),
                ("arts", "Arts & Design"),
                ("business", "Business/Management"),
            ],
        ),
        matrix(
            "u3_usage",
            "How do you use AI in research/projects?",
            "1-5 Scale",
            &[
                ("low", "Low-level: Formatting, grammar, basic code"),
                ("mid", "Mid-level: Summarizing, explaining, translating"),
                ("high", "High-level: Design, critical thinking, inspiration"),
            ],
        ),
        choice(
            "u4_paper",
            SingleChoice,
            "Typical approach to a term paper?",
            &[
                ("gen", "A. Generative Dependency."),
                ("coop", "B. Enhanced Collaboration."),
                ("trad", "C. Traditional Persistence."),
            ],
        ),
        matrix(
            "u5_value",
            "How has the value of these skills changed?",
            "1=Less important, 3=Same, 5=More important",
            &[
                ("store", "Info Storage (Memorization)"),
                ("filter", "Info Synthesis & Discrimination"),
                ("ask", "Original Research Questioning"),
            ],
        ),
        choice(
            "u6_expert",
            Likert,
            "Agree? Future experts are those best at using AI, not knowing most facts.",
            &[
                ("strong_agree", "Strongly Agree"),
                ("agree", "Agree"),
                ("neutral", "Neutral"),
                ("disagree", "Disagree"),
            ],
        ),
        choice(
            "u7_eval",
            SingleChoice,
            "What is your major's assessment bias?",
            &[
                ("result", "Result-oriented."),
                ("process", "Process-oriented."),
                ("mixed", "Mixed."),
            ],
        ),
        choice(
            "u8_prof",
            SingleChoice,
            "If your professor finds you used AI heavily, their reaction?",
            &[
                ("neg", "Negative: Academic misconduct."),
                ("unknown", "Unaware: Doesn't care/notice."),
                ("pos", "Positive: Evaluates usage quality."),
            ],
        ),
        choice(
            "u10_time_uni",
            SingleChoice,
            "Where does your saved time go?",
            &[
                ("anxiety", "Anxiety/Lost."),
                ("gpa", "GPA Grinding."),
                ("deep", "Deep Dive."),
                ("startup", "Innovation/Startup."),
            ],
        ),
        question(
            "u11_open_uni",
            Text,
            "If you designed a course for the AI era, what would you assess instead of memory?",
        ),
    ]
}

pub(super) fn content() -> SurveyContent {
    SurveyContent {
        ui: ui(),
        initial_question: initial_question(),
        branching: branching(),
        lower_track: lower_track(),
        university_track: university_track(),
    }
}
