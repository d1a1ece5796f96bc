use super::TraitLabel::{self, *};
use super::{Question, WordOption};

const fn opt(word: &'static str, label: TraitLabel) -> WordOption {
    WordOption { word, label }
}

const fn q(id: u32, options: [WordOption; 4]) -> Question {
    Question { id, options }
}

/// DISC word groups. Option order is D, I, S, C.
pub static DISC_QUESTIONS: [Question; 10] = [
    q(1, [opt("Adventurous", Dominance), opt("Enthusiastic", Influence), opt("Agreeable", Steadiness), opt("Analytical", Conscientiousness)]),
    q(2, [opt("Assertive", Dominance), opt("Sociable", Influence), opt("Patient", Steadiness), opt("Precise", Conscientiousness)]),
    q(3, [opt("Competitive", Dominance), opt("Talkative", Influence), opt("Calm", Steadiness), opt("Systematic", Conscientiousness)]),
    q(4, [opt("Decisive", Dominance), opt("Optimistic", Influence), opt("Stable", Steadiness), opt("Cautious", Conscientiousness)]),
    q(5, [opt("Direct", Dominance), opt("Persuasive", Influence), opt("Predictable", Steadiness), opt("Logical", Conscientiousness)]),
    q(6, [opt("Bold", Dominance), opt("Inspiring", Influence), opt("Consistent", Steadiness), opt("Perfectionist", Conscientiousness)]),
    q(7, [opt("Problem-solver", Dominance), opt("Spontaneous", Influence), opt("Supportive", Steadiness), opt("Organized", Conscientiousness)]),
    q(8, [opt("Risk-taker", Dominance), opt("Charming", Influence), opt("Good listener", Steadiness), opt("Fact-finder", Conscientiousness)]),
    q(9, [opt("Forceful", Dominance), opt("Popular", Influence), opt("Gentle", Steadiness), opt("Accurate", Conscientiousness)]),
    q(10, [opt("Results-oriented", Dominance), opt("Trusting", Influence), opt("Loyal", Steadiness), opt("High-standards", Conscientiousness)]),
];

/// Herrmann word groups. Option order is A (blue), B (green), C (red), D (yellow).
pub static HERRMANN_QUESTIONS: [Question; 7] = [
    q(1, [opt("Logical", Analytical), opt("Organized", Sequential), opt("Expressive", Interpersonal), opt("Imaginative", Imaginative)]),
    q(2, [opt("Factual", Analytical), opt("Detailed", Sequential), opt("Feeling", Interpersonal), opt("Holistic", Imaginative)]),
    q(3, [opt("Analytical", Analytical), opt("Planned", Sequential), opt("Interpersonal", Interpersonal), opt("Conceptual", Imaginative)]),
    q(4, [opt("Quantitative", Analytical), opt("Sequential", Sequential), opt("Sensory", Interpersonal), opt("Innovative", Imaginative)]),
    q(5, [opt("Critical", Analytical), opt("Conservative", Sequential), opt("Emotional", Interpersonal), opt("Visual", Imaginative)]),
    q(6, [opt("Technical", Analytical), opt("Structured", Sequential), opt("Spiritual", Interpersonal), opt("Intuitive", Imaginative)]),
    q(7, [opt("Rational", Analytical), opt("Practical", Sequential), opt("Relational", Interpersonal), opt("Creative", Imaginative)]),
];
