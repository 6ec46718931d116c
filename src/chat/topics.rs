//! Keyword-based topic detection for the finance assistant

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Greeting,
    Loans,
    Budgeting,
    Expenses,
    Income,
    Savings,
    Retirement,
    Goals,
    OffTopic,
}

/// Keywords per topic, checked in this order; the first topic with a match wins
const KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Loans,
        &["loan", "loans", "debt", "payoff", "pay off", "interest", "apr", "mortgage", "amortization", "principal", "credit card"],
    ),
    (
        Topic::Retirement,
        &["retire", "retirement", "401k", "401(k)", "403b", "403(b)", "ira", "roth", "hsa", "brokerage", "pension"],
    ),
    (
        Topic::Budgeting,
        &["budget", "budgeting", "50/30/20", "needs", "wants", "afford", "affordability", "allocate"],
    ),
    (
        Topic::Expenses,
        &["expense", "expenses", "spend", "spending", "rent", "groceries", "bills", "utilities", "subscriptions", "eating out", "cost"],
    ),
    (
        Topic::Income,
        &["income", "salary", "paycheck", "earn", "earnings", "wage", "side hustle", "raise"],
    ),
    (
        Topic::Savings,
        &["save", "saving", "savings", "emergency fund", "invest", "investing", "compound"],
    ),
    (
        Topic::Goals,
        &["goal", "goals", "smart", "plan", "planning", "target"],
    ),
    (
        Topic::Greeting,
        &["hello", "hi", "hey", "good morning", "good evening", "thanks", "thank you"],
    ),
];

/// Classify a message by keyword. Single words match whole tokens, phrases
/// match as substrings of the normalized message.
pub fn classify(message: &str) -> Topic {
    let normalized = message.to_lowercase();
    let tokens: Vec<&str> = normalized
        .split(|c: char| !(c.is_alphanumeric() || c == '/' || c == '(' || c == ')'))
        .filter(|t| !t.is_empty())
        .collect();

    for (topic, words) in KEYWORDS {
        let hit = words.iter().any(|word| {
            if word.contains(' ') {
                normalized.contains(word)
            } else {
                tokens.iter().any(|t| t == word)
            }
        });
        if hit {
            return *topic;
        }
    }
    Topic::OffTopic
}
