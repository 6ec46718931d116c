//! Scripted finance assistant
//!
//! Replies are built from the user's own finance record and a fixed set of
//! finance guidance. Anything outside personal finance, loans and budgeting
//! is politely declined.

mod topics;

pub use topics::{classify, Topic};

use serde::{Deserialize, Serialize};

use crate::finances::{BudgetCheck, FinanceRecord, FinanceSummary};
use crate::loan::narrative::{format_amount, payoff_text};
use crate::loan::ProjectionEngine;

/// Replies are kept under this many words
pub const MAX_REPLY_WORDS: usize = 100;

pub const DECLINE_REPLY: &str = "I can only help with personal finance, loans and budgeting. \
     Try asking about your budget, your loan payoff, your spending or saving for retirement.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Stateless responder; conversation state lives in [`Conversation`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Assistant {
    engine: ProjectionEngine,
}

impl Assistant {
    pub fn new(engine: ProjectionEngine) -> Self {
        Self { engine }
    }

    pub fn respond(&self, message: &str, finances: &FinanceRecord) -> String {
        let reply = match classify(message) {
            Topic::Greeting => "Hi! I'm your FYWISE assistant. Ask me about your budget, \
                 your loan, your spending or how to save."
                .to_string(),
            Topic::Loans => self.loan_reply(finances),
            Topic::Budgeting => budget_reply(finances),
            Topic::Expenses => expenses_reply(finances),
            Topic::Income => income_reply(finances),
            Topic::Savings => savings_reply(finances),
            Topic::Retirement => "Take your employer's full 401(k) or 403(b) match first, it is \
                 free money. A Roth IRA grows tax-free for retirement, a traditional IRA can lower \
                 taxes today, and an HSA is triple tax-advantaged for medical costs. A brokerage \
                 account is flexible but has no tax advantages."
                .to_string(),
            Topic::Goals => "Make your goals SMART: Specific, Measurable, Achievable, Relevant \
                 and Time-bound. For example, save $1,800 for an emergency fund in six months by \
                 setting aside $300 a month. Break big goals into smaller steps."
                .to_string(),
            Topic::OffTopic => DECLINE_REPLY.to_string(),
        };
        limit_words(&reply, MAX_REPLY_WORDS)
    }

    fn loan_reply(&self, finances: &FinanceRecord) -> String {
        let loan = finances.loan();
        let result = self.engine.project(&loan);
        let mut reply = payoff_text(&loan, &result);

        if result.rate_applied {
            if let Some(first) = result.schedule.first() {
                reply.push_str(&format!(
                    " Right now about ${} of each payment goes to interest. Paying a little extra \
                     each month shortens the payoff and cuts total interest.",
                    format_amount(first.interest_portion, 0)
                ));
            }
        } else if loan.is_projectable() {
            reply.push_str(
                " Add your interest rate so I can include interest in this estimate. If your \
                 payment barely covers interest, paying more is the fastest way to make progress.",
            );
        }
        reply
    }
}

fn budget_reply(finances: &FinanceRecord) -> String {
    match BudgetCheck::evaluate(finances) {
        Some(check) => {
            let advice = if check.on_track() {
                "You're within the 50/30/20 guideline, nice work."
            } else if check.needs.off_target {
                "Your needs are above 50%, so look at housing, transport and utilities first."
            } else if check.wants.off_target {
                "Your wants are above 30%, so trimming eating out and subscriptions would help."
            } else {
                "Try to move more toward savings and paying down debt."
            };
            format!("{} {}", check.describe(), advice)
        }
        None => "Add your monthly income so I can check your budget against the 50/30/20 rule: \
                 50% needs, 30% wants and 20% savings or debt repayment."
            .to_string(),
    }
}

fn expenses_reply(finances: &FinanceRecord) -> String {
    let summary = FinanceSummary::from_record(finances);
    match summary.largest_expense() {
        Some(top) => format!(
            "You spend about ${} a month. Your largest expense is {} at ${} ({:.0}% of spending). \
             Tracking spending creates control, so review the biggest categories first.",
            format_amount(summary.total_expenses, 0),
            top.label.to_lowercase(),
            format_amount(top.amount, 0),
            top.share_pct,
        ),
        None => "You haven't entered any expenses yet. Add them in your financial details to \
                 see where your money goes."
            .to_string(),
    }
}

fn income_reply(finances: &FinanceRecord) -> String {
    let summary = FinanceSummary::from_record(finances);
    format!(
        "Your total monthly income is ${} (${} from your main job and ${} on the side). \
         As income grows, raise your savings contributions too.",
        format_amount(summary.total_income, 0),
        format_amount(finances.monthly_income, 0),
        format_amount(finances.side_income, 0),
    )
}

fn savings_reply(finances: &FinanceRecord) -> String {
    let summary = FinanceSummary::from_record(finances);
    let emergency_low = summary.total_expenses * 3.0;
    let emergency_high = summary.total_expenses * 6.0;
    format!(
        "You could save about ${} a month ({:.0}% of income). Pay yourself first and aim for an \
         emergency fund of 3 to 6 months of expenses, roughly ${} to ${}. Starting early lets \
         compound interest work for you.",
        format_amount(summary.estimated_savings, 0),
        summary.savings_rate_pct,
        format_amount(emergency_low, 0),
        format_amount(emergency_high, 0),
    )
}

/// Truncate to at most `max_words` words, ending with an ellipsis when cut
fn limit_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    let mut cut = words[..max_words].join(" ");
    cut.push_str("...");
    cut
}

/// Ordered chat history for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Record the user's message and the assistant's reply. Blank messages
    /// are ignored and return `None`.
    pub fn send(
        &mut self,
        assistant: &Assistant,
        message: &str,
        finances: &FinanceRecord,
    ) -> Option<&ChatMessage> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: message.to_string(),
        });
        let reply = assistant.respond(message, finances);
        self.messages.push(ChatMessage {
            sender: Sender::Assistant,
            text: reply,
        });
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
