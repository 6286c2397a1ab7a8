//! Community posts, the spending history, and the leaderboard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::insights::date;
use crate::users::projections::one_decimal;

// ────────────────────────────────────────────────────────────────────────────
// Posts
// ────────────────────────────────────────────────────────────────────────────

pub const MILESTONE_CATEGORY: &str = "Milestone";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Post {
    pub id: u32,
    pub title: &'static str,
    pub content: &'static str,
    pub date: NaiveDate,
    pub likes: u32,
    pub comments: u32,
    pub category: &'static str,
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "My first week of recovery",
            content: "This has been a challenging but rewarding week. I've learned so much \
                      about myself and my triggers. The support from this community has been \
                      amazing.",
            date: date(2024, 1, 5),
            likes: 12,
            comments: 3,
            category: "Recovery Journey",
        },
        Post {
            id: 2,
            title: "Dealing with cravings",
            content: "Today was tough but I managed to stay strong. Meditation really helped \
                      me get through the difficult moments. Remembering why I started this \
                      journey kept me going.",
            date: date(2024, 1, 8),
            likes: 24,
            comments: 8,
            category: "Struggles",
        },
        Post {
            id: 3,
            title: "30 days clean!",
            content: "I can't believe I made it to 30 days! This community has been \
                      incredibly supportive. Thank you everyone for your encouragement and \
                      kind words!",
            date: date(2024, 1, 30),
            likes: 56,
            comments: 15,
            category: MILESTONE_CATEGORY,
        },
    ]
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostSummary {
    pub total_posts: usize,
    pub total_likes: u32,
    pub total_comments: u32,
    pub milestone_posts: usize,
    pub average_likes: u32,
    pub most_liked: Option<u32>,
    pub most_commented: Option<u32>,
}

/// Ties go to the earliest post.
fn top_by(posts: &[Post], key: impl Fn(&Post) -> u32) -> Option<u32> {
    posts
        .iter()
        .fold(None::<&Post>, |best, p| match best {
            Some(b) if key(b) >= key(p) => Some(b),
            _ => Some(p),
        })
        .map(|p| p.id)
}

pub fn post_summary(posts: &[Post]) -> PostSummary {
    let total_likes: u32 = posts.iter().map(|p| p.likes).sum();
    let average_likes = if posts.is_empty() {
        0
    } else {
        (total_likes as f64 / posts.len() as f64).round() as u32
    };
    PostSummary {
        total_posts: posts.len(),
        total_likes,
        total_comments: posts.iter().map(|p| p.comments).sum(),
        milestone_posts: posts.iter().filter(|p| p.category == MILESTONE_CATEGORY).count(),
        average_likes,
        most_liked: top_by(posts, |p| p.likes),
        most_commented: top_by(posts, |p| p.comments),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Financial
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Investment,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    pub id: u32,
    pub date: NaiveDate,
    pub description: &'static str,
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialRecord {
    pub initial_balance: u64,
    pub current_balance: u64,
    pub transactions: Vec<Transaction>,
}

impl FinancialRecord {
    pub fn total_spent(&self) -> u64 {
        self.initial_balance.saturating_sub(self.current_balance)
    }
}

pub fn sample_financials() -> FinancialRecord {
    use TransactionKind::*;

    let tx = |id, date, description, amount, kind, category| Transaction {
        id,
        date,
        description,
        amount,
        kind,
        category,
    };
    FinancialRecord {
        initial_balance: 50_000,
        current_balance: 12_500,
        transactions: vec![
            tx(1, date(2024, 1, 5), "Gaming Purchase - In-game currency", 5_000, Expense, "Gaming"),
            tx(2, date(2024, 1, 12), "Therapy Session", 2_000, Investment, "Recovery"),
            tx(3, date(2024, 1, 18), "Online Gaming Subscription", 1_500, Expense, "Gaming"),
            tx(4, date(2024, 1, 25), "Meditation App Subscription", 800, Investment, "Recovery"),
            tx(5, date(2024, 2, 1), "Gaming Equipment", 12_000, Expense, "Gaming"),
        ],
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialSummary {
    pub initial_balance: u64,
    pub current_balance: u64,
    pub total_spent: u64,
    pub expenses: Vec<Transaction>,
    pub investments: Vec<Transaction>,
    pub expenses_total: u64,
    pub investments_total: u64,
    /// Current balance as a share of the initial one, one decimal.
    pub saved_percent: String,
}

pub fn financial_summary(record: &FinancialRecord) -> FinancialSummary {
    let (expenses, investments): (Vec<Transaction>, Vec<Transaction>) = record
        .transactions
        .iter()
        .cloned()
        .partition(|t| t.kind == TransactionKind::Expense);
    let saved = if record.initial_balance == 0 {
        0.0
    } else {
        record.current_balance as f64 / record.initial_balance as f64 * 100.0
    };
    FinancialSummary {
        initial_balance: record.initial_balance,
        current_balance: record.current_balance,
        total_spent: record.total_spent(),
        expenses_total: expenses.iter().map(|t| t.amount).sum(),
        investments_total: investments.iter().map(|t| t.amount).sum(),
        expenses,
        investments,
        saved_percent: one_decimal(saved),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Leaderboard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaderboardEntry {
    pub id: u32,
    pub rank: u32,
    pub name: &'static str,
    pub initials: String,
    pub points: u32,
}

impl LeaderboardEntry {
    fn new(id: u32, rank: u32, name: &'static str, points: u32) -> Self {
        LeaderboardEntry {
            id,
            rank,
            name,
            initials: initials(name),
            points,
        }
    }
}

/// First character of each whitespace-separated word.
pub fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|w| w.chars().next()).collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AchievementProgress {
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeadlineStats {
    pub streak_days: u32,
    pub xp: u32,
    pub freedom_points: u32,
    pub achievements: AchievementProgress,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Leaderboard {
    pub stats: HeadlineStats,
    pub entries: Vec<LeaderboardEntry>,
}

pub fn sample_leaderboard() -> Leaderboard {
    let mut entries = vec![
        LeaderboardEntry::new(1, 1, "Ali Raza", 0),
        LeaderboardEntry::new(2, 2, "Kashif Raza", 0),
        LeaderboardEntry::new(3, 3, "Ali Ahmed", 0),
    ];
    entries.sort_by_key(|e| e.rank);
    Leaderboard {
        stats: HeadlineStats {
            streak_days: 7,
            xp: 2_000,
            freedom_points: 2_500,
            achievements: AchievementProgress { completed: 1, total: 2 },
        },
        entries,
    }
}
