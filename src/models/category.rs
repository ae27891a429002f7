use serde::{Deserialize, Serialize};

/// Fixed category set shared by transactions, budgets and templates.
///
/// Serialized as snake_case keys; the same keys travel over the sync wire
/// as `category_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Housing,
    Utilities,
    Groceries,
    DiningOut,
    Transport,
    Health,
    Entertainment,
    Shopping,
    Education,
    Travel,
    Salary,
    Interest,
    Gifts,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Groceries => "Groceries",
            Self::DiningOut => "Dining Out",
            Self::Transport => "Transport",
            Self::Health => "Health",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Salary => "Salary",
            Self::Interest => "Interest",
            Self::Gifts => "Gifts",
            Self::Other => "Other",
        }
    }

    /// Stable snake_case key used in persisted state and on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Groceries => "groceries",
            Self::DiningOut => "dining_out",
            Self::Transport => "transport",
            Self::Health => "health",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Education => "education",
            Self::Travel => "travel",
            Self::Salary => "salary",
            Self::Interest => "interest",
            Self::Gifts => "gifts",
            Self::Other => "other",
        }
    }

    /// Parse a user-entered name or key. Unknown input maps to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "housing" | "rent" => Self::Housing,
            "utilities" => Self::Utilities,
            "groceries" => Self::Groceries,
            "dining_out" | "dining" | "restaurants" => Self::DiningOut,
            "transport" | "transportation" => Self::Transport,
            "health" => Self::Health,
            "entertainment" => Self::Entertainment,
            "shopping" => Self::Shopping,
            "education" => Self::Education,
            "travel" => Self::Travel,
            "salary" | "income" => Self::Salary,
            "interest" => Self::Interest,
            "gifts" | "gift" => Self::Gifts,
            _ => Self::Other,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Housing,
            Self::Utilities,
            Self::Groceries,
            Self::DiningOut,
            Self::Transport,
            Self::Health,
            Self::Entertainment,
            Self::Shopping,
            Self::Education,
            Self::Travel,
            Self::Salary,
            Self::Interest,
            Self::Gifts,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
