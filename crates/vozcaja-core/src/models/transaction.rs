//! Movement records produced by the transcript interpreter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum length of a synthesized description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 50;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Money received (ingreso).
    Inflow,
    /// Money spent (egreso).
    Outflow,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Outflow
    }
}

impl Direction {
    /// Spanish label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Inflow => "Ingreso",
            Direction::Outflow => "Gasto",
        }
    }

    /// Stable key used in serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            Direction::Inflow => "inflow",
            Direction::Outflow => "outflow",
        }
    }

    /// Parse a direction from its key or a Spanish label.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inflow" | "ingreso" => Some(Direction::Inflow),
            "outflow" | "egreso" | "gasto" => Some(Direction::Outflow),
            _ => None,
        }
    }

    /// Sign applied to the amount when computing a balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            Direction::Inflow => amount,
            Direction::Outflow => -amount,
        }
    }
}

/// Fixed set of movement categories.
///
/// Declaration order is the tie-break order of the category scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Health,
    Entertainment,
    Education,
    Clothing,
    Home,
    Salary,
    Freelance,
    Investment,
    Gift,
    Travel,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl Category {
    /// All categories in scoring order.
    pub const ALL: [Category; 14] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Health,
        Category::Entertainment,
        Category::Education,
        Category::Clothing,
        Category::Home,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Gift,
        Category::Travel,
        Category::Other,
    ];

    /// Spanish label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Comida",
            Category::Transport => "Transporte",
            Category::Utilities => "Servicios",
            Category::Health => "Salud",
            Category::Entertainment => "Entretenimiento",
            Category::Education => "Educación",
            Category::Clothing => "Ropa",
            Category::Home => "Hogar",
            Category::Salary => "Sueldo",
            Category::Freelance => "Freelance",
            Category::Investment => "Inversión",
            Category::Gift => "Regalo",
            Category::Travel => "Viaje",
            Category::Other => "Otro",
        }
    }

    /// Stable key used in serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Health => "health",
            Category::Entertainment => "entertainment",
            Category::Education => "education",
            Category::Clothing => "clothing",
            Category::Home => "home",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Gift => "gift",
            Category::Travel => "travel",
            Category::Other => "other",
        }
    }

    /// Parse a category from its key or its Spanish label (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s || c.label().to_lowercase() == s)
    }
}

/// A movement extracted from one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Whether money came in or went out.
    pub direction: Direction,

    /// Extracted magnitude. Zero means no amount was detected.
    pub amount: Decimal,

    /// Human-readable label, at most [`MAX_DESCRIPTION_CHARS`] characters.
    pub description: String,

    /// Best-scoring category.
    pub category: Category,
}

impl ParsedTransaction {
    /// Whether the amount was detected. Callers must not record a movement otherwise.
    pub fn has_amount(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Amount with the direction's sign applied.
    pub fn signed_amount(&self) -> Decimal {
        self.direction.signed(self.amount)
    }

    /// Check the record against its invariants, returning the list of issues.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.amount < Decimal::ZERO {
            issues.push(format!("Amount is negative: {}", self.amount));
        }

        if self.amount.is_zero() {
            issues.push("Amount not detected".to_string());
        }

        if self.description.trim().is_empty() {
            issues.push("Missing description".to_string());
        }

        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_CHARS {
            issues.push(format!(
                "Description is {} characters long (limit {})",
                len, MAX_DESCRIPTION_CHARS
            ));
        }

        issues
    }
}
