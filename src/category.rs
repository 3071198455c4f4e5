//! The fixed table of categories a transaction can be tagged with.
//!
//! Categories are compiled into the binary and cannot be created or edited.
//! [CategoryTable] indexes them by ID once at startup.

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

/// The ID of a predefined category, e.g. "food-dining".
///
/// Transactions may refer to IDs that are not in the table. Such IDs are kept
/// as-is and displayed with the [UNKNOWN_CATEGORY] placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category ID, returning `None` for a blank string.
    ///
    /// There is exactly one way to say "no category": `None`.
    pub fn new(id: &str) -> Option<Self> {
        let id = id.trim();

        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_owned()))
        }
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which transaction types a category applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Only for money spent.
    Expense,
    /// Only for money earned.
    Income,
    /// For either type of transaction.
    Both,
}

impl CategoryKind {
    /// Whether a category of this kind can be used for a transaction of type `transaction_type`.
    pub fn applies_to(self, transaction_type: TransactionType) -> bool {
        matches!(
            (self, transaction_type),
            (CategoryKind::Both, _)
                | (CategoryKind::Expense, TransactionType::Expense)
                | (CategoryKind::Income, TransactionType::Income)
        )
    }
}

/// A predefined category along with how it should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The stable ID stored on transactions.
    pub id: &'static str,
    /// The human readable name.
    pub name: &'static str,
    /// An emoji shown next to the name.
    pub icon: &'static str,
    /// A hex color code used in charts.
    pub color: &'static str,
    /// The transaction types this category applies to.
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

/// The placeholder shown for category IDs that are not in the table.
pub static UNKNOWN_CATEGORY: Category = Category {
    id: "unknown",
    name: "Unknown",
    icon: "📝",
    color: "#6b7280",
    kind: CategoryKind::Both,
};

const fn category(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
    kind: CategoryKind,
) -> Category {
    Category {
        id,
        name,
        icon,
        color,
        kind,
    }
}

/// Every category a transaction can be tagged with, in display order.
pub static PREDEFINED_CATEGORIES: [Category; 19] = [
    category("food-dining", "Food & Dining", "🍽️", "#ef4444", CategoryKind::Expense),
    category("transportation", "Transportation", "🚗", "#3b82f6", CategoryKind::Expense),
    category("shopping", "Shopping", "🛍️", "#8b5cf6", CategoryKind::Expense),
    category("entertainment", "Entertainment", "🎬", "#f59e0b", CategoryKind::Expense),
    category("healthcare", "Healthcare", "🏥", "#10b981", CategoryKind::Expense),
    category("utilities", "Utilities", "💡", "#6366f1", CategoryKind::Expense),
    category("housing", "Housing", "🏠", "#f97316", CategoryKind::Expense),
    category("education", "Education", "📚", "#06b6d4", CategoryKind::Expense),
    category("travel", "Travel", "✈️", "#ec4899", CategoryKind::Expense),
    category("insurance", "Insurance", "🛡️", "#84cc16", CategoryKind::Expense),
    category("taxes", "Taxes", "💰", "#f43f5e", CategoryKind::Expense),
    category("other-expense", "Other Expense", "📝", "#6b7280", CategoryKind::Expense),
    category("salary", "Salary", "💼", "#10b981", CategoryKind::Income),
    category("freelance", "Freelance", "💻", "#3b82f6", CategoryKind::Income),
    category("investment", "Investment", "📈", "#f59e0b", CategoryKind::Income),
    category("business", "Business", "🏢", "#8b5cf6", CategoryKind::Income),
    category("gift", "Gift", "🎁", "#ec4899", CategoryKind::Income),
    category("refund", "Refund", "↩️", "#06b6d4", CategoryKind::Income),
    category("other-income", "Other Income", "📝", "#6b7280", CategoryKind::Income),
];

/// An immutable lookup table over a fixed list of categories.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: &'static [Category],
    by_id: HashMap<&'static str, usize>,
}

impl CategoryTable {
    /// Index `categories` by ID.
    ///
    /// If two categories share an ID, the first one wins.
    pub fn new(categories: &'static [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());

        for (index, category) in categories.iter().enumerate() {
            by_id.entry(category.id).or_insert(index);
        }

        Self { categories, by_id }
    }

    /// The table of [PREDEFINED_CATEGORIES].
    pub fn predefined() -> Self {
        Self::new(&PREDEFINED_CATEGORIES)
    }

    /// All categories in display order.
    pub fn all(&self) -> &'static [Category] {
        self.categories
    }

    /// Find a category by its ID.
    pub fn get(&self, id: &str) -> Option<&'static Category> {
        self.by_id.get(id).map(|&index| &self.categories[index])
    }

    /// Find a category by its ID, falling back to [UNKNOWN_CATEGORY].
    pub fn get_or_unknown(&self, id: &str) -> &'static Category {
        self.get(id).unwrap_or(&UNKNOWN_CATEGORY)
    }

    /// Find a category by its display name.
    pub fn get_by_name(&self, name: &str) -> Option<&'static Category> {
        self.categories
            .iter()
            .find(|category| category.name == name)
    }

    /// The categories that can be used for transactions of `transaction_type`.
    pub fn for_type(&self, transaction_type: TransactionType) -> Vec<&'static Category> {
        self.categories
            .iter()
            .filter(|category| category.kind.applies_to(transaction_type))
            .collect()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::predefined()
    }
}
