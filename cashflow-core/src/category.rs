//! Category taxonomy, visual style lookup, and keyword-based inference.
//!
//! Categories arrive from the store as free-text labels. The engine resolves
//! them through a closed enum with an explicit `Unknown` variant so that an
//! unrecognized label degrades to the default style instead of falling
//! through a stringly-typed match.

use serde::{Deserialize, Serialize};

/// Known spending/income categories plus `Unknown` for unrecognized labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Entertainment,
    Transport,
    Shopping,
    Bills,
    Essentials,
    Health,
    Work,
    Freelance,
    Gift,
    Investments,
    Other,
    Unknown,
}

/// Icon glyphs the presentation layer knows how to render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Utensils,
    Music,
    Car,
    ShoppingBag,
    Zap,
    Home,
    TrendingUp,
    TrendingDown,
    Briefcase,
    Gift,
    HelpCircle,
    AlertTriangle,
    CreditCard,
    Wallet,
}

/// Visual descriptor resolved from a category: theme color token,
/// background token, and icon glyph.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StyleTokens {
    pub color: &'static str,
    pub background: &'static str,
    pub icon: IconKind,
}

impl StyleTokens {
    pub const fn new(color: &'static str, background: &'static str, icon: IconKind) -> Self {
        Self {
            color,
            background,
            icon,
        }
    }
}

impl Category {
    /// Resolve a raw label by exact string equality. Total: anything
    /// unrecognized maps to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Food" => Category::Food,
            "Entertainment" => Category::Entertainment,
            "Transport" => Category::Transport,
            "Shopping" => Category::Shopping,
            "Bills" => Category::Bills,
            "Essentials" => Category::Essentials,
            "Health" => Category::Health,
            "Work" => Category::Work,
            "Freelance" => Category::Freelance,
            "Gift" => Category::Gift,
            "Investments" => Category::Investments,
            "Other" => Category::Other,
            _ => Category::Unknown,
        }
    }

    /// Canonical display label. `Unknown` renders as "Other".
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Essentials => "Essentials",
            Category::Health => "Health",
            Category::Work => "Work",
            Category::Freelance => "Freelance",
            Category::Gift => "Gift",
            Category::Investments => "Investments",
            Category::Other | Category::Unknown => "Other",
        }
    }

    /// Visual style for list rows and notices. Never fails; unknown
    /// categories get the gray fallback style.
    pub fn style(&self) -> StyleTokens {
        match self {
            Category::Food => StyleTokens::new("neon-red", "neon-red/10", IconKind::Utensils),
            Category::Entertainment => {
                StyleTokens::new("brand-purple", "brand-purple/10", IconKind::Music)
            }
            Category::Transport => StyleTokens::new("neon-green", "neon-green/10", IconKind::Car),
            Category::Shopping => {
                StyleTokens::new("brand-blue", "brand-blue/10", IconKind::ShoppingBag)
            }
            Category::Bills => StyleTokens::new("brand-yellow", "brand-yellow/10", IconKind::Zap),
            Category::Essentials => StyleTokens::new("orange", "orange/10", IconKind::Home),
            Category::Health => {
                StyleTokens::new("brand-yellow", "brand-yellow/10", IconKind::TrendingUp)
            }
            Category::Work => StyleTokens::new("neon-green", "neon-green/10", IconKind::Briefcase),
            Category::Freelance => {
                StyleTokens::new("neon-green", "neon-green/10", IconKind::Briefcase)
            }
            Category::Gift => StyleTokens::new("brand-purple", "brand-purple/10", IconKind::Gift),
            Category::Investments => {
                StyleTokens::new("brand-blue", "brand-blue/10", IconKind::TrendingUp)
            }
            Category::Other | Category::Unknown => {
                StyleTokens::new("gray", "gray/10", IconKind::HelpCircle)
            }
        }
    }

    /// Hex color used for chart segments and category bars.
    pub fn chart_color(&self) -> &'static str {
        match self {
            Category::Food => "#E74C3C",
            Category::Entertainment => "#9B59B6",
            Category::Transport => "#2ECC71",
            Category::Shopping => "#3498DB",
            Category::Bills => "#F1C40F",
            Category::Essentials => "#D35400",
            Category::Health => "#E67E22",
            Category::Work => "#1ABC9C",
            _ => "#95A5A6",
        }
    }
}

/// Infer a category from unstructured receipt text.
///
/// Scans lowercased text against ordered keyword groups; the first group
/// with any hit wins, no scoring. Falls back to `Other`.
pub fn classify_text(raw: &str) -> Category {
    let text = raw.to_lowercase();
    let groups: [(&[&str], Category); 6] = [
        (
            &["food", "restaurant", "coffee", "cafe", "bistro", "kitchen"],
            Category::Food,
        ),
        (
            &["movie", "cinema", "theatre", "entertainment"],
            Category::Entertainment,
        ),
        (
            &["fuel", "petrol", "diesel", "uber", "ola", "pump"],
            Category::Transport,
        ),
        (
            &["mart", "store", "market", "retail", "grocery"],
            Category::Shopping,
        ),
        (
            &["hospital", "pharmacy", "clinic", "med"],
            Category::Health,
        ),
        (
            &["bill", "recharge", "electricity", "water", "wifi"],
            Category::Bills,
        ),
    ];

    for (keywords, category) in groups {
        if keywords.iter().any(|k| text.contains(k)) {
            return category;
        }
    }
    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(Category::from_label("Food"), Category::Food);
        assert_eq!(Category::from_label("Investments"), Category::Investments);
    }

    #[test]
    fn test_from_label_unknown_degrades() {
        let cat = Category::from_label("Cryptozoology");
        assert_eq!(cat, Category::Unknown);
        assert_eq!(cat.style().icon, IconKind::HelpCircle);
        assert_eq!(cat.chart_color(), "#95A5A6");
    }

    #[test]
    fn test_style_is_total() {
        // Every variant resolves to something; spot-check a few.
        assert_eq!(Category::Food.style().color, "neon-red");
        assert_eq!(Category::Shopping.style().icon, IconKind::ShoppingBag);
        assert_eq!(Category::Other.style().icon, IconKind::HelpCircle);
    }

    #[test]
    fn test_classify_starbucks_is_food() {
        assert_eq!(classify_text("Starbucks Coffee Receipt"), Category::Food);
    }

    #[test]
    fn test_classify_first_group_wins() {
        // "cafe" (Food) appears before "cinema" (Entertainment) in group order,
        // so a text containing both is Food.
        assert_eq!(classify_text("cinema cafe combo"), Category::Food);
    }

    #[test]
    fn test_classify_fallback_is_other() {
        assert_eq!(classify_text("xyzzy plugh"), Category::Other);
    }

    #[test]
    fn test_classify_bills() {
        assert_eq!(classify_text("Electricity recharge JULY"), Category::Bills);
    }
}
