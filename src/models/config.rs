//! Quiz options chosen before a round starts.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// Trivia categories offered by the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Category {
    #[default]
    General,
    Sports,
    Geography,
    History,
    Books,
    Movies,
    Tv,
    Animals,
}

impl Category {
    /// Display order of the category selector.
    pub const ALL: [Category; 8] = [
        Category::General,
        Category::Sports,
        Category::Geography,
        Category::History,
        Category::Books,
        Category::Movies,
        Category::Tv,
        Category::Animals,
    ];

    /// Numeric id understood by the trivia service.
    pub fn id(self) -> u32 {
        match self {
            Category::General => 9,
            Category::Books => 10,
            Category::Movies => 11,
            Category::Tv => 14,
            Category::Sports => 21,
            Category::Geography => 22,
            Category::History => 23,
            Category::Animals => 27,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Sports => "Sports",
            Category::Geography => "Geography",
            Category::History => "History",
            Category::Books => "Books",
            Category::Movies => "Movies",
            Category::Tv => "TV",
            Category::Animals => "Animals",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Query value understood by the trivia service.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Number of questions per round, restricted to the offered choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const ALLOWED: [u32; 2] = [5, 10];

    pub fn new(count: u32) -> Option<Self> {
        Self::ALLOWED.contains(&count).then_some(Self(count))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(cycle(&Self::ALLOWED, self.0, 1))
    }

    pub fn previous(self) -> Self {
        Self(cycle(&Self::ALLOWED, self.0, Self::ALLOWED.len() - 1))
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::ALLOWED[0])
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a number", s))?;
        Self::new(count).ok_or_else(|| {
            format!(
                "question count must be one of {:?}, got {}",
                Self::ALLOWED,
                count
            )
        })
    }
}

/// Options for the next round. Changing them never triggers a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizConfiguration {
    pub category: Category,
    pub difficulty: Difficulty,
    pub question_count: QuestionCount,
}

impl QuizConfiguration {
    /// Query parameters for the trivia service, in request order.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("amount", self.question_count.get().to_string()),
            ("difficulty", self.difficulty.as_str().to_string()),
            ("category", self.category.id().to_string()),
        ]
    }
}

fn cycle<T: Copy + PartialEq>(values: &[T], current: T, step: usize) -> T {
    let index = values.iter().position(|v| *v == current).unwrap_or(0);
    values[(index + step) % values.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let config = QuizConfiguration::default();
        assert_eq!(config.category, Category::General);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.question_count.get(), 5);
    }

    #[test]
    fn test_category_ids() {
        let ids: Vec<u32> = Category::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![9, 21, 22, 23, 10, 11, 14, 27]);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Category::Animals.next(), Category::General);
        assert_eq!(Category::General.previous(), Category::Animals);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(QuestionCount::default().next().get(), 10);
        assert_eq!(QuestionCount::default().previous().get(), 10);
    }

    #[test]
    fn test_question_count_parse() {
        assert_eq!("10".parse::<QuestionCount>().map(QuestionCount::get), Ok(10));
        assert!("7".parse::<QuestionCount>().is_err());
        assert!("ten".parse::<QuestionCount>().is_err());
    }

    #[test]
    fn test_query_pairs() {
        let config = QuizConfiguration {
            category: Category::History,
            difficulty: Difficulty::Hard,
            question_count: QuestionCount::new(10).unwrap(),
        };
        let pairs = config.query_pairs();
        assert_eq!(pairs[0], ("amount", "10".to_string()));
        assert_eq!(pairs[1], ("difficulty", "hard".to_string()));
        assert_eq!(pairs[2], ("category", "23".to_string()));
    }
}
