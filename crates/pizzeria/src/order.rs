use std::fmt;

/// Outcome codes at or below this value mean the kitchen ran out of ingredients.
pub const OUT_OF_INGREDIENTS_CODE: u32 = 2;

/// Outcome codes at or below this value, and above [`OUT_OF_INGREDIENTS_CODE`],
/// mean the cook quit.
pub const COOK_QUIT_CODE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    OutOfIngredients,
    CookQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failed(Failure),
}

impl Outcome {
    /// Maps a drawn outcome code onto what happened to the pizza.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        match code {
            ..=OUT_OF_INGREDIENTS_CODE => Outcome::Failed(Failure::OutOfIngredients),
            ..=COOK_QUIT_CODE => Outcome::Failed(Failure::CookQuit),
            _ => Outcome::Success,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }

    #[must_use]
    pub fn message(self, number: u32) -> String {
        match self {
            Outcome::Success => format!("Pizza order #{number} is ready!"),
            Outcome::Failed(Failure::OutOfIngredients) => {
                format!("*** We ran out of ingredients for pizza #{number}!")
            }
            Outcome::Failed(Failure::CookQuit) => {
                format!("*** The cook quit while making pizza #{number}!")
            }
        }
    }
}

/// A single pizza order as handed from the kitchen to the counter.
///
/// An order without an outcome is the terminal sentinel: its number is past the
/// day's bound and it only says that the kitchen has nothing left to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    number: u32,
    message: String,
    outcome: Option<Outcome>,
}

impl Order {
    pub(crate) fn completed(number: u32, outcome: Outcome) -> Self {
        Self {
            number,
            message: outcome.message(number),
            outcome: Some(outcome),
        }
    }

    pub(crate) fn terminal(number: u32) -> Self {
        Self {
            number,
            message: String::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome.is_some_and(Outcome::is_success)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_none()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "order #{} (no more work)", self.number)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Running counts of made and failed pizzas.
///
/// `made + failed == total` holds after every call to [`Tally::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub made: u32,
    pub failed: u32,
    pub total: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        if outcome.is_success() {
            self.made += 1;
        } else {
            self.failed += 1;
        }
        self.total += 1;
    }

    /// Records a received order; terminal sentinels are not counted.
    pub fn record_order(&mut self, order: &Order) {
        if let Some(outcome) = order.outcome() {
            self.record(outcome);
        }
    }
}
