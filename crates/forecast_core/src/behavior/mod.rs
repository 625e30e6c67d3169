pub mod best_alternative;
pub mod capacity_weighted;
pub mod even_split;
pub mod model;
pub mod seeded_choice;

pub use best_alternative::BestAlternative;
pub use capacity_weighted::CapacityWeighted;
pub use even_split::EvenSplit;
pub use model::{Alternative, BehaviorModel};
pub use seeded_choice::SeededChoice;
