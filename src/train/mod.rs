pub mod trainer;

pub use trainer::train_epoch;
