pub mod analyzer;
pub mod categories;
mod counter;
pub mod driver;
pub mod errors;
mod information;
pub mod input;
pub mod mattr;
pub mod model;
pub mod output;
mod parallelism;
pub mod perceptron;
pub mod rules;
pub mod tokenize;
