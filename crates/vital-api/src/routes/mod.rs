pub mod find_matches;
pub mod grouping;
pub mod health;
pub mod matching;
pub mod medications;
pub mod patients;
pub mod updates;
