pub mod lexicon;
pub mod noop;
pub mod serpapi;
