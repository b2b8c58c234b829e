pub mod extract;
pub mod filter;
pub mod parser;
pub mod region;
pub mod timing;
pub mod traits;
pub mod types;
pub mod willhaben;

#[cfg(test)]
pub mod testing;

pub use timing::RandomJitter;
pub use willhaben::WillhabenScraper;
