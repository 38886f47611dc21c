pub mod bank_loader;

pub use bank_loader::{load_bank, save_bank, to_pretty_json, BankLoad};
