//! slipline-core: transaction records, statement profiles and the shared error type

pub mod error;
pub mod profile;
pub mod transaction;

pub use error::{Error, Result};
pub use profile::{ChannelAlias, RecipientRule, StatementProfile, TrailingOrder};
pub use transaction::{Direction, Transaction};
