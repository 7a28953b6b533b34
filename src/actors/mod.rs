#[cfg(test)]
mod tests;
mod transaction_actor;

pub use transaction_actor::TransactionActor;
